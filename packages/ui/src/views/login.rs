//! Email/password login shared by every platform.

use api::ClaimsError;
use chrono::Utc;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, FormField, Input};
use crate::forms::{FormErrors, LoginForm};
use crate::guard::{landing_path, login_redirect};
use crate::{sign_in, use_api, use_auth};

use super::VIEWS_CSS;

#[component]
pub fn LoginView() -> Element {
    let auth = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut errors = use_signal(FormErrors::new);
    let mut failure = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already logged in: go straight to the landing page.
    use_effect(move || {
        if let Some(path) = login_redirect(&auth.read(), Utc::now()) {
            nav.replace(path);
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        failure.set(None);
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FormErrors::new());
        spawn(async move {
            loading.set(true);
            let result = api().login(&request.email, &request.password).await;
            loading.set(false);
            match result {
                Ok(token) => match sign_in(auth, token) {
                    Ok(role) => {
                        nav.replace(landing_path(role));
                    }
                    Err(ClaimsError::Expired) => {
                        tracing::warn!("Backend issued an already expired token");
                        failure.set(Some("La sesión recibida ya expiró, revisa la hora del equipo".to_string()));
                    }
                    Err(e) => {
                        tracing::error!("Backend issued an unreadable token: {e}");
                        failure.set(Some("El servidor devolvió una sesión no válida".to_string()));
                    }
                },
                Err(e) => {
                    tracing::warn!("Login failed: {e}");
                    failure.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "login-page",
            form {
                class: "card login-card",
                onsubmit: handle_login,
                h1 { class: "view-title", "Mercado Mayorista" }
                p { class: "product-meta", "Ingresa con tu cuenta" }

                if let Some(message) = failure() {
                    p { class: "field-error", "{message}" }
                }

                FormField {
                    label: "Correo",
                    html_for: "login-email",
                    error: errors.read().get("email"),
                    Input {
                        id: "login-email",
                        r#type: "email",
                        placeholder: "usuario@mercado.pe",
                        value: form.read().email.clone(),
                        invalid: errors.read().has("email"),
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                FormField {
                    label: "Contraseña",
                    html_for: "login-password",
                    error: errors.read().get("password"),
                    Input {
                        id: "login-password",
                        r#type: "password",
                        value: form.read().password.clone(),
                        invalid: errors.read().has("password"),
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Ingresando..." } else { "Ingresar" }
                }
                Link { to: "/", class: "product-meta", "Volver al mercado" }
            }
        }
    }
}
