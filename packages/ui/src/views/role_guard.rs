use api::Role;
use chrono::Utc;
use dioxus::prelude::*;

use crate::components::use_toast;
use crate::guard::{decide, GuardDecision, LOGIN_PATH};
use crate::{sign_out, use_auth};

use super::VIEWS_CSS;

/// Renders its children only for a logged-in user holding one of `allowed`.
/// Everyone else is sent to the login page or to their own landing page.
#[component]
pub fn RoleGuard(allowed: Vec<Role>, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let toasts = use_toast();
    let decision = use_memo(move || decide(&auth.read(), &allowed, Utc::now()));

    use_effect(move || match decision() {
        GuardDecision::Login => {
            if auth.peek().session.is_some() {
                tracing::info!("Session expired, signing out");
                sign_out(auth);
            }
            nav.replace(LOGIN_PATH);
        }
        GuardDecision::Forbidden { redirect } => {
            tracing::info!("Access denied, redirecting to {redirect}");
            toasts.error("No tienes permiso para ver esa página");
            nav.replace(redirect);
        }
        GuardDecision::Pending | GuardDecision::Allow => {}
    });

    match decision() {
        GuardDecision::Allow => rsx! { {children} },
        GuardDecision::Pending => rsx! {
            document::Link { rel: "stylesheet", href: VIEWS_CSS }
            div { class: "guard-pending", "Verificando sesión..." }
        },
        GuardDecision::Login | GuardDecision::Forbidden { .. } => rsx! {},
    }
}
