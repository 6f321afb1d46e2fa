use api::models::StandProfile;
use dioxus::prelude::*;

use crate::components::{Badge, BadgeTone, EmptyState, Input};
use crate::filters::{filter_products, sort_products, ProductSort};
use crate::{use_api, use_error_reporter};

use super::catalog::ProductCard;
use super::VIEWS_CSS;

/// Public page of a single stand with its products.
#[component]
pub fn StandProfileView(id: i64) -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let mut profile = use_signal(|| Option::<StandProfile>::None);
    let mut loading = use_signal(|| true);
    let mut search = use_signal(String::new);
    let mut available_only = use_signal(|| false);

    let _loader = use_resource(use_reactive!(|id| async move {
        loading.set(true);
        match api().stand_profile(id).await {
            Ok(result) => profile.set(Some(result)),
            Err(e) => {
                profile.set(None);
                reporter.report("Failed to load stand profile", &e);
            }
        }
        loading.set(false);
    }));

    let products = use_memo(move || {
        let guard = profile.read();
        let Some(profile) = guard.as_ref() else {
            return Vec::new();
        };
        let mut list = filter_products(&profile.products, &search(), None, available_only());
        sort_products(&mut list, ProductSort::Name);
        list
    });

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            Link { to: "/", class: "product-meta", "← Volver al mapa" }

            if loading() {
                EmptyState { message: "Cargando stand..." }
            } else if let Some(profile) = profile() {
                div {
                    class: "card",
                    div {
                        class: "view-header",
                        h1 { class: "view-title", "{profile.stand.title()}" }
                        Badge { tone: BadgeTone::from(profile.stand.status), "{profile.stand.status.label()}" }
                    }
                    p { class: "product-meta", "Stand {profile.stand.code()}" }
                    if let Some(category) = profile.stand.category.clone() {
                        p { "Rubro: {category}" }
                    }
                    if let Some(description) = profile.stand.description.clone() {
                        p { "{description}" }
                    }
                    if let Some(phone) = profile.stand.phone.clone() {
                        p { "Teléfono: {phone}" }
                    }
                    if let Some(owner) = profile.stand.owner_name.clone() {
                        p { class: "product-meta", "Atendido por {owner}" }
                    }
                }

                div {
                    class: "view-toolbar",
                    h2 { class: "view-section-title", "Productos ({profile.products.len()})" }
                    Input {
                        placeholder: "Buscar en este stand",
                        value: search(),
                        oninput: move |evt: FormEvent| search.set(evt.value()),
                    }
                    label {
                        class: "checkbox-row",
                        input {
                            r#type: "checkbox",
                            checked: available_only(),
                            onchange: move |evt: FormEvent| available_only.set(evt.checked()),
                        }
                        "Solo disponibles"
                    }
                }

                if products.read().is_empty() {
                    EmptyState { message: "Este stand aún no publica productos" }
                } else {
                    div {
                        class: "product-grid",
                        for product in products() {
                            ProductCard { key: "{product.id}", product }
                        }
                    }
                }
            } else {
                EmptyState { message: "No encontramos este stand" }
            }
        }
    }
}
