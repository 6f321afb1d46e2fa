use dioxus::prelude::*;

use super::VIEWS_CSS;

#[component]
pub fn NotFoundView(path: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            h1 { class: "view-title", "Página no encontrada" }
            p { "No existe la ruta /{path}." }
            Link { to: "/", class: "btn btn-primary", "Volver al mercado" }
        }
    }
}
