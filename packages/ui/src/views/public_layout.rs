use dioxus::prelude::*;

use crate::guard::landing_path;
use crate::{use_auth, LogoutButton};

use super::VIEWS_CSS;

/// Storefront header with the public navigation.
#[component]
pub fn PublicLayoutView(children: Element) -> Element {
    let auth = use_auth();
    let role = auth.read().role();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        header {
            class: "public-header",
            Link { to: "/", class: "public-brand", "Mercado Mayorista" }
            nav {
                class: "public-nav",
                Link { to: "/", "Mapa de stands" }
                Link { to: "/catalogo", "Catálogo" }
            }
            match role {
                Some(role) => rsx! {
                    if landing_path(role) != "/" {
                        Link { to: landing_path(role), class: "btn btn-secondary", "Mi panel" }
                    }
                    LogoutButton { class: "btn btn-outline" }
                },
                None => rsx! {
                    Link { to: "/login", class: "btn btn-primary", "Ingresar" }
                },
            }
        }
        main { {children} }
    }
}
