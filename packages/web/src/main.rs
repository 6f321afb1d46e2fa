use api::{ApiClient, ApiConfig};
use dioxus::prelude::*;

use ui::{AuthProvider, ToastProvider};
use views::{
    AdminGuard, AdminStands, Catalog, Credentials, Dashboard, Incidents, Login, MarketMap,
    NotFound, OwnerGuard, OwnerStand, Payments, PublicLayout, StandProfile, Users,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(PublicLayout)]
        #[route("/")]
        MarketMap {},
        #[route("/catalogo")]
        Catalog {},
        #[route("/stands/:id")]
        StandProfile { id: i64 },
    #[end_layout]

    #[route("/login")]
    Login {},

    #[layout(AdminGuard)]
        #[route("/admin")]
        Dashboard {},
        #[route("/admin/stands")]
        AdminStands {},
        #[route("/admin/usuarios")]
        Users {},
        #[route("/admin/pagos")]
        Payments {},
        #[route("/admin/incidencias")]
        Incidents {},
        #[route("/admin/credenciales")]
        Credentials {},
    #[end_layout]

    #[layout(OwnerGuard)]
        #[route("/mi-stand")]
        OwnerStand {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let client = use_hook(|| {
        let config = ApiConfig::from_env();
        tracing::info!("Backend at {}", config.base_url);
        ApiClient::new(&config)
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        match client {
            Ok(client) => rsx! { Shell { client } },
            Err(e) => rsx! { ConfigError { message: e.to_string() } },
        }
    }
}

/// Provides the API client, toasts and session to every route.
#[component]
fn Shell(client: ApiClient) -> Element {
    use_context_provider(|| client.clone());

    rsx! {
        ToastProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn ConfigError(message: String) -> Element {
    tracing::error!("Invalid configuration: {message}");
    rsx! {
        div {
            class: "config-error",
            h1 { "Configuración inválida" }
            p { "{message}" }
            p {
                "Revisa la variable "
                code { "MERCADO_API_URL" }
                " y vuelve a compilar."
            }
        }
    }
}
