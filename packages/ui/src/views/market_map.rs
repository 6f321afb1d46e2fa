use api::models::{StandMapItem, StandStatus};
use dioxus::prelude::*;

use crate::components::{Badge, BadgeTone, EmptyState, Input, Select};
use crate::filters::{categories_of, filter_map_items};
use crate::stand_grid::StandGrid;
use crate::{use_api, use_error_reporter};

use super::VIEWS_CSS;

fn stall_class(status: StandStatus) -> &'static str {
    match status {
        StandStatus::Activo => "stall stall-activo",
        StandStatus::Inactivo => "stall stall-inactivo",
        StandStatus::Mantenimiento => "stall stall-mantenimiento",
        StandStatus::Clausurado => "stall stall-clausurado",
    }
}

/// Public map of the market: every stand, grouped by block in four columns.
#[component]
pub fn MarketMapView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let mut items = use_signal(Vec::<StandMapItem>::new);
    let mut loading = use_signal(|| true);
    let mut search = use_signal(String::new);
    let mut category = use_signal(String::new);

    let _loader = use_resource(move || async move {
        loading.set(true);
        match api().stand_map().await {
            Ok(list) => items.set(list),
            Err(e) => reporter.report("Failed to load stand map", &e),
        }
        loading.set(false);
    });

    let categories = use_memo(move || {
        categories_of(items.read().iter().map(|i| i.category.as_deref()))
    });

    let grid = use_memo(move || {
        let selected = category();
        let filtered = filter_map_items(&items.read(), &search(), Some(selected.as_str()));
        StandGrid::layout(&filtered)
    });

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Mapa del mercado" }
                div {
                    class: "view-toolbar",
                    for status in StandStatus::ALL.iter() {
                        Badge { tone: BadgeTone::from(*status), "{status.label()}" }
                    }
                }
            }

            div {
                class: "view-toolbar",
                Input {
                    placeholder: "Buscar stand, negocio o rubro",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                Select {
                    value: category(),
                    onchange: move |evt: FormEvent| category.set(evt.value()),
                    option { value: "", "Todos los rubros" }
                    for cat in categories() {
                        option { key: "{cat}", value: "{cat}", "{cat}" }
                    }
                }
                span { class: "product-meta", "{grid.read().stand_count()} stands" }
            }

            if loading() {
                EmptyState { message: "Cargando mapa..." }
            } else if grid.read().is_empty() {
                EmptyState { message: "Ningún stand coincide con la búsqueda" }
            } else {
                div {
                    class: "stand-grid",
                    for (i, column) in grid().columns.into_iter().enumerate() {
                        div {
                            key: "{i}",
                            class: "stand-column",
                            for group in column {
                                div {
                                    key: "{group.block}",
                                    class: "card block-card",
                                    h3 { "Bloque {group.block}" }
                                    div {
                                        class: "block-stands",
                                        for stand in group.stands {
                                            Link {
                                                key: "{stand.id}",
                                                to: format!("/stands/{}", stand.id),
                                                class: stall_class(stand.status),
                                                span { class: "stall-code", "{stand.code()}" }
                                                span { {stand.business_name.clone().unwrap_or_default()} }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
