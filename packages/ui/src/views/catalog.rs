use api::models::Product;
use api::{CatalogQuery, PageRequest, PageResponse};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, EmptyState, Input, Pager, Select};
use crate::filters::{sort_products, ProductSort};
use crate::{use_api, use_error_reporter};

use super::VIEWS_CSS;

/// Public product catalog across all stands.
#[component]
pub fn CatalogView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();

    let mut page = use_signal(PageResponse::<Product>::default);
    let mut request = use_signal(|| api.peek().first_page());
    let mut query = use_signal(CatalogQuery::default);
    let mut search = use_signal(String::new);
    let mut categories = use_signal(Vec::<String>::new);
    let mut sort = use_signal(ProductSort::default);
    let mut loading = use_signal(|| true);

    let _categories = use_resource(move || async move {
        match api().categories().await {
            Ok(list) => categories.set(list),
            Err(e) => reporter.report("Failed to load categories", &e),
        }
    });

    let _loader = use_resource(move || async move {
        let client = api();
        let q = query();
        let req = request();
        loading.set(true);
        match client.catalog(&q, req).await {
            Ok(result) => page.set(result),
            Err(e) => reporter.report("Failed to load catalog", &e),
        }
        loading.set(false);
    });

    let products = use_memo(move || {
        let mut list = page.read().content.clone();
        sort_products(&mut list, sort());
        list
    });

    let current = page.read().clone();
    let selected_category = query.read().category.clone().unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            h1 { class: "view-title", "Catálogo de productos" }

            form {
                class: "view-toolbar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    query.write().search = search().trim().to_string();
                    request.set(PageRequest::first(request().size));
                },
                Input {
                    placeholder: "¿Qué estás buscando?",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                Button { variant: ButtonVariant::Primary, r#type: "submit", "Buscar" }
                Select {
                    value: selected_category,
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        query.write().category = (!value.is_empty()).then_some(value);
                        request.set(PageRequest::first(request().size));
                    },
                    option { value: "", "Todas las categorías" }
                    for cat in categories() {
                        option { key: "{cat}", value: "{cat}", "{cat}" }
                    }
                }
                Select {
                    value: format!("{:?}", sort()),
                    onchange: move |evt: FormEvent| {
                        sort.set(match evt.value().as_str() {
                            "PriceAsc" => ProductSort::PriceAsc,
                            "PriceDesc" => ProductSort::PriceDesc,
                            _ => ProductSort::Name,
                        })
                    },
                    option { value: "Name", "Nombre" }
                    option { value: "PriceAsc", "Precio: menor a mayor" }
                    option { value: "PriceDesc", "Precio: mayor a menor" }
                }
            }

            if loading() {
                EmptyState { message: "Cargando productos..." }
            } else if products.read().is_empty() {
                EmptyState { message: "No encontramos productos" }
            } else {
                div {
                    class: "product-grid",
                    for product in products() {
                        ProductCard { key: "{product.id}", product }
                    }
                }
            }

            Pager {
                label: current.label(),
                total: current.total_elements,
                has_previous: current.has_previous(),
                has_next: current.has_next(),
                on_previous: move |_| request.set(request().previous()),
                on_next: move |_| request.set(request().next()),
            }
        }
    }
}

/// One product tile. Links to the stand when the product carries one.
#[component]
pub(crate) fn ProductCard(product: Product) -> Element {
    rsx! {
        div {
            class: "card product-card",
            if let Some(src) = product.image_url.clone() {
                img { src: src, alt: "{product.name}" }
            }
            strong { "{product.name}" }
            span { class: "product-price", "{product.price_label()}" }
            if let Some(category) = product.category.clone() {
                span { class: "product-meta", "{category}" }
            }
            if let Some(description) = product.description.clone() {
                span { class: "product-meta", "{description}" }
            }
            if !product.available {
                span { class: "field-error", "Agotado" }
            }
            if let Some(stand_id) = product.stand_id {
                Link {
                    to: format!("/stands/{stand_id}"),
                    class: "product-meta",
                    {product.stand_name.clone().or(product.stand_code.clone()).unwrap_or_else(|| "Ver stand".to_string())}
                }
            }
        }
    }
}
