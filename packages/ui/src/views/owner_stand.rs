//! Owner area: the stand of the logged-in `PROPIETARIO` and its products.

use api::models::{Product, ProductRequest, Stand};
use dioxus::prelude::*;

use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, ConfirmDialog, EmptyState, FormField, Input,
    ModalOverlay, Textarea,
};
use crate::filters::{filter_products, remove_item, replace_item, sort_products, ProductSort};
use crate::forms::{FormErrors, IncidentForm, ProductForm};
use crate::icons::{FaPen, FaPlus, FaTrash, FaTriangleExclamation};
use crate::{use_api, use_auth, use_error_reporter, use_toast, Icon};

use super::incidents::IncidentFields;
use super::VIEWS_CSS;

#[component]
pub fn OwnerStandView() -> Element {
    let api = use_api();
    let auth = use_auth();
    let reporter = use_error_reporter();
    let toasts = use_toast();

    let mut stand = use_signal(|| Option::<Stand>::None);
    let mut products = use_signal(Vec::<Product>::new);
    let mut loading = use_signal(|| true);
    let mut search = use_signal(String::new);

    let mut editing = use_signal(|| Option::<Option<Product>>::None);
    let mut form = use_signal(ProductForm::default);
    let mut errors = use_signal(FormErrors::new);
    let mut saving = use_signal(|| false);
    let mut deleting = use_signal(|| Option::<Product>::None);

    let mut reporting = use_signal(|| false);
    let mut incident_form = use_signal(IncidentForm::default);
    let mut incident_errors = use_signal(FormErrors::new);

    let _loader = use_resource(move || async move {
        let client = api();
        loading.set(true);
        match client.my_stand().await {
            Ok(own) => stand.set(Some(own)),
            Err(e) => reporter.report("Failed to load own stand", &e),
        }
        match client.my_products().await {
            Ok(list) => products.set(list),
            Err(e) => reporter.report("Failed to load own products", &e),
        }
        loading.set(false);
    });

    let visible = use_memo(move || {
        let mut list = filter_products(&products.read(), &search(), None, false);
        sort_products(&mut list, ProductSort::Name);
        list
    });

    let mut open_editor = move |product: Option<Product>| {
        form.set(product.as_ref().map(ProductForm::from_product).unwrap_or_default());
        errors.set(FormErrors::new());
        editing.set(Some(product));
    };

    let handle_save = move |_| {
        let Some(target) = editing() else { return };
        let body = match form.read().validate() {
            Ok(body) => body,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let client = api();
            let result = match &target {
                None => client.create_product(&body).await,
                Some(product) => client.update_product(product.id, &body).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    toasts.success(format!("{} guardado", saved.name));
                    replace_item(&mut products.write(), saved);
                    editing.set(None);
                }
                Err(e) => reporter.report("Failed to save product", &e),
            }
        });
    };

    let toggle_available = move |product: Product| {
        let body = ProductRequest {
            available: !product.available,
            ..ProductRequest::from(&product)
        };
        spawn(async move {
            match api().update_product(product.id, &body).await {
                Ok(updated) => replace_item(&mut products.write(), updated),
                Err(e) => reporter.report("Failed to toggle product", &e),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(product) = deleting() else { return };
        spawn(async move {
            saving.set(true);
            let result = api().delete_product(product.id).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("{} eliminado", product.name));
                    remove_item(&mut products.write(), product.id);
                    deleting.set(None);
                }
                Err(e) => reporter.report("Failed to delete product", &e),
            }
        });
    };

    let open_report = move |_| {
        let stand_id = stand
            .read()
            .as_ref()
            .map(|s| s.id.to_string())
            .or_else(|| auth.read().session.as_ref()?.claims.stand_id.map(|id| id.to_string()))
            .unwrap_or_default();
        incident_form.set(IncidentForm {
            stand_id,
            ..IncidentForm::default()
        });
        incident_errors.set(FormErrors::new());
        reporting.set(true);
    };

    let handle_report = move |_| {
        let body = match incident_form.read().validate() {
            Ok(body) => body,
            Err(e) => {
                incident_errors.set(e);
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let result = api().report_incident(&body).await;
            saving.set(false);
            match result {
                Ok(_) => {
                    toasts.success("Incidencia enviada a la administración");
                    reporting.set(false);
                }
                Err(e) => reporter.report("Failed to report incident", &e),
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Mi stand" }
                div {
                    class: "view-toolbar",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: open_report,
                        Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                        "Reportar incidencia"
                    }
                    Button {
                        onclick: move |_| open_editor(None),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        "Nuevo producto"
                    }
                }
            }

            if let Some(own) = stand() {
                div {
                    class: "card",
                    div {
                        class: "view-header",
                        h2 { class: "view-section-title", "{own.title()}" }
                        Badge { tone: BadgeTone::from(own.status), "{own.status.label()}" }
                    }
                    p { class: "product-meta", "Stand {own.code()}" }
                    if let Some(category) = own.category.clone() {
                        p { "Rubro: {category}" }
                    }
                    Link { to: format!("/stands/{}", own.id), "Ver página pública" }
                }
            } else if !loading() {
                EmptyState { message: "Aún no tienes un stand asignado" }
            }

            div {
                class: "view-toolbar",
                Input {
                    placeholder: "Buscar producto",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
            }

            if loading() {
                EmptyState { message: "Cargando productos..." }
            } else if visible.read().is_empty() {
                EmptyState { message: "No tienes productos publicados" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Producto" }
                            th { "Categoría" }
                            th { "Precio" }
                            th { "Disponible" }
                            th { "" }
                        }
                    }
                    tbody {
                        for product in visible() {
                            tr {
                                key: "{product.id}",
                                td { "{product.name}" }
                                td { {product.category.clone().unwrap_or_default()} }
                                td { "{product.price_label()}" }
                                td {
                                    input {
                                        r#type: "checkbox",
                                        checked: product.available,
                                        onchange: {
                                            let product = product.clone();
                                            move |_| toggle_available(product.clone())
                                        },
                                    }
                                }
                                td {
                                    div {
                                        class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Editar",
                                            onclick: {
                                                let product = product.clone();
                                                move |_| open_editor(Some(product.clone()))
                                            },
                                            Icon { icon: FaPen, width: 14, height: 14 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Eliminar",
                                            onclick: {
                                                let product = product.clone();
                                                move |_| deleting.set(Some(product.clone()))
                                            },
                                            Icon { icon: FaTrash, width: 14, height: 14 }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(target) = editing() {
            ModalOverlay {
                title: if target.is_some() { "Editar producto".to_string() } else { "Nuevo producto".to_string() },
                on_close: move |_| editing.set(None),
                div {
                    class: "form-grid",
                    FormField {
                        label: "Nombre",
                        error: errors.read().get("name"),
                        wide: true,
                        Input {
                            value: form.read().name.clone(),
                            invalid: errors.read().has("name"),
                            oninput: move |evt: FormEvent| form.write().name = evt.value(),
                        }
                    }
                    FormField {
                        label: "Precio (S/)",
                        error: errors.read().get("price"),
                        Input {
                            value: form.read().price.clone(),
                            placeholder: "0.00",
                            invalid: errors.read().has("price"),
                            oninput: move |evt: FormEvent| form.write().price = evt.value(),
                        }
                    }
                    FormField {
                        label: "Unidad",
                        Input {
                            value: form.read().unit.clone(),
                            placeholder: "kg, caja, saco...",
                            oninput: move |evt: FormEvent| form.write().unit = evt.value(),
                        }
                    }
                    FormField {
                        label: "Categoría",
                        Input {
                            value: form.read().category.clone(),
                            oninput: move |evt: FormEvent| form.write().category = evt.value(),
                        }
                    }
                    FormField {
                        label: "Imagen (URL)",
                        error: errors.read().get("image_url"),
                        Input {
                            r#type: "url",
                            value: form.read().image_url.clone(),
                            invalid: errors.read().has("image_url"),
                            oninput: move |evt: FormEvent| form.write().image_url = evt.value(),
                        }
                    }
                    FormField {
                        label: "Descripción",
                        wide: true,
                        Textarea {
                            value: form.read().description.clone(),
                            oninput: move |evt: FormEvent| form.write().description = evt.value(),
                        }
                    }
                    label {
                        class: "checkbox-row",
                        input {
                            r#type: "checkbox",
                            checked: form.read().available,
                            onchange: move |evt: FormEvent| form.write().available = evt.checked(),
                        }
                        "Disponible"
                    }
                }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| editing.set(None),
                        "Cancelar"
                    }
                    Button {
                        disabled: saving(),
                        onclick: handle_save,
                        if saving() { "Guardando..." } else { "Guardar" }
                    }
                }
            }
        }

        if reporting() {
            ModalOverlay {
                title: "Reportar incidencia",
                on_close: move |_| reporting.set(false),
                IncidentFields { form: incident_form, errors: incident_errors }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| reporting.set(false),
                        "Cancelar"
                    }
                    Button {
                        disabled: saving(),
                        onclick: handle_report,
                        if saving() { "Enviando..." } else { "Enviar" }
                    }
                }
            }
        }

        if let Some(product) = deleting() {
            ConfirmDialog {
                message: format!("¿Eliminar {}?", product.name),
                busy: saving(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
