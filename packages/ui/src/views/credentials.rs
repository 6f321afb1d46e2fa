use api::models::{QrCredential, Stand, User};
use api::{CredentialQuery, PageRequest, PageResponse};
use dioxus::prelude::*;

use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, ConfirmDialog, EmptyState, FormField, Input,
    ModalOverlay, Pager, Select,
};
use crate::filters::{filter_credentials, remove_item, replace_item};
use crate::forms::{CredentialForm, FormErrors, MAX_VALID_DAYS};
use crate::icons::{FaPlus, FaQrcode, FaTrash};
use crate::{use_api, use_error_reporter, use_toast, Icon};

use super::{today, VIEWS_CSS};

fn date_label(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn CredentialsView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let toasts = use_toast();

    let mut page = use_signal(PageResponse::<QrCredential>::default);
    let mut request = use_signal(|| api.peek().first_page());
    let mut active_only = use_signal(|| false);
    let mut search = use_signal(String::new);
    let mut loading = use_signal(|| true);

    let mut owners = use_signal(Vec::<User>::new);
    let mut stands = use_signal(Vec::<Stand>::new);
    let mut issuing = use_signal(|| false);
    let mut form = use_signal(CredentialForm::default);
    let mut errors = use_signal(FormErrors::new);
    let mut saving = use_signal(|| false);
    let mut showing = use_signal(|| Option::<QrCredential>::None);
    let mut deleting = use_signal(|| Option::<QrCredential>::None);

    let mut loader = use_resource(move || async move {
        let client = api();
        let query = CredentialQuery {
            active_only: active_only(),
        };
        let req = request();
        loading.set(true);
        match client.list_credentials(&query, req).await {
            Ok(result) => page.set(result),
            Err(e) => reporter.report("Failed to load credentials", &e),
        }
        loading.set(false);
    });

    let visible = use_memo(move || filter_credentials(&page.read().content, &search(), false));

    let open_issue = move |_| {
        form.set(CredentialForm::default());
        errors.set(FormErrors::new());
        issuing.set(true);
        if owners.read().is_empty() {
            spawn(async move {
                let client = api();
                match client.list_owners().await {
                    Ok(list) => owners.set(list),
                    Err(e) => reporter.report("Failed to load owners", &e),
                }
                match client.all_stands().await {
                    Ok(list) => stands.set(list),
                    Err(e) => reporter.report("Failed to load stands", &e),
                }
            });
        }
    };

    // Picking an owner preselects the stand they hold.
    let mut choose_owner = move |raw: String| {
        let owner_id = raw.parse::<i64>().ok();
        let stand = owner_id.and_then(|id| {
            stands
                .read()
                .iter()
                .find(|s| s.owner_id == Some(id))
                .map(|s| s.id.to_string())
        });
        let mut current = form.write();
        current.user_id = raw;
        if let Some(stand) = stand {
            current.stand_id = stand;
        }
    };

    let handle_issue = move |_| {
        let body = match form.read().validate() {
            Ok(body) => body,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let result = api().issue_credential(&body).await;
            saving.set(false);
            match result {
                Ok(credential) => {
                    toasts.success(format!("Credencial {} emitida", credential.code));
                    replace_item(&mut page.write().content, credential.clone());
                    issuing.set(false);
                    showing.set(Some(credential));
                }
                Err(e) => reporter.report("Failed to issue credential", &e),
            }
        });
    };

    let revoke = move |credential: QrCredential| {
        spawn(async move {
            match api().revoke_credential(credential.id).await {
                Ok(updated) => {
                    toasts.info(format!("Credencial {} revocada", updated.code));
                    replace_item(&mut page.write().content, updated);
                }
                Err(e) => reporter.report("Failed to revoke credential", &e),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(credential) = deleting() else { return };
        spawn(async move {
            saving.set(true);
            let result = api().delete_credential(credential.id).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    toasts.success("Credencial eliminada");
                    remove_item(&mut page.write().content, credential.id);
                    deleting.set(None);
                }
                Err(e) => reporter.report("Failed to delete credential", &e),
            }
        });
    };

    let current = page.read().clone();
    let today = today();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Credenciales QR" }
                Button {
                    onclick: open_issue,
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Emitir credencial"
                }
            }

            div {
                class: "view-toolbar",
                Input {
                    placeholder: "Código, titular o stand",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                label {
                    class: "checkbox-row",
                    input {
                        r#type: "checkbox",
                        checked: active_only(),
                        onchange: move |evt: FormEvent| {
                            active_only.set(evt.checked());
                            request.set(PageRequest::first(request().size));
                        },
                    }
                    "Solo activas"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| loader.restart(),
                    "Recargar"
                }
            }

            if loading() {
                EmptyState { message: "Cargando credenciales..." }
            } else if visible.read().is_empty() {
                EmptyState { message: "No hay credenciales emitidas" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Código" }
                            th { "Titular" }
                            th { "Stand" }
                            th { "Emitida" }
                            th { "Vence" }
                            th { "Estado" }
                            th { "" }
                        }
                    }
                    tbody {
                        for credential in visible() {
                            tr {
                                key: "{credential.id}",
                                td { "{credential.code}" }
                                td { {credential.user_name.clone().unwrap_or_else(|| format!("#{}", credential.user_id))} }
                                td { {credential.stand_code.clone().unwrap_or_else(|| "-".to_string())} }
                                td { {date_label(credential.issued_on)} }
                                td { {date_label(credential.expires_on)} }
                                td {
                                    if credential.is_valid_on(today) {
                                        Badge { tone: BadgeTone::Success, "Vigente" }
                                    } else if credential.active {
                                        Badge { tone: BadgeTone::Warning, "Vencida" }
                                    } else {
                                        Badge { tone: BadgeTone::Neutral, "Revocada" }
                                    }
                                }
                                td {
                                    div {
                                        class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Ver QR",
                                            onclick: {
                                                let credential = credential.clone();
                                                move |_| showing.set(Some(credential.clone()))
                                            },
                                            Icon { icon: FaQrcode, width: 14, height: 14 }
                                        }
                                        if credential.active {
                                            Button {
                                                variant: ButtonVariant::Outline,
                                                onclick: {
                                                    let credential = credential.clone();
                                                    move |_| revoke(credential.clone())
                                                },
                                                "Revocar"
                                            }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Eliminar",
                                            onclick: {
                                                let credential = credential.clone();
                                                move |_| deleting.set(Some(credential.clone()))
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

            Pager {
                label: current.label(),
                total: current.total_elements,
                has_previous: current.has_previous(),
                has_next: current.has_next(),
                on_previous: move |_| request.set(request().previous()),
                on_next: move |_| request.set(request().next()),
            }
        }

        if issuing() {
            ModalOverlay {
                title: "Emitir credencial QR",
                on_close: move |_| issuing.set(false),
                div {
                    class: "form-grid",
                    FormField {
                        label: "Titular",
                        error: errors.read().get("user_id"),
                        wide: true,
                        Select {
                            value: form.read().user_id.clone(),
                            onchange: move |evt: FormEvent| choose_owner(evt.value()),
                            option { value: "", "Selecciona..." }
                            for owner in owners() {
                                option { key: "{owner.id}", value: "{owner.id}", "{owner.full_name()} ({owner.email})" }
                            }
                        }
                    }
                    FormField {
                        label: "Stand",
                        error: errors.read().get("stand_id"),
                        Select {
                            value: form.read().stand_id.clone(),
                            onchange: move |evt: FormEvent| form.write().stand_id = evt.value(),
                            option { value: "", "Sin stand" }
                            for stand in stands() {
                                option { key: "{stand.id}", value: "{stand.id}", "{stand.code()} · {stand.title()}" }
                            }
                        }
                    }
                    FormField {
                        label: "Días de vigencia",
                        error: errors.read().get("valid_days"),
                        Input {
                            r#type: "number",
                            min: "1",
                            max: "{MAX_VALID_DAYS}",
                            value: form.read().valid_days.clone(),
                            invalid: errors.read().has("valid_days"),
                            oninput: move |evt: FormEvent| form.write().valid_days = evt.value(),
                        }
                    }
                }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| issuing.set(false),
                        "Cancelar"
                    }
                    Button {
                        disabled: saving(),
                        onclick: handle_issue,
                        if saving() { "Emitiendo..." } else { "Emitir" }
                    }
                }
            }
        }

        if let Some(credential) = showing() {
            ModalOverlay {
                title: format!("Credencial {}", credential.code),
                on_close: move |_| showing.set(None),
                match credential.qr_data_uri() {
                    Some(src) => rsx! {
                        img { class: "qr-image", src: src, alt: "Código QR {credential.code}" }
                    },
                    None => rsx! {
                        EmptyState { message: "El servidor no envió la imagen del QR" }
                    },
                }
                p {
                    class: "product-meta",
                    {credential.user_name.clone().unwrap_or_default()}
                    " · vence "
                    {date_label(credential.expires_on)}
                }
                div {
                    class: "form-actions",
                    Button { onclick: move |_| showing.set(None), "Cerrar" }
                }
            }
        }

        if let Some(credential) = deleting() {
            ConfirmDialog {
                message: format!("¿Eliminar la credencial {}?", credential.code),
                busy: saving(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
