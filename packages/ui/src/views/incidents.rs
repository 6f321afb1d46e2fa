use api::models::{Incident, IncidentPriority, IncidentStatus, Stand, User};
use api::{IncidentQuery, PageRequest, PageResponse};
use dioxus::prelude::*;

use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, ConfirmDialog, EmptyState, FormField, Input,
    ModalOverlay, Pager, Select, Textarea,
};
use crate::filters::{filter_incidents, remove_item, replace_item, sort_incidents};
use crate::forms::{FormErrors, IncidentForm};
use crate::icons::{FaPlus, FaTrash};
use crate::{use_api, use_error_reporter, use_toast, Icon};

use super::{parse_filter, VIEWS_CSS};

#[component]
pub fn IncidentsView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let toasts = use_toast();

    let mut page = use_signal(PageResponse::<Incident>::default);
    let mut request = use_signal(|| api.peek().first_page());
    let mut status_filter = use_signal(String::new);
    let mut priority_filter = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut loading = use_signal(|| true);

    // Options for the dialogs, loaded once.
    let mut staff = use_signal(Vec::<User>::new);
    let mut stands = use_signal(Vec::<Stand>::new);

    let mut creating = use_signal(|| false);
    let mut form = use_signal(IncidentForm::default);
    let mut errors = use_signal(FormErrors::new);
    let mut saving = use_signal(|| false);
    let mut deleting = use_signal(|| Option::<Incident>::None);

    let mut loader = use_resource(move || async move {
        let client = api();
        let query = IncidentQuery {
            status: parse_filter(&status_filter(), IncidentStatus::parse),
        };
        let req = request();
        loading.set(true);
        match client.list_incidents(&query, req).await {
            Ok(result) => page.set(result),
            Err(e) => reporter.report("Failed to load incidents", &e),
        }
        loading.set(false);
    });

    let _options = use_resource(move || async move {
        let client = api();
        match client.list_staff().await {
            Ok(list) => staff.set(list),
            Err(e) => reporter.report("Failed to load staff", &e),
        }
        match client.all_stands().await {
            Ok(list) => stands.set(list),
            Err(e) => reporter.report("Failed to load stands", &e),
        }
    });

    let visible = use_memo(move || {
        let priority = parse_filter(&priority_filter(), IncidentPriority::parse);
        let mut list = filter_incidents(&page.read().content, &search(), None, priority);
        sort_incidents(&mut list);
        list
    });

    let handle_create = move |_| {
        let body = match form.read().validate() {
            Ok(body) => body,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let result = api().create_incident(&body).await;
            saving.set(false);
            match result {
                Ok(incident) => {
                    toasts.success(format!("Incidencia \"{}\" registrada", incident.title));
                    replace_item(&mut page.write().content, incident);
                    creating.set(false);
                }
                Err(e) => reporter.report("Failed to create incident", &e),
            }
        });
    };

    let change_status = move |incident: Incident, raw: String| {
        let Some(status) = IncidentStatus::parse(&raw) else { return };
        if status == incident.status {
            return;
        }
        spawn(async move {
            match api().change_incident_status(incident.id, status).await {
                Ok(updated) => {
                    toasts.info(format!("Incidencia {}", status.label().to_lowercase()));
                    replace_item(&mut page.write().content, updated);
                }
                Err(e) => reporter.report("Failed to change incident status", &e),
            }
        });
    };

    let assign = move |incident: Incident, raw: String| {
        let Ok(assignee_id) = raw.parse::<i64>() else { return };
        spawn(async move {
            match api().assign_incident(incident.id, assignee_id).await {
                Ok(updated) => {
                    let name = updated.assignee_name.clone().unwrap_or_default();
                    toasts.info(format!("Responsable asignado: {name}"));
                    replace_item(&mut page.write().content, updated);
                }
                Err(e) => reporter.report("Failed to assign incident", &e),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(incident) = deleting() else { return };
        spawn(async move {
            saving.set(true);
            let result = api().delete_incident(incident.id).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    toasts.success("Incidencia eliminada");
                    remove_item(&mut page.write().content, incident.id);
                    deleting.set(None);
                }
                Err(e) => reporter.report("Failed to delete incident", &e),
            }
        });
    };

    let current = page.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Incidencias" }
                Button {
                    onclick: move |_| {
                        form.set(IncidentForm::default());
                        errors.set(FormErrors::new());
                        creating.set(true);
                    },
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Nueva incidencia"
                }
            }

            div {
                class: "view-toolbar",
                Input {
                    placeholder: "Título, stand o responsable",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                Select {
                    value: status_filter(),
                    onchange: move |evt: FormEvent| {
                        status_filter.set(evt.value());
                        request.set(PageRequest::first(request().size));
                    },
                    option { value: "", "Todos los estados" }
                    for status in IncidentStatus::ALL.iter() {
                        option { value: status.as_str(), "{status.label()}" }
                    }
                }
                Select {
                    value: priority_filter(),
                    onchange: move |evt: FormEvent| priority_filter.set(evt.value()),
                    option { value: "", "Todas las prioridades" }
                    for priority in IncidentPriority::ALL.iter() {
                        option { value: priority.as_str(), "{priority.label()}" }
                    }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| loader.restart(),
                    "Recargar"
                }
            }

            if loading() {
                EmptyState { message: "Cargando incidencias..." }
            } else if visible.read().is_empty() {
                EmptyState { message: "Sin incidencias para los filtros elegidos" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Título" }
                            th { "Stand" }
                            th { "Prioridad" }
                            th { "Estado" }
                            th { "Responsable" }
                            th { "Creada" }
                            th { "" }
                        }
                    }
                    tbody {
                        for incident in visible() {
                            tr {
                                key: "{incident.id}",
                                td {
                                    div { "{incident.title}" }
                                    if let Some(by) = incident.reported_by.clone() {
                                        div { class: "product-meta", "Reportada por {by}" }
                                    }
                                }
                                td { {incident.stand_code.clone().unwrap_or_else(|| "-".to_string())} }
                                td {
                                    Badge { tone: BadgeTone::from(incident.priority), "{incident.priority.label()}" }
                                }
                                td {
                                    select {
                                        class: "form-input",
                                        value: incident.status.as_str(),
                                        onchange: {
                                            let incident = incident.clone();
                                            move |evt: FormEvent| change_status(incident.clone(), evt.value())
                                        },
                                        for status in IncidentStatus::ALL.iter() {
                                            option { value: status.as_str(), "{status.label()}" }
                                        }
                                    }
                                }
                                td {
                                    select {
                                        class: "form-input",
                                        value: incident.assignee_id.map(|id| id.to_string()).unwrap_or_default(),
                                        onchange: {
                                            let incident = incident.clone();
                                            move |evt: FormEvent| assign(incident.clone(), evt.value())
                                        },
                                        option { value: "", "Sin asignar" }
                                        for user in staff() {
                                            option { key: "{user.id}", value: "{user.id}", "{user.full_name()}" }
                                        }
                                    }
                                }
                                td { "{incident.created_label()}" }
                                td {
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Eliminar",
                                        onclick: {
                                            let incident = incident.clone();
                                            move |_| deleting.set(Some(incident.clone()))
                                        },
                                        Icon { icon: FaTrash, width: 14, height: 14 }
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

        if creating() {
            ModalOverlay {
                title: "Nueva incidencia",
                on_close: move |_| creating.set(false),
                IncidentFields { form, errors, stands: stands() }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| creating.set(false),
                        "Cancelar"
                    }
                    Button {
                        disabled: saving(),
                        onclick: handle_create,
                        if saving() { "Guardando..." } else { "Registrar" }
                    }
                }
            }
        }

        if let Some(incident) = deleting() {
            ConfirmDialog {
                message: format!("¿Eliminar la incidencia \"{}\"?", incident.title),
                busy: saving(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

/// Fields of the incident dialog. With no `stands` the stand selector is
/// hidden and `form.stand_id` is left as set by the caller.
#[component]
pub(crate) fn IncidentFields(
    mut form: Signal<IncidentForm>,
    errors: Signal<FormErrors>,
    #[props(default)] stands: Vec<Stand>,
) -> Element {
    rsx! {
        div {
            class: "form-grid",
            FormField {
                label: "Título",
                error: errors.read().get("title"),
                wide: true,
                Input {
                    value: form.read().title.clone(),
                    invalid: errors.read().has("title"),
                    oninput: move |evt: FormEvent| form.write().title = evt.value(),
                }
            }
            FormField {
                label: "Prioridad",
                Select {
                    value: form.read().priority.as_str(),
                    onchange: move |evt: FormEvent| {
                        if let Some(priority) = IncidentPriority::parse(&evt.value()) {
                            form.write().priority = priority;
                        }
                    },
                    for priority in IncidentPriority::ALL.iter() {
                        option { value: priority.as_str(), "{priority.label()}" }
                    }
                }
            }
            if !stands.is_empty() {
                FormField {
                    label: "Stand (opcional)",
                    error: errors.read().get("stand_id"),
                    Select {
                        value: form.read().stand_id.clone(),
                        onchange: move |evt: FormEvent| form.write().stand_id = evt.value(),
                        option { value: "", "Área común" }
                        for stand in stands.iter() {
                            option { key: "{stand.id}", value: "{stand.id}", "{stand.code()} · {stand.title()}" }
                        }
                    }
                }
            }
            FormField {
                label: "Descripción",
                error: errors.read().get("description"),
                wide: true,
                Textarea {
                    value: form.read().description.clone(),
                    rows: 4,
                    oninput: move |evt: FormEvent| form.write().description = evt.value(),
                }
            }
        }
    }
}
