use api::models::{Stand, StandStatus, User};
use dioxus::prelude::*;

use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, ConfirmDialog, EmptyState, FormField, Input,
    ModalOverlay, Select, Textarea,
};
use crate::filters::{filter_stands, remove_item, replace_item, sort_stands, StandSort};
use crate::forms::{FormErrors, StandForm};
use crate::icons::{FaPen, FaPlus, FaTrash, FaUserTag};
use crate::{use_api, use_error_reporter, use_toast, Icon};

use super::{parse_filter, VIEWS_CSS};

/// Which stand the edit dialog works on.
#[derive(Clone, Debug, PartialEq)]
enum Editing {
    New,
    Existing(Stand),
}

#[component]
pub fn StandsView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let toasts = use_toast();

    let mut stands = use_signal(Vec::<Stand>::new);
    let mut owners = use_signal(Vec::<User>::new);
    let mut loading = use_signal(|| true);
    let mut search = use_signal(String::new);
    let mut status_filter = use_signal(String::new);
    let mut sort = use_signal(StandSort::default);

    let mut editing = use_signal(|| Option::<Editing>::None);
    let mut form = use_signal(StandForm::default);
    let mut errors = use_signal(FormErrors::new);
    let mut saving = use_signal(|| false);
    let mut assigning = use_signal(|| Option::<Stand>::None);
    let mut owner_choice = use_signal(String::new);
    let mut deleting = use_signal(|| Option::<Stand>::None);

    let mut loader = use_resource(move || async move {
        let client = api();
        loading.set(true);
        match client.all_stands().await {
            Ok(list) => stands.set(list),
            Err(e) => reporter.report("Failed to load stands", &e),
        }
        loading.set(false);
    });

    let visible = use_memo(move || {
        let status = parse_filter(&status_filter(), StandStatus::parse);
        let mut list = filter_stands(&stands.read(), &search(), status);
        sort_stands(&mut list, sort());
        list
    });

    let mut open_editor = move |target: Editing| {
        form.set(match &target {
            Editing::New => StandForm::default(),
            Editing::Existing(stand) => StandForm::from_stand(stand),
        });
        errors.set(FormErrors::new());
        editing.set(Some(target));
    };

    let handle_save = move |_| {
        let Some(target) = editing() else { return };
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let client = api();
            let result = match &target {
                Editing::New => client.create_stand(&request).await,
                Editing::Existing(stand) => client.update_stand(stand.id, &request).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    toasts.success(format!("Stand {} guardado", saved.code()));
                    replace_item(&mut stands.write(), saved);
                    editing.set(None);
                }
                Err(e) => reporter.report("Failed to save stand", &e),
            }
        });
    };

    let mut open_assign = move |stand: Stand| {
        owner_choice.set(stand.owner_id.map(|id| id.to_string()).unwrap_or_default());
        assigning.set(Some(stand));
        if owners.read().is_empty() {
            spawn(async move {
                match api().list_owners().await {
                    Ok(list) => owners.set(list),
                    Err(e) => reporter.report("Failed to load owners", &e),
                }
            });
        }
    };

    let handle_assign = move |_| {
        let Some(stand) = assigning() else { return };
        let Ok(owner_id) = owner_choice().parse::<i64>() else {
            toasts.error("Selecciona un propietario");
            return;
        };
        spawn(async move {
            match api().assign_stand_owner(stand.id, owner_id).await {
                Ok(updated) => {
                    toasts.success(format!("Propietario asignado a {}", updated.code()));
                    replace_item(&mut stands.write(), updated);
                    assigning.set(None);
                }
                Err(e) => reporter.report("Failed to assign owner", &e),
            }
        });
    };

    let change_status = move |stand: Stand, raw: String| {
        let Some(status) = StandStatus::parse(&raw) else { return };
        if status == stand.status {
            return;
        }
        spawn(async move {
            match api().change_stand_status(stand.id, status).await {
                Ok(updated) => {
                    toasts.info(format!("{} ahora está {}", updated.code(), status.label()));
                    replace_item(&mut stands.write(), updated);
                }
                Err(e) => reporter.report("Failed to change stand status", &e),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(stand) = deleting() else { return };
        spawn(async move {
            saving.set(true);
            let result = api().delete_stand(stand.id).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Stand {} eliminado", stand.code()));
                    remove_item(&mut stands.write(), stand.id);
                    deleting.set(None);
                }
                Err(e) => reporter.report("Failed to delete stand", &e),
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Stands" }
                Button {
                    onclick: move |_| open_editor(Editing::New),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Nuevo stand"
                }
            }

            div {
                class: "view-toolbar",
                Input {
                    placeholder: "Buscar por código, nombre, rubro o propietario",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                Select {
                    value: status_filter(),
                    onchange: move |evt: FormEvent| status_filter.set(evt.value()),
                    option { value: "", "Todos los estados" }
                    for status in StandStatus::ALL.iter() {
                        option { value: status.as_str(), "{status.label()}" }
                    }
                }
                Select {
                    value: format!("{:?}", sort()),
                    onchange: move |evt: FormEvent| {
                        sort.set(match evt.value().as_str() {
                            "Name" => StandSort::Name,
                            "Status" => StandSort::Status,
                            _ => StandSort::Code,
                        })
                    },
                    option { value: "Code", "Ordenar por código" }
                    option { value: "Name", "Ordenar por nombre" }
                    option { value: "Status", "Ordenar por estado" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| loader.restart(),
                    "Recargar"
                }
            }

            if loading() {
                EmptyState { message: "Cargando stands..." }
            } else if visible.read().is_empty() {
                EmptyState { message: "No hay stands que coincidan con la búsqueda" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Código" }
                            th { "Nombre comercial" }
                            th { "Rubro" }
                            th { "Propietario" }
                            th { "Estado" }
                            th { "" }
                        }
                    }
                    tbody {
                        for stand in visible() {
                            tr {
                                key: "{stand.id}",
                                td { "{stand.code()}" }
                                td { "{stand.business_name.clone().unwrap_or_default()}" }
                                td { "{stand.category.clone().unwrap_or_default()}" }
                                td { {stand.owner_name.clone().unwrap_or_else(|| "Sin asignar".to_string())} }
                                td {
                                    Badge { tone: BadgeTone::from(stand.status), "{stand.status.label()}" }
                                }
                                td {
                                    div {
                                        class: "row-actions",
                                        select {
                                            class: "form-input",
                                            value: stand.status.as_str(),
                                            onchange: {
                                                let stand = stand.clone();
                                                move |evt: FormEvent| change_status(stand.clone(), evt.value())
                                            },
                                            for status in StandStatus::ALL.iter() {
                                                option { value: status.as_str(), "{status.label()}" }
                                            }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Editar",
                                            onclick: {
                                                let stand = stand.clone();
                                                move |_| open_editor(Editing::Existing(stand.clone()))
                                            },
                                            Icon { icon: FaPen, width: 14, height: 14 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Asignar propietario",
                                            onclick: {
                                                let stand = stand.clone();
                                                move |_| open_assign(stand.clone())
                                            },
                                            Icon { icon: FaUserTag, width: 14, height: 14 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Eliminar",
                                            onclick: {
                                                let stand = stand.clone();
                                                move |_| deleting.set(Some(stand.clone()))
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
                title: match &target {
                    Editing::New => "Nuevo stand".to_string(),
                    Editing::Existing(stand) => format!("Editar stand {}", stand.code()),
                },
                on_close: move |_| editing.set(None),
                div {
                    class: "form-grid",
                    FormField {
                        label: "Bloque",
                        error: errors.read().get("block"),
                        Input {
                            value: form.read().block.clone(),
                            invalid: errors.read().has("block"),
                            oninput: move |evt: FormEvent| form.write().block = evt.value(),
                        }
                    }
                    FormField {
                        label: "Número",
                        error: errors.read().get("number"),
                        Input {
                            value: form.read().number.clone(),
                            invalid: errors.read().has("number"),
                            oninput: move |evt: FormEvent| form.write().number = evt.value(),
                        }
                    }
                    FormField {
                        label: "Nombre comercial",
                        Input {
                            value: form.read().business_name.clone(),
                            oninput: move |evt: FormEvent| form.write().business_name = evt.value(),
                        }
                    }
                    FormField {
                        label: "Rubro",
                        Input {
                            value: form.read().category.clone(),
                            oninput: move |evt: FormEvent| form.write().category = evt.value(),
                        }
                    }
                    FormField {
                        label: "Teléfono",
                        error: errors.read().get("phone"),
                        Input {
                            r#type: "tel",
                            value: form.read().phone.clone(),
                            invalid: errors.read().has("phone"),
                            oninput: move |evt: FormEvent| form.write().phone = evt.value(),
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

        if let Some(stand) = assigning() {
            ModalOverlay {
                title: format!("Propietario de {}", stand.code()),
                on_close: move |_| assigning.set(None),
                FormField {
                    label: "Propietario",
                    wide: true,
                    Select {
                        value: owner_choice(),
                        onchange: move |evt: FormEvent| owner_choice.set(evt.value()),
                        option { value: "", "Selecciona..." }
                        for owner in owners() {
                            option { key: "{owner.id}", value: "{owner.id}", "{owner.full_name()} ({owner.email})" }
                        }
                    }
                }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| assigning.set(None),
                        "Cancelar"
                    }
                    Button { onclick: handle_assign, "Asignar" }
                }
            }
        }

        if let Some(stand) = deleting() {
            ConfirmDialog {
                message: format!("¿Eliminar el stand {}? Esta acción no se puede deshacer.", stand.code()),
                busy: saving(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
