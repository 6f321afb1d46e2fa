use api::models::User;
use api::{PageRequest, PageResponse, Role, UserQuery};
use dioxus::prelude::*;

use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, ConfirmDialog, EmptyState, FormField, Input,
    ModalOverlay, Pager, Select,
};
use crate::filters::{filter_users, remove_item, replace_item};
use crate::forms::{FormErrors, UserForm};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::{use_api, use_error_reporter, use_toast, Icon};

use super::{parse_filter, VIEWS_CSS};

#[component]
pub fn UsersView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let toasts = use_toast();

    let mut page = use_signal(|| PageResponse::<User>::default());
    let mut request = use_signal(|| api.peek().first_page());
    // Server-side search runs on submit; typing filters the loaded page.
    let mut query = use_signal(UserQuery::default);
    let mut search = use_signal(String::new);
    let mut role_filter = use_signal(String::new);
    let mut loading = use_signal(|| true);

    let mut editing = use_signal(|| Option::<Option<User>>::None);
    let mut form = use_signal(UserForm::default);
    let mut errors = use_signal(FormErrors::new);
    let mut saving = use_signal(|| false);
    let mut deleting = use_signal(|| Option::<User>::None);

    let mut loader = use_resource(move || async move {
        let client = api();
        let q = query();
        let req = request();
        loading.set(true);
        match client.list_users(&q, req).await {
            Ok(result) => page.set(result),
            Err(e) => reporter.report("Failed to load users", &e),
        }
        loading.set(false);
    });

    let visible = use_memo(move || {
        let role = parse_filter(&role_filter(), Role::parse);
        filter_users(&page.read().content, &search(), role)
    });

    let mut open_editor = move |user: Option<User>| {
        form.set(match &user {
            Some(user) => UserForm::from_user(user),
            None => UserForm::default(),
        });
        errors.set(FormErrors::new());
        editing.set(Some(user));
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
                None => client.create_user(&body).await,
                Some(user) => client.update_user(user.id, &body).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    toasts.success(format!("Usuario {} guardado", saved.full_name()));
                    replace_item(&mut page.write().content, saved);
                    editing.set(None);
                }
                Err(e) => reporter.report("Failed to save user", &e),
            }
        });
    };

    let toggle_active = move |user: User| {
        spawn(async move {
            match api().set_user_active(user.id, !user.active).await {
                Ok(updated) => {
                    let verb = if updated.active { "activado" } else { "desactivado" };
                    toasts.info(format!("{} {verb}", updated.full_name()));
                    replace_item(&mut page.write().content, updated);
                }
                Err(e) => reporter.report("Failed to toggle user", &e),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(user) = deleting() else { return };
        spawn(async move {
            saving.set(true);
            let result = api().delete_user(user.id).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    toasts.success(format!("Usuario {} eliminado", user.full_name()));
                    remove_item(&mut page.write().content, user.id);
                    deleting.set(None);
                }
                Err(e) => reporter.report("Failed to delete user", &e),
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
                h1 { class: "view-title", "Usuarios" }
                Button {
                    onclick: move |_| open_editor(None),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Nuevo usuario"
                }
            }

            form {
                class: "view-toolbar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    query.set(UserQuery {
                        search: search().trim().to_string(),
                        role: parse_filter(&role_filter(), Role::parse),
                    });
                    request.set(PageRequest::first(request().size));
                },
                Input {
                    placeholder: "Nombre, correo o DNI",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                Select {
                    value: role_filter(),
                    onchange: move |evt: FormEvent| role_filter.set(evt.value()),
                    option { value: "", "Todos los roles" }
                    for role in Role::ALL.iter() {
                        option { value: role.as_str(), "{role.label()}" }
                    }
                }
                Button { variant: ButtonVariant::Secondary, r#type: "submit", "Buscar en servidor" }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| loader.restart(),
                    "Recargar"
                }
            }

            if loading() {
                EmptyState { message: "Cargando usuarios..." }
            } else if visible.read().is_empty() {
                EmptyState { message: "No hay usuarios que coincidan" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Nombre" }
                            th { "Correo" }
                            th { "DNI" }
                            th { "Rol" }
                            th { "Estado" }
                            th { "" }
                        }
                    }
                    tbody {
                        for user in visible() {
                            tr {
                                key: "{user.id}",
                                td { "{user.full_name()}" }
                                td { "{user.email}" }
                                td { "{user.dni.clone().unwrap_or_default()}" }
                                td { "{user.role.label()}" }
                                td {
                                    if user.active {
                                        Badge { tone: BadgeTone::Success, "Activo" }
                                    } else {
                                        Badge { tone: BadgeTone::Neutral, "Inactivo" }
                                    }
                                }
                                td {
                                    div {
                                        class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Outline,
                                            onclick: {
                                                let user = user.clone();
                                                move |_| toggle_active(user.clone())
                                            },
                                            if user.active { "Desactivar" } else { "Activar" }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Editar",
                                            onclick: {
                                                let user = user.clone();
                                                move |_| open_editor(Some(user.clone()))
                                            },
                                            Icon { icon: FaPen, width: 14, height: 14 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Eliminar",
                                            onclick: {
                                                let user = user.clone();
                                                move |_| deleting.set(Some(user.clone()))
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

        if let Some(target) = editing() {
            ModalOverlay {
                title: if target.is_some() { "Editar usuario".to_string() } else { "Nuevo usuario".to_string() },
                on_close: move |_| editing.set(None),
                div {
                    class: "form-grid",
                    FormField {
                        label: "Nombres",
                        error: errors.read().get("first_names"),
                        Input {
                            value: form.read().first_names.clone(),
                            invalid: errors.read().has("first_names"),
                            oninput: move |evt: FormEvent| form.write().first_names = evt.value(),
                        }
                    }
                    FormField {
                        label: "Apellidos",
                        error: errors.read().get("last_names"),
                        Input {
                            value: form.read().last_names.clone(),
                            invalid: errors.read().has("last_names"),
                            oninput: move |evt: FormEvent| form.write().last_names = evt.value(),
                        }
                    }
                    FormField {
                        label: "Correo",
                        error: errors.read().get("email"),
                        Input {
                            r#type: "email",
                            value: form.read().email.clone(),
                            invalid: errors.read().has("email"),
                            oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                    }
                    FormField {
                        label: "DNI",
                        error: errors.read().get("dni"),
                        Input {
                            value: form.read().dni.clone(),
                            invalid: errors.read().has("dni"),
                            oninput: move |evt: FormEvent| form.write().dni = evt.value(),
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
                        label: "Rol",
                        Select {
                            value: form.read().role.as_str(),
                            onchange: move |evt: FormEvent| {
                                if let Some(role) = Role::parse(&evt.value()) {
                                    form.write().role = role;
                                }
                            },
                            for role in Role::ALL.iter() {
                                option { value: role.as_str(), "{role.label()}" }
                            }
                        }
                    }
                    FormField {
                        label: if target.is_some() { "Nueva contraseña (opcional)".to_string() } else { "Contraseña".to_string() },
                        error: errors.read().get("password"),
                        wide: true,
                        Input {
                            r#type: "password",
                            value: form.read().password.clone(),
                            invalid: errors.read().has("password"),
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
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

        if let Some(user) = deleting() {
            ConfirmDialog {
                message: format!("¿Eliminar a {}?", user.full_name()),
                busy: saving(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
