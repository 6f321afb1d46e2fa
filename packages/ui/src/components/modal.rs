use dioxus::prelude::*;

use super::{Button, ButtonVariant};

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(
    #[props(default)] title: String,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                if !title.is_empty() {
                    h2 { class: "modal-title", "{title}" }
                }
                {children}
            }
        }
    }
}

/// Yes/no confirmation for destructive actions.
#[component]
pub fn ConfirmDialog(
    message: String,
    #[props(default = "Eliminar".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            title: "Confirmar",
            on_close: move |_| on_cancel.call(()),
            p { class: "modal-text", "{message}" }
            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Danger,
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Procesando..." } else { "{confirm_label}" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_cancel.call(()),
                    "Cancelar"
                }
            }
        }
    }
}
