use dioxus::prelude::*;

use super::{Button, ButtonVariant};

/// Previous / next controls under a paged table.
#[component]
pub fn Pager(
    label: String,
    total: u64,
    has_previous: bool,
    has_next: bool,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "pager",
            span { class: "pager-total", "{total} registros" }
            div {
                class: "pager-controls",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: !has_previous,
                    onclick: move |_| on_previous.call(()),
                    "Anterior"
                }
                span { class: "pager-label", "Página {label}" }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: !has_next,
                    onclick: move |_| on_next.call(()),
                    "Siguiente"
                }
            }
        }
    }
}
