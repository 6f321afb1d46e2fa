//! Small building blocks shared by every view.

mod badge;
mod button;
mod input;
mod modal;
mod pager;
pub mod toast;

pub use badge::{Badge, BadgeTone};
pub use button::{Button, ButtonVariant};
pub use input::{FieldError, FormField, Input, Label, Select, Textarea};
pub use modal::{ConfirmDialog, ModalOverlay};
pub use pager::Pager;
pub use toast::{use_toast, ToastKind, ToastProvider, Toasts};

use dioxus::prelude::*;

/// Centered muted text for empty tables and loading states.
#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}
