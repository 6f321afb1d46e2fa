//! This crate contains all shared UI for the workspace.
//!
//! Besides the components and page views it holds the client-side logic the
//! views rely on, kept free of rendering so it can be unit tested:
//! [`filters`], [`stand_grid`], [`forms`] and [`guard`].

pub mod components;
pub use components::{use_toast, ToastProvider, Toasts};

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod session_store;
pub use session_store::make_token_store;

mod auth;
pub use auth::{
    sign_in, sign_out, use_api, use_auth, use_error_reporter, AuthProvider, AuthState,
    ErrorReporter, LogoutButton, Session,
};

pub mod filters;
pub mod forms;
pub mod guard;
pub mod stand_grid;

pub mod views;
