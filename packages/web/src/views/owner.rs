use api::Role;
use dioxus::prelude::*;
use ui::views::{OwnerStandView, PublicLayoutView, RoleGuard};

use crate::Route;

/// Layout for the owner area: only `PROPIETARIO` gets through.
#[component]
pub fn OwnerGuard() -> Element {
    rsx! {
        RoleGuard {
            allowed: vec![Role::Propietario],
            PublicLayoutView {
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
pub fn OwnerStand() -> Element {
    rsx! { OwnerStandView {} }
}
