use api::Role;
use dioxus::prelude::*;
use ui::views::{
    AdminLayoutView, AdminSection, CredentialsView, DashboardView, IncidentsView, PaymentsView,
    RoleGuard, StandsView, UsersView,
};

use crate::Route;

/// Layout for every `/admin` route: only `ADMIN` gets through.
#[component]
pub fn AdminGuard() -> Element {
    let route = use_route::<Route>();
    let active = AdminSection::from_path(&route.to_string());

    rsx! {
        RoleGuard {
            allowed: vec![Role::Admin],
            AdminLayoutView {
                active,
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { DashboardView {} }
}

#[component]
pub fn AdminStands() -> Element {
    rsx! { StandsView {} }
}

#[component]
pub fn Users() -> Element {
    rsx! { UsersView {} }
}

#[component]
pub fn Payments() -> Element {
    rsx! { PaymentsView {} }
}

#[component]
pub fn Incidents() -> Element {
    rsx! { IncidentsView {} }
}

#[component]
pub fn Credentials() -> Element {
    rsx! { CredentialsView {} }
}
