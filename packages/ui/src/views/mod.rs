//! Page views shared by the platform binaries.
//!
//! Views load their own data through [`crate::use_api`] and report failures
//! as toasts. Routing stays in the binary: views link by path.

use dioxus::prelude::*;

pub(crate) const VIEWS_CSS: Asset = asset!("/src/views/views.css");

mod admin_layout;
pub use admin_layout::{AdminLayoutView, AdminSection};

mod public_layout;
pub use public_layout::PublicLayoutView;

mod role_guard;
pub use role_guard::RoleGuard;

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardView;

mod stands;
pub use stands::StandsView;

mod users;
pub use users::UsersView;

mod payments;
pub use payments::PaymentsView;

mod incidents;
pub use incidents::IncidentsView;

mod credentials;
pub use credentials::CredentialsView;

mod market_map;
pub use market_map::MarketMapView;

mod catalog;
pub use catalog::CatalogView;

mod stand_profile;
pub use stand_profile::StandProfileView;

mod owner_stand;
pub use owner_stand::OwnerStandView;

mod not_found;
pub use not_found::NotFoundView;

/// `Some(value)` unless the select holds the "all" option.
pub(crate) fn parse_filter<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    match raw.trim() {
        "" => None,
        value => parse(value),
    }
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
