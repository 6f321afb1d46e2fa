use dioxus::prelude::*;
use ui::views::{CatalogView, MarketMapView, PublicLayoutView, StandProfileView};

use crate::Route;

#[component]
pub fn PublicLayout() -> Element {
    rsx! {
        PublicLayoutView {
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn MarketMap() -> Element {
    rsx! { MarketMapView {} }
}

#[component]
pub fn Catalog() -> Element {
    rsx! { CatalogView {} }
}

#[component]
pub fn StandProfile(id: i64) -> Element {
    rsx! { StandProfileView { id } }
}
