//! Route components. Each one wraps a shared view from `ui`.

mod admin;
pub use admin::{AdminGuard, AdminStands, Credentials, Dashboard, Incidents, Payments, Users};

mod owner;
pub use owner::{OwnerGuard, OwnerStand};

mod public;
pub use public::{Catalog, MarketMap, PublicLayout, StandProfile};

mod login;
pub use login::Login;

mod not_found;
pub use not_found::NotFound;
