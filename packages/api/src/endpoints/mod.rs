//! Typed backend operations, one module per resource.
//!
//! | Module | Base path |
//! |--------|-----------|
//! | [`session`] | `/api/v1/auth` |
//! | [`stands`] | `/api/v1/stands` |
//! | [`users`] | `/api/v1/admin/usuarios` |
//! | [`payments`] | `/api/v1/admin/pagos` |
//! | [`incidents`] | `/api/v1/admin/incidencias` |
//! | [`credentials`] | `/api/v1/admin/credenciales-qr` |
//! | [`owner`] | `/api/v1/propietario` |
//! | [`public`] | `/api/public` |

pub mod credentials;
pub mod incidents;
pub mod owner;
pub mod payments;
pub mod public;
pub mod session;
pub mod stands;
pub mod users;

pub use credentials::CredentialQuery;
pub use incidents::IncidentQuery;
pub use payments::PaymentQuery;
pub use public::CatalogQuery;
pub use stands::StandQuery;
pub use users::UserQuery;
