//! # API crate — typed client for the Mercado Mayorista backend
//!
//! Every screen of the web app (admin dashboard, storefront, owner area)
//! talks to the backend through [`ApiClient`]. This crate owns the wire
//! contract: DTOs, the page envelope, error mapping and the decoding of the
//! session token.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | `Role`, JWT claim decoding used by route guards |
//! | [`client`] | `ApiClient`: base URL, bearer auth, JSON verbs, status mapping |
//! | [`config`] | `ApiConfig` from TOML or environment |
//! | [`endpoints`] | One `impl ApiClient` block per backend resource |
//! | [`error`] | `ApiError` and the message shown to users |
//! | [`models`] | Entities (`Stand`, `Incident`, `QrCredential`, `User`, `Product`, `Payment`) and request bodies |
//! | [`page`] | `PageRequest` / `PageResponse<T>` |
//!
//! The client never retries: a failed call is reported once and the user
//! decides what to do next.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod page;

pub use auth::{decode_claims, Claims, ClaimsError, Role};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use endpoints::{
    CatalogQuery, CredentialQuery, IncidentQuery, PaymentQuery, StandQuery, UserQuery,
};
pub use error::ApiError;
pub use page::{PageRequest, PageResponse};
