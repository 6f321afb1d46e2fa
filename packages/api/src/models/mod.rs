//! Backend DTOs.
//!
//! Field names on the wire are Spanish camelCase (`numeroStand`,
//! `propietarioNombre`); the Rust side uses English names and maps them with
//! `#[serde(rename)]`. Request bodies live next to the entity they create or
//! modify.

/// Enum whose variants travel as upper-snake Spanish strings and carry a
/// display label for tables and selects.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value, also used in query strings.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Case-insensitive parse of the wire value.
            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(raw))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

mod de;

mod credential;
mod incident;
mod payment;
mod product;
mod session;
mod stand;
mod user;

pub use credential::{CredentialRequest, QrCredential};
pub use incident::{
    AssignResponsibleRequest, Incident, IncidentPriority, IncidentRequest, IncidentStatus,
    IncidentStatusRequest,
};
pub use payment::{
    Payment, PaymentMethod, PaymentRequest, PaymentStatus, PaymentStatusRequest, PaymentSummary,
};
pub use product::{Product, ProductRequest};
pub use session::{LoginRequest, LoginResponse};
pub use stand::{
    stand_code, AssignOwnerRequest, Stand, StandMapItem, StandProfile, StandRequest, StandStatus,
    StandStatusRequest,
};
pub use user::{User, UserRequest, UserStatusRequest};

/// Format a money amount in soles: `S/ 1,250.50`.
pub fn format_soles(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}S/ {grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_soles() {
        assert_eq!(format_soles(0.0), "S/ 0.00");
        assert_eq!(format_soles(12.5), "S/ 12.50");
        assert_eq!(format_soles(1250.499), "S/ 1,250.50");
        assert_eq!(format_soles(1_234_567.0), "S/ 1,234,567.00");
        assert_eq!(format_soles(-80.0), "-S/ 80.00");
    }

    #[test]
    fn test_wire_enum_helpers() {
        assert_eq!(IncidentStatus::parse("en_proceso"), Some(IncidentStatus::EnProceso));
        assert_eq!(IncidentStatus::EnProceso.as_str(), "EN_PROCESO");
        assert_eq!(IncidentStatus::EnProceso.to_string(), "En proceso");
        assert_eq!(PaymentMethod::parse("bitcoin"), None);
        assert_eq!(StandStatus::ALL.len(), 4);
    }
}
