//! # Session claims
//!
//! The backend issues a JWT on login. The client never verifies the
//! signature (that is the backend's job on every request); it only reads the
//! payload to know who is logged in, which role they have and when the token
//! expires. Route guards are driven entirely by [`Claims::role`].
//!
//! Accepted role claims, first match wins: `rol`, `role`, `roles[0]`,
//! `authorities[0]` (either a plain string or `{"authority": "..."}`). A
//! `ROLE_` prefix and letter case are ignored.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN", alias = "ROLE_ADMIN")]
    Admin,
    /// Stand owner.
    #[serde(rename = "PROPIETARIO", alias = "ROLE_PROPIETARIO")]
    Propietario,
    #[serde(rename = "CLIENTE", alias = "ROLE_CLIENTE")]
    Cliente,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Propietario, Role::Cliente];

    /// Parse a role string as found in tokens and query strings.
    pub fn parse(raw: &str) -> Option<Role> {
        let upper = raw.trim().to_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "ADMIN" | "ADMINISTRADOR" => Some(Role::Admin),
            "PROPIETARIO" | "OWNER" => Some(Role::Propietario),
            "CLIENTE" | "CLIENT" => Some(Role::Cliente),
            _ => None,
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Propietario => "PROPIETARIO",
            Role::Cliente => "CLIENTE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Propietario => "Propietario",
            Role::Cliente => "Cliente",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a token could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    #[error("token payload is not JSON: {0}")]
    Payload(String),
    #[error("token carries no role")]
    MissingRole,
    #[error("unknown role {0:?}")]
    UnknownRole(String),
    #[error("token already expired")]
    Expired,
}

/// What the client knows about the logged-in user.
#[derive(Clone, Debug, PartialEq)]
pub struct Claims {
    /// Usually the user's email.
    pub subject: String,
    pub role: Role,
    pub user_id: Option<i64>,
    pub name: Option<String>,
    /// Stand owned by a `PROPIETARIO`, when the backend includes it.
    pub stand_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Claims {
    /// Tokens without `exp` never expire client-side.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.subject)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RoleEntry {
    Plain(String),
    Authority { authority: String },
}

impl RoleEntry {
    fn into_string(self) -> String {
        match self {
            RoleEntry::Plain(s) => s,
            RoleEntry::Authority { authority } => authority,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    rol: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    roles: Option<Vec<RoleEntry>>,
    #[serde(default)]
    authorities: Option<Vec<RoleEntry>>,
    #[serde(default, alias = "id")]
    user_id: Option<i64>,
    #[serde(default, alias = "nombre")]
    name: Option<String>,
    #[serde(default)]
    stand_id: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Decode the payload of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let mut parts = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimsError::Encoding(e.to_string()))?;
    let raw: RawClaims =
        serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Payload(e.to_string()))?;

    let role_str = raw
        .rol
        .or(raw.role)
        .or_else(|| first_entry(raw.roles))
        .or_else(|| first_entry(raw.authorities))
        .ok_or(ClaimsError::MissingRole)?;
    let role = Role::parse(&role_str).ok_or(ClaimsError::UnknownRole(role_str))?;

    Ok(Claims {
        subject: raw.sub.unwrap_or_default(),
        role,
        user_id: raw.user_id,
        name: raw.name.filter(|n| !n.trim().is_empty()),
        stand_id: raw.stand_id,
        expires_at: raw.exp.and_then(|secs| DateTime::from_timestamp(secs, 0)),
    })
}

fn first_entry(entries: Option<Vec<RoleEntry>>) -> Option<String> {
    entries?.into_iter().next().map(RoleEntry::into_string)
}

/// Build an unsigned token around `payload`. Test helper shared with the
/// `ui` crate's guard tests.
#[doc(hidden)]
pub fn encode_test_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::rol(json!({"sub": "a@m.pe", "rol": "ADMIN"}), Role::Admin)]
    #[case::role_prefixed(json!({"sub": "a@m.pe", "role": "ROLE_PROPIETARIO"}), Role::Propietario)]
    #[case::roles_array(json!({"sub": "a@m.pe", "roles": ["cliente"]}), Role::Cliente)]
    #[case::spring_authorities(json!({"sub": "a@m.pe", "authorities": [{"authority": "ROLE_ADMIN"}]}), Role::Admin)]
    fn reads_role_from_known_claims(#[case] payload: serde_json::Value, #[case] expected: Role) {
        let claims = decode_claims(&encode_test_token(&payload)).unwrap();
        assert_eq!(claims.role, expected);
        assert_eq!(claims.subject, "a@m.pe");
    }

    #[test]
    fn reads_optional_fields() {
        let token = encode_test_token(&json!({
            "sub": "duena@mercado.pe",
            "rol": "PROPIETARIO",
            "userId": 7,
            "nombre": "Rosa Quispe",
            "standId": 12,
            "exp": 1_900_000_000
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, Some(7));
        assert_eq!(claims.stand_id, Some(12));
        assert_eq!(claims.display_name(), "Rosa Quispe");
        assert_eq!(claims.expires_at.unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn expiry_is_checked_against_now() {
        let token = encode_test_token(&json!({"sub": "x", "rol": "ADMIN", "exp": 1_000}));
        let claims = decode_claims(&token).unwrap();
        let now = DateTime::from_timestamp(2_000, 0).unwrap();
        assert!(claims.is_expired(now));

        let token = encode_test_token(&json!({"sub": "x", "rol": "ADMIN"}));
        assert!(!decode_claims(&token).unwrap().is_expired(now));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(decode_claims("abc"), Err(ClaimsError::Malformed));
        assert_eq!(decode_claims("a.b.c.d"), Err(ClaimsError::Malformed));
        assert!(matches!(decode_claims("a.!!!.c"), Err(ClaimsError::Encoding(_))));

        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(decode_claims(&not_json), Err(ClaimsError::Payload(_))));
    }

    #[test]
    fn rejects_missing_or_unknown_role() {
        let token = encode_test_token(&json!({"sub": "x"}));
        assert_eq!(decode_claims(&token), Err(ClaimsError::MissingRole));

        let token = encode_test_token(&json!({"sub": "x", "rol": "GERENTE"}));
        assert_eq!(
            decode_claims(&token),
            Err(ClaimsError::UnknownRole("GERENTE".to_string()))
        );
    }

    #[test]
    fn role_parsing_and_wire_format() {
        assert_eq!(Role::parse(" role_admin "), Some(Role::Admin));
        assert_eq!(Role::parse(""), None);
        assert_eq!(serde_json::to_string(&Role::Propietario).unwrap(), "\"PROPIETARIO\"");
        let parsed: Role = serde_json::from_str("\"ROLE_CLIENTE\"").unwrap();
        assert_eq!(parsed, Role::Cliente);
    }
}
