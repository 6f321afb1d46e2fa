use serde::{Deserialize, Serialize};

use super::de::{bool_or_true, default_true};
use crate::auth::Role;

/// A user account. Stand owners are users with [`Role::Propietario`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos", default)]
    pub last_names: Option<String>,
    pub email: String,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(
        rename = "activo",
        default = "default_true",
        deserialize_with = "bool_or_true"
    )]
    pub active: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        match self.last_names.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_names.trim(), last),
            _ => self.first_names.trim().to_string(),
        }
    }
}

/// Body of create and update calls. The password is only sent when set, so
/// updates keep the current one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserRequest {
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos")]
    pub last_names: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserStatusRequest {
    #[serde(rename = "activo")]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_user_defaults_active() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"nombres":"Luis","apellidos":"Mamani","email":"l@m.pe","rol":"PROPIETARIO","activo":null}"#,
        )
        .unwrap();
        assert!(user.active);
        assert_eq!(user.role, Role::Propietario);
        assert_eq!(user.full_name(), "Luis Mamani");
    }

    #[test]
    fn test_full_name_without_last_names() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"nombres":" Ana ","email":"a@m.pe","rol":"ADMIN","activo":false}"#,
        )
        .unwrap();
        assert!(!user.active);
        assert_eq!(user.full_name(), "Ana");
    }

    #[test]
    fn test_update_without_password_omits_it() {
        let req = UserRequest {
            first_names: "Ana".into(),
            last_names: "Flores".into(),
            email: "a@m.pe".into(),
            dni: None,
            phone: None,
            role: Role::Admin,
            password: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["rol"], "ADMIN");
    }
}
