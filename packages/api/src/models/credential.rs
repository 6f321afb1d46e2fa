use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de::default_true;

/// QR access credential issued to a user for a stand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QrCredential {
    pub id: i64,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "usuarioNombre", default)]
    pub user_name: Option<String>,
    #[serde(rename = "standId", default)]
    pub stand_id: Option<i64>,
    #[serde(rename = "standCodigo", default)]
    pub stand_code: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fechaEmision", default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(rename = "fechaExpiracion", default)]
    pub expires_on: Option<NaiveDate>,
    /// PNG image of the QR code, base64 encoded.
    #[serde(rename = "qrBase64", default)]
    pub qr_base64: Option<String>,
}

impl QrCredential {
    /// Active and not past its expiration date.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.active && self.expires_on.map_or(true, |exp| date <= exp)
    }

    /// `data:` URI usable as an `<img src>`.
    pub fn qr_data_uri(&self) -> Option<String> {
        let data = self.qr_base64.as_deref()?.trim();
        if data.is_empty() {
            None
        } else if data.starts_with("data:") {
            Some(data.to_string())
        } else {
            Some(format!("data:image/png;base64,{data}"))
        }
    }
}

/// Body of the issue call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CredentialRequest {
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "standId", skip_serializing_if = "Option::is_none")]
    pub stand_id: Option<i64>,
    #[serde(rename = "diasVigencia")]
    pub valid_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> QrCredential {
        serde_json::from_str(
            r#"{
                "id": 1,
                "codigo": "QR-0001",
                "usuarioId": 5,
                "fechaEmision": "2024-05-01",
                "fechaExpiracion": "2024-05-31",
                "qrBase64": "iVBORw0KGgo="
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validity_window() {
        let c = credential();
        assert!(c.active);
        let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        assert!(c.is_valid_on(d(31)));
        assert!(!c.is_valid_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));

        let revoked = QrCredential {
            active: false,
            ..credential()
        };
        assert!(!revoked.is_valid_on(d(10)));
    }

    #[test]
    fn test_qr_data_uri() {
        let c = credential();
        assert_eq!(
            c.qr_data_uri().as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
        let none = QrCredential {
            qr_base64: Some("  ".into()),
            ..credential()
        };
        assert!(none.qr_data_uri().is_none());
    }
}
