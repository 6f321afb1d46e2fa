use serde::{Deserialize, Serialize};

use super::de::string_or_number;
use super::Product;

wire_enum! {
    /// Operational state of a stand.
    StandStatus {
        Activo => "ACTIVO", "Activo";
        Inactivo => "INACTIVO", "Inactivo";
        Mantenimiento => "MANTENIMIENTO", "En mantenimiento";
        Clausurado => "CLAUSURADO", "Clausurado";
    }
}

/// Display code combining block and stand number: `A-12`.
pub fn stand_code(block: &str, number: &str) -> String {
    let block = block.trim();
    let number = number.trim();
    match (block.is_empty(), number.is_empty()) {
        (true, _) => number.to_string(),
        (false, true) => block.to_string(),
        (false, false) => format!("{block}-{number}"),
    }
}

/// A market stall as seen by administrators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stand {
    pub id: i64,
    #[serde(rename = "bloque")]
    pub block: String,
    #[serde(rename = "numeroStand", deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(rename = "nombreComercial", default)]
    pub business_name: Option<String>,
    #[serde(rename = "rubro", default)]
    pub category: Option<String>,
    #[serde(rename = "estado")]
    pub status: StandStatus,
    #[serde(rename = "propietarioId", default)]
    pub owner_id: Option<i64>,
    #[serde(rename = "propietarioNombre", default)]
    pub owner_name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

impl Stand {
    pub fn code(&self) -> String {
        stand_code(&self.block, &self.number)
    }

    /// Business name, or the stand code when the stand has none.
    pub fn title(&self) -> String {
        self.business_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Stand {}", self.code()))
    }
}

/// Reduced stand record served by the public map endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandMapItem {
    pub id: i64,
    #[serde(rename = "bloque")]
    pub block: String,
    #[serde(rename = "numeroStand", deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(rename = "nombreComercial", default)]
    pub business_name: Option<String>,
    #[serde(rename = "rubro", default)]
    pub category: Option<String>,
    #[serde(rename = "estado")]
    pub status: StandStatus,
}

impl StandMapItem {
    pub fn code(&self) -> String {
        stand_code(&self.block, &self.number)
    }
}

/// Public profile: the stand plus what it sells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandProfile {
    pub stand: Stand,
    #[serde(rename = "productos", default)]
    pub products: Vec<Product>,
}

/// Body of create and update calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandRequest {
    #[serde(rename = "bloque")]
    pub block: String,
    #[serde(rename = "numeroStand")]
    pub number: String,
    #[serde(rename = "nombreComercial", skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(rename = "rubro", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandStatusRequest {
    #[serde(rename = "estado")]
    pub status: StandStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssignOwnerRequest {
    #[serde(rename = "propietarioId")]
    pub owner_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stand_code() {
        assert_eq!(stand_code("A", "12"), "A-12");
        assert_eq!(stand_code(" B ", " 3"), "B-3");
        assert_eq!(stand_code("", "7"), "7");
        assert_eq!(stand_code("C", ""), "C");
    }

    #[test]
    fn test_decode_stand_with_numeric_number() {
        let json = r#"{
            "id": 4,
            "bloque": "A",
            "numeroStand": 12,
            "nombreComercial": "Abarrotes Rosita",
            "estado": "ACTIVO",
            "propietarioId": 9,
            "propietarioNombre": "Rosa Quispe"
        }"#;
        let stand: Stand = serde_json::from_str(json).unwrap();
        assert_eq!(stand.code(), "A-12");
        assert_eq!(stand.title(), "Abarrotes Rosita");
        assert_eq!(stand.status, StandStatus::Activo);
        assert!(stand.category.is_none());
    }

    #[test]
    fn test_title_falls_back_to_code() {
        let item: Stand = serde_json::from_str(
            r#"{"id":1,"bloque":"D","numeroStand":"5","nombreComercial":" ","estado":"INACTIVO"}"#,
        )
        .unwrap();
        assert_eq!(item.title(), "Stand D-5");
    }

    #[test]
    fn test_request_skips_empty_optionals() {
        let req = StandRequest {
            block: "B".into(),
            number: "4".into(),
            business_name: None,
            category: Some("Frutas".into()),
            description: None,
            phone: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"bloque": "B", "numeroStand": "4", "rubro": "Frutas"})
        );
    }
}
