use serde::{Deserialize, Serialize};

use super::de::{bool_or_true, default_true};
use super::format_soles;

/// A product listed by a stand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    /// Sale unit: "kg", "caja", "docena"...
    #[serde(rename = "unidad", default)]
    pub unit: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
    #[serde(
        rename = "disponible",
        default = "default_true",
        deserialize_with = "bool_or_true"
    )]
    pub available: bool,
    #[serde(rename = "standId", default)]
    pub stand_id: Option<i64>,
    #[serde(rename = "standCodigo", default)]
    pub stand_code: Option<String>,
    #[serde(rename = "standNombre", default)]
    pub stand_name: Option<String>,
}

impl Product {
    /// `S/ 4.50 / kg`
    pub fn price_label(&self) -> String {
        match self.unit.as_deref().map(str::trim) {
            Some(unit) if !unit.is_empty() => format!("{} / {unit}", format_soles(self.price)),
            _ => format_soles(self.price),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "unidad", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "imagenUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "disponible")]
    pub available: bool,
}

impl From<&Product> for ProductRequest {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            unit: product.unit.clone(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            available: product.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_label() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"nombre":"Papa amarilla","precio":4.5,"unidad":"kg","standCodigo":"A-3"}"#,
        )
        .unwrap();
        assert!(product.available);
        assert_eq!(product.price_label(), "S/ 4.50 / kg");

        let loose = Product {
            unit: None,
            ..product
        };
        assert_eq!(loose.price_label(), "S/ 4.50");
    }

    #[test]
    fn test_request_from_product_keeps_availability() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"nombre":"Camote","precio":2,"disponible":false}"#,
        )
        .unwrap();
        let req = ProductRequest::from(&product);
        assert!(!req.available);
        assert_eq!(req.price, 2.0);
    }
}
