//! Operations a stand owner performs on their own stand.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Incident, IncidentRequest, Product, ProductRequest, Stand};

const OWNER: &str = "/api/v1/propietario";

impl ApiClient {
    pub async fn my_stand(&self) -> Result<Stand, ApiError> {
        self.get(&format!("{OWNER}/stand")).await
    }

    pub async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get(&format!("{OWNER}/productos")).await
    }

    pub async fn create_product(&self, request: &ProductRequest) -> Result<Product, ApiError> {
        self.post(&format!("{OWNER}/productos"), request).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: &ProductRequest,
    ) -> Result<Product, ApiError> {
        self.put(&format!("{OWNER}/productos/{id}"), request).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{OWNER}/productos/{id}")).await
    }

    /// Report an incident on the owner's stand; the backend fills `standId`.
    pub async fn report_incident(&self, request: &IncidentRequest) -> Result<Incident, ApiError> {
        self.post(&format!("{OWNER}/incidencias"), request).await
    }
}
