//! Unauthenticated storefront endpoints.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Product, StandMapItem, StandProfile};
use crate::page::{PageRequest, PageResponse};

const PUBLIC: &str = "/api/public";

/// Catalog search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: Option<String>,
}

impl CatalogQuery {
    pub(crate) fn to_query(&self, page: PageRequest) -> Vec<(&'static str, String)> {
        let mut query = page.query();
        query.push(("search", self.search.clone()));
        if let Some(category) = &self.category {
            query.push(("categoria", category.clone()));
        }
        query
    }
}

impl ApiClient {
    pub async fn stand_map(&self) -> Result<Vec<StandMapItem>, ApiError> {
        self.get(&format!("{PUBLIC}/stands/mapa")).await
    }

    pub async fn stand_profile(&self, id: i64) -> Result<StandProfile, ApiError> {
        self.get(&format!("{PUBLIC}/stands/{id}")).await
    }

    pub async fn catalog(
        &self,
        query: &CatalogQuery,
        page: PageRequest,
    ) -> Result<PageResponse<Product>, ApiError> {
        self.get_query(&format!("{PUBLIC}/productos"), &query.to_query(page))
            .await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.get(&format!("{PUBLIC}/categorias")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_query() {
        let query = CatalogQuery {
            search: "papa".into(),
            category: Some("Tubérculos".into()),
        };
        let pairs = query.to_query(PageRequest::first(12));
        assert!(pairs.contains(&("categoria", "Tubérculos".to_string())));
        assert!(pairs.contains(&("size", "12".to_string())));
    }
}
