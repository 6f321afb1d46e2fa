use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AssignOwnerRequest, Stand, StandRequest, StandStatus, StandStatusRequest,
};
use crate::page::{PageRequest, PageResponse};

const STANDS: &str = "/api/v1/stands";

/// Server-side filters for the stand list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StandQuery {
    pub search: String,
    pub status: Option<StandStatus>,
}

impl StandQuery {
    pub(crate) fn to_query(&self, page: PageRequest) -> Vec<(&'static str, String)> {
        let mut query = page.query();
        query.push(("search", self.search.clone()));
        if let Some(status) = self.status {
            query.push(("estado", status.as_str().to_string()));
        }
        query
    }
}

fn stand_path(id: i64) -> String {
    format!("{STANDS}/{id}")
}

impl ApiClient {
    pub async fn list_stands(
        &self,
        query: &StandQuery,
        page: PageRequest,
    ) -> Result<PageResponse<Stand>, ApiError> {
        self.get_query(STANDS, &query.to_query(page)).await
    }

    /// Every stand, for selects. Walks the pages until the last one.
    pub async fn all_stands(&self) -> Result<Vec<Stand>, ApiError> {
        let mut page = PageRequest::first(100);
        let mut stands = Vec::new();
        loop {
            let response = self.list_stands(&StandQuery::default(), page).await?;
            let done = !response.has_next() || response.is_empty();
            stands.extend(response.content);
            if done {
                return Ok(stands);
            }
            page = page.next();
        }
    }

    pub async fn get_stand(&self, id: i64) -> Result<Stand, ApiError> {
        self.get(&stand_path(id)).await
    }

    pub async fn create_stand(&self, request: &StandRequest) -> Result<Stand, ApiError> {
        self.post(STANDS, request).await
    }

    pub async fn update_stand(&self, id: i64, request: &StandRequest) -> Result<Stand, ApiError> {
        self.put(&stand_path(id), request).await
    }

    pub async fn change_stand_status(
        &self,
        id: i64,
        status: StandStatus,
    ) -> Result<Stand, ApiError> {
        let body = StandStatusRequest { status };
        self.patch(&format!("{}/estado", stand_path(id)), Some(&body))
            .await
    }

    pub async fn assign_stand_owner(&self, id: i64, owner_id: i64) -> Result<Stand, ApiError> {
        let body = AssignOwnerRequest { owner_id };
        self.patch(&format!("{}/propietario", stand_path(id)), Some(&body))
            .await
    }

    pub async fn delete_stand(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&stand_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_includes_status_wire_value() {
        let query = StandQuery {
            search: "rosita".into(),
            status: Some(StandStatus::Mantenimiento),
        };
        let pairs = query.to_query(PageRequest::new(1, 20));
        assert!(pairs.contains(&("estado", "MANTENIMIENTO".to_string())));
        assert!(pairs.contains(&("search", "rosita".to_string())));
        assert!(pairs.contains(&("page", "1".to_string())));
    }

    #[test]
    fn test_stand_path() {
        assert_eq!(stand_path(42), "/api/v1/stands/42");
    }
}
