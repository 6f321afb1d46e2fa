use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AssignResponsibleRequest, Incident, IncidentRequest, IncidentStatus, IncidentStatusRequest,
};
use crate::page::{PageRequest, PageResponse};

const INCIDENTS: &str = "/api/v1/admin/incidencias";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncidentQuery {
    pub status: Option<IncidentStatus>,
}

impl IncidentQuery {
    pub(crate) fn to_query(&self, page: PageRequest) -> Vec<(&'static str, String)> {
        let mut query = page.query();
        if let Some(status) = self.status {
            query.push(("estado", status.as_str().to_string()));
        }
        query
    }
}

fn incident_path(id: i64) -> String {
    format!("{INCIDENTS}/{id}")
}

impl ApiClient {
    pub async fn list_incidents(
        &self,
        query: &IncidentQuery,
        page: PageRequest,
    ) -> Result<PageResponse<Incident>, ApiError> {
        self.get_query(INCIDENTS, &query.to_query(page)).await
    }

    /// Number of incidents in `status`, read from the page envelope.
    pub async fn count_incidents(&self, status: IncidentStatus) -> Result<u64, ApiError> {
        let query = IncidentQuery {
            status: Some(status),
        };
        Ok(self
            .list_incidents(&query, PageRequest::first(1))
            .await?
            .total_elements)
    }

    pub async fn create_incident(&self, request: &IncidentRequest) -> Result<Incident, ApiError> {
        self.post(INCIDENTS, request).await
    }

    pub async fn change_incident_status(
        &self,
        id: i64,
        status: IncidentStatus,
    ) -> Result<Incident, ApiError> {
        let body = IncidentStatusRequest { status };
        self.patch(&format!("{}/estado", incident_path(id)), Some(&body))
            .await
    }

    pub async fn assign_incident(&self, id: i64, assignee_id: i64) -> Result<Incident, ApiError> {
        let body = AssignResponsibleRequest { assignee_id };
        self.patch(&format!("{}/responsable", incident_path(id)), Some(&body))
            .await
    }

    pub async fn delete_incident(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&incident_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_status() {
        let pairs = IncidentQuery {
            status: Some(IncidentStatus::EnProceso),
        }
        .to_query(PageRequest::first(5));
        assert_eq!(pairs.last(), Some(&("estado", "EN_PROCESO".to_string())));
    }
}
