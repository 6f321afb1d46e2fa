use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{CredentialRequest, QrCredential};
use crate::page::{PageRequest, PageResponse};

const CREDENTIALS: &str = "/api/v1/admin/credenciales-qr";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CredentialQuery {
    pub active_only: bool,
}

impl CredentialQuery {
    pub(crate) fn to_query(&self, page: PageRequest) -> Vec<(&'static str, String)> {
        let mut query = page.query();
        if self.active_only {
            query.push(("activo", "true".to_string()));
        }
        query
    }
}

fn credential_path(id: i64) -> String {
    format!("{CREDENTIALS}/{id}")
}

impl ApiClient {
    pub async fn list_credentials(
        &self,
        query: &CredentialQuery,
        page: PageRequest,
    ) -> Result<PageResponse<QrCredential>, ApiError> {
        self.get_query(CREDENTIALS, &query.to_query(page)).await
    }

    pub async fn issue_credential(
        &self,
        request: &CredentialRequest,
    ) -> Result<QrCredential, ApiError> {
        self.post(CREDENTIALS, request).await
    }

    pub async fn revoke_credential(&self, id: i64) -> Result<QrCredential, ApiError> {
        self.patch(&format!("{}/revocar", credential_path(id)), None::<&()>)
            .await
    }

    pub async fn delete_credential(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&credential_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_only_flag() {
        let pairs = CredentialQuery { active_only: true }.to_query(PageRequest::first(5));
        assert!(pairs.contains(&("activo", "true".to_string())));
        let pairs = CredentialQuery::default().to_query(PageRequest::first(5));
        assert!(!pairs.iter().any(|(k, _)| *k == "activo"));
    }
}
