use crate::auth::Role;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{User, UserRequest, UserStatusRequest};
use crate::page::{PageRequest, PageResponse};

const USERS: &str = "/api/v1/admin/usuarios";

/// Server-side filters for the user list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserQuery {
    pub search: String,
    pub role: Option<Role>,
}

impl UserQuery {
    pub(crate) fn to_query(&self, page: PageRequest) -> Vec<(&'static str, String)> {
        let mut query = page.query();
        query.push(("search", self.search.clone()));
        if let Some(role) = self.role {
            query.push(("rol", role.as_str().to_string()));
        }
        query
    }
}

fn user_path(id: i64) -> String {
    format!("{USERS}/{id}")
}

impl ApiClient {
    pub async fn list_users(
        &self,
        query: &UserQuery,
        page: PageRequest,
    ) -> Result<PageResponse<User>, ApiError> {
        self.get_query(USERS, &query.to_query(page)).await
    }

    /// Users with the `PROPIETARIO` role, unpaged.
    pub async fn list_owners(&self) -> Result<Vec<User>, ApiError> {
        self.get(&format!("{USERS}/propietarios")).await
    }

    /// Administrators, who can be made responsible for incidents.
    pub async fn list_staff(&self) -> Result<Vec<User>, ApiError> {
        let query = UserQuery {
            role: Some(Role::Admin),
            ..UserQuery::default()
        };
        Ok(self
            .list_users(&query, PageRequest::first(100))
            .await?
            .content)
    }

    pub async fn create_user(&self, request: &UserRequest) -> Result<User, ApiError> {
        self.post(USERS, request).await
    }

    pub async fn update_user(&self, id: i64, request: &UserRequest) -> Result<User, ApiError> {
        self.put(&user_path(id), request).await
    }

    pub async fn set_user_active(&self, id: i64, active: bool) -> Result<User, ApiError> {
        let body = UserStatusRequest { active };
        self.patch(&format!("{}/estado", user_path(id)), Some(&body))
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&user_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_with_role() {
        let query = UserQuery {
            search: String::new(),
            role: Some(Role::Propietario),
        };
        let pairs = query.to_query(PageRequest::first(10));
        assert!(pairs.contains(&("rol", "PROPIETARIO".to_string())));
    }
}
