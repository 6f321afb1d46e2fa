use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, User};

const LOGIN: &str = "/api/v1/auth/login";
const ME: &str = "/api/v1/auth/me";

impl ApiClient {
    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post(LOGIN, &request).await?;
        if response.token.trim().is_empty() {
            return Err(ApiError::Decode("login answered an empty token".to_string()));
        }
        tracing::info!("Logged in as {}", request.email);
        Ok(response.token)
    }

    /// Profile of the user owning the current token.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(ME).await
    }
}
