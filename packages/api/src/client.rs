//! # HTTP client
//!
//! [`ApiClient`] owns transport details only: URL construction, bearer
//! authentication, JSON (de)serialisation and HTTP error mapping. The typed
//! operations live in [`crate::endpoints`], one `impl ApiClient` block per
//! backend resource.
//!
//! The client is cheap to clone (`reqwest::Client` is reference counted), so
//! UI code clones it into every async task.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{map_status_error, ApiError};
use crate::page::PageRequest;

/// Typed client for the Mercado REST backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
    page_size: u32,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.token == other.token && self.page_size == other.page_size
    }
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the base URL is invalid or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base = config.base_url()?;

        #[allow(unused_mut)]
        let mut builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(std::time::Duration::from_secs(config.timeout_secs.max(1)));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base,
            token: None,
            page_size: config.page_size.max(1),
        })
    }

    /// Copy of this client that authenticates with `token`.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            ..self.clone()
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// First page with the configured page size.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::first(self.page_size)
    }

    /// Resolve an endpoint path (leading slash optional) against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("invalid endpoint {path:?}: {e}")))
    }

    /// Resolve `path` and append query pairs, skipping blank values.
    pub(crate) fn url_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self.url(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                let value = value.trim();
                if !value.is_empty() {
                    pairs.append_pair(key, value);
                }
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send_json(Method::GET, url, None::<&()>).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url_with_query(path, query)?;
        self.send_json(Method::GET, url, None::<&()>).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send_json(Method::POST, url, Some(body)).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send_json(Method::PUT, url, Some(body)).await
    }

    pub(crate) async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send_json(Method::PATCH, url, body).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path)?;
        self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let (status, bytes) = self.send(method, url, body).await?;
        decode_body(status, &bytes)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        tracing::debug!(method = %method, path = url.path(), "backend request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, path = url.path(), "backend unreachable: {}", e);
            ApiError::from(e)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::from)?.to_vec();

        if !status.is_success() {
            let error = map_status_error(status, &bytes);
            tracing::warn!(method = %method, path = url.path(), status = status.as_u16(), "backend error: {}", error);
            return Err(error);
        }
        Ok((status, bytes))
    }
}

/// Decode a successful body. Empty bodies (`204 No Content`, or a `200` with
/// nothing in it) decode as JSON `null`, so `()` and `Option<T>` targets work.
fn decode_body<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ApiError> {
    if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"null").map_err(ApiError::from);
    }
    serde_json::from_slice(bytes).map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig::new("https://api.mercado.pe/base")).unwrap()
    }

    #[test]
    fn test_url_join_strips_leading_slash() {
        let url = client().url("/api/v1/stands/4").unwrap();
        assert_eq!(url.as_str(), "https://api.mercado.pe/base/api/v1/stands/4");
    }

    #[test]
    fn test_query_skips_blank_values_and_encodes() {
        let url = client()
            .url_with_query(
                "/api/public/productos",
                &[
                    ("search", "papa amarilla".to_string()),
                    ("categoria", "  ".to_string()),
                    ("page", "0".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(url.query(), Some("search=papa+amarilla&page=0"));

        let url = client()
            .url_with_query("/api/v1/stands", &[("search", String::new())])
            .unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_with_token_ignores_blank() {
        let c = client();
        assert!(!c.is_authenticated());
        assert_eq!(c.with_token(Some("abc".into())).token(), Some("abc"));
        assert!(!c.with_token(Some(" ".into())).is_authenticated());
    }

    #[test]
    fn test_first_page_uses_configured_size() {
        let c = ApiClient::new(&ApiConfig::new("http://localhost:8080").with_page_size(15)).unwrap();
        assert_eq!(c.first_page(), PageRequest::new(0, 15));
    }

    #[test]
    fn test_decode_empty_body() {
        decode_body::<()>(StatusCode::NO_CONTENT, b"").unwrap();
        let none: Option<u32> = decode_body(StatusCode::OK, b"  ").unwrap();
        assert!(none.is_none());
        let err = decode_body::<u32>(StatusCode::OK, b"{").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let config = ApiConfig {
            timeout_secs: 2,
            ..ApiConfig::new("http://127.0.0.1:9")
        };
        let client = ApiClient::new(&config).unwrap();
        let err = client.get::<serde_json::Value>("/api/v1/auth/me").await.unwrap_err();
        assert!(
            matches!(err, ApiError::Transport(_) | ApiError::Timeout(_)),
            "unexpected error: {err:?}"
        );
    }
}
