//! Error type for every backend call.
//!
//! The backend answers failures with a JSON body carrying a human readable
//! message. [`ApiError::user_message`] is what ends up in a toast.

use reqwest::StatusCode;
use serde::Deserialize;

/// Failure of a request against the Mercado backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection, CORS...).
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Missing, invalid or expired session.
    #[error("session expired or missing")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other non-2xx answer.
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },
    /// A 2xx answer whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Text suitable for a toast notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "No se pudo conectar con el servidor".to_string(),
            ApiError::Timeout(_) => "El servidor tardó demasiado en responder".to_string(),
            ApiError::Unauthorized => "Tu sesión expiró, vuelve a iniciar sesión".to_string(),
            ApiError::Forbidden(message)
            | ApiError::NotFound(message)
            | ApiError::Backend { message, .. } => message.clone(),
            ApiError::Decode(_) => "Respuesta inesperada del servidor".to_string(),
            ApiError::Config(message) => message.clone(),
        }
    }

    /// Whether the session should be dropped because of this error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout(error.to_string())
        } else if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    mensaje: Option<String>,
    error: Option<String>,
}

/// Map a non-success status and its body to an [`ApiError`].
pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = extract_message(body).unwrap_or_else(|| format!("status {}", status.as_u16()));

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ApiError::Timeout(message),
        _ => ApiError::Backend {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull the human message out of an error body. Falls back to a trimmed
/// plain-text body when the backend did not answer JSON.
fn extract_message(body: &[u8]) -> Option<String> {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return [parsed.message, parsed.mensaje, parsed.error]
            .into_iter()
            .flatten()
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty());
    }
    body_preview(body)
}

fn body_preview(body: &[u8]) -> Option<String> {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.is_empty() || compact.starts_with('<') {
        return None;
    }
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        Some(format!("{preview}..."))
    } else {
        Some(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unauthorized(StatusCode::UNAUTHORIZED)]
    #[case::forbidden(StatusCode::FORBIDDEN)]
    #[case::not_found(StatusCode::NOT_FOUND)]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    #[case::bad_request(StatusCode::BAD_REQUEST)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_statuses_to_expected_variants(#[case] status: StatusCode) {
        let error = map_status_error(status, br#"{"message":"Stand no disponible"}"#);
        match status.as_u16() {
            401 => assert_eq!(error, ApiError::Unauthorized),
            403 => assert!(matches!(error, ApiError::Forbidden(_))),
            404 => assert!(matches!(error, ApiError::NotFound(_))),
            408 | 504 => assert!(matches!(error, ApiError::Timeout(_))),
            code => assert_eq!(
                error,
                ApiError::Backend {
                    status: code,
                    message: "Stand no disponible".to_string(),
                }
            ),
        }
    }

    #[test]
    fn forwards_backend_message_to_user() {
        let error = map_status_error(
            StatusCode::CONFLICT,
            br#"{"status":409,"mensaje":"El stand A-12 ya existe"}"#,
        );
        assert_eq!(error.user_message(), "El stand A-12 ya existe");
    }

    #[test]
    fn prefers_message_over_error_field() {
        let error = map_status_error(
            StatusCode::BAD_REQUEST,
            br#"{"error":"Bad Request","message":"El monto es obligatorio"}"#,
        );
        assert_eq!(error.user_message(), "El monto es obligatorio");
    }

    #[test]
    fn falls_back_to_status_when_body_is_empty() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(
            error,
            ApiError::Backend {
                status: 502,
                message: "status 502".to_string(),
            }
        );
    }

    #[test]
    fn uses_plain_text_body_but_ignores_html() {
        let error = map_status_error(StatusCode::BAD_REQUEST, b"  periodo\n invalido ");
        assert_eq!(error.user_message(), "periodo invalido");

        let error = map_status_error(StatusCode::BAD_GATEWAY, b"<html><body>nginx</body></html>");
        assert_eq!(error.user_message(), "status 502");
    }

    #[test]
    fn only_unauthorized_drops_the_session() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Forbidden("x".into()).is_unauthorized());
    }
}
