//! Authentication context and hooks for the UI.
//!
//! The session is the bearer token returned by the login call plus the claims
//! decoded from it. Route guards only look at the claims; the user profile is
//! fetched in the background for display.

use api::models::User;
use api::{decode_claims, ApiClient, ApiError, Claims, ClaimsError, Role};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use store::TokenStore;

use crate::components::use_toast;
use crate::session_store::make_token_store;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

impl Session {
    pub fn from_token(token: impl Into<String>) -> Result<Self, ClaimsError> {
        let token = token.into().trim().to_string();
        let claims = decode_claims(&token)?;
        Ok(Self { token, claims })
    }
}

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// Profile of the logged-in user, once fetched.
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub(crate) fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }

    fn signed_in(session: Session) -> Self {
        Self {
            session: Some(session),
            user: None,
            loading: false,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.claims.role)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }

    pub fn display_name(&self) -> String {
        match (&self.user, &self.session) {
            (Some(user), _) => user.full_name(),
            (None, Some(session)) => session.claims.display_name().to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Get the current authentication state.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The shared client carrying the current session token.
pub fn use_api() -> Memo<ApiClient> {
    let base = use_context::<ApiClient>();
    let auth = use_auth();
    use_memo(move || base.with_token(auth.read().token()))
}

/// Decode `token`, refuse it if already expired and persist it in `store`.
pub(crate) fn start_session(
    store: &impl TokenStore,
    token: String,
    now: DateTime<Utc>,
) -> Result<Session, ClaimsError> {
    let session = Session::from_token(token)?;
    if session.claims.is_expired(now) {
        return Err(ClaimsError::Expired);
    }
    store.save(&session.token);
    Ok(session)
}

pub(crate) fn end_session(store: &impl TokenStore) -> AuthState {
    store.clear();
    AuthState::signed_out()
}

/// The state to switch to after a failed request, if the failure ends the session.
pub(crate) fn state_after_error(store: &impl TokenStore, error: &ApiError) -> Option<AuthState> {
    error.is_unauthorized().then(|| end_session(store))
}

/// Store `token` and make it the current session. Returns the role so the
/// caller can navigate to its landing page.
pub fn sign_in(mut auth: Signal<AuthState>, token: String) -> Result<Role, ClaimsError> {
    let session = start_session(&make_token_store(), token, Utc::now())?;
    let role = session.claims.role;
    tracing::info!("Session started for {} ({role})", session.claims.subject);
    auth.set(AuthState::signed_in(session));
    Ok(role)
}

pub fn sign_out(mut auth: Signal<AuthState>) {
    auth.set(end_session(&make_token_store()));
}

/// Restores the stored session and provides [`AuthState`] to its children.
///
/// Expects an [`ApiClient`] in context.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let base = use_context::<ApiClient>();

    let _ = use_resource(move || {
        let base = base.clone();
        async move {
            let store = make_token_store();
            let session = store
                .load()
                .and_then(|token| match Session::from_token(token) {
                    Ok(session) => Some(session),
                    Err(e) => {
                        tracing::warn!("Discarding stored token: {e}");
                        None
                    }
                })
                .filter(|session| !session.claims.is_expired(Utc::now()));

            let Some(session) = session else {
                store.clear();
                auth_state.set(AuthState::signed_out());
                return;
            };

            auth_state.set(AuthState::signed_in(session.clone()));

            let client = base.with_token(Some(session.token.clone()));
            match client.current_user().await {
                Ok(user) => auth_state.write().user = Some(user),
                Err(e) if e.is_unauthorized() => {
                    tracing::info!("Stored session rejected by the backend");
                    store.clear();
                    auth_state.set(AuthState::signed_out());
                }
                Err(e) => tracing::warn!("Failed to fetch profile: {e}"),
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Turns an [`ApiError`] into a toast. A rejected token also ends the session.
#[derive(Clone, Copy)]
pub struct ErrorReporter {
    auth: Signal<AuthState>,
    toasts: crate::components::Toasts,
}

impl ErrorReporter {
    pub fn report(&self, context: &str, error: &ApiError) {
        tracing::warn!("{context}: {error}");
        if let Some(state) = state_after_error(&make_token_store(), error) {
            let mut auth = self.auth;
            auth.set(state);
        }
        self.toasts.error(error.user_message());
    }
}

pub fn use_error_reporter() -> ErrorReporter {
    ErrorReporter {
        auth: use_auth(),
        toasts: use_toast(),
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Cerrar sesión".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth_state = use_auth();
    let nav = use_navigator();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                sign_out(auth_state);
                nav.replace(crate::guard::LOGIN_PATH);
            },
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::auth::encode_test_token;
    use chrono::Duration;
    use serde_json::json;
    use store::MemoryStore;

    fn token_expiring(exp: DateTime<Utc>) -> String {
        encode_test_token(&json!({"sub": "ana@mercado.pe", "rol": "ADMIN", "exp": exp.timestamp()}))
    }

    #[test]
    fn test_session_from_token() {
        let token = encode_test_token(&json!({"sub": "ana@mercado.pe", "rol": "ROLE_ADMIN", "nombre": "Ana"}));
        let session = Session::from_token(format!(" {token} ")).unwrap();
        assert_eq!(session.token, token);
        assert_eq!(session.claims.role, Role::Admin);
    }

    #[test]
    fn test_session_rejects_garbage() {
        assert!(Session::from_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_state_accessors() {
        let token = encode_test_token(&json!({"sub": "luis@mercado.pe", "rol": "PROPIETARIO"}));
        let state = AuthState {
            session: Some(Session::from_token(token.clone()).unwrap()),
            user: None,
            loading: false,
        };
        assert!(state.is_logged_in());
        assert_eq!(state.role(), Some(Role::Propietario));
        assert_eq!(state.token(), Some(token));
        assert_eq!(state.display_name(), "luis@mercado.pe");

        let empty = AuthState::signed_out();
        assert!(!empty.is_logged_in());
        assert_eq!(empty.role(), None);
        assert!(!empty.loading);
    }

    #[test]
    fn test_start_session_persists_fresh_token() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let token = token_expiring(now + Duration::hours(1));
        let session = start_session(&store, token.clone(), now).unwrap();
        assert_eq!(session.claims.role, Role::Admin);
        assert_eq!(store.load(), Some(token));
    }

    #[test]
    fn test_start_session_rejects_expired_token() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let result = start_session(&store, token_expiring(now - Duration::minutes(1)), now);
        assert_eq!(result.unwrap_err(), ClaimsError::Expired);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_unauthorized_error_ends_session() {
        let store = MemoryStore::with_token("stored-token");
        let state = state_after_error(&store, &ApiError::Unauthorized);
        assert_eq!(state, Some(AuthState::signed_out()));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_other_errors_keep_session() {
        let store = MemoryStore::with_token("stored-token");
        let state = state_after_error(&store, &ApiError::NotFound("stand 4".into()));
        assert_eq!(state, None);
        assert_eq!(store.load(), Some("stored-token".to_string()));
    }
}
