//! Route-guard decision, kept free of rendering so it can be tested.

use api::Role;
use chrono::{DateTime, Utc};

use crate::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still being restored.
    Pending,
    Allow,
    /// No session, or the token expired.
    Login,
    /// Logged in with a role that may not see this page.
    Forbidden { redirect: &'static str },
}

/// Where each role lands after login or when it hits a page it may not see.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Propietario => "/mi-stand",
        Role::Cliente => "/",
    }
}

pub fn decide(state: &AuthState, allowed: &[Role], now: DateTime<Utc>) -> GuardDecision {
    if state.loading {
        return GuardDecision::Pending;
    }
    let Some(session) = &state.session else {
        return GuardDecision::Login;
    };
    if session.claims.is_expired(now) {
        return GuardDecision::Login;
    }
    let role = session.claims.role;
    if allowed.contains(&role) {
        GuardDecision::Allow
    } else {
        GuardDecision::Forbidden {
            redirect: landing_path(role),
        }
    }
}

/// Where the login page should send a visitor who already holds a usable
/// session. Expired or still-restoring sessions stay on the login page.
pub fn login_redirect(state: &AuthState, now: DateTime<Utc>) -> Option<&'static str> {
    match decide(state, &Role::ALL, now) {
        GuardDecision::Allow => state.role().map(landing_path),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use api::auth::encode_test_token;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn state_with(role: &str, exp: DateTime<Utc>) -> AuthState {
        let token = encode_test_token(&json!({
            "sub": "user@mercado.pe",
            "rol": role,
            "exp": exp.timestamp(),
        }));
        AuthState {
            session: Some(Session::from_token(token).unwrap()),
            user: None,
            loading: false,
        }
    }

    #[test]
    fn test_loading_waits() {
        let state = AuthState {
            loading: true,
            ..AuthState::default()
        };
        assert_eq!(decide(&state, &[Role::Admin], now()), GuardDecision::Pending);
    }

    #[test]
    fn test_no_session_goes_to_login() {
        let state = AuthState {
            loading: false,
            ..AuthState::default()
        };
        assert_eq!(decide(&state, &[Role::Admin], now()), GuardDecision::Login);
    }

    #[test]
    fn test_expired_token_goes_to_login() {
        let state = state_with("ADMIN", now() - Duration::minutes(1));
        assert_eq!(decide(&state, &[Role::Admin], now()), GuardDecision::Login);
    }

    #[rstest]
    #[case("ADMIN", &[Role::Admin], GuardDecision::Allow)]
    #[case("ROLE_admin", &[Role::Admin], GuardDecision::Allow)]
    #[case("PROPIETARIO", &[Role::Propietario], GuardDecision::Allow)]
    #[case("PROPIETARIO", &[Role::Admin], GuardDecision::Forbidden { redirect: "/mi-stand" })]
    #[case("CLIENTE", &[Role::Admin, Role::Propietario], GuardDecision::Forbidden { redirect: "/" })]
    #[case("ADMIN", &[Role::Propietario], GuardDecision::Forbidden { redirect: "/admin" })]
    fn test_role_decision(
        #[case] role: &str,
        #[case] allowed: &[Role],
        #[case] expected: GuardDecision,
    ) {
        let state = state_with(role, now() + Duration::hours(1));
        assert_eq!(decide(&state, allowed, now()), expected);
    }

    #[test]
    fn test_expired_session_stays_on_login() {
        let state = state_with("ADMIN", now() - Duration::minutes(1));
        assert_eq!(decide(&state, &[Role::Admin], now()), GuardDecision::Login);
        assert_eq!(login_redirect(&state, now()), None);
    }

    #[rstest]
    #[case("ADMIN", Some("/admin"))]
    #[case("PROPIETARIO", Some("/mi-stand"))]
    #[case("CLIENTE", Some("/"))]
    fn test_login_redirects_live_session(#[case] role: &str, #[case] expected: Option<&str>) {
        let state = state_with(role, now() + Duration::hours(1));
        assert_eq!(login_redirect(&state, now()), expected);
    }

    #[test]
    fn test_login_waits_for_restore() {
        assert_eq!(login_redirect(&AuthState::default(), now()), None);
        assert_eq!(login_redirect(&AuthState::signed_out(), now()), None);
    }
}
