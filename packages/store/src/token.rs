/// Key under which the session token is stored.
pub const DEFAULT_TOKEN_KEY: &str = "mercado.token";

/// Storage for the current session token.
///
/// Implementations never fail loudly: an unreadable or unavailable backing
/// store behaves like an empty one, so the user is simply asked to log in.
pub trait TokenStore {
    /// Return the stored token, if any.
    fn load(&self) -> Option<String>;

    /// Replace the stored token.
    fn save(&self, token: &str);

    /// Forget the stored token.
    fn clear(&self);
}
