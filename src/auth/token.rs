//! Access token issued by the identity server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bearer token obtained through the client-credentials grant.
///
/// This is both the identity server's JSON response shape and the value
/// stored in the [`TokenCache`](crate::auth::TokenCache).
///
/// # Security
///
/// The `Debug` implementation masks the access token value.
///
/// # Example
///
/// ```rust
/// use storm_api::auth::CachedToken;
///
/// let token: CachedToken = serde_json::from_str(
///     r#"{"access_token":"abc","expires_in":3600,"token_type":"Bearer","scope":"stage"}"#,
/// ).unwrap();
///
/// assert_eq!(token.access_token, "abc");
/// assert_eq!(token.expires_in, 3600);
/// assert!(!format!("{:?}", token).contains("abc"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    /// The bearer token value.
    pub access_token: String,
    /// Lifetime of the token in seconds, as reported by the identity server.
    pub expires_in: i64,
    /// Token type, normally `Bearer`.
    #[serde(default)]
    pub token_type: String,
    /// The scope the token was issued for.
    #[serde(default)]
    pub scope: String,
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken")
            .field("access_token", &"*****")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

// Verify CachedToken is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CachedToken>();
};
