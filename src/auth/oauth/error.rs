//! OAuth-specific error types.
//!
//! # Example
//!
//! ```rust
//! use storm_api::auth::oauth::AuthError;
//!
//! let error = AuthError::TokenRequestFailed {
//!     status: 401,
//!     message: "invalid_client".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use thiserror::Error;

/// Errors that can occur while obtaining an access token.
///
/// A failed exchange is always reported; the client never proceeds with an
/// empty token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity server rejected the client-credentials request, or it
    /// could not be reached.
    ///
    /// `status` is `0` when no HTTP response was received.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned, or `0` on network failure.
        status: u16,
        /// The response body or transport error.
        message: String,
    },

    /// The identity server answered with a body that is not a token response.
    #[error("Invalid token response: {message}")]
    InvalidTokenResponse {
        /// Why the body could not be parsed.
        message: String,
    },
}

impl AuthError {
    /// Returns the HTTP status of a rejected token request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::TokenRequestFailed { status, .. } if *status != 0 => Some(*status),
            _ => None,
        }
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
