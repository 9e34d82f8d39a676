//! Error types for Storm API requests.
//!
//! Non-success responses are classified by status range:
//!
//! - [`StormError::BadRequest`]: 400-499
//! - [`StormError::ServerError`]: 500-599
//! - [`StormError::Request`]: any other non-success status
//! - [`StormError::RecordNotFound`]: an empty body where data was expected
//!
//! # Example
//!
//! ```rust,ignore
//! use storm_api::clients::StormError;
//!
//! match client.get::<ProductList>("Products/ListProducts2").await {
//!     Ok(list) => println!("{} products", list.product_count),
//!     Err(StormError::RecordNotFound { .. }) => println!("nothing there"),
//!     Err(StormError::BadRequest { status, reason }) => println!("{status} {reason}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use crate::auth::oauth::AuthError;
use thiserror::Error;

/// Unified error type for Storm API calls.
///
/// No variant is retried; every error is returned to the immediate caller.
#[derive(Debug, Error)]
pub enum StormError {
    /// The API answered with a 4xx status.
    #[error("Bad request: status {status}, reason={reason}")]
    BadRequest {
        /// The HTTP status code.
        status: u16,
        /// The HTTP reason phrase.
        reason: String,
    },

    /// The API answered with a 5xx status.
    #[error("Server error: status {status}, reason={reason}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The HTTP reason phrase.
        reason: String,
    },

    /// The API returned no data for the request.
    #[error("Record not found: status {status}, reason={reason}")]
    RecordNotFound {
        /// Always `404`.
        status: u16,
        /// Describes the missing data.
        reason: String,
    },

    /// The API answered with a non-success status outside 400-599.
    #[error("Invalid request status {status}, reason={reason}")]
    Request {
        /// The HTTP status code.
        status: u16,
        /// The HTTP reason phrase.
        reason: String,
    },

    /// The operation is deliberately not implemented.
    #[error("Operation '{operation}' is not supported")]
    NotSupported {
        /// The name of the unsupported operation.
        operation: &'static str,
    },

    /// No access token could be obtained.
    #[error(transparent)]
    Authentication(#[from] AuthError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body could not be decoded into the requested type.
    #[error("Failed to decode response body: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl StormError {
    /// Returns the HTTP status code this error originated from, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { status, .. }
            | Self::ServerError { status, .. }
            | Self::RecordNotFound { status, .. }
            | Self::Request { status, .. } => Some(*status),
            Self::Authentication(e) => e.status(),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::NotSupported { .. } | Self::Serialize(_) | Self::Deserialize(_) => None,
        }
    }
}

// Verify StormError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StormError>();
};
