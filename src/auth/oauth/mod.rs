//! OAuth 2.0 client-credentials authentication for the Storm commerce API.
//!
//! - [`TokenProvider`]: cache-or-fetch access token source used by the API client
//! - [`exchange_client_credentials`]: a single uncached token exchange
//! - [`AuthError`]: failures while obtaining a token

mod client_credentials;
mod error;

pub use client_credentials::{
    exchange_client_credentials, TokenProvider, CLIENT_CREDENTIALS_GRANT_TYPE, EXPIRY_MARGIN_SECS,
};
pub use error::AuthError;
