//! Authentication types for the Storm API client.
//!
//! # Overview
//!
//! - [`CachedToken`]: A bearer token issued by the identity server
//! - [`TokenCache`]: The cache collaborator tokens are stored in
//! - [`MemoryTokenCache`]: The in-process [`TokenCache`]
//! - [`oauth`]: The client-credentials exchange and [`oauth::TokenProvider`]
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storm_api::auth::{MemoryTokenCache, TokenCache, ACCESS_TOKEN_KEY};
//!
//! let cache: Arc<dyn TokenCache> = Arc::new(MemoryTokenCache::new());
//! assert!(cache.get(ACCESS_TOKEN_KEY).is_none());
//! ```

mod cache;
pub mod oauth;
mod token;

pub use cache::{MemoryTokenCache, TokenCache, ACCESS_TOKEN_KEY};
pub use token::CachedToken;
