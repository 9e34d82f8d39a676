//! # Storm API Rust client
//!
//! An async client for the Storm commerce REST API: OAuth client-credentials
//! authentication with token caching, JSON GET/POST requests, and typed
//! errors for failed calls.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`StormConfig`] and [`StormConfigBuilder`]
//! - Validated newtypes for URLs and credentials
//! - Client-credentials token exchange with a pluggable [`TokenCache`]
//! - An authenticated request pipeline via [`StormClient`]
//! - Status classification into [`StormError`]
//! - Response models such as [`ProductList`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use storm_api::{
//!     ApiUrl, ApplicationId, ClientId, ClientSecret, IdentityUrl, MemoryTokenCache,
//!     StormClient, StormConfig,
//! };
//!
//! let config = StormConfig::builder()
//!     .application_id(ApplicationId::new("1234").unwrap())
//!     .api_url(ApiUrl::new("https://api.example.com/api/1.1/").unwrap())
//!     .identity_url(IdentityUrl::new("https://identity.example.com/").unwrap())
//!     .client_id(ClientId::new("client").unwrap())
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .environment("stage")
//!     .build()
//!     .unwrap();
//!
//! let client = StormClient::with_http_client(
//!     config,
//!     Arc::new(MemoryTokenCache::new()),
//!     reqwest::Client::new(),
//! );
//!
//! assert_eq!(
//!     client.prepare_url("Products/ListProducts2"),
//!     "https://api.example.com/api/1.1/Products/ListProducts2?format=json"
//! );
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use storm_api::{ProductList, StormError};
//!
//! let list: ProductList = client.get("Products/ListProducts2?pageSize=10").await?;
//!
//! match client.get::<ProductList>("Products/ListProducts2?categorySeed=999").await {
//!     Err(StormError::RecordNotFound { .. }) => println!("empty category"),
//!     other => println!("{other:?}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the HTTP client and token cache are injected
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **No hidden retries**: every failure is returned to the caller

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;

// Re-export public types at crate root for convenience
pub use auth::oauth::{AuthError, TokenProvider};
pub use auth::{CachedToken, MemoryTokenCache, TokenCache};
pub use clients::{HttpMethod, StormClient, StormError};
pub use config::{
    ApiUrl, ApplicationId, ClientId, ClientSecret, IdentityUrl, StormConfig, StormConfigBuilder,
};
pub use error::ConfigError;
pub use models::{Product, ProductList};
