//! Response data types for the Storm commerce API.
//!
//! These are plain data containers decoded by [`StormClient`](crate::StormClient);
//! any `serde::de::DeserializeOwned` type can be requested instead.
//!
//! - [`ProductList`]: a page of products
//! - [`Product`]: a single product record
//! - [`epoch`]: serde helpers for Unix-epoch timestamp fields

pub mod epoch;
mod product;

pub use product::{Product, ProductList};
