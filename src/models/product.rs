//! Product list response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of products as returned by the product listing endpoints.
///
/// # Example
///
/// ```rust
/// use storm_api::ProductList;
///
/// let json = r#"{
///     "productCount": 2,
///     "pageNumber": 1,
///     "pageSize": 10,
///     "products": [{"id": 1, "name": "Kettle"}, {"id": 2, "name": "Toaster"}]
/// }"#;
///
/// let list: ProductList = serde_json::from_str(json).unwrap();
/// assert_eq!(list.product_count, 2);
/// assert_eq!(list.products[1].name.as_deref(), Some("Toaster"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductList {
    /// Total number of products matching the query, across all pages.
    pub product_count: u32,

    /// The 1-based page this response holds.
    pub page_number: u32,

    /// The requested page size.
    pub page_size: u32,

    /// The products on this page, in API order.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product record.
///
/// Every field is optional since listing endpoints return partial records.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The product id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The part number (SKU) of the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_no: Option<String>,

    /// The display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_header: Option<String>,

    /// Long description, may contain HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,

    /// Key of the primary product image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,

    /// Unit price excluding VAT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Unit price including VAT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_inc_vat: Option<f64>,

    /// Quantity on hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_buyable: Option<bool>,

    /// When the product was created, as epoch seconds on the wire.
    #[serde(
        default,
        with = "crate::models::epoch::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,

    /// When the product was last changed, as epoch seconds on the wire.
    #[serde(
        default,
        with = "crate::models::epoch::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}
