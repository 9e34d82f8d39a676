//! Request shaping for the Storm API: URL normalization and JSON bodies.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::clients::errors::StormError;

/// Query parameter the API needs to answer in JSON.
pub const FORMAT_JSON_PARAM: &str = "format=json";

/// HTTP methods used against the Storm API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for reading resources.
    Get,
    /// HTTP POST method for commands and searches.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Resolves `path` against `base_url` and makes sure the API answers in JSON.
///
/// Paths starting with `http://` or `https://` are used unchanged. Any other
/// path is appended to `base_url` verbatim and gets `format=json` added, with
/// `?` or `&` depending on whether it already has a query string. A path that
/// already contains `format=json` is not modified further.
///
/// # Example
///
/// ```rust
/// use storm_api::clients::prepare_url;
///
/// let base = "https://api.example.com/api/1.1/";
/// assert_eq!(
///     prepare_url(base, "Products/ListProducts2"),
///     "https://api.example.com/api/1.1/Products/ListProducts2?format=json"
/// );
/// assert_eq!(
///     prepare_url(base, "Products/GetProduct?id=12"),
///     "https://api.example.com/api/1.1/Products/GetProduct?id=12&format=json"
/// );
/// ```
#[must_use]
pub fn prepare_url(base_url: &str, path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }

    let mut url = format!("{base_url}{path}");
    if !url.contains(FORMAT_JSON_PARAM) {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(FORMAT_JSON_PARAM);
    }
    url
}

fn is_absolute(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Serializes `body` to JSON, leaving out object fields whose value is `null`.
///
/// Nested objects, including objects inside arrays, are cleaned as well;
/// `null` array elements are kept since dropping them would shift positions.
///
/// # Errors
///
/// Returns [`StormError::Serialize`] if `body` cannot be represented as JSON.
pub fn to_json_body<B>(body: &B) -> Result<String, StormError>
where
    B: Serialize + ?Sized,
{
    let mut value = serde_json::to_value(body).map_err(StormError::Serialize)?;
    strip_nulls(&mut value);
    serde_json::to_string(&value).map_err(StormError::Serialize)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
