//! Serde helpers for Unix-epoch timestamps.
//!
//! The Storm API encodes dates as Unix-epoch seconds. Use these helpers with
//! `#[serde(with = "...")]` on `DateTime<Utc>` fields:
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Order {
//!     #[serde(with = "storm_api::models::epoch")]
//!     placed: DateTime<Utc>,
//!     #[serde(default, with = "storm_api::models::epoch::option")]
//!     shipped: Option<DateTime<Utc>>,
//! }
//!
//! let order: Order = serde_json::from_str(r#"{"placed":1700000000}"#).unwrap();
//! assert_eq!(order.placed.timestamp(), 1_700_000_000);
//! assert!(order.shipped.is_none());
//! ```
//!
//! Numeric strings (`"1700000000"`) are accepted as well. Values serialize
//! back to integer seconds.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

/// Serializes a timestamp as epoch seconds.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(value.timestamp())
}

/// Deserializes epoch seconds into a timestamp.
///
/// # Errors
///
/// Fails if the value is not an integer (or integer string) or is out of range.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(EpochVisitor)
}

struct EpochVisitor;

impl<'de> Visitor<'de> for EpochVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a Unix timestamp in seconds")
    }

    fn visit_i64<E: de::Error>(self, secs: i64) -> Result<Self::Value, E> {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| E::custom(format!("timestamp {secs} is out of range")))
    }

    fn visit_u64<E: de::Error>(self, secs: u64) -> Result<Self::Value, E> {
        let secs = i64::try_from(secs)
            .map_err(|_| E::custom(format!("timestamp {secs} is out of range")))?;
        self.visit_i64(secs)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let secs = value
            .trim()
            .parse::<i64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))?;
        self.visit_i64(secs)
    }
}

/// The same conversion for `Option<DateTime<Utc>>`; `null` maps to `None`.
///
/// Combine with `#[serde(default)]` so a missing field is also `None`.
pub mod option {
    use super::{fmt, DateTime, EpochVisitor, Utc};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    /// Serializes an optional timestamp as epoch seconds or `null`.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&value.timestamp()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes optional epoch seconds.
    ///
    /// # Errors
    ///
    /// Same as [`super::deserialize`] for non-null values.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionVisitor)
    }

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<DateTime<Utc>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a Unix timestamp in seconds or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(EpochVisitor).map(Some)
        }
    }
}
