//! Error types for the Storm API client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use storm_api::{ApplicationId, ConfigError};
//!
//! let result = ApplicationId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApplicationId)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Application id cannot be empty.
    #[error("Application id cannot be empty. Please provide the Storm application id.")]
    EmptyApplicationId,

    /// OAuth client id cannot be empty.
    #[error("OAuth client id cannot be empty. Please provide a valid client id.")]
    EmptyClientId,

    /// OAuth client secret cannot be empty.
    #[error("OAuth client secret cannot be empty. Please provide a valid client secret.")]
    EmptyClientSecret,

    /// A URL is invalid.
    #[error("Invalid {kind} '{url}'. Please provide a URL with scheme (e.g., 'https://api.example.com/').")]
    InvalidUrl {
        /// Which URL setting was rejected.
        kind: &'static str,
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable '{name}'.")]
    MissingEnvVar {
        /// The name of the variable.
        name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_application_id_error_message() {
        let message = ConfigError::EmptyApplicationId.to_string();
        assert!(message.contains("Application id cannot be empty"));
    }

    #[test]
    fn test_invalid_url_error_message() {
        let error = ConfigError::InvalidUrl {
            kind: "identity URL",
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("identity URL"));
        assert!(message.contains("not a url"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "api_url" };
        let message = error.to_string();
        assert!(message.contains("api_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_missing_env_var_error_message() {
        let error = ConfigError::MissingEnvVar {
            name: "STORM_API_URL",
        };
        assert_eq!(error.to_string(), "Missing environment variable 'STORM_API_URL'.");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyClientSecret;
        let _: &dyn std::error::Error = &error;
    }
}
