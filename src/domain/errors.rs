// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for option state resolution.
//!
//! This module defines the errors that can occur while constructing option states,
//! reading their values, or coercing textual bypass and override payloads into
//! the declared value type. All errors use `thiserror` for proper error handling
//! and conversion.

use thiserror::Error;

/// The main error type for option operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use hexopt::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::ConfigKeyNotFound {
///         key: "database.host".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required input was missing, or a non-string coercion received no payload.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was missing or wrong
        message: String,
    },

    /// A textual value did not name any member of the declared enum.
    #[error("No member '{value}' in enum {enum_name}")]
    UnknownEnumMember {
        /// The enum being resolved against
        enum_name: String,
        /// The text that failed to match
        value: String,
    },

    /// A numeric payload could not be parsed into the declared type.
    #[error("Malformed value '{value}' for key '{key}', expected {target_type}: {source}")]
    MalformedValue {
        /// The key being coerced
        key: String,
        /// The declared type name
        target_type: String,
        /// The offending text
        value: String,
        /// The underlying parse error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The declared type has no textual coercion.
    #[error("Don't know how to convert a value for key '{key}' to type {type_name}")]
    UnsupportedType {
        /// The key being coerced
        key: String,
        /// The unsupported type name
        type_name: String,
    },

    /// The requested option is not registered.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// An option with the same key is already registered.
    #[error("Configuration key already registered: {key}")]
    DuplicateKey {
        /// The conflicting key
        key: String,
    },

    /// An error occurred reading a directive source.
    #[error("Directive source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a directive document.
    #[error("Failed to parse directives: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading a directive document.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates an `InvalidArgument` error with the given message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ConfigError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a `MalformedValue` error from any parse failure.
    pub fn malformed<E>(key: &str, target_type: &str, value: &str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::MalformedValue {
            key: key.to_string(),
            target_type: target_type.to_string(),
            value: value.to_string(),
            source: Box::new(err),
        }
    }
}

/// A specialized Result type for option operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
