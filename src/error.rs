//! Error types for tfschema.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while loading or rendering a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A type value does not match any recognized type encoding.
    #[error("Malformed type: {0}")]
    MalformedType(String),

    /// The requested output format is not `table` or `json`.
    #[error("Unknown output format: {0}")]
    UnrecognizedOutputFormat(String),

    /// No provider in the schema document matches the requested name.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The provider does not define the requested resource type.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// The provider does not define the requested data source.
    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),

    /// A provider name could not be derived from a resource name.
    #[error("Failed to detect a provider name: {0}")]
    InvalidName(String),

    /// The schema source failed to produce a schema document.
    #[error("Schema source error: {0}")]
    Source(String),

    /// The schema source did not answer in time.
    #[error("Schema source timed out after {0:?}")]
    Timeout(Duration),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Create a [`SchemaError::MalformedType`] describing the offending value.
    pub fn malformed_type(value: &serde_json::Value) -> Self {
        Self::MalformedType(value.to_string())
    }

    /// Whether the error was caused by user input rather than by the schema
    /// or its source.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedOutputFormat(_)
                | Self::UnknownProvider(_)
                | Self::UnknownResource(_)
                | Self::UnknownDataSource(_)
                | Self::InvalidName(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::MalformedType("\"strin\"".to_string());
        assert_eq!(format!("{}", err), "Malformed type: \"strin\"");

        let err = SchemaError::UnrecognizedOutputFormat("yaml".to_string());
        assert_eq!(format!("{}", err), "Unknown output format: yaml");

        let err = SchemaError::UnknownResource("aws_instanse".to_string());
        assert_eq!(format!("{}", err), "Unknown resource type: aws_instanse");

        let err = SchemaError::Timeout(Duration::from_secs(3));
        assert_eq!(format!("{}", err), "Schema source timed out after 3s");
    }

    #[test]
    fn test_malformed_type_from_value() {
        let err = SchemaError::malformed_type(&serde_json::json!(["list"]));
        assert!(matches!(err, SchemaError::MalformedType(ref msg) if msg == "[\"list\"]"));
    }

    #[test]
    fn test_user_errors() {
        assert!(SchemaError::UnrecognizedOutputFormat("yaml".into()).is_user_error());
        assert!(SchemaError::UnknownProvider("foo".into()).is_user_error());
        assert!(SchemaError::InvalidName("foo".into()).is_user_error());
        assert!(!SchemaError::MalformedType("1".into()).is_user_error());
        assert!(!SchemaError::Source("exit status 1".into()).is_user_error());
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SchemaError = serde_err.into();
        assert!(matches!(err, SchemaError::Serialization(_)));
    }
}
