//! Error types for config serialization and migration

use thiserror::Error;

use crate::version::ConfigVersion;

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Config serialization errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Field '{field}' of {type_name} holds a value of type '{value_type}' which is not serializable")]
    NotSerializable {
        type_name: String,
        field: String,
        value_type: String,
    },

    #[error("{type_name} cannot have a field named '{key}', name is reserved for the config version")]
    ReservedNameConflict { type_name: String, key: String },

    #[error("Unrecognized field name '{field}' for {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("Failed to migrate {type_name} from version {from} to version {to}")]
    MigrationFailed {
        type_name: String,
        from: ConfigVersion,
        to: ConfigVersion,
    },

    #[error("Field '{field}' of {type_name} expects {expected}, got {found}")]
    TypeMismatch {
        type_name: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{type_name} must be loaded from a mapping, got {found}")]
    ExpectedMapping {
        type_name: String,
        found: &'static str,
    },

    #[error("{type_name} must be loaded from a string, got {found}")]
    ExpectedString {
        type_name: String,
        found: &'static str,
    },

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
