//! Binary blob fields, carried as base64 strings

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::field::{FieldAccess, FieldMut, FieldRef};
use crate::object::Serializable;
use crate::value::kind_of;

/// Arbitrary binary data, serialized as a base64 string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryBlob {
    bytes: Vec<u8>,
}

impl BinaryBlob {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { bytes: data.into() }
    }

    /// The binary data
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Replace the binary data
    pub fn set_data(&mut self, data: impl Into<Vec<u8>>) {
        self.bytes = data.into();
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for BinaryBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for BinaryBlob {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl Serializable for BinaryBlob {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(STANDARD.encode(&self.bytes)))
    }

    fn load_value(&mut self, value: Value) -> Result<()> {
        match value {
            Value::String(encoded) => {
                self.bytes = STANDARD.decode(encoded)?;
                Ok(())
            }
            other => Err(ConfigError::ExpectedString {
                type_name: self.type_name().to_string(),
                found: kind_of(&other),
            }),
        }
    }
}

impl FieldAccess for BinaryBlob {
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Nested(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Nested(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode() {
        let blob = BinaryBlob::new(b"Hello, world!".to_vec());
        assert_eq!(blob.to_value().unwrap(), json!("SGVsbG8sIHdvcmxkIQ=="));
    }

    #[test]
    fn test_decode() {
        let mut blob = BinaryBlob::default();
        blob.load_value(json!("AAEC/w==")).unwrap();
        assert_eq!(blob.data(), &[0, 1, 2, 255]);
    }

    #[test]
    fn test_invalid_base64() {
        let mut blob = BinaryBlob::new(vec![1]);
        let err = blob.load_value(json!("not base64!")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBase64(_)));
        assert_eq!(blob.data(), &[1]);
    }

    #[test]
    fn test_non_string_rejected() {
        let mut blob = BinaryBlob::default();
        let err = blob.load_value(json!(12)).unwrap_err();
        assert_eq!(err.to_string(), "BinaryBlob must be loaded from a string, got integer");
    }
}
