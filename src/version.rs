//! Config version tokens

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Key under which the version token is embedded in a serialized tree,
/// unless an object overrides it
pub const DEFAULT_VERSION_KEY: &str = "config_version";

/// An opaque version token identifying the shape of a config object.
///
/// Tokens are compared for equality only; any string is accepted. When a
/// token happens to be a semantic version (with or without a leading `v`)
/// it can also be ordered against another one with [`ConfigVersion::compare`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigVersion(String);

impl ConfigVersion {
    /// Create a new version token
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Read a version token embedded in a tree.
    ///
    /// Strings are taken as-is; any other JSON value uses its compact JSON
    /// text, so an embedded `2` reads as the token `"2"`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.clone()),
            other => Self(other.to_string()),
        }
    }

    /// The token as it is written into a tree
    pub fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }

    /// Get the token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the token as a semantic version, if it is one
    pub fn semver(&self) -> Option<Version> {
        let version_str = self.0.strip_prefix('v').unwrap_or(&self.0);
        Version::parse(version_str).ok()
    }

    /// Order two tokens when both are semantic versions
    pub fn compare(&self, other: &ConfigVersion) -> Option<Ordering> {
        Some(self.semver()?.cmp(&other.semver()?))
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConfigVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConfigVersion {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
