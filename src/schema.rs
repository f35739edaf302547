//! Per-object schema metadata

use crate::migration::MigrationChain;
use crate::value::Tree;
use crate::version::{ConfigVersion, DEFAULT_VERSION_KEY};

/// Version, version key and migrations carried by a config object.
///
/// An object without a version is *unversioned*: nothing is embedded in its
/// serialized tree, and the version key is an ordinary field name for it.
#[derive(Debug)]
pub struct ConfigSchema {
    /// Current version of the object's shape
    version: Option<ConfigVersion>,
    /// Key the version is embedded under
    version_key: String,
    /// Steps that bring older trees up to `version`
    migrations: MigrationChain,
}

impl ConfigSchema {
    /// Create a schema for an unversioned object
    pub fn unversioned() -> Self {
        Self {
            version: None,
            version_key: DEFAULT_VERSION_KEY.to_string(),
            migrations: MigrationChain::new(),
        }
    }

    /// Create a schema for an object at `version`
    pub fn versioned(version: impl Into<ConfigVersion>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::unversioned()
        }
    }

    /// Embed the version under `key` instead of the default key
    pub fn with_version_key(mut self, key: impl Into<String>) -> Self {
        self.version_key = key.into();
        self
    }

    /// Register a migration step
    pub fn with_migration(
        mut self,
        from: impl Into<ConfigVersion>,
        to: impl Into<ConfigVersion>,
        transform: impl Fn(Tree) -> Tree + Send + Sync + 'static,
    ) -> Self {
        self.migrations.add(from, to, transform);
        self
    }

    pub fn version(&self) -> Option<&ConfigVersion> {
        self.version.as_ref()
    }

    pub fn is_versioned(&self) -> bool {
        self.version.is_some()
    }

    pub fn version_key(&self) -> &str {
        &self.version_key
    }

    pub fn set_version_key(&mut self, key: impl Into<String>) {
        self.version_key = key.into();
    }

    pub fn migrations(&self) -> &MigrationChain {
        &self.migrations
    }

    pub fn migrations_mut(&mut self) -> &mut MigrationChain {
        &mut self.migrations
    }
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::unversioned()
    }
}
