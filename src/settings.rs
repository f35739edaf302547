//! Settings for the `versioned-config` command line tool
//!
//! Supports loading settings from:
//! - Default values
//! - Settings file (versioned-config.toml)
//! - Environment variables (VCONFIG__*)
//!
//! ## Example settings file (versioned-config.toml):
//! ```toml
//! [output]
//! format = "compact"
//!
//! [inspect]
//! version_key = "schema_version"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::version::DEFAULT_VERSION_KEY;

/// Main settings for the command line tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Inspection settings
    #[serde(default)]
    pub inspect: InspectSettings,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// End written files with a newline
    #[serde(default = "default_true")]
    pub trailing_newline: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// Encode a JSON value in this format
    pub fn encode(&self, value: &Value) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

/// Inspection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectSettings {
    /// Key the config version is embedded under
    #[serde(default = "default_version_key")]
    pub version_key: String,
}

fn default_true() -> bool {
    true
}

fn default_version_key() -> String {
    DEFAULT_VERSION_KEY.to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            trailing_newline: true,
        }
    }
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            version_key: default_version_key(),
        }
    }
}

impl Settings {
    /// Load settings from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load settings, adding a specific file on top of the default locations
    pub fn load_from(settings_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for location in ["versioned-config.toml", ".versioned-config.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("io", "versioned-config", "versioned-config") {
            let xdg_settings = dirs.config_dir().join("versioned-config.toml");
            if xdg_settings.exists() {
                builder = builder.add_source(File::from(xdg_settings).required(false));
            }
        }

        if let Some(path) = settings_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("VCONFIG")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.output.format, OutputFormat::Pretty);
        assert_eq!(settings.inspect.version_key, "config_version");
    }

    #[test]
    fn test_serialize_settings() {
        let toml_str = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[inspect]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[output]\nformat = \"compact\"\n").unwrap();

        let settings = Settings::load_from(path.to_str()).unwrap();
        assert_eq!(settings.output.format, OutputFormat::Compact);
        assert!(settings.output.trailing_newline);
    }

    #[test]
    fn test_encode_formats() {
        let value = json!({"a": 1});
        assert_eq!(OutputFormat::Compact.encode(&value).unwrap(), r#"{"a":1}"#);
        assert_eq!(OutputFormat::Pretty.encode(&value).unwrap(), "{\n  \"a\": 1\n}");
    }
}
