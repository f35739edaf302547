//! JSON text and stream wrappers around the tree conversion

use std::io::{Read, Write};

use serde_json::Value;

use crate::error::Result;
use crate::object::ConfigObject;
use crate::traversal;
use crate::version::ConfigVersion;

/// Serialize `object` to a compact JSON string
pub fn dumps<O: ConfigObject + ?Sized>(object: &O) -> Result<String> {
    Ok(serde_json::to_string(&traversal::serialize(object)?)?)
}

/// Serialize `object` to an indented JSON string
pub fn dumps_pretty<O: ConfigObject + ?Sized>(object: &O) -> Result<String> {
    Ok(serde_json::to_string_pretty(&traversal::serialize(object)?)?)
}

/// Serialize `object` as compact JSON into `writer`
pub fn dump<O: ConfigObject + ?Sized, W: Write>(object: &O, writer: W) -> Result<()> {
    let tree = traversal::serialize(object)?;
    serde_json::to_writer(writer, &tree)?;
    Ok(())
}

/// Serialize `object` as indented JSON into `writer`
pub fn dump_pretty<O: ConfigObject + ?Sized, W: Write>(object: &O, writer: W) -> Result<()> {
    let tree = traversal::serialize(object)?;
    serde_json::to_writer_pretty(writer, &tree)?;
    Ok(())
}

/// Populate `object` from a JSON string
pub fn loads<O: ConfigObject + ?Sized>(object: &mut O, s: &str) -> Result<()> {
    let value: Value = serde_json::from_str(s)?;
    traversal::object_load_value(object, value)
}

/// Populate `object` from JSON read from `reader`
pub fn load<O: ConfigObject + ?Sized, R: Read>(object: &mut O, reader: R) -> Result<()> {
    let value: Value = serde_json::from_reader(reader)?;
    traversal::object_load_value(object, value)
}

/// Every version embedded under `key` in a decoded JSON document.
///
/// Paths use JSON pointer syntax; the root mapping is reported as `""`.
/// Mappings inside lists are visited too.
pub fn embedded_versions(value: &Value, key: &str) -> Vec<(String, ConfigVersion)> {
    let mut found = Vec::new();
    collect_versions(value, key, String::new(), &mut found);
    found
}

fn collect_versions(value: &Value, key: &str, path: String, found: &mut Vec<(String, ConfigVersion)>) {
    match value {
        Value::Object(map) => {
            if let Some(version) = map.get(key) {
                found.push((path.clone(), ConfigVersion::from_value(version)));
            }
            for (name, child) in map.iter().filter(|(name, _)| name.as_str() != key) {
                let escaped = name.replace('~', "~0").replace('/', "~1");
                collect_versions(child, key, format!("{path}/{escaped}"), found);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_versions(child, key, format!("{path}/{i}"), found);
            }
        }
        _ => {}
    }
}
