//! Recursive serialize/deserialize dispatch shared by all config objects

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ConfigError, Result};
use crate::field::{is_private, FieldMut, FieldRef};
use crate::object::ConfigObject;
use crate::schema::ConfigSchema;
use crate::value::{kind_of, Tree};
use crate::version::ConfigVersion;

/// Convert `object` to a tree.
///
/// Private fields are skipped. Nested objects are converted recursively. A
/// versioned object gets its version embedded under its version key, which
/// no field may occupy.
pub fn serialize<O: ConfigObject + ?Sized>(object: &O) -> Result<Tree> {
    let mut tree = Tree::new();

    for field in object.fields() {
        if field.is_private() {
            continue;
        }

        let value = match field.value {
            FieldRef::Primitive(slot) => slot
                .to_value()
                .ok_or_else(|| not_serializable(object, field.name, slot.kind()))?,
            FieldRef::Nested(nested) => nested.to_value()?,
            FieldRef::Unsupported(value_type) => {
                return Err(not_serializable(object, field.name, value_type));
            }
        };
        tree.insert(field.name.to_string(), value);
    }

    let schema = object.schema();
    if let Some(version) = schema.version() {
        let key = schema.version_key();
        if tree.contains_key(key) {
            return Err(ConfigError::ReservedNameConflict {
                type_name: object.object_name().to_string(),
                key: key.to_string(),
            });
        }
        tree.insert(key.to_string(), version.to_value());
    }

    Ok(tree)
}

/// Load `tree` into `object`.
///
/// Migration runs to completion before any field is touched. Every key at
/// this level is checked, and every primitive value decoded against its
/// slot, before the first assignment. An error inside a nested object may
/// still leave earlier siblings assigned.
pub fn deserialize<O: ConfigObject + ?Sized>(object: &mut O, tree: Tree) -> Result<()> {
    let type_name = object.object_name().to_string();
    let tree = migrate(object.schema(), &type_name, tree)?;

    let fields = object.fields();
    let unknown = tree
        .keys()
        .find(|key| is_private(key) || !fields.iter().any(|f| f.name == key.as_str()))
        .cloned();
    drop(fields);
    if let Some(field) = unknown {
        return Err(ConfigError::UnknownField { type_name, field });
    }

    for (name, value) in &tree {
        match object.field_mut(name) {
            Some(FieldMut::Primitive(slot)) => {
                let expected = slot.kind();
                slot.accepts(value)
                    .map_err(|found| type_mismatch(&type_name, name, expected, found))?;
            }
            Some(FieldMut::Nested(_)) => {}
            Some(FieldMut::Unsupported(value_type)) => {
                return Err(ConfigError::NotSerializable {
                    type_name,
                    field: name.clone(),
                    value_type: value_type.to_string(),
                });
            }
            None => return Err(ConfigError::UnknownField { type_name, field: name.clone() }),
        }
    }

    for (name, value) in tree {
        trace!(type_name = %type_name, field = %name, "loading field");
        match object.field_mut(&name) {
            Some(FieldMut::Primitive(slot)) => {
                let expected = slot.kind();
                slot.assign(value)
                    .map_err(|found| type_mismatch(&type_name, &name, expected, found))?;
            }
            Some(FieldMut::Nested(nested)) => nested.load_value(value)?,
            Some(FieldMut::Unsupported(value_type)) => {
                return Err(ConfigError::NotSerializable {
                    type_name,
                    field: name,
                    value_type: value_type.to_string(),
                });
            }
            None => return Err(ConfigError::UnknownField { type_name, field: name }),
        }
    }

    Ok(())
}

/// [`serialize`] wrapped as a tree value, for nesting
pub fn object_to_value<O: ConfigObject + ?Sized>(object: &O) -> Result<Value> {
    serialize(object).map(Value::Object)
}

/// [`deserialize`] from a tree value, which must be a mapping
pub fn object_load_value<O: ConfigObject + ?Sized>(object: &mut O, value: Value) -> Result<()> {
    match value {
        Value::Object(tree) => deserialize(object, tree),
        other => Err(ConfigError::ExpectedMapping {
            type_name: object.object_name().to_string(),
            found: kind_of(&other),
        }),
    }
}

/// Bring `tree` up to the schema's current version and strip the version key.
///
/// Trees without the key, and all trees loaded into unversioned objects, are
/// taken as current.
fn migrate(schema: &ConfigSchema, type_name: &str, mut tree: Tree) -> Result<Tree> {
    let Some(current) = schema.version() else {
        return Ok(tree);
    };
    let key = schema.version_key();
    let Some(embedded) = tree.get(key).map(ConfigVersion::from_value) else {
        return Ok(tree);
    };

    if &embedded != current {
        debug!(type_name, from = %embedded, to = %current, "migrating config");
        tree = schema.migrations().resolve(type_name, tree, &embedded, current)?;
    }
    tree.remove(key);

    Ok(tree)
}

fn type_mismatch(type_name: &str, field: &str, expected: &'static str, found: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        type_name: type_name.to_string(),
        field: field.to_string(),
        expected,
        found,
    }
}

fn not_serializable<O: ConfigObject + ?Sized>(object: &O, field: &str, value_type: &str) -> ConfigError {
    ConfigError::NotSerializable {
        type_name: object.object_name().to_string(),
        field: field.to_string(),
        value_type: value_type.to_string(),
    }
}
