//! Config objects whose fields are declared at runtime

use std::any::Any;

use serde_json::Value;

use crate::error::Result;
use crate::field::{Field, FieldAccess, FieldMut, FieldRef};
use crate::object::{short_type_name, ConfigObject, Serializable};
use crate::schema::ConfigSchema;
use crate::traversal;

/// Storage for one [`ConfigMap`] field
pub enum Slot {
    /// Any JSON value, loaded without type checks
    Value(Value),
    Nested(Box<dyn Serializable>),
    /// A value with no tree representation
    Opaque {
        type_name: &'static str,
        value: Box<dyn Any>,
    },
}

/// A config object with an insertion-ordered, runtime-populated field set.
///
/// Useful when the field set is only known at runtime, or for building
/// trees to load into typed objects in tests.
#[derive(Default)]
pub struct ConfigMap {
    schema: ConfigSchema,
    slots: Vec<(String, Slot)>,
}

impl ConfigMap {
    /// Create an empty, unversioned map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with the given schema
    pub fn with_schema(schema: ConfigSchema) -> Self {
        Self {
            schema,
            slots: Vec::new(),
        }
    }

    pub fn schema_mut(&mut self) -> &mut ConfigSchema {
        &mut self.schema
    }

    /// Set a field to a JSON value, keeping its position if it exists
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.insert(name.into(), Slot::Value(value.into()))
    }

    /// Set a field to a nested serializable object
    pub fn set_nested(
        &mut self,
        name: impl Into<String>,
        nested: impl Serializable + 'static,
    ) -> &mut Self {
        self.insert(name.into(), Slot::Nested(Box::new(nested)))
    }

    /// Set a field to a value that cannot be serialized
    pub fn set_opaque<T: Any>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        let slot = Slot::Opaque {
            type_name: short_type_name(std::any::type_name::<T>()),
            value: Box::new(value),
        };
        self.insert(name.into(), slot)
    }

    fn insert(&mut self, name: String, slot: Slot) -> &mut Self {
        match self.slots.iter().position(|(n, _)| *n == name) {
            Some(index) => self.slots[index].1 = slot,
            None => self.slots.push((name, slot)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.slot(name)? {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn nested(&self, name: &str) -> Option<&dyn Serializable> {
        match self.slot(name)? {
            Slot::Nested(nested) => Some(&**nested),
            _ => None,
        }
    }

    pub fn opaque<T: Any>(&self, name: &str) -> Option<&T> {
        match self.slot(name)? {
            Slot::Opaque { value, .. } => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|(n, _)| n == name).map(|(_, slot)| slot)
    }

    pub fn remove(&mut self, name: &str) -> Option<Slot> {
        let index = self.slots.iter().position(|(n, _)| n == name)?;
        Some(self.slots.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ConfigObject for ConfigMap {
    fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    fn fields(&self) -> Vec<Field<'_>> {
        self.slots
            .iter()
            .map(|(name, slot)| {
                let value = match slot {
                    Slot::Value(value) => FieldRef::Primitive(value),
                    Slot::Nested(nested) => FieldRef::Nested(&**nested),
                    Slot::Opaque { type_name, .. } => FieldRef::Unsupported(*type_name),
                };
                Field::new(name.as_str(), value)
            })
            .collect()
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let (_, slot) = self.slots.iter_mut().find(|(n, _)| n == name)?;
        Some(match slot {
            Slot::Value(value) => FieldMut::Primitive(value),
            Slot::Nested(nested) => FieldMut::Nested(&mut **nested),
            Slot::Opaque { type_name, .. } => FieldMut::Unsupported(*type_name),
        })
    }
}

impl Serializable for ConfigMap {
    fn to_value(&self) -> Result<Value> {
        traversal::object_to_value(self)
    }

    fn load_value(&mut self, value: Value) -> Result<()> {
        traversal::object_load_value(self, value)
    }
}

impl FieldAccess for ConfigMap {
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
    fn test_set_keeps_position() {
        let mut map = ConfigMap::new();
        map.set("a", 1).set("b", 2).set("a", 3);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&json!(3)));
    }

    #[test]
    fn test_opaque_slot() {
        struct Handle(u8);

        let mut map = ConfigMap::new();
        map.set_opaque("handle", Handle(9));
        assert_eq!(map.opaque::<Handle>("handle").map(|h| h.0), Some(9));
        assert!(map.get("handle").is_none());
    }

    #[test]
    fn test_remove() {
        let mut map = ConfigMap::new();
        map.set("a", 1);
        assert!(map.remove("a").is_some());
        assert!(map.is_empty());
        assert!(map.remove("a").is_none());
    }
}
