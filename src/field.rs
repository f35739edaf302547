//! Declared field registry entries
//!
//! A config object lists its serializable fields explicitly. Each entry
//! exposes the field either as a primitive slot, a nested
//! [`Serializable`], or an unsupported value identified by type name.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::object::Serializable;
use crate::value::{Primitive, PrimitiveValue};

/// Read access to a field value
pub enum FieldRef<'a> {
    Primitive(&'a dyn Primitive),
    Nested(&'a dyn Serializable),
    /// A value with no tree representation, named by its runtime type
    Unsupported(&'static str),
}

/// Write access to a field value
pub enum FieldMut<'a> {
    Primitive(&'a mut dyn Primitive),
    Nested(&'a mut dyn Serializable),
    Unsupported(&'static str),
}

/// A named entry of an object's field registry
pub struct Field<'a> {
    pub name: &'a str,
    pub value: FieldRef<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: FieldRef<'a>) -> Self {
        Self { name, value }
    }

    pub fn is_private(&self) -> bool {
        is_private(self.name)
    }
}

/// Fields named with a leading underscore are never serialized or loaded
pub fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// Types that can sit in a declared field.
///
/// Implemented for every primitive type, for [`BinaryBlob`](crate::BinaryBlob),
/// and for each type declared with [`config_object!`](crate::config_object).
pub trait FieldAccess {
    fn as_field(&self) -> FieldRef<'_>;

    fn as_field_mut(&mut self) -> FieldMut<'_>;
}

macro_rules! primitive_field {
    ($($ty:ty),*) => {
        $(
            impl FieldAccess for $ty {
                fn as_field(&self) -> FieldRef<'_> {
                    FieldRef::Primitive(self)
                }

                fn as_field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Primitive(self)
                }
            }
        )*
    };
}

primitive_field!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool, String, Value);

impl<T: PrimitiveValue> FieldAccess for Vec<T> {
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Primitive(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Primitive(self)
    }
}

impl<T: PrimitiveValue> FieldAccess for BTreeMap<String, T> {
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Primitive(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Primitive(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_names() {
        assert!(is_private("_bytes"));
        assert!(!is_private("bytes"));
        assert!(!is_private("config_version"));
    }

    #[test]
    fn test_primitive_fields() {
        let mut n = 3i64;
        match n.as_field() {
            FieldRef::Primitive(p) => assert_eq!(p.kind(), "integer"),
            _ => panic!("expected primitive"),
        }
        match n.as_field_mut() {
            FieldMut::Primitive(p) => p.assign(Value::from(4)).unwrap(),
            _ => panic!("expected primitive"),
        }
        assert_eq!(n, 4);
    }
}
