//! Config object traits
//!
//! [`Serializable`] is the two-method contract every nestable value meets:
//! produce a tree value, and load one back in place. [`ConfigObject`] is a
//! composite with a declared field registry and a [`ConfigSchema`]; the
//! [`config_object!`](crate::config_object) macro wires a plain struct up
//! as both.

use std::io::{Read, Write};

use serde_json::Value;

use crate::codec;
use crate::error::Result;
use crate::field::{Field, FieldMut};
use crate::schema::ConfigSchema;
use crate::traversal;
use crate::value::Tree;

/// A value that can be converted to and loaded from a tree value.
///
/// Composite objects produce a mapping; leaf types such as
/// [`BinaryBlob`](crate::BinaryBlob) may produce any JSON scalar.
pub trait Serializable {
    fn to_value(&self) -> Result<Value>;

    /// Load `value` into `self`, overwriting its current contents
    fn load_value(&mut self, value: Value) -> Result<()>;

    /// Name used in error messages
    fn type_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// A nestable, versionable configuration object.
///
/// The object's current shape is the source of truth: only fields listed by
/// [`fields`](ConfigObject::fields) are written, and loading rejects any key
/// that does not name one of them. The object graph must be acyclic.
///
/// Deserialization mutates in place through `&mut self`; fields missing
/// from the loaded tree keep their current values.
pub trait ConfigObject {
    /// Version, version key and migrations of this object
    fn schema(&self) -> &ConfigSchema;

    /// The field registry, in declaration order
    fn fields(&self) -> Vec<Field<'_>>;

    /// Mutable access to the field named `name`
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;

    /// Name used in error messages
    fn object_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Convert this object to a tree
    fn to_tree(&self) -> Result<Tree> {
        traversal::serialize(self)
    }

    /// Load a tree into this object, migrating it first if needed
    fn load_tree(&mut self, tree: Tree) -> Result<()> {
        traversal::deserialize(self, tree)
    }

    /// Dump this object to a compact JSON string
    fn dumps(&self) -> Result<String> {
        codec::dumps(self)
    }

    /// Dump this object to an indented JSON string
    fn dumps_pretty(&self) -> Result<String> {
        codec::dumps_pretty(self)
    }

    /// Populate this object from a JSON string
    fn loads(&mut self, s: &str) -> Result<()> {
        codec::loads(self, s)
    }

    /// Write this object as JSON to `writer`
    fn dump<W: Write>(&self, writer: W) -> Result<()>
    where
        Self: Sized,
    {
        codec::dump(self, writer)
    }

    /// Populate this object from JSON read from `reader`
    fn load<R: Read>(&mut self, reader: R) -> Result<()>
    where
        Self: Sized,
    {
        codec::load(self, reader)
    }
}

/// Strip the module path from a type name, keeping generic arguments off
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Implement [`ConfigObject`], [`Serializable`] and
/// [`FieldAccess`](crate::FieldAccess) for a struct.
///
/// `schema` names the struct's [`ConfigSchema`] field; `fields` lists the
/// fields to serialize, in wire order. Every listed field must implement
/// [`FieldAccess`](crate::FieldAccess), which covers primitives, blobs and
/// other structs declared with this macro.
///
/// ```
/// use versioned_config::{config_object, ConfigObject, ConfigSchema};
///
/// struct Server {
///     schema: ConfigSchema,
///     host: String,
///     port: u16,
/// }
///
/// config_object!(Server, schema = schema, fields = [host, port]);
///
/// let server = Server {
///     schema: ConfigSchema::versioned("1.0.0"),
///     host: "localhost".to_string(),
///     port: 8080,
/// };
/// assert_eq!(
///     server.dumps().unwrap(),
///     r#"{"host":"localhost","port":8080,"config_version":"1.0.0"}"#
/// );
/// ```
#[macro_export]
macro_rules! config_object {
    ($ty:ty, schema = $schema:ident, fields = [$($field:ident),* $(,)?] $(,)?) => {
        impl $crate::ConfigObject for $ty {
            fn schema(&self) -> &$crate::ConfigSchema {
                &self.$schema
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $($crate::Field::new(
                        ::core::stringify!($field),
                        $crate::FieldAccess::as_field(&self.$field),
                    )),*
                ]
            }

            #[allow(unused_variables)]
            fn field_mut(&mut self, name: &str) -> ::core::option::Option<$crate::FieldMut<'_>> {
                match name {
                    $(::core::stringify!($field) => ::core::option::Option::Some(
                        $crate::FieldAccess::as_field_mut(&mut self.$field),
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::Serializable for $ty {
            fn to_value(&self) -> $crate::Result<$crate::Value> {
                $crate::traversal::object_to_value(self)
            }

            fn load_value(&mut self, value: $crate::Value) -> $crate::Result<()> {
                $crate::traversal::object_load_value(self, value)
            }
        }

        impl $crate::FieldAccess for $ty {
            fn as_field(&self) -> $crate::FieldRef<'_> {
                $crate::FieldRef::Nested(self)
            }

            fn as_field_mut(&mut self) -> $crate::FieldMut<'_> {
                $crate::FieldMut::Nested(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("my_crate::config::Server"), "Server");
        assert_eq!(short_type_name("alloc::vec::Vec<u8>"), "Vec");
        assert_eq!(short_type_name("u8"), "u8");
    }
}
