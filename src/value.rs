//! Tree representation and primitive value categories
//!
//! A serialized config object is a [`Tree`]: an insertion-ordered mapping of
//! field names to JSON values. Leaf fields are *primitives* (integers,
//! floats, booleans, strings, lists and mappings of primitives); everything
//! else is either a nested [`Serializable`](crate::Serializable) or not
//! serializable at all.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Serialized form of a config object
pub type Tree = Map<String, Value>;

/// Name of the category a JSON value falls into, for error reporting
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(contains_null),
        Value::Object(map) => map.values().any(contains_null),
        _ => false,
    }
}

/// A Rust type that maps onto one of the primitive tree categories.
///
/// `decode` reports the category of the rejected value on failure.
pub trait PrimitiveValue: Sized {
    /// Category this type is written as
    const KIND: &'static str;

    /// Convert to a tree value, `None` if JSON cannot represent it
    fn encode(&self) -> Option<Value>;

    /// Convert from a tree value
    fn decode(value: Value) -> Result<Self, &'static str>;
}

/// Object-safe view of a primitive field slot, used by the traversal
pub trait Primitive {
    fn kind(&self) -> &'static str;

    fn to_value(&self) -> Option<Value>;

    /// Check that `assign` would take `value`, without touching the slot
    fn accepts(&self, value: &Value) -> Result<(), &'static str>;

    /// Overwrite the slot with an incoming value
    fn assign(&mut self, value: Value) -> Result<(), &'static str>;
}

impl<T: PrimitiveValue> Primitive for T {
    fn kind(&self) -> &'static str {
        T::KIND
    }

    fn to_value(&self) -> Option<Value> {
        self.encode()
    }

    fn accepts(&self, value: &Value) -> Result<(), &'static str> {
        T::decode(value.clone()).map(drop)
    }

    fn assign(&mut self, value: Value) -> Result<(), &'static str> {
        *self = T::decode(value)?;
        Ok(())
    }
}

macro_rules! signed_primitive {
    ($($ty:ty),*) => {
        $(
            impl PrimitiveValue for $ty {
                const KIND: &'static str = "integer";

                fn encode(&self) -> Option<Value> {
                    Some(Value::from(*self))
                }

                fn decode(value: Value) -> Result<Self, &'static str> {
                    value
                        .as_i64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| kind_of(&value))
                }
            }
        )*
    };
}

macro_rules! unsigned_primitive {
    ($($ty:ty),*) => {
        $(
            impl PrimitiveValue for $ty {
                const KIND: &'static str = "integer";

                fn encode(&self) -> Option<Value> {
                    Some(Value::from(*self))
                }

                fn decode(value: Value) -> Result<Self, &'static str> {
                    value
                        .as_u64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| kind_of(&value))
                }
            }
        )*
    };
}

signed_primitive!(i8, i16, i32, i64);
unsigned_primitive!(u8, u16, u32, u64, usize);

impl PrimitiveValue for f64 {
    const KIND: &'static str = "float";

    fn encode(&self) -> Option<Value> {
        Number::from_f64(*self).map(Value::Number)
    }

    // Integers are accepted where a float is expected
    fn decode(value: Value) -> Result<Self, &'static str> {
        value.as_f64().ok_or_else(|| kind_of(&value))
    }
}

impl PrimitiveValue for f32 {
    const KIND: &'static str = "float";

    fn encode(&self) -> Option<Value> {
        Number::from_f64(f64::from(*self)).map(Value::Number)
    }

    fn decode(value: Value) -> Result<Self, &'static str> {
        value
            .as_f64()
            .map(|f| f as f32)
            .filter(|f| f.is_finite())
            .ok_or_else(|| kind_of(&value))
    }
}

impl PrimitiveValue for bool {
    const KIND: &'static str = "boolean";

    fn encode(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }

    fn decode(value: Value) -> Result<Self, &'static str> {
        value.as_bool().ok_or_else(|| kind_of(&value))
    }
}

impl PrimitiveValue for String {
    const KIND: &'static str = "string";

    fn encode(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }

    fn decode(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(kind_of(&other)),
        }
    }
}

/// A dynamic slot: accepts any incoming value without checking its type.
/// Values holding `null` anywhere cannot be written.
impl PrimitiveValue for Value {
    const KIND: &'static str = "any";

    fn encode(&self) -> Option<Value> {
        if contains_null(self) {
            return None;
        }
        Some(self.clone())
    }

    fn decode(value: Value) -> Result<Self, &'static str> {
        Ok(value)
    }
}

impl<T: PrimitiveValue> PrimitiveValue for Vec<T> {
    const KIND: &'static str = "list";

    fn encode(&self) -> Option<Value> {
        self.iter()
            .map(PrimitiveValue::encode)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
    }

    fn decode(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Array(items) => items.into_iter().map(T::decode).collect(),
            other => Err(kind_of(&other)),
        }
    }
}

impl<T: PrimitiveValue> PrimitiveValue for BTreeMap<String, T> {
    const KIND: &'static str = "mapping";

    fn encode(&self) -> Option<Value> {
        let mut map = Map::new();
        for (key, value) in self {
            map.insert(key.clone(), value.encode()?);
        }
        Some(Value::Object(map))
    }

    fn decode(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, T::decode(value)?)))
                .collect(),
            other => Err(kind_of(&other)),
        }
    }
}
