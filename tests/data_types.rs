//! Leaf data types used as config fields

use serde_json::json;
use versioned_config::{
    config_object, BinaryBlob, ConfigError, ConfigMap, ConfigObject, ConfigSchema, Serializable,
};

struct TestClass {
    schema: ConfigSchema,
    var1: f64,
    var2: BinaryBlob,
}

config_object!(TestClass, schema = schema, fields = [var1, var2]);

impl TestClass {
    fn new() -> Self {
        Self {
            schema: ConfigSchema::unversioned(),
            var1: 0.0,
            var2: BinaryBlob::new(b"Hello, world!".to_vec()),
        }
    }
}

#[test]
fn test_binary_blob_field() {
    let c1 = TestClass::new();
    let s = c1.dumps().unwrap();
    assert_eq!(s, r#"{"var1":0.0,"var2":"SGVsbG8sIHdvcmxkIQ=="}"#);

    let mut c2 = TestClass::new();
    c2.var2.set_data(Vec::new());
    c2.loads(&s).unwrap();
    assert_eq!(c2.var1, 0.0);
    assert_eq!(c2.var2.data(), b"Hello, world!");
}

#[test]
fn test_binary_blob_in_dynamic_object() {
    let mut c = ConfigMap::with_schema(ConfigSchema::versioned("1"));
    c.set_nested("payload", BinaryBlob::new(vec![0xde, 0xad, 0xbe, 0xef]));

    let d = c.to_tree().unwrap();
    assert_eq!(
        serde_json::Value::Object(d.clone()),
        json!({"payload": "3q2+7w==", "config_version": "1"})
    );

    let mut loaded = ConfigMap::with_schema(ConfigSchema::versioned("1"));
    loaded.set_nested("payload", BinaryBlob::default());
    loaded.load_tree(d.clone()).unwrap();
    // The blob is opaque behind the map; its serialized form is what matters
    assert_eq!(loaded.nested("payload").unwrap().to_value().unwrap(), json!("3q2+7w=="));
}

#[test]
fn test_binary_blob_invalid_data() {
    let mut c = TestClass::new();
    let err = c.loads(r#"{"var2": "%%%"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBase64(_)));
    assert_eq!(c.var2.data(), b"Hello, world!");
}
