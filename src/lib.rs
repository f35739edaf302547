//! Versioned Config Objects
//!
//! Nestable configuration objects that convert to and from JSON, with
//! schema evolution through explicit, chained migrations.
//!
//! ## Features
//!
//! - **Declared Fields**: Each object lists the fields it serializes; loading
//!   rejects keys that name no field
//! - **Nesting**: Objects nest to any depth, each with its own version
//! - **Migrations**: Old trees are walked through `from -> to` steps before any
//!   field is populated
//! - **Binary Data**: [`BinaryBlob`] fields travel as base64 strings
//!
//! ## Wire format
//!
//! ```text
//! {
//!   "a": 66,
//!   "server": {
//!     "host": "localhost",
//!     "config_version": "2.1.0"
//!   },
//!   "config_version": "1.0.3"
//! }
//! ```
//!
//! The version key (`config_version` unless overridden) is reserved on
//! versioned objects and an ordinary field name on unversioned ones.

pub mod blob;
pub mod codec;
pub mod dynamic;
pub mod error;
pub mod field;
pub mod migration;
pub mod object;
pub mod schema;
pub mod settings;
pub mod traversal;
pub mod value;
pub mod version;

pub use blob::BinaryBlob;
pub use dynamic::{ConfigMap, Slot};
pub use error::{ConfigError, Result};
pub use field::{Field, FieldAccess, FieldMut, FieldRef};
pub use migration::{MigrationChain, MigrationStep};
pub use object::{ConfigObject, Serializable};
pub use schema::ConfigSchema;
pub use serde_json::Value;
pub use value::{Primitive, PrimitiveValue, Tree};
pub use version::{ConfigVersion, DEFAULT_VERSION_KEY};
