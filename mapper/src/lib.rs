//! Store per-document `key -> value` maps as table blobs and score documents by key.
//!
//! # Overview
//!
//! A field is configured with the type of its values and the encoding of its blobs:
//!
//! ```text
//! {"type": "htable", "value_type": "byte", "format_params": {"format": "chain", "filling_ratio": 50}}
//! ```
//!
//! Each document supplies the field as parallel arrays of keys and values
//! (`{"keys": [1, 2, 3], "values": [101, 102, 103]}`), which [Field::index] turns into one
//! immutable blob. Lookups ([script::Get], [script::GetScale]) then read a single key from that
//! blob and return it as an `f32` score.
//!
//! # Example
//!
//! ```rust
//! use htable_mapper::{script::Script, Mapping};
//! use serde_json::json;
//!
//! let mapping = Mapping::parse(&json!({
//!     "category_ranks": {"type": "htable", "value_type": "byte"}
//! })).unwrap();
//! let document = mapping.index(&json!({
//!     "category_ranks": {"keys": [1, 2], "values": [255, 0]}
//! })).unwrap();
//!
//! let script = Script::new("get_scale", &json!({
//!     "field": "category_ranks", "key": 1, "min_value": 1.0, "max_value": 10.0
//! })).unwrap();
//! assert_eq!(script.run(&mapping, Some(&document)).unwrap(), 10.0);
//! ```

mod error;
mod field;
mod mapping;
pub mod script;
mod value;

pub use error::Error;
pub use field::{Field, FieldConfig, LEGACY_TYPE, TYPE};
pub use mapping::{Document, Mapping};
pub use value::ValueType;
