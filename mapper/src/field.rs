//! Field configuration and document indexing.

use crate::{value::integer, Error, ValueType};
use bytes::Bytes;
use htable_table::{chain, trie, AnyReader, Entries, Format};
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::{debug, warn};

/// Field type whose configuration lives under `format_params`.
pub const TYPE: &str = "htable";

/// Trie-only field type configured with a top-level `bitmask_size`.
pub const LEGACY_TYPE: &str = "hamt";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    value_type: ValueType,
    format_params: Option<RawFormatParams>,
    bitmask_size: Option<String>,
    index: Option<Value>,
    doc_values: Option<Value>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFormatParams {
    format: Option<String>,
    filling_ratio: Option<u32>,
    min_hash_table_size: Option<u32>,
    bitmask_size: Option<String>,
}

fn bitmask(name: Option<&str>) -> Result<trie::BitmaskSize, Error> {
    let Some(name) = name else {
        return Ok(trie::BitmaskSize::default());
    };
    match name.to_ascii_lowercase().as_str() {
        "byte" => Ok(trie::BitmaskSize::Byte),
        "short" => Ok(trie::BitmaskSize::Short),
        "int" => Ok(trie::BitmaskSize::Int),
        "long" => Ok(trie::BitmaskSize::Long),
        _ => Err(Error::InvalidBitmaskSize(name.to_string())),
    }
}

/// How a field stores its values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    /// Type of every value.
    pub value_type: ValueType,

    /// Encoding of the per-document blob. Its value size must match `value_type`.
    pub format: Format,
}

impl FieldConfig {
    /// Default (chained hash table) configuration for values of `value_type`.
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            format: Format::Chain(chain::Config::new(value_type.value_size())),
        }
    }

    /// Parses the mapping of `field`.
    ///
    /// ```text
    /// {"type": "htable", "value_type": "byte", "format_params": {"format": "trie", "bitmask_size": "int"}}
    /// {"type": "htable", "format_params": {"format": "chain", "filling_ratio": 75, "min_hash_table_size": 64}}
    /// {"type": "hamt", "value_type": "short", "bitmask_size": "long"}
    /// ```
    pub fn parse(field: &str, node: &Value) -> Result<Self, Error> {
        let raw = RawField::deserialize(node).map_err(|source| Error::Mapping {
            field: field.to_string(),
            source,
        })?;
        if raw.index.is_some() {
            return Err(Error::Unmodifiable {
                setting: "index",
                field: field.to_string(),
            });
        }
        if raw.doc_values.is_some() {
            return Err(Error::Unmodifiable {
                setting: "doc_values",
                field: field.to_string(),
            });
        }

        let legacy = match raw.kind.as_deref() {
            None | Some(TYPE) => raw.bitmask_size.is_some(),
            Some(LEGACY_TYPE) => true,
            Some(other) => return Err(Error::UnsupportedType(other.to_string())),
        };
        let value_size = raw.value_type.value_size();
        let format = match (legacy, raw.format_params) {
            (true, Some(_)) => return Err(Error::ConflictingFormat(field.to_string())),
            (true, None) => Format::Trie(trie::Config {
                bitmask: bitmask(raw.bitmask_size.as_deref())?,
                value_size,
            }),
            (false, None) => Format::Chain(chain::Config::new(value_size)),
            (false, Some(params)) => match params.format.as_deref() {
                Some("chain") => Format::Chain(chain::Config {
                    value_size,
                    filling_ratio: params
                        .filling_ratio
                        .unwrap_or(chain::DEFAULT_FILLING_RATIO),
                    min_table_size: params
                        .min_hash_table_size
                        .unwrap_or(chain::DEFAULT_MIN_TABLE_SIZE),
                }),
                Some("trie") => Format::Trie(trie::Config {
                    bitmask: bitmask(params.bitmask_size.as_deref())?,
                    value_size,
                }),
                _ => return Err(Error::InvalidFormat),
            },
        };
        Ok(Self {
            value_type: raw.value_type,
            format,
        })
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new(ValueType::default())
    }
}

/// A named field that turns `{"keys": [..], "values": [..]}` objects into blobs.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    value_type: ValueType,
    format: Format,
}

impl Field {
    /// Creates a field, checking that its format can hold its values.
    pub fn new(name: impl Into<String>, cfg: FieldConfig) -> Result<Self, Error> {
        let name = name.into();
        cfg.format.validate()?;
        let expected = cfg.value_type.value_size();
        let found = cfg.format.value_size();
        if expected != found {
            return Err(Error::FormatMismatch {
                field: name,
                value_type: cfg.value_type,
                expected,
                found,
            });
        }
        Ok(Self {
            name,
            value_type: cfg.value_type,
            format: cfg.format,
        })
    }

    /// Parses the mapping of field `name`.
    pub fn parse(name: &str, node: &Value) -> Result<Self, Error> {
        Self::new(name, FieldConfig::parse(name, node)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Builds the blob for one document's value of this field.
    ///
    /// Only numeric array items are kept. Keys may appear in any order and a repeated key keeps
    /// its last value. A value that is not an object indexes as an empty map.
    pub fn index(&self, value: &Value) -> Result<Bytes, Error> {
        let (keys, values) = match value {
            Value::Object(object) => (
                self.numbers(object.get("keys"), "keys"),
                self.numbers(object.get("values"), "values"),
            ),
            _ => (Vec::new(), Vec::new()),
        };
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        let mut entries = Entries::new(self.value_type.value_size());
        for (key, value) in keys.iter().zip(values) {
            self.value_type
                .put(&mut entries, integer(key) as u64, value)?;
        }
        let blob = self.format.write(&entries)?;
        debug!(
            field = %self.name,
            entries = entries.len(),
            size = blob.len(),
            "indexed document"
        );
        Ok(blob)
    }

    /// Opens a blob produced by [Field::index].
    pub fn reader<'a>(&self, blob: &'a [u8]) -> Result<AnyReader<'a>, Error> {
        Ok(self.format.reader(blob)?)
    }

    /// Collects the numeric items of an array, skipping anything else.
    fn numbers<'a>(&self, array: Option<&'a Value>, name: &'static str) -> Vec<&'a Number> {
        let Some(Value::Array(items)) = array else {
            return Vec::new();
        };
        let numbers: Vec<&Number> = items
            .iter()
            .filter_map(|item| match item {
                Value::Number(number) => Some(number),
                _ => None,
            })
            .collect();
        let skipped = items.len() - numbers.len();
        if skipped > 0 {
            warn!(field = %self.name, array = name, skipped, "skipped non-numeric items");
        }
        numbers
    }
}
