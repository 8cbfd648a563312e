use crate::ValueType;
use thiserror::Error;

/// Errors that can occur when parsing a mapping, indexing a document, or running a lookup.
#[derive(Debug, Error)]
pub enum Error {
    // Mapping
    #[error("invalid mapping for field [{field}]: {source}")]
    Mapping {
        field: String,
        source: serde_json::Error,
    },
    #[error("[format] can be [chain] or [trie]")]
    InvalidFormat,
    #[error("[bitmask_size] can be [byte], [short], [int] or [long]: {0}")]
    InvalidBitmaskSize(String),
    #[error("Setting [{setting}] cannot be modified for field [{field}]")]
    Unmodifiable { setting: &'static str, field: String },
    #[error("field [{0}] sets both [bitmask_size] and [format_params]")]
    ConflictingFormat(String),
    #[error("unsupported field type [{0}]")]
    UnsupportedType(String),
    #[error("format of field [{field}] stores {found:?} values, [{value_type}] needs {expected:?}")]
    FormatMismatch {
        field: String,
        value_type: ValueType,
        expected: htable_table::ValueSize,
        found: htable_table::ValueSize,
    },
    #[error("mapping must be an object of fields")]
    InvalidMapping,

    // Documents
    #[error("source document must be an object")]
    InvalidSource,
    #[error("'keys' and 'values' have different size: {keys} != {values}")]
    LengthMismatch { keys: usize, values: usize },

    // Lookups
    #[error("Missing the [{0}] parameter")]
    MissingParameter(&'static str),
    #[error("invalid [{name}] parameter: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error("No field found for [{0}]; expected [htable] field type")]
    UnknownField(String),
    #[error("Only [byte] value type is supported; [{0}] found")]
    UnsupportedValueType(ValueType),
    #[error("unknown script: {0}")]
    UnknownScript(String),

    #[error("table error: {0}")]
    Table(#[from] htable_table::Error),
}
