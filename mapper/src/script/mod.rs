//! Keyed lookups evaluated against indexed documents.
//!
//! A lookup names a field, a key and a default. It resolves the field in a [Mapping], opens the
//! document's blob for that field, and returns the decoded value of the key. A document without
//! a value for the field, an empty blob, or an absent key all yield the default.
//!
//! | Script | Aliases | Parameters |
//! |---|---|---|
//! | [Get] | `get`, `htable_get`, `hamt_get` | `field`, `key`, `default` |
//! | [GetScale] | `get_scale`, `htable_get_scale`, `hamt_get_scale` | `field`, `key`, `default`, `min_value`, `max_value` |

mod get;
mod params;
mod scale;

pub use get::Get;
pub use scale::{GetScale, ScaleTable, SCALE_TABLE_SIZE};

use crate::{Document, Error, Field, Mapping};
use htable_table::{AnyReader, Reader};

/// A lookup selected by name.
#[derive(Clone, Debug, PartialEq)]
pub enum Script {
    Get(Get),
    GetScale(GetScale),
}

impl Script {
    /// Builds the script registered under `name` from its parameters.
    pub fn new(name: &str, params: &serde_json::Value) -> Result<Self, Error> {
        match name {
            "get" | "htable_get" | "hamt_get" => Ok(Self::Get(Get::from_params(params)?)),
            "get_scale" | "htable_get_scale" | "hamt_get_scale" => {
                Ok(Self::GetScale(GetScale::from_params(params)?))
            }
            _ => Err(Error::UnknownScript(name.to_string())),
        }
    }

    pub fn run(&self, mapping: &Mapping, document: Option<&Document>) -> Result<f32, Error> {
        match self {
            Self::Get(script) => script.run(mapping, document),
            Self::GetScale(script) => script.run(mapping, document),
        }
    }
}

/// Opens `field`'s blob in `document` and finds `key`.
fn locate<'a>(
    field: &Field,
    document: Option<&'a Document>,
    key: u64,
) -> Result<Option<(AnyReader<'a>, usize)>, Error> {
    let Some(blob) = document.and_then(|document| document.get(field.name())) else {
        return Ok(None);
    };
    if blob.is_empty() {
        return Ok(None);
    }
    let reader = field.reader(blob)?;
    Ok(reader.find(key).map(|offset| (reader, offset)))
}
