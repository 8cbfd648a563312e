//! A set of fields and the blobs indexed from one source document.

use crate::{Error, Field};
use bytes::Bytes;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Fields by name.
#[derive(Clone, Debug, Default)]
pub struct Mapping {
    fields: BTreeMap<String, Field>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an object mapping field names to field configurations.
    ///
    /// ```text
    /// {"category_ranks": {"type": "htable", "value_type": "byte"}}
    /// ```
    pub fn parse(node: &Value) -> Result<Self, Error> {
        let Value::Object(properties) = node else {
            return Err(Error::InvalidMapping);
        };
        let mut mapping = Self::new();
        for (name, field) in properties {
            mapping.insert(Field::parse(name, field)?);
        }
        Ok(mapping)
    }

    /// Adds `field`, replacing any field with the same name.
    pub fn insert(&mut self, field: Field) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Indexes every mapped field of `source`. Unmapped fields and `null` values are ignored.
    pub fn index(&self, source: &Value) -> Result<Document, Error> {
        let Value::Object(object) = source else {
            return Err(Error::InvalidSource);
        };
        let mut document = Document::default();
        for (name, value) in object {
            let Some(field) = self.fields.get(name) else {
                debug!(field = %name, "ignored unmapped field");
                continue;
            };
            if value.is_null() {
                continue;
            }
            document.insert(name.clone(), field.index(value)?);
        }
        Ok(document)
    }
}

/// The blobs stored for one document, by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    blobs: BTreeMap<String, Bytes>,
}

impl Document {
    pub fn insert(&mut self, field: String, blob: Bytes) {
        self.blobs.insert(field, blob);
    }

    /// The blob of `field`, if the document has a value for it.
    pub fn get(&self, field: &str) -> Option<&[u8]> {
        self.blobs.get(field).map(|blob| &blob[..])
    }
}
