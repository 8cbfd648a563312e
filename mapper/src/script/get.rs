use super::{locate, params::Params};
use crate::{Document, Error, Mapping};

/// Looks up `key` in a field and returns the stored value as a score.
#[derive(Clone, Debug, PartialEq)]
pub struct Get {
    field: String,
    key: u64,
    default: f32,
}

impl Get {
    pub fn new(field: impl Into<String>, key: u64, default: f32) -> Self {
        Self {
            field: field.into(),
            key,
            default,
        }
    }

    /// Reads `field`, `key` and `default` (0 if absent).
    pub fn from_params(params: &serde_json::Value) -> Result<Self, Error> {
        let params = Params::new(params);
        let field = params.string("field")?;
        let key = params.key("key")?;
        let default = params.float_or("default", 0.0)?;
        Ok(Self::new(field, key, default))
    }

    /// Returns the value stored under the key, or the default if `document` has none.
    pub fn run(&self, mapping: &Mapping, document: Option<&Document>) -> Result<f32, Error> {
        let field = mapping
            .field(&self.field)
            .ok_or_else(|| Error::UnknownField(self.field.clone()))?;
        Ok(match locate(field, document, self.key)? {
            Some((reader, offset)) => field.value_type().value(&reader, offset),
            None => self.default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn mapping() -> Mapping {
        Mapping::parse(&json!({
            "bytes": {"value_type": "byte"},
            "shorts": {"value_type": "short", "format_params": {"format": "trie"}},
            "ints": {"value_type": "int"},
            "longs": {"value_type": "long", "format_params": {"format": "trie", "bitmask_size": "long"}},
            "floats": {"value_type": "float"},
            "doubles": {"type": "hamt", "value_type": "double", "bitmask_size": "byte"},
        }))
        .unwrap()
    }

    #[test_case("bytes", json!([200, 255]), 255.0)]
    #[test_case("shorts", json!([1, 40000]), 40000.0)]
    #[test_case("ints", json!([1, -7]), -7.0)]
    #[test_case("longs", json!([1, -9000000000i64]), -9.0e9)]
    #[test_case("floats", json!([1.5, 103.3]), 103.3)]
    #[test_case("doubles", json!([0.25, 2.5]), 2.5)]
    fn test_get(field: &str, values: serde_json::Value, expected: f32) {
        let mapping = mapping();
        let mut source = serde_json::Map::new();
        source.insert(field.to_string(), json!({"keys": [10, 20], "values": values}));
        let document = mapping.index(&serde_json::Value::Object(source)).unwrap();
        let script = Get::new(field, 20, 0.0);
        assert_eq!(script.run(&mapping, Some(&document)).unwrap(), expected);
    }

    #[test]
    fn test_get_default() {
        let mapping = mapping();
        let document = mapping
            .index(&json!({"floats": {"keys": [1], "values": [0.5]}}))
            .unwrap();
        let script = Get::from_params(&json!({"field": "floats", "key": 2, "default": 9})).unwrap();
        assert_eq!(script.run(&mapping, Some(&document)).unwrap(), 9.0);
        assert_eq!(script.run(&mapping, None).unwrap(), 9.0);

        // Field present in the mapping but absent from the document.
        let script = Get::from_params(&json!({"field": "ints", "key": 1})).unwrap();
        assert_eq!(script.run(&mapping, Some(&document)).unwrap(), 0.0);

        // Empty blob.
        let document = mapping
            .index(&json!({"floats": {"keys": [], "values": []}}))
            .unwrap();
        let script = Get::new("floats", 1, 3.0);
        assert_eq!(script.run(&mapping, Some(&document)).unwrap(), 3.0);
    }

    #[test]
    fn test_get_errors() {
        let mapping = mapping();
        let err = Get::new("missing", 1, 0.0).run(&mapping, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No field found for [missing]; expected [htable] field type"
        );
        let err = Get::from_params(&json!({"key": 1})).unwrap_err();
        assert_eq!(err.to_string(), "Missing the [field] parameter");
        let err = Get::from_params(&json!({"field": "floats"})).unwrap_err();
        assert_eq!(err.to_string(), "Missing the [key] parameter");
    }
}
