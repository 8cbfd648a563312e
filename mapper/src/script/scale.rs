use super::{locate, params::Params};
use crate::{Document, Error, Mapping, ValueType};
use htable_table::Reader;

/// Number of entries in a [ScaleTable]: one per byte value.
pub const SCALE_TABLE_SIZE: usize = 256;

/// Maps a byte `0..=255` linearly onto `[min, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleTable {
    values: [f32; SCALE_TABLE_SIZE],
}

impl ScaleTable {
    /// Builds the table so that `get(0) == min` and `get(255) == max`.
    pub fn new(min: f64, max: f64) -> Self {
        let mut values = [0.0; SCALE_TABLE_SIZE];
        let last = (SCALE_TABLE_SIZE - 1) as f64;
        for (index, value) in values.iter_mut().enumerate() {
            let t = index as f64 / last;
            *value = (min * (1.0 - t) + max * t) as f32;
        }
        Self { values }
    }

    #[inline]
    pub fn get(&self, byte: u8) -> f32 {
        self.values[byte as usize]
    }
}

/// Looks up `key` in a `byte` field and maps the stored byte through a [ScaleTable].
#[derive(Clone, Debug, PartialEq)]
pub struct GetScale {
    field: String,
    key: u64,
    default: f32,
    table: ScaleTable,
}

impl GetScale {
    pub fn new(field: impl Into<String>, key: u64, default: f32, table: ScaleTable) -> Self {
        Self {
            field: field.into(),
            key,
            default,
            table,
        }
    }

    /// Reads `field`, `key`, `default` (0 if absent), `min_value` and `max_value`.
    pub fn from_params(params: &serde_json::Value) -> Result<Self, Error> {
        let params = Params::new(params);
        let field = params.string("field")?;
        let key = params.key("key")?;
        let default = params.float_or("default", 0.0)?;
        let min = params.double("min_value")?;
        let max = params.double("max_value")?;
        Ok(Self::new(field, key, default, ScaleTable::new(min, max)))
    }

    /// Returns the scaled value stored under the key, or the default if `document` has none.
    pub fn run(&self, mapping: &Mapping, document: Option<&Document>) -> Result<f32, Error> {
        let field = mapping
            .field(&self.field)
            .ok_or_else(|| Error::UnknownField(self.field.clone()))?;
        if field.value_type() != ValueType::Byte {
            return Err(Error::UnsupportedValueType(field.value_type()));
        }
        Ok(match locate(field, document, self.key)? {
            Some((reader, offset)) => self.table.get(reader.get_byte(offset)),
            None => self.default,
        })
    }
}
