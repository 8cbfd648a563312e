//! Numeric types a field can store and how they map onto slot widths.

use htable_table::{Entries, Error, Reader, ValueSize};
use serde::Deserialize;
use serde_json::Number;
use std::fmt;

/// The type of every value in a field.
///
/// Integer types are stored as their low-order bytes: a `byte` field accepts both `-128..=127`
/// and `0..=255` and always reads back unsigned (likewise `short`), while `int` and `long` read
/// back signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Byte,
    Short,
    Int,
    Long,
    #[default]
    Float,
    Double,
}

impl ValueType {
    /// Width of the slot holding one value.
    pub const fn value_size(self) -> ValueSize {
        match self {
            Self::Byte => ValueSize::Byte,
            Self::Short => ValueSize::Short,
            Self::Int | Self::Float => ValueSize::Int,
            Self::Long | Self::Double => ValueSize::Long,
        }
    }

    /// Lowercase name used in mappings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Encodes `number` as this type and stores it under `key`.
    pub fn put(self, entries: &mut Entries, key: u64, number: &Number) -> Result<(), Error> {
        match self {
            Self::Byte => entries.put(key, &(integer(number) as u8)),
            Self::Short => entries.put(key, &(integer(number) as u16)),
            Self::Int => entries.put(key, &(integer(number) as i32)),
            Self::Long => entries.put(key, &integer(number)),
            Self::Float => entries.put(key, &(float(number) as f32)),
            Self::Double => entries.put(key, &float(number)),
        }
    }

    /// Decodes the slot at `offset` as a single-precision score.
    pub fn value(self, reader: &impl Reader, offset: usize) -> f32 {
        match self {
            Self::Byte => reader.get_byte(offset) as f32,
            Self::Short => reader.get_short(offset) as f32,
            Self::Int => reader.get_int(offset) as i32 as f32,
            Self::Long => reader.get_long(offset) as i64 as f32,
            Self::Float => reader.get_float(offset),
            Self::Double => reader.get_double(offset) as f32,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interprets `number` as a signed 64-bit integer, truncating fractions and reinterpreting
/// unsigned values above `i64::MAX`.
pub(crate) fn integer(number: &Number) -> i64 {
    if let Some(value) = number.as_i64() {
        value
    } else if let Some(value) = number.as_u64() {
        value as i64
    } else {
        number.as_f64().map_or(0, |value| value as i64)
    }
}

fn float(number: &Number) -> f64 {
    number.as_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use htable_table::{chain, Format, NOT_FOUND};
    use serde_json::json;
    use test_case::test_case;

    fn number(value: serde_json::Value) -> Number {
        match value {
            serde_json::Value::Number(number) => number,
            other => panic!("not a number: {other}"),
        }
    }

    fn round_trip(value_type: ValueType, value: serde_json::Value) -> f32 {
        let mut entries = Entries::new(value_type.value_size());
        value_type.put(&mut entries, 7, &number(value)).unwrap();
        let format = Format::Chain(chain::Config::new(value_type.value_size()));
        let blob = format.write(&entries).unwrap();
        let reader = format.reader(&blob).unwrap();
        let offset = reader.lookup(7);
        assert_ne!(offset, NOT_FOUND);
        value_type.value(&reader, offset as usize)
    }

    #[test_case(ValueType::Byte, ValueSize::Byte)]
    #[test_case(ValueType::Short, ValueSize::Short)]
    #[test_case(ValueType::Int, ValueSize::Int)]
    #[test_case(ValueType::Long, ValueSize::Long)]
    #[test_case(ValueType::Float, ValueSize::Int)]
    #[test_case(ValueType::Double, ValueSize::Long)]
    fn test_value_size(value_type: ValueType, value_size: ValueSize) {
        assert_eq!(value_type.value_size(), value_size);
    }

    #[test_case(ValueType::Byte, json!(255), 255.0; "byte unsigned")]
    #[test_case(ValueType::Byte, json!(-1), 255.0; "byte negative wraps")]
    #[test_case(ValueType::Byte, json!(0), 0.0; "byte zero")]
    #[test_case(ValueType::Short, json!(65535), 65535.0; "short unsigned")]
    #[test_case(ValueType::Short, json!(-2), 65534.0; "short negative wraps")]
    #[test_case(ValueType::Int, json!(-5), -5.0; "int signed")]
    #[test_case(ValueType::Int, json!(2.9), 2.0; "int truncates")]
    #[test_case(ValueType::Long, json!(-1_000_000), -1_000_000.0; "long signed")]
    #[test_case(ValueType::Float, json!(103.3), 103.3; "float")]
    #[test_case(ValueType::Float, json!(4), 4.0; "float from integer")]
    #[test_case(ValueType::Double, json!(0.5), 0.5; "double narrowed")]
    fn test_round_trip(value_type: ValueType, value: serde_json::Value, expected: f32) {
        assert_eq!(round_trip(value_type, value), expected);
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(&number(json!(u64::MAX))), -1);
        assert_eq!(integer(&number(json!(-3.7))), -3);
        assert_eq!(integer(&number(json!(42))), 42);
    }

    #[test]
    fn test_parse_names() {
        let parsed: Vec<ValueType> =
            serde_json::from_value(json!(["byte", "short", "int", "long", "float", "double"]))
                .unwrap();
        let names: Vec<String> = parsed.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["byte", "short", "int", "long", "float", "double"]);
        assert!(serde_json::from_value::<ValueType>(json!("half")).is_err());
        assert_eq!(ValueType::default(), ValueType::Float);
    }
}
