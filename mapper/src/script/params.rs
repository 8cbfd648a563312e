//! Read lookup parameters from a JSON object.
//!
//! Numbers may be given either as JSON numbers or as strings holding a number.

use crate::{value::integer, Error};
use serde_json::{Map, Value};

/// Parameters of one lookup.
pub(crate) struct Params<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Params<'a> {
    /// Wraps `params`. Anything other than an object is treated as empty.
    pub(crate) fn new(params: &'a Value) -> Self {
        Self {
            map: params.as_object(),
        }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map
            .and_then(|map| map.get(name))
            .filter(|value| !value.is_null())
    }

    fn required(&self, name: &'static str) -> Result<&'a Value, Error> {
        self.get(name).ok_or(Error::MissingParameter(name))
    }

    pub(crate) fn string(&self, name: &'static str) -> Result<String, Error> {
        match self.required(name)? {
            Value::String(value) => Ok(value.clone()),
            other => Err(invalid(name, other)),
        }
    }

    /// A key, given as a signed or unsigned 64-bit integer.
    pub(crate) fn key(&self, name: &'static str) -> Result<u64, Error> {
        match self.required(name)? {
            Value::Number(number) => Ok(integer(number) as u64),
            Value::String(value) => value
                .parse::<i64>()
                .map(|key| key as u64)
                .or_else(|_| value.parse::<u64>())
                .map_err(|_| invalid(name, &Value::String(value.clone()))),
            other => Err(invalid(name, other)),
        }
    }

    pub(crate) fn double(&self, name: &'static str) -> Result<f64, Error> {
        let value = self.required(name)?;
        number(value).ok_or_else(|| invalid(name, value))
    }

    pub(crate) fn float_or(&self, name: &'static str, default: f32) -> Result<f32, Error> {
        match self.get(name) {
            None => Ok(default),
            Some(value) => number(value)
                .map(|value| value as f32)
                .ok_or_else(|| invalid(name, value)),
        }
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(value) => value.parse().ok(),
        _ => None,
    }
}

fn invalid(name: &'static str, value: &Value) -> Error {
    Error::InvalidParameter {
        name,
        value: value.to_string(),
    }
}
