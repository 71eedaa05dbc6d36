//! Conversion between exact-precision numbers and JSON numbers.
//!
//! JSON numbers keep their literal text (serde_json `arbitrary_precision`), so
//! neither direction ever goes through a binary float.

use serde_json::{Number, Value};

use super::{NumberError, StoreNumber};

/// Encodes a stored number as a JSON number.
///
/// Integral values become integer literals (`10`), everything else a decimal
/// literal with the exact digits of the stored value (`10.5`).
pub fn encode(number: &StoreNumber) -> Result<Number, NumberError> {
    let text = number.to_store_text();
    serde_json::from_str::<Number>(&text).map_err(|_| NumberError::Invalid(text))
}

/// Decodes a JSON number into an exact-precision number.
pub fn decode(number: &Number) -> Result<StoreNumber, NumberError> {
    StoreNumber::parse(&number.to_string())
}

/// Rewrites every number inside `value` into its canonical form.
///
/// `1.50` becomes `1.5` and `1e3` becomes `1000`, so a value reads back from
/// any backend exactly as it was written.
pub fn normalize(value: Value) -> Result<Value, NumberError> {
    Ok(match value {
        Value::Number(number) => Value::Number(encode(&decode(&number)?)?),
        Value::Array(values) => Value::Array(
            values
                .into_iter()
                .map(normalize)
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| normalize(value).map(|value| (key, value)))
                .collect::<Result<_, _>>()?,
        ),
        other => other,
    })
}
