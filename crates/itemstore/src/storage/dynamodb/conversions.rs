//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! JSON items. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Number, Value};

use itemstore_core::item::Item;
use itemstore_core::number::{self, StoreNumber};
use itemstore_core::storage::RepositoryError;

// ============================================================================
// JSON -> DynamoDB
// ============================================================================

/// Convert a JSON value to a DynamoDB attribute.
pub fn json_to_attribute(value: &Value) -> Result<AttributeValue, RepositoryError> {
    Ok(match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(number_to_text(n)?),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(
            values
                .iter()
                .map(json_to_attribute)
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => AttributeValue::M(map_to_attributes(map)?),
    })
}

/// Convert a JSON object to a DynamoDB attribute map.
pub fn map_to_attributes(
    map: &Map<String, Value>,
) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
    map.iter()
        .map(|(name, value)| Ok((name.clone(), json_to_attribute(value)?)))
        .collect()
}

/// Convert an Item to a DynamoDB item.
pub fn item_to_attributes(item: &Item) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
    map_to_attributes(item.attributes())
}

fn number_to_text(number: &Number) -> Result<String, RepositoryError> {
    number::decode(number)
        .map(|n| n.to_store_text())
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

// ============================================================================
// DynamoDB -> JSON
// ============================================================================

/// Convert a DynamoDB attribute to a JSON value.
///
/// String and number sets become arrays, binary values become base64 strings.
pub fn attribute_to_json(attribute: &AttributeValue) -> Result<Value, RepositoryError> {
    Ok(match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(text) => Value::Number(text_to_number(text)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(attributes_to_map(map)?),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|text| text_to_number(text).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::B(blob) => Value::String(blob_to_base64(blob)),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(blob_to_base64(blob)))
                .collect(),
        ),
        other => {
            return Err(RepositoryError::InvalidData(format!(
                "Unsupported attribute type: {other:?}"
            )))
        }
    })
}

/// Convert a DynamoDB attribute map to a JSON object.
pub fn attributes_to_map(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Map<String, Value>, RepositoryError> {
    attributes
        .iter()
        .map(|(name, attribute)| Ok((name.clone(), attribute_to_json(attribute)?)))
        .collect()
}

/// Convert a DynamoDB item to an Item.
pub fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, RepositoryError> {
    Item::from_attributes(attributes_to_map(attributes)?)
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))
}

fn text_to_number(text: &str) -> Result<Number, RepositoryError> {
    StoreNumber::parse(text)
        .and_then(|n| number::encode(&n))
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))
}

fn blob_to_base64(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}
