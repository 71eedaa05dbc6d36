use serde::Serialize;
use serde_json::{Map, Value};

use crate::number;

use super::ValidationError;

/// Name of the primary key attribute.
pub const ID_ATTRIBUTE: &str = "id";

/// A stored record: attribute names mapped to JSON values.
///
/// Always holds a non-empty string `id`, no empty attribute names, and numbers
/// in canonical form. Serializes as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// Builds an item from a parsed request body.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(attributes) => Self::from_attributes(attributes),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    /// Builds an item from an attribute map, validating the primary key.
    pub fn from_attributes(attributes: Map<String, Value>) -> Result<Self, ValidationError> {
        match attributes.get(ID_ATTRIBUTE) {
            None => return Err(ValidationError::MissingId),
            Some(Value::String(id)) if !id.trim().is_empty() => {}
            Some(_) => return Err(ValidationError::InvalidId),
        }
        check_attribute_names(&attributes)?;

        match number::normalize(Value::Object(attributes))? {
            Value::Object(attributes) => Ok(Self(attributes)),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    /// The primary key.
    pub fn id(&self) -> &str {
        // Presence and type are checked on construction.
        self.0
            .get(ID_ATTRIBUTE)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Sets a non-key attribute. Callers pass names from a validated
    /// [`UpdateRequest`], which never contains `id`.
    pub(crate) fn set_attribute(&mut self, name: &str, value: Value) {
        debug_assert_ne!(name, ID_ATTRIBUTE);
        self.0.insert(name.to_string(), value);
    }
}

/// A partial update: attribute names mapped to their new values.
///
/// The primary key is dropped on construction; whatever else the body holds
/// is kept. An empty request is representable and rejected later by
/// [`UpdateExpression::build`](crate::update::UpdateExpression::build).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateRequest {
    fields: Map<String, Value>,
}

impl UpdateRequest {
    /// Builds an update request from a parsed request body.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut fields) = value else {
            return Err(ValidationError::NotAnObject);
        };

        fields.remove(ID_ATTRIBUTE);
        check_attribute_names(&fields)?;

        match number::normalize(Value::Object(fields))? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parses a raw request body, treating a missing or blank body as `{}`.
pub fn parse_body(body: &[u8]) -> Result<Value, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ValidationError::MalformedJson(e.to_string()))
}

/// Checks the `id` path parameter of an id-addressed request.
pub fn validate_path_id(id: &str) -> Result<&str, ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::MissingPathId);
    }
    Ok(id)
}

/// Rejects empty names at any depth, including maps nested inside lists.
fn check_attribute_names(attributes: &Map<String, Value>) -> Result<(), ValidationError> {
    for (name, value) in attributes {
        if name.is_empty() {
            return Err(ValidationError::EmptyAttributeName);
        }
        check_nested_names(value)?;
    }
    Ok(())
}

fn check_nested_names(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Object(map) => check_attribute_names(map),
        Value::Array(values) => values.iter().try_for_each(check_nested_names),
        _ => Ok(()),
    }
}
