use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::item::{Item, UpdateRequest, ValidationError, ID_ATTRIBUTE};

use super::placeholder::{assign_tokens, NAME_PREFIX, VALUE_PREFIX};

/// Name placeholder bound to the primary key in the existence condition.
///
/// Field placeholders can never take this value because `id` is excluded from
/// every update request.
pub const KEY_NAME_PLACEHOLDER: &str = "#id";

/// Condition that makes an update fail on a missing item instead of creating it.
pub fn key_exists_condition() -> String {
    format!("attribute_exists({KEY_NAME_PLACEHOLDER})")
}

/// One `#name = :value` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClause {
    pub name_placeholder: String,
    pub value_placeholder: String,
}

impl fmt::Display for SetClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name_placeholder, self.value_placeholder)
    }
}

/// A set-only partial update with its placeholder lookup tables.
///
/// Clauses are ordered by attribute name. `names` maps each name placeholder
/// to the real attribute name, `values` maps each value placeholder to the new
/// value. Nothing in the expression text is user-controlled.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    clauses: Vec<SetClause>,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, Value>,
}

impl UpdateExpression {
    /// Builds the expression for an update request.
    ///
    /// Fails with [`ValidationError::NoAttributesToUpdate`] when the request
    /// has nothing besides `id`.
    pub fn build(request: &UpdateRequest) -> Result<Self, ValidationError> {
        let mut fields: Vec<(&str, &Value)> = request
            .fields()
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .filter(|(name, _)| *name != ID_ATTRIBUTE)
            .collect();

        if fields.is_empty() {
            return Err(ValidationError::NoAttributesToUpdate);
        }

        fields.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let field_names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        let tokens = assign_tokens(&field_names);

        let mut expression = Self {
            clauses: Vec::with_capacity(fields.len()),
            names: BTreeMap::new(),
            values: BTreeMap::new(),
        };

        for ((name, token), (_, value)) in tokens.into_iter().zip(fields) {
            let name_placeholder = format!("{NAME_PREFIX}{token}");
            let value_placeholder = format!("{VALUE_PREFIX}{token}");

            expression
                .names
                .insert(name_placeholder.clone(), name.to_string());
            expression
                .values
                .insert(value_placeholder.clone(), value.clone());
            expression.clauses.push(SetClause {
                name_placeholder,
                value_placeholder,
            });
        }

        Ok(expression)
    }

    /// The expression text, e.g. `set #name = :name, #price = :price`.
    pub fn expression(&self) -> String {
        let clauses: Vec<String> = self.clauses.iter().map(ToString::to_string).collect();
        format!("set {}", clauses.join(", "))
    }

    pub fn clauses(&self) -> &[SetClause] {
        &self.clauses
    }

    /// Name placeholder to attribute name.
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Value placeholder to new value.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Resolves every clause through the lookup tables, in clause order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.clauses.iter().filter_map(|clause| {
            let name = self.names.get(&clause.name_placeholder)?;
            let value = self.values.get(&clause.value_placeholder)?;
            Some((name.as_str(), value))
        })
    }

    /// Applies the assignments to `item` and returns the new values of the
    /// attributes that were set. All other attributes are left untouched.
    pub fn apply_to(&self, item: &mut Item) -> Map<String, Value> {
        let mut updated = Map::new();
        for (name, value) in self.assignments() {
            item.set_attribute(name, value.clone());
            updated.insert(name.to_string(), value.clone());
        }
        updated
    }
}

impl fmt::Display for UpdateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(body: Value) -> Result<UpdateExpression, ValidationError> {
        UpdateExpression::build(&UpdateRequest::from_json(body).unwrap())
    }

    #[test]
    fn test_build_single_field() {
        let update = build(json!({"name": "B"})).unwrap();

        assert_eq!(update.expression(), "set #name = :name");
        assert_eq!(update.names().get("#name"), Some(&"name".to_string()));
        assert_eq!(update.values().get(":name"), Some(&json!("B")));
    }

    #[test]
    fn test_build_orders_clauses_by_name() {
        let update = build(json!({"price": 12, "color": "red", "name": "B"})).unwrap();

        assert_eq!(
            update.expression(),
            "set #color = :color, #name = :name, #price = :price"
        );
        assert_eq!(update.clauses().len(), 3);
        assert_eq!(update.names().len(), 3);
        assert_eq!(update.values().len(), 3);
    }

    #[test]
    fn test_build_excludes_id() {
        let update = build(json!({"id": "1", "name": "B"})).unwrap();

        assert_eq!(update.expression(), "set #name = :name");
        assert!(update.names().values().all(|name| name != "id"));
    }

    #[test]
    fn test_build_only_id_is_rejected() {
        assert_eq!(
            build(json!({"id": "x"})),
            Err(ValidationError::NoAttributesToUpdate)
        );
    }

    #[test]
    fn test_build_empty_request_is_rejected() {
        assert_eq!(build(json!({})), Err(ValidationError::NoAttributesToUpdate));
        assert_eq!(
            UpdateExpression::build(&UpdateRequest::default()),
            Err(ValidationError::NoAttributesToUpdate)
        );
    }

    #[test]
    fn test_build_unsafe_names_use_positional_placeholders() {
        let update = build(json!({"first name": "Ada", "zip": "12345"})).unwrap();

        assert_eq!(update.expression(), "set #attr0 = :attr0, #zip = :zip");
        assert_eq!(update.names().get("#attr0"), Some(&"first name".to_string()));
        assert_eq!(update.values().get(":attr0"), Some(&json!("Ada")));
    }

    #[test]
    fn test_build_keeps_nested_values() {
        let update = build(json!({"address": {"city": "Lima", "lines": ["a", "b"]}})).unwrap();

        assert_eq!(
            update.values().get(":address"),
            Some(&json!({"city": "Lima", "lines": ["a", "b"]}))
        );
    }

    #[test]
    fn test_key_placeholder_is_never_generated() {
        let update = build(json!({"pk": 1, "id_2": 2, "ID": 3})).unwrap();

        assert!(!update.names().contains_key(KEY_NAME_PLACEHOLDER));
        assert_eq!(key_exists_condition(), "attribute_exists(#id)");
    }

    #[test]
    fn test_assignments_resolve_placeholders() {
        let update = build(json!({"a-b": 1, "c": true})).unwrap();
        let assignments: Vec<(&str, &Value)> = update.assignments().collect();

        assert_eq!(assignments, vec![("a-b", &json!(1)), ("c", &json!(true))]);
    }

    #[test]
    fn test_apply_changes_only_named_fields() {
        let mut item = Item::from_json(json!({
            "id": "1",
            "name": "A",
            "price": 10,
            "tags": ["x"]
        }))
        .unwrap();
        let before = item.clone();

        let update = build(json!({"name": "B", "stock": 3})).unwrap();
        let updated = update.apply_to(&mut item);

        assert_eq!(updated, *json!({"name": "B", "stock": 3}).as_object().unwrap());
        assert_eq!(item.id(), "1");
        assert_eq!(item.get("name"), Some(&json!("B")));
        assert_eq!(item.get("stock"), Some(&json!(3)));
        assert_eq!(item.get("price"), before.get("price"));
        assert_eq!(item.get("tags"), before.get("tags"));
    }

    #[test]
    fn test_display_matches_expression() {
        let update = build(json!({"name": "B"})).unwrap();
        assert_eq!(update.to_string(), update.expression());
    }
}
