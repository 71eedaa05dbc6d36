//! DynamoDB repository implementation.
//!
//! Implements `ItemRepository` from `itemstore_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Value};

use itemstore_core::item::{Item, ID_ATTRIBUTE};
use itemstore_core::storage::{ItemRepository, Result};
use itemstore_core::update::{key_exists_condition, UpdateExpression, KEY_NAME_PLACEHOLDER};

use super::conversions::{
    attributes_to_item, attributes_to_map, item_to_attributes, json_to_attribute,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_update_item_error,
};

/// DynamoDB-based repository implementation.
///
/// Items live in one table whose hash key is the string attribute `id`.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn key(id: &str) -> (String, AttributeValue) {
        (ID_ATTRIBUTE.to_string(), AttributeValue::S(id.to_string()))
    }
}

#[async_trait]
impl ItemRepository for DynamoDbRepository {
    async fn put_item(&self, item: &Item) -> Result<()> {
        let attributes = item_to_attributes(item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        let (key_name, key_value) = Self::key(id);

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(attributes_to_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        let (key_name, key_value) = Self::key(id);

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn update_item(&self, id: &str, update: &UpdateExpression) -> Result<Map<String, Value>> {
        let (key_name, key_value) = Self::key(id);

        let mut names: HashMap<String, String> = update
            .names()
            .iter()
            .map(|(placeholder, name)| (placeholder.clone(), name.clone()))
            .collect();
        names.insert(KEY_NAME_PLACEHOLDER.to_string(), ID_ATTRIBUTE.to_string());

        let values = update
            .values()
            .iter()
            .map(|(placeholder, value)| Ok((placeholder.clone(), json_to_attribute(value)?)))
            .collect::<Result<HashMap<String, AttributeValue>>>()?;

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .update_expression(update.expression())
            .condition_expression(key_exists_condition())
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, id))?;

        match result.attributes {
            Some(attributes) => attributes_to_map(&attributes),
            None => Ok(Map::new()),
        }
    }
}
