use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::item::Item;
use crate::update::UpdateExpression;

use super::Result;

/// Repository for items in a single table keyed by `id`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts the item, replacing any existing item with the same `id`.
    async fn put_item(&self, item: &Item) -> Result<()>;

    /// Gets an item by its `id`.
    async fn get_item(&self, id: &str) -> Result<Option<Item>>;

    /// Deletes an item by its `id`. Deleting a missing item succeeds.
    async fn delete_item(&self, id: &str) -> Result<()>;

    /// Applies a set-only partial update to an existing item.
    ///
    /// Returns the new values of exactly the attributes that were set.
    /// Fails with [`RepositoryError::NotFound`](super::RepositoryError::NotFound)
    /// if no item has this `id`.
    async fn update_item(&self, id: &str, update: &UpdateExpression) -> Result<Map<String, Value>>;
}
