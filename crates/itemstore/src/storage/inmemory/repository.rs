//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use itemstore_core::item::Item;
use itemstore_core::storage::{ItemRepository, RepositoryError, Result};
use itemstore_core::update::UpdateExpression;

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    items: Arc<RwLock<HashMap<String, Item>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored items.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn put_item(&self, item: &Item) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(item.id().to_string(), item.clone());
        Ok(())
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(id).cloned())
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(id);
        Ok(())
    }

    async fn update_item(&self, id: &str, update: &UpdateExpression) -> Result<Map<String, Value>> {
        let mut items = self.items.write().await;
        let item = items.get_mut(id).ok_or_else(|| RepositoryError::NotFound {
            id: id.to_string(),
        })?;

        Ok(update.apply_to(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemstore_core::item::UpdateRequest;
    use serde_json::json;

    fn item(value: Value) -> Item {
        Item::from_json(value).unwrap()
    }

    fn update(value: Value) -> UpdateExpression {
        UpdateExpression::build(&UpdateRequest::from_json(value).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let repo = InMemoryRepository::new();
        let stored = item(json!({"id": "1", "name": "A", "price": 10}));

        repo.put_item(&stored).await.unwrap();

        let retrieved = repo.get_item("1").await.unwrap();
        assert_eq!(retrieved, Some(stored));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.get_item("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_whole_item() {
        let repo = InMemoryRepository::new();

        repo.put_item(&item(json!({"id": "1", "name": "A", "price": 10})))
            .await
            .unwrap();
        repo.put_item(&item(json!({"id": "1", "color": "red"})))
            .await
            .unwrap();

        let retrieved = repo.get_item("1").await.unwrap().unwrap();
        assert_eq!(retrieved, item(json!({"id": "1", "color": "red"})));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryRepository::new();
        repo.put_item(&item(json!({"id": "1"}))).await.unwrap();

        repo.delete_item("1").await.unwrap();
        repo.delete_item("1").await.unwrap();

        assert!(repo.get_item("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_succeeds() {
        let repo = InMemoryRepository::new();
        assert!(repo.delete_item("never-stored").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_changes_only_named_fields() {
        let repo = InMemoryRepository::new();
        repo.put_item(&item(json!({"id": "1", "name": "A", "price": 10})))
            .await
            .unwrap();

        let updated = repo
            .update_item("1", &update(json!({"name": "B"})))
            .await
            .unwrap();

        assert_eq!(updated, *json!({"name": "B"}).as_object().unwrap());

        let retrieved = repo.get_item("1").await.unwrap().unwrap();
        assert_eq!(retrieved, item(json!({"id": "1", "name": "B", "price": 10})));
    }

    #[tokio::test]
    async fn test_update_adds_new_fields() {
        let repo = InMemoryRepository::new();
        repo.put_item(&item(json!({"id": "1"}))).await.unwrap();

        let updated = repo
            .update_item("1", &update(json!({"tags": ["a"], "first name": "Ada"})))
            .await
            .unwrap();

        assert_eq!(updated.len(), 2);
        let retrieved = repo.get_item("1").await.unwrap().unwrap();
        assert_eq!(retrieved.get("tags"), Some(&json!(["a"])));
        assert_eq!(retrieved.get("first name"), Some(&json!("Ada")));
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo
            .update_item("missing", &update(json!({"name": "B"})))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                id: "missing".to_string()
            })
        );
        assert_eq!(repo.len().await, 0);
    }
}
