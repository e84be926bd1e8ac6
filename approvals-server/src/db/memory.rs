//! In-process request store
//!
//! Keeps documents in insertion order behind a tokio `RwLock`. Used by the
//! router tests and by `serve --in-memory`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{RequestStore, StoreError};
use crate::models::{Request, RequestBody, RequestId};

#[derive(Default)]
pub struct MemoryRequestStore {
    documents: RwLock<Vec<Request>>,
}

impl MemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn list(&self) -> Result<Vec<Request>, StoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn insert(&self, body: RequestBody) -> Result<RequestId, StoreError> {
        let id = RequestId::new_v4();
        self.documents
            .write()
            .await
            .push(Request::from_body(id, body));
        Ok(id)
    }

    async fn get(&self, id: RequestId) -> Result<Request, StoreError> {
        self.documents
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn replace(&self, id: RequestId, body: RequestBody) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let slot = documents
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;
        *slot = Request::from_body(id, body);
        Ok(())
    }

    async fn remove(&self, id: RequestId) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let index = documents
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;
        documents.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(title: &str, description: &str) -> RequestBody {
        RequestBody {
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = MemoryRequestStore::new();
        let a = store.insert(body("a", "first")).await.unwrap();
        let b = store.insert(body("b", "second")).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryRequestStore::new();
        for title in ["one", "two", "three"] {
            store.insert(body(title, "")).await.unwrap();
        }

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn replace_swaps_whole_document() {
        let store = MemoryRequestStore::new();
        let id = store.insert(body("old", "old text")).await.unwrap();

        store.replace(id, body("new", "new text")).await.unwrap();

        let stored = store.get(id).await.unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.title, "new");
        assert_eq!(stored.description, "new text");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn remove_then_get_is_not_found() {
        let store = MemoryRequestStore::new();
        let id = store.insert(body("gone", "soon")).await.unwrap();

        store.remove(id).await.unwrap();

        assert!(matches!(
            store.get(id).await,
            Err(StoreError::NotFound { id: missing }) if missing == id
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryRequestStore::new();
        let id = RequestId::new_v4();

        assert!(matches!(store.get(id).await, Err(StoreError::NotFound { .. })));
        assert!(matches!(
            store.replace(id, body("x", "y")).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(store.remove(id).await, Err(StoreError::NotFound { .. })));
    }
}
