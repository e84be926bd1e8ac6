//! Storage seam for the requests collection

use async_trait::async_trait;

use crate::models::{Request, RequestBody, RequestId};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("stored document is malformed: {0}")]
    Document(#[from] serde_json::Error),

    #[error("not found: request '{id}'")]
    NotFound { id: RequestId },
}

/// One collection of request documents.
///
/// Every method is a single storage call. Implementations own their
/// concurrency; callers share a store across tasks without extra locking.
#[async_trait]
pub trait RequestStore: Send + Sync + 'static {
    /// All documents, oldest first.
    async fn list(&self) -> Result<Vec<Request>, StoreError>;

    /// Store a new document and return the id assigned to it.
    async fn insert(&self, body: RequestBody) -> Result<RequestId, StoreError>;

    async fn get(&self, id: RequestId) -> Result<Request, StoreError>;

    /// Replace the whole document stored under `id`.
    async fn replace(&self, id: RequestId, body: RequestBody) -> Result<(), StoreError>;

    async fn remove(&self, id: RequestId) -> Result<(), StoreError>;
}
