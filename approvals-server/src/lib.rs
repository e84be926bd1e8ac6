//! approvals-server: HTTP CRUD over the requests collection
//!
//! Exposes list/create/read/replace/delete endpoints for approval requests,
//! backed by a pluggable document store (PostgreSQL JSONB or in-memory).

pub mod db;
pub mod http;
pub mod models;

pub use db::{MemoryRequestStore, PgRequestStore, RequestStore, StoreError};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{Request, RequestBody, RequestId};
