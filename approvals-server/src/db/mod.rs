//! Database layer - the request store seam and its implementations
//!
//! # Design Principles
//!
//! - Handlers talk to `RequestStore`, never to the driver
//! - Connection pool with explicit limits - no Arc<Mutex<Connection>>
//! - One pooled connection per store operation, released when it returns
//! - Rely on affected-row counts for not-found - no check-then-write

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryRequestStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgRequestStore;
pub use store::{RequestStore, StoreError};
