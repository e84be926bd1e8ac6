//! Domain models for the requests collection

pub mod request;

pub use request::{Request, RequestBody, RequestId};
