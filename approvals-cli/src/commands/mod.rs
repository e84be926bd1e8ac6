//! Command implementations for the approvals CLI

pub mod serve;

pub use serve::run_serve;
