//! Shared plumbing for the relmgr tools
//!
//! - **config**: relmgr.toml parsing and the built-in defaults
//! - **error**: unified error type with contextual help messages
//! - **fetch**: artifact retrieval with the local idempotency cache

pub mod config;
pub mod error;
pub mod fetch;
