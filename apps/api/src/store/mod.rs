//! Local key-value persistence port.
//!
//! Every durable record in the service is a JSON snapshot under one of the
//! four well-known keys. Stores talk to the [`KvStore`] trait so tests can
//! substitute the in-memory implementation for the file-backed one.

use anyhow::Result;
use async_trait::async_trait;

pub mod file;
pub mod memory;

pub const AUTH_KEY: &str = "auth-state";
pub const PROFILE_KEY: &str = "profile";
pub const ANALYSIS_KEY: &str = "analysis-result";
pub const CATALOG_KEY: &str = "internship-catalog";

/// Persistence port. A key that was never written (or was removed) reads
/// back as `None`, never as an empty value.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}
