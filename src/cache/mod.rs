//! Cache
//!
//! Espejo offline de agendamientos sobre Redis: blobs JSON por clave,
//! sin expiración ni versionado de schema, último escritor gana.

pub mod booking_cache;
pub mod cache_config;
pub mod redis_client;

pub use cache_config::CacheConfig;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Operaciones de cache sobre blobs JSON
#[async_trait::async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
    /// Escribir sin expiración (el espejo offline no expira)
    async fn set_persistent<T: Serialize + Send + Sync>(&self, key: &str, value: &T)
        -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
    async fn exists(&self, key: &str) -> Result<bool>;
}
