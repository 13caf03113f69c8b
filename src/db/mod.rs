mod repository;
mod schema;

use async_trait::async_trait;

use crate::error::Result;

pub use repository::Repository;

/// Byte-oriented key-value storage backing the local preference records.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;
}
