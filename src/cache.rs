//! Dataset cache backed by Redis.
//!
//! One list key holds the serialized records in download order. A separate
//! marker key is written only after the full parse loop finishes, so a cache
//! interrupted mid-load is treated as empty rather than complete.

use std::time::Duration;

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::error::AppError;

const ROWS_KEY: &str = "dataset:rows";
const COMPLETE_KEY: &str = "dataset:complete";

/// The cache primitives the loader needs, injected per call so the loader
/// never reaches for ambient connection state.
#[async_trait]
pub trait DatasetCache: Send + Sync {
    /// Whether a full load has finished. Presence of rows alone is not enough.
    async fn is_complete(&self) -> Result<bool, AppError>;

    /// All cached record blobs in stored order.
    async fn rows(&self) -> Result<Vec<Vec<u8>>, AppError>;

    async fn push_row(&self, blob: &[u8]) -> Result<(), AppError>;

    async fn mark_complete(&self) -> Result<(), AppError>;

    /// Drops all cached rows and the completion marker. Called before a
    /// reload so rows left behind by an interrupted load cannot survive.
    async fn clear(&self) -> Result<(), AppError>;
}

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url).unwrap();

    client
        .get_connection_manager_with_config(config)
        .await
        .unwrap()
}

pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl DatasetCache for RedisCache {
    async fn is_complete(&self) -> Result<bool, AppError> {
        let mut connection = self.connection.clone();
        Ok(connection.exists(COMPLETE_KEY).await?)
    }

    async fn rows(&self) -> Result<Vec<Vec<u8>>, AppError> {
        let mut connection = self.connection.clone();
        Ok(connection.lrange(ROWS_KEY, 0, -1).await?)
    }

    async fn push_row(&self, blob: &[u8]) -> Result<(), AppError> {
        let mut connection = self.connection.clone();
        let _: () = connection.rpush(ROWS_KEY, blob).await?;
        Ok(())
    }

    async fn mark_complete(&self) -> Result<(), AppError> {
        let mut connection = self.connection.clone();
        let _: () = connection.set(COMPLETE_KEY, 1).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let mut connection = self.connection.clone();
        let _: () = connection.del(&[ROWS_KEY, COMPLETE_KEY][..]).await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use super::*;

    /// In-memory stand-in for Redis used by loader tests.
    #[derive(Default)]
    pub struct MemoryCache {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        rows: Vec<Vec<u8>>,
        complete: bool,
    }

    impl MemoryCache {
        pub fn preloaded(rows: Vec<Vec<u8>>, complete: bool) -> Self {
            Self {
                inner: Mutex::new(Inner { rows, complete }),
            }
        }
    }

    #[async_trait]
    impl DatasetCache for MemoryCache {
        async fn is_complete(&self) -> Result<bool, AppError> {
            Ok(self.inner.lock().unwrap().complete)
        }

        async fn rows(&self) -> Result<Vec<Vec<u8>>, AppError> {
            Ok(self.inner.lock().unwrap().rows.clone())
        }

        async fn push_row(&self, blob: &[u8]) -> Result<(), AppError> {
            self.inner.lock().unwrap().rows.push(blob.to_vec());
            Ok(())
        }

        async fn mark_complete(&self) -> Result<(), AppError> {
            self.inner.lock().unwrap().complete = true;
            Ok(())
        }

        async fn clear(&self) -> Result<(), AppError> {
            let mut inner = self.inner.lock().unwrap();
            inner.rows.clear();
            inner.complete = false;
            Ok(())
        }
    }
}
