use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    cache::{DatasetCache, RedisCache, init_redis},
    config::Config,
    dataset::get_data_list,
    error::AppError,
    models::Record,
};

pub struct AppState {
    pub config: Config,
    pub cache: Box<dyn DatasetCache>,
    pub http: reqwest::Client,
    load_lock: Mutex<()>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let connection = init_redis(&config.redis_url).await;

        Arc::new(Self {
            config,
            cache: Box::new(RedisCache::new(connection)),
            http: reqwest::Client::new(),
            load_lock: Mutex::new(()),
        })
    }

    #[cfg(test)]
    pub fn with_cache(config: Config, cache: Box<dyn DatasetCache>) -> Arc<Self> {
        Arc::new(Self {
            config,
            cache,
            http: reqwest::Client::new(),
            load_lock: Mutex::new(()),
        })
    }

    /// Loads the dataset, serializing cold-cache loads so concurrent first
    /// requests cannot both download and append duplicate rows. The second
    /// waiter re-checks the completion marker inside the loader and reads
    /// from the cache.
    pub async fn dataset(&self) -> Result<Vec<Record>, AppError> {
        if self.cache.is_complete().await? {
            return get_data_list(self.cache.as_ref(), &self.http, &self.config).await;
        }

        let _guard = self.load_lock.lock().await;
        get_data_list(self.cache.as_ref(), &self.http, &self.config).await
    }
}
