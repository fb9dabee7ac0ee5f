use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::instrument;

use crate::{traits::KeyValueStore, Status};

/// Shared key-value cache backed by Redis.
///
/// Entries are opportunistically read before and written after upstream
/// network calls. Expiry is the only invalidation; there is no single-flight
/// discipline, so concurrent misses on the same key may both hit upstream.
#[derive(Clone)]
pub struct CacheApi {
    connection: ConnectionManager,
}

impl CacheApi {
    pub async fn connect(redis_url: &str) -> Result<CacheApi, Status> {
        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;
        Ok(CacheApi { connection })
    }
}

#[async_trait]
impl KeyValueStore for CacheApi {
    #[instrument(level = "trace", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, Status> {
        let mut connection = self.connection.clone();
        Ok(connection.get(key).await?)
    }

    #[instrument(level = "trace", skip(self, value))]
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), Status> {
        let mut connection = self.connection.clone();
        let _: () = connection.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }
}
