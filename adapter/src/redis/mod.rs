use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use shared::config::RedisConfig;
use shared::error::AppResult;

/// The key-value surface the caches depend on. A port rather than the
/// concrete client so cache behavior is testable without a running Redis.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set_ex(&self, key: &str, value: &str, ttl: u64) -> AppResult<()>;
}

pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", config.host, config.port))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn set_ex(&self, key: &str, value: &str, ttl: u64) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }
}
