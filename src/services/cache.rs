//! Redis cache service implementation
//!
//! This service handles Redis connection setup and caching utilities for
//! dashboard aggregates and other frequently read, slowly changing values.

use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::utils::errors::{Result, ShepherdError};

/// Redis-backed cache for query results
#[derive(Debug, Clone)]
pub struct CacheService {
    client: Client,
    settings: Settings,
}

impl CacheService {
    /// Create a new CacheService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::open(settings.redis.url.as_str()).map_err(ShepherdError::Redis)?;

        Ok(Self { client, settings })
    }

    /// Get Redis connection
    async fn get_connection(&self) -> Result<redis::aio::Connection> {
        self.client
            .get_async_connection()
            .await
            .map_err(ShepherdError::Redis)
    }

    /// Set a value in Redis with TTL
    pub async fn set<T>(&self, key: &str, value: &T, ttl_seconds: Option<u64>) -> Result<()>
    where
        T: Serialize,
    {
        let mut conn = self.get_connection().await?;
        let serialized = serde_json::to_string(value).map_err(ShepherdError::Serialization)?;

        let full_key = format!("{}{}", self.settings.redis.prefix, key);
        let ttl = ttl_seconds.unwrap_or(self.settings.redis.ttl_seconds);

        let _: () = conn
            .set_ex(&full_key, serialized, ttl)
            .await
            .map_err(ShepherdError::Redis)?;

        debug!(key = %full_key, ttl = ttl, "Value set in Redis");
        Ok(())
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let result: Option<String> = conn.get(&full_key).await.map_err(ShepherdError::Redis)?;

        match result {
            Some(data) => {
                let deserialized =
                    serde_json::from_str::<T>(&data).map_err(ShepherdError::Serialization)?;
                debug!(key = %full_key, "Value retrieved from Redis");
                Ok(Some(deserialized))
            }
            None => {
                debug!(key = %full_key, "Key not found in Redis");
                Ok(None)
            }
        }
    }

    /// Delete a key from Redis
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let deleted: i32 = conn.del(&full_key).await.map_err(ShepherdError::Redis)?;

        debug!(key = %full_key, deleted = deleted > 0, "Key deletion attempted");
        Ok(deleted > 0)
    }

    /// Check if a key exists in Redis
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let exists: bool = conn.exists(&full_key).await.map_err(ShepherdError::Redis)?;

        debug!(key = %full_key, exists = exists, "Key existence check");
        Ok(exists)
    }

    /// Get all keys matching a pattern
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let full_pattern = format!("{}{}", self.settings.redis.prefix, pattern);

        let keys: Vec<String> = conn
            .keys(&full_pattern)
            .await
            .map_err(ShepherdError::Redis)?;

        debug!(pattern = %full_pattern, count = keys.len(), "Keys retrieved by pattern");
        Ok(keys)
    }

    /// Delete all keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let keys = self.keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_connection().await?;
        let deleted: u64 = conn.del(&keys).await.map_err(ShepherdError::Redis)?;

        info!(pattern = %pattern, deleted = deleted, "Keys deleted by pattern");
        Ok(deleted)
    }

    /// Invalidate every cached aggregate for a church
    pub async fn invalidate_church(&self, church_id: i64) -> Result<u64> {
        self.delete_pattern(&format!("stats:{}:*", church_id)).await
    }

    /// Redis health check
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(ShepherdError::Redis)?;

        Ok(pong == "PONG")
    }
}
