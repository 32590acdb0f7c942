//! Redis cache: JSON values with TTLs, fixed-window rate limiting and the
//! season standings cache.
//!
//! The HTTP and service layers only see the [`RateLimiter`] and
//! [`StandingsCache`] traits, so they run without Redis in tests.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{
    Config, CACHE_HEALTH_KEY, CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_STANDINGS,
};
use crate::domain::Standing;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fixed-window request counter.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request for `identifier`; returns the count in the current
    /// window and whether it is still within `max_requests`.
    async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)>;

    /// Reachability of the backing store.
    async fn ping(&self) -> AppResult<()>;
}

/// Read-through cache of computed standings, keyed by season.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StandingsCache: Send + Sync {
    async fn get_standings(&self, season_id: i64) -> AppResult<Option<Vec<Standing>>>;

    async fn set_standings(&self, season_id: i64, standings: Vec<Standing>) -> AppResult<()>;

    async fn invalidate_standings(&self, season_id: i64) -> AppResult<()>;
}

/// Redis connection shared by every cache concern.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    standings_ttl: u64,
}

impl Cache {
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self {
            connection,
            standings_ttl: config.standings_cache_ttl_seconds,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_ttl<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }
}

#[async_trait]
impl RateLimiter for Cache {
    async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = rate_limit_key(identifier);
        let mut conn = self.connection.clone();

        let (count,): (i64,) = rate_limit_pipeline(&key, window_seconds)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        let count = count.max(0) as u64;

        Ok((count, count <= max_requests))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: bool = conn.exists(CACHE_HEALTH_KEY).await.map_err(cache_error)?;
        Ok(())
    }
}

#[async_trait]
impl StandingsCache for Cache {
    async fn get_standings(&self, season_id: i64) -> AppResult<Option<Vec<Standing>>> {
        self.get(&standings_key(season_id)).await
    }

    async fn set_standings(&self, season_id: i64, standings: Vec<Standing>) -> AppResult<()> {
        self.set_with_ttl(&standings_key(season_id), &standings, self.standings_ttl)
            .await
    }

    async fn invalidate_standings(&self, season_id: i64) -> AppResult<()> {
        self.delete(&standings_key(season_id)).await
    }
}

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}

/// `SET key 0 EX window NX` then `INCR key` in one MULTI/EXEC, so the
/// counter never exists without an expiry.
fn rate_limit_pipeline(key: &str, window_seconds: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(key)
        .arg(0)
        .arg("EX")
        .arg(window_seconds)
        .arg("NX")
        .ignore()
        .incr(key, 1);
    pipe
}

fn standings_key(season_id: i64) -> String {
    format!("{}{}", CACHE_PREFIX_STANDINGS, season_id)
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!(error = %e, "Redis error");
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(standings_key(7), "standings:7");
        assert_eq!(rate_limit_key("auth:10.0.0.1"), "rate_limit:auth:10.0.0.1");
    }

    #[test]
    fn test_rate_limit_window_set_before_increment() {
        let packed = rate_limit_pipeline("rate_limit:general:10.0.0.1", 60).get_packed_pipeline();
        let wire = String::from_utf8(packed).unwrap();

        let position = |needle: &str| {
            wire.find(needle)
                .unwrap_or_else(|| panic!("{} missing from {:?}", needle, wire))
        };
        let multi = position("MULTI");
        let set = position("\r\nSET\r\n");
        let nx = position("\r\nNX\r\n");
        let incr = position("\r\nINCR\r\n");
        let exec = position("EXEC");

        assert!(multi < set && set < nx && nx < incr && incr < exec);
        assert!(wire[set..incr].contains("\r\nEX\r\n$2\r\n60\r\n"));
        assert!(!wire.contains("EXISTS"));
    }
}
