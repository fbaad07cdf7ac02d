//! Service configuration
//!
//! Environment variables read by [`ServiceConfig::from_env`]:
//! - `AUTHZ_CACHE_ENABLED` - Enable the decision cache (default: true)
//! - `AUTHZ_CACHE_TTL` - Cache TTL in seconds (default: 300)
//! - `AUTHZ_CACHE_SIZE` - Cache capacity (default: 10000)
//! - `AUTHZ_METRICS_ENABLED` - Enable decision metrics (default: true)

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::engine::CacheConfig;
use crate::error::{AuthzError, Result};

/// Authorization service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Enable the decision cache
    pub enable_cache: bool,

    /// Time-to-live for cached decisions
    #[serde(with = "duration_secs")]
    pub cache_ttl: Duration,

    /// Maximum number of cached decisions
    pub cache_capacity: usize,

    /// Enable decision metrics
    pub enable_metrics: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 10_000,
            enable_metrics: true,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to
    /// defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            enable_cache: parse_var(&lookup, "AUTHZ_CACHE_ENABLED")?
                .unwrap_or(defaults.enable_cache),
            cache_ttl: parse_var(&lookup, "AUTHZ_CACHE_TTL")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            cache_capacity: parse_var(&lookup, "AUTHZ_CACHE_SIZE")?
                .unwrap_or(defaults.cache_capacity),
            enable_metrics: parse_var(&lookup, "AUTHZ_METRICS_ENABLED")?
                .unwrap_or(defaults.enable_metrics),
        })
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.cache_capacity,
            ttl: self.cache_ttl,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AuthzError::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
