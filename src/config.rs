//! Pipeline configuration.
//!
//! [`PipelineConfig`] covers the three knobs the driver recognizes: the
//! queue bound, the producer's pacing interval, and the consumer's
//! poll/backoff tick. Profiles are plain TOML and deserialize with serde,
//! e.g.:
//!
//! ```toml
//! capacity = 64
//! source_interval_ms = 1000
//! poll_interval_ms = 100
//! ```

use crate::error::ConfigError;
use crate::queue::EventQueue;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default producer pacing (ms between source polls).
pub const DEFAULT_SOURCE_INTERVAL_MS: u64 = 1000;

/// Default consumer poll tick (ms). Also bounds how long a stop request can
/// go unobserved by an idle consumer.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Tunable settings for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Queue bound. `None` means unbounded; `Some(n)` blocks producers when
    /// `n` events are buffered.
    ///
    /// Skipped when absent on serialization: TOML has no null, so an
    /// unbounded profile simply omits the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Milliseconds the producer sleeps between source polls. `0` polls as
    /// fast as the source yields.
    pub source_interval_ms: u64,

    /// Milliseconds the consumer waits per dequeue attempt before
    /// re-checking its stop flag. Must be greater than zero.
    pub poll_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            source_interval_ms: DEFAULT_SOURCE_INTERVAL_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML profile.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML profile from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Check the invariants the driver relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than zero".into(),
            ));
        }
        if self.capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "capacity must be at least 1 when bounded".into(),
            ));
        }
        Ok(())
    }

    /// Build the queue this config describes.
    pub fn build_queue(&self) -> EventQueue {
        match self.capacity {
            Some(cap) => EventQueue::bounded(cap),
            None => EventQueue::unbounded(),
        }
    }

    pub fn source_interval(&self) -> Duration {
        Duration::from_millis(self.source_interval_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_cadences() {
        let config = PipelineConfig::default();
        assert_eq!(config.capacity, None);
        assert_eq!(config.source_interval_ms, 1000);
        assert_eq!(config.poll_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_full_profile() {
        let config = PipelineConfig::from_toml(
            "capacity = 64\nsource_interval_ms = 5\npoll_interval_ms = 20\n",
        )
        .unwrap();
        assert_eq!(config.capacity, Some(64));
        assert_eq!(config.source_interval_ms, 5);
        assert_eq!(config.poll_interval_ms, 20);
        assert_eq!(config.build_queue().capacity(), Some(64));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = PipelineConfig::from_toml("capacity = 8\n").unwrap();
        assert_eq!(config.capacity, Some(8));
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let err = PipelineConfig::from_toml("poll_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = PipelineConfig::from_toml("capacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(PipelineConfig::from_toml("pool_interval_ms = 10\n").is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = PipelineConfig {
            capacity: Some(16),
            source_interval_ms: 250,
            poll_interval_ms: 50,
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn unbounded_default_roundtrips() {
        // No capacity key at all when unbounded; serialization must not
        // choke on the absent bound.
        let config = PipelineConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("capacity"));
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), config);
    }
}
