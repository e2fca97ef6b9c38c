//! Configuration for the engine module.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable settings for one [`ConversionEngine`](super::ConversionEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-file transformer timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Run batch items concurrently instead of one after another.
    #[serde(default)]
    pub parallel: bool,

    /// Upper bound on concurrent conversions when `parallel` is set.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Largest source file accepted, 0 disables the check.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(2)
}

fn default_max_file_size() -> u64 {
    100 * 1024 * 1024 // 100 MiB
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            parallel: false,
            max_workers: default_max_workers(),
            max_file_size_bytes: default_max_file_size(),
        }
    }
}

impl EngineConfig {
    /// Sets the per-file timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Enables bounded parallel mode with the given worker count.
    pub fn with_parallelism(mut self, max_workers: usize) -> Self {
        self.parallel = true;
        self.max_workers = max_workers;
        self
    }

    /// Sets the source size limit.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size_bytes = bytes;
        self
    }

    /// Per-file timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the values the engine cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("engine.timeout_secs must be greater than 0".to_string());
        }
        if self.max_workers == 0 {
            return Err("engine.max_workers must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.parallel);
        assert!(config.max_workers >= 2);
        assert_eq!(config.max_file_size_bytes, 104_857_600);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_timeout_secs(5)
            .with_parallelism(3)
            .with_max_file_size(0);

        assert_eq!(config.timeout_secs, 5);
        assert!(config.parallel);
        assert_eq!(config.max_workers, 3);
        assert_eq!(config.max_file_size_bytes, 0);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        assert!(EngineConfig::default().with_timeout_secs(0).validate().is_err());
        assert!(EngineConfig::default().with_parallelism(0).validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: EngineConfig = toml::from_str("parallel = true").unwrap();
        assert!(config.parallel);
        assert_eq!(config.timeout_secs, 30);
    }
}
