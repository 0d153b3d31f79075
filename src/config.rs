//! Configuration for the isdataat keyword.
//!
//! [`KeywordConfig`] holds the accepted offset bounds used at parse time.
//! [`ParallelConfig`] decides when batch evaluation fans out across threads.
//! [`EngineConfig`] groups both and can be loaded from YAML.
//!
//! # Examples
//!
//! ```rust
//! use isdataat::EngineConfig;
//!
//! let config = EngineConfig::from_yaml_str(
//!     r#"
//! keyword:
//!   max_offset: 1500
//! parallel:
//!   min_batch_size_for_parallelism: 64
//! "#,
//! )?;
//! assert_eq!(config.keyword.max_offset, 1500);
//! assert_eq!(config.keyword.min_offset, 0);
//! # Ok::<(), isdataat::IsdataatError>(())
//! ```

use crate::criterion::{ISDATAAT_MAX, ISDATAAT_MIN};
use crate::error::{IsdataatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Offset bounds enforced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Smallest accepted offset.
    ///
    /// **Default**: 0
    pub min_offset: u32,

    /// Largest accepted offset.
    ///
    /// **Default**: 65535
    pub max_offset: u32,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_offset: ISDATAAT_MIN,
            max_offset: ISDATAAT_MAX,
        }
    }
}

impl KeywordConfig {
    /// Create bounds accepting offsets in `[min_offset, max_offset]`.
    pub fn new(min_offset: u32, max_offset: u32) -> Self {
        Self {
            min_offset,
            max_offset,
        }
    }

    /// Whether `offset` lies within the bounds, inclusive at both ends.
    pub fn contains(&self, offset: u64) -> bool {
        offset >= u64::from(self.min_offset) && offset <= u64::from(self.max_offset)
    }

    /// Reject bounds where `min_offset` exceeds `max_offset`.
    pub fn validate(&self) -> Result<()> {
        if self.min_offset > self.max_offset {
            return Err(IsdataatError::ConfigError(format!(
                "min_offset {} exceeds max_offset {}",
                self.min_offset, self.max_offset
            )));
        }
        Ok(())
    }
}

/// Configuration for parallel batch evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Allow batches to be split across the rayon thread pool.
    pub enable_parallelism: bool,
    /// Minimum batch size to enable parallel processing.
    pub min_batch_size_for_parallelism: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enable_parallelism: true,
            min_batch_size_for_parallelism: 256,
        }
    }
}

impl ParallelConfig {
    /// Whether a batch of `batch_size` buffers should be evaluated in parallel.
    pub fn should_parallelize(&self, batch_size: usize) -> bool {
        self.enable_parallelism
            && rayon::current_num_threads() > 1
            && batch_size >= self.min_batch_size_for_parallelism
    }
}

/// Top-level configuration.
///
/// # Example
/// ```rust
/// use isdataat::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_offset_bounds(0, 1500)
///     .with_parallelism(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parse-time offset bounds
    pub keyword: KeywordConfig,
    /// Batch evaluation settings
    pub parallel: ParallelConfig,
}

impl EngineConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for development and debugging.
    ///
    /// Everything runs on the calling thread so traces stay in order.
    pub fn development() -> Self {
        Self {
            parallel: ParallelConfig {
                enable_parallelism: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create a configuration optimized for high-throughput processing.
    pub fn high_throughput() -> Self {
        Self {
            parallel: ParallelConfig {
                enable_parallelism: true,
                min_batch_size_for_parallelism: 64,
            },
            ..Default::default()
        }
    }

    /// Set the offset bounds enforced at parse time.
    pub fn with_offset_bounds(mut self, min_offset: u32, max_offset: u32) -> Self {
        self.keyword = KeywordConfig::new(min_offset, max_offset);
        self
    }

    /// Enable or disable parallel batch evaluation.
    pub fn with_parallelism(mut self, enable: bool) -> Self {
        self.parallel.enable_parallelism = enable;
        self
    }

    /// Set the minimum batch size for parallel evaluation.
    pub fn with_min_parallel_batch(mut self, size: usize) -> Self {
        self.parallel.min_batch_size_for_parallelism = size;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.keyword.validate()
    }

    /// Parse and validate a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_config_defaults() {
        let config = KeywordConfig::default();
        assert_eq!(config.min_offset, 0);
        assert_eq!(config.max_offset, 65535);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_keyword_config_contains() {
        let config = KeywordConfig::new(10, 20);
        assert!(!config.contains(9));
        assert!(config.contains(10));
        assert!(config.contains(20));
        assert!(!config.contains(21));
        assert!(!config.contains(9_999_999_999));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = KeywordConfig::new(100, 10);
        match config.validate() {
            Err(IsdataatError::ConfigError(msg)) => assert!(msg.contains("min_offset 100")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_presets() {
        assert!(!EngineConfig::development().parallel.enable_parallelism);
        assert_eq!(
            EngineConfig::high_throughput()
                .parallel
                .min_batch_size_for_parallelism,
            64
        );
        assert_eq!(EngineConfig::new(), EngineConfig::default());
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_offset_bounds(5, 500)
            .with_parallelism(false)
            .with_min_parallel_batch(8);
        assert_eq!(config.keyword, KeywordConfig::new(5, 500));
        assert!(!config.parallel.enable_parallelism);
        assert_eq!(config.parallel.min_batch_size_for_parallelism, 8);
    }

    #[test]
    fn test_should_parallelize_respects_switch_and_threshold() {
        let config = ParallelConfig {
            enable_parallelism: false,
            min_batch_size_for_parallelism: 1,
        };
        assert!(!config.should_parallelize(1000));

        let config = ParallelConfig {
            enable_parallelism: true,
            min_batch_size_for_parallelism: 100,
        };
        assert!(!config.should_parallelize(99));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = EngineConfig::from_yaml_str("keyword:\n  max_offset: 1500\n").unwrap();
        assert_eq!(config.keyword.min_offset, 0);
        assert_eq!(config.keyword.max_offset, 1500);
        assert_eq!(config.parallel, ParallelConfig::default());
    }

    #[test]
    fn test_from_yaml_invalid_bounds() {
        let result = EngineConfig::from_yaml_str("keyword:\n  min_offset: 10\n  max_offset: 1\n");
        assert!(matches!(result, Err(IsdataatError::ConfigError(_))));
    }

    #[test]
    fn test_from_yaml_syntax_error() {
        let result = EngineConfig::from_yaml_str("keyword: [");
        assert!(matches!(result, Err(IsdataatError::YamlError(_))));
    }
}
