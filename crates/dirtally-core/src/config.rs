//! Tree configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default footprint of a directory entry, one filesystem block.
pub const DEFAULT_DIR_OVERHEAD: i64 = 4096;

/// Configuration for aggregation and node construction.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct TreeConfig {
    /// Bytes a directory itself occupies, added once per directory to both
    /// size and usage.
    #[builder(default = "DEFAULT_DIR_OVERHEAD")]
    #[serde(default = "default_dir_overhead")]
    pub dir_overhead: i64,

    /// Item count given to files created through the tree.
    #[builder(default = "1")]
    #[serde(default = "default_item_count")]
    pub default_item_count: u64,
}

fn default_dir_overhead() -> i64 {
    DEFAULT_DIR_OVERHEAD
}

fn default_item_count() -> u64 {
    1
}

impl TreeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(overhead) = self.dir_overhead {
            if overhead < 0 {
                return Err(format!("Directory overhead cannot be negative: {overhead}"));
            }
        }
        Ok(())
    }
}

impl TreeConfig {
    /// Create a new tree config builder.
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::default()
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            dir_overhead: DEFAULT_DIR_OVERHEAD,
            default_item_count: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TreeConfig::builder().dir_overhead(512i64).build().unwrap();

        assert_eq!(config.dir_overhead, 512);
        assert_eq!(config.default_item_count, 1);
    }

    #[test]
    fn test_config_rejects_negative_overhead() {
        let result = TreeConfig::builder().dir_overhead(-1i64).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_default() {
        let config = TreeConfig::default();
        assert_eq!(config.dir_overhead, 4096);
        assert_eq!(config, TreeConfig::builder().build().unwrap());
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: TreeConfig = serde_json::from_str(r#"{"dir_overhead": 0}"#).unwrap();
        assert_eq!(config.dir_overhead, 0);
        assert_eq!(config.default_item_count, 1);
    }
}
