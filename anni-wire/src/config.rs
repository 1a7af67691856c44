#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Limits applied while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WireConfig {
    /// Largest element count accepted from a sequence prefix.
    pub max_sequence_len: u32,
    /// Largest element count accepted for elements that occupy no bytes,
    /// such as a `Vec` of empty records. Their count cannot be checked
    /// against the remaining input.
    pub max_zero_sized_len: u32,
    /// Deepest nesting of records, the outermost record being depth 1.
    pub max_depth: usize,
}

impl WireConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_sequence_len(mut self, max: u32) -> Self {
        self.max_sequence_len = max;
        self
    }

    pub fn max_zero_sized_len(mut self, max: u32) -> Self {
        self.max_zero_sized_len = max;
        self
    }

    pub fn max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_sequence_len: u32::MAX,
            max_zero_sized_len: 1 << 16,
            max_depth: 128,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::WireConfig;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: WireConfig = toml::from_str("max_depth = 16").unwrap();
        assert_eq!(config, WireConfig::new().max_depth(16));
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = WireConfig::new().max_sequence_len(1024).max_zero_sized_len(8);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("max_sequence_len = 1024"));
        assert_eq!(toml::from_str::<WireConfig>(&text).unwrap(), config);
    }
}
