#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::alphabet::{Alphabet, DEFAULT_ALPHABET};
use crate::error::{Error, Result};

/// Bits summarized by each coarse (level 1) directory entry.
pub const DEFAULT_L1: u64 = 32 * 32;
/// Bits summarized by each fine (level 2) directory entry.
pub const DEFAULT_L2: u64 = 32;

/// Block sizes of a [`RankDirectory`](crate::RankDirectory).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectoryConfig {
    pub l1: u64,
    pub l2: u64,
}

impl DirectoryConfig {
    pub fn new(l1: u64, l2: u64) -> Result<Self> {
        let config = DirectoryConfig { l1, l2 };
        config.validate()?;
        Ok(config)
    }

    /// `l1` must be a non-zero multiple of a non-zero `l2`.
    pub fn validate(&self) -> Result<()> {
        if self.l1 == 0 || self.l2 == 0 || self.l1 % self.l2 != 0 {
            return Err(Error::Config {
                l1: self.l1,
                l2: self.l2,
            });
        }
        Ok(())
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        DirectoryConfig {
            l1: DEFAULT_L1,
            l2: DEFAULT_L2,
        }
    }
}

/// Everything besides the artifact itself needed to build or read a trie.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrieConfig {
    /// Characters words may contain, in label order.
    pub alphabet: String,
    pub directory: DirectoryConfig,
}

impl TrieConfig {
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::new(&self.alphabet)
    }

    pub fn validate(&self) -> Result<()> {
        self.directory.validate()?;
        self.alphabet().map(|_| ())
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig {
            alphabet: DEFAULT_ALPHABET.to_string(),
            directory: DirectoryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DirectoryConfig::default().validate().is_ok());
        assert!(TrieConfig::default().validate().is_ok());
    }

    #[test]
    fn block_sizes_must_divide() {
        for (l1, l2) in [(100, 32), (0, 32), (32, 0), (0, 0), (31, 2)] {
            assert!(matches!(
                DirectoryConfig::new(l1, l2),
                Err(Error::Config { .. })
            ));
        }
        assert!(DirectoryConfig::new(64, 64).is_ok());
        assert!(DirectoryConfig::new(96, 32).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: TrieConfig = serde_json::from_str(r#"{"alphabet": "ab"}"#).unwrap();
        assert_eq!(config.alphabet, "ab");
        assert_eq!(config.directory, DirectoryConfig::default());
    }
}
