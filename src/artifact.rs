use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{DirectoryConfig, TrieConfig};
use crate::error::{Error, Result};
use crate::frozen_trie::FrozenTrie;
use crate::trie::Trie;

/// Persisted form of a frozen trie: its node count plus the packed
/// directory and trie strings.
///
/// The alphabet and directory block sizes are not stored, so a reader has
/// to supply the same [`TrieConfig`] the artifact was built with.
///
/// # Examples
///
/// ```
/// # use succinct_trie::{Artifact, Trie, TrieConfig};
/// let mut trie = Trie::new();
/// trie.insert("hello").unwrap();
/// let config = TrieConfig::default();
///
/// let json = Artifact::build(&trie, &config.directory).unwrap().to_json().unwrap();
/// let frozen = Artifact::from_json(&json).unwrap().freeze(&config).unwrap();
/// assert!(frozen.lookup("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Artifact {
    pub node_count: u64,
    pub directory: String,
    pub trie: String,
}

impl Artifact {
    /// Encodes `trie` and its directory.
    pub fn build(trie: &Trie, config: &DirectoryConfig) -> Result<Self> {
        let frozen = trie.freeze(*config)?;
        Ok(Self::from(&frozen))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses an artifact, rejecting missing or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Malformed(e.to_string()))
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                Error::Io(e.into())
            } else {
                Error::Malformed(e.to_string())
            }
        })
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Decodes the artifact into a queryable trie.
    ///
    /// Every inconsistency, including characters outside the packing
    /// table, is reported as [`Error::Malformed`].
    pub fn freeze(&self, config: &TrieConfig) -> Result<FrozenTrie> {
        let frozen = FrozenTrie::from_data(&self.trie, &self.directory, self.node_count, config)
            .map_err(|e| match e {
                Error::InvalidSymbol(c) => Error::Malformed(format!("invalid symbol {c:?}")),
                e => e,
            })?;
        info!(
            nodes = self.node_count,
            trie_bits = frozen.data().len(),
            directory_bits = frozen.directory().directory().len(),
            "loaded trie"
        );
        Ok(frozen)
    }
}

impl From<&FrozenTrie> for Artifact {
    fn from(frozen: &FrozenTrie) -> Self {
        Artifact {
            node_count: frozen.node_count(),
            directory: frozen.directory().get_data(),
            trie: frozen.data().get_data(),
        }
    }
}
