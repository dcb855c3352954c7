//! Error types for building and querying succinct tries.

use thiserror::Error;

/// Error variants for succinct trie operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Rank directory block sizes are unusable.
    #[error("invalid directory configuration: L1={l1}, L2={l2} (L1 must be a non-zero multiple of L2)")]
    Config { l1: u64, l2: u64 },

    /// A select query asked for a one that the stream does not hold.
    #[error("select out of range: requested one #{k}, stream holds {total}")]
    SelectOutOfRange { k: u64, total: u64 },

    /// A node or child index past the end of the trie.
    #[error("node {index} out of range: trie has {nodes}")]
    NodeOutOfRange { index: u64, nodes: u64 },

    /// A persisted artifact is incomplete or inconsistent with itself.
    #[error("malformed artifact: {0}")]
    Malformed(String),

    /// A packed bit-vector contained a character outside the 64-symbol table.
    #[error("invalid symbol {0:?} in packed bit-vector")]
    InvalidSymbol(char),

    /// The label alphabet could not be built.
    #[error("invalid alphabet: {0}")]
    Alphabet(String),

    /// A word contained a character that has no label code.
    #[error("character {0:?} is not in the alphabet")]
    UnknownCharacter(char),

    #[cfg(feature = "serde")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for succinct trie operations.
pub type Result<T> = std::result::Result<T, Error>;
