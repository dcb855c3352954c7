//! Succinct trie for compact word-list membership queries.
//!
//! A [`Trie`] is built from a list of words, then serialized in level order
//! into a single bit-vector of about `2 + label_bits + 1` bits per node.
//! A two-level [`RankDirectory`] over the structural part of that vector
//! supports the `rank` and `select` queries a [`FrozenTrie`] needs to move
//! from a node to its children without decompressing anything.
//!
//! Both bit-vectors pack into a URL-safe base64 string (six bits per
//! character), so a trie can be shipped as an [`Artifact`] and queried
//! directly from its packed form.
//!
//! # Basic usage
//!
//! ```
//! use succinct_trie::{DirectoryConfig, Trie};
//!
//! let mut trie = Trie::new();
//! for word in ["apple", "orange", "alphapha", "lamp", "hello", "jello", "quiz"] {
//!     trie.insert(word).unwrap();
//! }
//! assert_eq!(trie.node_count(), 37);
//!
//! let frozen = trie.freeze(DirectoryConfig::default()).unwrap();
//! assert!(frozen.lookup("alphapha"));
//! assert!(!frozen.lookup("alp"));
//! assert!(!frozen.lookup("zzz"));
//! ```
//!
//! # About implementation
//!
//! The level-order unary degree encoding and the rank directory layout
//! follow Steve Hanov's succinct data structures for JavaScript [1], with
//! the has-children and last-sibling streams interleaved in one vector.
//!
//! [1] Steve Hanov. 2011. Succinct Data Structures: Cramming 80,000 words
//! into a Javascript file.
//! [http://stevehanov.ca/blog/index.php?id=120](http://stevehanov.ca/blog/index.php?id=120)

mod alphabet;
#[cfg(feature = "serde")]
mod artifact;
mod bit_array;
mod bit_string;
mod bit_writer;
mod config;
mod error;
mod fid;
mod fid_iter;
mod frozen_trie;
mod rank_directory;
pub mod symbols;
mod trie;
mod util;

pub use crate::alphabet::{Alphabet, DEFAULT_ALPHABET};
#[cfg(feature = "serde")]
pub use crate::artifact::Artifact;
pub use crate::bit_array::BitArray;
pub use crate::bit_string::BitString;
pub use crate::bit_writer::BitWriter;
pub use crate::config::{DirectoryConfig, TrieConfig, DEFAULT_L1, DEFAULT_L2};
pub use crate::error::{Error, Result};
pub use crate::fid::FID;
pub use crate::fid_iter::FidBitIter;
pub use crate::frozen_trie::{ChildIter, FrozenTrie, FrozenTrieNode};
pub use crate::rank_directory::{RankDirectory, Stream, StreamView, STREAM_STRIDE};
pub use crate::trie::Trie;
