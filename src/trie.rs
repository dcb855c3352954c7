use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::bit_string::BitString;
use crate::bit_writer::BitWriter;
use crate::config::DirectoryConfig;
use crate::error::Result;
use crate::frozen_trie::FrozenTrie;
use crate::rank_directory::RankDirectory;

type NodeId = u32;

const ROOT: NodeId = 0;

/// Mutable ordinal tree used to build the encoded trie.
///
/// Nodes live in flat per-field arrays indexed by id; the root is id 0 and
/// counts toward [`node_count`](Trie::node_count). Each node's children are
/// kept sorted by label code, so words may be inserted in any order.
/// Sorted input is still fastest: the path of the previous word is cached
/// and shared prefixes are not walked again.
///
/// # Examples
///
/// ```
/// # use succinct_trie::{DirectoryConfig, Trie};
/// let mut trie = Trie::new();
/// for word in ["apple", "apply", "ape"] {
///     trie.insert(word).unwrap();
/// }
/// assert_eq!(trie.node_count(), 8);
///
/// let frozen = trie.freeze(DirectoryConfig::default()).unwrap();
/// assert!(frozen.lookup("apply"));
/// assert!(!frozen.lookup("app"));
/// ```
#[derive(Debug, Clone)]
pub struct Trie {
    alphabet: Alphabet,
    labels: Vec<u32>,
    terminal: Vec<bool>,
    children: Vec<Vec<NodeId>>,
    previous: Vec<u32>,
    path: Vec<NodeId>,
}

impl Trie {
    /// Constructs an empty trie over the default alphabet.
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::default())
    }

    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Trie {
            alphabet,
            labels: vec![0],
            terminal: vec![false],
            children: vec![Vec::new()],
            previous: Vec::new(),
            path: vec![ROOT],
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> u64 {
        self.labels.len() as u64
    }

    /// Inserts `word`, creating nodes along its path as needed.
    ///
    /// Fails with [`Error::UnknownCharacter`](crate::Error::UnknownCharacter)
    /// if `word` uses a character outside the alphabet; the trie is left
    /// unchanged in that case.
    pub fn insert(&mut self, word: &str) -> Result<()> {
        let codes = self.alphabet.encode(word)?;

        let common = self
            .previous
            .iter()
            .zip(&codes)
            .take_while(|(a, b)| a == b)
            .count();
        self.path.truncate(common + 1);
        let mut node = self.path[common];

        for &code in &codes[common..] {
            let siblings = &self.children[node as usize];
            node = match siblings.binary_search_by_key(&code, |&c| self.labels[c as usize]) {
                Ok(i) => siblings[i],
                Err(i) => {
                    let child = self.labels.len() as NodeId;
                    self.labels.push(code);
                    self.terminal.push(false);
                    self.children.push(Vec::new());
                    self.children[node as usize].insert(i, child);
                    child
                }
            };
            self.path.push(node);
        }

        self.terminal[node as usize] = true;
        self.previous = codes;
        Ok(())
    }

    /// Whether `word` was inserted.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = ROOT;
        for c in word.chars() {
            let Some(code) = self.alphabet.code(c) else {
                return false;
            };
            let siblings = &self.children[node as usize];
            match siblings.binary_search_by_key(&code, |&c| self.labels[c as usize]) {
                Ok(i) => node = siblings[i],
                Err(_) => return false,
            }
        }
        self.terminal[node as usize]
    }

    /// Node ids in level order, siblings by ascending label.
    fn level_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.labels.len());
        order.push(ROOT);
        let mut i = 0;
        while i < order.len() {
            order.extend_from_slice(&self.children[order[i] as usize]);
            i += 1;
        }
        order
    }

    /// Serializes the trie in level order.
    ///
    /// The first `2N + 1` bits are the structural streams: a sentinel
    /// has-children bit for the virtual parent of the root, then per node
    /// its last-sibling bit and its has-children bit. Per-node payloads
    /// follow, each an end-of-word bit and a label code.
    pub fn encode(&self) -> BitString {
        let order = self.level_order();
        let node_bits = self.alphabet.node_bits();
        let label_bits = self.alphabet.label_bits();
        let n = order.len() as u64;

        let mut last_sibling = vec![false; order.len()];
        last_sibling[ROOT as usize] = true;
        for children in &self.children {
            if let Some(&last) = children.last() {
                last_sibling[last as usize] = true;
            }
        }

        let mut bits = BitWriter::with_capacity(2 * n + 1 + n * node_bits as u64);
        bits.write(1, 1);
        for &id in &order {
            bits.write(last_sibling[id as usize] as u64, 1);
            bits.write(!self.children[id as usize].is_empty() as u64, 1);
        }
        for &id in &order {
            let label = if id == ROOT { 0 } else { self.labels[id as usize] };
            let value = ((self.terminal[id as usize] as u64) << label_bits) | label as u64;
            bits.write(value, node_bits);
        }

        debug!(nodes = n, bits = bits.len(), "encoded trie");
        bits.to_bit_string()
    }

    /// Encodes the trie and builds a [`FrozenTrie`] over it.
    pub fn freeze(&self, config: DirectoryConfig) -> Result<FrozenTrie> {
        let data = Arc::new(self.encode());
        let n = self.node_count();
        let directory = RankDirectory::create(data, 2 * n + 1, config.l1, config.l2)?;
        FrozenTrie::new(directory, n, self.alphabet.clone())
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const SORTED: &[&str] = &["alphapha", "apple", "hello", "jello", "lamp", "orange", "quiz"];
    const UNSORTED: &[&str] = &["apple", "orange", "alphapha", "lamp", "hello", "jello", "quiz"];

    fn build(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word).unwrap();
        }
        trie
    }

    #[test]
    fn counts_nodes_with_root() {
        assert_eq!(Trie::new().node_count(), 1);
        assert_eq!(build(SORTED).node_count(), 37);
        assert_eq!(build(UNSORTED).node_count(), 37);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        assert_eq!(build(SORTED).encode(), build(UNSORTED).encode());
    }

    #[test]
    fn encode_is_deterministic() {
        assert_eq!(build(SORTED).encode().get_data(), build(SORTED).encode().get_data());
    }

    #[test]
    fn encoded_length() {
        let trie = build(SORTED);
        let bits = 2 * 37 + 1 + 37 * 6;
        assert_eq!(trie.encode().len(), (bits as u64).div_ceil(6) * 6);
    }

    #[test]
    fn structural_bits_of_small_trie() {
        // root -> a -> {b, c}; "ab" and "ac" are words.
        let mut trie = Trie::with_alphabet(Alphabet::new("abc").unwrap());
        trie.insert("ac").unwrap();
        trie.insert("ab").unwrap();
        let encoded = trie.encode();
        // sentinel, then (last sibling, has children) for root, a, b, c
        assert_eq!(&encoded.debug_string(0)[..9], "111110010");
        // payloads: (final, label) of 3 bits each
        let payload = 9;
        assert_eq!(encoded.get(payload, 3), 0b000);
        assert_eq!(encoded.get(payload + 3, 3), 0b000);
        assert_eq!(encoded.get(payload + 6, 3), 0b101);
        assert_eq!(encoded.get(payload + 9, 3), 0b110);
    }

    #[test]
    fn contains_inserted_words() {
        let trie = build(UNSORTED);
        for word in SORTED {
            assert!(trie.contains(word));
        }
        for word in ["", "a", "alp", "app", "applea", "zzz", "Apple"] {
            assert!(!trie.contains(word));
        }
    }

    #[test]
    fn unknown_character_leaves_trie_unchanged() {
        let mut trie = build(SORTED);
        let before = trie.encode();
        assert!(matches!(
            trie.insert("apple pie!"),
            Err(Error::UnknownCharacter('!'))
        ));
        assert_eq!(trie.node_count(), 37);
        assert_eq!(trie.encode(), before);
        trie.insert("quizzes").unwrap();
        assert!(trie.contains("quizzes"));
    }

    #[test]
    fn empty_word_marks_root() {
        let mut trie = build(&["a"]);
        assert!(!trie.contains(""));
        trie.insert("").unwrap();
        assert!(trie.contains(""));
        assert_eq!(trie.node_count(), 2);
    }

    #[test]
    fn repeated_and_prefix_words() {
        let trie = build(&["car", "car", "cart", "ca"]);
        assert_eq!(trie.node_count(), 5);
        assert!(trie.contains("ca"));
        assert!(trie.contains("car"));
        assert!(trie.contains("cart"));
        assert!(!trie.contains("c"));
    }
}
