use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::warn;

use crate::alphabet::Alphabet;
use crate::bit_string::BitString;
use crate::config::TrieConfig;
use crate::error::{Error, Result};
use crate::rank_directory::{RankDirectory, Stream};
use crate::symbols::SYMBOL_BITS;

/// A node of a [`FrozenTrie`], decoded on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrozenTrieNode {
    index: u64,
    letter: Option<char>,
    is_final: bool,
    first_child: u64,
    child_count: u64,
}

impl FrozenTrieNode {
    /// Level-order index; the root is 0.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The edge label leading to this node, `None` for the root.
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// Whether the path to this node spells a member word.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn child_count(&self) -> u64 {
        self.child_count
    }
}

/// Read-only succinct trie answering membership queries.
///
/// The encoded bit-vector is shared with its [`RankDirectory`], and nothing
/// is mutated after construction, so a `FrozenTrie` can be queried from many
/// threads at once.
///
/// # Examples
///
/// ```
/// # use succinct_trie::{DirectoryConfig, Trie};
/// let mut trie = Trie::new();
/// for word in ["hello", "help", "helper"] {
///     trie.insert(word).unwrap();
/// }
/// let frozen = trie.freeze(DirectoryConfig::default()).unwrap();
/// assert!(frozen.lookup("help"));
/// assert!(!frozen.lookup("hel"));
/// assert_eq!(frozen.suggest("help", 10).unwrap(), ["help", "helper"]);
/// ```
#[derive(Clone)]
pub struct FrozenTrie {
    data: Arc<BitString>,
    directory: RankDirectory,
    node_count: u64,
    alphabet: Alphabet,
    /// First payload bit; the structural streams come before it.
    letter_start: u64,
}

impl FrozenTrie {
    /// Wraps an encoded trie and the directory built over it.
    ///
    /// Fails with [`Error::Malformed`] if `node_count` is zero or the
    /// lengths of the encoded trie or the directory disagree with it.
    pub fn new(directory: RankDirectory, node_count: u64, alphabet: Alphabet) -> Result<Self> {
        if node_count == 0 {
            return Err(Error::Malformed("node count must include the root".into()));
        }
        let letter_start = 2 * node_count + 1;
        if directory.total_bits() != letter_start {
            return Err(Error::Malformed(format!(
                "directory indexes {} bits, expected {} for {} nodes",
                directory.total_bits(),
                letter_start,
                node_count
            )));
        }

        let data = directory.data().clone();
        let bits = letter_start + node_count * alphabet.node_bits() as u64;
        let padded = bits.div_ceil(SYMBOL_BITS) * SYMBOL_BITS;
        if data.len() != padded {
            return Err(Error::Malformed(format!(
                "trie holds {} bits, expected {} for {} nodes",
                data.len(),
                padded,
                node_count
            )));
        }

        Ok(FrozenTrie {
            data,
            directory,
            node_count,
            alphabet,
            letter_start,
        })
    }

    /// Rebuilds a trie from its packed trie and directory strings.
    pub fn from_data(trie: &str, directory: &str, node_count: u64, config: &TrieConfig) -> Result<Self> {
        let alphabet = config.alphabet()?;
        if node_count == 0 || node_count > trie.len() as u64 * SYMBOL_BITS {
            return Err(Error::Malformed(format!(
                "{} nodes cannot fit in {} symbols",
                node_count,
                trie.len()
            )));
        }
        let data = Arc::new(BitString::new(trie)?);
        let directory = BitString::new(directory)?;
        let directory = RankDirectory::from_parts(
            directory,
            data,
            2 * node_count + 1,
            config.directory.l1,
            config.directory.l2,
        )?;
        Self::new(directory, node_count, alphabet)
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn directory(&self) -> &RankDirectory {
        &self.directory
    }

    /// The encoded trie.
    pub fn data(&self) -> &BitString {
        &self.data
    }

    pub fn root(&self) -> Result<FrozenTrieNode> {
        self.node(0)
    }

    /// Decodes the node at level-order `index`.
    pub fn node(&self, index: u64) -> Result<FrozenTrieNode> {
        if index >= self.node_count {
            return Err(Error::NodeOutOfRange {
                index,
                nodes: self.node_count,
            });
        }

        let p = self.letter_start + index * self.alphabet.node_bits() as u64;
        let is_final = self.data.get(p, 1) == 1;
        let letter = if index == 0 {
            None
        } else {
            let label = self.label(index);
            let letter = self.alphabet.char(label).ok_or_else(|| {
                Error::Malformed(format!("node {index} has unknown label code {label}"))
            })?;
            Some(letter)
        };

        let (first_child, child_count) = self.child_range(index)?;
        Ok(FrozenTrieNode {
            index,
            letter,
            is_final,
            first_child,
            child_count,
        })
    }

    /// Label code of node `index`, read without decoding the node.
    #[inline]
    fn label(&self, index: u64) -> u32 {
        let p = self.letter_start + index * self.alphabet.node_bits() as u64 + 1;
        self.data.get(p, self.alphabet.label_bits() as u64) as u32
    }

    /// First child and number of children of node `index`.
    fn child_range(&self, index: u64) -> Result<(u64, u64)> {
        if self.data.get(Stream::HasChildren.bit(index + 1), 1) == 0 {
            return Ok((0, 0));
        }
        // The sentinel slot makes `r` the 1-based number of the sibling
        // group holding this node's children, counting the root's own group.
        let r = self.directory.rank(Stream::HasChildren, index + 1);
        let before = self.directory.select(Stream::LastSibling, r)?;
        let last = self.directory.select(Stream::LastSibling, r + 1)?;
        // Level order puts every child after its parent.
        if before < index || last < before || last >= self.node_count {
            return Err(Error::Malformed(format!(
                "node {index} has children {}..={last} out of level order",
                before + 1
            )));
        }
        Ok((before + 1, last - before))
    }

    /// The `i`-th child of `node`.
    pub fn child(&self, node: &FrozenTrieNode, i: u64) -> Result<FrozenTrieNode> {
        if i >= node.child_count {
            return Err(Error::NodeOutOfRange {
                index: i,
                nodes: node.child_count,
            });
        }
        self.node(node.first_child + i)
    }

    /// Iterates the children of `node` in label order.
    pub fn children(&self, node: &FrozenTrieNode) -> ChildIter<'_> {
        ChildIter {
            trie: self,
            next: node.first_child,
            end: node.first_child + node.child_count,
        }
    }

    /// Binary-searches the children of `node` for label `code`.
    fn find_child(&self, node: &FrozenTrieNode, code: u32) -> Result<Option<FrozenTrieNode>> {
        let (mut lo, mut hi) = (node.first_child, node.first_child + node.child_count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let label = self.label(mid);
            if label == code {
                return self.node(mid).map(Some);
            } else if label < code {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(None)
    }

    /// Walks `word` from the root, returning the node it ends on.
    pub fn find(&self, word: &str) -> Result<Option<FrozenTrieNode>> {
        let mut node = self.root()?;
        for c in word.chars() {
            let Some(code) = self.alphabet.code(c) else {
                return Ok(None);
            };
            match self.find_child(&node, code)? {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }

    /// Whether `word` is a member.
    ///
    /// Strict prefixes of members and words with characters outside the
    /// alphabet are misses.
    pub fn lookup(&self, word: &str) -> bool {
        match self.find(word) {
            Ok(node) => node.is_some_and(|n| n.is_final),
            Err(e) => {
                warn!(word, error = %e, "lookup walked into a corrupt trie");
                false
            }
        }
    }

    /// Up to `limit` members starting with `prefix`, shortest first and
    /// then in label order.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let mut result = Vec::new();
        if limit == 0 {
            return Ok(result);
        }
        let Some(start) = self.find(prefix)? else {
            return Ok(result);
        };

        let mut level = VecDeque::from([(start, prefix.to_string())]);
        let mut visited = 0;
        while let Some((node, word)) = level.pop_front() {
            // A tree reaches each node once; more visits mean shared children.
            visited += 1;
            if visited > self.node_count {
                return Err(Error::Malformed("sibling groups overlap".into()));
            }
            if node.is_final {
                result.push(word.clone());
                if result.len() == limit {
                    break;
                }
            }
            for child in self.children(&node) {
                let child = child?;
                let mut next = word.clone();
                next.extend(child.letter);
                level.push_back((child, next));
            }
        }
        Ok(result)
    }
}

impl fmt::Debug for FrozenTrie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FrozenTrie")
            .field("node_count", &self.node_count)
            .field("alphabet", &self.alphabet)
            .field("data_bits", &self.data.len())
            .field("directory", &self.directory)
            .finish()
    }
}

/// Children of a [`FrozenTrieNode`], in label order.
#[derive(Debug, Clone)]
pub struct ChildIter<'a> {
    trie: &'a FrozenTrie,
    next: u64,
    end: u64,
}

impl Iterator for ChildIter<'_> {
    type Item = Result<FrozenTrieNode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let node = self.trie.node(self.next);
        self.next += 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = (self.end - self.next).try_into().unwrap_or(usize::MAX);
        (size, Some(size))
    }
}

impl ExactSizeIterator for ChildIter<'_> {}

impl FusedIterator for ChildIter<'_> {}

#[cfg(test)]
mod tests {
    extern crate rand;
    use self::rand::{Rng, SeedableRng, StdRng};
    use super::*;
    use crate::config::DirectoryConfig;
    use crate::Trie;

    const WORDS: &[&str] = &["apple", "orange", "alphapha", "lamp", "hello", "jello", "quiz"];

    fn freeze(words: &[&str], config: DirectoryConfig) -> FrozenTrie {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word).unwrap();
        }
        trie.freeze(config).unwrap()
    }

    fn random_words(rng: &mut StdRng, n: usize, alphabet: &[char]) -> Vec<String> {
        let mut words: Vec<String> = (0..n)
            .map(|_| {
                let len = rng.gen_range(1, 12);
                (0..len)
                    .map(|_| alphabet[rng.gen_range(0, alphabet.len())])
                    .collect()
            })
            .collect();
        words.sort();
        words.dedup();
        words
    }

    #[test]
    fn lookup_words() {
        let ft = freeze(WORDS, DirectoryConfig::default());
        for word in WORDS {
            assert!(ft.lookup(word), "{word}");
        }
        assert!(ft.lookup("alphapha"));
        assert!(!ft.lookup("alp"));
        assert!(!ft.lookup("app"));
        assert!(ft.lookup("orange"));
        assert!(!ft.lookup("zzz"));
        assert!(!ft.lookup("appl"));
        assert!(!ft.lookup("applea"));
        assert!(!ft.lookup("quize"));
        assert!(!ft.lookup("alphaph"));
        assert!(!ft.lookup(""));
        assert!(!ft.lookup("APPLE"));
        assert!(!ft.lookup("hello!"));
    }

    #[test]
    fn navigate_from_root() {
        let ft = freeze(WORDS, DirectoryConfig::default());
        let root = ft.root().unwrap();
        assert_eq!(root.letter(), None);
        let letters: Vec<char> = ft
            .children(&root)
            .map(|c| c.unwrap().letter().unwrap())
            .collect();
        assert_eq!(letters, ['a', 'h', 'j', 'l', 'o', 'q']);

        let a = ft.child(&root, 0).unwrap();
        assert_eq!(a.index(), 1);
        assert_eq!(a.child_count(), 2);
        assert!(ft.child(&root, 6).is_err());
        assert!(matches!(
            ft.node(37),
            Err(Error::NodeOutOfRange { index: 37, nodes: 37 })
        ));

        let leaf = ft.find("quiz").unwrap().unwrap();
        assert!(leaf.is_final());
        assert_eq!(leaf.child_count(), 0);
        assert_eq!(ft.children(&leaf).len(), 0);
    }

    #[test]
    fn single_node_trie() {
        let ft = Trie::new().freeze(DirectoryConfig::default()).unwrap();
        assert_eq!(ft.node_count(), 1);
        assert!(!ft.lookup(""));
        assert!(!ft.lookup("a"));

        let mut trie = Trie::new();
        trie.insert("").unwrap();
        let ft = trie.freeze(DirectoryConfig::default()).unwrap();
        assert!(ft.lookup(""));
        assert!(!ft.lookup("a"));
    }

    #[test]
    fn suggestions() {
        let ft = freeze(
            &["a", "ab", "abc", "abd", "b", "bar", "baz", "car"],
            DirectoryConfig::default(),
        );
        assert_eq!(ft.suggest("a", 10).unwrap(), ["a", "ab", "abc", "abd"]);
        assert_eq!(ft.suggest("ba", 10).unwrap(), ["bar", "baz"]);
        assert_eq!(ft.suggest("", 3).unwrap(), ["a", "b", "ab"]);
        assert_eq!(ft.suggest("a", 2).unwrap(), ["a", "ab"]);
        assert!(ft.suggest("a", 0).unwrap().is_empty());
        assert!(ft.suggest("x", 10).unwrap().is_empty());
        assert!(ft.suggest("carpet", 10).unwrap().is_empty());
    }

    #[test]
    fn random_membership() {
        let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz ".chars().collect();
        for &(l1, l2) in &[(8, 4), (64, 64), (1024, 32)] {
            let mut rng: StdRng = SeedableRng::from_seed([0; 32]);
            let words = random_words(&mut rng, 2000, &alphabet[..4]);
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let ft = freeze(&refs, DirectoryConfig::new(l1, l2).unwrap());

            for word in &words {
                assert!(ft.lookup(word), "{word}");
            }
            let probes = random_words(&mut rng, 2000, &alphabet[..5]);
            for probe in &probes {
                assert_eq!(ft.lookup(probe), words.binary_search(probe).is_ok(), "{probe}");
            }
            for word in &words {
                for end in 0..word.len() {
                    let prefix = &word[..end];
                    assert_eq!(ft.lookup(prefix), words.binary_search(&prefix.to_string()).is_ok());
                }
            }
        }
    }

    #[test]
    fn rejects_inconsistent_node_count() {
        let mut trie = Trie::new();
        for word in WORDS {
            trie.insert(word).unwrap();
        }
        let data = trie.encode().get_data();
        let config = TrieConfig::default();
        let directory = trie.freeze(config.directory).unwrap().directory().get_data();

        assert!(FrozenTrie::from_data(&data, &directory, 37, &config).is_ok());
        for n in [0, 36, 38, 100] {
            assert!(
                matches!(
                    FrozenTrie::from_data(&data, &directory, n, &config),
                    Err(Error::Malformed(_))
                ),
                "{n}"
            );
        }
        assert!(matches!(
            FrozenTrie::from_data(&data[1..], &directory, 37, &config),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn corrupt_symbols_are_errors_not_panics() {
        let mut trie = Trie::new();
        for word in WORDS {
            trie.insert(word).unwrap();
        }
        let n = trie.node_count();
        let data = trie.encode().get_data();

        for (l1, l2) in [(4, 2), (8, 4), (1024, 32)] {
            let directory = DirectoryConfig::new(l1, l2).unwrap();
            let config = TrieConfig {
                directory,
                ..TrieConfig::default()
            };
            let packed = trie.freeze(directory).unwrap().directory().get_data();

            for target in 0..2 {
                let original = if target == 0 { &data } else { &packed };
                for i in 0..original.len() {
                    for &symbol in crate::symbols::SYMBOLS {
                        let mut bytes = original.clone().into_bytes();
                        bytes[i] = symbol;
                        let mutated = String::from_utf8(bytes).unwrap();
                        let (t, d) = if target == 0 {
                            (&mutated, &packed)
                        } else {
                            (&data, &mutated)
                        };
                        let Ok(ft) = FrozenTrie::from_data(t, d, n, &config) else {
                            continue;
                        };
                        for word in WORDS {
                            ft.lookup(word);
                        }
                        let _ = ft.suggest("", usize::MAX);
                        let _ = ft.suggest("a", 10);
                    }
                }
            }
        }
    }

    #[test]
    fn child_ranges_follow_level_order() {
        let ft = freeze(WORDS, DirectoryConfig::default());
        for index in 0..ft.node_count() {
            let node = ft.node(index).unwrap();
            for child in ft.children(&node) {
                assert!(child.unwrap().index() > index);
            }
        }
    }

    #[test]
    fn shared_across_threads() {
        let ft = Arc::new(freeze(WORDS, DirectoryConfig::default()));
        std::thread::scope(|s| {
            for _ in 0..4 {
                let ft = ft.clone();
                s.spawn(move || {
                    for word in WORDS {
                        assert!(ft.lookup(word));
                    }
                    assert!(!ft.lookup("alp"));
                });
            }
        });
    }
}
