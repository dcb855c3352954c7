use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::util::ceil_log2;

/// Lowercase Latin letters and space.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz ";

/// The characters words are drawn from, each mapped to a fixed-width label code.
///
/// Codes follow the order characters appear in, and sibling edges are
/// ordered by code.
///
/// # Examples
///
/// ```
/// # use succinct_trie::Alphabet;
/// let alphabet = Alphabet::new("abc").unwrap();
/// assert_eq!(alphabet.code('b'), Some(1));
/// assert_eq!(alphabet.char(2), Some('c'));
/// assert_eq!(alphabet.code('z'), None);
/// assert_eq!(alphabet.label_bits(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    codes: HashMap<char, u32>,
    label_bits: u32,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `chars`.
    ///
    /// Fails if `chars` is empty or repeats a character.
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(Error::Alphabet("alphabet is empty".into()));
        }

        let mut codes = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if codes.insert(c, i as u32).is_some() {
                return Err(Error::Alphabet(format!("duplicate character {c:?}")));
            }
        }

        let label_bits = ceil_log2(chars.len() as u64);
        Ok(Alphabet {
            chars,
            codes,
            label_bits,
        })
    }

    /// Label code of `c`, if it belongs to the alphabet.
    #[inline]
    pub fn code(&self, c: char) -> Option<u32> {
        self.codes.get(&c).copied()
    }

    /// Character carrying label code `code`.
    #[inline]
    pub fn char(&self, code: u32) -> Option<char> {
        self.chars.get(code as usize).copied()
    }

    /// Label codes of every character of `word`.
    pub fn encode(&self, word: &str) -> Result<Vec<u32>> {
        word.chars()
            .map(|c| self.code(c).ok_or(Error::UnknownCharacter(c)))
            .collect()
    }

    /// Width of a label field in bits.
    pub fn label_bits(&self) -> u32 {
        self.label_bits
    }

    /// Width of a node's payload: the end-of-word bit plus the label.
    pub fn node_bits(&self) -> u32 {
        self.label_bits + 1
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The alphabet's characters in code order.
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        match Alphabet::new(DEFAULT_ALPHABET) {
            Ok(alphabet) => alphabet,
            Err(_) => unreachable!("default alphabet is valid"),
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("chars", &self.as_string())
            .field("label_bits", &self.label_bits)
            .finish()
    }
}
