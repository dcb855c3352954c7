use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::bit_array::BitArray;
use crate::error::Result;
use crate::fid::FID;
use crate::fid_iter::debug_string;
use crate::symbols;

/// Read-only random access into a packed bit-vector.
///
/// A `BitString` decoded from `n` symbols holds `6 * n` bits. Reads past the
/// end return zero bits rather than failing.
///
/// # Examples
///
/// ```
/// # use succinct_trie::BitString;
/// let bs = BitString::new("xA").unwrap();
/// assert_eq!(bs.len(), 12);
/// assert_eq!(bs.get(0, 2), 0b11);
/// assert_eq!(bs.get(5, 2), 0b10);
/// assert_eq!(bs.count(0, 12), 3);
/// assert_eq!(bs.rank(6), 3);
/// ```
#[derive(Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitString {
    bits: BitArray,
}

impl BitString {
    /// Decodes a packed bit-vector written in the 64-symbol alphabet.
    pub fn new(data: &str) -> Result<Self> {
        Ok(BitString {
            bits: symbols::decode(data)?,
        })
    }

    pub(crate) fn from_bits(bits: BitArray) -> Self {
        BitString { bits }
    }

    /// Logical length in bits.
    pub fn len(&self) -> u64 {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the packed symbol form of the bits.
    pub fn get_data(&self) -> String {
        symbols::encode(&self.bits, self.bits.len())
    }

    /// Returns `length` bits starting at `index`, first bit most significant.
    ///
    /// Bits beyond the end read as zero.
    ///
    /// # Panics
    /// Panics if `length` is greater than 64.
    #[inline]
    pub fn get(&self, index: u64, length: u64) -> u64 {
        self.bits.get_slice(index, length)
    }

    /// Counts the set bits in `[index, index + length)`.
    ///
    /// Popcounts a 64-bit word at a time with `u64::count_ones` in place of
    /// a per-byte lookup table.
    #[inline]
    pub fn count(&self, index: u64, length: u64) -> u64 {
        self.bits.count_ones(index, length)
    }

    /// Number of set bits strictly before `index`.
    #[inline]
    pub fn rank(&self, index: u64) -> u64 {
        self.count(0, index)
    }

    /// Counts the set bits of `slots` stride-2 slots starting at bit `index`,
    /// i.e. bits `index, index + 2, ..., index + 2 * (slots - 1)`.
    pub fn count_every_other(&self, mut index: u64, mut slots: u64) -> u64 {
        // Reading 2k - 1 bits MSB first puts the wanted bits on even shifts.
        const EVEN: u64 = 0x5555_5555_5555_5555;
        let mut count = 0;
        while slots > 0 {
            let k = slots.min(32);
            let width = 2 * k - 1;
            count += (self.get(index, width) & EVEN).count_ones() as u64;
            index += 2 * k;
            slots -= k;
        }
        count
    }

    /// Returns the bits as `0`/`1` text, grouped for reading.
    pub fn debug_string(&self, group: usize) -> String {
        debug_string(self, group)
    }
}

impl FID for BitArray {
    fn len(&self) -> u64 {
        BitArray::len(self)
    }

    fn rank1(&self, i: u64) -> u64 {
        self.count_ones(0, i.min(BitArray::len(self)))
    }

    fn get(&self, i: u64) -> bool {
        self.get_bit(i)
    }

    fn get_slice(&self, i: u64, size: u64) -> u64 {
        BitArray::get_slice(self, i, size)
    }
}

impl FID for BitString {
    fn len(&self) -> u64 {
        self.bits.len()
    }

    fn rank1(&self, i: u64) -> u64 {
        self.rank(i.min(self.len()))
    }

    fn get(&self, i: u64) -> bool {
        self.bits.get_bit(i)
    }

    fn get_slice(&self, i: u64, size: u64) -> u64 {
        self.get(i, size)
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BitString")
            .field("len", &self.len())
            .field("data", &self.get_data())
            .finish()
    }
}
