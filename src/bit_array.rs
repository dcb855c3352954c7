use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::util::mask_u64;

type Block = u64;
const BLOCK_SIZE: u64 = Block::BITS as u64;

const fn bit_to_block(b: bool) -> Block {
    if b {
        !0
    } else {
        0
    }
}

/// Scale bit-length to block-length, rounded up to the next block.
const fn len_to_blocks(len: u64) -> u64 {
    len.div_ceil(BLOCK_SIZE)
}

#[macro_export]
macro_rules! bit_arr {
    () => (
        $crate::BitArray::new()
    );
    ($b:expr; $n:expr) => (
        $crate::BitArray::from_bit($b, $n)
    );
    ($($b:expr),+ $(,)?) => (
        $crate::BitArray::from([$($b),+].as_slice())
    );
}

/// Packed bits stored most-significant-bit first.
///
/// Bit `i` lives in block `i / 64` at shift `63 - i % 64`, so reading a
/// range yields the bits in the order they were appended. Bits past
/// [`len`](BitArray::len) read as zero.
#[derive(Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitArray {
    blocks: Vec<Block>,
    len: u64,
}

impl BitArray {
    /// Constructs a new, empty [`BitArray`].
    ///
    /// The array will not allocate until bits are pushed.
    pub fn new() -> Self {
        BitArray {
            blocks: Vec::new(),
            len: 0,
        }
    }

    pub fn from_bit(b: bool, len: u64) -> Self {
        let mut ba = BitArray {
            blocks: vec![bit_to_block(b); len_to_blocks(len) as usize],
            len,
        };
        ba.clear_tail();
        ba
    }

    pub fn with_capacity(capacity: u64) -> Self {
        BitArray {
            blocks: Vec::with_capacity(len_to_blocks(capacity) as usize),
            len: 0,
        }
    }

    /// Returns the number of bits in the array.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends the low `size` bits of `value`, most significant first.
    ///
    /// Bits of `value` above `size` are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut ba = succinct_trie::BitArray::new();
    /// ba.push_bits(0b101, 3);
    /// ba.push_bits(0xff_01, 4);
    /// assert_eq!(ba.len(), 7);
    /// assert_eq!(ba.get_slice(0, 7), 0b101_0001);
    /// ```
    pub fn push_bits(&mut self, value: u64, size: u64) {
        debug_assert!(size <= BLOCK_SIZE);
        if size == 0 {
            return;
        }
        let value = value & mask_u64(size);

        let p = self.len % BLOCK_SIZE;
        if p == 0 {
            self.blocks.push(0);
        }
        let free = BLOCK_SIZE - p;
        let last = self.blocks.len() - 1;
        if size <= free {
            self.blocks[last] |= value << (free - size);
        } else {
            let excess = size - free;
            self.blocks[last] |= value >> excess;
            self.blocks.push(value << (BLOCK_SIZE - excess));
        }
        self.len += size;
    }

    pub fn push(&mut self, b: bool) {
        self.push_bits(b as u64, 1);
    }

    /// Gets the bit at position `i`; positions past the end read as `false`.
    pub fn get_bit(&self, i: u64) -> bool {
        self.get_slice(i, 1) == 1
    }

    /// Gets `slice_size` bits starting at position `i`, first bit most significant.
    ///
    /// Bits past the end of the array are zero.
    ///
    /// # Panics
    /// Panics if `slice_size` is greater than 64.
    pub fn get_slice(&self, i: u64, slice_size: u64) -> u64 {
        assert!(slice_size <= BLOCK_SIZE);
        if slice_size == 0 {
            return 0;
        }

        let k = (i / BLOCK_SIZE) as usize;
        let p = i % BLOCK_SIZE;
        let first = slice_size.min(BLOCK_SIZE - p);
        let w1 = (self.block(k) << p) >> (BLOCK_SIZE - first);
        if first == slice_size {
            w1
        } else {
            let excess = slice_size - first;
            let w2 = self.block(k + 1) >> (BLOCK_SIZE - excess);
            (w1 << excess) | w2
        }
    }

    /// Gets the `i`-th word of size `word_size`.
    pub fn get_word(&self, i: u64, word_size: u64) -> u64 {
        self.get_slice(i * word_size, word_size)
    }

    /// Counts the set bits in `[i, i + size)`, a word at a time.
    pub fn count_ones(&self, mut i: u64, mut size: u64) -> u64 {
        let mut count = 0;
        while size > 0 {
            let n = size.min(BLOCK_SIZE);
            count += self.get_slice(i, n).count_ones() as u64;
            i += n;
            size -= n;
        }
        count
    }

    /// Resizes the array in-place so that `len` is equal to `new_len`.
    ///
    /// If `new_len` is greater than `len`, the array is extended by the difference, with each additional slot filled with `b`.
    /// If `new_len` is less than `len`, the array is simply truncated.
    #[cold]
    pub fn resize(&mut self, new_len: u64, b: bool) {
        if new_len > self.len {
            let p = self.len % BLOCK_SIZE;
            if b && p != 0 {
                let last = self.blocks.len() - 1;
                self.blocks[last] |= mask_u64(BLOCK_SIZE - p);
            }
        }
        self.blocks
            .resize(len_to_blocks(new_len) as usize, bit_to_block(b));
        self.len = new_len;
        self.clear_tail();
    }

    pub fn shrink_to_fit(&mut self) {
        self.blocks.shrink_to_fit();
    }

    #[inline(always)]
    fn block(&self, k: usize) -> Block {
        self.blocks.get(k).copied().unwrap_or(0)
    }

    /// Zeroes the unused low bits of the last block.
    fn clear_tail(&mut self) {
        let p = self.len % BLOCK_SIZE;
        if p != 0 {
            if let Some(last) = self.blocks.last_mut() {
                *last &= !mask_u64(BLOCK_SIZE - p);
            }
        }
    }
}

impl From<&[bool]> for BitArray {
    fn from(value: &[bool]) -> Self {
        let mut ba = Self::with_capacity(value.len() as u64);
        for &b in value {
            ba.push(b);
        }
        ba
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.blocks
            .iter()
            .map(|b| writeln!(f, "{:0w$b}", b, w = BLOCK_SIZE as usize))
            .collect()
    }
}
