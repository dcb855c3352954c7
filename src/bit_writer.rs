use crate::bit_array::BitArray;
use crate::bit_string::BitString;
use crate::fid_iter::debug_string;
use crate::symbols;

/// Append-only bit sink for the encoder side.
///
/// Bits are written most significant first and read back with
/// [`BitString`] in the same order.
///
/// # Examples
///
/// ```
/// # use succinct_trie::BitWriter;
/// let mut bw = BitWriter::new();
/// bw.write(3, 2);
/// bw.write(0, 3);
/// bw.write(2, 2);
/// assert_eq!(bw.len(), 7);
/// assert_eq!(bw.get_data(), "xA");
/// ```
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct BitWriter {
    bits: BitArray,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: u64) -> Self {
        BitWriter {
            bits: BitArray::with_capacity(capacity),
        }
    }

    /// Appends the low `num_bits` bits of `value`, most significant first.
    ///
    /// Bits of `value` above `num_bits` are masked off. Widths above 64 are
    /// written as leading zeros followed by all 64 bits of `value`.
    pub fn write(&mut self, value: u64, num_bits: u32) {
        let mut num_bits = num_bits as u64;
        while num_bits > 64 {
            let pad = (num_bits - 64).min(64);
            self.bits.push_bits(0, pad);
            num_bits -= pad;
        }
        self.bits.push_bits(value, num_bits);
    }

    /// Number of bits written so far.
    pub fn len(&self) -> u64 {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bits packed into the 64-symbol alphabet, zero-padding the
    /// last symbol.
    pub fn get_data(&self) -> String {
        symbols::encode(&self.bits, self.bits.len())
    }

    /// Returns the written bits as `0`/`1` text, grouped for reading.
    pub fn debug_string(&self, group: usize) -> String {
        debug_string(&self.bits, group)
    }

    /// Freezes the written bits into a [`BitString`].
    ///
    /// The result is padded to whole symbols, exactly as if it had been
    /// decoded from [`get_data`](BitWriter::get_data).
    pub fn to_bit_string(&self) -> BitString {
        let mut bits = self.bits.clone();
        let padded = bits.len().div_ceil(symbols::SYMBOL_BITS) * symbols::SYMBOL_BITS;
        bits.resize(padded, false);
        bits.shrink_to_fit();
        BitString::from_bits(bits)
    }
}
