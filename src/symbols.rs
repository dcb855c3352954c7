//! The 64-symbol external alphabet packed bit-vectors are written in.
//!
//! Each symbol carries [`SYMBOL_BITS`] bits, most significant bit first.

use crate::bit_array::BitArray;
use crate::error::{Error, Result};

pub const SYMBOL_BITS: u64 = 6;

pub const SYMBOLS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

const INVALID: u8 = 0xff;

const DECODE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < SYMBOLS.len() {
        table[SYMBOLS[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the symbol for a 6-bit value.
#[inline]
pub fn chr(value: u64) -> char {
    SYMBOLS[(value & 0x3f) as usize] as char
}

/// Returns the 6-bit value of a symbol.
#[inline]
pub fn ord(symbol: char) -> Result<u64> {
    let code = u32::from(symbol);
    if code < 256 && DECODE[code as usize] != INVALID {
        Ok(DECODE[code as usize] as u64)
    } else {
        Err(Error::InvalidSymbol(symbol))
    }
}

/// Packs the first `len` bits of `bits` into symbols, zero-padding the last one.
pub fn encode(bits: &BitArray, len: u64) -> String {
    let n_symbols = len.div_ceil(SYMBOL_BITS);
    let mut out = String::with_capacity(n_symbols as usize);
    for i in 0..n_symbols {
        let p = i * SYMBOL_BITS;
        let size = SYMBOL_BITS.min(len - p);
        let value = bits.get_slice(p, size) << (SYMBOL_BITS - size);
        out.push(chr(value));
    }
    out
}

/// Unpacks symbols into bits. The result holds `6 * symbols` bits.
pub fn decode(data: &str) -> Result<BitArray> {
    let mut bits = BitArray::with_capacity(data.len() as u64 * SYMBOL_BITS);
    for c in data.chars() {
        bits.push_bits(ord(c)?, SYMBOL_BITS);
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_bijection() {
        for i in 0..64 {
            assert_eq!(ord(chr(i)).unwrap(), i);
        }
        assert_eq!(chr(0), 'A');
        assert_eq!(chr(63), '_');
        assert_eq!(ord('A').unwrap(), 0);
        assert_eq!(ord('_').unwrap(), 63);
    }

    #[test]
    fn rejects_foreign_symbols() {
        for c in ['=', '+', '/', ' ', 'é', '\u{1F600}'] {
            assert!(matches!(ord(c), Err(Error::InvalidSymbol(x)) if x == c));
        }
        assert!(decode("AB=C").is_err());
    }

    #[test]
    fn pads_last_symbol() {
        let mut bits = BitArray::new();
        bits.push_bits(0b11, 2);
        assert_eq!(encode(&bits, 2), "w");
        bits.push_bits(0b0001, 4);
        bits.push_bits(0b1, 1);
        assert_eq!(encode(&bits, 7), "xg");
    }

    #[test]
    fn decode_then_encode() {
        let data = "v2qqqqqqqpIUjQA5JZyBZ4ggCKh55ZZgBA5ZZd5vIEl1wx8g8A";
        let bits = decode(data).unwrap();
        assert_eq!(bits.len(), data.len() as u64 * SYMBOL_BITS);
        assert_eq!(encode(&bits, bits.len()), data);
    }
}
