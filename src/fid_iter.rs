use crate::FID;
use std::iter::FusedIterator;

const BLOCK_SIZE: u64 = 64;

/// Iterates the bits of a [`FID`] front to back, a 64-bit slice at a time.
#[derive(Debug, Clone)]
pub struct FidBitIter<'i, T: FID + ?Sized> {
    fid: &'i T,
    len: u64,
    i: u64,
    bits: u64,
    avail: u64,
}

impl<'i, T: FID + ?Sized> FidBitIter<'i, T> {
    pub fn new(fid: &'i T) -> Self {
        Self {
            fid,
            len: fid.len(),
            i: 0,
            bits: 0,
            avail: 0,
        }
    }

    #[cold]
    fn refill(&mut self) -> bool {
        let size = (self.len - self.i).min(BLOCK_SIZE);
        if size == 0 {
            return false;
        }
        // Left-align so the next bit is always the top one.
        self.bits = self.fid.get_slice(self.i, size) << (BLOCK_SIZE - size);
        self.avail = size;
        true
    }

    #[inline(always)]
    fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits >> (BLOCK_SIZE - 1);
        self.bits <<= 1;
        self.avail -= 1;
        self.i += 1;
        Some(bit != 0)
    }
}

impl<'i, T: FID + ?Sized> Iterator for FidBitIter<'i, T> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.avail == 0 && !self.refill() {
            return None;
        }
        self.next_bit()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let n = n as u64;
        if n < self.avail {
            self.bits <<= n;
            self.avail -= n;
            self.i += n;
        } else {
            self.i = (self.i + n).min(self.len);
            self.avail = 0;
        }
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = (self.len - self.i).try_into().unwrap_or(usize::MAX);
        (size, Some(size))
    }
}

impl<'i, T: FID + ?Sized> ExactSizeIterator for FidBitIter<'i, T> {}

impl<'i, T: FID + ?Sized> FusedIterator for FidBitIter<'i, T> {}

/// Renders bits as `0`/`1`, with a space after every `group` bits.
pub fn debug_string<T: FID + ?Sized>(fid: &T, group: usize) -> String {
    let mut out = String::with_capacity(fid.len() as usize);
    for (j, b) in FidBitIter::new(fid).enumerate() {
        out.push(if b { '1' } else { '0' });
        if group != 0 && (j + 1) % group == 0 {
            out.push(' ');
        }
    }
    out
}
