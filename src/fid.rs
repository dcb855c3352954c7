use crate::error::{Error, Result};

/// Fully Indexable Dictionary of bits that supports rank and select operations.
///
/// Positions are 0-based and ranks exclusive: `rank1(i)` counts the ones in
/// `[0..i)`. Select is 1-based: `select1(k)` locates the `k`-th one, so
/// `rank1(select1(k)?) == k - 1`.
pub trait FID {
    /// Returns the total number of bits.
    fn len(&self) -> u64;

    /// Returns true if the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compute the number of ones in `[0..i)`.
    fn rank1(&self, i: u64) -> u64;

    /// Compute the number of zeroes in `[0..i)`.
    fn rank0(&self, i: u64) -> u64 {
        let i = i.min(self.len());
        i - self.rank1(i)
    }

    /// Compute the number of bits in `[0..i)`.
    fn rank(&self, b: bool, i: u64) -> u64 {
        if b {
            self.rank1(i)
        } else {
            self.rank0(i)
        }
    }

    /// Total number of `b` bits.
    fn count(&self, b: bool) -> u64 {
        self.rank(b, self.len())
    }

    /// Locate the position of the `k`-th `b` bit.
    ///
    /// Fails with [`Error::SelectOutOfRange`] when `k` is zero or exceeds the
    /// number of `b` bits.
    fn select(&self, b: bool, k: u64) -> Result<u64> {
        let total = self.count(b);
        if k == 0 || k > total {
            return Err(Error::SelectOutOfRange { k, total });
        }

        let (mut s, mut e) = (0, self.len());
        while s < e {
            let m = s + (e - s) / 2;
            if self.rank(b, m + 1) < k {
                s = m + 1
            } else {
                e = m
            }
        }
        Ok(s)
    }

    /// Locate the position of the `k`-th zero.
    fn select0(&self, k: u64) -> Result<u64> {
        self.select(false, k)
    }

    /// Locate the position of the `k`-th one.
    fn select1(&self, k: u64) -> Result<u64> {
        self.select(true, k)
    }

    /// Returns the `i`-th bit.
    fn get(&self, i: u64) -> bool {
        self.rank1(i + 1) - self.rank1(i) > 0
    }

    /// Gets a slice with `size` bits at position `i`, first bit most significant.
    ///
    /// # Panics
    /// * `size` is greater than 64.
    fn get_slice(&self, i: u64, size: u64) -> u64 {
        assert!(size <= 64);
        let mut bits = 0;
        for j in 0..size {
            bits = (bits << 1) | self.get(i + j) as u64;
        }
        bits
    }

    /// Gets the `i`-th word with `size` bits.
    ///
    /// # Panics
    /// * `size` is greater than 64.
    fn get_word(&self, i: u64, size: u64) -> u64 {
        self.get_slice(i * size, size)
    }
}
