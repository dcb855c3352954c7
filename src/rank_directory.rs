use std::fmt;
use std::sync::Arc;

use roxygen::*;
use tracing::debug;

use crate::bit_string::BitString;
use crate::bit_writer::BitWriter;
use crate::config::DirectoryConfig;
use crate::error::{Error, Result};
use crate::fid::FID;
use crate::symbols::SYMBOL_BITS;
use crate::util::bit_width;

/// Distance in bits between consecutive slots of one stream.
pub const STREAM_STRIDE: u64 = 2;

/// A logical bit stream interleaved into the indexed bit-vector.
///
/// Slot `p` of a stream lives at bit `p * STREAM_STRIDE + offset`, so
/// [`HasChildren`](Stream::HasChildren) owns the even bits and
/// [`LastSibling`](Stream::LastSibling) the odd ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    HasChildren = 0,
    LastSibling = 1,
}

impl Stream {
    pub const ALL: [Stream; 2] = [Stream::HasChildren, Stream::LastSibling];

    #[inline(always)]
    pub const fn offset(self) -> u64 {
        self as u64
    }

    /// Bit position of `slot` in the backing vector.
    #[inline(always)]
    pub const fn bit(self, slot: u64) -> u64 {
        slot * STREAM_STRIDE + self.offset()
    }

    /// Number of slots this stream has within the first `total_bits` bits.
    #[inline(always)]
    pub const fn slots(self, total_bits: u64) -> u64 {
        (total_bits + STREAM_STRIDE - 1 - self.offset()) / STREAM_STRIDE
    }
}

/// Where a stream's counts live inside the directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Region {
    /// First directory bit of the region.
    offset: u64,
    /// Slots of the stream.
    slots: u64,
    /// Ones in the stream.
    ones: u64,
}

/// Widths of directory entries, all derived from `(total_bits, L1, L2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    l1: u64,
    l2: u64,
    l1_bits: u64,
    l2_bits: u64,
    /// One L1 block: `L1 / L2 - 1` fine entries then a coarse one.
    section_bits: u64,
}

impl Layout {
    fn new(total_bits: u64, config: DirectoryConfig) -> Result<Self> {
        config.validate()?;
        let l1_bits = bit_width(total_bits) as u64;
        let l2_bits = bit_width(config.l1) as u64;
        Ok(Layout {
            l1: config.l1,
            l2: config.l2,
            l1_bits,
            l2_bits,
            section_bits: (config.l1 / config.l2 - 1) * l2_bits + l1_bits,
        })
    }

    fn per_section(&self) -> u64 {
        self.l1 / self.l2
    }

    /// Directory bits spent on a stream of `slots` slots.
    fn region_bits(&self, slots: u64) -> u64 {
        let full = slots / self.l2;
        (full / self.per_section()) * self.section_bits + (full % self.per_section()) * self.l2_bits
    }
}

/// Two-level rank/select index over the interleaved streams of a bit-vector.
///
/// Each stream is cut into sub-blocks of `L2` slots. After every full
/// sub-block the directory records either the stream's running total (at
/// `L1` boundaries, `l1_bits` wide) or the count since the last `L1`
/// boundary (`l2_bits` wide). The regions of both streams are stored back
/// to back, stream 0 first, in one packed [`BitString`].
///
/// Ranks count slots `[0, position)`; selects are 1-based, so
/// `rank(s, select(s, k)?) == k - 1`.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use succinct_trie::{BitString, BitWriter, RankDirectory, Stream};
/// // slots:      0   1   2   3
/// // even (HC):  1   0   1   1
/// // odd  (LS):    1   1   0   0
/// let mut bw = BitWriter::new();
/// for b in [1, 1, 0, 1, 1, 0, 1, 0] {
///     bw.write(b, 1);
/// }
/// let data = Arc::new(bw.to_bit_string());
/// let rd = RankDirectory::create(data, 8, 4, 2).unwrap();
/// assert_eq!(rd.rank(Stream::HasChildren, 3), 2);
/// assert_eq!(rd.rank(Stream::LastSibling, 3), 2);
/// assert_eq!(rd.select(Stream::HasChildren, 3).unwrap(), 3);
/// assert_eq!(rd.select(Stream::LastSibling, 2).unwrap(), 1);
/// assert!(rd.select(Stream::LastSibling, 3).is_err());
/// ```
#[derive(Clone)]
pub struct RankDirectory {
    directory: BitString,
    data: Arc<BitString>,
    total_bits: u64,
    layout: Layout,
    regions: [Region; 2],
}

impl RankDirectory {
    #[roxygen]
    /// Builds the directory by scanning `data` once.
    #[arguments_section]
    /// Fails with [`Error::Config`] unless `l1` is a non-zero multiple of a
    /// non-zero `l2`.
    pub fn create(
        /// Bit-vector holding the interleaved streams.
        data: Arc<BitString>,
        /// Number of leading bits of `data` to index.
        total_bits: u64,
        /// Slots summarized by each coarse entry.
        l1: u64,
        /// Slots summarized by each fine entry.
        l2: u64,
    ) -> Result<Self> {
        let layout = Layout::new(total_bits, DirectoryConfig { l1, l2 })?;

        let mut directory = BitWriter::new();
        for stream in Stream::ALL {
            let slots = stream.slots(total_bits);
            let (mut p, mut i) = (0, 0);
            let (mut count1, mut count2) = (0, 0);
            while p + l2 <= slots {
                count2 += data.count_every_other(stream.bit(p), l2);
                i += l2;
                p += l2;
                if i == l1 {
                    count1 += count2;
                    directory.write(count1, layout.l1_bits as u32);
                    count2 = 0;
                    i = 0;
                } else {
                    directory.write(count2, layout.l2_bits as u32);
                }
            }
        }

        debug!(
            total_bits,
            l1,
            l2,
            directory_bits = directory.len(),
            "built rank directory"
        );
        Ok(Self::assemble(directory.to_bit_string(), data, total_bits, layout))
    }

    /// Reattaches a previously built directory to the data it indexes.
    ///
    /// Fails with [`Error::Config`] on bad block sizes and with
    /// [`Error::Malformed`] when the directory's length does not match
    /// `(total_bits, l1, l2)`.
    pub fn from_parts(
        directory: BitString,
        data: Arc<BitString>,
        total_bits: u64,
        l1: u64,
        l2: u64,
    ) -> Result<Self> {
        let layout = Layout::new(total_bits, DirectoryConfig { l1, l2 })?;
        let expected = Self::encoded_len(total_bits, DirectoryConfig { l1, l2 })?;
        let padded = expected.div_ceil(SYMBOL_BITS) * SYMBOL_BITS;
        if directory.len() != padded {
            return Err(Error::Malformed(format!(
                "directory holds {} bits, expected {} for {} indexed bits",
                directory.len(),
                padded,
                total_bits
            )));
        }
        Ok(Self::assemble(directory, data, total_bits, layout))
    }

    /// Exact number of directory bits for `total_bits` indexed bits.
    pub fn encoded_len(total_bits: u64, config: DirectoryConfig) -> Result<u64> {
        let layout = Layout::new(total_bits, config)?;
        Ok(Stream::ALL
            .iter()
            .map(|s| layout.region_bits(s.slots(total_bits)))
            .sum())
    }

    fn assemble(directory: BitString, data: Arc<BitString>, total_bits: u64, layout: Layout) -> Self {
        let mut regions = [Region::default(); 2];
        let mut offset = 0;
        for stream in Stream::ALL {
            let slots = stream.slots(total_bits);
            regions[stream as usize] = Region {
                offset,
                slots,
                ones: 0,
            };
            offset += layout.region_bits(slots);
        }

        let mut rd = RankDirectory {
            directory,
            data,
            total_bits,
            layout,
            regions,
        };
        for stream in Stream::ALL {
            let slots = rd.regions[stream as usize].slots;
            rd.regions[stream as usize].ones = rd.rank(stream, slots);
        }
        rd
    }

    /// Returns the packed symbol form of the directory.
    pub fn get_data(&self) -> String {
        self.directory.get_data()
    }

    pub fn directory(&self) -> &BitString {
        &self.directory
    }

    /// The indexed bit-vector.
    pub fn data(&self) -> &Arc<BitString> {
        &self.data
    }

    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    pub fn config(&self) -> DirectoryConfig {
        DirectoryConfig {
            l1: self.layout.l1,
            l2: self.layout.l2,
        }
    }

    /// Number of slots in `stream`.
    pub fn slots(&self, stream: Stream) -> u64 {
        self.regions[stream as usize].slots
    }

    /// Number of ones in `stream`.
    pub fn ones(&self, stream: Stream) -> u64 {
        self.regions[stream as usize].ones
    }

    /// Rank/select view of a single stream.
    pub fn stream(&self, stream: Stream) -> StreamView<'_> {
        StreamView {
            directory: self,
            stream,
        }
    }

    /// Number of ones in slots `[0, position)` of `stream`.
    ///
    /// Positions past the end of the stream count the whole stream.
    pub fn rank(&self, stream: Stream, position: u64) -> u64 {
        let Layout {
            l1,
            l2,
            l1_bits,
            l2_bits,
            section_bits,
        } = self.layout;
        let region = self.regions[stream as usize];
        let x = position.min(region.slots);

        let mut rank = 0;
        let mut o = x;
        let mut section_pos = region.offset;
        if o >= l1 {
            section_pos += (o / l1) * section_bits;
            rank = self.directory.get(section_pos - l1_bits, l1_bits);
            o %= l1;
        }
        if o >= l2 {
            section_pos += (o / l2) * l2_bits;
            rank += self.directory.get(section_pos - l2_bits, l2_bits);
        }

        rank + self.data.count_every_other(stream.bit(x - x % l2), x % l2)
    }

    /// Slot of the `k`-th one (1-based) of `stream`.
    ///
    /// Fails with [`Error::SelectOutOfRange`] when `k` is zero or exceeds
    /// the ones in the stream.
    pub fn select(&self, stream: Stream, k: u64) -> Result<u64> {
        let Layout {
            l1,
            l2,
            l1_bits,
            l2_bits,
            section_bits,
        } = self.layout;
        let region = self.regions[stream as usize];
        let out_of_range = Error::SelectOutOfRange {
            k,
            total: region.ones,
        };
        if k == 0 || k > region.ones {
            return Err(out_of_range);
        }

        let per_section = self.layout.per_section();
        let full_l2 = region.slots / l2;
        let full_l1 = full_l2 / per_section;

        // Ones before coarse block `b`.
        let coarse = |b: u64| {
            if b == 0 {
                0
            } else {
                self.directory
                    .get(region.offset + b * section_bits - l1_bits, l1_bits)
            }
        };
        let b = last_below(0, full_l1, k, coarse);
        let base = coarse(b);

        // Ones in the first `j` fine blocks of coarse block `b`.
        let section = region.offset + b * section_bits;
        let fine = |j: u64| {
            if j == 0 {
                0
            } else {
                base + self.directory.get(section + (j - 1) * l2_bits, l2_bits)
            }
        };
        let fine_entries = if b < full_l1 {
            per_section - 1
        } else {
            full_l2 % per_section
        };
        let j = last_below(0, fine_entries, k, fine);

        let mut slot = b * l1 + j * l2;
        let mut remaining = k - fine(j);
        while slot < region.slots {
            let n = (region.slots - slot).min(32);
            let c = self.data.count_every_other(stream.bit(slot), n);
            if c < remaining {
                remaining -= c;
                slot += n;
                continue;
            }
            for _ in 0..n {
                if self.data.get(stream.bit(slot), 1) == 1 {
                    remaining -= 1;
                    if remaining == 0 {
                        return Ok(slot);
                    }
                }
                slot += 1;
            }
        }
        // Only reachable when the directory disagrees with the data.
        Err(out_of_range)
    }
}

/// Largest `x` in `[lo, hi]` with `f(x) < k`, given `f` is non-decreasing
/// and `f(lo) < k`.
#[inline]
fn last_below(mut lo: u64, mut hi: u64, k: u64, f: impl Fn(u64) -> u64) -> u64 {
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if f(mid) < k {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

impl fmt::Debug for RankDirectory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RankDirectory")
            .field("total_bits", &self.total_bits)
            .field("l1", &self.layout.l1)
            .field("l2", &self.layout.l2)
            .field("directory_bits", &self.directory.len())
            .field("has_children_ones", &self.ones(Stream::HasChildren))
            .field("last_sibling_ones", &self.ones(Stream::LastSibling))
            .finish()
    }
}

/// One stream of a [`RankDirectory`], seen as a plain bit-vector.
#[derive(Debug, Clone, Copy)]
pub struct StreamView<'a> {
    directory: &'a RankDirectory,
    stream: Stream,
}

impl StreamView<'_> {
    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl FID for StreamView<'_> {
    fn len(&self) -> u64 {
        self.directory.slots(self.stream)
    }

    fn rank1(&self, i: u64) -> u64 {
        self.directory.rank(self.stream, i)
    }

    fn count(&self, b: bool) -> u64 {
        let ones = self.directory.ones(self.stream);
        if b {
            ones
        } else {
            self.len() - ones
        }
    }

    fn select1(&self, k: u64) -> Result<u64> {
        self.directory.select(self.stream, k)
    }

    fn get(&self, i: u64) -> bool {
        i < self.len() && self.directory.data.get(self.stream.bit(i), 1) == 1
    }
}
