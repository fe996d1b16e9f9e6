//! Immutable, Elias-Fano-encoded sparse bit vector with O(1)-amortized rank-1.
//!
//! A column of a conserved MSA typically has very few runs relative to its
//! row count `S` (`m << N`), which is exactly the regime Elias-Fano targets:
//! the high bits of each one-position are stored unary (bucketed into a
//! prefix-count array of size `O(N/m)`), the low bits are stored packed
//! (`O(m log(N/m))` bits). `rank1` looks up the bucket in O(1) and then
//! linearly scans the handful of entries that share it.

use super::dense::BitVector;
use super::packed::PackedInts;
use crate::binary;
use crate::error::{Error, Result};

#[cfg(not(any(test, feature = "std")))]
use alloc::{string::String, vec::Vec};

/// Immutable sparse bit vector supporting `len`, `iter`, and `rank1`.
///
/// Built once from a filled [`BitVector`]; there is no mutation API. Select-1
/// is intentionally not implemented (out of scope — see the crate's design
/// notes).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseBitVector {
    len: usize,
    ones: usize,
    low_width: u32,
    low: PackedInts,
    /// `bucket_offset[h]` = number of one-bits whose high part is `< h`.
    /// Length `num_buckets + 1`.
    bucket_offset: Vec<u32>,
    num_buckets: usize,
}

impl SparseBitVector {
    /// Build from a filled dense [`BitVector`]. The source may be dropped
    /// afterwards; this makes an independent copy of the bit positions.
    pub fn build(bits: &BitVector) -> Self {
        let len = bits.len();
        let positions: Vec<usize> = bits.iter_ones().collect();
        Self::from_positions(positions, len)
    }

    /// Build directly from an ascending list of one-bit positions. Useful
    /// when the caller already has the positions and building a dense
    /// intermediate first would be wasted work.
    pub fn from_positions(positions: Vec<usize>, len: usize) -> Self {
        let ones = positions.len();
        let low_width = low_bit_width(len, ones);
        let num_buckets = if low_width >= usize::BITS {
            1
        } else {
            (len >> low_width) + 2
        };

        let mut bucket_offset = vec![0u32; num_buckets + 1];
        for &p in &positions {
            let high = bucket_of(p, low_width);
            bucket_offset[high + 1] += 1;
        }
        for h in 1..bucket_offset.len() {
            bucket_offset[h] += bucket_offset[h - 1];
        }

        let mut low = PackedInts::with_capacity(ones, low_width as u32);
        let low_mask = low_mask(low_width);
        for (k, &p) in positions.iter().enumerate() {
            low.set(k, (p & low_mask) as u64);
        }

        Self {
            len,
            ones,
            low_width: low_width as u32,
            low,
            bucket_offset,
            num_buckets,
        }
    }

    /// Length `N` of the bit vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of one-bits `m`.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.ones
    }

    /// Count of one-bits in positions `[0, i)`.
    ///
    /// # Panics
    ///
    /// Panics if `i > len()`.
    pub fn rank1(&self, i: usize) -> usize {
        assert!(i <= self.len, "rank1({i}) out of range for length {}", self.len);
        if self.ones == 0 || i == 0 {
            return 0;
        }
        if i >= self.len {
            return self.ones;
        }

        let low_width = self.low_width as usize;
        let high = bucket_of(i, low_width);
        let low_i = (i & low_mask(low_width)) as u64;

        let start = self.bucket_offset[high] as usize;
        let end = self.bucket_offset[high + 1] as usize;

        let mut count = 0usize;
        for k in start..end {
            if self.low.get(k) < low_i {
                count += 1;
            } else {
                break;
            }
        }
        start + count
    }

    /// Decode the `k`-th one-bit position (0-indexed), `k < count_ones()`.
    pub fn position(&self, k: usize) -> usize {
        assert!(k < self.ones, "position index {k} out of range for {} ones", self.ones);
        // Largest h with bucket_offset[h] <= k.
        let mut lo = 0usize;
        let mut hi = self.num_buckets;
        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            if self.bucket_offset[mid] as usize <= k {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        (lo << self.low_width) | self.low.get(k) as usize
    }

    /// Iterate every bit, in order, as a `bool`.
    pub fn iter(&self) -> SparseBitVectorIter<'_> {
        SparseBitVectorIter {
            vec: self,
            next_bit: 0,
            next_one: 0,
        }
    }

    /// Serialized footprint in bytes.
    pub fn size_in_bytes(&self) -> usize {
        core::mem::size_of::<usize>() * 2
            + 4
            + self.low.heap_size()
            + self.bucket_offset.len() * 4
    }

    /// Serialize to binary bytes (the format [`store`](Self::store) writes
    /// to disk). Exposed directly so [`SuccinctColumn`](crate::column::SuccinctColumn)
    /// can embed it without a round-trip through the filesystem.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.len as u64).to_le_bytes());
        out.extend_from_slice(&(self.ones as u64).to_le_bytes());
        out.extend_from_slice(&self.low_width.to_le_bytes());
        out.extend_from_slice(&(self.num_buckets as u64).to_le_bytes());
        out.extend_from_slice(&(self.bucket_offset.len() as u64).to_le_bytes());
        for &b in &self.bucket_offset {
            out.extend_from_slice(&b.to_le_bytes());
        }
        let low_words = binary::words_to_bytes(self.low.as_words());
        out.extend_from_slice(&(low_words.len() as u64).to_le_bytes());
        out.extend_from_slice(&low_words);
        out
    }

    /// Deserialize from the byte format written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(bytes);
        let len = cursor.read_u64("len")? as usize;
        let ones = cursor.read_u64("ones")? as usize;
        let low_width = cursor.read_u32("low_width")?;
        let num_buckets = cursor.read_u64("num_buckets")? as usize;
        let bucket_len = cursor.read_u64("bucket_offset len")? as usize;
        let mut bucket_offset = Vec::with_capacity(bucket_len);
        for _ in 0..bucket_len {
            bucket_offset.push(cursor.read_u32("bucket_offset entry")?);
        }
        let low_bytes_len = cursor.read_u64("low words len")? as usize;
        let low_bytes = cursor.read_bytes(low_bytes_len, "low words")?;
        let low_words = binary::bytes_to_words(low_bytes);
        let low = PackedInts::from_words(low_words, ones, low_width);

        Ok(Self {
            len,
            ones,
            low_width,
            low,
            bucket_offset,
            num_buckets,
        })
    }

    /// Persist to `path`, overwriting any existing file.
    #[cfg(feature = "std")]
    pub fn store(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_bytes())
            .map_err(|e| Error::persist_io(format!("writing {}", path.as_ref().display()), e))
    }

    /// Load a previously stored sparse bit vector.
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|e| Error::persist_io(format!("reading {}", path.as_ref().display()), e))?;
        Self::from_bytes(&bytes)
    }
}

/// Iterator over every bit of a [`SparseBitVector`] as `bool`, in order.
pub struct SparseBitVectorIter<'a> {
    vec: &'a SparseBitVector,
    next_bit: usize,
    next_one: usize,
}

impl<'a> Iterator for SparseBitVectorIter<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.next_bit >= self.vec.len {
            return None;
        }
        let is_one = self.next_one < self.vec.ones && self.vec.position(self.next_one) == self.next_bit;
        if is_one {
            self.next_one += 1;
        }
        self.next_bit += 1;
        Some(is_one)
    }
}

fn low_bit_width(len: usize, ones: usize) -> usize {
    if ones == 0 || len <= ones {
        return 0;
    }
    let ratio = len / ones;
    if ratio < 2 {
        0
    } else {
        (usize::BITS - 1 - ratio.leading_zeros()) as usize
    }
}

#[inline]
fn bucket_of(position: usize, low_width: usize) -> usize {
    if low_width >= usize::BITS as usize {
        0
    } else {
        position >> low_width
    }
}

#[inline]
fn low_mask(low_width: usize) -> usize {
    if low_width == 0 {
        0
    } else if low_width >= usize::BITS as usize {
        usize::MAX
    } else {
        (1usize << low_width) - 1
    }
}

struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        if self.pos + len > self.bytes.len() {
            return Err(Error::FormatInvalid {
                reason: format!("truncated sparse bit vector payload reading {field}"),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u64(&mut self, field: &str) -> Result<u64> {
        let slice = self.read_bytes(8, field)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(slice);
        Ok(u64::from_le_bytes(buf))
    }

    fn read_u32(&mut self, field: &str) -> Result<u32> {
        let slice = self.read_bytes(4, field)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(slice);
        Ok(u32::from_le_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_bools(bools: &[bool]) -> SparseBitVector {
        let mut bv = BitVector::zeroed(bools.len());
        for (i, &b) in bools.iter().enumerate() {
            if b {
                bv.set(i);
            }
        }
        SparseBitVector::build(&bv)
    }

    #[test]
    fn empty_vector() {
        let sbv = from_bools(&[]);
        assert_eq!(sbv.len(), 0);
        assert_eq!(sbv.count_ones(), 0);
        assert_eq!(sbv.rank1(0), 0);
        assert_eq!(sbv.size_in_bytes(), sbv.size_in_bytes()); // no panic
    }

    #[test]
    fn all_zero() {
        let sbv = from_bools(&[false; 10]);
        assert_eq!(sbv.count_ones(), 0);
        for i in 0..=10 {
            assert_eq!(sbv.rank1(i), 0);
        }
    }

    #[test]
    fn single_run_head() {
        // constant column, bits = 100...
        let sbv = from_bools(&[true, false, false, false]);
        assert_eq!(sbv.count_ones(), 1);
        assert_eq!(sbv.rank1(0), 0);
        assert_eq!(sbv.rank1(1), 1);
        assert_eq!(sbv.rank1(4), 1);
    }

    #[test]
    fn all_distinct() {
        // Scenario 2: bits = 111
        let sbv = from_bools(&[true, true, true]);
        assert_eq!(sbv.rank1(0), 0);
        assert_eq!(sbv.rank1(1), 1);
        assert_eq!(sbv.rank1(2), 2);
        assert_eq!(sbv.rank1(3), 3);
    }

    #[test]
    fn paired_runs() {
        // Scenario 3: bits = 1010
        let sbv = from_bools(&[true, false, true, false]);
        assert_eq!(sbv.rank1(0), 0);
        assert_eq!(sbv.rank1(1), 1);
        assert_eq!(sbv.rank1(2), 1);
        assert_eq!(sbv.rank1(3), 2);
        assert_eq!(sbv.rank1(4), 2);
    }

    #[test]
    fn rank_matches_naive_on_sparse_pattern() {
        let len = 10_000;
        let mut bv = BitVector::zeroed(len);
        let ones: Vec<usize> = (0..len).step_by(97).collect();
        for &p in &ones {
            bv.set(p);
        }
        let sbv = SparseBitVector::build(&bv);
        assert_eq!(sbv.count_ones(), ones.len());

        for i in (0..=len).step_by(13) {
            let expected = ones.iter().filter(|&&p| p < i).count();
            assert_eq!(sbv.rank1(i), expected, "mismatch at i={i}");
        }
    }

    #[test]
    fn rank_matches_naive_on_dense_pattern() {
        let bools: Vec<bool> = (0..2000).map(|i| i % 3 != 0).collect();
        let sbv = from_bools(&bools);
        let mut cum = vec![0usize; bools.len() + 1];
        for (i, &b) in bools.iter().enumerate() {
            cum[i + 1] = cum[i] + if b { 1 } else { 0 };
        }
        for i in 0..=bools.len() {
            assert_eq!(sbv.rank1(i), cum[i], "mismatch at i={i}");
        }
    }

    #[test]
    fn iter_reproduces_source_bools() {
        let bools: Vec<bool> = (0..500).map(|i| i % 7 == 0 || i == 0).collect();
        let sbv = from_bools(&bools);
        let decoded: Vec<bool> = sbv.iter().collect();
        assert_eq!(decoded, bools);
    }

    #[test]
    fn position_decodes_correctly() {
        let positions = vec![0, 5, 6, 100, 101, 102, 999];
        let sbv = SparseBitVector::from_positions(positions.clone(), 1000);
        for (k, &p) in positions.iter().enumerate() {
            assert_eq!(sbv.position(k), p);
        }
    }

    #[test]
    fn to_bytes_from_bytes_roundtrip() {
        let mut bv = BitVector::zeroed(5000);
        for p in (0..5000).step_by(31) {
            bv.set(p);
        }
        let sbv = SparseBitVector::build(&bv);
        let bytes = sbv.to_bytes();
        let restored = SparseBitVector::from_bytes(&bytes).unwrap();

        assert_eq!(restored.len(), sbv.len());
        assert_eq!(restored.count_ones(), sbv.count_ones());
        for i in (0..=5000).step_by(7) {
            assert_eq!(restored.rank1(i), sbv.rank1(i));
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn store_load_roundtrip() {
        let mut bv = BitVector::zeroed(300);
        for p in [0usize, 1, 2, 50, 51, 299] {
            bv.set(p);
        }
        let sbv = SparseBitVector::build(&bv);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("col.bits");
        sbv.store(&path).unwrap();
        let restored = SparseBitVector::load(&path).unwrap();

        for i in 0..=300 {
            assert_eq!(restored.rank1(i), sbv.rank1(i));
        }
    }
}
