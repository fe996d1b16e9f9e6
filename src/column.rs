//! A single succinct MSA column: a [`SparseBitVector`] of run-head markers
//! plus the packed string of symbols at those run-heads.

use indexmap::IndexMap;

use crate::bits::{BitVector, SparseBitVector};
use crate::error::{Error, Result};

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

/// One column of a [`SuccinctAlignment`](crate::alignment::SuccinctAlignment).
///
/// `bits` has length `S` (the row count) and one set bit per run-head;
/// `heads` holds the symbol of each run in row order, so
/// `heads.len() == bits.count_ones()`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuccinctColumn {
    bits: SparseBitVector,
    heads: Vec<u8>,
}

impl SuccinctColumn {
    /// Wrap an already-built bit vector and head string.
    ///
    /// `heads.len()` must equal `bits.count_ones()`; this is a programming
    /// invariant enforced by [`ColumnBuilder`](crate::builder::ColumnBuilder),
    /// not re-validated here.
    pub fn new(bits: SparseBitVector, heads: Vec<u8>) -> Self {
        debug_assert_eq!(heads.len(), bits.count_ones());
        Self { bits, heads }
    }

    /// Build directly from a filled dense [`BitVector`] and its head string.
    pub fn from_dense(bits: &BitVector, heads: Vec<u8>) -> Self {
        Self::new(SparseBitVector::build(bits), heads)
    }

    /// Number of rows `S`.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of runs in this column.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.heads.len()
    }

    /// Read-only access to the underlying bit vector.
    pub fn bits(&self) -> &SparseBitVector {
        &self.bits
    }

    /// Read-only access to the run-head symbols, in row order.
    pub fn heads(&self) -> &[u8] {
        &self.heads
    }

    /// The symbol at `row`.
    ///
    /// `row == len() - 1` takes the fast path directly to the last run-head;
    /// otherwise the symbol is found via `rank1(row + 1) - 1`.
    pub fn get(&self, row: usize) -> Result<u8> {
        let len = self.bits.len();
        if row >= len {
            return Err(Error::IndexOutOfRange { index: row, len });
        }
        if row == len - 1 {
            return Ok(*self.heads.last().expect("len > 0 implies at least one run"));
        }
        let run_idx = self.bits.rank1(row + 1) - 1;
        Ok(self.heads[run_idx])
    }

    /// Fraction of rows carrying each symbol, rounded to `decimals`
    /// fractional digits, in first-occurrence order.
    ///
    /// Computed in one linear pass over `bits.iter()`: every set bit
    /// advances the run index `k`; the symbol `heads[k]` is credited for
    /// every row until the next run-head.
    pub fn frequency(&self, decimals: u32) -> IndexMap<u8, f64> {
        let mut counts: IndexMap<u8, usize> = IndexMap::new();
        let mut run_idx: isize = -1;
        for bit in self.bits.iter() {
            if bit {
                run_idx += 1;
            }
            let symbol = self.heads[run_idx as usize];
            *counts.entry(symbol).or_insert(0) += 1;
        }

        let len = self.bits.len() as f64;
        counts
            .into_iter()
            .map(|(symbol, count)| {
                let frac = count as f64 / len;
                (symbol, round_to_decimals(frac, decimals))
            })
            .collect()
    }

    /// Serialized footprint: the sparse bit vector plus the raw head bytes.
    pub fn size_in_bytes(&self) -> usize {
        self.bits.size_in_bytes() + self.heads.len()
    }

    /// Write the two sibling artifacts for column `index` into `dir`:
    /// `<index>_column` (the serialized bit vector) and `<index>.txt` (the
    /// raw head bytes).
    #[cfg(feature = "std")]
    pub fn store(&self, dir: impl AsRef<std::path::Path>, index: usize) -> Result<()> {
        let dir = dir.as_ref();
        let bits_path = dir.join(format!("{index}_column"));
        let heads_path = dir.join(format!("{index}.txt"));

        self.bits.store(&bits_path)?;
        std::fs::write(&heads_path, &self.heads)
            .map_err(|e| Error::persist_io(format!("writing {}", heads_path.display()), e))?;
        Ok(())
    }

    /// Load the sibling artifacts for column `index` from `dir`.
    #[cfg(feature = "std")]
    pub fn load(dir: impl AsRef<std::path::Path>, index: usize) -> Result<Self> {
        let dir = dir.as_ref();
        let bits_path = dir.join(format!("{index}_column"));
        let heads_path = dir.join(format!("{index}.txt"));

        let bits = SparseBitVector::load(&bits_path)?;
        let heads = std::fs::read(&heads_path)
            .map_err(|e| Error::persist_io(format!("reading {}", heads_path.display()), e))?;
        Ok(Self::new(bits, heads))
    }

}

/// Round `value` to `decimals` fractional digits. Uses `std`'s `powi`/`round`
/// when available; routes through `libm` otherwise so `frequency` keeps
/// working in a `no_std` build.
fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    #[cfg(any(test, feature = "std"))]
    {
        let scale = 10f64.powi(decimals as i32);
        (value * scale).round() / scale
    }
    #[cfg(not(any(test, feature = "std")))]
    {
        let scale = libm::pow(10.0, decimals as f64);
        libm::round(value * scale) / scale
    }
}
