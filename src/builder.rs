//! Batched, row-streaming column construction.
//!
//! [`ColumnBuilder`] turns one pass over a row-record stream into `B'`
//! finished [`SuccinctColumn`]s, where `B' = min(B, L - position)`. This is
//! what keeps a full-alignment build at `O(ceil(L/B) * total_bytes)` instead
//! of the naive `O(L * total_bytes)` of building one column per pass.

use crate::bits::BitVector;
use crate::column::SuccinctColumn;
use crate::config::BuildConfig;
use crate::error::{Error, Result};

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

const CANONICAL_ALPHABET: &[u8] = b"ACGTUN-";

/// Streaming builder for one batch of `B'` consecutive columns.
///
/// Construct with [`ColumnBuilder::new`], feed every row's symbols in order
/// with [`ColumnBuilder::push_row`], then call [`ColumnBuilder::finish`] once
/// all `S` rows have been pushed.
pub struct ColumnBuilder {
    position: usize,
    width: usize,
    bits: Vec<BitVector>,
    heads: Vec<Vec<u8>>,
    prev: Vec<Option<u8>>,
    strict: bool,
    rows_pushed: usize,
}

impl ColumnBuilder {
    /// Start a new batch covering columns `[position, position + width)`.
    ///
    /// `rows` is `S`, the total number of rows that will be pushed.
    pub fn new(position: usize, width: usize, rows: usize, config: &BuildConfig) -> Self {
        Self {
            position,
            width,
            bits: (0..width).map(|_| BitVector::zeroed(rows)).collect(),
            heads: (0..width).map(|_| Vec::new()).collect(),
            prev: vec![None; width],
            strict: config.strict_alphabet,
            rows_pushed: 0,
        }
    }

    /// First column index covered by this batch.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of columns in this batch (`B'`).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Feed one row's full symbol sequence. Only
    /// `symbols[position..position + width]` is consulted; the row must be
    /// at least that long.
    pub fn push_row(&mut self, symbols: &[u8]) -> Result<()> {
        if symbols.len() < self.position + self.width {
            return Err(Error::LengthMismatch {
                record: self.rows_pushed,
                expected: self.position + self.width,
                found: symbols.len(),
            });
        }

        let i = self.rows_pushed;
        for j in 0..self.width {
            let x = symbols[self.position + j].to_ascii_uppercase();

            if self.strict && !CANONICAL_ALPHABET.contains(&x) {
                return Err(Error::SymbolNonCanonical {
                    symbol: x,
                    row: i,
                    column: self.position + j,
                });
            }

            let is_run_head = i == 0 || self.prev[j] != Some(x);
            if is_run_head {
                self.bits[j].set(i);
                self.heads[j].push(x);
                self.prev[j] = Some(x);
            }
        }

        self.rows_pushed += 1;
        Ok(())
    }

    /// Number of rows pushed so far.
    pub fn rows_pushed(&self) -> usize {
        self.rows_pushed
    }

    /// Finish the batch, converting each column's dense bit vector into its
    /// immutable sparse form. Columns are returned in ascending column
    /// order, matching the order they were allocated in.
    pub fn finish(self) -> Vec<SuccinctColumn> {
        self.bits
            .iter()
            .zip(self.heads.into_iter())
            .map(|(bits, heads)| SuccinctColumn::from_dense(bits, heads))
            .collect()
    }
}
