//! # succinct-msa
//!
//! Column-oriented succinct encoding of a multiple sequence alignment (MSA).
//!
//! An MSA is a matrix of single-byte symbols (`A`, `C`, `G`, `T`, `U`, `N`,
//! `-`, …) where every row has the same length `L`. This crate stores it
//! column-major: each column is a run-length-delta bit vector (one set bit
//! per run of identical symbols) plus the packed string of run-head
//! symbols, giving near-constant-time random access to any cell while
//! using far less memory than the raw matrix for the conserved columns
//! typical of real alignments.
//!
//! ## Module Organization
//!
//! - [`bits`] — bit vector primitives: [`bits::BitVector`] (mutable
//!   construction intermediate), [`bits::PackedInts`] (fixed-width packed
//!   integer array), [`bits::SparseBitVector`] (immutable Elias-Fano bit
//!   vector with O(1)-amortized `rank1`).
//! - [`column`] — [`column::SuccinctColumn`], one MSA column.
//! - [`builder`] — [`builder::ColumnBuilder`], the batched streaming
//!   constructor.
//! - [`alignment`] — [`alignment::SuccinctAlignment`], the top-level
//!   container.
//! - [`fasta`] — the FASTA/gzip record adapter (requires `std`).
//! - [`config`] — [`config::BuildConfig`].
//! - [`error`] — [`error::Error`] and [`error::Result`].
//! - [`binary`] — little-endian word/byte conversions used by the
//!   persistence format.
//!
//! ## Quick Start
//!
//! ```
//! use succinct_msa::bits::BitVector;
//! use succinct_msa::column::SuccinctColumn;
//!
//! let mut bits = BitVector::zeroed(4);
//! bits.set(0);
//! let column = SuccinctColumn::from_dense(&bits, b"A".to_vec());
//!
//! assert_eq!(column.get(3).unwrap(), b'A');
//! ```
//!
//! ## Features
//!
//! - `std` (default) — file I/O, gzip FASTA input via `flate2`, CSV
//!   diagnostics via `csv`. Disabling it (`default-features = false`)
//!   leaves the `no_std` bit vector and column primitives.
//! - `serde` — serialization of the in-memory shapes, independent of the
//!   binary on-disk persistence format.
//! - `cli` — the `succinct-msa` binary plus tar.gz archive packaging
//!   around the directory-based persistence contract.
//! - `simd` / `portable-popcount` — mutually exclusive popcount
//!   strategies, for benchmarking; the default uses `count_ones()`.
//! - `large-tests` — gate multi-million-row synthetic alignment tests.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

pub mod binary;
pub mod bits;
pub mod column;
pub mod config;
pub mod error;

pub mod builder;

#[cfg(feature = "std")]
pub mod alignment;

#[cfg(feature = "std")]
pub mod fasta;

#[cfg(feature = "std")]
pub use alignment::SuccinctAlignment;
pub use bits::{BitVector, PackedInts, SparseBitVector};
pub use builder::ColumnBuilder;
pub use column::SuccinctColumn;
pub use config::BuildConfig;
pub use error::{Error, Result};
