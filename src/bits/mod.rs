//! Bit vector primitives: a mutable construction intermediate, a packed
//! fixed-width integer array, and the immutable Elias-Fano sparse bit vector
//! used by every persisted [`SuccinctColumn`](crate::column::SuccinctColumn).

mod dense;
mod packed;
mod sparse;

pub use dense::BitVector;
pub use packed::PackedInts;
pub use sparse::{SparseBitVector, SparseBitVectorIter};
