//! Binary serialization utilities.
//!
//! Thin, allocation-minimal helpers for converting between `u64` words and
//! little-endian byte buffers. Used by every on-disk artifact in this crate
//! (`SparseBitVector`, `SuccinctColumn`, `SuccinctAlignment`) so the word
//! layout is defined in exactly one place.

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

/// Convert a slice of words into a little-endian byte buffer.
///
/// The output length is always `words.len() * 8`. On little-endian hosts
/// (the overwhelming majority of real targets) this is a straight
/// `bytemuck` reinterpretation with no per-byte work; big-endian hosts fall
/// back to an explicit `to_le_bytes` pass to keep the on-disk format
/// portable.
pub fn words_to_bytes(words: &[u64]) -> Vec<u8> {
    #[cfg(target_endian = "little")]
    {
        bytemuck::cast_slice::<u64, u8>(words).to_vec()
    }
    #[cfg(target_endian = "big")]
    {
        let mut bytes = Vec::with_capacity(words.len() * 8);
        for word in words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }
}

/// Convert a little-endian byte slice into a vector of words.
///
/// # Panics
///
/// Panics if `bytes.len()` is not a multiple of 8.
pub fn bytes_to_words(bytes: &[u8]) -> Vec<u64> {
    assert!(
        bytes.len() % 8 == 0,
        "byte buffer length ({}) must be a multiple of 8",
        bytes.len()
    );
    #[cfg(target_endian = "little")]
    {
        bytemuck::pod_collect_to_vec::<u8, u64>(bytes)
    }
    #[cfg(target_endian = "big")]
    {
        bytes
            .chunks_exact(8)
            .map(|chunk| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                u64::from_le_bytes(buf)
            })
            .collect()
    }
}

/// Like [`bytes_to_words`] but takes ownership of the buffer.
///
/// # Panics
///
/// Panics if `bytes.len()` is not a multiple of 8.
pub fn bytes_to_words_vec(bytes: Vec<u8>) -> Vec<u64> {
    bytes_to_words(&bytes)
}

/// Fallible variant of [`bytes_to_words`]: returns `None` instead of
/// panicking when the buffer length is not a multiple of 8.
pub fn try_bytes_to_words(bytes: &[u8]) -> Option<Vec<u64>> {
    if bytes.len() % 8 != 0 {
        return None;
    }
    Some(bytes_to_words(bytes))
}
