//! Word addressing and sizing arithmetic for the filter's bit storage.
//!
//! Bits are packed little-end first into `u64` words: index `i` lives in word
//! `i / 64` at bit `i % 64`. The last word may carry padding bits beyond the
//! logical capacity; every routine that writes whole words must finish with
//! [`mask_tail`] so those bits always read as zero.

use alloc::{collections::TryReserveError, vec::Vec};

/// Number of bits held by one storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Convert bit index to (word index, bit position within word)
#[inline(always)]
pub const fn bitpos(idx: usize) -> (usize, usize) {
    (idx >> 6, idx & 63)
}

/// Number of words needed to hold `capacity` bits.
#[inline(always)]
pub const fn word_count(capacity: usize) -> usize {
    capacity.div_ceil(WORD_BITS)
}

/// Mask of the bits of the last word that lie inside `capacity`.
///
/// Returns `!0` when `capacity` is word-aligned (including zero), since the
/// last word is then either fully used or absent.
#[inline(always)]
pub const fn tail_mask(capacity: usize) -> u64 {
    match capacity & 63 {
        0 => !0,
        rem => (1u64 << rem) - 1,
    }
}

/// Clears every bit at or beyond `capacity` in the last word.
///
/// Returns the number of set bits that were cleared, so callers maintaining
/// a cached population count can adjust it without rescanning.
///
/// # Panics
///
/// In debug builds, panics if `words.len()` is not
/// [`word_count(capacity)`](word_count).
#[inline]
pub fn mask_tail(words: &mut [u64], capacity: usize) -> usize {
    debug_assert_eq!(words.len(), word_count(capacity));
    let Some(last) = words.last_mut() else {
        return 0;
    };
    let mask = tail_mask(capacity);
    let dropped = (*last & !mask).count_ones() as usize;
    *last &= mask;
    dropped
}

/// Total number of set bits across `words`.
#[inline]
pub fn popcount(words: &[u64]) -> usize {
    words.iter().map(|w| w.count_ones() as usize).sum()
}

/// Allocates the zeroed word buffer for `capacity` bits.
#[inline]
pub(crate) fn zeroed(capacity: usize) -> Vec<u64> {
    alloc::vec![0; word_count(capacity)]
}

/// Like [`zeroed`], but reports allocation failure instead of aborting.
pub(crate) fn try_zeroed(capacity: usize) -> Result<Vec<u64>, TryReserveError> {
    let n = word_count(capacity);
    let mut words = Vec::new();
    words.try_reserve_exact(n)?;
    words.resize(n, 0);
    Ok(words)
}

/// Allocates the word buffer for `capacity` bits with every valid bit set.
pub(crate) fn filled(capacity: usize) -> Vec<u64> {
    let mut words = alloc::vec![!0; word_count(capacity)];
    mask_tail(&mut words, capacity);
    words
}

/// Resizes `words` to hold exactly `capacity` bits.
///
/// New words are zero. When shrinking, the return value is the number of set
/// bits that fell outside the new capacity (discarded words plus the bits
/// masked off the new last word).
pub(crate) fn resize(words: &mut Vec<u64>, capacity: usize) -> usize {
    let n = word_count(capacity);
    let dropped = match words.get(n..) {
        Some(discard) => popcount(discard),
        None => 0,
    };
    words.resize(n, 0);
    dropped + mask_tail(words, capacity)
}
