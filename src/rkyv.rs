//! Rkyv implementation for `QuickFilter`.
//!
//! `Archive` and `Serialize` are derived on the struct. Archive validation
//! only checks layout, so nothing here trusts the archived count or the
//! bits past the capacity: queries on the archived form read the in-domain
//! words, and deserializing re-masks the tail and recounts.

use alloc::vec::Vec;

use rkyv::{Deserialize, rancor::Fallible};

use crate::{
    QuickFilter,
    storage::{self, bitpos},
};

pub use crate::filter::{ArchivedQuickFilter, QuickFilterResolver};

impl ArchivedQuickFilter {
    /// Returns the capacity of the archived filter.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.capacity.to_native() as usize
    }

    /// Archived words inside the domain, with the tail masked off.
    ///
    /// Missing words are not padded; surplus words are skipped.
    fn domain_words(&self) -> impl Iterator<Item = u64> + '_ {
        let capacity = self.cap();
        let n = storage::word_count(capacity);
        self.words.iter().take(n).enumerate().map(move |(wi, w)| {
            let word = w.to_native();
            if wi + 1 == n {
                word & storage::tail_mask(capacity)
            } else {
                word
            }
        })
    }

    /// Returns the number of set indices below the capacity.
    ///
    /// This counts the archived words rather than reading the stored
    /// count, so it costs one pass over the words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domain_words().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no index below the capacity is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain_words().all(|w| w == 0)
    }

    /// Returns whether index `i` is set, reading the archive in place.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.cap()`.
    #[must_use]
    #[track_caller]
    pub fn has(&self, i: usize) -> bool {
        let capacity = self.cap();
        assert!(
            i < capacity,
            "index {i} out of range for filter of capacity {capacity}"
        );
        let (wi, bi) = bitpos(i);
        self.words
            .get(wi)
            .is_some_and(|w| (w.to_native() >> bi) & 1 != 0)
    }
}

impl<D: Fallible + ?Sized> Deserialize<QuickFilter, D> for ArchivedQuickFilter {
    #[inline]
    fn deserialize(&self, _deserializer: &mut D) -> Result<QuickFilter, D::Error> {
        let capacity = self.cap();
        let mut words: Vec<u64> = self.domain_words().collect();
        storage::resize(&mut words, capacity);
        let len = storage::popcount(&words);
        Ok(QuickFilter {
            capacity,
            len,
            words,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
