//! Iterator implementations for `QuickFilter`.

use core::iter::FusedIterator;

use crate::{
    QuickFilter,
    storage::{self, WORD_BITS},
};

/// An ascending iterator over the set indices of a [`QuickFilter`].
///
/// Created by [`QuickFilter::iter`]. It keeps a working copy of the current
/// word with the already-yielded bits cleared; each step isolates the lowest
/// remaining bit, and exhausted words are skipped as a whole. Yielding an
/// index is O(1) amortized, as is skipping an empty run of 64 indices.
///
/// Besides [`Iterator`], it offers a cursor interface for loops that read
/// the current position before stepping:
///
/// ```
/// use quickfilter::QuickFilter;
///
/// let filter = QuickFilter::from_fn(16, |i| i % 5 == 0);
/// let mut it = filter.iter();
/// while !it.is_done() {
///     assert_eq!(it.value() % 5, 0);
///     it.advance();
/// }
/// ```
///
/// The iterator borrows the filter's words, so the filter cannot be mutated
/// while an iterator over it is alive. It is forward-only: once done it stays
/// done, and a fresh pass needs a new call to [`QuickFilter::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [u64],
    /// Index of the word loaded into `word`.
    wi: usize,
    /// Bits of `words[wi]` after the current value.
    word: u64,
    value: Option<usize>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(words: &'a [u64]) -> Self {
        let mut it = Self {
            words,
            wi: 0,
            word: words.first().copied().unwrap_or(0),
            value: None,
        };
        it.seek();
        it
    }

    /// Moves `value` to the lowest bit left in the working word, loading
    /// the next nonzero word first when the working word is exhausted.
    #[inline]
    fn seek(&mut self) {
        while self.word == 0 {
            self.wi += 1;
            match self.words.get(self.wi) {
                Some(&word) => self.word = word,
                None => {
                    self.value = None;
                    return;
                }
            }
        }

        let low = self.word & self.word.wrapping_neg();
        self.value = Some(self.wi * WORD_BITS + low.trailing_zeros() as usize);
        self.word ^= low;
    }

    /// Returns `true` once every set index has been visited.
    #[must_use]
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.value.is_none()
    }

    /// Returns the index under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the iterator [`is_done`](Self::is_done).
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn value(&self) -> usize {
        match self.value {
            Some(value) => value,
            None => panic!("value() called on an exhausted quickfilter iterator"),
        }
    }

    /// Returns the index under the cursor, or `None` when done.
    #[must_use]
    #[inline]
    pub const fn peek(&self) -> Option<usize> {
        self.value
    }

    /// Moves the cursor to the next set index in ascending order.
    ///
    /// Advancing a finished iterator does nothing.
    #[inline]
    pub fn advance(&mut self) -> &mut Self {
        if self.value.is_some() {
            self.seek();
        }
        self
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value?;
        self.seek();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        let Some(_) = self.value else {
            return 0;
        };
        let rest = self.words.get(self.wi + 1..).unwrap_or_default();
        1 + self.word.count_ones() as usize + storage::popcount(rest)
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a QuickFilter {
    type IntoIter = Iter<'a>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator that selects elements from another iterator at the set
/// indices of a filter.
///
/// Created by [`QuickFilter::select`]. Elements between two set indices are
/// skipped with [`Iterator::nth`], so slice iterators jump directly to the
/// next selected element.
///
/// # Examples
///
/// ```
/// use quickfilter::QuickFilter;
///
/// let scores = [40, 95, 71, 88, 12];
/// let passing = QuickFilter::from_slice(&scores, |&s| s >= 70);
///
/// let selected: Vec<_> = passing.select(scores).collect();
/// assert_eq!(selected, [95, 71, 88]);
/// ```
pub struct SelectIter<'a, I> {
    positions: Iter<'a>,
    next: usize,
    it: I,
}

impl<'a, I: Iterator> SelectIter<'a, I> {
    /// Creates a `SelectIter` that filters `it` by the set indices of
    /// `filter`.
    pub fn new(filter: &'a QuickFilter, it: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            positions: filter.iter(),
            next: 0,
            it: it.into_iter(),
        }
    }
}

impl<I: Iterator> Iterator for SelectIter<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.positions.next()?;
        let skip = pos - self.next;
        self.next = pos + 1;
        match self.it.nth(skip) {
            Some(item) => Some(item),
            None => {
                // Source shorter than the filter; nothing further can match.
                self.positions = Iter::new(&[]);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (omin, omax) = self.it.size_hint();
        let limit = self.positions.len();
        (omin.min(limit), omax.map(|omax| omax.min(limit)))
    }
}

impl<I: FusedIterator> FusedIterator for SelectIter<'_, I> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_empty_words() {
        let it = Iter::new(&[]);
        assert!(it.is_done());
        assert_eq!(it.len(), 0);
    }

    #[test]
    fn test_skips_zero_words() {
        let words = [0, 0, 1 << 63, 0, 0b101];
        let got: Vec<_> = Iter::new(&words).collect();
        assert_eq!(got, [191, 256, 258]);
    }

    #[test]
    fn test_len_tracks_progress() {
        let words = [0b1011, 0, !0];
        let mut it = Iter::new(&words);
        assert_eq!(it.len(), 67);
        it.next();
        it.next();
        assert_eq!(it.len(), 65);
        assert_eq!(it.peek(), Some(3));
        assert_eq!(it.by_ref().count(), 65);
        assert_eq!(it.len(), 0);
    }

    #[test]
    fn test_advance_past_end_is_noop() {
        let words = [1u64];
        let mut it = Iter::new(&words);
        assert_eq!(it.value(), 0);
        it.advance().advance().advance();
        assert!(it.is_done());
        assert_eq!(it.next(), None);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_value_when_done_panics() {
        let _ = Iter::new(&[0, 0]).value();
    }

    #[test]
    fn test_select_short_source() {
        let mut filter = QuickFilter::new(10);
        filter.add(1).add(8);
        let got: Vec<_> = filter.select(0..5).collect();
        assert_eq!(got, [1]);
    }
}
