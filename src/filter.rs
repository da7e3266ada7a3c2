//! `QuickFilter` struct and core implementation.

use alloc::{collections::TryReserveError, vec::Vec};

use crate::{
    iter::{Iter, SelectIter},
    storage::{self, WORD_BITS, bitpos},
    traits::QuickFilterError,
};

/// A fixed-capacity set of indices in `0..cap()`, packed one bit per index.
///
/// # Overview
///
/// `QuickFilter` marks which positions of a parallel array pass some
/// predicate. Marking is O(1) per index, the number of marked indices is
/// cached so [`len`](Self::len) is O(1), and [`iter`](Self::iter) walks the
/// marked indices in ascending order by scanning whole words, skipping
/// unmarked regions 64 indices at a time.
///
/// # Capacity Model
///
/// The capacity is always chosen by the caller and is never inferred from
/// the indices that are added. Accessing an index at or beyond the capacity
/// is an error: the `try_*` methods report it as
/// [`QuickFilterError::IndexOutOfRange`] and the plain methods panic.
///
/// # Handles
///
/// Every mutating method returns `&mut Self`, so a filter pass can be
/// written as a chain. The returned reference is the same filter the method
/// was called on; methods that change the capacity resize the word buffer
/// in place.
///
/// # Examples
///
/// ```
/// use quickfilter::QuickFilter;
///
/// let data = [3, 8, 1, 12, 7, 10];
/// let mut filter = QuickFilter::new(data.len());
/// for (i, value) in data.iter().enumerate() {
///     if value % 2 == 0 {
///         filter.add(i);
///     }
/// }
///
/// assert_eq!(filter.len(), 3);
/// let evens: Vec<_> = filter.iter().map(|i| data[i]).collect();
/// assert_eq!(evens, [8, 12, 10]);
/// ```
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize))]
pub struct QuickFilter {
    pub(crate) capacity: usize,
    pub(crate) len: usize,
    pub(crate) words: Vec<u64>,
}

impl QuickFilter {
    /// Creates an empty filter over the indices `0..capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let filter = QuickFilter::new(100);
    /// assert_eq!(filter.cap(), 100);
    /// assert_eq!(filter.len(), 0);
    /// assert!(filter.iter().is_done());
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            len: 0,
            words: storage::zeroed(capacity),
        }
    }

    /// Like [`new`](Self::new), but returns an error instead of aborting
    /// when the word buffer cannot be allocated.
    ///
    /// Use this when the capacity comes from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns [`TryReserveError`] if the allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let filter = QuickFilter::try_new(1000).unwrap();
    /// assert_eq!(filter.cap(), 1000);
    /// assert!(filter.is_empty());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            capacity,
            len: 0,
            words: storage::try_zeroed(capacity)?,
        })
    }

    /// Creates a filter over `0..capacity` with every index set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let filter = QuickFilter::new_filled(10);
    /// assert_eq!(filter.len(), 10);
    /// assert!(filter.iter().eq(0..10));
    /// ```
    #[must_use]
    pub fn new_filled(capacity: usize) -> Self {
        Self {
            capacity,
            len: capacity,
            words: storage::filled(capacity),
        }
    }

    /// Creates a filter over `0..capacity` containing every index for which
    /// `f` returns `true`.
    ///
    /// The predicate is called once per index, in ascending order. Results
    /// are accumulated a word at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let filter = QuickFilter::from_fn(10, |i| i % 3 == 0);
    /// assert!(filter.iter().eq([0, 3, 6, 9]));
    /// ```
    #[must_use]
    pub fn from_fn<F>(capacity: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let mut words = storage::zeroed(capacity);
        for (wi, word) in words.iter_mut().enumerate() {
            let base = wi * WORD_BITS;
            let end = capacity.min(base + WORD_BITS);
            *word = (base..end).fold(0, |acc, i| acc | (u64::from(f(i)) << (i - base)));
        }
        let len = storage::popcount(&words);
        Self {
            capacity,
            len,
            words,
        }
    }

    /// Creates a filter sized to `items` that marks every position whose
    /// element satisfies `pred`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let names = ["ant", "bee", "cat", "bat"];
    /// let filter = QuickFilter::from_slice(&names, |name| name.ends_with('t'));
    /// assert_eq!(filter.cap(), 4);
    /// assert!(filter.iter().eq([0, 2, 3]));
    /// ```
    #[must_use]
    pub fn from_slice<T, F>(items: &[T], mut pred: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let capacity = items.len();
        let mut words = storage::zeroed(capacity);
        for (word, chunk) in words.iter_mut().zip(items.chunks(WORD_BITS)) {
            *word = chunk
                .iter()
                .enumerate()
                .fold(0, |acc, (bi, item)| acc | (u64::from(pred(item)) << bi));
        }
        let len = storage::popcount(&words);
        Self {
            capacity,
            len,
            words,
        }
    }

    /// Rebuilds a filter from its raw word representation.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::WordCountMismatch`] if `words` does not
    /// hold exactly `ceil(capacity / 64)` words, and
    /// [`QuickFilterError::TailBitsSet`] if any bit at or beyond `capacity`
    /// is set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::{QuickFilter, QuickFilterError};
    /// let filter = QuickFilter::from_words(70, vec![0b1010, 1 << 5])?;
    /// assert!(filter.iter().eq([1, 3, 69]));
    ///
    /// assert!(QuickFilter::from_words(70, vec![0, 1 << 6]).is_err());
    /// # Ok::<(), QuickFilterError>(())
    /// ```
    pub fn from_words(capacity: usize, words: Vec<u64>) -> Result<Self, QuickFilterError> {
        let expected = storage::word_count(capacity);
        if words.len() != expected {
            return Err(QuickFilterError::WordCountMismatch {
                expected,
                actual: words.len(),
            });
        }
        if let Some(&last) = words.last()
            && last & !storage::tail_mask(capacity) != 0
        {
            return Err(QuickFilterError::TailBitsSet { capacity });
        }
        let len = storage::popcount(&words);
        Ok(Self {
            capacity,
            len,
            words,
        })
    }

    /// Returns the number of indices currently set.
    ///
    /// The count is maintained by every mutation, so this never scans.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no index is set.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the index domain, exactly as last passed to a
    /// constructor or [`resize`](Self::resize).
    #[must_use]
    #[inline(always)]
    pub const fn cap(&self) -> usize {
        self.capacity
    }

    /// Get the storage as a slice of words.
    ///
    /// Bit `i % 64` of word `i / 64` holds index `i`. Padding bits past
    /// [`cap`](Self::cap) in the last word are always zero.
    #[must_use]
    #[inline(always)]
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    #[inline(always)]
    fn locate(&self, i: usize) -> Result<(usize, usize), QuickFilterError> {
        if i >= self.capacity {
            return Err(QuickFilterError::IndexOutOfRange {
                index: i,
                capacity: self.capacity,
            });
        }
        Ok(bitpos(i))
    }

    /// Sets or clears bit `i`, returning its previous value and keeping the
    /// cached count in step.
    #[inline(always)]
    fn replace_generic(&mut self, i: usize, v: impl ToBool) -> Result<bool, QuickFilterError> {
        let (idx, bp) = self.locate(i)?;
        let word = &mut self.words[idx];
        let mask = 1 << bp;

        let prev = *word;
        let was_set = (prev & mask) != 0;
        if v.to_bool() {
            *word = prev | mask;
            self.len += usize::from(!was_set);
        } else {
            *word = prev & !mask;
            self.len -= usize::from(was_set);
        }
        Ok(was_set)
    }

    /// Marks index `i`.
    ///
    /// Adding an index that is already set has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::IndexOutOfRange`] if `i >= self.cap()`;
    /// the filter is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::{QuickFilter, QuickFilterError};
    /// let mut filter = QuickFilter::new(8);
    /// filter.try_add(3)?.try_add(3)?;
    /// assert_eq!(filter.len(), 1);
    ///
    /// assert_eq!(
    ///     filter.try_add(8).unwrap_err(),
    ///     QuickFilterError::IndexOutOfRange { index: 8, capacity: 8 }
    /// );
    /// # Ok::<(), QuickFilterError>(())
    /// ```
    #[inline]
    pub fn try_add(&mut self, i: usize) -> Result<&mut Self, QuickFilterError> {
        self.replace_generic(i, True)?;
        Ok(self)
    }

    /// Marks index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.cap()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let mut filter = QuickFilter::new(8);
    /// filter.add(1).add(5);
    /// assert!(filter.has(5));
    /// ```
    #[inline]
    #[track_caller]
    pub fn add(&mut self, i: usize) -> &mut Self {
        if let Err(err) = self.replace_generic(i, True) {
            panic!("{err}");
        }
        self
    }

    /// Unmarks index `i`.
    ///
    /// Deleting an index that is not set has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::IndexOutOfRange`] if `i >= self.cap()`;
    /// the filter is left unchanged.
    #[inline]
    pub fn try_delete(&mut self, i: usize) -> Result<&mut Self, QuickFilterError> {
        self.replace_generic(i, False)?;
        Ok(self)
    }

    /// Unmarks index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.cap()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let mut filter = QuickFilter::new_filled(8);
    /// filter.delete(2).delete(2);
    /// assert_eq!(filter.len(), 7);
    /// assert!(!filter.has(2));
    /// ```
    #[inline]
    #[track_caller]
    pub fn delete(&mut self, i: usize) -> &mut Self {
        if let Err(err) = self.replace_generic(i, False) {
            panic!("{err}");
        }
        self
    }

    /// Returns whether index `i` is set.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::IndexOutOfRange`] if `i >= self.cap()`.
    #[inline]
    pub fn try_has(&self, i: usize) -> Result<bool, QuickFilterError> {
        let (idx, bp) = self.locate(i)?;
        Ok((self.words[idx] >> bp) & 1 != 0)
    }

    /// Returns whether index `i` is set.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.cap()`.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn has(&self, i: usize) -> bool {
        match self.try_has(i) {
            Ok(found) => found,
            Err(err) => panic!("{err}"),
        }
    }

    /// Marks every index in `0..cap()`.
    pub fn fill(&mut self) -> &mut Self {
        self.words.fill(!0);
        storage::mask_tail(&mut self.words, self.capacity);
        self.len = self.capacity;
        self.debug_check_invariants();
        self
    }

    /// Unmarks every index. The capacity is unchanged and the word buffer
    /// is reused.
    pub fn clear(&mut self) -> &mut Self {
        self.words.fill(0);
        self.len = 0;
        self
    }

    /// Makes `self` an independent copy of `other`, adopting its capacity.
    ///
    /// The existing word buffer is reused when it is large enough.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let full = QuickFilter::new_filled(128);
    /// let mut filter = QuickFilter::new(16);
    /// filter.copy_from(&full);
    /// assert_eq!(filter.cap(), 128);
    /// assert_eq!(filter.len(), 128);
    /// ```
    pub fn copy_from(&mut self, other: &Self) -> &mut Self {
        self.capacity = other.capacity;
        self.len = other.len;
        self.words.clone_from(&other.words);
        self
    }

    /// Changes the capacity to `capacity`.
    ///
    /// Growing keeps every set index and leaves the new indices unset.
    /// Shrinking drops every index at or beyond the new capacity and
    /// subtracts only the dropped bits from the count. Resizing to the
    /// current capacity does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let mut filter = QuickFilter::new_filled(100);
    /// filter.resize(70);
    /// assert_eq!(filter.len(), 70);
    ///
    /// filter.resize(200);
    /// assert_eq!(filter.len(), 70);
    /// assert!(!filter.has(150));
    /// ```
    pub fn resize(&mut self, capacity: usize) -> &mut Self {
        if capacity != self.capacity {
            let dropped = storage::resize(&mut self.words, capacity);
            self.len -= dropped;
            self.capacity = capacity;
            self.debug_check_invariants();
        }
        self
    }

    /// Unmarks every set index for which `f` returns `false`.
    ///
    /// The predicate sees the set indices in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let mut filter = QuickFilter::new_filled(10);
    /// filter.retain(|i| i % 4 == 0);
    /// assert!(filter.iter().eq([0, 4, 8]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(usize) -> bool,
    {
        for (wi, word) in self.words.iter_mut().enumerate() {
            let mut rem = *word;
            while rem != 0 {
                let rel = rem.trailing_zeros() as usize;
                let nmask = !(1 << rel);
                if !f(wi * WORD_BITS + rel) {
                    *word &= nmask;
                    self.len -= 1;
                }
                rem &= nmask;
            }
        }
        self.debug_check_invariants();
        self
    }

    /// Returns the smallest set index, if any.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|&(_, &w)| w != 0)
            .map(|(wi, w)| wi * WORD_BITS + w.trailing_zeros() as usize)
    }

    /// Returns an ascending iterator over the set indices.
    ///
    /// The iterator also exposes a cursor interface
    /// ([`is_done`](Iter::is_done), [`value`](Iter::value),
    /// [`advance`](Iter::advance)).
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let mut filter = QuickFilter::new(200);
    /// filter.add(130).add(2).add(64);
    ///
    /// let mut it = filter.iter();
    /// let mut seen = Vec::new();
    /// while !it.is_done() {
    ///     seen.push(it.value());
    ///     it.advance();
    /// }
    /// assert_eq!(seen, [2, 64, 130]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.words)
    }

    /// Yields the elements of `items` whose positions are set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::QuickFilter;
    /// let data = vec!["a", "b", "c", "d"];
    /// let mut filter = QuickFilter::new(data.len());
    /// filter.add(1).add(3);
    ///
    /// let picked: Vec<_> = filter.select(&data).copied().collect();
    /// assert_eq!(picked, ["b", "d"]);
    /// ```
    pub fn select<I: IntoIterator>(&self, items: I) -> SelectIter<'_, I::IntoIter> {
        SelectIter::new(self, items)
    }

    /// Checks that the cached count and the tail padding agree with the
    /// words. Compiled out of release builds.
    #[inline(always)]
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert_eq!(self.words.len(), storage::word_count(self.capacity));
        debug_assert_eq!(
            self.len,
            storage::popcount(&self.words),
            "cached count out of sync"
        );
        debug_assert!(
            self.words
                .last()
                .is_none_or(|&w| w & !storage::tail_mask(self.capacity) == 0),
            "bits set past capacity {}",
            self.capacity
        );
    }
}

/// A trait to convert types to a boolean value.
///
/// Lets [`QuickFilter::replace_generic`] be monomorphized for `add` and
/// `delete` so the set/clear branch folds away.
trait ToBool: Copy {
    /// Converts the implementing type to a boolean value.
    fn to_bool(self) -> bool;
}

/// A marker type representing the boolean value `true`.
#[derive(Copy, Clone)]
struct True;

/// A marker type representing the boolean value `false`.
#[derive(Copy, Clone)]
struct False;

impl ToBool for True {
    #[inline(always)]
    fn to_bool(self) -> bool {
        true
    }
}

impl ToBool for False {
    #[inline(always)]
    fn to_bool(self) -> bool {
        false
    }
}
