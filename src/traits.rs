//! Trait implementations for `QuickFilter`.

use crate::{QuickFilter, storage::WORD_BITS};
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
};

/// Errors reported by fallible [`QuickFilter`] operations.
///
/// A failed operation never modifies the filter it was called on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickFilterError {
    /// An index was outside the filter's domain.
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// The filter's capacity
        capacity: usize,
    },

    /// A binary set operation was given operands of different capacities.
    CapacityMismatch {
        /// Capacity of the left operand
        left: usize,
        /// Capacity of the right operand
        right: usize,
    },

    /// Raw words did not match the word count implied by the capacity.
    WordCountMismatch {
        /// Words required by the capacity
        expected: usize,
        /// Words supplied
        actual: usize,
    },

    /// Raw words had bits set at or beyond the capacity.
    TailBitsSet {
        /// The capacity the words were checked against
        capacity: usize,
    },
}

impl fmt::Display for QuickFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, capacity } => {
                write!(
                    f,
                    "index {index} out of range for filter of capacity {capacity}"
                )
            }
            Self::CapacityMismatch { left, right } => {
                write!(f, "cannot combine filters of capacity {left} and {right}")
            }
            Self::WordCountMismatch { expected, actual } => {
                write!(f, "expected {expected} words but got {actual}")
            }
            Self::TailBitsSet { capacity } => {
                write!(f, "bits set at or beyond capacity {capacity}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QuickFilterError {}

impl Default for QuickFilter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for QuickFilter {
    fn clone(&self) -> Self {
        Self {
            capacity: self.capacity,
            len: self.len,
            words: self.words.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

impl AsRef<[u64]> for QuickFilter {
    fn as_ref(&self) -> &[u64] {
        self.as_words()
    }
}

/// Prints the filter as a binary string with index 0 first, one character
/// per index in the domain.
impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (wi, &word) in self.words.iter().enumerate() {
            let bits = (self.capacity - wi * WORD_BITS).min(WORD_BITS);
            for bi in 0..bits {
                let ch = if (word >> bi) & 1 != 0 { '1' } else { '0' };
                fmt::Write::write_char(f, ch)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuickFilter({}) ", self.capacity)?;
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for QuickFilter {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.words == other.words
    }
}

impl Eq for QuickFilter {}

impl Hash for QuickFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.capacity.hash(state);
        self.words.hash(state);
    }
}

/// Marks every index yielded by the iterator.
///
/// # Panics
///
/// Panics if an index is out of range, like [`QuickFilter::add`].
impl Extend<usize> for QuickFilter {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for i in iter {
            self.add(i);
        }
    }
}

impl<'a> Extend<&'a usize> for QuickFilter {
    fn extend<I: IntoIterator<Item = &'a usize>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

// ============================================================================
// Bitwise Operator Implementations
// ============================================================================
//
// The operators panic on mismatched capacities; use `union`/`intersection`
// and friends to handle the error instead.

impl BitAnd for &QuickFilter {
    type Output = QuickFilter;

    /// Returns the intersection of two filters.
    ///
    /// # Panics
    ///
    /// Panics if the capacities differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use quickfilter::quickfilter;
    ///
    /// let a = quickfilter![8; 1, 2, 3];
    /// let b = quickfilter![8; 2, 3, 4];
    /// assert!((&a & &b).iter().eq([2, 3]));
    /// ```
    #[track_caller]
    fn bitand(self, rhs: Self) -> Self::Output {
        match self.intersection(rhs) {
            Ok(filter) => filter,
            Err(err) => panic!("{err}"),
        }
    }
}

impl BitAndAssign<&Self> for QuickFilter {
    #[track_caller]
    fn bitand_assign(&mut self, rhs: &Self) {
        if let Err(err) = self.intersection_with(rhs) {
            panic!("{err}");
        }
    }
}

impl BitOr for &QuickFilter {
    type Output = QuickFilter;

    /// Returns the union of two filters.
    ///
    /// # Panics
    ///
    /// Panics if the capacities differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use quickfilter::quickfilter;
    ///
    /// let a = quickfilter![8; 1, 2];
    /// let b = quickfilter![8; 6];
    /// assert!((&a | &b).iter().eq([1, 2, 6]));
    /// ```
    #[track_caller]
    fn bitor(self, rhs: Self) -> Self::Output {
        match self.union(rhs) {
            Ok(filter) => filter,
            Err(err) => panic!("{err}"),
        }
    }
}

impl BitOrAssign<&Self> for QuickFilter {
    #[track_caller]
    fn bitor_assign(&mut self, rhs: &Self) {
        if let Err(err) = self.union_with(rhs) {
            panic!("{err}");
        }
    }
}
