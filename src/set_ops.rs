//! Implementations of set operations for `QuickFilter`.
//!
//! Operands must share the same capacity; there is no implicit zero-extension
//! between filters of different sizes.

use crate::{QuickFilter, storage, traits::QuickFilterError};

#[inline]
fn same_capacity(left: &QuickFilter, right: &QuickFilter) -> Result<usize, QuickFilterError> {
    if left.capacity != right.capacity {
        return Err(QuickFilterError::CapacityMismatch {
            left: left.capacity,
            right: right.capacity,
        });
    }
    Ok(left.capacity)
}

impl QuickFilter {
    /// Overwrites `self` with `op` applied word-wise to `a` and `b`.
    fn assign_from(
        &mut self,
        a: &Self,
        b: &Self,
        op: impl Fn(u64, u64) -> u64,
    ) -> Result<&mut Self, QuickFilterError> {
        self.capacity = same_capacity(a, b)?;
        self.words.clear();
        self.words
            .extend(a.words.iter().zip(&b.words).map(|(&x, &y)| op(x, y)));
        self.len = storage::popcount(&self.words);
        self.debug_check_invariants();
        Ok(self)
    }

    /// Applies `op` word-wise to `self` and `other`, storing into `self`.
    fn assign_with(
        &mut self,
        other: &Self,
        op: impl Fn(u64, u64) -> u64,
    ) -> Result<&mut Self, QuickFilterError> {
        same_capacity(self, other)?;
        for (dst, &src) in self.words.iter_mut().zip(&other.words) {
            *dst = op(*dst, src);
        }
        self.len = storage::popcount(&self.words);
        self.debug_check_invariants();
        Ok(self)
    }

    /// Makes `self` the union of `a` and `b`.
    ///
    /// Whatever `self` held before is discarded and its capacity becomes the
    /// operands' shared capacity. The word buffer is reused when it is large
    /// enough. To union a filter with another in place, use
    /// [`union_with`](Self::union_with).
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::CapacityMismatch`] if `a.cap() != b.cap()`;
    /// `self` is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::{QuickFilter, QuickFilterError};
    /// let evens = QuickFilter::from_fn(16, |i| i % 2 == 0);
    /// let threes = QuickFilter::from_fn(16, |i| i % 3 == 0);
    ///
    /// let mut filter = QuickFilter::new(0);
    /// filter.union_of(&evens, &threes)?;
    /// assert!(filter.iter().eq([0, 2, 3, 4, 6, 8, 9, 10, 12, 14, 15]));
    /// # Ok::<(), QuickFilterError>(())
    /// ```
    pub fn union_of(&mut self, a: &Self, b: &Self) -> Result<&mut Self, QuickFilterError> {
        self.assign_from(a, b, |x, y| x | y)
    }

    /// Makes `self` the intersection of `a` and `b`.
    ///
    /// See [`union_of`](Self::union_of) for how `self` is overwritten; the
    /// in-place form is [`intersection_with`](Self::intersection_with).
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::CapacityMismatch`] if `a.cap() != b.cap()`;
    /// `self` is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::{QuickFilter, QuickFilterError};
    /// let evens = QuickFilter::from_fn(16, |i| i % 2 == 0);
    /// let threes = QuickFilter::from_fn(16, |i| i % 3 == 0);
    ///
    /// let mut filter = QuickFilter::new(16);
    /// filter.intersection_of(&evens, &threes)?;
    /// assert!(filter.iter().eq([0, 6, 12]));
    /// # Ok::<(), QuickFilterError>(())
    /// ```
    pub fn intersection_of(&mut self, a: &Self, b: &Self) -> Result<&mut Self, QuickFilterError> {
        self.assign_from(a, b, |x, y| x & y)
    }

    /// Performs a bitwise OR with `other`, in place.
    ///
    /// This is `self.union_of(self, other)`, which the borrow checker would
    /// reject if written out. Each destination word is read before it is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::CapacityMismatch`] if the capacities
    /// differ; `self` is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quickfilter::{QuickFilter, QuickFilterError};
    /// let mut a = QuickFilter::new(100);
    /// let mut b = QuickFilter::new(100);
    /// a.add(10);
    /// b.add(90);
    ///
    /// a.union_with(&b)?;
    /// assert!(a.iter().eq([10, 90]));
    /// # Ok::<(), QuickFilterError>(())
    /// ```
    pub fn union_with(&mut self, other: &Self) -> Result<&mut Self, QuickFilterError> {
        self.assign_with(other, |x, y| x | y)
    }

    /// Performs a bitwise AND with `other`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::CapacityMismatch`] if the capacities
    /// differ; `self` is left unchanged.
    pub fn intersection_with(&mut self, other: &Self) -> Result<&mut Self, QuickFilterError> {
        self.assign_with(other, |x, y| x & y)
    }

    /// Creates a new filter that is the union of this filter and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::CapacityMismatch`] if the capacities
    /// differ.
    pub fn union(&self, other: &Self) -> Result<Self, QuickFilterError> {
        let mut result = self.clone();
        result.union_with(other)?;
        Ok(result)
    }

    /// Creates a new filter that is the intersection of this filter and
    /// `other`.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFilterError::CapacityMismatch`] if the capacities
    /// differ.
    pub fn intersection(&self, other: &Self) -> Result<Self, QuickFilterError> {
        let mut result = self.clone();
        result.intersection_with(other)?;
        Ok(result)
    }
}
