//! A fixed-capacity, word-packed index set for allocation-free filter passes.
//!
//! This crate provides [`QuickFilter`], a set over the dense index domain
//! `0..cap()` stored one bit per index in `u64` words. It is meant to run
//! alongside an array: mark the positions whose elements satisfy a predicate,
//! then visit the marked positions in ascending order, reusing the same
//! filter for every pass instead of building a filtered copy of the data.
//!
//! # Features
//!
//! - **O(1) point operations**: add, delete and membership tests
//! - **O(1) length**: the number of set indices is cached
//! - **Bulk operations**: fill, clear, resize, retain
//! - **Set algebra**: union and intersection, into a third filter or in place
//! - **Fast iteration**: set indices are found with lowest-set-bit tricks,
//!   skipping empty words in one step
//! - **Serialization support** via serde and rkyv (optional)
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use quickfilter::QuickFilter;
//!
//! let data: Vec<u32> = (0..20).collect();
//!
//! // Mark every even element
//! let mut filter = QuickFilter::new(data.len());
//! for (i, value) in data.iter().enumerate() {
//!     if value % 2 == 0 {
//!         filter.add(i);
//!     }
//! }
//! assert_eq!(filter.len(), 10);
//!
//! // Visit the marked elements in order
//! let evens: Vec<u32> = filter.select(&data).copied().collect();
//! assert_eq!(evens, [0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
//!
//! // Narrow the pass with a second predicate
//! let small = QuickFilter::from_slice(&data, |&v| v < 7);
//! filter.intersection_with(&small).unwrap();
//! assert!(filter.iter().eq([0, 2, 4, 6]));
//! ```
//!
//! # Capacity
//!
//! A filter's capacity is always chosen by the caller and changes only
//! through [`QuickFilter::resize`] or by adopting another filter's capacity
//! ([`copy_from`](QuickFilter::copy_from), [`union_of`](QuickFilter::union_of),
//! [`intersection_of`](QuickFilter::intersection_of)). Indices at or beyond
//! the capacity are rejected, and binary operations require both operands to
//! have the same capacity; see [`QuickFilterError`].

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
mod filter;
mod iter;
mod macros;
mod set_ops;
pub mod storage;
pub mod traits;

#[cfg(feature = "serde")]
mod ser;

#[cfg(feature = "serde")]
pub mod serde;

#[cfg(feature = "rkyv")]
pub mod rkyv;

#[cfg(feature = "rkyv")]
pub use self::rkyv::{ArchivedQuickFilter, QuickFilterResolver};

// Re-exports
pub use filter::QuickFilter;
pub use iter::{Iter, SelectIter};
pub use traits::QuickFilterError;
