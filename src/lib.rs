//! # In-place algebra over sorted sets
//!
//! Union, intersection, difference, symmetric difference and deduplication of sorted sets, plus
//! subset, superset, intersection and equality tests, all running in place and without allocating.
//! The data can be any [`Sequence`]: something with a length, a less-than comparison between two
//! indices, and a swap of two indices.
//!
//! Two sets share a sequence, split at a pivot: the left set is `[0, pivot)` and the right set is
//! `[pivot, len)`. Each must be sorted and free of duplicates, with two elements considered equal
//! when neither is less than the other. Mutating operations swap their result into `[0, size)` and
//! return `size`.
//!
//! ```
//! use swapset::prelude::*;
//!
//! let mut data = vec!['a', 'b', 'c', 'b', 'c', 'd'];
//! let size = union(&mut data, 3);
//! assert_eq!(data[..size], ['a', 'b', 'c', 'd']);
//! ```
//!
//! Every two-set operation is a [`Table`] run by the same [`merge`] engine. Any number of sets can
//! be folded together concurrently with [`apply`].
//!
//! [`Sequence`]: seq::Sequence
//! [`Table`]: merge::Table
//! [`merge`]: merge::merge
//! [`apply`]: apply::apply

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod apply;
pub mod cmp;
pub mod error;
pub mod merge;
pub mod ops;
pub mod prelude;
pub mod seq;
pub mod shared;


/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 8]>;
