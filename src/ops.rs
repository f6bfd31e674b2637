//! The mutating set operations.
//!
//! Each two-set operation takes the sets `[0, pivot)` and `[pivot, len)` of a [`Sequence`] and
//! swaps the result into `[0, size)`, returning `size`. The result is sorted and free of
//! duplicates; whatever sits in `[size, len)` afterwards is in unspecified order and may contain
//! duplicates. No operation allocates.

use crate::prelude::*;

/// A two-set operation.
pub trait Op {
    /// Runs the operation on `[0, pivot)` and `[pivot, len)`, returning the size of the result.
    ///
    /// ## Panics
    ///
    /// Panics if `pivot > data.len()`.
    fn call<S: Sequence + ?Sized>(&self, data: &mut S, pivot: usize) -> usize;
}

/// An [`Op`] for which grouping doesn't matter, so that it can fold any number of sets.
///
/// [`Diff`] is not associative, and neither is an arbitrary [`Table`], so neither implements this.
pub trait Associative: Op + Sync {}

/// Declares a unit struct implementing [`Op`] through a free function.
macro_rules! op {
    ($(#[$attr: meta])* $name: ident => $fun: ident $(, $assoc: ident)?) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Op for $name {
            fn call<S: Sequence + ?Sized>(&self, data: &mut S, pivot: usize) -> usize {
                $fun(data, pivot)
            }
        }

        $(impl $assoc for $name {})?
    };
}

op!(
    /// The [`diff`] operation.
    Diff => diff
);
op!(
    /// The [`inter`] operation.
    Inter => inter, Associative
);
op!(
    /// The [`union`] operation.
    Union => union, Associative
);
op!(
    /// The [`sym_diff`] operation.
    SymDiff => sym_diff, Associative
);

/// Swaps away duplicates in a sorted sequence, returning the size of the resulting set.
///
/// The set occupies `[0, size)` and stays sorted. Sorting followed by `uniq` turns arbitrary input
/// into a set.
pub fn uniq<S: Sequence + ?Sized>(data: &mut S) -> usize {
    let len = data.len();
    if len <= 1 {
        return len;
    }

    let mut p = 0;
    for i in 1..len {
        if !data.less(p, i) {
            continue;
        }

        p += 1;
        if p < i {
            data.swap(p, i);
        }
    }
    p + 1
}

/// Difference `[0, pivot) − [pivot, len)`.
///
/// Not associative, so it can't be passed to [`apply`](crate::apply::apply). To subtract several
/// sets from one, subtract their union instead.
#[track_caller]
pub fn diff<S: Sequence + ?Sized>(data: &mut S, pivot: usize) -> usize {
    merge(&Table::DIFF, data, pivot)
}

/// Intersection `[0, pivot) ∩ [pivot, len)`.
#[track_caller]
pub fn inter<S: Sequence + ?Sized>(data: &mut S, pivot: usize) -> usize {
    merge(&Table::INTER, data, pivot)
}

/// Union `[0, pivot) ∪ [pivot, len)`.
///
/// Right elements kept while no left element has been dropped yet are rotated past the unread left
/// elements. When the two sets interleave, as in `[1, 3, 5, …] ∪ [2, 4, 6, …]`, that happens for
/// most right elements, and the number of swaps grows quadratically with the size of the input.
#[track_caller]
pub fn union<S: Sequence + ?Sized>(data: &mut S, pivot: usize) -> usize {
    merge(&Table::UNION, data, pivot)
}

/// Symmetric difference `[0, pivot) ∆ [pivot, len)`.
///
/// Like [`union`], this takes a quadratic number of swaps in the worst case, when the two sets
/// interleave without sharing elements.
#[track_caller]
pub fn sym_diff<S: Sequence + ?Sized>(data: &mut S, pivot: usize) -> usize {
    merge(&Table::SYM_DIFF, data, pivot)
}
