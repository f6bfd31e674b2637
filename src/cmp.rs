//! Read-only comparisons between the sets `[0, pivot)` and `[pivot, len)`.
//!
//! These only ever call [`Sequence::less`], and stop as soon as the answer is known.

use crate::prelude::*;

/// A comparison between two sets.
pub trait Cmp {
    /// Compares `[0, pivot)` against `[pivot, len)`.
    ///
    /// ## Panics
    ///
    /// Panics if `pivot > data.len()`.
    fn call<S: Sequence + ?Sized>(&self, data: &S, pivot: usize) -> bool;
}

/// Declares a unit struct implementing [`Cmp`] through a free function.
macro_rules! cmp {
    ($(#[$attr: meta])* $name: ident => $fun: ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Cmp for $name {
            fn call<S: Sequence + ?Sized>(&self, data: &S, pivot: usize) -> bool {
                $fun(data, pivot)
            }
        }
    };
}

cmp!(
    /// The [`is_sub`] comparison.
    IsSub => is_sub
);
cmp!(
    /// The [`is_super`] comparison.
    IsSuper => is_super
);
cmp!(
    /// The [`is_inter`] comparison.
    IsInter => is_inter
);
cmp!(
    /// The [`is_equal`] comparison.
    IsEqual => is_equal
);

/// Whether every element of `sub` is found in `sup`.
///
/// Both spans are walked forward once.
fn contains_all<S: Sequence + ?Sized>(data: &S, sub: Span, sup: Span) -> bool {
    let (mut i, mut j) = (sub.start, sup.start);

    while i < sub.end {
        if j == sup.end || data.less(i, j) {
            // `data[i]` sorts before everything left in `sup`.
            return false;
        }

        if !data.less(j, i) {
            i += 1;
        }
        j += 1;
    }
    true
}

/// Whether `[0, pivot) ⊆ [pivot, len)`.
///
/// The empty set is a subset of everything.
#[track_caller]
pub fn is_sub<S: Sequence + ?Sized>(data: &S, pivot: usize) -> bool {
    let len = data.len();
    check_pivot(len, pivot);
    contains_all(data, Span::new(0, pivot), Span::new(pivot, len))
}

/// Whether `[0, pivot) ⊇ [pivot, len)`.
///
/// Placing a single element after the pivot turns this into a membership test.
#[track_caller]
pub fn is_super<S: Sequence + ?Sized>(data: &S, pivot: usize) -> bool {
    let len = data.len();
    check_pivot(len, pivot);
    contains_all(data, Span::new(pivot, len), Span::new(0, pivot))
}

/// Whether `[0, pivot)` and `[pivot, len)` share an element.
#[track_caller]
pub fn is_inter<S: Sequence + ?Sized>(data: &S, pivot: usize) -> bool {
    let len = data.len();
    check_pivot(len, pivot);

    let (mut i, mut j) = (0, pivot);
    while i < pivot && j < len {
        if data.less(i, j) {
            i += 1;
        } else if data.less(j, i) {
            j += 1;
        } else {
            return true;
        }
    }
    false
}

/// Whether `[0, pivot)` and `[pivot, len)` hold the same elements.
#[track_caller]
pub fn is_equal<S: Sequence + ?Sized>(data: &S, pivot: usize) -> bool {
    let len = data.len();
    check_pivot(len, pivot);
    len - pivot == pivot && is_sub(data, pivot)
}
