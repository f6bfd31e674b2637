//! The ordered-sequence capability [`Sequence`] and its index-shifting primitives.
//!
//! Every algorithm in this crate sees its data only through three operations: a length, a
//! less-than comparison between two indices, and a swap of two indices. Two sets live side by side
//! in one sequence, split at a pivot `p` into `[0, p)` and `[p, len)`, and each is expected to be
//! sorted and free of duplicates. Two elements are considered equal when neither is less than the
//! other.

use crate::prelude::*;
use std::ops::Range;

/// Storage that can be compared and permuted by index.
///
/// ## Contract
///
/// - [`len`](Sequence::len) is never changed by [`swap`](Sequence::swap).
/// - [`less`](Sequence::less) is a strict weak ordering, consistent with the order each set was
///   sorted in.
/// - [`swap`](Sequence::swap) is its own inverse.
pub trait Sequence {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the element at `i` sorts strictly before the element at `j`.
    fn less(&self, i: usize, j: usize) -> bool;

    /// Exchanges the elements at `i` and `j`.
    fn swap(&mut self, i: usize, j: usize);

    /// Moves the `n` elements starting at `j` into the `n` positions starting at `i`, keeping their
    /// order. Requires `i <= j`. The elements displaced from `[i, i + n)` end up in unspecified
    /// order in whatever positions the move vacates.
    ///
    /// Storage with a cheaper block move can override this.
    fn slide(&mut self, i: usize, j: usize, n: usize) {
        xswap(self, i, j, i + n, j + n);
    }
}

impl<T: Ord> Sequence for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self[i] < self[j]
    }

    fn swap(&mut self, i: usize, j: usize) {
        <[T]>::swap(self, i, j);
    }
}

impl<T: Ord> Sequence for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self[i] < self[j]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        (**self).less(i, j)
    }

    fn swap(&mut self, i: usize, j: usize) {
        (**self).swap(i, j);
    }

    fn slide(&mut self, i: usize, j: usize, n: usize) {
        (**self).slide(i, j, n);
    }
}

// -------------------- Spans -------------------- //

/// The half-open index range `[start, end)` of a set within a shared sequence.
///
/// A span describes data, it never owns any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[display(fmt = "[{}, {})", start, end)]
pub struct Span {
    /// First index in the span.
    pub start: usize,
    /// One past the last index in the span.
    pub end: usize,
}

impl Span {
    /// Creates the span `[start, end)`.
    ///
    /// ## Panics
    ///
    /// Panics if `start > end`.
    #[must_use]
    #[track_caller]
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span start {start} exceeds end {end}");
        Self { start, end }
    }

    /// Number of indices covered.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no indices.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A [`Sequence`] restricted to a [`Span`] of another, addressed by relative indices.
///
/// Index `0` of the view is index `span.start` of the underlying data. This lets any algorithm run
/// on a window of a larger sequence without knowing where the window sits.
#[derive(Debug)]
pub struct BoundSpan<'a, S: ?Sized> {
    /// The underlying sequence.
    data: &'a mut S,
    /// The window into it.
    span: Span,
}

impl<'a, S: Sequence + ?Sized> BoundSpan<'a, S> {
    /// Restricts `data` to `span`.
    ///
    /// ## Panics
    ///
    /// Panics if `span` reaches past the end of `data`.
    #[track_caller]
    pub fn new(data: &'a mut S, span: impl Into<Span>) -> Self {
        let span = span.into();
        check_span(data.len(), span);
        Self { data, span }
    }

    /// The window, in absolute indices.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }
}

impl<S: Sequence + ?Sized> Sequence for BoundSpan<'_, S> {
    fn len(&self) -> usize {
        self.span.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.data.less(self.span.start + i, self.span.start + j)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.data.swap(self.span.start + i, self.span.start + j);
    }

    fn slide(&mut self, i: usize, j: usize, n: usize) {
        self.data
            .slide(self.span.start + i, self.span.start + j, n);
    }
}

// -------------------- Primitives -------------------- //

/// Swaps the elements at `i` and `j` pairwise, advancing both, until `i` reaches `k` or `j` reaches
/// `l`.
///
/// Returns the final value of `i`, i.e. `i` plus the number of swaps performed.
pub fn xswap<S: Sequence + ?Sized>(
    data: &mut S,
    mut i: usize,
    mut j: usize,
    k: usize,
    l: usize,
) -> usize {
    while i < k && j < l {
        data.swap(i, j);
        i += 1;
        j += 1;
    }
    i
}

/// Moves the `n` elements starting at `j` into the positions starting at `i`.
///
/// See [`Sequence::slide`].
pub fn slide<S: Sequence + ?Sized>(data: &mut S, i: usize, j: usize, n: usize) {
    data.slide(i, j, n);
}

/// Reverses the elements in `[start, end)`.
fn reverse<S: Sequence + ?Sized>(data: &mut S, mut start: usize, mut end: usize) {
    while start + 1 < end {
        end -= 1;
        data.swap(start, end);
        start += 1;
    }
}

/// Rotates `[start, end)` so that the element at `mid` comes first, keeping the order within both
/// `[start, mid)` and `[mid, end)`.
///
/// Uses `end - start` swaps at most.
pub fn rotate<S: Sequence + ?Sized>(data: &mut S, start: usize, mid: usize, end: usize) {
    debug_assert!(start <= mid && mid <= end);
    if start == mid || mid == end {
        return;
    }

    reverse(data, start, mid);
    reverse(data, mid, end);
    reverse(data, start, end);
}
