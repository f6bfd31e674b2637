//! Sequences that several threads may permute at once, as long as they keep to disjoint indices.
//!
//! [`apply`](crate::apply::apply) merges many pairs of sets concurrently within one sequence. The
//! pairs never overlap, so no locking is needed, but the sequence must still let different threads
//! compare and swap through a shared reference. [`SharedSequence`] captures that capability and
//! [`Shared`] provides it for slices.

use crate::prelude::*;
use std::{marker::PhantomData, ptr::NonNull};

/// Storage that can be compared and permuted by index from several threads at once.
///
/// ## Safety
///
/// Implementors must guarantee that [`less`](SharedSequence::less) and
/// [`swap`](SharedSequence::swap) may be called concurrently from different threads through a
/// shared reference without data races, provided that no two concurrent calls touch a common
/// index. They must uphold the ordering contract of [`Sequence`].
pub unsafe trait SharedSequence: Sync {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the element at `i` sorts strictly before the element at `j`.
    fn less(&self, i: usize, j: usize) -> bool;

    /// Exchanges the elements at `i` and `j`.
    ///
    /// ## Safety
    ///
    /// No other thread may access index `i` or `j` for the duration of the call.
    unsafe fn swap(&self, i: usize, j: usize);
}

/// A [`SharedSequence`] over an exclusively borrowed slice.
///
/// The borrow keeps every other access to the slice out while the [`Shared`] lives.
pub struct Shared<'a, T> {
    /// Start of the slice.
    ptr: NonNull<T>,
    /// Length of the slice.
    len: usize,
    /// The borrow we were built from.
    marker: PhantomData<&'a mut [T]>,
}

// Safety: elements are only read through `&T` and moved between indices, never duplicated, and
// `swap`'s contract rules out two threads touching the same index.
unsafe impl<T: Send + Sync> Sync for Shared<'_, T> {}
unsafe impl<T: Send> Send for Shared<'_, T> {}

impl<'a, T> Shared<'a, T> {
    /// Wraps a slice.
    pub fn new(slice: &'a mut [T]) -> Self {
        Self {
            len: slice.len(),
            ptr: NonNull::from(slice).cast(),
            marker: PhantomData,
        }
    }

    /// Pointer to the element at `i`.
    ///
    /// ## Panics
    ///
    /// Panics if `i` is out of bounds.
    #[track_caller]
    fn at(&self, i: usize) -> *mut T {
        assert!(
            i < self.len,
            "index {i} out of bounds for length {}",
            self.len
        );

        // Safety: `i` is in bounds of the slice we borrowed.
        unsafe { self.ptr.as_ptr().add(i) }
    }
}

impl<'a, T> From<&'a mut [T]> for Shared<'a, T> {
    fn from(slice: &'a mut [T]) -> Self {
        Self::new(slice)
    }
}

impl<T> Debug for Shared<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Shared").field("len", &self.len).finish()
    }
}

unsafe impl<T: Ord + Send + Sync> SharedSequence for Shared<'_, T> {
    fn len(&self) -> usize {
        self.len
    }

    fn less(&self, i: usize, j: usize) -> bool {
        // Safety: both pointers are in bounds, and the contract of `swap` keeps writers away from
        // these indices while we read.
        unsafe { *self.at(i) < *self.at(j) }
    }

    unsafe fn swap(&self, i: usize, j: usize) {
        // Safety: both pointers are in bounds and exclusively ours by the caller's guarantee.
        // `ptr::swap` allows `i == j`.
        unsafe { std::ptr::swap(self.at(i), self.at(j)) }
    }
}

/// A [`Sequence`] view of a [`SharedSequence`] restricted to a span, addressed by relative indices.
///
/// This is the concurrent counterpart of [`BoundSpan`]. Windows exist only inside the reducer,
/// which hands each running merge a span no other window overlaps.
pub(crate) struct Window<'a, S: ?Sized> {
    /// The underlying sequence.
    data: &'a S,
    /// The window into it.
    span: Span,
}

impl<'a, S: SharedSequence + ?Sized> Window<'a, S> {
    /// Restricts `data` to `span`.
    ///
    /// ## Safety
    ///
    /// For as long as the window lives, no other thread may access any index of `data` within
    /// `span`, and no other window over an overlapping span may exist.
    ///
    /// ## Panics
    ///
    /// Panics if `span` reaches past the end of `data`.
    #[track_caller]
    pub unsafe fn new(data: &'a S, span: Span) -> Self {
        check_span(data.len(), span);
        Self { data, span }
    }

    /// Converts a relative index into an absolute one.
    ///
    /// ## Panics
    ///
    /// Panics if `i` falls outside the window.
    #[track_caller]
    fn abs(&self, i: usize) -> usize {
        assert!(
            i < self.span.len(),
            "index {i} out of bounds for window {}",
            self.span
        );
        self.span.start + i
    }
}

impl<S: SharedSequence + ?Sized> Sequence for Window<'_, S> {
    fn len(&self) -> usize {
        self.span.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.data.less(self.abs(i), self.abs(j))
    }

    fn swap(&mut self, i: usize, j: usize) {
        let (i, j) = (self.abs(i), self.abs(j));

        // Safety: both indices lie within our span, which `Window::new` made ours alone.
        unsafe { self.data.swap(i, j) }
    }
}
