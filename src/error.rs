//! Errors raised when a caller breaks a precondition.
//!
//! None of the set operations can fail on well-formed input. The variants here describe malformed
//! input instead: a bad [`Table`](crate::merge::Table), a pivot or span outside its sequence, or a broken
//! scheduler invariant. Entry points panic with these messages; [`Table::new`] and
//! [`validate_pivots`] hand them back as values so callers can check ahead of time.
//!
//! [`Table::new`]: crate::merge::Table::new
//! [`validate_pivots`]: crate::apply::validate_pivots

use crate::prelude::*;

/// A broken precondition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Error {
    /// A [`Table`] slot holds an action that cannot drive a merge.
    #[display(fmt = "invalid {} action: {}", outcome, action)]
    InvalidAction {
        /// The slot holding the action.
        outcome: Outcome,
        /// The offending action.
        action: Action,
    },

    /// A pivot lies past the end of its sequence.
    #[display(fmt = "pivot {} out of range for length {}", pivot, len)]
    PivotOutOfRange {
        /// The offending pivot.
        pivot: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// A span reaches past the end of its sequence.
    #[display(fmt = "span {} out of range for length {}", span, len)]
    SpanOutOfRange {
        /// The offending span.
        span: Span,
        /// Length of the sequence.
        len: usize,
    },

    /// A pivot list is not in ascending order.
    #[display(fmt = "pivot {} at position {} is below its predecessor {}", pivot, index, prev)]
    PivotsUnordered {
        /// Position of the offending pivot.
        index: usize,
        /// The offending pivot.
        pivot: usize,
        /// The pivot before it.
        prev: usize,
    },

    /// The reducer finished on a span that does not start at zero.
    #[display(fmt = "impossible final span {}", _0)]
    ImpossibleFinalSpan(Span),
}

impl std::error::Error for Error {}

/// Panics unless `pivot` lies within a sequence of length `len`.
#[track_caller]
pub(crate) fn check_pivot(len: usize, pivot: usize) {
    if pivot > len {
        panic!("{}", Error::PivotOutOfRange { pivot, len });
    }
}

/// Panics unless `span` lies within a sequence of length `len`.
#[track_caller]
pub(crate) fn check_span(len: usize, span: Span) {
    if span.end > len {
        panic!("{}", Error::SpanOutOfRange { span, len });
    }
}
