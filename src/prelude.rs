//! Crate prelude.

// The actual prelude.
pub use crate::{
    apply::{apply, apply_slice, pivots, validate_pivots},
    cmp::{is_equal, is_inter, is_sub, is_super, Cmp, IsEqual, IsInter, IsSub, IsSuper},
    error::Error,
    merge::{merge, Action, Outcome, Table},
    ops::{diff, inter, sym_diff, union, uniq, Associative, Diff, Inter, Op, SymDiff, Union},
    seq::{BoundSpan, Sequence, Span},
    shared::{Shared, SharedSequence},
};

// Convenient imports within the crate.
pub(crate) use crate::{
    error::{check_pivot, check_span},
    seq::rotate,
    shared::Window,
    SmallVec,
};
pub(crate) use bitvec::prelude::*;
pub(crate) use derive_more::{BitAnd, BitOr, Display};
pub(crate) use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
