//! The table-driven merge engine.
//!
//! Every two-set operation in this crate is one walk over the two sorted sets with two cursors.
//! What differs between them is only what happens to the current pair of elements depending on
//! how they compare, and what happens to whatever is left of one set once the other runs out. A
//! [`Table`] spells this out as one [`Action`] per [`Outcome`], and [`merge`] runs it.

use crate::prelude::*;

/// What to do with the current left and right elements.
///
/// A combination of flags. Keeping an element moves it to the end of the result and consumes it;
/// skipping an element consumes it without keeping it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, BitOr, BitAnd)]
pub struct Action(u8);

impl Action {
    /// Do nothing.
    pub const NONE: Self = Self(0);
    /// Consume the left element without keeping it.
    pub const SKIP_LEFT: Self = Self(1);
    /// Consume the right element without keeping it.
    pub const SKIP_RIGHT: Self = Self(1 << 1);
    /// Keep the left element.
    pub const KEEP_LEFT: Self = Self(1 << 2);
    /// Keep the right element.
    pub const KEEP_RIGHT: Self = Self(1 << 3);

    /// Every flag that means something.
    const ALL: u8 = 0b1111;

    /// Both keep flags.
    const KEEPS: u8 = Self::KEEP_LEFT.0 | Self::KEEP_RIGHT.0;

    /// Flag names, in bit order.
    const NAMES: [&'static str; 4] = ["SKIP_LEFT", "SKIP_RIGHT", "KEEP_LEFT", "KEEP_RIGHT"];

    /// Builds an action from raw bits. Bits outside the four flags make the action invalid.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Combines the flags of two actions. A `const` alternative to `|`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether all flags of `other` are set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the left element is kept.
    #[must_use]
    pub const fn keeps_left(self) -> bool {
        self.contains(Self::KEEP_LEFT)
    }

    /// Whether the right element is kept.
    #[must_use]
    pub const fn keeps_right(self) -> bool {
        self.contains(Self::KEEP_RIGHT)
    }

    /// Whether the left element is consumed, kept or not.
    #[must_use]
    pub const fn advances_left(self) -> bool {
        self.0 & (Self::SKIP_LEFT.0 | Self::KEEP_LEFT.0) != 0
    }

    /// Whether the right element is consumed, kept or not.
    #[must_use]
    pub const fn advances_right(self) -> bool {
        self.0 & (Self::SKIP_RIGHT.0 | Self::KEEP_RIGHT.0) != 0
    }

    /// Whether this action can respond to a comparison: it must do something, use only known
    /// flags, and keep at most one side.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0 && self.0 & !Self::ALL == 0 && self.0 & Self::KEEPS != Self::KEEPS
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0 == 0 {
            return f.write_str("NONE");
        }

        let mut fst = true;
        for (bit, name) in Self::NAMES.iter().enumerate() {
            if self.0 & (1 << bit) != 0 {
                if !fst {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                fst = false;
            }
        }

        let unknown = self.0 & !Self::ALL;
        if unknown != 0 {
            if !fst {
                f.write_str(" | ")?;
            }
            write!(f, "{unknown:#010b}")?;
        }
        Ok(())
    }
}

/// The slots of a [`Table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Outcome {
    /// The left element sorts first.
    #[display(fmt = "less-than")]
    Less,
    /// Neither element sorts first.
    #[display(fmt = "equal")]
    Equal,
    /// The right element sorts first.
    #[display(fmt = "greater-than")]
    Greater,
    /// One set has run out.
    #[display(fmt = "remainder")]
    Remainder,
}

/// One set operation, described by the [`Action`] taken for each [`Outcome`].
///
/// ## Invariants
///
/// The three comparison actions are [valid](Action::is_valid). The remainder action uses no flags
/// other than the two keeps; keeping both is allowed there, since only one side ever remains.
///
/// These hold for every table, as [`Table::new`] is the only way to build one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Table {
    /// Action when the left element is less than the right one.
    lt: Action,
    /// Action when the elements are equal.
    eq: Action,
    /// Action when the left element is greater than the right one.
    gt: Action,
    /// Which side to keep once the other has run out.
    rem: Action,
}

/// Unwraps a table in a `const` context.
macro_rules! const_table {
    ($lt: expr, $eq: expr, $gt: expr, $rem: expr) => {
        match Table::new($lt, $eq, $gt, $rem) {
            Ok(table) => table,
            Err(_) => panic!("invalid built-in table"),
        }
    };
}

impl Table {
    /// Difference: elements of the left set not in the right one.
    pub const DIFF: Self = const_table!(
        Action::KEEP_LEFT,
        Action::SKIP_LEFT.union(Action::SKIP_RIGHT),
        Action::SKIP_RIGHT,
        Action::KEEP_LEFT
    );

    /// Intersection: elements in both sets.
    pub const INTER: Self = const_table!(
        Action::SKIP_LEFT,
        Action::KEEP_LEFT.union(Action::SKIP_RIGHT),
        Action::SKIP_RIGHT,
        Action::NONE
    );

    /// Union: elements in either set.
    pub const UNION: Self = const_table!(
        Action::KEEP_LEFT,
        Action::KEEP_LEFT.union(Action::SKIP_RIGHT),
        Action::KEEP_RIGHT,
        Action::KEEP_LEFT.union(Action::KEEP_RIGHT)
    );

    /// Symmetric difference: elements in exactly one set.
    pub const SYM_DIFF: Self = const_table!(
        Action::KEEP_LEFT,
        Action::SKIP_LEFT.union(Action::SKIP_RIGHT),
        Action::KEEP_RIGHT,
        Action::KEEP_LEFT.union(Action::KEEP_RIGHT)
    );

    /// Builds a table, checking every action before any data can be touched.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::InvalidAction`] naming the first slot whose action breaks the table
    /// invariants.
    pub const fn new(lt: Action, eq: Action, gt: Action, rem: Action) -> Result<Self, Error> {
        let checks = [(Outcome::Less, lt), (Outcome::Equal, eq), (Outcome::Greater, gt)];

        let mut i = 0;
        while i < checks.len() {
            let (outcome, action) = checks[i];
            if !action.is_valid() {
                return Err(Error::InvalidAction { outcome, action });
            }
            i += 1;
        }

        if rem.0 & !Action::KEEPS != 0 {
            return Err(Error::InvalidAction {
                outcome: Outcome::Remainder,
                action: rem,
            });
        }

        Ok(Self { lt, eq, gt, rem })
    }

    /// The action for an outcome.
    #[must_use]
    pub const fn action(&self, outcome: Outcome) -> Action {
        match outcome {
            Outcome::Less => self.lt,
            Outcome::Equal => self.eq,
            Outcome::Greater => self.gt,
            Outcome::Remainder => self.rem,
        }
    }

    /// The action for the elements at `i` and `j`.
    fn compare<S: Sequence + ?Sized>(&self, data: &S, i: usize, j: usize) -> Action {
        if data.less(i, j) {
            self.lt
        } else if data.less(j, i) {
            self.gt
        } else {
            self.eq
        }
    }
}

impl Op for Table {
    fn call<S: Sequence + ?Sized>(&self, data: &mut S, pivot: usize) -> usize {
        merge(self, data, pivot)
    }
}

/// Cursors of a running merge.
///
/// ## Invariants
///
/// At any point the sequence is laid out as follows:
///
/// - `[0, p)`: the result so far, sorted.
/// - `[p, i)`: discarded left elements.
/// - `[i, k)`: the left elements still to be read.
/// - `[k, k + parked)`: kept right elements that belong before everything in `[i, k)`.
/// - `[k + parked, j)`: discarded right elements.
/// - `[j, len)`: the right elements still to be read.
///
/// Moreover `p <= i`, and `parked > 0` only while `p == i`.
struct Merger<'a, S: ?Sized> {
    /// The sequence being merged.
    data: &'a mut S,
    /// Next slot of the result.
    p: usize,
    /// Next left element.
    i: usize,
    /// End of the unread left elements.
    k: usize,
    /// Number of kept right elements waiting behind the left ones.
    parked: usize,
    /// Next right element.
    j: usize,
}

impl<'a, S: Sequence + ?Sized> Merger<'a, S> {
    /// Starts a merge of `[0, pivot)` and `[pivot, len)`.
    fn new(data: &'a mut S, pivot: usize) -> Self {
        Self {
            data,
            p: 0,
            i: 0,
            k: pivot,
            parked: 0,
            j: pivot,
        }
    }

    /// Moves the parked right elements in front of the unread left ones, appending them to the
    /// result.
    fn flush(&mut self) {
        if self.parked == 0 {
            return;
        }

        rotate(&mut *self.data, self.i, self.k, self.k + self.parked);
        self.p += self.parked;
        self.i += self.parked;
        self.k += self.parked;
        self.parked = 0;
    }

    /// Consumes the left element, appending it to the result if `keep`.
    fn advance_left(&mut self, keep: bool) {
        self.flush();
        if keep {
            if self.p != self.i {
                self.data.swap(self.p, self.i);
            }
            self.p += 1;
        }
        self.i += 1;
    }

    /// Appends the right element to the result. Does not consume it.
    fn keep_right(&mut self) {
        if self.p == self.i {
            // No gap to drop it into: park it past the unread left elements.
            let slot = self.k + self.parked;
            if slot != self.j {
                self.data.swap(slot, self.j);
            }
            self.parked += 1;
        } else {
            self.data.swap(self.p, self.j);
            self.p += 1;
        }
    }

    /// Runs `table` to completion, returning the size of the result.
    fn run(mut self, table: &Table) -> usize {
        let len = self.data.len();

        while self.i < self.k && self.j < len {
            let action = table.compare(&*self.data, self.i, self.j);
            if action.advances_left() {
                self.advance_left(action.keeps_left());
            }
            if action.keeps_right() {
                self.keep_right();
            }
            if action.advances_right() {
                self.j += 1;
            }
        }
        self.flush();

        // At most one side has anything left.
        let rem = table.action(Outcome::Remainder);
        if self.i < self.k && rem.keeps_left() {
            let n = self.k - self.i;
            if self.p != self.i {
                self.data.slide(self.p, self.i, n);
            }
            self.p += n;
        } else if self.j < len && rem.keeps_right() {
            let n = len - self.j;
            self.data.slide(self.p, self.j, n);
            self.p += n;
        }

        self.p
    }
}

/// Merges the sets `[0, pivot)` and `[pivot, len)` as `table` describes.
///
/// The result occupies `[0, size)`, sorted and free of duplicates; the discarded elements are left
/// in `[size, len)` in unspecified order. Kept right elements normally drop into the gap left by
/// discarded left elements; when there is none, runs of them are rotated into place, which costs
/// time proportional to the unread left elements. A table that keeps right elements can therefore
/// take a quadratic number of swaps on interleaved sets; one that never does stays linear.
///
/// ## Panics
///
/// Panics if `pivot > data.len()`.
#[track_caller]
pub fn merge<S: Sequence + ?Sized>(table: &Table, data: &mut S, pivot: usize) -> usize {
    check_pivot(data.len(), pivot);
    Merger::new(data, pivot).run(table)
}
