//! Folding any number of sets with one associative operation, concurrently.
//!
//! The sets sit next to each other in one sequence, delimited by a pivot list. Neighboring pairs
//! are merged on their own threads; whenever a merge finishes, its result is paired again with a
//! free neighbor, until a single set remains at the start of the sequence. Small pairs never wait
//! on large ones, and data only ever moves toward index zero.
//!
//! ```
//! use swapset::prelude::*;
//!
//! // a − (b ∪ c ∪ d), since difference can't be folded directly.
//! let a = [0, 2, 4, 6, 8, 10];
//! let mut rest = vec![0, 1, 2, 3, 5, 8, 5, 10, 15, 2, 3, 5, 7, 11, 13];
//! let mut sizes = [6, 3, 6];
//!
//! let size = apply_slice(&Union, &mut rest, pivots(&mut sizes));
//! let mut data = a.to_vec();
//! data.extend_from_slice(&rest[..size]);
//!
//! let size = diff(&mut data, a.len());
//! assert_eq!(data[..size], [4, 6]);
//! ```

use crate::prelude::*;
use std::{
    panic::{self, AssertUnwindSafe},
    sync::mpsc,
    thread,
};

/// Turns set sizes into pivots in place, by a running sum, and returns them.
///
/// Entry `i` becomes the end of the `i`-th set when the sets are laid out one after another.
pub fn pivots(sizes: &mut [usize]) -> &mut [usize] {
    let mut end = 0;
    for size in sizes.iter_mut() {
        end += *size;
        *size = end;
    }
    sizes
}

/// Checks that a pivot list is ascending and fits within a sequence of length `len`.
///
/// ## Errors
///
/// Returns [`Error::PivotsUnordered`] or [`Error::PivotOutOfRange`] for the first offending pivot.
pub fn validate_pivots(pivots: &[usize], len: usize) -> Result<(), Error> {
    let mut prev = 0;
    for (index, &pivot) in pivots.iter().enumerate() {
        if pivot < prev {
            return Err(Error::PivotsUnordered { index, pivot, prev });
        }
        if pivot > len {
            return Err(Error::PivotOutOfRange { pivot, len });
        }
        prev = pivot;
    }
    Ok(())
}

/// Folds the sets delimited by `pivots` with `op`, returning the size of the result, which
/// occupies `[0, size)`.
///
/// Each pivot is one past the end of its set; the first set starts at zero. Anything past the last
/// pivot belongs to no set and is left alone. Merges run concurrently on disjoint parts of `data`,
/// in an order decided by which finish first, which is why `op` must be [`Associative`]. Folding
/// with [`SymDiff`] keeps the elements found in an odd number of sets.
///
/// ## Panics
///
/// Panics if the pivots are not ascending or exceed `data.len()`. A panic in `data`'s comparisons
/// or swaps is propagated once the reduction has stopped.
#[track_caller]
pub fn apply<O, S>(op: &O, data: &S, pivots: &[usize]) -> usize
where
    O: Associative,
    S: SharedSequence + ?Sized,
{
    if let Err(err) = validate_pivots(pivots, data.len()) {
        panic!("{err}");
    }

    match *pivots {
        [] => 0,
        [end] => end,
        [pivot, end] => {
            // Safety: this is the only window over `data`, and we don't share it.
            let mut window = unsafe { Window::new(data, Span::new(0, end)) };
            op.call(&mut window, pivot)
        }
        _ => Reducer::new(pivots).run(op, data),
    }
}

/// [`apply`] over a slice.
#[track_caller]
pub fn apply_slice<O, T>(op: &O, data: &mut [T], pivots: &[usize]) -> usize
where
    O: Associative,
    T: Ord + Send + Sync,
{
    apply(op, &Shared::new(data), pivots)
}

/// What a merge task sends back: the entry it produced, or the panic that stopped it.
type Report = thread::Result<Entry>;

/// A set in the reducer's table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    /// Position of the first input set folded into this one.
    ///
    /// Starts alone can't tell entries apart, since an empty set starts where its right neighbor
    /// does.
    pub id: usize,
    /// Where the set lies. While the entry is being merged, this is the whole block being merged.
    pub span: Span,
}

impl Entry {
    /// Initializes a new entry.
    pub(crate) const fn new(id: usize, span: Span) -> Self {
        Self { id, span }
    }
}

/// The bookkeeping of a reduction: which sets remain, and which are being merged.
///
/// Only the coordinating thread ever touches this.
///
/// ## Invariants
///
/// - `entries` is sorted both by id and by start, ids are unique, and no two spans overlap.
/// - `in_use` has one flag per entry, set while the entry is being merged.
pub(crate) struct Reducer {
    /// The sets that remain.
    entries: SmallVec<Entry>,
    /// Whether each set is being merged.
    in_use: BitVec,
}

impl Reducer {
    /// Starts with one free set per pivot.
    pub(crate) fn new(pivots: &[usize]) -> Self {
        let mut start = 0;
        let entries: SmallVec<Entry> = pivots
            .iter()
            .enumerate()
            .map(|(id, &end)| {
                let entry = Entry::new(id, Span::new(start, end));
                start = end;
                entry
            })
            .collect();

        Self {
            in_use: bitvec![0; entries.len()],
            entries,
        }
    }

    /// Every other set, counting back from the last one.
    ///
    /// Releasing these first forms the largest possible number of initial pairs.
    pub(crate) fn seeds(&self) -> impl Iterator<Item = Entry> + '_ {
        let n = self.entries.len();
        (0..n / 2).map(move |i| self.entries[n - 1 - 2 * i])
    }

    /// Whether every set has been folded into one.
    pub(crate) fn is_done(&self) -> bool {
        self.entries.len() == 1
    }

    /// Marks `done` as free, replacing the entry with its id, and pairs it with a free neighbor if
    /// there is one, preferring the left.
    ///
    /// The two entries of a pair are folded into one entry in use, keeping the id of the first and
    /// covering both. Returns the pair, to be merged.
    pub(crate) fn release(&mut self, done: Entry) -> Option<(Entry, Entry)> {
        let Ok(i) = self.entries.binary_search_by_key(&done.id, |entry| entry.id) else {
            unreachable!("set {} is no longer in the reducer", done.id)
        };
        self.entries[i] = done;
        self.in_use.set(i, false);

        let left = if i > 0 && !self.in_use[i - 1] {
            i - 1
        } else if i + 1 < self.entries.len() && !self.in_use[i + 1] {
            i
        } else {
            return None;
        };

        let (fst, snd) = (self.entries[left], self.entries[left + 1]);
        self.entries[left] = Entry::new(fst.id, Span::new(fst.span.start, snd.span.end));
        self.entries.remove(left + 1);
        self.in_use.set(left, true);
        self.in_use.remove(left + 1);
        Some((fst, snd))
    }

    /// Drives the reduction until a single set remains, returning its size.
    fn run<O, S>(mut self, op: &O, data: &S) -> usize
    where
        O: Associative,
        S: SharedSequence + ?Sized,
    {
        thread::scope(|scope| {
            let (tx, rx) = mpsc::sync_channel::<Report>(self.entries.len() / 2);
            let spawn = |(fst, snd): (Entry, Entry)| {
                let tx = tx.clone();
                scope.spawn(move || {
                    let report = panic::catch_unwind(AssertUnwindSafe(|| {
                        Entry::new(fst.id, merge_pair(op, data, fst.span, snd.span))
                    }));

                    // The coordinator only stops listening after a panic elsewhere.
                    let _ = tx.send(report);
                });
            };

            let seeds: SmallVec<Entry> = self.seeds().collect();
            for seed in seeds {
                if let Some(pair) = self.release(seed) {
                    spawn(pair);
                }
            }

            loop {
                let done = match rx.recv() {
                    Ok(Ok(done)) => done,
                    Ok(Err(payload)) => panic::resume_unwind(payload),
                    Err(mpsc::RecvError) => unreachable!("the coordinator holds a sender"),
                };

                if self.is_done() {
                    if done.span.start != 0 {
                        panic!("{}", Error::ImpossibleFinalSpan(done.span));
                    }
                    return done.span.end;
                }

                if let Some(pair) = self.release(done) {
                    spawn(pair);
                }
            }
        })
    }
}

/// Merges the adjacent sets `fst` and `snd` with `op`, returning the span of the result.
///
/// Whatever lies between the two sets is left over from earlier merges; `snd` is first slid left
/// over it.
fn merge_pair<O, S>(op: &O, data: &S, fst: Span, snd: Span) -> Span
where
    O: Associative,
    S: SharedSequence + ?Sized,
{
    // Safety: the reducer only pairs neighboring sets that are both free, so no other task works
    // between `fst.start` and `snd.end`, and the coordinator never touches the data.
    let mut block = unsafe { Window::new(data, Span::new(fst.start, snd.end)) };

    let (l, m) = (fst.len(), snd.len());
    block.slide(l, snd.start - fst.start, m);

    let size = op.call(&mut BoundSpan::new(&mut block, (0, l + m)), l);
    Span::new(fst.start, fst.start + size)
}
