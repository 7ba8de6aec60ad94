//! Grouping and windowing adaptors.
//!
//! Provides [`GroupBy`] — run-length grouping into `(key, sub-sequence)`
//! pairs — plus the windowing adaptors [`Pairwise`] and [`Batched`].
//!
//! # Performance Characteristics
//!
//! | Adaptor | Time per `next()` | Space |
//! |---------|-------------------|-------|
//! | `GroupBy` / `Group` | O(1) + one key eval | O(1) — one lookahead element |
//! | `Pairwise` | O(1) | O(1) — one saved element |
//! | `Batched` | O(batch_size) | O(batch_size) per batch |
//!
//! Unlike an eager grouper that materializes each run into a `Vec`, `GroupBy`
//! streams: a [`Group`] is a transient window over the engine's cursor, so
//! grouping works over arbitrarily large runs and infinite inputs.

use crate::error::{PullResult, SourceError};
use crate::source::{IterSource, Source};
use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// GroupBy
// =============================================================================

/// Engine state shared between the outer sequence and its group views.
struct GroupState<S: Source, F, K> {
    source: S,
    key: F,
    /// One element pulled from the source but not yet delivered, with its key.
    pending: Option<(K, S::Item)>,
    /// Key of the group most recently handed out.
    current: Option<K>,
    /// Bumped on every outer advance and on every discovered group boundary;
    /// a `Group` whose captured id falls behind is permanently exhausted.
    group_id: u64,
    done: bool,
}

/// Groups consecutive elements with equal keys into `(key, Group)` pairs.
///
/// This is run-length grouping, not a partition: equal keys separated by a
/// different key produce separate groups. Sort the input by key first if a
/// full partition is wanted.
///
/// Each source element is pulled exactly once and delivered to exactly one
/// group, in source order. Advancing the outer sequence discards whatever the
/// current group's view has not consumed and permanently exhausts that view.
///
/// # Examples
/// ```
/// use lazyseq::groupby;
///
/// let mut runs = Vec::new();
/// for pair in groupby(vec![1, 1, 2, 2, 3, 3, 3]) {
///     let (key, group) = pair.unwrap();
///     let members: Vec<i32> = group.map(Result::unwrap).collect();
///     runs.push((key, members));
/// }
/// assert_eq!(
///     runs,
///     vec![(1, vec![1, 1]), (2, vec![2, 2]), (3, vec![3, 3, 3])]
/// );
/// ```
pub struct GroupBy<S: Source, F, K> {
    state: Rc<RefCell<GroupState<S, F, K>>>,
}

/// A transient view over the elements of one group.
///
/// Valid only while it is the engine's current group: once the outer sequence
/// advances, or the view itself runs into the next group's first element, it
/// is permanently exhausted — even if elements with its key appear again
/// later in the source.
pub struct Group<S: Source, F, K> {
    state: Rc<RefCell<GroupState<S, F, K>>>,
    id: u64,
}

/// Key function for grouping elements by their own value.
#[inline]
pub fn identity_key<T: Clone>(value: &T) -> T {
    value.clone()
}

/// Group an iterable's consecutive equal elements ([`identity_key`]).
pub fn groupby<I>(
    iterable: I,
) -> GroupBy<IterSource<I::IntoIter>, fn(&I::Item) -> I::Item, I::Item>
where
    I: IntoIterator,
    I::Item: Clone + PartialEq,
{
    let key: fn(&I::Item) -> I::Item = identity_key;
    GroupBy::new(IterSource::new(iterable), key)
}

/// Group an iterable's consecutive elements by a key function.
pub fn groupby_key<I, F, K>(iterable: I, key: F) -> GroupBy<IterSource<I::IntoIter>, F, K>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> K,
    K: Clone + PartialEq,
{
    GroupBy::new(IterSource::new(iterable), key)
}

impl<S, F, K> GroupBy<S, F, K>
where
    S: Source,
    F: FnMut(&S::Item) -> K,
    K: Clone + PartialEq,
{
    /// Group a fallible [`Source`] by a key function.
    pub fn new(source: S, key: F) -> Self {
        Self {
            state: Rc::new(RefCell::new(GroupState {
                source,
                key,
                pending: None,
                current: None,
                group_id: 0,
                done: false,
            })),
        }
    }

    /// Advance to the next group and hand out its `(key, Group)` pair.
    ///
    /// Any outstanding [`Group`] is invalidated first; the unconsumed
    /// remainder of its run is then skipped so the new group starts at the
    /// next distinct key.
    pub fn pull(&mut self) -> PullResult<(K, Group<S, F, K>)> {
        let mut st = self.state.borrow_mut();
        st.group_id = st.group_id.wrapping_add(1);
        loop {
            let leftover = match (&st.pending, &st.current) {
                (Some((k, _)), Some(current)) => k == current,
                _ => false,
            };
            if leftover {
                // Unconsumed tail of the group we just moved past.
                st.pending = None;
                continue;
            }
            if st.pending.is_some() {
                break;
            }
            if st.done {
                return Ok(None);
            }
            match st.source.pull()? {
                Some(value) => {
                    let key = (st.key)(&value);
                    st.pending = Some((key, value));
                }
                None => {
                    st.done = true;
                    return Ok(None);
                }
            }
        }

        let key = match &st.pending {
            Some((key, _)) => key.clone(),
            None => return Ok(None),
        };
        st.current = Some(key.clone());
        let id = st.group_id;
        drop(st);
        Ok(Some((
            key,
            Group {
                state: Rc::clone(&self.state),
                id,
            },
        )))
    }
}

impl<S, F, K> Source for GroupBy<S, F, K>
where
    S: Source,
    F: FnMut(&S::Item) -> K,
    K: Clone + PartialEq,
{
    type Item = (K, Group<S, F, K>);

    #[inline]
    fn pull(&mut self) -> PullResult<(K, Group<S, F, K>)> {
        GroupBy::pull(self)
    }
}

impl<S, F, K> Iterator for GroupBy<S, F, K>
where
    S: Source,
    F: FnMut(&S::Item) -> K,
    K: Clone + PartialEq,
{
    type Item = Result<(K, Group<S, F, K>), SourceError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.pull() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<S, F, K> Group<S, F, K>
where
    S: Source,
    F: FnMut(&S::Item) -> K,
    K: Clone + PartialEq,
{
    /// Pull the next element of this group.
    ///
    /// Exhausts permanently when the group's run ends, when the source ends,
    /// or when the outer sequence has advanced past this group. The first
    /// element of the *next* run is kept as the engine's lookahead, never
    /// dropped or duplicated.
    pub fn pull(&mut self) -> PullResult<S::Item> {
        let mut st = self.state.borrow_mut();
        if st.group_id != self.id {
            return Ok(None);
        }
        if st.pending.is_none() {
            if st.done {
                return Ok(None);
            }
            match st.source.pull() {
                Ok(Some(value)) => {
                    let key = (st.key)(&value);
                    st.pending = Some((key, value));
                }
                Ok(None) => {
                    st.done = true;
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }
        }
        let boundary = match (&st.pending, &st.current) {
            (Some((k, _)), Some(current)) => k != current,
            _ => false,
        };
        if boundary {
            // The next group starts here; this view is finished for good.
            st.group_id = st.group_id.wrapping_add(1);
            return Ok(None);
        }
        match st.pending.take() {
            Some((_, value)) => Ok(Some(value)),
            None => Ok(None),
        }
    }
}

impl<S, F, K> Source for Group<S, F, K>
where
    S: Source,
    F: FnMut(&S::Item) -> K,
    K: Clone + PartialEq,
{
    type Item = S::Item;

    #[inline]
    fn pull(&mut self) -> PullResult<S::Item> {
        Group::pull(self)
    }
}

impl<S, F, K> Iterator for Group<S, F, K>
where
    S: Source,
    F: FnMut(&S::Item) -> K,
    K: Clone + PartialEq,
{
    type Item = Result<S::Item, SourceError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.pull() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

// =============================================================================
// Pairwise
// =============================================================================

/// Yields successive overlapping pairs.
///
/// `pairwise([1, 2, 3, 4])` → `(1, 2), (2, 3), (3, 4)`
///
/// # Performance
///
/// - O(1) per `next()` — saves one element
/// - O(1) space — stores exactly one previous value
#[derive(Debug, Clone)]
pub struct Pairwise<I: Iterator> {
    iter: I,
    prev: Option<I::Item>,
    started: bool,
}

impl<I> Pairwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Create a new pairwise adaptor.
    #[inline]
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            prev: None,
            started: false,
        }
    }
}

impl<I> Iterator for Pairwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = (I::Item, I::Item);

    #[inline]
    fn next(&mut self) -> Option<(I::Item, I::Item)> {
        if !self.started {
            self.started = true;
            self.prev = self.iter.next();
        }

        let prev = self.prev.take()?;
        let next = self.iter.next()?;
        self.prev = Some(next.clone());
        Some((prev, next))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        let lo = lo.saturating_sub(if self.started { 0 } else { 1 });
        let hi = hi.map(|h| h.saturating_sub(if self.started { 0 } else { 1 }));
        (lo, hi)
    }
}

impl<I> std::iter::FusedIterator for Pairwise<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

// =============================================================================
// Batched
// =============================================================================

/// Batch elements into fixed-size chunks.
///
/// The last batch may be shorter than `batch_size` if the input runs out.
///
/// # Performance
///
/// - O(n) per `next()` where n = batch size
/// - O(n) space for the current batch
///
/// # Panics
///
/// Panics if `batch_size` is 0.
#[derive(Debug, Clone)]
pub struct Batched<I> {
    iter: I,
    batch_size: usize,
    done: bool,
}

impl<I: Iterator> Batched<I> {
    /// Create a new batched adaptor.
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is 0.
    #[inline]
    pub fn new(iter: I, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batched() batch_size must be >= 1");
        Self {
            iter,
            batch_size,
            done: false,
        }
    }
}

impl<I: Iterator> Iterator for Batched<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        if self.done {
            return None;
        }

        let mut batch = Vec::with_capacity(self.batch_size);
        for _ in 0..self.batch_size {
            match self.iter.next() {
                Some(val) => batch.push(val),
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if batch.is_empty() {
            self.done = true;
            None
        } else {
            Some(batch)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (lo, hi) = self.iter.size_hint();
        let lo = lo.div_ceil(self.batch_size);
        let hi = hi.map(|h| h.div_ceil(self.batch_size));
        (lo, hi)
    }
}

impl<I: Iterator> std::iter::FusedIterator for Batched<I> {}

// =============================================================================
// Tests
// =============================================================================
