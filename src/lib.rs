//! # lazyseq
//!
//! Composable lazy sequence adaptors: transform one or more input sequences
//! into derived sequences without materializing them in full, driven purely
//! by demand — an element is produced only when some downstream consumer
//! asks for it.
//!
//! The crate is split into logical submodules:
//!
//! - [`source`] — the single-pass [`Source`] abstraction; exhaustion and
//!   failure are distinct terminal signals
//! - [`tee`](mod@tee) — [`tee()`], [`Tee`]: fan one source out into
//!   independent views over a shared buffer chain
//! - [`grouping`] — [`groupby`], [`GroupBy`]: consecutive `(key, group)`
//!   runs with transient group views; [`Pairwise`], [`Batched`]
//! - [`combinatoric`] — [`combinations`], [`combinations_with_replacement`],
//!   [`permutations`], [`Product`]
//! - [`infinite`] — [`count`], [`cycle`], [`Repeat`]
//! - [`terminating`] — [`chain`], [`Compress`], [`DropWhile`], [`TakeWhile`],
//!   [`FilterFalse`], [`ISlice`], [`Starmap`], [`ZipLongest`], [`Accumulate`]
//!
//! # Laziness and failure
//!
//! The plain adaptors are ordinary [`Iterator`]s. The two stateful engines
//! (`tee`, `groupby`) run over the fallible [`Source`] trait instead, so an
//! upstream failure reaches exactly the consumer whose pull triggered it;
//! their outputs still implement `Iterator` (over `Result` items) and
//! compose with everything else.
//!
//! Shared state uses `Rc`/`RefCell`: the engines are single-threaded by
//! construction, and the types are deliberately `!Send`.
//!
//! # Example
//!
//! ```
//! use lazyseq::{groupby, tee};
//!
//! let mut views = tee(vec![1, 1, 2, 2, 2, 3], 2);
//! let right = views.pop().unwrap();
//! let left = views.pop().unwrap();
//!
//! // Each view replays the full sequence independently.
//! let raw: Vec<i32> = left.map(Result::unwrap).collect();
//! assert_eq!(raw, vec![1, 1, 2, 2, 2, 3]);
//!
//! // Group one view into runs.
//! let runs: Vec<(i32, usize)> = groupby(right.map(Result::unwrap))
//!     .map(|pair| {
//!         let (key, group) = pair.unwrap();
//!         (key, group.count())
//!     })
//!     .collect();
//! assert_eq!(runs, vec![(1, 2), (2, 3), (3, 1)]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod combinatoric;
pub mod error;
pub mod grouping;
pub mod infinite;
pub mod source;
pub mod tee;
pub mod terminating;

#[cfg(test)]
mod tests;

pub use combinatoric::{
    combinations, combinations_with_replacement, permutations, Combinations,
    CombinationsWithReplacement, Permutations, Product,
};
pub use error::{PullResult, SourceError};
pub use grouping::{groupby, groupby_key, identity_key, Batched, Group, GroupBy, Pairwise};
pub use infinite::{count, cycle, Count, Cycle, Repeat};
pub use source::{from_fn, FromFn, IterSource, Source, TryIterSource};
pub use tee::{tee, tee_source, Tee};
pub use terminating::{
    chain, chain_from_iterable, Accumulate, Chain, Compress, DropWhile, EitherOrBoth, FilterFalse,
    ISlice, Starmap, TakeWhile, ZipLongest,
};
