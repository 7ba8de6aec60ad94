//! Combinatorial enumerators.
//!
//! Provides [`Combinations`], [`CombinationsWithReplacement`],
//! [`Permutations`], and [`Product`] — ordered tuple generators over a fixed
//! pool captured at construction.
//!
//! # Performance Characteristics
//!
//! | Enumerator | Output Size | Space |
//! |------------|-------------|-------|
//! | `Combinations(n, r)` | C(n,r) | O(r) indices + O(n) pool |
//! | `CombinationsWithReplacement(n, r)` | C(n+r-1,r) | O(r) indices + O(n) pool |
//! | `Permutations(n, r)` | n!/(n-r)! | O(n) indices + O(n) pool |
//! | `Product` (n pools, each k) | k^n | O(n) indices + O(k*n) pools |
//!
//! All state lives in flat index arrays (`SmallVec`, stack-allocated for
//! small `r`) advanced by deterministic lexicographic successor functions.
//! Exhaustion is sticky: once no successor exists, the enumerator stays
//! exhausted.

use smallvec::SmallVec;

/// Stack-allocated index threshold. For r <= 8, indices live on the stack.
const SMALL_INDEX: usize = 8;

type IndexVec = SmallVec<[usize; SMALL_INDEX]>;

// =============================================================================
// Combinations
// =============================================================================

/// Successive r-length combinations of pool elements, in lexicographic order
/// of positions.
///
/// Each output is represented internally by `r` strictly increasing indices
/// `i_0 < i_1 < ... < i_{r-1}` into the pool. `r = 0` yields exactly one
/// empty tuple; `r > n` yields nothing at all.
///
/// # Examples
/// ```
/// use lazyseq::combinations;
///
/// let tuples: Vec<Vec<u32>> = combinations(0..4, 3).collect();
/// assert_eq!(
///     tuples,
///     vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Combinations<T> {
    pool: Vec<T>,
    indices: IndexVec,
    r: usize,
    first: bool,
    done: bool,
}

/// Create r-length combinations of an iterable's elements.
///
/// The pool is captured eagerly: later changes to the original input cannot
/// affect the enumeration.
pub fn combinations<I>(pool: I, r: usize) -> Combinations<I::Item>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Combinations::new(pool.into_iter().collect(), r)
}

impl<T: Clone> Combinations<T> {
    /// Create r-length combinations from the pool.
    pub fn new(pool: Vec<T>, r: usize) -> Self {
        let n = pool.len();
        if r > n {
            return Self {
                pool,
                indices: IndexVec::new(),
                r,
                first: true,
                done: true,
            };
        }

        let mut indices = IndexVec::with_capacity(r);
        for i in 0..r {
            indices.push(i);
        }

        Self {
            pool,
            indices,
            r,
            first: true,
            done: false,
        }
    }

    /// Build the current tuple from indices.
    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }
}

impl<T: Clone> Iterator for Combinations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            if self.r == 0 {
                self.done = true;
                return Some(Vec::new());
            }
            return Some(self.current_tuple());
        }

        let n = self.pool.len();

        // Find the rightmost index not yet at its maximum feasible value
        let mut i = self.r;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != i + n - self.r {
                break;
            }
        }

        // Increment it and reset all indices to its right
        self.indices[i] += 1;
        for j in (i + 1)..self.r {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        Some(self.current_tuple())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<T: Clone> std::iter::FusedIterator for Combinations<T> {}

// =============================================================================
// CombinationsWithReplacement
// =============================================================================

/// Successive r-length combinations with repetition allowed.
///
/// Indices form a non-decreasing sequence `i_0 <= i_1 <= ... <= i_{r-1}`, so
/// unlike [`Combinations`] an `r` larger than the pool is enumerable.
///
/// # Examples
/// ```
/// use lazyseq::combinations_with_replacement;
///
/// let pairs: Vec<String> = combinations_with_replacement("ABC".chars(), 2)
///     .map(|t| t.into_iter().collect())
///     .collect();
/// assert_eq!(pairs, vec!["AA", "AB", "AC", "BB", "BC", "CC"]);
/// ```
#[derive(Debug, Clone)]
pub struct CombinationsWithReplacement<T> {
    pool: Vec<T>,
    indices: IndexVec,
    r: usize,
    first: bool,
    done: bool,
}

/// Create r-length combinations with replacement of an iterable's elements.
pub fn combinations_with_replacement<I>(pool: I, r: usize) -> CombinationsWithReplacement<I::Item>
where
    I: IntoIterator,
    I::Item: Clone,
{
    CombinationsWithReplacement::new(pool.into_iter().collect(), r)
}

impl<T: Clone> CombinationsWithReplacement<T> {
    /// Create r-length combinations with replacement.
    pub fn new(pool: Vec<T>, r: usize) -> Self {
        if pool.is_empty() && r > 0 {
            return Self {
                pool,
                indices: IndexVec::new(),
                r,
                first: true,
                done: true,
            };
        }

        let mut indices = IndexVec::with_capacity(r);
        indices.resize(r, 0);

        Self {
            pool,
            indices,
            r,
            first: true,
            done: false,
        }
    }

    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }
}

impl<T: Clone> Iterator for CombinationsWithReplacement<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            if self.r == 0 {
                self.done = true;
                return Some(Vec::new());
            }
            return Some(self.current_tuple());
        }

        let n = self.pool.len();

        // Find the rightmost index that can still grow
        let mut i = self.r;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != n - 1 {
                break;
            }
        }

        // Increment it and flood all following positions with the new value
        let new_val = self.indices[i] + 1;
        for j in i..self.r {
            self.indices[j] = new_val;
        }

        Some(self.current_tuple())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<T: Clone> std::iter::FusedIterator for CombinationsWithReplacement<T> {}

// =============================================================================
// Permutations
// =============================================================================

/// Successive r-length permutations of pool elements.
///
/// Advances with the directed-swap algorithm: a full index array of length
/// `n` plus a countdown array `cycles` of length `r`, where `cycles[i]`
/// starts at `n - i`. Each step decrements the rightmost live countdown,
/// rotating the index suffix when it hits zero and swapping otherwise.
///
/// `r` defaults to the pool length ([`Permutations::full`]); `r > n` yields
/// nothing; `r = 0` yields exactly one empty tuple.
///
/// # Examples
/// ```
/// use lazyseq::permutations;
///
/// let pairs: Vec<Vec<u32>> = permutations(0..3, 2).collect();
/// assert_eq!(
///     pairs,
///     vec![
///         vec![0, 1], vec![0, 2], vec![1, 0],
///         vec![1, 2], vec![2, 0], vec![2, 1],
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    pool: Vec<T>,
    indices: Vec<usize>,
    cycles: Vec<usize>,
    r: usize,
    first: bool,
    done: bool,
}

/// Create r-length permutations of an iterable's elements.
///
/// Pass `None` for `r` to permute the whole pool.
pub fn permutations<I>(pool: I, r: impl Into<Option<usize>>) -> Permutations<I::Item>
where
    I: IntoIterator,
    I::Item: Clone,
{
    let pool: Vec<I::Item> = pool.into_iter().collect();
    match r.into() {
        Some(r) => Permutations::new(pool, r),
        None => Permutations::full(pool),
    }
}

impl<T: Clone> Permutations<T> {
    /// Create permutations of length `r` from the pool.
    pub fn new(pool: Vec<T>, r: usize) -> Self {
        let n = pool.len();
        if r > n {
            return Self {
                pool,
                indices: Vec::new(),
                cycles: Vec::new(),
                r,
                first: true,
                done: true,
            };
        }

        let indices: Vec<usize> = (0..n).collect();
        let cycles: Vec<usize> = (n - r + 1..=n).rev().collect();

        Self {
            pool,
            indices,
            cycles,
            r,
            first: true,
            done: false,
        }
    }

    /// Create full-length permutations.
    pub fn full(pool: Vec<T>) -> Self {
        let r = pool.len();
        Self::new(pool, r)
    }

    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices[..self.r]
            .iter()
            .map(|&i| self.pool[i].clone())
            .collect()
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            return Some(self.current_tuple());
        }

        let n = self.pool.len();

        // Directed-swap advance: scan countdowns right to left
        for i in (0..self.r).rev() {
            self.cycles[i] -= 1;
            if self.cycles[i] == 0 {
                // Rotate indices[i..n] left by 1 and reset the countdown
                let saved = self.indices[i];
                for j in i..n - 1 {
                    self.indices[j] = self.indices[j + 1];
                }
                self.indices[n - 1] = saved;
                self.cycles[i] = n - i;
            } else {
                let j = n - self.cycles[i];
                self.indices.swap(i, j);
                return Some(self.current_tuple());
            }
        }

        self.done = true;
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<T: Clone> std::iter::FusedIterator for Permutations<T> {}

// =============================================================================
// Product
// =============================================================================

/// Cartesian product of input pools.
///
/// # Algorithm
///
/// Odometer-style index advancement: the rightmost index increments first,
/// cascading left on overflow, which produces lexicographic order over pool
/// positions.
#[derive(Debug, Clone)]
pub struct Product<T> {
    pools: Vec<Vec<T>>,
    indices: IndexVec,
    done: bool,
    first: bool,
}

impl<T: Clone> Product<T> {
    /// Create a Cartesian product from multiple pools.
    pub fn new(pools: Vec<Vec<T>>) -> Self {
        // If any pool is empty, the product is empty
        let done = pools.iter().any(Vec::is_empty);
        let n = pools.len();
        let mut indices = IndexVec::with_capacity(n);
        indices.resize(n, 0);

        Self {
            pools,
            indices,
            done,
            first: true,
        }
    }

    /// Create the product of one pool with itself, `repeat` times.
    pub fn with_repeat(pool: Vec<T>, repeat: usize) -> Self {
        let pools = vec![pool; repeat];
        Self::new(pools)
    }

    /// Total number of tuples the product yields.
    pub fn total_size(&self) -> usize {
        if self.pools.is_empty() {
            return 1; // empty product yields one empty tuple
        }
        self.pools.iter().map(Vec::len).product()
    }

    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices
            .iter()
            .zip(self.pools.iter())
            .map(|(&idx, pool)| pool[idx].clone())
            .collect()
    }

    /// Advance the odometer indices (rightmost first).
    #[inline]
    fn advance(&mut self) -> bool {
        for i in (0..self.indices.len()).rev() {
            self.indices[i] += 1;
            if self.indices[i] < self.pools[i].len() {
                return true;
            }
            self.indices[i] = 0;
        }
        false // all indices wrapped around
    }
}

impl<T: Clone> Iterator for Product<T> {
    type Item = Vec<T>;

    #[inline]
    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            if self.pools.is_empty() {
                self.done = true;
                return Some(Vec::new()); // single empty tuple
            }
            return Some(self.current_tuple());
        }

        if self.advance() {
            Some(self.current_tuple())
        } else {
            self.done = true;
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            let total = self.total_size();
            (total, Some(total))
        }
    }
}

impl<T: Clone> std::iter::FusedIterator for Product<T> {}

// =============================================================================
// Tests
// =============================================================================
