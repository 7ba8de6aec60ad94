//! Integration tests spanning multiple adaptors.
//!
//! These verify cross-component interactions and pipeline patterns; the
//! per-adaptor behavior lives in each module's own test block.

use crate::combinatoric::{combinations, combinations_with_replacement, permutations, Product};
use crate::grouping::{groupby, groupby_key, Batched, Pairwise};
use crate::infinite::{count, cycle, Repeat};
use crate::source::{from_fn, IterSource};
use crate::tee::{tee, tee_source};
use crate::terminating::{chain, Accumulate, Compress, DropWhile, ISlice, TakeWhile};
use std::cell::Cell;
use std::rc::Rc;

// =============================================================================
// Count + bounding adaptors
// =============================================================================

#[test]
fn test_count_takewhile() {
    let result: Vec<i64> = TakeWhile::new(count(0i64, 1), |&v| v < 5).collect();
    assert_eq!(result, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_count_islice() {
    let result: Vec<i64> = ISlice::new(count(0i64, 1), 10, Some(20), 3).collect();
    assert_eq!(result, vec![10, 13, 16, 19]);
}

// =============================================================================
// Cycle + ISlice
// =============================================================================

#[test]
fn test_cycle_islice() {
    let result: Vec<i64> = ISlice::new_stop(cycle(vec![1i64, 2, 3]), 7).collect();
    assert_eq!(result, vec![1, 2, 3, 1, 2, 3, 1]);
}

// =============================================================================
// Repeat + Compress
// =============================================================================

#[test]
fn test_repeat_as_selector() {
    let data = vec![10i64, 20, 30, 40, 50];
    // Compress stops when the shorter input (the selectors) ends.
    let result: Vec<i64> = Compress::new(data.into_iter(), Repeat::times(true, 3)).collect();
    assert_eq!(result, vec![10, 20, 30]);
}

// =============================================================================
// Tee + downstream adaptors
// =============================================================================

#[test]
fn test_tee_views_drive_different_pipelines() {
    let mut views = tee(vec![1i64, 2, 3, 4, 5, 6], 2);
    let evens_view = views.pop().unwrap();
    let sums_view = views.pop().unwrap();

    let evens: Vec<i64> = evens_view
        .map(Result::unwrap)
        .filter(|v| v % 2 == 0)
        .collect();
    let sums: Vec<i64> =
        Accumulate::new(sums_view.map(Result::unwrap), |a, b| a + b).collect();

    assert_eq!(evens, vec![2, 4, 6]);
    assert_eq!(sums, vec![1, 3, 6, 10, 15, 21]);
}

#[test]
fn test_tee_over_infinite_count() {
    let mut views = tee_source(IterSource::new(count(0i64, 1)), 2);
    let mut b = views.pop().unwrap();
    let mut a = views.pop().unwrap();

    let first_five: Vec<i64> = (&mut a).take(5).map(Result::unwrap).collect();
    assert_eq!(first_five, vec![0, 1, 2, 3, 4]);
    // The sibling starts from the beginning, served from the buffer.
    assert_eq!(b.pull().unwrap(), Some(0));
    assert_eq!(a.pull().unwrap(), Some(5));
}

#[test]
fn test_tee_then_groupby_one_view() {
    let mut views = tee(vec![1i64, 1, 2, 2, 2, 3], 2);
    let grouped_view = views.pop().unwrap();
    let raw_view = views.pop().unwrap();

    let runs: Vec<(i64, usize)> = groupby(grouped_view.map(Result::unwrap))
        .map(|pair| {
            let (key, group) = pair.unwrap();
            (key, group.count())
        })
        .collect();
    assert_eq!(runs, vec![(1, 2), (2, 3), (3, 1)]);

    let raw: Vec<i64> = raw_view.map(Result::unwrap).collect();
    assert_eq!(raw, vec![1, 1, 2, 2, 2, 3]);
}

// =============================================================================
// GroupBy pipelines
// =============================================================================

#[test]
fn test_groupby_then_count_groups() {
    let runs: Vec<(i64, usize)> = groupby(vec![1i64, 1, 2, 2, 2, 3, 3, 1])
        .map(|pair| {
            let (key, group) = pair.unwrap();
            (key, group.count())
        })
        .collect();
    assert_eq!(runs, vec![(1, 2), (2, 3), (3, 2), (1, 1)]);
}

#[test]
fn test_groupby_over_lazy_source_pulls_on_demand() {
    let pulls = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&pulls);
    let mut n = 0i64;
    let source = from_fn(move || {
        counter.set(counter.get() + 1);
        n += 1;
        if n <= 6 {
            Ok(Some(n / 3)) // keys: 0 0 1 1 1 2
        } else {
            Ok(None)
        }
    });
    let mut outer = crate::GroupBy::new(source, crate::identity_key);

    let (k, mut g) = outer.pull().unwrap().unwrap();
    assert_eq!(k, 0);
    // Creating the first group costs exactly one source pull (its first element).
    assert_eq!(pulls.get(), 1);
    assert_eq!(g.pull().unwrap(), Some(0));
    assert_eq!(pulls.get(), 1);
    assert_eq!(g.pull().unwrap(), Some(0));
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_groupby_batched_keys() {
    let keys = groupby_key(0i64..12, |v| v / 3).map(|pair| pair.unwrap().0);
    let batches: Vec<Vec<i64>> = Batched::new(keys, 2).collect();
    assert_eq!(batches, vec![vec![0, 1], vec![2, 3]]);
}

// =============================================================================
// Pairwise + accumulate
// =============================================================================

#[test]
fn test_pairwise_differences_invert_running_sum() {
    let data = vec![3i64, 1, 4, 1, 5];
    let sums: Vec<i64> = Accumulate::new(data.clone().into_iter(), |a, b| a + b).collect();
    let mut diffs: Vec<i64> = Pairwise::new(sums.clone().into_iter())
        .map(|(a, b)| b - a)
        .collect();
    diffs.insert(0, sums[0]);
    assert_eq!(diffs, data);
}

// =============================================================================
// Combinatoric pipelines
// =============================================================================

#[test]
fn test_combinations_count_with_sum() {
    // How many pairs from [1,2,3,4,5] sum to >= 7?
    let matches = combinations(1i64..=5, 2)
        .filter(|c| c.iter().sum::<i64>() >= 7)
        .count();
    assert_eq!(matches, 4); // (2,5), (3,4), (3,5), (4,5)
}

#[test]
fn test_product_filter_diagonal() {
    let p = Product::with_repeat(vec![0i64, 1, 2], 2);
    let off_diagonal = p.filter(|t| t[0] != t[1]).count();
    assert_eq!(off_diagonal, 6); // 9 - 3 diagonal
}

#[test]
fn test_permutations_are_distinct_combinations_ordered() {
    // Every 2-permutation of a 4-pool is a 2-combination in some order.
    let mut perms: Vec<Vec<i64>> = permutations(0i64..4, 2)
        .map(|mut t| {
            t.sort_unstable();
            t
        })
        .collect();
    perms.sort();
    perms.dedup();
    let combs: Vec<Vec<i64>> = combinations(0i64..4, 2).collect();
    assert_eq!(perms, combs);
}

#[test]
fn test_cwr_contains_plain_combinations() {
    let combs: Vec<Vec<i64>> = combinations(0i64..4, 2).collect();
    let with_repl: Vec<Vec<i64>> = combinations_with_replacement(0i64..4, 2).collect();
    for c in &combs {
        assert!(with_repl.contains(c));
    }
    assert_eq!(with_repl.len(), combs.len() + 4); // plus the 4 doubled pairs
}

#[test]
fn test_combinations_of_teed_view() {
    let mut views = tee(vec![10i64, 20, 30], 2);
    let pool_view = views.pop().unwrap();
    let other = views.pop().unwrap();

    let pool: Vec<i64> = pool_view.map(Result::unwrap).collect();
    let pairs = combinations(pool, 2).count();
    assert_eq!(pairs, 3);
    assert_eq!(other.map(Result::unwrap).count(), 3);
}

// =============================================================================
// Chain + DropWhile boundary
// =============================================================================

#[test]
fn test_chain_dropwhile() {
    let result: Vec<i64> =
        DropWhile::new(chain(vec![1i64, 2], vec![3, 4, 1]), |&v| v < 3).collect();
    assert_eq!(result, vec![3, 4, 1]);
}

// =============================================================================
// Stress
// =============================================================================

#[test]
fn test_three_way_tee_stress() {
    let data: Vec<i64> = (0..10_000).collect();
    let mut views = tee(data.clone(), 3);
    let c = views.pop().unwrap();
    let b = views.pop().unwrap();
    let a = views.pop().unwrap();

    // Interleave: a fully first (forcing the whole buffer), then b and c.
    assert_eq!(a.map(Result::unwrap).collect::<Vec<_>>(), data);
    assert_eq!(b.map(Result::unwrap).collect::<Vec<_>>(), data);
    assert_eq!(c.map(Result::unwrap).collect::<Vec<_>>(), data);
}

#[test]
fn test_groupby_long_runs_stream_without_materializing() {
    // 1000 runs of length 100 each; groups are consumed as windows.
    let source = (0i64..100_000).map(|i| i / 100);
    let runs: Vec<(i64, usize)> = groupby(source)
        .map(|pair| {
            let (key, group) = pair.unwrap();
            (key, group.count())
        })
        .collect();
    assert_eq!(runs.len(), 1000);
    assert!(runs.iter().all(|&(_, len)| len == 100));
}
