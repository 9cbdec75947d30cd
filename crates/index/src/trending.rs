//! Trending Ranker - top-K records by view count.
//!
//! Ties are broken by insertion order: of two records with the same view
//! count, the one inserted first ranks higher. `top` only reads the pool, so
//! repeated calls with any `k` return consistent results.

use data_loader::MovieRef;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry {
    /// Snapshot taken at insert time.
    views: u64,
    seq: usize,
    movie: MovieRef,
}

/// Ranking key: higher views first, then earlier insertion first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank {
    views: u64,
    seq: usize,
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.views
            .cmp(&other.views)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pool of records ranked by view count.
#[derive(Debug, Default)]
pub struct TrendingRanker {
    pool: Vec<Entry>,
}

impl TrendingRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Add a record to the pool.
    pub fn insert(&mut self, movie: MovieRef) {
        self.pool.push(Entry {
            views: movie.view_count,
            seq: self.pool.len(),
            movie,
        });
    }

    /// Up to `k` records, highest view count first.
    ///
    /// Keeps a min-heap of the best `k` seen so far, so the cost is
    /// O(n log k) and the pool itself is never reordered.
    pub fn top(&self, k: usize) -> Vec<MovieRef> {
        let k = k.min(self.pool.len());
        if k == 0 {
            return Vec::new();
        }

        let mut best: BinaryHeap<Reverse<(Rank, usize)>> = BinaryHeap::with_capacity(k + 1);
        for (idx, entry) in self.pool.iter().enumerate() {
            let rank = Rank {
                views: entry.views,
                seq: entry.seq,
            };
            if best.len() < k {
                best.push(Reverse((rank, idx)));
            } else if best.peek().is_some_and(|Reverse((worst, _))| rank > *worst) {
                best.pop();
                best.push(Reverse((rank, idx)));
            }
        }

        // into_sorted_vec on Reverse yields best-first
        best.into_sorted_vec()
            .into_iter()
            .map(|Reverse((_, idx))| self.pool[idx].movie.clone())
            .collect()
    }
}
