//! MovieIndex - one record set, four structures.
//!
//! The catalog store is the gatekeeper: a record reaches the prefix index,
//! the inverted index and the trending ranker only if the store accepted it.
//! That keeps every id reachable from one structure reachable from all of
//! them, and keeps the first record for a duplicated id everywhere.

use crate::catalog::CatalogStore;
use crate::inverted::InvertedIndex;
use crate::prefix::PrefixIndex;
use crate::sorter;
use crate::trending::TrendingRanker;
use data_loader::{Movie, MovieId, MovieRef};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// In-memory query engine over a movie catalog.
///
/// Not synchronized: callers that insert while others query must wrap the
/// whole index in a lock (e.g. `RwLock<MovieIndex>`).
#[derive(Debug, Default)]
pub struct MovieIndex {
    catalog: CatalogStore,
    prefix: PrefixIndex,
    inverted: InvertedIndex,
    trending: TrendingRanker,
}

impl MovieIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every structure from one record collection.
    ///
    /// Records are taken in the given (file) order; a later record with an
    /// already-seen id is skipped.
    #[instrument(skip(records))]
    pub fn build(records: impl IntoIterator<Item = Movie>) -> Self {
        let mut index = Self::new();
        let mut skipped = 0usize;
        for movie in records {
            if !index.insert(movie) {
                skipped += 1;
            }
        }
        info!(
            "Indexed {} movies ({} keys, {} duplicate ids skipped)",
            index.len(),
            index.inverted.key_count(),
            skipped
        );
        index
    }

    /// Add one record to every structure.
    ///
    /// Returns `false` if the id is already indexed; nothing changes then.
    pub fn insert(&mut self, movie: Movie) -> bool {
        let movie: MovieRef = Arc::new(movie);
        if !self.catalog.insert(movie.clone()) {
            debug!("Skipping duplicate movie id {}", movie.id);
            return false;
        }
        self.prefix.insert(&movie.title, movie.id);
        self.inverted.insert(movie.clone());
        self.trending.insert(movie);
        true
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Look up a record by id.
    pub fn find(&self, id: MovieId) -> Option<&MovieRef> {
        self.catalog.find(id)
    }

    /// Every record by ascending id.
    pub fn all_in_order(&self) -> Vec<MovieRef> {
        self.catalog.all_in_order()
    }

    /// Keyword search over titles, title words and genres.
    pub fn search(&self, query: &str) -> Vec<MovieRef> {
        self.inverted.search(query)
    }

    /// Ids of titles starting with `prefix`, ascending.
    pub fn autocomplete(&self, prefix: &str) -> Vec<MovieId> {
        let mut ids = self.prefix.autocomplete(prefix);
        ids.sort_unstable();
        ids
    }

    /// Records whose titles start with `prefix`, by ascending id.
    pub fn autocomplete_titles(&self, prefix: &str) -> Vec<MovieRef> {
        self.autocomplete(prefix)
            .into_iter()
            .filter_map(|id| self.catalog.find(id).cloned())
            .collect()
    }

    /// Up to `k` most-viewed records.
    pub fn trending(&self, k: usize) -> Vec<MovieRef> {
        self.trending.top(k)
    }

    /// The whole catalog, most-viewed first; equal counts stay in id order.
    pub fn sorted_by_views(&self) -> Vec<MovieRef> {
        let mut records = self.all_in_order();
        sorter::sort_by_popularity_descending(&mut records);
        records
    }

    /// The whole catalog by title. Equal titles come out in no fixed order.
    pub fn sorted_by_title(&self) -> Vec<MovieRef> {
        let mut records = self.all_in_order();
        sorter::sort_by_title_ascending(&mut records);
        records
    }
}
