//! Inverted Index - keyword search over titles, title words and genres.
//!
//! ## Keys
//! Every record is filed under three kinds of lowercase key:
//! 1. the full title
//! 2. each whitespace-delimited word of the title
//! 3. the genre
//!
//! ## Search
//! An exact key hit is answered from the hash map. Anything else falls back
//! to a scan of every key containing the query as a substring. That scan is
//! linear in the number of distinct keys; it is the price of partial-match
//! recall and the known scaling limit of this index.
//!
//! Results are de-duplicated by id and returned in ascending id order.

use data_loader::{Movie, MovieRef};
use std::collections::HashMap;
use tracing::debug;

/// One-to-many map from normalized key to the records filed under it.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<MovieRef>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `records`.
    pub fn build<'a>(records: impl IntoIterator<Item = &'a MovieRef>) -> Self {
        let mut index = Self::new();
        for movie in records {
            index.insert(movie.clone());
        }
        index
    }

    /// File one record under all of its keys.
    pub fn insert(&mut self, movie: MovieRef) {
        for key in index_keys(&movie) {
            self.postings.entry(key).or_default().push(movie.clone());
        }
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Search for `query` (case-insensitive).
    ///
    /// Exact key matches take priority; otherwise every key containing the
    /// query contributes. Never fails: no match is an empty result.
    pub fn search(&self, query: &str) -> Vec<MovieRef> {
        let query = query.to_lowercase();

        let mut results: Vec<MovieRef> = match self.postings.get(&query) {
            Some(exact) => exact.clone(),
            None => {
                debug!("No exact key for {:?}, scanning {} keys", query, self.postings.len());
                self.postings
                    .iter()
                    .filter(|(key, _)| key.contains(query.as_str()))
                    .flat_map(|(_, movies)| movies.iter().cloned())
                    .collect()
            }
        };

        // Stable sort keeps the first occurrence of each id at the front of its run
        results.sort_by_key(|m| m.id);
        results.dedup_by_key(|m| m.id);
        results
    }
}

/// All distinct keys a record is filed under.
fn index_keys(movie: &Movie) -> Vec<String> {
    let title = movie.normalized_title();
    let mut keys: Vec<String> = title.split_whitespace().map(str::to_string).collect();
    keys.push(title);
    keys.push(movie.normalized_genre());
    // "Inception" is both a word and the full title; "Action Man" shares a key with its genre
    keys.sort_unstable();
    keys.dedup();
    keys
}
