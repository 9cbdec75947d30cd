//! # Index Crate
//!
//! The in-memory query engine behind FilmForge. It is built once from an
//! already-parsed record collection and never performs I/O.
//!
//! ## Components
//!
//! ### Catalog Store
//! AVL tree keyed by movie id: point lookup and in-order traversal.
//!
//! ### Prefix Index
//! Character trie over lowercased titles for autocomplete.
//!
//! ### Inverted Index
//! Hash index from title / title-word / genre keys to records, with exact
//! lookup first and a substring scan as fallback.
//!
//! ### Trending Ranker
//! Top-K by view count, ties in insertion order.
//!
//! ### Bulk Sorter
//! Stable popularity sort and unstable title sort over whole slices.
//!
//! ## Example Usage
//!
//! ```ignore
//! use index::MovieIndex;
//!
//! let index = MovieIndex::build(dataset.movies);
//! let hits = index.search("sci-fi");
//! let suggestions = index.autocomplete("inc");
//! let top = index.trending(10);
//! ```

pub mod catalog;
pub mod inverted;
pub mod movie_index;
pub mod prefix;
pub mod sorter;
pub mod trending;

// Re-export commonly used types
pub use catalog::CatalogStore;
pub use inverted::InvertedIndex;
pub use movie_index::MovieIndex;
pub use prefix::PrefixIndex;
pub use sorter::{sort_by_popularity_descending, sort_by_title_ascending};
pub use trending::TrendingRanker;
