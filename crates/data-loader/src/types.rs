//! Core domain types for the FilmForge catalog.
//!
//! Every index in the workspace is built from the same [`Movie`] records.
//! Records are wrapped in an [`Arc`] once, at load time, and that shared
//! snapshot is what the catalog store, the search indices and the ranker hold.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie, assigned by the loader.
///
/// This is the join key across every index.
pub type MovieId = u32;

/// Login name used by the credential and watch-history stores.
pub type Username = String;

/// Shared, read-only handle to a catalog record.
///
/// Indices clone the handle, never the record.
pub type MovieRef = Arc<Movie>;

// =============================================================================
// Movie
// =============================================================================

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Display title, already decoded (`_` in the file becomes a space).
    pub title: String,
    pub genre: String,
    /// File path or URL. Carried through, never interpreted.
    pub locator: String,
    /// View count at load time. Indices rank on this snapshot.
    pub view_count: u64,
    /// Present in some catalogs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Movie {
    /// Create a record without a rating.
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        genre: impl Into<String>,
        locator: impl Into<String>,
        view_count: u64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre: genre.into(),
            locator: locator.into(),
            view_count,
            rating: None,
        }
    }

    /// Attach a rating (builder style).
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Lowercased title, the normalized form used by search and autocomplete.
    pub fn normalized_title(&self) -> String {
        self.title.to_lowercase()
    }

    /// Lowercased genre.
    pub fn normalized_genre(&self) -> String {
        self.genre.to_lowercase()
    }
}

impl AsRef<Movie> for Movie {
    fn as_ref(&self) -> &Movie {
        self
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Everything read from a data directory in one pass.
///
/// The movies are handed to the index builder; the other two collections seed
/// the credential and watch-history stores.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub movies: Vec<Movie>,
    /// `(username, password)` pairs in file order.
    pub credentials: Vec<(Username, String)>,
    /// `(username, movie id)` views in file order, oldest first.
    pub history: Vec<(Username, MovieId)>,
}

impl Dataset {
    /// Counts for logging: `(movies, users, views)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.movies.len(), self.credentials.len(), self.history.len())
    }
}
