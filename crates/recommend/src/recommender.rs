//! # Recommender
//!
//! Turns a watch history into a genre pick and a list of unseen movies.
//!
//! ## Algorithm
//! 1. Build a [`UserContext`]: watched ids plus a per-genre tally
//! 2. Pick the top genre (ties go to the genre met first in the history)
//! 3. Run the filter pipeline over the catalog in id order
//!    (default: genre match, then drop already-watched)
//! 4. Attach the top genre's neighbours from the affinity graph

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlreadyWatchedFilter, GenreMatchFilter};
use crate::graph::{AffinityGraph, GenreRelations};
use crate::user_context::build_user_context;
use data_loader::{MovieId, MovieRef};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, instrument};

/// Result of one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// `None` when the history resolved to no known genre.
    pub top_genre: Option<String>,
    /// Unseen movies of `top_genre`, by ascending id.
    pub movies: Vec<MovieRef>,
    /// Neighbours of `top_genre` in the affinity graph.
    pub related_genres: Vec<String>,
}

impl Recommendation {
    fn empty() -> Self {
        Self {
            top_genre: None,
            movies: Vec::new(),
            related_genres: Vec::new(),
        }
    }

    /// True when there is nothing to show: no top genre, or no unseen movie of it.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Owns the affinity graph and the filter pipeline.
pub struct Recommender {
    graph: AffinityGraph,
    pipeline: FilterPipeline,
}

impl Recommender {
    /// Recommender over the given graph with the default pipeline.
    pub fn new(graph: AffinityGraph) -> Self {
        Self {
            graph,
            pipeline: FilterPipeline::new()
                .add_filter(GenreMatchFilter)
                .add_filter(AlreadyWatchedFilter),
        }
    }

    /// Replace the filter pipeline (builder pattern).
    pub fn with_pipeline(mut self, pipeline: FilterPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn graph(&self) -> &AffinityGraph {
        &self.graph
    }

    /// Genres adjacent to `genre`.
    pub fn related_genres(&self, genre: &str) -> &[String] {
        self.graph.related_genres(genre)
    }

    /// Recommend from `all_records` (ascending id) given `watch_history`
    /// (most recent first).
    #[instrument(skip(self, all_records, watch_history), fields(history = watch_history.len()))]
    pub fn recommend(
        &self,
        username: &str,
        all_records: &[MovieRef],
        watch_history: &[MovieId],
    ) -> Recommendation {
        let start = Instant::now();
        let context = build_user_context(username, all_records, watch_history);
        let Some(top_genre) = context.top_genre().map(str::to_string) else {
            debug!("No known genre in history of {}", username);
            return Recommendation::empty();
        };

        let movies = self.pipeline.apply(all_records.to_vec(), &context);
        debug!(
            "Recommended {} {} movies to {} in {:.2?}",
            movies.len(),
            top_genre,
            username,
            start.elapsed()
        );

        Recommendation {
            related_genres: self.graph.related_genres(&top_genre).to_vec(),
            top_genre: Some(top_genre),
            movies,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(AffinityGraph::new(&GenreRelations::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Movie;
    use std::sync::Arc;

    fn catalog() -> Vec<MovieRef> {
        vec![
            Arc::new(Movie::new(1, "Inception", "Sci-Fi", "a", 5000)),
            Arc::new(Movie::new(2, "The Dark Knight", "Action", "b", 7000)),
            Arc::new(Movie::new(3, "Interstellar", "Sci-Fi", "c", 4500)),
            Arc::new(Movie::new(4, "Arrival", "Sci-Fi", "d", 3000)),
        ]
    }

    fn ids(movies: &[MovieRef]) -> Vec<MovieId> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_recommends_unseen_movies_of_top_genre() {
        let recommender = Recommender::default();
        let rec = recommender.recommend("alice", &catalog(), &[1]);
        assert_eq!(rec.top_genre.as_deref(), Some("Sci-Fi"));
        assert_eq!(ids(&rec.movies), vec![3, 4]);
        assert_eq!(rec.related_genres, vec!["Adventure"]);
    }

    #[test]
    fn test_empty_history_gives_empty_result() {
        let rec = Recommender::default().recommend("bob", &catalog(), &[]);
        assert_eq!(rec, Recommendation::empty());
        assert!(rec.is_empty());
    }

    #[test]
    fn test_unknown_history_gives_empty_result() {
        let rec = Recommender::default().recommend("bob", &catalog(), &[42, 43]);
        assert!(rec.top_genre.is_none());
        assert!(rec.is_empty());
    }

    #[test]
    fn test_everything_seen() {
        let rec = Recommender::default().recommend("carol", &catalog(), &[1, 3, 4]);
        assert_eq!(rec.top_genre.as_deref(), Some("Sci-Fi"));
        assert!(rec.is_empty());
    }

    #[test]
    fn test_custom_pipeline() {
        let recommender =
            Recommender::default().with_pipeline(FilterPipeline::new().add_filter(AlreadyWatchedFilter));
        let rec = recommender.recommend("dave", &catalog(), &[2]);
        assert_eq!(rec.top_genre.as_deref(), Some("Action"));
        assert_eq!(ids(&rec.movies), vec![1, 3, 4]);
        assert_eq!(rec.related_genres, vec!["Thriller", "Adventure"]);
    }
}
