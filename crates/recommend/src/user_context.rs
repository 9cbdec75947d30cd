//! Per-request user context built from a watch history.
//!
//! This is the "context builder" pattern: resolve the history against the
//! catalog once, then let every filter read the result through O(1) lookups.

use data_loader::{MovieId, MovieRef};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// What one user has watched, and how often per genre.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserContext {
    pub username: String,
    /// Every history id, including ids the catalog does not know.
    pub watched_movies: HashSet<MovieId>,
    /// Views per genre, in the order each genre was first met.
    pub genre_counts: Vec<(String, usize)>,
}

impl UserContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Count one watched movie. `genre` is `None` when the id is not in the
    /// catalog; an empty genre is not tallied either.
    pub fn record_watch(&mut self, id: MovieId, genre: Option<&str>) {
        self.watched_movies.insert(id);
        let Some(genre) = genre.filter(|g| !g.is_empty()) else {
            return;
        };
        match self.genre_counts.iter_mut().find(|(g, _)| g == genre) {
            Some((_, count)) => *count += 1,
            None => self.genre_counts.push((genre.to_string(), 1)),
        }
    }

    /// The most-watched genre. A tie goes to the genre met first.
    pub fn top_genre(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.genre_counts {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(genre, _)| genre.as_str())
    }

    pub fn has_watched(&self, id: MovieId) -> bool {
        self.watched_movies.contains(&id)
    }
}

/// Build a UserContext by resolving `history` against `all_records`.
///
/// `history` is walked in the order given (most recent first, as the server
/// keeps it). Ids missing from the catalog are marked watched but add no
/// genre count.
pub fn build_user_context(
    username: &str,
    all_records: &[MovieRef],
    history: &[MovieId],
) -> UserContext {
    let by_id: HashMap<MovieId, &MovieRef> = all_records.iter().map(|m| (m.id, m)).collect();

    let mut context = UserContext::new(username);
    for &id in history {
        let genre = by_id.get(&id).map(|m| m.genre.as_str());
        if genre.is_none() {
            debug!("History of {} names unknown movie {}", username, id);
        }
        context.record_watch(id, genre);
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Movie;
    use std::sync::Arc;

    fn catalog() -> Vec<MovieRef> {
        vec![
            Arc::new(Movie::new(1, "Inception", "Sci-Fi", "a", 1)),
            Arc::new(Movie::new(2, "Heat", "Action", "b", 1)),
            Arc::new(Movie::new(3, "Interstellar", "Sci-Fi", "c", 1)),
            Arc::new(Movie::new(4, "Ronin", "Action", "d", 1)),
        ]
    }

    #[test]
    fn test_counts_genres_in_first_met_order() {
        let context = build_user_context("alice", &catalog(), &[2, 1, 3]);
        assert_eq!(
            context.genre_counts,
            vec![("Action".to_string(), 1), ("Sci-Fi".to_string(), 2)]
        );
        assert_eq!(context.top_genre(), Some("Sci-Fi"));
        assert!(context.has_watched(1));
        assert!(!context.has_watched(4));
    }

    #[test]
    fn test_tie_goes_to_first_met_genre() {
        let context = build_user_context("alice", &catalog(), &[2, 1, 4, 3]);
        assert_eq!(context.top_genre(), Some("Action"));

        let context = build_user_context("alice", &catalog(), &[1, 2]);
        assert_eq!(context.top_genre(), Some("Sci-Fi"));
    }

    #[test]
    fn test_unknown_ids_are_watched_but_not_counted() {
        let context = build_user_context("bob", &catalog(), &[99, 2]);
        assert!(context.has_watched(99));
        assert_eq!(context.genre_counts, vec![("Action".to_string(), 1)]);

        let context = build_user_context("bob", &catalog(), &[99]);
        assert_eq!(context.top_genre(), None);
    }

    #[test]
    fn test_empty_history() {
        let context = build_user_context("carol", &catalog(), &[]);
        assert_eq!(context.username, "carol");
        assert!(context.watched_movies.is_empty());
        assert_eq!(context.top_genre(), None);
    }

    #[test]
    fn test_empty_genre_is_not_tallied() {
        let mut context = UserContext::new("dave");
        context.record_watch(7, Some(""));
        assert!(context.has_watched(7));
        assert_eq!(context.top_genre(), None);
    }
}
