//! Filter to keep only movies of the user's top genre.

use crate::traits::Filter;
use crate::user_context::UserContext;
use data_loader::MovieRef;

/// Keeps candidates whose genre equals the context's top genre exactly
/// (case-sensitive). With no top genre nothing survives.
pub struct GenreMatchFilter;

impl Filter for GenreMatchFilter {
    fn name(&self) -> &str {
        "GenreMatchFilter"
    }

    fn apply(&self, candidates: Vec<MovieRef>, context: &UserContext) -> Vec<MovieRef> {
        let Some(top) = context.top_genre() else {
            return Vec::new();
        };
        candidates
            .into_iter()
            .filter(|movie| movie.genre == top)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Movie;
    use std::sync::Arc;

    fn candidates() -> Vec<MovieRef> {
        vec![
            Arc::new(Movie::new(1, "Alien", "Horror", "a", 0)),
            Arc::new(Movie::new(2, "Heat", "Action", "b", 0)),
            Arc::new(Movie::new(3, "Quiet Place", "horror", "c", 0)),
        ]
    }

    #[test]
    fn test_keeps_top_genre_only() {
        let mut context = UserContext::new("alice");
        context.record_watch(9, Some("Horror"));

        let filtered = GenreMatchFilter.apply(candidates(), &context);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_no_top_genre_keeps_nothing() {
        let context = UserContext::new("alice");
        assert!(GenreMatchFilter.apply(candidates(), &context).is_empty());
    }
}
