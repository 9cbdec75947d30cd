//! Filter to remove movies the user has already watched.

use crate::traits::Filter;
use crate::user_context::UserContext;
use data_loader::MovieRef;

/// Removes candidates present in the user's history.
///
/// ## Algorithm
/// Uses the HashSet in UserContext.watched_movies for O(1) lookups.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply(&self, candidates: Vec<MovieRef>, context: &UserContext) -> Vec<MovieRef> {
        candidates
            .into_iter()
            .filter(|movie| !context.has_watched(movie.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Movie;
    use std::sync::Arc;

    #[test]
    fn test_already_watched_filter() {
        let mut context = UserContext::new("alice");
        context.record_watch(100, Some("Drama"));
        context.record_watch(200, None);

        let candidates: Vec<MovieRef> = [100, 101, 200, 300]
            .into_iter()
            .map(|id| Arc::new(Movie::new(id, format!("Film {}", id), "Drama", "x", 0)))
            .collect();

        let filtered = AlreadyWatchedFilter.apply(candidates, &context);
        let ids: Vec<u32> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![101, 300]);
    }
}
