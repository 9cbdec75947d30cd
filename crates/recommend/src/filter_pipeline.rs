//! The FilterPipeline chains filters in the order they were added.

use crate::traits::Filter;
use crate::user_context::UserContext;
use data_loader::MovieRef;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreMatchFilter)
///     .add_filter(AlreadyWatchedFilter);
///
/// let picks = pipeline.apply(catalog, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the stages, in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Stops early once a stage leaves nothing behind.
    pub fn apply(&self, candidates: Vec<MovieRef>, context: &UserContext) -> Vec<MovieRef> {
        let mut current = candidates;
        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            let before = current.len();
            current = filter.apply(current, context);
            debug!(
                "Filter {} kept {} of {} candidates",
                filter.name(),
                current.len(),
                before
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlreadyWatchedFilter, GenreMatchFilter};
    use data_loader::Movie;
    use std::sync::Arc;

    fn candidates() -> Vec<MovieRef> {
        vec![
            Arc::new(Movie::new(1, "Inception", "Sci-Fi", "a", 10)),
            Arc::new(Movie::new(2, "Heat", "Action", "b", 20)),
            Arc::new(Movie::new(3, "Interstellar", "Sci-Fi", "c", 30)),
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = UserContext::new("alice");
        assert_eq!(pipeline.apply(candidates(), &context).len(), 3);
    }

    #[test]
    fn test_filters_run_in_order() {
        let mut context = UserContext::new("alice");
        context.record_watch(1, Some("Sci-Fi"));

        let pipeline = FilterPipeline::new()
            .add_filter(GenreMatchFilter)
            .add_filter(AlreadyWatchedFilter);
        assert_eq!(
            pipeline.filter_names(),
            vec!["GenreMatchFilter", "AlreadyWatchedFilter"]
        );

        let picks = pipeline.apply(candidates(), &context);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, 3);
    }
}
