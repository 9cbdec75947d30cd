//! Core traits for the recommendation pipeline.

use crate::user_context::UserContext;
use data_loader::MovieRef;

/// One stage of candidate filtering.
///
/// Filters take ownership of the candidate list and hand back the survivors
/// in their original order. No stage can fail: a filter that has nothing to
/// work with returns an empty list.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    fn apply(&self, candidates: Vec<MovieRef>, context: &UserContext) -> Vec<MovieRef>;
}
