//! Filter implementations for the recommendation pipeline.

pub mod already_watched;
pub mod genre_match;

// Re-export for convenience
pub use already_watched::AlreadyWatchedFilter;
pub use genre_match::GenreMatchFilter;
