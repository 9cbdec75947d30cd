//! Genre affinity and history-based recommendations for FilmForge.
//!
//! This crate provides:
//! - AffinityGraph, an undirected genre graph built from GenreRelations
//! - UserContext and build_user_context for per-request history summaries
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Recommender, which ties them together
//!
//! ## Example Usage
//! ```ignore
//! use recommend::{AffinityGraph, GenreRelations, Recommender};
//!
//! let graph = AffinityGraph::new(&GenreRelations::default());
//! let recommender = Recommender::new(graph);
//!
//! let rec = recommender.recommend("alice", &index.all_in_order(), &history);
//! if let Some(genre) = &rec.top_genre {
//!     println!("{}: {} picks", genre, rec.movies.len());
//! }
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod graph;
pub mod recommender;
pub mod traits;
pub mod user_context;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use graph::{AffinityGraph, GenreRelations};
pub use recommender::{Recommendation, Recommender};
pub use traits::Filter;
pub use user_context::{UserContext, build_user_context};
