//! # Data Loader Crate
//!
//! This crate owns the canonical catalog record and everything that reads the
//! FilmForge data directory. The query engine never touches the filesystem;
//! it is built from the [`Movie`] values produced here.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, MovieRef, Dataset)
//! - **parser**: Parse the whitespace-delimited data files
//! - **loader**: Load a whole data directory in parallel
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_from_dir;
//! use std::path::Path;
//!
//! let dataset = load_from_dir(Path::new("data"))?;
//! println!("{} movies", dataset.movies.len());
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::load_from_dir;
pub use types::{Dataset, Movie, MovieId, MovieRef, Username};
