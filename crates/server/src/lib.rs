//! Server crate for the FilmForge catalog.
//!
//! This crate wraps the index and the recommender in the line-oriented
//! command protocol, and owns the two pieces of mutable user state the
//! core never touches: credentials and watch history.
//!
//! ## Example Usage
//! ```ignore
//! use server::FilmForge;
//!
//! let mut engine = FilmForge::open(Path::new("data"), None)?;
//! println!("{}", engine.handle_line("TRENDING 5"));
//! ```

pub mod auth;
pub mod command;
pub mod engine;
pub mod history;
mod persist;
pub mod response;

pub use auth::CredentialStore;
pub use command::{Command, CommandError};
pub use engine::FilmForge;
pub use history::WatchHistory;
pub use response::Response;
