//! Loading a FilmForge data directory.
//!
//! A data directory holds `movies.txt`, `users.txt` and `history.txt`. The
//! three files are independent, so they are parsed in parallel with Rayon.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Load every data file under `data_dir`.
///
/// The catalog file must exist; a missing users or history file is treated as
/// empty, which is the state of a fresh install.
pub fn load_from_dir(data_dir: &Path) -> Result<Dataset> {
    info!("Loading FilmForge data from {:?}", data_dir);

    let movies_path = parser::movies_path(data_dir);
    let users_path = parser::users_path(data_dir);
    let history_path = parser::history_path(data_dir);

    // Nested joins give three-way parallelism
    let ((movies, credentials), history) = rayon::join(
        || {
            rayon::join(
                || parser::parse_movies(&movies_path),
                || parser::parse_credentials(&users_path),
            )
        },
        || parser::parse_history(&history_path),
    );

    let dataset = Dataset {
        movies: movies?,
        credentials: credentials?,
        history: history?,
    };

    report_duplicate_ids(&dataset.movies);

    let (movies, users, views) = dataset.counts();
    info!("Loaded {} movies, {} users, {} views", movies, users, views);
    Ok(dataset)
}

/// Duplicate ids are legal input (the catalog keeps the first), but they
/// usually mean a hand-edited file went wrong.
fn report_duplicate_ids(movies: &[Movie]) {
    let mut seen = HashSet::with_capacity(movies.len());
    for movie in movies {
        if !seen.insert(movie.id) {
            warn!(
                "Duplicate movie id {} ({:?}); the first record wins",
                movie.id, movie.title
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataLoadError;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "film-forge-loader-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_full_directory() {
        let dir = scratch_dir("full");
        fs::write(
            dir.join("movies.txt"),
            "1 Inception Sci-Fi a.mp4 5000\n2 The_Dark_Knight Action b.mp4 7000\n",
        )
        .unwrap();
        fs::write(dir.join("users.txt"), "alice pw\n").unwrap();
        fs::write(dir.join("history.txt"), "alice 1\nalice 2\n").unwrap();

        let dataset = load_from_dir(&dir).unwrap();
        assert_eq!(dataset.counts(), (2, 1, 2));
        assert_eq!(dataset.movies[1].title, "The Dark Knight");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_fresh_install() {
        let dir = scratch_dir("fresh");
        fs::write(dir.join("movies.txt"), "1 Inception Sci-Fi a.mp4 5000\n").unwrap();

        let dataset = load_from_dir(&dir).unwrap();
        assert_eq!(dataset.counts(), (1, 0, 0));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let dir = scratch_dir("empty");
        let result = load_from_dir(&dir);
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
        fs::remove_dir_all(&dir).unwrap();
    }
}
