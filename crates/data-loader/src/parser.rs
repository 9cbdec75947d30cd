//! Parsers for the FilmForge data files.
//!
//! All files are whitespace-delimited, one record per line:
//! - movies.txt: `id title genre locator views [rating]`
//! - users.txt: `username password`
//! - history.txt: `username movieId` (appended in watch order)
//! - relations file: `GenreA GenreB`
//!
//! Titles cannot contain whitespace on disk, so spaces are stored as `_` and
//! decoded here. Blank lines and lines starting with `#` are skipped.
//! Titles and genres may not contain `|` or `,`, nor locators `|`: those
//! characters delimit the server's reply lines.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const MOVIES_FILE: &str = "movies.txt";
const USERS_FILE: &str = "users.txt";
const HISTORY_FILE: &str = "history.txt";

/// Read a whole file, mapping a missing file to [`DataLoadError::FileNotFound`].
fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Like [`read_to_string`], but a missing file reads as empty.
fn read_optional(path: &Path) -> Result<String> {
    match read_to_string(path) {
        Err(DataLoadError::FileNotFound { .. }) => Ok(String::new()),
        other => other,
    }
}

/// Iterate over `(line_no, fields)` for every non-blank, non-comment line.
fn records(content: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    content.lines().enumerate().filter_map(|(idx, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some((idx + 1, line.split_whitespace().collect()))
        }
    })
}

fn check_field_count(
    file: &str,
    line: usize,
    fields: &[&str],
    min: usize,
    max: usize,
) -> Result<()> {
    if fields.len() < min || fields.len() > max {
        return Err(DataLoadError::FieldCountMismatch {
            file: file.to_string(),
            expected: min,
            found: fields.len(),
            line,
        });
    }
    Ok(())
}

fn parse_field<T>(file: &str, line: usize, name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {}: {}", name, e),
    })
}

/// Reply lines separate records with `|` and record fields with `,`, so a
/// catalog field may not contain them.
fn check_protocol_safe(
    file: &str,
    line: usize,
    name: &str,
    value: &str,
    forbidden: &[char],
) -> Result<()> {
    match value.chars().find(|c| forbidden.contains(c)) {
        Some(c) => Err(DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("{} {:?} contains reserved character {:?}", name, value, c),
        }),
        None => Ok(()),
    }
}

/// Decode an on-disk title: `The_Dark_Knight` -> `The Dark Knight`.
pub fn decode_title(raw: &str) -> String {
    raw.replace('_', " ")
}

/// Encode a title for the on-disk format.
pub fn encode_title(title: &str) -> String {
    title.replace(' ', "_")
}

/// Parse catalog records from file content.
///
/// `file` is only used in error messages.
pub fn parse_movies_str(content: &str, file: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (line_no, fields) in records(content) {
        check_field_count(file, line_no, &fields, 5, 6)?;

        let mut movie = Movie {
            id: parse_field(file, line_no, "movieId", fields[0])?,
            title: decode_title(fields[1]),
            genre: fields[2].to_string(),
            locator: fields[3].to_string(),
            view_count: parse_field(file, line_no, "views", fields[4])?,
            rating: None,
        };
        if let Some(raw) = fields.get(5) {
            movie.rating = Some(parse_field(file, line_no, "rating", raw)?);
        }
        check_protocol_safe(file, line_no, "title", &movie.title, &['|', ','])?;
        check_protocol_safe(file, line_no, "genre", &movie.genre, &['|', ','])?;
        check_protocol_safe(file, line_no, "locator", &movie.locator, &['|'])?;

        movies.push(movie);
    }

    Ok(movies)
}

/// Parse the movies.txt file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = read_to_string(path)?;
    parse_movies_str(&content, &file_label(path, MOVIES_FILE))
}

/// Parse `(username, password)` pairs from file content.
pub fn parse_credentials_str(content: &str, file: &str) -> Result<Vec<(Username, String)>> {
    records(content)
        .map(|(line_no, fields)| {
            check_field_count(file, line_no, &fields, 2, 2)?;
            Ok((fields[0].to_string(), fields[1].to_string()))
        })
        .collect()
}

/// Parse the users.txt file. A missing file yields no users.
pub fn parse_credentials(path: &Path) -> Result<Vec<(Username, String)>> {
    let content = read_optional(path)?;
    parse_credentials_str(&content, &file_label(path, USERS_FILE))
}

/// Parse `(username, movie id)` views from file content, oldest first.
pub fn parse_history_str(content: &str, file: &str) -> Result<Vec<(Username, MovieId)>> {
    records(content)
        .map(|(line_no, fields)| {
            check_field_count(file, line_no, &fields, 2, 2)?;
            let movie_id = parse_field(file, line_no, "movieId", fields[1])?;
            Ok((fields[0].to_string(), movie_id))
        })
        .collect()
}

/// Parse the history.txt file. A missing file yields no history.
pub fn parse_history(path: &Path) -> Result<Vec<(Username, MovieId)>> {
    let content = read_optional(path)?;
    parse_history_str(&content, &file_label(path, HISTORY_FILE))
}

/// Parse genre pairs from file content.
pub fn parse_relations_str(content: &str, file: &str) -> Result<Vec<(String, String)>> {
    records(content)
        .map(|(line_no, fields)| {
            check_field_count(file, line_no, &fields, 2, 2)?;
            Ok((fields[0].to_string(), fields[1].to_string()))
        })
        .collect()
}

/// Parse a genre-relation file. Unlike the user files, it must exist.
pub fn parse_relations(path: &Path) -> Result<Vec<(String, String)>> {
    let content = read_to_string(path)?;
    parse_relations_str(&content, &file_label(path, "relations"))
}

fn file_label(path: &Path, fallback: &str) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

/// Format one catalog record in the movies.txt layout.
pub fn format_movie_line(movie: &Movie) -> String {
    let mut line = format!(
        "{} {} {} {} {}",
        movie.id,
        encode_title(&movie.title),
        movie.genre,
        movie.locator,
        movie.view_count
    );
    if let Some(rating) = movie.rating {
        line.push_str(&format!(" {}", rating));
    }
    line
}

/// `movies.txt` inside a data directory.
pub fn movies_path(dir: &Path) -> std::path::PathBuf {
    dir.join(MOVIES_FILE)
}

/// `users.txt` inside a data directory.
pub fn users_path(dir: &Path) -> std::path::PathBuf {
    dir.join(USERS_FILE)
}

/// `history.txt` inside a data directory.
pub fn history_path(dir: &Path) -> std::path::PathBuf {
    dir.join(HISTORY_FILE)
}
