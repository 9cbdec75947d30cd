//! Replies and their one-line text rendering.
//!
//! Every reply is a single line `PREFIX:payload`. List payloads separate
//! entries with `|` and the fields of one record with `,`. Fields are written
//! unescaped; the catalog loader refuses titles and genres that contain
//! either character, and locators that contain `|`.

use data_loader::{MovieId, MovieRef};
use recommend::Recommendation;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Response {
    /// `MOVIE:id|title|genre|locator|views[|rating]`
    Movie(MovieRef),
    /// `MOVIES:id,title,genre,views|...`
    Movies(Vec<MovieRef>),
    /// `SUGGESTIONS:title|title|...`
    Suggestions(Vec<MovieRef>),
    /// `TRENDING:id,title,views|...`
    Trending(Vec<MovieRef>),
    /// `HISTORY:id|id|...`
    History(Vec<MovieId>),
    /// `RELATED:genre|genre|...`
    Related(Vec<String>),
    /// `RECOMMEND:genre|id,title,views|...`, or `RECOMMEND:` when empty
    Recommend(Recommendation),
    Success(String),
    Error(String),
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Response::Success(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

fn write_joined<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut each: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str("|")?;
        }
        each(f, item)?;
    }
    Ok(())
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Movie(m) => {
                write!(
                    f,
                    "MOVIE:{}|{}|{}|{}|{}",
                    m.id, m.title, m.genre, m.locator, m.view_count
                )?;
                if let Some(rating) = m.rating {
                    write!(f, "|{}", rating)?;
                }
                Ok(())
            }
            Response::Movies(movies) => {
                f.write_str("MOVIES:")?;
                write_joined(f, movies, |f, m| {
                    write!(f, "{},{},{},{}", m.id, m.title, m.genre, m.view_count)
                })
            }
            Response::Suggestions(movies) => {
                f.write_str("SUGGESTIONS:")?;
                write_joined(f, movies, |f, m| f.write_str(&m.title))
            }
            Response::Trending(movies) => {
                f.write_str("TRENDING:")?;
                write_joined(f, movies, |f, m| {
                    write!(f, "{},{},{}", m.id, m.title, m.view_count)
                })
            }
            Response::History(ids) => {
                f.write_str("HISTORY:")?;
                write_joined(f, ids, |f, id| write!(f, "{}", id))
            }
            Response::Related(genres) => {
                f.write_str("RELATED:")?;
                write_joined(f, genres, |f, g| f.write_str(g))
            }
            Response::Recommend(rec) => {
                f.write_str("RECOMMEND:")?;
                let Some(genre) = &rec.top_genre else {
                    return Ok(());
                };
                f.write_str(genre)?;
                for m in &rec.movies {
                    write!(f, "|{},{},{}", m.id, m.title, m.view_count)?;
                }
                Ok(())
            }
            Response::Success(message) => write!(f, "SUCCESS:{}", message),
            Response::Error(message) => write!(f, "ERROR:{}", message),
        }
    }
}
