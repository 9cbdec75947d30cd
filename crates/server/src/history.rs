//! Per-user watch history behind `ADDHISTORY` and `GETHISTORY`.

use crate::persist::append_line;
use anyhow::Result;
use data_loader::{MovieId, Username};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use tracing::debug;

/// Views per user, newest at the front.
///
/// On disk the order is the reverse: `history.txt` is appended to, so it
/// lists views oldest first.
#[derive(Debug, Default)]
pub struct WatchHistory {
    views: HashMap<Username, VecDeque<MovieId>>,
    persist_to: Option<PathBuf>,
}

impl WatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay `(username, movie id)` views, oldest first.
    pub fn from_views(views: impl IntoIterator<Item = (Username, MovieId)>) -> Self {
        let mut history = Self::new();
        for (username, id) in views {
            history.views.entry(username).or_default().push_front(id);
        }
        history
    }

    /// Append new views to `path` (builder pattern).
    pub fn with_persistence(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_to = Some(path.into());
        self
    }

    /// Number of users with at least one view.
    pub fn user_count(&self) -> usize {
        self.views.len()
    }

    /// Record that `username` watched `id` just now. Repeat views are kept.
    pub fn record_view(&mut self, username: &str, id: MovieId) -> Result<()> {
        if let Some(path) = &self.persist_to {
            append_line(path, &format!("{} {}", username, id))?;
        }

        self.views
            .entry(username.to_string())
            .or_default()
            .push_front(id);
        debug!("Recorded view of {} by {}", id, username);
        Ok(())
    }

    /// Every view of `username`, most recent first. Empty for unknown users.
    pub fn history(&self, username: &str) -> Vec<MovieId> {
        self.views
            .get(username)
            .map(|views| views.iter().copied().collect())
            .unwrap_or_default()
    }
}
