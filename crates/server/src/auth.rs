//! Credential store behind `LOGIN` and `REGISTER`.
//!
//! Passwords are kept and compared as given, the same way `users.txt` stores
//! them. When a persistence path is set, every successful registration is
//! appended to that file before it becomes visible in memory.

use crate::persist::append_line;
use anyhow::{Result, bail};
use data_loader::Username;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<Username, String>,
    persist_to: Option<PathBuf>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `(username, password)` pairs in file order.
    /// A repeated username keeps its first password.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Username, String)>) -> Self {
        let mut store = Self::new();
        for (username, password) in pairs {
            store.users.entry(username).or_insert(password);
        }
        store
    }

    /// Append new registrations to `path` (builder pattern).
    pub fn with_persistence(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_to = Some(path.into());
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// True when `username` exists and `password` matches.
    pub fn login(&self, username: &str, password: &str) -> bool {
        let ok = self.users.get(username).is_some_and(|p| p == password);
        debug!("Login attempt for {}: {}", username, ok);
        ok
    }

    /// Add a user. Returns `Ok(false)` if the name is taken.
    ///
    /// Names and passwords must be single non-empty tokens, or the users file
    /// could not be read back.
    pub fn register(&mut self, username: &str, password: &str) -> Result<bool> {
        for (what, value) in [("username", username), ("password", password)] {
            if value.is_empty() || value.contains(char::is_whitespace) {
                bail!("Invalid {}: must be a single non-empty word", what);
            }
        }
        if self.contains(username) {
            return Ok(false);
        }

        if let Some(path) = &self.persist_to {
            append_line(path, &format!("{} {}", username, password))?;
        }

        self.users.insert(username.to_string(), password.to_string());
        info!("Registered user {}", username);
        Ok(true)
    }
}
