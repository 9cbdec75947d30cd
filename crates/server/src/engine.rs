//! # FilmForge Engine
//!
//! Owns the movie index, the recommender and both user-state stores, and
//! answers one [`Command`] at a time.
//!
//! ## Algorithm
//! 1. Parse the line into a [`Command`] (a parse failure becomes `ERROR:`)
//! 2. Dispatch to exactly one index, recommender or store operation
//! 3. Wrap the result in a [`Response`]
//!
//! No input aborts the engine: store I/O failures and unknown ids are both
//! reported as `ERROR:` replies.

use crate::auth::CredentialStore;
use crate::command::Command;
use crate::history::WatchHistory;
use crate::response::Response;
use anyhow::{Context, Result};
use data_loader::parser::{history_path, parse_relations, users_path};
use data_loader::{Dataset, load_from_dir};
use index::MovieIndex;
use recommend::{AffinityGraph, GenreRelations, Recommender};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub struct FilmForge {
    index: MovieIndex,
    recommender: Recommender,
    credentials: CredentialStore,
    history: WatchHistory,
}

impl FilmForge {
    /// Engine over `index` with the stock genre relations and empty,
    /// in-memory user stores.
    pub fn new(index: MovieIndex) -> Self {
        Self {
            index,
            recommender: Recommender::default(),
            credentials: CredentialStore::new(),
            history: WatchHistory::new(),
        }
    }

    /// Build the index and seed both stores from a loaded dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let Dataset {
            movies,
            credentials,
            history,
        } = dataset;
        Self::new(MovieIndex::build(movies))
            .with_credentials(CredentialStore::from_pairs(credentials))
            .with_history(WatchHistory::from_views(history))
    }

    /// Load `data_dir`, persisting new users and views back into it.
    ///
    /// `relations` names a genre-pair file; without one the stock table is
    /// used.
    #[instrument]
    pub fn open(data_dir: &Path, relations: Option<&Path>) -> Result<Self> {
        let start = Instant::now();
        let dataset = load_from_dir(data_dir)
            .with_context(|| format!("Failed to load data from {:?}", data_dir))?;
        let Dataset {
            movies,
            credentials,
            history,
        } = dataset;

        let relations = match relations {
            Some(path) => GenreRelations::from_pairs(
                parse_relations(path)
                    .with_context(|| format!("Failed to load genre relations from {:?}", path))?,
            ),
            None => GenreRelations::default(),
        };

        let engine = Self::new(MovieIndex::build(movies))
            .with_recommender(Recommender::new(AffinityGraph::new(&relations)))
            .with_credentials(
                CredentialStore::from_pairs(credentials).with_persistence(users_path(data_dir)),
            )
            .with_history(
                WatchHistory::from_views(history).with_persistence(history_path(data_dir)),
            );

        info!(
            "FilmForge ready: {} movies, {} users, {} genres in {:.2?}",
            engine.index.len(),
            engine.credentials.len(),
            engine.recommender.graph().genres().len(),
            start.elapsed()
        );
        Ok(engine)
    }

    /// Replace the recommender (builder pattern).
    pub fn with_recommender(mut self, recommender: Recommender) -> Self {
        self.recommender = recommender;
        self
    }

    /// Replace the credential store (builder pattern).
    pub fn with_credentials(mut self, credentials: CredentialStore) -> Self {
        self.credentials = credentials;
        self
    }

    /// Replace the watch history (builder pattern).
    pub fn with_history(mut self, history: WatchHistory) -> Self {
        self.history = history;
        self
    }

    pub fn index(&self) -> &MovieIndex {
        &self.index
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn history(&self) -> &WatchHistory {
        &self.history
    }

    /// Parse and answer one protocol line.
    pub fn handle_line(&mut self, line: &str) -> Response {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(e) => {
                debug!("Rejected line {:?}: {}", line, e);
                Response::error(e.to_string())
            }
        }
    }

    /// Answer one command.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: Command) -> Response {
        match command {
            Command::Login { username, password } => {
                if self.credentials.login(&username, &password) {
                    Response::success("Login successful")
                } else {
                    Response::error("Invalid credentials")
                }
            }
            Command::Register { username, password } => {
                match self.credentials.register(&username, &password) {
                    Ok(true) => Response::success("Registration successful"),
                    Ok(false) => Response::error("Username already exists"),
                    Err(e) => {
                        warn!("Registration of {} failed: {:#}", username, e);
                        Response::error(e.to_string())
                    }
                }
            }
            Command::Search { id } => match self.index.find(id) {
                Some(movie) => Response::Movie(movie.clone()),
                None => Response::error("Movie not found"),
            },
            Command::Find { query } => Response::Movies(self.index.search(&query)),
            Command::Autocomplete { prefix } => {
                Response::Suggestions(self.index.autocomplete_titles(&prefix))
            }
            Command::Trending { n } => Response::Trending(self.index.trending(n)),
            Command::AllMovies => Response::Movies(self.index.all_in_order()),
            Command::SortViews => Response::Movies(self.index.sorted_by_views()),
            Command::SortName => Response::Movies(self.index.sorted_by_title()),
            Command::AddHistory { username, id } => {
                if self.index.find(id).is_none() {
                    return Response::error("Movie not found");
                }
                match self.history.record_view(&username, id) {
                    Ok(()) => Response::success("Added to history"),
                    Err(e) => {
                        warn!("Recording view of {} by {} failed: {:#}", id, username, e);
                        Response::error(e.to_string())
                    }
                }
            }
            Command::GetHistory { username } => Response::History(self.history.history(&username)),
            Command::Recommend { target } => self.recommend(&target),
            Command::Exit => Response::success("Goodbye"),
        }
    }

    /// A graph genre answers its neighbours; anything else is a username.
    fn recommend(&self, target: &str) -> Response {
        if self.recommender.graph().contains(target) {
            return Response::Related(self.recommender.related_genres(target).to_vec());
        }
        let history = self.history.history(target);
        let all_records = self.index.all_in_order();
        Response::Recommend(self.recommender.recommend(target, &all_records, &history))
    }
}
