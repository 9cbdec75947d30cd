//! The text command protocol.
//!
//! One command per line: a keyword followed by whitespace-separated
//! arguments. Keywords are matched case-insensitively; arguments are taken
//! as written.

use data_loader::MovieId;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Register { username: String, password: String },
    /// Point lookup by id.
    Search { id: MovieId },
    /// Keyword search; the rest of the line is the query.
    Find { query: String },
    Autocomplete { prefix: String },
    Trending { n: usize },
    AllMovies,
    SortViews,
    SortName,
    AddHistory { username: String, id: MovieId },
    GetHistory { username: String },
    /// A genre known to the affinity graph, or else a username.
    Recommend { target: String },
    Exit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: invalid {argument} {value:?}")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },

    #[error("{command}: too many arguments")]
    TooManyArguments { command: &'static str },
}

/// Positional argument reader for one command.
struct Args<'a> {
    command: &'static str,
    rest: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(command: &'static str, rest: std::str::SplitWhitespace<'a>) -> Self {
        Self { command, rest }
    }

    fn required(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.rest.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    fn parsed<T: FromStr>(&mut self, argument: &'static str) -> Result<T, CommandError> {
        let raw = self.required(argument)?;
        raw.parse().map_err(|_| CommandError::InvalidArgument {
            command: self.command,
            argument,
            value: raw.to_string(),
        })
    }

    fn remainder(self) -> String {
        self.rest.collect::<Vec<_>>().join(" ")
    }

    fn finish<T>(mut self, value: T) -> Result<T, CommandError> {
        match self.rest.next() {
            Some(_) => Err(CommandError::TooManyArguments {
                command: self.command,
            }),
            None => Ok(value),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?.to_ascii_uppercase();

        match keyword.as_str() {
            "LOGIN" => {
                let mut args = Args::new("LOGIN", words);
                let username = args.required("username")?.to_string();
                let password = args.required("password")?.to_string();
                args.finish(Command::Login { username, password })
            }
            "REGISTER" => {
                let mut args = Args::new("REGISTER", words);
                let username = args.required("username")?.to_string();
                let password = args.required("password")?.to_string();
                args.finish(Command::Register { username, password })
            }
            "SEARCH" => {
                let mut args = Args::new("SEARCH", words);
                let id = args.parsed("movie id")?;
                args.finish(Command::Search { id })
            }
            "FIND" => {
                let query = Args::new("FIND", words).remainder();
                if query.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "FIND",
                        argument: "query",
                    });
                }
                Ok(Command::Find { query })
            }
            // Titles contain spaces, so the prefix is the rest of the line.
            // A bare AUTOCOMPLETE lists every title.
            "AUTOCOMPLETE" => Ok(Command::Autocomplete {
                prefix: Args::new("AUTOCOMPLETE", words).remainder(),
            }),
            "TRENDING" => {
                let mut args = Args::new("TRENDING", words);
                let n = args.parsed("count")?;
                args.finish(Command::Trending { n })
            }
            "ALLMOVIES" => Args::new("ALLMOVIES", words).finish(Command::AllMovies),
            "SORT_VIEWS" => Args::new("SORT_VIEWS", words).finish(Command::SortViews),
            "SORT_NAME" => Args::new("SORT_NAME", words).finish(Command::SortName),
            "ADDHISTORY" => {
                let mut args = Args::new("ADDHISTORY", words);
                let username = args.required("username")?.to_string();
                let id = args.parsed("movie id")?;
                args.finish(Command::AddHistory { username, id })
            }
            "GETHISTORY" => {
                let mut args = Args::new("GETHISTORY", words);
                let username = args.required("username")?.to_string();
                args.finish(Command::GetHistory { username })
            }
            "RECOMMEND" => {
                let mut args = Args::new("RECOMMEND", words);
                let target = args.required("genre or username")?.to_string();
                args.finish(Command::Recommend { target })
            }
            "EXIT" => Args::new("EXIT", words).finish(Command::Exit),
            _ => Err(CommandError::Unknown(keyword)),
        }
    }
}
