use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{MovieId, MovieRef};
use rand::Rng;
use recommend::Recommendation;
use server::{Command, FilmForge, Response};
use std::hint::black_box;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// FilmForge - Movie Catalog and Recommendation Engine
#[derive(Parser)]
#[command(name = "film-forge")]
#[command(about = "Movie catalog with search, trending and genre recommendations", long_about = None)]
struct Cli {
    /// Directory holding movies.txt, users.txt and history.txt
    #[arg(short, long, default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Genre relation file (`GenreA GenreB` per line); stock table if omitted
    #[arg(short, long, global = true)]
    relations: Option<PathBuf>,

    /// Print replies as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer protocol commands read from stdin, one per line, until EXIT
    Serve,

    /// Show one movie by id
    Show { id: MovieId },

    /// Keyword search over titles, title words and genres
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Titles starting with a prefix
    Autocomplete {
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Most-viewed movies
    Trending {
        #[arg(default_value = "10")]
        n: usize,
    },

    /// Recommend unseen movies from a user's favourite genre
    Recommend { user: String },

    /// Genres related to a genre
    Related { genre: String },

    /// The whole catalog in one order
    Sort {
        #[arg(value_enum, default_value = "views")]
        by: SortKey,
    },

    /// The whole catalog by id
    All,

    /// Run benchmark to test query latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Views,
    Title,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries replies
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let mut engine = FilmForge::open(&cli.data_dir, cli.relations.as_deref())
        .context("Failed to start FilmForge")?;
    info!("Loaded {} in {:?}", cli.data_dir.display(), start.elapsed());

    let command = match cli.command {
        Commands::Serve => return handle_serve(&mut engine, cli.json),
        Commands::Benchmark { requests } => return handle_benchmark(&engine, requests),
        Commands::Show { id } => Command::Search { id },
        Commands::Search { query } => Command::Find {
            query: query.join(" "),
        },
        Commands::Autocomplete { prefix } => Command::Autocomplete { prefix },
        Commands::Trending { n } => Command::Trending { n },
        Commands::Recommend { user } => {
            let history = engine.history().history(&user);
            let all_records = engine.index().all_in_order();
            let rec = engine.recommender().recommend(&user, &all_records, &history);
            return print_reply(&Response::Recommend(rec), cli.json);
        }
        Commands::Related { genre } => {
            let related = engine.recommender().related_genres(&genre).to_vec();
            return print_reply(&Response::Related(related), cli.json);
        }
        Commands::Sort { by: SortKey::Views } => Command::SortViews,
        Commands::Sort { by: SortKey::Title } => Command::SortName,
        Commands::All => Command::AllMovies,
    };

    print_reply(&engine.execute(command), cli.json)
}

/// Handle the 'serve' command
fn handle_serve(engine: &mut FilmForge, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut answered = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match line.parse::<Command>() {
            Ok(Command::Exit) => break,
            Ok(command) => engine.execute(command),
            Err(e) => Response::error(e.to_string()),
        };
        if json {
            writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        } else {
            writeln!(stdout, "{}", reply)?;
        }
        stdout.flush()?;
        answered += 1;
    }

    info!("Session closed after {} commands", answered);
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(engine: &FilmForge, requests: usize) -> Result<()> {
    let index = engine.index();
    let all_records = index.all_in_order();
    if all_records.is_empty() || requests == 0 {
        warn!("Nothing to benchmark");
        return Ok(());
    }

    // Queries are drawn from the catalog itself so most of them hit
    let mut rng = rand::rng();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    let total_start = Instant::now();

    for _ in 0..requests {
        let movie = &all_records[rng.random_range(0..all_records.len())];
        let word = movie.title.split_whitespace().next().unwrap_or_default().to_lowercase();
        let prefix: String = word.chars().take(rng.random_range(1..=3)).collect();
        let history: Vec<MovieId> = (0..rng.random_range(1..=5))
            .map(|_| all_records[rng.random_range(0..all_records.len())].id)
            .collect();

        let start = Instant::now();
        match rng.random_range(0..5) {
            0 => _ = black_box(index.find(movie.id)),
            1 => _ = black_box(index.search(&word)),
            2 => _ = black_box(index.autocomplete(&prefix)),
            3 => _ = black_box(index.trending(10)),
            _ => _ = black_box(engine.recommender().recommend("benchmark", &all_records, &history)),
        }
        timings.push(start.elapsed());
    }
    let wall = total_start.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("{}Catalog size: {}", "• ".green(), all_records.len());
    println!("{}Total time: {:?}", "• ".green(), wall);
    println!("{}Average latency: {:?}", "• ".cyan(), avg_latency);
    println!("{}P50 latency: {:?}", "• ".cyan(), percentile(0.50));
    println!("{}P95 latency: {:?}", "• ".cyan(), percentile(0.95));
    println!("{}P99 latency: {:?}", "• ".cyan(), percentile(0.99));
    println!("{}Throughput: {:.2} requests/second", "• ".cyan(), throughput);

    Ok(())
}

/// Print one reply as JSON or as a readable listing
fn print_reply(reply: &Response, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }

    match reply {
        Response::Movie(movie) => {
            println!("{}", format!("{} (#{})", movie.title, movie.id).bold().blue());
            println!("{}Genre: {}", "• ".green(), movie.genre);
            println!("{}Views: {}", "• ".green(), movie.view_count);
            if let Some(rating) = movie.rating {
                println!("{}Rating: {:.1}", "• ".green(), rating);
            }
            println!("{}Locator: {}", "• ".green(), movie.locator);
        }
        Response::Movies(movies) | Response::Trending(movies) | Response::Suggestions(movies) => {
            print_movies(movies);
        }
        Response::History(ids) => {
            for id in ids {
                println!("{}", id);
            }
        }
        Response::Related(genres) => {
            if genres.is_empty() {
                println!("{}", "No related genres".yellow());
            }
            for genre in genres {
                println!("{}{}", "• ".green(), genre);
            }
        }
        Response::Recommend(rec) => print_recommendation(rec),
        Response::Success(message) => println!("{} {}", "✓".green(), message),
        Response::Error(message) => println!("{} {}", "✗".red(), message),
    }
    Ok(())
}

fn print_movies(movies: &[MovieRef]) {
    if movies.is_empty() {
        println!("{}", "No movies found".yellow());
        return;
    }
    for (rank, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} [{}] - {} views (#{})",
            (rank + 1).to_string().green(),
            movie.title,
            movie.genre,
            movie.view_count,
            movie.id
        );
    }
}

fn print_recommendation(rec: &Recommendation) {
    let Some(genre) = &rec.top_genre else {
        println!("{}", "No watch history to recommend from".yellow());
        return;
    };
    println!("{}", format!("Because you watch {}:", genre).bold().blue());
    print_movies(&rec.movies);
    if !rec.related_genres.is_empty() {
        println!("{}Also try: {}", "• ".cyan(), rec.related_genres.join(", "));
    }
}
