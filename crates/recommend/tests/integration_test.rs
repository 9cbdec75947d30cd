//! Integration tests for recommendations.
//!
//! These run the parser, the index and the recommender together over a
//! small catalog written in the on-disk text format.

use data_loader::MovieId;
use data_loader::parser::{parse_history_str, parse_movies_str};
use index::MovieIndex;
use recommend::filters::AlreadyWatchedFilter;
use recommend::{AffinityGraph, FilterPipeline, GenreRelations, Recommender};

const MOVIES: &str = "\
1 Inception Sci-Fi inception.mp4 5000
2 The_Dark_Knight Action dark_knight.mp4 7000
3 Interstellar Sci-Fi interstellar.mp4 4500
4 Heat Action heat.mp4 1200
5 Alien Horror alien.mp4 3100
6 Arrival Sci-Fi arrival.mp4 2900
";

fn setup() -> MovieIndex {
    let movies = parse_movies_str(MOVIES, "movies.txt").expect("fixture parses");
    MovieIndex::build(movies)
}

fn history_of(user: &str, lines: &str) -> Vec<MovieId> {
    let mut history: Vec<MovieId> = parse_history_str(lines, "history.txt")
        .expect("fixture parses")
        .into_iter()
        .filter(|(name, _)| name == user)
        .map(|(_, id)| id)
        .collect();
    // the file is append-ordered; the server hands histories most recent first
    history.reverse();
    history
}

#[test]
fn test_full_recommendation_flow() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let index = setup();
    let recommender = Recommender::default();

    let history = history_of("alice", "alice 1\nbob 2\nalice 5\nalice 3\n");
    assert_eq!(history, vec![3, 5, 1]);

    let rec = recommender.recommend("alice", &index.all_in_order(), &history);
    assert_eq!(rec.top_genre.as_deref(), Some("Sci-Fi"));
    let ids: Vec<MovieId> = rec.movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![6]);
    assert_eq!(rec.related_genres, vec!["Adventure"]);
}

#[test]
fn test_recent_genre_wins_a_tie() {
    let index = setup();
    let recommender = Recommender::default();

    // Horror watched last, so it leads the most-recent-first history
    let history = history_of("bob", "bob 2\nbob 5\n");
    let rec = recommender.recommend("bob", &index.all_in_order(), &history);
    assert_eq!(rec.top_genre.as_deref(), Some("Horror"));
    assert!(rec.is_empty());
    assert_eq!(rec.related_genres, vec!["Thriller"]);
}

#[test]
fn test_custom_relations_feed_related_genres() {
    let index = setup();
    let graph = AffinityGraph::new(&GenreRelations::from_pairs([("Action", "Crime")]));
    let recommender = Recommender::new(graph);

    let rec = recommender.recommend("carol", &index.all_in_order(), &[2]);
    assert_eq!(rec.top_genre.as_deref(), Some("Action"));
    assert_eq!(rec.movies.len(), 1);
    assert_eq!(rec.movies[0].title, "Heat");
    assert_eq!(rec.related_genres, vec!["Crime"]);
    assert_eq!(recommender.related_genres("Crime"), ["Action"]);
}

#[test]
fn test_watched_only_pipeline_spans_genres() {
    let index = setup();
    let recommender =
        Recommender::default().with_pipeline(FilterPipeline::new().add_filter(AlreadyWatchedFilter));

    let rec = recommender.recommend("dave", &index.all_in_order(), &[1, 2, 3]);
    let ids: Vec<MovieId> = rec.movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4, 5, 6]);
}

#[test]
fn test_recommendation_serializes() {
    let index = setup();
    let rec = Recommender::default().recommend("erin", &index.all_in_order(), &[4]);
    let json = serde_json::to_value(&rec).expect("serializable");
    assert_eq!(json["top_genre"], "Action");
    assert_eq!(json["movies"][0]["title"], "The Dark Knight");
}
