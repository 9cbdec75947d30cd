//! Property-style checks of the index over a larger, shuffled catalog.
//!
//! Records arrive in scrambled id order (as they do from a hand-maintained
//! file), with some duplicated ids and empty fields mixed in.

use data_loader::{Movie, MovieId, MovieRef};
use index::MovieIndex;
use std::collections::HashSet;

const GENRES: [&str; 5] = ["Action", "Comedy", "Drama", "Sci-Fi", "Thriller"];

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Deterministic scrambled catalog: ids 1..=n visited in multiplicative order.
fn scrambled_catalog(n: u32) -> Vec<Movie> {
    (1..=n)
        .map(|i| {
            let id = (i * 37) % n + 1;
            Movie::new(
                id,
                format!("Film {} Part {}", id % 13, id),
                GENRES[(id % 5) as usize],
                format!("{}.mp4", id),
                u64::from((id * 7919) % 500),
            )
        })
        .collect()
}

fn ids(movies: &[MovieRef]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}

#[test]
fn test_every_record_is_findable_and_ordered() {
    init_tracing();
    let catalog = scrambled_catalog(500);
    let index = MovieIndex::build(catalog.clone());

    for movie in &catalog {
        let found = index.find(movie.id).expect("indexed id must be findable");
        assert_eq!(**found, *movie);
    }

    let in_order = ids(&index.all_in_order());
    assert!(in_order.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(in_order.len(), 500);
}

#[test]
fn test_every_prefix_of_every_title_autocompletes() {
    let catalog = scrambled_catalog(60);
    let index = MovieIndex::build(catalog.clone());

    for movie in &catalog {
        let title = movie.title.to_lowercase();
        for (end, _) in title.char_indices().skip(1) {
            assert!(
                index.autocomplete(&title[..end]).contains(&movie.id),
                "{:?} not found under prefix {:?}",
                movie.title,
                &title[..end]
            );
        }
        assert!(index.autocomplete(&title).contains(&movie.id));
    }

    assert_eq!(index.autocomplete("").len(), catalog.len());
}

#[test]
fn test_search_results_are_unique_sorted_and_repeatable() {
    let index = MovieIndex::build(scrambled_catalog(300));

    for query in ["film", "part", "sci-fi", "1", "ar", "THRILLER", "zzz", ""] {
        let first = ids(&index.search(query));
        let unique: HashSet<MovieId> = first.iter().copied().collect();
        assert_eq!(unique.len(), first.len(), "duplicates for {:?}", query);
        assert!(first.windows(2).all(|w| w[0] < w[1]), "unsorted for {:?}", query);
        assert_eq!(ids(&index.search(query)), first);
    }
}

#[test]
fn test_search_by_genre_finds_exactly_that_genre() {
    let catalog = scrambled_catalog(200);
    let index = MovieIndex::build(catalog.clone());

    let mut expected: Vec<MovieId> = catalog
        .iter()
        .filter(|m| m.genre == "Comedy")
        .map(|m| m.id)
        .collect();
    expected.sort_unstable();

    assert_eq!(ids(&index.search("comedy")), expected);
}

#[test]
fn test_trending_covers_the_pool_when_k_is_large() {
    let catalog = scrambled_catalog(100);
    let index = MovieIndex::build(catalog);

    let all = index.trending(1_000);
    assert_eq!(all.len(), 100);
    assert!(all.windows(2).all(|w| w[0].view_count >= w[1].view_count));
    assert!(index.trending(0).is_empty());

    let top5 = ids(&index.trending(5));
    assert_eq!(top5, ids(&all[..5]));
}

#[test]
fn test_bulk_sorts_cover_the_catalog() {
    let index = MovieIndex::build(scrambled_catalog(150));

    let by_views = index.sorted_by_views();
    assert_eq!(by_views.len(), 150);
    for pair in by_views.windows(2) {
        assert!(pair[0].view_count >= pair[1].view_count);
        if pair[0].view_count == pair[1].view_count {
            // stable over the id-ordered input
            assert!(pair[0].id < pair[1].id);
        }
    }

    let by_title = index.sorted_by_title();
    assert_eq!(by_title.len(), 150);
    assert!(by_title.windows(2).all(|w| w[0].title <= w[1].title));
}

#[test]
fn test_duplicates_and_empty_fields_do_not_break_the_build() {
    let mut catalog = scrambled_catalog(20);
    catalog.push(Movie::new(5, "Shadow Copy", "Horror", "dup.mp4", 99_999));
    catalog.push(Movie::new(21, "", "", "blank.mp4", 0));
    let index = MovieIndex::build(catalog);

    assert_eq!(index.len(), 21);
    assert_ne!(index.find(5).unwrap().title, "Shadow Copy");
    assert!(index.search("shadow").is_empty());
    assert!(index.autocomplete("").contains(&21));
    assert!(ids(&index.search("")).contains(&21));
}
