//! Affinity Graph - undirected genre-to-genre relations.
//!
//! The edge table is configuration, not code: [`GenreRelations`] is a plain
//! value handed to [`AffinityGraph::new`]. Its `Default` is the stock table
//! FilmForge ships with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The stock genre pairs.
const DEFAULT_EDGES: [(&str, &str); 6] = [
    ("Action", "Thriller"),
    ("Action", "Adventure"),
    ("Comedy", "Romance"),
    ("Horror", "Thriller"),
    ("Sci-Fi", "Adventure"),
    ("Drama", "Romance"),
];

/// A list of undirected genre pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRelations {
    pub pairs: Vec<(String, String)>,
}

impl GenreRelations {
    /// Relations from arbitrary pairs, e.g. read from a relations file.
    pub fn from_pairs<A, B>(pairs: impl IntoIterator<Item = (A, B)>) -> Self
    where
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(|(a, b)| (a.into(), b.into())).collect(),
        }
    }

    /// No relations at all.
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }
}

impl Default for GenreRelations {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_EDGES)
    }
}

/// Adjacency list over genre names (case-sensitive).
#[derive(Debug, Clone, Default)]
pub struct AffinityGraph {
    adjacency: HashMap<String, Vec<String>>,
}

impl AffinityGraph {
    /// Build a graph holding every pair in `relations`.
    pub fn new(relations: &GenreRelations) -> Self {
        let mut graph = Self::default();
        for (a, b) in &relations.pairs {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Connect `a` and `b` in both directions. Adding an existing edge again
    /// changes nothing.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.link(a, b);
        if a != b {
            self.link(b, a);
        }
    }

    fn link(&mut self, from: &str, to: &str) {
        let neighbours = self.adjacency.entry(from.to_string()).or_default();
        if !neighbours.iter().any(|n| n == to) {
            neighbours.push(to.to_string());
        }
    }

    /// Genres adjacent to `genre`, in the order their edges were added.
    /// Empty for an unknown genre.
    pub fn related_genres(&self, genre: &str) -> &[String] {
        self.adjacency.get(genre).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `genre` appears in any edge.
    pub fn contains(&self, genre: &str) -> bool {
        self.adjacency.contains_key(genre)
    }

    /// Every genre with at least one edge, sorted.
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = self.adjacency.keys().map(String::as_str).collect();
        genres.sort_unstable();
        genres
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        let (loops, directed) = self
            .adjacency
            .iter()
            .fold((0, 0), |(loops, directed), (genre, neighbours)| {
                let self_loop = neighbours.iter().any(|n| n == genre) as usize;
                (loops + self_loop, directed + neighbours.len() - self_loop)
            });
        loops + directed / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_graph() {
        let graph = AffinityGraph::new(&GenreRelations::default());
        assert_eq!(graph.related_genres("Action"), ["Thriller", "Adventure"]);
        assert_eq!(graph.related_genres("Thriller"), ["Action", "Horror"]);
        assert_eq!(graph.related_genres("Adventure"), ["Action", "Sci-Fi"]);
        assert_eq!(graph.related_genres("Romance"), ["Comedy", "Drama"]);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_edges_are_undirected() {
        let mut graph = AffinityGraph::default();
        graph.add_edge("Western", "Drama");
        assert_eq!(graph.related_genres("Western"), ["Drama"]);
        assert_eq!(graph.related_genres("Drama"), ["Western"]);
    }

    #[test]
    fn test_repeated_edge_is_not_duplicated() {
        let mut graph = AffinityGraph::default();
        graph.add_edge("Action", "Thriller");
        graph.add_edge("Thriller", "Action");
        assert_eq!(graph.related_genres("Action"), ["Thriller"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_unknown_genre_is_isolated() {
        let graph = AffinityGraph::new(&GenreRelations::default());
        assert!(graph.related_genres("Documentary").is_empty());
        assert!(graph.related_genres("action").is_empty());
        assert!(!graph.contains("Documentary"));
    }

    #[test]
    fn test_custom_relations() {
        let relations = GenreRelations::from_pairs([("Anime", "Fantasy"), ("Noir", "Crime")]);
        let graph = AffinityGraph::new(&relations);
        assert_eq!(graph.genres(), vec!["Anime", "Crime", "Fantasy", "Noir"]);
        assert!(graph.related_genres("Action").is_empty());

        let empty = AffinityGraph::new(&GenreRelations::empty());
        assert!(empty.genres().is_empty());
    }

    #[test]
    fn test_self_loop() {
        let mut graph = AffinityGraph::default();
        graph.add_edge("Drama", "Drama");
        assert_eq!(graph.related_genres("Drama"), ["Drama"]);
        assert_eq!(graph.edge_count(), 1);
    }
}
