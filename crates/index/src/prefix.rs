//! Prefix Index - case-insensitive title autocomplete.
//!
//! A character trie over lowercased titles. Nodes are stored in one arena and
//! addressed by index; each node maps a character to its child's index.
//! Homonymous titles terminate at the same node, so a terminal node keeps a
//! set of ids rather than a single one.
//!
//! Children are hash-keyed, so [`PrefixIndex::autocomplete`] returns ids in no
//! particular order across branches. Callers that need an order sort the
//! result themselves.

use data_loader::MovieId;
use std::collections::{BTreeSet, HashMap};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, NodeId>,
    end_of_word: bool,
    ids: BTreeSet<MovieId>,
}

/// Character trie over normalized titles.
#[derive(Debug)]
pub struct PrefixIndex {
    nodes: Vec<TrieNode>,
    titles: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            titles: 0,
        }
    }

    /// Number of `(title, id)` entries indexed.
    pub fn len(&self) -> usize {
        self.titles
    }

    pub fn is_empty(&self) -> bool {
        self.titles == 0
    }

    /// Index `title` (lowercased) under `id`.
    ///
    /// Re-inserting the same `(title, id)` pair is harmless.
    pub fn insert(&mut self, title: &str, id: MovieId) {
        let mut current = ROOT;

        for c in title.to_lowercase().chars() {
            current = match self.nodes[current].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(c, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        node.end_of_word = true;
        if node.ids.insert(id) {
            self.titles += 1;
        }
    }

    /// Every id whose normalized title starts with `prefix` (case-insensitive).
    ///
    /// An unmatched prefix yields an empty result; the empty prefix yields
    /// every indexed id.
    pub fn autocomplete(&self, prefix: &str) -> Vec<MovieId> {
        let Some(start) = self.locate(prefix) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if node.end_of_word {
                results.extend(node.ids.iter().copied());
            }
            stack.extend(node.children.values().copied());
        }
        results
    }

    /// Whether any indexed title starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.locate(prefix).is_some()
    }

    fn locate(&self, prefix: &str) -> Option<NodeId> {
        let mut current = ROOT;
        for c in prefix.to_lowercase().chars() {
            current = *self.nodes[current].children.get(&c)?;
        }
        Some(current)
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}
