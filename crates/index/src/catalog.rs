//! Catalog Store - the canonical, id-ordered record store.
//!
//! An AVL tree whose nodes live in a single arena (`Vec<Node>`); children are
//! arena indices, so there is no manual deallocation and no back-pointer.
//! Nodes are never removed, which keeps every index stable for the life of
//! the store.
//!
//! ## Invariants
//! - Ids are unique. Inserting an id that is already present is a no-op:
//!   the first record wins and the caller is told nothing was inserted.
//! - For every node, `|height(left) - height(right)| <= 1`.

use data_loader::{MovieId, MovieRef};
use std::cmp::Ordering;
use tracing::debug;

type NodeId = usize;

#[derive(Debug)]
struct Node {
    movie: MovieRef,
    left: Option<NodeId>,
    right: Option<NodeId>,
    height: u32,
}

/// Self-balancing binary search tree keyed by [`MovieId`].
#[derive(Debug, Default)]
pub struct CatalogStore {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the tree (0 when empty).
    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    /// Insert a record keyed by its id.
    ///
    /// Returns `false` (and leaves the store untouched) if the id is already
    /// present.
    pub fn insert(&mut self, movie: MovieRef) -> bool {
        let mut inserted = false;
        self.root = Some(self.insert_at(self.root, movie, &mut inserted));
        inserted
    }

    /// Point lookup, O(log n).
    pub fn find(&self, id: MovieId) -> Option<&MovieRef> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            current = match id.cmp(&node.movie.id) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.movie),
            };
        }
        None
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.find(id).is_some()
    }

    /// All records by ascending id, via an in-order walk.
    pub fn all_in_order(&self) -> Vec<MovieRef> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;

        loop {
            while let Some(idx) = current {
                stack.push(idx);
                current = self.nodes[idx].left;
            }
            match stack.pop() {
                Some(idx) => {
                    out.push(self.nodes[idx].movie.clone());
                    current = self.nodes[idx].right;
                }
                None => break,
            }
        }
        out
    }

    fn insert_at(&mut self, node: Option<NodeId>, movie: MovieRef, inserted: &mut bool) -> NodeId {
        let Some(idx) = node else {
            *inserted = true;
            self.nodes.push(Node {
                movie,
                left: None,
                right: None,
                height: 1,
            });
            return self.nodes.len() - 1;
        };

        match movie.id.cmp(&self.nodes[idx].movie.id) {
            Ordering::Less => {
                let left = self.insert_at(self.nodes[idx].left, movie, inserted);
                self.nodes[idx].left = Some(left);
            }
            Ordering::Greater => {
                let right = self.insert_at(self.nodes[idx].right, movie, inserted);
                self.nodes[idx].right = Some(right);
            }
            Ordering::Equal => {
                debug!("Catalog already holds id {}, keeping first record", movie.id);
                return idx;
            }
        }

        self.rebalance(idx)
    }

    fn rebalance(&mut self, idx: NodeId) -> NodeId {
        self.update_height(idx);
        let balance = self.balance(idx);

        if balance > 1 {
            // Left-heavy; a right-leaning left child needs the double rotation
            if let Some(left) = self.nodes[idx].left {
                if self.balance(left) < 0 {
                    let new_left = self.rotate_left(left);
                    self.nodes[idx].left = Some(new_left);
                }
            }
            return self.rotate_right(idx);
        }

        if balance < -1 {
            if let Some(right) = self.nodes[idx].right {
                if self.balance(right) > 0 {
                    let new_right = self.rotate_right(right);
                    self.nodes[idx].right = Some(new_right);
                }
            }
            return self.rotate_left(idx);
        }

        idx
    }

    fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let Some(x) = self.nodes[y].left else {
            return y;
        };
        let t2 = self.nodes[x].right;

        self.nodes[x].right = Some(y);
        self.nodes[y].left = t2;

        self.update_height(y);
        self.update_height(x);
        x
    }

    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.nodes[x].right else {
            return x;
        };
        let t2 = self.nodes[y].left;

        self.nodes[y].left = Some(x);
        self.nodes[x].right = t2;

        self.update_height(x);
        self.update_height(y);
        y
    }

    fn height_of(&self, node: Option<NodeId>) -> u32 {
        node.map_or(0, |idx| self.nodes[idx].height)
    }

    fn update_height(&mut self, idx: NodeId) {
        let left = self.height_of(self.nodes[idx].left);
        let right = self.height_of(self.nodes[idx].right);
        self.nodes[idx].height = 1 + left.max(right);
    }

    fn balance(&self, idx: NodeId) -> i64 {
        i64::from(self.height_of(self.nodes[idx].left))
            - i64::from(self.height_of(self.nodes[idx].right))
    }

    /// Walks the whole tree checking ordering, stored heights and the AVL
    /// balance rule. Used by tests.
    #[cfg(test)]
    fn check_invariants(&self) {
        fn walk(store: &CatalogStore, node: Option<NodeId>, lo: Option<MovieId>, hi: Option<MovieId>) -> u32 {
            let Some(idx) = node else { return 0 };
            let n = &store.nodes[idx];
            if let Some(lo) = lo {
                assert!(n.movie.id > lo, "ordering violated at id {}", n.movie.id);
            }
            if let Some(hi) = hi {
                assert!(n.movie.id < hi, "ordering violated at id {}", n.movie.id);
            }
            let lh = walk(store, n.left, lo, Some(n.movie.id));
            let rh = walk(store, n.right, Some(n.movie.id), hi);
            assert!(lh.abs_diff(rh) <= 1, "unbalanced at id {}", n.movie.id);
            assert_eq!(n.height, 1 + lh.max(rh), "stale height at id {}", n.movie.id);
            n.height
        }
        walk(self, self.root, None, None);
    }
}
