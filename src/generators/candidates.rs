// src/generators/candidates.rs
use std::collections::HashSet;

use rand::Rng;

/// Insertion-ordered set of password candidates.
///
/// Keeps a `Vec` for ordering and uniform picks next to a `HashSet` for
/// membership, so both `insert` and `pick` are O(1).
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the candidate was not present yet.
    pub fn insert(&mut self, candidate: String) -> bool {
        if candidate.is_empty() || self.seen.contains(&candidate) {
            return false;
        }
        self.seen.insert(candidate.clone());
        self.items.push(candidate);
        true
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.seen.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        self.get(rng.gen_range(0..self.len()))
    }

    /// Keep the first `len` candidates in insertion order.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.items.len() {
            return;
        }
        for dropped in self.items.drain(len..) {
            self.seen.remove(&dropped);
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl Extend<String> for CandidateSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for candidate in iter {
            self.insert(candidate);
        }
    }
}

impl FromIterator<String> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        set.extend(iter);
        set
    }
}
