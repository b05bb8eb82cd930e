use std::{collections::HashMap, hash::Hash};

use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisitState {
    Unvisited,
    Visiting,
    Visited,
}

/// Depth-first traversal bookkeeping. Keys that were never inserted read
/// as [`VisitState::Unvisited`].
#[derive(Debug, Clone)]
pub struct VisitMap<T>(HashMap<T, VisitState>);

impl<T: Eq + Hash> VisitMap<T> {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, key: &T) -> VisitState {
        self.0.get(key).copied().unwrap_or(VisitState::Unvisited)
    }

    pub fn insert(&mut self, key: T, state: VisitState) -> Option<VisitState> {
        self.0.insert(key, state)
    }
}

impl<T: Eq + Hash> Default for VisitMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
