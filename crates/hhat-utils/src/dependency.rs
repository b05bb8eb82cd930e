//! Tracking dependencies between compilation units.

use std::{
    fmt::{self, Debug, Display},
    hash::Hash,
};

use indexmap::{IndexMap, IndexSet};

use crate::visit::{VisitMap, VisitState};

/// A dependency cycle, listed from the first unit on the cycle back to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError<T>(Vec<T>);

impl<T> CycleError<T> {
    pub fn new(path: Vec<T>) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &[T] {
        &self.0
    }
}

impl<T: Display> Display for CycleError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dependency cycle detected: ")?;

        let mut iter = self.0.iter();

        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
        }

        for el in iter {
            write!(f, " -> {el}")?;
        }

        Ok(())
    }
}

impl<T: Debug + Display> std::error::Error for CycleError<T> {}

/// Directed graph of "depends on" edges. Iteration follows insertion order,
/// which keeps [`DependencyGraph::topological_sort`] deterministic.
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    /// unit -> units it depends on
    forward: IndexMap<T, IndexSet<T>>,
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self {
            forward: IndexMap::default(),
        }
    }
}

impl<T> DependencyGraph<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Eq + Hash + Copy> DependencyGraph<T> {
    pub fn add_node(&mut self, item: T) {
        self.forward.entry(item).or_default();
    }

    pub fn add_dependency(&mut self, from: T, to: T) {
        self.add_node(from);
        self.add_node(to);

        self.forward.entry(from).or_default().insert(to);
    }

    pub fn dependencies_of(&self, item: T) -> impl Iterator<Item = &T> {
        self.forward.get(&item).into_iter().flatten()
    }

    /// Orders every node so that each one comes after all of its dependencies.
    pub fn topological_sort(&self) -> Result<Vec<T>, CycleError<T>> {
        let mut visited = VisitMap::new();
        let mut order = Vec::with_capacity(self.forward.len());

        for &root in self.forward.keys() {
            if visited.get(&root) != VisitState::Unvisited {
                continue;
            }

            // (node, index of the next dependency to look at)
            let mut stack = vec![(root, 0usize)];
            visited.insert(root, VisitState::Visiting);

            while let Some((node, next)) = stack.pop() {
                let deps = &self.forward[&node];

                let Some(&dep) = deps.get_index(next) else {
                    visited.insert(node, VisitState::Visited);
                    order.push(node);
                    continue;
                };

                stack.push((node, next + 1));

                match visited.get(&dep) {
                    VisitState::Unvisited => {
                        visited.insert(dep, VisitState::Visiting);
                        stack.push((dep, 0));
                    }
                    VisitState::Visiting => {
                        let start = stack
                            .iter()
                            .position(|&(n, _)| n == dep)
                            .unwrap_or_default();
                        let mut cycle = stack[start..]
                            .iter()
                            .map(|&(n, _)| n)
                            .collect::<Vec<_>>();
                        cycle.push(dep);
                        return Err(CycleError::new(cycle));
                    }
                    VisitState::Visited => {}
                }
            }
        }

        Ok(order)
    }
}
