use std::{fmt, ops::Index};

use camino::{Utf8Path, Utf8PathBuf};
use hhat_ir::prelude::*;

use crate::{
    error::{LookupError, PhfError},
    node::IrNode,
    options::PhfLimits,
    phf::{self, PhfParams},
};

/// Frozen, perfect-hash indexed set of nodes.
///
/// Node `i` sits in the slot the hash function assigns to its uid, so a
/// lookup by identity is a single slot read followed by one comparison.
#[derive(Debug, Clone)]
pub struct NodeSet {
    nodes: Vec<IrNode>,
    phf: Option<PhfParams>,
}

impl NodeSet {
    /// Wraps nodes that are already in slot order for `phf`.
    ///
    /// Without parameters the set still supports membership and positional
    /// access, but not lookups by identity.
    pub fn new(nodes: Vec<IrNode>, phf: Option<PhfParams>) -> Self {
        Self { nodes, phf }
    }

    /// Searches perfect-hash parameters for `nodes` and freezes them.
    pub fn build(nodes: Vec<IrNode>, limits: PhfLimits) -> Result<Self, PhfError> {
        let (nodes, params) = phf::generate(nodes, limits)?;
        Ok(Self::new(nodes, Some(params)))
    }

    pub fn phf(&self) -> Option<&PhfParams> {
        self.phf.as_ref()
    }

    /// Slot of `hash`, provided the node there really has this identity.
    pub fn index_of(&self, hash: &IrHash) -> Result<Option<usize>, LookupError> {
        let phf = self.phf.as_ref().ok_or(LookupError::NoPhf)?;
        let slot = phf.slot_of(hash.uid());

        Ok(self
            .nodes
            .get(slot)
            .filter(|node| node.hash() == hash)
            .map(|_| slot))
    }

    pub fn get(&self, hash: &IrHash) -> Result<Option<&IrNode>, LookupError> {
        Ok(self.index_of(hash)?.map(|slot| &self.nodes[slot]))
    }

    /// Looks a unit up by path through its identity.
    pub fn get_by_path(&self, path: &Utf8Path) -> Result<Option<&IrNode>, LookupError> {
        match IrHash::new(path) {
            Ok(hash) => self.get(&hash),
            Err(_) => Ok(None),
        }
    }

    pub fn contains(&self, query: impl NodeQuery) -> bool {
        query.contained_in(self)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IrNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Positional access, for iteration and dumps.
impl Index<usize> for NodeSet {
    type Output = IrNode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a IrNode;
    type IntoIter = std::slice::Iter<'a, IrNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl fmt::Display for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, node) in self.nodes.iter().enumerate() {
            writeln!(f, "N#{idx:02} {node}")?;
        }
        Ok(())
    }
}

/// Ways of asking whether a node set holds a unit.
pub trait NodeQuery {
    fn matches(&self, node: &IrNode) -> bool;

    fn contained_in(&self, set: &NodeSet) -> bool {
        set.iter().any(|node| self.matches(node))
    }
}

impl NodeQuery for &IrNode {
    fn matches(&self, node: &IrNode) -> bool {
        *self == node
    }
}

impl NodeQuery for &IrHash {
    fn matches(&self, node: &IrNode) -> bool {
        *self == node.hash()
    }

    fn contained_in(&self, set: &NodeSet) -> bool {
        match set.get(self) {
            Ok(found) => found.is_some(),
            Err(_) => set.iter().any(|node| self.matches(node)),
        }
    }
}

impl NodeQuery for &Utf8Path {
    fn matches(&self, node: &IrNode) -> bool {
        node.hash().matches_path(self)
    }
}

impl NodeQuery for &Utf8PathBuf {
    fn matches(&self, node: &IrNode) -> bool {
        node.hash().matches_path(self)
    }
}

impl NodeQuery for &str {
    fn matches(&self, node: &IrNode) -> bool {
        node.hash().matches_path(self)
    }
}

/// A unit at `path` that also defines the symbol.
impl<'q, P: AsRef<Utf8Path>> NodeQuery for (P, SymbolQuery<'q>) {
    fn matches(&self, node: &IrNode) -> bool {
        node.hash().matches_path(&self.0) && node.contains(self.1)
    }
}
