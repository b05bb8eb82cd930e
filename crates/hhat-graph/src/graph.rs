//! The IR graph.
//!
//! Units are added one by one while the importer discovers them. Once all
//! are known, [`IrGraph::build`] freezes them into a [`NodeSet`], checks that
//! every reference lands on a unit of the graph and records the dependency
//! edges. From then on the graph only answers lookups.

use std::{fmt, mem};

use camino::Utf8Path;
use hhat_ir::prelude::*;
use hhat_utils::{
    dependency::{CycleError, DependencyGraph},
    errors::Errors,
};
use indexmap::IndexMap;
use log::{debug, trace};
use owo_colors::OwoColorize;

use crate::{
    error::{GraphError, GraphResult, LookupError, MissingReference, RefKind},
    node::IrNode,
    node_set::{NodeQuery, NodeSet},
    options::GraphOptions,
};

#[derive(Debug)]
enum GraphState {
    Building(Vec<IrNode>),
    Built(BuiltGraph),
    /// A build failed; nothing can be done with this graph anymore.
    Failed,
}

#[derive(Debug)]
struct BuiltGraph {
    nodes: NodeSet,
    /// Edges between node slots
    deps: DependencyGraph<usize>,
}

#[derive(Debug)]
pub struct IrGraph {
    state: GraphState,
    main: Option<IrHash>,
    options: GraphOptions,
}

impl Default for IrGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl IrGraph {
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            state: GraphState::Building(Vec::new()),
            main: None,
            options,
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, GraphState::Built(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, GraphState::Failed)
    }

    /// Number of units, whether building or built.
    pub fn len(&self) -> usize {
        match &self.state {
            GraphState::Building(nodes) => nodes.len(),
            GraphState::Built(built) => built.nodes.len(),
            GraphState::Failed => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a unit and returns its identity.
    pub fn add_node(&mut self, ir: Ir) -> GraphResult<IrHash> {
        let verify_uids = self.options.verify_uids;
        let nodes = self.building_mut()?;

        let node = IrNode::new(ir);
        let hash = node.hash().clone();

        if verify_uids {
            check_uid(nodes.iter(), &hash)?;
        }

        trace!("{} {hash}", "Add Node".bold().bright_white());

        nodes.push(node);
        Ok(hash)
    }

    /// Adds several units at once. Either all of them are added or, on the
    /// first conflict, none is.
    pub fn add_nodes(&mut self, irs: impl IntoIterator<Item = Ir>) -> GraphResult<Vec<IrHash>> {
        let verify_uids = self.options.verify_uids;
        let nodes = self.building_mut()?;

        let batch = irs.into_iter().map(IrNode::new).collect::<Vec<_>>();

        if verify_uids {
            for (idx, node) in batch.iter().enumerate() {
                let earlier = nodes.iter().chain(&batch[..idx]);
                check_uid(earlier, node.hash())?;
            }
        }

        let hashes = batch
            .iter()
            .map(|node| node.hash().clone())
            .collect::<Vec<_>>();

        for hash in &hashes {
            trace!("{} {hash}", "Add Node".bold().bright_white());
        }

        nodes.extend(batch);
        Ok(hashes)
    }

    /// Adds the program's entry unit. A later call replaces the recorded
    /// entry, the earlier unit stays in the graph.
    pub fn add_main_node(&mut self, ir: Ir) -> GraphResult<IrHash> {
        let hash = self.add_node(ir)?;
        self.main = Some(hash.clone());
        Ok(hash)
    }

    /// Freezes the graph.
    ///
    /// Fails without touching the graph when it is already built or has no
    /// nodes. Any other failure leaves the graph unusable.
    pub fn build(&mut self) -> GraphResult<()> {
        let nodes = match &mut self.state {
            GraphState::Building(nodes) if nodes.is_empty() => return Err(GraphError::Empty),
            GraphState::Building(nodes) => mem::take(nodes),
            GraphState::Built(_) => return Err(GraphError::AlreadyBuilt),
            GraphState::Failed => return Err(GraphError::Unusable),
        };

        self.state = GraphState::Failed;

        let nodes = NodeSet::build(nodes, self.options.phf)?;
        let built = link(nodes)?;

        debug!(
            "{} {} units\n{}",
            "Build".bold().bright_white(),
            built.nodes.len(),
            built.nodes
        );

        self.state = GraphState::Built(built);
        Ok(())
    }

    /// Identity of the entry unit, if one was added.
    pub fn main(&self) -> Option<&IrHash> {
        self.main.as_ref()
    }

    pub fn main_node(&self) -> GraphResult<Option<&IrNode>> {
        match &self.main {
            Some(hash) => self.get_node(hash),
            None => Ok(None),
        }
    }

    /// The frozen node set.
    pub fn nodes(&self) -> GraphResult<&NodeSet> {
        self.built().map(|built| &built.nodes)
    }

    pub fn get_node(&self, hash: &IrHash) -> GraphResult<Option<&IrNode>> {
        match &self.state {
            GraphState::Building(nodes) => Ok(nodes.iter().find(|node| node.hash() == hash)),
            GraphState::Built(built) => Ok(built.nodes.get(hash)?),
            GraphState::Failed => Err(GraphError::Unusable),
        }
    }

    pub fn get_node_by_path(&self, path: &Utf8Path) -> GraphResult<Option<&IrNode>> {
        match &self.state {
            GraphState::Building(nodes) => {
                Ok(nodes.iter().find(|node| node.hash().matches_path(path)))
            }
            GraphState::Built(built) => Ok(built.nodes.get_by_path(path)?),
            GraphState::Failed => Err(GraphError::Unusable),
        }
    }

    /// Every overload of `name` defined in the unit at `path`, in the order
    /// they were defined.
    pub fn get_fns(
        &self,
        path: impl AsRef<Utf8Path>,
        name: &Name,
    ) -> GraphResult<&IndexMap<FnHeader, FnDef>> {
        let path = path.as_ref();

        let node = self
            .get_node_by_path(path)?
            .ok_or_else(|| LookupError::UnknownUnit {
                path: path.to_owned(),
            })?;

        let overloads = node
            .symbol_table()
            .fns()
            .get_overloads(name)
            .ok_or_else(|| LookupError::UnknownSymbol {
                name: name.clone(),
                unit: node.hash().clone(),
            })?;

        Ok(overloads)
    }

    /// Membership test used during discovery. A failed graph contains
    /// nothing.
    pub fn contains(&self, query: impl NodeQuery) -> bool {
        match &self.state {
            GraphState::Building(nodes) => nodes.iter().any(|node| query.matches(node)),
            GraphState::Built(built) => built.nodes.contains(query),
            GraphState::Failed => false,
        }
    }

    pub fn contains_path(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.contains(path.as_ref())
    }

    /// Whether the unit at `path` defines the queried type or function.
    pub fn contains_symbol<'a>(
        &self,
        path: impl AsRef<Utf8Path>,
        query: impl Into<SymbolQuery<'a>>,
    ) -> bool {
        self.contains((path.as_ref(), query.into()))
    }

    /// Replaces a unit in a built graph.
    pub fn update(&mut self, _hash: &IrHash, _ir: Ir) -> GraphResult<()> {
        Err(GraphError::NotImplemented("IrGraph::update"))
    }

    /// Units `hash` references, in the order its references were recorded.
    pub fn dependencies_of(&self, hash: &IrHash) -> GraphResult<Vec<&IrHash>> {
        let built = self.built()?;
        let slot = built
            .nodes
            .index_of(hash)?
            .ok_or_else(|| GraphError::UnknownNode(hash.clone()))?;

        Ok(built
            .deps
            .dependencies_of(slot)
            .map(|&dep| built.nodes[dep].hash())
            .collect())
    }

    /// Every unit, each one after all the units it references.
    pub fn link_order(&self) -> GraphResult<Vec<&IrHash>> {
        let built = self.built()?;

        let order = built.deps.topological_sort().map_err(|cycle| {
            GraphError::Cycle(CycleError::new(
                cycle
                    .path()
                    .iter()
                    .map(|&slot| built.nodes[slot].hash().clone())
                    .collect(),
            ))
        })?;

        Ok(order
            .into_iter()
            .map(|slot| built.nodes[slot].hash())
            .collect())
    }

    fn building_mut(&mut self) -> GraphResult<&mut Vec<IrNode>> {
        match &mut self.state {
            GraphState::Building(nodes) => Ok(nodes),
            GraphState::Built(_) => Err(GraphError::AlreadyBuilt),
            GraphState::Failed => Err(GraphError::Unusable),
        }
    }

    fn built(&self) -> GraphResult<&BuiltGraph> {
        match &self.state {
            GraphState::Built(built) => Ok(built),
            GraphState::Building(_) => Err(GraphError::NotBuilt),
            GraphState::Failed => Err(GraphError::Unusable),
        }
    }
}

/// Rejects `hash` when one of `nodes` already has the same uid.
fn check_uid<'a>(nodes: impl IntoIterator<Item = &'a IrNode>, hash: &IrHash) -> GraphResult<()> {
    match nodes.into_iter().find(|other| other.hash() == hash) {
        Some(existing) if existing.path() == hash.key() => {
            Err(GraphError::DuplicateNode(hash.clone()))
        }
        Some(existing) => Err(GraphError::UidCollision {
            existing: existing.path().to_owned(),
            new: hash.key().to_owned(),
        }),
        None => Ok(()),
    }
}

/// Checks every reference of every node against the frozen set and records
/// the edges between them.
fn link(nodes: NodeSet) -> GraphResult<BuiltGraph> {
    let mut deps = DependencyGraph::new();
    let mut missing = Errors::new();

    for (slot, node) in nodes.iter().enumerate() {
        deps.add_node(slot);

        let refs = node.refs();
        let types = refs
            .types
            .iter()
            .map(|(name, unit)| (RefKind::Type(name.clone()), unit));
        let fns = refs
            .fns
            .iter()
            .map(|(header, unit)| (RefKind::Fn(header.clone()), unit));

        for (symbol, unit) in types.chain(fns) {
            match nodes.index_of(unit)? {
                Some(dep) if dep == slot => {}
                Some(dep) => deps.add_dependency(slot, dep),
                None => missing.push(MissingReference {
                    from: node.hash().clone(),
                    symbol,
                    expected: unit.clone(),
                }),
            }
        }
    }

    missing.into_result(BuiltGraph { nodes, deps }, |errors| {
        GraphError::MissingReferences { errors }
    })
}

impl fmt::Display for IrGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let is_main = |node: &IrNode| self.main.as_ref() == Some(node.hash());

        match &self.state {
            GraphState::Building(nodes) => {
                writeln!(f, "IrGraph (building)")?;
                for (idx, node) in nodes.iter().enumerate() {
                    let mark = if is_main(node) { " main" } else { "" };
                    writeln!(f, "N#{idx:02} {node}{mark}")?;
                }
            }
            GraphState::Built(built) => {
                match built.nodes.phf() {
                    Some(phf) => writeln!(f, "IrGraph (built, {phf})")?,
                    None => writeln!(f, "IrGraph (built)")?,
                }
                for (idx, node) in built.nodes.iter().enumerate() {
                    let mark = if is_main(node) { " main" } else { "" };
                    write!(f, "N#{idx:02} {node}{mark}")?;

                    let mut deps = built.deps.dependencies_of(idx).peekable();
                    if deps.peek().is_some() {
                        write!(f, " ->")?;
                        for &dep in deps {
                            write!(f, " {}", built.nodes[dep])?;
                        }
                    }
                    writeln!(f)?;
                }
            }
            GraphState::Failed => writeln!(f, "IrGraph (failed)")?,
        }

        Ok(())
    }
}
