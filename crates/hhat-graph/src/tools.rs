//! Lookups used by type resolution and execution.
//!
//! These never fail: an unknown unit, an unusable graph and an absent symbol
//! all come back as `None`, so a caller in discovery can go import more.

use hhat_ir::prelude::*;

use crate::graph::IrGraph;

/// The type `name` defined in the unit `hash`.
pub fn get_type<'g>(hash: &IrHash, name: &Name, graph: &'g IrGraph) -> Option<&'g TypeDef> {
    let node = graph.get_node(hash).ok().flatten()?;
    node.symbol_table().types().get(name)
}

/// Every overload of a name, or one overload by signature, defined in the
/// unit `hash`.
pub fn get_fn<'g, 'q>(
    hash: &IrHash,
    query: impl Into<SymbolQuery<'q>>,
    graph: &'g IrGraph,
) -> Option<FnLookup<'g, FnDef>> {
    let node = graph.get_node(hash).ok().flatten()?;
    node.symbol_table().fns().get(query)
}

/// Follows the type reference `from` recorded for `name`.
pub fn resolve_type<'g>(from: &IrHash, name: &Name, graph: &'g IrGraph) -> Option<&'g TypeDef> {
    let node = graph.get_node(from).ok().flatten()?;
    let unit = node.refs().types.get(name)?;
    get_type(unit, name, graph)
}

/// Follows the function reference `from` recorded for `header`.
pub fn resolve_fn<'g>(from: &IrHash, header: &FnHeader, graph: &'g IrGraph) -> Option<&'g FnDef> {
    let node = graph.get_node(from).ok().flatten()?;
    let unit = node.refs().fns.get(header)?;
    get_fn(unit, header, graph)?.single()
}
