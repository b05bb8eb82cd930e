//! Linking session.
//!
//! A [`Linker`] collects the units a front end compiled, links them once and
//! hands back a read-only [`Program`].

pub mod config;
pub mod error;

use camino::Utf8Path;
use hhat_graph::{prelude::*, tools};
use hhat_ir::prelude::*;
use hhat_utils::errors::Errors;
use log::{debug, info};
use owo_colors::OwoColorize;

pub use config::DriverOptions;
pub use error::{DriverError, DriverResult, UndefinedSymbol};

#[derive(Debug)]
pub struct Linker {
    graph: IrGraph,
    options: DriverOptions,
    builtins: Vec<IrHash>,
}

impl Linker {
    pub fn new() -> DriverResult<Self> {
        Self::with_options(DriverOptions::default())
    }

    pub fn with_options(options: DriverOptions) -> DriverResult<Self> {
        Self::with_registry(options, &BuiltinRegistry::core())
    }

    /// Uses `registry` instead of the default built-ins. The registry is
    /// ignored unless `options.load_builtins` is set.
    pub fn with_registry(options: DriverOptions, registry: &BuiltinRegistry) -> DriverResult<Self> {
        let mut graph = IrGraph::with_options(options.graph);

        let builtins = if options.load_builtins {
            add_builtin_modules(&mut graph, registry, options.build_after_builtins)?
        } else {
            Vec::new()
        };

        Ok(Self {
            graph,
            options,
            builtins,
        })
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Identities of the registered built-in units.
    pub fn builtins(&self) -> &[IrHash] {
        &self.builtins
    }

    /// Whether a unit at `path` was already added, so an importer can skip
    /// compiling it again.
    pub fn has_unit(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.graph.contains_path(path)
    }

    pub fn add_unit(&mut self, ir: Ir) -> DriverResult<IrHash> {
        Ok(self.graph.add_node(ir)?)
    }

    pub fn add_main(&mut self, ir: Ir) -> DriverResult<IrHash> {
        Ok(self.graph.add_main_node(ir)?)
    }

    /// Builds the graph, unless it was frozen right after the built-ins, and
    /// computes the order units have to be initialized in.
    pub fn link(mut self) -> DriverResult<Program> {
        if !self.graph.is_built() {
            self.graph.build()?;
        }

        if self.options.strict_types {
            check_symbols(&self.graph)?;
        }

        let order = match self.graph.link_order() {
            Ok(order) => order.into_iter().cloned().collect::<Vec<_>>(),
            // mutual references are legal, initialize such units in slot order
            Err(GraphError::Cycle(cycle)) => {
                debug!("{} {cycle}", "Link Order".bold().bright_white());

                self.graph
                    .nodes()?
                    .iter()
                    .map(|node| node.hash().clone())
                    .collect()
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            "{} {} units, main {}",
            "Linked".bold().bright_white(),
            order.len(),
            self.graph
                .main()
                .map_or_else(|| "none".to_owned(), ToString::to_string)
        );

        Ok(Program {
            graph: self.graph,
            order,
        })
    }
}

/// Checks that every reference lands on a unit that defines the symbol.
fn check_symbols(graph: &IrGraph) -> DriverResult<()> {
    let mut errors = Errors::new();

    for node in graph.nodes()? {
        let from = node.hash();
        let refs = node.refs();

        for (name, unit) in refs.types.iter() {
            if tools::get_type(unit, name, graph).is_none() {
                errors.push(UndefinedSymbol {
                    from: from.clone(),
                    symbol: RefKind::Type(name.clone()),
                    expected: unit.clone(),
                });
            }
        }

        for (header, unit) in refs.fns.iter() {
            if tools::get_fn(unit, header, graph).is_none() {
                errors.push(UndefinedSymbol {
                    from: from.clone(),
                    symbol: RefKind::Fn(header.clone()),
                    expected: unit.clone(),
                });
            }
        }
    }

    debug!(
        "{} {} undefined symbol(s)",
        "Check Symbols".bold().bright_white(),
        errors.len()
    );

    errors.into_result((), |errors| DriverError::UndefinedSymbols { errors })
}

/// A linked program. Only answers lookups.
#[derive(Debug)]
pub struct Program {
    graph: IrGraph,
    order: Vec<IrHash>,
}

impl Program {
    pub fn graph(&self) -> &IrGraph {
        &self.graph
    }

    pub fn main(&self) -> Option<&IrNode> {
        self.graph.main_node().ok().flatten()
    }

    /// Every unit, each one after the units it references. When units
    /// reference each other there is no such order and this is the order of
    /// the frozen node set.
    pub fn link_order(&self) -> &[IrHash] {
        &self.order
    }

    pub fn get_type(&self, unit: &IrHash, name: &Name) -> Option<&TypeDef> {
        tools::get_type(unit, name, &self.graph)
    }

    pub fn get_fn<'q>(
        &self,
        unit: &IrHash,
        query: impl Into<SymbolQuery<'q>>,
    ) -> Option<FnLookup<'_, FnDef>> {
        tools::get_fn(unit, query, &self.graph)
    }

    /// The definition `from` refers to with `header`.
    pub fn resolve_fn(&self, from: &IrHash, header: &FnHeader) -> Option<&FnDef> {
        tools::resolve_fn(from, header, &self.graph)
    }

    pub fn resolve_type(&self, from: &IrHash, name: &Name) -> Option<&TypeDef> {
        tools::resolve_type(from, name, &self.graph)
    }
}
