//! Built-in units.
//!
//! The compiler ships types and functions that no source file defines. They
//! are registered per path in a [`BuiltinRegistry`] and turned into ordinary,
//! reference-free graph nodes by [`add_builtin_modules`].

use camino::{Utf8Path, Utf8PathBuf};
use hhat_ir::prelude::*;
use indexmap::IndexMap;
use log::debug;
use owo_colors::OwoColorize;

use crate::{error::GraphResult, graph::IrGraph};

pub const STD_TYPES_PATH: &str = "src/hat_types/.hat_std";
pub const ARITHMETIC_PATH: &str = "src/.hat_std/math/arithmetic";
pub const IO_PATH: &str = "src/.hat_core/io";

const STD_TYPES: [&str; 12] = [
    "bool", "u32", "i32", "f32", "u64", "i64", "f64", "str", "@bool", "@u2", "@u3", "@u4",
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuiltinModule {
    pub types: Vec<TypeDef>,
    pub fns: Vec<FnDef>,
}

/// Built-in definitions grouped by the unit path they live at.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuiltinRegistry {
    modules: IndexMap<Utf8PathBuf, BuiltinModule>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The types and functions every program can rely on.
    pub fn core() -> Self {
        let mut registry = Self::new();

        for ty in STD_TYPES {
            registry.add_type(STD_TYPES_PATH, TypeDef::core(ty));
        }

        let binop = |name: &str, lhs: &str, rhs: &str, ty: &str| {
            FnDef::builtin(FnHeaderDef::new(
                name,
                ty,
                [
                    (Symbol::from("a"), Name::from(lhs)),
                    (Symbol::from("b"), Name::from(rhs)),
                ],
            ))
        };

        for op in ["add", "sub", "mul", "div", "pow"] {
            registry.add_fn(ARITHMETIC_PATH, binop(op, "int", "int", "int"));
            registry.add_fn(ARITHMETIC_PATH, binop(op, "float", "float", "float"));
            registry.add_fn(ARITHMETIC_PATH, binop(op, "int", "float", "float"));
        }
        for op in ["div", "pow"] {
            registry.add_fn(ARITHMETIC_PATH, binop(op, "float", "int", "float"));
        }

        registry.add_fn(
            IO_PATH,
            FnDef::builtin(FnHeaderDef::new(
                "print",
                Symbol::NULL,
                [(Symbol::from("value"), Name::from("any"))],
            )),
        );

        registry
    }

    pub fn add_type(&mut self, path: impl AsRef<Utf8Path>, def: TypeDef) {
        self.module_mut(path).types.push(def);
    }

    pub fn add_fn(&mut self, path: impl AsRef<Utf8Path>, def: FnDef) {
        self.module_mut(path).fns.push(def);
    }

    fn module_mut(&mut self, path: impl AsRef<Utf8Path>) -> &mut BuiltinModule {
        self.modules
            .entry(hhat_utils::path::normalize(path))
            .or_default()
    }

    pub fn get(&self, path: impl AsRef<Utf8Path>) -> Option<&BuiltinModule> {
        self.modules.get(&hhat_utils::path::normalize(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Utf8PathBuf, &BuiltinModule)> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl BuiltinModule {
    /// Synthesizes the unit for this module.
    pub fn to_ir(&self, path: &Utf8Path) -> GraphResult<Ir> {
        let mut table = SymbolTable::new();

        for def in &self.types {
            table.types_mut().add(def.clone())?;
        }
        for def in &self.fns {
            table.fns_mut().add(def.clone());
        }

        Ok(Ir::standalone(IrModule::new(path, table)?))
    }
}

/// Adds one node per registered path and optionally builds the graph.
/// Returns the identities of the added units, in registration order.
///
/// Nothing is added unless every module converts and none of them clashes
/// with a unit already in the graph.
pub fn add_builtin_modules(
    graph: &mut IrGraph,
    registry: &BuiltinRegistry,
    to_build: bool,
) -> GraphResult<Vec<IrHash>> {
    let irs = registry
        .iter()
        .map(|(path, module)| module.to_ir(path))
        .collect::<GraphResult<Vec<_>>>()?;

    let added = graph.add_nodes(irs)?;

    for ((_, module), hash) in registry.iter().zip(&added) {
        debug!(
            "{} {hash} ({} types, {} fns)",
            "Builtin".bold().bright_white(),
            module.types.len(),
            module.fns.len()
        );
    }

    if to_build {
        graph.build()?;
    }

    Ok(added)
}
