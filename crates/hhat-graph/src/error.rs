use std::fmt;

use camino::Utf8PathBuf;
use hhat_ir::prelude::*;
use hhat_utils::{dependency::CycleError, errors::Errors};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum PhfError {
    #[error("cannot build a perfect hash over zero items")]
    #[diagnostic(code(hhat::phf::empty))]
    Empty,

    #[error("no collision-free parameters for {len} items with a < {a_limit} and r < {r_limit}")]
    #[diagnostic(
        code(hhat::phf::exhausted),
        help("raise `PhfLimits::a_limit` or `PhfLimits::r_limit`")
    )]
    Exhausted {
        len: usize,
        a_limit: u64,
        r_limit: u32,
    },
}

/// The kind of symbol a reference promised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    Type(Name),
    Fn(FnHeader),
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "type `{name}`"),
            Self::Fn(header) => write!(f, "fn `{header}`"),
        }
    }
}

/// A reference whose target unit is not part of the graph.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("{from} expects {symbol} in {expected}, which was never added")]
#[diagnostic(code(hhat::graph::missing_reference))]
pub struct MissingReference {
    pub from: IrHash,
    pub symbol: RefKind,
    pub expected: IrHash,
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("node set was built without perfect-hash parameters")]
    #[diagnostic(code(hhat::lookup::no_phf))]
    NoPhf,

    #[error("no unit at `{path}`")]
    #[diagnostic(code(hhat::lookup::unknown_unit))]
    UnknownUnit { path: Utf8PathBuf },

    #[error("`{name}` is not defined in {unit}")]
    #[diagnostic(code(hhat::lookup::unknown_symbol))]
    UnknownSymbol { name: Name, unit: IrHash },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph is already built")]
    #[diagnostic(code(hhat::graph::already_built))]
    AlreadyBuilt,

    #[error("graph is not built yet")]
    #[diagnostic(code(hhat::graph::not_built))]
    NotBuilt,

    #[error("cannot build a graph without nodes")]
    #[diagnostic(code(hhat::graph::empty))]
    Empty,

    #[error("graph is unusable after a failed build")]
    #[diagnostic(code(hhat::graph::unusable), help("start over with a new graph"))]
    Unusable,

    #[error("unit {0} was already added")]
    #[diagnostic(code(hhat::graph::duplicate_node))]
    DuplicateNode(IrHash),

    #[error("`{new}` and `{existing}` hash to the same uid")]
    #[diagnostic(code(hhat::graph::uid_collision))]
    UidCollision {
        existing: Utf8PathBuf,
        new: Utf8PathBuf,
    },

    #[error("unit {0} is not part of the graph")]
    #[diagnostic(code(hhat::graph::unknown_node))]
    UnknownNode(IrHash),

    #[error("{} unresolved reference(s)", .errors.len())]
    #[diagnostic(code(hhat::graph::missing_references))]
    MissingReferences {
        #[related]
        errors: Errors<MissingReference>,
    },

    #[error("{0}")]
    #[diagnostic(code(hhat::graph::cycle))]
    Cycle(CycleError<IrHash>),

    #[error("{0} is not implemented")]
    #[diagnostic(code(hhat::graph::not_implemented))]
    NotImplemented(&'static str),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Phf(#[from] PhfError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ir(#[from] IrError),
}

pub type GraphResult<T> = Result<T, GraphError>;
