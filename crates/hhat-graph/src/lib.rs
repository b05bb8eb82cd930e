//! # H-hat IR graph
//!
//! Links independently compiled units into one graph:
//!
//! 1. units are added while the importer discovers them
//! 2. [`graph::IrGraph::build`] freezes them into a perfect-hash indexed
//!    [`node_set::NodeSet`] and checks that every reference resolves
//! 3. the built graph answers point lookups through [`tools`]

pub mod builtins;
pub mod error;
pub mod graph;
pub mod node;
pub mod node_set;
pub mod options;
pub mod phf;
pub mod tools;

pub mod prelude {
    pub use crate::builtins::{BuiltinModule, BuiltinRegistry, add_builtin_modules};
    pub use crate::error::{
        GraphError, GraphResult, LookupError, MissingReference, PhfError, RefKind,
    };
    pub use crate::graph::IrGraph;
    pub use crate::node::IrNode;
    pub use crate::node_set::{NodeQuery, NodeSet};
    pub use crate::options::{GraphOptions, PhfLimits};
    pub use crate::phf::{PhfKey, PhfParams};
    pub use crate::tools::{get_fn, get_type, resolve_fn, resolve_type};
}
