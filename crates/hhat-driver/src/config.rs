//! Module for linker configuration options.

use hhat_graph::options::GraphOptions;
use serde::{Deserialize, Serialize};

/// Options for controlling the driver's behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverOptions {
    /// Options handed to the IR graph
    pub graph: GraphOptions,

    /// Whether to register the built-in units before any user unit
    pub load_builtins: bool,

    /// Whether to freeze the graph right after the built-ins are loaded,
    /// leaving a graph that holds nothing else
    pub build_after_builtins: bool,

    /// Whether linking also checks that every referenced type and function
    /// is defined by the unit it is expected in
    pub strict_types: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            graph: GraphOptions::default(),
            load_builtins: true,
            build_after_builtins: false,
            strict_types: true,
        }
    }
}
