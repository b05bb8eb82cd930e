//! Options controlling graph construction.

use serde::{Deserialize, Serialize};

/// Bounds of the perfect-hash parameter search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhfLimits {
    /// Exclusive upper bound of the multiplier `a`, searched from 1
    pub a_limit: u64,

    /// Exclusive upper bound of the shift `r`, searched from 0
    pub r_limit: u32,
}

impl PhfLimits {
    pub const DEFAULT_A_LIMIT: u64 = 1_000_000;
    pub const DEFAULT_R_LIMIT: u32 = 61;
}

impl Default for PhfLimits {
    fn default() -> Self {
        Self {
            a_limit: Self::DEFAULT_A_LIMIT,
            r_limit: Self::DEFAULT_R_LIMIT,
        }
    }
}

/// Options for controlling the graph's behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Limits of the perfect-hash search run by `build`
    pub phf: PhfLimits,

    /// Whether `add_node` rejects a unit whose uid is already taken
    pub verify_uids: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            phf: PhfLimits::default(),
            verify_uids: true,
        }
    }
}
