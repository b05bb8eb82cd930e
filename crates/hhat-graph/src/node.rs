use std::{fmt, hash::Hash};

use camino::Utf8Path;
use hhat_ir::prelude::*;

use crate::phf::PhfKey;

/// A compilation unit as a graph node. Equality and hashing go through the
/// unit's identity only.
#[derive(Debug, Clone)]
pub struct IrNode {
    ir: Ir,
}

impl IrNode {
    pub fn new(ir: Ir) -> Self {
        Self { ir }
    }

    #[inline]
    pub fn hash(&self) -> &IrHash {
        self.ir.hash()
    }

    #[inline]
    pub fn path(&self) -> &Utf8Path {
        self.ir.hash().key()
    }

    #[inline]
    pub fn ir(&self) -> &Ir {
        &self.ir
    }

    #[inline]
    pub fn refs(&self) -> &RefTable {
        &self.ir.refs
    }

    #[inline]
    pub fn symbol_table(&self) -> &SymbolTable {
        self.ir.symbol_table()
    }

    /// Whether this unit defines the queried type or function.
    pub fn contains<'a>(&self, query: impl Into<SymbolQuery<'a>>) -> bool {
        self.ir.contains(query)
    }

    pub fn into_ir(self) -> Ir {
        self.ir
    }
}

impl PartialEq for IrNode {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

impl Eq for IrNode {}

impl Hash for IrNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ir.hash().hash(state);
    }
}

impl PhfKey for IrNode {
    fn phf_key(&self) -> u64 {
        self.hash().uid()
    }
}

impl fmt::Display for IrNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str, types: &[&str]) -> IrNode {
        let mut table = SymbolTable::new();
        for ty in types {
            table.types_mut().add(TypeDef::core(*ty)).unwrap();
        }
        IrNode::new(Ir::standalone(IrModule::new(path, table).unwrap()))
    }

    #[test]
    fn equality_follows_identity() {
        let a = node("src/a", &["u64"]);
        let same_path = node("src/./a", &[]);
        let b = node("src/b", &["u64"]);

        assert_eq!(a, same_path);
        assert_ne!(a, b);
    }

    #[test]
    fn contains_symbols() {
        let a = node("src/a", &["u64"]);
        assert!(a.contains(&Name::from("u64")));
        assert!(!a.contains(&Name::from("u32")));
    }
}
