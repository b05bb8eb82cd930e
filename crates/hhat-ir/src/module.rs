use std::fmt;

use camino::Utf8Path;

use crate::{
    block::IrBlock,
    error::IrError,
    hash::IrHash,
    refs::RefTable,
    table::{SymbolQuery, SymbolTable},
};

/// A compiled unit without its references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrModule {
    pub hash: IrHash,
    pub symbol_table: SymbolTable,
    /// Entry block, only present in the main unit.
    pub main: Option<IrBlock>,
}

impl IrModule {
    pub fn new(path: impl AsRef<Utf8Path>, symbol_table: SymbolTable) -> Result<Self, IrError> {
        Ok(Self {
            hash: IrHash::new(path)?,
            symbol_table,
            main: None,
        })
    }

    pub fn with_main(mut self, main: IrBlock) -> Self {
        self.main = Some(main);
        self
    }
}

impl fmt::Display for IrModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module {}", self.hash)?;
        write!(f, "{}", self.symbol_table)?;

        if let Some(main) = &self.main {
            writeln!(f, "main:")?;
            writeln!(f, "{main}")?;
        }

        Ok(())
    }
}

/// A compiled unit as handed to the linker: the module plus the references
/// it expects other units to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ir {
    pub refs: RefTable,
    pub module: IrModule,
}

impl Ir {
    pub fn new(module: IrModule, refs: RefTable) -> Self {
        Self { refs, module }
    }

    /// A unit that uses nothing outside itself.
    pub fn standalone(module: IrModule) -> Self {
        Self::new(module, RefTable::new())
    }

    #[inline]
    pub fn hash(&self) -> &IrHash {
        &self.module.hash
    }

    #[inline]
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.module.symbol_table
    }

    #[inline]
    pub fn main(&self) -> Option<&IrBlock> {
        self.module.main.as_ref()
    }

    pub fn contains<'a>(&self, query: impl Into<SymbolQuery<'a>>) -> bool {
        self.module.symbol_table.contains(query)
    }
}

impl fmt::Display for Ir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module)?;
        write!(f, "{}", self.refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{defs::TypeDef, symbol::Name};

    #[test]
    fn unit_dump_lists_tables() {
        let mut table = SymbolTable::new();
        table.types_mut().add(TypeDef::core("u64")).unwrap();

        let ir = Ir::standalone(IrModule::new("src/types", table).unwrap());
        let dump = ir.to_string();

        assert!(dump.starts_with("module [types#"));
        assert!(dump.contains("  u64\n"));
        assert!(dump.contains("ref fns:\n"));
        assert!(ir.contains(&Name::from("u64")));
        assert!(ir.main().is_none());
    }
}
