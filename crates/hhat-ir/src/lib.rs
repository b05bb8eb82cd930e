//! # H-hat IR units
//!
//! Everything a single compiled source file hands to the linker:
//!
//! - [`hash::IrHash`], the stable identity of a unit derived from its path
//! - [`table::SymbolTable`], the five insertion-ordered tables of definitions
//!   (types, functions, constants, meta modules and modifiers)
//! - [`refs::RefTable`], the promises a unit makes about symbols it uses but
//!   which are defined by some other unit
//! - [`module::IrModule`] and [`module::Ir`], bundling all of the above
//!
//! Resolving references is not done here. Tables only record *where to look*;
//! checking that every promise is kept is the job of the IR graph.

pub mod block;
pub mod defs;
pub mod error;
pub mod hash;
pub mod header;
pub mod module;
pub mod refs;
pub mod symbol;
pub mod table;

pub mod prelude {
    pub use crate::block::{CallInstr, CallKind, IrBlock, IrFlag, IrInstr, Stmt, Value};
    pub use crate::defs::{
        DataDef, DataKind, FnBody, FnDef, Literal, ModifierDef, TypeDef, TypeKind,
    };
    pub use crate::error::IrError;
    pub use crate::hash::IrHash;
    pub use crate::header::{FnHeader, FnHeaderDef};
    pub use crate::module::{Ir, IrModule};
    pub use crate::refs::{RefFnTable, RefTable, RefTypeTable, build_reftable};
    pub use crate::symbol::{CompositeSymbol, Name, Symbol};
    pub use crate::table::{
        ConstTable, FnLookup, FnTable, MetaModTable, ModifierTable, OverloadTable, Overloadable,
        SymbolQuery, SymbolTable, TypeTable,
    };
}
