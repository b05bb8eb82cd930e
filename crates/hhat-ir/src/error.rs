use miette::Diagnostic;
use thiserror::Error;

use crate::{hash::IrHash, symbol::Name};

/// Errors raised while constructing IR values and filling symbol tables.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("unit path `{0}` is empty after normalization")]
    #[diagnostic(code(hhat::ir::empty_path))]
    EmptyPath(String),

    #[error("composite symbol needs at least one part")]
    #[diagnostic(code(hhat::ir::empty_composite))]
    EmptyCompositeSymbol,

    #[error("type `{name}` is already defined in this module")]
    #[diagnostic(
        code(hhat::ir::duplicate_type),
        help("use `add_if_absent` to keep the first definition instead")
    )]
    DuplicateType { name: Name },

    #[error("data `{name}` ({ty}) is not constant and cannot be added to the constant table")]
    #[diagnostic(code(hhat::ir::not_constant))]
    NotConstant { name: Name, ty: Name },

    #[error("call to `{callee}` has an invalid combination of arguments, options and body")]
    #[diagnostic(code(hhat::ir::invalid_call))]
    InvalidCall { callee: Name },

    #[error("`{symbol}` is already expected in {first}, cannot also expect it in {second}")]
    #[diagnostic(code(hhat::ir::conflicting_reference))]
    ConflictingReference {
        symbol: String,
        first: IrHash,
        second: IrHash,
    },
}
