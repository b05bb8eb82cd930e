use hhat_graph::error::{GraphError, RefKind};
use hhat_ir::hash::IrHash;
use hhat_utils::errors::Errors;
use miette::Diagnostic;
use thiserror::Error;

/// A reference whose target unit exists but does not define the symbol.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("{from} expects {symbol} in {expected}, which does not define it")]
#[diagnostic(code(hhat::driver::undefined_symbol))]
pub struct UndefinedSymbol {
    pub from: IrHash,
    pub symbol: RefKind,
    pub expected: IrHash,
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("{} reference(s) to undefined symbols", .errors.len())]
    #[diagnostic(code(hhat::driver::undefined_symbols))]
    UndefinedSymbols {
        #[related]
        errors: Errors<UndefinedSymbol>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

pub type DriverResult<T> = Result<T, DriverError>;
