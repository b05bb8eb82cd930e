use std::fmt;

use derive_more::{Display, From};
use ecow::EcoString;

use crate::error::IrError;

/// A variable, function, type, argument or parameter name.
///
/// Names starting with `@` belong to the quantum paradigm.
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{_0}")]
pub struct Symbol(EcoString);

impl Symbol {
    pub const QUANTUM_PREFIX: char = '@';
    pub const NULL: &'static str = "null";

    pub fn new(value: impl Into<EcoString>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_quantum(&self) -> bool {
        self.0.starts_with(Self::QUANTUM_PREFIX)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0 == Self::NULL
    }

    pub fn null() -> Self {
        Self::new(Self::NULL)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A symbol with attributes, e.g. an import path `math.arithmetic.add`
/// or a type member `point.x`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeSymbol(Vec<Symbol>);

impl CompositeSymbol {
    pub fn new(parts: impl IntoIterator<Item = Symbol>) -> Result<Self, IrError> {
        let parts = parts.into_iter().collect::<Vec<_>>();

        if parts.is_empty() {
            return Err(IrError::EmptyCompositeSymbol);
        }

        Ok(Self(parts))
    }

    /// Splits a dotted path such as `math.arithmetic.add`.
    pub fn parse(dotted: &str) -> Result<Self, IrError> {
        Self::new(
            dotted
                .split('.')
                .filter(|part| !part.is_empty())
                .map(Symbol::from),
        )
    }

    pub fn parts(&self) -> &[Symbol] {
        &self.0
    }

    /// The last segment, usually the imported item itself.
    pub fn last(&self) -> &Symbol {
        // non-empty by construction
        &self.0[self.0.len() - 1]
    }

    pub fn is_quantum(&self) -> bool {
        self.0[0].is_quantum()
    }
}

impl fmt::Display for CompositeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();

        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
        }

        for part in iter {
            write!(f, ".{part}")?;
        }

        Ok(())
    }
}

/// Key of every symbol table: either a plain or a composite symbol.
#[derive(Debug, Display, From, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Name {
    Symbol(Symbol),
    Composite(CompositeSymbol),
}

impl Name {
    pub fn is_quantum(&self) -> bool {
        match self {
            Self::Symbol(symbol) => symbol.is_quantum(),
            Self::Composite(composite) => composite.is_quantum(),
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        hhat_utils::as_variant!(self, Self::Symbol)
    }

    pub fn as_composite(&self) -> Option<&CompositeSymbol> {
        hhat_utils::as_variant!(self, Self::Composite)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::Symbol(Symbol::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantum_prefix() {
        assert!(Symbol::from("@bool").is_quantum());
        assert!(!Symbol::from("bool").is_quantum());
        assert!(Name::from("@u2").is_quantum());
    }

    #[test]
    fn composite_display_and_last() {
        let path = CompositeSymbol::parse("math.arithmetic.add").unwrap();

        assert_eq!(path.to_string(), "math.arithmetic.add");
        assert_eq!(path.last(), &Symbol::from("add"));
        assert_eq!(Name::from(path).to_string(), "math.arithmetic.add");
    }

    #[test]
    fn empty_composite_is_rejected() {
        assert_eq!(CompositeSymbol::parse(".."), Err(IrError::EmptyCompositeSymbol));
    }

    #[test]
    fn name_variants() {
        let name = Name::from("x");
        assert_eq!(name.as_symbol(), Some(&Symbol::from("x")));
        assert!(name.as_composite().is_none());
    }
}
