use std::fmt;

use ecow::EcoString;

use crate::{
    block::IrBlock,
    header::{FnHeader, FnHeaderDef},
    symbol::{Name, Symbol},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: EcoString,
    pub ty: Symbol,
}

impl Literal {
    pub fn new(value: impl Into<EcoString>, ty: impl Into<Symbol>) -> Self {
        Self {
            value: value.into(),
            ty: ty.into(),
        }
    }

    pub fn is_quantum(&self) -> bool {
        self.ty.is_quantum()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.value, self.ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Provided by the compiler, e.g. `u64` or `@bool`
    Core,
    /// `type id:u64`
    Single,
    /// `type point { x:f64 y:f64 }`
    Struct,
    /// `type color { red green blue }`
    Enum,
}

/// A type definition. Members are empty for core types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDef {
    pub name: Name,
    pub kind: TypeKind,
    pub members: Vec<(Symbol, Name)>,
}

impl TypeDef {
    pub fn new(name: impl Into<Name>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: Vec::new(),
        }
    }

    pub fn core(name: impl Into<Name>) -> Self {
        Self::new(name, TypeKind::Core)
    }

    pub fn with_member(mut self, member: impl Into<Symbol>, ty: impl Into<Name>) -> Self {
        self.members.push((member.into(), ty.into()));
        self
    }

    pub fn is_quantum(&self) -> bool {
        self.name.is_quantum()
    }

    /// Type names this definition needs to be present elsewhere.
    pub fn member_types(&self) -> impl Iterator<Item = &Name> {
        self.members.iter().map(|(_, ty)| ty)
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if self.members.is_empty() {
            return Ok(());
        }

        write!(f, " {{")?;
        for (member, ty) in &self.members {
            write!(f, " {member}:{ty}")?;
        }
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FnBody {
    Block(IrBlock),
    /// Implemented by the runtime, no IR body
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnDef {
    pub header_def: FnHeaderDef,
    pub body: FnBody,
}

impl FnDef {
    pub fn new(header_def: FnHeaderDef, body: IrBlock) -> Self {
        Self {
            header_def,
            body: FnBody::Block(body),
        }
    }

    pub fn builtin(header_def: FnHeaderDef) -> Self {
        Self {
            header_def,
            body: FnBody::Builtin,
        }
    }

    pub fn name(&self) -> &Name {
        &self.header_def.name
    }

    pub fn header(&self) -> FnHeader {
        self.header_def.header()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.body, FnBody::Builtin)
    }
}

impl fmt::Display for FnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            FnBody::Block(block) => write!(f, "fn {} {{ {block} }}", self.header_def),
            FnBody::Builtin => write!(f, "fn {} <builtin>", self.header_def),
        }
    }
}

/// Modifiers apply to an object through `obj<mods>`; they are shaped like
/// functions and share their overloading rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModifierDef {
    pub header_def: FnHeaderDef,
    pub body: IrBlock,
}

impl ModifierDef {
    pub fn new(header_def: FnHeaderDef, body: IrBlock) -> Self {
        Self { header_def, body }
    }
}

impl fmt::Display for ModifierDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modifier {} {{ {} }}", self.header_def, self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Constant,
    Mutable,
    Appendable,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataDef {
    pub name: Name,
    pub ty: Name,
    pub kind: DataKind,
    pub value: Option<Literal>,
}

impl DataDef {
    pub fn new(name: impl Into<Name>, ty: impl Into<Name>, kind: DataKind) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            kind,
            value: None,
        }
    }

    pub fn constant(name: impl Into<Name>, ty: impl Into<Name>, value: Literal) -> Self {
        Self {
            value: Some(value),
            ..Self::new(name, ty, DataKind::Constant)
        }
    }

    pub fn is_constant(&self) -> bool {
        self.kind == DataKind::Constant
    }
}

impl fmt::Display for DataDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.ty)?;

        if let Some(value) = &self.value {
            write!(f, "={value}")?;
        }

        Ok(())
    }
}
