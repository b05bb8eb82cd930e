use std::fmt;

use crate::symbol::{Name, Symbol};

/// Overload signature: a function name paired with its ordered argument types.
///
/// This is the fine-grained key of the function-like tables and of the
/// function reference table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FnHeader {
    pub name: Name,
    pub args_types: Vec<Name>,
}

impl FnHeader {
    pub fn new(name: impl Into<Name>, args_types: impl IntoIterator<Item = Name>) -> Self {
        Self {
            name: name.into(),
            args_types: args_types.into_iter().collect(),
        }
    }

    /// Whether `values` are exactly the argument types of this signature.
    pub fn check_args_types(&self, values: &[Name]) -> bool {
        self.args_types == values
    }

    /// Completes the signature with a return type and argument names.
    pub fn transform(self, ty: impl Into<Name>, args_names: Vec<Symbol>) -> FnHeaderDef {
        FnHeaderDef {
            name: self.name,
            ty: ty.into(),
            args_names,
            args_types: self.args_types,
        }
    }
}

impl fmt::Display for FnHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;

        for (i, ty) in self.args_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty}")?;
        }

        write!(f, ")")
    }
}

/// Full function header as written at the definition site:
///
/// ```text
/// fn sum (a:u64 b:u64) u64 { ::add(a b) }
/// ```
///
/// has name `sum`, type `u64`, argument names `(a, b)` and argument types
/// `(u64, u64)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnHeaderDef {
    pub name: Name,
    pub ty: Name,
    pub args_names: Vec<Symbol>,
    pub args_types: Vec<Name>,
}

impl FnHeaderDef {
    pub fn new(
        name: impl Into<Name>,
        ty: impl Into<Name>,
        args: impl IntoIterator<Item = (Symbol, Name)>,
    ) -> Self {
        let (args_names, args_types) = args.into_iter().unzip();

        Self {
            name: name.into(),
            ty: ty.into(),
            args_names,
            args_types,
        }
    }

    /// The overload signature used to store and retrieve this function.
    pub fn header(&self) -> FnHeader {
        FnHeader {
            name: self.name.clone(),
            args_types: self.args_types.clone(),
        }
    }

    pub fn args(&self) -> impl Iterator<Item = (&Symbol, &Name)> {
        self.args_names.iter().zip(&self.args_types)
    }
}

impl fmt::Display for FnHeaderDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}(", self.name, self.ty)?;

        for (i, (name, ty)) in self.args().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{name}:{ty}")?;
        }

        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_add() -> FnHeaderDef {
        FnHeaderDef::new(
            "add",
            "int",
            [
                (Symbol::from("a"), Name::from("int")),
                (Symbol::from("b"), Name::from("int")),
            ],
        )
    }

    #[test]
    fn header_of_definition() {
        let def = int_add();
        let header = FnHeader::new("add", [Name::from("int"), Name::from("int")]);

        assert_eq!(def.header(), header);
        assert_eq!(header.to_string(), "add(int, int)");
        assert_eq!(def.to_string(), "add:int(a:int b:int)");
    }

    #[test]
    fn overloads_differ_by_arg_types() {
        let int = FnHeader::new("add", [Name::from("int"), Name::from("int")]);
        let float = FnHeader::new("add", [Name::from("float"), Name::from("float")]);

        assert_ne!(int, float);
        assert!(int.check_args_types(&[Name::from("int"), Name::from("int")]));
        assert!(!int.check_args_types(&[Name::from("int")]));
    }

    #[test]
    fn transform_round_trips_signature() {
        let header = FnHeader::new("add", [Name::from("int"), Name::from("int")]);
        let def = header
            .clone()
            .transform("int", vec![Symbol::from("a"), Symbol::from("b")]);

        assert_eq!(def, int_add());
        assert_eq!(def.header(), header);
    }
}
