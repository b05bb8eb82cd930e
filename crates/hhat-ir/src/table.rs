//! Per-unit symbol tables.
//!
//! All tables are insertion ordered, so dumps and overload listings come out
//! in the order definitions were written.

use std::fmt;

use derive_more::From;
use indexmap::IndexMap;

use crate::{
    defs::{DataDef, FnDef, ModifierDef, TypeDef},
    error::IrError,
    header::FnHeader,
    symbol::Name,
};

/// What a symbol lookup is keyed by: a bare name or a full overload signature.
#[derive(Debug, From, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolQuery<'a> {
    Name(&'a Name),
    Fn(&'a FnHeader),
}

impl<'a> SymbolQuery<'a> {
    pub fn name(&self) -> &'a Name {
        match self {
            Self::Name(name) => name,
            Self::Fn(header) => &header.name,
        }
    }
}

impl fmt::Display for SymbolQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Fn(header) => write!(f, "{header}"),
        }
    }
}

/// Result of a function-like lookup: every overload when queried by name,
/// one definition when queried by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnLookup<'a, D> {
    Overloads(&'a IndexMap<FnHeader, D>),
    Single(&'a D),
}

impl<'a, D> FnLookup<'a, D> {
    pub fn single(self) -> Option<&'a D> {
        match self {
            Self::Single(def) => Some(def),
            Self::Overloads(_) => None,
        }
    }

    pub fn overloads(self) -> Option<&'a IndexMap<FnHeader, D>> {
        match self {
            Self::Overloads(overloads) => Some(overloads),
            Self::Single(_) => None,
        }
    }

    /// Every definition in this lookup, in insertion order.
    pub fn defs(self) -> Vec<&'a D> {
        match self {
            Self::Overloads(overloads) => overloads.values().collect(),
            Self::Single(def) => vec![def],
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TypeTable(IndexMap<Name, TypeDef>);

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type, rejecting a name that is already defined.
    pub fn add(&mut self, def: TypeDef) -> Result<(), IrError> {
        if self.0.contains_key(&def.name) {
            return Err(IrError::DuplicateType { name: def.name });
        }

        self.0.insert(def.name.clone(), def);
        Ok(())
    }

    /// Adds a type unless the name is taken; the first definition wins.
    /// Returns whether the type was inserted.
    pub fn add_if_absent(&mut self, def: TypeDef) -> bool {
        if self.0.contains_key(&def.name) {
            return false;
        }

        self.0.insert(def.name.clone(), def);
        true
    }

    pub fn get(&self, name: &Name) -> Option<&TypeDef> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &TypeDef)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Definitions that can be overloaded by argument types.
pub trait Overloadable {
    fn header(&self) -> FnHeader;
}

impl Overloadable for FnDef {
    fn header(&self) -> FnHeader {
        self.header_def.header()
    }
}

impl Overloadable for ModifierDef {
    fn header(&self) -> FnHeader {
        self.header_def.header()
    }
}

/// Function-shaped table: grouped by name, then by full signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadTable<D>(IndexMap<Name, IndexMap<FnHeader, D>>);

pub type FnTable = OverloadTable<FnDef>;
pub type MetaModTable = OverloadTable<FnDef>;
pub type ModifierTable = OverloadTable<ModifierDef>;

impl<D> Default for OverloadTable<D> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<D: Overloadable> OverloadTable<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition under its signature. A definition with the same
    /// signature is replaced and returned.
    pub fn add(&mut self, def: D) -> Option<D> {
        let header = def.header();

        self.0
            .entry(header.name.clone())
            .or_default()
            .insert(header, def)
    }

    pub fn get<'a>(&self, query: impl Into<SymbolQuery<'a>>) -> Option<FnLookup<'_, D>> {
        match query.into() {
            SymbolQuery::Name(name) => self.0.get(name).map(FnLookup::Overloads),
            SymbolQuery::Fn(header) => self.get_fn(header).map(FnLookup::Single),
        }
    }

    pub fn get_overloads(&self, name: &Name) -> Option<&IndexMap<FnHeader, D>> {
        self.0.get(name)
    }

    pub fn get_fn(&self, header: &FnHeader) -> Option<&D> {
        self.0.get(&header.name)?.get(header)
    }

    pub fn contains<'a>(&self, query: impl Into<SymbolQuery<'a>>) -> bool {
        match query.into() {
            SymbolQuery::Name(name) => self.0.contains_key(name),
            SymbolQuery::Fn(header) => self.get_fn(header).is_some(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &IndexMap<FnHeader, D>)> {
        self.0.iter()
    }

    /// Every definition, flattened, in insertion order.
    pub fn defs(&self) -> impl Iterator<Item = (&FnHeader, &D)> {
        self.0.values().flat_map(|overloads| overloads.iter())
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstTable(IndexMap<Name, DataDef>);

impl ConstTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, def: DataDef) -> Result<(), IrError> {
        if !def.is_constant() {
            return Err(IrError::NotConstant {
                name: def.name,
                ty: def.ty,
            });
        }

        self.0.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn get(&self, name: &Name) -> Option<&DataDef> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &DataDef)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The five tables of a compilation unit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    types: TypeTable,
    fns: FnTable,
    consts: ConstTable,
    metamods: MetaModTable,
    modifiers: ModifierTable,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    pub fn fns(&self) -> &FnTable {
        &self.fns
    }

    pub fn fns_mut(&mut self) -> &mut FnTable {
        &mut self.fns
    }

    pub fn consts(&self) -> &ConstTable {
        &self.consts
    }

    pub fn consts_mut(&mut self) -> &mut ConstTable {
        &mut self.consts
    }

    pub fn metamods(&self) -> &MetaModTable {
        &self.metamods
    }

    pub fn metamods_mut(&mut self) -> &mut MetaModTable {
        &mut self.metamods
    }

    pub fn modifiers(&self) -> &ModifierTable {
        &self.modifiers
    }

    pub fn modifiers_mut(&mut self) -> &mut ModifierTable {
        &mut self.modifiers
    }

    /// Whether a type or function is defined here. A signature query only
    /// matches functions.
    pub fn contains<'a>(&self, query: impl Into<SymbolQuery<'a>>) -> bool {
        let query = query.into();

        match query {
            SymbolQuery::Name(name) => self.types.contains(name) || self.fns.contains(query),
            SymbolQuery::Fn(_) => self.fns.contains(query),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.fns.is_empty()
            && self.consts.is_empty()
            && self.metamods.is_empty()
            && self.modifiers.is_empty()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "types:")?;
        for (_, def) in self.types.iter() {
            writeln!(f, "  {def}")?;
        }

        writeln!(f, "fns:")?;
        for (_, def) in self.fns.defs() {
            writeln!(f, "  {}", def.header_def)?;
        }

        writeln!(f, "consts:")?;
        for (_, def) in self.consts.iter() {
            writeln!(f, "  {def}")?;
        }

        writeln!(f, "metamods:")?;
        for (_, def) in self.metamods.defs() {
            writeln!(f, "  {}", def.header_def)?;
        }

        writeln!(f, "modifiers:")?;
        for (_, def) in self.modifiers.defs() {
            writeln!(f, "  {}", def.header_def)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        block::IrBlock,
        defs::{DataKind, Literal, TypeKind},
        header::FnHeaderDef,
        symbol::Symbol,
    };

    fn binop(name: &str, ty: &str) -> FnDef {
        FnDef::builtin(FnHeaderDef::new(
            name,
            ty,
            [
                (Symbol::from("a"), Name::from(ty)),
                (Symbol::from("b"), Name::from(ty)),
            ],
        ))
    }

    #[test]
    fn type_redeclaration_is_rejected() {
        let mut types = TypeTable::new();
        types.add(TypeDef::core("u64")).unwrap();

        let err = types.add(TypeDef::new("u64", TypeKind::Single));
        assert_eq!(
            err,
            Err(IrError::DuplicateType {
                name: Name::from("u64")
            })
        );
        assert_eq!(types.get(&Name::from("u64")).unwrap().kind, TypeKind::Core);
    }

    #[test]
    fn add_if_absent_keeps_first() {
        let mut types = TypeTable::new();
        assert!(types.add_if_absent(TypeDef::core("u64")));
        assert!(!types.add_if_absent(TypeDef::new("u64", TypeKind::Single)));
        assert_eq!(types.get(&Name::from("u64")).unwrap().kind, TypeKind::Core);
    }

    #[test]
    fn overloads_keep_insertion_order() {
        let mut fns = FnTable::new();
        fns.add(binop("add", "int"));
        fns.add(binop("add", "float"));
        fns.add(binop("sub", "int"));

        let add = Name::from("add");
        let overloads = fns.get(&add).and_then(FnLookup::overloads).unwrap();
        let types = overloads
            .keys()
            .map(|header| header.args_types[0].to_string())
            .collect::<Vec<_>>();

        assert_eq!(types, ["int", "float"]);
        assert_eq!(fns.len(), 2);
        assert_eq!(fns.defs().count(), 3);
    }

    #[test]
    fn query_by_signature() {
        let mut fns = FnTable::new();
        fns.add(binop("add", "int"));

        let header = FnHeader::new("add", [Name::from("int"), Name::from("int")]);
        let missing = FnHeader::new("add", [Name::from("str"), Name::from("str")]);

        let def = fns.get(&header).and_then(FnLookup::single).unwrap();
        assert_eq!(def.header(), header);
        assert!(fns.get(&missing).is_none());
        assert!(fns.contains(&header));
        assert!(!fns.contains(&missing));
    }

    #[test]
    fn same_signature_replaces() {
        let mut fns = FnTable::new();
        assert!(fns.add(binop("add", "int")).is_none());
        assert!(fns.add(binop("add", "int")).is_some());
        assert_eq!(fns.defs().count(), 1);
    }

    #[test]
    fn consts_require_constant_data() {
        let mut consts = ConstTable::new();
        consts
            .add(DataDef::constant("pi", "f64", Literal::new("3.14", "f64")))
            .unwrap();

        let err = consts.add(DataDef::new("x", "u64", DataKind::Mutable));
        assert!(matches!(err, Err(IrError::NotConstant { .. })));
        assert_eq!(consts.len(), 1);
    }

    #[test]
    fn symbol_table_contains() {
        let mut table = SymbolTable::new();
        table.types_mut().add(TypeDef::core("u64")).unwrap();
        table.fns_mut().add(binop("add", "u64"));

        assert!(table.contains(&Name::from("u64")));
        assert!(table.contains(&Name::from("add")));
        assert!(!table.contains(&Name::from("mul")));
    }

    #[test]
    fn metamods_by_name_and_signature() {
        let mut metamods = MetaModTable::new();
        metamods.add(binop("redim", "u64"));
        metamods.add(binop("redim", "@u2"));

        let name = Name::from("redim");
        let lookup = metamods.get(&name).unwrap();
        assert_eq!(lookup.defs(), vec![&binop("redim", "u64"), &binop("redim", "@u2")]);

        let header = binop("redim", "@u2").header();
        assert_eq!(
            metamods.get(&header).and_then(FnLookup::single),
            Some(&binop("redim", "@u2"))
        );
        assert!(metamods.get(&binop("redim", "i32").header()).is_none());
    }

    #[test]
    fn modifiers_by_name_and_signature() {
        let modifier = |ty: &str| {
            ModifierDef::new(
                FnHeaderDef::new("adjoint", ty, [(Symbol::from("obj"), Name::from(ty))]),
                IrBlock::empty_body(),
            )
        };

        let mut modifiers = ModifierTable::new();
        assert!(modifiers.add(modifier("@u2")).is_none());
        assert!(modifiers.add(modifier("@u3")).is_none());
        assert!(modifiers.add(modifier("@u2")).is_some());

        let name = Name::from("adjoint");
        let overloads = modifiers.get(&name).and_then(FnLookup::overloads).unwrap();
        assert_eq!(overloads.len(), 2);

        let header = modifier("@u3").header_def.header();
        assert_eq!(modifiers.get_fn(&header), Some(&modifier("@u3")));
        assert!(modifiers.contains(&header));
        assert!(!modifiers.contains(&Name::from("redim")));
    }
}
