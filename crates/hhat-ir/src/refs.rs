//! Reference tables.
//!
//! A unit that uses a type or function defined elsewhere records which unit
//! it expects the definition in. Nothing here checks that the promise holds;
//! the graph does that once, at build time.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::{error::IrError, hash::IrHash, header::FnHeader, symbol::Name};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefTypeTable(IndexMap<Name, IrHash>);

impl RefTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `name` is defined in `unit`. Recording the same pair
    /// twice is fine, pointing one name at two units is not.
    pub fn add(&mut self, name: Name, unit: IrHash) -> Result<(), IrError> {
        insert_ref(&mut self.0, name, unit)
    }

    pub fn get(&self, name: &Name) -> Option<&IrHash> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &IrHash)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefFnTable(IndexMap<FnHeader, IrHash>);

impl RefFnTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, header: FnHeader, unit: IrHash) -> Result<(), IrError> {
        insert_ref(&mut self.0, header, unit)
    }

    pub fn get(&self, header: &FnHeader) -> Option<&IrHash> {
        self.0.get(header)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FnHeader, &IrHash)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn insert_ref<K>(map: &mut IndexMap<K, IrHash>, key: K, unit: IrHash) -> Result<(), IrError>
where
    K: std::hash::Hash + Eq + fmt::Display,
{
    match map.get(&key) {
        Some(first) if *first != unit => Err(IrError::ConflictingReference {
            symbol: key.to_string(),
            first: first.clone(),
            second: unit,
        }),
        Some(_) => Ok(()),
        None => {
            map.insert(key, unit);
            Ok(())
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefTable {
    pub types: RefTypeTable,
    pub fns: RefFnTable,
}

impl RefTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every unit this table points at, deduplicated, in first-seen order.
    pub fn referenced_units(&self) -> IndexSet<&IrHash> {
        self.types
            .iter()
            .map(|(_, unit)| unit)
            .chain(self.fns.iter().map(|(_, unit)| unit))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.fns.is_empty()
    }
}

impl fmt::Display for RefTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ref types:")?;
        for (name, unit) in self.types.iter() {
            writeln!(f, "  {name} -> {unit}")?;
        }

        writeln!(f, "ref fns:")?;
        for (header, unit) in self.fns.iter() {
            writeln!(f, "  {header} -> {unit}")?;
        }

        Ok(())
    }
}

pub fn build_reftable(
    types: impl IntoIterator<Item = (Name, IrHash)>,
    fns: impl IntoIterator<Item = (FnHeader, IrHash)>,
) -> Result<RefTable, IrError> {
    let mut table = RefTable::new();

    for (name, unit) in types {
        table.types.add(name, unit)?;
    }

    for (header, unit) in fns {
        table.fns.add(header, unit)?;
    }

    Ok(table)
}
