use std::{fmt, slice, vec};

/// Accumulates every error found by a validation pass, so a caller can
/// report all of them at once instead of stopping at the first.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Errors<T> {
    errors: Vec<T>,
}

impl<T> Default for Errors<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Errors<T> {
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: T) {
        self.errors.push(error);
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.errors
    }

    /// Returns `Ok(value)` when nothing was collected, otherwise hands the
    /// collected errors to `f` to build the final error.
    pub fn into_result<V, E>(self, value: V, f: impl FnOnce(Self) -> E) -> Result<V, E> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(f(self))
        }
    }
}

impl<T: fmt::Display> fmt::Display for Errors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.errors {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl<T> FromIterator<T> for Errors<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Errors<T>> for Vec<T> {
    fn from(errors: Errors<T>) -> Self {
        errors.errors
    }
}

impl<T> IntoIterator for Errors<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Errors<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
