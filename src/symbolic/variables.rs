//! Ordered variable lists shared between polynomials.
//!
//! The position of a name is the identity of the variable: polynomials over lists with the same
//! names in a different order are combined positionally, never by name.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VariableList(Arc<Vec<String>>);

impl VariableList {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        VariableList(Arc::new(
            names.iter().map(|s| s.as_ref().to_string()).collect(),
        ))
    }

    pub fn empty() -> Self {
        VariableList(Arc::new(Vec::new()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    /// name -> position lookup table, for callers resolving many names at once
    pub fn index_map(&self) -> HashMap<&str, usize> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect()
    }

    /// true when both handles point at the same shared list
    pub fn shares_storage(&self, other: &VariableList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for VariableList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<S: AsRef<str>> From<&[S]> for VariableList {
    fn from(names: &[S]) -> Self {
        VariableList::new(names)
    }
}

impl<S: AsRef<str>, const N: usize> From<&[S; N]> for VariableList {
    fn from(names: &[S; N]) -> Self {
        VariableList::new(names.as_slice())
    }
}

impl<S: AsRef<str>> From<Vec<S>> for VariableList {
    fn from(names: Vec<S>) -> Self {
        VariableList::new(names.as_slice())
    }
}

impl From<&VariableList> for VariableList {
    fn from(list: &VariableList) -> Self {
        list.clone()
    }
}
