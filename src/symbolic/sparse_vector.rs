//! Exact sparse vectors: the linear projection of a polynomial, indexed by variable.
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::exact_field::{QQ, coerce_f64};
use itertools::Itertools;
use num_traits::{ToPrimitive, Zero};
use sprs::CsVec;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SparseVector {
    dim: usize,
    data: BTreeMap<usize, QQ>,
}

impl SparseVector {
    pub fn new(dim: usize) -> Self {
        SparseVector {
            dim,
            data: BTreeMap::new(),
        }
    }

    pub fn from_dense(values: &[QQ]) -> Self {
        let mut vector = SparseVector::new(values.len());
        for (i, v) in values.iter().enumerate() {
            vector.insert(i, v.clone());
        }
        vector
    }

    /// Exact conversion of float entries; see `coerce_f64` for the meaning of `strict`.
    pub fn from_f64(values: &[f64], strict: bool) -> AlgebraResult<Self> {
        let mut vector = SparseVector::new(values.len());
        for (i, &v) in values.iter().enumerate() {
            vector.insert(i, coerce_f64(v, strict)?);
        }
        Ok(vector)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, index: usize) -> QQ {
        self.data.get(&index).cloned().unwrap_or_else(QQ::zero)
    }

    pub fn set(&mut self, index: usize, value: QQ) -> AlgebraResult<()> {
        if index >= self.dim {
            return Err(AlgebraError::invalid_argument(format!(
                "index {} out of range for dimension {}",
                index, self.dim
            )));
        }
        self.insert(index, value);
        Ok(())
    }

    /// unchecked `set` for indices known to be in range
    pub(crate) fn insert(&mut self, index: usize, value: QQ) {
        debug_assert!(index < self.dim);
        if value.is_zero() {
            self.data.remove(&index);
        } else {
            self.data.insert(index, value);
        }
    }

    pub fn nonzero(&self) -> impl Iterator<Item = usize> + '_ {
        self.data.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &QQ)> {
        self.data.iter().map(|(&i, v)| (i, v))
    }

    pub fn is_zero(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_dense(&self) -> Vec<QQ> {
        (0..self.dim).map(|i| self.get(i)).collect()
    }

    pub fn dot(&self, other: &SparseVector) -> QQ {
        self.data
            .iter()
            .filter_map(|(i, v)| other.data.get(i).map(|w| v * w))
            .fold(QQ::zero(), |acc, x| acc + x)
    }

    /// Floating point copy for numeric assembly of linear systems.
    pub fn to_csvec(&self) -> CsVec<f64> {
        let indices: Vec<usize> = self.data.keys().copied().collect();
        let values: Vec<f64> = self
            .data
            .values()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect();
        CsVec::new(self.dim, indices, values)
    }
}

impl fmt::Display for SparseVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self.data.iter().map(|(i, v)| format!("{}: {}", i, v)).join(", ");
        write!(f, "[dim {}; {}]", self.dim, entries)
    }
}
