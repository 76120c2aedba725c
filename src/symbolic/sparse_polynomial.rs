//! # Sparse multivariate polynomials
//!
//! ## Purpose
//!
//! `SparsePolynomial` is the algebraic workhorse of the crate: a map from [`Monomial`] to a
//! nonzero exact rational, together with a shared [`VariableList`]. Everything downstream
//! (rational functions, the expression parser, automatic differentiation, linear projection) is
//! written in terms of it.
//!
//! ## Main Structures and Methods
//! - constructors: [`SparsePolynomial::new`], `from_const`, `var_from_string`, `from_vector`,
//!   `from_f64_vector`, `from_string`
//! - queries: `degree`, `degree_in`, `variables`, `content`, `constant_term`, `is_linear`, ...
//! - arithmetic: `+ - *` and unary `-` (also on references), `+=`/`-=`, `pow`, `scale`; exact
//!   division, gcd and lcm live in `polynomial_division`
//! - evaluation: `eval` (partial, re-indexed), `subs` (total, by algebraic values),
//!   `automated_diff` (dual numbers), `lambdify` (f64 closure)
//! - calculus: `derivative`, `partial_derivative`
//! - linear projection: `linear_part_as_vec`
//!
//! ## Interesting Code Features
//!
//! 1. **No zero coefficients**: every mutation goes through [`accumulate`], which removes an
//!    entry the moment its coefficient cancels. The zero polynomial is the empty map.
//! 2. **Positional semantics**: two polynomials are combined and compared by variable index.
//!    Polynomials over `[x, y]` and `[y, x]` mix by position, not by name.
//! 3. **Graded term order**: the `BTreeMap` iterates in ascending graded order, which is also the
//!    printing order.
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::algebraic_value::AlgebraicValue;
use crate::symbolic::dual_number::DualNumber;
use crate::symbolic::exact_field::{QQ, checked_rational_pow, content_of, format_rational};
use crate::symbolic::monomial::Monomial;
use crate::symbolic::parse_rational::parse_expression;
use crate::symbolic::sparse_vector::SparseVector;
use crate::symbolic::variables::VariableList;
use itertools::Itertools;
use num::{One, ToPrimitive, Zero};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Degree of a polynomial. The zero polynomial has `Infinite` degree, never `Finite(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Degree {
    Finite(i64),
    Infinite,
}

impl Degree {
    pub fn finite(self) -> Option<i64> {
        match self {
            Degree::Finite(d) => Some(d),
            Degree::Infinite => None,
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Degree::Finite(d) => write!(f, "{}", d),
            Degree::Infinite => write!(f, "oo"),
        }
    }
}

/// Adds `coefficient * monomial` to a term map, dropping the entry if it cancels.
pub(crate) fn accumulate(data: &mut BTreeMap<Monomial, QQ>, monomial: Monomial, coefficient: QQ) {
    if coefficient.is_zero() {
        return;
    }
    match data.entry(monomial) {
        Entry::Vacant(slot) => {
            slot.insert(coefficient);
        }
        Entry::Occupied(mut slot) => {
            *slot.get_mut() += coefficient;
            if slot.get().is_zero() {
                slot.remove();
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct SparsePolynomial {
    varnames: VariableList,
    data: BTreeMap<Monomial, QQ>,
}

impl SparsePolynomial {
    /// Polynomial from a list of terms; repeated monomials are summed, zero terms dropped.
    pub fn new(
        varnames: impl Into<VariableList>,
        terms: impl IntoIterator<Item = (Monomial, QQ)>,
    ) -> Self {
        let mut data = BTreeMap::new();
        for (monomial, coefficient) in terms {
            accumulate(&mut data, monomial, coefficient);
        }
        SparsePolynomial {
            varnames: varnames.into(),
            data,
        }
    }

    /// the map must already be free of zero coefficients
    pub(crate) fn from_map(varnames: VariableList, data: BTreeMap<Monomial, QQ>) -> Self {
        debug_assert!(data.values().all(|c| !c.is_zero()));
        SparsePolynomial { varnames, data }
    }

    pub fn zero(varnames: impl Into<VariableList>) -> Self {
        SparsePolynomial::from_map(varnames.into(), BTreeMap::new())
    }

    pub fn one(varnames: impl Into<VariableList>) -> Self {
        SparsePolynomial::from_const(QQ::one(), varnames)
    }

    pub fn from_const(value: QQ, varnames: impl Into<VariableList>) -> Self {
        SparsePolynomial::new(varnames, [(Monomial::one(), value)])
    }

    pub fn from_monomial(monomial: Monomial, varnames: impl Into<VariableList>) -> Self {
        SparsePolynomial::new(varnames, [(monomial, QQ::one())])
    }

    /// The polynomial `name` over `varnames`.
    pub fn var_from_string(name: &str, varnames: impl Into<VariableList>) -> AlgebraResult<Self> {
        let varnames = varnames.into();
        let index = varnames.index_of(name).ok_or_else(|| {
            AlgebraError::invalid_argument(format!("'{}' is not in {:?}", name, varnames))
        })?;
        Ok(SparsePolynomial::from_monomial(Monomial::var(index), varnames))
    }

    /// Linear form `sum v_i * x_i` from a sparse vector of the same dimension as `varnames`.
    pub fn from_vector(vector: &SparseVector, varnames: impl Into<VariableList>) -> AlgebraResult<Self> {
        let varnames = varnames.into();
        if vector.dim() != varnames.len() {
            return Err(AlgebraError::invalid_argument(format!(
                "vector of dimension {} does not match {} variables",
                vector.dim(),
                varnames.len()
            )));
        }
        let terms = vector.iter().map(|(i, c)| (Monomial::var(i), c.clone()));
        Ok(SparsePolynomial::new(varnames, terms))
    }

    /// Linear form from dense float coefficients, converted exactly (see `coerce_f64`).
    pub fn from_f64_vector(
        values: &[f64],
        varnames: impl Into<VariableList>,
        strict: bool,
    ) -> AlgebraResult<Self> {
        let vector = SparseVector::from_f64(values, strict)?;
        SparsePolynomial::from_vector(&vector, varnames)
    }

    /// Parses an infix expression; fails if the expression is a genuine fraction.
    /// ```
    /// use RustedExactAlgebra::symbolic::sparse_polynomial::SparsePolynomial;
    /// let p = SparsePolynomial::from_string("(x + y)^2", &["x", "y"]).unwrap();
    /// assert_eq!(p.to_string(), "x**2 + 2*x*y + y**2");
    /// ```
    pub fn from_string(text: &str, varnames: impl Into<VariableList>) -> AlgebraResult<Self> {
        let varnames = varnames.into();
        parse_expression(text, &varnames)?.into_polynomial(&varnames)
    }

    // ------------------------------------------------------------------------------------------
    // accessors and predicates

    pub fn gens(&self) -> &VariableList {
        &self.varnames
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &QQ)> {
        self.data.iter()
    }

    pub fn coefficient(&self, monomial: &Monomial) -> QQ {
        self.data.get(monomial).cloned().unwrap_or_else(QQ::zero)
    }

    /// number of nonzero terms
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_zero(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_unitary(&self) -> bool {
        self.data.len() == 1 && self.coefficient(&Monomial::one()).is_one()
    }

    pub fn is_constant(&self) -> bool {
        self.data.keys().all(Monomial::is_one)
    }

    /// every monomial is `1` or a single variable to the first power
    pub fn is_linear(&self) -> bool {
        self.data
            .keys()
            .all(|m| m.is_one() || m.as_linear().is_some())
    }

    pub fn constant_term(&self) -> QQ {
        self.coefficient(&Monomial::one())
    }

    /// the value of a constant polynomial
    pub fn as_constant(&self) -> Option<QQ> {
        if self.is_constant() {
            Some(self.constant_term())
        } else {
            None
        }
    }

    /// Content of the coefficients: `gcd` of numerators over `lcm` of denominators.
    pub fn content(&self) -> QQ {
        content_of(self.data.values())
    }

    /// The monomials as single-term polynomials and their coefficients: `self == sum c_i * T_i`.
    pub fn linear_components(&self) -> (Vec<SparsePolynomial>, Vec<QQ>) {
        self.data
            .iter()
            .map(|(m, c)| {
                (
                    SparsePolynomial::from_monomial(m.clone(), &self.varnames),
                    c.clone(),
                )
            })
            .unzip()
    }

    pub(crate) fn variable_indices(&self) -> BTreeSet<usize> {
        self.data
            .keys()
            .flat_map(|m| m.pairs().iter().map(|&(v, _)| v))
            .collect()
    }

    /// Names of the variables that actually occur, in variable-list order.
    pub fn variables(&self) -> Vec<String> {
        self.variable_indices()
            .into_iter()
            .filter_map(|i| self.varnames.name(i).map(str::to_string))
            .collect()
    }

    pub fn degree(&self) -> Degree {
        match self.data.keys().map(Monomial::total_degree).max() {
            Some(d) => Degree::Finite(d as i64),
            None => Degree::Infinite,
        }
    }

    /// largest exponent of each occurring variable index
    pub(crate) fn exponent_bounds(&self) -> BTreeMap<usize, u32> {
        let mut bounds = BTreeMap::new();
        for m in self.data.keys() {
            for &(v, e) in m.pairs() {
                let bound = bounds.entry(v).or_insert(0);
                *bound = e.max(*bound);
            }
        }
        bounds
    }

    pub(crate) fn degree_in_index(&self, var: usize) -> Degree {
        match self.data.keys().map(|m| m.degree_in(var)).max() {
            Some(d) => Degree::Finite(d as i64),
            None => Degree::Infinite,
        }
    }

    /// Degree with respect to one variable; unknown names are an error.
    pub fn degree_in(&self, var_name: &str) -> AlgebraResult<Degree> {
        let index = self.varnames.index_of(var_name).ok_or_else(|| {
            AlgebraError::invalid_argument(format!(
                "cannot take the degree in '{}': not in {:?}",
                var_name, self.varnames
            ))
        })?;
        Ok(self.degree_in_index(index))
    }

    // ------------------------------------------------------------------------------------------
    // arithmetic helpers

    pub fn scale(&self, factor: &QQ) -> SparsePolynomial {
        if factor.is_zero() {
            return SparsePolynomial::zero(&self.varnames);
        }
        let data = self
            .data
            .iter()
            .map(|(m, c)| (m.clone(), c * factor))
            .collect();
        SparsePolynomial::from_map(self.varnames.clone(), data)
    }

    /// Product that reports exponent overflow as an error instead of panicking.
    pub fn checked_mul(&self, other: &SparsePolynomial) -> AlgebraResult<SparsePolynomial> {
        let mut data = BTreeMap::new();
        for (m1, c1) in &self.data {
            for (m2, c2) in &other.data {
                let m = m1.checked_mul(m2).ok_or_else(exponent_overflow)?;
                accumulate(&mut data, m, c1 * c2);
            }
        }
        Ok(SparsePolynomial::from_map(self.varnames.clone(), data))
    }

    /// Nonnegative integer power by repeated squaring.
    pub fn pow(&self, power: i64) -> AlgebraResult<SparsePolynomial> {
        let power = checked_exponent(power)?;
        if let (1, Some((m, c))) = (self.data.len(), self.data.iter().next()) {
            let monomial = m.checked_pow(power).ok_or_else(exponent_overflow)?;
            let term = (monomial, checked_rational_pow(c, power)?);
            return Ok(SparsePolynomial::new(&self.varnames, [term]));
        }
        let top = self
            .data
            .keys()
            .flat_map(|m| m.pairs().iter().map(|&(_, e)| e))
            .max()
            .unwrap_or(0);
        if top.checked_mul(power).is_none() {
            return Err(exponent_overflow());
        }
        let mut result = SparsePolynomial::one(&self.varnames);
        let mut base = self.clone();
        let mut remaining = power;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Ok(result)
    }

    // ------------------------------------------------------------------------------------------
    // calculus

    pub fn partial_derivative(&self, var: usize) -> SparsePolynomial {
        let terms = self.data.iter().filter_map(|(m, c)| {
            m.derivative(var)
                .map(|(e, reduced)| (reduced, c * QQ::from_integer(e.into())))
        });
        SparsePolynomial::new(&self.varnames, terms)
    }

    /// Symbolic derivative. A variable that is not in the variable list at all yields the field
    /// zero; a listed variable that does not occur yields the zero polynomial.
    pub fn derivative(&self, var_name: &str) -> AlgebraicValue {
        match self.varnames.index_of(var_name) {
            Some(index) => AlgebraicValue::Polynomial(self.partial_derivative(index)),
            None => AlgebraicValue::Constant(QQ::zero()),
        }
    }

    // ------------------------------------------------------------------------------------------
    // evaluation

    /// Substitutes field values for some variables. The result lives over the variables that
    /// were not assigned (re-indexed); names absent from the variable list are ignored.
    pub fn eval(&self, values: &HashMap<String, QQ>) -> SparsePolynomial {
        let assigned: Vec<Option<&QQ>> = self
            .varnames
            .names()
            .iter()
            .map(|name| values.get(name))
            .collect();
        if assigned.iter().all(Option::is_none) {
            return self.clone();
        }
        let mut remaining = Vec::new();
        let mut new_index = Vec::with_capacity(assigned.len());
        for (name, value) in self.varnames.names().iter().zip(&assigned) {
            if value.is_none() {
                new_index.push(Some(remaining.len()));
                remaining.push(name.as_str());
            } else {
                new_index.push(None);
            }
        }
        let mut data = BTreeMap::new();
        for (m, c) in &self.data {
            let mut coefficient = c.clone();
            let mut pairs = Vec::new();
            for &(v, e) in m.pairs() {
                match (assigned[v], new_index[v]) {
                    (Some(value), _) => coefficient *= num::pow(value.clone(), e as usize),
                    (None, Some(j)) => pairs.push((j, e)),
                    (None, None) => unreachable!("unassigned variables keep an index"),
                }
            }
            accumulate(&mut data, Monomial::from_pairs(pairs), coefficient);
        }
        SparsePolynomial::from_map(VariableList::new(remaining.as_slice()), data)
    }

    /// Total substitution of every occurring variable by an algebraic value.
    pub fn subs(&self, values: &HashMap<String, AlgebraicValue>) -> AlgebraResult<AlgebraicValue> {
        let missing: Vec<String> = self
            .variables()
            .into_iter()
            .filter(|name| !values.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(AlgebraError::invalid_argument(format!(
                "substitution needs values for {:?}",
                missing
            )));
        }
        let mut total = AlgebraicValue::Constant(QQ::zero());
        for (m, c) in &self.data {
            let mut term = AlgebraicValue::Constant(c.clone());
            for &(v, e) in m.pairs() {
                let name = self.varnames.name(v).unwrap_or_default();
                let replacement = values.get(name).ok_or_else(|| {
                    AlgebraError::invalid_argument(format!("no value for '{}'", name))
                })?;
                term = term.checked_mul(replacement.pow(e as i64)?)?;
            }
            total = total.checked_add(term)?;
        }
        Ok(total.normalized())
    }

    /// Evaluates with one dual number per variable (indexed like the variable list).
    pub(crate) fn dual_evaluate(&self, seeds: &[DualNumber], dimension: usize) -> DualNumber {
        let mut total = DualNumber::constant(QQ::zero(), dimension);
        for (m, c) in &self.data {
            let mut term = DualNumber::constant(c.clone(), dimension);
            for &(v, e) in m.pairs() {
                term = &term * &seeds[v].pow(e);
            }
            total = &total + &term;
        }
        total
    }

    /// `(value, d/dx_1, ..., d/dx_n)` at a point, in one pass over dual numbers. Every variable
    /// that occurs must have a value; the slots follow the variable list.
    pub fn automated_diff(&self, values: &HashMap<String, QQ>) -> AlgebraResult<DualNumber> {
        let dimension = self.varnames.len();
        let missing: Vec<String> = self
            .variables()
            .into_iter()
            .filter(|name| !values.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(AlgebraError::invalid_argument(format!(
                "automatic differentiation needs values for {:?}",
                missing
            )));
        }
        if self.is_constant() {
            return Ok(DualNumber::constant(self.constant_term(), dimension));
        }
        let seeds: Vec<DualNumber> = self
            .varnames
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = values.get(name).cloned().unwrap_or_else(QQ::zero);
                DualNumber::variable(value, i, dimension)
            })
            .collect();
        Ok(self.dual_evaluate(&seeds, dimension))
    }

    /// Coefficients of the degree-one monomials, indexed by variable.
    pub fn linear_part_as_vec(&self) -> SparseVector {
        let mut vector = SparseVector::new(self.varnames.len());
        for (m, c) in &self.data {
            if let Some(i) = m.as_linear() {
                vector.insert(i, c.clone());
            }
        }
        vector
    }

    /// Floating point evaluator, arguments in variable-list order.
    /// Panics if fewer arguments than variables are supplied.
    pub fn lambdify(&self) -> Box<dyn Fn(&[f64]) -> f64 + Send + Sync> {
        let terms: Vec<(f64, Vec<(usize, i32)>)> = self
            .data
            .iter()
            .map(|(m, c)| {
                let factors = m.pairs().iter().map(|&(v, e)| (v, e as i32)).collect();
                (c.to_f64().unwrap_or(f64::NAN), factors)
            })
            .collect();
        Box::new(move |args: &[f64]| {
            terms
                .iter()
                .map(|(c, factors)| {
                    factors
                        .iter()
                        .fold(*c, |acc, &(v, e)| acc * args[v].powi(e))
                })
                .sum()
        })
    }

    /// Compares with a parsed expression over the same variables.
    pub fn equals_expression(&self, text: &str) -> AlgebraResult<bool> {
        let other = parse_expression(text, &self.varnames)?;
        Ok(AlgebraicValue::Polynomial(self.clone()) == other)
    }

    pub(crate) fn data(&self) -> &BTreeMap<Monomial, QQ> {
        &self.data
    }
}

pub(crate) fn exponent_overflow() -> AlgebraError {
    AlgebraError::invalid_argument("exponent of a product does not fit in 32 bits")
}

pub(crate) fn checked_exponent(power: i64) -> AlgebraResult<u32> {
    if power < 0 {
        return Err(AlgebraError::invalid_argument(format!(
            "exponent must be a nonnegative integer, got {}",
            power
        )));
    }
    u32::try_from(power)
        .map_err(|_| AlgebraError::invalid_argument(format!("exponent {} is too large", power)))
}

// ----------------------------------------------------------------------------------------------
// equality, hashing, printing

impl PartialEq for SparsePolynomial {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for SparsePolynomial {}

impl PartialEq<QQ> for SparsePolynomial {
    fn eq(&self, other: &QQ) -> bool {
        match self.as_constant() {
            Some(c) => &c == other,
            None => false,
        }
    }
}

impl Hash for SparsePolynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl fmt::Display for SparsePolynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.is_empty() {
            return write!(f, "0");
        }
        for (position, (m, c)) in self.data.iter().enumerate() {
            let negative = c < &QQ::zero();
            match (position, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = if negative { -c.clone() } else { c.clone() };
            let factors = m
                .pairs()
                .iter()
                .map(|&(v, e)| {
                    let name = self.varnames.name(v).unwrap_or("?");
                    if e == 1 {
                        name.to_string()
                    } else {
                        format!("{}**{}", name, e)
                    }
                })
                .join("*");
            if factors.is_empty() {
                write!(f, "{}", format_rational(&magnitude))?;
            } else if magnitude.is_one() {
                write!(f, "{}", factors)?;
            } else {
                write!(f, "{}*{}", format_rational(&magnitude), factors)?;
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------------------------
// operators

impl AddAssign<&SparsePolynomial> for SparsePolynomial {
    fn add_assign(&mut self, other: &SparsePolynomial) {
        for (m, c) in &other.data {
            accumulate(&mut self.data, m.clone(), c.clone());
        }
    }
}

impl AddAssign for SparsePolynomial {
    fn add_assign(&mut self, other: SparsePolynomial) {
        *self += &other;
    }
}

impl SubAssign<&SparsePolynomial> for SparsePolynomial {
    fn sub_assign(&mut self, other: &SparsePolynomial) {
        for (m, c) in &other.data {
            accumulate(&mut self.data, m.clone(), -c.clone());
        }
    }
}

impl SubAssign for SparsePolynomial {
    fn sub_assign(&mut self, other: SparsePolynomial) {
        *self -= &other;
    }
}

impl Add<&SparsePolynomial> for &SparsePolynomial {
    type Output = SparsePolynomial;
    fn add(self, other: &SparsePolynomial) -> SparsePolynomial {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl Add for SparsePolynomial {
    type Output = SparsePolynomial;
    fn add(mut self, other: SparsePolynomial) -> SparsePolynomial {
        self += &other;
        self
    }
}

impl Sub<&SparsePolynomial> for &SparsePolynomial {
    type Output = SparsePolynomial;
    fn sub(self, other: &SparsePolynomial) -> SparsePolynomial {
        let mut result = self.clone();
        result -= other;
        result
    }
}

impl Sub for SparsePolynomial {
    type Output = SparsePolynomial;
    fn sub(mut self, other: SparsePolynomial) -> SparsePolynomial {
        self -= &other;
        self
    }
}

/// Panics if an exponent of the product leaves the `u32` range; use
/// [`SparsePolynomial::checked_mul`] where that can happen.
impl Mul<&SparsePolynomial> for &SparsePolynomial {
    type Output = SparsePolynomial;
    fn mul(self, other: &SparsePolynomial) -> SparsePolynomial {
        match self.checked_mul(other) {
            Ok(product) => product,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Mul for SparsePolynomial {
    type Output = SparsePolynomial;
    fn mul(self, other: SparsePolynomial) -> SparsePolynomial {
        &self * &other
    }
}

impl Neg for &SparsePolynomial {
    type Output = SparsePolynomial;
    fn neg(self) -> SparsePolynomial {
        let data = self.data.iter().map(|(m, c)| (m.clone(), -c.clone())).collect();
        SparsePolynomial::from_map(self.varnames.clone(), data)
    }
}

impl Neg for SparsePolynomial {
    type Output = SparsePolynomial;
    fn neg(mut self) -> SparsePolynomial {
        for c in self.data.values_mut() {
            *c = -c.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::exact_field::{qq, qq_int};
    use approx::assert_relative_eq;

    fn poly(text: &str, vars: &[&str]) -> SparsePolynomial {
        SparsePolynomial::from_string(text, vars).unwrap()
    }

    #[test]
    fn parsed_terms_in_graded_order() {
        let p = poly("1 + x/2 + 3*y + 5*x*y", &["x", "y"]);
        let terms: Vec<(Vec<(usize, u32)>, QQ)> = p
            .terms()
            .map(|(m, c)| (m.pairs().to_vec(), c.clone()))
            .collect();
        assert_eq!(
            terms,
            vec![
                (vec![], qq_int(1)),
                (vec![(0, 1)], qq(1, 2)),
                (vec![(1, 1)], qq_int(3)),
                (vec![(0, 1), (1, 1)], qq_int(5)),
            ]
        );
        assert_eq!(p.to_string(), "1 + (1/2)*x + 3*y + 5*x*y");
    }

    #[test]
    fn zero_coefficients_are_pruned() {
        let mut p = poly("x + y", &["x", "y"]);
        p -= &poly("x", &["x", "y"]);
        assert_eq!(p.size(), 1);
        assert_eq!(p, poly("y", &["x", "y"]));
        let q = &p - &p;
        assert!(q.is_zero());
        assert_eq!(q.to_string(), "0");
    }

    #[test]
    fn degrees() {
        let p = poly("x**3*y + y**2 + 7", &["x", "y", "z"]);
        assert_eq!(p.degree(), Degree::Finite(4));
        assert_eq!(p.degree_in("x").unwrap(), Degree::Finite(3));
        assert_eq!(p.degree_in("z").unwrap(), Degree::Finite(0));
        assert!(matches!(p.degree_in("w"), Err(AlgebraError::InvalidArgument(_))));
        let zero = SparsePolynomial::zero(&["x"]);
        assert_eq!(zero.degree(), Degree::Infinite);
        assert_eq!(zero.degree_in("x").unwrap(), Degree::Infinite);
    }

    #[test]
    fn predicates_and_accessors() {
        let p = poly("2*x - 3*z + 4", &["x", "y", "z"]);
        assert!(p.is_linear());
        assert!(!p.is_constant());
        assert_eq!(p.constant_term(), qq_int(4));
        assert_eq!(p.variables(), vec!["x".to_string(), "z".to_string()]);
        assert!(SparsePolynomial::one(&["x"]).is_unitary());
        assert!(!poly("x*y", &["x", "y"]).is_linear());
        assert_eq!(poly("15*x/7 + 6/7", &["x"]).content(), qq(3, 7));
        let (monomials, coefficients) = p.linear_components();
        let rebuilt = monomials
            .iter()
            .zip(&coefficients)
            .fold(SparsePolynomial::zero(&["x", "y", "z"]), |acc, (m, c)| acc + m.scale(c));
        assert_eq!(rebuilt, p);
    }

    #[test]
    fn powers() {
        let p = poly("x + 1", &["x"]);
        assert_eq!(p.pow(3).unwrap(), poly("x**3 + 3*x**2 + 3*x + 1", &["x"]));
        assert!(p.pow(0).unwrap().is_unitary());
        assert_eq!(poly("2*x*y", &["x", "y"]).pow(2).unwrap(), poly("4*x^2*y^2", &["x", "y"]));
        assert!(matches!(p.pow(-1), Err(AlgebraError::InvalidArgument(_))));
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let vars = ["x", "y"];
        let x_big = poly("x^65536", &vars);
        assert!(matches!(x_big.pow(65_536), Err(AlgebraError::InvalidArgument(_))));
        assert!(matches!(
            poly("x^65536 + y", &vars).pow(65_536),
            Err(AlgebraError::InvalidArgument(_))
        ));
        let top = poly("x^4294967295", &vars);
        assert!(matches!(
            top.checked_mul(&poly("x + y", &vars)),
            Err(AlgebraError::InvalidArgument(_))
        ));
        assert_eq!(
            top.checked_mul(&poly("y", &vars)).unwrap().degree(),
            Degree::Finite(4_294_967_296)
        );
        assert!(matches!(
            poly("2*x", &vars).pow(4_000_000_000),
            Err(AlgebraError::InvalidArgument(_))
        ));
    }

    #[test]
    fn derivative_cases() {
        let p = poly("x**2*y + 3*y", &["x", "y", "z"]);
        assert_eq!(
            p.derivative("x"),
            AlgebraicValue::Polynomial(poly("2*x*y", &["x", "y", "z"]))
        );
        match p.derivative("z") {
            AlgebraicValue::Polynomial(d) => assert!(d.is_zero()),
            other => panic!("expected the zero polynomial, got {:?}", other),
        }
        assert!(matches!(p.derivative("w"), AlgebraicValue::Constant(c) if c.is_zero()));
    }

    #[test]
    fn eval_reindexes_remaining_variables() {
        let p = poly("x**2*z + y", &["x", "y", "z"]);
        let values: HashMap<String, QQ> =
            [("x".to_string(), qq_int(0)), ("y".to_string(), qq_int(0))].into();
        let result = p.eval(&values);
        assert!(result.is_zero());
        assert_eq!(result.gens().names(), &["z".to_string()]);

        let values: HashMap<String, QQ> = [("x".to_string(), qq_int(2))].into();
        let result = p.eval(&values);
        assert_eq!(result, poly("4*z + y", &["y", "z"]));
        assert_eq!(result.to_string(), "y + 4*z");
    }

    #[test]
    fn eval_to_scalar() {
        let p = poly("x*y + 1/2", &["x", "y"]);
        let values: HashMap<String, QQ> =
            [("x".to_string(), qq_int(3)), ("y".to_string(), qq(1, 3)), ("w".to_string(), qq_int(9))]
                .into();
        assert_eq!(p.eval(&values).as_constant(), Some(qq(3, 2)));
    }

    #[test]
    fn subs_requires_every_occurring_variable() {
        let p = poly("x*y + z", &["x", "y", "z"]);
        let partial: HashMap<String, AlgebraicValue> =
            [("x".to_string(), AlgebraicValue::Constant(qq_int(1)))].into();
        assert!(matches!(p.subs(&partial), Err(AlgebraError::InvalidArgument(_))));

        let t = ["t"];
        let full: HashMap<String, AlgebraicValue> = [
            ("x".to_string(), AlgebraicValue::Polynomial(poly("t + 1", &t))),
            ("y".to_string(), AlgebraicValue::Polynomial(poly("t - 1", &t))),
            ("z".to_string(), AlgebraicValue::Constant(qq_int(1))),
        ]
        .into();
        assert_eq!(
            p.subs(&full).unwrap(),
            AlgebraicValue::Polynomial(poly("t^2", &t))
        );
    }

    #[test]
    fn automated_diff_of_polynomial() {
        let p = poly("x**2*y + 3*y", &["x", "y"]);
        let values: HashMap<String, QQ> =
            [("x".to_string(), qq_int(2)), ("y".to_string(), qq_int(5))].into();
        let dual = p.automated_diff(&values).unwrap();
        assert_eq!(dual.value(), &qq_int(35));
        assert_eq!(dual.partials(), &[qq_int(20), qq_int(7)]);

        let missing: HashMap<String, QQ> = [("x".to_string(), qq_int(2))].into();
        assert!(matches!(p.automated_diff(&missing), Err(AlgebraError::InvalidArgument(_))));

        let constant = SparsePolynomial::from_const(qq_int(4), &["x", "y"]);
        let dual = constant.automated_diff(&HashMap::new()).unwrap();
        assert_eq!(dual.value(), &qq_int(4));
        assert!(dual.partials().iter().all(|d| d.is_zero()));
    }

    #[test]
    fn linear_projection() {
        let p = poly("3 + 2*x - z/2 + x*y + y**2", &["x", "y", "z"]);
        let v = p.linear_part_as_vec();
        assert_eq!(v.dim(), 3);
        assert_eq!(v.get(0), qq_int(2));
        assert_eq!(v.get(1), qq_int(0));
        assert_eq!(v.get(2), qq(-1, 2));
        assert_eq!(v.nonzero().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn from_vector_checks_dimension() {
        let mut v = SparseVector::new(2);
        v.set(1, qq_int(3)).unwrap();
        let p = SparsePolynomial::from_vector(&v, &["x", "y"]).unwrap();
        assert_eq!(p, poly("3*y", &["x", "y"]));
        assert!(matches!(
            SparsePolynomial::from_vector(&v, &["x", "y", "z"]),
            Err(AlgebraError::InvalidArgument(_))
        ));
        let q = SparsePolynomial::from_f64_vector(&[0.5, 0.0, -2.0], &["a", "b", "c"], true).unwrap();
        assert_eq!(q, poly("a/2 - 2*c", &["a", "b", "c"]));
    }

    #[test]
    fn var_from_string_and_constants() {
        let x = SparsePolynomial::var_from_string("x", &["x", "y"]).unwrap();
        assert_eq!(x.to_string(), "x");
        assert!(SparsePolynomial::var_from_string("q", &["x", "y"]).is_err());
        assert_eq!(SparsePolynomial::from_const(qq(5, 2), &["x"]), qq(5, 2));
        assert!(poly("x", &["x"]) != qq_int(1));
    }

    #[test]
    fn equality_against_expressions() {
        let p = poly("(x - y)*(x + y)", &["x", "y"]);
        assert!(p.equals_expression("x^2 - y^2").unwrap());
        assert!(!p.equals_expression("x^2 + y^2").unwrap());
        assert!(p.equals_expression("x^2 - ").is_err());
    }

    #[test]
    fn lambdify_matches_exact_value() {
        let p = poly("x**2/4 - 3*x*y + 1", &["x", "y"]);
        let f = p.lambdify();
        assert_relative_eq!(f(&[2.0, 0.5]), 1.0 - 3.0 + 1.0, epsilon = 1e-12);
        assert_relative_eq!(f(&[-1.0, 1.0]), 0.25 + 3.0 + 1.0, epsilon = 1e-12);
    }
}
