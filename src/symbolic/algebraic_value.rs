//! # Algebraic values
//!
//! The closed set of things the engine computes with: a field constant, a polynomial or a rational
//! function. Mixed arithmetic is an exhaustive `match` over the pair of variants; the narrower
//! operand is promoted with explicit conversions (`Constant -> Polynomial -> RationalFunction`)
//! and results are demoted again by [`AlgebraicValue::normalized`] whenever a rational function
//! turns out to be a polynomial.
//!
//! A constant has no variable list of its own; when it meets a polynomial it adopts the
//! polynomial's list.
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::exact_field::{QQ, checked_rational_pow};
use crate::symbolic::rational_function::RationalFunction;
use crate::symbolic::sparse_polynomial::{SparsePolynomial, checked_exponent, exponent_overflow};
use crate::symbolic::variables::VariableList;
use num::{One, Zero};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Debug)]
pub enum AlgebraicValue {
    Constant(QQ),
    Polynomial(SparsePolynomial),
    RationalFunction(RationalFunction),
}

impl AlgebraicValue {
    pub fn is_zero(&self) -> bool {
        match self {
            AlgebraicValue::Constant(c) => c.is_zero(),
            AlgebraicValue::Polynomial(p) => p.is_zero(),
            AlgebraicValue::RationalFunction(f) => f.is_zero(),
        }
    }

    /// the scalar value, if the value does not depend on any variable
    pub fn as_constant(&self) -> Option<QQ> {
        match self {
            AlgebraicValue::Constant(c) => Some(c.clone()),
            AlgebraicValue::Polynomial(p) => p.as_constant(),
            AlgebraicValue::RationalFunction(f) => match f.is_constant() {
                true => f.get_constant().ok(),
                false => None,
            },
        }
    }

    /// variable list carried by the value, if any
    pub fn gens(&self) -> Option<&VariableList> {
        match self {
            AlgebraicValue::Constant(_) => None,
            AlgebraicValue::Polynomial(p) => Some(p.gens()),
            AlgebraicValue::RationalFunction(f) => Some(f.gens()),
        }
    }

    pub fn into_polynomial(self, varnames: &VariableList) -> AlgebraResult<SparsePolynomial> {
        match self {
            AlgebraicValue::Constant(c) => Ok(SparsePolynomial::from_const(c, varnames)),
            AlgebraicValue::Polynomial(p) => Ok(p),
            AlgebraicValue::RationalFunction(f) => f.get_poly(),
        }
    }

    pub fn into_rational_function(self, varnames: &VariableList) -> RationalFunction {
        match self {
            AlgebraicValue::Constant(c) => RationalFunction::from_const(c, varnames),
            AlgebraicValue::Polynomial(p) => RationalFunction::from_polynomial(p),
            AlgebraicValue::RationalFunction(f) => f,
        }
    }

    /// Rational functions with a constant denominator become polynomials.
    pub fn normalized(self) -> AlgebraicValue {
        match self {
            AlgebraicValue::RationalFunction(f) if f.is_polynomial() => match f.get_poly() {
                Ok(p) => AlgebraicValue::Polynomial(p),
                Err(_) => AlgebraicValue::RationalFunction(f),
            },
            other => other,
        }
    }

    pub fn pow(&self, power: i64) -> AlgebraResult<AlgebraicValue> {
        match self {
            AlgebraicValue::Constant(c) => {
                let power = checked_exponent(power)?;
                Ok(AlgebraicValue::Constant(checked_rational_pow(c, power)?))
            }
            AlgebraicValue::Polynomial(p) => Ok(AlgebraicValue::Polynomial(p.pow(power)?)),
            AlgebraicValue::RationalFunction(f) => Ok(AlgebraicValue::RationalFunction(f.pow(power)?)),
        }
    }

    /// largest exponent of each variable over the numerator and the denominator
    fn exponent_bounds(&self) -> BTreeMap<usize, u32> {
        match self {
            AlgebraicValue::Constant(_) => BTreeMap::new(),
            AlgebraicValue::Polynomial(p) => p.exponent_bounds(),
            AlgebraicValue::RationalFunction(f) => {
                let mut bounds = f.numer().exponent_bounds();
                for (v, e) in f.denom().exponent_bounds() {
                    let bound = bounds.entry(v).or_insert(0);
                    *bound = e.max(*bound);
                }
                bounds
            }
        }
    }

    /// Every product of a term of `self` with a term of `other` keeps its exponents in `u32`.
    fn check_exponent_room(&self, other: &AlgebraicValue) -> AlgebraResult<()> {
        let theirs = other.exponent_bounds();
        for (v, e) in self.exponent_bounds() {
            if let Some(&f) = theirs.get(&v) {
                e.checked_add(f).ok_or_else(exponent_overflow)?;
            }
        }
        Ok(())
    }

    fn involves_fraction(&self, other: &AlgebraicValue) -> bool {
        matches!(self, AlgebraicValue::RationalFunction(_))
            || matches!(other, AlgebraicValue::RationalFunction(_))
    }

    /// `+` that reports exponent overflow instead of panicking. Only fractions cross-multiply.
    pub fn checked_add(self, other: AlgebraicValue) -> AlgebraResult<AlgebraicValue> {
        if self.involves_fraction(&other) {
            self.check_exponent_room(&other)?;
        }
        Ok(self + other)
    }

    pub fn checked_sub(self, other: AlgebraicValue) -> AlgebraResult<AlgebraicValue> {
        if self.involves_fraction(&other) {
            self.check_exponent_room(&other)?;
        }
        Ok(self - other)
    }

    pub fn checked_mul(self, other: AlgebraicValue) -> AlgebraResult<AlgebraicValue> {
        self.check_exponent_room(&other)?;
        Ok(self * other)
    }

    /// Division with the zero check the operator traits cannot express.
    pub fn checked_div(self, other: AlgebraicValue) -> AlgebraResult<AlgebraicValue> {
        if other.is_zero() {
            return Err(AlgebraError::division_by_zero(format!("({}) / 0", self)));
        }
        if self.involves_fraction(&other) {
            self.check_exponent_room(&other)?;
        }
        use AlgebraicValue::*;
        let result = match (self, other) {
            (Constant(a), Constant(b)) => Constant(a / b),
            (Polynomial(p), Constant(c)) => Polynomial(p.scale(&c.recip())),
            (Constant(c), Polynomial(q)) => {
                SparsePolynomial::from_const(c, q.gens()).true_div(&q)?
            }
            (Polynomial(p), Polynomial(q)) => p.true_div(&q)?,
            (f @ RationalFunction(_), Constant(c)) => f * Constant(c.recip()),
            (a, b) => {
                let gens = a.gens().or(b.gens()).cloned().unwrap_or_else(VariableList::empty);
                let f = a.into_rational_function(&gens);
                let g = b.into_rational_function(&gens);
                RationalFunction(f.checked_div(&g)?)
            }
        };
        Ok(result.normalized())
    }
}

impl PartialEq for AlgebraicValue {
    fn eq(&self, other: &Self) -> bool {
        use AlgebraicValue::*;
        match (self, other) {
            (Constant(a), Constant(b)) => a == b,
            (Constant(c), Polynomial(p)) | (Polynomial(p), Constant(c)) => p == c,
            (Constant(c), RationalFunction(f)) | (RationalFunction(f), Constant(c)) => f == c,
            (Polynomial(p), Polynomial(q)) => p == q,
            (Polynomial(p), RationalFunction(f)) | (RationalFunction(f), Polynomial(p)) => f == p,
            (RationalFunction(f), RationalFunction(g)) => f == g,
        }
    }
}

impl fmt::Display for AlgebraicValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlgebraicValue::Constant(c) => write!(f, "{}", c),
            AlgebraicValue::Polynomial(p) => write!(f, "{}", p),
            AlgebraicValue::RationalFunction(r) => write!(f, "{}", r),
        }
    }
}

impl From<QQ> for AlgebraicValue {
    fn from(value: QQ) -> Self {
        AlgebraicValue::Constant(value)
    }
}

impl From<SparsePolynomial> for AlgebraicValue {
    fn from(value: SparsePolynomial) -> Self {
        AlgebraicValue::Polynomial(value)
    }
}

impl From<RationalFunction> for AlgebraicValue {
    fn from(value: RationalFunction) -> Self {
        AlgebraicValue::RationalFunction(value)
    }
}

/// Applies a binary operation after promoting both operands to a common variant.
fn combine(
    a: AlgebraicValue,
    b: AlgebraicValue,
    on_constants: fn(QQ, QQ) -> QQ,
    on_polynomials: fn(&SparsePolynomial, &SparsePolynomial) -> SparsePolynomial,
    on_fractions: fn(&RationalFunction, &RationalFunction) -> RationalFunction,
) -> AlgebraicValue {
    use AlgebraicValue::*;
    match (a, b) {
        (Constant(x), Constant(y)) => Constant(on_constants(x, y)),
        (Polynomial(p), Polynomial(q)) => Polynomial(on_polynomials(&p, &q)),
        (Polynomial(p), Constant(c)) => {
            let q = SparsePolynomial::from_const(c, p.gens());
            Polynomial(on_polynomials(&p, &q))
        }
        (Constant(c), Polynomial(q)) => {
            let p = SparsePolynomial::from_const(c, q.gens());
            Polynomial(on_polynomials(&p, &q))
        }
        (a, b) => {
            let gens = a.gens().or(b.gens()).cloned().unwrap_or_else(VariableList::empty);
            let f = a.into_rational_function(&gens);
            let g = b.into_rational_function(&gens);
            RationalFunction(on_fractions(&f, &g)).normalized()
        }
    }
}

impl Add for AlgebraicValue {
    type Output = AlgebraicValue;
    fn add(self, other: AlgebraicValue) -> AlgebraicValue {
        combine(self, other, |x, y| x + y, |p, q| p + q, |f, g| f + g)
    }
}

impl Sub for AlgebraicValue {
    type Output = AlgebraicValue;
    fn sub(self, other: AlgebraicValue) -> AlgebraicValue {
        combine(self, other, |x, y| x - y, |p, q| p - q, |f, g| f - g)
    }
}

impl Mul for AlgebraicValue {
    type Output = AlgebraicValue;
    fn mul(self, other: AlgebraicValue) -> AlgebraicValue {
        combine(self, other, |x, y| x * y, |p, q| p * q, |f, g| f * g)
    }
}

impl Neg for AlgebraicValue {
    type Output = AlgebraicValue;
    fn neg(self) -> AlgebraicValue {
        match self {
            AlgebraicValue::Constant(c) => AlgebraicValue::Constant(-c),
            AlgebraicValue::Polynomial(p) => AlgebraicValue::Polynomial(-p),
            AlgebraicValue::RationalFunction(f) => AlgebraicValue::RationalFunction(-f),
        }
    }
}

impl Default for AlgebraicValue {
    fn default() -> Self {
        AlgebraicValue::Constant(QQ::zero())
    }
}
