//! Exact division, gcd and lcm of sparse polynomials.
//!
//! Division is the classical multivariate division algorithm with a single divisor under the
//! lexicographic order ([`Monomial::lex_cmp`]). The gcd is computed recursively: pick the
//! smallest variable index occurring in either operand as the main variable, split off the
//! contents (gcds of the coefficient polynomials in the other variables), and run a primitive
//! pseudo-remainder sequence on the primitive parts. The result is normalized to be monic with
//! respect to its lexicographic leading coefficient.
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::algebraic_value::AlgebraicValue;
use crate::symbolic::exact_field::QQ;
use crate::symbolic::monomial::Monomial;
use crate::symbolic::rational_function::RationalFunction;
use crate::symbolic::sparse_polynomial::{SparsePolynomial, accumulate, exponent_overflow};
use num::{One, Zero};
use std::collections::BTreeMap;

impl SparsePolynomial {
    /// Leading term with respect to the lexicographic order.
    pub fn lex_leading_term(&self) -> Option<(&Monomial, &QQ)> {
        self.terms().max_by(|a, b| a.0.lex_cmp(b.0))
    }

    /// `self` divided by its lexicographic leading coefficient; zero stays zero.
    pub fn monic(&self) -> SparsePolynomial {
        match self.lex_leading_term() {
            Some((_, lc)) if !lc.is_one() => self.scale(&lc.recip()),
            _ => self.clone(),
        }
    }

    /// Quotient and remainder of the lexicographic division algorithm.
    pub fn div_rem(
        &self,
        divisor: &SparsePolynomial,
    ) -> AlgebraResult<(SparsePolynomial, SparsePolynomial)> {
        let (lead_monomial, lead_coefficient) = divisor.lex_leading_term().ok_or_else(|| {
            AlgebraError::division_by_zero(format!("{} divided by the zero polynomial", self))
        })?;
        let mut rest: BTreeMap<Monomial, QQ> = self.data().clone();
        let mut quotient = BTreeMap::new();
        let mut remainder = BTreeMap::new();
        loop {
            let Some((monomial, coefficient)) = rest
                .iter()
                .max_by(|a, b| a.0.lex_cmp(b.0))
                .map(|(m, c)| (m.clone(), c.clone()))
            else {
                break;
            };
            match monomial.div(lead_monomial) {
                Some(shift) => {
                    let factor = &coefficient / lead_coefficient;
                    for (m, c) in divisor.terms() {
                        let m = shift.checked_mul(m).ok_or_else(exponent_overflow)?;
                        accumulate(&mut rest, m, -(&factor * c));
                    }
                    accumulate(&mut quotient, shift, factor);
                }
                None => {
                    rest.remove(&monomial);
                    accumulate(&mut remainder, monomial, coefficient);
                }
            }
        }
        let gens = self.gens().clone();
        Ok((
            SparsePolynomial::from_map(gens.clone(), quotient),
            SparsePolynomial::from_map(gens, remainder),
        ))
    }

    /// Exact floor division (`//`).
    pub fn floor_div(&self, divisor: &SparsePolynomial) -> AlgebraResult<SparsePolynomial> {
        Ok(self.div_rem(divisor)?.0)
    }

    /// Remainder of the division (`%`).
    pub fn remainder(&self, divisor: &SparsePolynomial) -> AlgebraResult<SparsePolynomial> {
        Ok(self.div_rem(divisor)?.1)
    }

    /// True division: a polynomial when the division is exact, a rational function otherwise.
    pub fn true_div(&self, divisor: &SparsePolynomial) -> AlgebraResult<AlgebraicValue> {
        if let Some(c) = divisor.as_constant() {
            if c.is_zero() {
                return Err(AlgebraError::division_by_zero(format!(
                    "{} divided by the zero polynomial",
                    self
                )));
            }
            return Ok(AlgebraicValue::Polynomial(self.scale(&c.recip())));
        }
        let (quotient, remainder) = self.div_rem(divisor)?;
        if remainder.is_zero() {
            Ok(AlgebraicValue::Polynomial(quotient))
        } else {
            Ok(AlgebraicValue::RationalFunction(RationalFunction::new(
                self.clone(),
                divisor.clone(),
            )?))
        }
    }

    /// Monic gcd of a list of polynomials.
    /// ```
    /// use RustedExactAlgebra::symbolic::sparse_polynomial::SparsePolynomial;
    /// let vars = ["x", "y"];
    /// let a = SparsePolynomial::from_string("x^2 - y^2", &vars).unwrap();
    /// let b = SparsePolynomial::from_string("2*x + 2*y", &vars).unwrap();
    /// let g = SparsePolynomial::gcd(&[a, b]).unwrap();
    /// assert_eq!(g, SparsePolynomial::from_string("x + y", &vars).unwrap());
    /// ```
    pub fn gcd(polys: &[SparsePolynomial]) -> AlgebraResult<SparsePolynomial> {
        let (first, rest) = polys
            .split_first()
            .ok_or_else(|| AlgebraError::invalid_argument("gcd of an empty list"))?;
        Ok(rest
            .iter()
            .fold(first.monic(), |acc, p| gcd_pair(&acc, p)))
    }

    /// Monic lcm of a list of polynomials.
    pub fn lcm(polys: &[SparsePolynomial]) -> AlgebraResult<SparsePolynomial> {
        let (first, rest) = polys
            .split_first()
            .ok_or_else(|| AlgebraError::invalid_argument("lcm of an empty list"))?;
        Ok(rest
            .iter()
            .fold(first.monic(), |acc, p| lcm_pair(&acc, p)))
    }
}

pub(crate) fn gcd_pair(a: &SparsePolynomial, b: &SparsePolynomial) -> SparsePolynomial {
    if a.is_zero() {
        return b.monic();
    }
    if b.is_zero() {
        return a.monic();
    }
    let one = SparsePolynomial::one(a.gens());
    let Some(var) = main_variable(a, b) else {
        return one;
    };
    if a.is_constant() || b.is_constant() {
        return one;
    }
    let content_a = content_in(a, var);
    let content_b = content_in(b, var);
    let content = gcd_pair(&content_a, &content_b);
    let mut f = exact_quotient(a, &content_a);
    let mut g = exact_quotient(b, &content_b);
    if degree_in(&f, var) < degree_in(&g, var) {
        std::mem::swap(&mut f, &mut g);
    }
    while degree_in(&g, var) > 0 {
        let r = pseudo_remainder(&f, &g, var);
        if r.is_zero() {
            break;
        }
        f = g;
        g = primitive_part_in(&r, var);
    }
    // a primitive polynomial free of `var` is a unit
    let g = if degree_in(&g, var) == 0 { one } else { g };
    (&content * &g).monic()
}

pub(crate) fn lcm_pair(a: &SparsePolynomial, b: &SparsePolynomial) -> SparsePolynomial {
    if a.is_zero() || b.is_zero() {
        return SparsePolynomial::zero(a.gens());
    }
    let g = gcd_pair(a, b);
    exact_quotient(&(a * b), &g).monic()
}

/// quotient of a division known to be exact
pub(crate) fn exact_quotient(a: &SparsePolynomial, b: &SparsePolynomial) -> SparsePolynomial {
    match a.div_rem(b) {
        Ok((quotient, remainder)) => {
            debug_assert!(remainder.is_zero(), "{} does not divide {}", b, a);
            quotient
        }
        Err(_) => SparsePolynomial::zero(a.gens()),
    }
}

fn main_variable(a: &SparsePolynomial, b: &SparsePolynomial) -> Option<usize> {
    a.variable_indices()
        .into_iter()
        .chain(b.variable_indices())
        .min()
}

fn degree_in(p: &SparsePolynomial, var: usize) -> u32 {
    p.terms().map(|(m, _)| m.degree_in(var)).max().unwrap_or(0)
}

/// coefficient polynomials of `p` seen as a polynomial in `var`
fn coefficients_in(p: &SparsePolynomial, var: usize) -> BTreeMap<u32, SparsePolynomial> {
    let mut split: BTreeMap<u32, BTreeMap<Monomial, QQ>> = BTreeMap::new();
    for (m, c) in p.terms() {
        let (exponent, rest) = m.split_off(var);
        split.entry(exponent).or_default().insert(rest, c.clone());
    }
    split
        .into_iter()
        .map(|(e, data)| (e, SparsePolynomial::from_map(p.gens().clone(), data)))
        .collect()
}

fn leading_coefficient_in(p: &SparsePolynomial, var: usize) -> (u32, SparsePolynomial) {
    coefficients_in(p, var)
        .into_iter()
        .next_back()
        .unwrap_or_else(|| (0, SparsePolynomial::zero(p.gens())))
}

fn content_in(p: &SparsePolynomial, var: usize) -> SparsePolynomial {
    coefficients_in(p, var)
        .values()
        .fold(SparsePolynomial::zero(p.gens()), |acc, c| gcd_pair(&acc, c))
}

fn primitive_part_in(p: &SparsePolynomial, var: usize) -> SparsePolynomial {
    exact_quotient(p, &content_in(p, var))
}

/// `lc(b)^k * a mod b` in `var`, for some `k >= 0`
fn pseudo_remainder(a: &SparsePolynomial, b: &SparsePolynomial, var: usize) -> SparsePolynomial {
    let (degree_b, lead_b) = leading_coefficient_in(b, var);
    let mut r = a.clone();
    loop {
        let (degree_r, lead_r) = leading_coefficient_in(&r, var);
        if r.is_zero() || degree_r < degree_b {
            return r;
        }
        let shift = Monomial::from_pairs(vec![(var, degree_r - degree_b)]);
        let shift = SparsePolynomial::from_monomial(shift, b.gens());
        r = &(&lead_b * &r) - &(&(&lead_r * &shift) * b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::exact_field::qq_int;

    fn poly(text: &str, vars: &[&str]) -> SparsePolynomial {
        SparsePolynomial::from_string(text, vars).unwrap()
    }

    #[test]
    fn univariate_division_with_remainder() {
        let vars = ["x", "y"];
        let p = poly("x**3 + 3*x**2 + 4*x + 5", &vars);
        let d = poly("x+1", &vars);
        let (q, r) = p.div_rem(&d).unwrap();
        assert_eq!(q, poly("x**2 + 2*x + 2", &vars));
        assert_eq!(r, qq_int(3));
        assert_eq!(p.floor_div(&d).unwrap(), q);
        assert_eq!(p.remainder(&d).unwrap(), r);
    }

    #[test]
    fn multivariate_division_uses_lex_order() {
        let vars = ["x", "y"];
        let p = poly("x**3 + 3*x**2 + 4*x + 5", &vars);
        let d = poly("x + y", &vars);
        let (q, r) = p.div_rem(&d).unwrap();
        assert_eq!(q, poly("x**2 - x*y + 3*x + y**2 - 3*y + 4", &vars));
        assert_eq!(r, poly("5 - y**3 + 3*y**2 - 4*y", &vars));
        assert_eq!(&(&q * &d) + &r, p);
    }

    #[test]
    fn exact_true_division_stays_polynomial() {
        let vars = ["x", "y"];
        let p = poly("x^2 + 2*x*y + y^2", &vars);
        let d = poly("x+y", &vars);
        assert_eq!(
            p.true_div(&d).unwrap(),
            AlgebraicValue::Polynomial(poly("x + y", &vars))
        );
        assert!(matches!(
            poly("x", &vars).true_div(&d).unwrap(),
            AlgebraicValue::RationalFunction(_)
        ));
        assert_eq!(
            p.true_div(&poly("4", &vars)).unwrap(),
            AlgebraicValue::Polynomial(poly("(x+y)^2/4", &vars))
        );
    }

    #[test]
    fn division_by_zero_polynomial() {
        let vars = ["x"];
        let zero = SparsePolynomial::zero(&vars);
        assert!(matches!(
            poly("x", &vars).div_rem(&zero),
            Err(AlgebraError::DivisionByZero(_))
        ));
        assert!(matches!(
            poly("x", &vars).true_div(&zero),
            Err(AlgebraError::DivisionByZero(_))
        ));
    }

    #[test]
    fn gcd_of_multivariate_polynomials() {
        let vars = ["x", "y", "z"];
        let common = poly("x*y - z + 2", &vars);
        let a = &common * &poly("x + z", &vars);
        let b = &common * &poly("3*y^2 - x", &vars);
        let g = SparsePolynomial::gcd(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(g, common.monic());
        let one = SparsePolynomial::gcd(&[poly("x + 1", &vars), poly("y - 1", &vars)]).unwrap();
        assert!(one.is_unitary());
    }

    #[test]
    fn gcd_with_contents_in_other_variables() {
        let vars = ["x", "y"];
        // y*(x - 1)*(x + y) and y^2*(x - 1)
        let a = poly("y*(x - 1)*(x + y)", &vars);
        let b = poly("y^2*(x - 1)", &vars);
        let g = SparsePolynomial::gcd(&[a, b]).unwrap();
        assert_eq!(g, poly("y*(x - 1)", &vars));
    }

    #[test]
    fn gcd_and_lcm_edge_cases() {
        let vars = ["x"];
        assert!(SparsePolynomial::gcd(&[]).is_err());
        assert!(SparsePolynomial::lcm(&[]).is_err());
        let p = poly("2*x + 4", &vars);
        let zero = SparsePolynomial::zero(&vars);
        assert_eq!(SparsePolynomial::gcd(&[p.clone(), zero.clone()]).unwrap(), poly("x + 2", &vars));
        assert!(SparsePolynomial::gcd(&[zero.clone(), zero.clone()]).unwrap().is_zero());
        assert!(SparsePolynomial::lcm(&[p.clone(), zero]).unwrap().is_zero());
        let l = SparsePolynomial::lcm(&[poly("x^2 - 1", &vars), poly("x^2 + 2*x + 1", &vars)]).unwrap();
        assert_eq!(l, poly("(x - 1)*(x + 1)^2", &vars));
    }
}
