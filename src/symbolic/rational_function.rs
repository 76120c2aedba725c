//! # Rational functions
//!
//! A `RationalFunction` is a pair of [`SparsePolynomial`]s over the same variable list. It is
//! reduced eagerly every time it is built:
//! 1. the monic gcd of numerator and denominator is divided out;
//! 2. the rational content of the denominator is moved into the numerator;
//! 3. the sign is fixed so the denominator's lexicographic leading coefficient is positive.
//!
//! After these steps the representation of a fraction is unique, so `Hash` can work on the pair
//! directly while equality is still checked by cross multiplication.
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::algebraic_value::AlgebraicValue;
use crate::symbolic::dual_number::DualNumber;
use crate::symbolic::exact_field::QQ;
use crate::symbolic::parse_rational::parse_expression;
use crate::symbolic::polynomial_division::{exact_quotient, gcd_pair};
use crate::symbolic::sparse_polynomial::{Degree, SparsePolynomial};
use crate::symbolic::sparse_vector::SparseVector;
use crate::symbolic::variables::VariableList;
use log::debug;
use num::{One, Signed, Zero};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Debug)]
pub struct RationalFunction {
    numer: SparsePolynomial,
    denom: SparsePolynomial,
}

impl RationalFunction {
    /// Builds and reduces `numer / denom`. The variable lists must coincide and the denominator
    /// must not be the zero polynomial.
    pub fn new(numer: SparsePolynomial, denom: SparsePolynomial) -> AlgebraResult<Self> {
        if numer.gens() != denom.gens() {
            return Err(AlgebraError::invalid_argument(format!(
                "numerator over {:?} and denominator over {:?}",
                numer.gens(),
                denom.gens()
            )));
        }
        if denom.is_zero() {
            return Err(AlgebraError::division_by_zero(format!(
                "rational function with numerator {} and a zero denominator",
                numer
            )));
        }
        Ok(RationalFunction::reduced(numer, denom))
    }

    /// reduction without the argument checks; `denom` must be nonzero
    fn reduced(numer: SparsePolynomial, denom: SparsePolynomial) -> Self {
        if numer.is_zero() {
            let gens = numer.gens().clone();
            return RationalFunction {
                numer,
                denom: SparsePolynomial::one(gens),
            };
        }
        let (mut numer, mut denom) = (numer, denom);
        if !denom.is_constant() {
            let g = gcd_pair(&numer, &denom);
            if !g.is_unitary() {
                debug!("cancelling common factor {} from ({})/({})", g, numer, denom);
                numer = exact_quotient(&numer, &g);
                denom = exact_quotient(&denom, &g);
            }
        }
        let mut scale = denom.content().recip();
        if denom
            .lex_leading_term()
            .is_some_and(|(_, lc)| lc.is_negative())
        {
            scale = -scale;
        }
        if !scale.is_one() {
            numer = numer.scale(&scale);
            denom = denom.scale(&scale);
        }
        RationalFunction { numer, denom }
    }

    pub fn from_polynomial(poly: SparsePolynomial) -> Self {
        let denom = SparsePolynomial::one(poly.gens());
        RationalFunction { numer: poly, denom }
    }

    pub fn from_const(value: QQ, varnames: impl Into<VariableList>) -> Self {
        RationalFunction::from_polynomial(SparsePolynomial::from_const(value, varnames))
    }

    /// Parses an infix expression.
    /// ```
    /// use RustedExactAlgebra::symbolic::rational_function::RationalFunction;
    /// let f = RationalFunction::from_string("(x^2 - 1)/(2*x + 2)", &["x"]).unwrap();
    /// assert_eq!(f.to_string(), "(-(1/2) + (1/2)*x)/(1)");
    /// ```
    pub fn from_string(text: &str, varnames: impl Into<VariableList>) -> AlgebraResult<Self> {
        let varnames = varnames.into();
        Ok(parse_expression(text, &varnames)?.into_rational_function(&varnames))
    }

    pub fn numer(&self) -> &SparsePolynomial {
        &self.numer
    }

    pub fn denom(&self) -> &SparsePolynomial {
        &self.denom
    }

    pub fn gens(&self) -> &VariableList {
        self.numer.gens()
    }

    /// total number of terms in numerator and denominator
    pub fn size(&self) -> usize {
        self.numer.size() + self.denom.size()
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_constant(&self) -> bool {
        self.numer.is_constant() && self.denom.is_constant()
    }

    pub fn is_polynomial(&self) -> bool {
        self.denom.is_constant()
    }

    /// The numerator divided by the (constant) denominator.
    pub fn get_poly(&self) -> AlgebraResult<SparsePolynomial> {
        match self.denom.as_constant() {
            Some(c) => Ok(self.numer.scale(&c.recip())),
            None => Err(AlgebraError::invalid_argument(format!(
                "{} is not a polynomial",
                self
            ))),
        }
    }

    /// Value at the origin.
    pub fn get_constant(&self) -> AlgebraResult<QQ> {
        let denominator = self.denom.constant_term();
        if denominator.is_zero() {
            return Err(AlgebraError::division_by_zero(format!(
                "{} has a pole at the origin",
                self
            )));
        }
        Ok(self.numer.constant_term() / denominator)
    }

    /// Names occurring in numerator or denominator, in variable-list order.
    pub fn variables(&self) -> Vec<String> {
        let indices: BTreeSet<usize> = self
            .numer
            .variable_indices()
            .union(&self.denom.variable_indices())
            .copied()
            .collect();
        indices
            .into_iter()
            .filter_map(|i| self.gens().name(i).map(str::to_string))
            .collect()
    }

    /// `deg(numer) - deg(denom)` in one variable; `Infinite` for the zero function.
    pub fn valuation(&self, var_name: &str) -> AlgebraResult<Degree> {
        let numer = self.numer.degree_in(var_name)?;
        let denom = self.denom.degree_in(var_name)?;
        Ok(match (numer, denom) {
            (Degree::Finite(n), Degree::Finite(d)) => Degree::Finite(n - d),
            _ => Degree::Infinite,
        })
    }

    /// Quotient rule: `(denom * numer' - numer * denom') / denom^2`.
    pub fn derivative(&self, var_name: &str) -> RationalFunction {
        let Some(index) = self.gens().index_of(var_name) else {
            return RationalFunction::from_const(QQ::zero(), self.gens());
        };
        let numer = &(&self.denom * &self.numer.partial_derivative(index))
            - &(&self.numer * &self.denom.partial_derivative(index));
        RationalFunction::reduced(numer, &self.denom * &self.denom)
    }

    pub fn pow(&self, power: i64) -> AlgebraResult<RationalFunction> {
        if power < 0 {
            return Err(AlgebraError::invalid_argument(format!(
                "exponent must be a nonnegative integer, got {}",
                power
            )));
        }
        // numerator and denominator stay coprime
        Ok(RationalFunction {
            numer: self.numer.pow(power)?,
            denom: self.denom.pow(power)?,
        })
    }

    pub fn checked_div(&self, other: &RationalFunction) -> AlgebraResult<RationalFunction> {
        if other.is_zero() {
            return Err(AlgebraError::division_by_zero(format!(
                "({}) / ({})",
                self, other
            )));
        }
        Ok(RationalFunction::reduced(
            &self.numer * &other.denom,
            &self.denom * &other.numer,
        ))
    }

    /// Partial evaluation. The denominator is evaluated first, a zero there is reported before
    /// the numerator is touched.
    pub fn eval(&self, values: &HashMap<String, QQ>) -> AlgebraResult<AlgebraicValue> {
        let denom = self.denom.eval(values);
        if denom.is_zero() {
            return Err(AlgebraError::division_by_zero(format!(
                "denominator of {} vanishes at {:?}",
                self, values
            )));
        }
        let numer = self.numer.eval(values);
        numer.true_div(&denom)
    }

    /// Total substitution; denominator first, like [`RationalFunction::eval`].
    pub fn subs(&self, values: &HashMap<String, AlgebraicValue>) -> AlgebraResult<AlgebraicValue> {
        let denom = self.denom.subs(values)?;
        if denom.is_zero() {
            return Err(AlgebraError::division_by_zero(format!(
                "denominator of {} vanishes after substitution",
                self
            )));
        }
        let numer = self.numer.subs(values)?;
        numer.checked_div(denom)
    }

    /// Value and gradient at a point, as the quotient of the dual-number evaluations of numerator
    /// and denominator. A vanishing denominator is a division by zero.
    pub fn automated_diff(&self, values: &HashMap<String, QQ>) -> AlgebraResult<DualNumber> {
        let denom = self.denom.automated_diff(values)?;
        let numer = self.numer.automated_diff(values)?;
        numer.checked_div(&denom)
    }

    /// First-order Taylor coefficients at the origin. Exact linear part only when the function is
    /// affine; a local linearization otherwise.
    pub fn linear_part_as_vec(&self) -> AlgebraResult<SparseVector> {
        let origin: HashMap<String, QQ> = self
            .gens()
            .names()
            .iter()
            .map(|name| (name.clone(), QQ::zero()))
            .collect();
        let dual = self.automated_diff(&origin)?;
        let mut vector = SparseVector::new(self.gens().len());
        for (i, d) in dual.partials().iter().enumerate() {
            vector.insert(i, d.clone());
        }
        Ok(vector)
    }

    /// Floating point evaluator, arguments in variable-list order.
    pub fn lambdify(&self) -> Box<dyn Fn(&[f64]) -> f64 + Send + Sync> {
        let numer = self.numer.lambdify();
        let denom = self.denom.lambdify();
        Box::new(move |args: &[f64]| numer(args) / denom(args))
    }

    /// Equality with a parsed expression over the same variables.
    pub fn equals_expression(&self, text: &str) -> AlgebraResult<bool> {
        let other = parse_expression(text, self.gens())?;
        Ok(AlgebraicValue::RationalFunction(self.clone()) == other)
    }
}

impl PartialEq for RationalFunction {
    fn eq(&self, other: &Self) -> bool {
        &self.numer * &other.denom == &other.numer * &self.denom
    }
}

impl Eq for RationalFunction {}

impl PartialEq<SparsePolynomial> for RationalFunction {
    fn eq(&self, other: &SparsePolynomial) -> bool {
        self.numer == &self.denom * other
    }
}

impl PartialEq<RationalFunction> for SparsePolynomial {
    fn eq(&self, other: &RationalFunction) -> bool {
        other == self
    }
}

impl PartialEq<QQ> for RationalFunction {
    fn eq(&self, other: &QQ) -> bool {
        self.numer == self.denom.scale(other)
    }
}

impl Hash for RationalFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numer.hash(state);
        self.denom.hash(state);
    }
}

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})/({})", self.numer, self.denom)
    }
}

impl From<SparsePolynomial> for RationalFunction {
    fn from(poly: SparsePolynomial) -> Self {
        RationalFunction::from_polynomial(poly)
    }
}

// ----------------------------------------------------------------------------------------------
// operators

impl Add<&RationalFunction> for &RationalFunction {
    type Output = RationalFunction;
    fn add(self, other: &RationalFunction) -> RationalFunction {
        if self.denom == other.denom {
            return RationalFunction::reduced(&self.numer + &other.numer, self.denom.clone());
        }
        RationalFunction::reduced(
            &(&self.numer * &other.denom) + &(&other.numer * &self.denom),
            &self.denom * &other.denom,
        )
    }
}

impl Add for RationalFunction {
    type Output = RationalFunction;
    fn add(self, other: RationalFunction) -> RationalFunction {
        &self + &other
    }
}

impl Sub<&RationalFunction> for &RationalFunction {
    type Output = RationalFunction;
    fn sub(self, other: &RationalFunction) -> RationalFunction {
        self + &(-other)
    }
}

impl Sub for RationalFunction {
    type Output = RationalFunction;
    fn sub(self, other: RationalFunction) -> RationalFunction {
        &self - &other
    }
}

impl Mul<&RationalFunction> for &RationalFunction {
    type Output = RationalFunction;
    fn mul(self, other: &RationalFunction) -> RationalFunction {
        RationalFunction::reduced(&self.numer * &other.numer, &self.denom * &other.denom)
    }
}

impl Mul for RationalFunction {
    type Output = RationalFunction;
    fn mul(self, other: RationalFunction) -> RationalFunction {
        &self * &other
    }
}

impl Neg for &RationalFunction {
    type Output = RationalFunction;
    fn neg(self) -> RationalFunction {
        RationalFunction {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }
}

impl Neg for RationalFunction {
    type Output = RationalFunction;
    fn neg(self) -> RationalFunction {
        RationalFunction {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl AddAssign<&RationalFunction> for RationalFunction {
    fn add_assign(&mut self, other: &RationalFunction) {
        if self.denom == other.denom {
            let numer = &self.numer + &other.numer;
            *self = RationalFunction::reduced(numer, self.denom.clone());
        } else {
            *self = &*self + other;
        }
    }
}

impl SubAssign<&RationalFunction> for RationalFunction {
    fn sub_assign(&mut self, other: &RationalFunction) {
        *self += &(-other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::exact_field::{qq, qq_int};
    use approx::assert_relative_eq;
    use std::collections::hash_map::DefaultHasher;

    fn rf(text: &str, vars: &[&str]) -> RationalFunction {
        RationalFunction::from_string(text, vars).unwrap()
    }

    fn poly(text: &str, vars: &[&str]) -> SparsePolynomial {
        SparsePolynomial::from_string(text, vars).unwrap()
    }

    fn hash_of(f: &RationalFunction) -> u64 {
        let mut hasher = DefaultHasher::new();
        f.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn construction_checks() {
        let x = poly("x", &["x"]);
        assert!(matches!(
            RationalFunction::new(x.clone(), SparsePolynomial::zero(&["x"])),
            Err(AlgebraError::DivisionByZero(_))
        ));
        assert!(matches!(
            RationalFunction::new(x, poly("y", &["y"])),
            Err(AlgebraError::InvalidArgument(_))
        ));
    }

    #[test]
    fn construction_cancels_common_factors() {
        let vars = ["x", "y"];
        let f = RationalFunction::new(poly("x^2 - y^2", &vars), poly("3*x + 3*y", &vars)).unwrap();
        assert!(f.is_polynomial());
        assert_eq!(f.get_poly().unwrap(), poly("(x - y)/3", &vars));

        let g = rf("(x*y + x)/(y^2 + y)", &vars);
        assert_eq!(g.numer(), &poly("x", &vars));
        assert_eq!(g.denom(), &poly("y", &vars));
    }

    #[test]
    fn denominator_content_moves_to_numerator() {
        let vars = ["x", "y"];
        let f = rf("x / (y/2 + 1/3)", &vars);
        assert_eq!(f.denom(), &poly("3*y + 2", &vars));
        assert_eq!(f.numer(), &poly("6*x", &vars));
        let g = rf("x / (-y)", &vars);
        assert_eq!(g.numer(), &poly("-x", &vars));
        assert_eq!(g.denom(), &poly("y", &vars));
    }

    #[test]
    fn equal_fractions_hash_alike() {
        let vars = ["x", "y"];
        let a = rf("(2*x)/(4*y + 2)", &vars);
        let b = rf("(-x)/(-2*y - 1)", &vars);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn arithmetic() {
        let vars = ["x", "y"];
        let a = rf("1/x", &vars);
        let b = rf("1/y", &vars);
        assert_eq!(&a + &b, rf("(x + y)/(x*y)", &vars));
        assert_eq!(&a - &a, qq_int(0));
        assert_eq!(&a * &b, rf("1/(x*y)", &vars));
        assert_eq!(a.checked_div(&b).unwrap(), rf("y/x", &vars));
        assert!(matches!(
            a.checked_div(&RationalFunction::from_const(qq_int(0), &vars)),
            Err(AlgebraError::DivisionByZero(_))
        ));
        assert_eq!(a.pow(3).unwrap(), rf("1/x^3", &vars));
        assert_eq!(a.pow(0).unwrap(), qq_int(1));
        assert!(a.pow(-2).is_err());
    }

    #[test]
    fn accumulation_with_equal_denominators_is_reduced() {
        let vars = ["x"];
        let mut acc = rf("x/(x + 1)", &vars);
        acc += &rf("1/(x + 1)", &vars);
        assert!(acc.is_polynomial());
        assert_eq!(acc, qq_int(1));
        acc -= &rf("1/x", &vars);
        assert_eq!(acc, rf("(x - 1)/x", &vars));
    }

    #[test]
    fn eval_divides_after_checking_denominator() {
        let vars = ["x", "y", "z"];
        let f = rf("x/(y*z**2)", &vars);
        let values: HashMap<String, QQ> =
            [("y".to_string(), qq_int(1)), ("z".to_string(), qq_int(2))].into();
        let value = f.eval(&values).unwrap();
        assert_eq!(value, AlgebraicValue::Polynomial(poly("x/4", &["x"])));

        let one_over_x = RationalFunction::new(poly("1", &["x"]), poly("x", &["x"])).unwrap();
        let at_zero: HashMap<String, QQ> = [("x".to_string(), qq_int(0))].into();
        assert!(matches!(
            one_over_x.eval(&at_zero),
            Err(AlgebraError::DivisionByZero(_))
        ));
    }

    #[test]
    fn subs_checks_denominator_first() {
        let f = rf("(x + 1)/(x - y)", &["x", "y"]);
        let t = ["t"];
        let collapse: HashMap<String, AlgebraicValue> = [
            ("x".to_string(), AlgebraicValue::Polynomial(poly("t", &t))),
            ("y".to_string(), AlgebraicValue::Polynomial(poly("t", &t))),
        ]
        .into();
        assert!(matches!(f.subs(&collapse), Err(AlgebraError::DivisionByZero(_))));

        let fine: HashMap<String, AlgebraicValue> = [
            ("x".to_string(), AlgebraicValue::Polynomial(poly("2*t", &t))),
            ("y".to_string(), AlgebraicValue::Polynomial(poly("t", &t))),
        ]
        .into();
        let value = f.subs(&fine).unwrap();
        assert_eq!(value, AlgebraicValue::RationalFunction(rf("(2*t + 1)/t", &t)));
    }

    #[test]
    fn derivative_by_quotient_rule() {
        let vars = ["x", "y"];
        let f = rf("x/(x + y)", &vars);
        assert_eq!(f.derivative("x"), rf("y/(x + y)^2", &vars));
        assert_eq!(f.derivative("y"), rf("-x/(x + y)^2", &vars));
        assert!(f.derivative("w").is_zero());
    }

    #[test]
    fn valuation_and_accessors() {
        let vars = ["x", "y"];
        let f = rf("x/(x^3 + y)", &vars);
        assert_eq!(f.valuation("x").unwrap(), Degree::Finite(-2));
        assert_eq!(f.valuation("y").unwrap(), Degree::Finite(-1));
        assert!(f.valuation("q").is_err());
        assert_eq!(
            RationalFunction::from_const(qq_int(0), &vars).valuation("x").unwrap(),
            Degree::Infinite
        );
        assert_eq!(f.variables(), vec!["x".to_string(), "y".to_string()]);
        assert_eq!(f.size(), 3);
        assert!(f.get_poly().is_err());
        assert!(f.get_constant().is_err());
        assert_eq!(rf("(x + 3)/(y + 2)", &vars).get_constant().unwrap(), qq(3, 2));
    }

    #[test]
    fn automated_diff_quotient() {
        let vars = ["x", "y"];
        let f = rf("x/(x + y)", &vars);
        let values: HashMap<String, QQ> =
            [("x".to_string(), qq_int(1)), ("y".to_string(), qq_int(3))].into();
        let dual = f.automated_diff(&values).unwrap();
        assert_eq!(dual.value(), &qq(1, 4));
        assert_eq!(dual.partials(), &[qq(3, 16), qq(-1, 16)]);

        let pole: HashMap<String, QQ> =
            [("x".to_string(), qq_int(1)), ("y".to_string(), qq_int(-1))].into();
        assert!(matches!(
            f.automated_diff(&pole),
            Err(AlgebraError::DivisionByZero(_))
        ));
    }

    #[test]
    fn linear_part_at_origin() {
        let vars = ["x", "y", "z"];
        let f = rf("(2*x - y)/(1 + z)", &vars);
        let v = f.linear_part_as_vec().unwrap();
        assert_eq!(v.to_dense(), vec![qq_int(2), qq_int(-1), qq_int(0)]);
        assert!(rf("1/x", &vars).linear_part_as_vec().is_err());
    }

    #[test]
    fn equality_with_strings_and_constants() {
        let vars = ["x"];
        let f = rf("(x^2 - 1)/(x - 1)", &vars);
        assert!(f.equals_expression("x + 1").unwrap());
        assert!(!f.equals_expression("x - 1").unwrap());
        assert!(matches!(
            f.equals_expression("x + q"),
            Err(AlgebraError::InvalidArgument(_))
        ));
        assert_eq!(f, poly("x + 1", &vars));
        assert_eq!(poly("x + 1", &vars), f);
        assert_eq!(rf("6/4", &vars), qq(3, 2));
    }

    #[test]
    fn lambdify_rational() {
        let f = rf("x/(x + y)", &["x", "y"]);
        let g = f.lambdify();
        assert_relative_eq!(g(&[1.0, 3.0]), 0.25, epsilon = 1e-12);
    }
}
