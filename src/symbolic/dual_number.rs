//! Dual numbers for forward-mode automatic differentiation.
//!
//! A `DualNumber` over `n` variables carries `n + 1` exact slots: the function value followed by
//! the partial derivatives. Arithmetic follows the sum, product and quotient rules, so evaluating
//! a polynomial on seeded dual numbers yields its value and gradient in one pass.
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::exact_field::QQ;
use itertools::Itertools;
use num_traits::{One, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DualNumber {
    slots: Vec<QQ>,
}

impl DualNumber {
    /// `slots[0]` is the value, `slots[1..]` the partial derivatives
    pub fn new(slots: Vec<QQ>) -> AlgebraResult<Self> {
        if slots.is_empty() {
            return Err(AlgebraError::invalid_argument(
                "a dual number needs at least a value slot",
            ));
        }
        Ok(DualNumber { slots })
    }

    pub fn constant(value: QQ, dimension: usize) -> Self {
        let mut slots = vec![QQ::zero(); dimension + 1];
        slots[0] = value;
        DualNumber { slots }
    }

    /// Seed for variable `index`: derivative slot `index` set to one.
    pub fn variable(value: QQ, index: usize, dimension: usize) -> Self {
        let mut seed = DualNumber::constant(value, dimension);
        seed.slots[index + 1] = QQ::one();
        seed
    }

    pub fn value(&self) -> &QQ {
        &self.slots[0]
    }

    pub fn partials(&self) -> &[QQ] {
        &self.slots[1..]
    }

    pub fn partial(&self, index: usize) -> Option<&QQ> {
        self.slots.get(index + 1)
    }

    /// number of derivative slots
    pub fn dimension(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn scale(&self, factor: &QQ) -> DualNumber {
        DualNumber {
            slots: self.slots.iter().map(|s| s * factor).collect(),
        }
    }

    /// `d(u^e) = e * u^(e-1) * du`
    pub fn pow(&self, power: u32) -> DualNumber {
        if power == 0 {
            return DualNumber::constant(QQ::one(), self.dimension());
        }
        let lower = num::pow(self.slots[0].clone(), (power - 1) as usize);
        let factor = &lower * QQ::from_integer(power.into());
        let mut slots = Vec::with_capacity(self.slots.len());
        slots.push(&lower * &self.slots[0]);
        slots.extend(self.slots[1..].iter().map(|d| d * &factor));
        DualNumber { slots }
    }

    /// Quotient rule; a zero value slot in the divisor is a division by zero.
    pub fn checked_div(&self, other: &DualNumber) -> AlgebraResult<DualNumber> {
        let v = &other.slots[0];
        if v.is_zero() {
            return Err(AlgebraError::division_by_zero(
                "dual number with a zero value slot",
            ));
        }
        let u = &self.slots[0];
        let v_squared = v * v;
        let mut slots = Vec::with_capacity(self.slots.len());
        slots.push(u / v);
        for (du, dv) in self.slots[1..].iter().zip(&other.slots[1..]) {
            slots.push((du * v - u * dv) / &v_squared);
        }
        Ok(DualNumber { slots })
    }

    /// lossy copy of all slots
    pub fn to_f64(&self) -> Vec<f64> {
        self.slots
            .iter()
            .map(|s| s.to_f64().unwrap_or(f64::NAN))
            .collect()
    }
}

impl fmt::Display for DualNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.slots.iter().join(", "))
    }
}

impl Add<&DualNumber> for &DualNumber {
    type Output = DualNumber;
    fn add(self, other: &DualNumber) -> DualNumber {
        DualNumber {
            slots: self.slots.iter().zip(&other.slots).map(|(a, b)| a + b).collect(),
        }
    }
}

impl Sub<&DualNumber> for &DualNumber {
    type Output = DualNumber;
    fn sub(self, other: &DualNumber) -> DualNumber {
        DualNumber {
            slots: self.slots.iter().zip(&other.slots).map(|(a, b)| a - b).collect(),
        }
    }
}

impl Mul<&DualNumber> for &DualNumber {
    type Output = DualNumber;
    fn mul(self, other: &DualNumber) -> DualNumber {
        let (a0, b0) = (&self.slots[0], &other.slots[0]);
        let mut slots = Vec::with_capacity(self.slots.len());
        slots.push(a0 * b0);
        for (da, db) in self.slots[1..].iter().zip(&other.slots[1..]) {
            slots.push(a0 * db + da * b0);
        }
        DualNumber { slots }
    }
}

impl Neg for &DualNumber {
    type Output = DualNumber;
    fn neg(self) -> DualNumber {
        DualNumber {
            slots: self.slots.iter().map(|s| -s).collect(),
        }
    }
}

impl Add for DualNumber {
    type Output = DualNumber;
    fn add(self, other: DualNumber) -> DualNumber {
        &self + &other
    }
}

impl Sub for DualNumber {
    type Output = DualNumber;
    fn sub(self, other: DualNumber) -> DualNumber {
        &self - &other
    }
}

impl Mul for DualNumber {
    type Output = DualNumber;
    fn mul(self, other: DualNumber) -> DualNumber {
        &self * &other
    }
}

impl Neg for DualNumber {
    type Output = DualNumber;
    fn neg(self) -> DualNumber {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::exact_field::{qq, qq_int};

    #[test]
    fn product_and_sum_rules() {
        // x = 3, y = 2 over two variables
        let x = DualNumber::variable(qq_int(3), 0, 2);
        let y = DualNumber::variable(qq_int(2), 1, 2);
        let f = &(&x * &y) + &x;
        assert_eq!(f.value(), &qq_int(9));
        assert_eq!(f.partials(), &[qq_int(3), qq_int(3)]);
        let g = &x - &y;
        assert_eq!(g.partials(), &[qq_int(1), qq_int(-1)]);
        assert_eq!((-g).value(), &qq_int(-1));
    }

    #[test]
    fn power_rule() {
        let x = DualNumber::variable(qq_int(2), 0, 1);
        let cube = x.pow(3);
        assert_eq!(cube.value(), &qq_int(8));
        assert_eq!(cube.partial(0), Some(&qq_int(12)));
        assert_eq!(x.pow(0), DualNumber::constant(qq_int(1), 1));
    }

    #[test]
    fn quotient_rule_and_zero_divisor() {
        let x = DualNumber::variable(qq_int(1), 0, 2);
        let y = DualNumber::variable(qq_int(2), 1, 2);
        let q = x.checked_div(&y).unwrap();
        assert_eq!(q.value(), &qq(1, 2));
        assert_eq!(q.partials(), &[qq(1, 2), qq(-1, 4)]);
        let zero = DualNumber::constant(qq_int(0), 2);
        assert!(matches!(x.checked_div(&zero), Err(AlgebraError::DivisionByZero(_))));
    }

    #[test]
    fn display_and_floats() {
        let x = DualNumber::new(vec![qq(1, 2), qq_int(3)]).unwrap();
        assert_eq!(x.to_string(), "(1/2, 3)");
        assert_eq!(x.to_f64(), vec![0.5, 3.0]);
        assert_eq!(x.dimension(), 1);
        assert_eq!(x.scale(&qq_int(2)).value(), &qq_int(1));
    }

    #[test]
    fn new_requires_a_value_slot() {
        assert!(matches!(
            DualNumber::new(Vec::new()),
            Err(AlgebraError::InvalidArgument(_))
        ));
        assert_eq!(DualNumber::new(vec![qq_int(4)]).unwrap().dimension(), 0);
    }
}
