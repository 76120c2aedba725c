//! # Exact field
//!
//! The coefficient domain of every polynomial in the crate: arbitrary precision rationals
//! (`num::BigRational`, aliased as [`QQ`]). Nothing here ever rounds.
//!
//! ## Main functions
//! - [`to_rational`] converts a decimal/scientific literal such as `"2.5e-3"` into an exact rational
//!   by multiplying out the decimal scale, without any floating point intermediate
//! - [`coerce_f64`] converts a float through its shortest decimal representation; with
//!   `strict == false` failures are downgraded to `1` with a warning
//! - [`checked_rational_pow`] refuses powers whose exact value would be unreasonably large
//! - [`rational_gcd`] / [`content_of`]: gcd of rationals, `gcd(a/b, c/d) = gcd(a, c) / lcm(b, d)`
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use log::warn;
use num::bigint::BigInt;
use num::rational::BigRational;
use num::{Integer, One, Signed, Zero};

/// the field of rational numbers
pub type QQ = BigRational;

/// largest magnitude of the `e` exponent accepted by [`to_rational`]
pub const MAX_DECIMAL_SCALE: u64 = 10_000;

/// lower bound on the bit length of a power that [`checked_rational_pow`] refuses to build
pub const MAX_POWER_BITS: u64 = 1 << 24;

pub fn qq(numer: i64, denom: i64) -> QQ {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

pub fn qq_int(value: i64) -> QQ {
    BigRational::from_integer(BigInt::from(value))
}

fn ten_to(power: u64) -> BigInt {
    num::pow(BigInt::from(10), power as usize)
}

/// Exact conversion of a numeric literal: `[+-]? digits [. digits?] ([eE] [+-]? digits)?`.
/// ```
/// use RustedExactAlgebra::symbolic::exact_field::{to_rational, qq};
/// assert_eq!(to_rational("2.5e-1").unwrap(), qq(1, 4));
/// assert_eq!(to_rational("-12").unwrap(), qq(-12, 1));
/// ```
pub fn to_rational(literal: &str) -> AlgebraResult<QQ> {
    let text = literal.trim();
    let bad = || AlgebraError::Coercion(format!("'{}' is not a numeric literal", literal));
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => {
            let exp_text = &unsigned[pos + 1..];
            let exp: i64 = exp_text.parse().map_err(|_| {
                if exp_text.trim_start_matches(['+', '-']).chars().all(|c| c.is_ascii_digit())
                    && !exp_text.trim_start_matches(['+', '-']).is_empty()
                {
                    AlgebraError::Coercion(format!(
                        "exponent of '{}' is not representable",
                        literal
                    ))
                } else {
                    bad()
                }
            })?;
            (&unsigned[..pos], exp)
        }
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let well_formed = !int_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(bad());
    }
    if exponent.unsigned_abs() > MAX_DECIMAL_SCALE {
        return Err(AlgebraError::Coercion(format!(
            "decimal exponent {} of '{}' is not representable",
            exponent, literal
        )));
    }
    let digits: BigInt = format!("{}{}", int_part, frac_part)
        .parse()
        .map_err(|_| bad())?;
    // the fraction length is bounded by the literal itself
    let scale = exponent - frac_part.len() as i64;
    let magnitude = if scale >= 0 {
        BigRational::from_integer(digits * ten_to(scale.unsigned_abs()))
    } else {
        BigRational::new(digits, ten_to(scale.unsigned_abs()))
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// Exact conversion of a float. Finite values go through the shortest decimal representation,
/// so `0.1` becomes `1/10`. NaN and infinities cannot be represented: with `strict` the failure
/// is returned, otherwise it is logged and `1` is used instead.
pub fn coerce_f64(value: f64, strict: bool) -> AlgebraResult<QQ> {
    let converted = if value.is_finite() {
        to_rational(&format!("{:e}", value))
    } else {
        Err(AlgebraError::Coercion(format!(
            "{} has no exact rational value",
            value
        )))
    };
    match converted {
        Ok(q) => Ok(q),
        Err(err) if !strict => {
            warn!("{}; using 1 instead", err);
            Ok(QQ::one())
        }
        Err(err) => Err(err),
    }
}

/// `base^power`, refused with `InvalidArgument` when the result would need more than
/// [`MAX_POWER_BITS`] bits. `0`, `1` and `-1` may be raised to any power.
pub fn checked_rational_pow(base: &QQ, power: u32) -> AlgebraResult<QQ> {
    let bits = base.numer().bits().max(base.denom().bits());
    if bits.saturating_sub(1).saturating_mul(power as u64) > MAX_POWER_BITS {
        return Err(AlgebraError::invalid_argument(format!(
            "({})^{} is too large to compute exactly",
            base, power
        )));
    }
    Ok(num::pow(base.clone(), power as usize))
}

/// Nonnegative gcd of two rationals: `gcd(a/b, c/d) = gcd(a, c) / lcm(b, d)`.
pub fn rational_gcd(a: &QQ, b: &QQ) -> QQ {
    if a.is_zero() {
        return b.abs();
    }
    if b.is_zero() {
        return a.abs();
    }
    let numer = a.numer().gcd(b.numer());
    let denom = a.denom().lcm(b.denom());
    BigRational::new(numer, denom)
}

/// gcd of a sequence of rationals, zero for an empty sequence
pub fn content_of<'a>(coefficients: impl IntoIterator<Item = &'a QQ>) -> QQ {
    coefficients
        .into_iter()
        .fold(QQ::zero(), |acc, c| rational_gcd(&acc, c))
}

/// Render a rational the way the printer and the parser agree on: integers bare,
/// fractions as `(p/q)`.
pub fn format_rational(value: &QQ) -> String {
    if value.is_integer() {
        format!("{}", value.numer())
    } else {
        format!("({}/{})", value.numer(), value.denom())
    }
}
