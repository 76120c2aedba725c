//! Sparse monomials: `x0^2 * x3` is stored as `[(0, 2), (3, 1)]`.
//!
//! Pairs are strictly increasing in the variable index and never carry a zero exponent; the
//! empty sequence is the constant monomial `1`.
//!
//! Two orders are used:
//! - `Ord` (graded): total degree first, ties broken lexicographically with earlier variables
//!   first. Ascending iteration over a `BTreeMap<Monomial, _>` therefore reads `1, x, y, x^2, x*y, y^2`.
//! - [`Monomial::lex_cmp`]: pure lexicographic order, variable 0 being the most significant.
//!   It drives the multivariate division algorithm.
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Monomial(Vec<(usize, u32)>);

impl Monomial {
    pub fn one() -> Self {
        Monomial(Vec::new())
    }

    pub fn var(index: usize) -> Self {
        Monomial(vec![(index, 1)])
    }

    /// Builds a canonical monomial from arbitrary pairs: sorts, merges repeated indices and
    /// drops zero exponents. Merged exponents saturate at `u32::MAX`.
    pub fn from_pairs(mut pairs: Vec<(usize, u32)>) -> Self {
        pairs.sort_by_key(|&(v, _)| v);
        let mut merged: Vec<(usize, u32)> = Vec::with_capacity(pairs.len());
        for (v, e) in pairs {
            match merged.last_mut() {
                Some(last) if last.0 == v => last.1 = last.1.saturating_add(e),
                _ => merged.push((v, e)),
            }
        }
        merged.retain(|&(_, e)| e > 0);
        Monomial(merged)
    }

    pub fn pairs(&self) -> &[(usize, u32)] {
        &self.0
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_degree(&self) -> u64 {
        self.0.iter().map(|&(_, e)| u64::from(e)).sum()
    }

    pub fn degree_in(&self, var: usize) -> u32 {
        self.0
            .iter()
            .find(|&&(v, _)| v == var)
            .map_or(0, |&(_, e)| e)
    }

    /// `Some(i)` if the monomial is exactly the variable `x_i`
    pub fn as_linear(&self) -> Option<usize> {
        match self.0.as_slice() {
            [(v, 1)] => Some(*v),
            _ => None,
        }
    }

    /// Product, or `None` if an exponent leaves the `u32` range.
    pub fn checked_mul(&self, other: &Monomial) -> Option<Monomial> {
        let (a, b) = (&self.0, &other.0);
        let mut result = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => {
                    result.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    result.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    result.push((a[i].0, a[i].1.checked_add(b[j].1)?));
                    i += 1;
                    j += 1;
                }
            }
        }
        result.extend_from_slice(&a[i..]);
        result.extend_from_slice(&b[j..]);
        Some(Monomial(result))
    }

    /// `self / other` when `other` divides `self`
    pub fn div(&self, other: &Monomial) -> Option<Monomial> {
        let mut result = Vec::with_capacity(self.0.len());
        let mut rest = other.0.iter().peekable();
        for &(v, e) in &self.0 {
            match rest.peek() {
                Some(&&(ov, oe)) if ov == v => {
                    rest.next();
                    if oe > e {
                        return None;
                    }
                    if oe < e {
                        result.push((v, e - oe));
                    }
                }
                Some(&&(ov, _)) if ov < v => return None,
                _ => result.push((v, e)),
            }
        }
        if rest.next().is_some() {
            return None;
        }
        Some(Monomial(result))
    }

    /// `self^power`, or `None` if an exponent leaves the `u32` range.
    pub fn checked_pow(&self, power: u32) -> Option<Monomial> {
        if power == 0 {
            return Some(Monomial::one());
        }
        self.0
            .iter()
            .map(|&(v, e)| e.checked_mul(power).map(|e| (v, e)))
            .collect::<Option<Vec<_>>>()
            .map(Monomial)
    }

    /// Splits off the variable `var`: returns the exponent of `var` and the remaining monomial.
    pub fn split_off(&self, var: usize) -> (u32, Monomial) {
        let exponent = self.degree_in(var);
        let rest = self.0.iter().copied().filter(|&(v, _)| v != var).collect();
        (exponent, Monomial(rest))
    }

    /// Partial derivative with respect to `var`: `(exponent, reduced monomial)`, or `None` if
    /// the variable does not occur.
    pub fn derivative(&self, var: usize) -> Option<(u32, Monomial)> {
        let exponent = self.degree_in(var);
        if exponent == 0 {
            return None;
        }
        let reduced = self
            .0
            .iter()
            .filter_map(|&(v, e)| match v == var {
                true if e == 1 => None,
                true => Some((v, e - 1)),
                false => Some((v, e)),
            })
            .collect();
        Some((exponent, Monomial(reduced)))
    }

    /// Lexicographic comparison, variable 0 most significant.
    pub fn lex_cmp(&self, other: &Monomial) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        let (mut i, mut j) = (0, 0);
        loop {
            match (a.get(i), b.get(j)) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some(&(va, ea)), Some(&(vb, eb))) => {
                    if va < vb {
                        return Ordering::Greater;
                    }
                    if va > vb {
                        return Ordering::Less;
                    }
                    if ea != eb {
                        return ea.cmp(&eb);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_degree()
            .cmp(&other.total_degree())
            .then_with(|| other.lex_cmp(self))
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pairs: &[(usize, u32)]) -> Monomial {
        Monomial::from_pairs(pairs.to_vec())
    }

    #[test]
    fn canonical_construction() {
        assert_eq!(m(&[(2, 1), (0, 3), (2, 2), (1, 0)]).pairs(), &[(0, 3), (2, 3)]);
        assert!(m(&[(4, 0)]).is_one());
    }

    #[test]
    fn multiply_and_divide() {
        let a = m(&[(0, 2), (2, 1)]);
        let b = m(&[(1, 1), (2, 3)]);
        let ab = a.checked_mul(&b).unwrap();
        assert_eq!(ab.pairs(), &[(0, 2), (1, 1), (2, 4)]);
        assert_eq!(ab.div(&a), Some(b.clone()));
        assert_eq!(ab.div(&b), Some(a.clone()));
        assert_eq!(a.div(&b), None);
        assert_eq!(a.div(&a), Some(Monomial::one()));
        assert_eq!(m(&[(1, 1)]).div(&m(&[(0, 1)])), None);
    }

    #[test]
    fn exponent_overflow_is_detected() {
        let big = m(&[(0, u32::MAX), (1, 1)]);
        assert_eq!(big.checked_mul(&m(&[(0, 1)])), None);
        assert_eq!(big.checked_mul(&m(&[(1, 1)])).unwrap().pairs(), &[(0, u32::MAX), (1, 2)]);
        assert_eq!(m(&[(0, 65_536)]).checked_pow(65_536), None);
        assert_eq!(m(&[(0, 2), (3, 1)]).checked_pow(3).unwrap().pairs(), &[(0, 6), (3, 3)]);
        assert!(big.checked_pow(0).unwrap().is_one());
        assert_eq!(big.total_degree(), u64::from(u32::MAX) + 1);
        assert_eq!(m(&[(0, u32::MAX), (0, 7)]).pairs(), &[(0, u32::MAX)]);
    }

    #[test]
    fn graded_order_lists_constant_then_linear_terms() {
        let mut monomials = vec![
            m(&[(0, 1), (1, 1)]),
            m(&[(1, 1)]),
            Monomial::one(),
            m(&[(0, 1)]),
            m(&[(1, 2)]),
            m(&[(0, 2)]),
        ];
        monomials.sort();
        let expected = vec![
            Monomial::one(),
            m(&[(0, 1)]),
            m(&[(1, 1)]),
            m(&[(0, 2)]),
            m(&[(0, 1), (1, 1)]),
            m(&[(1, 2)]),
        ];
        assert_eq!(monomials, expected);
    }

    #[test]
    fn lex_order_prefers_earlier_variables() {
        assert_eq!(m(&[(0, 1)]).lex_cmp(&m(&[(1, 5)])), Ordering::Greater);
        assert_eq!(m(&[(0, 2)]).lex_cmp(&m(&[(0, 1), (1, 1)])), Ordering::Greater);
        assert_eq!(Monomial::one().lex_cmp(&m(&[(3, 1)])), Ordering::Less);
        assert_eq!(m(&[(0, 1), (2, 1)]).lex_cmp(&m(&[(0, 1), (1, 1)])), Ordering::Less);
    }

    #[test]
    fn derivative_and_split() {
        let a = m(&[(0, 3), (1, 1)]);
        assert_eq!(a.derivative(0), Some((3, m(&[(0, 2), (1, 1)]))));
        assert_eq!(a.derivative(1), Some((1, m(&[(0, 3)]))));
        assert_eq!(a.derivative(2), None);
        assert_eq!(a.split_off(0), (3, m(&[(1, 1)])));
        assert_eq!(m(&[(2, 1)]).as_linear(), Some(2));
        assert_eq!(m(&[(2, 2)]).as_linear(), None);
    }
}
