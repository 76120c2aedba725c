#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// error type of the algebra engine
pub mod algebra_error;
/// exact rational coefficients: literal conversion, float coercion, rational gcd
pub mod exact_field;
/// ordered variable lists shared between polynomials
pub mod variables;
/// sparse monomials and monomial orders
pub mod monomial;
///____________________________________________________________________________________________________________________________
/// # Sparse polynomials
/// exact multivariate polynomials over the rationals: arithmetic, degrees, evaluation, substitution,
/// symbolic and automatic differentiation, linear projection
///# Example
/// ```
/// use RustedExactAlgebra::symbolic::sparse_polynomial::SparsePolynomial;
/// use RustedExactAlgebra::symbolic::exact_field::qq_int;
/// use std::collections::HashMap;
/// let vars = ["x", "y"];
/// let p = SparsePolynomial::from_string("1 + x/2 + 3*y + 5*x*y", &vars).unwrap();
/// println!("p = {}", p);
/// let values = HashMap::from([("x".to_string(), qq_int(2))]);
/// // p(2, y) = 2 + 13*y, a polynomial in y alone
/// assert_eq!(p.eval(&values).to_string(), "2 + 13*y");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod sparse_polynomial;
/// exact division, gcd and lcm of sparse polynomials
pub mod polynomial_division;
///____________________________________________________________________________________________________________________________
/// # Rational functions
/// fractions of sparse polynomials, reduced when built
///# Example
/// ```
/// use RustedExactAlgebra::symbolic::rational_function::RationalFunction;
/// let f = RationalFunction::from_string("x/(x + y)", &["x", "y"]).unwrap();
/// let df_dx = f.derivative("x");
/// assert!(df_dx.equals_expression("y/(x + y)^2").unwrap());
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod rational_function;
/// constant | polynomial | rational function, with mixed arithmetic
pub mod algebraic_value;
///____________________________________________________________________________________________________________________________
/// # Expression parser
/// infix text to algebraic values
///# Example
/// ```
/// use RustedExactAlgebra::symbolic::parse_rational::parse_expression;
/// use RustedExactAlgebra::symbolic::variables::VariableList;
/// let vars = VariableList::from(&["x", "y"]);
/// let value = parse_expression("(x^2 - y^2)/(x - y)", &vars).unwrap();
/// assert_eq!(value.to_string(), "x + y");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_rational;
/// dual numbers for forward-mode automatic differentiation
pub mod dual_number;
/// exact sparse vectors, the linear part of a polynomial
pub mod sparse_vector;
