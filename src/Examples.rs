//! examples of usage of RustedExactAlgebra
/// polynomials, fractions, derivatives and linear parts
pub mod algebra_examples;
