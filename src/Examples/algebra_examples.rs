// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::settings::AlgebraSettings;
use crate::symbolic::algebra_error::AlgebraResult;
use crate::symbolic::exact_field::{QQ, qq, qq_int};
use crate::symbolic::parse_rational::parse_expression;
use crate::symbolic::rational_function::RationalFunction;
use crate::symbolic::sparse_polynomial::SparsePolynomial;
use crate::symbolic::variables::VariableList;
use std::collections::HashMap;

fn point(entries: &[(&str, QQ)]) -> HashMap<String, QQ> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

pub fn algebra_examples(example: usize) -> AlgebraResult<()> {
    let settings = AlgebraSettings::default();
    settings.init_logging()?;
    match example {
        0 => {
            // POLYNOMIALS
            let vars = VariableList::from(&["x", "y"]);
            // parse a polynomial; coefficients are exact rationals
            let p = SparsePolynomial::from_string("1 + x/2 + 3*y + 5*x*y", &vars)?;
            println!("p = {}, degree {}", p, p.degree());
            for (monomial, coefficient) in p.terms() {
                println!("   term {:?} with coefficient {}", monomial, coefficient);
            }
            let q = SparsePolynomial::from_string("x - y", &vars)?;
            println!("p*q = {}", &p * &q);
            println!("(x - y)^3 = {}", q.pow(3)?);
            // partially evaluate: y = 2
            let at_y = p.eval(&point(&[("y", qq_int(2))]));
            println!("p(x, 2) = {} over variables {:?}", at_y, at_y.variables());
            // symbolic derivative
            println!("dp/dx = {}", p.derivative("x"));
        }
        1 => {
            // DIVISION AND GCD
            let vars = VariableList::from(&["x", "y"]);
            let cubic = SparsePolynomial::from_string("x**3 + 3*x**2 + 4*x + 5", &vars)?;
            let linear = SparsePolynomial::from_string("x + 1", &vars)?;
            let (quotient, remainder) = cubic.div_rem(&linear)?;
            println!("{} = ({})*({}) + {}", cubic, quotient, linear, remainder);
            let a = SparsePolynomial::from_string("x^2 - y^2", &vars)?;
            let b = SparsePolynomial::from_string("x^2 + 2*x*y + y^2", &vars)?;
            println!("gcd = {}", SparsePolynomial::gcd(&[a.clone(), b.clone()])?);
            println!("lcm = {}", SparsePolynomial::lcm(&[a.clone(), b.clone()])?);
            // exact quotient becomes a polynomial, otherwise a reduced fraction
            println!("a / b = {}", a.true_div(&b)?);
        }
        2 => {
            // RATIONAL FUNCTIONS
            let vars = VariableList::from(&["x", "y", "z"]);
            let f = RationalFunction::from_string("x/(y*z**2) + 1/z", &vars)?;
            println!("f = {}", f);
            println!("df/dz = {}", f.derivative("z"));
            let values = point(&[("y", qq_int(1)), ("z", qq_int(2))]);
            println!("f(x, 1, 2) = {}", f.eval(&values)?);
            match f.eval(&point(&[("z", qq_int(0))])) {
                Ok(value) => println!("f at z = 0: {}", value),
                Err(e) => println!("f at z = 0: {}", e),
            }
        }
        3 => {
            // AUTOMATIC DIFFERENTIATION
            let vars = VariableList::from(&["x", "y"]);
            let f = RationalFunction::from_string("(x^2*y + 1)/(x - y)", &vars)?;
            let values = point(&[("x", qq_int(3)), ("y", qq(1, 2))]);
            let dual = f.automated_diff(&values)?;
            println!("value and gradient at (3, 1/2): {}", dual);
            println!("as floats {:?}", dual.to_f64());
            for name in vars.names() {
                println!("symbolic d/d{} = {}", name, f.derivative(name).eval(&values)?);
            }
        }
        4 => {
            // LINEAR PROJECTION AND LAMBDIFY
            let vars = VariableList::from(&["a", "b", "c"]);
            let p = SparsePolynomial::from_string("2*a - c/3 + 7 + a*b", &vars)?;
            let linear = p.linear_part_as_vec();
            println!("linear part of {} is {}", p, linear);
            println!("as sprs vector {:?}", linear.to_csvec());
            let f = p.lambdify();
            println!("p(1, 2, 3) = {}", f(&[1.0, 2.0, 3.0]));
            let generic = parse_expression("(a + b)^2 - a^2 - 2*a*b", &vars)?;
            println!("(a + b)^2 - a^2 - 2*a*b = {}", generic);
            // float coefficients are converted exactly; the policy decides what happens to NaN
            let form = settings.linear_form_from_f64(&[0.1, 0.0, -2.5], &vars)?;
            println!("linear form from floats: {}", form);
            match settings.coerce(f64::NAN) {
                Ok(value) => println!("NaN coerced to {}", value),
                Err(e) => println!("strict coercion: {}", e),
            }
            let lenient = AlgebraSettings::from_toml_str("[algebra]\nstrict_coercion = false\n")?;
            println!("lenient coercion of NaN: {}", lenient.coerce(f64::NAN)?);
        }
        _ => {
            println!("example {} does not exist", example);
        }
    }
    Ok(())
}
