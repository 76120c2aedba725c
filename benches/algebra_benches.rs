use RustedExactAlgebra::Examples::algebra_examples::algebra_examples;
use RustedExactAlgebra::symbolic::exact_field::{QQ, qq, qq_int};
use RustedExactAlgebra::symbolic::rational_function::RationalFunction;
use RustedExactAlgebra::symbolic::sparse_polynomial::SparsePolynomial;
use RustedExactAlgebra::symbolic::variables::VariableList;
use criterion::{Criterion, criterion_group, criterion_main};
use std::collections::HashMap;
use std::hint::black_box;

const DENSE: &str = "(1 + x + 2*y - z/3 + x*y*z)^4";

fn bench_parsing(c: &mut Criterion) {
    let vars = VariableList::from(&["x", "y", "z"]);
    c.bench_function("parse dense polynomial", |b| {
        b.iter(|| SparsePolynomial::from_string(black_box(DENSE), &vars))
    });
    c.bench_function("parse rational function", |b| {
        b.iter(|| {
            RationalFunction::from_string(black_box("(x^2 - y^2)/(x + y) + z/(x - y)"), &vars)
        })
    });
}

fn bench_multiplication(c: &mut Criterion) {
    let vars = VariableList::from(&["x", "y", "z"]);
    let p = SparsePolynomial::from_string("(1 + x + y + z)^5", &vars).unwrap();
    let q = SparsePolynomial::from_string("(1 - x + 2*y - z)^5", &vars).unwrap();
    c.bench_function("multiply quintics", |b| b.iter(|| black_box(&p) * black_box(&q)));
}

fn bench_fraction_reduction(c: &mut Criterion) {
    let vars = VariableList::from(&["x", "y", "z"]);
    let common = SparsePolynomial::from_string("(x + y - z)^2", &vars).unwrap();
    let numer = &SparsePolynomial::from_string("x^3 - y*z + 1", &vars).unwrap() * &common;
    let denom = &SparsePolynomial::from_string("x*y + z^2 - 2", &vars).unwrap() * &common;
    c.bench_function("reduce fraction with common factor", |b| {
        b.iter(|| RationalFunction::new(black_box(numer.clone()), black_box(denom.clone())))
    });
}

fn bench_automatic_differentiation(c: &mut Criterion) {
    let vars = VariableList::from(&["x", "y", "z"]);
    let p = SparsePolynomial::from_string(DENSE, &vars).unwrap();
    let point: HashMap<String, QQ> = [
        ("x".to_string(), qq(1, 2)),
        ("y".to_string(), qq_int(-2)),
        ("z".to_string(), qq(3, 7)),
    ]
    .into();
    c.bench_function("automated diff of dense polynomial", |b| {
        b.iter(|| p.automated_diff(black_box(&point)))
    });
    c.bench_function("symbolic gradient of dense polynomial", |b| {
        b.iter(|| {
            vars.names()
                .iter()
                .map(|name| p.derivative(name))
                .collect::<Vec<_>>()
        })
    });
}

fn bench_demos(c: &mut Criterion) {
    c.bench_function("division and gcd demo", |b| b.iter(|| algebra_examples(black_box(1))));
    c.bench_function("automatic differentiation demo", |b| {
        b.iter(|| algebra_examples(black_box(3)))
    });
}

criterion_group!(
    benches,
    bench_parsing,
    bench_multiplication,
    bench_fraction_reduction,
    bench_automatic_differentiation,
    bench_demos
);
criterion_main!(benches);
