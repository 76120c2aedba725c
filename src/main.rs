#![allow(non_snake_case)]
use RustedExactAlgebra::Examples::algebra_examples::algebra_examples;
use std::process::ExitCode;

fn main() -> ExitCode {
    let example = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(0);
    match algebra_examples(example) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("example {} failed: {}", example, e);
            ExitCode::FAILURE
        }
    }
}
