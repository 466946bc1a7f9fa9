#![allow(dead_code)]

use basic::lang::{Error, Program};
use basic::mach::{Environment, Runtime, Transcript};

pub const MAX_STEPS: usize = 10_000;

pub fn program(src: &str) -> Program {
    match src.parse() {
        Ok(program) => program,
        Err(error) => panic!("{}", error),
    }
}

pub fn run_with_input(src: &str, input: &[&str]) -> (Result<(), Error>, Transcript) {
    let program: Program = match src.parse() {
        Ok(program) => program,
        Err(error) => return (Err(error), Transcript::new()),
    };
    let mut console = Transcript::with_input(input.iter().copied());
    let result = Runtime::new().max_steps(MAX_STEPS).execute(
        &program,
        &mut Environment::with_seed(0),
        &mut console,
    );
    (result, console)
}

/// Output of a program that must succeed.
pub fn exec(src: &str) -> String {
    let (result, console) = run_with_input(src, &[]);
    if let Err(error) = result {
        panic!("{} (output so far {:?})", error, console.output());
    }
    console.output().to_string()
}

/// Error text of a program that must fail.
pub fn exec_err(src: &str) -> String {
    match run_with_input(src, &[]).0 {
        Ok(()) => panic!("expected an error from {:?}", src),
        Err(error) => error.to_string(),
    }
}
