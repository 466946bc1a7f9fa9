//! # BASIC
//!
//! A line-numbered BASIC with unstructured control flow:
//! `GOTO`, `IF ... THEN` and `FOR ... NEXT`.
//!
//! ```
//! use basic::lang::Program;
//! use basic::mach::{Environment, Runtime, Transcript};
//!
//! let program: Program = "10 FOR I = 1 TO 3\n20 PRINT I\n30 NEXT I".parse().unwrap();
//! let mut console = Transcript::new();
//! Runtime::new()
//!     .max_steps(1000)
//!     .execute(&program, &mut Environment::with_seed(0), &mut console)
//!     .unwrap();
//! assert_eq!(console.output(), "1\n2\n3\n");
//! ```
//!
//! `lang` turns source text into a `Program`; `mach` runs it.

pub mod lang;
pub mod mach;
