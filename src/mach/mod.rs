/*!
## Rust Machine Module

Values, variables and the interpreter that runs a parsed program.

*/

mod console;
mod env;
mod exec;
mod function;
mod listing;
mod operation;
mod runtime;
mod stack;
mod val;
mod var;

pub use console::{Console, Terminal, Transcript};
pub use env::{Environment, Frame, Transfer};
pub use function::Function;
pub use listing::Listing;
pub use operation::Operation;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;
