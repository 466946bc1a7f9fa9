/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the BASIC language.

*/

#[macro_use]
mod error;
mod lex;
mod parse;
mod program;
mod render;

pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::Position;
pub use lex::tokenize;
pub use lex::Lexer;
pub use parse::parse;
pub use parse::Parser;
pub use program::Program;
pub use render::render;

pub type LineNumber = u32;

/// Line numbers run from 1 to this value inclusive.
pub const MAX_LINE_NUMBER: LineNumber = 99999;
