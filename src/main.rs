//! # BASIC
//!
//! Runs a line-numbered BASIC program from a file, or starts an
//! interactive shell when no file is given.

use clap::Parser;
use std::path::PathBuf;

mod term;

#[derive(Parser, Debug)]
#[command(name = "basic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Line-numbered BASIC interpreter", long_about = None)]
pub struct Args {
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print each line before it executes
    #[arg(long)]
    pub trace: bool,

    /// Stop a program after this many statements
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<usize>,

    /// Seed for RND
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    std::process::exit(term::main(&args));
}
