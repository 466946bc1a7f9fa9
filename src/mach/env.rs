use super::{Stack, Val, Var};
use crate::lang::ast::Ident;
use crate::lang::{Error, LineNumber};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Result<T> = std::result::Result<T, Error>;

/// The saved state of one active FOR loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub ident: Ident,
    pub current: f64,
    pub end: f64,
    pub step: f64,
    pub line_number: LineNumber,
}

impl Frame {
    pub fn is_finished(&self) -> bool {
        if self.step > 0.0 {
            self.current > self.end
        } else {
            self.current < self.end
        }
    }
}

/// How the last statement moved the program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    None,
    Jump,
    Loop,
}

/// ## Execution state for one run of a program

#[derive(Debug)]
pub struct Environment {
    vars: Var,
    program_counter: LineNumber,
    frames: Stack<Frame>,
    seed: u64,
    rng: StdRng,
    transfer: Transfer,
    ended: bool,
}

impl Default for Environment {
    fn default() -> Environment {
        Environment::new()
    }
}

impl Environment {
    /// Seeded from the wall clock.
    pub fn new() -> Environment {
        let now = chrono::Utc::now();
        let seed = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp()) as u64;
        Environment::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Environment {
        debug!("random seed {}", seed);
        Environment {
            vars: Var::new(),
            program_counter: 0,
            frames: Stack::new("too many nested FOR loops"),
            seed,
            rng: StdRng::seed_from_u64(seed),
            transfer: Transfer::None,
            ended: false,
        }
    }

    pub fn get(&self, name: &str) -> Val {
        self.vars.fetch(&name.to_ascii_uppercase())
    }

    pub fn set(&mut self, name: &str, value: Val) -> Result<()> {
        self.vars.store(&name.to_ascii_uppercase(), value)
    }

    pub fn program_counter(&self) -> LineNumber {
        self.program_counter
    }

    pub fn set_program_counter(&mut self, line_number: LineNumber) {
        self.program_counter = line_number;
    }

    /// Unconditional transfer; counts as a jump even to the current line.
    pub fn jump(&mut self, line_number: LineNumber) {
        self.program_counter = line_number;
        self.transfer = Transfer::Jump;
    }

    /// Return to the FOR owning the loop frame.
    pub fn loop_to(&mut self, line_number: LineNumber) {
        self.program_counter = line_number;
        self.transfer = Transfer::Loop;
    }

    pub fn take_transfer(&mut self) -> Transfer {
        std::mem::replace(&mut self.transfer, Transfer::None)
    }

    pub fn frames(&self) -> &Stack<Frame> {
        &self.frames
    }

    pub fn push_frame(&mut self, frame: Frame) -> Result<()> {
        debug!("FOR {} at line {}", frame.ident, frame.line_number);
        self.frames.push(frame)
    }

    pub fn top_frame_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub fn pop_frame(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in [0, 1).
    pub fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Clears the per-run flags before a program starts.
    pub fn begin(&mut self) {
        self.ended = false;
        self.transfer = Transfer::None;
    }
}
