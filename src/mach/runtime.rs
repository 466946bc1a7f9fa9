use super::{Console, Environment, Transfer};
use crate::error;
use crate::lang::ast::Statement;
use crate::lang::{render, Error, Program};
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// ## Program execution
///
/// Walks the program in line number order, one statement per step.
/// GOTO and a continuing NEXT redirect the walk; a NEXT returning to
/// its FOR resumes on the line after it so the loop is not reset.

#[derive(Debug, Default, Clone)]
pub struct Runtime {
    max_steps: Option<usize>,
    trace: bool,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    pub fn max_steps(mut self, max_steps: usize) -> Runtime {
        self.max_steps = Some(max_steps);
        self
    }

    /// Writes `Executing line N: ...` to the console before each statement.
    pub fn trace(mut self, trace: bool) -> Runtime {
        self.trace = trace;
        self
    }

    /// Execution stops with a break error once the flag is set.
    /// The flag is cleared when the break is reported.
    pub fn interrupt(mut self, interrupt: Arc<AtomicBool>) -> Runtime {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn execute(
        &self,
        program: &Program,
        env: &mut Environment,
        console: &mut dyn Console,
    ) -> Result<()> {
        env.begin();
        let line_numbers = program.line_numbers();
        let mut index = 0;
        let mut steps = 0;
        while let Some(&line_number) = line_numbers.get(index) {
            if let Some(max_steps) = self.max_steps {
                if steps >= max_steps {
                    return Err(error!(ExecutionLimit;
                        "execution limit exceeded: maximum {} steps reached", max_steps
                    ));
                }
            }
            if self.interrupted() {
                return Err(error!(Break).in_line_number(line_number));
            }
            let statement = match program.get(line_number) {
                Some(statement) => statement,
                None => break,
            };
            env.set_program_counter(line_number);
            if self.trace {
                console.trace(&format!("Executing line {}: {}", line_number, render(statement)))?;
            }
            trace!("{} {:?}", line_number, statement);
            let result = statement.execute(env, console);
            steps += 1;
            result.map_err(|e| e.in_line_number(line_number))?;
            if env.is_ended() {
                break;
            }
            match env.take_transfer() {
                Transfer::None => index += 1,
                Transfer::Jump => {
                    let target = env.program_counter();
                    index = match program.index_of(target) {
                        Some(index) => index,
                        None => {
                            return Err(error!(UndefinedLine;
                                "line number {} does not exist", target
                            )
                            .in_line_number(line_number))
                        }
                    };
                }
                Transfer::Loop => {
                    let target = env.program_counter();
                    index = match program.index_of(target) {
                        Some(index) => match program.get(target) {
                            Some(Statement::For(..)) => index + 1,
                            _ => index,
                        },
                        None => break,
                    };
                }
            }
        }
        debug!("finished after {} steps", steps);
        Ok(())
    }

    fn interrupted(&self) -> bool {
        match &self.interrupt {
            Some(flag) => flag.swap(false, Ordering::SeqCst),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;
    use crate::mach::{Transcript, Val};

    fn run(runtime: &Runtime, src: &str) -> (Result<()>, Environment, Transcript) {
        let program: Program = match src.parse() {
            Ok(p) => p,
            Err(e) => panic!("{}", e),
        };
        let mut env = Environment::with_seed(1);
        let mut console = Transcript::new();
        let result = runtime.execute(&program, &mut env, &mut console);
        (result, env, console)
    }

    #[test]
    fn test_for_next() {
        let src = "10 FOR I = 1 TO 3\n20 PRINT I\n30 NEXT I\n";
        let (result, env, console) = run(&Runtime::new(), src);
        result.unwrap();
        assert_eq!(console.lines(), vec!["1", "2", "3"]);
        assert!(env.frames().is_empty());
        assert_eq!(env.get("I"), Val::Number(4.0));
    }

    #[test]
    fn test_goto_limit() {
        let (result, _, console) = run(&Runtime::new().max_steps(1000).trace(true), "10 GOTO 10");
        let e = result.unwrap_err();
        assert_eq!(e.code(), ErrorCode::ExecutionLimit);
        assert_eq!(
            e.to_string(),
            "execution limit exceeded: maximum 1000 steps reached"
        );
        assert_eq!(console.traces().len(), 1000);
        assert_eq!(console.traces()[0], "Executing line 10: GOTO 10");
    }

    #[test]
    fn test_undefined_line() {
        let (result, _, _) = run(&Runtime::new(), "10 GOTO 99");
        assert_eq!(
            result.unwrap_err().to_string(),
            "runtime error at line 10: line number 99 does not exist"
        );
    }

    #[test]
    fn test_end_stops() {
        let (result, _, console) = run(&Runtime::new(), "10 PRINT 1\n20 END\n30 PRINT 2");
        result.unwrap();
        assert_eq!(console.output(), "1\n");
    }

    #[test]
    fn test_nested_goto_is_a_jump() {
        let src = "10 X = X + 1\n20 IF X < 3 THEN GOTO 10\n30 PRINT X";
        let (result, _, console) = run(&Runtime::new(), src);
        result.unwrap();
        assert_eq!(console.output(), "3\n");
    }

    #[test]
    fn test_interrupt() {
        let flag = Arc::new(AtomicBool::new(true));
        let (result, _, _) = run(&Runtime::new().interrupt(flag.clone()), "10 GOTO 10");
        let e = result.unwrap_err();
        assert_eq!(e.code(), ErrorCode::Break);
        assert_eq!(e.line_number(), Some(10));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_runtime_error_halts() {
        let (result, _, console) = run(&Runtime::new(), "10 PRINT 1\n20 PRINT 1 / 0\n30 PRINT 3");
        assert_eq!(
            result.unwrap_err().to_string(),
            "runtime error at line 20: division by zero"
        );
        assert_eq!(console.output(), "1\n");
    }
}
