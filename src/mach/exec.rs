use super::{Console, Environment, Frame, Function, Operation, Val};
use crate::error;
use crate::lang::ast::{Expression, Ident, Statement};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

impl Expression {
    pub fn evaluate(&self, env: &mut Environment) -> Result<Val> {
        match self {
            Expression::Number(n) => Ok(Val::Number(*n)),
            Expression::String(s) => Ok(Val::String(s.to_string())),
            Expression::Var(ident) => Ok(env.get(ident.name())),
            Expression::Paren(expr) => expr
                .evaluate(env)
                .map_err(|e| e.context("error evaluating parenthesized expression")),
            Expression::Function(ident, args) => {
                let function = match Function::lookup(ident.name()) {
                    Some(f) => f,
                    None => return Err(error!(UnknownFunction; "unknown function: {}", ident)),
                };
                let args = args
                    .iter()
                    .map(|arg| arg.evaluate(env))
                    .collect::<Result<Vec<Val>>>()?;
                function.call(env, &args)
            }
            Expression::Power(l, r) => binary(env, l, r, Val::power),
            Expression::Multiply(l, r) => binary(env, l, r, Val::multiply),
            Expression::Divide(l, r) => binary(env, l, r, Val::divide),
            Expression::Add(l, r) => binary(env, l, r, Val::add),
            Expression::Subtract(l, r) => binary(env, l, r, Val::subtract),
            Expression::Equal(l, r) => comparison(env, l, r, Operation::equal),
            Expression::NotEqual(l, r) => comparison(env, l, r, Operation::not_equal),
            Expression::Less(l, r) => comparison(env, l, r, Operation::less),
            Expression::LessEqual(l, r) => comparison(env, l, r, Operation::less_equal),
            Expression::Greater(l, r) => comparison(env, l, r, Operation::greater),
            Expression::GreaterEqual(l, r) => comparison(env, l, r, Operation::greater_equal),
        }
    }
}

fn binary(
    env: &mut Environment,
    lhs: &Expression,
    rhs: &Expression,
    op: fn(&Val, &Val) -> Result<Val>,
) -> Result<Val> {
    let l = lhs
        .evaluate(env)
        .map_err(|e| e.context("error evaluating left operand"))?;
    let r = rhs
        .evaluate(env)
        .map_err(|e| e.context("error evaluating right operand"))?;
    op(&l, &r)
}

fn comparison(
    env: &mut Environment,
    lhs: &Expression,
    rhs: &Expression,
    op: fn(&Val, &Val) -> Result<Val>,
) -> Result<Val> {
    let l = lhs.evaluate(env)?;
    let r = rhs.evaluate(env)?;
    op(&l, &r)
}

impl Statement {
    pub fn execute(&self, env: &mut Environment, console: &mut dyn Console) -> Result<()> {
        use Statement::*;
        match self {
            End => {
                env.end();
                Ok(())
            }
            For(ident, start, end, step, line_number) => {
                let start = start.evaluate(env)?;
                let end = end.evaluate(env)?;
                let step = step.evaluate(env)?;
                check_name(ident)?;
                let (start, end, step) = match (start, end, step) {
                    (Val::Number(s), Val::Number(e), Val::Number(t)) => (s, e, t),
                    _ => return Err(error!(TypeMismatch; "FOR values must be numeric")),
                };
                if step == 0.0 {
                    return Err(error!(StepZero));
                }
                env.set(ident.name(), Val::Number(start))?;
                env.push_frame(Frame {
                    ident: ident.clone(),
                    current: start,
                    end,
                    step,
                    line_number: *line_number,
                })
            }
            Goto(line_number) => {
                env.jump(*line_number);
                Ok(())
            }
            If(condition, then) => match condition.evaluate(env)? {
                Val::Number(n) if n != 0.0 => then.execute(env, console),
                Val::Number(_) => Ok(()),
                Val::String(_) => Err(error!(TypeMismatch)),
            },
            Input(prompt, ident) => {
                check_name(ident)?;
                if prompt.is_empty() {
                    console.write("? ")?;
                } else {
                    console.write(prompt)?;
                }
                let line = console.read_line()?;
                let value = if ident.is_string() {
                    Val::String(line)
                } else {
                    Val::Number(Val::String(line).to_number()?)
                };
                env.set(ident.name(), value)
            }
            Let(ident, expr) => {
                check_name(ident)?;
                let value = expr.evaluate(env)?;
                env.set(ident.name(), value)
            }
            Next(ident) => next(env, ident.as_ref()),
            Print(exprs) => {
                let mut items = Vec::with_capacity(exprs.len());
                for expr in exprs {
                    items.push(expr.evaluate(env)?.to_text());
                }
                console.write_line(&items.join(" "))?;
                Ok(())
            }
            Rem(_) => Ok(()),
        }
    }
}

fn check_name(ident: &Ident) -> Result<()> {
    if ident.name().is_empty() || ident.name().as_ref() == "$" {
        return Err(error!(InvalidVariable));
    }
    Ok(())
}

fn next(env: &mut Environment, ident: Option<&Ident>) -> Result<()> {
    let frame = match env.top_frame_mut() {
        Some(frame) => frame,
        None => return Err(error!(NextWithoutFor)),
    };
    if let Some(ident) = ident {
        if ident != &frame.ident {
            return Err(error!(NextWithoutFor;
                "NEXT {} without matching FOR {}", ident, ident
            ));
        }
    }
    frame.current += frame.step;
    let current = frame.current;
    let finished = frame.is_finished();
    let line_number = frame.line_number;
    let name = frame.ident.name().clone();
    env.set(&name, Val::Number(current))?;
    if finished {
        env.pop_frame();
    } else {
        env.loop_to(line_number);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{tokenize, ErrorCode, Parser};
    use crate::mach::{Transcript, Transfer};

    fn eval(s: &str) -> Result<Val> {
        let tokens = tokenize(s);
        let expr = Parser::new(&tokens).expression()?;
        expr.evaluate(&mut Environment::with_seed(1))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), Val::Number(14.0));
        assert_eq!(eval("2 ^ 3 ^ 2").unwrap(), Val::Number(512.0));
        assert_eq!(eval("10 - 5 - 2").unwrap(), Val::Number(3.0));
        assert_eq!(eval("(2 + 3) * 4").unwrap(), Val::Number(20.0));
        assert_eq!(eval("-2 ^ 2").unwrap(), Val::Number(4.0));
    }

    #[test]
    fn test_error_context() {
        let e = eval("1 + 2 / 0").unwrap_err();
        assert_eq!(e.code(), ErrorCode::DivisionByZero);
        assert_eq!(
            e.to_string(),
            "error evaluating right operand: division by zero"
        );
        let e = eval("(\"a\" - 1)").unwrap_err();
        assert_eq!(
            e.to_string(),
            "error evaluating parenthesized expression: cannot subtract strings"
        );
        let e = eval("FOO(1)").unwrap_err();
        assert_eq!(e.to_string(), "unknown function: FOO");
    }

    #[test]
    fn test_next_continues_then_pops() {
        let mut env = Environment::with_seed(1);
        let mut console = Transcript::new();
        let i = Ident::new("I");
        let one = || Expression::Number(1.0);
        Statement::For(i.clone(), one(), Expression::Number(2.0), one(), 10)
            .execute(&mut env, &mut console)
            .unwrap();
        env.set_program_counter(30);
        Statement::Next(Some(i.clone()))
            .execute(&mut env, &mut console)
            .unwrap();
        assert_eq!(env.take_transfer(), Transfer::Loop);
        assert_eq!(env.program_counter(), 10);
        env.set_program_counter(30);
        Statement::Next(None).execute(&mut env, &mut console).unwrap();
        assert_eq!(env.take_transfer(), Transfer::None);
        assert_eq!(env.program_counter(), 30);
        assert!(env.frames().is_empty());
        assert_eq!(env.get("I"), Val::Number(3.0));
    }

    #[test]
    fn test_next_mismatch() {
        let mut env = Environment::with_seed(1);
        let mut console = Transcript::new();
        let e = Statement::Next(None)
            .execute(&mut env, &mut console)
            .unwrap_err();
        assert_eq!(e.to_string(), "NEXT without FOR");
        Statement::For(
            Ident::new("I"),
            Expression::Number(1.0),
            Expression::Number(3.0),
            Expression::Number(1.0),
            10,
        )
        .execute(&mut env, &mut console)
        .unwrap();
        let e = Statement::Next(Some(Ident::new("J")))
            .execute(&mut env, &mut console)
            .unwrap_err();
        assert_eq!(e.to_string(), "NEXT J without matching FOR J");
    }

    #[test]
    fn test_step_zero_pushes_nothing() {
        let mut env = Environment::with_seed(1);
        let e = Statement::For(
            Ident::new("I"),
            Expression::Number(1.0),
            Expression::Number(3.0),
            Expression::Number(0.0),
            10,
        )
        .execute(&mut env, &mut Transcript::new())
        .unwrap_err();
        assert_eq!(e.code(), ErrorCode::StepZero);
        assert!(env.frames().is_empty());
    }

    #[test]
    fn test_print_joins_with_space() {
        let mut env = Environment::with_seed(1);
        let mut console = Transcript::new();
        Statement::Print(vec![
            Expression::String("A".into()),
            Expression::Number(1.5),
        ])
        .execute(&mut env, &mut console)
        .unwrap();
        Statement::Print(vec![]).execute(&mut env, &mut console).unwrap();
        assert_eq!(console.output(), "A 1.5\n\n");
    }

    #[test]
    fn test_string_condition_mismatch() {
        let mut env = Environment::with_seed(1);
        let e = Statement::If(Expression::String("x".into()), Box::new(Statement::End))
            .execute(&mut env, &mut Transcript::new())
            .unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
        assert!(!env.is_ended());
    }
}
