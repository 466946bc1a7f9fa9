use super::ast::{Expression, Statement};
use crate::mach::Val;

const ELLIPSIS: &str = "...";

/// One-line rendering of a statement for execution traces.
/// Expressions nested deeper than one operator render as `...`.
pub fn render(statement: &Statement) -> String {
    use Statement::*;
    match statement {
        End => "END".to_string(),
        For(ident, from, to, step, _) => format!(
            "FOR {} = {} TO {} STEP {}",
            ident,
            expression(from),
            expression(to),
            expression(step)
        ),
        Goto(line) => format!("GOTO {}", line),
        If(predicate, then) => format!("IF {} THEN {}", expression(predicate), render(then)),
        Input(prompt, ident) => {
            if prompt.is_empty() {
                format!("INPUT {}", ident)
            } else {
                format!("INPUT \"{}\"; {}", prompt, ident)
            }
        }
        Let(ident, expr) => format!("{} = {}", ident, expression(expr)),
        Next(Some(ident)) => format!("NEXT {}", ident),
        Next(None) => "NEXT".to_string(),
        Print(exprs) => {
            if exprs.is_empty() {
                "PRINT".to_string()
            } else {
                let items: Vec<String> = exprs.iter().map(expression).collect();
                format!("PRINT {}", items.join(", "))
            }
        }
        Rem(text) => {
            if text.is_empty() {
                "REM".to_string()
            } else {
                format!("REM {}", text)
            }
        }
    }
}

fn expression(expr: &Expression) -> String {
    if let Some(s) = atom(expr) {
        return s;
    }
    match expr {
        Expression::Function(ident, args) => {
            if args.is_empty() {
                return ident.to_string();
            }
            let args: Option<Vec<String>> = args.iter().map(atom).collect();
            match args {
                Some(args) => format!("{}({})", ident, args.join(", ")),
                None => ELLIPSIS.to_string(),
            }
        }
        Expression::Paren(inner) => match atom(inner) {
            Some(s) => format!("({})", s),
            None => ELLIPSIS.to_string(),
        },
        _ => match (expr.operands(), expr.operator_str()) {
            (Some((lhs, rhs)), Some(op)) => match (atom(lhs), atom(rhs)) {
                (Some(l), Some(r)) => format!("{} {} {}", l, op, r),
                _ => ELLIPSIS.to_string(),
            },
            _ => ELLIPSIS.to_string(),
        },
    }
}

fn atom(expr: &Expression) -> Option<String> {
    match expr {
        Expression::Number(n) => Some(Val::Number(*n).to_string()),
        Expression::String(s) => Some(format!("\"{}\"", s)),
        Expression::Var(ident) => Some(ident.to_string()),
        _ => None,
    }
}
