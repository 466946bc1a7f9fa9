use super::LineNumber;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    End,
    /// Loop variable, start, end, step and the line holding the FOR.
    For(Ident, Expression, Expression, Expression, LineNumber),
    Goto(LineNumber),
    If(Expression, Box<Statement>),
    /// Prompt (empty for the default) and destination.
    Input(Rc<str>, Ident),
    Let(Ident, Expression),
    Next(Option<Ident>),
    Print(Vec<Expression>),
    Rem(Rc<str>),
}

/// A variable or function name, uppercased. Names ending in `$`
/// default to the empty string instead of zero.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Plain(Rc<str>),
    String(Rc<str>),
}

impl Ident {
    pub fn new(name: &str) -> Ident {
        let name: Rc<str> = name.to_ascii_uppercase().into();
        if name.ends_with('$') {
            Ident::String(name)
        } else {
            Ident::Plain(name)
        }
    }

    pub fn name(&self) -> &Rc<str> {
        match self {
            Ident::Plain(s) | Ident::String(s) => s,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Ident::String(_))
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Ident {
        Ident::new(name)
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    String(Rc<str>),
    Var(Ident),
    Function(Ident, Vec<Expression>),
    Paren(Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    Less(Box<Expression>, Box<Expression>),
    LessEqual(Box<Expression>, Box<Expression>),
    Greater(Box<Expression>, Box<Expression>),
    GreaterEqual(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Left and right operands of binary and comparison operators.
    pub fn operands(&self) -> Option<(&Expression, &Expression)> {
        use Expression::*;
        match self {
            Power(l, r) | Multiply(l, r) | Divide(l, r) | Add(l, r) | Subtract(l, r)
            | Equal(l, r) | NotEqual(l, r) | Less(l, r) | LessEqual(l, r) | Greater(l, r)
            | GreaterEqual(l, r) => Some((l, r)),
            Number(_) | String(_) | Var(_) | Function(..) | Paren(_) => None,
        }
    }

    pub fn operator_str(&self) -> Option<&'static str> {
        use Expression::*;
        Some(match self {
            Power(..) => "^",
            Multiply(..) => "*",
            Divide(..) => "/",
            Add(..) => "+",
            Subtract(..) => "-",
            Equal(..) => "=",
            NotEqual(..) => "<>",
            Less(..) => "<",
            LessEqual(..) => "<=",
            Greater(..) => ">",
            GreaterEqual(..) => ">=",
            Number(_) | String(_) | Var(_) | Function(..) | Paren(_) => return None,
        })
    }
}
