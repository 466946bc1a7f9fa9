use super::{Environment, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Param {
    Number,
    String,
}

/// ## Built-in functions
///
/// Every call is checked for argument count and argument types
/// before the function body runs.

pub struct Function {
    name: &'static str,
    params: &'static [Param],
    body: fn(&mut Environment, &[Val]) -> Result<Val>,
}

static FUNCTIONS: [Function; 10] = [
    Function {
        name: "ABS",
        params: &[Param::Number],
        body: Function::abs,
    },
    Function {
        name: "COS",
        params: &[Param::Number],
        body: Function::cos,
    },
    Function {
        name: "INT",
        params: &[Param::Number],
        body: Function::int,
    },
    Function {
        name: "LEN",
        params: &[Param::String],
        body: Function::len,
    },
    Function {
        name: "MID$",
        params: &[Param::String, Param::Number, Param::Number],
        body: Function::mid,
    },
    Function {
        name: "RND",
        params: &[],
        body: Function::rnd,
    },
    Function {
        name: "SIN",
        params: &[Param::Number],
        body: Function::sin,
    },
    Function {
        name: "SQR",
        params: &[Param::Number],
        body: Function::sqr,
    },
    Function {
        name: "STR$",
        params: &[Param::Number],
        body: Function::str,
    },
    Function {
        name: "VAL",
        params: &[Param::String],
        body: Function::val,
    },
];

impl Function {
    pub fn lookup(name: &str) -> Option<&'static Function> {
        FUNCTIONS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn is_builtin(name: &str) -> bool {
        Function::lookup(name).is_some()
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn call(&self, env: &mut Environment, args: &[Val]) -> Result<Val> {
        if args.len() != self.arity() {
            return Err(error!(ArgumentCount;
                "function {} expects {} argument(s), got {}",
                self.name,
                self.arity(),
                args.len()
            ));
        }
        for (index, param) in self.params.iter().enumerate() {
            match param {
                Param::Number => number(args, index).map(|_| ())?,
                Param::String => string(args, index).map(|_| ())?,
            }
        }
        (self.body)(env, args)
    }

    fn abs(_: &mut Environment, args: &[Val]) -> Result<Val> {
        Ok(Val::Number(number(args, 0)?.abs()))
    }

    fn cos(_: &mut Environment, args: &[Val]) -> Result<Val> {
        Ok(Val::Number(number(args, 0)?.cos()))
    }

    fn int(_: &mut Environment, args: &[Val]) -> Result<Val> {
        Ok(Val::Number(number(args, 0)?.trunc()))
    }

    fn len(_: &mut Environment, args: &[Val]) -> Result<Val> {
        Ok(Val::Number(string(args, 0)?.len() as f64))
    }

    fn mid(_: &mut Environment, args: &[Val]) -> Result<Val> {
        let bytes = string(args, 0)?.as_bytes();
        let start = number(args, 1)?.trunc();
        let length = number(args, 2)?.trunc();
        // A NaN start or length selects nothing.
        if start.is_nan() || length.is_nan() {
            return Ok(Val::String(String::new()));
        }
        if start < 1.0 || length <= 0.0 || start > bytes.len() as f64 {
            return Ok(Val::String(String::new()));
        }
        let begin = start as usize - 1;
        let end = (begin as f64 + length).min(bytes.len() as f64) as usize;
        Ok(Val::String(
            String::from_utf8_lossy(&bytes[begin..end]).into_owned(),
        ))
    }

    fn rnd(env: &mut Environment, _: &[Val]) -> Result<Val> {
        Ok(Val::Number(env.random()))
    }

    fn sin(_: &mut Environment, args: &[Val]) -> Result<Val> {
        Ok(Val::Number(number(args, 0)?.sin()))
    }

    fn sqr(_: &mut Environment, args: &[Val]) -> Result<Val> {
        let n = number(args, 0)?;
        if n < 0.0 {
            return Err(error!(IllegalFunctionCall; "SQR of negative number"));
        }
        Ok(Val::Number(n.sqrt()))
    }

    fn str(_: &mut Environment, args: &[Val]) -> Result<Val> {
        Ok(Val::String(Val::Number(number(args, 0)?).to_string()))
    }

    fn val(_: &mut Environment, args: &[Val]) -> Result<Val> {
        let s = string(args, 0)?;
        Ok(Val::Number(Val::String(s.to_string()).to_number()?))
    }
}

fn number(args: &[Val], index: usize) -> Result<f64> {
    match args.get(index) {
        Some(Val::Number(n)) => Ok(*n),
        _ => Err(error!(TypeMismatch; "argument {} must be numeric", index + 1)),
    }
}

fn string(args: &[Val], index: usize) -> Result<&str> {
    match args.get(index) {
        Some(Val::String(s)) => Ok(s),
        _ => Err(error!(TypeMismatch; "argument {} must be string", index + 1)),
    }
}
