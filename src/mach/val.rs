use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime value
///
/// A variable's type is whatever it last stored.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(String),
}

impl Val {
    pub fn is_number(&self) -> bool {
        matches!(self, Val::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Val::String(_))
    }

    pub fn to_number(&self) -> Result<f64> {
        match self {
            Val::Number(n) => Ok(*n),
            Val::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| error!(CannotConvert; "cannot convert string '{}' to number", s)),
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Two strings concatenate. Otherwise both sides are tried as numbers;
    /// a non-numeric string added to a number is an error.
    pub fn add(&self, rhs: &Val) -> Result<Val> {
        use Val::*;
        if let (String(l), String(r)) = (self, rhs) {
            return Ok(String(format!("{}{}", l, r)));
        }
        match (self.to_number(), rhs.to_number()) {
            (Ok(l), Ok(r)) => Ok(Number(l + r)),
            (Err(e), _) if self.is_string() && rhs.is_number() => Err(e),
            (_, Err(e)) if rhs.is_string() && self.is_number() => Err(e),
            _ => Ok(String(format!("{}{}", self, rhs))),
        }
    }

    pub fn subtract(&self, rhs: &Val) -> Result<Val> {
        let (l, r) = self.numbers(rhs, "subtract")?;
        Ok(Val::Number(l - r))
    }

    pub fn multiply(&self, rhs: &Val) -> Result<Val> {
        let (l, r) = self.numbers(rhs, "multiply")?;
        Ok(Val::Number(l * r))
    }

    pub fn divide(&self, rhs: &Val) -> Result<Val> {
        let (l, r) = self.numbers(rhs, "divide")?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Number(l / r))
    }

    pub fn power(&self, rhs: &Val) -> Result<Val> {
        let (l, r) = self.numbers(rhs, "exponentiate")?;
        Ok(Val::Number(l.powf(r)))
    }

    fn numbers(&self, rhs: &Val, operation: &str) -> Result<(f64, f64)> {
        match (self, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok((*l, *r)),
            _ => Err(error!(TypeMismatch; "cannot {} strings", operation)),
        }
    }

    pub fn equals(&self, rhs: &Val) -> bool {
        self.compare(rhs) == Ordering::Equal
    }

    /// Loose ordering: mixed types compare as numbers when both convert,
    /// otherwise as their printed text.
    pub fn compare(&self, rhs: &Val) -> Ordering {
        use Val::*;
        match (self, rhs) {
            (Number(l), Number(r)) => l.partial_cmp(r).unwrap_or(Ordering::Equal),
            (String(l), String(r)) => l.cmp(r),
            _ => match (self.to_number(), rhs.to_number()) {
                (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
                _ => self.to_string().cmp(&rhs.to_string()),
            },
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{}", format_number(*n)),
            Val::String(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest round-trip digits; exponent form below 1e-4 and from 1e6 up.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let sci = format!("{:e}", n);
    if let Some((mantissa, exp)) = sci.split_once('e') {
        if let Ok(exp) = exp.parse::<i32>() {
            if exp < -4 || exp >= 6 {
                let sign = if exp < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exp.abs());
            }
        }
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(s: &str) -> Val {
        Val::String(s.to_string())
    }

    #[test]
    fn test_format_number() {
        assert_eq!(Val::Number(4.0).to_string(), "4");
        assert_eq!(Val::Number(-2.5).to_string(), "-2.5");
        assert_eq!(Val::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Val::Number(123456.0).to_string(), "123456");
        assert_eq!(Val::Number(1234567.0).to_string(), "1.234567e+06");
        assert_eq!(Val::Number(0.0001).to_string(), "0.0001");
        assert_eq!(Val::Number(0.00001).to_string(), "1e-05");
        assert_eq!(Val::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn test_to_number() {
        assert_eq!(s(" 42 ").to_number().unwrap(), 42.0);
        let e = s("abc").to_number().unwrap_err();
        assert_eq!(e.to_string(), "cannot convert string 'abc' to number");
        assert!(s("").to_number().is_err());
    }

    #[test]
    fn test_add() {
        assert_eq!(Val::Number(5.0).add(&s("3")).unwrap(), Val::Number(8.0));
        assert_eq!(s("3").add(&Val::Number(5.0)).unwrap(), Val::Number(8.0));
        assert_eq!(s("hello").add(&s(" world")).unwrap(), s("hello world"));
        assert_eq!(s("1").add(&s("2")).unwrap(), s("12"));
        assert!(Val::Number(5.0).add(&s("x")).is_err());
        assert!(s("x").add(&Val::Number(5.0)).is_err());
    }

    #[test]
    fn test_strict_arithmetic() {
        let e = s("hello").subtract(&s("world")).unwrap_err();
        assert_eq!(e.to_string(), "cannot subtract strings");
        assert!(Val::Number(2.0).multiply(&s("3")).is_err());
        assert_eq!(
            Val::Number(7.0).divide(&Val::Number(2.0)).unwrap(),
            Val::Number(3.5)
        );
        let e = Val::Number(1.0).divide(&Val::Number(0.0)).unwrap_err();
        assert_eq!(e.to_string(), "division by zero");
        assert_eq!(
            Val::Number(2.0).power(&Val::Number(10.0)).unwrap(),
            Val::Number(1024.0)
        );
    }

    #[test]
    fn test_compare() {
        assert_eq!(Val::Number(1.0).compare(&Val::Number(2.0)), Ordering::Less);
        assert_eq!(s("b").compare(&s("a")), Ordering::Greater);
        assert!(Val::Number(10.0).equals(&s("10")));
        assert_eq!(Val::Number(10.0).compare(&s("9")), Ordering::Greater);
        assert_eq!(Val::Number(1.0).compare(&s("x")), Ordering::Less);
    }
}
