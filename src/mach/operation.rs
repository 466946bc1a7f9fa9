use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Comparison operators. Both sides must have the same type and
/// the result is -1 for true, 0 for false.
pub struct Operation {}

impl Operation {
    pub fn equal(lhs: &Val, rhs: &Val) -> Result<Val> {
        Operation::compare(lhs, rhs, |l, r| l == r, |l, r| l == r)
    }

    pub fn not_equal(lhs: &Val, rhs: &Val) -> Result<Val> {
        Operation::compare(lhs, rhs, |l, r| l != r, |l, r| l != r)
    }

    pub fn less(lhs: &Val, rhs: &Val) -> Result<Val> {
        Operation::compare(lhs, rhs, |l, r| l < r, |l, r| l < r)
    }

    pub fn less_equal(lhs: &Val, rhs: &Val) -> Result<Val> {
        Operation::compare(lhs, rhs, |l, r| l <= r, |l, r| l <= r)
    }

    pub fn greater(lhs: &Val, rhs: &Val) -> Result<Val> {
        Operation::compare(lhs, rhs, |l, r| l > r, |l, r| l > r)
    }

    pub fn greater_equal(lhs: &Val, rhs: &Val) -> Result<Val> {
        Operation::compare(lhs, rhs, |l, r| l >= r, |l, r| l >= r)
    }

    fn compare(
        lhs: &Val,
        rhs: &Val,
        number: fn(f64, f64) -> bool,
        string: fn(&str, &str) -> bool,
    ) -> Result<Val> {
        let truth = match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => number(*l, *r),
            (Val::String(l), Val::String(r)) => string(l.as_str(), r.as_str()),
            _ => return Err(error!(TypeMismatch)),
        };
        Ok(Val::Number(if truth { -1.0 } else { 0.0 }))
    }
}
