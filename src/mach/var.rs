use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Keys are already uppercased. Nothing is declared; reading an unset
/// name yields zero, or the empty string for names ending in `$`.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn fetch(&self, var_name: &str) -> Val {
        match self.vars.get(var_name) {
            Some(val) => val.clone(),
            None => {
                if var_name.ends_with('$') {
                    Val::String("".into())
                } else {
                    Val::Number(0.0)
                }
            }
        }
    }

    pub fn store(&mut self, var_name: &str, value: Val) -> Result<()> {
        match self.vars.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                if self.vars.len() >= u16::max_value() as usize {
                    return Err(error!(OutOfMemory; "too many variables"));
                }
                self.vars.insert(var_name.into(), value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_on_read() {
        let var = Var::new();
        assert_eq!(var.fetch("Y"), Val::Number(0.0));
        assert_eq!(var.fetch("EMPTY$"), Val::String("".into()));
        assert!(var.is_empty());
    }

    #[test]
    fn test_retype() {
        let mut var = Var::new();
        var.store("A", Val::Number(1.0)).unwrap();
        var.store("A", Val::String("one".into())).unwrap();
        assert_eq!(var.fetch("A"), Val::String("one".into()));
        assert_eq!(var.len(), 1);
    }
}
