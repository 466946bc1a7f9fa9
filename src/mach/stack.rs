use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector

pub struct Stack<T> {
    overflow_message: &'static str,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            vec: vec![],
        }
    }
    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.vec.last_mut()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.max_len() {
            return Err(error!(OutOfMemory; "{}", self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Option<T> {
        self.vec.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut s: Stack<u8> = Stack::new("TOO DEEP");
        s.push(1).unwrap();
        s.push(2).unwrap();
        assert_eq!(s.last(), Some(&2));
        if let Some(top) = s.last_mut() {
            *top = 3;
        }
        assert_eq!(s.pop(), Some(3));
        assert_eq!(s.len(), 1);
        assert_eq!(format!("{:?}", s), "[1]");
    }

    #[test]
    fn test_overflow() {
        let mut s: Stack<()> = Stack::new("too many nested loops");
        for _ in 0..u16::max_value() {
            s.push(()).unwrap();
        }
        let e = s.push(()).unwrap_err();
        assert_eq!(e.to_string(), "too many nested loops");
    }
}
