use super::ast::Statement;
use super::{parse, tokenize, Error, LineNumber, MAX_LINE_NUMBER};
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, Error>;

/// ## A parsed program
///
/// One statement per line number. `line_numbers` is the execution order.

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Program {
    statements: BTreeMap<LineNumber, Statement>,
    line_numbers: Vec<LineNumber>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn insert(&mut self, line_number: LineNumber, statement: Statement) -> Result<()> {
        if line_number < 1 || line_number > MAX_LINE_NUMBER {
            return Err(error!(InvalidLineNumber; "invalid line number {}", line_number));
        }
        match self.line_numbers.binary_search(&line_number) {
            Ok(_) => Err(error!(DuplicateLine; "duplicate line number {}", line_number)),
            Err(index) => {
                self.line_numbers.insert(index, line_number);
                self.statements.insert(line_number, statement);
                Ok(())
            }
        }
    }

    pub fn get(&self, line_number: LineNumber) -> Option<&Statement> {
        self.statements.get(&line_number)
    }

    pub fn line_numbers(&self) -> &[LineNumber] {
        &self.line_numbers
    }

    pub fn index_of(&self, line_number: LineNumber) -> Option<usize> {
        self.line_numbers.binary_search(&line_number).ok()
    }

    pub fn len(&self) -> usize {
        self.line_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_numbers.is_empty()
    }
}

impl std::str::FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Program> {
        parse(&tokenize(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut p = Program::new();
        p.insert(30, Statement::End).unwrap();
        p.insert(10, Statement::End).unwrap();
        p.insert(20, Statement::Goto(10)).unwrap();
        assert_eq!(p.line_numbers(), &[10, 20, 30]);
        assert_eq!(p.index_of(20), Some(1));
        assert_eq!(p.index_of(25), None);
        assert_eq!(p.get(20), Some(&Statement::Goto(10)));
    }

    #[test]
    fn test_duplicate_line() {
        let mut p = Program::new();
        p.insert(10, Statement::End).unwrap();
        let e = p.insert(10, Statement::End).unwrap_err();
        assert_eq!(e.to_string(), "duplicate line number 10");
    }

    #[test]
    fn test_line_number_range() {
        let mut p = Program::new();
        assert!(p.insert(0, Statement::End).is_err());
        assert!(p.insert(100000, Statement::End).is_err());
        assert!(p.insert(99999, Statement::End).is_ok());
    }
}
