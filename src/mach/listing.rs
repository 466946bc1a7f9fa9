use crate::error;
use crate::lang::{Error, LineNumber, Program, MAX_LINE_NUMBER};
use std::collections::{btree_map::Values, BTreeMap};

type Result<T> = std::result::Result<T, Error>;

/// ## Source text kept by line number
///
/// Entering a line replaces any line with the same number.
/// A line number by itself deletes that line.

#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: BTreeMap<LineNumber, String>,
}

impl Listing {
    pub fn new() -> Listing {
        Listing::default()
    }

    pub fn clear(&mut self) {
        self.source.clear();
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn lines(&self) -> Values<'_, LineNumber, String> {
        self.source.values()
    }

    pub fn remove(&mut self, line_number: LineNumber) -> Option<String> {
        self.source.remove(&line_number)
    }

    /// Used for loading a new Listing from a file and for
    /// numbered lines typed into the shell.
    pub fn load_str(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end();
        let text = line.trim_start();
        if text.is_empty() {
            return Ok(());
        }
        let digits = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or_else(|| text.len());
        if digits == 0 {
            return Err(error!(SyntaxError; "expected line number: {}", text));
        }
        let line_number = match text[..digits].parse::<LineNumber>() {
            Ok(n) if n >= 1 && n <= MAX_LINE_NUMBER => n,
            _ => return Err(error!(InvalidLineNumber; "invalid line number {}", &text[..digits])),
        };
        if text[digits..].trim().is_empty() {
            self.remove(line_number);
        } else {
            self.source.insert(line_number, text.to_string());
        }
        Ok(())
    }

    pub fn load(&mut self, source: &str) -> Result<()> {
        for (index, line) in source.lines().enumerate() {
            self.load_str(line)
                .map_err(|e| e.context(&format!("line {}", index + 1)))?;
        }
        Ok(())
    }

    pub fn source(&self) -> String {
        self.lines().cloned().collect::<Vec<String>>().join("\n")
    }

    pub fn program(&self) -> Result<Program> {
        self.source().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_and_delete() {
        let mut listing = Listing::new();
        listing.load_str("20 PRINT 2").unwrap();
        listing.load_str("10 PRINT 1").unwrap();
        listing.load_str("20 PRINT 3").unwrap();
        assert_eq!(listing.source(), "10 PRINT 1\n20 PRINT 3");
        listing.load_str("10").unwrap();
        assert_eq!(listing.source(), "20 PRINT 3");
        listing.load_str("   ").unwrap();
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn test_missing_line_number() {
        let mut listing = Listing::new();
        let e = listing.load_str("PRINT 1").unwrap_err();
        assert_eq!(e.to_string(), "expected line number: PRINT 1");
        assert!(listing.load_str("100000 END").is_err());
        let e = listing.load("10 END\n\nX = 1").unwrap_err();
        assert_eq!(e.to_string(), "line 3: expected line number: X = 1");
    }

    #[test]
    fn test_program() {
        let mut listing = Listing::new();
        listing.load("30 END\n10 X = 1\n20 GOTO 30\n").unwrap();
        let program = listing.program().unwrap();
        assert_eq!(program.line_numbers(), &[10, 20, 30]);
    }
}
