use super::{Error, Position};
use std::collections::HashMap;

thread_local!(
    static STRING_TO_WORD: HashMap<&'static str, Word> =
        Word::ALL.iter().map(|w| (w.as_str(), w.clone())).collect();
);

pub const UNTERMINATED_STRING: &str = "unterminated string";

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: Kind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Kind {
    Eof,
    Illegal,
    LineNumber,
    Number,
    String,
    Ident,
    Word(Word),
    Operator(Operator),
    LParen,
    RParen,
    Comma,
    Semicolon,
}

impl Token {
    pub fn new<S: Into<String>>(kind: Kind, text: S, line: usize, column: usize) -> Token {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == Kind::Eof
    }

    /// The lexical error an illegal token stands for.
    pub fn illegal_error(&self) -> Error {
        debug_assert_eq!(self.kind, Kind::Illegal);
        if self.text == UNTERMINATED_STRING {
            error!(UnterminatedString, ..self.position())
        } else {
            error!(IllegalCharacter, ..self.position(); "illegal character '{}'", self.text)
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            Kind::Eof => write!(f, "end of input"),
            Kind::String => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Word {
    End,
    For,
    Goto,
    If,
    Input,
    Let,
    Next,
    Print,
    Rem,
    Step,
    Then,
    To,
}

impl Word {
    const ALL: [Word; 12] = [
        Word::End,
        Word::For,
        Word::Goto,
        Word::If,
        Word::Input,
        Word::Let,
        Word::Next,
        Word::Print,
        Word::Rem,
        Word::Step,
        Word::Then,
        Word::To,
    ];

    /// Case-insensitive keyword lookup.
    pub fn from_string(s: &str) -> Option<Word> {
        let upper = s.to_ascii_uppercase();
        STRING_TO_WORD.with(|stw| stw.get(upper.as_str()).cloned())
    }

    pub fn as_str(&self) -> &'static str {
        use Word::*;
        match self {
            End => "END",
            For => "FOR",
            Goto => "GOTO",
            If => "IF",
            Input => "INPUT",
            Let => "LET",
            Next => "NEXT",
            Print => "PRINT",
            Rem => "REM",
            Step => "STEP",
            Then => "THEN",
            To => "TO",
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
        }
    }
}
