use super::LineNumber;

/// Location of a token in the source text. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    position: Option<Position>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$pos:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_position($pos)
    };
    ($err:ident, ..$pos:expr; $($msg:tt)+) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_position($pos)
            .message(format!($($msg)+))
    };
    ($err:ident; $($msg:tt)+) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message(format!($($msg)+))
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            position: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// The cause without any line or position decoration.
    pub fn text(&self) -> &str {
        if self.message.is_empty() {
            self.code.default_text()
        } else {
            &self.message
        }
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn in_position(self, position: Position) -> Error {
        debug_assert!(self.position.is_none());
        Error {
            position: Some(position),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        Error {
            message: message.into(),
            ..self
        }
    }

    /// Prefixes the cause, keeping the code.
    pub fn context(self, context: &str) -> Error {
        let message = format!("{}: {}", context, self.text());
        Error { message, ..self }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        match error.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::new(ErrorCode::InputPastEnd),
            _ => Error::new(ErrorCode::Io).message(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical
    IllegalCharacter,
    UnterminatedString,
    // Syntax
    SyntaxError,
    InvalidLineNumber,
    DuplicateLine,
    // Runtime
    TypeMismatch,
    DivisionByZero,
    CannotConvert,
    InvalidVariable,
    UndefinedLine,
    NextWithoutFor,
    StepZero,
    UnknownFunction,
    ArgumentCount,
    IllegalFunctionCall,
    InputPastEnd,
    Io,
    Break,
    // Limits
    ExecutionLimit,
    OutOfMemory,
}

impl ErrorCode {
    pub fn default_text(self) -> &'static str {
        use ErrorCode::*;
        match self {
            IllegalCharacter => "illegal character",
            UnterminatedString => "unterminated string",
            SyntaxError => "syntax error",
            InvalidLineNumber => "invalid line number",
            DuplicateLine => "duplicate line number",
            TypeMismatch => "type mismatch",
            DivisionByZero => "division by zero",
            CannotConvert => "cannot convert",
            InvalidVariable => "invalid variable name",
            UndefinedLine => "undefined line",
            NextWithoutFor => "NEXT without FOR",
            StepZero => "step cannot be zero",
            UnknownFunction => "unknown function",
            ArgumentCount => "wrong number of arguments",
            IllegalFunctionCall => "illegal function call",
            InputPastEnd => "input past end",
            Io => "input/output error",
            Break => "break",
            ExecutionLimit => "execution limit exceeded",
            OutOfMemory => "out of memory",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {:?}: {} }}", self.code, self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(line_number) = self.line_number {
            write!(f, "runtime error at line {}: {}", line_number, self.text())
        } else if let Some(pos) = self.position {
            write!(f, "line {}, column {}: {}", pos.line, pos.column, self.text())
        } else {
            write!(f, "{}", self.text())
        }
    }
}

impl std::error::Error for Error {}
