use super::token::*;
use std::iter::Peekable;
use std::str::Chars;

/// Tokenizes all of `s`. The last token is always `Kind::Eof`.
pub fn tokenize(s: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(s);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token();
        let eof = token.is_eof();
        tokens.push(token);
        if eof {
            return tokens;
        }
    }
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    line_start: bool,
    remark: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(s: &'a str) -> Lexer<'a> {
        Lexer {
            chars: s.chars().peekable(),
            line: 1,
            column: 1,
            line_start: true,
            remark: false,
        }
    }

    /// Always true: end of input is itself a token and is returned forever.
    pub fn has_more_tokens(&self) -> bool {
        true
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            while let Some(&ch) = self.chars.peek() {
                if !is_basic_whitespace(ch) {
                    break;
                }
                self.bump();
            }
            if self.remark {
                self.remark = false;
                if let Some(token) = self.remark_text() {
                    return token;
                }
            }
            let (line, column) = (self.line, self.column);
            let ch = match self.chars.peek() {
                Some(&ch) => ch,
                None => return Token::new(Kind::Eof, "", line, column),
            };
            if ch == '\n' {
                self.bump();
                self.line_start = true;
                continue;
            }
            let line_start = self.line_start;
            self.line_start = false;
            if is_basic_digit(ch) || (ch == '.' && self.digit_after_next()) {
                let s = self.number();
                let kind = if line_start && self.keyword_follows() {
                    Kind::LineNumber
                } else {
                    Kind::Number
                };
                return Token::new(kind, s, line, column);
            }
            if is_ident_start(ch) {
                let s = self.alphabetic();
                return match Word::from_string(&s) {
                    Some(word) => {
                        if word == Word::Rem {
                            self.remark = true;
                        }
                        Token::new(Kind::Word(word), s, line, column)
                    }
                    None => Token::new(Kind::Ident, s, line, column),
                };
            }
            if ch == '"' {
                return self.string(line, column);
            }
            return self.minutia(line, column);
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn digit_after_next(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        matches!(ahead.peek(), Some(c) if is_basic_digit(*c))
    }

    fn digits(&mut self, s: &mut String) {
        while let Some(&ch) = self.chars.peek() {
            if !is_basic_digit(ch) {
                break;
            }
            s.push(ch);
            self.bump();
        }
    }

    fn number(&mut self) -> String {
        let mut s = String::new();
        self.digits(&mut s);
        if let Some('.') = self.chars.peek() {
            if self.digit_after_next() {
                s.push('.');
                self.bump();
                self.digits(&mut s);
            }
        }
        s
    }

    // A leading integer is only a line number when a keyword comes next.
    fn keyword_follows(&self) -> bool {
        let mut ahead = self.chars.clone();
        while let Some(&ch) = ahead.peek() {
            if !is_basic_whitespace(ch) {
                break;
            }
            ahead.next();
        }
        let mut word = String::new();
        if let Some(&ch) = ahead.peek() {
            if !is_ident_start(ch) {
                return false;
            }
        }
        while let Some(&ch) = ahead.peek() {
            if !is_ident_char(ch) {
                if ch == '$' {
                    word.push(ch);
                }
                break;
            }
            word.push(ch);
            ahead.next();
        }
        Word::from_string(&word).is_some()
    }

    fn alphabetic(&mut self) -> String {
        let mut s = String::new();
        while let Some(&ch) = self.chars.peek() {
            if is_ident_char(ch) {
                s.push(ch);
                self.bump();
                continue;
            }
            if ch == '$' {
                s.push(ch);
                self.bump();
            }
            break;
        }
        s
    }

    fn string(&mut self, line: usize, column: usize) -> Token {
        let mut s = String::new();
        self.bump();
        loop {
            match self.bump() {
                Some('"') => return Token::new(Kind::String, s, line, column),
                Some(ch) => s.push(ch),
                None => return Token::new(Kind::Illegal, UNTERMINATED_STRING, line, column),
            }
        }
    }

    fn remark_text(&mut self) -> Option<Token> {
        let (line, column) = (self.line, self.column);
        let mut s = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                break;
            }
            s.push(ch);
            self.bump();
        }
        let s = s.trim_end();
        if s.is_empty() {
            None
        } else {
            Some(Token::new(Kind::String, s, line, column))
        }
    }

    fn minutia(&mut self, line: usize, column: usize) -> Token {
        let ch = match self.bump() {
            Some(ch) => ch,
            None => return Token::new(Kind::Eof, "", line, column),
        };
        let single = |kind: Kind| Token::new(kind, ch.to_string(), line, column);
        let next = self.chars.peek().copied();
        use Operator::*;
        let pair = match (ch, next) {
            ('<', Some('=')) => Some((LessEqual, "<=")),
            ('<', Some('>')) => Some((NotEqual, "<>")),
            ('>', Some('=')) => Some((GreaterEqual, ">=")),
            _ => None,
        };
        if let Some((op, text)) = pair {
            self.bump();
            return Token::new(Kind::Operator(op), text, line, column);
        }
        match ch {
            '<' => single(Kind::Operator(Less)),
            '>' => single(Kind::Operator(Greater)),
            '+' => single(Kind::Operator(Plus)),
            '-' => single(Kind::Operator(Minus)),
            '*' => single(Kind::Operator(Multiply)),
            '/' => single(Kind::Operator(Divide)),
            '^' => single(Kind::Operator(Caret)),
            '=' => single(Kind::Operator(Equal)),
            '(' => single(Kind::LParen),
            ')' => single(Kind::RParen),
            ',' => single(Kind::Comma),
            ';' => single(Kind::Semicolon),
            _ => single(Kind::Illegal),
        }
    }
}
