use super::{ast::*, token::*, Error, LineNumber, Program, MAX_LINE_NUMBER};
use crate::mach::Function;
use log::debug;

type Result<T> = std::result::Result<T, Error>;

/// Parses a token stream, as produced by `tokenize`, into a `Program`.
pub fn parse(tokens: &[Token]) -> Result<Program> {
    if let Some(illegal) = tokens.iter().find(|t| t.kind == Kind::Illegal) {
        return Err(illegal.illegal_error());
    }
    let program = Parser::new(tokens).program()?;
    debug!("parsed {} lines", program.len());
    Ok(program)
}

const UNARY_PRECEDENCE: usize = 50;

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
    line: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        let eof = match tokens.last() {
            Some(t) => Token::new(Kind::Eof, "", t.line, t.column + t.text.len()),
            None => Token::new(Kind::Eof, "", 1, 1),
        };
        Parser {
            tokens,
            pos: 0,
            eof,
            line: 1,
        }
    }

    pub fn program(&mut self) -> Result<Program> {
        let mut program = Program::new();
        loop {
            let token = self.next();
            match token.kind {
                Kind::Eof => return Ok(program),
                Kind::LineNumber | Kind::Number => {
                    self.line = token.line;
                    let line_number = line_number(&token)?;
                    let statement = self.statement(line_number)?;
                    if !self.at_end_of_statement() {
                        let t = self.peek().clone();
                        return Err(error!(SyntaxError, ..t.position(); "unexpected {}", t));
                    }
                    program
                        .insert(line_number, statement)
                        .map_err(|e| e.in_position(token.position()))?;
                }
                _ => {
                    return Err(
                        error!(SyntaxError, ..token.position(); "expected line number, found {}", token),
                    )
                }
            }
        }
    }

    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn at_end_of_statement(&self) -> bool {
        let token = self.peek();
        match token.kind {
            Kind::Eof | Kind::LineNumber => true,
            _ => token.line != self.line,
        }
    }

    fn statement(&mut self, line_number: LineNumber) -> Result<Statement> {
        let token = self.peek().clone();
        match &token.kind {
            Kind::Ident => self.r#let(),
            Kind::Word(word) => {
                self.next();
                self.for_word(word, line_number, &token)
            }
            _ => Err(error!(SyntaxError, ..token.position(); "expected statement, found {}", token)),
        }
    }

    fn for_word(&mut self, word: &Word, line_number: LineNumber, token: &Token) -> Result<Statement> {
        use Word::*;
        match word {
            End => Ok(Statement::End),
            For => self.r#for(line_number),
            Goto => self.r#goto(),
            If => self.r#if(line_number),
            Input => self.r#input(),
            Let => self.r#let(),
            Next => self.next_statement(),
            Print => self.r#print(),
            Rem => self.r#rem(),
            Step | Then | To => {
                Err(error!(SyntaxError, ..token.position(); "expected statement, found {}", word))
            }
        }
    }

    fn r#let(&mut self) -> Result<Statement> {
        let ident = self.ident()?;
        self.expect(Kind::Operator(Operator::Equal))?;
        Ok(Statement::Let(ident, self.expression()?))
    }

    fn r#print(&mut self) -> Result<Statement> {
        let mut v: Vec<Expression> = vec![];
        if self.at_end_of_statement() {
            return Ok(Statement::Print(v));
        }
        loop {
            v.push(self.expression()?);
            match self.peek().kind {
                Kind::Comma | Kind::Semicolon => {
                    self.next();
                    if self.at_end_of_statement() {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(Statement::Print(v))
    }

    fn r#input(&mut self) -> Result<Statement> {
        let mut prompt = "".into();
        if self.peek().kind == Kind::String {
            prompt = self.next().text.into();
            let t = self.next();
            if t.kind != Kind::Semicolon && t.kind != Kind::Comma {
                return Err(error!(SyntaxError, ..t.position(); "expected ';' after prompt, found {}", t));
            }
        }
        Ok(Statement::Input(prompt, self.ident()?))
    }

    fn r#goto(&mut self) -> Result<Statement> {
        let token = self.next();
        match token.kind {
            Kind::Number | Kind::LineNumber => Ok(Statement::Goto(line_number(&token)?)),
            _ => Err(error!(SyntaxError, ..token.position(); "expected line number, found {}", token)),
        }
    }

    fn r#if(&mut self, line_number: LineNumber) -> Result<Statement> {
        let predicate = self.expression()?;
        self.expect(Kind::Word(Word::Then))?;
        let then = if self.peek().kind == Kind::Number {
            self.r#goto()?
        } else {
            self.statement(line_number)?
        };
        Ok(Statement::If(predicate, Box::new(then)))
    }

    fn r#for(&mut self, line_number: LineNumber) -> Result<Statement> {
        let ident = self.ident()?;
        self.expect(Kind::Operator(Operator::Equal))?;
        let from = self.expression()?;
        self.expect(Kind::Word(Word::To))?;
        let to = self.expression()?;
        let step = if self.peek().kind == Kind::Word(Word::Step) {
            self.next();
            self.expression()?
        } else {
            Expression::Number(1.0)
        };
        Ok(Statement::For(ident, from, to, step, line_number))
    }

    fn next_statement(&mut self) -> Result<Statement> {
        if self.peek().kind == Kind::Ident && !self.at_end_of_statement() {
            return Ok(Statement::Next(Some(self.ident()?)));
        }
        Ok(Statement::Next(None))
    }

    fn r#rem(&mut self) -> Result<Statement> {
        if self.peek().kind == Kind::String && !self.at_end_of_statement() {
            return Ok(Statement::Rem(self.next().text.into()));
        }
        Ok(Statement::Rem("".into()))
    }

    pub fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = primary(this)?;
            loop {
                let op = match this.peek().kind {
                    Kind::Operator(op) => op,
                    _ => break,
                };
                let op_precedence = Expression::op_precedence(op);
                if op_precedence < precedence {
                    break;
                }
                this.next();
                let rhs = match op {
                    Operator::Caret => parse(this, op_precedence)?,
                    _ => parse(this, op_precedence + 1)?,
                };
                lhs = Expression::for_binary_op(op, lhs, rhs);
            }
            Ok(lhs)
        }

        fn primary(this: &mut Parser) -> Result<Expression> {
            let token = this.next();
            match token.kind {
                Kind::Operator(Operator::Minus) => Ok(Expression::Subtract(
                    Box::new(Expression::Number(0.0)),
                    Box::new(parse(this, UNARY_PRECEDENCE)?),
                )),
                Kind::Operator(Operator::Plus) => parse(this, UNARY_PRECEDENCE),
                Kind::LParen => {
                    let expr = this.expression()?;
                    this.expect(Kind::RParen)?;
                    Ok(Expression::Paren(Box::new(expr)))
                }
                Kind::Number | Kind::LineNumber => match token.text.parse::<f64>() {
                    Ok(n) => Ok(Expression::Number(n)),
                    Err(_) => Err(error!(SyntaxError, ..token.position(); "invalid number {}", token)),
                },
                Kind::String => Ok(Expression::String(token.text.into())),
                Kind::Ident => {
                    let ident = Ident::new(&token.text);
                    if this.peek().kind == Kind::LParen {
                        Ok(Expression::Function(ident, this.expression_list()?))
                    } else if Function::is_builtin(ident.name()) {
                        Ok(Expression::Function(ident, vec![]))
                    } else {
                        Ok(Expression::Var(ident))
                    }
                }
                _ => Err(error!(SyntaxError, ..token.position(); "expected expression, found {}", token)),
            }
        }

        parse(self, 0)
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Kind::LParen)?;
        let mut v: Vec<Expression> = vec![];
        if self.peek().kind == Kind::RParen {
            self.next();
            return Ok(v);
        }
        loop {
            v.push(self.expression()?);
            let token = self.next();
            match token.kind {
                Kind::RParen => return Ok(v),
                Kind::Comma => continue,
                _ => {
                    return Err(error!(SyntaxError, ..token.position(); "expected ',' or ')', found {}", token))
                }
            }
        }
    }

    fn ident(&mut self) -> Result<Ident> {
        let token = self.next();
        match token.kind {
            Kind::Ident => Ok(Ident::new(&token.text)),
            _ => Err(error!(SyntaxError, ..token.position(); "expected identifier, found {}", token)),
        }
    }

    fn expect(&mut self, kind: Kind) -> Result<Token> {
        let token = self.next();
        if token.kind == kind {
            return Ok(token);
        }
        let expected = match &kind {
            Kind::Word(word) => word.to_string(),
            Kind::Operator(op) => format!("'{}'", op),
            Kind::LParen => "'('".to_string(),
            Kind::RParen => "')'".to_string(),
            Kind::Comma => "','".to_string(),
            Kind::Semicolon => "';'".to_string(),
            Kind::Ident => "identifier".to_string(),
            Kind::Number | Kind::LineNumber => "number".to_string(),
            Kind::String => "string".to_string(),
            Kind::Eof | Kind::Illegal => "end of input".to_string(),
        };
        Err(error!(SyntaxError, ..token.position(); "expected {}, found {}", expected, token))
    }
}

fn line_number(token: &Token) -> Result<LineNumber> {
    match token.text.parse::<LineNumber>() {
        Ok(n) if n >= 1 && n <= MAX_LINE_NUMBER => Ok(n),
        _ => Err(error!(InvalidLineNumber, ..token.position(); "invalid line number {}", token.text)),
    }
}

impl Expression {
    fn for_binary_op(op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Power(lhs, rhs),
            Multiply => Expression::Multiply(lhs, rhs),
            Divide => Expression::Divide(lhs, rhs),
            Plus => Expression::Add(lhs, rhs),
            Minus => Expression::Subtract(lhs, rhs),
            Equal => Expression::Equal(lhs, rhs),
            NotEqual => Expression::NotEqual(lhs, rhs),
            Less => Expression::Less(lhs, rhs),
            LessEqual => Expression::LessEqual(lhs, rhs),
            Greater => Expression::Greater(lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(lhs, rhs),
        }
    }

    fn op_precedence(op: Operator) -> usize {
        use Operator::*;
        match op {
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 10,
            Plus | Minus => 20,
            Multiply | Divide => 30,
            Caret => 40,
        }
    }
}
