//! Recursive-descent parser for infix formulas over the reals.
//!
//! ```text
//! expression := term ( ('+' | '-') term )*
//! term       := factor ( ('*' | '/') factor )*
//! factor     := primary ( '^' factor )?
//! primary    := '(' expression ')' | function primary | variable | number
//! ```
//!
//! `+ - * /` associate to the left, `^` to the right. Only `x` and `y` are variables;
//! any other run of letters must name one of the functions `sin`, `cos`, `ln` or `exp`.
//! Whitespace is skipped before every character the parser looks at.

use std::str::FromStr;

use lazy_regex::regex_is_match;

use crate::ast::{Expression, UnaryOp};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput { pos: usize },

    #[error("Expected ')'")]
    ExpectedCloseParen { pos: usize },

    #[error("Unknown function: {name}")]
    UnknownFunction { name: String, pos: usize },

    #[error("Invalid number: {text}")]
    InvalidNumber { text: String, pos: usize },

    #[error("Unexpected character '{found}'")]
    UnexpectedCharacter { found: char, pos: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    /// Byte offset into the subject where the error was detected.
    pub fn pos(&self) -> usize {
        use ParseError::*;
        match self {
            UnexpectedEndOfInput { pos }
            | ExpectedCloseParen { pos }
            | UnknownFunction { pos, .. }
            | InvalidNumber { pos, .. }
            | UnexpectedCharacter { pos, .. } => *pos,
        }
    }

    /// The subject followed by a line marking the error position and the message.
    pub fn report(&self, subject: &str) -> String {
        let pos = self.pos();
        let column = subject
            .char_indices()
            .take_while(|(index, _)| *index < pos)
            .count();
        format!("{subject}\n{}^ {self}", " ".repeat(column))
    }
}

struct Parser<'a> {
    subject: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(subject: &'a str) -> Self {
        Self { subject, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.subject[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.subject[self.pos..].chars().next()
    }

    fn consume(&mut self) -> ParseResult<char> {
        let Some(c) = self.peek() else {
            return Err(ParseError::UnexpectedEndOfInput { pos: self.pos });
        };
        self.pos += c.len_utf8();
        Ok(c)
    }

    /// Consumes the next character only if it is `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes the longest run of characters accepted by `pred`.
    fn take_while<P>(&mut self, pred: P) -> String
    where
        P: Fn(char) -> bool,
    {
        let mut run = String::new();
        while let Some(c) = self.peek().filter(|c| pred(*c)) {
            run.push(c);
            self.pos += c.len_utf8();
        }
        run
    }

    fn parse_expression(&mut self) -> ParseResult<Expression<f64>> {
        let mut left = self.parse_term()?;
        loop {
            if self.match_char('+') {
                left = left + self.parse_term()?;
            } else if self.match_char('-') {
                left = left - self.parse_term()?;
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expression<f64>> {
        let mut left = self.parse_factor()?;
        loop {
            if self.match_char('*') {
                left = left * self.parse_factor()?;
            } else if self.match_char('/') {
                left = left / self.parse_factor()?;
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expression<f64>> {
        let base = self.parse_primary()?;
        if self.match_char('^') {
            Ok(base.pow(self.parse_factor()?))
        } else {
            Ok(base)
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expression<f64>> {
        if self.match_char('(') {
            let exp = self.parse_expression()?;
            if !self.match_char(')') {
                return Err(ParseError::ExpectedCloseParen { pos: self.pos });
            }
            return Ok(exp);
        }

        match self.peek() {
            None => Err(ParseError::UnexpectedEndOfInput { pos: self.pos }),
            Some('x' | 'y') => self.parse_variable(),
            Some(c) if c.is_ascii_alphabetic() => self.parse_function(),
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(found) => Err(ParseError::UnexpectedCharacter {
                found,
                pos: self.pos,
            }),
        }
    }

    fn parse_function(&mut self) -> ParseResult<Expression<f64>> {
        self.skip_whitespace();
        let start = self.pos;
        let name = self.take_while(|c| c.is_ascii_alphabetic());

        let Ok(op) = UnaryOp::from_str(&name) else {
            return Err(ParseError::UnknownFunction { name, pos: start });
        };

        let operand = self.parse_primary()?;
        Ok(Expression::unary(op, operand))
    }

    fn parse_number(&mut self) -> ParseResult<Expression<f64>> {
        self.skip_whitespace();
        let start = self.pos;
        let text = self.take_while(|c| c.is_ascii_digit() || c == '.');

        if !regex_is_match!(r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)$", &text) {
            return Err(ParseError::InvalidNumber { text, pos: start });
        }
        let Ok(value) = text.parse::<f64>() else {
            return Err(ParseError::InvalidNumber { text, pos: start });
        };

        Ok(Expression::value(value))
    }

    fn parse_variable(&mut self) -> ParseResult<Expression<f64>> {
        let name = self.consume()?;
        Ok(Expression::variable(name))
    }
}

/// Parses a whole formula. Input left over after a complete expression is an error.
pub fn parse(subject: &str) -> ParseResult<Expression<f64>> {
    let mut parser = Parser::new(subject);
    let exp = parser.parse_expression()?;

    if let Some(found) = parser.peek() {
        return Err(ParseError::UnexpectedCharacter {
            found,
            pos: parser.pos,
        });
    }

    log::debug!("parsed {subject:?} as {exp}");
    Ok(exp)
}

impl FromStr for Expression<f64> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
