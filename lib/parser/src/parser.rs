mod cursor;
mod expr;

use cursor::TokenCursor;
use errors::{Result, SyntaxError, SyntaxErrors};
pub use expr::{Expr, LiteralValue};
use tokens::{Token, TokenData};

use TokenData::*;

#[derive(Debug)]
pub struct ParserError<'a> {
    error: ParserErrorType,
    token: Token<'a>,
}

impl<'a> ParserError<'a> {
    fn new(error: ParserErrorType, token: Token<'a>) -> Self {
        Self { error, token }
    }
}

impl<'a> From<ParserError<'a>> for SyntaxError {
    fn from(error: ParserError<'a>) -> Self {
        SyntaxError {
            line: error.token.line(),
            col: error.token.col(),
            message: error.error.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParserErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
}

#[derive(Debug)]
pub struct Parser<'t> {
    cursor: TokenCursor<'t>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token<'t>]) -> Self {
        Self { cursor: TokenCursor::new(tokens) }
    }

    /// Parses a single expression. This is where an in-flight parse error is
    /// absorbed: the caller gets the diagnostics instead of an AST.
    pub fn parse(mut self) -> std::result::Result<Expr<'t>, SyntaxErrors> {
        match self.expression() {
            Ok(expr) => Ok(expr),
            Err(e) => {
                log::trace!("Hit parse error: {e}");
                Err(e.into())
            }
        }
    }

    fn expression(&mut self) -> Result<Expr<'t>> {
        self.equality()
    }

    // The four binary levels share one shape: parse the left operand one
    // level down, then fold trailing operators left to right.
    fn equality(&mut self) -> Result<Expr<'t>> {
        let mut expr = self.comparison()?;

        while self.cursor.match_any(&[BangEqual, EqualEqual]) {
            let operator = self.cursor.previous().clone();
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'t>> {
        let mut expr = self.term()?;

        while self.cursor.match_any(&[Greater, GreaterEqual, Less, LessEqual]) {
            let operator = self.cursor.previous().clone();
            let right = Box::new(self.term()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'t>> {
        let mut expr = self.factor()?;

        while self.cursor.match_any(&[Minus, Plus]) {
            let operator = self.cursor.previous().clone();
            let right = Box::new(self.factor()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'t>> {
        let mut expr = self.unary()?;

        while self.cursor.match_any(&[Slash, Star]) {
            let operator = self.cursor.previous().clone();
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'t>> {
        if self.cursor.match_any(&[Bang, Minus]) {
            let operator = self.cursor.previous().clone();
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'t>> {
        let token = self.cursor.peek();
        let literal = match &token.data {
            False => LiteralValue::Boolean(false),
            True => LiteralValue::Boolean(true),
            Nil => LiteralValue::Nil,
            Number(n) => LiteralValue::Number(*n),
            Str(s) => LiteralValue::Str(*s),
            LeftParen => {
                self.cursor.advance();
                let expr = self.expression()?;
                self.consume(RightParen, ParserErrorType::ExpectedRightParen)?;
                return Ok(Expr::Grouping(Box::new(expr)));
            }
            // Left unconsumed: recovery starts by skipping exactly this token.
            _ => return Err(self.error(ParserErrorType::ExpectedExpression)),
        };
        self.cursor.advance();
        Ok(Expr::Literal(literal))
    }

    fn consume(&mut self, data: TokenData<'t>, error: ParserErrorType) -> Result<&'t Token<'t>> {
        if self.cursor.check(&data) {
            Ok(self.cursor.advance())
        } else {
            Err(self.error(error))
        }
    }

    fn error(&self, error: ParserErrorType) -> SyntaxError {
        ParserError::new(error, self.cursor.peek().clone()).into()
    }

    /// Discards tokens up to the next statement boundary: just past a `;`, or
    /// just before a statement keyword. An embedding statement grammar calls
    /// this after catching a parse error so it can keep going.
    pub fn synchronize(&mut self) {
        log::trace!("Synchronizing from {:?}", self.cursor.peek());
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            if self.cursor.previous().data == Semicolon {
                return;
            }

            match self.cursor.peek().data {
                Class | Fun | Var | For | If | While | Print | Return => return,
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }
}
