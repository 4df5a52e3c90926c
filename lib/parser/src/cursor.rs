use tokens::{Token, TokenData};

/// Linear, forward-only view over the scanner's token output. The index only
/// moves forward and never past the trailing `Eof` sentinel, so `peek` is
/// always backed by a valid token.
#[derive(Debug)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token<'t>],
    current: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token<'t>]) -> Self {
        assert!(
            matches!(tokens.last(), Some(token) if token.data == TokenData::Eof),
            "token sequence must end with an Eof sentinel"
        );
        Self { tokens, current: 0 }
    }

    pub fn peek(&self) -> &'t Token<'t> {
        &self.tokens[self.current]
    }

    /// Only valid after at least one `advance`.
    pub fn previous(&self) -> &'t Token<'t> {
        &self.tokens[self.current - 1]
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().data == TokenData::Eof
    }

    /// Returns the token at the pre-advance position and steps over it. The
    /// trailing `Eof` is never stepped past.
    pub fn advance(&mut self) -> &'t Token<'t> {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    pub fn check(&self, data: &TokenData) -> bool {
        // Payload-carrying kinds would compare by value, not by kind; the
        // grammar only ever checks for punctuation, operators and keywords.
        debug_assert!(!matches!(data, TokenData::Number(_) | TokenData::Str(_)));
        !self.is_at_end() && self.peek().data == *data
    }

    /// The single compound lookahead-plus-consume primitive: advances exactly
    /// once iff the current token's kind is one of `kinds`.
    pub fn match_any(&mut self, kinds: &[TokenData]) -> bool {
        if kinds.iter().any(|data| self.check(data)) {
            self.advance();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use tokens::{Col, Line};

    use super::*;
    use TokenData::*;

    fn token(data: TokenData<'static>, lexeme: &'static str, col: usize) -> Token<'static> {
        Token::new(data, lexeme, Line(1), Col(col))
    }

    fn tokens() -> Vec<Token<'static>> {
        vec![token(Number(1.0), "1", 1), token(Plus, "+", 3), token(Eof, "", 4)]
    }

    #[test]
    fn peek_is_idempotent() {
        let tokens = tokens();
        let cursor = TokenCursor::new(&tokens);
        assert_eq!(cursor.peek(), cursor.peek());
        assert_eq!(cursor.peek().data, Number(1.0));
    }

    #[test]
    fn advance_returns_the_passed_token() {
        let tokens = tokens();
        let mut cursor = TokenCursor::new(&tokens);
        assert_eq!(cursor.advance().data, Number(1.0));
        assert_eq!(cursor.previous().data, Number(1.0));
        assert_eq!(cursor.peek().data, Plus);
    }

    #[test]
    fn advance_sticks_at_eof() {
        let tokens = tokens();
        let mut cursor = TokenCursor::new(&tokens);
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance().data, Eof);
        assert_eq!(cursor.advance().data, Eof);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn check_does_not_advance() {
        let tokens = tokens();
        let cursor = TokenCursor::new(&tokens);
        assert!(!cursor.check(&Plus));
        assert!(!cursor.check(&Plus));
        assert_eq!(cursor.peek().data, Number(1.0));
    }

    #[test]
    fn match_any_consumes_on_a_hit_only() {
        let tokens = tokens();
        let mut cursor = TokenCursor::new(&tokens);
        cursor.advance();

        assert!(!cursor.match_any(&[Minus, Star]));
        assert_eq!(cursor.peek().data, Plus);

        assert!(cursor.match_any(&[Minus, Plus]));
        assert_eq!(cursor.previous().data, Plus);
        assert!(cursor.is_at_end());

        assert!(!cursor.match_any(&[Plus]));
    }

    #[test]
    fn check_is_always_false_at_eof() {
        let tokens = vec![token(Eof, "", 1)];
        let cursor = TokenCursor::new(&tokens);
        assert!(!cursor.check(&Eof));
        assert!(cursor.is_at_end());
    }

    #[test]
    #[should_panic(expected = "Eof sentinel")]
    fn rejects_a_sequence_without_sentinel() {
        let tokens = vec![token(Plus, "+", 1)];
        TokenCursor::new(&tokens);
    }
}
