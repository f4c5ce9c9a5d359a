use crate::parser::css_token::{Token, TokenType};

/// Cursor over a token sequence that ends in an EOF token.
///
/// The cursor starts before the first token, so the first `consume` makes the
/// first token current. Any index outside the sequence yields the trailing
/// EOF token, which makes every read infallible.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    eof: &'a Token,
    pos: isize,
}

impl<'a> TokenStream<'a> {
    /// Panics if `tokens` is empty or does not end with an EOF token.
    pub fn new(tokens: &'a [Token]) -> Self {
        assert!(
            tokens.last().is_some_and(|t| t.token_type == TokenType::EofToken),
            "token sequence must be non-empty and end with an EOF token"
        );
        return TokenStream {
            tokens,
            eof: &tokens[tokens.len() - 1],
            pos: -1,
        };
    }

    pub fn token_at(&self, num: isize) -> &'a Token {
        return usize::try_from(num)
            .ok()
            .and_then(|idx| self.tokens.get(idx))
            .unwrap_or(self.eof);
    }

    pub fn current(&self) -> &'a Token {
        return self.token_at(self.pos);
    }

    pub fn next(&self) -> &'a Token {
        return self.token_at(self.pos + 1);
    }

    pub fn consume(&mut self) {
        self.pos += 1;
    }

    pub fn reconsume(&mut self) {
        self.pos -= 1;
    }

    pub fn position(&self) -> isize {
        return self.pos;
    }

    pub fn tokens(&self) -> &'a [Token] {
        return self.tokens;
    }
}
