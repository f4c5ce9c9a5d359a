//! Synthetic token streams for the benches. Positions advance one column per
//! token, which is all the parser looks at.

use csscanon::{Token, TokenType};
use smol_str::SmolStr;

use csscanon::parser::Position;

#[derive(Default)]
pub struct TokenBuilder {
    tokens: Vec<Token>,
}

impl TokenBuilder {
    pub fn new() -> Self {
        return Self::default();
    }

    pub fn push(&mut self, token_type: TokenType, value: &str) -> &mut Self {
        let pos = Position::new(1, self.tokens.len() as u32);
        self.tokens.push(Token::new(token_type, SmolStr::new(value), pos));
        return self;
    }

    pub fn punct(&mut self, token_type: TokenType) -> &mut Self {
        return self.push(token_type, "");
    }

    pub fn ws(&mut self) -> &mut Self {
        return self.punct(TokenType::Whitespace);
    }

    /// `name: value;`
    pub fn declaration(&mut self, name: &str, value: &[(TokenType, &str)]) -> &mut Self {
        self.push(TokenType::Ident, name).punct(TokenType::Colon).ws();
        for (token_type, v) in value {
            self.push(*token_type, v);
        }
        return self.punct(TokenType::Semicolon);
    }

    pub fn finish(mut self) -> Vec<Token> {
        let pos = Position::new(1, self.tokens.len() as u32);
        self.tokens.push(Token::eof(pos));
        return self.tokens;
    }
}

/// `.cN { color: red; margin: 0 auto !important; }` repeated `rules` times.
pub fn flat_stylesheet(rules: usize) -> Vec<Token> {
    let mut b = TokenBuilder::new();
    for i in 0..rules {
        b.push(TokenType::Delim, ".").push(TokenType::Ident, &format!("c{i}")).ws();
        b.punct(TokenType::OpenCurly).ws();
        b.declaration("color", &[(TokenType::Ident, "red")]).ws();
        b.declaration(
            "margin",
            &[
                (TokenType::Number, "0"),
                (TokenType::Whitespace, ""),
                (TokenType::Ident, "auto"),
                (TokenType::Whitespace, ""),
                (TokenType::Delim, "!"),
                (TokenType::Ident, "important"),
            ],
        );
        b.ws().punct(TokenType::CloseCurly).ws();
    }
    return b.finish();
}

/// A single declaration whose value is `depth` nested parens.
pub fn deep_nesting(depth: usize) -> Vec<Token> {
    let mut b = TokenBuilder::new();
    b.push(TokenType::Ident, "a").punct(TokenType::OpenCurly);
    b.push(TokenType::Ident, "b").punct(TokenType::Colon);
    for _ in 0..depth {
        b.punct(TokenType::OpenParen);
    }
    for _ in 0..depth {
        b.punct(TokenType::CloseParen);
    }
    b.punct(TokenType::CloseCurly);
    return b.finish();
}

/// `@font-face` rules with one quoted and one unquoted url each.
pub fn font_faces(rules: usize) -> Vec<Token> {
    let mut b = TokenBuilder::new();
    for i in 0..rules {
        let (woff, ttf) = (format!("https://example.com/{i}.woff"), format!("{i}.ttf"));
        b.push(TokenType::AtKeyword, "font-face").ws().punct(TokenType::OpenCurly);
        b.declaration(
            "src",
            &[
                (TokenType::FunctionToken, "url"),
                (TokenType::String, woff.as_str()),
                (TokenType::CloseParen, ""),
                (TokenType::Comma, ""),
                (TokenType::Url, ttf.as_str()),
            ],
        );
        b.punct(TokenType::CloseCurly).ws();
    }
    return b.finish();
}

/// `@media screen and (min-width: Npx) {}` repeated `rules` times.
pub fn media_rules(rules: usize) -> Vec<Token> {
    let mut b = TokenBuilder::new();
    for i in 0..rules {
        b.push(TokenType::AtKeyword, "media").ws();
        b.push(TokenType::Ident, "screen").ws().push(TokenType::Ident, "and").ws();
        b.punct(TokenType::OpenParen).push(TokenType::Ident, "min-width").punct(TokenType::Colon).ws();
        b.push(TokenType::Dimension, &format!("{i}px")).punct(TokenType::CloseParen).ws();
        b.punct(TokenType::OpenCurly).punct(TokenType::CloseCurly).ws();
    }
    return b.finish();
}
