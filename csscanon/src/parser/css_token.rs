use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;
use strum::{Display, EnumIter, IntoStaticStr};

/// Kind of a lexed css token, as delivered by the tokenizer.
///
/// The names render in SCREAMING_SNAKE_CASE (`OPEN_CURLY`, `EOF_TOKEN`, ...)
/// both through `Display` and when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Whitespace,
    Ident,
    AtKeyword,
    FunctionToken,
    Url,
    String,
    Delim,
    Number,
    Percentage,
    Dimension,
    Hash,
    Colon,
    Semicolon,
    Comma,
    OpenCurly,
    CloseCurly,
    OpenSquare,
    CloseSquare,
    OpenParen,
    CloseParen,
    Cdo, // <!--
    Cdc, // -->
    IncludeMatch,   // ~=
    DashMatch,      // |=
    PrefixMatch,    // ^=
    SuffixMatch,    // $=
    SubstringMatch, // *=
    Column,         // ||
    EofToken,
    Error,
}

impl TokenType {
    /// The closing grouping token for an opening one.
    pub fn mirror(&self) -> Option<TokenType> {
        use TokenType::*;
        return match self {
            OpenCurly => Some(CloseCurly),
            OpenSquare => Some(CloseSquare),
            OpenParen => Some(CloseParen),
            CloseCurly => Some(OpenCurly),
            CloseSquare => Some(OpenSquare),
            CloseParen => Some(OpenParen),
            _ => None,
        };
    }

    pub fn is_opening_grouping(&self) -> bool {
        return matches!(
            self,
            TokenType::OpenCurly | TokenType::OpenSquare | TokenType::OpenParen
        );
    }
}

/// `line` is 1-based, `col` is 0-based and counted in code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        return Position { line, col };
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A single css token.
///
/// `value` holds the decoded payload: the name of idents, functions,
/// at-keywords and hashes, the contents of strings and urls, the character of
/// a delim and the source representation of numeric tokens (`12`, `50%`,
/// `12cm`). Punctuation and EOF tokens carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub pos: Position,
    #[serde(rename = "tokenType")]
    pub token_type: TokenType,
    #[serde(skip_serializing_if = "SmolStr::is_empty")]
    pub value: SmolStr,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<SmolStr>, pos: Position) -> Self {
        return Token {
            token_type,
            value: value.into(),
            pos,
        };
    }

    /// Token without payload, e.g. punctuation.
    pub fn bare(token_type: TokenType, pos: Position) -> Self {
        return Token::new(token_type, SmolStr::default(), pos);
    }

    pub fn eof(pos: Position) -> Self {
        return Token::bare(TokenType::EofToken, pos);
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        return self.token_type == token_type;
    }

    pub fn is_eof(&self) -> bool {
        return self.token_type == TokenType::EofToken;
    }

    /// ASCII case-insensitive comparison of an ident's value.
    pub fn ascii_match(&self, s: &str) -> bool {
        return self.token_type == TokenType::Ident && self.value.eq_ignore_ascii_case(s);
    }

    pub fn is_delim(&self, c: char) -> bool {
        return self.token_type == TokenType::Delim && self.value.chars().eq(std::iter::once(c));
    }
}

/// Re-serializes the token as css text.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenType::*;
        match self.token_type {
            Whitespace => f.write_str(" "),
            AtKeyword => write!(f, "@{}", self.value),
            FunctionToken => write!(f, "{}(", self.value),
            Url => write!(f, "url({})", self.value),
            String => write!(f, "'{}'", self.value),
            Hash => write!(f, "#{}", self.value),
            Colon => f.write_str(":"),
            Semicolon => f.write_str(";"),
            Comma => f.write_str(","),
            OpenCurly => f.write_str("{"),
            CloseCurly => f.write_str("}"),
            OpenSquare => f.write_str("["),
            CloseSquare => f.write_str("]"),
            OpenParen => f.write_str("("),
            CloseParen => f.write_str(")"),
            Cdo => f.write_str("<!--"),
            Cdc => f.write_str("-->"),
            IncludeMatch => f.write_str("~="),
            DashMatch => f.write_str("|="),
            PrefixMatch => f.write_str("^="),
            SuffixMatch => f.write_str("$="),
            SubstringMatch => f.write_str("*="),
            Column => f.write_str("||"),
            EofToken | Error => Ok(()),
            Ident | Delim | Number | Percentage | Dimension => f.write_str(&self.value),
        }
    }
}
