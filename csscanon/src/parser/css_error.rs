use std::fmt;

use miette::{Diagnostic, Severity};
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::parser::css_token::Position;

/// First parameter of every error produced by this crate.
pub const STYLE_PARAM: &str = "style";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter, Serialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    CssSyntaxEofInPreludeOfQualifiedRule,
    CssExcessivelyNested,
    CssSyntaxInvalidAtRule,
    CssSyntaxInvalidDeclaration,
    CssSyntaxIncompleteDeclaration,
    CssSyntaxMalformedMediaQuery,
    CssSyntaxBadUrl,
}

impl ErrorCode {
    pub fn help(&self) -> &'static str {
        use ErrorCode::*;
        return match self {
            CssSyntaxEofInPreludeOfQualifiedRule => {
                "the selector of this rule is not followed by a `{` block"
            }
            CssExcessivelyNested => "blocks and functions are nested too deeply",
            CssSyntaxInvalidAtRule => "at-rules are not allowed inside a declaration list",
            CssSyntaxInvalidDeclaration => "a declaration must start with a property name",
            CssSyntaxIncompleteDeclaration => "the property name is not followed by `:`",
            CssSyntaxMalformedMediaQuery => "the media query list of this @media rule is malformed",
            CssSyntaxBadUrl => "url() must contain a single string argument",
        };
    }
}

/// A recoverable parse error. Errors are collected, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "tokenType", rename = "ERROR")]
#[error("{code} at {pos}")]
pub struct ErrorToken {
    #[serde(flatten)]
    pub pos: Position,
    pub code: ErrorCode,
    pub params: Vec<String>,
}

impl ErrorToken {
    pub fn new(code: ErrorCode, params: Vec<String>, pos: Position) -> Self {
        return ErrorToken { pos, code, params };
    }

    /// Error with the `style` parameter followed by `extra`.
    pub fn style(code: ErrorCode, pos: Position, extra: &[&str]) -> Self {
        let params = std::iter::once(STYLE_PARAM)
            .chain(extra.iter().copied())
            .map(str::to_owned)
            .collect();
        return ErrorToken::new(code, params, pos);
    }
}

impl Diagnostic for ErrorToken {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        return Some(Box::new(self.code));
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        return Some(Box::new(self.code.help()));
    }

    fn severity(&self) -> Option<Severity> {
        return Some(Severity::Error);
    }
}

/// Pushes an error and traces it.
pub(crate) fn report(errors: &mut Vec<ErrorToken>, error: ErrorToken) {
    tracing::debug!(code = %error.code, pos = %error.pos, params = ?error.params, "css parse error");
    errors.push(error);
}
