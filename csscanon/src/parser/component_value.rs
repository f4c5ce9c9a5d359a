//! Consumption of component values: single tokens, balanced `{}` `[]` `()`
//! blocks and function calls. All routines thread an explicit nesting depth
//! and give up past [`MAX_CSS_RECURSION`], so the call stack stays bounded no
//! matter how deeply the input nests.

use thiserror::Error;

use crate::parser::css_error::{report, ErrorCode, ErrorToken};
use crate::parser::css_token::{Token, TokenType};
use crate::parser::token_stream::TokenStream;

pub const MAX_CSS_RECURSION: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("component values nested deeper than {MAX_CSS_RECURSION} levels")]
pub struct ExcessivelyNested;

/// Appends the component value starting at the current token to `out`,
/// consuming everything it appends.
pub fn consume_component_value(
    stream: &mut TokenStream<'_>,
    out: &mut Vec<Token>,
    depth: usize,
) -> Result<(), ExcessivelyNested> {
    if depth > MAX_CSS_RECURSION {
        return Err(ExcessivelyNested);
    }
    let current = stream.current();
    if current.token_type.is_opening_grouping() {
        consume_simple_block(stream, out, depth + 1)?;
    } else if current.is(TokenType::FunctionToken) {
        consume_function(stream, out, depth + 1)?;
    } else {
        out.push(current.clone());
    }
    return Ok(());
}

/// Appends a block including its opening and closing tokens. A block cut
/// short by EOF ends with that EOF instead.
pub fn consume_simple_block(
    stream: &mut TokenStream<'_>,
    out: &mut Vec<Token>,
    depth: usize,
) -> Result<(), ExcessivelyNested> {
    if depth > MAX_CSS_RECURSION {
        return Err(ExcessivelyNested);
    }
    let start = stream.current();
    debug_assert!(start.token_type.is_opening_grouping());
    let mirror = start.token_type.mirror();

    out.push(start.clone());
    loop {
        stream.consume();
        let current = stream.current();
        if current.is_eof() || Some(current.token_type) == mirror {
            out.push(current.clone());
            return Ok(());
        }
        consume_component_value(stream, out, depth + 1)?;
    }
}

/// Appends a function call, from its function token up to and including the
/// closing paren (or EOF).
pub fn consume_function(
    stream: &mut TokenStream<'_>,
    out: &mut Vec<Token>,
    depth: usize,
) -> Result<(), ExcessivelyNested> {
    if depth > MAX_CSS_RECURSION {
        return Err(ExcessivelyNested);
    }
    debug_assert!(stream.current().is(TokenType::FunctionToken));

    out.push(stream.current().clone());
    loop {
        stream.consume();
        let current = stream.current();
        if current.is_eof() || current.is(TokenType::CloseParen) {
            out.push(current.clone());
            return Ok(());
        }
        consume_component_value(stream, out, depth + 1)?;
    }
}

/// Records `CSS_EXCESSIVELY_NESTED` at the current token if `result` failed.
pub(crate) fn report_nesting(
    result: Result<(), ExcessivelyNested>,
    stream: &TokenStream<'_>,
    errors: &mut Vec<ErrorToken>,
) {
    if result.is_err() {
        report(
            errors,
            ErrorToken::style(ErrorCode::CssExcessivelyNested, stream.current().pos, &[]),
        );
    }
}

fn extract(
    stream: &mut TokenStream<'_>,
    errors: &mut Vec<ErrorToken>,
    consume: fn(&mut TokenStream<'_>, &mut Vec<Token>, usize) -> Result<(), ExcessivelyNested>,
) -> Vec<Token> {
    let mut consumed = Vec::new();
    let result = consume(stream, &mut consumed, 0);
    if result.is_err() {
        consumed.push(Token::eof(stream.current().pos));
    }
    report_nesting(result, stream, errors);

    debug_assert!(consumed.len() >= 2);
    if let Some(last) = consumed.last_mut() {
        *last = Token::eof(last.pos);
    }
    return consumed;
}

/// Contents of the block at the current token without its opening token,
/// with the closing token replaced by an EOF at the same position.
pub fn extract_simple_block(stream: &mut TokenStream<'_>, errors: &mut Vec<ErrorToken>) -> Vec<Token> {
    let mut contents = extract(stream, errors, consume_simple_block);
    contents.remove(0);
    return contents;
}

/// The function call at the current token including its function token, with
/// the closing paren replaced by an EOF at the same position.
pub fn extract_function(stream: &mut TokenStream<'_>, errors: &mut Vec<ErrorToken>) -> Vec<Token> {
    return extract(stream, errors, consume_function);
}
