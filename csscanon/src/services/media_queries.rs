//! Media query lists of `@media` rules, checked against the grammar below
//! (`S` is a single optional whitespace token):
//!
//! ```text
//! media_query_list: S* [media_query [ ',' S* media_query ]* ]? EOF
//! media_query: [ONLY | NOT]? S* media_type S* [ AND S* expression ]*
//!            | expression [ AND S* expression ]*
//! media_type: IDENT
//! expression: '(' S* media_feature S* [ ':' S* expr ]? ')' S*
//! media_feature: IDENT
//! ```

use crate::parser::css_error::{report, ErrorCode, ErrorToken};
use crate::parser::{AtRule, RuleVisitor, Stylesheet, Token, TokenStream, TokenType, MAX_CSS_RECURSION};

/// Collects the media types and media features of every `@media` rule in
/// `stylesheet`. A rule with a malformed prelude contributes nothing and
/// records `CSS_SYNTAX_MALFORMED_MEDIA_QUERY` at the rule.
#[tracing::instrument(skip_all)]
pub fn parse_media_queries(
    stylesheet: &Stylesheet,
    media_types: &mut Vec<Token>,
    media_features: &mut Vec<Token>,
    errors: &mut Vec<ErrorToken>,
) {
    let mut visitor = MediaQueryVisitor {
        media_types,
        media_features,
        errors,
    };
    stylesheet.accept(&mut visitor);
}

struct MediaQueryVisitor<'o> {
    media_types: &'o mut Vec<Token>,
    media_features: &'o mut Vec<Token>,
    errors: &'o mut Vec<ErrorToken>,
}

impl<'a> RuleVisitor<'a> for MediaQueryVisitor<'_> {
    fn visit_at_rule(&mut self, at_rule: &'a AtRule) {
        if at_rule.name != "media" {
            return;
        }
        let mut parser = MediaQueryParser {
            stream: TokenStream::new(&at_rule.prelude),
            media_types: Vec::new(),
            media_features: Vec::new(),
        };
        if parser.parse_media_query_list() {
            tracing::trace!(
                types = parser.media_types.len(),
                features = parser.media_features.len(),
                "media query list"
            );
            self.media_types.append(&mut parser.media_types);
            self.media_features.append(&mut parser.media_features);
        } else {
            report(
                self.errors,
                ErrorToken::style(ErrorCode::CssSyntaxMalformedMediaQuery, at_rule.pos, &[]),
            );
        }
    }
}

/// Recursive descent over one prelude. Types and features are buffered so a
/// failing list leaves the caller's output untouched.
struct MediaQueryParser<'t> {
    stream: TokenStream<'t>,
    media_types: Vec<Token>,
    media_features: Vec<Token>,
}

impl<'t> MediaQueryParser<'t> {
    fn current(&self) -> &'t Token {
        return self.stream.current();
    }

    fn maybe_consume_whitespace(&mut self) {
        if self.current().is(TokenType::Whitespace) {
            self.stream.consume();
        }
    }

    fn parse_media_query_list(&mut self) -> bool {
        // the stream starts before the first token
        self.stream.consume();
        self.maybe_consume_whitespace();
        if !self.current().is_eof() {
            if !self.parse_media_query() {
                return false;
            }
            while self.current().is(TokenType::Comma) {
                self.stream.consume();
                self.maybe_consume_whitespace();
                if !self.parse_media_query() {
                    return false;
                }
            }
        }
        return self.current().is_eof();
    }

    fn parse_media_query(&mut self) -> bool {
        if self.current().is(TokenType::OpenParen) {
            if !self.parse_media_expression() {
                return false;
            }
        } else {
            if self.current().ascii_match("only") || self.current().ascii_match("not") {
                self.stream.consume();
            }
            self.maybe_consume_whitespace();
            if !self.parse_media_type() {
                return false;
            }
            self.maybe_consume_whitespace();
        }
        while self.current().ascii_match("and") {
            self.stream.consume();
            self.maybe_consume_whitespace();
            if !self.parse_media_expression() {
                return false;
            }
        }
        return true;
    }

    fn parse_media_type(&mut self) -> bool {
        if !self.current().is(TokenType::Ident) {
            return false;
        }
        let media_type = self.current().clone();
        self.media_types.push(media_type);
        self.stream.consume();
        return true;
    }

    fn parse_media_feature(&mut self) -> bool {
        if !self.current().is(TokenType::Ident) {
            return false;
        }
        let media_feature = self.current().clone();
        self.media_features.push(media_feature);
        self.stream.consume();
        return true;
    }

    fn parse_media_expression(&mut self) -> bool {
        if !self.current().is(TokenType::OpenParen) {
            return false;
        }
        self.stream.consume();
        self.maybe_consume_whitespace();
        if !self.parse_media_feature() {
            return false;
        }
        self.maybe_consume_whitespace();
        if self.current().is(TokenType::Colon) {
            self.stream.consume();
            self.maybe_consume_whitespace();
            // the value is not validated, only skipped up to the closing paren
            while !self.current().is_eof() {
                if self.current().is(TokenType::CloseParen) {
                    break;
                }
                if self.current().is(TokenType::FunctionToken) {
                    if !self.skip_function(0) {
                        return false;
                    }
                } else {
                    self.stream.consume();
                }
            }
        }
        if !self.current().is(TokenType::CloseParen) {
            return false;
        }
        self.stream.consume();
        self.maybe_consume_whitespace();
        return true;
    }

    /// Skips the function at the current token up to and including its
    /// closing paren. Fails on EOF or when nested too deeply.
    fn skip_function(&mut self, depth: usize) -> bool {
        if depth > MAX_CSS_RECURSION || !self.current().is(TokenType::FunctionToken) {
            return false;
        }
        self.stream.consume();
        while !self.current().is_eof() {
            if self.current().is(TokenType::FunctionToken) {
                if !self.skip_function(depth + 1) {
                    return false;
                }
            } else if self.current().is(TokenType::CloseParen) {
                self.stream.consume();
                return true;
            } else {
                self.stream.consume();
            }
        }
        return false;
    }
}
