use serde::Serialize;
use smol_str::SmolStr;

use crate::parser::css_error::{report, ErrorCode, ErrorToken};
use crate::parser::{AtRule, Declaration, Position, QualifiedRule, RuleVisitor, Stylesheet, Token, TokenType};

/// A url found in a declaration value, either `url(foo.png)` or
/// `url("foo.png")`. `pos` is the position of the left-most token of the
/// construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tokenType", rename = "PARSED_CSS_URL", rename_all = "camelCase")]
pub struct ParsedCssUrl {
    #[serde(flatten)]
    pub pos: Position,
    pub utf8_url: SmolStr,
    /// Name of the enclosing at-rule, empty at the top level.
    pub at_rule_scope: SmolStr,
}

/// Collects the urls of every declaration in `stylesheet`.
///
/// Either all urls are appended or none: if any `url(` function is malformed,
/// `CSS_SYNTAX_BAD_URL` is recorded and the urls collected by this call are
/// dropped again.
#[tracing::instrument(skip_all)]
pub fn extract_urls(stylesheet: &Stylesheet, parsed_urls: &mut Vec<ParsedCssUrl>, errors: &mut Vec<ErrorToken>) {
    let urls_before = parsed_urls.len();
    let errors_before = errors.len();
    let mut visitor = UrlFunctionVisitor::new(parsed_urls, errors);
    stylesheet.accept(&mut visitor);
    if errors.len() != errors_before {
        parsed_urls.truncate(urls_before);
    }
}

/// Like [`extract_urls`], for a single declaration such as one from an
/// inline style.
#[tracing::instrument(skip_all, fields(name = %declaration.name))]
pub fn extract_urls_from_declaration(
    declaration: &Declaration,
    parsed_urls: &mut Vec<ParsedCssUrl>,
    errors: &mut Vec<ErrorToken>,
) {
    let urls_before = parsed_urls.len();
    let errors_before = errors.len();
    let mut visitor = UrlFunctionVisitor::new(parsed_urls, errors);
    declaration.accept(&mut visitor);
    if errors.len() != errors_before {
        parsed_urls.truncate(urls_before);
    }
}

struct UrlFunctionVisitor<'o> {
    parsed_urls: &'o mut Vec<ParsedCssUrl>,
    errors: &'o mut Vec<ErrorToken>,
    at_rule_scope: SmolStr,
}

impl<'o> UrlFunctionVisitor<'o> {
    fn new(parsed_urls: &'o mut Vec<ParsedCssUrl>, errors: &'o mut Vec<ErrorToken>) -> Self {
        return UrlFunctionVisitor {
            parsed_urls,
            errors,
            at_rule_scope: SmolStr::default(),
        };
    }

    fn push(&mut self, pos: Position, utf8_url: SmolStr) {
        self.parsed_urls.push(ParsedCssUrl {
            pos,
            utf8_url,
            at_rule_scope: self.at_rule_scope.clone(),
        });
    }
}

impl<'a> RuleVisitor<'a> for UrlFunctionVisitor<'_> {
    fn visit_at_rule(&mut self, at_rule: &'a AtRule) {
        self.at_rule_scope = at_rule.name.clone();
    }

    fn leave_at_rule(&mut self, _at_rule: &'a AtRule) {
        self.at_rule_scope = SmolStr::default();
    }

    fn visit_qualified_rule(&mut self, _qualified_rule: &'a QualifiedRule) {
        self.at_rule_scope = SmolStr::default();
    }

    fn visit_declaration(&mut self, declaration: &'a Declaration) {
        let value = &declaration.value;
        debug_assert!(value.last().is_some_and(Token::is_eof));
        let mut idx = 0;
        while idx + 1 < value.len() {
            let token = &value[idx];
            if token.is(TokenType::Url) {
                self.push(token.pos, token.value.clone());
                idx += 1;
            } else if token.is(TokenType::FunctionToken) && token.value == "url" {
                match parse_url_function(value, idx) {
                    Some((url, after)) => {
                        self.push(token.pos, url);
                        idx = after;
                    }
                    None => {
                        report(self.errors, ErrorToken::style(ErrorCode::CssSyntaxBadUrl, token.pos, &[]));
                        return;
                    }
                }
            } else {
                idx += 1;
            }
        }
    }
}

/// Parses `url( S* STRING S* )` starting at the function token at `idx`.
/// Returns the string and the index after the closing paren.
fn parse_url_function(tokens: &[Token], idx: usize) -> Option<(SmolStr, usize)> {
    let idx = skip_whitespace(tokens, idx + 1);
    let url = tokens.get(idx).filter(|t| t.is(TokenType::String))?;
    let idx = skip_whitespace(tokens, idx + 1);
    tokens.get(idx).filter(|t| t.is(TokenType::CloseParen))?;
    return Some((url.value.clone(), idx + 1));
}

fn skip_whitespace(tokens: &[Token], mut idx: usize) -> usize {
    while tokens.get(idx).is_some_and(|t| t.is(TokenType::Whitespace)) {
        idx += 1;
    }
    return idx;
}
