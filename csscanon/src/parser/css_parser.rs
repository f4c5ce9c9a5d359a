use crate::config::{BlockType, CssParsingConfig};
use crate::parser::component_value::{consume_component_value, extract_simple_block, report_nesting};
use crate::parser::css_error::{report, ErrorCode, ErrorToken};
use crate::parser::css_nodes::*;
use crate::parser::css_token::{Token, TokenType};
use crate::parser::token_stream::TokenStream;

/// Parses a token sequence into a [`Stylesheet`]. Block types of at-rules
/// come from `config`.
///
/// Parse errors are appended to `errors` and never abort parsing.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse_stylesheet(
    tokens: &[Token],
    config: &CssParsingConfig,
    errors: &mut Vec<ErrorToken>,
) -> Stylesheet {
    return Canonicalizer::new(config).parse_stylesheet(tokens, errors);
}

/// Parses the contents of a `style` attribute, e.g. `color: red; top: 0`.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse_inline_style(tokens: &[Token], errors: &mut Vec<ErrorToken>) -> Vec<Declaration> {
    let config = CssParsingConfig::new(BlockType::ParseAsDeclarations);
    return Canonicalizer::new(&config).parse_list_of_declarations(tokens, errors);
}

/// Grammar parser from tokens to rules.
///
/// <https://www.w3.org/TR/css-syntax-3/#parsing>, except that at-rules
/// inside declaration lists are rejected and blocks are parsed as rules,
/// declarations or not at all depending on the configured block type.
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer<'c> {
    config: &'c CssParsingConfig,
}

impl<'c> Canonicalizer<'c> {
    pub fn new(config: &'c CssParsingConfig) -> Self {
        return Canonicalizer { config };
    }

    pub fn block_type_for(&self, at_rule_name: &str) -> BlockType {
        return self.config.block_type_for(at_rule_name);
    }

    pub fn parse_stylesheet(&self, tokens: &[Token], errors: &mut Vec<ErrorToken>) -> Stylesheet {
        let stream = TokenStream::new(tokens);
        let pos = stream.token_at(0).pos;
        let eof = stream.token_at(tokens.len() as isize).clone();
        let rules = self.parse_list_of_rules(tokens, true, errors);
        return Stylesheet { pos, rules, eof };
    }

    /// CDO and CDC are only skipped at the top level; nested, they start a
    /// qualified rule.
    pub fn parse_list_of_rules(
        &self,
        tokens: &[Token],
        top_level: bool,
        errors: &mut Vec<ErrorToken>,
    ) -> Vec<Rule> {
        let mut stream = TokenStream::new(tokens);
        let mut rules = Vec::new();
        loop {
            stream.consume();
            match stream.current().token_type {
                TokenType::Whitespace => continue,
                TokenType::EofToken => return rules,
                TokenType::Cdo | TokenType::Cdc if top_level => continue,
                TokenType::AtKeyword => {
                    let at_rule = self.parse_at_rule(&mut stream, errors);
                    rules.push(Rule::AtRule(at_rule));
                }
                _ => self.parse_qualified_rule(&mut stream, &mut rules, errors),
            }
        }
    }

    /// Expects the current token to be the at-keyword.
    pub fn parse_at_rule(&self, stream: &mut TokenStream<'_>, errors: &mut Vec<ErrorToken>) -> AtRule {
        let start = stream.current();
        debug_assert!(start.is(TokenType::AtKeyword));
        let mut rule = AtRule::new(start.value.clone(), start.pos);

        loop {
            stream.consume();
            let current = stream.current();
            match current.token_type {
                TokenType::Semicolon => {
                    rule.prelude.push(Token::eof(current.pos));
                    return rule;
                }
                TokenType::EofToken => {
                    rule.prelude.push(current.clone());
                    return rule;
                }
                TokenType::OpenCurly => {
                    rule.prelude.push(Token::eof(current.pos));
                    let contents = extract_simple_block(stream, errors);
                    let block_type = self.block_type_for(&rule.name);
                    tracing::trace!(name = %rule.name, %block_type, "at-rule block");
                    match block_type {
                        BlockType::ParseAsRules => {
                            rule.rules = self.parse_list_of_rules(&contents, false, errors);
                        }
                        BlockType::ParseAsDeclarations => {
                            rule.declarations = self.parse_list_of_declarations(&contents, errors);
                        }
                        BlockType::ParseAsIgnore => {}
                    }
                    return rule;
                }
                _ => {
                    let result = consume_component_value(stream, &mut rule.prelude, 0);
                    report_nesting(result, stream, errors);
                }
            }
        }
    }

    /// Appends the qualified rule starting at the current token to `rules`.
    /// A prelude running into EOF drops the rule and records an error instead.
    pub fn parse_qualified_rule(
        &self,
        stream: &mut TokenStream<'_>,
        rules: &mut Vec<Rule>,
        errors: &mut Vec<ErrorToken>,
    ) {
        debug_assert!(!stream.current().is_eof() && !stream.current().is(TokenType::AtKeyword));
        let mut rule = QualifiedRule::new(stream.current().pos);
        stream.reconsume();

        loop {
            stream.consume();
            let current = stream.current();
            match current.token_type {
                TokenType::EofToken => {
                    report(
                        errors,
                        ErrorToken::style(ErrorCode::CssSyntaxEofInPreludeOfQualifiedRule, rule.pos, &[]),
                    );
                    return;
                }
                TokenType::OpenCurly => {
                    rule.prelude.push(Token::eof(current.pos));
                    let contents = extract_simple_block(stream, errors);
                    rule.declarations = self.parse_list_of_declarations(&contents, errors);
                    rules.push(Rule::QualifiedRule(rule));
                    return;
                }
                _ => {
                    let result = consume_component_value(stream, &mut rule.prelude, 0);
                    report_nesting(result, stream, errors);
                }
            }
        }
    }

    pub fn parse_list_of_declarations(&self, tokens: &[Token], errors: &mut Vec<ErrorToken>) -> Vec<Declaration> {
        let mut stream = TokenStream::new(tokens);
        let mut declarations = Vec::new();
        loop {
            stream.consume();
            let current = stream.current();
            match current.token_type {
                TokenType::Whitespace | TokenType::Semicolon => continue,
                TokenType::EofToken => return declarations,
                TokenType::AtKeyword => {
                    // parsed only to stay in sync with the stream, then dropped
                    let at_rule = self.parse_at_rule(&mut stream, errors);
                    report(
                        errors,
                        ErrorToken::style(ErrorCode::CssSyntaxInvalidAtRule, at_rule.pos, &[at_rule.name.as_str()]),
                    );
                }
                TokenType::Ident => self.parse_declaration(&mut stream, &mut declarations, errors),
                _ => {
                    report(
                        errors,
                        ErrorToken::style(ErrorCode::CssSyntaxInvalidDeclaration, current.pos, &[]),
                    );
                    stream.reconsume();
                    while !at_declaration_end(&stream) {
                        stream.consume();
                        let mut skipped = Vec::new();
                        let result = consume_component_value(&mut stream, &mut skipped, 0);
                        report_nesting(result, &stream, errors);
                    }
                }
            }
        }
    }

    /// Expects the current token to be the ident naming the declaration.
    /// Appends the declaration to `declarations` unless the name is not
    /// followed by a colon.
    pub fn parse_declaration(
        &self,
        stream: &mut TokenStream<'_>,
        declarations: &mut Vec<Declaration>,
        errors: &mut Vec<ErrorToken>,
    ) {
        let start = stream.current();
        debug_assert!(start.is(TokenType::Ident));
        let mut declaration = Declaration::new(start.value.clone(), start.pos);

        while stream.next().is(TokenType::Whitespace) {
            stream.consume();
        }

        stream.consume();
        if !stream.current().is(TokenType::Colon) {
            report(
                errors,
                ErrorToken::style(ErrorCode::CssSyntaxIncompleteDeclaration, start.pos, &[]),
            );
            stream.reconsume();
            while !at_declaration_end(stream) {
                stream.consume();
            }
            return;
        }

        while !at_declaration_end(stream) {
            stream.consume();
            let result = consume_component_value(stream, &mut declaration.value, 0);
            report_nesting(result, stream, errors);
        }
        declaration.value.push(Token::eof(stream.next().pos));

        if let Some(bang) = important_start(&declaration.value) {
            declaration.important_pos = Some(declaration.value[bang].pos);
            let eof = declaration.value.len() - 1;
            declaration.value.drain(bang..eof);
            declaration.important = true;
        }

        declarations.push(declaration);
    }
}

fn at_declaration_end(stream: &TokenStream<'_>) -> bool {
    let next = stream.next();
    return next.is(TokenType::Semicolon) || next.is_eof();
}

/// Index of the `!` of a trailing `! important` in an EOF-terminated value.
/// Whitespace may surround both tokens and the ident matches
/// case-insensitively.
fn important_start(value: &[Token]) -> Option<usize> {
    let mut found_important = false;
    let before_eof = value.len().checked_sub(1)?;
    for (idx, token) in value[..before_eof].iter().enumerate().rev() {
        if token.is(TokenType::Whitespace) {
            continue;
        } else if token.ascii_match("important") {
            found_important = true;
        } else if found_important && token.is_delim('!') {
            return Some(idx);
        } else {
            return None;
        }
    }
    return None;
}
