use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use smol_str::SmolStr;

use crate::parser::css_token::{Position, Token, TokenType};

/// Member of a list of rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rule {
    AtRule(AtRule),
    QualifiedRule(QualifiedRule),
}

impl Rule {
    pub fn pos(&self) -> Position {
        return match self {
            Rule::AtRule(r) => r.pos,
            Rule::QualifiedRule(r) => r.pos,
        };
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        return match self {
            Rule::AtRule(r) => Some(r),
            Rule::QualifiedRule(_) => None,
        };
    }

    pub fn as_qualified_rule(&self) -> Option<&QualifiedRule> {
        return match self {
            Rule::AtRule(_) => None,
            Rule::QualifiedRule(r) => Some(r),
        };
    }

    pub fn accept<'a>(&'a self, visitor: &mut impl RuleVisitor<'a>) {
        match self {
            Rule::AtRule(r) => r.accept(visitor),
            Rule::QualifiedRule(r) => r.accept(visitor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tokenType", rename = "STYLESHEET")]
pub struct Stylesheet {
    #[serde(flatten)]
    pub pos: Position,
    pub rules: Vec<Rule>,
    pub eof: Token,
}

impl Stylesheet {
    pub fn accept<'a>(&'a self, visitor: &mut impl RuleVisitor<'a>) {
        visitor.visit_stylesheet(self);
        for rule in &self.rules {
            rule.accept(visitor);
        }
        visitor.leave_stylesheet(self);
    }

    /// Dump of the tree, each node tagged with its `tokenType`.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        return serde_json::to_value(self);
    }
}

/// An at-rule such as `@media screen { ... }` or `@import url(a.css);`.
///
/// At most one of `rules` and `declarations` is populated, depending on the
/// block type configured for `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tokenType", rename = "AT_RULE")]
pub struct AtRule {
    #[serde(flatten)]
    pub pos: Position,
    pub name: SmolStr,
    pub prelude: Vec<Token>,
    pub declarations: Vec<Declaration>,
    pub rules: Vec<Rule>,
}

impl AtRule {
    pub fn new(name: SmolStr, pos: Position) -> Self {
        return AtRule {
            pos,
            name,
            prelude: Vec::new(),
            declarations: Vec::new(),
            rules: Vec::new(),
        };
    }

    pub fn accept<'a>(&'a self, visitor: &mut impl RuleVisitor<'a>) {
        visitor.visit_at_rule(self);
        for declaration in &self.declarations {
            declaration.accept(visitor);
        }
        for rule in &self.rules {
            rule.accept(visitor);
        }
        visitor.leave_at_rule(self);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tokenType", rename = "QUALIFIED_RULE")]
pub struct QualifiedRule {
    #[serde(flatten)]
    pub pos: Position,
    pub prelude: Vec<Token>,
    pub declarations: Vec<Declaration>,
}

impl QualifiedRule {
    pub fn new(pos: Position) -> Self {
        return QualifiedRule {
            pos,
            prelude: Vec::new(),
            declarations: Vec::new(),
        };
    }

    /// The non-empty token values of the prelude glued together, e.g. `.foobar`
    /// for `.foo bar`.
    pub fn rule_name(&self) -> String {
        return self
            .prelude
            .iter()
            .filter(|t| !t.value.is_empty())
            .map(|t| t.value.as_str())
            .collect();
    }

    pub fn accept<'a>(&'a self, visitor: &mut impl RuleVisitor<'a>) {
        visitor.visit_qualified_rule(self);
        for declaration in &self.declarations {
            declaration.accept(visitor);
        }
        visitor.leave_qualified_rule(self);
    }
}

/// `name: value` with the value terminated by an EOF token. A trailing
/// `!important` is removed from `value` and recorded in `important`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tokenType", rename = "DECLARATION")]
pub struct Declaration {
    #[serde(flatten)]
    pub pos: Position,
    pub name: SmolStr,
    pub value: Vec<Token>,
    pub important: bool,
    /// Position of the `!` of `!important`.
    #[serde(skip)]
    pub important_pos: Option<Position>,
}

impl Declaration {
    pub fn new(name: SmolStr, pos: Position) -> Self {
        return Declaration {
            pos,
            name,
            value: Vec::new(),
            important: false,
            important_pos: None,
        };
    }

    /// Leading ident (or number) of the value, skipping one whitespace token.
    /// Empty if the value starts with anything else.
    pub fn first_ident(&self) -> &str {
        let candidate = match self.value.first() {
            Some(t) if t.is(TokenType::Whitespace) => self.value.get(1),
            other => other,
        };
        return match candidate {
            Some(t) if t.is(TokenType::Ident) || t.is(TokenType::Number) => t.value.as_str(),
            _ => "",
        };
    }

    pub fn accept<'a>(&'a self, visitor: &mut impl RuleVisitor<'a>) {
        visitor.visit_declaration(self);
        visitor.leave_declaration(self);
    }
}

/// Renders as css, e.g. `color: red !important;`.
impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .value
            .iter()
            .filter(|t| !t.is_eof())
            .format("");
        write!(f, "{}:{}", self.name, body)?;
        if self.important {
            f.write_str("!important")?;
        }
        if self.value.last().is_some_and(Token::is_eof) {
            f.write_str(";")?;
        }
        Ok(())
    }
}

/// Traversal hooks over the rule tree. Every hook defaults to a no-op, so a
/// visitor implements only what it needs.
pub trait RuleVisitor<'a> {
    fn visit_stylesheet(&mut self, _stylesheet: &'a Stylesheet) {}
    fn leave_stylesheet(&mut self, _stylesheet: &'a Stylesheet) {}
    fn visit_at_rule(&mut self, _at_rule: &'a AtRule) {}
    fn leave_at_rule(&mut self, _at_rule: &'a AtRule) {}
    fn visit_qualified_rule(&mut self, _qualified_rule: &'a QualifiedRule) {}
    fn leave_qualified_rule(&mut self, _qualified_rule: &'a QualifiedRule) {}
    fn visit_declaration(&mut self, _declaration: &'a Declaration) {}
    fn leave_declaration(&mut self, _declaration: &'a Declaration) {}
}
