use std::collections::HashMap;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::parser::strip_vendor_prefix;

/// How the `{}` block of an at-rule is parsed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    ParseAsRules,
    ParseAsDeclarations,
    #[default]
    ParseAsIgnore,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("malformed css parsing config: {0}")]
    #[diagnostic(code(csscanon::config::malformed))]
    Malformed(#[from] serde_json::Error),
}

/// Block types per at-rule name, with a fallback for unknown at-rules.
///
/// Loaded from json of the form
/// `{"atRuleSpec": {"media": "PARSE_AS_RULES"}, "defaultSpec": "PARSE_AS_IGNORE"}`.
/// Keys are matched case-sensitively against vendor-prefix-stripped names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssParsingConfig {
    #[serde(default)]
    pub at_rule_spec: HashMap<String, BlockType>,
    #[serde(default)]
    pub default_spec: BlockType,
}

impl CssParsingConfig {
    pub fn new(default_spec: BlockType) -> Self {
        return CssParsingConfig {
            at_rule_spec: HashMap::new(),
            default_spec,
        };
    }

    /// The configuration used by the document validator: `@font-face` and
    /// `@page` hold declarations, `@media`, `@supports` and `@keyframes` hold
    /// rules, anything else is ignored.
    pub fn standard() -> Self {
        return CssParsingConfig::new(BlockType::ParseAsIgnore)
            .with_at_rule("font-face", BlockType::ParseAsDeclarations)
            .with_at_rule("page", BlockType::ParseAsDeclarations)
            .with_at_rule("media", BlockType::ParseAsRules)
            .with_at_rule("supports", BlockType::ParseAsRules)
            .with_at_rule("keyframes", BlockType::ParseAsRules);
    }

    pub fn with_at_rule(mut self, name: impl Into<String>, block_type: BlockType) -> Self {
        self.at_rule_spec.insert(name.into(), block_type);
        return self;
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(json)?;
        return Ok(config);
    }

    pub fn block_type_for(&self, at_rule_name: &str) -> BlockType {
        return self
            .at_rule_spec
            .get(strip_vendor_prefix(at_rule_name))
            .copied()
            .unwrap_or(self.default_spec);
    }
}
