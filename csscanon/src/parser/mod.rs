pub mod component_value;
pub mod css_error;
pub mod css_nodes;
pub mod css_parser;
pub mod css_token;
mod prefix;
pub mod token_stream;

#[cfg(test)]
pub(crate) mod test_lexer;

pub use component_value::{extract_function, extract_simple_block, MAX_CSS_RECURSION};
pub use css_error::{ErrorCode, ErrorToken};
pub use css_nodes::{AtRule, Declaration, QualifiedRule, Rule, RuleVisitor, Stylesheet};
pub use css_parser::{parse_inline_style, parse_stylesheet, Canonicalizer};
pub use css_token::{Position, Token, TokenType};
pub use prefix::{strip_min_max_prefix, strip_vendor_prefix};
pub use token_stream::TokenStream;
