#![allow(clippy::needless_return)]

pub mod config;
pub mod logging;
pub mod parser;
pub mod services;

pub use config::{BlockType, CssParsingConfig};
pub use parser::{parse_inline_style, parse_stylesheet, ErrorCode, ErrorToken, Stylesheet, Token, TokenType};
pub use services::{extract_urls, parse_media_queries, ParsedCssUrl};
