pub mod css_urls;
pub mod important;
pub mod media_queries;

pub use css_urls::{extract_urls, extract_urls_from_declaration, ParsedCssUrl};
pub use important::extract_important_declarations;
pub use media_queries::parse_media_queries;
