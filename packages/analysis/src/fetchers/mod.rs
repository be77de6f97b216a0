//! Content fetcher implementations.

mod http;

pub use http::{extract_title, html_to_text, HttpContentFetcher};
