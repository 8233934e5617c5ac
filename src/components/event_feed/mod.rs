//! The shared event feed: transport, parsing and today's row.

pub mod models;
pub mod parser;
pub mod selector;
pub mod source;

pub use models::{Column, EventRecord};
pub use parser::parse_feed;
pub use selector::select_today;
pub use source::{FeedSource, HttpFeedSource};
