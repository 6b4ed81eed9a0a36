//! Result Feed Adapters - External Match Result Sources

pub mod http_feed;

pub use http_feed::HttpResultFeed;
