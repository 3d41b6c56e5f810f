pub mod config;
pub mod error;

// Feed ingestion: tree parsing, field extraction, normalization, fetching
pub mod feed;

// Aggregation of both feeds with an injectable cache
pub mod timeline;

pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use feed::FeatureEntry;
pub use timeline::{Timeline, TimelineCache, TimelineData};
