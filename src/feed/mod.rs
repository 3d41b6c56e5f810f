// Feed ingestion: fetch a feed, structure it as a generic tree and normalize
// its entries into canonical records

pub mod extract;
pub mod fetcher;
pub mod node;
pub mod normalize;
pub mod parser;

pub use extract::{extract_content, extract_link, html_to_text};
pub use fetcher::Fetcher;
pub use node::FeedNode;
pub use normalize::{normalize_entries, FeatureEntry};
pub use parser::{entry_nodes, parse_document, parse_feed};
