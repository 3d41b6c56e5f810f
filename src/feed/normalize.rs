use super::extract::{extract_content, extract_link, html_to_text};
use super::node::FeedNode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Canonical record for one feature announced by an availability feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEntry {
    pub id: String,
    pub title: String,
    pub link: String,
    /// Timestamp as supplied by the feed, or empty
    pub updated: String,
    pub summary_html: String,
    pub summary_text: String,
}

/// Normalize raw entries, silently dropping any without an id, title or link.
/// Valid entries keep their relative order.
pub fn normalize_entries(entries: &[&FeedNode]) -> Vec<FeatureEntry> {
    entries
        .iter()
        .filter_map(|entry| normalize_entry(entry))
        .collect()
}

/// Normalize a single raw entry
pub fn normalize_entry(entry: &FeedNode) -> Option<FeatureEntry> {
    if !entry.is_object() {
        return None;
    }

    let id = first_content(entry, &["id", "guid"]);
    let title = first_content(entry, &["title"]);
    let link = entry.get("link").map(extract_link).unwrap_or_default();

    if id.is_empty() || title.is_empty() || link.is_empty() {
        debug!("Skipping entry without id, title or link (id: {:?})", id);
        return None;
    }

    let updated = first_content(entry, &["updated", "published", "pubDate"]);
    let summary_html = first_content(entry, &["content", "summary", "description"]);
    let summary_text = html_to_text(&summary_html);

    Some(FeatureEntry {
        id,
        title,
        link,
        updated,
        summary_html,
        summary_text,
    })
}

/// First non-empty payload among the given fields
fn first_content(entry: &FeedNode, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| entry.get(key))
        .map(extract_content)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}
