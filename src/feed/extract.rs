// Field extraction for values that show up in several incompatible shapes

use super::node::{FeedNode, CDATA_KEY, TEXT_KEY};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Keys that may hold an element's inline payload, in preference order.
const CONTENT_KEYS: [&str; 3] = [TEXT_KEY, CDATA_KEY, "value"];

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|(lt|gt|amp|quot|nbsp));").unwrap()
});

/// Resolve a link field to a URL string.
///
/// Atom entries may declare several links; the first one whose `rel` is not
/// `self` wins, falling back to the first link. Unresolvable input yields an
/// empty string.
pub fn extract_link(node: &FeedNode) -> String {
    match node {
        FeedNode::Text(href) => href.clone(),
        FeedNode::List(links) => links
            .iter()
            .find(|link| link.get("rel").and_then(FeedNode::as_text) != Some("self"))
            .or_else(|| links.first())
            .map(extract_link)
            .unwrap_or_default(),
        FeedNode::Object(_) => node
            .get("href")
            .and_then(FeedNode::as_text)
            .map(str::to_string)
            .unwrap_or_default(),
    }
}

/// Resolve a text-bearing field (summary, content, title) to its payload.
pub fn extract_content(node: &FeedNode) -> String {
    match node {
        FeedNode::Text(text) => text.clone(),
        FeedNode::Object(_) => CONTENT_KEYS
            .iter()
            .filter_map(|key| node.get(key).and_then(FeedNode::as_text))
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_default(),
        FeedNode::List(_) => String::new(),
    }
}

/// Reduce an HTML fragment to plain text.
///
/// Tags are stripped before entities are decoded. Entities are decoded in one
/// pass, so `&amp;lt;` becomes `&lt;` and not `<`.
pub fn html_to_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    let decoded = ENTITY_RE.replace_all(&stripped, decode_entity);
    let collapsed = WHITESPACE_RE.replace_all(&decoded, " ");
    collapsed.trim().to_string()
}

fn decode_entity(caps: &Captures<'_>) -> String {
    let original = || caps[0].to_string();

    if let Some(hex) = caps.get(1) {
        return u32::from_str_radix(hex.as_str(), 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(original);
    }
    if let Some(dec) = caps.get(2) {
        return dec
            .as_str()
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(original);
    }

    match &caps[3] {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "quot" => "\"".to_string(),
        "nbsp" => " ".to_string(),
        _ => original(),
    }
}
