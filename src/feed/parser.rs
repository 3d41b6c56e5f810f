use super::node::{insert_field, FeedNode, TEXT_KEY};
use super::normalize::{normalize_entries, FeatureEntry};
use crate::error::{Error, Result};
use roxmltree::{Document, ParsingOptions};
use std::collections::BTreeMap;
use tracing::debug;

const ATOM_ENTRIES: &[&str] = &["feed", "entry"];
const RSS_ITEMS: &[&str] = &["rss", "channel", "item"];

/// Parse an RSS or Atom feed into canonical entries
pub fn parse_feed(content: &str) -> Result<Vec<FeatureEntry>> {
    let document = parse_document(content)?;
    let candidates = entry_nodes(&document);
    let entries = normalize_entries(&candidates);

    debug!(
        "Parsed feed: {} of {} entries kept",
        entries.len(),
        candidates.len()
    );

    Ok(entries)
}

/// Parse XML text into a generic tree rooted at `{ <root name>: <root> }`.
///
/// Namespace prefixes are dropped from element and attribute names, text and
/// attribute values are trimmed, and DTD entity declarations are honoured.
pub fn parse_document(content: &str) -> Result<FeedNode> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(content, options)
        .map_err(|e| Error::FeedParse(format!("Failed to parse feed: {e}")))?;

    let root = doc.root_element();
    let mut fields = BTreeMap::new();
    fields.insert(root.tag_name().name().to_string(), element_to_node(root));

    Ok(FeedNode::Object(fields))
}

/// Locate the entry list, preferring Atom `feed.entry` over RSS
/// `rss.channel.item`. A lone entry is returned as a one-element sequence and
/// a document with neither path yields nothing.
pub fn entry_nodes(document: &FeedNode) -> Vec<&FeedNode> {
    document
        .path(ATOM_ENTRIES)
        .or_else(|| document.path(RSS_ITEMS))
        .map(FeedNode::as_sequence)
        .unwrap_or_default()
}

fn element_to_node(element: roxmltree::Node<'_, '_>) -> FeedNode {
    let mut fields = BTreeMap::new();
    let mut text = String::new();

    for attribute in element.attributes() {
        insert_field(
            &mut fields,
            attribute.name(),
            FeedNode::Text(attribute.value().trim().to_string()),
        );
    }

    for child in element.children() {
        if child.is_element() {
            insert_field(&mut fields, child.tag_name().name(), element_to_node(child));
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    let text = text.trim();
    if fields.is_empty() {
        return FeedNode::Text(text.to_string());
    }
    if !text.is_empty() {
        insert_field(&mut fields, TEXT_KEY, FeedNode::Text(text.to_string()));
    }

    FeedNode::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_strips_namespaces_and_trims() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
  <entry>
    <id>  feature-1  </id>
    <media:thumbnail media:url="https://example.com/t.png"/>
    <title type="html">Grid &amp; subgrid</title>
  </entry>
</feed>"#;

        let doc = parse_document(xml).unwrap();
        let entry = doc.path(&["feed", "entry"]).unwrap();

        assert_eq!(entry.get("id").and_then(FeedNode::as_text), Some("feature-1"));
        assert_eq!(
            entry.path(&["thumbnail", "url"]).and_then(FeedNode::as_text),
            Some("https://example.com/t.png")
        );

        let title = entry.get("title").unwrap();
        assert_eq!(title.get("type").and_then(FeedNode::as_text), Some("html"));
        assert_eq!(
            title.get(TEXT_KEY).and_then(FeedNode::as_text),
            Some("Grid & subgrid")
        );
    }

    #[test]
    fn test_cdata_is_kept_as_text() {
        let xml = r#"<rss><channel><item><description><![CDATA[<p>Hi</p>]]></description></item></channel></rss>"#;

        let doc = parse_document(xml).unwrap();
        assert_eq!(
            doc.path(&["rss", "channel", "item", "description"])
                .and_then(FeedNode::as_text),
            Some("<p>Hi</p>")
        );
    }

    #[test]
    fn test_dtd_entities_are_expanded() {
        let xml = r#"<!DOCTYPE feed [<!ENTITY brand "Baseline">]>
<feed><entry><title>&brand; 2024</title></entry></feed>"#;

        let doc = parse_document(xml).unwrap();
        assert_eq!(
            doc.path(&["feed", "entry", "title"]).and_then(FeedNode::as_text),
            Some("Baseline 2024")
        );
    }

    #[test]
    fn test_entry_nodes_wraps_single_entry() {
        let doc = parse_document("<feed><entry><id>1</id></entry></feed>").unwrap();
        assert_eq!(entry_nodes(&doc).len(), 1);

        let doc =
            parse_document("<feed><entry><id>1</id></entry><entry><id>2</id></entry></feed>")
                .unwrap();
        assert_eq!(entry_nodes(&doc).len(), 2);
    }

    #[test]
    fn test_entry_nodes_finds_rss_items() {
        let doc = parse_document(
            "<rss version=\"2.0\"><channel><title>x</title><item><guid>a</guid></item></channel></rss>",
        )
        .unwrap();
        assert_eq!(entry_nodes(&doc).len(), 1);
    }

    #[test]
    fn test_entry_nodes_empty_when_absent() {
        let doc = parse_document("<feed><title>Nothing yet</title></feed>").unwrap();
        assert!(entry_nodes(&doc).is_empty());

        let doc = parse_document("<html><body/></html>").unwrap();
        assert!(entry_nodes(&doc).is_empty());
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let result = parse_document("<feed><entry></feed>");
        assert!(matches!(result, Err(Error::FeedParse(_))));

        let result = parse_feed("not xml at all");
        assert!(matches!(result, Err(Error::FeedParse(_))));
    }
}
