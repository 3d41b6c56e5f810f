use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Key under which an element's own text is kept when it also has attributes
/// or child elements.
pub const TEXT_KEY: &str = "#text";

/// Key for a character-data block when a producer keeps it apart from text.
pub const CDATA_KEY: &str = "#cdata";

/// Generic, namespace-agnostic view of a parsed feed document.
///
/// A text-only element (or an attribute value) becomes `Text`. Elements that
/// carry attributes or child elements become `Object`, keyed by local name.
/// Sibling elements sharing a name are folded into a `List`, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedNode {
    Text(String),
    Object(BTreeMap<String, FeedNode>),
    List(Vec<FeedNode>),
}

impl FeedNode {
    /// Look up a field of an `Object`. Other shapes have no fields.
    pub fn get(&self, key: &str) -> Option<&FeedNode> {
        match self {
            FeedNode::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeedNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, FeedNode::Object(_))
    }

    /// Present the node as a sequence: a `List` yields its items, any other
    /// node is wrapped as a one-element sequence.
    pub fn as_sequence(&self) -> Vec<&FeedNode> {
        match self {
            FeedNode::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    /// Follow a path of field names, e.g. `["rss", "channel", "item"]`.
    pub fn path(&self, keys: &[&str]) -> Option<&FeedNode> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }
}

/// Insert a field, folding repeated names into a `List`.
pub(crate) fn insert_field(fields: &mut BTreeMap<String, FeedNode>, key: &str, value: FeedNode) {
    match fields.entry(key.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            FeedNode::List(items) => items.push(value),
            existing => {
                let first = std::mem::replace(existing, FeedNode::List(Vec::new()));
                *existing = FeedNode::List(vec![first, value]);
            }
        },
    }
}
