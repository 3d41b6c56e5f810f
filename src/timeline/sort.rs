use crate::feed::FeatureEntry;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::cmp::{Ordering, Reverse};

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (Atom), RFC 2822 (RSS `pubDate`), and offset-less
/// date-times or plain dates, which are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// Render a timestamp the way `last_updated` is exposed
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Position of an entry in a timeline. Dated entries come first, newest
/// first; undated ones follow ordered by title.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Dated(Reverse<DateTime<Utc>>),
    Undated { folded: String, title: String },
}

impl SortKey {
    fn of(entry: &FeatureEntry) -> Self {
        match parse_timestamp(&entry.updated) {
            Some(updated) => SortKey::Dated(Reverse(updated)),
            None => SortKey::Undated {
                folded: entry.title.to_lowercase(),
                title: entry.title.clone(),
            },
        }
    }
}

/// Order two entries: most recent first, undated entries last and among
/// themselves by title.
pub fn compare_entries(a: &FeatureEntry, b: &FeatureEntry) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}

/// Stable sort by `compare_entries`, parsing each timestamp once
pub fn sort_entries(entries: &mut [FeatureEntry]) {
    entries.sort_by_cached_key(SortKey::of);
}

/// Latest parseable `updated` value across all given entries, or an empty
/// string when none parse.
pub fn latest_update<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a FeatureEntry>,
{
    entries
        .into_iter()
        .filter_map(|entry| parse_timestamp(&entry.updated))
        .max()
        .map(|latest| format_timestamp(&latest))
        .unwrap_or_default()
}
