use crate::config::Settings;
use crate::feed::{FeatureEntry, Fetcher};
use crate::timeline::{parse_timestamp, Timeline, TimelineCache, TimelineData};
use crate::Result;
use std::fmt::Write as _;
use std::sync::Arc;

/// Build the timeline and print it
pub async fn show(settings: &Settings, json: bool) -> Result<()> {
    let timeline = Timeline::from_settings(settings, Arc::new(TimelineCache::new()))?;
    let data = timeline.get_timeline_data().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(data.as_ref())?);
    } else {
        print!("{}", render_timeline(&data));
    }

    Ok(())
}

/// Fetch one feed and print its normalized entries
pub async fn inspect(settings: &Settings, url: &str) -> Result<()> {
    let fetcher = Fetcher::new(&settings.fetcher)?;
    let entries = fetcher.fetch_entries(url).await?;

    println!("✓ {} entries in {}", entries.len(), url);
    let mut out = String::new();
    render_entries(&mut out, &entries);
    print!("{out}");

    Ok(())
}

pub fn render_timeline(data: &TimelineData) -> String {
    let mut out = String::new();

    let last_updated = if data.last_updated.is_empty() {
        "unknown"
    } else {
        data.last_updated.as_str()
    };
    let _ = writeln!(out, "Last updated: {last_updated}");

    let _ = writeln!(
        out,
        "\nWidely available ({}):",
        data.widely_available.len()
    );
    render_entries(&mut out, &data.widely_available);

    let _ = writeln!(out, "\nNewly available ({}):", data.newly_available.len());
    render_entries(&mut out, &data.newly_available);

    out
}

fn render_entries(out: &mut String, entries: &[FeatureEntry]) {
    for entry in entries {
        let date = parse_timestamp(&entry.updated)
            .map(|updated| updated.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "  {:<10}  {}", date, entry.title);
        let _ = writeln!(out, "              {}", entry.link);
    }
}
