use std::sync::Arc;
use timeline::config::{FeedsConfig, FetcherConfig};
use timeline::feed::Fetcher;
use timeline::{Error, FeatureEntry, Timeline, TimelineCache};
use tokio_test::{assert_err, assert_ok};

const WIDELY: &str = include_str!("fixtures/widely_available.xml");
const NEWLY: &str = include_str!("fixtures/newly_available.xml");

fn timeline_for(server: &mockito::ServerGuard, cache: Arc<TimelineCache>) -> Timeline {
    let fetcher = Fetcher::new(&FetcherConfig {
        user_agent: "TimelineTest/1.0".to_string(),
        timeout_seconds: 5,
        max_feed_size: 64 * 1024,
    })
    .unwrap();
    let feeds = FeedsConfig {
        widely_available_url: format!("{}/widely-available.xml", server.url()),
        newly_available_url: format!("{}/newly-available.xml", server.url()),
    };

    Timeline::new(fetcher, feeds, cache)
}

async fn mock_feed(
    server: &mut mockito::ServerGuard,
    path: &str,
    status: usize,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/atom+xml")
        .with_body(body)
        .create_async()
        .await
}

fn ids(entries: &[FeatureEntry]) -> Vec<&str> {
    entries
        .iter()
        .map(|e| e.id.trim_start_matches("https://example.com/features/"))
        .collect()
}

#[tokio::test]
async fn test_timeline_sorted_and_stamped() {
    let mut server = mockito::Server::new_async().await;
    let _widely = mock_feed(&mut server, "/widely-available.xml", 200, WIDELY).await;
    let _newly = mock_feed(&mut server, "/newly-available.xml", 200, NEWLY).await;

    let timeline = timeline_for(&server, Arc::new(TimelineCache::new()));
    let data = assert_ok!(timeline.get_timeline_data().await);

    assert_eq!(
        ids(&data.widely_available),
        vec!["aspect-ratio", "grid", "flexbox"]
    );
    assert_eq!(
        ids(&data.newly_available),
        vec!["popover", "has", "alpha", "zeta"]
    );
    assert_eq!(data.last_updated, "2024-04-16T00:00:00Z");
}

#[tokio::test]
async fn test_second_call_served_from_cache() {
    let mut server = mockito::Server::new_async().await;
    let widely = server
        .mock("GET", "/widely-available.xml")
        .with_status(200)
        .with_body(WIDELY)
        .expect(1)
        .create_async()
        .await;
    let newly = server
        .mock("GET", "/newly-available.xml")
        .with_status(200)
        .with_body(NEWLY)
        .expect(1)
        .create_async()
        .await;

    let cache = Arc::new(TimelineCache::new());
    let timeline = timeline_for(&server, Arc::clone(&cache));

    let first = assert_ok!(timeline.get_timeline_data().await);
    let second = assert_ok!(timeline.get_timeline_data().await);

    assert_eq!(first, second);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(cache.is_populated());

    widely.assert_async().await;
    newly.assert_async().await;
}

#[tokio::test]
async fn test_cache_shared_between_timelines() {
    let mut server = mockito::Server::new_async().await;
    let widely = server
        .mock("GET", "/widely-available.xml")
        .with_status(200)
        .with_body(WIDELY)
        .expect(1)
        .create_async()
        .await;
    let newly = server
        .mock("GET", "/newly-available.xml")
        .with_status(200)
        .with_body(NEWLY)
        .expect(1)
        .create_async()
        .await;

    let cache = Arc::new(TimelineCache::new());
    let first = timeline_for(&server, Arc::clone(&cache));
    let second = timeline_for(&server, Arc::clone(&cache));

    let a = assert_ok!(first.get_timeline_data().await);
    let b = assert_ok!(second.get_timeline_data().await);
    assert!(Arc::ptr_eq(&a, &b));

    widely.assert_async().await;
    newly.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_first_calls_fetch_once() {
    let mut server = mockito::Server::new_async().await;
    let widely = server
        .mock("GET", "/widely-available.xml")
        .with_status(200)
        .with_body(WIDELY)
        .expect(1)
        .create_async()
        .await;
    let newly = server
        .mock("GET", "/newly-available.xml")
        .with_status(200)
        .with_body(NEWLY)
        .expect(1)
        .create_async()
        .await;

    let timeline = Arc::new(timeline_for(&server, Arc::new(TimelineCache::new())));

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let timeline = Arc::clone(&timeline);
            tokio::spawn(async move { timeline.get_timeline_data().await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(assert_ok!(handle.await.unwrap()));
    }
    for result in &results[1..] {
        assert!(Arc::ptr_eq(&results[0], result));
    }

    widely.assert_async().await;
    newly.assert_async().await;
}

#[tokio::test]
async fn test_failure_leaves_cache_empty_and_allows_retry() {
    let mut server = mockito::Server::new_async().await;
    let _widely = mock_feed(&mut server, "/widely-available.xml", 200, WIDELY).await;
    let failing = mock_feed(&mut server, "/newly-available.xml", 503, "unavailable").await;

    let cache = Arc::new(TimelineCache::new());
    let timeline = timeline_for(&server, Arc::clone(&cache));

    let err = assert_err!(timeline.get_timeline_data().await);
    assert!(err.is_fetch_failure());
    assert_eq!(err.status(), Some(503));
    assert!(!cache.is_populated());
    assert!(cache.get().is_none());

    failing.remove_async().await;
    let _newly = mock_feed(&mut server, "/newly-available.xml", 200, NEWLY).await;

    let data = assert_ok!(timeline.get_timeline_data().await);
    assert_eq!(data.newly_available.len(), 4);
    assert!(cache.is_populated());
}

#[tokio::test]
async fn test_parse_failure_fails_whole_timeline() {
    let mut server = mockito::Server::new_async().await;
    let _widely = mock_feed(&mut server, "/widely-available.xml", 200, "<feed><entry>").await;
    let _newly = mock_feed(&mut server, "/newly-available.xml", 200, NEWLY).await;

    let cache = Arc::new(TimelineCache::new());
    let timeline = timeline_for(&server, Arc::clone(&cache));

    let err = assert_err!(timeline.get_timeline_data().await);
    assert!(matches!(err, Error::FeedParse(_)));
    assert!(!cache.is_populated());
}

#[tokio::test]
async fn test_empty_feeds_give_empty_timestamp() {
    let mut server = mockito::Server::new_async().await;
    let _widely = mock_feed(
        &mut server,
        "/widely-available.xml",
        200,
        "<feed><title>empty</title></feed>",
    )
    .await;
    let _newly = mock_feed(
        &mut server,
        "/newly-available.xml",
        200,
        r#"<feed><entry><id>x</id><title>X</title><link href="https://x"/></entry></feed>"#,
    )
    .await;

    let timeline = timeline_for(&server, Arc::new(TimelineCache::new()));
    let data = assert_ok!(timeline.get_timeline_data().await);

    assert!(data.widely_available.is_empty());
    assert_eq!(data.newly_available.len(), 1);
    assert_eq!(data.last_updated, "");
}
