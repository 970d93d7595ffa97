use chrono::{DateTime, TimeZone, Utc};
use httpmock::prelude::*;
use rust_decimal::Decimal;
use spotwatt_core::{PriceSource, SpotwattError};
use spotwatt_homeassistant::HomeAssistantSource;

const ENTITY: &str = "sensor.electricity_price";

fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn source_for(server: &MockServer) -> HomeAssistantSource {
    HomeAssistantSource::builder()
        .base_url(server.base_url())
        .entity_id(ENTITY)
        .build()
        .unwrap()
}

fn entry(state: &str, hour: u32, minute: u32) -> String {
    format!(
        r#"{{"entity_id":"{ENTITY}","state":"{state}","last_changed":"2024-03-01T{hour:02}:{minute:02}:00+00:00","last_updated":"2024-03-01T{hour:02}:{minute:02}:00+00:00"}}"#
    )
}

#[tokio::test]
async fn reconstructs_prices_from_history() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/history/period/2024-03-01T00:00:00Z")
                .query_param("end", "2024-03-01T04:00:00Z")
                .query_param("filter_entity_id", ENTITY);
            then.status(200)
                .header("content-type", "application/json")
                .body(format!(
                    "[[{},{},{},{}]]",
                    entry("0.31", 0, 0),
                    entry("unknown", 1, 0),
                    entry("0.28", 2, 0),
                    entry("0.35", 3, 0),
                ));
        })
        .await;

    let source = source_for(&server);
    let intervals = source.price_data(ts(0, 0), ts(4, 0)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(intervals.len(), 4);
    let values: Vec<_> = intervals.iter().map(|p| p.value).collect();
    assert_eq!(
        values,
        vec![dec("0.31"), dec("0.31"), dec("0.28"), dec("0.35")]
    );
    assert_eq!(intervals[0].valid_from, ts(0, 0));
    assert_eq!(intervals[3].valid_to, ts(4, 0));
    for pair in intervals.windows(2) {
        assert_eq!(pair[0].valid_to, pair[1].valid_from);
    }
}

#[tokio::test]
async fn repeated_calls_yield_identical_intervals() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/history/period/2024-03-01T00:00:00Z");
            then.status(200)
                .header("content-type", "application/json")
                .body(format!("[[{},{}]]", entry("0.31", 0, 0), entry("0.28", 1, 0)));
        })
        .await;

    let source = source_for(&server);
    let first = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap();
    let second = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap();

    assert_eq!(first, second);
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn empty_series_is_incomplete() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .header("content-type", "application/json")
                .body("[[]]");
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    match err {
        SpotwattError::Incomplete { entity, .. } => assert_eq!(entity, ENTITY),
        other => panic!("expected Incomplete, got {other}"),
    }
}

#[tokio::test]
async fn empty_body_is_incomplete() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .header("content-type", "application/json")
                .body("[]");
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    assert!(matches!(err, SpotwattError::Incomplete { .. }));
}

#[tokio::test]
async fn late_start_is_incomplete() {
    // Retention window began after the requested range start.
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .header("content-type", "application/json")
                .body(format!("[[{}]]", entry("0.31", 0, 30)));
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    assert!(matches!(err, SpotwattError::Incomplete { .. }));
}

#[tokio::test]
async fn error_status_is_transport() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(502);
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    assert!(matches!(err, SpotwattError::Transport { .. }));
}

#[tokio::test]
async fn malformed_body_is_deserialization() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"message":"API running"}"#);
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    assert!(matches!(err, SpotwattError::Deserialization { .. }));
}

#[tokio::test]
async fn multiple_series_is_deserialization() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .header("content-type", "application/json")
                .body(format!(
                    "[[{}],[{}]]",
                    entry("0.31", 0, 0),
                    entry("0.28", 1, 0)
                ));
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    assert!(matches!(err, SpotwattError::Deserialization { .. }));
}

#[tokio::test]
async fn unparseable_state_is_deserialization() {
    // Only the two sentinel strings map to a gap; anything else must be a
    // decimal literal.
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .header("content-type", "application/json")
                .body(format!("[[{}]]", entry("offline", 0, 0)));
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    assert!(matches!(err, SpotwattError::Deserialization { .. }));
}

#[tokio::test]
async fn consecutive_leading_gaps_are_unresolvable() {
    // Both sentinel spellings collapse to the same gap semantics.
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .header("content-type", "application/json")
                .body(format!(
                    "[[{},{}]]",
                    entry("unknown", 0, 0),
                    entry("unavailable", 1, 0)
                ));
        })
        .await;

    let source = source_for(&server);
    let err = source.price_data(ts(0, 0), ts(2, 0)).await.unwrap_err();

    match err {
        SpotwattError::Unresolvable { entity, at, index } => {
            assert_eq!(entity, ENTITY);
            assert_eq!(at, ts(0, 0));
            assert_eq!(index, 0);
        }
        other => panic!("expected Unresolvable, got {other}"),
    }
}
