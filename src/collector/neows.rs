//! NASA NeoWs `feed` endpoint.

use serde_json::Value;

use super::{
    numeric, required, text, within_horizon, window::DateWindow, CollectError, DiscardReason,
    Discarded, FeedBatch, FeedSource, NeoRecord,
};

pub(super) const FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

pub(super) fn query(window: &DateWindow, api_key: &str) -> Vec<(&'static str, String)> {
    vec![
        ("start_date", window.start_param()),
        ("end_date", window.end_param()),
        ("api_key", api_key.to_string()),
    ]
}

/// Parses one feed page. Objects are grouped by date; dates come out sorted.
pub fn parse_neo_feed(body: &Value) -> Result<FeedBatch, CollectError> {
    let by_date = body
        .get("near_earth_objects")
        .and_then(Value::as_object)
        .ok_or_else(|| CollectError::Schema("missing `near_earth_objects`".into()))?;

    let mut batch = FeedBatch::default();
    for objects in by_date.values() {
        for object in objects.as_array().map(Vec::as_slice).unwrap_or(&[]) {
            batch.push(parse_object(object));
        }
    }
    Ok(batch)
}

fn parse_object(object: &Value) -> Result<NeoRecord, Discarded> {
    let name = text(object.get("name")).unwrap_or_else(|| "<unnamed>".to_string());
    let discard = |reason: DiscardReason| Discarded::new(FeedSource::Neo, name.clone(), reason);

    let approach = object
        .pointer("/close_approach_data/0")
        .ok_or_else(|| discard(DiscardReason::MissingField("close_approach_data")))?;

    let distance_km = required(
        approach.pointer("/miss_distance/kilometers"),
        "miss_distance.kilometers",
    )
    .and_then(within_horizon)
    .map_err(discard)?;
    let velocity_km_s = required(
        approach.pointer("/relative_velocity/kilometers_per_second"),
        "relative_velocity.kilometers_per_second",
    )
    .map_err(discard)?;
    let diameter_m = numeric(
        object.pointer("/estimated_diameter/meters/estimated_diameter_max"),
        "estimated_diameter_max",
    )
    .and_then(|value| value.ok_or(DiscardReason::MissingField("estimated_diameter_max")))
    .map_err(discard)?;

    Ok(NeoRecord {
        source: FeedSource::Neo,
        name,
        diameter_m,
        velocity_km_s,
        distance_km,
    })
}
