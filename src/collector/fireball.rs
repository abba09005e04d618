//! JPL `fireball.api`: bright atmospheric entries reported by sensors.
//!
//! The feed reports no size, so every fireball gets a nominal 1 m diameter.
//! Altitude stands in for distance; a blank altitude puts the event at the
//! screening horizon and a blank velocity counts as zero.

use serde_json::Value;

use super::{
    data_rows, numeric, text, within_horizon, window::DateWindow, CollectError, Columns,
    Discarded, FeedBatch, FeedSource, NeoRecord,
};
use crate::risk::PROXIMITY_HORIZON_KM;

pub(super) const FEED_URL: &str = "https://ssd-api.jpl.nasa.gov/fireball.api";

const NOMINAL_DIAMETER_M: f64 = 1.0;

pub(super) fn query(window: &DateWindow) -> Vec<(&'static str, String)> {
    vec![
        ("date-min", window.start_param()),
        ("date-max", window.end_param()),
    ]
}

pub fn parse_fireballs(body: &Value) -> Result<FeedBatch, CollectError> {
    let columns = Columns::from_body(body)?;
    let date = columns.require("date")?;
    let velocity = columns.find("vel");
    let altitude = columns.find("alt");

    let mut batch = FeedBatch::default();
    for row in data_rows(body) {
        let cell = |index: Option<usize>| index.and_then(|i| row.get(i));
        let name = text(row.get(date)).unwrap_or_else(|| "<undated>".to_string());

        let parsed = numeric(cell(velocity), "vel").and_then(|velocity_km_s| {
            let distance_km = numeric(cell(altitude), "alt")?.unwrap_or(PROXIMITY_HORIZON_KM);
            Ok((velocity_km_s.unwrap_or(0.0), within_horizon(distance_km)?))
        });

        batch.push(match parsed {
            Ok((velocity_km_s, distance_km)) => Ok(NeoRecord {
                source: FeedSource::Fireball,
                name,
                diameter_m: NOMINAL_DIAMETER_M,
                velocity_km_s,
                distance_km,
            }),
            Err(reason) => Err(Discarded::new(FeedSource::Fireball, name, reason)),
        });
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_columns_by_name() {
        let body = json!({
            "signature": {"version": "1.2"},
            "count": "3",
            "fields": ["date", "energy", "impact-e", "lat", "lat-dir", "lon", "lon-dir", "alt", "vel"],
            "data": [
                ["2025-09-12 04:11:09", "3.1", "0.11", "12.3", "N", "45.6", "W", "31.5", "18.2"],
                ["2025-08-01 22:40:01", "2.0", "0.073", null, null, null, null, null, null],
                ["2025-07-20 10:00:00", "5.5", "0.2", "1.0", "S", "2.0", "E", "high", "20.1"]
            ]
        });

        let batch = parse_fireballs(&body).unwrap();

        assert_eq!(batch.accepted.len(), 2);
        let first = &batch.accepted[0];
        assert_eq!(first.name, "2025-09-12 04:11:09");
        assert_eq!(first.diameter_m, 1.0);
        assert_eq!(first.velocity_km_s, 18.2);
        assert_eq!(first.distance_km, 31.5);

        let blank = &batch.accepted[1];
        assert_eq!(blank.velocity_km_s, 0.0);
        assert_eq!(blank.distance_km, PROXIMITY_HORIZON_KM);

        assert_eq!(batch.discarded.len(), 1);
        assert_eq!(batch.discarded[0].name, "2025-07-20 10:00:00");
    }

    #[test]
    fn no_rows_is_an_empty_batch() {
        let body = json!({"fields": ["date", "energy"], "count": "0"});
        let batch = parse_fireballs(&body).unwrap();
        assert!(batch.accepted.is_empty() && batch.discarded.is_empty());
    }

    #[test]
    fn missing_date_column_fails_the_feed() {
        let body = json!({"fields": ["energy"], "data": []});
        assert!(matches!(parse_fireballs(&body), Err(CollectError::Schema(_))));
    }
}
