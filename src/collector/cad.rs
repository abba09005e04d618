//! JPL `cad.api`: catalogued close approaches.

use serde_json::Value;

use super::{
    data_rows, numeric, required, text, within_horizon, window::DateWindow, CollectError,
    Columns, DiscardReason, Discarded, FeedBatch, FeedSource, NeoRecord, AU_KM,
};
use crate::risk::PROXIMITY_HORIZON_KM;

pub(super) const FEED_URL: &str = "https://ssd-api.jpl.nasa.gov/cad.api";

/// Geometric albedo assumed when converting absolute magnitude to size.
const ASSUMED_ALBEDO: f64 = 0.14;
const FALLBACK_DIAMETER_M: f64 = 1.0;

pub(super) fn query(window: &DateWindow) -> Vec<(&'static str, String)> {
    vec![
        ("date-min", window.start_param()),
        ("date-max", window.end_param()),
        ("dist-max", format!("{:.4}", PROXIMITY_HORIZON_KM / AU_KM)),
    ]
}

/// Diameter in metres from absolute magnitude `h`.
///
/// The magnitude formula yields kilometres. Older exports of this feed wrote
/// that figure into `diameter_m` unconverted, so diameters here are 1000x
/// theirs and screening energies correspondingly higher.
pub fn diameter_from_magnitude(h: f64) -> f64 {
    let km = 1329.0 / ASSUMED_ALBEDO.sqrt() * 10_f64.powf(-0.2 * h);
    km * 1_000.0
}

pub fn parse_cad(body: &Value) -> Result<FeedBatch, CollectError> {
    let columns = Columns::from_body(body)?;
    let designation = columns.require("des")?;
    let distance = columns.require("dist")?;
    let velocity = columns.require("v_rel")?;
    let magnitude = columns.find("h");

    let mut batch = FeedBatch::default();
    for row in data_rows(body) {
        let name = text(row.get(designation)).unwrap_or_else(|| "<undesignated>".to_string());
        batch.push(
            parse_row(row, distance, velocity, magnitude, &name)
                .map_err(|reason| Discarded::new(FeedSource::Cad, name.clone(), reason))
                .map(|(diameter_m, velocity_km_s, distance_km)| NeoRecord {
                    source: FeedSource::Cad,
                    name: name.clone(),
                    diameter_m,
                    velocity_km_s,
                    distance_km,
                }),
        );
    }
    Ok(batch)
}

fn parse_row(
    row: &Value,
    distance: usize,
    velocity: usize,
    magnitude: Option<usize>,
    name: &str,
) -> Result<(f64, f64, f64), DiscardReason> {
    let distance_km = within_horizon(required(row.get(distance), "dist")? * AU_KM)?;
    let velocity_km_s = required(row.get(velocity), "v_rel")?;

    let h = magnitude.and_then(|index| row.get(index));
    let diameter_m = match numeric(h, "h") {
        Ok(Some(h)) => diameter_from_magnitude(h),
        Ok(None) => FALLBACK_DIAMETER_M,
        Err(reason) => {
            log::debug!("CAD {name}: {reason}, using {FALLBACK_DIAMETER_M} m");
            FALLBACK_DIAMETER_M
        }
    };
    Ok((diameter_m, velocity_km_s, distance_km))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn body(rows: Value) -> Value {
        json!({
            "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.5"},
            "count": "2",
            "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
            "data": rows
        })
    }

    #[test]
    fn converts_au_and_magnitude() {
        let batch = parse_cad(&body(json!([
            ["2025 TF", "5", "2460953.1", "2025-Oct-01 00:47", "0.0000286", "0.0000285", "0.0000287", "8.03", "7.95", "< 00:01", "30.6"],
            ["2021 QM1", "12", "2460960.5", "2025-Oct-08 12:00", "0.0451", "0.0450", "0.0452", "12.2", "12.1", "00:03", ""]
        ])))
        .unwrap();

        assert_eq!(batch.accepted.len(), 2);
        let close = &batch.accepted[0];
        assert_eq!(close.name, "2025 TF");
        assert_relative_eq!(close.distance_km, 0.0000286 * AU_KM, max_relative = 1e-12);
        assert_eq!(close.velocity_km_s, 8.03);
        assert_relative_eq!(close.diameter_m, 2.694, max_relative = 1e-3);

        let no_h = &batch.accepted[1];
        assert_eq!(no_h.diameter_m, 1.0);
    }

    #[test]
    fn magnitude_22_is_about_140_metres() {
        assert_relative_eq!(diameter_from_magnitude(22.0), 141.4, max_relative = 1e-3);
    }

    #[test]
    fn far_and_broken_rows_are_discarded() {
        let batch = parse_cad(&body(json!([
            ["2019 XX", "1", "0", "", "0.2", "", "", "5.0", "", "", "20"],
            ["2020 YY", "1", "0", "", "0.01", "", "", "", "", "", "20"]
        ])))
        .unwrap();

        assert!(batch.accepted.is_empty());
        assert_eq!(batch.discarded.len(), 2);
        assert!(batch.discarded[0].reason.contains("beyond the screening horizon"));
        assert_eq!(batch.discarded[1].reason, "missing field `v_rel`");
    }

    #[test]
    fn missing_required_header_fails_the_feed() {
        let err = parse_cad(&json!({"fields": ["des", "dist"], "data": []})).unwrap_err();
        assert!(err.to_string().contains("v_rel"));
    }

    #[test]
    fn query_limits_distance_in_au() {
        let window = DateWindow::trailing(chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 10);
        let query = query(&window);
        assert_eq!(query[2], ("dist-max", "0.0668".to_string()));
    }
}
