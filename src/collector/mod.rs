//! Near-Earth-object telemetry collection from three public feeds.
//!
//! Each feed is fetched on its own. A feed (or a NeoWs chunk) that fails is
//! logged and recorded in the report; the remaining feeds still run. Rows that
//! cannot be used are kept as [`Discarded`] entries with a reason instead of
//! being dropped silently.

mod cad;
mod client;
mod fireball;
mod neows;
pub mod scoring;
pub mod window;

use std::{fmt, path::Path, time::Duration};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::{config::CollectorConfig, risk::PROXIMITY_HORIZON_KM};

pub use cad::parse_cad;
pub use client::FeedClient;
pub use fireball::parse_fireballs;
pub use neows::parse_neo_feed;
use window::DateWindow;

/// Kilometres per astronomical unit.
pub const AU_KM: f64 = 149_597_870.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeedSource {
    #[serde(rename = "NEO")]
    Neo,
    Fireball,
    #[serde(rename = "CAD")]
    Cad,
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedSource::Neo => "NEO",
            FeedSource::Fireball => "Fireball",
            FeedSource::Cad => "CAD",
        })
    }
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("unexpected response shape: {0}")]
    Schema(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A normalized feed row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoRecord {
    pub source: FeedSource,
    pub name: String,
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscardReason {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a number: {value}")]
    Malformed { field: &'static str, value: String },

    #[error("distance {0:.0} km is beyond the screening horizon")]
    BeyondHorizon(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discarded {
    pub source: FeedSource,
    pub name: String,
    pub reason: String,
}

impl Discarded {
    pub fn new(source: FeedSource, name: impl Into<String>, reason: DiscardReason) -> Self {
        Self {
            source,
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// What one feed produced.
#[derive(Debug, Clone, Default)]
pub struct FeedBatch {
    pub accepted: Vec<NeoRecord>,
    pub discarded: Vec<Discarded>,
    /// Partial failures that did not abort the feed, e.g. one NeoWs chunk.
    pub failures: Vec<String>,
}

impl FeedBatch {
    pub fn push(&mut self, row: Result<NeoRecord, Discarded>) {
        match row {
            Ok(record) => self.accepted.push(record),
            Err(discarded) => self.discarded.push(discarded),
        }
    }

    pub fn extend(&mut self, other: FeedBatch) {
        self.accepted.extend(other.accepted);
        self.discarded.extend(other.discarded);
        self.failures.extend(other.failures);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub source: FeedSource,
    pub name: String,
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    pub distance_km: f64,
    pub risk_factor: f64,
    pub mitigation_strategy: &'static str,
}

impl ScoredRecord {
    pub fn score(record: NeoRecord) -> Self {
        let risk_factor =
            scoring::screening_risk(record.diameter_m, record.velocity_km_s, record.distance_km);
        Self {
            source: record.source,
            name: record.name,
            diameter_m: record.diameter_m,
            velocity_km_s: record.velocity_km_s,
            distance_km: record.distance_km,
            risk_factor,
            mitigation_strategy: scoring::screening_strategy(risk_factor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedFailure {
    pub source: FeedSource,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct CollectReport {
    pub records: Vec<ScoredRecord>,
    pub discarded: Vec<Discarded>,
    pub failures: Vec<FeedFailure>,
}

impl CollectReport {
    pub fn count(&self, source: FeedSource) -> usize {
        self.records.iter().filter(|r| r.source == source).count()
    }

    /// Writes the combined record set, replacing any existing file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), CollectError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record([
            "source",
            "name",
            "diameter_m",
            "velocity_km_s",
            "distance_km",
            "risk_factor",
            "mitigation_strategy",
        ])?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_discarded_csv(&self, path: impl AsRef<Path>) -> Result<(), CollectError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(["source", "name", "reason"])?;
        for row in &self.discarded {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Folds per-feed results into one report, scoring every accepted record.
/// Feed order is preserved, and a failed feed contributes only its failure.
pub fn merge_feeds(
    results: impl IntoIterator<Item = (FeedSource, Result<FeedBatch, CollectError>)>,
) -> CollectReport {
    let mut report = CollectReport::default();
    for (source, result) in results {
        match result {
            Ok(batch) => {
                log::info!(
                    "{source}: {} records kept, {} discarded",
                    batch.accepted.len(),
                    batch.discarded.len()
                );
                for discarded in &batch.discarded {
                    log::debug!("{source}: discarded {}: {}", discarded.name, discarded.reason);
                }
                report
                    .records
                    .extend(batch.accepted.into_iter().map(ScoredRecord::score));
                report.discarded.extend(batch.discarded);
                report
                    .failures
                    .extend(batch.failures.into_iter().map(|detail| FeedFailure { source, detail }));
            }
            Err(err) => {
                log::error!("Error fetching {source} data: {err}");
                report.failures.push(FeedFailure {
                    source,
                    detail: err.to_string(),
                });
            }
        }
    }
    report
}

pub struct Collector {
    client: FeedClient,
    config: CollectorConfig,
    api_key: String,
}

impl Collector {
    pub fn new(config: &CollectorConfig) -> Result<Self, CollectError> {
        let client = FeedClient::new(
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
            Duration::from_millis(config.request_delay_ms),
        )?;
        Ok(Self {
            client,
            config: config.clone(),
            api_key: config.resolve_api_key(),
        })
    }

    /// Fetches all three feeds relative to `today`, one after another.
    pub async fn collect(&self, today: NaiveDate) -> CollectReport {
        let neo_window = DateWindow::trailing(today, self.config.neo_window_days);
        let fireball_window = DateWindow::trailing(today, self.config.fireball_window_days);
        let cad_window = DateWindow::trailing(today, self.config.cad_window_days);

        log::info!("Fetching NEO data ({neo_window})...");
        let neo = self.fetch_neo(neo_window).await;
        log::info!("Fetching Fireball data ({fireball_window})...");
        let fireball = self.fetch_fireballs(fireball_window).await;
        log::info!("Fetching CAD data ({cad_window})...");
        let cad = self.fetch_cad(cad_window).await;

        merge_feeds([
            (FeedSource::Neo, neo),
            (FeedSource::Fireball, fireball),
            (FeedSource::Cad, cad),
        ])
    }

    async fn fetch_neo(&self, window: DateWindow) -> Result<FeedBatch, CollectError> {
        let mut results = Vec::new();
        for (index, chunk) in window.chunks(self.config.chunk_days).into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
            }
            let query = neows::query(&chunk, &self.api_key);
            let parsed = self
                .client
                .get_json(neows::FEED_URL, &query)
                .await
                .and_then(|body| parse_neo_feed(&body));
            results.push((chunk, parsed));
        }
        fold_chunks(results)
    }

    async fn fetch_fireballs(&self, window: DateWindow) -> Result<FeedBatch, CollectError> {
        let body = self
            .client
            .get_json(fireball::FEED_URL, &fireball::query(&window))
            .await?;
        parse_fireballs(&body)
    }

    async fn fetch_cad(&self, window: DateWindow) -> Result<FeedBatch, CollectError> {
        let body = self.client.get_json(cad::FEED_URL, &cad::query(&window)).await?;
        parse_cad(&body)
    }
}

/// Combines per-chunk NeoWs results. Failed chunks are recorded and skipped;
/// the feed as a whole fails only when every chunk failed.
pub(crate) fn fold_chunks(
    results: impl IntoIterator<Item = (DateWindow, Result<FeedBatch, CollectError>)>,
) -> Result<FeedBatch, CollectError> {
    let mut batch = FeedBatch::default();
    let mut chunks = 0;
    let mut failed = 0;
    for (chunk, result) in results {
        chunks += 1;
        match result {
            Ok(chunk_batch) => batch.extend(chunk_batch),
            Err(err) => {
                log::error!("Error fetching NEOs {chunk}: {err}");
                failed += 1;
                batch.failures.push(format!("{chunk}: {err}"));
            }
        }
    }
    if chunks > 0 && failed == chunks {
        return Err(CollectError::Schema(format!("all {chunks} NeoWs chunks failed")));
    }
    Ok(batch)
}

/// Reads a feed value that may be a JSON number, a numeric string, blank, or null.
pub(crate) fn numeric(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<f64>, DiscardReason> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(number.as_f64()),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => {
            text.trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| DiscardReason::Malformed {
                    field,
                    value: text.clone(),
                })
        }
        Some(other) => Err(DiscardReason::Malformed {
            field,
            value: other.to_string(),
        }),
    }
}

pub(crate) fn required(
    value: Option<&Value>,
    field: &'static str,
) -> Result<f64, DiscardReason> {
    numeric(value, field)?.ok_or(DiscardReason::MissingField(field))
}

pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

pub(crate) fn within_horizon(distance_km: f64) -> Result<f64, DiscardReason> {
    if distance_km <= PROXIMITY_HORIZON_KM {
        Ok(distance_km)
    } else {
        Err(DiscardReason::BeyondHorizon(distance_km))
    }
}

/// Column positions from a JPL `fields` header.
pub(crate) struct Columns<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Columns<'a> {
    pub(crate) fn from_body(body: &'a Value) -> Result<Self, CollectError> {
        let fields = body
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| CollectError::Schema("response has no `fields` header".into()))?
            .iter()
            .filter_map(Value::as_str)
            .collect();
        Ok(Self { fields })
    }

    pub(crate) fn find(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| *field == name)
    }

    pub(crate) fn require(&self, name: &str) -> Result<usize, CollectError> {
        self.find(name)
            .ok_or_else(|| CollectError::Schema(format!("missing required field `{name}`")))
    }
}

/// Data rows of a JPL response. An absent `data` key means zero rows.
pub(crate) fn data_rows(body: &Value) -> &[Value] {
    body.get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
