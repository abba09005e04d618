//! Append-only CSV log of predictions.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::report::ImpactReport;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("prediction log io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prediction log csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// One flattened report as it appears in the log.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Diameter_m")]
    pub diameter_m: f64,
    #[serde(rename = "Velocity_km_s")]
    pub velocity_km_s: f64,
    #[serde(rename = "Distance_km")]
    pub distance_km: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Mass_kg")]
    pub mass_kg: f64,
    #[serde(rename = "Impact_Energy_MT")]
    pub impact_energy_mt: f64,
    #[serde(rename = "Crater_Diameter_m")]
    pub crater_diameter_m: f64,
    #[serde(rename = "Damage_Radius_km")]
    pub damage_radius_km: f64,
    #[serde(rename = "Combined_Risk_Factor")]
    pub combined_risk_factor: f64,
    #[serde(rename = "Impact_Classification")]
    pub impact_classification: String,
    #[serde(rename = "Nearest_City")]
    pub nearest_city: String,
    #[serde(rename = "City_Distance_km")]
    pub city_distance_km: f64,
    #[serde(rename = "City_Affected", serialize_with = "title_case_bool")]
    pub city_affected: bool,
    #[serde(rename = "Casualty_Estimate")]
    pub casualty_estimate: String,
}

/// Existing logs spell booleans `True` / `False`.
fn title_case_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

impl PredictionRow {
    pub fn from_report(report: &ImpactReport, at: DateTime<Local>) -> Self {
        let params = &report.parameters;
        let outcome = &report.outcome;
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            diameter_m: params.diameter_m,
            velocity_km_s: params.velocity_km_s,
            distance_km: params.distance_km,
            latitude: params.latitude,
            longitude: params.longitude,
            mass_kg: outcome.mass_kg,
            impact_energy_mt: outcome.energy_megatons_tnt,
            crater_diameter_m: outcome.crater_diameter_m,
            damage_radius_km: outcome.damage_radius_km,
            combined_risk_factor: report.risk.combined_risk,
            impact_classification: report.risk.classification_label.to_string(),
            nearest_city: report.exposure.nearest_center.clone(),
            city_distance_km: report.exposure.distance_to_center_km,
            city_affected: report.exposure.is_in_danger_zone,
            casualty_estimate: report.risk.casualty_band.to_string(),
        }
    }
}

pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a row stamped with the current local time.
    pub fn record(&self, report: &ImpactReport) -> Result<(), LedgerError> {
        self.append(&PredictionRow::from_report(report, Local::now()))
    }

    /// Writes the header first when the file is missing or empty.
    pub fn append(&self, row: &PredictionRow) -> Result<(), LedgerError> {
        let is_new = fs::metadata(&self.path).map_or(true, |meta| meta.len() == 0);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params::ImpactParameters, population::PopulationCenterIndex, report::evaluate};
    use chrono::TimeZone;

    fn report() -> ImpactReport {
        let params = ImpactParameters::new(100.0, 20.0, 50_000.0, 40.7128, -74.0060);
        evaluate(&params, &PopulationCenterIndex::world_cities()).unwrap()
    }

    #[test]
    fn header_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("log.csv"));
        let at = Local.with_ymd_and_hms(2025, 10, 4, 12, 30, 0).unwrap();
        let row = PredictionRow::from_report(&report(), at);

        log.append(&row).unwrap();
        log.append(&row).unwrap();

        let text = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Timestamp,Diameter_m,Velocity_km_s,Distance_km"));
        assert!(lines[0].ends_with("City_Distance_km,City_Affected,Casualty_Estimate"));
        assert!(lines[1].starts_with("2025-10-04 12:30:00,100.0,20.0,50000.0"));
        assert!(lines[1].contains("New York, USA"));
        assert!(lines[1].contains(",True,"));
    }

    #[test]
    fn outside_danger_zone_logs_false() {
        let dir = tempfile::tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("log.csv"));
        let params = ImpactParameters::new(5.0, 12.0, 9e6, 0.0, -150.0);
        let far = evaluate(&params, &PopulationCenterIndex::world_cities()).unwrap();
        assert!(!far.exposure.is_in_danger_zone);

        log.record(&far).unwrap();

        let text = fs::read_to_string(log.path()).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(",False,"));
        assert!(!row.contains("false"));
    }

    #[test]
    fn existing_file_keeps_its_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "Timestamp,legacy\n").unwrap();

        PredictionLog::new(&path).record(&report()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Timestamp").count(), 1);
        assert_eq!(text.lines().count(), 2);
    }
}
