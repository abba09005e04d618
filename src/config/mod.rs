//! Configuration for the predictor and the batch collector

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::params::{DEFAULT_BULK_DENSITY_KG_M3, DEFAULT_IMPACT_ANGLE_DEG};

pub const API_KEY_ENV: &str = "NASA_API_KEY";
const DEMO_API_KEY: &str = "DEMO_KEY";

/// Top-level configuration; every section falls back to defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub predictor: PredictorConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    #[serde(default = "default_angle")]
    pub impact_angle_deg: f64,
    #[serde(default = "default_density")]
    pub bulk_density_kg_m3: f64,
    /// YAML list of population centers; the bundled world table when absent
    #[serde(default)]
    pub centers_path: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("meteor_predictions_log.csv")
}

fn default_angle() -> f64 {
    DEFAULT_IMPACT_ANGLE_DEG
}

fn default_density() -> f64 {
    DEFAULT_BULK_DENSITY_KG_M3
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            impact_angle_deg: default_angle(),
            bulk_density_kg_m3: default_density(),
            centers_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_neo_window")]
    pub neo_window_days: i64,
    #[serde(default = "default_fireball_window")]
    pub fireball_window_days: i64,
    #[serde(default = "default_cad_window")]
    pub cad_window_days: i64,
    #[serde(default = "default_chunk_days")]
    pub chunk_days: i64,
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("meteor_data_combined.csv")
}

fn default_neo_window() -> i64 {
    150
}

fn default_fireball_window() -> i64 {
    730
}

fn default_cad_window() -> i64 {
    150
}

fn default_chunk_days() -> i64 {
    7
}

fn default_request_delay() -> u64 {
    1_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_timeout() -> u64 {
    30
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            output_path: default_output_path(),
            neo_window_days: default_neo_window(),
            fireball_window_days: default_fireball_window(),
            cad_window_days: default_cad_window(),
            chunk_days: default_chunk_days(),
            request_delay_ms: default_request_delay(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout(),
        }
    }
}

impl CollectorConfig {
    /// `NASA_API_KEY` wins over the configured key, which wins over `DEMO_KEY`
    pub fn resolve_api_key(&self) -> String {
        let from_env = std::env::var(API_KEY_ENV).ok();
        pick_api_key(from_env, self.api_key.clone())
    }
}

fn pick_api_key(from_env: Option<String>, configured: Option<String>) -> String {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or(configured.filter(|key| !key.trim().is_empty()))
        .unwrap_or_else(|| DEMO_API_KEY.to_string())
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Config> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Loads `file` when given, otherwise returns the defaults
    pub fn load_or_default(&self, file: Option<&Path>) -> Result<Config> {
        match file {
            Some(file) => self.load(file),
            None => Ok(Config::default()),
        }
    }
}

impl Config {
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.predictor.impact_angle_deg, 45.0);
        assert_eq!(config.predictor.bulk_density_kg_m3, 3000.0);
        assert_eq!(config.collector.neo_window_days, 150);
        assert_eq!(config.collector.fireball_window_days, 730);
        assert_eq!(config.collector.chunk_days, 7);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str(
            "collector:\n  output_path: out.csv\n  max_retries: 5\npredictor:\n  impact_angle_deg: 30\n",
        )
        .unwrap();

        assert_eq!(config.collector.output_path, PathBuf::from("out.csv"));
        assert_eq!(config.collector.max_retries, 5);
        assert_eq!(config.collector.cad_window_days, 150);
        assert_eq!(config.predictor.impact_angle_deg, 30.0);
        assert_eq!(
            config.predictor.log_path,
            PathBuf::from("meteor_predictions_log.csv")
        );
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.collector.api_key = Some("abc".to_string());
        config.to_yaml(dir.path().join("impactor.yaml")).unwrap();

        let loaded = ConfigLoader::new(dir.path())
            .load("impactor.yaml")
            .unwrap();
        assert_eq!(loaded.collector.api_key.as_deref(), Some("abc"));
        assert_eq!(loaded.predictor.log_path, config.predictor.log_path);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::new(dir.path()).load("nope.yaml").unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn test_api_key_precedence() {
        assert_eq!(
            pick_api_key(Some("env".into()), Some("cfg".into())),
            "env"
        );
        assert_eq!(pick_api_key(Some("  ".into()), Some("cfg".into())), "cfg");
        assert_eq!(pick_api_key(None, None), "DEMO_KEY");
    }
}
