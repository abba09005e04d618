pub mod collector;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod mitigation;
pub mod params;
pub mod physics;
pub mod population;
pub mod prompt;
pub mod report;
pub mod risk;

pub use config::{Config, ConfigLoader};
pub use error::ImpactError;
pub use params::ImpactParameters;
pub use population::{CenterLookup, PopulationCenterIndex};
pub use report::{evaluate, ImpactReport, ImpactReportBuilder};
