//! Population centers and nearest-center lookup by great-circle distance.

mod cities;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{error::ImpactError, risk::round_to};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationCenter {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestCenter {
    pub name: String,
    pub population: u64,
    /// Rounded to two decimals.
    pub distance_km: f64,
}

/// Anything that can answer "which population center is closest".
pub trait CenterLookup {
    fn nearest(&self, latitude: f64, longitude: f64) -> Result<NearestCenter, ImpactError>;
}

/// Read-only table of population centers, scanned linearly in table order.
#[derive(Debug, Clone, Default)]
pub struct PopulationCenterIndex {
    centers: Vec<PopulationCenter>,
}

impl PopulationCenterIndex {
    pub fn new(centers: Vec<PopulationCenter>) -> Self {
        Self { centers }
    }

    /// The bundled table of major world cities.
    pub fn world_cities() -> Self {
        let centers = cities::WORLD_CITIES
            .iter()
            .map(|&(name, latitude, longitude, population)| PopulationCenter {
                name: name.to_string(),
                latitude,
                longitude,
                population,
            })
            .collect();
        Self::new(centers)
    }

    /// Loads a YAML list of centers. Order in the file is the tie-break order.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read population centers {}", path.display()))?;
        let centers: Vec<PopulationCenter> = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Self::new(centers))
    }

    pub fn centers(&self) -> &[PopulationCenter] {
        &self.centers
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

impl CenterLookup for PopulationCenterIndex {
    fn nearest(&self, latitude: f64, longitude: f64) -> Result<NearestCenter, ImpactError> {
        let mut best: Option<(&PopulationCenter, f64)> = None;
        for center in &self.centers {
            let distance = haversine_km(latitude, longitude, center.latitude, center.longitude);
            // strict comparison keeps the first of equally distant centers
            if best.map_or(true, |(_, min)| distance < min) {
                best = Some((center, distance));
            }
        }

        let (center, distance) = best.ok_or_else(|| {
            ImpactError::Configuration("population center table is empty".to_string())
        })?;
        Ok(NearestCenter {
            name: center.name.clone(),
            population: center.population,
            distance_km: round_to(distance, 2),
        })
    }
}

/// Great-circle distance between two lat/lon points in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}
