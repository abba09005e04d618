//! Input parameters for a single impact evaluation.

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;

pub const DEFAULT_IMPACT_ANGLE_DEG: f64 = 45.0;
pub const DEFAULT_BULK_DENSITY_KG_M3: f64 = 3000.0;

fn default_impact_angle() -> f64 {
    DEFAULT_IMPACT_ANGLE_DEG
}

fn default_bulk_density() -> f64 {
    DEFAULT_BULK_DENSITY_KG_M3
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactParameters {
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    pub distance_km: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_impact_angle")]
    pub impact_angle_deg: f64,
    #[serde(default = "default_bulk_density")]
    pub bulk_density_kg_m3: f64,
}

impl ImpactParameters {
    /// Parameters with the default 45° angle and 3000 kg/m³ stony density.
    pub fn new(
        diameter_m: f64,
        velocity_km_s: f64,
        distance_km: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            diameter_m,
            velocity_km_s,
            distance_km,
            latitude,
            longitude,
            impact_angle_deg: DEFAULT_IMPACT_ANGLE_DEG,
            bulk_density_kg_m3: DEFAULT_BULK_DENSITY_KG_M3,
        }
    }

    pub fn with_angle(mut self, impact_angle_deg: f64) -> Self {
        self.impact_angle_deg = impact_angle_deg;
        self
    }

    pub fn with_density(mut self, bulk_density_kg_m3: f64) -> Self {
        self.bulk_density_kg_m3 = bulk_density_kg_m3;
        self
    }

    /// Checks every field and reports the first one out of range.
    ///
    /// A zero impact angle is rejected rather than evaluated as a zero-energy
    /// grazing pass.
    pub fn validate(&self) -> Result<(), ImpactError> {
        positive("diameter_m", self.diameter_m)?;
        positive("velocity_km_s", self.velocity_km_s)?;

        finite("distance_km", self.distance_km)?;
        if self.distance_km < 0.0 {
            return Err(ImpactError::invalid(
                "distance_km",
                format!("must be zero or positive, got {}", self.distance_km),
            ));
        }

        within("latitude", self.latitude, -90.0, 90.0)?;
        within("longitude", self.longitude, -180.0, 180.0)?;

        finite("impact_angle_deg", self.impact_angle_deg)?;
        if self.impact_angle_deg <= 0.0 || self.impact_angle_deg > 90.0 {
            return Err(ImpactError::invalid(
                "impact_angle_deg",
                format!("must be in (0, 90], got {}", self.impact_angle_deg),
            ));
        }

        positive("bulk_density_kg_m3", self.bulk_density_kg_m3)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ImpactError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ImpactError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ImpactError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ImpactError::invalid(
            field,
            format!("must be positive, got {value}"),
        ))
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ImpactError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ImpactError::invalid(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ))
    }
}
