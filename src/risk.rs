//! Risk scoring and energy-tier classification for the interactive report.

use serde::Serialize;

use crate::physics::PhysicalOutcome;

/// Distance beyond which proximity contributes nothing, km.
pub const PROXIMITY_HORIZON_KM: f64 = 1e7;
const PROXIMITY_SCALE_KM: f64 = 1e5;

const PROXIMITY_WEIGHT: f64 = 0.4;
const IMPACT_WEIGHT: f64 = 0.6;

const REGIONAL_MT: f64 = 0.01;
const CATASTROPHIC_MT: f64 = 1.0;
const GLOBAL_MT: f64 = 1000.0;

/// Energy tier of an impact. Boundaries belong to the upper tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactClass {
    Airburst,
    Regional,
    Catastrophic,
    GlobalExtinction,
}

impl ImpactClass {
    pub fn from_megatons(energy_mt: f64) -> Self {
        if energy_mt < REGIONAL_MT {
            ImpactClass::Airburst
        } else if energy_mt < CATASTROPHIC_MT {
            ImpactClass::Regional
        } else if energy_mt < GLOBAL_MT {
            ImpactClass::Catastrophic
        } else {
            ImpactClass::GlobalExtinction
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactClass::Airburst => "Small fireball — harmless airburst",
            ImpactClass::Regional => "Tunguska-scale regional event",
            ImpactClass::Catastrophic => "City to country-scale devastation",
            ImpactClass::GlobalExtinction => "Global catastrophic impact",
        }
    }

    pub fn casualty_band(&self) -> &'static str {
        match self {
            ImpactClass::Airburst => "0-10 (minor injuries from debris)",
            ImpactClass::Regional => "100s-1,000s (within 50km radius)",
            ImpactClass::Catastrophic => "10,000s-100,000s (regional catastrophe)",
            ImpactClass::GlobalExtinction => "Millions to billions (mass extinction event)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub proximity_risk: f64,
    pub impact_risk: f64,
    pub combined_risk: f64,
    pub classification: ImpactClass,
    pub classification_label: &'static str,
    pub casualty_band: &'static str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, outcome: &PhysicalOutcome, distance_km: f64) -> RiskAssessment {
        let proximity = proximity_risk(distance_km);
        let impact = impact_risk(outcome.energy_megatons_tnt, outcome.damage_radius_km);
        let combined = round_to(
            clamp_score(PROXIMITY_WEIGHT * proximity + IMPACT_WEIGHT * impact),
            1,
        );
        let classification = ImpactClass::from_megatons(outcome.energy_megatons_tnt);

        RiskAssessment {
            proximity_risk: proximity,
            impact_risk: impact,
            combined_risk: combined,
            classification,
            classification_label: classification.label(),
            casualty_band: classification.casualty_band(),
        }
    }
}

/// Linear decay from 100 at contact to 0 at [`PROXIMITY_HORIZON_KM`].
pub fn proximity_risk(distance_km: f64) -> f64 {
    clamp_score((PROXIMITY_HORIZON_KM - distance_km) / PROXIMITY_SCALE_KM)
}

pub fn impact_risk(energy_mt: f64, damage_radius_km: f64) -> f64 {
    let raw = match ImpactClass::from_megatons(energy_mt) {
        ImpactClass::Airburst => 5.0,
        ImpactClass::Regional => (20.0 + damage_radius_km).min(50.0),
        ImpactClass::Catastrophic => (50.0 + 0.5 * damage_radius_km).min(80.0),
        ImpactClass::GlobalExtinction => (80.0 + 0.1 * damage_radius_km).min(100.0),
    };
    clamp_score(raw)
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Rounds the exact decimal value of `value`, ties to even.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
