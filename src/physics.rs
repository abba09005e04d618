//! Closed-form impact physics: mass, kinetic energy, crater and damage extent.

use std::f64::consts::PI;

use serde::Serialize;

use crate::params::ImpactParameters;

/// Joules in one megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;
/// Crustal target density used by the crater scaling law, kg/m³.
pub const TARGET_DENSITY_KG_M3: f64 = 2700.0;
/// Damage radius as a multiple of crater diameter.
pub const DAMAGE_RADIUS_PER_CRATER: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalOutcome {
    pub mass_kg: f64,
    pub energy_j: f64,
    pub energy_megatons_tnt: f64,
    pub crater_diameter_m: f64,
    pub damage_radius_km: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactPhysicsEngine;

impl ImpactPhysicsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Assumes `params` already passed [`ImpactParameters::validate`].
    pub fn compute(&self, params: &ImpactParameters) -> PhysicalOutcome {
        let radius_m = params.diameter_m / 2.0;
        let velocity_m_s = params.velocity_km_s * 1_000.0;
        let angle_sin = params.impact_angle_deg.to_radians().sin();

        let mass_kg = sphere_mass(radius_m, params.bulk_density_kg_m3);
        let energy_j = 0.5 * mass_kg * velocity_m_s.powi(2) * angle_sin;
        let energy_megatons_tnt = energy_j / JOULES_PER_MEGATON;

        // Oblique impacts excavate less; the 0.33 exponent softens the sin() loss.
        let crater_diameter_m = 1.161 * mass_kg.cbrt() * velocity_m_s.powf(0.44)
            / TARGET_DENSITY_KG_M3.powf(0.22)
            * angle_sin.powf(0.33);
        let damage_radius_km = (crater_diameter_m / 1_000.0) * DAMAGE_RADIUS_PER_CRATER;

        PhysicalOutcome {
            mass_kg,
            energy_j,
            energy_megatons_tnt,
            crater_diameter_m,
            damage_radius_km: damage_radius_km.max(0.0),
        }
    }
}

pub fn sphere_mass(radius_m: f64, density_kg_m3: f64) -> f64 {
    (4.0 / 3.0) * PI * radius_m.powi(3) * density_kg_m3
}

/// Kinetic energy in megatons with no angle correction.
pub fn head_on_megatons(diameter_m: f64, velocity_km_s: f64, density_kg_m3: f64) -> f64 {
    let mass_kg = sphere_mass(diameter_m / 2.0, density_kg_m3);
    0.5 * mass_kg * (velocity_km_s * 1_000.0).powi(2) / JOULES_PER_MEGATON
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn new_york_100m() -> ImpactParameters {
        ImpactParameters::new(100.0, 20.0, 50_000.0, 40.7128, -74.0060)
    }

    #[test]
    fn hundred_metre_stony_impactor() {
        let outcome = ImpactPhysicsEngine::new().compute(&new_york_100m());

        assert_relative_eq!(outcome.mass_kg, 1.5708e9, max_relative = 1e-4);
        assert_relative_eq!(outcome.energy_j, 2.2214e17, max_relative = 1e-3);
        assert_relative_eq!(outcome.energy_megatons_tnt, 53.09, max_relative = 1e-3);
        assert!(outcome.crater_diameter_m > 16_000.0 && outcome.crater_diameter_m < 17_000.0);
        assert_relative_eq!(
            outcome.damage_radius_km,
            outcome.crater_diameter_m / 1_000.0 * 20.0
        );
    }

    #[test]
    fn vertical_impact_couples_all_energy() {
        let params = new_york_100m().with_angle(90.0);
        let outcome = ImpactPhysicsEngine::new().compute(&params);
        let expected = head_on_megatons(100.0, 20.0, 3000.0);
        assert_relative_eq!(outcome.energy_megatons_tnt, expected, max_relative = 1e-12);
    }

    #[test]
    fn faster_impactor_is_strictly_worse() {
        let engine = ImpactPhysicsEngine::new();
        let mut previous = engine.compute(&ImpactParameters {
            velocity_km_s: 1.0,
            ..new_york_100m()
        });
        for velocity in [2.0, 5.0, 11.0, 20.0, 42.0, 72.0] {
            let outcome = engine.compute(&ImpactParameters {
                velocity_km_s: velocity,
                ..new_york_100m()
            });
            assert!(outcome.energy_megatons_tnt > previous.energy_megatons_tnt);
            assert!(outcome.damage_radius_km > previous.damage_radius_km);
            previous = outcome;
        }
    }

    #[test]
    fn crater_ignores_impactor_density_beyond_mass() {
        let engine = ImpactPhysicsEngine::new();
        let light = engine.compute(&new_york_100m().with_density(1000.0));
        let heavy = engine.compute(&new_york_100m().with_density(8000.0));
        assert_relative_eq!(
            heavy.crater_diameter_m / light.crater_diameter_m,
            8.0_f64.cbrt(),
            max_relative = 1e-12
        );
    }
}
