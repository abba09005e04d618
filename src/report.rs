//! Assembles a complete impact report from raw parameters.

use serde::Serialize;

use crate::{
    error::ImpactError,
    mitigation::{MitigationAdvisor, MitigationPlan},
    params::ImpactParameters,
    physics::{ImpactPhysicsEngine, PhysicalOutcome},
    population::CenterLookup,
    risk::{RiskAssessment, RiskClassifier},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureResult {
    pub nearest_center: String,
    pub center_population: u64,
    pub distance_to_center_km: f64,
    pub is_in_danger_zone: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    pub parameters: ImpactParameters,
    pub outcome: PhysicalOutcome,
    pub risk: RiskAssessment,
    pub exposure: ExposureResult,
    pub mitigation: MitigationPlan,
}

pub struct ImpactReportBuilder<'a, L: CenterLookup + ?Sized> {
    centers: &'a L,
    physics: ImpactPhysicsEngine,
    classifier: RiskClassifier,
    advisor: MitigationAdvisor,
}

impl<'a, L: CenterLookup + ?Sized> ImpactReportBuilder<'a, L> {
    pub fn new(centers: &'a L) -> Self {
        Self {
            centers,
            physics: ImpactPhysicsEngine::new(),
            classifier: RiskClassifier::new(),
            advisor: MitigationAdvisor::new(),
        }
    }

    pub fn build(&self, params: &ImpactParameters) -> Result<ImpactReport, ImpactError> {
        params.validate()?;

        let outcome = self.physics.compute(params);
        let nearest = self.centers.nearest(params.latitude, params.longitude)?;
        let risk = self.classifier.classify(&outcome, params.distance_km);

        let exposure = ExposureResult {
            is_in_danger_zone: nearest.distance_km <= outcome.damage_radius_km,
            nearest_center: nearest.name,
            center_population: nearest.population,
            distance_to_center_km: nearest.distance_km,
        };
        let mitigation = self.advisor.advise(
            risk.combined_risk,
            exposure.is_in_danger_zone,
            &exposure.nearest_center,
            outcome.damage_radius_km,
        );

        Ok(ImpactReport {
            parameters: *params,
            outcome,
            risk,
            exposure,
            mitigation,
        })
    }
}

/// One-shot evaluation against a population-center lookup.
pub fn evaluate<L: CenterLookup + ?Sized>(
    params: &ImpactParameters,
    centers: &L,
) -> Result<ImpactReport, ImpactError> {
    ImpactReportBuilder::new(centers).build(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::NearestCenter;

    /// Fixed-distance lookup for exercising the danger-zone edge.
    struct FixedDistance(f64);

    impl CenterLookup for FixedDistance {
        fn nearest(&self, _: f64, _: f64) -> Result<NearestCenter, ImpactError> {
            Ok(NearestCenter {
                name: "Fixture".to_string(),
                population: 42,
                distance_km: self.0,
            })
        }
    }

    #[test]
    fn danger_zone_includes_equality() {
        let params = ImpactParameters::new(50.0, 17.0, 1e6, 0.0, 0.0);
        let radius = ImpactPhysicsEngine::new().compute(&params).damage_radius_km;

        let on_edge = evaluate(&params, &FixedDistance(radius)).unwrap();
        assert!(on_edge.exposure.is_in_danger_zone);

        let beyond = evaluate(&params, &FixedDistance(radius + 0.01)).unwrap();
        assert!(!beyond.exposure.is_in_danger_zone);
    }

    #[test]
    fn invalid_parameters_short_circuit() {
        let params = ImpactParameters::new(50.0, 17.0, 1e6, 95.0, 0.0);
        let err = evaluate(&params, &FixedDistance(0.0)).unwrap_err();
        assert_eq!(err.field(), Some("latitude"));
    }

    #[test]
    fn mitigation_uses_combined_risk_and_exposure() {
        let params = ImpactParameters::new(50.0, 17.0, 1e6, 0.0, 0.0);
        let report = evaluate(&params, &FixedDistance(0.0)).unwrap();
        assert_eq!(
            report.mitigation.tier,
            crate::mitigation::MitigationTier::from_risk(report.risk.combined_risk)
        );
        assert_eq!(report.exposure.center_population, 42);
    }
}
