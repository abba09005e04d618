//! Maps a combined risk score to a tiered response plan.

use std::fmt;

use serde::Serialize;

/// Radius within which loose objects should be secured for an airburst, km.
pub const AIRBURST_SECURE_RADIUS_KM: f64 = 50.0;

const MODERATE_FROM: f64 = 20.0;
const HIGH_FROM: f64 = 50.0;
const EXTREME_FROM: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MitigationTier {
    Low,
    Moderate,
    High,
    Extreme,
}

impl MitigationTier {
    /// Lower bounds are inclusive: exactly 20.0 is already moderate.
    pub fn from_risk(combined_risk: f64) -> Self {
        if combined_risk < MODERATE_FROM {
            MitigationTier::Low
        } else if combined_risk < HIGH_FROM {
            MitigationTier::Moderate
        } else if combined_risk < EXTREME_FROM {
            MitigationTier::High
        } else {
            MitigationTier::Extreme
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            MitigationTier::Low => "Airburst Alert Protocol",
            MitigationTier::Moderate => "Regional Evacuation Required",
            MitigationTier::High => "National Emergency & Infrastructure Protection",
            MitigationTier::Extreme => "Global Catastrophe & Planetary Defense",
        }
    }
}

impl fmt::Display for MitigationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MitigationTier::Low => "LOW",
            MitigationTier::Moderate => "MODERATE",
            MitigationTier::High => "HIGH",
            MitigationTier::Extreme => "EXTREME",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MitigationPlan {
    pub tier: MitigationTier,
    pub headline: &'static str,
    pub summary: String,
    pub actions: Vec<String>,
    /// Population inside this radius of the impact point must leave.
    pub evacuation_radius_km: Option<f64>,
    /// Shelters must sit at least this far from the impact point.
    pub shelter_radius_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MitigationAdvisor;

impl MitigationAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn advise(
        &self,
        combined_risk: f64,
        is_in_danger_zone: bool,
        nearest_center: &str,
        damage_radius_km: f64,
    ) -> MitigationPlan {
        let tier = MitigationTier::from_risk(combined_risk);
        match tier {
            MitigationTier::Low => low_plan(nearest_center),
            MitigationTier::Moderate => {
                moderate_plan(is_in_danger_zone, nearest_center, damage_radius_km)
            }
            MitigationTier::High => high_plan(is_in_danger_zone, nearest_center, damage_radius_km),
            MitigationTier::Extreme => extreme_plan(nearest_center),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn low_plan(nearest_center: &str) -> MitigationPlan {
    let summary = format!(
        "This meteor will likely burn up in the atmosphere or cause minimal ground damage. \
         However, residents near {nearest_center} should be aware of potential sonic booms \
         and shockwaves, bright flashes in the sky, and minor debris fallout."
    );
    let mut actions = owned(&[
        "Issue public awareness notice about atmospheric entry",
        "Monitor trajectory for any deviations",
        "Prepare emergency services for possible minor injuries",
    ]);
    actions.push(format!(
        "Secure loose objects and windows within {AIRBURST_SECURE_RADIUS_KM:.0}km of predicted airburst"
    ));
    actions.push("Educate public about meteor phenomena to prevent panic".to_string());

    MitigationPlan {
        tier: MitigationTier::Low,
        headline: MitigationTier::Low.headline(),
        summary,
        actions,
        evacuation_radius_km: None,
        shelter_radius_km: None,
    }
}

fn moderate_plan(in_danger: bool, nearest_center: &str, radius_km: f64) -> MitigationPlan {
    let evacuation = radius_km;
    let shelter = radius_km * 1.5;
    let exposure = if in_danger {
        format!("[WARNING]: {nearest_center} is within the danger zone!")
    } else {
        format!("Nearest city ({nearest_center}) is outside immediate danger zone.")
    };
    let summary = format!(
        "This meteor poses significant regional risk. The impact zone extends {radius_km:.1} km \
         from the impact site. {exposure}"
    );
    let mut actions = vec![
        format!("Evacuate all residents within {evacuation:.1} km of impact coordinates"),
        format!("Establish emergency shelters at least {shelter:.1} km away"),
    ];
    actions.extend(owned(&[
        "Deploy emergency response teams and medical units",
        "Secure critical infrastructure (hospitals, power plants, water systems)",
        "Issue emergency broadcasts and alerts",
        "Prepare for blast wave damage, fires, and potential tsunamis (if ocean impact)",
        "Coordinate with national disaster management agencies",
    ]));

    MitigationPlan {
        tier: MitigationTier::Moderate,
        headline: MitigationTier::Moderate.headline(),
        summary,
        actions,
        evacuation_radius_km: Some(evacuation),
        shelter_radius_km: Some(shelter),
    }
}

fn high_plan(in_danger: bool, nearest_center: &str, radius_km: f64) -> MitigationPlan {
    let evacuation = radius_km * 2.0;
    let exposure = if in_danger {
        format!("[CRITICAL]: {nearest_center} faces total destruction!")
    } else {
        format!(
            "Major cities within {}km must evacuate immediately!",
            radius_km.trunc()
        )
    };
    let summary = format!(
        "This is a catastrophic-scale impact that will devastate {radius_km:.1} km radius. \
         {exposure}"
    );
    let mut actions = owned(&["Declare national emergency and activate all disaster protocols"]);
    actions.push(format!(
        "Mass evacuation of population within {evacuation:.1} km"
    ));
    actions.extend(owned(&[
        "Reinforce critical infrastructure outside the impact zone",
        "Deploy military assets for rescue and recovery operations",
        "Establish emergency government continuity plans",
        "Stockpile food, water, and medical supplies",
        "Prepare for long-term displacement of millions",
        "International aid coordination with UN and neighboring countries",
        "Consider deflection missions if detection is early enough",
    ]));

    MitigationPlan {
        tier: MitigationTier::High,
        headline: MitigationTier::High.headline(),
        summary,
        actions,
        evacuation_radius_km: Some(evacuation),
        shelter_radius_km: None,
    }
}

fn extreme_plan(nearest_center: &str) -> MitigationPlan {
    let summary = format!(
        "This is an extinction-level impact event with global consequences. \
         ALL major population centers including {nearest_center} are at risk from global effects. \
         If impact is imminent and deflection impossible, focus on protecting genetic diversity \
         and knowledge repositories, deep underground shelter construction, and long-term \
         survival preparation for the post-impact world."
    );
    let actions = owned(&[
        "Activate international planetary defense protocols immediately",
        "Consider kinetic impactor or nuclear deflection missions",
        "Global evacuation and shelter-in-place orders",
        "Prepare for massive earthquakes and tsunamis worldwide",
        "Prepare for global firestorms and atmospheric ignition",
        "Prepare for impact winter and crop failures",
        "Prepare for collapse of civilization infrastructure",
        "Establish underground shelters and seed vaults",
        "Preserve critical knowledge and technology",
        "International cooperation for human species survival",
        "Launch emergency space missions if time permits",
        "Document and preserve cultural heritage",
    ]);

    MitigationPlan {
        tier: MitigationTier::Extreme,
        headline: MitigationTier::Extreme.headline(),
        summary,
        actions,
        evacuation_radius_km: None,
        shelter_radius_km: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_selection_at_boundaries() {
        let cases = [
            (0.0, MitigationTier::Low),
            (19.9, MitigationTier::Low),
            (20.0, MitigationTier::Moderate),
            (49.9, MitigationTier::Moderate),
            (50.0, MitigationTier::High),
            (79.9, MitigationTier::High),
            (80.0, MitigationTier::Extreme),
            (100.0, MitigationTier::Extreme),
        ];
        for (risk, tier) in cases {
            assert_eq!(MitigationTier::from_risk(risk), tier, "risk {risk}");
        }
    }

    #[test]
    fn moderate_scales_evacuation_and_shelter() {
        let plan = MitigationAdvisor::new().advise(35.0, true, "Lima, Peru", 12.0);
        assert_eq!(plan.tier, MitigationTier::Moderate);
        assert_eq!(plan.evacuation_radius_km, Some(12.0));
        assert_eq!(plan.shelter_radius_km, Some(18.0));
        assert_eq!(
            plan.actions[0],
            "Evacuate all residents within 12.0 km of impact coordinates"
        );
        assert_eq!(plan.actions[1], "Establish emergency shelters at least 18.0 km away");
        assert!(plan.summary.contains("[WARNING]: Lima, Peru is within the danger zone!"));
    }

    #[test]
    fn high_doubles_evacuation_radius() {
        let plan = MitigationAdvisor::new().advise(60.0, false, "Perth, Australia", 120.5);
        assert_eq!(plan.tier, MitigationTier::High);
        assert_eq!(plan.evacuation_radius_km, Some(241.0));
        assert_eq!(plan.actions[1], "Mass evacuation of population within 241.0 km");
        assert!(plan.summary.contains("Major cities within 120km"));
    }

    #[test]
    fn low_and_extreme_make_no_radius_claim() {
        let advisor = MitigationAdvisor::new();
        let low = advisor.advise(4.0, false, "Cairo, Egypt", 0.3);
        assert_eq!(low.evacuation_radius_km, None);
        assert!(low.actions.iter().any(|a| a.contains("within 50km")));

        let extreme = advisor.advise(95.0, true, "Tokyo, Japan", 900.0);
        assert_eq!(extreme.tier, MitigationTier::Extreme);
        assert_eq!(extreme.evacuation_radius_km, None);
        assert!(extreme.summary.contains("Tokyo, Japan"));
        assert_eq!(extreme.actions.len(), 12);
    }

    #[test]
    fn tier_display_names() {
        assert_eq!(MitigationTier::Low.to_string(), "LOW");
        assert_eq!(MitigationTier::Extreme.to_string(), "EXTREME");
    }
}
