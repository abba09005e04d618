//! Terminal rendering of an impact report.

use std::io::{self, Write};

use crate::report::ImpactReport;

const RULE_WIDTH: usize = 70;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn render_report<W: Write>(out: &mut W, report: &ImpactReport) -> io::Result<()> {
    let params = &report.parameters;
    let outcome = &report.outcome;
    let risk = &report.risk;
    let exposure = &report.exposure;
    let plan = &report.mitigation;

    writeln!(out, "\n{}", rule())?;
    writeln!(out, "IMPACT PREDICTION RESULTS")?;
    writeln!(out, "{}", rule())?;

    writeln!(out, "\n[IMPACT LOCATION]")?;
    writeln!(out, "   Coordinates: {}, {}", params.latitude, params.longitude)?;
    writeln!(
        out,
        "   Nearest City: {} ({:.2} km away, population {})",
        exposure.nearest_center,
        exposure.distance_to_center_km,
        grouped(exposure.center_population as f64, 0)
    )?;
    let zone = if exposure.is_in_danger_zone {
        "[ALERT] YES - EVACUATE IMMEDIATELY!"
    } else {
        "No - Outside damage radius"
    };
    writeln!(out, "   City in Danger Zone: {zone}")?;

    writeln!(out, "\n[METEOR CHARACTERISTICS]")?;
    writeln!(out, "   Diameter: {} m", grouped(params.diameter_m, 1))?;
    writeln!(out, "   Velocity: {} km/s", grouped(params.velocity_km_s, 2))?;
    writeln!(out, "   Distance from Earth: {} km", grouped(params.distance_km, 0))?;
    writeln!(
        out,
        "   Impact Angle: {:.1} deg, Density: {} kg/m3",
        params.impact_angle_deg,
        grouped(params.bulk_density_kg_m3, 0)
    )?;
    writeln!(
        out,
        "   Estimated Mass: {:.2e} kg ({} metric tons)",
        outcome.mass_kg,
        grouped(outcome.mass_kg / 1_000.0, 0)
    )?;

    writeln!(out, "\n[IMPACT CONSEQUENCES]")?;
    writeln!(out, "   Impact Energy: {:.2e} Megatons TNT", outcome.energy_megatons_tnt)?;
    writeln!(out, "   Crater Diameter: {} m", grouped(outcome.crater_diameter_m, 1))?;
    writeln!(out, "   Damage Radius: {} km", grouped(outcome.damage_radius_km, 1))?;
    writeln!(out, "   Impact Classification: {}", risk.classification_label)?;
    writeln!(out, "   Estimated Casualties: {}", risk.casualty_band)?;

    writeln!(out, "\n[RISK ASSESSMENT]")?;
    writeln!(out, "   Proximity Risk: {:.1}/100", risk.proximity_risk)?;
    writeln!(out, "   Impact Risk: {:.1}/100", risk.impact_risk)?;
    writeln!(out, "   Combined Risk Factor: {:.1}/100", risk.combined_risk)?;

    writeln!(out, "\n[MITIGATION STRATEGY]")?;
    writeln!(out, "[{} RISK] - {}", plan.tier, plan.headline)?;
    writeln!(out, "\n{}", plan.summary)?;
    writeln!(out, "\nRECOMMENDED ACTIONS:")?;
    for action in &plan.actions {
        writeln!(out, "* {action}")?;
    }

    writeln!(out, "\n{}", rule())?;
    Ok(())
}

/// Formats `value` with `decimals` places and comma thousands separators.
pub fn grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (formatted.as_str(), None),
    };

    let mut digits = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            digits.push(',');
        }
        digits.push(ch);
    }

    let sign = if value.is_sign_negative() && formatted.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{digits}.{frac}"),
        None => format!("{sign}{digits}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params::ImpactParameters, population::PopulationCenterIndex, report::evaluate};

    #[test]
    fn grouped_inserts_separators() {
        assert_eq!(grouped(0.0, 1), "0.0");
        assert_eq!(grouped(999.0, 0), "999");
        assert_eq!(grouped(1_000.0, 0), "1,000");
        assert_eq!(grouped(1_570_796.3, 0), "1,570,796");
        assert_eq!(grouped(16_521.04, 1), "16,521.0");
        assert_eq!(grouped(-12_345.678, 2), "-12,345.68");
        assert_eq!(grouped(-0.001, 1), "0.0");
    }

    #[test]
    fn report_has_every_section() {
        let params = ImpactParameters::new(100.0, 20.0, 50_000.0, 40.7128, -74.0060);
        let report = evaluate(&params, &PopulationCenterIndex::world_cities()).unwrap();
        let mut buffer = Vec::new();
        render_report(&mut buffer, &report).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        for section in [
            "[IMPACT LOCATION]",
            "[METEOR CHARACTERISTICS]",
            "[IMPACT CONSEQUENCES]",
            "[RISK ASSESSMENT]",
            "[MITIGATION STRATEGY]",
        ] {
            assert!(text.contains(section), "missing {section}");
        }
        assert!(text.contains("Nearest City: New York, USA (0.00 km away"));
        assert!(text.contains("[ALERT] YES"));
        assert!(text.contains("City to country-scale devastation"));
    }
}
