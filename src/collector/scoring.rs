//! Quick screening score for feed records.
//!
//! Feed records carry no impact site or angle, so they are scored with a
//! linear formula instead of the full [`crate::risk::RiskClassifier`]:
//! half the head-on energy in megatons plus the proximity term, clamped and
//! rounded to one decimal. The two scores are not comparable with each other.

use crate::{
    params::DEFAULT_BULK_DENSITY_KG_M3,
    physics::head_on_megatons,
    risk::{clamp_score, round_to, PROXIMITY_HORIZON_KM},
};

/// Ordered from least to most severe; indexed by `risk / 5`.
pub const STRATEGY_CATALOGUE: [&str; 20] = [
    "Early detection and orbit monitoring to plan deflection.",
    "Evacuation of high-risk areas if impact is imminent.",
    "International coordination for disaster management.",
    "Deploy kinetic impactor to change asteroid trajectory.",
    "Use nuclear devices only as last-resort deflection.",
    "Public alert system for meteor airburst warnings.",
    "Secure critical infrastructure in potential impact zones.",
    "Simulation drills for cities under high risk.",
    "Satellite observation to track fragmenting meteors.",
    "Emergency medical preparation for blast injuries.",
    "Fire suppression readiness in case of fireball impacts.",
    "Marine alerts for potential tsunami from ocean impacts.",
    "Reinforcement of buildings against shockwaves.",
    "Debris shielding for satellites in orbit.",
    "Rapid response teams for search & rescue.",
    "Meteor insurance programs for property damage.",
    "Temporary exclusion zones around predicted impact sites.",
    "Analysis of meteor composition for chemical hazards.",
    "Post-impact environmental monitoring plans.",
    "Research into long-term planetary defense strategies.",
];

pub fn screening_risk(diameter_m: f64, velocity_km_s: f64, distance_km: f64) -> f64 {
    let energy_mt = head_on_megatons(diameter_m, velocity_km_s, DEFAULT_BULK_DENSITY_KG_M3);
    let proximity = (PROXIMITY_HORIZON_KM - distance_km) / 1e5;
    round_to(clamp_score(energy_mt * 0.5 + proximity), 1)
}

pub fn screening_strategy(risk: f64) -> &'static str {
    let index = ((risk.max(0.0) / 5.0) as usize).min(STRATEGY_CATALOGUE.len() - 1);
    STRATEGY_CATALOGUE[index]
}
