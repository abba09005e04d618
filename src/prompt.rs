//! Line-oriented prompting for the interactive predictor.

use std::io::{self, BufRead, Write};

use crate::params::ImpactParameters;

/// Values supplied up front; anything left `None` is asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialParameters {
    pub diameter_m: Option<f64>,
    pub velocity_km_s: Option<f64>,
    pub distance_km: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PartialParameters {
    pub fn is_complete(&self) -> bool {
        self.diameter_m.is_some()
            && self.velocity_km_s.is_some()
            && self.distance_km.is_some()
            && self.latitude.is_some()
            && self.longitude.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptOutcome {
    Parameters(ImpactParameters),
    /// A non-numeric answer; the offending text is kept for the message.
    NotANumber(String),
    EndOfInput,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for each missing value in turn, stopping at the first bad answer.
    pub fn collect(
        &mut self,
        preset: PartialParameters,
        impact_angle_deg: f64,
        bulk_density_kg_m3: f64,
    ) -> io::Result<PromptOutcome> {
        let fields = [
            (preset.diameter_m, "Meteor diameter (meters): "),
            (preset.velocity_km_s, "Velocity (km/s): "),
            (preset.distance_km, "Distance from Earth (km): "),
            (preset.latitude, "Impact latitude (-90 to 90): "),
            (preset.longitude, "Impact longitude (-180 to 180): "),
        ];

        let mut values = [0.0_f64; 5];
        for (slot, (given, label)) in values.iter_mut().zip(fields) {
            if let Some(value) = given {
                *slot = value;
                continue;
            }
            let Some(answer) = self.read_line(label)? else {
                return Ok(PromptOutcome::EndOfInput);
            };
            match answer.parse::<f64>() {
                Ok(value) => *slot = value,
                Err(_) => return Ok(PromptOutcome::NotANumber(answer)),
            }
        }

        let [diameter_m, velocity_km_s, distance_km, latitude, longitude] = values;
        Ok(PromptOutcome::Parameters(
            ImpactParameters::new(diameter_m, velocity_km_s, distance_km, latitude, longitude)
                .with_angle(impact_angle_deg)
                .with_density(bulk_density_kg_m3),
        ))
    }

    /// True unless the user typed `Q` (any case) or input ended.
    pub fn another_round(&mut self) -> io::Result<bool> {
        let answer =
            self.read_line("\nPress ENTER to predict another impact, or type 'Q' to quit: ")?;
        Ok(answer.map_or(false, |text| !text.eq_ignore_ascii_case("q")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn asks_only_for_missing_values() {
        let mut prompt = prompter("20\n40.7128\n");
        let preset = PartialParameters {
            diameter_m: Some(100.0),
            distance_km: Some(50_000.0),
            longitude: Some(-74.006),
            ..Default::default()
        };
        let outcome = prompt.collect(preset, 30.0, 2500.0).unwrap();

        let PromptOutcome::Parameters(params) = outcome else {
            panic!("expected parameters, got {outcome:?}");
        };
        assert_eq!(params.velocity_km_s, 20.0);
        assert_eq!(params.latitude, 40.7128);
        assert_eq!(params.impact_angle_deg, 30.0);
        assert_eq!(params.bulk_density_kg_m3, 2500.0);

        let asked = String::from_utf8(prompt.output().clone()).unwrap();
        assert!(asked.contains("Velocity (km/s): "));
        assert!(!asked.contains("Meteor diameter"));
    }

    #[test]
    fn non_numeric_answer_stops_the_round() {
        let mut prompt = prompter("big\n");
        let outcome = prompt.collect(PartialParameters::default(), 45.0, 3000.0).unwrap();
        assert_eq!(outcome, PromptOutcome::NotANumber("big".to_string()));
    }

    #[test]
    fn closed_input_ends_the_session() {
        let mut prompt = prompter("10\n");
        let outcome = prompt.collect(PartialParameters::default(), 45.0, 3000.0).unwrap();
        assert_eq!(outcome, PromptOutcome::EndOfInput);
        assert!(!prompt.another_round().unwrap());
    }

    #[test]
    fn quit_is_case_insensitive() {
        assert!(!prompter("q\n").another_round().unwrap());
        assert!(!prompter("Q\n").another_round().unwrap());
        assert!(prompter("\n").another_round().unwrap());
    }
}
