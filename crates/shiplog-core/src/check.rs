//! Parameter-range checker: a fixed rule table evaluated against a
//! serialized entry.
//!
//! Pure and advisory. Out-of-range readings become [`Warning`]s attached to
//! the submission; they never block it. Empty or unparseable readings are
//! absent, not zero, and produce no warning.

use crate::{codec, value::Value};
use std::sync::LazyLock;

///
/// RangeRule
///

#[derive(Clone, Debug)]
pub struct RangeRule {
    pub path: String,
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub guidance: String,
}

impl RangeRule {
    fn new(path: &str, min: f64, max: f64, label: &str, guidance: &str) -> Self {
        Self {
            path: path.to_string(),
            min,
            max,
            label: label.to_string(),
            guidance: guidance.to_string(),
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

///
/// Warning
///
/// Advisory out-of-range notice. Attached to the submission's `meta`
/// namespace, never persisted independently.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Warning {
    pub label: String,
    pub value: f64,
    pub guidance: String,
}

fn engine_rules(prefix: &str, label: &str) -> Vec<RangeRule> {
    vec![
        RangeRule::new(
            &format!("{prefix}.oilTemp"),
            60.0,
            95.0,
            &format!("{label} Oil Temp"),
            "Expected 60–95 °C at cruise.",
        ),
        RangeRule::new(
            &format!("{prefix}.oilPressure"),
            310.0,
            420.0,
            &format!("{label} Oil Pressure"),
            "Expected 310–420 kPa at cruise.",
        ),
        RangeRule::new(
            &format!("{prefix}.fuelDiff"),
            0.0,
            60.0,
            &format!("{label} Fuel Filter Diff"),
            "Expected 0–60 kPa; rising differential means a clogging filter.",
        ),
        RangeRule::new(
            &format!("{prefix}.fuelPressure"),
            400.0,
            600.0,
            &format!("{label} Fuel Pressure"),
            "Expected 400–600 kPa at cruise.",
        ),
        RangeRule::new(
            &format!("{prefix}.coolantTemp"),
            70.0,
            95.0,
            &format!("{label} Jacket Water Temp"),
            "Expected 70–95 °C at cruise.",
        ),
        RangeRule::new(
            &format!("{prefix}.scavengeAir"),
            25.0,
            55.0,
            &format!("{label} Scavenge Air Temp"),
            "Expected 25–55 °C at cruise.",
        ),
    ]
}

fn generator_rules(n: u8) -> Vec<RangeRule> {
    let prefix = format!("gen{n}");
    let label = format!("Gen {n}");
    vec![
        RangeRule::new(
            &format!("{prefix}.oil_temperature"),
            70.0,
            110.0,
            &format!("{label} Oil Temperature"),
            "Expected 70–110 °C under load.",
        ),
        RangeRule::new(
            &format!("{prefix}.oil_pressure_kpa"),
            250.0,
            500.0,
            &format!("{label} Oil Pressure"),
            "Expected 250–500 kPa under load.",
        ),
        RangeRule::new(
            &format!("{prefix}.fuel_pressure_kpa"),
            300.0,
            700.0,
            &format!("{label} Fuel Pressure"),
            "Expected 300–700 kPa under load.",
        ),
        RangeRule::new(
            &format!("{prefix}.coolant_temp_°c"),
            70.0,
            95.0,
            &format!("{label} Coolant Temp"),
            "Expected 70–95 °C under load.",
        ),
        RangeRule::new(
            &format!("{prefix}.inlet_air_temp_°c"),
            10.0,
            50.0,
            &format!("{label} Inlet Air Temp"),
            "Expected 10–50 °C; check enclosure ventilation if higher.",
        ),
    ]
}

/// The full rule table: six checks per main engine, five per possible
/// generator, plus the two ungated tank/sea-water checks.
pub static RULES: LazyLock<Vec<RangeRule>> = LazyLock::new(|| {
    let mut rules = Vec::new();
    rules.extend(engine_rules("port", "PORT"));
    rules.extend(engine_rules("stbd", "STBD"));
    for n in 1..=3 {
        rules.extend(generator_rules(n));
    }
    rules.push(RangeRule::new(
        "other.seaWaterTemp",
        0.0,
        32.0,
        "Sea Water Temp",
        "Expected 0–32 °C; verify strainer and intake if higher.",
    ));
    rules.push(RangeRule::new(
        "other.dayTankTemp",
        10.0,
        60.0,
        "Day Tank Temp",
        "Expected 10–60 °C.",
    ));
    rules
});

/// Evaluate every rule against `entry`. Absent, empty, and unparseable
/// readings are skipped.
#[must_use]
pub fn evaluate(entry: &Value) -> Vec<Warning> {
    RULES
        .iter()
        .filter_map(|rule| {
            let value = codec::read_at(entry, &rule.path)?.as_number()?;
            if rule.contains(value) {
                None
            } else {
                Some(Warning {
                    label: rule.label.clone(),
                    value,
                    guidance: rule.guidance.clone(),
                })
            }
        })
        .collect()
}
