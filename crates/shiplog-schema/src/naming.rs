//! Label-to-key naming rules shared by the renderer, serializer, and the
//! photo-ingestion gate.
//!
//! Two-tier resolution for gen-matrix rows: the exact-match table below is
//! consulted first, generic normalization is the fallback. The table is
//! versioned schema data, not inline logic, so it can be tested and revised
//! independently of rendering.

///
/// GEN FIELD TABLE
///
/// Maps a panel row label to the stable field name used under `gen{N}.*`.
/// Several names are not derivable from the label ("Amps A1" must become
/// `amps_a1`, "Coolant Temp (°C)" keeps its degree sign), which is why this
/// is an explicit table.
///

pub const GEN_FIELD_TABLE_VERSION: u32 = 2;

pub const GEN_FIELD_TABLE: &[(&str, &str)] = &[
    ("kW", "kw"),
    ("kVAr", "kvar"),
    ("Amps A", "amps_a"),
    ("Amps A1", "amps_a1"),
    ("Voltage V", "voltage_v"),
    ("RPM", "rpm"),
    ("Load (%)", "load_pct"),
    ("Fuel Consumption (L/min)", "fuel_consumption_l_min"),
    ("Fuel Consumption (Lt/h)", "fuel_consumption_lt_h"),
    ("Coolant Temp (°C)", "coolant_temp_°c"),
    ("Oil Pressure (kPa)", "oil_pressure_kpa"),
    ("Oil Temperature", "oil_temperature"),
    ("Fuel Temp (°C)", "fuel_temp_°c"),
    ("Fuel Pressure (kPa)", "fuel_pressure_kpa"),
    ("Sea Water Pressure (kPa)", "sea_water_pressure_kpa"),
    ("Boost Pressure (kPa)", "boost_pressure_kpa"),
    ("Inlet Air Temp (°C)", "inlet_air_temp_°c"),
    ("Visual in Enclosure Check", "visual_in_enclosure_check"),
    ("Fans Operating Check", "fans_operating_check"),
    ("Engine Hours", "engine_hours"),
    ("Battery Voltage", "battery_voltage"),
];

/// Resolve the `gen{N}.*` field name for a matrix row label.
#[must_use]
pub fn field_name_for(label: &str) -> String {
    GEN_FIELD_TABLE
        .iter()
        .find(|(l, _)| *l == label)
        .map_or_else(|| normalize_label(label), |(_, name)| (*name).to_string())
}

/// Normalize a row label into a key-path segment: ASCII-lowercase, every run
/// of non-alphanumeric characters replaced by a single underscore.
///
/// Table-group key suffixes are built with this, so it must stay stable
/// across releases or persisted drafts stop round-tripping.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_run = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

///
/// SCAN ALLOW-LIST
///
/// Every path the photo-ingestion backend may write. Paths outside this list
/// are dropped before they reach the rendered surface. Kept bit-exact with
/// the deployed extraction function.
///

pub const SCAN_ALLOWED_PATHS: &[&str] = &[
    // Main engines (PORT/STBD)
    "port.rpm",
    "port.fuelPressure",
    "port.oilTemp",
    "port.swPressure",
    "port.boostPressure",
    "port.scavengeAir",
    "port.leftExhaust",
    "port.rightExhaust",
    "port.exSurface",
    "port.fuelDiff",
    "port.oilDiff",
    "port.coolantTemp",
    "port.oilPressure",
    "port.transGearTemp",
    "port.transOilPressure",
    "port.fuelConsumption",
    "port.loadPct",
    "port.shaftFlow",
    "port.thrustBearingTemp",
    "port.exSeaWaterPress",
    "stbd.rpm",
    "stbd.fuelPressure",
    "stbd.oilTemp",
    "stbd.swPressure",
    "stbd.boostPressure",
    "stbd.scavengeAir",
    "stbd.leftExhaust",
    "stbd.rightExhaust",
    "stbd.exSurface",
    "stbd.fuelDiff",
    "stbd.oilDiff",
    "stbd.coolantTemp",
    "stbd.oilPressure",
    "stbd.transGearTemp",
    "stbd.transOilPressure",
    "stbd.fuelConsumption",
    "stbd.loadPct",
    "stbd.shaftFlow",
    "stbd.thrustBearingTemp",
    "stbd.exSeaWaterPress",
    // Generators (one-valued panel readings, not hourly)
    "gen1.kw",
    "gen1.kvar",
    "gen1.amps_a",
    "gen1.voltage_v",
    "gen1.rpm",
    "gen1.fuel_consumption_l_min",
    "gen1.load_pct",
    "gen1.coolant_temp_°c",
    "gen1.oil_pressure_kpa",
    "gen1.fuel_temp_°c",
    "gen1.fuel_pressure_kpa",
    "gen1.sea_water_pressure_kpa",
    "gen1.oil_temperature",
    "gen1.boost_pressure_kpa",
    "gen1.inlet_air_temp_°c",
    "gen1.visual_in_enclosure_check",
    "gen1.fans_operating_check",
    "gen1.engine_hours",
    "gen1.battery_voltage",
    "gen1.fuel_consumption_lt_h",
    "gen2.kw",
    "gen2.kvar",
    "gen2.amps_a",
    "gen2.voltage_v",
    "gen2.rpm",
    "gen2.fuel_consumption_l_min",
    "gen2.load_pct",
    "gen2.coolant_temp_°c",
    "gen2.oil_pressure_kpa",
    "gen2.fuel_temp_°c",
    "gen2.fuel_pressure_kpa",
    "gen2.sea_water_pressure_kpa",
    "gen2.oil_temperature",
    "gen2.boost_pressure_kpa",
    "gen2.inlet_air_temp_°c",
    "gen2.visual_in_enclosure_check",
    "gen2.fans_operating_check",
    "gen2.engine_hours",
    "gen2.battery_voltage",
    "gen2.fuel_consumption_lt_h",
    "gen3.kw",
    "gen3.kvar",
    "gen3.amps_a",
    "gen3.voltage_v",
    "gen3.rpm",
    "gen3.fuel_consumption_l_min",
    "gen3.load_pct",
    "gen3.coolant_temp_°c",
    "gen3.oil_pressure_kpa",
    "gen3.fuel_temp_°c",
    "gen3.fuel_pressure_kpa",
    "gen3.sea_water_pressure_kpa",
    "gen3.oil_temperature",
    "gen3.boost_pressure_kpa",
    "gen3.inlet_air_temp_°c",
    "gen3.visual_in_enclosure_check",
    "gen3.fans_operating_check",
    "gen3.engine_hours",
    "gen3.battery_voltage",
    "gen3.fuel_consumption_lt_h",
    // Other
    "other.seaWaterTemp",
    "other.dayTankTemp",
];

/// True when the photo-ingestion gate accepts writes at `path`.
#[must_use]
pub fn scan_path_allowed(path: &str) -> bool {
    SCAN_ALLOWED_PATHS.contains(&path)
}
