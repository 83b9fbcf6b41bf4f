//! The shipped engine-room log document.
//!
//! Intentionally verbose and editable so the rendered form matches the paper
//! log exactly; labels and keys can be tweaked here without touching form
//! logic. The key-path namespace (`port.*`, `stbd.*`, `gen{N}.*`, `other.*`,
//! top-level header scalars) must stay bit-exact with persisted drafts, the
//! submission log, and the photo-ingestion allow-list.

use crate::{
    node::*,
    types::{GenId, InputKind},
};

/// Hourly reading columns, time-of-day labels.
pub const HOURS_COLUMNS: &[&str] = &[
    "0000", "0200", "0400", "0600", "0800", "1000", "1200", "1400", "1600", "1800", "2000", "2200",
];

/// Row labels of the generator panel matrix. Field names resolve through the
/// gen field table in [`crate::naming`].
pub const GEN_PANEL_ROWS: &[&str] = &[
    "kW",
    "kVAr",
    "Amps A",
    "Voltage V",
    "RPM",
    "Load (%)",
    "Fuel Consumption (Lt/h)",
    "Coolant Temp (°C)",
    "Oil Pressure (kPa)",
    "Oil Temperature",
    "Fuel Temp (°C)",
    "Fuel Pressure (kPa)",
    "Sea Water Pressure (kPa)",
    "Boost Pressure (kPa)",
    "Inlet Air Temp (°C)",
    "Engine Hours",
    "Battery Voltage",
];

/// Hourly row labels per generator.
pub const GEN_HOURLY_ROWS: &[&str] = &[
    "kW",
    "Amps",
    "Voltage",
    "RPM",
    "Oil Pressure (bar)",
    "Coolant Temp (°C)",
];

/// Build the production engine-room log document.
#[must_use]
pub fn engine_room_log() -> Document {
    Document::new(vec![
        header(),
        main_engines(),
        generators(),
        generators_hourly(),
        other_readings(),
        remarks(),
        sign_off(),
    ])
}

fn header() -> Section {
    Section::new(
        "header",
        "Header",
        SectionBody::Fields(FieldsSection {
            columns: 5,
            layout: FieldLayout::Flat {
                fields: vec![
                    Field::new("date", "Date", InputKind::Date).required(),
                    Field::new("time", "Time", InputKind::Time),
                    Field::new("from", "From / At", InputKind::Text),
                    Field::new("to", "To", InputKind::Text),
                    Field::new("route", "Route", InputKind::Text),
                ],
            },
        }),
    )
}

fn engine_fields(prefix: &str) -> Vec<Field> {
    let num = |suffix: &str, label: &str| {
        Field::new(&format!("{prefix}.{suffix}"), label, InputKind::Number).step(0.1)
    };

    vec![
        num("rpm", "RPM"),
        num("fuelPressure", "Fuel Pressure (kPa)"),
        num("oilPressure", "Oil Pressure (kPa)"),
        num("oilTemp", "Oil Temp (°C)"),
        num("oilDiff", "Oil Filter Diff (kPa)"),
        num("fuelDiff", "Fuel Filter Diff (kPa)"),
        num("coolantTemp", "Jacket Water Temp (°C)"),
        num("swPressure", "Sea Water Pressure (kPa)"),
        num("boostPressure", "Boost Pressure (kPa)"),
        num("scavengeAir", "Scavenge Air Temp (°C)"),
        num("leftExhaust", "Left Exhaust (°C)"),
        num("rightExhaust", "Right Exhaust (°C)"),
        num("exSurface", "Exhaust Surface (°C)"),
        num("exSeaWaterPress", "Exhaust S/W Press (kPa)"),
        num("transGearTemp", "Trans Gear Temp (°C)"),
        num("transOilPressure", "Trans Oil Pressure (kPa)"),
        num("thrustBearingTemp", "Thrust Bearing Temp (°C)"),
        num("shaftFlow", "Shaft Flow (L/min)"),
        num("fuelConsumption", "Fuel Consumption (L/h)"),
        num("loadPct", "Load (%)"),
    ]
}

fn main_engines() -> Section {
    Section::new(
        "main-engines",
        "Main Engines",
        SectionBody::Fields(FieldsSection {
            columns: 4,
            layout: FieldLayout::Grouped {
                groups: vec![
                    Group {
                        title: "PORT".to_string(),
                        gen_id: None,
                        fields: engine_fields("port"),
                    },
                    Group {
                        title: "STBD".to_string(),
                        gen_id: None,
                        fields: engine_fields("stbd"),
                    },
                ],
            },
        }),
    )
}

fn generators() -> Section {
    Section::new(
        "generators",
        "Generators",
        SectionBody::Composite(CompositeSection {
            children: vec![
                Section::new(
                    "gen-control",
                    "Generators Running",
                    SectionBody::GeneratorControl(GeneratorControlSection {
                        ids: vec![GenId::new(1), GenId::new(2), GenId::new(3)],
                    }),
                ),
                Section::new(
                    "gen-summary",
                    "Generators — Summary",
                    SectionBody::Fields(FieldsSection {
                        columns: 3,
                        layout: FieldLayout::Grouped {
                            groups: (1..=3).map(gen_summary_group).collect(),
                        },
                    }),
                ),
                Section::new(
                    "gen-panel",
                    "Generator Panel Readings",
                    SectionBody::GenMatrix(GenMatrixSection {
                        rows: GEN_PANEL_ROWS.iter().map(ToString::to_string).collect(),
                    }),
                ),
            ],
        }),
    )
}

// Run-time summary per generator, shown only while that generator is active.
fn gen_summary_group(n: u8) -> Group {
    Group {
        title: format!("Generator {n}"),
        gen_id: Some(GenId::new(n)),
        fields: vec![
            Field::new(&format!("gen{n}.from"), "From / At", InputKind::Text),
            Field::new(&format!("gen{n}.to"), "To", InputKind::Text),
            Field::new(&format!("gen{n}.hours"), "Hours", InputKind::Number).step(0.1),
        ],
    }
}

fn generators_hourly() -> Section {
    let group = |n: u8| {
        TableGroup::new(
            &format!("Generator {n}"),
            &format!("group{n}"),
            GEN_HOURLY_ROWS,
        )
        .gen_id(GenId::new(n))
    };

    Section::new(
        "generators-hourly",
        "Generators — Hourly Readings",
        SectionBody::TableGroups(TableGroupsSection {
            columns: HOURS_COLUMNS.iter().map(ToString::to_string).collect(),
            groups: vec![group(1), group(2), group(3)],
        }),
    )
}

fn other_readings() -> Section {
    Section::new(
        "other",
        "Other Readings",
        SectionBody::Fields(FieldsSection {
            columns: 4,
            layout: FieldLayout::Flat {
                fields: vec![
                    Field::new("other.seaWaterTemp", "Sea Water Temp (°C)", InputKind::Number)
                        .step(0.1),
                    Field::new("other.dayTankTemp", "Day Tank Temp (°C)", InputKind::Number)
                        .step(0.1),
                ],
            },
        }),
    )
}

fn remarks() -> Section {
    Section::new(
        "remarks",
        "Remarks",
        SectionBody::Textarea(TextareaSection {
            key: "remarks".to_string(),
            rows: 8,
        }),
    )
}

fn sign_off() -> Section {
    Section::new(
        "sign-off",
        "Sign Off",
        SectionBody::Fields(FieldsSection {
            columns: 1,
            layout: FieldLayout::Flat {
                fields: vec![Field::new("signature", "Engineer Signature", InputKind::Signature)],
            },
        }),
    )
}
