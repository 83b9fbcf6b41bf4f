//! Entry serialization: surface → value tree, and the reverse population
//! pass used when loading a saved entry.
//!
//! Population is lossy by design — entry paths with no rendered input are
//! skipped and counted, never raised — which is why the form controller
//! infers the generator selection (changing the rendered shape) *before*
//! populating values.

use crate::{check::Warning, codec, obs, render::Surface, value::Value};
use shiplog_schema::{path::KeyPath, types::InputKind};
use time::OffsetDateTime;

///
/// Stamp
///
/// Date/time defaults applied to blank date and time inputs at serialization
/// time, so a submitted entry always carries a usable header even when the
/// operator left those fields untouched.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stamp {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
}

impl Stamp {
    #[must_use]
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            date: format!(
                "{:04}-{:02}-{:02}",
                now.year(),
                u8::from(now.month()),
                now.day()
            ),
            time: format!("{:02}:{:02}", now.hour(), now.minute()),
        }
    }
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    let now = OffsetDateTime::now_utc();
    now.unix_timestamp() * 1_000 + i64::from(now.millisecond())
}

/// UTC timestamp in `YYYY-MM-DDTHH:MM:SSZ` form.
#[must_use]
pub fn now_iso() -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Serialize every rendered input into a nested entry tree. Blank date and
/// time inputs serialize as the stamp's defaults; everything else serializes
/// as entered, blanks included.
#[must_use]
pub fn serialize(surface: &Surface, stamp: &Stamp) -> Value {
    let mut root = Value::map();

    for input in surface.inputs() {
        let value = if input.is_blank() {
            match input.kind {
                InputKind::Date => Value::from(stamp.date.as_str()),
                InputKind::Time => Value::from(stamp.time.as_str()),
                _ => input.value().clone(),
            }
        } else {
            input.value().clone()
        };

        codec::write(&mut root, &input.path, value);
    }

    root
}

///
/// PopulateStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PopulateStats {
    /// Leaves applied to a rendered input.
    pub applied: u64,
    /// Leaves with no matching rendered input.
    pub missing: u64,
}

/// Copy every scalar leaf of `entry` onto the matching rendered input.
/// Leaves without a matching input are counted and skipped; inputs without a
/// matching leaf keep their current value. The `meta` namespace is submit
/// annotation, not form data, and is never applied.
pub fn populate(surface: &mut Surface, entry: &Value) -> PopulateStats {
    let mut leaves = Vec::new();
    collect_leaves(entry, &mut Vec::new(), &mut leaves);

    let mut stats = PopulateStats::default();
    for (path, value) in leaves {
        if surface.set_value(&path, value) {
            stats.applied += 1;
        } else {
            stats.missing += 1;
        }
    }

    if stats.missing > 0 {
        log::debug!("populate skipped {} unmatched entry leaves", stats.missing);
        obs::record_populate_misses(stats.missing);
    }

    stats
}

fn collect_leaves(node: &Value, at: &mut Vec<String>, out: &mut Vec<(KeyPath, Value)>) {
    match node {
        Value::Map(map) => {
            for (key, child) in map {
                if at.is_empty() && key == "meta" {
                    continue;
                }
                at.push(key.clone());
                collect_leaves(child, at, out);
                at.pop();
            }
        }
        scalar => {
            // Keys came from parsed paths or entry maps; a whole-map entry
            // with no segments never reaches here.
            if let Ok(path) = KeyPath::from_segments(at.clone()) {
                out.push((path, scalar.clone()));
            }
        }
    }
}

/// Stamp submit-time annotation onto an entry: `meta.ts`, `meta.iso`, and
/// one `meta.warnings.{i}` record per out-of-range warning.
pub fn annotate_submit(entry: &mut Value, warnings: &[Warning], ts_millis: i64, iso: &str) {
    write_at(entry, "meta.ts", Value::Number(ts_millis as f64));
    write_at(entry, "meta.iso", Value::from(iso));

    for (i, warning) in warnings.iter().enumerate() {
        write_at(
            entry,
            &format!("meta.warnings.{i}.label"),
            Value::from(warning.label.as_str()),
        );
        write_at(
            entry,
            &format!("meta.warnings.{i}.value"),
            Value::Number(warning.value),
        );
        write_at(
            entry,
            &format!("meta.warnings.{i}.guidance"),
            Value::from(warning.guidance.as_str()),
        );
    }
}

fn write_at(entry: &mut Value, raw: &str, value: Value) {
    // All callers pass static well-formed paths.
    if let Ok(path) = KeyPath::parse(raw) {
        codec::write(entry, &path, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, selection::Selection};
    use shiplog_schema::node::{
        Document, Field, FieldLayout, FieldsSection, Section, SectionBody,
    };

    fn doc() -> Document {
        Document {
            sections: vec![Section::new(
                "header",
                "Header",
                SectionBody::Fields(FieldsSection {
                    columns: 4,
                    layout: FieldLayout::Flat {
                        fields: vec![
                            Field::new("header.date", "Date", InputKind::Date),
                            Field::new("header.time", "Time", InputKind::Time),
                            Field::new("port.oilPressure", "Oil Pressure", InputKind::Number),
                            Field::new("signoff.confirmed", "Confirmed", InputKind::Checkbox),
                        ],
                    },
                }),
            )],
        }
    }

    fn stamp() -> Stamp {
        Stamp {
            date: "2026-08-27".to_string(),
            time: "14:30".to_string(),
        }
    }

    fn p(raw: &str) -> KeyPath {
        KeyPath::parse(raw).unwrap()
    }

    #[test]
    fn blank_date_and_time_default_to_the_stamp() {
        let surface = render::render(&doc(), &Selection::new(vec![]));
        let entry = serialize(&surface, &stamp());

        assert_eq!(codec::read_at(&entry, "header.date"), Some(&Value::from("2026-08-27")));
        assert_eq!(codec::read_at(&entry, "header.time"), Some(&Value::from("14:30")));
    }

    #[test]
    fn entered_values_serialize_verbatim() {
        let mut surface = render::render(&doc(), &Selection::new(vec![]));
        surface.set_value(&p("header.date"), Value::from("2026-01-01"));
        surface.set_value(&p("port.oilPressure"), Value::from("350"));
        surface.set_value(&p("signoff.confirmed"), Value::Bool(true));

        let entry = serialize(&surface, &stamp());
        assert_eq!(codec::read_at(&entry, "header.date"), Some(&Value::from("2026-01-01")));
        assert_eq!(codec::read_at(&entry, "port.oilPressure"), Some(&Value::from("350")));
        assert_eq!(codec::read_at(&entry, "signoff.confirmed"), Some(&Value::Bool(true)));
    }

    #[test]
    fn populate_applies_matches_and_counts_misses() {
        let mut surface = render::render(&doc(), &Selection::new(vec![]));
        let entry: Value = serde_json::from_str(
            r#"{"port":{"oilPressure":"410","unknown":"x"},"stbd":{"rpm":"900"}}"#,
        )
        .unwrap();

        let stats = populate(&mut surface, &entry);
        assert_eq!(stats.applied, 1);
        assert_eq!(stats.missing, 2);
        assert_eq!(
            surface.input(&p("port.oilPressure")).unwrap().value(),
            &Value::from("410")
        );
    }

    #[test]
    fn populate_ignores_the_meta_namespace() {
        let mut surface = render::render(&doc(), &Selection::new(vec![]));
        let entry: Value =
            serde_json::from_str(r#"{"meta":{"ts":123.0,"iso":"2026-01-01T00:00:00Z"}}"#).unwrap();

        let stats = populate(&mut surface, &entry);
        assert_eq!(stats, PopulateStats::default());
    }

    #[test]
    fn annotation_writes_index_keyed_warning_records() {
        let mut entry = Value::map();
        let warnings = vec![Warning {
            label: "PORT Oil Pressure".to_string(),
            value: 250.0,
            guidance: "Expected 310–420 kPa at cruise.".to_string(),
        }];

        annotate_submit(&mut entry, &warnings, 1_756_300_000_000, "2026-08-27T14:30:00Z");

        assert_eq!(
            codec::read_at(&entry, "meta.warnings.0.label"),
            Some(&Value::from("PORT Oil Pressure"))
        );
        assert_eq!(
            codec::read_at(&entry, "meta.warnings.0.value"),
            Some(&Value::Number(250.0))
        );
        assert_eq!(
            codec::read_at(&entry, "meta.iso"),
            Some(&Value::from("2026-08-27T14:30:00Z"))
        );
    }

    #[test]
    fn serialize_then_populate_round_trips() {
        let mut surface = render::render(&doc(), &Selection::new(vec![]));
        surface.set_value(&p("port.oilPressure"), Value::from("350"));
        surface.set_value(&p("signoff.confirmed"), Value::Bool(true));

        let entry = serialize(&surface, &stamp());

        let mut fresh = render::render(&doc(), &Selection::new(vec![]));
        let stats = populate(&mut fresh, &entry);

        assert_eq!(stats.missing, 0);
        assert_eq!(serialize(&fresh, &stamp()), entry);
    }
}
