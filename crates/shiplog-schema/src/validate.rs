use crate::{naming::normalize_label, node::*, path::KeyPath, prelude::*};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ValidateError
///

#[derive(Debug, ThisError)]
pub enum ValidateError {
    #[error("schema validation failed: {0}")]
    Invalid(ErrorTree),
}

/// Fail-fast structural validation of a whole document.
///
/// Checks:
/// - section ids unique across the document (composite children included)
/// - field keys are syntactically valid key-paths
/// - table-group and gen-matrix row labels are non-empty
/// - normalized row labels collision-free within each table group
/// - composite children restricted to renderable child kinds
/// - layout hints positive
pub fn validate_document(doc: &Document) -> Result<(), ValidateError> {
    let mut errs = ErrorTree::new();
    let mut seen_ids: BTreeMap<String, String> = BTreeMap::new();

    for (index, section) in doc.sections.iter().enumerate() {
        validate_section(section, &format!("sections[{index}]"), false, &mut seen_ids, &mut errs);
    }

    errs.result().map_err(ValidateError::Invalid)
}

fn validate_section(
    section: &Section,
    path: &str,
    nested: bool,
    seen_ids: &mut BTreeMap<String, String>,
    errs: &mut ErrorTree,
) {
    if let Some(id) = &section.id {
        if id.is_empty() {
            err!(errs, path, "section id must not be empty");
        } else if id.len() > crate::MAX_SECTION_ID_LEN {
            err!(errs, path, "section id '{id}' exceeds {} chars", crate::MAX_SECTION_ID_LEN);
        } else if let Some(prev) = seen_ids.insert(id.clone(), path.to_string()) {
            err!(errs, path, "duplicate section id '{id}' (also at {prev})");
        }
    }

    match &section.body {
        SectionBody::Fields(fields) => validate_fields(fields, path, errs),
        SectionBody::TableGroups(tables) => validate_table_groups(tables, path, errs),
        SectionBody::Textarea(textarea) => validate_key(&textarea.key, path, errs),
        SectionBody::GeneratorControl(control) => validate_control(control, path, errs),
        SectionBody::GenMatrix(matrix) => validate_rows(&matrix.rows, path, errs),
        SectionBody::Composite(composite) => {
            if nested {
                err!(errs, path, "composite sections cannot nest");
                return;
            }
            if composite.children.is_empty() {
                err!(errs, path, "composite section has no children");
            }
            for (index, child) in composite.children.iter().enumerate() {
                let child_path = format!("{path}.children[{index}]");
                match child.kind() {
                    SectionKind::Composite | SectionKind::Textarea => {
                        err!(
                            errs,
                            &child_path,
                            "'{}' is not a valid composite child kind",
                            child.kind()
                        );
                    }
                    _ => validate_section(child, &child_path, true, seen_ids, errs),
                }
            }
        }
    }
}

fn validate_fields(fields: &FieldsSection, path: &str, errs: &mut ErrorTree) {
    if fields.columns == 0 {
        err!(errs, path, "column count must be positive");
    }

    match &fields.layout {
        FieldLayout::Flat { fields } => {
            for field in fields {
                validate_key(&field.key, path, errs);
            }
        }
        FieldLayout::Grouped { groups } => {
            for (index, group) in groups.iter().enumerate() {
                if group.title.is_empty() {
                    err!(errs, format!("{path}.groups[{index}]"), "group title must not be empty");
                }
                for field in &group.fields {
                    validate_key(&field.key, &format!("{path}.groups[{index}]"), errs);
                }
            }
        }
    }
}

fn validate_table_groups(tables: &TableGroupsSection, path: &str, errs: &mut ErrorTree) {
    if tables.columns.is_empty() {
        err!(errs, path, "table-groups section has no columns");
    }
    for column in &tables.columns {
        if column.is_empty() {
            err!(errs, path, "column headers must be non-empty strings");
        }
    }

    for (index, group) in tables.groups.iter().enumerate() {
        let group_path = format!("{path}.groups[{index}]");
        if group.key_prefix.is_empty() {
            err!(errs, &group_path, "key prefix must not be empty");
        } else if KeyPath::parse(&group.key_prefix).is_err() {
            err!(errs, &group_path, "key prefix '{}' is not a valid key-path", group.key_prefix);
        }

        validate_rows(&group.rows, &group_path, errs);

        // Normalized suffixes must stay collision-free within one group or
        // two rows would write through the same key-path.
        let mut suffixes: BTreeMap<String, &str> = BTreeMap::new();
        for row in &group.rows {
            let suffix = normalize_label(row);
            if suffix.is_empty() {
                err!(errs, &group_path, "row label '{row}' normalizes to nothing");
            } else if let Some(prev) = suffixes.insert(suffix.clone(), row) {
                err!(errs, &group_path, "rows '{prev}' and '{row}' normalize to '{suffix}'");
            }
        }
    }
}

fn validate_control(control: &GeneratorControlSection, path: &str, errs: &mut ErrorTree) {
    if control.ids.is_empty() {
        err!(errs, path, "generator-control declares no generator ids");
    }
    let mut ids = control.ids.clone();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != control.ids.len() {
        err!(errs, path, "generator ids must be unique");
    }
}

fn validate_rows(rows: &[String], path: &str, errs: &mut ErrorTree) {
    if rows.is_empty() {
        err!(errs, path, "row label list is empty");
    }
    for row in rows {
        if row.is_empty() {
            err!(errs, path, "row labels must be non-empty strings");
        }
    }
}

fn validate_key(key: &str, path: &str, errs: &mut ErrorTree) {
    if let Err(e) = KeyPath::parse(key) {
        err!(errs, path, "{e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FieldLayout, FieldsSection};

    fn fields_section(id: &str, keys: &[&str]) -> Section {
        Section::new(
            id,
            "Test",
            SectionBody::Fields(FieldsSection {
                columns: 4,
                layout: FieldLayout::Flat {
                    fields: keys.iter().map(|k| Field::new(k, k, InputKind::Text)).collect(),
                },
            }),
        )
    }

    #[test]
    fn valid_document_passes() {
        let doc = Document::new(vec![fields_section("header", &["date", "port.rpm"])]);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let doc = Document::new(vec![
            fields_section("header", &["date"]),
            fields_section("header", &["time"]),
        ]);
        let ValidateError::Invalid(errs) = doc.validate().unwrap_err();
        assert!(errs.iter().any(|(_, m)| m.contains("duplicate section id")));
    }

    #[test]
    fn invalid_field_key_is_rejected() {
        let doc = Document::new(vec![fields_section("header", &["..."])]);
        assert!(doc.validate().is_err());
    }

    #[test]
    fn colliding_normalized_rows_are_rejected() {
        let section = Section::new(
            "hourly",
            "Hourly",
            SectionBody::TableGroups(TableGroupsSection {
                columns: vec!["0000".to_string()],
                groups: vec![TableGroup::new("G1", "group1", &["Oil (bar)", "Oil [bar]"])],
            }),
        );
        let doc = Document::new(vec![section]);
        let ValidateError::Invalid(errs) = doc.validate().unwrap_err();
        assert!(errs.iter().any(|(_, m)| m.contains("normalize to")));
    }

    #[test]
    fn composite_rejects_textarea_children() {
        let child = Section::anonymous(
            "Notes",
            SectionBody::Textarea(TextareaSection {
                key: "remarks".to_string(),
                rows: 4,
            }),
        );
        let doc = Document::new(vec![Section::new(
            "gens",
            "Generators",
            SectionBody::Composite(CompositeSection {
                children: vec![child],
            }),
        )]);
        let ValidateError::Invalid(errs) = doc.validate().unwrap_err();
        assert!(errs.iter().any(|(_, m)| m.contains("composite child")));
    }

    #[test]
    fn empty_generator_universe_is_rejected() {
        let doc = Document::new(vec![Section::new(
            "gen-control",
            "Generators Running",
            SectionBody::GeneratorControl(GeneratorControlSection { ids: vec![] }),
        )]);
        assert!(doc.validate().is_err());
    }
}
