//! Schema-driven form renderer.
//!
//! Interprets the document plus the current generator selection into a
//! [`Surface`], and refreshes that surface selectively when the selection
//! changes: only selection-dependent sections are rebuilt, and within them
//! the gen-matrix and gen-tagged blocks are intentionally reset while
//! untagged blocks keep their entered values.
//!
//! Rendering is total: a validated document always renders, and any
//! synthesized path that fails to parse is skipped rather than raised.

mod surface;


pub use surface::{Block, ControlView, Input, RenderedSection, Surface};

use crate::{obs, selection::Selection, value::Value};
use shiplog_schema::{
    naming::{field_name_for, normalize_label},
    node::*,
    path::KeyPath,
    types::InputKind,
};

/// Prompt shown by a gen-matrix with no active generators.
pub const EMPTY_MATRIX_PROMPT: &str = "Select running generators to record panel readings";

/// Render the whole document against the current selection.
#[must_use]
pub fn render(doc: &Document, selection: &Selection) -> Surface {
    Surface {
        sections: doc
            .sections
            .iter()
            .map(|section| render_section(section, selection))
            .collect(),
    }
}

/// Rebuild only the sections whose shape depends on the selection,
/// preserving values entered in their untagged blocks. Everything else is
/// left untouched.
pub fn apply_selection_change(surface: &mut Surface, doc: &Document, selection: &Selection) {
    for (index, section) in doc.sections.iter().enumerate() {
        if !depends_on_selection(section) {
            continue;
        }
        let Some(slot) = surface.sections.get_mut(index) else {
            continue;
        };

        let mut preserved: Vec<(KeyPath, Value)> = Vec::new();
        harvest_preserved(slot, &mut preserved);

        let mut rebuilt = render_section(section, selection);
        for (path, value) in preserved {
            rebuilt.for_each_input_mut(&mut |input| {
                if input.path == path {
                    input.set_value(value.clone());
                }
            });
        }

        *slot = rebuilt;
    }
}

/// True when a selection transition can change this section's shape.
#[must_use]
pub fn depends_on_selection(section: &Section) -> bool {
    match &section.body {
        SectionBody::GeneratorControl(_) | SectionBody::GenMatrix(_) => true,
        SectionBody::Fields(fields) => match &fields.layout {
            FieldLayout::Grouped { groups } => groups.iter().any(|g| g.gen_id.is_some()),
            FieldLayout::Flat { .. } => false,
        },
        SectionBody::TableGroups(tables) => tables.groups.iter().any(|g| g.gen_id.is_some()),
        SectionBody::Composite(composite) => composite.children.iter().any(depends_on_selection),
        SectionBody::Textarea(_) => false,
    }
}

// Values survive a section rebuild only outside the intentionally-reset
// parts: gen-matrix columns and gen-tagged blocks.
fn harvest_preserved(section: &RenderedSection, out: &mut Vec<(KeyPath, Value)>) {
    if section.kind != SectionKind::GenMatrix {
        for block in &section.blocks {
            if block.gen_id.is_none() {
                for input in &block.inputs {
                    if !input.is_blank() {
                        out.push((input.path.clone(), input.value().clone()));
                    }
                }
            }
        }
    }
    for child in &section.children {
        harvest_preserved(child, out);
    }
}

fn render_section(section: &Section, selection: &Selection) -> RenderedSection {
    obs::record_section_render();

    let mut rendered = RenderedSection {
        id: section.id.clone(),
        title: section.title.clone(),
        kind: section.kind(),
        blocks: Vec::new(),
        control: None,
        placeholder: None,
        children: Vec::new(),
    };

    match &section.body {
        SectionBody::Fields(fields) => render_fields(fields, selection, &mut rendered),
        SectionBody::TableGroups(tables) => render_table_groups(tables, selection, &mut rendered),
        SectionBody::Textarea(textarea) => render_textarea(textarea, &mut rendered),
        SectionBody::GeneratorControl(control) => {
            rendered.control = Some(ControlView {
                ids: control.ids.clone(),
                target: selection.target(),
                active: selection.active_sorted(),
            });
        }
        SectionBody::Composite(composite) => {
            rendered.children = composite
                .children
                .iter()
                .map(|child| render_section(child, selection))
                .collect();
        }
        SectionBody::GenMatrix(matrix) => render_gen_matrix(matrix, selection, &mut rendered),
    }

    rendered
}

fn field_input(field: &Field) -> Option<Input> {
    // Validation guarantees the parse; a hand-built document that skipped
    // validation just loses the malformed field.
    match field.key_path() {
        Ok(path) => Some(Input::new(path, field.label.clone(), field.input)),
        Err(e) => {
            log::debug!("skipping field with invalid key: {e}");
            None
        }
    }
}

fn render_fields(fields: &FieldsSection, selection: &Selection, out: &mut RenderedSection) {
    match &fields.layout {
        FieldLayout::Flat { fields } => {
            out.blocks.push(Block::untitled(
                fields.iter().filter_map(field_input).collect(),
            ));
        }
        FieldLayout::Grouped { groups } => {
            for group in groups {
                if let Some(id) = group.gen_id
                    && !selection.is_active(id)
                {
                    continue;
                }
                out.blocks.push(
                    Block::titled(
                        group.title.clone(),
                        group.fields.iter().filter_map(field_input).collect(),
                    )
                    .gen_tagged(group.gen_id),
                );
            }
        }
    }
}

fn render_table_groups(tables: &TableGroupsSection, selection: &Selection, out: &mut RenderedSection) {
    for group in &tables.groups {
        if let Some(id) = group.gen_id
            && !selection.is_active(id)
        {
            continue;
        }

        let mut inputs = Vec::with_capacity(group.rows.len() * tables.columns.len());
        for row in &group.rows {
            let suffix = normalize_label(row);
            for column in &tables.columns {
                let raw = format!("{}.{suffix}.{column}", group.key_prefix);
                match KeyPath::parse(&raw) {
                    Ok(path) => {
                        inputs.push(Input::new(path, format!("{row} @ {column}"), InputKind::Text));
                    }
                    Err(e) => log::debug!("skipping table cell with invalid path: {e}"),
                }
            }
        }

        out.blocks
            .push(Block::titled(group.title.clone(), inputs).gen_tagged(group.gen_id));
    }
}

fn render_textarea(textarea: &TextareaSection, out: &mut RenderedSection) {
    match KeyPath::parse(&textarea.key) {
        Ok(path) => {
            out.blocks.push(Block::untitled(vec![Input::new(
                path,
                out.title.clone(),
                InputKind::Text,
            )]));
        }
        Err(e) => log::debug!("skipping textarea with invalid key: {e}"),
    }
}

fn render_gen_matrix(matrix: &GenMatrixSection, selection: &Selection, out: &mut RenderedSection) {
    let active = selection.active_sorted();
    if active.is_empty() {
        out.placeholder = Some(EMPTY_MATRIX_PROMPT.to_string());
        return;
    }

    // One column block per active generator, ascending id order.
    for id in active {
        let mut inputs = Vec::with_capacity(matrix.rows.len());
        for row in &matrix.rows {
            let raw = format!("{}.{}", id.map_key(), field_name_for(row));
            match KeyPath::parse(&raw) {
                Ok(path) => inputs.push(Input::new(path, row.clone(), InputKind::Text)),
                Err(e) => log::debug!("skipping matrix cell with invalid path: {e}"),
            }
        }
        out.blocks
            .push(Block::titled(format!("Gen {id}"), inputs).gen_tagged(Some(id)));
    }
}
