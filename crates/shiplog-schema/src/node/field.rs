use crate::{
    path::{KeyPath, PathError},
    prelude::*,
};

///
/// FieldsSection
///
/// Either a flat ordered list of fields or an ordered list of titled groups,
/// plus a column-count hint for layout.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldsSection {
    #[serde(default = "default_columns")]
    pub columns: u8,

    #[serde(flatten)]
    pub layout: FieldLayout,
}

const fn default_columns() -> u8 {
    4
}

///
/// FieldLayout
///

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldLayout {
    Grouped { groups: Vec<Group> },
    Flat { fields: Vec<Field> },
}

impl FieldsSection {
    /// Iterate every field regardless of grouping.
    pub fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        match &self.layout {
            FieldLayout::Flat { fields } => Box::new(fields.iter()),
            FieldLayout::Grouped { groups } => {
                Box::new(groups.iter().flat_map(|g| g.fields.iter()))
            }
        }
    }
}

///
/// Group
///
/// A titled sub-block of fields. A group carrying a `gen_id` is only
/// rendered while that generator is in the active set.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gen_id: Option<GenId>,

    pub fields: Vec<Field>,
}

///
/// Field
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub label: String,

    #[serde(default)]
    pub input: InputKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<u8>,
}

impl Field {
    pub fn new(key: &str, label: &str, input: InputKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            input,
            step: None,
            required: false,
            span: None,
        }
    }

    #[must_use]
    pub const fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn span(mut self, span: u8) -> Self {
        self.span = Some(span);
        self
    }

    /// Parse the field's key into a key-path. Document validation guarantees
    /// this succeeds for any field in a validated schema.
    pub fn key_path(&self) -> Result<KeyPath, PathError> {
        KeyPath::parse(&self.key)
    }
}
