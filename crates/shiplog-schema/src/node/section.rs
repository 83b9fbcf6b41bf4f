use crate::{
    node::{FieldsSection, TableGroupsSection},
    prelude::*,
};
use std::fmt;

///
/// Section
///
/// One schema-declared block of the form. `id` is optional but required for
/// sections that need targeted lookup or re-render; ids are unique within a
/// document (enforced at validation).
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    pub fn new(id: &str, title: &str, body: SectionBody) -> Self {
        Self {
            id: Some(id.to_string()),
            title: title.to_string(),
            body,
        }
    }

    #[must_use]
    pub fn anonymous(title: &str, body: SectionBody) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            body,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        self.body.kind()
    }
}

///
/// SectionBody
///

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SectionBody {
    Fields(FieldsSection),
    TableGroups(TableGroupsSection),
    Textarea(TextareaSection),
    GeneratorControl(GeneratorControlSection),
    Composite(CompositeSection),
    GenMatrix(GenMatrixSection),
}

impl SectionBody {
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        match self {
            Self::Fields(_) => SectionKind::Fields,
            Self::TableGroups(_) => SectionKind::TableGroups,
            Self::Textarea(_) => SectionKind::Textarea,
            Self::GeneratorControl(_) => SectionKind::GeneratorControl,
            Self::Composite(_) => SectionKind::Composite,
            Self::GenMatrix(_) => SectionKind::GenMatrix,
        }
    }
}

///
/// SectionKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SectionKind {
    Fields,
    TableGroups,
    Textarea,
    GeneratorControl,
    Composite,
    GenMatrix,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Fields => "fields",
            Self::TableGroups => "table-groups",
            Self::Textarea => "textarea",
            Self::GeneratorControl => "generator-control",
            Self::Composite => "composite",
            Self::GenMatrix => "gen-matrix",
        };
        write!(f, "{label}")
    }
}

///
/// TextareaSection
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextareaSection {
    pub key: String,

    #[serde(default = "default_rows")]
    pub rows: u8,
}

const fn default_rows() -> u8 {
    6
}

///
/// GeneratorControlSection
///
/// Enumerates the fixed universe of generator ids the control offers. The
/// target-count selector and per-id toggles rendered from this drive the
/// selection state machine.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorControlSection {
    pub ids: Vec<GenId>,
}

///
/// CompositeSection
///
/// Heterogeneous children rendered inside one container. Child kinds are
/// restricted at validation to generator-control, fields, table-groups, and
/// gen-matrix.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompositeSection {
    pub children: Vec<Section>,
}

///
/// GenMatrixSection
///
/// Row labels only; columns are derived at render time from the active
/// generator set, in ascending id order.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenMatrixSection {
    pub rows: Vec<String>,
}
