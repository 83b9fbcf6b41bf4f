use crate::{
    node::{GeneratorControlSection, Section, SectionBody},
    prelude::*,
    validate::{ValidateError, validate_document},
};

///
/// Document
///
/// The declarative, ordered description of the whole form. Immutable at
/// runtime; loaded once and validated fail-fast before rendering.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    #[must_use]
    pub const fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Fail-fast structural validation; see [`validate_document`].
    pub fn validate(&self) -> Result<(), ValidateError> {
        validate_document(self)
    }

    /// Look up a section by id, descending into composite children.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        fn find<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
            for section in sections {
                if section.id.as_deref() == Some(id) {
                    return Some(section);
                }
                if let SectionBody::Composite(composite) = &section.body
                    && let Some(found) = find(&composite.children, id)
                {
                    return Some(found);
                }
            }
            None
        }

        find(&self.sections, id)
    }

    /// The first generator-control section, wherever it is nested. Defines
    /// the selection universe for the whole form.
    #[must_use]
    pub fn generator_control(&self) -> Option<&GeneratorControlSection> {
        fn find(sections: &[Section]) -> Option<&GeneratorControlSection> {
            for section in sections {
                match &section.body {
                    SectionBody::GeneratorControl(control) => return Some(control),
                    SectionBody::Composite(composite) => {
                        if let Some(found) = find(&composite.children) {
                            return Some(found);
                        }
                    }
                    _ => {}
                }
            }
            None
        }

        find(&self.sections)
    }
}
