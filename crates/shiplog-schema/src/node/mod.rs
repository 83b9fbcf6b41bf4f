mod document;
mod field;
mod section;
mod table_group;

pub use document::Document;
pub use field::{Field, FieldLayout, FieldsSection, Group};
pub use section::{
    CompositeSection, GenMatrixSection, GeneratorControlSection, Section, SectionBody, SectionKind,
    TextareaSection,
};
pub use table_group::{TableGroup, TableGroupsSection};
