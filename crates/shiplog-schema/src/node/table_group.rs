use crate::prelude::*;

///
/// TableGroupsSection
///
/// A shared ordered list of column headers (time-of-day labels) and one
/// row-labeled sub-table per physical unit.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableGroupsSection {
    pub columns: Vec<String>,
    pub groups: Vec<TableGroup>,
}

///
/// TableGroup
///
/// Input key-paths are synthesized as
/// `{key_prefix}.{normalized(row)}.{column}`.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableGroup {
    pub title: String,
    pub key_prefix: String,
    pub rows: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gen_id: Option<GenId>,
}

impl TableGroup {
    pub fn new(title: &str, key_prefix: &str, rows: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            key_prefix: key_prefix.to_string(),
            rows: rows.iter().map(ToString::to_string).collect(),
            gen_id: None,
        }
    }

    #[must_use]
    pub const fn gen_id(mut self, id: GenId) -> Self {
        self.gen_id = Some(id);
        self
    }
}
