use crate::grid::{Column, Row, Tab};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed text of the duplicate banner, independent of what the store says.
pub const DUPLICATE_BANNER: &str =
    "Duplicate rows detected. Edit the conflicting rows and save again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate rows: {message}")]
    DuplicateRows { message: String },
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl std::fmt::Display) -> Self {
        StoreError::Backend(msg.to_string())
    }
}

/// Partial update of a tab; absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
}

impl TabPatch {
    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Some(rows),
            ..Default::default()
        }
    }
}

pub trait TabStore: Send + Sync {
    fn list_tabs(&self) -> Result<Vec<Tab>, StoreError>;
    fn create_tab(&self, name: &str) -> Result<Tab, StoreError>;
    fn update_tab(&self, id: &str, patch: &TabPatch) -> Result<(), StoreError>;
    fn delete_tab(&self, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_omits_absent_fields() {
        let p = TabPatch {
            name: Some("Leads".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&p).unwrap(), json!({"name": "Leads"}));
        let p = TabPatch::rows(vec![]);
        assert_eq!(serde_json::to_value(&p).unwrap(), json!({"rows": []}));
    }

    #[test]
    fn backend_error_displays_message() {
        assert_eq!(StoreError::backend("boom").to_string(), "boom");
    }
}
