use crate::grid::model::new_id;
use crate::grid::{Column, ColumnKind, DropdownOption, Row, Tab};
use crate::services::store::{StoreError, TabPatch, TabStore};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

/// Process-local `TabStore`. Rows that repeat the same non-blank values over
/// every column of the tab are rejected as duplicates.
#[derive(Debug, Default)]
pub struct MemoryTabStore {
    tabs: Mutex<Vec<Tab>>,
}

impl MemoryTabStore {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            tabs: Mutex::new(tabs),
        }
    }

    /// Seed from a YAML (or JSON) list of tabs.
    pub fn from_seed_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("reading seed {path:?}"))?;
        let tabs: Vec<Tab> =
            serde_yaml::from_str(&s).with_context(|| format!("parsing seed {path:?}"))?;
        Ok(Self::new(tabs))
    }

    pub fn demo() -> Self {
        let tier_options = vec![
            DropdownOption {
                id: "o1".into(),
                label: "Gold".into(),
            },
            DropdownOption {
                id: "o2".into(),
                label: "Silver".into(),
            },
        ];
        let mut row = Row {
            id: "row_1".into(),
            ..Default::default()
        };
        row.set("col_name", "Acme");
        row.set("col_tier", "Gold");
        Self::new(vec![Tab {
            id: "tab_customers".into(),
            name: "顧客".into(),
            columns: vec![
                Column {
                    id: "col_name".into(),
                    name: "Name".into(),
                    kind: ColumnKind::Text,
                    order: 0,
                },
                Column {
                    id: "col_tier".into(),
                    name: "Tier".into(),
                    kind: ColumnKind::Dropdown {
                        options: tier_options,
                    },
                    order: 1,
                },
            ],
            rows: vec![row],
        }])
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Tab>>, StoreError> {
        self.tabs
            .lock()
            .map_err(|_| StoreError::backend("store lock poisoned"))
    }
}

fn find_duplicate(rows: &[Row], columns: &[Column]) -> Option<usize> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    for (i, r) in rows.iter().enumerate() {
        if r.is_blank(columns) {
            continue;
        }
        let key: Vec<String> = columns
            .iter()
            .map(|c| r.value(&c.id).trim().to_string())
            .collect();
        if !seen.insert(key) {
            return Some(i);
        }
    }
    None
}

impl TabStore for MemoryTabStore {
    fn list_tabs(&self) -> Result<Vec<Tab>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn create_tab(&self, name: &str) -> Result<Tab, StoreError> {
        let tab = Tab {
            id: new_id("tab"),
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        };
        self.lock()?.push(tab.clone());
        Ok(tab)
    }

    fn update_tab(&self, id: &str, patch: &TabPatch) -> Result<(), StoreError> {
        let mut tabs = self.lock()?;
        let tab = tabs
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::Backend(format!("tab not found: {id}")))?;
        let columns = patch.columns.as_ref().unwrap_or(&tab.columns);
        if let Some(rows) = &patch.rows {
            if let Some(i) = find_duplicate(rows, columns) {
                return Err(StoreError::DuplicateRows {
                    message: format!("row {} duplicates an earlier row", i + 1),
                });
            }
        }
        if let Some(name) = &patch.name {
            tab.name = name.clone();
        }
        if let Some(columns) = &patch.columns {
            tab.columns = columns.clone();
        }
        if let Some(rows) = &patch.rows {
            tab.rows = rows.clone();
        }
        Ok(())
    }

    fn delete_tab(&self, id: &str) -> Result<(), StoreError> {
        let mut tabs = self.lock()?;
        let before = tabs.len();
        tabs.retain(|t| t.id != id);
        if tabs.len() == before {
            return Err(StoreError::Backend(format!("tab not found: {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str, tier: &str) -> Row {
        let mut r = Row {
            id: id.into(),
            ..Default::default()
        };
        r.set("col_name", name);
        r.set("col_tier", tier);
        r
    }

    #[test]
    fn rejects_duplicate_rows() {
        let store = MemoryTabStore::demo();
        let patch = TabPatch::rows(vec![
            row("a", "Acme", "Gold"),
            row("b", " Acme ", "Gold"),
        ]);
        let err = store.update_tab("tab_customers", &patch).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateRows { .. }));
        // Rejected update leaves stored rows alone.
        let tabs = store.list_tabs().unwrap();
        assert_eq!(tabs[0].rows.len(), 1);
        assert_eq!(tabs[0].rows[0].value("col_name"), "Acme");
    }

    #[test]
    fn distinct_rows_are_stored() {
        let store = MemoryTabStore::demo();
        let patch = TabPatch::rows(vec![row("a", "Acme", "Gold"), row("b", "Acme", "Silver")]);
        store.update_tab("tab_customers", &patch).unwrap();
        assert_eq!(store.list_tabs().unwrap()[0].rows.len(), 2);
    }

    #[test]
    fn create_and_delete_tab() {
        let store = MemoryTabStore::default();
        let t = store.create_tab("Leads").unwrap();
        assert_eq!(store.list_tabs().unwrap().len(), 1);
        store.delete_tab(&t.id).unwrap();
        assert!(store.list_tabs().unwrap().is_empty());
        assert!(store.delete_tab(&t.id).is_err());
    }

    #[test]
    fn seed_file_parses_yaml() {
        let dir = std::env::temp_dir().join(format!("upmo-seed-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let p = dir.join("seed.yaml");
        std::fs::write(
            &p,
            "- id: t1\n  name: Deals\n  columns:\n    - {id: c1, name: Stage, type: text, order: 0}\n  rows:\n    - {id: r1, c1: Won}\n",
        )
        .unwrap();
        let store = MemoryTabStore::from_seed_file(&p).unwrap();
        let tabs = store.list_tabs().unwrap();
        assert_eq!(tabs[0].name, "Deals");
        assert_eq!(tabs[0].rows[0].value("c1"), "Won");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
