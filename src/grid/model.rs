use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MAX_ROWS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Dropdown {
        #[serde(default)]
        options: Vec<DropdownOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
    #[serde(default)]
    pub order: usize,
}

impl Column {
    pub fn is_dropdown(&self) -> bool {
        matches!(self.kind, ColumnKind::Dropdown { .. })
    }

    /// Labels offered by a dropdown cell, led by the empty choice.
    pub fn choices(&self) -> Vec<String> {
        match &self.kind {
            ColumnKind::Text => Vec::new(),
            ColumnKind::Dropdown { options } => std::iter::once(String::new())
                .chain(options.iter().map(|o| o.label.clone()))
                .collect(),
        }
    }
}

/// One record; cells are keyed by column id and serialized next to `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(flatten)]
    pub cells: BTreeMap<String, String>,
}

impl Row {
    pub fn empty(columns: &[Column]) -> Self {
        Self {
            id: new_id("row"),
            cells: columns
                .iter()
                .map(|c| (c.id.clone(), String::new()))
                .collect(),
        }
    }

    pub fn value(&self, column_id: &str) -> &str {
        self.cells.get(column_id).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column_id: &str, value: impl Into<String>) {
        self.cells.insert(column_id.to_string(), value.into());
    }

    pub fn is_blank(&self, columns: &[Column]) -> bool {
        columns.iter().all(|c| self.value(&c.id).trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Tab {
    /// Columns in display order. Ties keep their stored position.
    pub fn sorted_columns(&self) -> Vec<Column> {
        let mut cols = self.columns.clone();
        cols.sort_by_key(|c| c.order);
        cols
    }
}

pub fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

pub fn new_column(name: &str, kind: ColumnKind, existing: usize) -> Column {
    Column {
        id: new_id("col"),
        name: name.trim().to_string(),
        kind,
        order: existing,
    }
}

/// Staging area for a column that is being defined. Dropdown options are
/// added and removed here before the column exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDraft {
    pub name: String,
    pub dropdown: bool,
    pub options: Vec<DropdownOption>,
}

impl ColumnDraft {
    pub fn add_option(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        self.options.push(DropdownOption {
            id: new_id("opt"),
            label: label.to_string(),
        });
        true
    }

    pub fn remove_option(&mut self, option_id: &str) {
        self.options.retain(|o| o.id != option_id);
    }

    pub fn kind(&self) -> ColumnKind {
        if self.dropdown {
            ColumnKind::Dropdown {
                options: self.options.clone(),
            }
        } else {
            ColumnKind::Text
        }
    }
}

/// Pad `rows` with empty rows up to `max`, or truncate past it. Every kept
/// row ends up with a key for each column.
pub fn ensure_row_ceiling(mut rows: Vec<Row>, columns: &[Column], max: usize) -> Vec<Row> {
    rows.truncate(max);
    for row in rows.iter_mut() {
        for c in columns {
            row.cells.entry(c.id.clone()).or_default();
        }
    }
    while rows.len() < max {
        rows.push(Row::empty(columns));
    }
    rows
}

/// Strip `column_id` from every row.
pub fn prune_column(rows: &mut [Row], column_id: &str) {
    for row in rows.iter_mut() {
        row.cells.remove(column_id);
    }
}

pub fn non_blank_rows(rows: &[Row], columns: &[Column]) -> Vec<Row> {
    rows.iter()
        .filter(|r| !r.is_blank(columns))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(id: &str) -> Column {
        Column {
            id: id.into(),
            name: id.to_uppercase(),
            kind: ColumnKind::Text,
            order: 0,
        }
    }

    #[test]
    fn ceiling_pads_and_fills_missing_keys() {
        let cols = vec![text("a"), text("b")];
        let mut r = Row {
            id: "row_1".into(),
            ..Default::default()
        };
        r.set("a", "x");
        let rows = ensure_row_ceiling(vec![r], &cols, DEFAULT_MAX_ROWS);
        assert_eq!(rows.len(), 1000);
        assert_eq!(rows[0].id, "row_1");
        assert_eq!(rows[0].value("a"), "x");
        assert!(rows.iter().all(|r| r.cells.contains_key("a") && r.cells.contains_key("b")));
        let ids: std::collections::HashSet<_> = rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ceiling_truncates() {
        let cols = vec![text("a")];
        let rows: Vec<Row> = (0..12).map(|_| Row::empty(&cols)).collect();
        assert_eq!(ensure_row_ceiling(rows, &cols, 10).len(), 10);
        assert!(ensure_row_ceiling(Vec::new(), &cols, 0).is_empty());
    }

    #[test]
    fn blank_rows_ignore_whitespace_and_stale_keys() {
        let cols = vec![text("a")];
        let mut r = Row::empty(&cols);
        r.set("a", "   ");
        r.set("gone", "stale");
        assert!(r.is_blank(&cols));
        r.set("a", " v ");
        assert!(!r.is_blank(&cols));
    }

    #[test]
    fn column_json_uses_type_tag() {
        let v = json!({
            "id": "col_tier",
            "name": "Tier",
            "type": "dropdown",
            "options": [{"id": "o1", "label": "Gold"}],
            "order": 1
        });
        let c: Column = serde_json::from_value(v).unwrap();
        assert!(c.is_dropdown());
        assert_eq!(c.choices(), vec!["".to_string(), "Gold".to_string()]);
        let back = serde_json::to_value(&c).unwrap();
        assert_eq!(back["type"], "dropdown");

        let t: Column =
            serde_json::from_value(json!({"id": "c", "name": "C", "type": "text"})).unwrap();
        assert_eq!(t.kind, ColumnKind::Text);
        assert_eq!(t.order, 0);
    }

    #[test]
    fn row_json_flattens_cells() {
        let r: Row =
            serde_json::from_value(json!({"id": "row_1", "col_name": "Acme"})).unwrap();
        assert_eq!(r.value("col_name"), "Acme");
        assert_eq!(r.value("missing"), "");
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            json!({"id": "row_1", "col_name": "Acme"})
        );
    }

    #[test]
    fn draft_stages_options() {
        let mut d = ColumnDraft {
            name: "Tier".into(),
            dropdown: true,
            ..Default::default()
        };
        assert!(!d.add_option("   "));
        assert!(d.add_option(" Gold "));
        assert!(d.add_option("Silver"));
        let gold = d.options[0].id.clone();
        d.remove_option(&gold);
        match d.kind() {
            ColumnKind::Dropdown { options } => {
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].label, "Silver");
            }
            ColumnKind::Text => panic!("expected dropdown"),
        }
        d.dropdown = false;
        assert_eq!(d.kind(), ColumnKind::Text);
    }

    #[test]
    fn prune_removes_key_everywhere() {
        let cols = vec![text("a"), text("x")];
        let mut rows = ensure_row_ceiling(Vec::new(), &cols, 5);
        prune_column(&mut rows, "x");
        assert!(rows.iter().all(|r| !r.cells.contains_key("x")));
    }
}
