use crate::app::Effect;
use crate::grid::model::{
    ensure_row_ceiling, new_column, non_blank_rows, prune_column, DEFAULT_MAX_ROWS,
};
use crate::grid::{CellMode, CellRef, Column, ColumnDraft, Row, Tab};
use crate::nav::grid::{step, Pos};
use crate::nav::keys::GridKey;
use crate::services::loader::{Refresh, StoreRequest, WriteKind};
use crate::services::store::TabPatch;

/// Grid editor for the active tab: the persisted tabs, the working copy of
/// the active tab's rows, and the selection/edit state.
#[derive(Debug)]
pub struct GridEditor {
    pub tabs: Vec<Tab>,
    pub active: usize,
    /// Display-ordered columns of the active tab.
    pub columns: Vec<Column>,
    /// Working copy, always exactly `max_rows` long once a tab is active.
    pub rows: Vec<Row>,
    pub mode: CellMode,
    /// Duplicate-rows banner text; cleared on dismiss, successful save or
    /// tab switch.
    pub banner: Option<String>,
    pub saving: bool,
    pub max_rows: usize,
    /// Tab id to activate once the next fetch lands (after create).
    pub pending_activate: Option<String>,
}

impl Default for GridEditor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

impl GridEditor {
    pub fn new(max_rows: usize) -> Self {
        Self {
            tabs: Vec::new(),
            active: 0,
            columns: Vec::new(),
            rows: Vec::new(),
            mode: CellMode::Idle,
            banner: None,
            saving: false,
            max_rows,
            pending_activate: None,
        }
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    fn active_tab_id(&self) -> Option<String> {
        self.active_tab().map(|t| t.id.clone())
    }

    pub fn selected(&self) -> Option<&CellRef> {
        self.mode.selected()
    }

    pub fn editing(&self) -> Option<&CellRef> {
        self.mode.editing()
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn row_index(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == row_id)
    }

    pub fn col_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn position(&self, cell: &CellRef) -> Option<Pos> {
        Some((self.row_index(&cell.row_id)?, self.col_index(&cell.column_id)?))
    }

    pub fn cell_at(&self, (r, c): Pos) -> Option<CellRef> {
        let row = self.rows.get(r)?;
        let col = self.columns.get(c)?;
        Some(CellRef::new(row.id.clone(), col.id.clone()))
    }

    pub fn value(&self, cell: &CellRef) -> &str {
        self.rows
            .iter()
            .find(|r| r.id == cell.row_id)
            .map(|r| r.value(&cell.column_id))
            .unwrap_or("")
    }

    fn write_cell(&mut self, cell: &CellRef, value: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == cell.row_id) {
            row.set(&cell.column_id, value);
        }
    }

    /// Re-derive the working copy from the persisted rows of the active tab.
    fn reset_working_copy(&mut self) {
        match self.tabs.get(self.active) {
            Some(tab) => {
                self.columns = tab.sorted_columns();
                self.rows = ensure_row_ceiling(tab.rows.clone(), &self.columns, self.max_rows);
            }
            None => {
                self.columns.clear();
                self.rows.clear();
            }
        }
    }

    // ----- tab list -------------------------------------------------------

    /// Replace the persisted tabs with a fresh fetch. The previously active
    /// tab stays active when it still exists; a different tab always gets a
    /// fresh working copy.
    pub fn load_tabs(&mut self, tabs: Vec<Tab>, refresh: Refresh) {
        let prev_id = self.active_tab_id();
        let target = self.pending_activate.take().or(prev_id.clone());
        self.tabs = tabs;
        self.active = target
            .as_deref()
            .and_then(|id| self.tabs.iter().position(|t| t.id == id))
            .unwrap_or(0);
        let same_tab = prev_id.is_some() && prev_id == self.active_tab_id();
        match refresh {
            Refresh::Keep | Refresh::Restore if same_tab => {
                self.columns = self
                    .active_tab()
                    .map(|t| t.sorted_columns())
                    .unwrap_or_default();
                let mut rows = std::mem::take(&mut self.rows);
                if refresh == Refresh::Restore {
                    if let Some(tab) = self.tabs.get(self.active) {
                        restore_stored(&mut rows, tab, self.max_rows);
                    }
                }
                self.rows = ensure_row_ceiling(rows, &self.columns, self.max_rows);
            }
            _ => self.reset_working_copy(),
        }
        if !same_tab {
            self.banner = None;
        }
        self.mode.stop_editing();
        if let Some(cell) = self.mode.selected() {
            if self.position(cell).is_none() {
                self.mode = CellMode::Idle;
            }
        }
    }

    /// Activate tab `index`, discarding unsaved edits of the current one.
    pub fn switch_tab(&mut self, index: usize) {
        if index >= self.tabs.len() || index == self.active {
            return;
        }
        self.active = index;
        self.reset_working_copy();
        self.mode = CellMode::Idle;
        self.banner = None;
    }

    pub fn create_tab(&mut self, name: &str) -> Vec<Effect> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        vec![Effect::Store(StoreRequest::Create {
            name: name.to_string(),
        })]
    }

    pub fn rename_tab(&mut self, name: &str) -> Vec<Effect> {
        let name = name.trim();
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return Vec::new();
        };
        if name.is_empty() || tab.name == name {
            return Vec::new();
        }
        tab.name = name.to_string();
        vec![Effect::Store(StoreRequest::Update {
            tab_id: tab.id.clone(),
            patch: TabPatch {
                name: Some(name.to_string()),
                ..Default::default()
            },
            write: WriteKind::Structure,
        })]
    }

    pub fn delete_tab(&mut self) -> Vec<Effect> {
        match self.active_tab_id() {
            Some(tab_id) => vec![Effect::Store(StoreRequest::Delete { tab_id })],
            None => Vec::new(),
        }
    }

    // ----- structure (persisted immediately) ------------------------------

    pub fn add_column(&mut self, draft: &ColumnDraft) -> Vec<Effect> {
        let name = draft.name.trim();
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return Vec::new();
        };
        if name.is_empty() {
            return Vec::new();
        }
        let col = new_column(name, draft.kind(), tab.columns.len());
        tab.columns.push(col.clone());
        let patch = TabPatch {
            columns: Some(tab.columns.clone()),
            ..Default::default()
        };
        let tab_id = tab.id.clone();
        self.columns = tab.sorted_columns();
        for row in self.rows.iter_mut() {
            row.cells.entry(col.id.clone()).or_default();
        }
        vec![Effect::Store(StoreRequest::Update {
            tab_id,
            patch,
            write: WriteKind::Structure,
        })]
    }

    pub fn delete_column(&mut self, column_id: &str) -> Vec<Effect> {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return Vec::new();
        };
        if !tab.columns.iter().any(|c| c.id == column_id) {
            return Vec::new();
        }
        tab.columns.retain(|c| c.id != column_id);
        prune_column(&mut tab.rows, column_id);
        let patch = TabPatch {
            columns: Some(tab.columns.clone()),
            rows: Some(tab.rows.clone()),
            ..Default::default()
        };
        let tab_id = tab.id.clone();
        self.columns = tab.sorted_columns();
        prune_column(&mut self.rows, column_id);
        if self.selected().map(|c| c.column_id == column_id) == Some(true) {
            self.mode = CellMode::Idle;
        }
        vec![Effect::Store(StoreRequest::Update {
            tab_id,
            patch,
            write: WriteKind::Structure,
        })]
    }

    /// Remove a row from the working copy and, when it was persisted, from
    /// the store. A blank padding row is only removed locally.
    pub fn delete_row(&mut self, row_id: &str) -> Vec<Effect> {
        let Some(idx) = self.row_index(row_id) else {
            return Vec::new();
        };
        let reselect = self
            .selected()
            .filter(|c| c.row_id == row_id)
            .map(|c| c.column_id.clone());
        self.rows.remove(idx);
        let rows = std::mem::take(&mut self.rows);
        self.rows = ensure_row_ceiling(rows, &self.columns, self.max_rows);
        if let Some(column_id) = reselect {
            self.mode = match self.rows.get(idx.min(self.rows.len().saturating_sub(1))) {
                Some(row) => CellMode::Selected(CellRef::new(row.id.clone(), column_id)),
                None => CellMode::Idle,
            };
        }
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return Vec::new();
        };
        let before = tab.rows.len();
        tab.rows.retain(|r| r.id != row_id);
        if tab.rows.len() == before {
            return Vec::new();
        }
        vec![Effect::Store(StoreRequest::Update {
            tab_id: tab.id.clone(),
            patch: TabPatch::rows(tab.rows.clone()),
            write: WriteKind::Structure,
        })]
    }

    // ----- selection & editing --------------------------------------------

    fn begin_edit(&mut self, cell: CellRef) {
        let buffer = self.value(&cell).to_string();
        self.mode = CellMode::Editing { cell, buffer };
    }

    pub fn click_cell(&mut self, cell: CellRef) {
        let Some(col) = self.column(&cell.column_id) else {
            return;
        };
        if self.row_index(&cell.row_id).is_none() {
            return;
        }
        if col.is_dropdown() {
            if self.editing() != Some(&cell) {
                self.begin_edit(cell);
            }
        } else if self.editing() != Some(&cell) {
            // An edit of another cell is dropped; its keystrokes are
            // already in the working row.
            self.mode = CellMode::Selected(cell);
        }
    }

    pub fn double_click_cell(&mut self, cell: CellRef) {
        match self.column(&cell.column_id) {
            Some(col) if col.is_dropdown() => self.click_cell(cell),
            Some(_) if self.row_index(&cell.row_id).is_some() => {
                if self.editing() != Some(&cell) {
                    self.begin_edit(cell);
                }
            }
            _ => {}
        }
    }

    /// Focus left the edit control: only the editing marker is cleared.
    pub fn blur(&mut self) {
        self.mode.stop_editing();
    }

    pub fn handle_key(&mut self, key: GridKey) {
        if self.mode.is_editing() {
            self.key_while_editing(key);
        } else {
            self.key_while_selected(key);
        }
    }

    fn key_while_editing(&mut self, key: GridKey) {
        let CellMode::Editing { cell, buffer } = &self.mode else {
            return;
        };
        let cell = cell.clone();
        let mut buffer = buffer.clone();
        let dropdown = self
            .column(&cell.column_id)
            .filter(|c| c.is_dropdown())
            .map(|c| c.choices());
        match (key, dropdown) {
            (GridKey::Enter, _) => {
                self.mode.stop_editing();
                if let Some((r, c)) = self.position(&cell) {
                    if let Some(next) = self.cell_at((r + 1, c)) {
                        self.mode = CellMode::Selected(next);
                    }
                }
            }
            (GridKey::Escape, _) | (GridKey::Tab, _) | (GridKey::BackTab, _) => {
                self.mode.stop_editing();
            }
            (GridKey::Char(ch), None) => {
                buffer.push(ch);
                self.update_buffer(&cell, buffer);
            }
            (GridKey::Backspace, None) => {
                buffer.pop();
                self.update_buffer(&cell, buffer);
            }
            (GridKey::Up, Some(choices)) | (GridKey::Down, Some(choices)) => {
                let cur = choices.iter().position(|c| *c == buffer).unwrap_or(0);
                let next = if key == GridKey::Up {
                    cur.saturating_sub(1)
                } else {
                    (cur + 1).min(choices.len().saturating_sub(1))
                };
                if let Some(label) = choices.get(next) {
                    self.update_buffer(&cell, label.clone());
                }
            }
            _ => {}
        }
    }

    /// Mouse pick from the dropdown list: write the label and leave edit mode.
    pub fn pick_choice(&mut self, label: &str) {
        let Some(cell) = self.editing().cloned() else {
            return;
        };
        let valid = self
            .column(&cell.column_id)
            .filter(|c| c.is_dropdown())
            .map(|c| c.choices().iter().any(|l| l == label))
            .unwrap_or(false);
        if !valid {
            return;
        }
        self.write_cell(&cell, label);
        self.mode = CellMode::Selected(cell);
    }

    // The buffer is mirrored into the working row on every change.
    fn update_buffer(&mut self, cell: &CellRef, buffer: String) {
        self.write_cell(cell, &buffer);
        self.mode = CellMode::Editing {
            cell: cell.clone(),
            buffer,
        };
    }

    fn key_while_selected(&mut self, key: GridKey) {
        let Some(cell) = self.selected().cloned() else {
            // Nothing selected yet: the first navigation key lands on the
            // top-left cell.
            if matches!(
                key,
                GridKey::Up
                    | GridKey::Down
                    | GridKey::Left
                    | GridKey::Right
                    | GridKey::Tab
                    | GridKey::BackTab
            ) {
                if let Some(first) = self.cell_at((0, 0)) {
                    self.mode = CellMode::Selected(first);
                }
            }
            return;
        };
        let Some(pos) = self.position(&cell) else {
            return;
        };
        match key {
            GridKey::Enter | GridKey::F2 => self.begin_edit(cell),
            GridKey::Delete | GridKey::Backspace => self.write_cell(&cell, ""),
            _ => {
                if let Some(next) = step(key, pos, self.rows.len(), self.columns.len()) {
                    if let Some(next) = self.cell_at(next) {
                        self.mode = CellMode::Selected(next);
                    }
                }
            }
        }
    }

    /// Write `text` into the selected cell as a local, unsaved change.
    pub fn paste(&mut self, text: &str) {
        if self.mode.is_editing() {
            return;
        }
        let Some(cell) = self.selected().cloned() else {
            return;
        };
        let line = text.lines().next().unwrap_or("");
        self.write_cell(&cell, line);
    }

    // ----- save -------------------------------------------------------------

    /// Submit every non-blank working row of the active tab.
    pub fn save(&mut self) -> Vec<Effect> {
        if self.saving {
            return Vec::new();
        }
        let Some(tab_id) = self.active_tab_id() else {
            return Vec::new();
        };
        let rows = non_blank_rows(&self.rows, &self.columns);
        self.saving = true;
        vec![Effect::Store(StoreRequest::Update {
            tab_id,
            patch: TabPatch::rows(rows),
            write: WriteKind::Save,
        })]
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}

/// Merge the stored state of `tab` back into working `rows`: stored rows
/// missing locally are reinserted after their stored predecessor, and
/// stored values of columns a row has no key for are filled in. Local values
/// win everywhere else. Keys of columns the tab no longer has are dropped.
fn restore_stored(rows: &mut Vec<Row>, tab: &Tab, max_rows: usize) {
    let mut prev: Option<&str> = None;
    for stored in &tab.rows {
        match rows.iter_mut().find(|r| r.id == stored.id) {
            Some(row) => {
                for (key, value) in &stored.cells {
                    row.cells.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
            None => {
                let at = prev
                    .and_then(|id| rows.iter().position(|r| r.id == id))
                    .map_or(0, |i| i + 1);
                rows.insert(at, stored.clone());
            }
        }
        prev = Some(stored.id.as_str());
    }
    for row in rows.iter_mut() {
        row.cells.retain(|key, _| tab.columns.iter().any(|c| &c.id == key));
    }
    // Make room by dropping trailing blank padding, never stored or edited rows.
    while rows.len() > max_rows {
        match rows.iter().rposition(|r| {
            r.is_blank(&tab.columns) && !tab.rows.iter().any(|s| s.id == r.id)
        }) {
            Some(i) => {
                rows.remove(i);
            }
            None => break,
        }
    }
}
