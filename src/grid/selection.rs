#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row_id: String,
    pub column_id: String,
}

impl CellRef {
    pub fn new(row_id: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            column_id: column_id.into(),
        }
    }
}

/// Selection and edit state of the grid. Editing always implies selection of
/// the same cell, so there is no separate `editing` marker to drift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellMode {
    #[default]
    Idle,
    Selected(CellRef),
    Editing { cell: CellRef, buffer: String },
}

impl CellMode {
    pub fn selected(&self) -> Option<&CellRef> {
        match self {
            CellMode::Idle => None,
            CellMode::Selected(c) => Some(c),
            CellMode::Editing { cell, .. } => Some(cell),
        }
    }

    pub fn editing(&self) -> Option<&CellRef> {
        match self {
            CellMode::Editing { cell, .. } => Some(cell),
            _ => None,
        }
    }

    pub fn buffer(&self) -> Option<&str> {
        match self {
            CellMode::Editing { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, CellMode::Editing { .. })
    }

    /// Leave edit mode, keeping the cell selected.
    pub fn stop_editing(&mut self) {
        if let CellMode::Editing { cell, .. } = self {
            *self = CellMode::Selected(cell.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_implies_selection_of_same_cell() {
        let c = CellRef::new("r", "c");
        let m = CellMode::Editing {
            cell: c.clone(),
            buffer: "x".into(),
        };
        assert_eq!(m.selected(), Some(&c));
        assert_eq!(m.editing(), m.selected());
        assert_eq!(m.buffer(), Some("x"));
    }

    #[test]
    fn stop_editing_keeps_selection() {
        let c = CellRef::new("r", "c");
        let mut m = CellMode::Editing {
            cell: c.clone(),
            buffer: String::new(),
        };
        m.stop_editing();
        assert_eq!(m, CellMode::Selected(c));
        let mut idle = CellMode::Idle;
        idle.stop_editing();
        assert_eq!(idle, CellMode::Idle);
    }
}
