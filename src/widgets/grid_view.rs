use std::time::{Duration, Instant};

use ratatui::prelude::*;
use ratatui::widgets::{Clear, List, ListItem, ListState, Paragraph};

use crate::grid::{CellRef, Column, ColumnKind};
use crate::nav::grid::{scroll_into_view, Pos};
use crate::ui::AppState;
use crate::widgets::chrome::{contains, panel_block};

/// Width of the row-number gutter, spacing included.
pub const GUTTER_W: u16 = 6;
const MIN_COL_W: u16 = 10;
const MAX_COL_W: u16 = 24;

/// Screen geometry of the last drawn grid, used for mouse hit testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLayout {
    /// Where data rows are drawn (below the header line).
    pub body: Rect,
    /// (x, width, column index) of each visible column.
    pub cols: Vec<(u16, u16, usize)>,
    pub first_row: usize,
    pub total_rows: usize,
}

impl GridLayout {
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Pos> {
        if !contains(self.body, x, y) {
            return None;
        }
        let row = self.first_row + (y - self.body.y) as usize;
        if row >= self.total_rows {
            return None;
        }
        self.cols
            .iter()
            .find(|(cx, w, _)| x >= *cx && x < cx.saturating_add(*w))
            .map(|(_, _, c)| (row, *c))
    }

    pub fn cell_rect(&self, (r, c): Pos) -> Option<Rect> {
        if r < self.first_row {
            return None;
        }
        let dy = (r - self.first_row) as u16;
        if dy >= self.body.height {
            return None;
        }
        let (x, w, _) = self.cols.iter().find(|(_, _, i)| *i == c)?;
        Some(Rect::new(*x, self.body.y + dy, *w, 1))
    }
}

pub fn column_width(col: &Column) -> u16 {
    let name_w = Span::raw(col.name.as_str()).width() as u16;
    name_w.saturating_add(4).clamp(MIN_COL_W, MAX_COL_W)
}

/// Lay out columns from `first_col` rightwards into `avail` cells starting at
/// `x0`, one space apart. The first column is always placed, clipped if
/// needed.
pub fn layout_columns(
    x0: u16,
    avail: u16,
    widths: &[u16],
    first_col: usize,
) -> Vec<(u16, u16, usize)> {
    let mut out = Vec::new();
    let end = x0.saturating_add(avail);
    let mut x = x0;
    for (i, w) in widths.iter().enumerate().skip(first_col) {
        if x >= end {
            break;
        }
        let room = end - x;
        if *w > room && !out.is_empty() {
            break;
        }
        out.push((x, (*w).min(room), i));
        x = x.saturating_add(*w).saturating_add(1);
    }
    out
}

/// First column offset that keeps column `cursor` fully visible.
fn follow_column(first: usize, cursor: usize, avail: u16, widths: &[u16]) -> usize {
    let mut first = first.min(cursor);
    while first < cursor {
        let placed = layout_columns(0, avail, widths, first);
        if placed.iter().any(|(_, w, i)| *i == cursor && *w == widths[cursor]) {
            break;
        }
        first += 1;
    }
    first
}

/// Distinguishes single from double clicks on the same cell.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(CellRef, Instant)>,
}

impl ClickTracker {
    /// Record a click; true when it completes a double click.
    pub fn register(&mut self, cell: &CellRef, now: Instant, window: Duration) -> bool {
        let double = matches!(
            &self.last,
            Some((prev, at)) if prev == cell && now.saturating_duration_since(*at) <= window
        );
        self.last = if double {
            None
        } else {
            Some((cell.clone(), now))
        };
        double
    }
}

pub fn draw_grid(f: &mut Frame, area: Rect, state: &mut AppState) {
    let focused = state.overlay.is_none() && state.alert.is_none();
    let title = state
        .editor
        .active_tab()
        .map(|t| format!(" {} ", t.name))
        .unwrap_or_else(|| " Grid ".to_string());
    let block = panel_block(title, focused, &state.theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.editor.columns.is_empty() {
        state.layout.grid = None;
        state.layout.picker.clear();
        if state.editor.active_tab().is_some() {
            let p = Paragraph::new(" No columns yet. Ctrl+A adds one.")
                .style(state.theme.text_muted());
            f.render_widget(p, inner);
        }
        return;
    }
    if inner.height < 2 || inner.width <= GUTTER_W {
        state.layout.grid = None;
        return;
    }

    let header = Rect::new(inner.x, inner.y, inner.width, 1);
    let body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    let cols_x0 = inner.x + GUTTER_W;
    let avail = inner.width - GUTTER_W;
    let widths: Vec<u16> = state.editor.columns.iter().map(column_width).collect();
    let visible = body.height as usize;
    let total_rows = state.editor.rows.len();

    // Follow the selection only when it moved, so wheel scrolling sticks.
    let selected = state.editor.selected().cloned();
    if selected != state.followed {
        if let Some((r, c)) = selected.as_ref().and_then(|cell| state.editor.position(cell)) {
            state.grid_scroll.0 = scroll_into_view(state.grid_scroll.0, r, visible);
            state.grid_scroll.1 = follow_column(state.grid_scroll.1, c, avail, &widths);
        }
        state.followed = selected;
    }
    state.grid_scroll.0 = state.grid_scroll.0.min(total_rows.saturating_sub(visible));
    state.grid_scroll.1 = state.grid_scroll.1.min(widths.len().saturating_sub(1));

    let layout = GridLayout {
        body,
        cols: layout_columns(cols_x0, avail, &widths, state.grid_scroll.1),
        first_row: state.grid_scroll.0,
        total_rows,
    };

    let ed = &state.editor;
    let theme = &state.theme;

    // Header: gutter then column names, dropdowns marked.
    f.render_widget(Paragraph::new(" #").style(theme.header_style()), header);
    for (x, w, i) in &layout.cols {
        let col = &ed.columns[*i];
        let label = match &col.kind {
            ColumnKind::Text => col.name.clone(),
            ColumnKind::Dropdown { .. } => format!("{} ▾", col.name),
        };
        f.render_widget(
            Paragraph::new(label).style(theme.header_style()),
            Rect::new(*x, header.y, *w, 1),
        );
    }

    let selected = ed.selected();
    let editing = ed.editing();
    let end = (layout.first_row + visible).min(total_rows);
    for (dy, r) in (layout.first_row..end).enumerate() {
        let row = &ed.rows[r];
        let y = body.y + dy as u16;
        let row_bg = if r % 2 == 1 {
            Style::default().bg(theme.stripe)
        } else {
            Style::default()
        };
        f.render_widget(
            Paragraph::new(format!("{:>4}", r + 1)).style(theme.text_muted().patch(row_bg)),
            Rect::new(inner.x, y, GUTTER_W, 1),
        );
        for (x, w, i) in &layout.cols {
            let col = &ed.columns[*i];
            let at = |c: &CellRef| c.row_id == row.id && c.column_id == col.id;
            let is_sel = selected.is_some_and(at);
            let is_edit = editing.is_some_and(at);
            let value = row.value(&col.id);
            let (text, style) = if is_edit {
                let text = match &col.kind {
                    ColumnKind::Text => format!("{value}▏"),
                    ColumnKind::Dropdown { .. } => format!("{value} ▾"),
                };
                (text, theme.text_editing_bold())
            } else if is_sel {
                (value.to_string(), theme.cell_cursor_style())
            } else {
                (value.to_string(), Style::default().fg(theme.fg).patch(row_bg))
            };
            f.render_widget(Paragraph::new(text).style(style), Rect::new(*x, y, *w, 1));
        }
    }

    // Dropdown picker under the cell being edited.
    let mut picker: Vec<(Rect, String)> = Vec::new();
    if let Some(cell) = editing {
        let col = ed.column(&cell.column_id).filter(|c| c.is_dropdown());
        let anchor = ed.position(cell).and_then(|pos| layout.cell_rect(pos));
        if let (Some(col), Some(anchor)) = (col, anchor) {
            let choices = col.choices();
            let label_w = choices
                .iter()
                .map(|c| Span::raw(c.as_str()).width() as u16)
                .max()
                .unwrap_or(0);
            let screen = f.area();
            let w = anchor.width.max(label_w + 4).min(screen.width);
            let h = (choices.len() as u16 + 2).min(screen.height);
            let below = anchor.y + 1;
            let y = if below + h <= screen.y + screen.height {
                below
            } else {
                anchor.y.saturating_sub(h)
            };
            let x = anchor.x.min((screen.x + screen.width).saturating_sub(w));
            let rect = Rect::new(x, y, w, h);
            let current = ed.mode.buffer().unwrap_or("");
            let items: Vec<ListItem> = choices
                .iter()
                .map(|c| {
                    if c.is_empty() {
                        ListItem::new(Span::styled(" (empty)", theme.text_muted()))
                    } else {
                        ListItem::new(format!(" {c}"))
                    }
                })
                .collect();
            let mut list_state = ListState::default();
            list_state.select(choices.iter().position(|c| c == current));
            f.render_widget(Clear, rect);
            f.render_stateful_widget(
                List::new(items)
                    .block(panel_block(" Choose ", true, theme))
                    .highlight_style(theme.cell_cursor_style()),
                rect,
                &mut list_state,
            );
            let inner_h = h.saturating_sub(2) as usize;
            for (i, c) in choices.into_iter().take(inner_h).enumerate() {
                picker.push((Rect::new(x + 1, y + 1 + i as u16, w.saturating_sub(2), 1), c));
            }
        }
    }

    state.layout.picker = picker;
    state.layout.grid = Some(layout);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout {
            body: Rect::new(1, 3, 60, 10),
            cols: layout_columns(1 + GUTTER_W, 54, &[10, 12], 0),
            first_row: 20,
            total_rows: 1000,
        }
    }

    #[test]
    fn columns_are_spaced_and_clipped() {
        assert_eq!(
            layout_columns(7, 30, &[10, 12, 10], 0),
            vec![(7, 10, 0), (18, 12, 1)]
        );
        // A lone first column is clipped rather than dropped.
        assert_eq!(layout_columns(0, 5, &[10], 0), vec![(0, 5, 0)]);
        assert_eq!(layout_columns(0, 30, &[10, 12, 10], 1), vec![(0, 12, 1), (13, 10, 2)]);
    }

    #[test]
    fn hit_test_maps_screen_to_cell() {
        let l = layout();
        assert_eq!(l.hit_test(7, 3), Some((20, 0)));
        assert_eq!(l.hit_test(18, 5), Some((22, 1)));
        // gutter and column gap
        assert_eq!(l.hit_test(2, 3), None);
        assert_eq!(l.hit_test(17, 3), None);
        // below the body
        assert_eq!(l.hit_test(7, 13), None);
        assert_eq!(l.cell_rect((22, 1)), Some(Rect::new(18, 5, 12, 1)));
        assert_eq!(l.cell_rect((5, 1)), None);
    }

    #[test]
    fn follow_column_scrolls_right_until_visible() {
        let widths = [10, 10, 10, 10];
        assert_eq!(follow_column(0, 1, 21, &widths), 0);
        assert_eq!(follow_column(0, 3, 21, &widths), 2);
        assert_eq!(follow_column(3, 1, 21, &widths), 1);
    }

    #[test]
    fn double_click_needs_same_cell_within_window() {
        let mut t = ClickTracker::default();
        let a = CellRef::new("row_1", "col_name");
        let b = CellRef::new("row_1", "col_tier");
        let window = Duration::from_millis(400);
        let t0 = Instant::now();
        assert!(!t.register(&a, t0, window));
        assert!(t.register(&a, t0 + Duration::from_millis(200), window));
        // a third click starts over
        assert!(!t.register(&a, t0 + Duration::from_millis(300), window));
        assert!(!t.register(&b, t0 + Duration::from_millis(350), window));
        assert!(!t.register(&b, t0 + Duration::from_millis(900), window));
    }
}
