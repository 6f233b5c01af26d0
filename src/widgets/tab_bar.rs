use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::AppState;

const DIVIDER: &str = " │ ";

/// Horizontal spans (start x, end x, tab index) of the rendered titles.
pub fn tab_spans(names: &[&str], x0: u16) -> Vec<(u16, u16, usize)> {
    let mut out = Vec::new();
    let mut x = x0;
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            x = x.saturating_add(Span::raw(DIVIDER).width() as u16);
        }
        // Display width, so wide (CJK) names hit-test correctly.
        let w = Span::raw(format!(" {name} ")).width() as u16;
        out.push((x, x.saturating_add(w), i));
        x = x.saturating_add(w);
    }
    out
}

pub fn draw_tab_bar(f: &mut Frame, area: Rect, state: &mut AppState) {
    let theme = &state.theme;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.frame));
    let inner = block.inner(area);

    let names: Vec<&str> = state.editor.tabs.iter().map(|t| t.name.as_str()).collect();
    let mut spans: Vec<Span> = Vec::new();
    if names.is_empty() {
        let msg = if state.tabs_loaded {
            " No tabs. Ctrl+N creates one."
        } else {
            " Loading tabs..."
        };
        spans.push(Span::styled(msg, theme.text_muted()));
    }
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(DIVIDER, Style::default().fg(theme.frame)));
        }
        let style = if i == state.editor.active {
            Style::default()
                .fg(theme.selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!(" {name} "), style));
    }
    state.layout.tabs = tab_spans(&names, inner.x)
        .into_iter()
        .map(|(a, b, i)| (Rect::new(a, inner.y, b.saturating_sub(a), 1), i))
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_account_for_divider_and_padding() {
        let spans = tab_spans(&["顧客", "Leads"], 1);
        assert_eq!(spans[0], (1, 7, 0));
        assert_eq!(spans[1], (10, 17, 1));
    }
}
