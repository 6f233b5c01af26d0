use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, ToastLevel};

const SPINNER: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

pub fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let mut spans: Vec<Span> = Vec::new();
    if let Some(msg) = &state.status_text {
        let spinner = SPINNER[state.tick as usize % SPINNER.len()];
        spans.push(Span::raw(format!(" {spinner} {msg}")));
    }
    if let Some(t) = &state.toast {
        if !spans.is_empty() {
            spans.push(Span::raw("  |  "));
        }
        let color = theme.toast_color(t.level);
        let tag = match t.level {
            ToastLevel::Success => "[OK]",
            ToastLevel::Error => "[ERROR]",
            ToastLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!(" {tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(t.text.clone(), Style::default().fg(color)));
    }
    let editor = &state.editor;
    if let Some(cell) = editor.selected() {
        if let Some((r, c)) = editor.position(cell) {
            let name = editor.columns.get(c).map(|c| c.name.as_str()).unwrap_or("");
            if !spans.is_empty() {
                spans.push(Span::raw("  |  "));
            }
            spans.push(Span::styled(
                format!("row {} · {name}", r + 1),
                Style::default().fg(theme.accent),
            ));
            if editor.editing().is_some() {
                spans.push(Span::raw("  |  editing"));
            }
        }
    }
    let p = Paragraph::new(Line::from(spans)).style(Style::default().fg(theme.fg));
    f.render_widget(p, area);
}

pub fn draw_help(f: &mut Frame, area: Rect, state: &AppState) {
    let text = if state.editor.editing().is_some() {
        " type to edit  ↑/↓ choose option  Enter next row  Esc/Tab done"
    } else {
        " ←↑↓→/Tab move  Enter/F2 edit  Del clear  ^S save  Alt+←/→ tab  ^N new  ^R rename  ^W del tab  ^A/^X column  ^D row  F12 debug  ^Q quit"
    };
    f.render_widget(Paragraph::new(text).style(state.theme.text_muted()), area);
}
