use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::AppState;

const CLOSE: &str = "[x]";

/// Rect of the `[x]` control at the right edge of a one-line banner.
pub fn close_rect(area: Rect) -> Rect {
    let w = (CLOSE.len() as u16).min(area.width);
    Rect::new(area.x + area.width.saturating_sub(w + 1), area.y, w, 1)
}

/// Draw the duplicate-rows banner and record where its close control is.
pub fn draw_banner(f: &mut Frame, area: Rect, state: &mut AppState) {
    let Some(text) = state.editor.banner.clone() else {
        state.layout.banner_close = None;
        return;
    };
    let style = state.theme.banner_style();
    let p = Paragraph::new(Line::from(vec![Span::styled(format!(" ⚠ {text}"), style)]))
        .style(style);
    f.render_widget(p, area);
    let close = close_rect(area);
    f.render_widget(Paragraph::new(CLOSE).style(style), close);
    state.layout.banner_close = Some(close);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_control_sits_at_right_edge() {
        let r = close_rect(Rect::new(2, 5, 40, 1));
        assert_eq!(r, Rect::new(38, 5, 3, 1));
    }
}
