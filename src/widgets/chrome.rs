use crate::theme::Theme;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders};

pub fn panel_block<'a>(
    title: impl Into<ratatui::text::Line<'a>>,
    focused: bool,
    theme: &Theme,
) -> Block<'a> {
    let b = Block::default().borders(Borders::ALL).title(title);
    if focused {
        b.border_style(theme.border_focused())
    } else {
        b.border_style(theme.border_unfocused())
    }
}

/// Rect of `percent_x` x `percent_y` centered in `r`, at least `min_h` tall.
pub fn centered_rect(percent_x: u16, percent_y: u16, min_h: u16, r: Rect) -> Rect {
    let w = r.width.saturating_mul(percent_x) / 100;
    let h = (r.height.saturating_mul(percent_y) / 100)
        .max(min_h)
        .min(r.height);
    Rect {
        x: r.x + (r.width.saturating_sub(w)) / 2,
        y: r.y + (r.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_respects_min_height() {
        let r = centered_rect(50, 10, 5, Rect::new(0, 0, 100, 20));
        assert_eq!(r, Rect::new(25, 7, 50, 5));
        assert!(contains(r, 25, 7));
        assert!(!contains(r, 75, 7));
    }
}
