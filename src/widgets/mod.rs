pub mod banner;
pub mod chrome;
pub mod column_dialog;
pub mod dialog;
pub mod grid_view;
pub mod prompt;
pub mod status_bar;
pub mod tab_bar;

use crate::app::AppMsg;
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// What a modal overlay wants after a key press.
pub enum Outcome {
    Pending,
    Close,
    Submit(AppMsg),
}

/// Modal overlay drawn on top of the grid. It owns the keyboard until it
/// closes.
pub trait Widget {
    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
    fn on_key(&mut self, key: KeyEvent) -> Outcome {
        let _ = key;
        Outcome::Pending
    }
}
