use crate::app::AppMsg;
use crate::theme::Theme;
use crate::widgets::chrome::{centered_rect, panel_block};
use crate::widgets::{Outcome, Widget};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::crossterm::event as rt_event;
use ratatui::prelude::*;
use ratatui::widgets::Clear;
use tui_textarea::TextArea;

/// Translate a key for a single-line `TextArea`. Enter, Esc and Tab are left
/// to the owner.
pub(crate) fn textarea_key(key: &KeyEvent) -> Option<rt_event::KeyEvent> {
    let code = match key.code {
        KeyCode::Char(c) => rt_event::KeyCode::Char(c),
        KeyCode::Backspace => rt_event::KeyCode::Backspace,
        KeyCode::Delete => rt_event::KeyCode::Delete,
        KeyCode::Left => rt_event::KeyCode::Left,
        KeyCode::Right => rt_event::KeyCode::Right,
        KeyCode::Home => rt_event::KeyCode::Home,
        KeyCode::End => rt_event::KeyCode::End,
        _ => return None,
    };
    let mods = rt_event::KeyModifiers::from_bits_truncate(key.modifiers.bits());
    Some(rt_event::KeyEvent::new(code, mods))
}

pub(crate) fn single_line(initial: &str) -> TextArea<'static> {
    let mut ta = TextArea::from([initial.to_string()]);
    ta.set_cursor_line_style(Style::default());
    ta.move_cursor(tui_textarea::CursorMove::End);
    ta
}

pub(crate) fn text_of(ta: &TextArea<'_>) -> String {
    ta.lines().first().cloned().unwrap_or_default()
}

/// One-line text prompt (new tab name, rename).
pub struct TextPrompt {
    title: String,
    textarea: TextArea<'static>,
    on_submit: fn(String) -> AppMsg,
}

impl TextPrompt {
    pub fn new(title: impl Into<String>, initial: &str, on_submit: fn(String) -> AppMsg) -> Self {
        Self {
            title: title.into(),
            textarea: single_line(initial),
            on_submit,
        }
    }

    pub fn text(&self) -> String {
        text_of(&self.textarea)
    }
}

impl Widget for TextPrompt {
    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rect = centered_rect(50, 10, 3, area);
        self.textarea.set_block(panel_block(
            format!(" {} (Enter ok, Esc cancel) ", self.title),
            true,
            theme,
        ));
        f.render_widget(Clear, rect);
        f.render_widget(&self.textarea, rect);
    }

    fn on_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Esc => Outcome::Close,
            KeyCode::Enter => Outcome::Submit((self.on_submit)(self.text())),
            _ => {
                if let Some(k) = textarea_key(&key) {
                    let _ = self.textarea.input(k);
                }
                Outcome::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(p: &mut TextPrompt, code: KeyCode) -> Outcome {
        p.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_then_enter_submits_text() {
        let mut p = TextPrompt::new("Rename tab", "顧", AppMsg::RenameTab);
        press(&mut p, KeyCode::Char('客'));
        assert_eq!(p.text(), "顧客");
        match press(&mut p, KeyCode::Enter) {
            Outcome::Submit(AppMsg::RenameTab(name)) => assert_eq!(name, "顧客"),
            _ => panic!("expected RenameTab"),
        }
    }

    #[test]
    fn escape_closes_without_message() {
        let mut p = TextPrompt::new("New tab", "", AppMsg::CreateTab);
        press(&mut p, KeyCode::Char('x'));
        assert!(matches!(press(&mut p, KeyCode::Esc), Outcome::Close));
    }
}
