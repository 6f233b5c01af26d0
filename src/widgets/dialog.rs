use crate::app::AppMsg;
use crate::theme::Theme;
use crate::widgets::chrome::{centered_rect, panel_block};
use crate::widgets::{Outcome, Widget};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

/// Yes/no confirmation in front of a destructive action.
pub struct ConfirmDialog {
    title: String,
    message: String,
    on_yes: Option<AppMsg>,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>, on_yes: AppMsg) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            on_yes: Some(on_yes),
        }
    }
}

impl Widget for ConfirmDialog {
    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rect = centered_rect(50, 20, 5, area);
        f.render_widget(Clear, rect);
        let lines = vec![
            Line::raw(self.message.clone()),
            Line::raw(""),
            Line::styled("y / Enter confirm    n / Esc cancel", theme.text_muted()),
        ];
        let p = Paragraph::new(lines)
            .block(panel_block(format!(" {} ", self.title), true, theme))
            .wrap(Wrap { trim: true });
        f.render_widget(p, rect);
    }

    fn on_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match self.on_yes.take() {
                Some(msg) => Outcome::Submit(msg),
                None => Outcome::Close,
            },
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Outcome::Close,
            _ => Outcome::Pending,
        }
    }
}

/// Blocking error alert. Closed with Enter or Esc by the event loop.
pub fn draw_alert(f: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    let rect = centered_rect(60, 25, 6, area);
    f.render_widget(Clear, rect);
    let title = Span::styled(" Error ", theme.text_error().add_modifier(Modifier::BOLD));
    let block = panel_block(title, true, theme).border_style(theme.text_error());
    let lines = vec![
        Line::raw(text.to_string()),
        Line::raw(""),
        Line::styled("Enter / Esc to dismiss", theme.text_muted()),
    ];
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn confirm_yields_message_once() {
        let mut d = ConfirmDialog::new("Delete tab", "Delete 顧客?", AppMsg::DeleteTab);
        let key = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        assert!(matches!(d.on_key(key), Outcome::Submit(AppMsg::DeleteTab)));
        assert!(matches!(d.on_key(key), Outcome::Close));
    }

    #[test]
    fn other_keys_keep_dialog_open() {
        let mut d =
            ConfirmDialog::new("Delete row", "Delete row 3?", AppMsg::DeleteRow("r".into()));
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(matches!(d.on_key(key), Outcome::Pending));
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(d.on_key(esc), Outcome::Close));
    }
}
