use crate::app::AppMsg;
use crate::grid::ColumnDraft;
use crate::theme::Theme;
use crate::widgets::chrome::{centered_rect, panel_block};
use crate::widgets::prompt::{single_line, text_of, textarea_key};
use crate::widgets::{Outcome, Widget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, List, ListItem, ListState, Paragraph};
use tui_textarea::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Kind,
    NewOption,
    Options,
}

/// "Add column" dialog. Dropdown options are staged in the draft and only
/// reach the tab when the dialog is submitted.
pub struct ColumnDialog {
    pub draft: ColumnDraft,
    name: TextArea<'static>,
    new_option: TextArea<'static>,
    focus: Field,
    option_sel: usize,
}

impl Default for ColumnDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnDialog {
    pub fn new() -> Self {
        Self {
            draft: ColumnDraft::default(),
            name: single_line(""),
            new_option: single_line(""),
            focus: Field::Name,
            option_sel: 0,
        }
    }

    fn fields(&self) -> Vec<Field> {
        if self.draft.dropdown {
            vec![Field::Name, Field::Kind, Field::NewOption, Field::Options]
        } else {
            vec![Field::Name, Field::Kind]
        }
    }

    fn cycle(&mut self, forward: bool) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let n = fields.len();
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        self.focus = fields[next];
    }

    fn stage_option(&mut self) {
        if self.draft.add_option(&text_of(&self.new_option)) {
            self.new_option = single_line("");
            self.option_sel = self.draft.options.len() - 1;
        }
    }

    fn remove_selected_option(&mut self) {
        if let Some(id) = self.draft.options.get(self.option_sel).map(|o| o.id.clone()) {
            self.draft.remove_option(&id);
            self.option_sel = self
                .option_sel
                .min(self.draft.options.len().saturating_sub(1));
        }
    }

    fn submit(&mut self) -> Outcome {
        let mut draft = self.draft.clone();
        draft.name = text_of(&self.name);
        Outcome::Submit(AppMsg::AddColumn(draft))
    }
}

impl Widget for ColumnDialog {
    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rect = centered_rect(60, 60, 14, area);
        f.render_widget(Clear, rect);
        let block = panel_block(" Add column ", true, theme);
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let field_block = |title: &'static str, focused: bool| panel_block(title, focused, theme);
        self.name
            .set_block(field_block(" Name ", self.focus == Field::Name));
        f.render_widget(&self.name, rows[0]);

        let mark = |on: bool| if on { "(•)" } else { "( )" };
        let kind_style = if self.focus == Field::Kind {
            theme.text_editing_bold()
        } else {
            Style::default().fg(theme.fg)
        };
        let kind = Paragraph::new(format!(
            " Type: {} Text  {} Dropdown",
            mark(!self.draft.dropdown),
            mark(self.draft.dropdown)
        ))
        .style(kind_style);
        f.render_widget(kind, rows[1]);

        if self.draft.dropdown {
            self.new_option
                .set_block(field_block(" New option ", self.focus == Field::NewOption));
            f.render_widget(&self.new_option, rows[2]);

            let items: Vec<ListItem> = self
                .draft
                .options
                .iter()
                .map(|o| ListItem::new(format!(" {}", o.label)))
                .collect();
            let mut list_state = ListState::default();
            if self.focus == Field::Options && !self.draft.options.is_empty() {
                list_state.select(Some(self.option_sel));
            }
            let list = List::new(items)
                .block(field_block(" Options ", self.focus == Field::Options))
                .highlight_style(theme.cell_cursor_style());
            f.render_stateful_widget(list, rows[3], &mut list_state);
        }

        let help = Paragraph::new(
            " Tab next field  Space toggle type  Enter add option/submit  Del remove  Esc cancel",
        )
        .style(theme.text_muted());
        f.render_widget(help, rows[4]);
    }

    fn on_key(&mut self, key: KeyEvent) -> Outcome {
        if key.code == KeyCode::Esc {
            return Outcome::Close;
        }
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit();
        }
        match (self.focus, key.code) {
            (_, KeyCode::Tab) => self.cycle(true),
            (_, KeyCode::BackTab) => self.cycle(false),
            (Field::NewOption, KeyCode::Enter) => self.stage_option(),
            (_, KeyCode::Enter) => return self.submit(),
            (Field::Kind, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) => {
                self.draft.dropdown = !self.draft.dropdown;
            }
            (Field::Options, KeyCode::Up) => self.option_sel = self.option_sel.saturating_sub(1),
            (Field::Options, KeyCode::Down) => {
                let last = self.draft.options.len().saturating_sub(1);
                self.option_sel = (self.option_sel + 1).min(last);
            }
            (Field::Options, KeyCode::Delete | KeyCode::Backspace) => {
                self.remove_selected_option()
            }
            (Field::Name, _) => {
                if let Some(k) = textarea_key(&key) {
                    let _ = self.name.input(k);
                }
            }
            (Field::NewOption, _) => {
                if let Some(k) = textarea_key(&key) {
                    let _ = self.new_option.input(k);
                }
            }
            _ => {}
        }
        Outcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(d: &mut ColumnDialog, code: KeyCode) -> Outcome {
        d.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(d: &mut ColumnDialog, s: &str) {
        for ch in s.chars() {
            press(d, KeyCode::Char(ch));
        }
    }

    #[test]
    fn text_column_submits_name() {
        let mut d = ColumnDialog::new();
        type_str(&mut d, "Email");
        match press(&mut d, KeyCode::Enter) {
            Outcome::Submit(AppMsg::AddColumn(draft)) => {
                assert_eq!(draft.name, "Email");
                assert!(!draft.dropdown);
            }
            _ => panic!("expected AddColumn"),
        }
    }

    #[test]
    fn dropdown_options_are_staged_and_removable() {
        let mut d = ColumnDialog::new();
        type_str(&mut d, "Tier");
        press(&mut d, KeyCode::Tab);
        press(&mut d, KeyCode::Char(' '));
        press(&mut d, KeyCode::Tab);
        type_str(&mut d, "Gold");
        press(&mut d, KeyCode::Enter);
        type_str(&mut d, "Silver");
        press(&mut d, KeyCode::Enter);
        // blank labels are ignored
        type_str(&mut d, "  ");
        press(&mut d, KeyCode::Enter);
        assert_eq!(d.draft.options.len(), 2);

        press(&mut d, KeyCode::Tab);
        press(&mut d, KeyCode::Up);
        press(&mut d, KeyCode::Delete);
        let labels: Vec<&str> = d.draft.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Silver"]);

        match press(&mut d, KeyCode::Enter) {
            Outcome::Submit(AppMsg::AddColumn(draft)) => {
                assert_eq!(draft.name, "Tier");
                assert!(draft.dropdown);
                assert_eq!(draft.options.len(), 1);
            }
            _ => panic!("expected AddColumn"),
        }
    }

    #[test]
    fn escape_discards_draft() {
        let mut d = ColumnDialog::new();
        type_str(&mut d, "Phone");
        assert!(matches!(press(&mut d, KeyCode::Esc), Outcome::Close));
    }
}
