use crate::app::editor::GridEditor;
use crate::app::{msg_from_load, update, AppMsg, Effect};
use crate::grid::CellRef;
use crate::model::{validate_app_config, AppConfig, StoreKind};
use crate::nav::keys::grid_key;
use crate::services::cli_store::CliTabStore;
use crate::services::loader::{spawn_store_request, LoadMsg, Refresh, StoreRequest};
use crate::services::memory_store::MemoryTabStore;
use crate::services::store::TabStore;
use crate::theme::Theme;
use crate::widgets::banner::draw_banner;
use crate::widgets::chrome::contains;
use crate::widgets::column_dialog::ColumnDialog;
use crate::widgets::dialog::{draw_alert, ConfirmDialog};
use crate::widgets::grid_view::{draw_grid, ClickTracker, GridLayout};
use crate::widgets::prompt::TextPrompt;
use crate::widgets::status_bar::{draw_help, draw_status};
use crate::widgets::tab_bar::draw_tab_bar;
use crate::widgets::{Outcome, Widget};
use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

const CONFIG_FILE: &str = "upmo-grid.yaml";
const TICK_RATE: Duration = Duration::from_millis(200);
const WHEEL_ROWS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

/// Screen regions recorded while drawing, for mouse routing.
#[derive(Debug, Default)]
pub(crate) struct HitMap {
    pub(crate) tabs: Vec<(Rect, usize)>,
    pub(crate) grid: Option<GridLayout>,
    pub(crate) banner_close: Option<Rect>,
    pub(crate) picker: Vec<(Rect, String)>,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) editor: GridEditor,
    store: Option<Arc<dyn TabStore>>,
    tx: Option<Sender<LoadMsg>>,
    rx: Option<Receiver<LoadMsg>>,
    pub(crate) tick: u64,
    pub(crate) tabs_loaded: bool,
    // Spinner text while a save is in flight
    pub(crate) status_text: Option<String>,
    pub(crate) toast: Option<Toast>,
    // Blocking error; Enter/Esc dismisses
    pub(crate) alert: Option<String>,
    // Modal prompt/dialog owning the keyboard
    pub(crate) overlay: Option<Box<dyn Widget>>,
    // (first visible row, first visible column)
    pub(crate) grid_scroll: (usize, usize),
    // Selection the viewport last scrolled to
    pub(crate) followed: Option<CellRef>,
    pub(crate) clicks: ClickTracker,
    pub(crate) layout: HitMap,
    pub(crate) theme: Theme,
    pub(crate) show_debug: bool,
    pub(crate) quit: bool,
    // Debug log (rendered in the F12 debug pane)
    pub(crate) debug_log: VecDeque<String>,
}

impl AppState {
    pub(crate) fn new(config: AppConfig) -> Self {
        Self {
            editor: GridEditor::new(config.max_rows),
            theme: Theme::from_mode(config.theme),
            config,
            ..Default::default()
        }
    }

    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }
}

fn dispatch(state: &mut AppState, msg: AppMsg) {
    let effects = update(state, msg);
    run_effects(state, effects);
}

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::Store(req) => {
                state.dbg(format!("store: {}", req.describe()));
                match state.store.clone().zip(state.tx.clone()) {
                    Some((store, tx)) => spawn_store_request(store, req, tx),
                    None => state.dbg("store: no backend attached, request dropped"),
                }
            }
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                let ticks = seconds.saturating_mul(5); // ~200ms tick
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at_tick: state.tick.saturating_add(ticks),
                });
            }
            Effect::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
                    Ok(()) => state.toast = Some(toast_now(state, "Copied", ToastLevel::Info)),
                    Err(e) => {
                        state.dbg(format!("clipboard: {e}"));
                        let toast = toast_now(state, "Clipboard unavailable", ToastLevel::Error);
                        state.toast = Some(toast);
                    }
                }
            }
        }
    }
}

fn toast_now(state: &AppState, text: &str, level: ToastLevel) -> Toast {
    Toast {
        text: text.to_string(),
        level,
        expires_at_tick: state.tick.saturating_add(10),
    }
}

/// Feed finished store calls back into `update`.
fn pump(state: &mut AppState) {
    let mut drained: Vec<LoadMsg> = Vec::new();
    if let Some(rx) = &state.rx {
        while let Ok(msg) = rx.try_recv() {
            drained.push(msg);
        }
    }
    for msg in drained {
        dispatch(state, msg_from_load(msg));
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub fn run() -> Result<()> {
    let (cfg, cfg_path) = load_config()?;
    validate_app_config(&cfg).map_err(|e| anyhow::anyhow!("invalid config: {e}"))?;
    let base_dir = cfg_path.as_deref().and_then(Path::parent).map(Path::to_path_buf);
    let store = build_store(&cfg, base_dir.as_deref())?;

    let mut state = AppState::new(cfg);
    match &cfg_path {
        Some(p) => state.dbg(format!("config: {}", p.display())),
        None => state.dbg("config: none found, using the demo store"),
    }
    state.store = Some(store);
    let (tx, rx) = mpsc::channel::<LoadMsg>();
    state.tx = Some(tx);
    state.rx = Some(rx);
    run_effects(
        &mut state,
        vec![Effect::Store(StoreRequest::List {
            refresh: Refresh::Reset,
        })],
    );

    // Headless smoke mode
    if env_flag("UPMO_GRID_HEADLESS") {
        let ticks: u64 = std::env::var("UPMO_GRID_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend)?;
        for _ in 0..ticks {
            terminal.draw(|f| ui(f, &mut state))?;
            pump(&mut state);
            state.tick = state.tick.wrapping_add(1);
            std::thread::sleep(TICK_RATE);
        }
        if env_flag("UPMO_GRID_SMOKE_SUMMARY") {
            let summary = serde_json::json!({
                "ok": state.alert.is_none(),
                "tabs_loaded": state.tabs_loaded,
                "tabs": state.editor.tabs.len(),
                "active": state.editor.active_tab().map(|t| t.name.clone()),
                "columns": state.editor.columns.len(),
                "rows": state.editor.rows.len(),
            });
            println!("{summary}");
        }
        return Ok(());
    }

    // Setup terminal (interactive)
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let res = event_loop(&mut terminal, &mut state);
    // Restore
    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    res
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
    let mut last_tick = Instant::now();
    while !state.quit {
        terminal.draw(|f| ui(f, state))?;
        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => on_key(state, key),
                Event::Mouse(ev) => on_mouse(state, ev, Instant::now()),
                _ => {}
            }
        }
        pump(state);
        if last_tick.elapsed() >= TICK_RATE {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn on_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            dispatch(state, AppMsg::DismissAlert);
        }
        return;
    }
    if let Some(mut overlay) = state.overlay.take() {
        match overlay.on_key(key) {
            Outcome::Pending => state.overlay = Some(overlay),
            Outcome::Close => {}
            Outcome::Submit(msg) => dispatch(state, msg),
        }
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('q') if ctrl => state.quit = true,
        KeyCode::Char('s') if ctrl => dispatch(state, AppMsg::Save),
        KeyCode::Char('k') if ctrl => dispatch(state, AppMsg::DismissBanner),
        KeyCode::Char('c') if ctrl => dispatch(state, AppMsg::Copy),
        KeyCode::Char('v') if ctrl => {
            match arboard::Clipboard::new().and_then(|mut c| c.get_text()) {
                Ok(text) => dispatch(state, AppMsg::Paste(text)),
                Err(e) => state.dbg(format!("clipboard: {e}")),
            }
        }
        KeyCode::Char('n') if ctrl => {
            state.overlay = Some(Box::new(TextPrompt::new("New tab", "", AppMsg::CreateTab)));
        }
        KeyCode::Char('r') if ctrl => {
            if let Some(tab) = state.editor.active_tab() {
                let prompt = TextPrompt::new("Rename tab", &tab.name, AppMsg::RenameTab);
                state.overlay = Some(Box::new(prompt));
            }
        }
        KeyCode::Char('w') if ctrl => {
            if let Some(tab) = state.editor.active_tab() {
                let dialog = ConfirmDialog::new(
                    "Delete tab",
                    format!("Delete tab \"{}\" with all its rows?", tab.name),
                    AppMsg::DeleteTab,
                );
                state.overlay = Some(Box::new(dialog));
            }
        }
        KeyCode::Char('a') if ctrl => {
            if state.editor.active_tab().is_some() {
                state.overlay = Some(Box::new(ColumnDialog::new()));
            }
        }
        KeyCode::Char('x') if ctrl => {
            let column = state
                .editor
                .selected()
                .and_then(|c| state.editor.column(&c.column_id));
            if let Some(col) = column {
                let dialog = ConfirmDialog::new(
                    "Delete column",
                    format!("Delete column \"{}\" and its values?", col.name),
                    AppMsg::DeleteColumn(col.id.clone()),
                );
                state.overlay = Some(Box::new(dialog));
            }
        }
        KeyCode::Char('d') if ctrl => {
            let row = state
                .editor
                .selected()
                .and_then(|c| state.editor.row_index(&c.row_id).map(|i| (i, c.row_id.clone())));
            if let Some((i, row_id)) = row {
                let dialog = ConfirmDialog::new(
                    "Delete row",
                    format!("Delete row {}?", i + 1),
                    AppMsg::DeleteRow(row_id),
                );
                state.overlay = Some(Box::new(dialog));
            }
        }
        KeyCode::Left if alt => {
            if state.editor.active > 0 {
                let i = state.editor.active - 1;
                dispatch(state, AppMsg::SwitchTab(i));
            }
        }
        KeyCode::Right if alt => {
            let i = state.editor.active + 1;
            dispatch(state, AppMsg::SwitchTab(i));
        }
        KeyCode::F(12) => state.show_debug = !state.show_debug,
        _ => {
            if let Some(k) = grid_key(&key) {
                dispatch(state, AppMsg::Key(k));
            }
        }
    }
}

fn on_mouse(state: &mut AppState, ev: MouseEvent, now: Instant) {
    if state.alert.is_some() || state.overlay.is_some() {
        return;
    }
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => click(state, ev.column, ev.row, now),
        MouseEventKind::ScrollDown => {
            state.grid_scroll.0 = state.grid_scroll.0.saturating_add(WHEEL_ROWS);
        }
        MouseEventKind::ScrollUp => {
            state.grid_scroll.0 = state.grid_scroll.0.saturating_sub(WHEEL_ROWS);
        }
        _ => {}
    }
}

fn click(state: &mut AppState, x: u16, y: u16, now: Instant) {
    if state.layout.banner_close.map(|r| contains(r, x, y)) == Some(true) {
        dispatch(state, AppMsg::DismissBanner);
        return;
    }
    let picked = state
        .layout
        .picker
        .iter()
        .find(|(r, _)| contains(*r, x, y))
        .map(|(_, label)| label.clone());
    if let Some(label) = picked {
        dispatch(state, AppMsg::PickChoice(label));
        return;
    }
    let tab = state
        .layout
        .tabs
        .iter()
        .find(|(r, _)| contains(*r, x, y))
        .map(|(_, i)| *i);
    if let Some(i) = tab {
        dispatch(state, AppMsg::SwitchTab(i));
        return;
    }
    let cell = state
        .layout
        .grid
        .as_ref()
        .and_then(|g| g.hit_test(x, y))
        .and_then(|pos| state.editor.cell_at(pos));
    match cell {
        Some(cell) => {
            let window = Duration::from_millis(state.config.double_click_ms);
            let msg = if state.clicks.register(&cell, now, window) {
                AppMsg::DoubleClickCell(cell)
            } else {
                AppMsg::ClickCell(cell)
            };
            dispatch(state, msg);
        }
        None => dispatch(state, AppMsg::Blur),
    }
}

fn read_config(p: &Path) -> Result<AppConfig> {
    let s = fs::read_to_string(p).with_context(|| format!("reading {p:?}"))?;
    serde_yaml::from_str(&s).with_context(|| format!("parsing {p:?}"))
}

/// Find `upmo-grid.yaml`: `UPMO_GRID_CONFIG_DIR`, then the working
/// directory and its `.upmo/`, then ancestors' `.upmo/`, then `~/.upmo/`.
/// Without a file the defaults apply.
fn load_config() -> Result<(AppConfig, Option<PathBuf>)> {
    if let Ok(base) = std::env::var("UPMO_GRID_CONFIG_DIR") {
        let p = PathBuf::from(base).join(CONFIG_FILE);
        return Ok((read_config(&p)?, Some(p)));
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut candidates = vec![cwd.join(CONFIG_FILE), cwd.join(".upmo").join(CONFIG_FILE)];
    candidates.extend(cwd.ancestors().skip(1).map(|a| a.join(".upmo").join(CONFIG_FILE)));
    if let Some(home) = std::env::var("HOME")
        .ok()
        .or_else(|| std::env::var("USERPROFILE").ok())
        .map(PathBuf::from)
    {
        candidates.push(home.join(".upmo").join(CONFIG_FILE));
    }
    for p in candidates {
        if p.exists() {
            return Ok((read_config(&p)?, Some(p)));
        }
    }
    Ok((AppConfig::default(), None))
}

fn build_store(cfg: &AppConfig, base_dir: Option<&Path>) -> Result<Arc<dyn TabStore>> {
    match cfg.store.kind {
        StoreKind::Memory => match &cfg.store.seed {
            Some(seed) => {
                let p = PathBuf::from(seed);
                let path = match base_dir {
                    Some(dir) if p.is_relative() => dir.join(p),
                    _ => p,
                };
                Ok(Arc::new(MemoryTabStore::from_seed_file(&path)?))
            }
            None => Ok(Arc::new(MemoryTabStore::demo())),
        },
        StoreKind::Command => {
            let cmd = |c: &Option<String>| c.clone().unwrap_or_default();
            Ok(Arc::new(CliTabStore {
                list_cmd: cmd(&cfg.store.list_cmd),
                create_cmd: cmd(&cfg.store.create_cmd),
                update_cmd: cmd(&cfg.store.update_cmd),
                delete_cmd: cmd(&cfg.store.delete_cmd),
            }))
        }
    }
}

fn ui(f: &mut Frame, state: &mut AppState) {
    // Clear expired toast
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }

    let screen = f.area();
    f.render_widget(Block::default().style(state.theme.base_style()), screen);

    let banner = state.editor.banner.is_some();
    let mut constraints = vec![Constraint::Length(1), Constraint::Length(2)];
    if banner {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(3));
    const DEBUG_H: u16 = 8;
    if state.show_debug {
        constraints.push(Constraint::Length(DEBUG_H));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(screen);

    let mut i = 0;
    draw_title(f, chunks[i], state);
    i += 1;
    draw_tab_bar(f, chunks[i], state);
    i += 1;
    if banner {
        draw_banner(f, chunks[i], state);
        i += 1;
    } else {
        state.layout.banner_close = None;
    }
    draw_grid(f, chunks[i], state);
    i += 1;
    if state.show_debug {
        draw_debug(f, chunks[i], state);
        i += 1;
    }
    draw_status(f, chunks[i], state);
    draw_help(f, chunks[i + 1], state);

    if let Some(mut overlay) = state.overlay.take() {
        overlay.render(f, screen, &state.theme);
        state.overlay = Some(overlay);
    }
    if let Some(text) = &state.alert {
        draw_alert(f, screen, text, &state.theme);
    }
}

fn draw_title(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(
        format!(" {} ", state.config.title),
        state.theme.header_style(),
    )];
    if state.editor.saving {
        spans.push(Span::styled("· saving", state.theme.text_muted()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(state.theme.text_muted())
        .title(Span::styled(
            "Debug",
            state.theme.text_muted().add_modifier(Modifier::BOLD),
        ));
    // Take last `area.height` lines
    let h = area.height.saturating_sub(1) as usize;
    let start = state.debug_log.len().saturating_sub(h);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(start)
        .map(|s| Line::raw(s.clone()))
        .collect();
    let p = Paragraph::new(lines)
        .style(state.theme.text_muted())
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellMode;
    use crate::widgets::grid_view::{layout_columns, GUTTER_W};

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        let tabs = MemoryTabStore::demo().list_tabs().unwrap();
        state.editor.load_tabs(tabs, Refresh::Reset);
        state
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn left_click(x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn with_grid_layout(state: &mut AppState) {
        let widths: Vec<u16> = vec![10, 10];
        state.layout.grid = Some(GridLayout {
            body: Rect::new(0, 4, 80, 10),
            cols: layout_columns(GUTTER_W, 80 - GUTTER_W, &widths, 0),
            first_row: 0,
            total_rows: state.editor.rows.len(),
        });
    }

    #[test]
    fn double_click_within_window_enters_edit_mode() {
        let mut state = loaded_state();
        with_grid_layout(&mut state);
        let t0 = Instant::now();
        // col_name is the first (text) column, row_1 the first row
        on_mouse(&mut state, left_click(GUTTER_W + 1, 4), t0);
        assert!(matches!(state.editor.mode, CellMode::Selected(_)));
        on_mouse(&mut state, left_click(GUTTER_W + 1, 4), t0 + Duration::from_millis(100));
        assert_eq!(state.editor.mode.buffer(), Some("Acme"));
        // clicking outside the grid blurs but keeps the selection
        on_mouse(&mut state, left_click(GUTTER_W + 1, 20), t0 + Duration::from_millis(900));
        assert!(!state.editor.mode.is_editing());
        assert!(state.editor.selected().is_some());
    }

    #[test]
    fn slow_second_click_is_a_single_click() {
        let mut state = loaded_state();
        with_grid_layout(&mut state);
        let t0 = Instant::now();
        on_mouse(&mut state, left_click(GUTTER_W + 1, 5), t0);
        on_mouse(&mut state, left_click(GUTTER_W + 1, 5), t0 + Duration::from_secs(2));
        assert!(matches!(state.editor.mode, CellMode::Selected(_)));
    }

    #[test]
    fn banner_close_click_dismisses_without_saving() {
        let mut state = loaded_state();
        state.editor.banner = Some("dup".into());
        state.layout.banner_close = Some(Rect::new(70, 3, 3, 1));
        on_mouse(&mut state, left_click(71, 3), Instant::now());
        assert!(state.editor.banner.is_none());
        assert!(!state.editor.saving);
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let mut state = loaded_state();
        state.alert = Some("Save failed".into());
        on_key(&mut state, key(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(state.editor.mode, CellMode::Idle);
        on_key(&mut state, key(KeyCode::Enter, KeyModifiers::NONE));
        assert!(state.alert.is_none());
    }

    #[test]
    fn new_tab_prompt_owns_keyboard_until_closed() {
        let mut state = loaded_state();
        on_key(&mut state, key(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert!(state.overlay.is_some());
        // typed into the prompt, not the grid
        on_key(&mut state, key(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(state.editor.mode, CellMode::Idle);
        on_key(&mut state, key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(state.overlay.is_none());
    }

    #[test]
    fn delete_row_asks_for_confirmation() {
        let mut state = loaded_state();
        on_key(&mut state, key(KeyCode::Down, KeyModifiers::NONE));
        on_key(&mut state, key(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(state.overlay.is_some());
        assert_eq!(state.editor.rows[0].value("col_name"), "Acme");
        on_key(&mut state, key(KeyCode::Char('y'), KeyModifiers::NONE));
        assert!(state.overlay.is_none());
        assert_eq!(state.editor.rows[0].value("col_name"), "");
        assert_eq!(state.editor.rows.len(), 1000);
    }

    #[test]
    fn missing_command_store_is_rejected() {
        let cfg: AppConfig = serde_yaml::from_str("store:\n  kind: command\n").unwrap();
        assert!(validate_app_config(&cfg).is_err());
        assert!(build_store(&AppConfig::default(), None).is_ok());
    }
}
