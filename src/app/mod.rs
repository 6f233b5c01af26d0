pub mod editor;

use crate::grid::{CellRef, ColumnDraft, Tab};
use crate::nav::keys::GridKey;
use crate::services::loader::{LoadKind, LoadMsg, Refresh, StoreReply, StoreRequest, WriteKind};
use crate::services::store::{StoreError, DUPLICATE_BANNER};
use crate::ui::{AppState, ToastLevel};

pub enum AppMsg {
    TabsLoaded {
        outcome: Result<Vec<Tab>, StoreError>,
        refresh: Refresh,
    },
    TabCreated(Result<Tab, StoreError>),
    TabWritten {
        tab_id: String,
        write: WriteKind,
        outcome: Result<(), StoreError>,
    },
    TabDeleted {
        tab_id: String,
        outcome: Result<(), StoreError>,
    },
    SwitchTab(usize),
    ClickCell(CellRef),
    DoubleClickCell(CellRef),
    Blur,
    Key(GridKey),
    PickChoice(String),
    Copy,
    Paste(String),
    Save,
    DismissBanner,
    DismissAlert,
    CreateTab(String),
    RenameTab(String),
    DeleteTab,
    AddColumn(ColumnDraft),
    DeleteColumn(String),
    DeleteRow(String),
}

#[derive(Debug)]
pub enum Effect {
    Store(StoreRequest),
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
    CopyToClipboard(String),
}

/// Turn a finished store call into the message `update` understands.
pub fn msg_from_load(msg: LoadMsg) -> AppMsg {
    let LoadMsg { kind, outcome } = msg;
    match kind {
        LoadKind::List { refresh } => AppMsg::TabsLoaded {
            outcome: outcome.and_then(|r| match r {
                StoreReply::Tabs(tabs) => Ok(tabs),
                other => Err(StoreError::backend(format!("unexpected reply: {other:?}"))),
            }),
            refresh,
        },
        LoadKind::Create => AppMsg::TabCreated(outcome.and_then(|r| match r {
            StoreReply::Created(tab) => Ok(tab),
            other => Err(StoreError::backend(format!("unexpected reply: {other:?}"))),
        })),
        LoadKind::Update { tab_id, write } => AppMsg::TabWritten {
            tab_id,
            write,
            outcome: outcome.map(|_| ()),
        },
        LoadKind::Delete { tab_id } => AppMsg::TabDeleted {
            tab_id,
            outcome: outcome.map(|_| ()),
        },
    }
}

fn toast(text: impl Into<String>, level: ToastLevel) -> Effect {
    Effect::ShowToast {
        text: text.into(),
        level,
        seconds: 3,
    }
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        TabsLoaded { outcome, refresh } => match outcome {
            Ok(tabs) => {
                state.dbg(format!("loaded {} tabs ({refresh:?})", tabs.len()));
                state.editor.load_tabs(tabs, refresh);
                state.tabs_loaded = true;
            }
            Err(e) => {
                state.dbg(format!("list tabs failed: {e}"));
                state.alert = Some(format!("Failed to load tabs: {e}"));
            }
        },
        TabCreated(outcome) => match outcome {
            Ok(tab) => {
                state.dbg(format!("created tab {}", tab.id));
                state.editor.pending_activate = Some(tab.id);
                effects.push(Effect::Store(StoreRequest::List {
                    refresh: Refresh::Reset,
                }));
            }
            Err(e) => {
                state.dbg(format!("create tab failed: {e}"));
                state.alert = Some(format!("Failed to create tab: {e}"));
            }
        },
        TabWritten {
            tab_id,
            write,
            outcome,
        } => {
            let on_active =
                state.editor.active_tab().map(|t| t.id.as_str()) == Some(tab_id.as_str());
            match (write, outcome) {
                (WriteKind::Save, outcome) => {
                    state.editor.saving = false;
                    state.status_text = None;
                    match outcome {
                        Ok(()) => {
                            state.dbg(format!("saved {tab_id}"));
                            state.editor.banner = None;
                            effects.push(toast("Saved", ToastLevel::Success));
                            // A save for a tab that is no longer active must
                            // not wipe the working copy of the current one.
                            let refresh = if on_active {
                                Refresh::Reset
                            } else {
                                Refresh::Keep
                            };
                            effects.push(Effect::Store(StoreRequest::List { refresh }));
                        }
                        Err(StoreError::DuplicateRows { message }) => {
                            state.dbg(format!("save {tab_id}: duplicate rows: {message}"));
                            if on_active {
                                state.editor.banner = Some(DUPLICATE_BANNER.to_string());
                            }
                        }
                        Err(e) => {
                            state.dbg(format!("save {tab_id} failed: {e}"));
                            state.alert = Some(format!("Save failed: {e}"));
                        }
                    }
                }
                (WriteKind::Structure, Ok(())) => {
                    state.dbg(format!("structure of {tab_id} persisted"));
                    effects.push(Effect::Store(StoreRequest::List {
                        refresh: Refresh::Keep,
                    }));
                }
                (WriteKind::Structure, Err(e)) => {
                    state.dbg(format!("structure of {tab_id} failed: {e}"));
                    state.alert = Some(format!("Update failed: {e}"));
                    // Pull the stored structure back along with any rows or
                    // column values the local change dropped.
                    effects.push(Effect::Store(StoreRequest::List {
                        refresh: Refresh::Restore,
                    }));
                }
            }
        }
        TabDeleted { tab_id, outcome } => match outcome {
            Ok(()) => {
                state.dbg(format!("deleted {tab_id}"));
                effects.push(toast("Tab deleted", ToastLevel::Info));
                effects.push(Effect::Store(StoreRequest::List {
                    refresh: Refresh::Reset,
                }));
            }
            Err(e) => {
                state.dbg(format!("delete {tab_id} failed: {e}"));
                state.alert = Some(format!("Failed to delete tab: {e}"));
            }
        },
        SwitchTab(index) => {
            state.editor.switch_tab(index);
            state.grid_scroll = (0, 0);
        }
        ClickCell(cell) => state.editor.click_cell(cell),
        DoubleClickCell(cell) => state.editor.double_click_cell(cell),
        Blur => state.editor.blur(),
        Key(key) => state.editor.handle_key(key),
        PickChoice(label) => state.editor.pick_choice(&label),
        Copy => {
            if let Some(cell) = state.editor.selected() {
                let value = state.editor.value(cell).to_string();
                effects.push(Effect::CopyToClipboard(value));
            }
        }
        Paste(text) => state.editor.paste(&text),
        Save => {
            let effs = state.editor.save();
            if !effs.is_empty() {
                state.status_text = Some("Saving...".into());
            }
            effects.extend(effs);
        }
        DismissBanner => state.editor.dismiss_banner(),
        DismissAlert => state.alert = None,
        CreateTab(name) => effects.extend(state.editor.create_tab(&name)),
        RenameTab(name) => effects.extend(state.editor.rename_tab(&name)),
        DeleteTab => effects.extend(state.editor.delete_tab()),
        AddColumn(draft) => effects.extend(state.editor.add_column(&draft)),
        DeleteColumn(column_id) => effects.extend(state.editor.delete_column(&column_id)),
        DeleteRow(row_id) => effects.extend(state.editor.delete_row(&row_id)),
    }
    effects
}
