use crate::grid::Tab;
use crate::services::store::{StoreError, TabPatch, TabStore};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Which write path an update belongs to. Cell values only travel with
/// `Save`; column and row-count changes go out immediately as `Structure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Save,
    Structure,
}

/// What a tab-list fetch does to the working copy of the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Re-derive it from the fetched rows.
    Reset,
    /// Keep local rows and values; only columns are taken from the fetch.
    Keep,
    /// Keep local edits, but bring back stored rows and column values the
    /// working copy lost to a rejected structural write.
    Restore,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    /// Fetch all tabs.
    List {
        refresh: Refresh,
    },
    Create {
        name: String,
    },
    Update {
        tab_id: String,
        patch: TabPatch,
        write: WriteKind,
    },
    Delete {
        tab_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadKind {
    List { refresh: Refresh },
    Create,
    Update { tab_id: String, write: WriteKind },
    Delete { tab_id: String },
}

#[derive(Debug)]
pub enum StoreReply {
    Tabs(Vec<Tab>),
    Created(Tab),
    Done,
}

impl StoreRequest {
    pub fn kind(&self) -> LoadKind {
        match self {
            StoreRequest::List { refresh } => LoadKind::List { refresh: *refresh },
            StoreRequest::Create { .. } => LoadKind::Create,
            StoreRequest::Update { tab_id, write, .. } => LoadKind::Update {
                tab_id: tab_id.clone(),
                write: *write,
            },
            StoreRequest::Delete { tab_id } => LoadKind::Delete {
                tab_id: tab_id.clone(),
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            StoreRequest::List { .. } => "list tabs".to_string(),
            StoreRequest::Create { name } => format!("create tab {name:?}"),
            StoreRequest::Update { tab_id, patch, write } => {
                let mut parts = Vec::new();
                if patch.name.is_some() {
                    parts.push("name".to_string());
                }
                if let Some(c) = &patch.columns {
                    parts.push(format!("{} columns", c.len()));
                }
                if let Some(r) = &patch.rows {
                    parts.push(format!("{} rows", r.len()));
                }
                format!("update {tab_id} ({write:?}: {})", parts.join(", "))
            }
            StoreRequest::Delete { tab_id } => format!("delete {tab_id}"),
        }
    }
}

pub struct LoadMsg {
    pub kind: LoadKind,
    pub outcome: Result<StoreReply, StoreError>,
}

pub fn execute(store: &dyn TabStore, req: &StoreRequest) -> Result<StoreReply, StoreError> {
    match req {
        StoreRequest::List { .. } => store.list_tabs().map(StoreReply::Tabs),
        StoreRequest::Create { name } => store.create_tab(name).map(StoreReply::Created),
        StoreRequest::Update { tab_id, patch, .. } => {
            store.update_tab(tab_id, patch).map(|_| StoreReply::Done)
        }
        StoreRequest::Delete { tab_id } => store.delete_tab(tab_id).map(|_| StoreReply::Done),
    }
}

// Run one store call off the UI thread and report back through `tx`.
pub fn spawn_store_request(store: Arc<dyn TabStore>, req: StoreRequest, tx: Sender<LoadMsg>) {
    thread::spawn(move || {
        let outcome = execute(store.as_ref(), &req);
        let _ = tx.send(LoadMsg {
            kind: req.kind(),
            outcome,
        });
    });
}

#[cfg(test)]
mod loader_tests;
