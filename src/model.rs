use serde::Deserialize;

use crate::grid::model::DEFAULT_MAX_ROWS;
use crate::theme::ThemeMode;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Command,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub kind: StoreKind,
    // Memory: optional YAML/JSON file with the initial tabs
    #[serde(default)]
    pub seed: Option<String>,
    // Command: one command line per operation, `${VAR}` expanded
    #[serde(default)]
    pub list_cmd: Option<String>,
    #[serde(default)]
    pub create_cmd: Option<String>,
    #[serde(default)]
    pub update_cmd: Option<String>,
    #[serde(default)]
    pub delete_cmd: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: ThemeMode,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            max_rows: default_max_rows(),
            double_click_ms: default_double_click_ms(),
            theme: default_theme(),
            store: StoreConfig::default(),
        }
    }
}

fn default_title() -> String {
    "upmo grid".to_string()
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_double_click_ms() -> u64 {
    400
}

fn default_theme() -> ThemeMode {
    ThemeMode::Dark
}

pub(crate) fn validate_app_config(cfg: &AppConfig) -> Result<(), String> {
    if cfg.max_rows == 0 {
        return Err("max_rows must be at least 1".to_string());
    }
    if cfg.store.kind == StoreKind::Command {
        for (name, cmd) in [
            ("list_cmd", &cfg.store.list_cmd),
            ("create_cmd", &cfg.store.create_cmd),
            ("update_cmd", &cfg.store.update_cmd),
            ("delete_cmd", &cfg.store.delete_cmd),
        ] {
            if cmd.as_deref().map(str::trim).unwrap_or("").is_empty() {
                return Err(format!("command store requires '{name}'"));
            }
        }
    }
    Ok(())
}
