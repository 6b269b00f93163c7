use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::filter::Filter;

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Active filter tab
    #[serde(default)]
    pub filter: Filter,
    /// Cursor position within the filtered view
    #[serde(default)]
    pub cursor: usize,
}

/// Read .state.json from the store directory
pub fn read_ui_state(store_dir: &Path) -> Option<UiState> {
    let path = store_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the store directory
pub fn write_ui_state(store_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    fs::create_dir_all(store_dir)?;
    let path = store_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
