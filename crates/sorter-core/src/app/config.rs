//! BoardConfig - ボードの起動設定
//!
//! JSON ファイルから読み込みます。すべてのフィールドは省略可能で、
//! 省略時は既定値（Buffered / シードあり / Cards / 選択なし / "info"）になります。
//!
//! ```json
//! {
//!   "edit_policy": "live",
//!   "seed_demo_tasks": false,
//!   "view_mode": "list",
//!   "preselected": { "priority": ["High"] },
//!   "log_filter": "sorter_core=debug"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::{Category, EditPolicy, Result, SorterError, ViewMode};

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Filter labels selected when the board starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preselected {
    pub status: Vec<String>,
    pub priority: Vec<String>,
    pub complexity: Vec<String>,
}

impl Preselected {
    /// Labels keyed by category, as `FilterSet::preselect` expects them.
    pub fn to_selection(&self) -> HashMap<Category, Vec<String>> {
        let mut selection = HashMap::new();
        for (category, labels) in [
            (Category::Status, &self.status),
            (Category::Priority, &self.priority),
            (Category::Complexity, &self.complexity),
        ] {
            if !labels.is_empty() {
                selection.insert(category, labels.clone());
            }
        }
        selection
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub edit_policy: EditPolicy,
    #[serde(default = "default_true")]
    pub seed_demo_tasks: bool,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub preselected: Preselected,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            edit_policy: EditPolicy::default(),
            seed_demo_tasks: true,
            view_mode: ViewMode::default(),
            preselected: Preselected::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SorterError::Config(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| SorterError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }
}
