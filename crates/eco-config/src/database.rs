//! Local libSQL database location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::PROJECT_DIR;

fn default_path() -> String {
    format!("{PROJECT_DIR}/ecoinspect.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file. Relative paths resolve against the project root.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// `:memory:` opens a throwaway in-process database.
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Absolute database location for a project rooted at `project_root`.
    pub fn resolve(&self, project_root: &Path) -> PathBuf {
        let path = Path::new(&self.path);
        if self.is_in_memory() || path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    }
}
