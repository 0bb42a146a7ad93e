//! Path resolution for focusflow configuration and data files.
//!
//! All focusflow data is stored in `~/.focusflow/` unless `FOCUSFLOW_HOME`
//! points elsewhere:
//! - `config.yaml` - Timer, sound and output settings
//! - `focusflow.db` - SQLite database for timer state and daily stats

use std::path::PathBuf;

use crate::error::FocusFlowError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "FOCUSFLOW_HOME";

/// Paths to focusflow configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focusflow/`
    pub root: PathBuf,
    /// Config file: `~/.focusflow/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.focusflow/focusflow.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `FOCUSFLOW_HOME`, falling back to the user's home
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, FocusFlowError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            FocusFlowError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".focusflow")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("focusflow.db"),
            root,
        }
    }

    /// Ensure the data directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusFlowError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                FocusFlowError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-focusflow");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("focusflow.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("data"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
