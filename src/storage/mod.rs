//! Durable storage for the saved-question id set.
//!
//! One JSON file holding an id array, rewritten in full on every mutation.
//! No versioning or migration of the stored format.

use std::fs;
use std::io;
use std::path::PathBuf;

/// File-backed persistence for saved question ids.
#[derive(Debug, Clone)]
pub struct SavedQuestionsFile {
    path: PathBuf,
}

impl SavedQuestionsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted set. A missing file is an empty set; an unreadable
    /// one is logged and treated the same.
    pub fn load(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved questions from {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(
                    "Discarding unparseable saved-questions file {:?}: {}",
                    self.path,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Write the whole set, creating parent directories on first save.
    pub fn save(&self, ids: &[String]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string(ids).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(&self.path, raw)
    }
}
