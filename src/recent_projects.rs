//! Persistent recent projects list
//!
//! Tracks projects opened in the workbench and persists them to disk.
//! Projects are stored in MRU (most recently used) order with a capacity
//! limit.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// Maximum number of entries to keep
const MAX_ENTRIES: usize = 30;

/// A single entry in the recent projects list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Project name (the session store key)
    pub name: String,
    /// Binary the project analyzes
    pub source_file: PathBuf,
    /// Timestamp when last opened (Unix epoch seconds)
    pub opened_at: u64,
    /// Number of times the project has been opened (for ranking)
    #[serde(default)]
    pub open_count: u32,
}

impl RecentEntry {
    /// Create a new entry for the current time
    pub fn new(name: String, source_file: PathBuf) -> Self {
        Self {
            name,
            source_file,
            opened_at: now_epoch_secs(),
            open_count: 1,
        }
    }

    /// Update entry for re-opening
    pub fn touch(&mut self) {
        self.opened_at = now_epoch_secs();
        self.open_count += 1;
    }
}

fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Persistent recent projects list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentProjects {
    /// Schema version for forward compatibility
    #[serde(default)]
    pub version: u32,
    /// Recent project entries, most recent first
    pub entries: Vec<RecentEntry>,
}

impl RecentProjects {
    pub const CURRENT_VERSION: u32 = 1;

    /// Load recent projects from disk
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::recent_projects_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save recent projects to disk
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = crate::config_paths::recent_projects_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory available",
            ));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
    }

    /// Add a project to the recent list (or update if already present)
    pub fn add(&mut self, name: &str, source_file: PathBuf) {
        if let Some(idx) = self.entries.iter().position(|e| e.name == name) {
            self.entries[idx].touch();
            self.entries[idx].source_file = source_file;
            let entry = self.entries.remove(idx);
            self.entries.insert(0, entry);
        } else {
            self.entries
                .insert(0, RecentEntry::new(name.to_string(), source_file));
        }
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Remove a project from the recent list
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|e| e.name != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_moves_existing_to_front() {
        let mut recent = RecentProjects::default();
        recent.add("a", PathBuf::from("/bin/a"));
        recent.add("b", PathBuf::from("/bin/b"));
        recent.add("a", PathBuf::from("/bin/a"));

        assert_eq!(recent.entries.len(), 2);
        assert_eq!(recent.entries[0].name, "a");
        assert_eq!(recent.entries[0].open_count, 2);
    }

    #[test]
    fn test_capacity_limit() {
        let mut recent = RecentProjects::default();
        for i in 0..40 {
            recent.add(&format!("p{}", i), PathBuf::from("/bin/x"));
        }
        assert_eq!(recent.entries.len(), MAX_ENTRIES);
        assert_eq!(recent.entries[0].name, "p39");
    }
}
