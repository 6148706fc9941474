//! Session state and project persistence
//!
//! A session spans the loaded binary, the global cursor and the dock
//! layout. The session store serializes that state to a named project
//! record (JSON under the projects directory) and coordinates with the
//! analysis engine's own persistence. The engine side is always restored
//! first on load: cursor validity depends on the restored address space.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cursor::CursorState;
use crate::engine::AnalysisEngine;
use crate::error::WorkbenchError;
use crate::layout::LayoutController;
use crate::panel::{PanelId, PanelRegistry};

/// In-memory state of one editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The binary being analyzed
    pub source_file: PathBuf,
    /// The project this session was loaded from / last saved as
    pub project_name: Option<String>,
}

impl Session {
    pub fn new(source_file: PathBuf) -> Self {
        Self {
            source_file,
            project_name: None,
        }
    }

    /// Window-title display name for the loaded binary
    pub fn display_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.source_file.to_string_lossy().to_string())
    }
}

/// One panel's persisted layout entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PanelRecord {
    id: PanelId,
    visible: bool,
    locked: bool,
}

/// On-disk project record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Schema version for forward compatibility
    #[serde(default)]
    version: u32,
    source_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor_address: Option<u64>,
    tabs_mode: bool,
    responsive: bool,
    layout: Vec<PanelRecord>,
}

impl ProjectRecord {
    pub const CURRENT_VERSION: u32 = 1;
}

/// Serializes and restores {binary, cursor, layout} project records
#[derive(Debug, Clone)]
pub struct SessionStore {
    projects_dir: PathBuf,
}

impl SessionStore {
    pub fn new(projects_dir: PathBuf) -> Self {
        Self { projects_dir }
    }

    /// Store rooted at the user config directory
    pub fn at_default_location() -> Option<Self> {
        crate::config_paths::projects_dir().map(Self::new)
    }

    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    /// Path of the record for a named project
    pub fn project_path(&self, name: &str) -> PathBuf {
        self.projects_dir.join(format!("{}.json", name))
    }

    /// Names of all saved projects, sorted
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.projects_dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                let name = path.file_name()?.to_str()?;
                name.strip_suffix(".json")
                    .filter(|n| !n.ends_with(".engine"))
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        names
    }

    /// Build the persistable snapshot of the current session
    pub fn snapshot(
        &self,
        session: &Session,
        cursor: &CursorState,
        layout: &LayoutController,
        registry: &PanelRegistry,
    ) -> ProjectRecord {
        ProjectRecord {
            version: ProjectRecord::CURRENT_VERSION,
            source_file: session.source_file.clone(),
            cursor_address: cursor.is_valid().then(|| cursor.address()),
            tabs_mode: layout.tabs_mode(),
            responsive: layout.is_responsive(),
            layout: registry
                .iter()
                .map(|p| PanelRecord {
                    id: p.id.clone(),
                    visible: p.visible,
                    locked: p.locked,
                })
                .collect(),
        }
    }

    /// Persist the session as project `name`
    ///
    /// Delegates the binary/analysis side to the engine first; a refusal
    /// surfaces as `EngineSaveFailed` without touching the record on
    /// disk. `is_quit` only affects how the caller reacts to failure -
    /// this function never blocks on a UI decision.
    pub fn save(
        &self,
        name: &str,
        is_quit: bool,
        session: &Session,
        cursor: &CursorState,
        layout: &LayoutController,
        registry: &PanelRegistry,
        engine: &mut dyn AnalysisEngine,
    ) -> Result<(), WorkbenchError> {
        engine
            .save_project_state(name)
            .map_err(WorkbenchError::EngineSaveFailed)?;

        let record = self.snapshot(session, cursor, layout, registry);
        std::fs::create_dir_all(&self.projects_dir)
            .map_err(|e| WorkbenchError::EngineSaveFailed(e.to_string()))?;
        let contents = serde_json::to_string_pretty(&record)
            .map_err(|e| WorkbenchError::EngineSaveFailed(e.to_string()))?;
        let path = self.project_path(name);
        std::fs::write(&path, contents)
            .map_err(|e| WorkbenchError::EngineSaveFailed(e.to_string()))?;

        tracing::info!(project = name, is_quit, path = %path.display(), "project saved");
        Ok(())
    }

    /// Restore project `name` into the given state
    ///
    /// Fails fast with `EngineLoadFailed` before mutating anything if the
    /// record is unreadable or the engine rejects the project. Snapshot
    /// entries for unregistered panels are ignored with a warning;
    /// registered panels absent from the snapshot take their default
    /// visibility. The cursor is applied last, after the engine's address
    /// space exists again.
    pub fn load(
        &self,
        name: &str,
        cursor: &mut CursorState,
        layout: &mut LayoutController,
        registry: &mut PanelRegistry,
        engine: &mut dyn AnalysisEngine,
    ) -> Result<Session, WorkbenchError> {
        let path = self.project_path(name);
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            WorkbenchError::EngineLoadFailed(format!("{}: {}", path.display(), e))
        })?;
        let record: ProjectRecord = serde_json::from_str(&contents)
            .map_err(|e| WorkbenchError::EngineLoadFailed(e.to_string()))?;

        engine
            .load_project_state(name)
            .map_err(WorkbenchError::EngineLoadFailed)?;

        // Engine accepted: from here on we are committed to the new session.
        let mut seen: Vec<PanelId> = Vec::with_capacity(record.layout.len());
        for entry in &record.layout {
            if !registry.contains(&entry.id) {
                tracing::warn!(id = %entry.id, "snapshot references unknown panel; ignored");
                continue;
            }
            layout.restore_visibility(registry, &entry.id, entry.visible)?;
            seen.push(entry.id.clone());
        }
        for id in registry.ids() {
            if !seen.contains(&id) {
                let default = registry.get(&id).map(|p| p.default_visible).unwrap_or(false);
                layout.restore_visibility(registry, &id, default)?;
            }
        }

        // Panels lock and unlock together; the global flag is the
        // conjunction of the per-panel records.
        let locked = !record.layout.is_empty() && record.layout.iter().all(|p| p.locked);
        layout.restore_flags(registry, locked, record.tabs_mode, record.responsive);
        layout.refresh_state_from(registry);
        registry.notify_layout_reset();

        if let Some(address) = record.cursor_address {
            cursor.restore(address, engine, registry);
        } else {
            cursor.invalidate();
        }

        tracing::info!(project = name, source = %record.source_file.display(), "project loaded");
        let mut session = Session::new(record.source_file);
        session.project_name = Some(name.to_string());
        Ok(session)
    }
}
