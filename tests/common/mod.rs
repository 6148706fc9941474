//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use binsight::config::WorkbenchConfig;
use binsight::engine::{AnalysisEngine, AnalysisLevel, AnalysisReport};
use binsight::panel::{PanelId, PanelObserver};
use binsight::session::SessionStore;
use binsight::window::WindowController;

/// Address range of the scripted test binary
pub const IMAGE_RANGE: Range<u64> = 0x40_0000..0x50_0000;
/// Entry point the scripted engine reports
pub const ENTRY_POINT: u64 = 0x40_1000;

/// Deterministic fake engine driven by test configuration
pub struct ScriptedEngine {
    pub loaded: bool,
    pub range: Range<u64>,
    pub entry: u64,
    /// Report completion on the first poll after analyze
    pub complete_immediately: bool,
    pub fail_analyze: bool,
    pub fail_save: bool,
    pub fail_load: bool,
    pub saved_projects: Rc<RefCell<Vec<String>>>,
    pending: Option<AnalysisReport>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            loaded: false,
            range: IMAGE_RANGE,
            entry: ENTRY_POINT,
            complete_immediately: true,
            fail_analyze: false,
            fail_save: false,
            fail_load: false,
            saved_projects: Rc::new(RefCell::new(Vec::new())),
            pending: None,
        }
    }

    pub fn preloaded() -> Self {
        let mut engine = Self::new();
        engine.loaded = true;
        engine
    }
}

impl AnalysisEngine for ScriptedEngine {
    fn is_file_loaded(&self) -> bool {
        self.loaded
    }

    fn analyze(&mut self, _path: &Path, _level: AnalysisLevel) -> Result<(), String> {
        if self.fail_analyze {
            return Err("scripted analyze failure".to_string());
        }
        self.loaded = true;
        if self.complete_immediately {
            self.pending = Some(AnalysisReport {
                entry_point: self.entry,
            });
        }
        Ok(())
    }

    fn poll_analysis(&mut self) -> Option<AnalysisReport> {
        self.pending.take()
    }

    fn validate_address(&self, address: u64) -> bool {
        self.loaded && self.range.contains(&address)
    }

    fn entry_point(&self) -> Option<u64> {
        self.loaded.then_some(self.entry)
    }

    fn save_project_state(&mut self, name: &str) -> Result<(), String> {
        if self.fail_save {
            return Err("scripted save failure".to_string());
        }
        self.saved_projects.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn load_project_state(&mut self, name: &str) -> Result<(), String> {
        if self.fail_load {
            return Err("scripted load failure".to_string());
        }
        if !self.saved_projects.borrow().contains(&name.to_string()) {
            return Err(format!("unknown project '{}'", name));
        }
        self.loaded = true;
        Ok(())
    }
}

/// Controller wired to a scripted engine and a temp project store
///
/// The returned TempDir must stay alive for the duration of the test.
pub fn test_controller() -> (WindowController, tempfile::TempDir) {
    test_controller_with(ScriptedEngine::new())
}

pub fn test_controller_with(engine: ScriptedEngine) -> (WindowController, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SessionStore::new(dir.path().to_path_buf());
    let controller = WindowController::new(Box::new(engine), store, WorkbenchConfig::default());
    (controller, dir)
}

/// Sample binary path used across scenario tests
pub fn sample_bin() -> PathBuf {
    PathBuf::from("sample.bin")
}

/// Events a recording observer saw, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Cursor { panel: &'static str, address: u64 },
    Visibility { panel: &'static str, id: PanelId, visible: bool },
    Reset { panel: &'static str },
}

/// Observer that appends every notification to a shared log
pub struct RecordingObserver {
    pub panel: &'static str,
    pub log: Rc<RefCell<Vec<Observed>>>,
}

impl PanelObserver for RecordingObserver {
    fn cursor_changed(&mut self, address: u64) -> Option<u64> {
        self.log.borrow_mut().push(Observed::Cursor {
            panel: self.panel,
            address,
        });
        None
    }

    fn visibility_changed(&mut self, id: &PanelId, visible: bool) {
        self.log.borrow_mut().push(Observed::Visibility {
            panel: self.panel,
            id: id.clone(),
            visible,
        });
    }

    fn layout_reset(&mut self) {
        self.log.borrow_mut().push(Observed::Reset { panel: self.panel });
    }
}

/// Observer that reacts to one cursor broadcast by requesting another
/// address, exercising the re-entrancy queue
pub struct FollowUpObserver {
    pub panel: &'static str,
    pub when_at: u64,
    pub request: u64,
    pub log: Rc<RefCell<Vec<Observed>>>,
}

impl PanelObserver for FollowUpObserver {
    fn cursor_changed(&mut self, address: u64) -> Option<u64> {
        self.log.borrow_mut().push(Observed::Cursor {
            panel: self.panel,
            address,
        });
        (address == self.when_at).then_some(self.request)
    }
}
