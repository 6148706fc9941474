//! Analysis engine interface
//!
//! The disassembly/analysis engine is an external collaborator: the core
//! only asks it to analyze files, validate addresses, and persist its own
//! side of a project. Long-running analysis is asynchronous from the
//! core's point of view; completion is polled by the window controller
//! (or injected as a message by the embedding application) rather than
//! awaited inline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How deep the initial analysis pass should go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisLevel {
    /// Load the file without analyzing
    Skip,
    /// Entry point and obvious functions only
    Basic,
    /// Full recursive-descent analysis
    Full,
    /// Full analysis plus experimental passes
    Experimental,
}

impl AnalysisLevel {
    /// Map a numeric CLI level (`-A 0..=3`) to an analysis level
    pub fn from_cli(level: u8) -> Self {
        match level {
            0 => Self::Skip,
            1 => Self::Basic,
            2 => Self::Full,
            _ => Self::Experimental,
        }
    }
}

impl Default for AnalysisLevel {
    fn default() -> Self {
        Self::Full
    }
}

/// Result of a completed analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Entry point of the loaded binary
    pub entry_point: u64,
}

/// Interface to the external analysis engine
///
/// `analyze` only *starts* analysis; completion is observed through
/// `poll_analysis` (engines that finish synchronously report a result on
/// the first poll). All other methods are synchronous and non-blocking.
pub trait AnalysisEngine {
    /// Whether a binary is currently loaded
    fn is_file_loaded(&self) -> bool;

    /// Begin analyzing `path` at the given level
    fn analyze(&mut self, path: &Path, level: AnalysisLevel) -> Result<(), String>;

    /// Take the completion report of a finished analysis, if any
    fn poll_analysis(&mut self) -> Option<AnalysisReport>;

    /// Whether `address` is within the loaded binary's addressable range
    fn validate_address(&self, address: u64) -> bool;

    /// Entry point of the loaded binary, once analysis has produced one
    fn entry_point(&self) -> Option<u64>;

    /// Persist the engine's side of the named project
    fn save_project_state(&mut self, name: &str) -> Result<(), String>;

    /// Restore the engine's side of the named project
    fn load_project_state(&mut self, name: &str) -> Result<(), String>;
}

/// Minimal file-backed engine used by the headless binary and demos
///
/// Maps the raw file at a fixed base address; the "entry point" is the
/// image base. Project state is a sidecar JSON next to the core's own
/// project records.
pub struct FlatImage {
    state_dir: PathBuf,
    image: Option<LoadedImage>,
    pending: Option<AnalysisReport>,
}

struct LoadedImage {
    path: PathBuf,
    base: u64,
    len: u64,
}

#[derive(Serialize, Deserialize)]
struct FlatImageState {
    source_file: PathBuf,
    level: AnalysisLevel,
}

impl FlatImage {
    /// Base address files are mapped at
    pub const IMAGE_BASE: u64 = 0x0040_0000;

    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            state_dir,
            image: None,
            pending: None,
        }
    }

    fn state_path(&self, name: &str) -> PathBuf {
        self.state_dir.join(format!("{}.engine.json", name))
    }

    fn load_image(&mut self, path: &Path) -> Result<(), String> {
        let meta = std::fs::metadata(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        if meta.is_dir() {
            return Err(format!("{} is a directory", path.display()));
        }
        self.image = Some(LoadedImage {
            path: path.to_path_buf(),
            base: Self::IMAGE_BASE,
            len: meta.len(),
        });
        Ok(())
    }
}

impl AnalysisEngine for FlatImage {
    fn is_file_loaded(&self) -> bool {
        self.image.is_some()
    }

    fn analyze(&mut self, path: &Path, level: AnalysisLevel) -> Result<(), String> {
        self.load_image(path)?;
        tracing::info!(path = %path.display(), ?level, "flat image mapped");
        // Flat mapping has nothing further to compute; complete immediately.
        self.pending = Some(AnalysisReport {
            entry_point: Self::IMAGE_BASE,
        });
        Ok(())
    }

    fn poll_analysis(&mut self) -> Option<AnalysisReport> {
        self.pending.take()
    }

    fn validate_address(&self, address: u64) -> bool {
        match &self.image {
            Some(img) => address >= img.base && address < img.base + img.len.max(1),
            None => false,
        }
    }

    fn entry_point(&self) -> Option<u64> {
        self.image.as_ref().map(|img| img.base)
    }

    fn save_project_state(&mut self, name: &str) -> Result<(), String> {
        let img = self.image.as_ref().ok_or("no file loaded")?;
        let state = FlatImageState {
            source_file: img.path.clone(),
            level: AnalysisLevel::Skip,
        };
        std::fs::create_dir_all(&self.state_dir)
            .map_err(|e| format!("cannot create {}: {}", self.state_dir.display(), e))?;
        let contents =
            serde_json::to_string_pretty(&state).map_err(|e| e.to_string())?;
        std::fs::write(self.state_path(name), contents).map_err(|e| e.to_string())
    }

    fn load_project_state(&mut self, name: &str) -> Result<(), String> {
        let path = self.state_path(name);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let state: FlatImageState =
            serde_json::from_str(&contents).map_err(|e| e.to_string())?;
        self.load_image(&state.source_file)
    }
}
