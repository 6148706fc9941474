//! Error taxonomy for the workbench core
//!
//! Every rejected mutation leaves all tracked state (layout, cursor,
//! session) exactly as it was before the call.

use crate::panel::PanelId;

/// Errors that can occur in the layout/session core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbenchError {
    /// Operation requires a loaded file/session that is absent
    InvalidState,
    /// A panel with this id is already registered
    DuplicateId(PanelId),
    /// No panel with this id is registered
    UnknownPanel(PanelId),
    /// The layout is locked; visibility and position changes are rejected
    LayoutLocked,
    /// Address is outside the loaded binary's address space
    OutOfRange(u64),
    /// The analysis engine refused to persist its state
    EngineSaveFailed(String),
    /// The analysis engine refused to load the project
    EngineLoadFailed(String),
}

impl WorkbenchError {
    /// Whether this error is an expected user-level rejection that should
    /// surface as a status message rather than propagate
    pub fn is_status_only(&self) -> bool {
        matches!(self, Self::LayoutLocked | Self::OutOfRange(_))
    }

    /// Whether this error indicates registry misuse (programmer error)
    pub fn is_registry_misuse(&self) -> bool {
        matches!(self, Self::DuplicateId(_) | Self::UnknownPanel(_))
    }

    /// Get a user-friendly message for the status line
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidState => "No file loaded".to_string(),
            Self::DuplicateId(id) => format!("Panel '{}' is already registered", id),
            Self::UnknownPanel(id) => format!("Unknown panel '{}'", id),
            Self::LayoutLocked => "Layout is locked".to_string(),
            Self::OutOfRange(addr) => {
                format!("Address {:#x} is outside the loaded binary", addr)
            }
            Self::EngineSaveFailed(reason) => format!("Could not save project: {}", reason),
            Self::EngineLoadFailed(reason) => format!("Could not load project: {}", reason),
        }
    }
}

impl std::fmt::Display for WorkbenchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState => write!(f, "no file loaded"),
            Self::DuplicateId(id) => write!(f, "duplicate panel id: {}", id),
            Self::UnknownPanel(id) => write!(f, "unknown panel id: {}", id),
            Self::LayoutLocked => write!(f, "layout locked"),
            Self::OutOfRange(addr) => write!(f, "address out of range: {:#x}", addr),
            Self::EngineSaveFailed(reason) => write!(f, "engine save failed: {}", reason),
            Self::EngineLoadFailed(reason) => write!(f, "engine load failed: {}", reason),
        }
    }
}

impl std::error::Error for WorkbenchError {}
