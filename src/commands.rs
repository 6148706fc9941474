//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the window controller performs after
//! an update: starting engine analysis, surfacing status text, prompting
//! the user, or exiting.

use std::path::PathBuf;

use crate::engine::AnalysisLevel;

/// Side effects produced by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Show a transient status message
    Status(String),
    /// Start analyzing a file on the engine
    Analyze { path: PathBuf, level: AnalysisLevel },
    /// A save on the quit path failed; the user must choose between
    /// cancelling the close and discarding the session
    ConfirmDiscard { reason: String },
    /// Request application exit
    Exit,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Convenience constructor for status messages
    pub fn status(text: impl Into<String>) -> Self {
        Cmd::Status(text.into())
    }
}
