//! Message types for the Elm-style architecture
//!
//! Every user-facing command (menu/shortcut driven) and every engine
//! completion signal is a typed message consumed by the window
//! controller; no action handler touches panel internals directly.

use std::path::PathBuf;

use crate::engine::{AnalysisLevel, AnalysisReport};
use crate::panel::PanelId;

/// Per-panel visibility messages (Show/Hide menu entries)
#[derive(Debug, Clone)]
pub enum PanelMsg {
    /// Show a panel
    Show(PanelId),
    /// Hide a panel
    Hide(PanelId),
    /// Toggle a panel (menu action behavior)
    Toggle(PanelId),
}

/// Whole-layout messages
#[derive(Debug, Clone)]
pub enum LayoutMsg {
    /// Force every panel to its default visibility
    ShowDefaults,
    /// Hide every panel
    HideAll,
    /// Reset Layout: discard customization, re-apply defaults
    Restore,
    /// Lock or unlock the whole layout
    LockUnlock(bool),
    /// Stack docks as tabs (or unstack)
    ToggleTabs(bool),
    /// Enter/leave compact reflow explicitly
    ToggleResponsive { on: bool, window_width: u32 },
}

/// Cursor navigation messages
#[derive(Debug, Clone)]
pub enum CursorMsg {
    /// Seek to an address
    Set(u64),
    /// Navigate back in the cursor history
    Back,
    /// Navigate forward in the cursor history
    Forward,
}

/// Project persistence messages
#[derive(Debug, Clone)]
pub enum SessionMsg {
    /// Save under the session's current project name
    Save { quit: bool },
    /// Save under a new name ("Save As")
    SaveAs { name: String, quit: bool },
    /// Open a saved project
    Load { name: String },
}

/// Application-level messages (file opening, window events, quit flow)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Open a binary for analysis, replacing any current session
    OpenFile { path: PathBuf, level: AnalysisLevel },
    /// The engine finished analyzing (async completion signal)
    AnalysisFinished(AnalysisReport),
    /// Window resized; may flip responsive mode
    WindowResized { width: u32, height: u32 },
    /// Tell every visible panel to re-read its contents
    RefreshPanels,
    /// Quit requested (runs the save-prompt flow)
    Quit,
    /// User chose to discard unsaved state and quit anyway
    DiscardAndQuit,
    /// User cancelled the quit after a failed save
    CancelQuit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Per-panel visibility
    Panel(PanelMsg),
    /// Whole-layout operations
    Layout(LayoutMsg),
    /// Cursor navigation
    Cursor(CursorMsg),
    /// Project save/load
    Session(SessionMsg),
    /// File opening, window events, quit
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Seek the global cursor
    pub fn seek(address: u64) -> Self {
        Msg::Cursor(CursorMsg::Set(address))
    }

    /// Toggle a panel by id
    pub fn toggle_panel(id: impl Into<PanelId>) -> Self {
        Msg::Panel(PanelMsg::Toggle(id.into()))
    }

    /// Open a file at the default analysis level
    pub fn open_file(path: PathBuf) -> Self {
        Msg::App(AppMsg::OpenFile {
            path,
            level: AnalysisLevel::default(),
        })
    }
}

impl From<String> for PanelId {
    fn from(id: String) -> Self {
        PanelId::new(id)
    }
}
