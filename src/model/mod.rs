//! Application model - the complete policy-layer state of the window
//!
//! Following the Elm Architecture pattern: all state the update
//! functions operate on lives here. The model owns the panel registry,
//! the layout controller, the global cursor and the (optional) session;
//! the layout controller and session store only reach panels through the
//! registry's API.

use crate::config::WorkbenchConfig;
use crate::cursor::CursorState;
use crate::layout::LayoutController;
use crate::panel::PanelRegistry;
use crate::session::Session;

/// The complete policy-layer model
pub struct WorkbenchModel {
    /// All dockable panels, in registration order
    pub registry: PanelRegistry,
    /// Dock layout state machine
    pub layout: LayoutController,
    /// The globally-shared current address
    pub cursor: CursorState,
    /// Current editing session, if a file or project is open
    pub session: Option<Session>,
    /// User preferences
    pub config: WorkbenchConfig,
    /// Last known window size (logical pixels)
    pub window_size: (u32, u32),
}

impl WorkbenchModel {
    /// Model with the standard panel set and no session
    pub fn new(config: WorkbenchConfig) -> Self {
        Self {
            registry: PanelRegistry::with_standard_panels(),
            layout: LayoutController::new(),
            cursor: CursorState::new(),
            session: None,
            config,
            window_size: (1600, 900),
        }
    }

    /// Whether an editing session is open
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Window-title text for the current session
    pub fn title(&self) -> String {
        match &self.session {
            Some(session) => format!("binsight - {}", session.display_name()),
            None => "binsight".to_string(),
        }
    }
}
