//! binsight - dock-layout and session-state core for a binary analysis
//! workbench
//!
//! This crate provides the policy layer of the workbench's top-level
//! window, implementing the Elm Architecture pattern: panel registry,
//! layout state machine, global cursor, and project persistence. Panel
//! rendering and the analysis engine itself are external; the engine is
//! reached only through the [`engine::AnalysisEngine`] trait.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod layout;
pub mod messages;
pub mod model;
pub mod panel;
pub mod recent_projects;
pub mod session;
pub mod tracing;
pub mod update;
pub mod window;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::WorkbenchConfig;
pub use cursor::CursorState;
pub use error::WorkbenchError;
pub use layout::{LayoutController, LayoutState};
pub use messages::Msg;
pub use model::WorkbenchModel;
pub use panel::{DockArea, Panel, PanelId, PanelKind, PanelObserver, PanelRegistry};
pub use session::{Session, SessionStore};
pub use window::WindowController;
