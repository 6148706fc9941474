//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Each one runs
//! synchronously on the UI-owning thread; the only asynchronous input is
//! the engine's analysis-completion message. Rejected mutations leave
//! the model exactly as it was.

mod app;
mod cursor;
mod layout;
mod session;

use crate::commands::Cmd;
use crate::engine::AnalysisEngine;
use crate::error::WorkbenchError;
use crate::messages::Msg;
use crate::model::WorkbenchModel;
use crate::session::SessionStore;

pub use app::update_app;
pub use cursor::update_cursor;
pub use layout::{update_layout, update_panel};
pub use session::update_session;

/// Main update function - dispatches to sub-handlers
pub fn update(
    model: &mut WorkbenchModel,
    engine: &mut dyn AnalysisEngine,
    store: &SessionStore,
    msg: Msg,
) -> Option<Cmd> {
    match msg {
        Msg::Panel(m) => update_panel(model, m),
        Msg::Layout(m) => update_layout(model, m),
        Msg::Cursor(m) => update_cursor(model, engine, m),
        Msg::Session(m) => update_session(model, engine, store, m),
        Msg::App(m) => update_app(model, engine, store, m),
    }
}

/// Turn a rejected mutation into the command the caller should run
///
/// Expected rejections (lock, out-of-range) become status messages.
/// Registry misuse is a programmer error: it fails loudly (assertion in
/// debug builds, error log in release) but never corrupts state.
pub(crate) fn reject(err: WorkbenchError) -> Option<Cmd> {
    if err.is_registry_misuse() {
        debug_assert!(false, "panel registry misuse: {}", err);
        tracing::error!(error = %err, "panel registry misuse");
    } else if err.is_status_only() {
        tracing::debug!(error = %err, "mutation rejected");
    } else {
        tracing::warn!(error = %err, "operation failed");
    }
    Some(Cmd::Status(err.user_message()))
}
