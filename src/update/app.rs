//! Application-level update handlers: file opening, resize, quit flow

use crate::commands::Cmd;
use crate::engine::AnalysisEngine;
use crate::messages::{AppMsg, SessionMsg};
use crate::model::WorkbenchModel;
use crate::session::{Session, SessionStore};
use crate::update::{reject, update_session};

/// Update function for app messages
pub fn update_app(
    model: &mut WorkbenchModel,
    engine: &mut dyn AnalysisEngine,
    store: &SessionStore,
    msg: AppMsg,
) -> Option<Cmd> {
    match msg {
        AppMsg::OpenFile { path, level } => {
            // A fresh session replaces whatever was open.
            if let Some(old) = model.session.take() {
                tracing::info!(previous = %old.display_name(), "session replaced");
            }
            model.cursor.invalidate();
            model.session = Some(Session::new(path.clone()));
            Some(Cmd::Batch(vec![
                Cmd::Status(format!("Analyzing {}...", path.display())),
                Cmd::Analyze { path, level },
            ]))
        }

        AppMsg::AnalysisFinished(report) => {
            let m = &mut *model;
            if m.session.is_none() {
                tracing::warn!("analysis completion with no session; dropped");
                return None;
            }
            if let Err(err) = m.layout.show_default_docks(&mut m.registry) {
                return reject(err);
            }
            if let Err(err) = m.cursor.set(report.entry_point, engine, &mut m.registry) {
                return reject(err);
            }
            Some(Cmd::Status(format!(
                "Analysis complete; entry point {:#x}",
                report.entry_point
            )))
        }

        AppMsg::WindowResized { width, height } => {
            model.window_size = (width, height);
            let compact = width < model.config.responsive_width_budget;
            if compact != model.layout.is_responsive() {
                let m = &mut *model;
                m.layout.toggle_responsive(&mut m.registry, compact, width);
            }
            None
        }

        AppMsg::RefreshPanels => {
            model.registry.notify_layout_reset();
            None
        }

        AppMsg::Quit => {
            if model.session.is_none() {
                return Some(Cmd::Exit);
            }
            // Quit path: a successful save exits, a failure asks first.
            update_session(model, engine, store, SessionMsg::Save { quit: true })
        }

        AppMsg::DiscardAndQuit => Some(Cmd::Exit),

        AppMsg::CancelQuit => Some(Cmd::status("Close cancelled")),
    }
}
