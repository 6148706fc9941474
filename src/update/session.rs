//! Project save/load update handlers
//!
//! Saving delegates to the session store, which itself delegates the
//! analysis side to the engine. A failed save on the quit path does not
//! decide anything: it reports `ConfirmDiscard` and leaves the choice to
//! the user. A failed load aborts the open and leaves the previous
//! session untouched.

use crate::commands::Cmd;
use crate::engine::AnalysisEngine;
use crate::error::WorkbenchError;
use crate::messages::SessionMsg;
use crate::model::WorkbenchModel;
use crate::session::SessionStore;
use crate::update::reject;

/// Update function for session messages
pub fn update_session(
    model: &mut WorkbenchModel,
    engine: &mut dyn AnalysisEngine,
    store: &SessionStore,
    msg: SessionMsg,
) -> Option<Cmd> {
    match msg {
        SessionMsg::Save { quit } => {
            let Some(name) = model
                .session
                .as_ref()
                .and_then(|s| s.project_name.clone())
            else {
                // Never saved before; the caller should run Save As.
                return if quit {
                    Some(Cmd::ConfirmDiscard {
                        reason: "Session has no project name".to_string(),
                    })
                } else {
                    reject(WorkbenchError::InvalidState)
                };
            };
            save_as(model, engine, store, &name, quit)
        }
        SessionMsg::SaveAs { name, quit } => save_as(model, engine, store, &name, quit),
        SessionMsg::Load { name } => {
            let m = &mut *model;
            match store.load(
                &name,
                &mut m.cursor,
                &mut m.layout,
                &mut m.registry,
                engine,
            ) {
                Ok(session) => {
                    let title = session.display_name();
                    m.session = Some(session);
                    Some(Cmd::Status(format!("Loaded project '{}' ({})", name, title)))
                }
                // Previous session untouched on failure.
                Err(err) => reject(err),
            }
        }
    }
}

fn save_as(
    model: &mut WorkbenchModel,
    engine: &mut dyn AnalysisEngine,
    store: &SessionStore,
    name: &str,
    quit: bool,
) -> Option<Cmd> {
    let m = &mut *model;
    let Some(session) = m.session.as_mut() else {
        return reject(WorkbenchError::InvalidState);
    };
    match store.save(
        name,
        quit,
        session,
        &m.cursor,
        &m.layout,
        &m.registry,
        engine,
    ) {
        Ok(()) => {
            session.project_name = Some(name.to_string());
            let saved = Cmd::Status(format!("Project '{}' saved", name));
            if quit {
                Some(Cmd::Batch(vec![saved, Cmd::Exit]))
            } else {
                Some(saved)
            }
        }
        Err(err) if quit => Some(Cmd::ConfirmDiscard {
            reason: err.user_message(),
        }),
        Err(err) => reject(err),
    }
}
