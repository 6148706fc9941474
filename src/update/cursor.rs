//! Cursor update handlers

use crate::commands::Cmd;
use crate::engine::AnalysisEngine;
use crate::messages::CursorMsg;
use crate::model::WorkbenchModel;
use crate::update::reject;

/// Update function for cursor messages
pub fn update_cursor(
    model: &mut WorkbenchModel,
    engine: &mut dyn AnalysisEngine,
    msg: CursorMsg,
) -> Option<Cmd> {
    let m = &mut *model;
    match msg {
        CursorMsg::Set(address) => match m.cursor.set(address, engine, &mut m.registry) {
            Ok(()) => None,
            Err(err) => reject(err),
        },
        CursorMsg::Back => {
            if m.cursor.go_back(engine, &mut m.registry) {
                None
            } else {
                Some(Cmd::status("No earlier address in history"))
            }
        }
        CursorMsg::Forward => {
            if m.cursor.go_forward(engine, &mut m.registry) {
                None
            } else {
                Some(Cmd::status("No later address in history"))
            }
        }
    }
}
