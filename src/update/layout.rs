//! Layout and panel-visibility update handlers

use crate::commands::Cmd;
use crate::messages::{LayoutMsg, PanelMsg};
use crate::model::WorkbenchModel;
use crate::update::reject;

/// Update function for per-panel visibility messages
pub fn update_panel(model: &mut WorkbenchModel, msg: PanelMsg) -> Option<Cmd> {
    let m = &mut *model;
    let result = match &msg {
        PanelMsg::Show(id) => m.layout.set_visible(&mut m.registry, id, true),
        PanelMsg::Hide(id) => m.layout.set_visible(&mut m.registry, id, false),
        PanelMsg::Toggle(id) => m.layout.toggle(&mut m.registry, id),
    };
    match result {
        Ok(()) => None,
        Err(err) => reject(err),
    }
}

/// Update function for whole-layout messages
pub fn update_layout(model: &mut WorkbenchModel, msg: LayoutMsg) -> Option<Cmd> {
    let m = &mut *model;
    match msg {
        LayoutMsg::ShowDefaults => match m.layout.show_default_docks(&mut m.registry) {
            Ok(()) => None,
            Err(err) => reject(err),
        },
        LayoutMsg::HideAll => match m.layout.hide_all_docks(&mut m.registry) {
            Ok(()) => None,
            Err(err) => reject(err),
        },
        LayoutMsg::Restore => match m.layout.restore_docks(&mut m.registry) {
            Ok(()) => Some(Cmd::status("Layout reset to defaults")),
            Err(err) => reject(err),
        },
        LayoutMsg::LockUnlock(locked) => {
            m.layout.lock_unlock(&mut m.registry, locked);
            Some(Cmd::status(if locked {
                "Layout locked"
            } else {
                "Layout unlocked"
            }))
        }
        LayoutMsg::ToggleTabs(on) => match m.layout.toggle_tabs(on) {
            Ok(()) => None,
            Err(err) => reject(err),
        },
        LayoutMsg::ToggleResponsive { on, window_width } => {
            m.layout.toggle_responsive(&mut m.registry, on, window_width);
            None
        }
    }
}
