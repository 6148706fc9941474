//! Window controller - top-level orchestrator
//!
//! Owns the session, the panel registry, the layout controller, the
//! cursor and the engine connection. User actions arrive as messages,
//! flow through the update functions, and come back as commands the
//! controller executes. Engines that complete analysis synchronously
//! are polled right after `analyze`; asynchronous engines have their
//! completion injected later via `dispatch`.

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::config::WorkbenchConfig;
use crate::engine::{AnalysisEngine, AnalysisLevel};
use crate::messages::{AppMsg, CursorMsg, LayoutMsg, Msg, PanelMsg, SessionMsg};
use crate::model::WorkbenchModel;
use crate::panel::PanelId;
use crate::session::SessionStore;
use crate::update::update;

/// What the controller is waiting on from the user, if anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingPrompt {
    /// A save on the quit path failed; quit is suspended until the user
    /// answers with `DiscardAndQuit` or `CancelQuit`
    ConfirmDiscard { reason: String },
}

/// Top-level orchestrator of the workbench window
pub struct WindowController {
    model: WorkbenchModel,
    engine: Box<dyn AnalysisEngine>,
    store: SessionStore,
    status: Option<String>,
    prompt: Option<PendingPrompt>,
    should_quit: bool,
}

impl WindowController {
    pub fn new(
        engine: Box<dyn AnalysisEngine>,
        store: SessionStore,
        config: WorkbenchConfig,
    ) -> Self {
        Self {
            model: WorkbenchModel::new(config),
            engine,
            store,
            status: None,
            prompt: None,
            should_quit: false,
        }
    }

    pub fn model(&self) -> &WorkbenchModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut WorkbenchModel {
        &mut self.model
    }

    pub fn engine(&self) -> &dyn AnalysisEngine {
        self.engine.as_ref()
    }

    /// Last status-line message, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Outstanding user prompt, if any
    pub fn pending_prompt(&self) -> Option<&PendingPrompt> {
        self.prompt.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Feed one message through the update functions and run its commands
    pub fn dispatch(&mut self, msg: Msg) {
        let cmd = update(&mut self.model, self.engine.as_mut(), &self.store, msg);
        if let Some(cmd) = cmd {
            self.run(cmd);
        }
    }

    fn run(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Status(text) => {
                tracing::info!(status = %text);
                self.status = Some(text);
            }
            Cmd::Analyze { path, level } => {
                if let Err(reason) = self.engine.analyze(&path, level) {
                    self.run(Cmd::Status(format!(
                        "Could not open {}: {}",
                        path.display(),
                        reason
                    )));
                    self.model.session = None;
                    return;
                }
                if let Some(report) = self.engine.poll_analysis() {
                    self.dispatch(Msg::App(AppMsg::AnalysisFinished(report)));
                }
            }
            Cmd::ConfirmDiscard { reason } => {
                tracing::warn!(%reason, "save failed on quit; awaiting user decision");
                self.status = Some(format!("Save failed: {}", reason));
                self.prompt = Some(PendingPrompt::ConfirmDiscard { reason });
            }
            Cmd::Exit => {
                self.should_quit = true;
                self.model.registry.begin_teardown();
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.run(cmd);
                }
            }
        }
    }

    // --- convenience wrappers for the command surface ---

    /// Open a binary for analysis, replacing the current session
    pub fn open_new_file(&mut self, path: PathBuf, level: AnalysisLevel) {
        self.dispatch(Msg::App(AppMsg::OpenFile { path, level }));
    }

    /// Open a saved project
    pub fn open_project(&mut self, name: &str) {
        self.dispatch(Msg::Session(SessionMsg::Load {
            name: name.to_string(),
        }));
    }

    /// Save the session under `name`
    pub fn save_project_as(&mut self, name: &str, quit: bool) {
        self.dispatch(Msg::Session(SessionMsg::SaveAs {
            name: name.to_string(),
            quit,
        }));
    }

    /// Save under the current project name (quit flow when `quit`)
    pub fn save_project(&mut self, quit: bool) {
        self.dispatch(Msg::Session(SessionMsg::Save { quit }));
    }

    /// Run the quit flow (save prompt included)
    pub fn request_quit(&mut self) {
        self.dispatch(Msg::App(AppMsg::Quit));
    }

    /// Answer an outstanding discard prompt
    pub fn answer_discard(&mut self, discard: bool) {
        if self.prompt.take().is_none() {
            tracing::warn!("discard answer with no outstanding prompt");
            return;
        }
        self.dispatch(Msg::App(if discard {
            AppMsg::DiscardAndQuit
        } else {
            AppMsg::CancelQuit
        }));
    }

    /// Seek the global cursor
    pub fn set_cursor(&mut self, address: u64) {
        self.dispatch(Msg::Cursor(CursorMsg::Set(address)));
    }

    /// Toggle a panel by id
    pub fn toggle_panel(&mut self, id: PanelId) {
        self.dispatch(Msg::Panel(PanelMsg::Toggle(id)));
    }

    /// Report a window resize
    pub fn window_resized(&mut self, width: u32, height: u32) {
        self.dispatch(Msg::App(AppMsg::WindowResized { width, height }));
    }

    /// Reset Layout menu action
    pub fn reset_layout(&mut self) {
        self.dispatch(Msg::Layout(LayoutMsg::Restore));
    }
}
