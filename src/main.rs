//! Headless driver for the workbench core
//!
//! Wires a [`FlatImage`] engine to the window controller and exposes the
//! command surface on stdin. Useful for exercising sessions and layouts
//! without a GUI front-end attached.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use binsight::cli::{CliArgs, StartupMode};
use binsight::config::WorkbenchConfig;
use binsight::engine::FlatImage;
use binsight::messages::{CursorMsg, LayoutMsg, Msg, PanelMsg};
use binsight::panel::PanelId;
use binsight::recent_projects::RecentProjects;
use binsight::session::SessionStore;
use binsight::window::{PendingPrompt, WindowController};

fn main() -> Result<()> {
    binsight::tracing::init();

    let args = CliArgs::parse();
    let config = WorkbenchConfig::load();
    let default_level = config.analysis_level;

    let projects_dir = binsight::config_paths::ensure_projects_dir()
        .map_err(anyhow::Error::msg)
        .context("no projects directory available")?;
    let store = SessionStore::new(projects_dir.clone());
    let engine = FlatImage::new(projects_dir);
    let mut controller = WindowController::new(Box::new(engine), store.clone(), config);
    let mut recent = RecentProjects::load();

    match args.into_mode(default_level) {
        StartupMode::ListProjects => {
            for name in store.list() {
                println!("{}", name);
            }
            if !recent.entries.is_empty() {
                println!("-- recent --");
                for entry in &recent.entries {
                    println!("{}  ({})", entry.name, entry.source_file.display());
                }
            }
            return Ok(());
        }
        StartupMode::OpenFile { path, level } => {
            controller.open_new_file(path, level);
        }
        StartupMode::OpenProject(name) => {
            controller.open_project(&name);
            note_recent(&mut recent, &controller);
        }
        StartupMode::Empty => {}
    }

    print_summary(&controller);
    repl(&mut controller, &mut recent)
}

/// Minimal stdin command loop over the workbench command surface
fn repl(controller: &mut WindowController, recent: &mut RecentProjects) -> Result<()> {
    let stdin = std::io::stdin();
    let mut out = std::io::stdout();

    loop {
        if controller.should_quit() {
            break;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next();

        match (command, arg) {
            ("show", Some(id)) => {
                controller.dispatch(Msg::Panel(PanelMsg::Show(PanelId::from(id))))
            }
            ("hide", Some(id)) => {
                controller.dispatch(Msg::Panel(PanelMsg::Hide(PanelId::from(id))))
            }
            ("toggle", Some(id)) => controller.toggle_panel(PanelId::from(id)),
            ("seek", Some(addr)) => match parse_address(addr) {
                Some(address) => controller.dispatch(Msg::Cursor(CursorMsg::Set(address))),
                None => println!("bad address: {}", addr),
            },
            ("back", _) => controller.dispatch(Msg::Cursor(CursorMsg::Back)),
            ("forward", _) => controller.dispatch(Msg::Cursor(CursorMsg::Forward)),
            ("lock", _) => controller.dispatch(Msg::Layout(LayoutMsg::LockUnlock(true))),
            ("unlock", _) => controller.dispatch(Msg::Layout(LayoutMsg::LockUnlock(false))),
            ("defaults", _) => controller.dispatch(Msg::Layout(LayoutMsg::ShowDefaults)),
            ("hideall", _) => controller.dispatch(Msg::Layout(LayoutMsg::HideAll)),
            ("reset", _) => controller.reset_layout(),
            ("refresh", _) => controller.dispatch(Msg::App(binsight::messages::AppMsg::RefreshPanels)),
            ("tabs", arg) => controller.dispatch(Msg::Layout(LayoutMsg::ToggleTabs(
                arg != Some("off"),
            ))),
            ("resize", Some(spec)) => match parse_size(spec) {
                Some((w, h)) => controller.window_resized(w, h),
                None => println!("bad size: {} (expected WxH)", spec),
            },
            ("save", Some(name)) => {
                controller.save_project_as(name, false);
                note_recent(recent, controller);
            }
            ("load", Some(name)) => {
                controller.open_project(name);
                note_recent(recent, controller);
            }
            ("open", Some(path)) => {
                controller.open_new_file(path.into(), controller.model().config.analysis_level)
            }
            ("panels", _) => {
                for (id, visible) in controller
                    .model()
                    .layout
                    .checklist(&controller.model().registry)
                {
                    println!("[{}] {}", if visible { "x" } else { " " }, id);
                }
                continue;
            }
            ("quit", _) => controller.request_quit(),
            ("discard", _) => controller.answer_discard(true),
            ("cancel", _) => controller.answer_discard(false),
            _ => {
                println!(
                    "commands: show/hide/toggle <panel>, seek <addr>, back, forward, \
                     lock, unlock, defaults, hideall, reset, refresh, tabs [off], \
                     resize WxH, save/load <name>, open <file>, panels, quit"
                );
                continue;
            }
        }

        print_summary(controller);
    }

    if let Err(e) = recent.save() {
        tracing::warn!("could not save recent projects: {}", e);
    }
    Ok(())
}

fn note_recent(recent: &mut RecentProjects, controller: &WindowController) {
    if let Some(session) = &controller.model().session {
        if let Some(name) = &session.project_name {
            recent.add(name, session.source_file.clone());
        }
    }
}

fn print_summary(controller: &WindowController) {
    println!("{}", controller.model().title());
    if let Some(status) = controller.status() {
        println!("status: {}", status);
    }
    if let Some(PendingPrompt::ConfirmDiscard { reason }) = controller.pending_prompt() {
        println!("save failed ({}); type 'discard' or 'cancel'", reason);
    }
    let cursor = &controller.model().cursor;
    if cursor.is_valid() {
        println!("cursor: {:#x}", cursor.address());
    }
}

fn parse_address(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

fn parse_size(spec: &str) -> Option<(u32, u32)> {
    let (w, h) = spec.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}
