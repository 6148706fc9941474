//! Tests for project save/load and the quit flow

mod common;

use binsight::layout::LayoutState;
use binsight::messages::{Msg, PanelMsg};
use binsight::panel::PanelId;
use binsight::window::PendingPrompt;
use common::{sample_bin, test_controller, test_controller_with, ScriptedEngine, ENTRY_POINT};

fn open_sample(controller: &mut binsight::window::WindowController) {
    let level = controller.model().config.analysis_level;
    controller.open_new_file(sample_bin(), level);
    assert_eq!(controller.model().cursor.address(), ENTRY_POINT);
}

/// Write a project record the store would accept, bypassing `save`
fn write_record(dir: &std::path::Path, name: &str, body: &str) {
    std::fs::write(dir.join(format!("{}.json", name)), body).expect("write record");
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_save_then_load_restores_layout_and_cursor() {
    let (mut controller, _dir) = test_controller();
    open_sample(&mut controller);

    let strings = PanelId::from("strings");
    controller.dispatch(Msg::Panel(PanelMsg::Hide(strings.clone())));
    controller.set_cursor(0x40_2000);
    controller.save_project_as("demo", false);
    assert_eq!(controller.status(), Some("Project 'demo' saved"));

    // Drift away from the saved state.
    controller.dispatch(Msg::Panel(PanelMsg::Show(strings.clone())));
    controller.set_cursor(0x40_4000);

    controller.open_project("demo");
    assert!(!controller.model().registry.is_visible(&strings));
    assert_eq!(controller.model().cursor.address(), 0x40_2000);
    assert_eq!(controller.model().layout.state(), LayoutState::Custom);

    let session = controller.model().session.as_ref().expect("session");
    assert_eq!(session.project_name.as_deref(), Some("demo"));
    assert_eq!(session.source_file, sample_bin());
    assert_eq!(
        controller.status(),
        Some("Loaded project 'demo' (sample.bin)")
    );
}

#[test]
fn test_default_layout_round_trips_as_default() {
    let (mut controller, _dir) = test_controller();
    open_sample(&mut controller);
    controller.save_project_as("plain", false);
    controller.open_project("plain");
    assert_eq!(controller.model().layout.state(), LayoutState::Default);
}

#[test]
fn test_store_lists_saved_projects() {
    let (mut controller, dir) = test_controller();
    open_sample(&mut controller);
    controller.save_project_as("beta", false);
    controller.save_project_as("alpha", false);

    let store = binsight::session::SessionStore::new(dir.path().to_path_buf());
    assert_eq!(store.list(), vec!["alpha".to_string(), "beta".to_string()]);
}

// ============================================================================
// Snapshot tolerance
// ============================================================================

#[test]
fn test_unknown_panel_in_record_is_ignored() {
    let engine = ScriptedEngine::preloaded();
    engine.saved_projects.borrow_mut().push("weird".to_string());
    let (mut controller, dir) = test_controller_with(engine);

    write_record(
        dir.path(),
        "weird",
        r#"{
            "version": 1,
            "source_file": "sample.bin",
            "tabs_mode": false,
            "responsive": false,
            "layout": [
                {"id": "vintage-widget", "visible": true, "locked": false},
                {"id": "strings", "visible": false, "locked": false}
            ]
        }"#,
    );

    controller.open_project("weird");
    assert!(controller.model().session.is_some());
    assert!(!controller
        .model()
        .registry
        .is_visible(&PanelId::from("strings")));
    assert!(!controller
        .model()
        .registry
        .contains(&PanelId::from("vintage-widget")));
}

#[test]
fn test_panels_missing_from_record_take_defaults() {
    let engine = ScriptedEngine::preloaded();
    engine.saved_projects.borrow_mut().push("sparse".to_string());
    let (mut controller, dir) = test_controller_with(engine);

    // Only notepad is recorded; everything else reverts to its default.
    write_record(
        dir.path(),
        "sparse",
        r#"{
            "version": 1,
            "source_file": "sample.bin",
            "tabs_mode": false,
            "responsive": false,
            "layout": [
                {"id": "notepad", "visible": true, "locked": false}
            ]
        }"#,
    );

    controller.open_project("sparse");
    assert!(controller
        .model()
        .registry
        .is_visible(&PanelId::from("notepad")));
    for panel in controller.model().registry.iter() {
        if panel.id != PanelId::from("notepad") {
            assert_eq!(panel.visible, panel.default_visible, "{}", panel.id);
        }
    }
}

#[test]
fn test_all_panels_locked_restores_global_lock() {
    let (mut controller, _dir) = test_controller();
    open_sample(&mut controller);
    controller.dispatch(Msg::Layout(binsight::messages::LayoutMsg::LockUnlock(true)));
    controller.save_project_as("frozen", false);

    controller.dispatch(Msg::Layout(binsight::messages::LayoutMsg::LockUnlock(
        false,
    )));
    controller.open_project("frozen");
    assert!(controller.model().layout.is_locked());
    assert!(controller.model().registry.iter().all(|p| p.locked));
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn test_missing_project_leaves_session_untouched() {
    let (mut controller, _dir) = test_controller();
    open_sample(&mut controller);
    controller.set_cursor(0x40_2000);

    controller.open_project("no-such-project");

    let session = controller.model().session.as_ref().expect("session kept");
    assert_eq!(session.source_file, sample_bin());
    assert!(controller.model().cursor.is_valid());
    assert_eq!(controller.model().cursor.address(), 0x40_2000);
    let status = controller.status().expect("status");
    assert!(status.starts_with("Could not load project:"), "{}", status);
}

#[test]
fn test_engine_load_failure_leaves_session_untouched() {
    let mut engine = ScriptedEngine::new();
    engine.fail_load = true;
    let (mut controller, dir) = test_controller_with(engine);
    open_sample(&mut controller);
    controller.save_project_as("a", false);
    controller.set_cursor(0x40_3000);

    controller.open_project("a");

    let session = controller.model().session.as_ref().expect("session kept");
    assert_eq!(session.project_name.as_deref(), Some("a"));
    assert_eq!(controller.model().cursor.address(), 0x40_3000);
    assert!(dir.path().join("a.json").exists());
}

#[test]
fn test_save_failure_outside_quit_is_a_status() {
    let mut engine = ScriptedEngine::new();
    engine.fail_save = true;
    let (mut controller, _dir) = test_controller_with(engine);
    open_sample(&mut controller);

    controller.save_project_as("demo", false);
    assert_eq!(
        controller.status(),
        Some("Could not save project: scripted save failure")
    );
    assert!(controller.pending_prompt().is_none());
    assert!(!controller.should_quit());
    let session = controller.model().session.as_ref().expect("session");
    assert_eq!(session.project_name, None);
}

// ============================================================================
// Quit flow
// ============================================================================

#[test]
fn test_quit_without_session_exits_directly() {
    let (mut controller, _dir) = test_controller();
    controller.request_quit();
    assert!(controller.should_quit());
}

#[test]
fn test_quit_with_named_project_saves_and_exits() {
    let (mut controller, dir) = test_controller();
    open_sample(&mut controller);
    controller.save_project_as("demo", false);

    controller.request_quit();
    assert!(controller.should_quit());
    assert!(dir.path().join("demo.json").exists());
}

#[test]
fn test_failed_save_on_quit_asks_before_exiting() {
    let mut engine = ScriptedEngine::new();
    engine.fail_save = true;
    let (mut controller, _dir) = test_controller_with(engine);
    open_sample(&mut controller);

    controller.save_project_as("demo", true);
    assert!(!controller.should_quit());
    assert_eq!(
        controller.pending_prompt(),
        Some(&PendingPrompt::ConfirmDiscard {
            reason: "Could not save project: scripted save failure".to_string()
        })
    );

    controller.answer_discard(true);
    assert!(controller.should_quit());
}

#[test]
fn test_cancelling_discard_keeps_session_open() {
    let mut engine = ScriptedEngine::new();
    engine.fail_save = true;
    let (mut controller, _dir) = test_controller_with(engine);
    open_sample(&mut controller);

    controller.save_project_as("demo", true);
    assert!(controller.pending_prompt().is_some());

    controller.answer_discard(false);
    assert!(!controller.should_quit());
    assert!(controller.pending_prompt().is_none());
    assert!(controller.model().session.is_some());
    assert_eq!(controller.status(), Some("Close cancelled"));
}
