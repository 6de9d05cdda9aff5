//! Integrationstests für den Hub: Queue-Semantik, Tick-Protokoll,
//! Moduswechsel, Wiedergabe und Renderer-Übergabe.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use approx::assert_relative_eq;
use glam::DVec2;
use scene_viewer_hub::core::{
    CameraStatePatch, MicroState, SceneIndex, Selection, VisibleSet, PRESET_SEQUENCE,
};
use scene_viewer_hub::{
    CameraDelta, CameraState, ClockMode, Hub, HubCommand, HubEvent, ItemKind, PickHit, Renderer,
    ViewerIntent, ViewerMode, ViewerOptions,
};

const SCENE: &str = r#"{
    "points": [
        {"meta": {"uuid": "p0"}, "appearance": {"position": [0, 0, 0], "frames": [0, 1, 2]}},
        {"meta": {"uuid": "p1"}, "appearance": {"position": [2, 0, 0], "frames": [1]}},
        {"meta": {"uuid": "p2"}, "appearance": {"position": [0, 2, 0]}}
    ],
    "lines": [
        {"meta": {"uuid": "l0"}, "end_a": {"ref": "p0"}, "end_b": {"ref": "p2"}}
    ],
    "aux": [
        {"meta": {"uuid": "g0"}, "appearance": {"position": [0, 0, 0], "module": "grid"}}
    ]
}"#;

/// Aufzeichnung aller Renderer-Aufrufe.
#[derive(Default)]
struct Recording {
    camera_updates: usize,
    frames: Vec<i64>,
    micro_fx: Vec<Option<String>>,
    selections: Vec<Option<String>>,
    highlights: Vec<String>,
    highlight_clears: usize,
    pick: Option<PickHit>,
    disposed: bool,
}

struct RecordingRenderer(Rc<RefCell<Recording>>);

impl Renderer for RecordingRenderer {
    fn update_camera(&mut self, _camera: &CameraState) {
        self.0.borrow_mut().camera_updates += 1;
    }

    fn apply_frame(&mut self, visible: &VisibleSet) {
        self.0.borrow_mut().frames.push(visible.frame);
    }

    fn apply_micro_fx(
        &mut self,
        micro: Option<&MicroState>,
        _camera: &CameraState,
        _visible: &VisibleSet,
    ) {
        self.0
            .borrow_mut()
            .micro_fx
            .push(micro.map(|m| m.focus_uuid.clone()));
    }

    fn apply_selection(
        &mut self,
        selection: Option<&Selection>,
        _camera: &CameraState,
        _visible: &VisibleSet,
    ) {
        self.0
            .borrow_mut()
            .selections
            .push(selection.map(|s| s.uuid.clone()));
    }

    fn pick_object_at(&mut self, _ndc: DVec2) -> Option<PickHit> {
        self.0.borrow().pick.clone()
    }

    fn set_highlight(&mut self, uuid: &str) {
        self.0.borrow_mut().highlights.push(uuid.to_string());
    }

    fn clear_all_highlights(&mut self) {
        self.0.borrow_mut().highlight_clears += 1;
    }

    fn dispose(&mut self) {
        self.0.borrow_mut().disposed = true;
    }
}

fn hub_with(options: ViewerOptions) -> (Hub, Rc<RefCell<Recording>>) {
    let recording = Rc::new(RefCell::new(Recording::default()));
    let scene = SceneIndex::from_json_str(SCENE).expect("Testszene sollte parsen");
    let mut hub = Hub::new(
        Arc::new(scene),
        options,
        Box::new(RecordingRenderer(Rc::clone(&recording))),
    );
    hub.start();
    hub.tick(0.0);
    (hub, recording)
}

fn hub() -> (Hub, Rc<RefCell<Recording>>) {
    hub_with(ViewerOptions::default())
}

fn without_inertia() -> ViewerOptions {
    ViewerOptions {
        damping_factor: 0.0,
        ..ViewerOptions::default()
    }
}

fn set_distance(hub: &mut Hub, distance: f64) {
    hub.enqueue(HubCommand::SetCameraState {
        patch: CameraStatePatch {
            distance: Some(distance),
            ..CameraStatePatch::default()
        },
    });
    hub.tick(0.0);
}

fn record_events(hub: &mut Hub) -> Rc<RefCell<Vec<HubEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    hub.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

// ── Queue & Kamera ─────────────────────────────────────────────────

#[test]
fn test_zoom_deltas_in_one_tick_are_summed() {
    let (mut hub, _) = hub_with(without_inertia());
    set_distance(&mut hub, 10.0);

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::zoom(0.1)));
    hub.enqueue(HubCommand::CameraDelta(CameraDelta::zoom(0.1)));
    hub.tick(1.0 / 60.0);

    assert_relative_eq!(hub.state().camera.distance, 12.0, epsilon = 1e-9);
}

#[test]
fn test_many_rotate_deltas_equal_one_aggregate() {
    let (mut hub, _) = hub_with(without_inertia());
    let before = hub.state().camera.theta;

    for _ in 0..10 {
        hub.enqueue(HubCommand::CameraDelta(CameraDelta::rotate(0.01, 0.0)));
    }
    assert_eq!(hub.pending_commands(), 1);
    hub.tick(1.0 / 60.0);

    assert_relative_eq!(hub.state().camera.theta, before + 0.1, epsilon = 1e-9);
}

#[test]
fn test_jump_discards_pending_deltas() {
    let (mut hub, _) = hub_with(without_inertia());

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::zoom(0.5)));
    hub.enqueue(HubCommand::CameraDelta(CameraDelta::rotate(1.0, 0.0)));
    hub.enqueue(HubCommand::SetViewPreset {
        index: 0,
        options: Default::default(),
    });
    let distance = hub.state().camera.distance;
    hub.tick(1.0 / 60.0);

    let angles = PRESET_SEQUENCE[0].angles();
    let camera = hub.state().camera;
    assert_relative_eq!(camera.theta, angles.theta, epsilon = 1e-9);
    assert_relative_eq!(camera.phi, angles.phi, epsilon = 1e-9);
    assert_relative_eq!(camera.distance, distance, epsilon = 1e-9);
}

#[test]
fn test_jump_discards_inertia() {
    let (mut hub, _) = hub();
    set_distance(&mut hub, 10.0);

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::zoom(0.1)));
    hub.tick(1.0 / 60.0);
    assert_relative_eq!(hub.state().camera.distance, 11.0, epsilon = 1e-9);

    set_distance(&mut hub, 10.0);
    hub.tick(1.0 / 60.0);
    hub.tick(1.0 / 60.0);
    assert_relative_eq!(hub.state().camera.distance, 10.0, epsilon = 1e-9);
}

#[test]
fn test_inertia_keeps_moving_after_input_stops() {
    let (mut hub, _) = hub();
    set_distance(&mut hub, 10.0);

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::zoom(0.1)));
    hub.tick(1.0 / 60.0);
    let after_first = hub.state().camera.distance;
    hub.tick(1.0 / 60.0);

    assert!(hub.state().camera.distance > after_first);
}

#[test]
fn test_view_preset_wraps_euclidean() {
    let (mut hub, _) = hub();

    hub.set_view_preset(-1);
    hub.tick(0.0);
    assert_eq!(hub.state().view_preset_index, 6);

    hub.set_view_preset(9);
    hub.tick(0.0);
    assert_eq!(hub.state().view_preset_index, 2);
}

#[test]
fn test_unknown_view_name_does_not_abort_queue() {
    let (mut hub, _) = hub();

    hub.enqueue(HubCommand::SetViewByName {
        name: "nirgendwo".into(),
    });
    hub.enqueue(HubCommand::StepFrame { delta: 1 });
    hub.tick(0.0);

    assert_eq!(hub.state().frame.current, 1);
    assert_eq!(hub.command_log().failures(), 1);
    assert_eq!(hub.command_log().len(), 2);
}

// ── Commit-Protokoll ───────────────────────────────────────────────

#[test]
fn test_single_recompute_per_tick() {
    let (mut hub, _) = hub();
    let events = record_events(&mut hub);
    let before = hub.recompute_count();

    hub.enqueue(HubCommand::StepFrame { delta: 1 });
    hub.enqueue(HubCommand::SetTypeFilter {
        kind: ItemKind::Line,
        enabled: false,
    });
    hub.select("p0");
    hub.enqueue(HubCommand::SetAuxModule {
        name: "grid".into(),
        enabled: true,
    });
    hub.enqueue(HubCommand::RequestRecompute {
        reason: "test".into(),
    });
    hub.tick(1.0 / 60.0);

    assert_eq!(hub.recompute_count(), before + 1);
    let commits: Vec<String> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            HubEvent::Committed { reason, .. } => Some(reason.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(commits, vec!["frame.changed(+4)".to_string()]);
}

#[test]
fn test_camera_only_tick_skips_recompute() {
    let (mut hub, recording) = hub();
    let before = hub.recompute_count();
    let frames_before = recording.borrow().frames.len();

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::rotate(0.2, 0.0)));
    hub.tick(1.0 / 60.0);

    assert_eq!(hub.recompute_count(), before);
    assert_eq!(recording.borrow().frames.len(), frames_before + 1);
}

#[test]
fn test_aux_module_without_name_fails() {
    let (mut hub, _) = hub();
    hub.enqueue(HubCommand::SetAuxModule {
        name: "   ".into(),
        enabled: true,
    });
    hub.tick(0.0);

    assert_eq!(hub.command_log().failures(), 1);
}

// ── Frames & Wiedergabe ────────────────────────────────────────────

#[test]
fn test_active_frame_is_clamped() {
    let (mut hub, _) = hub();

    hub.set_active_frame(42.0);
    hub.tick(0.0);
    assert_eq!(hub.state().frame.current, 2);

    hub.set_active_frame(-3.0);
    hub.tick(0.0);
    assert_eq!(hub.state().frame.current, 0);
}

#[test]
fn test_playback_auto_stops_at_range_end() {
    let (mut hub, _) = hub();
    let events = record_events(&mut hub);

    hub.enqueue(HubCommand::StartPlayback {
        fps: Some(5.0),
        loop_playback: Some(false),
    });
    for _ in 0..20 {
        hub.tick(0.2);
        if !hub.state().runtime.is_frame_playing {
            break;
        }
    }

    assert!(!hub.state().runtime.is_frame_playing);
    assert_eq!(hub.state().frame.current, 2);
    assert!(events
        .borrow()
        .contains(&HubEvent::PlaybackStopped { frame: 2 }));
}

#[test]
fn test_frame_change_updates_visible_set() {
    let (mut hub, recording) = hub();
    assert!(!hub.is_visible("p1"));

    hub.set_active_frame(1.0);
    hub.tick(0.0);

    assert!(hub.is_visible("p1"));
    assert_eq!(recording.borrow().frames.last(), Some(&1));
}

// ── Selektion & Modus ──────────────────────────────────────────────

#[test]
fn test_invalid_selection_clears() {
    let (mut hub, _) = hub();

    hub.select("p0");
    hub.tick(0.0);
    assert_eq!(hub.selection().map(|s| s.kind), Some(ItemKind::Point));

    hub.select("gibt-es-nicht");
    hub.tick(0.0);
    assert!(hub.selection().is_none());
}

#[test]
fn test_macro_selection_reaches_renderer() {
    let (mut hub, recording) = hub();

    hub.select("p0");
    hub.tick(0.0);

    let recording = recording.borrow();
    assert_eq!(recording.highlights, vec!["p0".to_string()]);
    assert_eq!(recording.selections.last(), Some(&Some("p0".to_string())));
}

#[test]
fn test_micro_rejected_while_playing() {
    let (mut hub, _) = hub();
    hub.select("p0");
    hub.start_playback();
    hub.tick(0.0);

    assert!(!hub.can_enter("p0"));
    hub.set_mode(ViewerMode::Micro, Some("p0"));
    hub.tick(0.0);

    assert_eq!(hub.mode(), ViewerMode::Macro);
    assert!(hub.state().micro_state.is_none());
}

#[test]
fn test_micro_session_end_to_end() {
    let (mut hub, recording) = hub();
    let events = record_events(&mut hub);

    hub.select("p0");
    hub.set_mode(ViewerMode::Micro, None);
    hub.tick(1.0 / 60.0);

    assert_eq!(hub.mode(), ViewerMode::Micro);
    let micro = hub.state().micro_state.as_ref().expect("Mikro-Zustand");
    assert_eq!(micro.focus_uuid, "p0");
    assert!(micro.related_uuids.iter().any(|uuid| uuid == "l0"));
    {
        let recording = recording.borrow();
        assert_eq!(recording.micro_fx.last(), Some(&Some("p0".to_string())));
        assert_eq!(recording.selections.last(), Some(&None));
    }

    hub.start_playback();
    hub.tick(1.0 / 60.0);

    assert_eq!(hub.mode(), ViewerMode::Macro);
    assert!(hub.state().micro_state.is_none());
    assert_eq!(hub.state().runtime.status.effective_mode, ViewerMode::Macro);
    assert!(events.borrow().contains(&HubEvent::ModeChanged {
        from: ViewerMode::Micro,
        to: ViewerMode::Macro,
    }));

    hub.stop_playback();
    hub.tick(1.0 / 60.0);
    assert!(hub.can_enter("p0"));
}

fn tick_for(hub: &mut Hub, ticks: usize) {
    for _ in 0..ticks {
        hub.tick(1.0 / 60.0);
    }
}

#[test]
fn test_drag_inertia_does_not_stop_micro_entry_transition() {
    let (mut hub, _) = hub();
    hub.select("p0");
    hub.enqueue(HubCommand::CameraDelta(CameraDelta::rotate(0.02, 0.0)));
    tick_for(&mut hub, 11);

    hub.set_mode(ViewerMode::Micro, None);
    tick_for(&mut hub, 60);

    assert_eq!(hub.mode(), ViewerMode::Micro);
    let target = hub.state().camera.target;
    assert_relative_eq!(target.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(target.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(target.z, 0.0, epsilon = 1e-9);
}

#[test]
fn test_drag_inertia_does_not_stop_macro_restore() {
    let (mut hub, _) = hub();
    hub.select("p0");
    tick_for(&mut hub, 1);
    let macro_pose = hub.state().camera;

    hub.set_mode(ViewerMode::Micro, None);
    tick_for(&mut hub, 30);
    assert_relative_eq!(hub.state().camera.target.x, 0.0, epsilon = 1e-9);

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::rotate(0.02, 0.0)));
    tick_for(&mut hub, 3);
    hub.set_mode(ViewerMode::Macro, None);
    tick_for(&mut hub, 60);

    assert_eq!(hub.mode(), ViewerMode::Macro);
    let camera = hub.state().camera;
    assert_relative_eq!(camera.theta, macro_pose.theta, epsilon = 1e-9);
    assert_relative_eq!(camera.phi, macro_pose.phi, epsilon = 1e-9);
    assert_relative_eq!(camera.distance, macro_pose.distance, epsilon = 1e-9);
    assert_relative_eq!(camera.target.x, macro_pose.target.x, epsilon = 1e-9);
    assert_relative_eq!(camera.target.y, macro_pose.target.y, epsilon = 1e-9);
}

#[test]
fn test_new_drag_cancels_running_transition() {
    let (mut hub, _) = hub_with(without_inertia());
    hub.select("p0");
    tick_for(&mut hub, 1);

    hub.set_mode(ViewerMode::Micro, None);
    tick_for(&mut hub, 2);
    hub.enqueue(HubCommand::CameraDelta(CameraDelta::pan(0.5, 0.0)));
    tick_for(&mut hub, 1);
    let after_drag = hub.state().camera;
    tick_for(&mut hub, 30);

    assert_eq!(hub.state().camera, after_drag);
}

#[test]
fn test_hidden_selection_forces_macro() {
    let (mut hub, _) = hub();
    hub.select("p2");
    hub.set_mode(ViewerMode::Micro, None);
    hub.tick(0.0);
    assert_eq!(hub.mode(), ViewerMode::Micro);

    hub.set_type_filter(ItemKind::Point, false);
    hub.tick(0.0);

    assert_eq!(hub.mode(), ViewerMode::Macro);
    assert!(hub.selection().is_none());
}

#[test]
fn test_auto_orbit_forces_macro_and_stops_on_manual_input() {
    let (mut hub, _) = hub_with(without_inertia());
    hub.select("p0");
    hub.set_mode(ViewerMode::Micro, None);
    hub.tick(0.0);

    hub.start_auto_orbit();
    hub.tick(0.0);
    assert_eq!(hub.mode(), ViewerMode::Macro);
    assert!(hub.state().runtime.is_camera_auto);

    let theta = hub.state().camera.theta;
    hub.tick(0.1);
    assert!(hub.state().camera.theta != theta);

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::pan(0.1, 0.0)));
    hub.tick(0.0);
    assert!(!hub.state().runtime.is_camera_auto);
}

// ── Lebenszyklus ───────────────────────────────────────────────────

#[test]
fn test_disposed_hub_rejects_commands() {
    let (mut hub, recording) = hub();
    let events = record_events(&mut hub);

    hub.dispose();
    hub.dispose();

    assert!(!hub.enqueue(HubCommand::StepFrame { delta: 1 }));
    assert!(hub.tick(0.016).is_none());
    assert!(recording.borrow().disposed);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_stopped_hub_keeps_queue() {
    let (mut hub, _) = hub();
    hub.stop();
    hub.enqueue(HubCommand::StepFrame { delta: 1 });
    assert!(hub.tick(0.016).is_none());

    hub.start();
    hub.tick(0.0);
    assert_eq!(hub.state().frame.current, 1);
}

#[test]
fn test_pick_is_filtered_by_visibility() {
    let (mut hub, recording) = hub();
    recording.borrow_mut().pick = Some(PickHit {
        uuid: "p1".into(),
        kind: None,
    });

    assert!(hub.pick_object_at(DVec2::ZERO).is_none());

    hub.set_active_frame(1.0);
    hub.tick(0.0);
    assert_eq!(
        hub.pick_object_at(DVec2::ZERO).map(|hit| hit.uuid),
        Some("p1".to_string())
    );
}

#[test]
fn test_unsubscribed_listener_receives_nothing() {
    let (mut hub, _) = hub();
    let events = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&events);
    let id = hub.subscribe(move |_| *sink.borrow_mut() += 1);
    assert!(hub.unsubscribe(id));

    hub.select("p0");
    hub.tick(0.0);
    assert_eq!(*events.borrow(), 0);
}

#[test]
fn test_immediate_clock_commits_on_enqueue() {
    let recording = Rc::new(RefCell::new(Recording::default()));
    let mut hub = Hub::from_scene_json(
        SCENE,
        ViewerOptions::default(),
        Box::new(RecordingRenderer(Rc::clone(&recording))),
    )
    .expect("Hub sollte starten")
    .with_clock(ClockMode::Immediate);
    hub.start();
    set_distance(&mut hub, 10.0);

    hub.set_active_frame(1.0);
    assert_eq!(hub.state().frame.current, 1);

    hub.enqueue(HubCommand::CameraDelta(CameraDelta::zoom(0.1)));
    assert_relative_eq!(hub.state().camera.distance, 11.0, epsilon = 1e-9);

    hub.select("p0");
    hub.set_mode(ViewerMode::Micro, None);
    assert_eq!(hub.mode(), ViewerMode::Micro);
    assert_relative_eq!(hub.state().camera.target.x, 0.0);
}

#[test]
fn test_wheel_intent_zooms_out() {
    let (mut hub, _) = hub_with(without_inertia());
    set_distance(&mut hub, 10.0);

    assert!(hub.handle_intent(ViewerIntent::WheelScrolled {
        delta_y: 100.0,
        fast: false,
    }));
    hub.tick(0.0);

    assert!(hub.state().camera.distance > 10.0);
}
