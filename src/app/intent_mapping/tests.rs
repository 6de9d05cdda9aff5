use crate::app::events::{CameraDelta, HubCommand, OrbitKey, ViewerIntent};
use crate::app::state::{FrameState, PlaybackState, Selection, SharedState, ViewerMode};
use crate::core::{CameraState, FrameRange, ItemKind};
use crate::shared::ViewerOptions;

use super::map_intent_to_commands;

fn state() -> SharedState {
    SharedState::new(
        FrameState::new(FrameRange::new(0, 10), PlaybackState::new(1.0, false)),
        CameraState::default(),
    )
}

#[test]
fn wheel_scroll_maps_to_single_zoom_delta() {
    let options = ViewerOptions::default();

    let commands = map_intent_to_commands(
        &state(),
        &options,
        ViewerIntent::WheelScrolled {
            delta_y: 100.0,
            fast: false,
        },
    );

    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0],
        HubCommand::CameraDelta(CameraDelta::zoom(100.0 * options.pointer.wheel_zoom_speed))
    );
}

#[test]
fn zoom_in_key_shrinks_distance() {
    let commands = map_intent_to_commands(
        &state(),
        &ViewerOptions::default(),
        ViewerIntent::ZoomKeyPressed { zoom_in: true },
    );

    assert!(matches!(
        commands[0],
        HubCommand::CameraDelta(CameraDelta { zoom, .. }) if zoom < 0.0
    ));
}

#[test]
fn orbit_keys_move_in_opposite_directions() {
    let options = ViewerOptions::default();
    let left = map_intent_to_commands(
        &state(),
        &options,
        ViewerIntent::OrbitKeyPressed {
            key: OrbitKey::Left,
            fast: false,
        },
    );
    let right = map_intent_to_commands(
        &state(),
        &options,
        ViewerIntent::OrbitKeyPressed {
            key: OrbitKey::Right,
            fast: false,
        },
    );

    let (HubCommand::CameraDelta(l), HubCommand::CameraDelta(r)) = (&left[0], &right[0]) else {
        panic!("erwartet Kamera-Deltas");
    };
    assert_eq!(l.d_theta, -r.d_theta);
    assert_eq!(l.d_theta, options.keyboard.orbit_step);
}

#[test]
fn view_cycle_wraps_through_preset_command() {
    let mut state = state();
    state.view_preset_index = 6;

    let commands = map_intent_to_commands(
        &state,
        &ViewerOptions::default(),
        ViewerIntent::ViewCycleRequested { forward: true },
    );

    assert!(matches!(
        commands[0],
        HubCommand::SetViewPreset { index: 7, .. }
    ));
}

#[test]
fn focus_selection_without_selection_is_empty() {
    let commands = map_intent_to_commands(
        &state(),
        &ViewerOptions::default(),
        ViewerIntent::FocusSelectionRequested,
    );

    assert!(commands.is_empty());
}

#[test]
fn focus_selection_requests_micro_mode() {
    let mut state = state();
    state.selection = Some(Selection::new("p0", ItemKind::Point));

    let commands = map_intent_to_commands(
        &state,
        &ViewerOptions::default(),
        ViewerIntent::FocusSelectionRequested,
    );

    assert_eq!(
        commands,
        vec![HubCommand::SetMode {
            mode: ViewerMode::Micro,
            uuid: Some("p0".into()),
            kind: None,
        }]
    );
}

#[test]
fn playback_toggle_follows_runtime_flag() {
    let mut state = state();
    let options = ViewerOptions::default();

    let start = map_intent_to_commands(&state, &options, ViewerIntent::PlaybackToggled);
    assert!(matches!(start[0], HubCommand::StartPlayback { .. }));

    state.runtime.is_frame_playing = true;
    let stop = map_intent_to_commands(&state, &options, ViewerIntent::PlaybackToggled);
    assert_eq!(stop, vec![HubCommand::StopPlayback]);
}

#[test]
fn click_into_void_clears_selection() {
    let commands = map_intent_to_commands(
        &state(),
        &ViewerOptions::default(),
        ViewerIntent::ItemClicked { uuid: None },
    );

    assert_eq!(commands, vec![HubCommand::ClearSelection]);
}

#[test]
fn filter_toggles_invert_current_state() {
    let state = state();
    let options = ViewerOptions::default();

    let types = map_intent_to_commands(
        &state,
        &options,
        ViewerIntent::TypeFilterToggled {
            kind: ItemKind::Line,
        },
    );
    assert_eq!(
        types,
        vec![HubCommand::SetTypeFilter {
            kind: ItemKind::Line,
            enabled: false,
        }]
    );

    let aux = map_intent_to_commands(
        &state,
        &options,
        ViewerIntent::AuxModuleToggled {
            name: "grid".into(),
        },
    );
    assert_eq!(
        aux,
        vec![HubCommand::SetAuxModule {
            name: "grid".into(),
            enabled: true,
        }]
    );
}
