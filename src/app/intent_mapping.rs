//! Mapping von Viewer-Intents auf mutierende Hub-Commands.

use super::events::{CameraDelta, HubCommand, OrbitKey, ViewerIntent};
use super::state::{SharedState, ViewerMode};
use crate::core::{AutoOrbitOptions, PresetOptions};
use crate::shared::ViewerOptions;

/// Übersetzt einen `ViewerIntent` in eine Sequenz ausführbarer `HubCommand`s.
pub fn map_intent_to_commands(
    state: &SharedState,
    options: &ViewerOptions,
    intent: ViewerIntent,
) -> Vec<HubCommand> {
    let pointer = &options.pointer;
    let keyboard = &options.keyboard;

    match intent {
        ViewerIntent::OrbitDragged { dx_px, dy_px, fast } => {
            let speed = if fast {
                pointer.rotate_speed_fast
            } else {
                pointer.rotate_speed
            };
            vec![HubCommand::CameraDelta(CameraDelta::rotate(
                -dx_px * speed,
                -dy_px * speed,
            ))]
        }
        ViewerIntent::PanDragged { dx_px, dy_px, fast } => {
            let speed = if fast {
                pointer.pan_speed_fast
            } else {
                pointer.pan_speed
            };
            // Pan skaliert mit der Distanz, damit die Szene unter dem Zeiger bleibt
            let scale = speed * state.camera.distance;
            vec![HubCommand::CameraDelta(CameraDelta::pan(
                dx_px * scale,
                dy_px * scale,
            ))]
        }
        ViewerIntent::WheelScrolled { delta_y, fast } => {
            let speed = if fast {
                pointer.wheel_zoom_speed_fast
            } else {
                pointer.wheel_zoom_speed
            };
            vec![HubCommand::CameraDelta(CameraDelta::zoom(delta_y * speed))]
        }
        ViewerIntent::ItemClicked { uuid: Some(uuid) } => {
            vec![HubCommand::Select { uuid, kind: None }]
        }
        ViewerIntent::ItemClicked { uuid: None } => vec![HubCommand::ClearSelection],
        ViewerIntent::ItemDoubleClicked { uuid } => vec![HubCommand::FocusOn { uuid, kind: None }],

        ViewerIntent::OrbitKeyPressed { key, fast } => {
            let step = if fast {
                keyboard.orbit_step_fast
            } else {
                keyboard.orbit_step
            };
            let delta = match key {
                OrbitKey::Left => CameraDelta::rotate(step, 0.0),
                OrbitKey::Right => CameraDelta::rotate(-step, 0.0),
                OrbitKey::Up => CameraDelta::rotate(0.0, -step),
                OrbitKey::Down => CameraDelta::rotate(0.0, step),
            };
            vec![HubCommand::CameraDelta(delta)]
        }
        ViewerIntent::ZoomKeyPressed { zoom_in } => {
            let zoom = if zoom_in {
                -keyboard.zoom_step
            } else {
                keyboard.zoom_step
            };
            vec![HubCommand::CameraDelta(CameraDelta::zoom(zoom))]
        }
        ViewerIntent::ResetCameraRequested => vec![HubCommand::ResetCamera],
        ViewerIntent::FrameStepRequested { delta } => vec![HubCommand::StepFrame { delta }],
        ViewerIntent::PlaybackToggled => {
            if state.runtime.is_frame_playing {
                vec![HubCommand::StopPlayback]
            } else {
                vec![HubCommand::StartPlayback {
                    fps: None,
                    loop_playback: None,
                }]
            }
        }
        ViewerIntent::FocusSelectionRequested => match state.selected_uuid() {
            Some(uuid) => vec![HubCommand::SetMode {
                mode: ViewerMode::Micro,
                uuid: Some(uuid.to_string()),
                kind: None,
            }],
            None => Vec::new(),
        },
        ViewerIntent::ExitMicroRequested => {
            if state.mode == ViewerMode::Micro {
                vec![HubCommand::ExitMode]
            } else {
                Vec::new()
            }
        }

        ViewerIntent::ViewCycleRequested { forward } => {
            let step = if forward { 1 } else { -1 };
            vec![HubCommand::SetViewPreset {
                index: state.view_preset_index as i64 + step,
                options: PresetOptions::default(),
            }]
        }
        ViewerIntent::AxisSnapRequested { axis } => vec![HubCommand::SnapToAxis { axis }],
        ViewerIntent::NamedViewRequested { name } => vec![HubCommand::SetViewByName { name }],
        ViewerIntent::AutoOrbitToggled => {
            if state.runtime.is_camera_auto {
                vec![HubCommand::StopAutoOrbit]
            } else {
                vec![HubCommand::StartAutoOrbit {
                    options: AutoOrbitOptions::default(),
                }]
            }
        }
        ViewerIntent::TypeFilterToggled { kind } => vec![HubCommand::SetTypeFilter {
            kind,
            enabled: !state.filters.types.enabled(kind),
        }],
        ViewerIntent::AuxModuleToggled { name } => {
            let enabled = !state.filters.aux_module(&name);
            vec![HubCommand::SetAuxModule { name, enabled }]
        }
        ViewerIntent::WorldAxesToggled => vec![HubCommand::SetWorldAxesVisible {
            visible: !state.world_axes_visible,
        }],
    }
}

#[cfg(test)]
mod tests;
