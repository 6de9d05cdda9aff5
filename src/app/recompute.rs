//! Abgeleiteter Zustand: sichtbares Set, Selektions-/Modus-Abgleich, Laufzeitstatus.
//!
//! Läuft pro Tick höchstens einmal (im Commit des Hubs) und beim Bootstrap.

use std::sync::Arc;

use super::events::HubEvent;
use super::session::ViewerSession;
use super::state::{MicroBlockReason, RuntimeStatus, SharedState, ViewerMode};
use crate::core::{compute_micro_state, compute_visible_set, SceneIndex, VisibleSet};

/// Grund, warum der Mikro-Modus für die aktuelle Selektion nicht möglich ist.
fn micro_block_reason(state: &SharedState, visible: &VisibleSet) -> Option<MicroBlockReason> {
    if state.runtime.is_frame_playing {
        return Some(MicroBlockReason::FramePlaying);
    }
    if state.runtime.is_camera_auto {
        return Some(MicroBlockReason::CameraAuto);
    }
    let Some(selection) = &state.selection else {
        return Some(MicroBlockReason::NoSelection);
    };
    if !visible.contains(&selection.uuid) {
        return Some(MicroBlockReason::SelectionHidden);
    }
    None
}

/// Berechnet das sichtbare Set neu und gleicht Selektion, Modus und Status ab.
pub fn recompute_derived_state(session: &mut ViewerSession, reason: &str) -> Arc<VisibleSet> {
    session.recompute_count += 1;
    let ViewerSession {
        state,
        scene,
        options,
        outbox,
        ..
    } = session;
    let scene: &SceneIndex = scene;

    state.filters.normalize();
    state.frame.current = state.frame.range.clamp(state.frame.current);
    let visible = Arc::new(compute_visible_set(
        scene,
        state.frame.current,
        &state.filters,
    ));
    state.visible_set = Some(Arc::clone(&visible));

    // Selektion muss auflösbar (und ggf. sichtbar) bleiben
    if let Some(selection) = &state.selection {
        let gone = !scene.exists_uuid(&selection.uuid);
        let hidden = options.drop_hidden_selection && !visible.contains(&selection.uuid);
        if gone || hidden {
            log::debug!("Selektion '{}' verworfen (nicht sichtbar)", selection.uuid);
            state.selection = None;
            outbox.push(HubEvent::HighlightsCleared);
        }
    }

    let requested = state.mode;
    let mut blocked = micro_block_reason(state, &visible);
    if requested == ViewerMode::Micro {
        if blocked.is_none() {
            let focus = state.selection.as_ref().map(|s| s.uuid.clone());
            let stale = match (&state.micro_state, &focus) {
                (Some(micro), Some(uuid)) => micro.focus_uuid != *uuid,
                _ => true,
            };
            if stale {
                state.micro_state = focus.and_then(|uuid| compute_micro_state(scene, &uuid));
            }
            if state.micro_state.is_none() {
                blocked = Some(MicroBlockReason::NoMicroState);
            }
        }

        if let Some(reason) = blocked {
            log::debug!("Mikro-Modus verlassen: {:?}", reason);
            state.mode = ViewerMode::Macro;
            state.micro_state = None;
            outbox.push(HubEvent::ModeChanged {
                from: ViewerMode::Micro,
                to: ViewerMode::Macro,
            });
        } else if state
            .micro_state
            .as_ref()
            .is_some_and(|micro| micro.focus_position.is_none())
        {
            blocked = Some(MicroBlockReason::NoFocusPosition);
        }
    } else {
        state.micro_state = None;
    }

    state.runtime.status = RuntimeStatus {
        requested_mode: requested,
        effective_mode: state.mode,
        micro_blocked_by: blocked,
        frame: state.frame.current,
        playing: state.runtime.is_frame_playing,
    };

    outbox.push(HubEvent::Committed {
        frame: state.frame.current,
        mode: state.mode,
        selection: state.selection.clone(),
        reason: reason.to_string(),
    });
    visible
}
