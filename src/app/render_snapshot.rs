//! Baut den Render-Snapshot aus dem committeten Zustand.

use std::sync::Arc;

use super::state::SharedState;
use crate::core::VisibleSet;
use crate::shared::RenderSnapshot;

/// Erzeugt den Snapshot für den Renderer.
pub fn build(state: &SharedState) -> RenderSnapshot {
    let visible_set = state
        .visible_set
        .clone()
        .unwrap_or_else(|| Arc::new(VisibleSet::empty(state.frame.current)));
    let micro_active = state.is_micro();

    RenderSnapshot {
        camera: state.camera,
        frame: state.frame.current,
        visible_set,
        micro_active,
        micro_state: if micro_active {
            state.micro_state.clone()
        } else {
            None
        },
        selection: state.selection.clone(),
        world_axes_visible: state.world_axes_visible,
    }
}
