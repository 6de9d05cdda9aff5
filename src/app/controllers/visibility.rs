use crate::app::state::SharedState;
use crate::core::{Filters, ItemKind};

/// Normalisiert Filter und beantwortet "ist UUID sichtbar" gegen das
/// zuletzt committete sichtbare Set.
///
/// Berechnet das Set nie selbst; das passiert im Commit des Hubs.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityController;

impl VisibilityController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Kanonische Kopie der Filter.
    pub fn filters(&self, state: &SharedState) -> Filters {
        let mut filters = state.filters.clone();
        filters.normalize();
        filters
    }

    /// Setzt einen Typ-Filter. Gibt `true` zurück, wenn sich etwas geändert hat.
    pub fn set_type_filter(&self, state: &mut SharedState, kind: ItemKind, enabled: bool) -> bool {
        let changed = state.filters.set_type(kind, enabled);
        state.filters.normalize();
        if changed {
            state.request_recompute("filters.setTypeEnabled");
        }
        changed
    }

    /// Setzt ein Aux-Modul. Leere Namen sind ein Fehler.
    pub fn set_aux_module(
        &self,
        state: &mut SharedState,
        name: &str,
        enabled: bool,
    ) -> anyhow::Result<bool> {
        let changed = state
            .filters
            .set_aux_module(name, enabled)
            .ok_or_else(|| anyhow::anyhow!("Aux-Modul ohne Namen"))?;
        state.filters.normalize();
        if changed {
            state.request_recompute("filters.setAuxModule");
        }
        Ok(changed)
    }

    /// Sichtbarkeit gegen das committete Set. Ohne Set: `true` (fail-open).
    pub fn is_visible(&self, state: &SharedState, uuid: &str) -> bool {
        match &state.visible_set {
            Some(set) => set.contains(uuid.trim()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{FrameState, PlaybackState};
    use crate::core::{CameraState, FrameRange, VisibleSet};
    use std::sync::Arc;

    fn state() -> SharedState {
        SharedState::new(
            FrameState::new(FrameRange::default(), PlaybackState::new(1.0, false)),
            CameraState::default(),
        )
    }

    #[test]
    fn test_is_visible_fails_open_without_visible_set() {
        let mut state = state();
        let controller = VisibilityController::new();
        assert!(controller.is_visible(&state, "anything"));

        let mut set = VisibleSet::empty(0);
        set.points.insert("p0".to_string());
        state.visible_set = Some(Arc::new(set));
        assert!(controller.is_visible(&state, "p0"));
        assert!(!controller.is_visible(&state, "anything"));
    }

    #[test]
    fn test_filter_changes_request_recompute_only_when_changed() {
        let mut state = state();
        let controller = VisibilityController::new();
        assert!(!controller.set_type_filter(&mut state, ItemKind::Line, true));
        assert!(!state.is_dirty());
        assert!(controller.set_type_filter(&mut state, ItemKind::Line, false));
        assert!(state.is_dirty());
        assert!(!controller.filters(&state).types.lines);
    }

    #[test]
    fn test_blank_aux_module_is_rejected() {
        let mut state = state();
        let controller = VisibilityController::new();
        assert!(controller.set_aux_module(&mut state, "  ", true).is_err());
        assert!(controller
            .set_aux_module(&mut state, "grid", true)
            .expect("Name ist gültig"));
        assert!(controller.filters(&state).aux_module("grid"));
    }
}
