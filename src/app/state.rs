//! Shared State — zentrale Datenhaltung einer Viewer-Session.
//!
//! Wird ausschließlich während des Hub-Ticks über die Controller mutiert.
//! Die UI liest nur den zuletzt committeten Zustand.

mod frame;
mod runtime;

pub use frame::{FrameState, PlaybackState};
pub use runtime::{MicroBlockReason, RuntimeFlags, RuntimeStatus, ViewerMode};
pub use crate::core::Selection;

use std::sync::Arc;

use crate::core::{CameraState, Filters, MicroState, VisibleSet};

/// Angeforderte Neuberechnung des sichtbaren Sets samt Gründen.
#[derive(Debug, Clone, Default)]
struct CommitRequest {
    dirty: bool,
    reasons: Vec<String>,
}

/// Ein veränderlicher Datensatz pro Viewer-Session.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Frame-Position, Bereich und Wiedergabe
    pub frame: FrameState,
    /// Aktuelle Selektion (immer verifiziert oder `None`)
    pub selection: Option<Selection>,
    /// Zuletzt committete Kamera-Pose
    pub camera: CameraState,
    /// Zuletzt aufgelöster Preset-Slot
    pub view_preset_index: usize,
    /// Betrachtungsmodus
    pub mode: ViewerMode,
    /// Mikro-Zustand (nur im Mikro-Modus gesetzt)
    pub micro_state: Option<MicroState>,
    /// Kanonische Filter
    pub filters: Filters,
    /// Laufzeit-Flags und Status
    pub runtime: RuntimeFlags,
    /// Welt-Achsen im Renderer anzeigen
    pub world_axes_visible: bool,
    /// Abgeleitetes sichtbares Set (Arc für O(1)-Clone im Render-Snapshot)
    pub visible_set: Option<Arc<VisibleSet>>,
    commit: CommitRequest,
}

impl SharedState {
    /// Erstellt den Zustand beim Bootstrap.
    pub fn new(frame: FrameState, camera: CameraState) -> Self {
        Self {
            frame,
            selection: None,
            camera,
            view_preset_index: 0,
            mode: ViewerMode::Macro,
            micro_state: None,
            filters: Filters::default(),
            runtime: RuntimeFlags::default(),
            world_axes_visible: false,
            visible_set: None,
            commit: CommitRequest::default(),
        }
    }

    /// Markiert das sichtbare Set als veraltet. Berechnet wird erst im Commit.
    pub fn request_recompute(&mut self, reason: &str) {
        self.commit.dirty = true;
        self.commit.reasons.push(reason.to_string());
    }

    /// `true`, wenn eine Neuberechnung angefordert ist.
    pub fn is_dirty(&self) -> bool {
        self.commit.dirty
    }

    /// Entnimmt die angeforderte Neuberechnung samt Gründen und setzt das Flag zurück.
    pub(crate) fn take_commit_request(&mut self) -> Option<Vec<String>> {
        if !self.commit.dirty {
            return None;
        }
        self.commit.dirty = false;
        Some(std::mem::take(&mut self.commit.reasons))
    }

    /// UUID der aktuellen Selektion.
    pub fn selected_uuid(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.uuid.as_str())
    }

    /// `true` im Mikro-Modus.
    pub fn is_micro(&self) -> bool {
        self.mode == ViewerMode::Micro
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameRange;

    fn state() -> SharedState {
        SharedState::new(
            FrameState::new(FrameRange::new(2, 5), PlaybackState::new(1.0, false)),
            CameraState::default(),
        )
    }

    #[test]
    fn test_new_state_starts_at_range_min_in_macro() {
        let state = state();
        assert_eq!(state.frame.current, 2);
        assert_eq!(state.mode, ViewerMode::Macro);
        assert!(state.visible_set.is_none());
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_commit_request_collects_reasons_once() {
        let mut state = state();
        state.request_recompute("frame.step");
        state.request_recompute("filters.type");
        let reasons = state.take_commit_request().expect("Anforderung vorhanden");
        assert_eq!(reasons, vec!["frame.step", "filters.type"]);
        assert!(state.take_commit_request().is_none());
    }
}
