//! Render-Snapshot als expliziter Übergabevertrag zwischen Hub und Renderer.
//!
//! Lebt im shared-Modul, da `app` ihn baut und der Renderer ihn konsumiert.

use std::sync::Arc;

use crate::core::{CameraState, MicroState, Selection, VisibleSet};

/// Read-only Daten eines committeten Ticks.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    /// Kamera-Pose für diesen Frame
    pub camera: CameraState,
    /// Aktiver Frame
    pub frame: i64,
    /// Sichtbares Set (Arc für O(1)-Clone pro Tick)
    pub visible_set: Arc<VisibleSet>,
    /// `true` im Mikro-Modus
    pub micro_active: bool,
    /// Mikro-Zustand (nur im Mikro-Modus)
    pub micro_state: Option<MicroState>,
    /// Aktuelle Selektion
    pub selection: Option<Selection>,
    /// Welt-Achsen anzeigen
    pub world_axes_visible: bool,
}

impl RenderSnapshot {
    /// Selektions-Hervorhebung gilt nur im Makro-Modus ohne Mikro-Zustand.
    pub fn selection_highlight(&self) -> Option<&Selection> {
        if self.micro_active || self.micro_state.is_some() {
            return None;
        }
        self.selection.as_ref()
    }
}
