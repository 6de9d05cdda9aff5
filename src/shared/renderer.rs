//! Renderer-Vertrag: reine Schreib-Senke, wird nie nach Zustand gefragt.

use glam::DVec2;

use crate::core::{CameraState, ItemKind, MicroState, Selection, VisibleSet};

/// Treffer eines Picks in normalisierten Gerätekoordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    /// UUID des getroffenen Items
    pub uuid: String,
    /// Art des Items, falls der Renderer sie kennt
    pub kind: Option<ItemKind>,
}

/// Externer Renderer, der pro Tick den committeten Zustand erhält.
pub trait Renderer {
    /// Neue Kamera-Pose.
    fn update_camera(&mut self, camera: &CameraState);

    /// Neues sichtbares Set für den aktiven Frame.
    fn apply_frame(&mut self, visible: &VisibleSet);

    /// Mikro-Effekte; `None` schaltet sie ab.
    fn apply_micro_fx(
        &mut self,
        micro: Option<&MicroState>,
        camera: &CameraState,
        visible: &VisibleSet,
    );

    /// Selektions-Hervorhebung; `None` im Mikro-Modus oder ohne Selektion.
    fn apply_selection(
        &mut self,
        selection: Option<&Selection>,
        camera: &CameraState,
        visible: &VisibleSet,
    );

    /// Pick an NDC-Koordinaten (`-1..1`).
    fn pick_object_at(&mut self, _ndc: DVec2) -> Option<PickHit> {
        None
    }

    /// Hebt ein Item hervor.
    fn set_highlight(&mut self, _uuid: &str) {}

    /// Entfernt alle Hervorhebungen.
    fn clear_all_highlights(&mut self) {}

    /// Blendet die Welt-Achsen ein oder aus.
    fn set_world_axes_visible(&mut self, _visible: bool) {}

    /// Viewport-Größe in Pixeln.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Gibt Renderer-Ressourcen frei.
    fn dispose(&mut self) {}
}

/// Renderer ohne Ausgabe (Headless-Betrieb, Benchmarks).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn update_camera(&mut self, _camera: &CameraState) {}

    fn apply_frame(&mut self, _visible: &VisibleSet) {}

    fn apply_micro_fx(
        &mut self,
        _micro: Option<&MicroState>,
        _camera: &CameraState,
        _visible: &VisibleSet,
    ) {
    }

    fn apply_selection(
        &mut self,
        _selection: Option<&Selection>,
        _camera: &CameraState,
        _visible: &VisibleSet,
    ) {
    }
}
