use glam::DVec3;

use crate::app::state::ViewerMode;
use crate::core::{
    AutoOrbitOptions, AutoOrbitSettings, Axis, CameraStatePatch, FocusOptions, ItemKind,
    PresetOptions,
};

/// Inkrementelle Kamera-Bewegung (Drag, Mausrad, Pfeiltasten).
///
/// Mehrere Deltas innerhalb eines Ticks werden komponentenweise aufsummiert.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraDelta {
    /// Azimut-Änderung
    pub d_theta: f64,
    /// Polarwinkel-Änderung
    pub d_phi: f64,
    /// Horizontaler Pan
    pub pan_x: f64,
    /// Vertikaler Pan
    pub pan_y: f64,
    /// Relativer Zoom (`distance *= 1 + zoom`)
    pub zoom: f64,
}

impl CameraDelta {
    /// Reine Rotation.
    pub fn rotate(d_theta: f64, d_phi: f64) -> Self {
        Self {
            d_theta,
            d_phi,
            ..Self::default()
        }
    }

    /// Reiner Pan.
    pub fn pan(pan_x: f64, pan_y: f64) -> Self {
        Self {
            pan_x,
            pan_y,
            ..Self::default()
        }
    }

    /// Reiner Zoom.
    pub fn zoom(zoom: f64) -> Self {
        Self {
            zoom,
            ..Self::default()
        }
    }

    /// Ersetzt nicht-endliche Komponenten durch 0.
    pub fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            d_theta: clean(self.d_theta),
            d_phi: clean(self.d_phi),
            pan_x: clean(self.pan_x),
            pan_y: clean(self.pan_y),
            zoom: clean(self.zoom),
        }
    }

    /// `true`, wenn alle Komponenten 0 sind.
    pub fn is_zero(&self) -> bool {
        self.d_theta == 0.0
            && self.d_phi == 0.0
            && self.pan_x == 0.0
            && self.pan_y == 0.0
            && self.zoom == 0.0
    }

    /// Komponentenweise Summe.
    pub fn add(&mut self, other: CameraDelta) {
        self.d_theta += other.d_theta;
        self.d_phi += other.d_phi;
        self.pan_x += other.pan_x;
        self.pan_y += other.pan_y;
        self.zoom += other.zoom;
    }

    /// Komponentenweise Skalierung.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            d_theta: self.d_theta * factor,
            d_phi: self.d_phi * factor,
            pan_x: self.pan_x * factor,
            pan_y: self.pan_y * factor,
            zoom: self.zoom * factor,
        }
    }

    /// Summe der Beträge aller Komponenten.
    pub fn magnitude(&self) -> f64 {
        self.d_theta.abs()
            + self.d_phi.abs()
            + self.pan_x.abs()
            + self.pan_y.abs()
            + self.zoom.abs()
    }
}

/// Commands sind mutierende Schritte, die der Hub einmal pro Tick anwendet.
#[derive(Debug, Clone, PartialEq)]
pub enum HubCommand {
    // === Kamera: Deltas ===
    /// Inkrementelle Bewegung (wird pro Tick zusammengefasst)
    CameraDelta(CameraDelta),

    // === Kamera: Sprünge (verwerfen offene Deltas und Trägheit) ===
    /// Preset-Slot anspringen (euklidisches Modulo über 7 Slots)
    SetViewPreset { index: i64, options: PresetOptions },
    /// Ansicht über Namen/Alias anspringen
    SetViewByName { name: String },
    /// Entlang einer Welt-Achse blicken
    SnapToAxis { axis: Axis },
    /// Kamera-Pose explizit setzen
    SetCameraState { patch: CameraStatePatch },
    /// Kamera auf den Session-Start zurücksetzen
    ResetCamera,
    /// Item fokussieren (Mikro-Eintritt)
    FocusOn { uuid: String, kind: Option<ItemKind> },
    /// Welt-Position fokussieren (ohne Moduswechsel)
    FocusOnPosition {
        position: DVec3,
        options: Option<FocusOptions>,
    },
    /// Auto-Orbit starten (erzwingt Makro-Modus)
    StartAutoOrbit { options: AutoOrbitOptions },

    // === Kamera: Auto-Orbit ===
    /// Richtung/Stufe eines laufenden Auto-Orbits ändern
    UpdateAutoOrbitSettings { settings: AutoOrbitSettings },
    /// Auto-Orbit beenden
    StopAutoOrbit,

    // === Frames & Wiedergabe ===
    /// Frame setzen (wird getrimmt und geclampt)
    SetActiveFrame { frame: f64 },
    /// Frame relativ verschieben
    StepFrame { delta: i64 },
    /// Wiedergabe starten
    StartPlayback {
        fps: Option<f64>,
        loop_playback: Option<bool>,
    },
    /// Wiedergabe anhalten
    StopPlayback,

    // === Modus ===
    /// Modus setzen (Mikro-Eintritt ist geschützt)
    SetMode {
        mode: ViewerMode,
        uuid: Option<String>,
        kind: Option<ItemKind>,
    },
    /// Zurück in den Makro-Modus
    ExitMode,
    /// Kurzform für `SetMode { Micro, uuid, kind }`
    FocusMode { uuid: String, kind: Option<ItemKind> },

    // === Selektion ===
    /// Item selektieren (ungültig → Selektion leeren)
    Select { uuid: String, kind: Option<ItemKind> },
    /// Selektion leeren
    ClearSelection,

    // === Filter ===
    /// Typ-Filter setzen
    SetTypeFilter { kind: ItemKind, enabled: bool },
    /// Aux-Modul setzen
    SetAuxModule { name: String, enabled: bool },

    // === Einstellungen ===
    /// Sichtfeld setzen (1..179 Grad)
    SetFov { fov: f64 },
    /// Welt-Achsen ein-/ausblenden
    SetWorldAxesVisible { visible: bool },

    // === Sonstiges ===
    /// Neuberechnung des sichtbaren Sets anfordern
    RequestRecompute { reason: String },
}

impl HubCommand {
    /// `true` für Sprung-Commands, die offene Deltas und Trägheit verwerfen.
    pub fn is_camera_jump(&self) -> bool {
        matches!(
            self,
            HubCommand::SetViewPreset { .. }
                | HubCommand::SetViewByName { .. }
                | HubCommand::SnapToAxis { .. }
                | HubCommand::SetCameraState { .. }
                | HubCommand::ResetCamera
                | HubCommand::FocusOn { .. }
                | HubCommand::FocusOnPosition { .. }
                | HubCommand::StartAutoOrbit { .. }
        )
    }

    /// Kurzer, stabiler Name für Logs und Commit-Gründe.
    pub fn label(&self) -> &'static str {
        match self {
            HubCommand::CameraDelta(_) => "camera.delta",
            HubCommand::SetViewPreset { .. } => "camera.setViewPreset",
            HubCommand::SetViewByName { .. } => "camera.setViewByName",
            HubCommand::SnapToAxis { .. } => "camera.snapToAxis",
            HubCommand::SetCameraState { .. } => "camera.setState",
            HubCommand::ResetCamera => "camera.reset",
            HubCommand::FocusOn { .. } => "camera.focusOn",
            HubCommand::FocusOnPosition { .. } => "camera.focusOn.position",
            HubCommand::StartAutoOrbit { .. } => "camera.startAutoOrbit",
            HubCommand::UpdateAutoOrbitSettings { .. } => "camera.updateAutoOrbitSettings",
            HubCommand::StopAutoOrbit => "camera.stopAutoOrbit",
            HubCommand::SetActiveFrame { .. } => "frame.setActive",
            HubCommand::StepFrame { .. } => "frame.step",
            HubCommand::StartPlayback { .. } => "frame.startPlayback",
            HubCommand::StopPlayback => "frame.stopPlayback",
            HubCommand::SetMode { .. } => "mode.set",
            HubCommand::ExitMode => "mode.exit",
            HubCommand::FocusMode { .. } => "mode.focus",
            HubCommand::Select { .. } => "selection.select",
            HubCommand::ClearSelection => "selection.clear",
            HubCommand::SetTypeFilter { .. } => "filters.setTypeEnabled",
            HubCommand::SetAuxModule { .. } => "filters.setAuxModule",
            HubCommand::SetFov { .. } => "settings.setFov",
            HubCommand::SetWorldAxesVisible { .. } => "settings.setWorldAxesVisible",
            HubCommand::RequestRecompute { .. } => "hub.requestRecompute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_classification() {
        assert!(HubCommand::ResetCamera.is_camera_jump());
        assert!(HubCommand::StartAutoOrbit {
            options: AutoOrbitOptions::default()
        }
        .is_camera_jump());
        assert!(!HubCommand::CameraDelta(CameraDelta::zoom(0.1)).is_camera_jump());
        assert!(!HubCommand::StopAutoOrbit.is_camera_jump());
        assert!(!HubCommand::StepFrame { delta: 1 }.is_camera_jump());
    }

    #[test]
    fn test_delta_sum_and_sanitize() {
        let mut sum = CameraDelta::rotate(0.1, -0.2);
        sum.add(CameraDelta::pan(1.0, f64::NAN).sanitized());
        sum.add(CameraDelta::zoom(0.05));
        assert_eq!(sum.pan_y, 0.0);
        assert!((sum.magnitude() - 1.35).abs() < 1e-12);
        assert!(!sum.is_zero());
        assert!(CameraDelta::default().is_zero());
    }
}
