use crate::core::{Axis, ItemKind};

/// Richtung einer Orbit-Pfeiltaste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitKey {
    /// Pfeil links
    Left,
    /// Pfeil rechts
    Right,
    /// Pfeil hoch
    Up,
    /// Pfeil runter
    Down,
}

/// Viewer-Intents sind Eingaben aus der UI ohne direkte Mutationslogik.
/// Der Hub übersetzt sie anhand des committeten Zustands in Commands.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerIntent {
    // === Zeiger ===
    /// Orbit-Drag um `dx`/`dy` Pixel
    OrbitDragged { dx_px: f64, dy_px: f64, fast: bool },
    /// Pan-Drag um `dx`/`dy` Pixel
    PanDragged { dx_px: f64, dy_px: f64, fast: bool },
    /// Mausrad (positiv = heraus)
    WheelScrolled { delta_y: f64, fast: bool },
    /// Klick auf ein Item (bereits über `pick_object_at` aufgelöst) oder ins Leere
    ItemClicked { uuid: Option<String> },
    /// Doppelklick auf ein Item
    ItemDoubleClicked { uuid: String },

    // === Tastatur ===
    /// Pfeiltaste (Orbit)
    OrbitKeyPressed { key: OrbitKey, fast: bool },
    /// `+` / `-`
    ZoomKeyPressed { zoom_in: bool },
    /// Home: Kamera zurücksetzen
    ResetCameraRequested,
    /// Bild auf/ab: Frame-Schritt
    FrameStepRequested { delta: i64 },
    /// Leertaste: Wiedergabe umschalten
    PlaybackToggled,
    /// `Q`: Selektion fokussieren
    FocusSelectionRequested,
    /// `Esc`: Mikro-Modus verlassen
    ExitMicroRequested,

    // === Toolbar ===
    /// Nächste/vorherige Ansicht der Preset-Sequenz
    ViewCycleRequested { forward: bool },
    /// Achsen-Ansicht
    AxisSnapRequested { axis: Axis },
    /// Benannte Ansicht (`top`, `iso`, ...)
    NamedViewRequested { name: String },
    /// Auto-Orbit umschalten
    AutoOrbitToggled,
    /// Typ-Filter umschalten
    TypeFilterToggled { kind: ItemKind },
    /// Aux-Modul umschalten
    AuxModuleToggled { name: String },
    /// Welt-Achsen umschalten
    WorldAxesToggled,
}
