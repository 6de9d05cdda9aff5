use std::fmt;

/// Betrachtungsmodus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewerMode {
    /// Gesamte Szene
    #[default]
    Macro,
    /// Fokussierte Inspektion eines Items
    Micro,
}

impl fmt::Display for ViewerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerMode::Macro => f.write_str("macro"),
            ViewerMode::Micro => f.write_str("micro"),
        }
    }
}

/// Grund, warum der Mikro-Modus gerade nicht aktiv sein kann.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroBlockReason {
    /// Wiedergabe läuft
    FramePlaying,
    /// Auto-Orbit läuft
    CameraAuto,
    /// Keine Selektion
    NoSelection,
    /// Selektion im aktuellen Frame/Filter unsichtbar
    SelectionHidden,
    /// Kein Mikro-Zustand berechenbar
    NoMicroState,
    /// Fokus-Item ohne Position
    NoFocusPosition,
}

/// Snapshot des Laufzeitstatus nach dem letzten Commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStatus {
    /// Angeforderter Modus (vor dem Abgleich)
    pub requested_mode: ViewerMode,
    /// Tatsächlich aktiver Modus
    pub effective_mode: ViewerMode,
    /// Warum Mikro blockiert ist (falls angefordert oder relevant)
    pub micro_blocked_by: Option<MicroBlockReason>,
    /// Frame beim Commit
    pub frame: i64,
    /// Wiedergabe aktiv beim Commit
    pub playing: bool,
}

/// Kontinuierliche Prozesse. Schließen sich gegenseitig und den Mikro-Modus aus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeFlags {
    /// Frame-Wiedergabe läuft
    pub is_frame_playing: bool,
    /// Auto-Orbit läuft
    pub is_camera_auto: bool,
    /// Status nach dem letzten Commit
    pub status: RuntimeStatus,
}
