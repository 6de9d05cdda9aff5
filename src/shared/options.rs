//! Zentrale Konfiguration für den Viewer-Hub.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte und wird dem
//! Hub bei der Konstruktion übergeben. Die `const`-Werte bleiben als
//! Fallback/Default erhalten.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::camera::{FocusMode, FocusOptions, DEFAULT_AUTO_ORBIT_SPEEDS, DEFAULT_FOV};
use crate::core::transition::DEFAULT_TRANSITION_SECS;

// ── Kamera ──────────────────────────────────────────────────────────

/// Standard-Dämpfung der Kamera-Trägheit (0 = keine Trägheit).
pub const CAMERA_DAMPING_FACTOR: f64 = 0.10;
/// Obergrenze für `dt` pro Tick in Sekunden.
pub const MAX_TICK_DT_SECS: f64 = 0.2;
/// Initiale Distanz = Bounding-Radius × Faktor.
pub const RADIUS_DISTANCE_FACTOR: f64 = 2.4;
/// Preset-Slot beim Bootstrap (iso NE).
pub const INITIAL_VIEW_PRESET: i64 = 3;

// ── Wiedergabe ──────────────────────────────────────────────────────

/// Standard-Wiedergaberate in Frames pro Sekunde.
pub const PLAYBACK_FPS: f64 = 1.0;

/// Hub-Defaults für das Anfahren eines Fokus-Punktes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FocusDefaults {
    /// Skalierung der Distanz beim Annähern
    pub distance_factor: f64,
    /// Untere Distanzgrenze
    pub min_distance: f64,
    /// Obere Distanzgrenze
    pub max_distance: f64,
}

impl Default for FocusDefaults {
    fn default() -> Self {
        Self {
            distance_factor: 0.4,
            min_distance: 0.8,
            max_distance: 8.0,
        }
    }
}

impl FocusDefaults {
    /// Fokus-Parameter für `CameraEngine::compute_focus_state`.
    pub fn to_focus_options(&self) -> FocusOptions {
        FocusOptions {
            mode: FocusMode::Approach,
            distance_factor: self.distance_factor,
            min_distance: Some(self.min_distance),
            max_distance: Some(self.max_distance),
        }
    }
}

/// Zeiger-Tuning je Pixel (normal / schnell mit Modifier).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointerTuning {
    /// Rotation je Pixel
    pub rotate_speed: f64,
    /// Rotation je Pixel (schnell)
    pub rotate_speed_fast: f64,
    /// Pan je Pixel relativ zur Distanz
    pub pan_speed: f64,
    /// Pan je Pixel relativ zur Distanz (schnell)
    pub pan_speed_fast: f64,
    /// Zoom je Mausrad-Einheit
    pub wheel_zoom_speed: f64,
    /// Zoom je Mausrad-Einheit (schnell)
    pub wheel_zoom_speed_fast: f64,
}

impl Default for PointerTuning {
    fn default() -> Self {
        Self {
            rotate_speed: 0.001,
            rotate_speed_fast: 0.002,
            pan_speed: 0.002,
            pan_speed_fast: 0.004,
            wheel_zoom_speed: 0.00035,
            wheel_zoom_speed_fast: 0.0007,
        }
    }
}

/// Tastatur-Tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyboardTuning {
    /// Orbit-Schritt je Pfeiltaste (rad)
    pub orbit_step: f64,
    /// Orbit-Schritt je Pfeiltaste mit Modifier (rad)
    pub orbit_step_fast: f64,
    /// Zoom-Schritt für +/-
    pub zoom_step: f64,
}

impl Default for KeyboardTuning {
    fn default() -> Self {
        Self {
            orbit_step: PI / 90.0,
            orbit_step_fast: PI / 45.0,
            zoom_step: 0.1,
        }
    }
}

/// Debug-Schalter (statt globaler Flags).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DebugFlags {
    /// Commit-Gründe auf Info-Level loggen
    pub trace_commits: bool,
    /// Jeden angewendeten Command loggen
    pub trace_commands: bool,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `scene_viewer_hub.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerOptions {
    // ── Kamera ──────────────────────────────────────────────────
    /// Trägheits-Dämpfung, gültig in [0, 1); 0 = sofortige Anwendung
    pub damping_factor: f64,
    /// Obergrenze für `dt` pro Tick
    pub max_tick_dt_secs: f64,
    /// Dauer der Kamera-Überblendung
    pub transition_duration_secs: f64,
    /// Preset-Slot beim Bootstrap
    pub initial_view_preset: i64,
    /// Initiales Sichtfeld (Grad)
    pub camera_fov: f64,
    /// Initiale Distanz = Bounding-Radius × Faktor
    pub radius_distance_factor: f64,
    /// Winkelgeschwindigkeit je Auto-Orbit-Stufe (rad/s)
    pub auto_orbit_speeds: Vec<f64>,
    /// Fokus-Defaults für Mikro-Eintritt und `focus_on_position`
    pub focus: FocusDefaults,

    // ── Wiedergabe ──────────────────────────────────────────────
    /// Standard-Wiedergaberate
    pub playback_fps: f64,
    /// Am Ende zum Anfang springen statt anzuhalten
    pub playback_loop: bool,

    // ── Selektion ───────────────────────────────────────────────
    /// Selektion verwerfen, wenn das Item unsichtbar wird
    pub drop_hidden_selection: bool,

    // ── Eingabe ─────────────────────────────────────────────────
    /// Zeiger-Tuning
    pub pointer: PointerTuning,
    /// Tastatur-Tuning
    pub keyboard: KeyboardTuning,

    // ── Debug ───────────────────────────────────────────────────
    /// Debug-Schalter
    pub debug: DebugFlags,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            damping_factor: CAMERA_DAMPING_FACTOR,
            max_tick_dt_secs: MAX_TICK_DT_SECS,
            transition_duration_secs: DEFAULT_TRANSITION_SECS,
            initial_view_preset: INITIAL_VIEW_PRESET,
            camera_fov: DEFAULT_FOV,
            radius_distance_factor: RADIUS_DISTANCE_FACTOR,
            auto_orbit_speeds: DEFAULT_AUTO_ORBIT_SPEEDS.to_vec(),
            focus: FocusDefaults::default(),
            playback_fps: PLAYBACK_FPS,
            playback_loop: false,
            drop_hidden_selection: true,
            pointer: PointerTuning::default(),
            keyboard: KeyboardTuning::default(),
            debug: DebugFlags::default(),
        }
    }
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Fallback auf Defaults bei Fehler.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.validated()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("scene_viewer_hub"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("scene_viewer_hub.toml")
    }

    /// Ersetzt Werte außerhalb ihres gültigen Bereichs durch Defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.damping_factor.is_finite() && (0.0..1.0).contains(&self.damping_factor)) {
            log::warn!(
                "damping_factor {} außerhalb [0, 1), verwende {}",
                self.damping_factor,
                defaults.damping_factor
            );
            self.damping_factor = defaults.damping_factor;
        }
        if !(self.max_tick_dt_secs.is_finite() && self.max_tick_dt_secs > 0.0) {
            self.max_tick_dt_secs = defaults.max_tick_dt_secs;
        }
        if !(self.playback_fps.is_finite() && self.playback_fps > 0.0) {
            log::warn!("playback_fps {} ungültig, verwende Standard", self.playback_fps);
            self.playback_fps = defaults.playback_fps;
        }
        if self.auto_orbit_speeds.is_empty()
            || self.auto_orbit_speeds.iter().any(|s| !s.is_finite())
        {
            self.auto_orbit_speeds = defaults.auto_orbit_speeds;
        }
        self
    }

    /// Trägheit aktiv, wenn die Dämpfung echt zwischen 0 und 1 liegt.
    pub fn inertia_enabled(&self) -> bool {
        self.damping_factor > 0.0 && self.damping_factor < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let opts: ViewerOptions = toml::from_str(
            r#"
            damping_factor = 0.0
            playback_loop = true

            [focus]
            min_distance = 1.5
            "#,
        )
        .expect("TOML sollte parsen");
        assert_eq!(opts.damping_factor, 0.0);
        assert!(opts.playback_loop);
        assert_eq!(opts.focus.min_distance, 1.5);
        assert_eq!(opts.focus.max_distance, 8.0);
        assert_eq!(opts.playback_fps, PLAYBACK_FPS);
        assert!(!opts.inertia_enabled());
    }

    #[test]
    fn test_validated_repairs_out_of_range_values() {
        let opts = ViewerOptions {
            damping_factor: 1.5,
            playback_fps: -3.0,
            auto_orbit_speeds: Vec::new(),
            ..ViewerOptions::default()
        }
        .validated();
        assert_eq!(opts.damping_factor, CAMERA_DAMPING_FACTOR);
        assert_eq!(opts.playback_fps, PLAYBACK_FPS);
        assert_eq!(opts.auto_orbit_speeds.len(), 3);
    }

    #[test]
    fn test_roundtrip_through_toml_string() {
        let opts = ViewerOptions::default();
        let text = toml::to_string_pretty(&opts).expect("Serialisierung sollte klappen");
        let back: ViewerOptions = toml::from_str(&text).expect("TOML sollte parsen");
        assert_eq!(back, opts);
    }
}
