//! Polar-Kamera (Orbit um ein Target) mit Presets, Fokus und Auto-Orbit.
//!
//! Die Engine kennt keine Queue und keine Zeitsteuerung außer `update(dt)`.
//! Jede Zuweisung läuft durch Clamps, damit NaN/riesige Werte den Zustand
//! nicht korrumpieren können.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::view_defs::{Axis, ViewKey, PRESET_SEQUENCE};

/// Abstand von `phi` zu den Polen.
pub const CAMERA_EPSILON: f64 = 1e-4;
/// Minimale Kamera-Distanz.
pub const MIN_DISTANCE: f64 = 0.01;
/// Maximale Kamera-Distanz.
pub const MAX_DISTANCE: f64 = 1000.0;
/// Betragsgrenze für Target-Koordinaten.
pub const MAX_COORD: f64 = 1e4;
/// Kleinstes erlaubtes Sichtfeld (Grad).
pub const FOV_MIN: f64 = 1.0;
/// Größtes erlaubtes Sichtfeld (Grad).
pub const FOV_MAX: f64 = 179.0;
/// Standard-Sichtfeld (Grad).
pub const DEFAULT_FOV: f64 = 50.0;
/// Standard-Distanz ohne Szenen-Metriken.
pub const DEFAULT_DISTANCE: f64 = 4.0;
/// Winkelgeschwindigkeit je Auto-Orbit-Stufe 1..3 (rad/s).
pub const DEFAULT_AUTO_ORBIT_SPEEDS: [f64; 3] = [PI / 24.0, PI / 16.0, PI / 12.0];
/// Toleranz für das Wiedererkennen eines Presets anhand der Winkel.
const PRESET_MATCH_EPS: f64 = 1e-3;

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn clamp_phi(phi: f64) -> f64 {
    phi.clamp(CAMERA_EPSILON, PI - CAMERA_EPSILON)
}

fn clamp_distance(distance: f64) -> f64 {
    distance.clamp(MIN_DISTANCE, MAX_DISTANCE)
}

fn clamp_fov(fov: f64) -> f64 {
    fov.clamp(FOV_MIN, FOV_MAX)
}

fn sanitize_coord(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(-MAX_COORD, MAX_COORD)
}

/// Ersetzt nicht-endliche Komponenten durch 0 und begrenzt auf `MAX_COORD`.
pub fn sanitize_position(position: DVec3) -> DVec3 {
    DVec3::new(
        sanitize_coord(position.x),
        sanitize_coord(position.y),
        sanitize_coord(position.z),
    )
}

/// Kamera-Pose in Polarkoordinaten (Z-up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Azimut um die Z-Achse (unbegrenzt)
    pub theta: f64,
    /// Polarwinkel, begrenzt auf (ε, π-ε)
    pub phi: f64,
    /// Abstand zum Target
    pub distance: f64,
    /// Blickziel in Welt-Koordinaten
    pub target: DVec3,
    /// Vertikales Sichtfeld in Grad
    pub fov: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: PI / 2.0,
            distance: DEFAULT_DISTANCE,
            target: DVec3::ZERO,
            fov: DEFAULT_FOV,
        }
    }
}

impl CameraState {
    /// Liefert eine Kopie, bei der jeder Skalar geclampt ist.
    pub fn sanitized(self) -> Self {
        let fallback = Self::default();
        Self {
            theta: finite_or(self.theta, fallback.theta),
            phi: clamp_phi(finite_or(self.phi, fallback.phi)),
            distance: clamp_distance(finite_or(self.distance, fallback.distance)),
            target: sanitize_position(self.target),
            fov: clamp_fov(finite_or(self.fov, fallback.fov)),
        }
    }

    /// Kamera-Position in Welt-Koordinaten.
    pub fn eye_position(&self) -> DVec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + DVec3::new(
                sin_phi * cos_theta,
                sin_phi * sin_theta,
                cos_phi,
            ) * self.distance
    }
}

/// Teil-Update für `CameraEngine::set_state`. Nicht gesetzte Felder bleiben erhalten.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraStatePatch {
    /// Neuer Azimut
    pub theta: Option<f64>,
    /// Neuer Polarwinkel
    pub phi: Option<f64>,
    /// Neue Distanz
    pub distance: Option<f64>,
    /// Neues Target
    pub target: Option<DVec3>,
    /// Neues Sichtfeld
    pub fov: Option<f64>,
}

impl From<CameraState> for CameraStatePatch {
    fn from(state: CameraState) -> Self {
        Self {
            theta: Some(state.theta),
            phi: Some(state.phi),
            distance: Some(state.distance),
            target: Some(state.target),
            fov: Some(state.fov),
        }
    }
}

/// Verhalten der Distanz beim Fokussieren.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    /// Distanz mit `distance_factor` skalieren
    #[default]
    Approach,
    /// Aktuelle Distanz beibehalten
    Preserve,
}

/// Parameter für `compute_focus_state`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusOptions {
    /// Approach oder Preserve
    pub mode: FocusMode,
    /// Skalierung der Distanz bei Approach
    pub distance_factor: f64,
    /// Untere Distanzgrenze (sonst `MIN_DISTANCE`)
    pub min_distance: Option<f64>,
    /// Obere Distanzgrenze (sonst `MAX_DISTANCE`)
    pub max_distance: Option<f64>,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            mode: FocusMode::Approach,
            distance_factor: 0.7,
            min_distance: None,
            max_distance: None,
        }
    }
}

/// Optionale Überschreibungen beim Anspringen eines Presets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresetOptions {
    /// Neues Target
    pub target: Option<DVec3>,
    /// Neue Distanz
    pub distance: Option<f64>,
    /// Neues Sichtfeld
    pub fov: Option<f64>,
}

/// Drehrichtung des Auto-Orbits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitDirection {
    /// Theta wächst
    #[default]
    Forward,
    /// Theta fällt
    Reverse,
}

impl OrbitDirection {
    /// Vorzeichen für die Winkelgeschwindigkeit.
    pub fn sign(self) -> f64 {
        match self {
            OrbitDirection::Forward => 1.0,
            OrbitDirection::Reverse => -1.0,
        }
    }
}

/// Parameter für `start_auto_orbit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoOrbitOptions {
    /// Orbit-Zentrum (sonst aktuelles Target)
    pub center: Option<DVec3>,
    /// Orbit-Radius als Distanz (sonst aktuelle Distanz)
    pub radius: Option<f64>,
    /// Polarwinkel während des Orbits
    pub iso_phi: Option<f64>,
    /// Sichtfeld während des Orbits
    pub fov: Option<f64>,
    /// Drehrichtung
    pub direction: OrbitDirection,
    /// Geschwindigkeitsstufe (1-basiert)
    pub speed_level: u32,
}

impl Default for AutoOrbitOptions {
    fn default() -> Self {
        Self {
            center: None,
            radius: None,
            iso_phi: None,
            fov: None,
            direction: OrbitDirection::Forward,
            speed_level: 1,
        }
    }
}

/// Änderungen an einem laufenden Auto-Orbit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoOrbitSettings {
    /// Neue Drehrichtung
    pub direction: Option<OrbitDirection>,
    /// Neue Geschwindigkeitsstufe
    pub speed_level: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
struct AutoOrbit {
    enabled: bool,
    direction: OrbitDirection,
    speed_level: u32,
    angular_speed: f64,
}

/// Besitzt die Kamera-Pose und alle reinen Zustandsübergänge.
#[derive(Debug, Clone)]
pub struct CameraEngine {
    state: CameraState,
    initial: CameraState,
    preset_index: Option<usize>,
    auto_orbit: AutoOrbit,
    speed_table: Vec<f64>,
}

impl CameraEngine {
    /// Erstellt eine Engine. `initial` wird als Reset-Snapshot eingefroren.
    pub fn new(initial: CameraState, speed_table: Vec<f64>) -> Self {
        let initial = initial.sanitized();
        let speed_table = if speed_table.is_empty() {
            DEFAULT_AUTO_ORBIT_SPEEDS.to_vec()
        } else {
            speed_table
        };
        Self {
            state: initial,
            initial,
            preset_index: None,
            auto_orbit: AutoOrbit::default(),
            speed_table,
        }
    }

    /// Aktuelle Pose.
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Snapshot vom Konstruktionszeitpunkt.
    pub fn initial_state(&self) -> &CameraState {
        &self.initial
    }

    /// Dreht um die Z-Achse und kippt; `phi` wird geclampt.
    pub fn rotate(&mut self, d_theta: f64, d_phi: f64) {
        self.state.theta += finite_or(d_theta, 0.0);
        self.state.phi = clamp_phi(self.state.phi + finite_or(d_phi, 0.0));
    }

    /// Verschiebt das Target: horizontal senkrecht zur Blickrichtung in der
    /// Bodenebene, vertikal entlang Welt-Z.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let dx = finite_or(dx, 0.0);
        let dy = finite_or(dy, 0.0);
        let right_x = -self.state.theta.sin();
        let right_y = self.state.theta.cos();
        let target = self.state.target;
        self.state.target = sanitize_position(DVec3::new(
            target.x - dx * right_x,
            target.y - dx * right_y,
            target.z + dy,
        ));
    }

    /// Multiplikativer Zoom: `distance *= 1 + delta`.
    pub fn zoom(&mut self, delta: f64) {
        let factor = 1.0 + finite_or(delta, 0.0);
        self.state.distance = clamp_distance(self.state.distance * factor);
    }

    /// Springt auf eine benannte Ansicht (Winkel), Target/Distanz bleiben.
    pub fn apply_view(&mut self, view: ViewKey) {
        let angles = view.angles();
        self.state.theta = angles.theta;
        self.state.phi = clamp_phi(angles.phi);
        self.preset_index = view.preset_index();
    }

    /// Blickt entlang einer Welt-Achse.
    pub fn snap_to_axis(&mut self, axis: Axis) {
        self.apply_view(axis.view());
    }

    /// Löst Alias oder Schlüssel auf und springt dorthin.
    pub fn set_view_by_name(&mut self, name: &str) -> anyhow::Result<ViewKey> {
        let view = ViewKey::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unbekannte Ansicht: '{}'", name))?;
        self.apply_view(view);
        Ok(view)
    }

    /// Springt auf Slot `index` der 7er-Sequenz (euklidisches Modulo).
    /// Gibt den aufgelösten Slot zurück.
    pub fn set_view_preset(&mut self, index: i64, opts: PresetOptions) -> usize {
        let slot = index.rem_euclid(PRESET_SEQUENCE.len() as i64) as usize;
        let angles = PRESET_SEQUENCE[slot].angles();
        self.state.theta = angles.theta;
        self.state.phi = clamp_phi(angles.phi);
        if let Some(target) = opts.target {
            self.state.target = sanitize_position(target);
        }
        if let Some(distance) = opts.distance.filter(|d| d.is_finite()) {
            self.state.distance = clamp_distance(distance);
        }
        if let Some(fov) = opts.fov.filter(|f| f.is_finite()) {
            self.state.fov = clamp_fov(fov);
        }
        self.preset_index = Some(slot);
        slot
    }

    /// Zuletzt aufgelöster Preset-Slot; sonst Slot mit passenden Winkeln; sonst 0.
    pub fn view_preset_index(&self) -> usize {
        if let Some(slot) = self.preset_index {
            return slot;
        }
        PRESET_SEQUENCE
            .iter()
            .position(|view| {
                let angles = view.angles();
                (angles.theta - self.state.theta).abs() < PRESET_MATCH_EPS
                    && (angles.phi - self.state.phi).abs() < PRESET_MATCH_EPS
            })
            .unwrap_or(0)
    }

    /// Berechnet eine neue Pose mit Target auf `position`, ohne sie anzuwenden.
    pub fn compute_focus_state(&self, position: DVec3, opts: &FocusOptions) -> CameraState {
        let target = sanitize_position(position);
        let min_d = opts
            .min_distance
            .filter(|d| d.is_finite())
            .map_or(MIN_DISTANCE, clamp_distance);
        let max_d = opts
            .max_distance
            .filter(|d| d.is_finite())
            .map_or(MAX_DISTANCE, clamp_distance);
        let distance = match opts.mode {
            FocusMode::Approach => {
                self.state.distance * finite_or(opts.distance_factor, 1.0)
            }
            FocusMode::Preserve => self.state.distance,
        };
        CameraState {
            target,
            distance: distance.max(min_d).min(max_d.max(min_d)),
            ..self.state
        }
    }

    /// Startet einen Orbit mit konstanter Winkelgeschwindigkeit.
    pub fn start_auto_orbit(&mut self, opts: AutoOrbitOptions) {
        if let Some(center) = opts.center {
            self.state.target = sanitize_position(center);
        }
        if let Some(radius) = opts.radius.filter(|r| r.is_finite() && *r > 0.0) {
            self.state.distance = clamp_distance(radius);
        }
        if let Some(phi) = opts.iso_phi.filter(|p| p.is_finite()) {
            self.state.phi = clamp_phi(phi);
        }
        if let Some(fov) = opts.fov.filter(|f| f.is_finite()) {
            self.state.fov = clamp_fov(fov);
        }
        let speed_level = self.clamp_speed_level(opts.speed_level);
        self.auto_orbit = AutoOrbit {
            enabled: true,
            direction: opts.direction,
            speed_level,
            angular_speed: self.speed_for_level(speed_level),
        };
    }

    /// Passt Richtung/Stufe an; wirkt nur während eines laufenden Orbits.
    pub fn update_auto_orbit_settings(&mut self, settings: AutoOrbitSettings) {
        if !self.auto_orbit.enabled {
            return;
        }
        if let Some(direction) = settings.direction {
            self.auto_orbit.direction = direction;
        }
        if let Some(level) = settings.speed_level {
            let level = self.clamp_speed_level(level);
            self.auto_orbit.speed_level = level;
            self.auto_orbit.angular_speed = self.speed_for_level(level);
        }
    }

    /// Beendet den Auto-Orbit.
    pub fn stop_auto_orbit(&mut self) {
        self.auto_orbit = AutoOrbit::default();
    }

    /// `true`, solange ein Auto-Orbit läuft.
    pub fn is_auto_orbiting(&self) -> bool {
        self.auto_orbit.enabled
    }

    /// Aktuelle Auto-Orbit-Stufe (0 = aus).
    pub fn auto_orbit_speed_level(&self) -> u32 {
        self.auto_orbit.speed_level
    }

    /// Einziger zeitabhängiger Einstieg: dreht während des Auto-Orbits.
    pub fn update(&mut self, dt: f64) {
        if !self.auto_orbit.enabled || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.state.theta +=
            self.auto_orbit.direction.sign() * self.auto_orbit.angular_speed * dt;
    }

    /// Übernimmt gesetzte Felder eines Patches (geclampt).
    pub fn set_state(&mut self, patch: CameraStatePatch) {
        if let Some(theta) = patch.theta.filter(|t| t.is_finite()) {
            self.state.theta = theta;
        }
        if let Some(phi) = patch.phi.filter(|p| p.is_finite()) {
            self.state.phi = clamp_phi(phi);
        }
        if let Some(distance) = patch.distance.filter(|d| d.is_finite()) {
            self.state.distance = clamp_distance(distance);
        }
        if let Some(target) = patch.target {
            let current = self.state.target;
            self.state.target = sanitize_position(DVec3::new(
                finite_or(target.x, current.x),
                finite_or(target.y, current.y),
                finite_or(target.z, current.z),
            ));
        }
        if let Some(fov) = patch.fov.filter(|f| f.is_finite()) {
            self.state.fov = clamp_fov(fov);
        }
    }

    /// Setzt nur das Sichtfeld (geclampt auf [1, 179]).
    pub fn set_fov(&mut self, fov: f64) {
        self.set_state(CameraStatePatch {
            fov: Some(fov),
            ..Default::default()
        });
    }

    /// Stellt den Konstruktions-Snapshot wieder her und beendet den Auto-Orbit.
    pub fn reset(&mut self) {
        self.state = self.initial;
        self.preset_index = None;
        self.stop_auto_orbit();
    }

    fn clamp_speed_level(&self, level: u32) -> u32 {
        level.clamp(1, self.speed_table.len() as u32)
    }

    fn speed_for_level(&self, level: u32) -> f64 {
        self.speed_table
            .get(level.saturating_sub(1) as usize)
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for CameraEngine {
    fn default() -> Self {
        Self::new(CameraState::default(), DEFAULT_AUTO_ORBIT_SPEEDS.to_vec())
    }
}
