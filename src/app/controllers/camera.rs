use glam::DVec3;

use crate::app::events::CameraDelta;
use crate::app::state::RuntimeFlags;
use crate::core::{
    AutoOrbitOptions, AutoOrbitSettings, Axis, CameraEngine, CameraState, CameraStatePatch,
    FocusOptions, PresetOptions, ViewKey,
};

/// Fassade über der `CameraEngine`, die `runtime.is_camera_auto` pflegt.
///
/// Jede manuelle Kamera-Operation beendet einen laufenden Auto-Orbit.
#[derive(Debug, Clone)]
pub struct CameraController {
    engine: CameraEngine,
}

impl CameraController {
    /// Erstellt die Fassade um eine Engine.
    pub fn new(engine: CameraEngine) -> Self {
        Self { engine }
    }

    /// Read-only Zugriff auf die Engine.
    pub fn engine(&self) -> &CameraEngine {
        &self.engine
    }

    /// Mutabler Zugriff (für Überblendungen).
    pub fn engine_mut(&mut self) -> &mut CameraEngine {
        &mut self.engine
    }

    /// Aktuelle Pose.
    pub fn state(&self) -> &CameraState {
        self.engine.state()
    }

    /// Aktueller Preset-Slot.
    pub fn view_preset_index(&self) -> usize {
        self.engine.view_preset_index()
    }

    fn release_auto(&mut self, runtime: &mut RuntimeFlags) {
        if self.engine.is_auto_orbiting() {
            log::debug!("Manuelle Kamera-Operation beendet Auto-Orbit");
            self.engine.stop_auto_orbit();
        }
        runtime.is_camera_auto = false;
    }

    /// Wendet ein (zusammengefasstes) Delta an: Rotation, Pan, dann Zoom.
    pub fn apply_delta(&mut self, runtime: &mut RuntimeFlags, delta: CameraDelta) {
        if delta.is_zero() {
            return;
        }
        self.release_auto(runtime);
        if delta.d_theta != 0.0 || delta.d_phi != 0.0 {
            self.engine.rotate(delta.d_theta, delta.d_phi);
        }
        if delta.pan_x != 0.0 || delta.pan_y != 0.0 {
            self.engine.pan(delta.pan_x, delta.pan_y);
        }
        if delta.zoom != 0.0 {
            self.engine.zoom(delta.zoom);
        }
    }

    /// Springt auf einen Preset-Slot und gibt den aufgelösten Slot zurück.
    pub fn set_view_preset(
        &mut self,
        runtime: &mut RuntimeFlags,
        index: i64,
        options: PresetOptions,
    ) -> usize {
        self.release_auto(runtime);
        self.engine.set_view_preset(index, options)
    }

    /// Springt auf eine benannte Ansicht.
    pub fn set_view_by_name(
        &mut self,
        runtime: &mut RuntimeFlags,
        name: &str,
    ) -> anyhow::Result<ViewKey> {
        let view = ViewKey::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unbekannte Ansicht: '{}'", name))?;
        self.release_auto(runtime);
        self.engine.apply_view(view);
        Ok(view)
    }

    /// Blickt entlang einer Welt-Achse.
    pub fn snap_to_axis(&mut self, runtime: &mut RuntimeFlags, axis: Axis) {
        self.release_auto(runtime);
        self.engine.snap_to_axis(axis);
    }

    /// Setzt die Pose explizit.
    pub fn set_state(&mut self, runtime: &mut RuntimeFlags, patch: CameraStatePatch) {
        self.release_auto(runtime);
        self.engine.set_state(patch);
    }

    /// Setzt auf den Session-Start zurück.
    pub fn reset(&mut self, runtime: &mut RuntimeFlags) {
        self.release_auto(runtime);
        self.engine.reset();
    }

    /// Richtet die Kamera auf eine Welt-Position aus.
    pub fn focus_on_position(
        &mut self,
        runtime: &mut RuntimeFlags,
        position: DVec3,
        options: &FocusOptions,
    ) -> anyhow::Result<()> {
        if !position.is_finite() {
            anyhow::bail!("Fokus-Position nicht endlich: {:?}", position);
        }
        self.release_auto(runtime);
        let next = self.engine.compute_focus_state(position, options);
        self.engine.set_state(next.into());
        Ok(())
    }

    /// Startet den Auto-Orbit. Makro-Modus und gestoppte Wiedergabe
    /// stellt der Aufrufer sicher.
    pub fn start_auto_orbit(&mut self, runtime: &mut RuntimeFlags, options: AutoOrbitOptions) {
        self.engine.start_auto_orbit(options);
        runtime.is_camera_auto = true;
    }

    /// Ändert Richtung/Stufe eines laufenden Auto-Orbits.
    pub fn update_auto_orbit_settings(&mut self, settings: AutoOrbitSettings) {
        self.engine.update_auto_orbit_settings(settings);
    }

    /// Beendet den Auto-Orbit.
    pub fn stop_auto_orbit(&mut self, runtime: &mut RuntimeFlags) {
        self.engine.stop_auto_orbit();
        runtime.is_camera_auto = false;
    }

    /// Zeitabhängiger Fortschritt (Auto-Orbit).
    pub fn update(&mut self, dt: f64) {
        self.engine.update(dt);
    }

    /// Setzt das Sichtfeld (ohne Auto-Orbit zu beenden).
    pub fn set_fov(&mut self, fov: f64) -> f64 {
        self.engine.set_fov(fov);
        self.engine.state().fov
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_manual_operation_clears_auto_flag() {
        let mut runtime = RuntimeFlags::default();
        let mut camera = CameraController::new(CameraEngine::default());
        camera.start_auto_orbit(&mut runtime, AutoOrbitOptions::default());
        assert!(runtime.is_camera_auto);

        camera.apply_delta(&mut runtime, CameraDelta::rotate(0.1, 0.0));
        assert!(!runtime.is_camera_auto);
        assert!(!camera.engine().is_auto_orbiting());
    }

    #[test]
    fn test_zero_delta_keeps_auto_orbit_running() {
        let mut runtime = RuntimeFlags::default();
        let mut camera = CameraController::new(CameraEngine::default());
        camera.start_auto_orbit(&mut runtime, AutoOrbitOptions::default());
        camera.apply_delta(&mut runtime, CameraDelta::default());
        assert!(runtime.is_camera_auto);
    }

    #[test]
    fn test_unknown_view_name_is_an_error_and_keeps_pose() {
        let mut runtime = RuntimeFlags::default();
        let mut camera = CameraController::new(CameraEngine::default());
        let before = *camera.state();
        assert!(camera.set_view_by_name(&mut runtime, "sideways").is_err());
        assert_eq!(*camera.state(), before);

        let view = camera
            .set_view_by_name(&mut runtime, "top")
            .expect("Alias sollte aufgelöst werden");
        assert_eq!(view, ViewKey::ZPos);
        assert_eq!(camera.view_preset_index(), 0);
    }

    #[test]
    fn test_focus_on_position_retargets() {
        let mut runtime = RuntimeFlags::default();
        let mut camera = CameraController::new(CameraEngine::default());
        camera
            .focus_on_position(&mut runtime, DVec3::new(1.0, 1.0, 0.0), &FocusOptions::default())
            .expect("Position ist endlich");
        assert_eq!(camera.state().target, DVec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(camera.state().distance, 4.0 * 0.7, epsilon = 1e-9);

        assert!(camera
            .focus_on_position(&mut runtime, DVec3::splat(f64::NAN), &FocusOptions::default())
            .is_err());
    }
}
