//! Zeitbasierte Kamera-Überblendung (Mikro-Eintritt, Makro-Rückkehr).

use super::camera::{CameraEngine, CameraState, CameraStatePatch};

/// Standard-Dauer einer Überblendung in Sekunden.
pub const DEFAULT_TRANSITION_SECS: f64 = 0.22;

/// Interpoliert Winkel, Distanz und Target linear von einer Start- zur Ziel-Pose.
#[derive(Debug, Clone)]
pub struct CameraTransition {
    duration_secs: f64,
    elapsed_secs: f64,
    from: CameraState,
    to: CameraState,
    active: bool,
}

impl CameraTransition {
    /// Erstellt eine inaktive Überblendung mit gegebener Dauer.
    pub fn new(duration_secs: f64) -> Self {
        let duration_secs = if duration_secs.is_finite() && duration_secs > 0.0 {
            duration_secs
        } else {
            DEFAULT_TRANSITION_SECS
        };
        Self {
            duration_secs,
            elapsed_secs: 0.0,
            from: CameraState::default(),
            to: CameraState::default(),
            active: false,
        }
    }

    /// Startet eine Überblendung von der aktuellen Pose der Engine zu `to`.
    /// Gibt `false` zurück, wenn das Ziel nicht endlich ist.
    pub fn start(&mut self, engine: &CameraEngine, to: CameraState) -> bool {
        let finite = to.theta.is_finite()
            && to.phi.is_finite()
            && to.distance.is_finite()
            && to.target.is_finite();
        if !finite {
            log::warn!("Kamera-Überblendung verworfen: Ziel-Pose nicht endlich");
            return false;
        }
        self.from = *engine.state();
        self.to = to.sanitized();
        self.elapsed_secs = 0.0;
        self.active = true;
        true
    }

    /// `true`, solange eine Überblendung läuft.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Bricht eine laufende Überblendung ab (Pose bleibt wo sie ist).
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Schreitet um `dt` fort und schreibt die interpolierte Pose in die Engine.
    pub fn update(&mut self, dt: f64, engine: &mut CameraEngine) {
        if !self.active {
            return;
        }
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_secs += dt;
        }
        let t = (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0);
        engine.set_state(self.interpolate(t));
        if t >= 1.0 {
            self.active = false;
        }
    }

    /// Springt sofort ans Ziel (ohne Frame-Takt).
    pub fn finish(&mut self, engine: &mut CameraEngine) {
        if self.active {
            engine.set_state(self.interpolate(1.0));
            self.active = false;
        }
    }

    fn interpolate(&self, t: f64) -> CameraStatePatch {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        CameraStatePatch {
            theta: Some(lerp(self.from.theta, self.to.theta)),
            phi: Some(lerp(self.from.phi, self.to.phi)),
            distance: Some(lerp(self.from.distance, self.to.distance)),
            target: Some(self.from.target.lerp(self.to.target, t)),
            fov: None,
        }
    }
}

impl Default for CameraTransition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;

    fn target_state() -> CameraState {
        CameraState {
            distance: 2.0,
            target: DVec3::new(4.0, 0.0, 0.0),
            ..CameraState::default()
        }
    }

    #[test]
    fn test_transition_reaches_target_after_duration() {
        let mut engine = CameraEngine::default();
        let mut transition = CameraTransition::new(0.2);
        assert!(transition.start(&engine, target_state()));

        transition.update(0.1, &mut engine);
        assert!(transition.is_active());
        assert_relative_eq!(engine.state().target.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(engine.state().distance, 3.0, epsilon = 1e-9);

        transition.update(0.15, &mut engine);
        assert!(!transition.is_active());
        assert_relative_eq!(engine.state().target.x, 4.0);
        assert_relative_eq!(engine.state().distance, 2.0);
    }

    #[test]
    fn test_finish_jumps_to_target() {
        let mut engine = CameraEngine::default();
        let mut transition = CameraTransition::default();
        transition.start(&engine, target_state());
        transition.finish(&mut engine);
        assert!(!transition.is_active());
        assert_relative_eq!(engine.state().target.x, 4.0);
    }

    #[test]
    fn test_non_finite_target_is_rejected() {
        let engine = CameraEngine::default();
        let mut transition = CameraTransition::default();
        let bad = CameraState {
            distance: f64::NAN,
            ..CameraState::default()
        };
        assert!(!transition.start(&engine, bad));
        assert!(!transition.is_active());
    }
}
