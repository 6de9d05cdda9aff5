//! Sammelt Kamera-Deltas eines Ticks und verwaltet die Trägheit.
//!
//! Deltas werden komponentenweise aufsummiert. Bei aktiver Dämpfung
//! wandert die Summe in den Trägheits-Puffer: der Puffer wird pro Tick
//! vollständig angewendet und danach geometrisch abgebaut.

use super::events::CameraDelta;

/// Unterhalb dieser Summe gilt die Trägheit als erloschen.
const INERTIA_EPSILON: f64 = 1e-10;
/// Referenz-Framerate der Dämpfungskonstante.
const DAMPING_REFERENCE_FPS: f64 = 60.0;
/// Begrenzung der Frame-Äquivalente pro Tick.
const MAX_FRAME_EQUIVALENTS: f64 = 120.0;

/// Delta-Puffer plus Trägheits-Puffer.
#[derive(Debug, Clone, Default)]
pub struct CameraInputAccumulator {
    pending: CameraDelta,
    inertia: CameraDelta,
    inertia_active: bool,
}

impl CameraInputAccumulator {
    /// Erstellt leere Puffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Addiert ein Delta. Nicht-endliche Komponenten werden zu 0.
    /// Gibt `false` zurück, wenn das Delta nichts bewirkt.
    pub fn add(&mut self, delta: CameraDelta) -> bool {
        let delta = delta.sanitized();
        if delta.is_zero() {
            return false;
        }
        self.pending.add(delta);
        true
    }

    /// Aufsummierte, noch nicht angewendete Deltas.
    pub fn pending(&self) -> CameraDelta {
        self.pending
    }

    /// `true`, solange Restbewegung im Trägheits-Puffer steckt.
    pub fn has_inertia(&self) -> bool {
        self.inertia_active
    }

    /// Entnimmt die Summe des Ticks.
    ///
    /// Bei `0 < damping < 1` wandert sie in den Trägheits-Puffer und der
    /// Rückgabewert ist `None`; sonst wird sie zur sofortigen Anwendung
    /// zurückgegeben.
    pub fn consume(&mut self, damping: f64) -> Option<CameraDelta> {
        let delta = std::mem::take(&mut self.pending);
        if delta.is_zero() {
            return None;
        }
        if damping > 0.0 && damping < 1.0 {
            self.inertia.add(delta);
            self.inertia_active = true;
            None
        } else {
            Some(delta)
        }
    }

    /// Liefert die anzuwendende Trägheitsbewegung dieses Ticks und baut den
    /// Puffer ab: `rest *= (1 - f)` mit `f = 1 - (1 - damping)^(dt * 60)`.
    pub fn advance_inertia(&mut self, dt: f64, damping: f64) -> Option<CameraDelta> {
        if !self.inertia_active {
            return None;
        }
        let step = self.inertia;
        let frames = if dt.is_finite() {
            (dt * DAMPING_REFERENCE_FPS).clamp(1.0, MAX_FRAME_EQUIVALENTS)
        } else {
            1.0
        };
        let damping = damping.clamp(0.0, 1.0);
        let f = 1.0 - (1.0 - damping).powf(frames);
        self.inertia = self.inertia.scaled(1.0 - f);
        if self.inertia.magnitude() < INERTIA_EPSILON {
            self.clear_inertia();
        }
        Some(step)
    }

    /// Verwirft offene Deltas und Trägheit (bei Kamera-Sprüngen).
    pub fn discard(&mut self) {
        self.pending = CameraDelta::default();
        self.clear_inertia();
    }

    fn clear_inertia(&mut self) {
        self.inertia = CameraDelta::default();
        self.inertia_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_skips_empty_and_non_finite() {
        let mut acc = CameraInputAccumulator::new();
        assert!(!acc.add(CameraDelta::rotate(f64::NAN, 0.0)));
        assert!(acc.add(CameraDelta::rotate(0.1, 0.0)));
        assert!(acc.add(CameraDelta::rotate(0.2, 0.05)));
        assert_relative_eq!(acc.pending().d_theta, 0.3, epsilon = 1e-12);
        assert_relative_eq!(acc.pending().d_phi, 0.05);
    }

    #[test]
    fn test_consume_without_damping_returns_sum() {
        let mut acc = CameraInputAccumulator::new();
        acc.add(CameraDelta::zoom(0.1));
        acc.add(CameraDelta::zoom(0.1));
        let delta = acc.consume(0.0).expect("ohne Dämpfung sofort anwenden");
        assert_relative_eq!(delta.zoom, 0.2, epsilon = 1e-12);
        assert!(!acc.has_inertia());
        assert!(acc.consume(0.0).is_none());
    }

    #[test]
    fn test_inertia_applies_full_step_then_decays() {
        let mut acc = CameraInputAccumulator::new();
        acc.add(CameraDelta::rotate(1.0, 0.0));
        assert!(acc.consume(0.1).is_none());
        assert!(acc.has_inertia());

        let first = acc.advance_inertia(1.0 / 60.0, 0.1).expect("Trägheit aktiv");
        assert_relative_eq!(first.d_theta, 1.0);
        let second = acc.advance_inertia(1.0 / 60.0, 0.1).expect("Trägheit aktiv");
        assert_relative_eq!(second.d_theta, 0.9, epsilon = 1e-9);
    }

    #[test]
    fn test_inertia_dies_out() {
        let mut acc = CameraInputAccumulator::new();
        acc.add(CameraDelta::pan(1.0, 0.0));
        acc.consume(0.5);
        let mut ticks = 0;
        while acc.advance_inertia(1.0 / 60.0, 0.5).is_some() {
            ticks += 1;
            assert!(ticks < 100, "Trägheit sollte abklingen");
        }
        assert!(!acc.has_inertia());
    }

    #[test]
    fn test_discard_clears_everything() {
        let mut acc = CameraInputAccumulator::new();
        acc.add(CameraDelta::rotate(1.0, 0.0));
        acc.consume(0.1);
        acc.add(CameraDelta::zoom(0.3));
        acc.discard();
        assert!(!acc.has_inertia());
        assert!(acc.pending().is_zero());
        assert!(acc.advance_inertia(0.016, 0.1).is_none());
    }
}
