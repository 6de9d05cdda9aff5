//! Handler für Frame-Position und Wiedergabe.

use super::{camera, mode};
use crate::app::session::ViewerSession;

/// Setzt den aktiven Frame.
pub fn set_active(session: &mut ViewerSession, frame: f64) {
    session.frames.set_active(&mut session.state, frame);
}

/// Verschiebt den aktiven Frame relativ.
pub fn step(session: &mut ViewerSession, delta: i64) {
    session.frames.step(&mut session.state, delta);
}

/// Startet die Wiedergabe: beendet Auto-Orbit und Mikro-Modus.
pub fn start_playback(session: &mut ViewerSession, fps: Option<f64>, loop_playback: Option<bool>) {
    camera::stop_auto_orbit(session);
    mode::exit(session);
    session
        .frames
        .start_playback(&mut session.state, fps, loop_playback);
}

/// Hält die Wiedergabe an.
pub fn stop_playback(session: &mut ViewerSession) {
    session.frames.stop_playback(&mut session.state);
}
