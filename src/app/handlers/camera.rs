//! Handler für Kamera-Operationen (Deltas, Sprünge, Auto-Orbit).
//!
//! Sprünge brechen eine laufende Überblendung ab, damit die neue Pose
//! nicht von der alten Interpolation überschrieben wird.

use glam::DVec3;

use super::{frame, mode};
use crate::app::events::CameraDelta;
use crate::app::session::ViewerSession;
use crate::core::{
    AutoOrbitOptions, AutoOrbitSettings, Axis, CameraStatePatch, FocusOptions, ItemKind,
    PresetOptions,
};

/// Wendet ein zusammengefasstes Delta direkt an.
pub fn apply_delta(session: &mut ViewerSession, delta: CameraDelta) {
    if delta.is_zero() {
        return;
    }
    session.transition.cancel();
    session
        .camera
        .apply_delta(&mut session.state.runtime, delta);
}

/// Springt auf einen Preset-Slot.
pub fn set_view_preset(session: &mut ViewerSession, index: i64, options: PresetOptions) {
    session.transition.cancel();
    let slot = session
        .camera
        .set_view_preset(&mut session.state.runtime, index, options);
    log::debug!("Ansicht-Preset {} → Slot {}", index, slot);
}

/// Springt auf eine benannte Ansicht.
pub fn set_view_by_name(session: &mut ViewerSession, name: &str) -> anyhow::Result<()> {
    let view = session
        .camera
        .set_view_by_name(&mut session.state.runtime, name)?;
    session.transition.cancel();
    log::debug!("Ansicht '{}' aktiv", view.as_str());
    Ok(())
}

/// Blickt entlang einer Welt-Achse.
pub fn snap_to_axis(session: &mut ViewerSession, axis: Axis) {
    session.transition.cancel();
    session
        .camera
        .snap_to_axis(&mut session.state.runtime, axis);
}

/// Setzt die Kamera-Pose explizit.
pub fn set_state(session: &mut ViewerSession, patch: CameraStatePatch) {
    session.transition.cancel();
    session.camera.set_state(&mut session.state.runtime, patch);
}

/// Setzt die Kamera auf den Session-Start zurück.
pub fn reset(session: &mut ViewerSession) {
    session.transition.cancel();
    session.camera.reset(&mut session.state.runtime);
}

/// Fokussiert ein Item: beendet den Auto-Orbit und betritt den Mikro-Modus.
pub fn focus_on(session: &mut ViewerSession, uuid: &str, kind: Option<ItemKind>) {
    stop_auto_orbit(session);
    mode::focus(session, uuid, kind);
}

/// Richtet die Kamera auf eine Welt-Position aus, ohne den Modus zu wechseln.
pub fn focus_on_position(
    session: &mut ViewerSession,
    position: DVec3,
    options: Option<FocusOptions>,
) -> anyhow::Result<()> {
    let options = options.unwrap_or_else(|| session.options.focus.to_focus_options());
    session
        .camera
        .focus_on_position(&mut session.state.runtime, position, &options)?;
    session.transition.cancel();
    Ok(())
}

/// Startet den Auto-Orbit: hält die Wiedergabe an und verlässt den Mikro-Modus.
pub fn start_auto_orbit(session: &mut ViewerSession, options: AutoOrbitOptions) {
    frame::stop_playback(session);
    mode::exit(session);
    // Rückkehr zur Makro-Pose sofort abschließen, der Orbit startet dort
    session.transition.finish(session.camera.engine_mut());
    session
        .camera
        .start_auto_orbit(&mut session.state.runtime, options);
    session.state.request_recompute("camera.startAutoOrbit");
}

/// Ändert Richtung oder Stufe eines laufenden Auto-Orbits.
pub fn update_auto_orbit_settings(session: &mut ViewerSession, settings: AutoOrbitSettings) {
    session.camera.update_auto_orbit_settings(settings);
}

/// Beendet den Auto-Orbit.
pub fn stop_auto_orbit(session: &mut ViewerSession) {
    let was_auto = session.state.runtime.is_camera_auto;
    session.camera.stop_auto_orbit(&mut session.state.runtime);
    if was_auto {
        session.state.request_recompute("camera.stopAutoOrbit");
    }
}
