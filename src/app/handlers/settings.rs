//! Handler für Viewer-Einstellungen (Sichtfeld, Welt-Achsen).

use crate::app::events::HubEvent;
use crate::app::session::ViewerSession;

/// Setzt das Sichtfeld (geclampt auf 1..179 Grad).
pub fn set_fov(session: &mut ViewerSession, fov: f64) {
    let applied = session.camera.set_fov(fov);
    session.outbox.push(HubEvent::FovChanged { fov: applied });
}

/// Blendet die Welt-Achsen ein oder aus.
pub fn set_world_axes_visible(session: &mut ViewerSession, visible: bool) {
    if session.state.world_axes_visible == visible {
        return;
    }
    session.state.world_axes_visible = visible;
    session.outbox.push(HubEvent::WorldAxesChanged { visible });
}
