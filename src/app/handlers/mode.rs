//! Handler für Makro/Mikro-Wechsel.

use crate::app::session::ViewerSession;
use crate::app::state::ViewerMode;
use crate::core::ItemKind;

/// Setzt den Modus (Mikro-Eintritt ist geschützt).
pub fn set(
    session: &mut ViewerSession,
    mode: ViewerMode,
    uuid: Option<&str>,
    kind: Option<ItemKind>,
) -> ViewerMode {
    let (controller, ctx) = session.mode_parts();
    controller.set(ctx, mode, uuid, kind)
}

/// Zurück in den Makro-Modus.
pub fn exit(session: &mut ViewerSession) -> ViewerMode {
    let (controller, ctx) = session.mode_parts();
    controller.exit(ctx)
}

/// Fokussiert ein Item im Mikro-Modus.
pub fn focus(session: &mut ViewerSession, uuid: &str, kind: Option<ItemKind>) -> ViewerMode {
    let (controller, ctx) = session.mode_parts();
    controller.focus(ctx, uuid, kind)
}
