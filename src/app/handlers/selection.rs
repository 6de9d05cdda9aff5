//! Handler für Selektions-Operationen.

use crate::app::session::ViewerSession;
use crate::app::state::Selection;
use crate::core::ItemKind;

/// Selektiert ein Item; ungültige UUIDs leeren die Selektion.
pub fn select(session: &mut ViewerSession, uuid: &str, kind: Option<ItemKind>) -> Option<Selection> {
    session.selection.select(
        &mut session.state,
        &session.scene,
        uuid,
        kind,
        &mut session.outbox,
    )
}

/// Leert die Selektion.
pub fn clear(session: &mut ViewerSession) {
    session
        .selection
        .clear(&mut session.state, &mut session.outbox);
}
