//! Handler für Typ-Filter und Aux-Module.

use crate::app::session::ViewerSession;
use crate::core::ItemKind;

/// Setzt einen Typ-Filter.
pub fn set_type_filter(session: &mut ViewerSession, kind: ItemKind, enabled: bool) {
    session
        .visibility
        .set_type_filter(&mut session.state, kind, enabled);
}

/// Setzt ein Aux-Modul; leere Namen werden als Fehler gemeldet.
pub fn set_aux_module(session: &mut ViewerSession, name: &str, enabled: bool) -> anyhow::Result<()> {
    session
        .visibility
        .set_aux_module(&mut session.state, name, enabled)?;
    Ok(())
}
