use crate::app::events::HubEvent;
use crate::app::state::{Selection, SharedState};
use crate::core::{ItemKind, SceneIndex};

/// Kanonisches Einzel-Selektionsmodell, validiert gegen den Szenen-Index.
///
/// Selektion ist immer entweder eine verifizierte Referenz oder `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionController;

impl SelectionController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Prüft eine UUID gegen den Index und löst die Art auf.
    ///
    /// Eine explizit übergebene Art, die nicht zum Index passt, wird durch
    /// die Art aus dem Index ersetzt.
    pub fn sanitize(
        &self,
        scene: &SceneIndex,
        uuid: &str,
        kind: Option<ItemKind>,
    ) -> Option<Selection> {
        let uuid = uuid.trim();
        if uuid.is_empty() {
            return None;
        }
        let indexed = scene.get_kind(uuid)?;
        if let Some(requested) = kind.filter(|k| *k != indexed) {
            log::debug!(
                "Selektion '{}': Art {:?} passt nicht zum Index, verwende {:?}",
                uuid,
                requested,
                indexed
            );
        }
        Some(Selection::new(uuid, indexed))
    }

    /// Selektiert ein Item. Ungültige Referenzen leeren die Selektion.
    ///
    /// Im Makro-Modus wird eine Hervorhebung angefordert; im Mikro-Modus hat
    /// die Fokus-Darstellung Vorrang.
    pub fn select(
        &self,
        state: &mut SharedState,
        scene: &SceneIndex,
        uuid: &str,
        kind: Option<ItemKind>,
        outbox: &mut Vec<HubEvent>,
    ) -> Option<Selection> {
        let Some(selection) = self.sanitize(scene, uuid, kind) else {
            log::warn!("Selektion verworfen: '{}' nicht im Szenen-Index", uuid.trim());
            self.clear(state, outbox);
            return None;
        };

        state.selection = Some(selection.clone());
        if !state.is_micro() {
            outbox.push(HubEvent::HighlightsCleared);
            outbox.push(HubEvent::HighlightRequested {
                uuid: selection.uuid.clone(),
            });
        }
        state.request_recompute("selection.select");
        Some(selection)
    }

    /// Leert die Selektion und fordert das Entfernen aller Hervorhebungen an.
    pub fn clear(&self, state: &mut SharedState, outbox: &mut Vec<HubEvent>) {
        let had_selection = state.selection.take().is_some();
        outbox.push(HubEvent::HighlightsCleared);
        if had_selection {
            state.request_recompute("selection.clear");
        }
    }

    /// Aktuelle Selektion.
    pub fn get<'a>(&self, state: &'a SharedState) -> Option<&'a Selection> {
        state.selection.as_ref()
    }

    /// Erneuert die Hervorhebung der bestehenden Selektion ohne erneutes Selektieren.
    pub fn refresh_highlight(&self, state: &SharedState, outbox: &mut Vec<HubEvent>) {
        outbox.push(HubEvent::HighlightsCleared);
        if let Some(selection) = &state.selection {
            outbox.push(HubEvent::HighlightRequested {
                uuid: selection.uuid.clone(),
            });
        }
    }
}
