use crate::core::ItemKind;

/// Verifizierte Einzel-Selektion. Existiert immer im Szenen-Index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// UUID des selektierten Items
    pub uuid: String,
    /// Art des Items (aus dem Index aufgelöst)
    pub kind: ItemKind,
}

impl Selection {
    /// Erstellt eine Selektion. Validierung passiert im `SelectionController`.
    pub fn new(uuid: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            uuid: uuid.into(),
            kind,
        }
    }
}
