//! Filter-Modell und Berechnung des sichtbaren Sets.

use indexmap::{IndexMap, IndexSet};

use super::scene_index::{ItemKind, SceneIndex};

/// Aux-Module, die immer im Filter auftauchen (Standard: aus).
pub const DEFAULT_AUX_MODULES: [&str; 2] = ["grid", "axis"];

/// Typ-Filter je Item-Art (Standard: alle an).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFilters {
    /// Punkte anzeigen
    pub points: bool,
    /// Linien anzeigen
    pub lines: bool,
    /// Hilfsobjekte anzeigen
    pub aux: bool,
}

impl Default for TypeFilters {
    fn default() -> Self {
        Self {
            points: true,
            lines: true,
            aux: true,
        }
    }
}

impl TypeFilters {
    /// Filter-Flag für eine Item-Art.
    pub fn enabled(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::Point => self.points,
            ItemKind::Line => self.lines,
            ItemKind::Aux => self.aux,
        }
    }

    fn slot_mut(&mut self, kind: ItemKind) -> &mut bool {
        match kind {
            ItemKind::Point => &mut self.points,
            ItemKind::Line => &mut self.lines,
            ItemKind::Aux => &mut self.aux,
        }
    }
}

/// Kanonische Filter: Typ-Flags plus benannte Aux-Module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    /// Typ-Filter
    pub types: TypeFilters,
    /// Aux-Module (Name → an/aus)
    pub aux_modules: IndexMap<String, bool>,
}

impl Default for Filters {
    fn default() -> Self {
        let mut filters = Self {
            types: TypeFilters::default(),
            aux_modules: IndexMap::new(),
        };
        filters.normalize();
        filters
    }
}

impl Filters {
    /// Bringt die Filter in kanonische Form: Standard-Module vorhanden,
    /// Modulnamen getrimmt, leere Namen entfernt.
    pub fn normalize(&mut self) {
        let mut canonical: IndexMap<String, bool> = DEFAULT_AUX_MODULES
            .iter()
            .map(|name| (name.to_string(), false))
            .collect();
        for (name, enabled) in self.aux_modules.drain(..) {
            let name = name.trim().to_string();
            if !name.is_empty() {
                canonical.insert(name, enabled);
            }
        }
        self.aux_modules = canonical;
    }

    /// Setzt ein Typ-Flag. Gibt `true` zurück, wenn sich etwas geändert hat.
    pub fn set_type(&mut self, kind: ItemKind, enabled: bool) -> bool {
        let slot = self.types.slot_mut(kind);
        let changed = *slot != enabled;
        *slot = enabled;
        changed
    }

    /// Setzt ein Aux-Modul. Leere Namen werden abgelehnt (`None`),
    /// sonst `Some(changed)`.
    pub fn set_aux_module(&mut self, name: &str, enabled: bool) -> Option<bool> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let previous = self.aux_modules.insert(name.to_string(), enabled);
        Some(previous != Some(enabled))
    }

    /// Flag eines Aux-Moduls (unbekannt = aus).
    pub fn aux_module(&self, name: &str) -> bool {
        self.aux_modules.get(name.trim()).copied().unwrap_or(false)
    }
}

/// Abgeleitete Menge aller aktuell darstellbaren Item-IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    /// Frame, für den das Set berechnet wurde
    pub frame: i64,
    /// Sichtbare Punkte
    pub points: IndexSet<String>,
    /// Sichtbare Linien
    pub lines: IndexSet<String>,
    /// Sichtbare Hilfsobjekte
    pub aux: IndexSet<String>,
    /// Aux-Modul-Flags für den Renderer
    pub aux_modules: IndexMap<String, bool>,
}

impl VisibleSet {
    /// Leeres Set für einen Frame.
    pub fn empty(frame: i64) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// `true`, wenn die UUID in irgendeiner Kategorie sichtbar ist.
    pub fn contains(&self, uuid: &str) -> bool {
        self.points.contains(uuid) || self.lines.contains(uuid) || self.aux.contains(uuid)
    }

    /// Sichtbare IDs einer Item-Art.
    pub fn of_kind(&self, kind: ItemKind) -> &IndexSet<String> {
        match kind {
            ItemKind::Point => &self.points,
            ItemKind::Line => &self.lines,
            ItemKind::Aux => &self.aux,
        }
    }

    /// Gesamtzahl sichtbarer Items.
    pub fn len(&self) -> usize {
        self.points.len() + self.lines.len() + self.aux.len()
    }

    /// `true`, wenn nichts sichtbar ist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Berechnet das sichtbare Set aus Frame, Filtern und Szenen-Index.
///
/// Ein Item ist sichtbar, wenn sein Typ-Filter an ist, es nicht explizit
/// unsichtbar ist und es im Frame existiert (ohne Frame-Angabe: immer).
pub fn compute_visible_set(scene: &SceneIndex, frame: i64, filters: &Filters) -> VisibleSet {
    let mut set = VisibleSet {
        frame,
        aux_modules: filters.aux_modules.clone(),
        ..VisibleSet::default()
    };
    for item in scene.items() {
        if !filters.types.enabled(item.kind) || !item.visible || !item.exists_in_frame(frame) {
            continue;
        }
        let bucket = match item.kind {
            ItemKind::Point => &mut set.points,
            ItemKind::Line => &mut set.lines,
            ItemKind::Aux => &mut set.aux,
        };
        bucket.insert(item.uuid.clone());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneIndex {
        SceneIndex::from_json_str(
            r#"{
                "points": [
                    {"meta": {"uuid": "p0"}, "appearance": {"frames": [0, 1]}},
                    {"meta": {"uuid": "p1"}},
                    {"meta": {"uuid": "p2"}, "appearance": {"visible": false}}
                ],
                "lines": [{"meta": {"uuid": "l0"}, "appearance": {"frames": 2}}],
                "aux": [{"meta": {"uuid": "a0"}}]
            }"#,
        )
        .expect("Szene sollte parsen")
    }

    #[test]
    fn test_frames_and_visible_flag_are_respected() {
        let index = scene();
        let set = compute_visible_set(&index, 1, &Filters::default());
        assert!(set.contains("p0"));
        assert!(set.contains("p1"));
        assert!(!set.contains("p2"));
        assert!(!set.contains("l0"));
        assert!(set.contains("a0"));

        let later = compute_visible_set(&index, 2, &Filters::default());
        assert!(!later.contains("p0"));
        assert!(later.contains("l0"));
    }

    #[test]
    fn test_type_filter_hides_whole_kind() {
        let index = scene();
        let mut filters = Filters::default();
        assert!(filters.set_type(ItemKind::Point, false));
        assert!(!filters.set_type(ItemKind::Point, false));
        let set = compute_visible_set(&index, 0, &filters);
        assert!(set.points.is_empty());
        assert_eq!(set.aux.len(), 1);
    }

    #[test]
    fn test_normalize_adds_default_modules_and_drops_blank_names() {
        let mut filters = Filters {
            types: TypeFilters::default(),
            aux_modules: IndexMap::from([(" grid ".to_string(), true), ("  ".to_string(), true)]),
        };
        filters.normalize();
        assert!(filters.aux_module("grid"));
        assert!(!filters.aux_module("axis"));
        assert_eq!(filters.aux_modules.len(), 2);
        assert_eq!(filters.set_aux_module("", true), None);
        assert_eq!(filters.set_aux_module("labels", true), Some(true));
    }
}
