//! Read-only Szenen-Index: UUID → Item/Kind, Adjazenz, Frame-Bereich, Bounding-Sphere.
//!
//! Wird einmal beim Bootstrap aus einem JSON-Szenendokument gebaut und danach
//! von allen Controllern nur gelesen.

use glam::DVec3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::camera::sanitize_position;

/// Art eines Szenen-Items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Punkt
    Point,
    /// Linie zwischen zwei Endpunkten
    Line,
    /// Hilfsobjekt (Grid, Achsen, Labels, ...)
    Aux,
}

impl ItemKind {
    /// Schlüssel im Typ-Filter (`points`, `lines`, `aux`).
    pub fn filter_key(self) -> &'static str {
        match self {
            ItemKind::Point => "points",
            ItemKind::Line => "lines",
            ItemKind::Aux => "aux",
        }
    }

    /// Parst einen Kind- oder Filter-Namen (`point`/`points`, ...).
    pub fn parse(name: &str) -> Option<ItemKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "point" | "points" => Some(ItemKind::Point),
            "line" | "lines" => Some(ItemKind::Line),
            "aux" => Some(ItemKind::Aux),
            _ => None,
        }
    }
}

// ── Szenendokument (serde) ──────────────────────────────────────────

/// Frames eines Items: einzelner Frame oder Liste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameSpec {
    /// Genau ein Frame
    Single(i64),
    /// Mehrere Frames
    List(Vec<i64>),
}

/// Metadaten eines Items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Eindeutige ID
    #[serde(default)]
    pub uuid: String,
}

/// Darstellungsrelevante Felder eines Items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Welt-Position (Punkte, Aux)
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    /// Frames, in denen das Item existiert (leer/fehlend = alle)
    #[serde(default)]
    pub frames: Option<FrameSpec>,
    /// Autor-seitige Sichtbarkeit
    #[serde(default)]
    pub visible: Option<bool>,
    /// Aux-Modul (z.B. `grid`, `axis`)
    #[serde(default)]
    pub module: Option<String>,
}

/// Endpunkt einer Linie: Referenz auf einen Punkt oder feste Koordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    /// UUID eines Punktes
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    /// Direkte Koordinate
    #[serde(default)]
    pub coord: Option<[f64; 3]>,
}

/// Punkt im Dokument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Metadaten
    #[serde(default)]
    pub meta: ItemMeta,
    /// Darstellung
    #[serde(default)]
    pub appearance: Appearance,
}

/// Linie im Dokument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Metadaten
    #[serde(default)]
    pub meta: ItemMeta,
    /// Darstellung
    #[serde(default)]
    pub appearance: Appearance,
    /// Erster Endpunkt
    #[serde(default)]
    pub end_a: Option<EndpointRecord>,
    /// Zweiter Endpunkt
    #[serde(default)]
    pub end_b: Option<EndpointRecord>,
    /// Zusätzliche Stützpunkte (Polylinie)
    #[serde(default)]
    pub vertices: Vec<[f64; 3]>,
}

/// Hilfsobjekt im Dokument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxRecord {
    /// Metadaten
    #[serde(default)]
    pub meta: ItemMeta,
    /// Darstellung
    #[serde(default)]
    pub appearance: Appearance,
}

/// Geparstes Szenendokument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Punkte
    #[serde(default)]
    pub points: Vec<PointRecord>,
    /// Linien
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    /// Hilfsobjekte
    #[serde(default)]
    pub aux: Vec<AuxRecord>,
}

// ── Index ───────────────────────────────────────────────────────────

/// Aufgelöster Linien-Endpunkt.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// Verweis auf einen Punkt
    Ref(String),
    /// Feste Koordinate
    Coord(DVec3),
}

/// Ein Item im Index.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    /// UUID
    pub uuid: String,
    /// Art
    pub kind: ItemKind,
    /// Frames (leer = in allen Frames)
    pub frames: Vec<i64>,
    /// Autor-seitige Sichtbarkeit
    pub visible: bool,
    /// Position (Punkte, Aux)
    pub position: Option<DVec3>,
    /// Endpunkte (nur Linien)
    pub endpoints: Option<(Endpoint, Endpoint)>,
    /// Stützpunkte (nur Linien)
    pub vertices: Vec<DVec3>,
    /// Aux-Modul
    pub module: Option<String>,
}

impl SceneItem {
    /// `true`, wenn das Item im Frame `frame` existiert.
    pub fn exists_in_frame(&self, frame: i64) -> bool {
        self.frames.is_empty() || self.frames.contains(&frame)
    }
}

/// Geschlossener Frame-Bereich `[min, max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    /// Kleinster Frame
    pub min: i64,
    /// Größter Frame
    pub max: i64,
}

impl FrameRange {
    /// Erstellt einen Bereich; vertauschte Grenzen werden sortiert.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Begrenzt `frame` auf den Bereich.
    pub fn clamp(&self, frame: i64) -> i64 {
        frame.clamp(self.min, self.max)
    }

    /// `true`, wenn `frame` im Bereich liegt.
    pub fn contains(&self, frame: i64) -> bool {
        (self.min..=self.max).contains(&frame)
    }
}

/// Umkugel aller bekannten Positionen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Mittelpunkt
    pub center: DVec3,
    /// Radius
    pub radius: f64,
}

fn to_vec3(raw: [f64; 3]) -> DVec3 {
    sanitize_position(DVec3::from_array(raw))
}

fn normalize_frames(spec: Option<FrameSpec>) -> Vec<i64> {
    match spec {
        None => Vec::new(),
        Some(FrameSpec::Single(frame)) => vec![frame],
        Some(FrameSpec::List(mut frames)) => {
            frames.sort_unstable();
            frames.dedup();
            frames
        }
    }
}

fn endpoint_from_record(record: Option<EndpointRecord>) -> Option<Endpoint> {
    let record = record?;
    if let Some(reference) = record
        .reference
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
    {
        return Some(Endpoint::Ref(reference));
    }
    record.coord.map(|c| Endpoint::Coord(to_vec3(c)))
}

/// Read-only Lookup für alle Controller.
#[derive(Debug, Clone, Default)]
pub struct SceneIndex {
    items: IndexMap<String, SceneItem>,
    point_lines: IndexMap<String, Vec<String>>,
    frame_range: FrameRange,
    bounds: Option<BoundingSphere>,
}

impl SceneIndex {
    /// Parst ein JSON-Szenendokument und baut den Index.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let document: SceneDocument = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Szenendokument ungültig: {}", e))?;
        Ok(Self::from_document(document))
    }

    /// Baut den Index aus einem bereits geparsten Dokument.
    pub fn from_document(document: SceneDocument) -> Self {
        let mut index = Self::default();

        for point in document.points {
            index.insert(SceneItem {
                uuid: point.meta.uuid,
                kind: ItemKind::Point,
                frames: normalize_frames(point.appearance.frames),
                visible: point.appearance.visible.unwrap_or(true),
                position: point.appearance.position.map(to_vec3),
                endpoints: None,
                vertices: Vec::new(),
                module: None,
            });
        }

        for line in document.lines {
            let endpoints = match (
                endpoint_from_record(line.end_a),
                endpoint_from_record(line.end_b),
            ) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            };
            index.insert(SceneItem {
                uuid: line.meta.uuid,
                kind: ItemKind::Line,
                frames: normalize_frames(line.appearance.frames),
                visible: line.appearance.visible.unwrap_or(true),
                position: None,
                endpoints,
                vertices: line.vertices.into_iter().map(to_vec3).collect(),
                module: None,
            });
        }

        for aux in document.aux {
            index.insert(SceneItem {
                uuid: aux.meta.uuid,
                kind: ItemKind::Aux,
                frames: normalize_frames(aux.appearance.frames),
                visible: aux.appearance.visible.unwrap_or(true),
                position: aux.appearance.position.map(to_vec3),
                endpoints: None,
                vertices: Vec::new(),
                module: aux.appearance.module,
            });
        }

        index.build_adjacency();
        index.frame_range = index.detect_frame_range();
        index.bounds = index.compute_bounds();

        log::info!(
            "Szenen-Index gebaut: {} Items, Frames {}..={}",
            index.items.len(),
            index.frame_range.min,
            index.frame_range.max
        );
        index
    }

    fn insert(&mut self, mut item: SceneItem) {
        item.uuid = item.uuid.trim().to_string();
        if item.uuid.is_empty() {
            log::warn!("{:?}-Item ohne UUID übersprungen", item.kind);
            return;
        }
        if self.items.contains_key(&item.uuid) {
            log::warn!("Doppelte UUID '{}' ignoriert (erstes Item bleibt)", item.uuid);
            return;
        }
        self.items.insert(item.uuid.clone(), item);
    }

    fn build_adjacency(&mut self) {
        let mut point_lines: IndexMap<String, Vec<String>> = IndexMap::new();
        for item in self.items.values() {
            let Some((a, b)) = &item.endpoints else {
                continue;
            };
            for endpoint in [a, b] {
                if let Endpoint::Ref(point) = endpoint {
                    let lines = point_lines.entry(point.clone()).or_default();
                    if !lines.contains(&item.uuid) {
                        lines.push(item.uuid.clone());
                    }
                }
            }
        }
        self.point_lines = point_lines;
    }

    fn detect_frame_range(&self) -> FrameRange {
        let mut frames = self.items.values().flat_map(|item| item.frames.iter());
        let Some(&first) = frames.next() else {
            return FrameRange::default();
        };
        let (min, max) = frames.fold((first, first), |(lo, hi), &f| (lo.min(f), hi.max(f)));
        FrameRange::new(min, max)
    }

    fn compute_bounds(&self) -> Option<BoundingSphere> {
        let mut positions: Vec<DVec3> = Vec::new();
        for item in self.items.values() {
            positions.extend(item.position);
            positions.extend(item.vertices.iter().copied());
            if let Some((a, b)) = &item.endpoints {
                for endpoint in [a, b] {
                    if let Endpoint::Coord(c) = endpoint {
                        positions.push(*c);
                    }
                }
            }
        }
        let first = *positions.first()?;
        let (min, max) = positions
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(BoundingSphere {
            center: (min + max) * 0.5,
            radius: (max - min).length() * 0.5,
        })
    }

    /// `true`, wenn die UUID im Index existiert.
    pub fn exists_uuid(&self, uuid: &str) -> bool {
        self.items.contains_key(uuid)
    }

    /// Art des Items mit dieser UUID.
    pub fn get_kind(&self, uuid: &str) -> Option<ItemKind> {
        self.items.get(uuid).map(|item| item.kind)
    }

    /// Item mit dieser UUID.
    pub fn item(&self, uuid: &str) -> Option<&SceneItem> {
        self.items.get(uuid)
    }

    /// Alle Items in Dokument-Reihenfolge.
    pub fn items(&self) -> impl Iterator<Item = &SceneItem> {
        self.items.values()
    }

    /// Anzahl der Items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true`, wenn der Index leer ist.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Linien, die einen Punkt als Endpunkt referenzieren.
    pub fn lines_at_point(&self, point_uuid: &str) -> &[String] {
        self.point_lines
            .get(point_uuid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Welt-Position eines Endpunkts (Referenzen werden über den Index aufgelöst).
    pub fn endpoint_position(&self, endpoint: &Endpoint) -> Option<DVec3> {
        match endpoint {
            Endpoint::Coord(c) => Some(*c),
            Endpoint::Ref(uuid) => self.items.get(uuid).and_then(|item| item.position),
        }
    }

    /// Aus den Frames aller Items ermittelter Bereich (`0..=0` ohne Frames).
    pub fn frame_range(&self) -> FrameRange {
        self.frame_range
    }

    /// Umkugel aller Positionen, `None` bei leerer Szene.
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounds
    }
}
