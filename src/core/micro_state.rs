//! Mikro-Zustand: Fokus-Position, verwandte Items und lokale Bounds eines Items.

use glam::DVec3;

use super::scene_index::{Endpoint, ItemKind, SceneIndex};

/// Kantenlänge der lokalen Bounds eines Punktes.
const POINT_BOUNDS_SIZE: f64 = 0.5;
/// Kantenlänge der lokalen Bounds eines Hilfsobjekts.
const AUX_BOUNDS_SIZE: f64 = 2.0;
/// Mindestausdehnung je Achse bei Linien.
const LINE_MIN_EXTENT: f64 = 0.1;

/// Achsenparalleler Quader um das Fokus-Item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalBounds {
    /// Mittelpunkt
    pub center: DVec3,
    /// Ausdehnung je Achse
    pub size: DVec3,
}

/// Berechnetes Bundle für den Mikro-Modus. Wird nie von Hand editiert.
#[derive(Debug, Clone, PartialEq)]
pub struct MicroState {
    /// Fokussiertes Item
    pub focus_uuid: String,
    /// Art des fokussierten Items
    pub kind: ItemKind,
    /// Welt-Position des Fokus (falls bestimmbar)
    pub focus_position: Option<DVec3>,
    /// Fokus selbst plus verwandte Items
    pub related_uuids: Vec<String>,
    /// Lokale Bounds (falls bestimmbar)
    pub local_bounds: Option<LocalBounds>,
}

fn aabb(points: &[DVec3]) -> Option<LocalBounds> {
    let first = *points.first()?;
    let (min, max) = points
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    Some(LocalBounds {
        center: (min + max) * 0.5,
        size: (max - min).max(DVec3::splat(LINE_MIN_EXTENT)),
    })
}

/// Baut den Mikro-Zustand für `uuid`. `None`, wenn die UUID unbekannt ist.
pub fn compute_micro_state(scene: &SceneIndex, uuid: &str) -> Option<MicroState> {
    let item = scene.item(uuid)?;
    let mut related = vec![item.uuid.clone()];

    let (focus_position, local_bounds) = match item.kind {
        ItemKind::Point => {
            related.extend(scene.lines_at_point(uuid).iter().cloned());
            let bounds = item.position.map(|center| LocalBounds {
                center,
                size: DVec3::splat(POINT_BOUNDS_SIZE),
            });
            (item.position, bounds)
        }
        ItemKind::Line => {
            let mut ends = Vec::with_capacity(2);
            if let Some((a, b)) = &item.endpoints {
                for endpoint in [a, b] {
                    if let Endpoint::Ref(point) = endpoint {
                        if scene.exists_uuid(point) && !related.contains(point) {
                            related.push(point.clone());
                        }
                    }
                    ends.extend(scene.endpoint_position(endpoint));
                }
            }
            let bounds = if ends.len() == 2 {
                aabb(&ends)
            } else {
                aabb(&item.vertices)
            };
            let focus = if ends.len() == 2 {
                Some((ends[0] + ends[1]) * 0.5)
            } else {
                bounds.map(|b| b.center)
            };
            (focus, bounds)
        }
        ItemKind::Aux => {
            let bounds = item.position.map(|center| LocalBounds {
                center,
                size: DVec3::splat(AUX_BOUNDS_SIZE),
            });
            (item.position, bounds)
        }
    };

    Some(MicroState {
        focus_uuid: item.uuid.clone(),
        kind: item.kind,
        focus_position,
        related_uuids: related,
        local_bounds,
    })
}
