//! Core-Domänentypen: Kamera, Ansichten, Szenen-Index, Sichtbarkeit, Mikro-Zustand.

pub mod camera;
pub mod micro_state;
pub mod scene_index;
pub mod selection;
pub mod transition;
pub mod view_defs;
pub mod visible_set;

pub use camera::{
    sanitize_position, AutoOrbitOptions, AutoOrbitSettings, CameraEngine, CameraState,
    CameraStatePatch, FocusMode, FocusOptions, OrbitDirection, PresetOptions,
    DEFAULT_AUTO_ORBIT_SPEEDS,
};
pub use micro_state::{compute_micro_state, LocalBounds, MicroState};
pub use scene_index::{
    BoundingSphere, Endpoint, FrameRange, ItemKind, SceneDocument, SceneIndex, SceneItem,
};
pub use selection::Selection;
pub use transition::CameraTransition;
pub use view_defs::{Axis, ViewKey, PRESET_SEQUENCE};
pub use visible_set::{compute_visible_set, Filters, TypeFilters, VisibleSet};
