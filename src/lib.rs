//! Scene Viewer Hub Library.
//! Laufzeit-Kern eines 3D-Szenen-Viewers: Command-Queue, Kamera, Modi,
//! Selektion, Sichtbarkeit und Frame-Wiedergabe.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    CameraDelta, ClockMode, Hub, HubCommand, HubEvent, MicroBlockReason, RuntimeStatus,
    SharedState, ViewerIntent, ViewerMode,
};
pub use core::{
    Axis, CameraEngine, CameraState, FrameRange, ItemKind, MicroState, SceneIndex, Selection,
    ViewKey, VisibleSet,
};
pub use shared::{NullRenderer, PickHit, RenderSnapshot, Renderer, ViewerOptions};
