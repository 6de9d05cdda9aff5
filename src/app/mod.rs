//! Application-Layer: Hub, Session, Controller, State und Events.

mod camera_input;
pub mod command_log;
pub mod controller;
pub mod controllers;
pub mod events;
pub mod handlers;
pub mod hub;
mod intent_mapping;
pub mod recompute;
mod render_snapshot;
pub mod session;
/// Shared State einer Viewer-Session
///
/// Dieses Modul verwaltet den Zustand der Session (Frame, Selektion, Modus, Filter).
pub mod state;

pub use camera_input::CameraInputAccumulator;
pub use command_log::{CommandLog, LoggedCommand};
pub use controller::HubController;
pub use events::{
    CameraDelta, EventBus, HubCommand, HubEvent, OrbitKey, SubscriptionId, ViewerIntent,
};
pub use hub::{ClockMode, Hub, TickPhase};
pub use session::ViewerSession;
pub use state::{
    FrameState, MicroBlockReason, PlaybackState, RuntimeFlags, RuntimeStatus, Selection,
    SharedState, ViewerMode,
};
