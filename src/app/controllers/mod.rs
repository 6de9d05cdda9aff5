//! Controller: kapseln die Zustandsübergänge je Subsystem.
//!
//! Controller mutieren `SharedState` nur synchron innerhalb des Hub-Ticks und
//! fordern Neuberechnungen lediglich an (`request_recompute`).

mod camera;
mod frame;
mod mode;
mod selection;
mod visibility;

pub use camera::CameraController;
pub use frame::{FrameController, PlaybackTick};
pub use mode::{ModeContext, ModeController};
pub use selection::SelectionController;
pub use visibility::VisibilityController;
