//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und dem externen Renderer geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod render_snapshot;
mod renderer;

pub use options::{DebugFlags, FocusDefaults, KeyboardTuning, PointerTuning, ViewerOptions};
pub use render_snapshot::RenderSnapshot;
pub use renderer::{NullRenderer, PickHit, Renderer};
