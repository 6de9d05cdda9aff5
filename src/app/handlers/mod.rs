//! Feature-Handler für HubCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod camera;
pub mod filters;
pub mod frame;
pub mod mode;
pub mod selection;
pub mod settings;
