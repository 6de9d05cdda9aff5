//! Hub-Controller für die zentrale Command-Verarbeitung.

use super::events::{HubCommand, ViewerIntent};
use super::handlers;
use super::session::ViewerSession;
use crate::app::state::ViewerMode;

/// Dispatcht Commands an die Feature-Handler in `handlers/`.
#[derive(Debug, Default)]
pub struct HubController;

impl HubController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Übersetzt einen Intent anhand des committeten Zustands in Commands.
    pub fn map_intent(&self, session: &ViewerSession, intent: ViewerIntent) -> Vec<HubCommand> {
        super::intent_mapping::map_intent_to_commands(&session.state, &session.options, intent)
    }

    /// Führt einen mutierenden Command auf der Session aus.
    ///
    /// Camera-Deltas kommen hier nur im Sofort-Modus an; im Tick-Betrieb
    /// fasst der Hub sie vorher zusammen.
    pub fn handle_command(
        &mut self,
        session: &mut ViewerSession,
        command: HubCommand,
    ) -> anyhow::Result<()> {
        match command {
            // === Kamera ===
            HubCommand::CameraDelta(delta) => handlers::camera::apply_delta(session, delta),
            HubCommand::SetViewPreset { index, options } => {
                handlers::camera::set_view_preset(session, index, options)
            }
            HubCommand::SetViewByName { name } => {
                handlers::camera::set_view_by_name(session, &name)?
            }
            HubCommand::SnapToAxis { axis } => handlers::camera::snap_to_axis(session, axis),
            HubCommand::SetCameraState { patch } => handlers::camera::set_state(session, patch),
            HubCommand::ResetCamera => handlers::camera::reset(session),
            HubCommand::FocusOn { uuid, kind } => handlers::camera::focus_on(session, &uuid, kind),
            HubCommand::FocusOnPosition { position, options } => {
                handlers::camera::focus_on_position(session, position, options)?
            }
            HubCommand::StartAutoOrbit { options } => {
                handlers::camera::start_auto_orbit(session, options)
            }
            HubCommand::UpdateAutoOrbitSettings { settings } => {
                handlers::camera::update_auto_orbit_settings(session, settings)
            }
            HubCommand::StopAutoOrbit => handlers::camera::stop_auto_orbit(session),

            // === Frames & Wiedergabe ===
            HubCommand::SetActiveFrame { frame } => handlers::frame::set_active(session, frame),
            HubCommand::StepFrame { delta } => handlers::frame::step(session, delta),
            HubCommand::StartPlayback { fps, loop_playback } => {
                handlers::frame::start_playback(session, fps, loop_playback)
            }
            HubCommand::StopPlayback => handlers::frame::stop_playback(session),

            // === Modus ===
            HubCommand::SetMode { mode, uuid, kind } => {
                let active = handlers::mode::set(session, mode, uuid.as_deref(), kind);
                if active != mode {
                    log::debug!("Moduswechsel nach {} abgelehnt, bleibt {}", mode, active);
                }
            }
            HubCommand::ExitMode => {
                handlers::mode::set(session, ViewerMode::Macro, None, None);
            }
            HubCommand::FocusMode { uuid, kind } => {
                handlers::mode::focus(session, &uuid, kind);
            }

            // === Selektion ===
            HubCommand::Select { uuid, kind } => {
                handlers::selection::select(session, &uuid, kind);
            }
            HubCommand::ClearSelection => handlers::selection::clear(session),

            // === Filter ===
            HubCommand::SetTypeFilter { kind, enabled } => {
                handlers::filters::set_type_filter(session, kind, enabled)
            }
            HubCommand::SetAuxModule { name, enabled } => {
                handlers::filters::set_aux_module(session, &name, enabled)?
            }

            // === Einstellungen ===
            HubCommand::SetFov { fov } => handlers::settings::set_fov(session, fov),
            HubCommand::SetWorldAxesVisible { visible } => {
                handlers::settings::set_world_axes_visible(session, visible)
            }

            HubCommand::RequestRecompute { reason } => session.state.request_recompute(&reason),
        }

        Ok(())
    }
}
