//! Viewer-Session: besitzt Zustand, Szenen-Index und alle Controller.
//!
//! Wird einmal pro Szene beim Bootstrap erzeugt und vom Hub exklusiv besessen.

use std::sync::Arc;

use super::controllers::{
    CameraController, FrameController, ModeContext, ModeController, SelectionController,
    VisibilityController,
};
use super::events::HubEvent;
use super::recompute;
use super::state::{FrameState, PlaybackState, SharedState};
use crate::core::camera::DEFAULT_DISTANCE;
use crate::core::{CameraEngine, CameraState, CameraTransition, SceneIndex, PRESET_SEQUENCE};
use crate::shared::ViewerOptions;

/// Zustand plus Controller einer Viewer-Session.
pub struct ViewerSession {
    pub(crate) state: SharedState,
    pub(crate) scene: Arc<SceneIndex>,
    pub(crate) camera: CameraController,
    pub(crate) transition: CameraTransition,
    pub(crate) selection: SelectionController,
    pub(crate) visibility: VisibilityController,
    pub(crate) frames: FrameController,
    pub(crate) mode: ModeController,
    pub(crate) options: ViewerOptions,
    pub(crate) outbox: Vec<HubEvent>,
    pub(crate) recompute_count: u64,
}

/// Initiale Kamera aus Szenen-Metriken: Target = Kugelmitte,
/// Distanz = Radius × Faktor, Winkel aus dem Start-Preset.
pub fn initial_camera(scene: &SceneIndex, options: &ViewerOptions) -> CameraState {
    let slot = options
        .initial_view_preset
        .rem_euclid(PRESET_SEQUENCE.len() as i64) as usize;
    let angles = PRESET_SEQUENCE[slot].angles();
    let (target, distance) = match scene.bounding_sphere() {
        Some(sphere) if sphere.radius > 0.0 => {
            (sphere.center, sphere.radius * options.radius_distance_factor)
        }
        Some(sphere) => (sphere.center, DEFAULT_DISTANCE),
        None => (glam::DVec3::ZERO, DEFAULT_DISTANCE),
    };
    CameraState {
        theta: angles.theta,
        phi: angles.phi,
        distance,
        target,
        fov: options.camera_fov,
    }
    .sanitized()
}

impl ViewerSession {
    /// Baut Zustand und Controller aus Szenen-Index und Optionen und
    /// berechnet das erste sichtbare Set.
    pub fn bootstrap(scene: Arc<SceneIndex>, options: ViewerOptions) -> Self {
        let options = options.validated();
        let engine = CameraEngine::new(
            initial_camera(&scene, &options),
            options.auto_orbit_speeds.clone(),
        );
        let frame = FrameState::new(
            scene.frame_range(),
            PlaybackState::new(options.playback_fps, options.playback_loop),
        );
        let mut state = SharedState::new(frame, *engine.state());
        state.view_preset_index = engine.view_preset_index();

        let mut session = Self {
            state,
            camera: CameraController::new(engine),
            transition: CameraTransition::new(options.transition_duration_secs),
            selection: SelectionController::new(),
            visibility: VisibilityController::new(),
            frames: FrameController::new(options.playback_fps),
            mode: ModeController::new(options.focus),
            scene,
            options,
            outbox: Vec::new(),
            recompute_count: 0,
        };
        recompute::recompute_derived_state(&mut session, "bootstrap");
        session.outbox.clear();

        log::info!(
            "Viewer-Session gestartet: {} Items, Frames {}..={}",
            session.scene.len(),
            session.state.frame.range.min,
            session.state.frame.range.max
        );
        session
    }

    /// Session-Zustand (read-only).
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Szenen-Index.
    pub fn scene(&self) -> &SceneIndex {
        &self.scene
    }

    /// Aktive Optionen.
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Anzahl bisheriger Neuberechnungen des sichtbaren Sets.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Zerlegt die Session in Modus-Controller und Kontext (disjunkte Borrows).
    pub(crate) fn mode_parts(&mut self) -> (&mut ModeController, ModeContext<'_>) {
        let Self {
            state,
            scene,
            camera,
            transition,
            selection,
            visibility,
            mode,
            outbox,
            ..
        } = self;
        (
            mode,
            ModeContext {
                state,
                scene: &**scene,
                camera,
                transition,
                selection: &*selection,
                visibility: &*visibility,
                outbox,
            },
        )
    }

    /// Spiegelt Kamera-Pose und Preset-Slot in den committeten Zustand.
    pub(crate) fn sync_camera(&mut self) {
        self.state.camera = *self.camera.state();
        self.state.view_preset_index = self.camera.view_preset_index();
    }

    /// `true`, wenn `uuid` jetzt im Mikro-Modus fokussiert werden darf.
    pub fn can_enter_micro(&self, uuid: &str) -> bool {
        self.mode.can_enter(
            &self.state,
            &self.scene,
            &self.selection,
            &self.visibility,
            uuid,
        )
    }

    /// Sichtbarkeit gegen das committete Set.
    pub fn is_visible(&self, uuid: &str) -> bool {
        self.visibility.is_visible(&self.state, uuid)
    }
}
