//! Scene Viewer Hub (Headless-Runner).
//!
//! Lädt ein Szenen-Dokument, startet die Wiedergabe und tickt mit 60 Hz,
//! bis die Wiedergabe am Bereichsende anhält.

use std::path::PathBuf;

use anyhow::Context;
use scene_viewer_hub::core::{CameraState, MicroState, Selection, VisibleSet};
use scene_viewer_hub::{ClockMode, Hub, HubEvent, Renderer, ViewerOptions};

/// Tick-Dauer bei 60 Hz.
const TICK_DT: f64 = 1.0 / 60.0;
/// Obergrenze, falls die Wiedergabe nie endet (Loop).
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Scene Viewer Hub v{} startet...", env!("CARGO_PKG_VERSION"));

    let scene_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("Aufruf: scene-viewer-hub <szene.json>")?;

    // Optionen aus TOML laden (oder Standardwerte)
    let config_path = ViewerOptions::config_path();
    let options = ViewerOptions::load_from_file(&config_path);

    let json = std::fs::read_to_string(&scene_path)
        .with_context(|| format!("Szene '{}' nicht lesbar", scene_path.display()))?;
    let mut hub = Hub::from_scene_json(&json, options, Box::new(LogRenderer::default()))?
        .with_clock(ClockMode::Driven);

    hub.subscribe(|event| {
        if let HubEvent::Committed { frame, reason, .. } = event {
            log::info!("Frame {} committet ({})", frame, reason);
        }
    });

    hub.start();
    hub.start_playback();

    let mut ticks = 0;
    loop {
        hub.tick(TICK_DT);
        ticks += 1;
        if !hub.state().runtime.is_frame_playing {
            break;
        }
        if ticks >= MAX_TICKS {
            log::warn!("Tick-Limit erreicht, Wiedergabe wird angehalten");
            hub.stop_playback();
            hub.tick(TICK_DT);
            break;
        }
    }

    let status = hub.state().runtime.status;
    log::info!(
        "Fertig nach {} Ticks: Frame {}, {} Neuberechnungen, {} fehlgeschlagene Commands",
        ticks,
        status.frame,
        hub.recompute_count(),
        hub.command_log().failures()
    );
    hub.dispose();
    Ok(())
}

/// Renderer, der nur Frame-Wechsel protokolliert.
#[derive(Default)]
struct LogRenderer {
    last_frame: Option<i64>,
}

impl Renderer for LogRenderer {
    fn update_camera(&mut self, _camera: &CameraState) {}

    fn apply_frame(&mut self, visible: &VisibleSet) {
        if self.last_frame != Some(visible.frame) {
            self.last_frame = Some(visible.frame);
            log::debug!("Renderer: Frame {} mit {} Items", visible.frame, visible.len());
        }
    }

    fn apply_micro_fx(
        &mut self,
        _micro: Option<&MicroState>,
        _camera: &CameraState,
        _visible: &VisibleSet,
    ) {
    }

    fn apply_selection(
        &mut self,
        _selection: Option<&Selection>,
        _camera: &CameraState,
        _visible: &VisibleSet,
    ) {
    }

    fn dispose(&mut self) {
        log::info!("Renderer freigegeben");
    }
}
