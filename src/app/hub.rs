//! Hub: Command-Queue, Tick-Protokoll und Commit-Scheduler.
//!
//! Eingaben werden nur gepuffert. Pro Tick leert der Hub die Queue in
//! Ankunftsreihenfolge, schreibt Trägheit, Wiedergabe und Überblendung
//! fort, berechnet das sichtbare Set höchstens einmal neu und übergibt
//! dem Renderer genau einen konsistenten Snapshot.

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Context;
use glam::DVec2;
use indexmap::IndexSet;

use super::camera_input::CameraInputAccumulator;
use super::command_log::CommandLog;
use super::controller::HubController;
use super::events::{EventBus, HubCommand, HubEvent, SubscriptionId, ViewerIntent};
use super::handlers;
use super::recompute::recompute_derived_state;
use super::render_snapshot;
use super::session::ViewerSession;
use super::state::{SharedState, ViewerMode};
use crate::core::{AutoOrbitOptions, ItemKind, PresetOptions, SceneIndex, Selection};
use crate::shared::{PickHit, RenderSnapshot, Renderer, ViewerOptions};

/// Taktquelle des Hubs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockMode {
    /// Ein externer Frame-Takt ruft `tick(dt)` auf
    #[default]
    Driven,
    /// Kein Frame-Takt: jedes `enqueue` wird sofort committet,
    /// Überblendungen enden sofort, Deltas wirken ohne Trägheit
    Immediate,
}

/// Phase innerhalb eines Ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TickPhase {
    /// Kein Tick aktiv
    #[default]
    Idle,
    /// Queue wird geleert, Neuberechnungen werden nur angefordert
    Draining,
    /// Einmalige Neuberechnung und Übergabe an den Renderer
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Disposed,
}

/// Eintrag der Command-Queue.
#[derive(Debug, Clone, PartialEq)]
enum QueuedCommand {
    Command(HubCommand),
    /// Wendet die aufsummierten Kamera-Deltas an; steht immer am Ende der Queue
    ApplyCameraDeltas,
}

/// Laufzeit-Kern einer Viewer-Session.
pub struct Hub {
    session: ViewerSession,
    controller: HubController,
    renderer: Box<dyn Renderer>,
    queue: VecDeque<QueuedCommand>,
    camera_input: CameraInputAccumulator,
    delta_apply_scheduled: bool,
    phase: TickPhase,
    lifecycle: Lifecycle,
    clock: ClockMode,
    events: EventBus,
    command_log: CommandLog,
    last_snapshot: Option<RenderSnapshot>,
}

/// Fasst die Commit-Gründe als `erster(+n)` zusammen.
fn summarize_reasons(reasons: &[String]) -> String {
    let unique: IndexSet<&str> = reasons.iter().map(String::as_str).collect();
    match unique.first() {
        None => "unspecified".to_string(),
        Some(first) if unique.len() == 1 => (*first).to_string(),
        Some(first) => format!("{}(+{})", first, unique.len() - 1),
    }
}

impl Hub {
    /// Bootstrapt eine Session über einem Szenen-Index.
    pub fn new(scene: Arc<SceneIndex>, options: ViewerOptions, renderer: Box<dyn Renderer>) -> Self {
        Self {
            session: ViewerSession::bootstrap(scene, options),
            controller: HubController::new(),
            renderer,
            queue: VecDeque::new(),
            camera_input: CameraInputAccumulator::new(),
            delta_apply_scheduled: false,
            phase: TickPhase::Idle,
            lifecycle: Lifecycle::Idle,
            clock: ClockMode::Driven,
            events: EventBus::new(),
            command_log: CommandLog::new(),
            last_snapshot: None,
        }
    }

    /// Parst ein Szenen-Dokument und bootstrapt die Session.
    pub fn from_scene_json(
        json: &str,
        options: ViewerOptions,
        renderer: Box<dyn Renderer>,
    ) -> anyhow::Result<Self> {
        let scene = SceneIndex::from_json_str(json).context("Szenen-Dokument ungültig")?;
        Ok(Self::new(Arc::new(scene), options, renderer))
    }

    /// Setzt die Taktquelle.
    pub fn with_clock(mut self, clock: ClockMode) -> Self {
        self.clock = clock;
        self
    }

    // ── Lebenszyklus ────────────────────────────────────────────────

    /// Startet den Hub und fordert einen ersten Commit an.
    pub fn start(&mut self) {
        match self.lifecycle {
            Lifecycle::Disposed => {
                log::warn!("Hub bereits freigegeben, Start ignoriert");
                return;
            }
            Lifecycle::Running => return,
            Lifecycle::Idle => {}
        }
        self.lifecycle = Lifecycle::Running;
        self.session.state.request_recompute("hub.start");
        log::info!("Hub gestartet ({:?})", self.clock);
        if self.clock == ClockMode::Immediate {
            self.tick(0.0);
        }
    }

    /// Hält den Tick an; gepufferte Commands bleiben erhalten.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Idle;
            log::info!("Hub angehalten");
        }
    }

    /// Gibt den Hub frei. Danach werden keine Commands mehr angenommen.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.lifecycle = Lifecycle::Disposed;
        self.queue.clear();
        self.delta_apply_scheduled = false;
        self.camera_input.discard();
        self.events.clear();
        self.renderer.dispose();
        log::info!("Hub freigegeben");
    }

    /// `true` zwischen `start` und `stop`/`dispose`.
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// `true` nach `dispose`.
    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// Leitet eine Viewport-Größe an den Renderer weiter.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.is_disposed() {
            return;
        }
        self.renderer.resize(width, height);
    }

    // ── Queue ───────────────────────────────────────────────────────

    /// Nimmt einen Command an. Gibt `false` zurück, wenn der Hub freigegeben ist.
    pub fn enqueue(&mut self, command: HubCommand) -> bool {
        if self.is_disposed() {
            log::debug!("Command '{}' verworfen: Hub freigegeben", command.label());
            return false;
        }

        match command {
            HubCommand::CameraDelta(delta) => {
                if self.camera_input.add(delta) && !self.delta_apply_scheduled {
                    self.queue.push_back(QueuedCommand::ApplyCameraDeltas);
                    self.delta_apply_scheduled = true;
                }
            }
            command => {
                if command.is_camera_jump() {
                    self.discard_camera_motion();
                }
                let marker = self.take_delta_marker();
                self.queue.push_back(QueuedCommand::Command(command));
                if marker {
                    self.queue.push_back(QueuedCommand::ApplyCameraDeltas);
                }
            }
        }

        if self.clock == ClockMode::Immediate && self.is_running() {
            self.tick(0.0);
        }
        true
    }

    /// Übersetzt einen Intent und nimmt die resultierenden Commands an.
    pub fn handle_intent(&mut self, intent: ViewerIntent) -> bool {
        let commands = self.controller.map_intent(&self.session, intent);
        commands
            .into_iter()
            .fold(true, |accepted, command| self.enqueue(command) && accepted)
    }

    /// Anzahl gepufferter Queue-Einträge (inklusive Delta-Marker).
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    fn take_delta_marker(&mut self) -> bool {
        if !self.delta_apply_scheduled {
            return false;
        }
        self.queue
            .retain(|entry| *entry != QueuedCommand::ApplyCameraDeltas);
        true
    }

    /// Verwirft offene Deltas und Trägheit (vor Kamera-Sprüngen).
    fn discard_camera_motion(&mut self) {
        self.camera_input.discard();
        if self.take_delta_marker() {
            self.delta_apply_scheduled = false;
        }
    }

    // ── Tick ────────────────────────────────────────────────────────

    /// Ein Render-Tick. Liefert den committeten Snapshot, solange der Hub läuft.
    pub fn tick(&mut self, dt: f64) -> Option<RenderSnapshot> {
        if !self.is_running() {
            return None;
        }
        let immediate = self.clock == ClockMode::Immediate;
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.session.options.max_tick_dt_secs)
        } else {
            0.0
        };

        self.phase = TickPhase::Draining;
        let fresh_input = self.drain_queue(immediate);
        self.advance_time(dt, immediate, fresh_input);

        self.phase = TickPhase::Committing;
        self.commit();
        self.session.sync_camera();
        let snapshot = render_snapshot::build(&self.session.state);
        self.present(&snapshot);
        self.dispatch_events();

        self.phase = TickPhase::Idle;
        self.last_snapshot = Some(snapshot.clone());
        Some(snapshot)
    }

    /// Arbeitet die Queue ab. Gibt `true` zurück, wenn in diesem Tick neue
    /// Kamera-Deltas angekommen sind.
    fn drain_queue(&mut self, immediate: bool) -> bool {
        let damping = if immediate {
            0.0
        } else {
            self.session.options.damping_factor
        };
        let mut fresh_input = false;
        while let Some(entry) = self.queue.pop_front() {
            match entry {
                QueuedCommand::ApplyCameraDeltas => {
                    self.delta_apply_scheduled = false;
                    fresh_input |= !self.camera_input.pending().is_zero();
                    if let Some(delta) = self.camera_input.consume(damping) {
                        handlers::camera::apply_delta(&mut self.session, delta);
                    }
                }
                QueuedCommand::Command(command) => self.apply_command(command),
            }
        }
        fresh_input
    }

    fn apply_command(&mut self, command: HubCommand) {
        let label = command.label();
        if self.session.options.debug.trace_commands {
            log::info!("Command: {:?}", command);
        }
        let outcome = self
            .controller
            .handle_command(&mut self.session, command.clone());
        if let Err(err) = &outcome {
            log::warn!("Command '{}' fehlgeschlagen: {:#}", label, err);
        }
        self.command_log.record(command, &outcome);
    }

    fn advance_time(&mut self, dt: f64, immediate: bool, fresh_input: bool) {
        let session = &mut self.session;

        session.camera.update(dt);
        if let Some(step) = self
            .camera_input
            .advance_inertia(dt, session.options.damping_factor)
        {
            if fresh_input || !session.transition.is_active() {
                handlers::camera::apply_delta(session, step);
            } else {
                // Restbewegung älterer Eingaben: die Überblendung hat Vorrang
                self.camera_input.discard();
            }
        }

        let playback = session.frames.update_playback(&mut session.state, dt);
        if playback.stopped {
            session.outbox.push(HubEvent::PlaybackStopped {
                frame: session.state.frame.current,
            });
        }

        if immediate {
            session.transition.finish(session.camera.engine_mut());
        } else {
            session
                .transition
                .update(dt, session.camera.engine_mut());
        }
    }

    /// Höchstens eine Neuberechnung pro Tick, mit zusammengefassten Gründen.
    fn commit(&mut self) {
        let Some(reasons) = self.session.state.take_commit_request() else {
            return;
        };
        let reason = summarize_reasons(&reasons);
        let visible = recompute_derived_state(&mut self.session, &reason);
        if self.session.options.debug.trace_commits {
            log::info!(
                "Commit '{}': Frame {}, {} sichtbar",
                reason,
                visible.frame,
                visible.len()
            );
        } else {
            log::debug!(
                "Commit '{}': Frame {}, {} sichtbar",
                reason,
                visible.frame,
                visible.len()
            );
        }
    }

    fn present(&mut self, snapshot: &RenderSnapshot) {
        let camera = &snapshot.camera;
        let visible = snapshot.visible_set.as_ref();
        self.renderer.update_camera(camera);
        self.renderer.apply_frame(visible);
        self.renderer
            .apply_micro_fx(snapshot.micro_state.as_ref(), camera, visible);
        self.renderer
            .apply_selection(snapshot.selection_highlight(), camera, visible);
    }

    fn dispatch_events(&mut self) {
        let events = std::mem::take(&mut self.session.outbox);
        for event in &events {
            match event {
                HubEvent::HighlightRequested { uuid } => self.renderer.set_highlight(uuid),
                HubEvent::HighlightsCleared => self.renderer.clear_all_highlights(),
                HubEvent::WorldAxesChanged { visible } => {
                    self.renderer.set_world_axes_visible(*visible)
                }
                _ => {}
            }
            self.events.emit(event);
        }
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Zuletzt committeter Zustand.
    pub fn state(&self) -> &SharedState {
        self.session.state()
    }

    /// Zuletzt an den Renderer übergebener Snapshot.
    pub fn last_snapshot(&self) -> Option<&RenderSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Szenen-Index der Session.
    pub fn scene(&self) -> &SceneIndex {
        self.session.scene()
    }

    /// Aktive Optionen.
    pub fn options(&self) -> &ViewerOptions {
        self.session.options()
    }

    /// Aktuelle Tick-Phase.
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    /// Anzahl bisheriger Neuberechnungen des sichtbaren Sets.
    pub fn recompute_count(&self) -> u64 {
        self.session.recompute_count()
    }

    /// Log der angewendeten Commands.
    pub fn command_log(&self) -> &CommandLog {
        &self.command_log
    }

    /// Reines Prädikat: darf `uuid` jetzt im Mikro-Modus fokussiert werden?
    pub fn can_enter(&self, uuid: &str) -> bool {
        self.session.can_enter_micro(uuid)
    }

    /// Sichtbarkeit gegen das committete Set.
    pub fn is_visible(&self, uuid: &str) -> bool {
        self.session.is_visible(uuid)
    }

    /// Pick über den Renderer; unsichtbare Treffer werden verworfen.
    pub fn pick_object_at(&mut self, ndc: DVec2) -> Option<PickHit> {
        if self.is_disposed() {
            return None;
        }
        let hit = self.renderer.pick_object_at(ndc)?;
        if self.session.is_visible(&hit.uuid) {
            Some(hit)
        } else {
            log::debug!("Pick '{}' verworfen (nicht sichtbar)", hit.uuid);
            None
        }
    }

    // ── Ereignisse ──────────────────────────────────────────────────

    /// Registriert einen Beobachter für committete Ereignisse.
    pub fn subscribe(&mut self, listener: impl FnMut(&HubEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Entfernt einen Beobachter.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ── Kurzformen ──────────────────────────────────────────────────

    /// Selektiert ein Item (Art aus dem Index).
    pub fn select(&mut self, uuid: &str) -> bool {
        self.enqueue(HubCommand::Select {
            uuid: uuid.to_string(),
            kind: None,
        })
    }

    /// Aktuelle Selektion.
    pub fn selection(&self) -> Option<&Selection> {
        self.session.state.selection.as_ref()
    }

    /// Setzt den aktiven Frame.
    pub fn set_active_frame(&mut self, frame: f64) -> bool {
        self.enqueue(HubCommand::SetActiveFrame { frame })
    }

    /// Startet die Wiedergabe mit Standard-Rate.
    pub fn start_playback(&mut self) -> bool {
        self.enqueue(HubCommand::StartPlayback {
            fps: None,
            loop_playback: None,
        })
    }

    /// Hält die Wiedergabe an.
    pub fn stop_playback(&mut self) -> bool {
        self.enqueue(HubCommand::StopPlayback)
    }

    /// Setzt den Modus.
    pub fn set_mode(&mut self, mode: ViewerMode, uuid: Option<&str>) -> bool {
        self.enqueue(HubCommand::SetMode {
            mode,
            uuid: uuid.map(str::to_string),
            kind: None,
        })
    }

    /// Aktueller Modus.
    pub fn mode(&self) -> ViewerMode {
        self.session.state.mode
    }

    /// Springt auf einen Preset-Slot.
    pub fn set_view_preset(&mut self, index: i64) -> bool {
        self.enqueue(HubCommand::SetViewPreset {
            index,
            options: PresetOptions::default(),
        })
    }

    /// Startet den Auto-Orbit mit Standard-Optionen.
    pub fn start_auto_orbit(&mut self) -> bool {
        self.enqueue(HubCommand::StartAutoOrbit {
            options: AutoOrbitOptions::default(),
        })
    }

    /// Setzt einen Typ-Filter.
    pub fn set_type_filter(&mut self, kind: ItemKind, enabled: bool) -> bool {
        self.enqueue(HubCommand::SetTypeFilter { kind, enabled })
    }
}
