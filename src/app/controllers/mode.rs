use crate::app::events::HubEvent;
use crate::app::state::{SharedState, ViewerMode};
use crate::core::{compute_micro_state, CameraState, CameraTransition, ItemKind, SceneIndex};
use crate::shared::FocusDefaults;

use super::{CameraController, SelectionController, VisibilityController};

/// Gebündelte, disjunkte Borrows für einen Moduswechsel.
pub struct ModeContext<'a> {
    /// Session-Zustand
    pub state: &'a mut SharedState,
    /// Read-only Szenen-Index
    pub scene: &'a SceneIndex,
    /// Kamera-Fassade
    pub camera: &'a mut CameraController,
    /// Laufende Kamera-Überblendung
    pub transition: &'a mut CameraTransition,
    /// Selektions-Controller
    pub selection: &'a SelectionController,
    /// Sichtbarkeits-Controller
    pub visibility: &'a VisibilityController,
    /// Ereignisse für Beobachter
    pub outbox: &'a mut Vec<HubEvent>,
}

/// Makro/Mikro-Zustandsmaschine mit Eintritts-Guards.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    macro_camera: Option<CameraState>,
    focus: FocusDefaults,
}

impl ModeController {
    /// Erstellt den Controller mit Fokus-Defaults für die Kamera-Annäherung.
    pub fn new(focus: FocusDefaults) -> Self {
        Self {
            macro_camera: None,
            focus,
        }
    }

    /// Aktueller Modus.
    pub fn get(&self, state: &SharedState) -> ViewerMode {
        state.mode
    }

    /// Reines Prädikat: darf `uuid` jetzt im Mikro-Modus fokussiert werden?
    pub fn can_enter(
        &self,
        state: &SharedState,
        scene: &SceneIndex,
        selection: &SelectionController,
        visibility: &VisibilityController,
        uuid: &str,
    ) -> bool {
        if state.runtime.is_frame_playing || state.runtime.is_camera_auto {
            return false;
        }
        match selection.sanitize(scene, uuid, None) {
            Some(target) => visibility.is_visible(state, &target.uuid),
            None => false,
        }
    }

    /// Setzt den Modus. Gibt den danach aktiven Modus zurück.
    pub fn set(
        &mut self,
        ctx: ModeContext<'_>,
        mode: ViewerMode,
        uuid: Option<&str>,
        kind: Option<ItemKind>,
    ) -> ViewerMode {
        match mode {
            ViewerMode::Macro => self.exit(ctx),
            ViewerMode::Micro => self.enter_micro(ctx, uuid, kind),
        }
    }

    /// Kurzform für `set(Micro, uuid, kind)`; leere UUID ist ein No-op.
    pub fn focus(&mut self, ctx: ModeContext<'_>, uuid: &str, kind: Option<ItemKind>) -> ViewerMode {
        if uuid.trim().is_empty() {
            return ctx.state.mode;
        }
        self.enter_micro(ctx, Some(uuid), kind)
    }

    fn enter_micro(
        &mut self,
        ctx: ModeContext<'_>,
        uuid: Option<&str>,
        kind: Option<ItemKind>,
    ) -> ViewerMode {
        let ModeContext {
            state,
            scene,
            camera,
            transition,
            selection,
            visibility,
            outbox,
        } = ctx;
        let current = state.mode;

        let requested = uuid
            .map(str::to_string)
            .or_else(|| state.selected_uuid().map(str::to_string));
        let Some(requested) = requested else {
            log::debug!("Mikro-Eintritt abgelehnt: kein Ziel");
            return current;
        };
        let Some(target) = selection.sanitize(scene, &requested, kind) else {
            log::debug!("Mikro-Eintritt abgelehnt: '{}' unbekannt", requested);
            return current;
        };
        if state.runtime.is_frame_playing {
            log::debug!("Mikro-Eintritt abgelehnt: Wiedergabe läuft");
            return current;
        }
        if state.runtime.is_camera_auto {
            log::debug!("Mikro-Eintritt abgelehnt: Auto-Orbit läuft");
            return current;
        }
        if !visibility.is_visible(state, &target.uuid) {
            log::debug!("Mikro-Eintritt abgelehnt: '{}' nicht sichtbar", target.uuid);
            return current;
        }

        let same_target = current == ViewerMode::Micro
            && state
                .micro_state
                .as_ref()
                .is_some_and(|micro| micro.focus_uuid == target.uuid);

        if current == ViewerMode::Macro {
            self.macro_camera = Some(*camera.state());
        }

        state.selection = Some(target.clone());
        state.micro_state = compute_micro_state(scene, &target.uuid);
        state.mode = ViewerMode::Micro;

        if !same_target {
            let focus_position = state
                .micro_state
                .as_ref()
                .and_then(|micro| micro.focus_position);
            if let Some(position) = focus_position {
                let to = camera
                    .engine()
                    .compute_focus_state(position, &self.focus.to_focus_options());
                transition.start(camera.engine(), to);
            }
        }

        if current != ViewerMode::Micro {
            outbox.push(HubEvent::ModeChanged {
                from: current,
                to: ViewerMode::Micro,
            });
        }
        state.request_recompute("mode.micro");
        ViewerMode::Micro
    }

    /// Zurück in den Makro-Modus; stellt die beim Eintritt gesicherte Kamera wieder her.
    pub fn exit(&mut self, ctx: ModeContext<'_>) -> ViewerMode {
        let ModeContext {
            state,
            camera,
            transition,
            selection,
            outbox,
            ..
        } = ctx;
        let previous = state.mode;
        if previous == ViewerMode::Macro && state.micro_state.is_none() {
            return ViewerMode::Macro;
        }

        state.mode = ViewerMode::Macro;
        state.micro_state = None;

        if previous == ViewerMode::Micro {
            if let Some(snapshot) = self.macro_camera.take() {
                if !transition.start(camera.engine(), snapshot) {
                    log::warn!("Makro-Kamera konnte nicht wiederhergestellt werden");
                }
            }
            outbox.push(HubEvent::ModeChanged {
                from: previous,
                to: ViewerMode::Macro,
            });
        }

        selection.refresh_highlight(state, outbox);
        state.request_recompute("mode.macro");
        ViewerMode::Macro
    }
}
