use crate::app::state::SharedState;
use crate::core::FrameRange;

/// Ergebnis eines Wiedergabe-Schritts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackTick {
    /// Der aktive Frame hat sich geändert
    pub changed: bool,
    /// Die Wiedergabe hat am Bereichsende angehalten
    pub stopped: bool,
}

/// Wiedergabe-Takt, Frame-Schritte und Bereichsabfragen.
#[derive(Debug, Clone, Copy)]
pub struct FrameController {
    default_fps: f64,
}

impl FrameController {
    /// Erstellt einen Controller mit Standard-Wiedergaberate.
    pub fn new(default_fps: f64) -> Self {
        let default_fps = if default_fps.is_finite() && default_fps > 0.0 {
            default_fps
        } else {
            1.0
        };
        Self { default_fps }
    }

    /// Aktiver Frame.
    pub fn active(&self, state: &SharedState) -> i64 {
        state.frame.current
    }

    /// Fester Frame-Bereich.
    pub fn range(&self, state: &SharedState) -> FrameRange {
        state.frame.range
    }

    /// Setzt den Frame (getrimmt und geclampt). Gibt `true` bei Änderung zurück.
    pub fn set_active(&self, state: &mut SharedState, frame: f64) -> bool {
        if !frame.is_finite() {
            log::debug!("Frame {} ignoriert (nicht endlich)", frame);
            return false;
        }
        let range = state.frame.range;
        let next = frame.trunc().clamp(range.min as f64, range.max as f64) as i64;
        self.commit_frame(state, next)
    }

    /// Verschiebt den Frame relativ.
    pub fn step(&self, state: &mut SharedState, delta: i64) -> bool {
        let range = state.frame.range;
        let next = range.clamp(state.frame.current.saturating_add(delta));
        self.commit_frame(state, next)
    }

    /// Einen Frame vor.
    pub fn next(&self, state: &mut SharedState) -> bool {
        self.step(state, 1)
    }

    /// Einen Frame zurück.
    pub fn prev(&self, state: &mut SharedState) -> bool {
        self.step(state, -1)
    }

    fn commit_frame(&self, state: &mut SharedState, next: i64) -> bool {
        if next == state.frame.current {
            return false;
        }
        state.frame.current = next;
        state.request_recompute("frame.changed");
        true
    }

    /// Startet die Wiedergabe. `fps` überschreibt die Rate, wenn gültig.
    pub fn start_playback(
        &self,
        state: &mut SharedState,
        fps: Option<f64>,
        loop_playback: Option<bool>,
    ) {
        let playback = &mut state.frame.playback;
        if let Some(fps) = fps.filter(|f| f.is_finite() && *f > 0.0) {
            playback.fps = fps;
        } else if !(playback.fps.is_finite() && playback.fps > 0.0) {
            playback.fps = self.default_fps;
        }
        if let Some(loop_playback) = loop_playback {
            playback.loop_playback = loop_playback;
        }
        playback.accumulator = 0.0;
        state.runtime.is_frame_playing = true;
        state.request_recompute("frame.startPlayback");
    }

    /// Hält die Wiedergabe an.
    pub fn stop_playback(&self, state: &mut SharedState) {
        let was_playing = state.runtime.is_frame_playing;
        state.runtime.is_frame_playing = false;
        state.frame.playback.accumulator = 0.0;
        if was_playing {
            state.request_recompute("frame.stopPlayback");
        }
    }

    /// Integriert `dt` in den Akkumulator und springt um ganze Frames weiter.
    ///
    /// Ändert der geclampte Schritt den Frame nicht (Bereichsende erreicht),
    /// hält die Wiedergabe an, oder springt bei Loop zum Bereichsanfang.
    pub fn update_playback(&self, state: &mut SharedState, dt: f64) -> PlaybackTick {
        if !state.runtime.is_frame_playing || !dt.is_finite() || dt <= 0.0 {
            return PlaybackTick::default();
        }
        let playback = &mut state.frame.playback;
        playback.accumulator += dt * playback.fps;
        if playback.accumulator < 1.0 {
            return PlaybackTick::default();
        }
        let steps = playback.accumulator.floor();
        playback.accumulator -= steps;
        let loop_playback = playback.loop_playback;

        let range = state.frame.range;
        let current = state.frame.current;
        let next = range.clamp(current.saturating_add(steps as i64));
        if next != current {
            return PlaybackTick {
                changed: self.commit_frame(state, next),
                stopped: false,
            };
        }

        if loop_playback && range.min != range.max {
            return PlaybackTick {
                changed: self.commit_frame(state, range.min),
                stopped: false,
            };
        }

        log::debug!("Wiedergabe am Bereichsende angehalten (Frame {})", current);
        self.stop_playback(state);
        PlaybackTick {
            changed: false,
            stopped: true,
        }
    }
}

impl Default for FrameController {
    fn default() -> Self {
        Self::new(1.0)
    }
}
