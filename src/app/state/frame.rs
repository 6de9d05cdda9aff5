use crate::core::FrameRange;

/// Wiedergabe-Takt (Akkumulator-basiert).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Frames pro Sekunde (> 0)
    pub fps: f64,
    /// Angesammelte Teil-Frames (>= 0)
    pub accumulator: f64,
    /// Am Ende zum Anfang springen statt anzuhalten
    pub loop_playback: bool,
}

impl PlaybackState {
    /// Erstellt einen Takt mit gegebener Rate.
    pub fn new(fps: f64, loop_playback: bool) -> Self {
        Self {
            fps,
            accumulator: 0.0,
            loop_playback,
        }
    }
}

/// Frame-Position, fester Bereich und Wiedergabe-Takt.
///
/// Invariante: `range.min <= current <= range.max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Aktiver Frame
    pub current: i64,
    /// Bereich (beim Session-Start aus den Szenendaten ermittelt)
    pub range: FrameRange,
    /// Wiedergabe-Takt
    pub playback: PlaybackState,
}

impl FrameState {
    /// Startet am unteren Ende des Bereichs.
    pub fn new(range: FrameRange, playback: PlaybackState) -> Self {
        Self {
            current: range.min,
            range,
            playback,
        }
    }
}
