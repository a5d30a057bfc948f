//! Sleep-stage annotations
//!
//! The hypnogram is a list of `(start_time, stage)` segments. Time only moves
//! forward during a session, so lookup is a cursor that walks ahead instead
//! of a search.

use serde::{Deserialize, Serialize};

/// Hypnogram category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepStage {
    Wake,
    N1,
    N2,
    N3,
    N4,
    Rem,
    /// Unrecognized code, displayed verbatim
    Other(String),
}

impl SleepStage {
    /// Parse a short code ("W", "N1", "REM", ...)
    pub fn from_code(code: &str) -> Self {
        match code {
            "W" => SleepStage::Wake,
            "N1" => SleepStage::N1,
            "N2" => SleepStage::N2,
            "N3" => SleepStage::N3,
            "N4" => SleepStage::N4,
            "REM" | "R" => SleepStage::Rem,
            other => SleepStage::Other(other.to_string()),
        }
    }

    /// Parse a short code or an EDF hypnogram annotation
    ///
    /// Unscored epochs and movement time carry no stage and yield `None`.
    pub fn from_annotation(text: &str) -> Option<Self> {
        let stage = match text {
            "Sleep stage W" => SleepStage::Wake,
            "Sleep stage 1" => SleepStage::N1,
            "Sleep stage 2" => SleepStage::N2,
            "Sleep stage 3" => SleepStage::N3,
            "Sleep stage 4" => SleepStage::N4,
            "Sleep stage R" => SleepStage::Rem,
            "Sleep stage ?" | "Movement time" => return None,
            code => SleepStage::from_code(code),
        };
        Some(stage)
    }

    pub fn code(&self) -> &str {
        match self {
            SleepStage::Wake => "W",
            SleepStage::N1 => "N1",
            SleepStage::N2 => "N2",
            SleepStage::N3 => "N3",
            SleepStage::N4 => "N4",
            SleepStage::Rem => "REM",
            SleepStage::Other(code) => code,
        }
    }

    /// HUD label
    pub fn label(&self) -> &str {
        match self {
            SleepStage::Wake => "Wake",
            SleepStage::N1 => "N1 – light sleep",
            SleepStage::N2 => "N2 – light sleep",
            SleepStage::N3 => "N3 – deep sleep",
            SleepStage::N4 => "N4 – deep sleep",
            SleepStage::Rem => "REM sleep",
            SleepStage::Other(code) => code,
        }
    }

    pub fn is_wake(&self) -> bool {
        matches!(self, SleepStage::Wake)
    }
}

/// A stage that holds from `start_time` until the next segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSegment {
    /// Seconds from recording start
    pub start_time: f64,
    pub stage: SleepStage,
}

/// Where play starts in the recording: first N1, else first non-wake, else 0
pub fn resolve_start_offset(segments: &[StageSegment]) -> f64 {
    segments
        .iter()
        .find(|s| s.stage == SleepStage::N1)
        .or_else(|| segments.iter().find(|s| !s.stage.is_wake()))
        .map(|s| s.start_time)
        .unwrap_or(0.0)
}

/// Sorted segments plus a forward-only cursor
#[derive(Debug, Clone, Default)]
pub struct StageTimeline {
    segments: Vec<StageSegment>,
    cursor: usize,
    total_duration: Option<f64>,
}

impl StageTimeline {
    /// `segments` must already be sorted ascending by start time
    pub fn new(segments: Vec<StageSegment>) -> Self {
        debug_assert!(
            segments
                .windows(2)
                .all(|w| w[0].start_time <= w[1].start_time)
        );
        Self {
            segments,
            cursor: 0,
            total_duration: None,
        }
    }

    pub fn with_total_duration(mut self, total: Option<f64>) -> Self {
        self.total_duration = total;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn segments(&self) -> &[StageSegment] {
        &self.segments
    }

    /// Recording length declared by the hypnogram, if any
    pub fn total_duration(&self) -> Option<f64> {
        self.total_duration
    }

    pub fn start_offset(&self) -> f64 {
        resolve_start_offset(&self.segments)
    }

    /// Stage in force at `t`
    ///
    /// `t` must not decrease between calls; an earlier `t` returns whatever
    /// the cursor already passed. Before the first segment this reports the
    /// first segment's stage. `None` when nothing is loaded.
    pub fn resolve(&mut self, t: f64) -> Option<&SleepStage> {
        while self.cursor + 1 < self.segments.len() && t >= self.segments[self.cursor + 1].start_time
        {
            self.cursor += 1;
        }
        self.segments.get(self.cursor).map(|s| &s.stage)
    }

    /// Stage under the cursor without advancing
    pub fn current(&self) -> Option<&SleepStage> {
        self.segments.get(self.cursor).map(|s| &s.stage)
    }

    /// Rewind for a new session
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
