//! JSON payloads for the signal trace and the hypnogram
//!
//! `{ "sampleRate": 50, "values": [...] }`
//! `{ "totalDurationSec": 28800, "segments": [{ "t": 0, "stage": "W" }, ...] }`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::DEFAULT_SAMPLE_RATE;
use crate::error::LoadError;
use crate::signal::SignalBuffer;
use crate::stages::{SleepStage, StageSegment};

/// Raw signal file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalPayload {
    #[serde(default)]
    pub sample_rate: Option<f64>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl SignalPayload {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Declared rate, or the default when missing or non-positive
    pub fn effective_sample_rate(&self) -> f64 {
        match self.sample_rate {
            Some(rate) if rate.is_finite() && rate > 0.0 => rate,
            _ => DEFAULT_SAMPLE_RATE,
        }
    }

    /// Normalize into a signal buffer
    pub fn into_signal(self) -> Result<SignalBuffer, LoadError> {
        let rate = self.effective_sample_rate();
        SignalBuffer::from_raw(&self.values, rate)
    }
}

/// Raw hypnogram file
///
/// Segments stay as loose JSON so one bad entry doesn't sink the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePayload {
    #[serde(default)]
    pub total_duration_sec: Option<f64>,
    #[serde(default)]
    pub segments: Vec<Value>,
}

impl StagePayload {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Well-formed segments, sorted by start time
    pub fn into_segments(self) -> Result<Vec<StageSegment>, LoadError> {
        if self.segments.is_empty() {
            return Err(LoadError::NoSegments);
        }

        let total = self.segments.len();
        let mut segments: Vec<StageSegment> =
            self.segments.iter().filter_map(parse_segment).collect();

        if segments.len() < total {
            log::debug!(
                "Dropped {} malformed stage segments",
                total - segments.len()
            );
        }
        if segments.is_empty() {
            return Err(LoadError::NoSegments);
        }

        segments.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        Ok(segments)
    }
}

fn parse_segment(entry: &Value) -> Option<StageSegment> {
    let start_time = entry.get("t")?.as_f64()?;
    let code = entry.get("stage")?.as_str()?;
    if !start_time.is_finite() {
        return None;
    }
    let stage = SleepStage::from_annotation(code)?;
    Some(StageSegment { start_time, stage })
}
