//! HUD text
//!
//! Stage label and recording clock (bottom-right of the canvas), plus the
//! load status line and the processing summary shown in the page corners.

use crate::sampler::TerrainSampler;
use crate::session::LoadStatus;
use crate::settings::Settings;
use crate::stages::SleepStage;

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// All HUD strings for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub stage: String,
    pub clock: String,
    pub status: String,
    pub info: Vec<String>,
}

/// `HH:MM:SS`, wrapped to one day (negative times wrap backward)
pub fn format_clock(t_sec: f64) -> String {
    let mut t = t_sec.rem_euclid(SECONDS_PER_DAY);
    let h = (t / 3600.0).floor();
    t -= h * 3600.0;
    let m = (t / 60.0).floor();
    let s = (t - m * 60.0).floor();
    format!("{:02}:{:02}:{:02}", h as u32, m as u32, s as u32)
}

pub fn stage_label(stage: Option<&SleepStage>) -> &str {
    stage.map(SleepStage::label).unwrap_or("Unknown")
}

pub fn stage_line(stage: Option<&SleepStage>) -> String {
    format!("Stage: {}", stage_label(stage))
}

pub fn clock_line(effective_time: f64) -> String {
    format!("EDF time: {}", format_clock(effective_time))
}

pub fn status_line(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Loading => "EEG: loading…".to_string(),
        LoadStatus::Loaded {
            samples,
            sample_rate,
        } => format!("EEG: wave loaded ({} samples @ {} Hz)", samples, sample_rate),
        LoadStatus::Fallback(_) => "EEG: FAILED, using fake sine wave".to_string(),
    }
}

/// Processing summary; the wording switches to the recorded channel once a
/// real signal is loaded
pub fn info_lines(settings: &Settings, sampler: &TerrainSampler) -> Vec<String> {
    let window = sampler.window_len();
    let (source, smoothing, clipping) = match sampler.signal() {
        Some(signal) => (
            "- channel from EDF, normalized to [-1, 1]",
            format!(
                "- smoothing: {}-sample moving avg (~{:.2}s @ {}Hz)",
                window,
                window as f64 / signal.sample_rate(),
                signal.sample_rate()
            ),
            "clipped to fit canvas",
        ),
        None => (
            "- values normalized to [-1, 1]",
            format!("- smoothing: {}-sample moving avg", window),
            "clipped",
        ),
    };

    vec![
        "EEG processing:".to_string(),
        source.to_string(),
        smoothing,
        format!("- amplitude scale: ×{}, {}", settings.amp_scale, clipping),
        format!(
            "- horizontal stretch: {} samples/px",
            settings.horizontal_step
        ),
        format!("- scroll speed: {}× real time", settings.scroll_speed),
    ]
}
