//! EEG height-field terrain
//!
//! Each frame the signal clock moves forward by `dt × scroll_speed`, the
//! rightmost column is pinned to the newest sample, and every column to the
//! left looks `horizontal_step` samples further into the past.

use super::terrain::Terrain;
use crate::consts::{SLOPE_SPAN, TOP_MARGIN};
use crate::round_half_up;
use crate::sampler::TerrainSampler;
use crate::settings::Settings;
use crate::stages::{SleepStage, StageTimeline};

#[derive(Debug, Clone)]
pub struct WaveTerrain {
    sampler: TerrainSampler,
    timeline: StageTimeline,
    /// Recording time at which play starts (resolved once from the hypnogram)
    start_offset: f64,
    /// Session-relative signal seconds
    signal_time: f64,
    effective_time: f64,

    scroll_speed: f64,
    horizontal_step: f64,
    amp_scale: f32,

    baseline_y: f32,
    top_margin: f32,
    /// One surface y per pixel column, rebuilt every frame
    field: Vec<f32>,
}

impl WaveTerrain {
    pub fn new(width: usize, baseline_y: f32, settings: &Settings) -> Self {
        let mut terrain = Self {
            sampler: TerrainSampler::synthetic().with_half_window(settings.smooth_window),
            timeline: StageTimeline::default(),
            start_offset: 0.0,
            signal_time: 0.0,
            effective_time: 0.0,
            scroll_speed: settings.scroll_speed,
            horizontal_step: settings.horizontal_step,
            amp_scale: settings.amp_scale,
            baseline_y,
            top_margin: TOP_MARGIN,
            field: vec![baseline_y; width],
        };
        terrain.rebuild();
        terrain
    }

    /// Swap in a new sampler (after the signal load settles)
    pub fn set_sampler(&mut self, sampler: TerrainSampler) {
        self.sampler = sampler;
        self.rebuild();
    }

    /// Install the hypnogram and fix the start offset from it
    pub fn set_timeline(&mut self, timeline: StageTimeline) {
        self.start_offset = timeline.start_offset();
        self.timeline = timeline;
        self.timeline.reset();
        self.effective_time = self.signal_time + self.start_offset;
        self.timeline.resolve(self.effective_time);
        self.rebuild();
    }

    /// Back to the start of the recording window (offset is kept)
    pub fn reset(&mut self) {
        self.signal_time = 0.0;
        self.effective_time = self.start_offset;
        self.timeline.reset();
        self.timeline.resolve(self.effective_time);
        self.rebuild();
    }

    pub fn sampler(&self) -> &TerrainSampler {
        &self.sampler
    }

    pub fn timeline(&self) -> &StageTimeline {
        &self.timeline
    }

    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    pub fn signal_time(&self) -> f64 {
        self.signal_time
    }

    /// Recording-relative time shown on the HUD
    pub fn effective_time(&self) -> f64 {
        self.effective_time
    }

    /// Stage in force at the effective time
    pub fn current_stage(&self) -> Option<&SleepStage> {
        self.timeline.current()
    }

    pub fn height_field(&self) -> &[f32] {
        &self.field
    }

    pub fn baseline_y(&self) -> f32 {
        self.baseline_y
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    /// Sample index of the rightmost column
    pub fn head_sample(&self) -> i64 {
        (self.effective_time * self.sampler.sample_rate()).floor() as i64
    }

    /// Map a smoothed sample in [-1, 1] to a screen y
    pub fn column_y(&self, value: f32) -> f32 {
        let max_wave_height = self.baseline_y - self.top_margin;
        let amp01 = (((value + 1.0) / 2.0) * self.amp_scale).clamp(0.0, 1.0);
        (self.baseline_y - amp01 * max_wave_height).max(self.top_margin)
    }

    fn rebuild(&mut self) {
        let head = self.head_sample() as f64;
        let width = self.field.len();
        for x in 0..width {
            let offset = (width - 1 - x) as f64 * self.horizontal_step;
            let index = round_half_up(head - offset);
            let y = self.column_y(self.sampler.sample(index));
            self.field[x] = y;
        }
    }

    fn column(&self, x: f32) -> Option<usize> {
        let idx = round_half_up(x as f64);
        if idx >= 0 && (idx as usize) < self.field.len() {
            Some(idx as usize)
        } else {
            None
        }
    }
}

impl Terrain for WaveTerrain {
    fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0) as f64;
        self.signal_time += dt * self.scroll_speed;
        self.effective_time = self.signal_time + self.start_offset;

        let before = self.timeline.cursor();
        self.timeline.resolve(self.effective_time);
        if self.timeline.cursor() != before {
            if let Some(stage) = self.timeline.current() {
                log::debug!("Stage -> {} at {:.1}s", stage.code(), self.effective_time);
            }
        }

        self.rebuild();
    }

    fn height_at(&self, x: f32) -> f32 {
        self.column(x)
            .map(|i| self.field[i])
            .unwrap_or(self.baseline_y)
    }

    fn slope_at(&self, x: f32) -> Option<f32> {
        let idx = self.column(x)?;
        let last = self.field.len() - 1;
        let left = idx.saturating_sub(SLOPE_SPAN);
        let right = (idx + SLOPE_SPAN).min(last);
        let dx = match right - left {
            0 => 1.0,
            d => d as f32,
        };
        let dy = self.field[right] - self.field[left];
        Some(dy.atan2(dx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ROTATION_BLEND;
    use crate::signal::SignalBuffer;
    use crate::sim::{FrameInput, PhysicsParams, Player, World};
    use crate::stages::StageSegment;

    /// Unsmoothed terrain, one sample per column, unit amplitude
    fn raw_terrain(width: usize, raw: &[f64]) -> WaveTerrain {
        let settings = Settings {
            amp_scale: 1.0,
            horizontal_step: 1.0,
            ..Settings::default()
        };
        let mut terrain = WaveTerrain::new(width, 440.0, &settings);
        let signal = SignalBuffer::from_raw(raw, 50.0).unwrap();
        terrain.set_sampler(TerrainSampler::new(signal, 0));
        terrain
    }

    fn flat_terrain(width: usize) -> WaveTerrain {
        let settings = Settings::default();
        let mut terrain = WaveTerrain::new(width, 440.0, &settings);
        let signal = SignalBuffer::from_raw(&[1.0; 100], 50.0).unwrap();
        terrain.set_sampler(TerrainSampler::new(signal, settings.smooth_window));
        terrain
    }

    #[test]
    fn test_constant_signal_is_flat_at_top_margin() {
        let mut terrain = flat_terrain(64);
        terrain.advance(0.016);
        // amp01 = min(1, 1.5) = 1 -> baseline - max height = top margin
        assert!(terrain.height_field().iter().all(|&y| y == TOP_MARGIN));
        assert_eq!(terrain.slope_at(10.0), Some(0.0));
    }

    #[test]
    fn test_column_mapping() {
        let terrain = WaveTerrain::new(8, 440.0, &Settings::default());
        // -1 maps to the baseline, 0 to 0.75 of the height, +1 clamps to the top
        assert_eq!(terrain.column_y(-1.0), 440.0);
        assert_eq!(terrain.column_y(0.0), 440.0 - 0.75 * 420.0);
        assert_eq!(terrain.column_y(1.0), TOP_MARGIN);
    }

    #[test]
    fn test_non_positive_dt_does_not_scroll() {
        let mut terrain = flat_terrain(16);
        terrain.advance(0.5);
        let t = terrain.signal_time();
        terrain.advance(0.0);
        terrain.advance(-3.0);
        assert_eq!(terrain.signal_time(), t);
        assert_eq!(t, 1.5);
    }

    #[test]
    fn test_timeline_sets_offset_and_stage() {
        let mut terrain = WaveTerrain::new(16, 440.0, &Settings::default());
        let timeline = StageTimeline::new(vec![
            StageSegment { start_time: 0.0, stage: SleepStage::Wake },
            StageSegment { start_time: 120.0, stage: SleepStage::N1 },
            StageSegment { start_time: 123.0, stage: SleepStage::N2 },
        ]);
        terrain.set_timeline(timeline);
        assert_eq!(terrain.start_offset(), 120.0);
        assert_eq!(terrain.effective_time(), 120.0);
        assert_eq!(terrain.current_stage(), Some(&SleepStage::N1));

        // 1 s of wall time is 3 s of signal time
        terrain.advance(1.0);
        assert_eq!(terrain.effective_time(), 123.0);
        assert_eq!(terrain.current_stage(), Some(&SleepStage::N2));

        terrain.reset();
        assert_eq!(terrain.signal_time(), 0.0);
        assert_eq!(terrain.current_stage(), Some(&SleepStage::N1));
    }

    #[test]
    fn test_rightmost_column_tracks_head_sample() {
        let settings = Settings::default();
        let mut terrain = WaveTerrain::new(32, 440.0, &settings);
        // Spike at sample 150 with no smoothing
        let mut raw = vec![0.0; 400];
        raw[150] = 1.0;
        let signal = SignalBuffer::from_raw(&raw, 50.0).unwrap();
        terrain.set_sampler(TerrainSampler::new(signal, 0));
        // 1 s wall -> 3 s signal -> head sample 150
        terrain.advance(1.0);
        assert_eq!(terrain.head_sample(), 150);
        let field = terrain.height_field();
        assert_eq!(field[31], TOP_MARGIN);
        // 149.7 rounds back up to the spike, 149.4 does not
        assert_eq!(field[30], TOP_MARGIN);
        assert_eq!(field[29], terrain.column_y(0.0));
    }

    #[test]
    fn test_height_outside_field_is_baseline() {
        let terrain = flat_terrain(16);
        assert_eq!(terrain.height_at(-5.0), 440.0);
        assert_eq!(terrain.height_at(100.0), 440.0);
        assert_eq!(terrain.slope_at(100.0), None);
    }

    #[test]
    fn test_slope_on_rising_ramp() {
        let raw: Vec<f64> = (0..400).map(|i| i as f64).collect();
        let mut terrain = raw_terrain(32, &raw);
        // 2 s wall -> 6 s signal -> head sample 300, columns 269..=300
        terrain.advance(2.0);
        assert_eq!(terrain.head_sample(), 300);
        let field = terrain.height_field().to_vec();
        assert!(field[31] < field[0]);

        let slope = terrain.slope_at(10.0).unwrap();
        assert_eq!(slope, (field[12] - field[8]).atan2(4.0));
        // Rising to the right means y shrinks, so the angle is negative
        assert!(slope < 0.0);
        // 420 px per 2 units of signal, 1/399 per column
        let per_px = -210.0 / 399.0_f32;
        assert!((slope - per_px.atan()).abs() < 1e-4);
    }

    #[test]
    fn test_slope_span_clamps_at_edges() {
        let raw: Vec<f64> = (0..400).map(|i| i as f64).collect();
        let mut terrain = raw_terrain(32, &raw);
        terrain.advance(2.0);
        let field = terrain.height_field().to_vec();

        assert_eq!(terrain.slope_at(0.0), Some((field[2] - field[0]).atan2(2.0)));
        assert_eq!(terrain.slope_at(31.0), Some((field[31] - field[29]).atan2(2.0)));
        assert_eq!(terrain.slope_at(1.0), Some((field[3] - field[0]).atan2(3.0)));

        // A single column has no span at all
        let mut narrow = raw_terrain(1, &raw);
        narrow.advance(2.0);
        assert_eq!(narrow.slope_at(0.0), Some(0.0));
    }

    #[test]
    fn test_rotation_snaps_then_blends() {
        // Quadratic signal: the slope under the player steepens as it scrolls
        let raw: Vec<f64> = (0..1000).map(|i| (i * i) as f64).collect();
        let params = PhysicsParams::brainwave(200.0, 450.0);
        let terrain = raw_terrain(200, &raw);
        let player = Player::centered(&params);
        let mut world = World::new(player, terrain, params);
        assert_eq!(world.player.rotation, None);

        world.step(2.0, &FrameInput::default());
        let center = world.player.center_x();
        let first = world.terrain.slope_at(center).unwrap();
        assert!(first < 0.0);
        assert_eq!(world.player.rotation, Some(first));
        assert!((world.player.bottom() - world.terrain.height_at(center)).abs() < 1e-3);
        assert!(world.player.resting);

        world.step(2.0, &FrameInput::default());
        let second = world.terrain.slope_at(world.player.center_x()).unwrap();
        assert!(second < first);
        let expected = first + (second - first) * ROTATION_BLEND;
        let angle = world.player.rotation.unwrap();
        assert!((angle - expected).abs() < 1e-6);
        assert!(angle > second);
    }
}
