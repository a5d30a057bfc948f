//! Session context
//!
//! Owns everything the brainwave frame loop reads: the player, the EEG
//! terrain, the stage timeline and the load status. The two data loads
//! finish asynchronously and hand their `Result` to `apply_signal` /
//! `apply_stages`; failures degrade to the synthetic wave or an unknown stage.

use crate::data::{SignalPayload, StagePayload};
use crate::error::LoadError;
use crate::hud::{self, HudText};
use crate::sampler::TerrainSampler;
use crate::settings::Settings;
use crate::sim::{FrameInput, PhysicsParams, Player, WaveTerrain, World};
use crate::stages::StageTimeline;

/// Where the terrain signal came from
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded { samples: usize, sample_rate: f64 },
    /// Running on the synthetic sine
    Fallback(String),
}

pub struct Session {
    settings: Settings,
    world: World<WaveTerrain>,
    status: LoadStatus,
    width: f32,
    height: f32,
}

impl Session {
    /// New session for a canvas of `width` x `height` pixels
    pub fn new(width: f32, height: f32, settings: Settings) -> Self {
        let params = PhysicsParams::brainwave(width, height);
        let terrain = WaveTerrain::new(width.max(1.0) as usize, params.ground_y, &settings);
        let player = Player::centered(&params);
        Self {
            settings,
            world: World::new(player, terrain, params),
            status: LoadStatus::Loading,
            width,
            height,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn world(&self) -> &World<WaveTerrain> {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn terrain(&self) -> &WaveTerrain {
        &self.world.terrain
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Settle the signal load
    pub fn apply_signal(&mut self, result: Result<SignalPayload, LoadError>) {
        match result.and_then(SignalPayload::into_signal) {
            Ok(signal) => {
                log::info!(
                    "EEG data loaded: {} samples at {} Hz",
                    signal.len(),
                    signal.sample_rate()
                );
                self.status = LoadStatus::Loaded {
                    samples: signal.len(),
                    sample_rate: signal.sample_rate(),
                };
                let sampler = TerrainSampler::new(signal, self.settings.smooth_window);
                self.world.terrain.set_sampler(sampler);
            }
            Err(e) => {
                log::error!("Failed to load/normalize EEG data: {}", e);
                self.status = LoadStatus::Fallback(e.to_string());
                let sampler = TerrainSampler::synthetic().with_half_window(self.settings.smooth_window);
                self.world.terrain.set_sampler(sampler);
            }
        }
    }

    /// Settle the hypnogram load
    pub fn apply_stages(&mut self, result: Result<StagePayload, LoadError>) {
        let loaded = result.and_then(|payload| {
            let total = payload.total_duration_sec;
            payload
                .into_segments()
                .map(|segments| StageTimeline::new(segments).with_total_duration(total))
        });
        match loaded {
            Ok(timeline) => {
                log::info!("Loaded {} sleep stage segments", timeline.len());
                self.world.terrain.set_timeline(timeline);
                log::info!(
                    "EEG start offset set to {} seconds",
                    self.world.terrain.start_offset()
                );
            }
            Err(e) => {
                log::warn!("Failed to load sleep stages: {}", e);
            }
        }
    }

    /// One frame: clamp the raw delta and step the world
    pub fn frame(&mut self, raw_dt: f32, input: &FrameInput) {
        let dt = self.settings.clamp_dt(raw_dt);
        self.world.step(dt, input);
    }

    /// New run from the start offset; loaded data is kept
    pub fn restart(&mut self) {
        self.world.reset_player();
        self.world.terrain.reset();
        log::info!("Session restarted");
    }

    /// HUD text for the current frame
    pub fn hud(&self) -> HudText {
        HudText {
            stage: hud::stage_line(self.terrain().current_stage()),
            clock: hud::clock_line(self.terrain().effective_time()),
            status: hud::status_line(&self.status),
            info: hud::info_lines(&self.settings, self.terrain().sampler()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TOP_MARGIN;
    use crate::sim::Terrain;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> Session {
        Session::new(800.0, 450.0, Settings::default())
    }

    fn signal(json: &str) -> Result<SignalPayload, LoadError> {
        SignalPayload::from_json(json)
    }

    fn stages(json: &str) -> Result<StagePayload, LoadError> {
        StagePayload::from_json(json)
    }

    #[test]
    fn test_constant_signal_end_to_end() {
        let mut s = session();
        s.apply_signal(signal(r#"{"sampleRate": 50, "values": [1, 1, 1, 1, 1, 1, 1, 1]}"#));
        assert_eq!(
            s.status(),
            &LoadStatus::Loaded {
                samples: 8,
                sample_rate: 50.0
            }
        );
        s.frame(DT, &FrameInput::default());

        let field = s.terrain().height_field();
        assert_eq!(field.len(), 800);
        assert!(field.iter().all(|&y| y == TOP_MARGIN));

        // The player was pushed up onto the plateau and is level
        assert_eq!(s.player().bottom(), TOP_MARGIN);
        assert!(s.player().resting);
        assert_eq!(s.player().rotation, Some(0.0));
    }

    #[test]
    fn test_signal_failure_falls_back() {
        let mut s = session();
        s.apply_signal(signal(r#"{"sampleRate": 50, "values": [0, 0, 0]}"#));
        assert!(matches!(s.status(), LoadStatus::Fallback(_)));
        assert!(!s.terrain().sampler().has_signal());
        assert_eq!(s.hud().status, "EEG: FAILED, using fake sine wave");

        s.apply_signal(Err(LoadError::Http(404)));
        assert_eq!(s.status(), &LoadStatus::Fallback("HTTP 404".to_string()));

        // Frame loop keeps running on the synthetic terrain
        for _ in 0..30 {
            s.frame(DT, &FrameInput::default());
        }
        assert!(s.player().bottom() <= s.terrain().baseline_y());
    }

    #[test]
    fn test_stage_failure_reports_unknown() {
        let mut s = session();
        s.apply_stages(stages(r#"{"segments": []}"#));
        s.frame(DT, &FrameInput::default());
        assert_eq!(s.hud().stage, "Stage: Unknown");
        assert_eq!(s.terrain().start_offset(), 0.0);
    }

    #[test]
    fn test_stages_drive_hud() {
        let mut s = session();
        s.apply_stages(stages(
            r#"{"segments": [{"t": 0, "stage": "W"}, {"t": 3600, "stage": "N1"}, {"t": 3603, "stage": "N2"}]}"#,
        ));
        assert_eq!(s.terrain().start_offset(), 3600.0);
        assert_eq!(s.hud().clock, "EDF time: 01:00:00");
        assert_eq!(s.hud().stage, "Stage: N1 – light sleep");

        // 0.5 s per frame at 3x scroll, dt clamp disabled
        let mut s2 = Session::new(
            800.0,
            450.0,
            Settings {
                max_frame_dt: None,
                ..Settings::default()
            },
        );
        s2.apply_stages(stages(
            r#"{"segments": [{"t": 0, "stage": "W"}, {"t": 3600, "stage": "N1"}, {"t": 3603, "stage": "N2"}]}"#,
        ));
        s2.frame(0.5, &FrameInput::default());
        assert_eq!(s2.hud().stage, "Stage: N1 – light sleep");
        s2.frame(0.5, &FrameInput::default());
        assert_eq!(s2.hud().stage, "Stage: N2 – light sleep");
        assert_eq!(s2.hud().clock, "EDF time: 01:00:03");
    }

    #[test]
    fn test_stage_total_duration() {
        let mut s = session();
        s.apply_stages(stages(
            r#"{"totalDurationSec": 30600, "segments": [{"t": 0, "stage": "W"}, {"t": 90, "stage": "Sleep stage 2"}]}"#,
        ));
        let timeline = s.terrain().timeline();
        assert_eq!(timeline.total_duration(), Some(30600.0));
        // No N1: first non-wake segment sets the offset
        assert_eq!(s.terrain().start_offset(), 90.0);
        assert_eq!(s.hud().stage, "Stage: N2 – light sleep");
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut s = session();
        s.frame(10.0, &FrameInput::default());
        let expected = crate::consts::MAX_FRAME_DT as f64 * crate::consts::SCROLL_SPEED;
        assert!((s.terrain().signal_time() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_jump_and_restart() {
        let mut s = session();
        // Constant -1 keeps the terrain on the ground line
        s.apply_signal(signal(r#"{"values": [-1, -1, -1]}"#));
        s.frame(DT, &FrameInput::default());
        assert!(s.player().resting);

        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };
        s.frame(DT, &jump);
        assert!(!s.player().resting);

        s.restart();
        assert_eq!(s.terrain().signal_time(), 0.0);
        assert!(s.player().resting);
        let params = s.world().params;
        assert_eq!(s.player().pos.y, params.resting_y());
        assert_eq!(s.terrain().height_at(10.0), s.terrain().baseline_y());
    }
}
