//! Per-frame simulation step
//!
//! One step per display refresh: physics, then terrain (which may override
//! the tentative position), then slope rotation. Input arrives as intents
//! that are consumed at the start of the step.

use super::physics;
use super::state::{PhysicsParams, Player};
use super::terrain::{Terrain, blend_rotation, resolve_contact};

/// Input intents for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Jump requested since the last frame (one-shot)
    pub jump: bool,
    /// Walk left held
    pub left: bool,
    /// Walk right held
    pub right: bool,
}

impl FrameInput {
    /// Clear one-shot intents after a step consumed them
    pub fn clear_one_shots(&mut self) {
        self.jump = false;
    }

    /// Net walk direction in -1..=1
    pub fn walk_direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Wall-clock delta between refresh callbacks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous call; the first call only seeds the clock
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Player plus the terrain it rides
#[derive(Debug, Clone)]
pub struct World<T: Terrain> {
    pub player: Player,
    pub terrain: T,
    pub params: PhysicsParams,
    spawn: Player,
}

impl<T: Terrain> World<T> {
    pub fn new(player: Player, terrain: T, params: PhysicsParams) -> Self {
        Self {
            spawn: player.clone(),
            player,
            terrain,
            params,
        }
    }

    /// Put the player back at its spawn state
    pub fn reset_player(&mut self) {
        self.player = self.spawn.clone();
    }

    /// Advance one frame. `dt` is expected to be clamped by the caller.
    pub fn step(&mut self, dt: f32, input: &FrameInput) {
        let dt = dt.max(0.0);

        if input.jump && physics::try_jump(&mut self.player, &self.params) {
            log::debug!("Jump");
        }

        let direction = input.walk_direction();
        if direction != 0.0 && self.params.walk_speed > 0.0 {
            self.walk(direction, dt);
        }

        physics::integrate(&mut self.player, &self.params, dt);

        self.terrain.advance(dt);

        let surface = self
            .terrain
            .surface_under(self.player.pos.x, self.player.right());
        resolve_contact(&mut self.player, surface);

        if self.params.follow_slope {
            if let Some(target) = self.terrain.slope_at(self.player.center_x()) {
                blend_rotation(&mut self.player, target);
            }
        }
    }

    /// Move sideways unless the target span has a wall above the player's feet
    fn walk(&mut self, direction: f32, dt: f32) {
        let x = physics::walk_target(&self.player, &self.params, direction, dt);
        let surface = self.terrain.surface_under(x, x + self.player.size);
        if surface >= self.player.bottom() - crate::consts::CONTACT_TOLERANCE {
            self.player.pos.x = x;
        }
    }
}
