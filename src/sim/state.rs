//! Player state and physics presets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics constants for one game variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Player square edge (px)
    pub player_size: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    /// Horizontal speed while a walk intent is held (px/s)
    pub walk_speed: f32,
    /// Lowest y the player's bottom edge may reach
    pub ground_y: f32,
    /// Highest y the player's top edge may reach
    pub ceiling_y: Option<f32>,
    /// Rotate the player to match the terrain slope
    pub follow_slope: bool,
    /// Playfield width, bounds horizontal movement
    pub field_width: f32,
}

impl PhysicsParams {
    /// EEG-terrain preset for a canvas of the given size
    pub fn brainwave(width: f32, height: f32) -> Self {
        Self {
            player_size: PLAYER_SIZE,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            walk_speed: 0.0,
            ground_y: height - GROUND_MARGIN,
            ceiling_y: Some(TOP_MARGIN + CEILING_GAP),
            follow_slope: true,
            field_width: width,
        }
    }

    /// Flat-ground obstacle preset
    pub fn obstacle_course(width: f32) -> Self {
        Self {
            player_size: 24.0,
            gravity: 900.0,
            jump_velocity: -380.0,
            walk_speed: 160.0,
            ground_y: 380.0,
            ceiling_y: None,
            follow_slope: false,
            field_width: width,
        }
    }

    /// Top-left y at which the player stands on the ground line
    #[inline]
    pub fn resting_y(&self) -> f32 {
        self.ground_y - self.player_size
    }
}

/// The player square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// In contact with terrain and allowed to jump
    pub resting: bool,
    /// Smoothed slope angle (radians); `None` until the first slope sample
    pub rotation: Option<f32>,
}

impl Player {
    pub fn new(pos: Vec2, size: f32, resting: bool) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            resting,
            rotation: None,
        }
    }

    /// Horizontally centred, standing on the ground line
    pub fn centered(params: &PhysicsParams) -> Self {
        let x = params.field_width / 2.0 - params.player_size / 2.0;
        Self::new(Vec2::new(x, params.resting_y()), params.player_size, true)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    /// Drawing angle (0 before the first slope sample)
    pub fn angle(&self) -> f32 {
        self.rotation.filter(|a| a.is_finite()).unwrap_or(0.0)
    }

    /// Put the bottom edge on `surface_y` and stop vertical motion
    pub fn land_on(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.size;
        self.vel.y = 0.0;
        self.resting = true;
    }
}
