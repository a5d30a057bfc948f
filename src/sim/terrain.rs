//! Terrain capability and the obstacle course
//!
//! Player physics only needs to know where the ground is under a horizontal
//! span. The EEG height-field (`wave.rs`) and the static block course both
//! answer that question, so the frame driver is shared.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::{CONTACT_TOLERANCE, ROTATION_BLEND};

/// Something the player can stand on
pub trait Terrain {
    /// Move scrolling state forward and rebuild geometry for this frame
    fn advance(&mut self, _dt: f32) {}

    /// Surface y at column `x` (smaller is higher)
    fn height_at(&self, x: f32) -> f32;

    /// Highest surface under the span `[left, right]`
    fn surface_under(&self, left: f32, right: f32) -> f32 {
        self.height_at((left + right) / 2.0)
    }

    /// Local slope angle at `x` in radians, if the terrain has one
    fn slope_at(&self, _x: f32) -> Option<f32> {
        None
    }
}

/// Snap the player onto `surface_y` if it sank below, or release it when the
/// surface has dropped away from its feet
pub fn resolve_contact(player: &mut Player, surface_y: f32) -> bool {
    if player.bottom() > surface_y {
        player.land_on(surface_y);
        true
    } else {
        if player.bottom() < surface_y - CONTACT_TOLERANCE {
            player.resting = false;
        }
        false
    }
}

/// Ease the stored rotation toward `target`; snap when there is no usable angle yet
pub fn blend_rotation(player: &mut Player, target: f32) {
    if !target.is_finite() {
        return;
    }
    player.rotation = match player.rotation {
        Some(angle) if angle.is_finite() => Some(angle + (target - angle) * ROTATION_BLEND),
        _ => Some(target),
    };
}

/// An axis-aligned block standing on the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, height: f32) -> Self {
        Self { x, width, height }
    }

    #[inline]
    pub fn overlaps(&self, left: f32, right: f32) -> bool {
        left < self.x + self.width && right > self.x
    }
}

/// Flat ground plus static obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleCourse {
    pub ground_y: f32,
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleCourse {
    /// The hand-built starter level
    pub fn starter(ground_y: f32) -> Self {
        Self {
            ground_y,
            obstacles: vec![
                Obstacle::new(300.0, 40.0, 40.0),
                Obstacle::new(480.0, 60.0, 80.0),
                Obstacle::new(670.0, 30.0, 60.0),
            ],
        }
    }

    /// Seeded random course spanning `width`, leaving the spawn area clear
    pub fn generate(seed: u64, width: f32, ground_y: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut obstacles = Vec::new();
        let mut x = 200.0;

        while x < width - 60.0 {
            let w = rng.random_range(25.0..70.0_f32);
            let h = rng.random_range(30.0..90.0_f32);
            if x + w > width {
                break;
            }
            obstacles.push(Obstacle::new(x, w, h));
            x += w + rng.random_range(110.0..220.0_f32);
        }

        log::info!("Generated obstacle course: {} blocks (seed {})", obstacles.len(), seed);
        Self { ground_y, obstacles }
    }
}

impl Terrain for ObstacleCourse {
    fn height_at(&self, x: f32) -> f32 {
        self.surface_under(x, x)
    }

    fn surface_under(&self, left: f32, right: f32) -> f32 {
        self.obstacles
            .iter()
            .filter(|o| {
                if left == right {
                    left >= o.x && left < o.x + o.width
                } else {
                    o.overlaps(left, right)
                }
            })
            .map(|o| self.ground_y - o.height)
            .fold(self.ground_y, f32::min)
    }
}
