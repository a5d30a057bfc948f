//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Player physics driven by the caller's frame delta
//! - Terrain as a capability (`Terrain`) shared by both game variants
//! - Input consumed as per-frame intents

pub mod physics;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod wave;

pub use state::{PhysicsParams, Player};
pub use terrain::{Obstacle, ObstacleCourse, Terrain, blend_rotation, resolve_contact};
pub use tick::{FrameClock, FrameInput, World};
pub use wave::WaveTerrain;
