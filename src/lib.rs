//! Storm Dodge - an umbrella-vs-raindrops arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, movement, spawning, collisions, score)
//! - `game`: Idle/Running/Ended loop controller and the per-frame pipeline
//! - `render`: Collaborator traits for drawing and the score display
//! - `platform`: Browser/native storage abstraction

pub mod game;
pub mod platform;
pub mod render;
pub mod sim;

pub use game::{GameLoop, Phase};
pub use sim::Bounds;

/// Game tuning constants
pub mod consts {
    /// Umbrella width in px
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Horizontal umbrella speed, px/s
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Gap between the canvas bottom and the umbrella's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;
    /// Collision radius around the umbrella's top-edge center
    pub const PLAYER_HIT_RADIUS: f32 = 18.0;

    /// Raindrop diameter range, px (radius is half the rolled size)
    pub const DROP_SIZE_MIN: f32 = 12.0;
    pub const DROP_SIZE_MAX: f32 = 22.0;
    /// Raindrop fall speed range, px/s
    pub const DROP_SPEED_MIN: f32 = 120.0;
    pub const DROP_SPEED_MAX: f32 = 240.0;
    /// Drops survive this many px past the bottom edge before pruning
    pub const PRUNE_MARGIN: f32 = 10.0;

    /// Spawn interval at score 0, seconds
    pub const SPAWN_INTERVAL_MAX: f32 = 0.9;
    /// Spawn interval floor, seconds
    pub const SPAWN_INTERVAL_MIN: f32 = 0.35;
    /// Points needed to shave a full second off the spawn interval
    pub const SPAWN_RAMP: f64 = 3000.0;

    /// Score gained per second survived
    pub const SCORE_PER_SECOND: f64 = 100.0;
}
