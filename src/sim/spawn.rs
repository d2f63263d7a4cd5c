//! Spawn scheduling
//!
//! A single timer accumulates elapsed time; once it crosses the
//! score-scaled interval, exactly one drop is rolled and the timer resets.
//! A large dt that crosses several intervals still produces one drop, so
//! a backgrounded tab never returns to a catch-up burst.

use glam::Vec2;
use rand::Rng;

use super::field::Raindrop;
use super::state::Bounds;
use crate::consts::{
    DROP_SIZE_MAX, DROP_SIZE_MIN, DROP_SPEED_MAX, DROP_SPEED_MIN, SPAWN_INTERVAL_MAX,
    SPAWN_INTERVAL_MIN, SPAWN_RAMP,
};

/// Seconds between spawns at the given raw score
pub fn spawn_interval(score: f64) -> f32 {
    (SPAWN_INTERVAL_MAX - (score / SPAWN_RAMP) as f32).max(SPAWN_INTERVAL_MIN)
}

/// Accumulates time toward the next spawn
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    timer: f32,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the timer; returns a fresh drop when the interval elapsed
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        score: f64,
        bounds: &Bounds,
        rng: &mut R,
    ) -> Option<Raindrop> {
        self.timer += dt;
        if self.timer >= spawn_interval(score) {
            self.timer = 0.0;
            Some(spawn_drop(bounds, rng))
        } else {
            None
        }
    }
}

/// Roll a drop just above the visible area
fn spawn_drop<R: Rng>(bounds: &Bounds, rng: &mut R) -> Raindrop {
    let size = rng.random_range(DROP_SIZE_MIN..DROP_SIZE_MAX);
    Raindrop {
        pos: Vec2::new(rng.random_range(0.0..bounds.width - size), -size),
        radius: size / 2.0,
        speed: rng.random_range(DROP_SPEED_MIN..DROP_SPEED_MAX),
    }
}
