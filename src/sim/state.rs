//! Session state
//!
//! Everything that lives and dies with one run, gathered into a single
//! value owned by the loop controller. No globals.

use super::field::DropField;
use super::player::Player;
use super::score::ScoreTracker;
use super::spawn::SpawnScheduler;

/// Visible canvas area, px
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// One run of the game, from start to the drop that ends it
#[derive(Debug, Clone)]
pub struct Session {
    pub player: Player,
    pub drops: DropField,
    pub spawner: SpawnScheduler,
    pub score: ScoreTracker,
    /// False once a drop lands; frame callbacks become no-ops
    pub running: bool,
    /// Previous frame's timestamp, ms. None until the first frame, which
    /// therefore runs with dt = 0.
    pub last_timestamp: Option<f64>,
}

impl Session {
    /// Fresh state for a new run (not yet running)
    pub fn new(bounds: &Bounds) -> Self {
        Self {
            player: Player::new(bounds),
            drops: DropField::new(),
            spawner: SpawnScheduler::new(),
            score: ScoreTracker::new(),
            running: false,
            last_timestamp: None,
        }
    }
}
