//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must stay deterministic:
//! - Elapsed time arrives as an argument, never from a clock
//! - Randomness comes from an injected seeded generator
//! - No rendering; storage enters only through the `Storage` trait

pub mod collision;
pub mod field;
pub mod input;
pub mod player;
pub mod score;
pub mod spawn;
pub mod state;

pub use collision::{any_drop_hits, drop_hits_player};
pub use field::{DropField, Raindrop};
pub use input::{Direction, InputState};
pub use player::Player;
pub use score::{BestScore, ScoreTracker};
pub use spawn::{SpawnScheduler, spawn_interval};
pub use state::{Bounds, Session};
