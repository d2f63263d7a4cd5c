//! Output seams for the loop controller
//!
//! The simulation pushes state out through these traits once per frame;
//! nothing flows back in. `()` implements both, for headless runs and
//! tests.

use crate::sim::{Player, Raindrop};

/// Draws one frame from read-only state
pub trait Renderer {
    fn draw(&mut self, player: &Player, drops: &[Raindrop]);
}

/// Receives score updates as they happen
pub trait ScoreDisplay {
    /// Called every frame with the floored current score and the best
    fn score_changed(&mut self, score: u32, best: u32);
    /// Called once when a run ends, before that frame's score update
    fn game_over(&mut self, final_score: u32, best: u32);
}

impl Renderer for () {
    fn draw(&mut self, _player: &Player, _drops: &[Raindrop]) {}
}

impl ScoreDisplay for () {
    fn score_changed(&mut self, _score: u32, _best: u32) {}
    fn game_over(&mut self, _final_score: u32, _best: u32) {}
}
