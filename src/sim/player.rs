//! The player's umbrella

use glam::Vec2;

use super::input::{Direction, InputState};
use super::state::Bounds;
use crate::consts::{PLAYER_BOTTOM_OFFSET, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH};

/// The controllable umbrella
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner, px
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed while a key is held, px/s
    pub speed: f32,
}

impl Player {
    /// Fresh player, horizontally centered near the bottom of the canvas
    pub fn new(bounds: &Bounds) -> Self {
        Self {
            pos: Vec2::new(
                bounds.width / 2.0 - PLAYER_WIDTH / 2.0,
                bounds.height - PLAYER_BOTTOM_OFFSET,
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
        }
    }

    /// Apply held input for `dt` seconds, then clamp to the canvas.
    /// Both directions held at once cancel to zero motion.
    pub fn update(&mut self, dt: f32, input: &InputState, canvas_width: f32) {
        let mut dx = 0.0;
        if input.held(Direction::Right) {
            dx += self.speed * dt;
        }
        if input.held(Direction::Left) {
            dx -= self.speed * dt;
        }
        self.pos.x = (self.pos.x + dx).clamp(0.0, canvas_width - self.width);
    }

    /// Center of the top edge, the point drops collide against
    pub fn shelter_point(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y)
    }
}
