//! Falling raindrops
//!
//! The field owns every live drop, advancing them each frame and pruning
//! the ones that have left the visible area. Iteration order carries no
//! gameplay meaning.

use glam::Vec2;

use crate::consts::PRUNE_MARGIN;

/// One falling raindrop
#[derive(Debug, Clone)]
pub struct Raindrop {
    /// Top-left corner of the drop's bounding square, px
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed, px/s
    pub speed: f32,
}

impl Raindrop {
    /// Center of the drop's circle
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }
}

/// The set of live drops
#[derive(Debug, Clone, Default)]
pub struct DropField {
    drops: Vec<Raindrop>,
}

impl DropField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, drop: Raindrop) {
        self.drops.push(drop);
    }

    /// Move every drop down by its own speed
    pub fn advance(&mut self, dt: f32) {
        for drop in &mut self.drops {
            drop.pos.y += drop.speed * dt;
        }
    }

    /// Discard drops that have fallen past the bottom edge.
    /// A drop exactly on the margin survives.
    pub fn prune(&mut self, canvas_height: f32) {
        self.drops
            .retain(|d| d.pos.y - d.radius <= canvas_height + PRUNE_MARGIN);
    }

    pub fn as_slice(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }
}
