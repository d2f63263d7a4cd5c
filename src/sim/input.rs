//! Held-direction input state
//!
//! Keyboard and touch sources both map onto the same two logical
//! directions. Whichever press/release event arrives last wins; there is
//! no debouncing.

/// A logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Which directions are currently held
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    left: bool,
    right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press (`held = true`) or release (`held = false`)
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Force both directions released (on session end, so a key held at
    /// game over cannot leak into the next session)
    pub fn clear(&mut self) {
        self.left = false;
        self.right = false;
    }
}
