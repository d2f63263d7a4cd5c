//! Score accrual and the persisted best score
//!
//! The live score is a fractional accumulator (100 points per second
//! survived); players only ever see its floor. The best score mirrors the
//! floored value through durable storage the moment it is beaten.

use crate::consts::SCORE_PER_SECOND;
use crate::platform::Storage;

/// Per-session score accumulator
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreTracker {
    score: f64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `dt` seconds of survival
    pub fn accrue(&mut self, dt: f64) {
        self.score += dt * SCORE_PER_SECOND;
    }

    /// Raw fractional score; drives the spawn-interval ramp
    pub fn raw(&self) -> f64 {
        self.score
    }

    /// Whole-point score shown to the player (floor of the accumulator)
    pub fn display(&self) -> u32 {
        self.score as u32
    }
}

/// Best score across sessions, mirrored to durable storage.
///
/// Storage trouble degrades silently: an unreadable value loads as 0 and
/// a failed write is dropped.
#[derive(Debug, Clone, Copy)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    pub const STORAGE_KEY: &'static str = "atmos:stormdodge:best";

    /// Load the stored best, defaulting to 0 when absent or unparseable
    pub fn load<S: Storage>(store: &S) -> Self {
        let value = store
            .get(Self::STORAGE_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);
        log::info!("Loaded best score: {}", value);
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Take `score` as the new best if it beats the current one, writing
    /// it through immediately. Returns true when the best changed.
    pub fn submit<S: Storage>(&mut self, score: u32, store: &mut S) -> bool {
        if score > self.value {
            self.value = score;
            store.set(Self::STORAGE_KEY, &score.to_string());
            log::debug!("Best score {} persisted", score);
            true
        } else {
            false
        }
    }
}
