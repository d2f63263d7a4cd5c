//! Umbrella-vs-raindrop collision detection
//!
//! A drop hits when its center comes within `radius + PLAYER_HIT_RADIUS`
//! px of the center of the player's top edge. The reference point is the
//! top edge, not the player's center, so the effective hit-box reaches a
//! little above the umbrella.

use super::field::Raindrop;
use super::player::Player;
use crate::consts::PLAYER_HIT_RADIUS;

/// True when `drop` is close enough to the player to end the run.
/// Strict inequality: a drop exactly on the threshold is a miss.
pub fn drop_hits_player(player: &Player, drop: &Raindrop) -> bool {
    let delta = drop.center() - player.shelter_point();
    delta.length() < drop.radius + PLAYER_HIT_RADIUS
}

/// Scan the field for the first hit
pub fn any_drop_hits(player: &Player, drops: &[Raindrop]) -> bool {
    drops.iter().any(|d| drop_hits_player(player, d))
}
