//! Enemy behavior: an occasional random turn and an occasional shot, each an
//! independent draw per frame.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GameConfig;
use crate::geometry::Direction;

use super::tank::Tank;

/// What one enemy decided this frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Decision {
    pub turned: bool,
    pub fire: bool,
}

/// Roll the dice for one enemy. Dead enemies are left alone and draw nothing.
pub fn think<R: Rng + ?Sized>(tank: &mut Tank, config: &GameConfig, rng: &mut R) -> Decision {
    if !tank.is_active() {
        return Decision::default();
    }

    let mut decision = Decision::default();
    if chance(rng, config.enemy_turn_chance) {
        if let Some(&dir) = Direction::ALL.choose(rng) {
            tank.turn(dir);
            decision.turned = true;
        }
    }
    decision.fire = chance(rng, config.enemy_fire_chance);
    decision
}

/// Bernoulli trial that tolerates any `p`, including NaN (never true).
#[inline]
fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.r#gen::<f64>() < p
}
