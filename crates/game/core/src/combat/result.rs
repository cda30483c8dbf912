//! Attack planning: the creation-time roll of block/crit outcomes.

use glam::Vec2;

use crate::env::{RngOracle, compute_seed};
use crate::state::Combatant;

use super::chances::{Approach, block_chance, crit_chance};
use super::damage::attack_damage;

/// Pre-rolled outcome of an attack, fixed when the command is created.
/// The action branches on this at resolution time; it is never re-rolled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackPlan {
    pub approach: Approach,
    pub blocked: bool,
    pub critical: bool,
    /// Damage to apply when not blocked.
    pub damage: u32,
}

impl AttackPlan {
    /// Fixed-outcome plan for tests and scripted sequences.
    pub fn scripted(blocked: bool, critical: bool, damage: u32) -> Self {
        Self {
            approach: Approach::Front,
            blocked,
            critical,
            damage,
        }
    }
}

/// Single weighted coin flip. `chance` is a probability in [0, 1].
///
/// This is a side-effecting random draw by contract: callers must treat each
/// invocation as consuming entropy, even though the chance computation
/// feeding it is pure.
pub fn roll(chance: f32, rng: &(impl RngOracle + ?Sized), seed: u64) -> bool {
    if chance <= 0.0 {
        return false;
    }
    if chance >= 1.0 {
        return true;
    }
    let draw = rng.next_u32(seed) as f64 / u32::MAX as f64;
    draw < chance as f64
}

/// Rolls block and crit for an attack at command-creation time.
///
/// `seed` should uniquely identify the attack event (see
/// [`compute_seed`](crate::env::compute_seed)); the block and crit draws use
/// distinct derived contexts so they stay independent.
pub fn plan_attack(
    attacker: &Combatant,
    defender: &Combatant,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> AttackPlan {
    let toward_attacker = Vec2::new(
        (attacker.position.x - defender.position.x) as f32,
        (attacker.position.y - defender.position.y) as f32,
    )
    .normalize_or_zero();
    let approach = Approach::classify(defender.facing, toward_attacker);

    let blocked = roll(
        block_chance(approach, defender.block_bonus),
        rng,
        compute_seed(seed, attacker.id.0, 0),
    );
    let critical = roll(
        crit_chance(approach),
        rng,
        compute_seed(seed, attacker.id.0, 1),
    );

    AttackPlan {
        approach,
        blocked,
        critical,
        damage: attack_damage(attacker.stats.strength, critical),
    }
}
