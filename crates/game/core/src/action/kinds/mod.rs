//! Concrete action kinds.
//!
//! Each module owns one payload struct with its `start`/`tick` logic; the
//! exhaustive dispatch lives in [`super::Action`]. Follow-up sequencing
//! (damage popup before death) is expressed through depth-inserts collected
//! in [`FollowUps`](super::FollowUps).

mod death;
mod defend;
mod delayed;
mod floating;
mod melee;
mod movement;
mod ranged;
mod wait;

pub use death::DeathAction;
pub use defend::DefendAction;
pub use delayed::{AreaDamageAction, HealAction};
pub use floating::FloatingNumberAction;
pub use melee::AttackAction;
pub use movement::{MoveAction, MovePath};
pub use ranged::RangedAttackAction;
pub use wait::WaitAction;

use crate::config::EncounterConfig;
use crate::env::{BattleEnv, FloatingKey};
use crate::state::{CombatantId, Roster};

use super::{Action, ActionBody, FollowUps};

/// Applies damage to a victim and queues the guaranteed-ordered follow-ups:
/// the damage popup at `depth`, and the death sequence right below it when
/// health reaches zero. Returns the next free depth.
pub(crate) fn apply_hit(
    victim: CombatantId,
    amount: u32,
    depth: usize,
    roster: &mut Roster,
    env: &BattleEnv<'_>,
    config: &EncounterConfig,
    followups: &mut FollowUps,
) -> usize {
    let Some(target) = roster.get_mut(victim) else {
        // Target vanished between commit and resolution; resolve as a no-op
        // rather than crash (the caller-side validator owns pre-checks).
        return depth;
    };
    if !target.is_living() {
        return depth;
    }

    target.apply_damage(amount);
    let position = target.world_position;
    let dead = target.health == 0;

    tracing::debug!(victim = %victim, amount, dead, "hit applied");

    let mut next_depth = depth;
    followups.push_at(
        next_depth,
        Action::with_cost(
            victim,
            ActionBody::FloatingNumber(FloatingNumberAction::damage(amount, position, config)),
            0,
        ),
    );
    next_depth += 1;

    if dead {
        followups.push_at(
            next_depth,
            Action::with_cost(
                victim,
                ActionBody::Death(DeathAction::new(config.death_duration)),
                0,
            ),
        );
        next_depth += 1;
    }

    next_depth
}

/// Clears a Defend guard: the augmentation on the combatant and its status
/// marker in the presentation layer.
pub(crate) fn clear_guard(victim: CombatantId, roster: &mut Roster, env: &BattleEnv<'_>) {
    if let Some(c) = roster.get_mut(victim)
        && c.block_bonus != 0.0
    {
        c.block_bonus = 0.0;
        env.presentation()
            .remove_floating_text(FloatingKey::guard(victim));
    }
}
