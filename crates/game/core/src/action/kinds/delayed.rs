//! The delayed, re-validated command family: Heal and AreaDamage.
//!
//! These are speculative commitments: charged and queued now, resolved only
//! after their cast time has elapsed on the scheduler clock. Every scheduler
//! time advance re-checks the preconditions, and a commitment whose world
//! has drifted (the owner acted, or the owner strayed from the target) fails
//! silently instead of completing.

use crate::action::{ActionHeader, ActionStatus, FollowUps, TimeAdvance};
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, Pose};
use crate::state::{Combatant, CombatantId, Position, Roster};

use super::apply_hit;
use crate::action::ActionKind;
use crate::action::kinds::floating::FloatingNumberAction;
use crate::action::{Action, ActionBody};

/// Shared pending-commitment state for the delayed family.
#[derive(Debug)]
struct Pending {
    /// Board cell the commitment targets.
    target: Position,
    /// Manhattan distance from the owner to `target` that must still hold
    /// when the commitment resolves.
    range: u32,
    /// Cast time left, in scheduler wait units.
    remaining: u32,
}

impl Pending {
    fn new(target: Position, range: u32, cast_time: u32) -> Self {
        Self {
            target,
            range,
            remaining: cast_time,
        }
    }

    /// Preconditions that must keep holding while pending: the owner has
    /// done nothing but Move/Wait since committing (per-actor record), and
    /// the owner is still within range of the target cell.
    fn still_valid(&self, owner: &Combatant, own_kind: ActionKind) -> bool {
        let quiet = match owner.last_action {
            None => true,
            Some(kind) => kind.is_harmless_to_pending() || kind == own_kind,
        };
        quiet && owner.position.manhattan(self.target) <= self.range
    }

    /// Ages the commitment by one scheduler advance. An advance moves the
    /// owner's wait counter by its speed decay plus the roster-wide
    /// levelling `amount`, so the cast drains by the same sum: `remaining`
    /// stays in lockstep with the owner's wait returning to the floor, even
    /// across advances whose levelling amount is zero.
    fn advance(
        &mut self,
        owner_id: CombatantId,
        own_kind: ActionKind,
        amount: u32,
        roster: &Roster,
    ) -> TimeAdvance {
        match roster.get(owner_id) {
            Some(owner) if owner.is_living() && self.still_valid(owner, own_kind) => {
                self.remaining = self
                    .remaining
                    .saturating_sub(amount.saturating_add(owner.stats.speed));
                TimeAdvance::StillPending
            }
            _ => TimeAdvance::Invalidated,
        }
    }
}

/// Delayed heal on a target cell: restores the owner's strength in health to
/// whatever combatant occupies the cell at resolution time. An empty cell is
/// a failure, not a crash.
#[derive(Debug)]
pub struct HealAction {
    pending: Pending,
}

impl HealAction {
    pub fn new(target: Position, range: u32, cast_time: u32) -> Self {
        Self {
            pending: Pending::new(target, range, cast_time),
        }
    }

    pub fn target(&self) -> Position {
        self.pending.target
    }

    pub(crate) fn start(&mut self, header: ActionHeader, roster: &mut Roster, env: &BattleEnv<'_>) {
        if let Some(actor) = roster.get(header.actor) {
            env.animation()
                .set_animation(header.actor, Pose::Cast, actor.facing);
        }
        env.presentation()
            .set_camera_target(env.map().world_position_of(self.pending.target));
    }

    pub(crate) fn advance_time(
        &mut self,
        owner: CombatantId,
        amount: u32,
        roster: &Roster,
    ) -> TimeAdvance {
        self.pending.advance(owner, ActionKind::Heal, amount, roster)
    }

    pub(crate) fn tick(
        &mut self,
        header: ActionHeader,
        _dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
        followups: &mut FollowUps,
    ) -> ActionStatus {
        let Some(owner) = roster.get(header.actor) else {
            return ActionStatus::Failed;
        };
        if !self.pending.still_valid(owner, ActionKind::Heal) {
            return ActionStatus::Failed;
        }
        if self.pending.remaining > 0 {
            return ActionStatus::AwaitingTime;
        }

        let amount = owner.stats.strength;
        let Some(occupant) = roster.living_at_mut(self.pending.target) else {
            // The patient left before the cast finished.
            return ActionStatus::Failed;
        };
        let occupant_id = occupant.id;
        occupant.apply_heal(amount);
        let position = occupant.world_position;

        tracing::debug!(caster = %header.actor, patient = %occupant_id, amount, "heal resolved");
        followups.push_at(
            1,
            Action::with_cost(
                occupant_id,
                ActionBody::FloatingNumber(FloatingNumberAction::heal(amount, position, config)),
                0,
            ),
        );
        ActionStatus::Complete
    }
}

/// Delayed area damage ("cast") centered on a target cell.
///
/// Victim gathering uses a Manhattan radius plus a separate signed vertical
/// envelope, so an area attack can favor, say, same-level-or-one-below
/// targets. An empty area at resolution time is a failure.
#[derive(Debug)]
pub struct AreaDamageAction {
    pending: Pending,
    radius: u32,
    /// Inclusive (low, high) height difference from the target cell.
    vertical: (i32, i32),
}

impl AreaDamageAction {
    pub fn new(
        target: Position,
        range: u32,
        cast_time: u32,
        radius: u32,
        vertical: (i32, i32),
    ) -> Self {
        Self {
            pending: Pending::new(target, range, cast_time),
            radius,
            vertical,
        }
    }

    pub fn target(&self) -> Position {
        self.pending.target
    }

    pub(crate) fn start(&mut self, header: ActionHeader, roster: &mut Roster, env: &BattleEnv<'_>) {
        if let Some(actor) = roster.get(header.actor) {
            env.animation()
                .set_animation(header.actor, Pose::Cast, actor.facing);
        }
        env.presentation()
            .set_camera_target(env.map().world_position_of(self.pending.target));
    }

    pub(crate) fn advance_time(
        &mut self,
        owner: CombatantId,
        amount: u32,
        roster: &Roster,
    ) -> TimeAdvance {
        self.pending
            .advance(owner, ActionKind::AreaDamage, amount, roster)
    }

    pub(crate) fn tick(
        &mut self,
        header: ActionHeader,
        _dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
        followups: &mut FollowUps,
    ) -> ActionStatus {
        let Some(owner) = roster.get(header.actor) else {
            return ActionStatus::Failed;
        };
        if !self.pending.still_valid(owner, ActionKind::AreaDamage) {
            return ActionStatus::Failed;
        }
        if self.pending.remaining > 0 {
            return ActionStatus::AwaitingTime;
        }

        let amount = owner.stats.strength;
        let center_height = env.map().height(self.pending.target);
        let victims: Vec<CombatantId> = roster
            .living()
            .filter(|c| {
                if c.position.manhattan(self.pending.target) > self.radius {
                    return false;
                }
                let dh = env.map().height(c.position) - center_height;
                self.vertical.0 <= dh && dh <= self.vertical.1
            })
            .map(|c| c.id)
            .collect();

        if victims.is_empty() {
            return ActionStatus::Failed;
        }

        tracing::debug!(caster = %header.actor, victims = victims.len(), amount, "area damage resolved");
        let mut depth = 1;
        for victim in victims {
            depth = apply_hit(victim, amount, depth, roster, env, config, followups);
        }
        ActionStatus::Complete
    }
}
