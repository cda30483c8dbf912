//! Melee attack command.

use crate::action::{Action, ActionBody, ActionHeader, ActionStatus, FollowUps};
use crate::combat::AttackPlan;
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, Pose, TextColor};
use crate::state::{CombatantId, Facing, Roster};

use super::floating::FloatingNumberAction;
use super::{apply_hit, clear_guard};

/// Swings at an adjacent target with an outcome rolled at creation time.
///
/// Resolution waits until both attacker and defender have returned to an
/// idle pose, then branches on the precomputed plan: a block emits a
/// "Blocked" notice and no damage; otherwise damage lands and the damage
/// popup (depth 1) and, on a kill, the death sequence (depth 2) are queued
/// below this action. Either way the defender's guard is spent.
#[derive(Debug)]
pub struct AttackAction {
    target: CombatantId,
    plan: AttackPlan,
}

impl AttackAction {
    pub fn new(target: CombatantId, plan: AttackPlan) -> Self {
        Self { target, plan }
    }

    pub fn plan(&self) -> &AttackPlan {
        &self.plan
    }

    pub(crate) fn start(&mut self, header: ActionHeader, roster: &mut Roster, env: &BattleEnv<'_>) {
        let target_pos = roster.get(self.target).map(|t| t.position);
        if let Some(actor) = roster.get_mut(header.actor) {
            if let Some(target_pos) = target_pos {
                actor.facing = Facing::toward(actor.position, target_pos);
            }
            env.animation()
                .set_animation(header.actor, Pose::Attack, actor.facing);
        }
        if let Some(target) = roster.get(self.target) {
            env.presentation().set_camera_target(target.world_position);
        }
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
        // Resolve only once both parties are back in an idle pose.
        if !env.animation().is_idle(header.actor) || !env.animation().is_idle(self.target) {
            return ActionStatus::Continue;
        }

        let Some(target) = roster.get(self.target) else {
            // Target vanished mid-swing; treat as a whiff, not a crash.
            return ActionStatus::Complete;
        };
        if !target.is_living() {
            return ActionStatus::Complete;
        }
        let target_world = target.world_position;

        if self.plan.blocked {
            tracing::debug!(attacker = %header.actor, target = %self.target, "attack blocked");
            followups.push_at(
                1,
                Action::with_cost(
                    self.target,
                    ActionBody::FloatingNumber(FloatingNumberAction::notice(
                        "Blocked",
                        TextColor::YELLOW,
                        target_world,
                        config,
                    )),
                    0,
                ),
            );
        } else {
            apply_hit(
                self.target,
                self.plan.damage,
                1,
                roster,
                env,
                config,
                followups,
            );
        }

        // Being attacked ends the Defend augmentation either way.
        clear_guard(self.target, roster, env);

        ActionStatus::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionId, ActionKind};
    use crate::state::{Combatant, CombatantStats, Position, Team};
    use crate::testing::TestEnv;

    fn fighter(id: u32, team: u8, pos: Position, health: u32, strength: u32) -> Combatant {
        let stats = CombatantStats {
            max_health: health,
            strength,
            ..CombatantStats::default()
        };
        Combatant::new(CombatantId(id), format!("f{id}"), Team(team), stats, pos, Facing::North)
    }

    fn tick_once(
        action: &mut AttackAction,
        actor: CombatantId,
        roster: &mut Roster,
        fixture: &TestEnv,
        followups: &mut FollowUps,
    ) -> ActionStatus {
        let env = fixture.env();
        let config = EncounterConfig::default();
        let header = ActionHeader {
            id: ActionId(1),
            actor,
        };
        action.tick(header, 0.016, roster, &env, &config, followups)
    }

    #[test]
    fn unblocked_hit_applies_damage_and_queues_followups() {
        let mut roster = Roster::new();
        roster
            .add(fighter(1, 0, Position::new(0, 0), 20, 10))
            .unwrap();
        roster
            .add(fighter(2, 1, Position::new(1, 0), 15, 5))
            .unwrap();
        let fixture = TestEnv::new();
        let mut followups = FollowUps::new();

        let mut action = AttackAction::new(CombatantId(2), AttackPlan::scripted(false, false, 10));
        let status = tick_once(&mut action, CombatantId(1), &mut roster, &fixture, &mut followups);

        assert_eq!(status, ActionStatus::Complete);
        assert_eq!(roster.get(CombatantId(2)).unwrap().health, 5);

        let queued: Vec<_> = followups.drain().collect();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].0, 1);
        assert_eq!(queued[0].1.kind(), ActionKind::FloatingNumber);
    }

    #[test]
    fn lethal_hit_also_queues_death_below_the_popup() {
        let mut roster = Roster::new();
        roster
            .add(fighter(1, 0, Position::new(0, 0), 20, 10))
            .unwrap();
        roster
            .add(fighter(2, 1, Position::new(1, 0), 15, 5))
            .unwrap();
        let fixture = TestEnv::new();
        let mut followups = FollowUps::new();

        // strength 10, critical -> 20 damage, clamps 15 -> 0
        let mut action = AttackAction::new(CombatantId(2), AttackPlan::scripted(false, true, 20));
        tick_once(&mut action, CombatantId(1), &mut roster, &fixture, &mut followups);

        let victim = roster.get(CombatantId(2)).unwrap();
        assert_eq!(victim.health, 0);
        assert!(victim.alive, "death is sequenced, not immediate");

        let queued: Vec<_> = followups.drain().collect();
        let kinds: Vec<_> = queued.iter().map(|(d, a)| (*d, a.kind())).collect();
        assert_eq!(
            kinds,
            vec![(1, ActionKind::FloatingNumber), (2, ActionKind::Death)]
        );
    }

    #[test]
    fn blocked_attack_leaves_health_and_spends_the_guard() {
        let mut roster = Roster::new();
        roster
            .add(fighter(1, 0, Position::new(0, 0), 20, 10))
            .unwrap();
        roster
            .add(fighter(2, 1, Position::new(1, 0), 15, 5))
            .unwrap();
        roster.get_mut(CombatantId(2)).unwrap().block_bonus = 0.3;
        let fixture = TestEnv::new();
        let mut followups = FollowUps::new();

        let mut action = AttackAction::new(CombatantId(2), AttackPlan::scripted(true, false, 10));
        tick_once(&mut action, CombatantId(1), &mut roster, &fixture, &mut followups);

        let defender = roster.get(CombatantId(2)).unwrap();
        assert_eq!(defender.health, 15);
        assert_eq!(defender.block_bonus, 0.0);

        let queued: Vec<_> = followups.drain().collect();
        assert_eq!(queued.len(), 1, "only the Blocked notice");
        assert_eq!(queued[0].1.kind(), ActionKind::FloatingNumber);
    }

    #[test]
    fn waits_for_idle_poses_before_resolving() {
        let mut roster = Roster::new();
        roster
            .add(fighter(1, 0, Position::new(0, 0), 20, 10))
            .unwrap();
        roster
            .add(fighter(2, 1, Position::new(1, 0), 15, 5))
            .unwrap();
        let fixture = TestEnv::new();
        fixture.set_busy(CombatantId(1), true);
        let mut followups = FollowUps::new();

        let mut action = AttackAction::new(CombatantId(2), AttackPlan::scripted(false, false, 10));
        let status = tick_once(&mut action, CombatantId(1), &mut roster, &fixture, &mut followups);
        assert_eq!(status, ActionStatus::Continue);
        assert_eq!(roster.get(CombatantId(2)).unwrap().health, 15);

        fixture.set_busy(CombatantId(1), false);
        let status = tick_once(&mut action, CombatantId(1), &mut roster, &fixture, &mut followups);
        assert_eq!(status, ActionStatus::Complete);
        assert_eq!(roster.get(CombatantId(2)).unwrap().health, 5);
    }
}
