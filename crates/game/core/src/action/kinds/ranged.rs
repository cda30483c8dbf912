//! Ranged attack command with a visible ballistic projectile.

use glam::{Vec2, Vec3};

use crate::action::{ActionHeader, ActionStatus, FollowUps};
use crate::combat::AttackPlan;
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, Pose};
use crate::state::{CombatantId, Facing, Position, Roster};

use super::apply_hit;

/// Launches a projectile from attacker to target cell along a ballistic arc.
///
/// The launch velocity comes from the trajectory evaluator at start time;
/// each tick advances a flight-time parameter and evaluates the arc to get
/// the projectile's position. Exactly one of two outcomes ends the flight:
/// the arc reaches the target cell (hit, damage applies) or it enters solid
/// terrain on the way (miss, the shot was blocked).
#[derive(Debug)]
pub struct RangedAttackAction {
    target: CombatantId,
    target_cell: Position,
    plan: AttackPlan,

    // Flight state, captured at start.
    origin: Vec3,
    /// Horizontal unit direction of the firing line in world space.
    heading: Vec3,
    /// Horizontal distance to cover.
    span: f32,
    launch: Vec2,
    flight_time: f32,
}

impl RangedAttackAction {
    pub fn new(target: CombatantId, target_cell: Position, plan: AttackPlan) -> Self {
        Self {
            target,
            target_cell,
            plan,
            origin: Vec3::ZERO,
            heading: Vec3::X,
            span: 0.0,
            launch: Vec2::ZERO,
            flight_time: 0.0,
        }
    }

    pub(crate) fn start(
        &mut self,
        header: ActionHeader,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
    ) {
        let (attacker_pos, attacker_height) = match roster.get(header.actor) {
            Some(a) => (a.position, a.stats.height),
            None => return,
        };
        let target_height = roster.get(self.target).map_or(0, |t| t.stats.height);

        // Aim from torso height to torso height.
        let mut origin = env.map().world_position_of(attacker_pos);
        origin.y += attacker_height as f32 * 0.5;
        let mut dest = env.map().world_position_of(self.target_cell);
        dest.y += target_height as f32 * 0.5;

        let flat = Vec3::new(dest.x - origin.x, 0.0, dest.z - origin.z);
        self.span = flat.length();
        self.heading = if self.span > f32::EPSILON {
            flat / self.span
        } else {
            Vec3::X
        };
        self.origin = origin;
        self.launch = env
            .trajectory()
            .launch_velocity(config.gravity, self.span, dest.y - origin.y);
        self.flight_time = 0.0;

        if let Some(actor) = roster.get_mut(header.actor) {
            actor.facing = Facing::toward(actor.position, self.target_cell);
            env.animation()
                .set_animation(header.actor, Pose::Shoot, actor.facing);
        }
        env.presentation().set_camera_target(dest);
    }

    pub(crate) fn tick(
        &mut self,
        _header: ActionHeader,
        dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
        followups: &mut FollowUps,
    ) -> ActionStatus {
        self.flight_time += dt;
        let offset = env
            .trajectory()
            .evaluate(config.gravity, self.launch, self.flight_time);

        if offset.x >= self.span {
            // Arc reached the target cell.
            tracing::debug!(target = %self.target, damage = self.plan.damage, "projectile hit");
            apply_hit(
                self.target,
                self.plan.damage,
                1,
                roster,
                env,
                config,
                followups,
            );
            return ActionStatus::Complete;
        }

        let point = self.origin + self.heading * offset.x + Vec3::Y * offset.y;
        if env.map().is_occupied_solid_at(point) {
            // Intervening terrain swallowed the shot.
            tracing::debug!(target = %self.target, "projectile blocked by terrain");
            return ActionStatus::Complete;
        }

        env.presentation().set_camera_target(point);
        ActionStatus::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionId, ActionKind, Phase};
    use crate::state::{Combatant, CombatantStats, Team};
    use crate::testing::TestEnv;

    fn archer(id: u32, team: u8, pos: Position, health: u32) -> Combatant {
        let stats = CombatantStats {
            max_health: health,
            strength: 6,
            ..CombatantStats::default()
        };
        Combatant::new(CombatantId(id), format!("r{id}"), Team(team), stats, pos, Facing::East)
    }

    fn fly(
        action: &mut RangedAttackAction,
        actor: CombatantId,
        roster: &mut Roster,
        fixture: &TestEnv,
        followups: &mut FollowUps,
    ) -> u32 {
        let env = fixture.env();
        let config = EncounterConfig::default();
        let header = ActionHeader {
            id: ActionId(1),
            actor,
        };
        action.start(header, roster, &env, &config);

        let mut frames = 0;
        loop {
            frames += 1;
            assert!(frames < 100_000, "projectile never landed");
            match action.tick(header, 0.01, roster, &env, &config, followups) {
                ActionStatus::Continue => {}
                ActionStatus::Complete => return frames,
                other => panic!("unexpected status {other:?}"),
            }
        }
    }

    #[test]
    fn arc_reaches_target_and_applies_damage() {
        let mut roster = Roster::new();
        roster.add(archer(1, 0, Position::new(0, 0), 20)).unwrap();
        roster.add(archer(2, 1, Position::new(5, 0), 20)).unwrap();
        let fixture = TestEnv::new();
        let mut followups = FollowUps::new();

        let mut action =
            RangedAttackAction::new(CombatantId(2), Position::new(5, 0), AttackPlan::scripted(false, false, 6));
        fly(&mut action, CombatantId(1), &mut roster, &fixture, &mut followups);

        assert_eq!(roster.get(CombatantId(2)).unwrap().health, 14);
        let queued: Vec<_> = followups.drain().collect();
        assert_eq!(queued[0].1.kind(), ActionKind::FloatingNumber);
    }

    #[test]
    fn intervening_wall_blocks_the_shot() {
        let mut roster = Roster::new();
        roster.add(archer(1, 0, Position::new(0, 0), 20)).unwrap();
        roster.add(archer(2, 1, Position::new(5, 0), 20)).unwrap();
        let fixture = TestEnv::new();
        // A wall between the two, far taller than any reachable arc apex.
        fixture.set_height(Position::new(2, 0), 1_000);
        let mut followups = FollowUps::new();

        let mut action =
            RangedAttackAction::new(CombatantId(2), Position::new(5, 0), AttackPlan::scripted(false, false, 6));
        fly(&mut action, CombatantId(1), &mut roster, &fixture, &mut followups);

        // Miss: target untouched, nothing queued.
        assert_eq!(roster.get(CombatantId(2)).unwrap().health, 20);
        assert!(followups.is_empty());
    }

    #[test]
    fn start_runs_once_through_the_action_wrapper() {
        use crate::action::{Action, ActionBody};

        let mut roster = Roster::new();
        roster.add(archer(1, 0, Position::new(0, 0), 20)).unwrap();
        roster.add(archer(2, 1, Position::new(3, 0), 20)).unwrap();
        let fixture = TestEnv::new();
        let env = fixture.env();
        let config = EncounterConfig::default();
        let mut followups = FollowUps::new();

        let mut action = Action::with_cost(
            CombatantId(1),
            ActionBody::RangedAttack(RangedAttackAction::new(
                CombatantId(2),
                Position::new(3, 0),
                AttackPlan::scripted(false, false, 6),
            )),
            config.costs.ranged_attack,
        );
        assert_eq!(action.phase, Phase::Created);
        action.tick(0.01, &mut roster, &env, &config, &mut followups);
        assert_eq!(action.phase, Phase::Running);
    }
}
