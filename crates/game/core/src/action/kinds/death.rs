//! Death sequencing.

use crate::action::{ActionHeader, ActionStatus, FollowUps};
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, Pose};
use crate::state::Roster;

/// Timer gating the death animation. Health is already zero from the
/// triggering hit; this action's only job is to sequence the animation
/// before the roster-level alive flag flips, removing the combatant from
/// scheduling eligibility.
#[derive(Debug)]
pub struct DeathAction {
    remaining: f32,
}

impl DeathAction {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
        }
    }

    pub(crate) fn start(&mut self, header: ActionHeader, roster: &mut Roster, env: &BattleEnv<'_>) {
        if let Some(actor) = roster.get(header.actor) {
            env.animation()
                .set_animation(header.actor, Pose::Death, actor.facing);
            env.presentation().set_camera_target(actor.world_position);
        }
    }

    pub(crate) fn tick(
        &mut self,
        header: ActionHeader,
        dt: f32,
        roster: &mut Roster,
        _env: &BattleEnv<'_>,
        _config: &EncounterConfig,
        _followups: &mut FollowUps,
    ) -> ActionStatus {
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return ActionStatus::Continue;
        }

        if let Some(actor) = roster.get_mut(header.actor) {
            actor.alive = false;
            tracing::debug!(combatant = %header.actor, "combatant died");
        }
        ActionStatus::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionId;
    use crate::state::{Combatant, CombatantId, CombatantStats, Facing, Position, Team};
    use crate::testing::TestEnv;

    #[test]
    fn flips_alive_only_after_the_timer() {
        let mut roster = Roster::new();
        let mut c = Combatant::new(
            CombatantId(1),
            "dying",
            Team(0),
            CombatantStats::default(),
            Position::ORIGIN,
            Facing::South,
        );
        c.health = 0;
        roster.add(c).unwrap();

        let fixture = TestEnv::new();
        let env = fixture.env();
        let config = EncounterConfig::default();
        let mut followups = FollowUps::new();
        let header = ActionHeader {
            id: ActionId(1),
            actor: CombatantId(1),
        };

        let mut action = DeathAction::new(0.2);
        assert_eq!(
            action.tick(header, 0.1, &mut roster, &env, &config, &mut followups),
            ActionStatus::Continue
        );
        assert!(roster.get(CombatantId(1)).unwrap().alive);

        assert_eq!(
            action.tick(header, 0.15, &mut roster, &env, &config, &mut followups),
            ActionStatus::Complete
        );
        assert!(!roster.get(CombatantId(1)).unwrap().alive);
    }
}
