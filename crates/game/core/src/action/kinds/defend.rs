//! Defend command.

use crate::action::{ActionHeader, ActionStatus, FollowUps};
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, FloatingKey, Pose, TextColor};
use crate::state::Roster;

/// Single-tick guard: raises the actor's augmented block chance and plants a
/// persistent status marker that tracks the actor's rendered position. The
/// marker and the augmentation are cleared together, either when the actor is
/// attacked or when the actor's next turn begins.
#[derive(Debug, Default)]
pub struct DefendAction;

impl DefendAction {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn start(&mut self, header: ActionHeader, roster: &mut Roster, env: &BattleEnv<'_>) {
        if let Some(actor) = roster.get(header.actor) {
            env.animation()
                .set_animation(header.actor, Pose::Defend, actor.facing);
        }
    }

    pub(crate) fn tick(
        &mut self,
        header: ActionHeader,
        _dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
        _followups: &mut FollowUps,
    ) -> ActionStatus {
        if let Some(actor) = roster.get_mut(header.actor) {
            actor.block_bonus = config.defend_bonus;
            env.presentation().show_floating_text(
                FloatingKey::guard(header.actor),
                "Guard",
                TextColor::YELLOW,
                actor.world_position,
                f32::INFINITY,
            );
        }
        ActionStatus::Complete
    }
}
