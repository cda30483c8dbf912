//! End-of-turn wait command.

use crate::action::{ActionHeader, ActionStatus, FollowUps};
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, FloatingKey};
use crate::state::Roster;

/// Refreshes the actor's per-turn gating and completes immediately. Also the
/// point where a lingering Defend guard decays: a new turn starts clean.
#[derive(Debug, Default)]
pub struct WaitAction;

impl WaitAction {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn start(&mut self, _header: ActionHeader, _roster: &mut Roster, _env: &BattleEnv<'_>) {}

    pub(crate) fn tick(
        &mut self,
        header: ActionHeader,
        _dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        _config: &EncounterConfig,
        _followups: &mut FollowUps,
    ) -> ActionStatus {
        if let Some(actor) = roster.get_mut(header.actor) {
            let had_guard = actor.block_bonus != 0.0;
            actor.refresh_for_new_turn();
            if had_guard {
                env.presentation()
                    .remove_floating_text(FloatingKey::guard(header.actor));
            }
        }
        ActionStatus::Complete
    }
}
