//! Depth-insert action stack with top-only ticking.

use crate::config::EncounterConfig;
use crate::env::{BattleEnv, TextColor};
use crate::state::Roster;

use super::kinds::FloatingNumberAction;
use super::{Action, ActionBody, ActionId, ActionKind, ActionStatus, Phase, TimeAdvance};

/// What the queue-top tick produced this frame. The encounter driver uses
/// this to decide whether to keep ticking, advance the scheduler, or hand
/// control back for the next command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueEvent {
    /// Nothing queued; the scheduler should pick the next actor.
    Empty,
    /// The top action consumed the frame and continues next frame.
    InProgress,
    /// The top action is a pending delayed commitment; it resolves only when
    /// scheduler time is broadcast, so the driver must advance the clock.
    AwaitingSchedule,
    /// The top action finished and was popped.
    Completed(ActionKind),
    /// The top action (delayed family) failed its validity check and was
    /// popped without effect.
    Failed(ActionKind),
}

/// The action stack. Index 0 is the top; new player commands land there,
/// follow-ups are spliced below by depth. A secondary id index over the
/// delayed entries is rebuilt on every mutation so time broadcasts never
/// scan payloads.
#[derive(Debug, Default)]
pub struct ActionQueue {
    entries: Vec<Action>,
    delayed: Vec<ActionId>,
    next_id: u64,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            delayed: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_kind(&self) -> Option<ActionKind> {
        self.entries.first().map(Action::kind)
    }

    /// True while any delayed commitment sits in the queue at any depth.
    pub fn has_pending_delayed(&self) -> bool {
        !self.delayed.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.entries.iter().map(Action::kind)
    }

    fn assign_id(&mut self, action: &mut Action) {
        action.id = ActionId(self.next_id);
        self.next_id += 1;
    }

    fn rebuild_delayed_index(&mut self) {
        self.delayed.clear();
        self.delayed
            .extend(self.entries.iter().filter(|a| a.is_delayed()).map(|a| a.id));
    }

    /// Commits a player command at the top: charges its wait cost, marks the
    /// kind used for this turn, and records it as the actor's last action.
    pub fn push_top(&mut self, mut action: Action, roster: &mut Roster) {
        self.assign_id(&mut action);
        if let Some(actor) = roster.get_mut(action.actor) {
            actor.add_wait_cost(action.wait_cost);
            actor.set_action_used(action.kind());
            actor.last_action = Some(action.kind());
        }
        tracing::debug!(id = %action.id, actor = %action.actor, kind = %action.kind(), "command committed");
        self.entries.insert(0, action);
        self.rebuild_delayed_index();
    }

    /// Inserts a follow-up at `depth` (0 = top), clamped to the queue length.
    /// Follow-ups charge no wait cost and touch no gating state.
    pub fn push_at(&mut self, depth: usize, mut action: Action) {
        self.assign_id(&mut action);
        let depth = depth.min(self.entries.len());
        self.entries.insert(depth, action);
        self.rebuild_delayed_index();
    }

    /// Cancels the top entry if it has not started running yet, rolling back
    /// the wait cost and gating flag it charged on commit. Running actions
    /// cannot be cancelled.
    pub fn cancel_top(&mut self, roster: &mut Roster) -> bool {
        let Some(top) = self.entries.first() else {
            return false;
        };
        if top.phase != Phase::Created {
            return false;
        }
        let action = self.entries.remove(0);
        if let Some(actor) = roster.get_mut(action.actor) {
            actor.undo_wait_cost();
            actor.clear_action_used(action.kind());
            actor.last_action = None;
        }
        tracing::debug!(id = %action.id, actor = %action.actor, kind = %action.kind(), "command cancelled");
        self.rebuild_delayed_index();
        true
    }

    /// Ticks the top entry one frame. Completion pops it and splices its
    /// follow-ups at their requested depths (measured relative to the
    /// completing entry, so depth 1 becomes the new top). Failure pops it
    /// and surfaces a notice popup in its place.
    pub fn tick_top(
        &mut self,
        dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
    ) -> QueueEvent {
        let Some(top) = self.entries.first_mut() else {
            return QueueEvent::Empty;
        };

        let mut followups = super::FollowUps::new();
        let status = top.tick(dt, roster, env, config, &mut followups);
        match status {
            ActionStatus::Continue => QueueEvent::InProgress,
            ActionStatus::AwaitingTime => QueueEvent::AwaitingSchedule,
            ActionStatus::Complete => {
                let done = self.entries.remove(0);
                for (depth, action) in followups.drain() {
                    let mut spliced = action;
                    self.assign_id(&mut spliced);
                    let at = depth.saturating_sub(1).min(self.entries.len());
                    self.entries.insert(at, spliced);
                }
                self.rebuild_delayed_index();
                QueueEvent::Completed(done.kind())
            }
            ActionStatus::Failed => {
                let failed = self.entries.remove(0);
                tracing::info!(id = %failed.id, actor = %failed.actor, kind = %failed.kind(), "action failed");
                self.push_failure_notice(&failed, roster, config);
                self.rebuild_delayed_index();
                QueueEvent::Failed(failed.kind())
            }
        }
    }

    /// Broadcasts a scheduler time advance to every delayed entry. Entries
    /// whose preconditions no longer hold are dropped on the spot, each
    /// replaced by a failure notice so the drop is visible.
    pub fn advance_time(
        &mut self,
        amount: u32,
        roster: &mut Roster,
        config: &EncounterConfig,
    ) {
        for id in std::mem::take(&mut self.delayed) {
            let Some(index) = self.entries.iter().position(|a| a.id == id) else {
                continue;
            };
            if self.entries[index].advance_time(amount, roster) == TimeAdvance::Invalidated {
                let failed = self.entries.remove(index);
                tracing::info!(
                    id = %failed.id, actor = %failed.actor, kind = %failed.kind(),
                    "pending action invalidated"
                );
                // The notice takes the failed entry's slot so surrounding
                // order is preserved.
                if let Some(notice) = self.failure_notice(&failed, roster, config) {
                    self.entries.insert(index, notice);
                }
            }
        }
        self.rebuild_delayed_index();
    }

    fn failure_notice(
        &mut self,
        failed: &Action,
        roster: &Roster,
        config: &EncounterConfig,
    ) -> Option<Action> {
        let owner = roster.get(failed.actor)?;
        let mut notice = Action::with_cost(
            failed.actor,
            ActionBody::FloatingNumber(FloatingNumberAction::notice(
                "Failed",
                TextColor::RED,
                owner.world_position,
                config,
            )),
            0,
        );
        self.assign_id(&mut notice);
        Some(notice)
    }

    fn push_failure_notice(&mut self, failed: &Action, roster: &Roster, config: &EncounterConfig) {
        if let Some(notice) = self.failure_notice(failed, roster, config) {
            self.entries.insert(0, notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::kinds::{HealAction, WaitAction};
    use crate::state::{Combatant, CombatantId, CombatantStats, Facing, Position, Team};
    use crate::testing::TestEnv;

    fn roster_with(ids: &[u32]) -> Roster {
        let mut roster = Roster::new();
        for (i, &id) in ids.iter().enumerate() {
            roster
                .add(Combatant::new(
                    CombatantId(id),
                    format!("c{id}"),
                    Team(0),
                    CombatantStats::default(),
                    Position::new(i as i32, 0),
                    Facing::North,
                ))
                .unwrap();
        }
        roster
    }

    fn wait_command(actor: u32, config: &EncounterConfig) -> Action {
        Action::command(
            CombatantId(actor),
            ActionBody::Wait(WaitAction::new()),
            config,
        )
    }

    #[test]
    fn push_top_charges_cost_and_marks_the_kind_used() {
        let config = EncounterConfig::default();
        let mut roster = roster_with(&[1]);
        let mut queue = ActionQueue::new();

        queue.push_top(wait_command(1, &config), &mut roster);

        let actor = roster.get(CombatantId(1)).unwrap();
        assert_eq!(actor.wait, config.costs.wait);
        assert_eq!(actor.last_action, Some(ActionKind::Wait));
        assert_eq!(queue.top_kind(), Some(ActionKind::Wait));
    }

    #[test]
    fn depth_inserts_below_the_top_run_in_push_order() {
        // While X runs, its logic schedules Y at depth 1 and Z at depth 2:
        // the observed execution order must be X, Y, Z.
        let config = EncounterConfig::default();
        let mut roster = roster_with(&[1]);
        let mut queue = ActionQueue::new();

        queue.push_top(wait_command(1, &config), &mut roster); // X
        queue.push_at(
            1,
            Action::with_cost(CombatantId(1), ActionBody::Wait(WaitAction::new()), 0), // Y
        );
        queue.push_at(
            2,
            Action::with_cost(CombatantId(1), ActionBody::Wait(WaitAction::new()), 0), // Z
        );

        let ids: Vec<ActionId> = queue.entries.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![ActionId(1), ActionId(2), ActionId(3)]);

        let fixture = TestEnv::new();
        let env = fixture.env();
        let mut executed = Vec::new();
        while !queue.is_empty() {
            let top = queue.entries[0].id;
            if let QueueEvent::Completed(_) = queue.tick_top(0.016, &mut roster, &env, &config) {
                executed.push(top);
            }
        }
        assert_eq!(executed, vec![ActionId(1), ActionId(2), ActionId(3)]);
    }

    #[test]
    fn cancel_rolls_back_an_uncommitted_command_once() {
        let config = EncounterConfig::default();
        let mut roster = roster_with(&[1]);
        let mut queue = ActionQueue::new();

        queue.push_top(wait_command(1, &config), &mut roster);
        assert!(queue.cancel_top(&mut roster));

        let actor = roster.get(CombatantId(1)).unwrap();
        assert_eq!(actor.wait, 0);
        assert_eq!(actor.last_action, None);
        assert!(queue.is_empty());
        assert!(!queue.cancel_top(&mut roster));
    }

    #[test]
    fn running_actions_cannot_be_cancelled() {
        let config = EncounterConfig::default();
        let mut roster = roster_with(&[1]);
        let mut queue = ActionQueue::new();
        let fixture = TestEnv::new();
        let env = fixture.env();

        // A heal with cast time left stays at the top in Running phase.
        queue.push_top(
            Action::command(
                CombatantId(1),
                ActionBody::Heal(HealAction::new(Position::new(0, 0), 2, 100)),
                &config,
            ),
            &mut roster,
        );
        assert_eq!(
            queue.tick_top(0.016, &mut roster, &env, &config),
            QueueEvent::AwaitingSchedule
        );
        assert!(!queue.cancel_top(&mut roster));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn invalidated_delayed_entries_are_dropped_with_a_notice() {
        let config = EncounterConfig::default();
        let mut roster = roster_with(&[1]);
        let mut queue = ActionQueue::new();

        queue.push_top(
            Action::command(
                CombatantId(1),
                ActionBody::Heal(HealAction::new(Position::new(0, 0), 1, 100)),
                &config,
            ),
            &mut roster,
        );
        assert!(queue.has_pending_delayed());

        // The owner wanders out of range while the cast is pending.
        roster.get_mut(CombatantId(1)).unwrap().position = Position::new(5, 5);
        queue.advance_time(40, &mut roster, &config);

        assert!(!queue.has_pending_delayed());
        assert_eq!(queue.top_kind(), Some(ActionKind::FloatingNumber));
    }

    #[test]
    fn failed_resolution_pops_and_surfaces_a_notice() {
        let config = EncounterConfig::default();
        let mut roster = roster_with(&[1]);
        let mut queue = ActionQueue::new();
        let fixture = TestEnv::new();
        let env = fixture.env();

        // Heal targeting an empty cell with zero cast time fails on tick.
        queue.push_top(
            Action::command(
                CombatantId(1),
                ActionBody::Heal(HealAction::new(Position::new(7, 7), 20, 0)),
                &config,
            ),
            &mut roster,
        );
        assert_eq!(
            queue.tick_top(0.016, &mut roster, &env, &config),
            QueueEvent::Failed(ActionKind::Heal)
        );
        assert_eq!(queue.top_kind(), Some(ActionKind::FloatingNumber));
    }
}
