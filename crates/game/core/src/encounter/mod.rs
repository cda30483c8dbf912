//! A running battle: the roster, the action queue, and the turn scheduler
//! that arbitrates between them.
//!
//! `Encounter` owns all mutable combat state exclusively. The driving loop
//! (UI or AI) alternates between [`Encounter::advance_to_next_actor`] to
//! learn who acts, [`Encounter::commit`] to queue that actor's command, and
//! [`Encounter::tick_frame`] once per engine frame until the queue drains.

mod turns;

pub use turns::TurnError;

use crate::action::{Action, ActionQueue, QueueEvent};
use crate::config::EncounterConfig;
use crate::env::BattleEnv;
use crate::state::{Combatant, CombatantId, Roster, Team};

/// Verdict from tallying living teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// Two or more teams still have survivors.
    Ongoing,
    /// Exactly one team has survivors.
    Victory(Team),
    /// Nobody survived.
    Draw,
}

/// One battle in progress.
pub struct Encounter {
    roster: Roster,
    queue: ActionQueue,
    /// Turn rotation, least-recently-acted first. Breaks scheduler ties.
    rotation: Vec<CombatantId>,
    current: Option<CombatantId>,
    config: EncounterConfig,
}

impl Encounter {
    pub fn new(config: EncounterConfig) -> Self {
        Self {
            roster: Roster::new(),
            queue: ActionQueue::new(),
            rotation: Vec::new(),
            current: None,
            config,
        }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    /// Whoever the scheduler last granted a turn to.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.current
    }

    /// Joins a combatant, mid-encounter or before the first turn. The render
    /// position is derived from the board cell; a duplicate id hands the
    /// combatant back.
    pub fn add_combatant(
        &mut self,
        mut combatant: Combatant,
        env: &BattleEnv<'_>,
    ) -> Result<(), Combatant> {
        combatant.world_position = env.map().world_position_of(combatant.position);
        let id = combatant.id;
        self.roster.add(combatant)?;
        self.rotation.push(id);
        tracing::debug!(combatant = %id, "joined encounter");
        Ok(())
    }

    /// Commits a command at the top of the queue, charging its wait cost.
    pub fn commit(&mut self, action: Action) {
        self.queue.push_top(action, &mut self.roster);
    }

    /// Cancels the top command if it has not started running yet, refunding
    /// its wait cost.
    pub fn cancel_pending(&mut self) -> bool {
        self.queue.cancel_top(&mut self.roster)
    }

    /// Drives the queue top for one frame.
    pub fn tick_frame(&mut self, dt: f32, env: &BattleEnv<'_>) -> QueueEvent {
        self.queue.tick_top(dt, &mut self.roster, env, &self.config)
    }

    pub fn check_game_over(&self) -> GameOutcome {
        let teams = self.roster.living_teams();
        match teams.as_slice() {
            [] => GameOutcome::Draw,
            [only] => GameOutcome::Victory(*only),
            _ => GameOutcome::Ongoing,
        }
    }
}
