//! The action engine: multi-tick commands and the depth-insert queue.
//!
//! An [`Action`] is a small state machine owned by the [`queue::ActionQueue`].
//! Construction never runs game logic; the transition to `Running` happens on
//! the first tick at the queue top, so a command captures world state (camera
//! target, starting animation) at the moment it actually begins rather than
//! when queued. Concrete behavior lives in [`kinds`]; dispatch is an
//! exhaustive match over the closed [`ActionBody`] set, so adding a kind is a
//! compile-time-checked change.
//!
//! The Heal/AreaDamage pair forms the *delayed* family: speculative
//! commitments that observe scheduler time advances while queued and can fail
//! instead of completing.

pub mod kinds;
pub mod queue;

pub use kinds::{
    AreaDamageAction, AttackAction, DeathAction, DefendAction, FloatingNumberAction, HealAction,
    MoveAction, MovePath, RangedAttackAction, WaitAction,
};
pub use queue::{ActionQueue, QueueEvent};

use std::fmt;

use crate::config::EncounterConfig;
use crate::env::BattleEnv;
use crate::state::{CombatantId, Roster, UsedActions};

/// Identifier assigned by the queue when an action is inserted. Monotonic
/// per queue; also keys the action's floating-text popups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(pub u64);

impl ActionId {
    /// Placeholder before queue insertion.
    pub const UNASSIGNED: Self = Self(0);
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// Closed set of action kinds, used for gating flags, wait-cost lookup, and
/// the per-actor last-action record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Wait,
    Move,
    Attack,
    RangedAttack,
    Defend,
    Heal,
    AreaDamage,
    FloatingNumber,
    Death,
}

impl ActionKind {
    /// Per-turn gating bit for this kind. Follow-up kinds are not gated.
    pub fn used_flag(self) -> Option<UsedActions> {
        match self {
            ActionKind::Move => Some(UsedActions::MOVE),
            ActionKind::Attack => Some(UsedActions::ATTACK),
            ActionKind::RangedAttack => Some(UsedActions::RANGED_ATTACK),
            ActionKind::Defend => Some(UsedActions::DEFEND),
            ActionKind::Heal => Some(UsedActions::HEAL),
            ActionKind::AreaDamage => Some(UsedActions::AREA_DAMAGE),
            ActionKind::Wait | ActionKind::FloatingNumber | ActionKind::Death => None,
        }
    }

    /// True for the delayed, re-validated family.
    pub fn is_delayed(self) -> bool {
        matches!(self, ActionKind::Heal | ActionKind::AreaDamage)
    }

    /// Kinds that keep a pending delayed commitment valid when the owner
    /// performs them while it waits.
    pub fn is_harmless_to_pending(self) -> bool {
        matches!(self, ActionKind::Wait | ActionKind::Move)
    }
}

/// Lifecycle phase. `Created -> Running` happens on the first tick at the
/// queue top; `Done` is terminal for both completion and failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Created,
    Running,
    Done,
}

/// Result of ticking an action at the queue top.
#[derive(Debug, PartialEq)]
pub enum ActionStatus {
    /// Still running; tick again next frame.
    Continue,
    /// Delayed commitment whose cast time has not elapsed; the driver should
    /// keep the scheduler advancing.
    AwaitingTime,
    /// Finished; pop and splice any follow-ups.
    Complete,
    /// Delayed-family failure: no effect, pop, report.
    Failed,
}

/// Outcome of a time-advance broadcast to one queued action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeAdvance {
    /// Not a delayed action; time does not concern it.
    Unaffected,
    /// Still a valid pending commitment.
    StillPending,
    /// Preconditions no longer hold; the queue must drop it.
    Invalidated,
}

/// Follow-up actions collected during a tick, each with the queue depth the
/// completing action wants it spliced at.
#[derive(Debug, Default)]
pub struct FollowUps {
    items: Vec<(usize, Action)>,
}

impl FollowUps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, depth: usize, action: Action) {
        self.items.push((depth, action));
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (usize, Action)> + '_ {
        self.items.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Identity of a running action, passed into kind logic by value.
#[derive(Clone, Copy, Debug)]
pub struct ActionHeader {
    pub id: ActionId,
    pub actor: CombatantId,
}

/// Per-kind payload. Behavior is dispatched by exhaustive match, never by
/// downcast.
#[derive(Debug)]
pub enum ActionBody {
    Wait(WaitAction),
    Move(MoveAction),
    Attack(AttackAction),
    RangedAttack(RangedAttackAction),
    Defend(DefendAction),
    Heal(HealAction),
    AreaDamage(AreaDamageAction),
    FloatingNumber(FloatingNumberAction),
    Death(DeathAction),
}

impl ActionBody {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionBody::Wait(_) => ActionKind::Wait,
            ActionBody::Move(_) => ActionKind::Move,
            ActionBody::Attack(_) => ActionKind::Attack,
            ActionBody::RangedAttack(_) => ActionKind::RangedAttack,
            ActionBody::Defend(_) => ActionKind::Defend,
            ActionBody::Heal(_) => ActionKind::Heal,
            ActionBody::AreaDamage(_) => ActionKind::AreaDamage,
            ActionBody::FloatingNumber(_) => ActionKind::FloatingNumber,
            ActionBody::Death(_) => ActionKind::Death,
        }
    }
}

/// An in-flight command: one acting combatant, a wait cost charged at commit
/// time, an explicit lifecycle phase, and the kind payload.
#[derive(Debug)]
pub struct Action {
    pub id: ActionId,
    pub actor: CombatantId,
    pub wait_cost: u32,
    pub phase: Phase,
    pub body: ActionBody,
}

impl Action {
    /// Builds a command whose wait cost comes from the config cost table.
    pub fn command(actor: CombatantId, body: ActionBody, config: &EncounterConfig) -> Self {
        let wait_cost = config.costs.cost_of(body.kind());
        Self::with_cost(actor, body, wait_cost)
    }

    /// Builds a command with an explicit wait cost.
    pub fn with_cost(actor: CombatantId, body: ActionBody, wait_cost: u32) -> Self {
        Self {
            id: ActionId::UNASSIGNED,
            actor,
            wait_cost,
            phase: Phase::Created,
            body,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.body.kind()
    }

    pub fn is_delayed(&self) -> bool {
        self.kind().is_delayed()
    }

    fn header(&self) -> ActionHeader {
        ActionHeader {
            id: self.id,
            actor: self.actor,
        }
    }

    /// Advances this action one frame. Only the queue calls this, and only
    /// for its top entry.
    pub(crate) fn tick(
        &mut self,
        dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
        followups: &mut FollowUps,
    ) -> ActionStatus {
        let header = self.header();

        if self.phase == Phase::Created {
            match &mut self.body {
                ActionBody::Wait(a) => a.start(header, roster, env),
                ActionBody::Move(a) => a.start(header, roster, env),
                ActionBody::Attack(a) => a.start(header, roster, env),
                ActionBody::RangedAttack(a) => a.start(header, roster, env, config),
                ActionBody::Defend(a) => a.start(header, roster, env),
                ActionBody::Heal(a) => a.start(header, roster, env),
                ActionBody::AreaDamage(a) => a.start(header, roster, env),
                ActionBody::FloatingNumber(a) => a.start(header, roster, env),
                ActionBody::Death(a) => a.start(header, roster, env),
            }
            self.phase = Phase::Running;
        }

        let status = match &mut self.body {
            ActionBody::Wait(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::Move(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::Attack(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::RangedAttack(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::Defend(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::Heal(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::AreaDamage(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::FloatingNumber(a) => a.tick(header, dt, roster, env, config, followups),
            ActionBody::Death(a) => a.tick(header, dt, roster, env, config, followups),
        };

        if matches!(status, ActionStatus::Complete | ActionStatus::Failed) {
            self.phase = Phase::Done;
        }
        status
    }

    /// Observes a scheduler time advance while queued at any depth. Only the
    /// delayed family reacts; everyone else waits structurally.
    pub(crate) fn advance_time(&mut self, amount: u32, roster: &Roster) -> TimeAdvance {
        match &mut self.body {
            ActionBody::Heal(a) => a.advance_time(self.actor, amount, roster),
            ActionBody::AreaDamage(a) => a.advance_time(self.actor, amount, roster),
            _ => TimeAdvance::Unaffected,
        }
    }
}
