//! Deterministic tactics combat: wait-counter turn scheduling and a
//! stack-based action engine.
//!
//! `tactics-core` owns the rules — combatant state, the attack resolver, the
//! action state machines, and the scheduler that arbitrates turns. Everything
//! the rules need from the outside world (map geometry, animation playback,
//! trajectory math, presentation, randomness) is consumed through the oracle
//! traits in [`env`], so the whole crate runs headless. All mutation flows
//! through [`encounter::Encounter`].

pub mod action;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod env;
pub mod state;

#[cfg(test)]
mod testing;

pub use action::{
    Action, ActionBody, ActionId, ActionKind, ActionQueue, ActionStatus, AreaDamageAction,
    AttackAction, DeathAction, DefendAction, FloatingNumberAction, HealAction, MoveAction,
    MovePath, Phase, QueueEvent, RangedAttackAction, TimeAdvance, WaitAction,
};
pub use combat::{Approach, AttackPlan};
pub use config::{EncounterConfig, WaitCosts};
pub use encounter::{Encounter, GameOutcome, TurnError};
pub use env::{
    AnimationOracle, Ballistics, BattleEnv, FloatingKey, MapOracle, NullPresentation, PcgRng,
    Pose, PresentationSink, RngOracle, TextColor, TrajectoryOracle, compute_seed,
};
pub use state::{
    Combatant, CombatantId, CombatantStats, Facing, Position, Roster, Team, UsedActions,
};
