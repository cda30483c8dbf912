//! Combatant state and its clamped mutation operations.
//!
//! All health, wait-counter, and gating mutation flows through the methods
//! here; nothing outside the core touches these fields directly. Out-of-range
//! inputs are clamped at the mutation site rather than signalled, so a running
//! combat simulation never aborts over a stat invariant.

use bitflags::bitflags;
use glam::Vec3;

use crate::action::ActionKind;

use super::{CombatantId, Facing, Position, Team};

/// Static stat snapshot captured when the combatant is spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantStats {
    /// Upper health bound; `apply_heal` clamps to this.
    pub max_health: u32,
    /// Maximum path length (in cells) for a single move command.
    pub move_range: u32,
    /// Height difference (in tiles) this combatant can climb in one step.
    pub jump_height: u32,
    /// Damage and heal magnitude.
    pub strength: u32,
    /// Recovery rate: how much the wait counter decays per scheduler advance.
    pub speed: u32,
    /// Body height in world units, used by reach checks and projectile aim.
    pub height: u32,
}

impl Default for CombatantStats {
    fn default() -> Self {
        Self {
            max_health: 10,
            move_range: 4,
            jump_height: 1,
            strength: 3,
            speed: 10,
            height: 2,
        }
    }
}

bitflags! {
    /// Per-turn availability mask. A set bit means the action kind has been
    /// spent this turn; `refresh_for_new_turn` clears the whole mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UsedActions: u8 {
        const MOVE          = 1 << 0;
        const ATTACK        = 1 << 1;
        const RANGED_ATTACK = 1 << 2;
        const DEFEND        = 1 << 3;
        const HEAL          = 1 << 4;
        const AREA_DAMAGE   = 1 << 5;
    }
}

/// A single combatant on the board.
///
/// # Invariants
///
/// - `health <= stats.max_health` (maintained by `apply_damage`/`apply_heal`)
/// - `wait` never underflows (saturating decay)
/// - `alive == false` excludes the combatant from scheduling and targeting;
///   health reaching zero does *not* flip it — the Death action does, after
///   its animation gate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub team: Team,
    pub alive: bool,

    pub stats: CombatantStats,
    pub health: u32,

    /// Recovery-time accumulator; lower values act sooner.
    pub wait: u32,
    /// Cost of the most recently committed action, undoable exactly once.
    pub last_wait_cost: u32,
    /// Kind of the most recently committed action. Consulted by the delayed
    /// action family's validity checks (per-actor scope).
    pub last_action: Option<ActionKind>,

    /// Per-turn action-availability mask.
    pub used: UsedActions,

    /// Authoritative board cell.
    pub position: Position,
    /// Render-space cache, interpolated by Move and snapped on completion.
    pub world_position: Vec3,
    pub facing: Facing,

    /// Augmented block chance granted by Defend; zero when no guard is up.
    pub block_bonus: f32,
}

impl Combatant {
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        team: Team,
        stats: CombatantStats,
        position: Position,
        facing: Facing,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            alive: true,
            health: stats.max_health,
            stats,
            wait: 0,
            last_wait_cost: 0,
            last_action: None,
            used: UsedActions::empty(),
            position,
            world_position: Vec3::ZERO,
            facing,
            block_bonus: 0.0,
        }
    }

    /// Reduces health, clamped at 0. Reaching 0 leaves `alive` untouched;
    /// the Death action flips it after the animation delay.
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restores health, clamped at `max_health`.
    pub fn apply_heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.stats.max_health);
    }

    /// Charges a committed action's wait cost and remembers it so a command
    /// that aborts before committing can roll it back once.
    pub fn add_wait_cost(&mut self, cost: u32) {
        self.wait += cost;
        self.last_wait_cost = cost;
    }

    /// Rolls back the most recent wait cost. Idempotent: a second call
    /// without an intervening `add_wait_cost` is a no-op.
    pub fn undo_wait_cost(&mut self) {
        self.wait = self.wait.saturating_sub(self.last_wait_cost);
        self.last_wait_cost = 0;
    }

    /// Subtracts recovery from the wait counter, saturating at 0.
    pub fn decay_wait(&mut self, amount: u32) {
        self.wait = self.wait.saturating_sub(amount);
    }

    pub fn set_action_used(&mut self, kind: ActionKind) {
        if let Some(flag) = kind.used_flag() {
            self.used.insert(flag);
        }
    }

    pub fn clear_action_used(&mut self, kind: ActionKind) {
        if let Some(flag) = kind.used_flag() {
            self.used.remove(flag);
        }
    }

    pub fn has_used(&self, kind: ActionKind) -> bool {
        kind.used_flag().is_some_and(|flag| self.used.contains(flag))
    }

    /// Resets per-turn state at the start of this combatant's own turn:
    /// the availability mask, the last-action record, and any lingering
    /// Defend augmentation (the time-decay arm of its clear condition).
    pub fn refresh_for_new_turn(&mut self) {
        self.used = UsedActions::empty();
        self.last_action = None;
        self.block_bonus = 0.0;
    }

    /// True when this combatant still participates in scheduling and
    /// targeting.
    pub fn is_living(&self) -> bool {
        self.alive
    }
}
