//! Combat state types: combatants, the roster, and the small identity and
//! board-coordinate types shared across the core.

mod combatant;
mod common;
mod roster;

pub use combatant::{Combatant, CombatantStats, UsedActions};
pub use common::{CombatantId, Facing, Position, Team};
pub use roster::Roster;
