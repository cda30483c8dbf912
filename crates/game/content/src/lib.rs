//! Static combatant content for the tactics combat core.
//!
//! `tactics-content` loads combatant archetype definitions from JSON and
//! instantiates [`tactics_core::Combatant`]s from them. The registry is an
//! explicitly-owned lookup table threaded through encounter setup, never a
//! global.

pub mod definitions;
pub mod registry;

pub use definitions::CombatantDefinition;
pub use registry::{DefinitionRegistry, LoadError, RegistryError};
