//! Serde records for static combatant definitions.

use serde::{Deserialize, Serialize};
use tactics_core::CombatantStats;

/// One combatant archetype as it appears in a definition file. The name is
/// the registry key; everything else maps onto [`CombatantStats`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CombatantDefinition {
    pub name: String,
    pub max_health: u32,
    pub move_range: u32,
    #[serde(default = "default_jump_height")]
    pub jump_height: u32,
    pub strength: u32,
    pub speed: u32,
    #[serde(default = "default_body_height")]
    pub height: u32,
}

fn default_jump_height() -> u32 {
    1
}

fn default_body_height() -> u32 {
    2
}

impl CombatantDefinition {
    pub fn stats(&self) -> CombatantStats {
        CombatantStats {
            max_health: self.max_health,
            move_range: self.move_range,
            jump_height: self.jump_height,
            strength: self.strength,
            speed: self.speed,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let def: CombatantDefinition = serde_json::from_str(
            r#"{"name":"knight","max_health":24,"move_range":3,"strength":8,"speed":7}"#,
        )
        .unwrap();
        assert_eq!(def.jump_height, 1);
        assert_eq!(def.height, 2);
        assert_eq!(def.stats().max_health, 24);
    }
}
