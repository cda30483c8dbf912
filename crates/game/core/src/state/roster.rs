//! Owned combatant collection for one encounter.

use super::{Combatant, CombatantId, Position, Team};

/// The full roster of an encounter. Owned exclusively by the encounter
/// aggregate; everything else reaches combatants through the accessors here.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant. Its id must not collide with an existing entry;
    /// duplicates are rejected by returning the combatant back.
    pub fn add(&mut self, combatant: Combatant) -> Result<(), Combatant> {
        if self.get(combatant.id).is_some() {
            return Err(combatant);
        }
        self.combatants.push(combatant);
        Ok(())
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Living combatant occupying the given cell, if any. Dead combatants
    /// never count as occupants for targeting purposes.
    pub fn living_at(&self, position: Position) -> Option<&Combatant> {
        self.combatants
            .iter()
            .find(|c| c.is_living() && c.position == position)
    }

    pub fn living_at_mut(&mut self, position: Position) -> Option<&mut Combatant> {
        self.combatants
            .iter_mut()
            .find(|c| c.is_living() && c.position == position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_living())
    }

    /// Distinct teams that still have at least one living member.
    pub fn living_teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = Vec::new();
        for c in self.living() {
            if !teams.contains(&c.team) {
                teams.push(c.team);
            }
        }
        teams
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}
