//! Name-keyed combatant definition registry.
//!
//! Definitions are loaded once from a JSON array and threaded explicitly
//! through encounter setup; nothing here is global or lazily initialized.

use std::collections::HashMap;

use thiserror::Error;

use tactics_core::{Combatant, CombatantId, Facing, Position, Team};

use crate::definitions::CombatantDefinition;

/// Lookup failure against an already-loaded registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown combatant definition {0:?}")]
    UnknownDefinition(String),
}

/// Failure while building a registry from definition data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed definition data")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate combatant definition {0:?}")]
    Duplicate(String),
}

/// Owned table of combatant archetypes, keyed by definition name.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    by_name: HashMap<String, CombatantDefinition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON array of definitions. Duplicate names are a load error
    /// rather than a silent overwrite.
    pub fn from_json(data: &str) -> Result<Self, LoadError> {
        let definitions: Vec<CombatantDefinition> = serde_json::from_str(data)?;
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, definition: CombatantDefinition) -> Result<(), LoadError> {
        if self.by_name.contains_key(&definition.name) {
            return Err(LoadError::Duplicate(definition.name));
        }
        self.by_name.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CombatantDefinition> {
        self.by_name.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Instantiates a combatant from a named archetype, at full health with
    /// a zeroed wait counter.
    pub fn spawn(
        &self,
        name: &str,
        id: CombatantId,
        team: Team,
        position: Position,
        facing: Facing,
    ) -> Result<Combatant, RegistryError> {
        let definition = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownDefinition(name.to_owned()))?;
        Ok(Combatant::new(
            id,
            definition.name.clone(),
            team,
            definition.stats(),
            position,
            facing,
        ))
    }
}
