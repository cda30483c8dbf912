//! Wait-counter turn scheduling.
//!
//! Turn order is not a fixed round-robin: every combatant carries a wait
//! counter that its committed actions inflate and its speed stat decays once
//! per scheduler advance. The combatant whose counter is effectively lowest
//! acts next, and the whole roster is levelled by the winner's remainder so
//! counters never grow without bound. Pending delayed actions age once per
//! advance, by their owner's speed decay plus the levelling amount.

use thiserror::Error;

use crate::state::CombatantId;

use super::Encounter;

/// Scheduling failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    /// Every combatant on the roster is dead; there is no next actor.
    #[error("no living combatants remain to schedule")]
    NoLivingCombatants,
}

/// Readiness score: lower acts sooner. Signed, so two zero counters are
/// still separated by speed.
fn readiness(wait: u32, speed: u32) -> i64 {
    i64::from(wait) - i64::from(speed)
}

/// Decays `wait` by `amount` without crossing the configured floor (and
/// without lifting a counter that already sits below it).
fn decay_floored(wait: u32, amount: u32, floor: u32) -> u32 {
    wait.saturating_sub(amount).max(floor.min(wait))
}

impl Encounter {
    /// Picks the next combatant to act.
    ///
    /// Four steps: the previous actor rotates to the back of the tie-break
    /// order, every living counter decays by its owner's speed, the lowest
    /// readiness score wins (rotation order breaks exact ties), and the
    /// winner's remaining counter is subtracted roster-wide so it lands
    /// exactly on the floor. The levelling amount is broadcast to the queue
    /// (even when zero) so every advance ages pending delayed actions.
    pub fn advance_to_next_actor(&mut self) -> Result<CombatantId, TurnError> {
        if let Some(prev) = self.current.take()
            && let Some(index) = self.rotation.iter().position(|&id| id == prev)
        {
            let id = self.rotation.remove(index);
            self.rotation.push(id);
        }

        let floor = self.config.wait_floor;
        for &id in &self.rotation {
            if let Some(combatant) = self.roster.get_mut(id)
                && combatant.is_living()
            {
                let speed = combatant.stats.speed;
                combatant.wait = decay_floored(combatant.wait, speed, floor);
            }
        }

        let mut winner: Option<(CombatantId, i64, u32)> = None;
        for &id in &self.rotation {
            let Some(combatant) = self.roster.get(id) else {
                continue;
            };
            if !combatant.is_living() {
                continue;
            }
            let score = readiness(combatant.wait, combatant.stats.speed);
            if winner.is_none_or(|(_, best, _)| score < best) {
                winner = Some((id, score, combatant.wait));
            }
        }
        let (next, _, next_wait) = winner.ok_or(TurnError::NoLivingCombatants)?;

        let amount = next_wait.saturating_sub(floor);
        if amount > 0 {
            for &id in &self.rotation {
                if let Some(combatant) = self.roster.get_mut(id)
                    && combatant.is_living()
                {
                    combatant.wait = decay_floored(combatant.wait, amount, floor);
                }
            }
        }
        self.queue
            .advance_time(amount, &mut self.roster, &self.config);

        tracing::debug!(actor = %next, advanced = amount, "turn granted");
        self.current = Some(next);
        Ok(next)
    }

    /// Projected turn rank for one combatant, 1 = acts next. Compares
    /// readiness scores across the living roster without mutating anything.
    pub fn projected_rank(&self, id: CombatantId) -> Option<usize> {
        let subject = self.roster.get(id).filter(|c| c.is_living())?;
        let my_score = readiness(subject.wait, subject.stats.speed);
        let my_slot = self.rotation.iter().position(|&r| r == id)?;

        let mut rank = 1;
        for (slot, &other) in self.rotation.iter().enumerate() {
            if other == id {
                continue;
            }
            let Some(combatant) = self.roster.get(other) else {
                continue;
            };
            if !combatant.is_living() {
                continue;
            }
            let score = readiness(combatant.wait, combatant.stats.speed);
            if score < my_score || (score == my_score && slot < my_slot) {
                rank += 1;
            }
        }
        Some(rank)
    }

    /// Simulates the next `turns` scheduler advances on copied counters,
    /// assuming nobody commits anything in between. Real state is untouched.
    pub fn forecast_turn_order(&self, turns: usize) -> Vec<CombatantId> {
        struct Sim {
            id: CombatantId,
            wait: u32,
            speed: u32,
        }
        let mut sim: Vec<Sim> = self
            .rotation
            .iter()
            .filter_map(|&id| self.roster.get(id))
            .filter(|c| c.is_living())
            .map(|c| Sim {
                id: c.id,
                wait: c.wait,
                speed: c.stats.speed,
            })
            .collect();

        let floor = self.config.wait_floor;
        let mut order = Vec::with_capacity(turns.min(sim.len() * 4));
        for _ in 0..turns {
            for entry in &mut sim {
                entry.wait = decay_floored(entry.wait, entry.speed, floor);
            }
            let mut best: Option<(usize, i64)> = None;
            for (index, entry) in sim.iter().enumerate() {
                let score = readiness(entry.wait, entry.speed);
                if best.is_none_or(|(_, b)| score < b) {
                    best = Some((index, score));
                }
            }
            let Some((index, _)) = best else {
                break;
            };
            let amount = sim[index].wait.saturating_sub(floor);
            if amount > 0 {
                for entry in &mut sim {
                    entry.wait = decay_floored(entry.wait, amount, floor);
                }
            }
            order.push(sim[index].id);
            let winner = sim.remove(index);
            sim.push(winner);
        }
        order
    }
}
