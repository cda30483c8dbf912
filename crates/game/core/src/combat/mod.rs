//! Combat resolution.
//!
//! Pure functions computing block chance, critical chance, and damage from
//! relative facing and stats. The only non-pure entry point is the weighted
//! attack roll, which draws from the [`RngOracle`](crate::env::RngOracle);
//! everything feeding it is deterministic and side-effect free.

mod chances;
mod damage;
mod result;

pub use chances::{Approach, block_chance, crit_chance};
pub use damage::attack_damage;
pub use result::{AttackPlan, plan_attack, roll};
