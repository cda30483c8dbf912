//! Directional block and critical chance tables.

use glam::Vec2;

use crate::state::Facing;

/// Relative approach of an attack, classified from the defender's facing and
/// the direction from the defender toward the attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Approach {
    /// Defender faces the attacker.
    Front,
    /// Attack comes in orthogonally to the defender's facing.
    Side,
    /// Attacker stands behind the defender.
    Back,
}

impl Approach {
    /// Classifies by the dot product of the defender's facing vector and the
    /// unit direction from defender to attacker. Exact same direction is
    /// frontal, exact opposite is from behind, orthogonal is a flank.
    pub fn classify(defender_facing: Facing, toward_attacker: Vec2) -> Approach {
        let d = defender_facing.vector().dot(toward_attacker);
        if d > 0.0 {
            Approach::Front
        } else if d < 0.0 {
            Approach::Back
        } else {
            Approach::Side
        }
    }
}

// Directional base chances. Attacks from behind are the hardest to answer,
// frontal ones the easiest to see coming.
const BLOCK_FRONT: f32 = 0.10;
const BLOCK_SIDE: f32 = 0.20;
const BLOCK_BACK: f32 = 0.30;

const CRIT_FRONT: f32 = 0.05;
const CRIT_SIDE: f32 = 0.10;
const CRIT_BACK: f32 = 0.20;

/// Chance that the defender blocks, from the directional base plus the
/// defender's temporary Defend augmentation, clamped to [0, 1].
pub fn block_chance(approach: Approach, block_bonus: f32) -> f32 {
    let base = match approach {
        Approach::Front => BLOCK_FRONT,
        Approach::Side => BLOCK_SIDE,
        Approach::Back => BLOCK_BACK,
    };
    (base + block_bonus).clamp(0.0, 1.0)
}

/// Chance that the attack crits. Same directional lookup, independent
/// constants, no augmentation term.
pub fn crit_chance(approach: Approach) -> f32 {
    match approach {
        Approach::Front => CRIT_FRONT,
        Approach::Side => CRIT_SIDE,
        Approach::Back => CRIT_BACK,
    }
}
