use crate::state::{CombatantId, Facing};

/// Named poses the combat core can request from the animation collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Pose {
    Idle,
    Walk,
    Attack,
    Shoot,
    Cast,
    Defend,
    Death,
}

/// Animation playback oracle, one logical animation set per combatant.
///
/// The core only ever requests a pose and polls for idleness; playback
/// timing is entirely the collaborator's concern. Attack resolution gates on
/// [`is_idle`](Self::is_idle) for both parties before applying damage.
pub trait AnimationOracle: Send + Sync {
    fn set_animation(&self, combatant: CombatantId, pose: Pose, facing: Facing);

    /// True when the combatant has returned to its idle pose.
    fn is_idle(&self, combatant: CombatantId) -> bool;
}
