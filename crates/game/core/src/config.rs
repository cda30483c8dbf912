use crate::action::ActionKind;

/// Encounter configuration constants and tunable balance parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterConfig {
    /// Floor the scheduler levels wait counters down to; the turn winner
    /// lands exactly here.
    pub wait_floor: u32,

    /// Base wait costs charged when a command of each kind is committed.
    pub costs: WaitCosts,

    /// Movement playback rate in cells per second.
    pub move_rate: f32,

    /// Lifetime of a floating damage/heal popup, in seconds.
    pub popup_duration: f32,

    /// Death animation gate before the alive flag flips, in seconds.
    pub death_duration: f32,

    /// Block-chance augmentation granted by Defend.
    pub defend_bonus: f32,

    /// Gravity magnitude fed to the trajectory evaluator (world units/s²).
    pub gravity: f32,
}

impl EncounterConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum cells in a single move command's path.
    pub const MAX_PATH: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WAIT_FLOOR: u32 = 0;
    pub const DEFAULT_MOVE_RATE: f32 = 4.0;
    pub const DEFAULT_POPUP_DURATION: f32 = 1.0;
    pub const DEFAULT_DEATH_DURATION: f32 = 1.5;
    pub const DEFAULT_DEFEND_BONUS: f32 = 0.3;
    pub const DEFAULT_GRAVITY: f32 = 9.8;

    pub fn new() -> Self {
        Self {
            wait_floor: Self::DEFAULT_WAIT_FLOOR,
            costs: WaitCosts::default(),
            move_rate: Self::DEFAULT_MOVE_RATE,
            popup_duration: Self::DEFAULT_POPUP_DURATION,
            death_duration: Self::DEFAULT_DEATH_DURATION,
            defend_bonus: Self::DEFAULT_DEFEND_BONUS,
            gravity: Self::DEFAULT_GRAVITY,
        }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Base wait costs per committed command kind. Follow-up kinds
/// (FloatingNumber, Death) are free: they are sequencing, not commitments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitCosts {
    pub wait: u32,
    pub move_: u32,
    pub attack: u32,
    pub ranged_attack: u32,
    pub defend: u32,
    /// Cast time: doubles as the delayed Heal's pending countdown.
    pub heal: u32,
    /// Cast time: doubles as the delayed AreaDamage's pending countdown.
    pub area_damage: u32,
}

impl WaitCosts {
    pub fn cost_of(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Wait => self.wait,
            ActionKind::Move => self.move_,
            ActionKind::Attack => self.attack,
            ActionKind::RangedAttack => self.ranged_attack,
            ActionKind::Defend => self.defend,
            ActionKind::Heal => self.heal,
            ActionKind::AreaDamage => self.area_damage,
            ActionKind::FloatingNumber | ActionKind::Death => 0,
        }
    }
}

impl Default for WaitCosts {
    fn default() -> Self {
        Self {
            wait: 100,
            move_: 200,
            attack: 300,
            ranged_attack: 300,
            defend: 150,
            heal: 400,
            area_damage: 500,
        }
    }
}
