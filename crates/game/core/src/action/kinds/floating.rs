//! Floating combat text timer.

use glam::Vec3;

use crate::action::{ActionHeader, ActionStatus, FollowUps};
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, FloatingKey, TextColor};
use crate::state::Roster;

/// Pure countdown that feeds the remaining lifetime into the presentation
/// sink every frame, so the popup fades smoothly, then removes it.
#[derive(Debug)]
pub struct FloatingNumberAction {
    text: String,
    color: TextColor,
    position: Vec3,
    remaining: f32,
}

impl FloatingNumberAction {
    /// Red damage number.
    pub fn damage(amount: u32, position: Vec3, config: &EncounterConfig) -> Self {
        Self {
            text: amount.to_string(),
            color: TextColor::RED,
            position,
            remaining: config.popup_duration,
        }
    }

    /// Green heal number.
    pub fn heal(amount: u32, position: Vec3, config: &EncounterConfig) -> Self {
        Self {
            text: amount.to_string(),
            color: TextColor::GREEN,
            position,
            remaining: config.popup_duration,
        }
    }

    /// Free-text notice ("Blocked", "Failed", ...).
    pub fn notice(
        text: impl Into<String>,
        color: TextColor,
        position: Vec3,
        config: &EncounterConfig,
    ) -> Self {
        Self {
            text: text.into(),
            color,
            position,
            remaining: config.popup_duration,
        }
    }

    pub(crate) fn start(&mut self, _header: ActionHeader, _roster: &mut Roster, _env: &BattleEnv<'_>) {}

    pub(crate) fn tick(
        &mut self,
        header: ActionHeader,
        dt: f32,
        _roster: &mut Roster,
        env: &BattleEnv<'_>,
        _config: &EncounterConfig,
        _followups: &mut FollowUps,
    ) -> ActionStatus {
        let key = FloatingKey(header.id.0);
        self.remaining -= dt;

        if self.remaining <= 0.0 {
            env.presentation().remove_floating_text(key);
            return ActionStatus::Complete;
        }

        env.presentation()
            .show_floating_text(key, &self.text, self.color, self.position, self.remaining);
        ActionStatus::Continue
    }
}
