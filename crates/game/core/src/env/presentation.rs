use std::fmt;

use glam::Vec3;

use crate::state::CombatantId;

/// Key identifying one floating text popup, so it can be moved or removed
/// later. Derived from the owning action's queue id, except guard markers,
/// which are keyed by combatant so any clearer can find them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloatingKey(pub u64);

impl FloatingKey {
    // High bit separates combatant-keyed guard markers from action-keyed
    // popups; queue ids stay well below it.
    const GUARD_BIT: u64 = 1 << 63;

    /// Key of the persistent Defend marker for a combatant.
    pub const fn guard(combatant: CombatantId) -> Self {
        Self(Self::GUARD_BIT | combatant.0 as u64)
    }
}

impl fmt::Display for FloatingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popup-{}", self.0)
    }
}

/// RGB color for floating text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255 };
    pub const RED: Self = Self { r: 220, g: 50, b: 50 };
    pub const GREEN: Self = Self { r: 60, g: 200, b: 60 };
    pub const YELLOW: Self = Self { r: 230, g: 200, b: 40 };
}

/// Fire-and-forget presentation sink: floating combat text and camera
/// framing. The core never reads anything back from it.
pub trait PresentationSink: Send + Sync {
    /// Shows (or refreshes) a floating text popup. `duration` is the
    /// remaining lifetime in seconds; callers re-issue this each frame to
    /// drive a smooth fade.
    fn show_floating_text(
        &self,
        key: FloatingKey,
        text: &str,
        color: TextColor,
        position: Vec3,
        duration: f32,
    );

    fn remove_floating_text(&self, key: FloatingKey);

    fn set_camera_target(&self, position: Vec3);
}

/// Sink that drops every notification. Useful for headless simulation and
/// tests that do not assert on presentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl PresentationSink for NullPresentation {
    fn show_floating_text(
        &self,
        _key: FloatingKey,
        _text: &str,
        _color: TextColor,
        _position: Vec3,
        _duration: f32,
    ) {
    }

    fn remove_floating_text(&self, _key: FloatingKey) {}

    fn set_camera_target(&self, _position: Vec3) {}
}
