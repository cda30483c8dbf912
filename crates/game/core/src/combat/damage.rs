//! Damage magnitude calculation.

/// Damage dealt by an attack: strength, doubled on a critical.
pub fn attack_damage(strength: u32, is_critical: bool) -> u32 {
    if is_critical { strength * 2 } else { strength }
}
