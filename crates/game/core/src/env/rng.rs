//! Deterministic random number generation.
//!
//! Combat rolls draw through a seed-passing oracle so a fixed seed replays a
//! fixed fight. Implementations must be pure functions of the seed.

/// RNG oracle for deterministic random draws.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG-XSH-RR random number generator: 32-bit output from 64-bit state.
/// Small, fast, and statistically solid for game rolls.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// One LCG step over the seed.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then a state-selected
    /// rotation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes an event seed, the acting combatant, and a per-roll context into a
/// draw seed. Use distinct `context` values when one event needs several
/// independent rolls (0 = block, 1 = crit, ...).
pub fn compute_seed(event_seed: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = event_seed;
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix64-style avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
