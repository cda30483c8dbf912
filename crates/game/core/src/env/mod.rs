//! Traits describing the combat core's external collaborators.
//!
//! The core consumes map geometry, animation playback, trajectory math,
//! presentation output, and randomness through oracle traits; the
//! [`BattleEnv`] aggregate bundles one of each so actions can reach
//! everything they need without hard coupling to concrete implementations.

mod animation;
mod map;
mod presentation;
mod rng;
mod trajectory;

pub use animation::{AnimationOracle, Pose};
pub use map::MapOracle;
pub use presentation::{FloatingKey, NullPresentation, PresentationSink, TextColor};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use trajectory::{Ballistics, TrajectoryOracle};

/// Aggregates the collaborator oracles required to tick actions. Every
/// collaborator is mandatory: an encounter cannot meaningfully run without
/// the full set, so there is no absent-oracle error class.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    map: &'a dyn MapOracle,
    animation: &'a dyn AnimationOracle,
    trajectory: &'a dyn TrajectoryOracle,
    presentation: &'a dyn PresentationSink,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        map: &'a dyn MapOracle,
        animation: &'a dyn AnimationOracle,
        trajectory: &'a dyn TrajectoryOracle,
        presentation: &'a dyn PresentationSink,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            map,
            animation,
            trajectory,
            presentation,
            rng,
        }
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn animation(&self) -> &'a dyn AnimationOracle {
        self.animation
    }

    pub fn trajectory(&self) -> &'a dyn TrajectoryOracle {
        self.trajectory
    }

    pub fn presentation(&self) -> &'a dyn PresentationSink {
        self.presentation
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}
