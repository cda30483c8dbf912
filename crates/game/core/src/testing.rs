//! In-memory oracle implementations shared by the unit tests.
//!
//! The oracle traits are `Send + Sync`, so the fakes keep their mutable
//! bookkeeping behind `Mutex` even though tests are single-threaded.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use glam::Vec3;

use crate::env::{
    AnimationOracle, Ballistics, BattleEnv, FloatingKey, MapOracle, PcgRng, Pose,
    PresentationSink, TextColor,
};
use crate::state::{CombatantId, Facing, Position};

/// Boundless flat grid, one world unit per cell, with per-cell height
/// overrides. World axes: x = board x, y = up, z = board y.
#[derive(Default)]
pub(crate) struct GridMap {
    heights: Mutex<HashMap<Position, i32>>,
}

impl GridMap {
    fn height_of(&self, position: Position) -> i32 {
        self.heights
            .lock()
            .map(|h| h.get(&position).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl MapOracle for GridMap {
    fn neighbor_cells(&self, position: Position) -> Vec<Position> {
        Facing::all()
            .iter()
            .map(|facing| {
                let (dx, dy) = facing.offset();
                Position::new(position.x + dx, position.y + dy)
            })
            .collect()
    }

    fn height(&self, position: Position) -> i32 {
        self.height_of(position)
    }

    fn is_occupied_solid_at(&self, point: Vec3) -> bool {
        let cell = self.position_from_world(point);
        point.y < self.height_of(cell) as f32
    }

    fn world_position_of(&self, position: Position) -> Vec3 {
        Vec3::new(
            position.x as f32,
            self.height_of(position) as f32,
            position.y as f32,
        )
    }

    fn position_from_world(&self, point: Vec3) -> Position {
        Position::new(point.x.round() as i32, point.z.round() as i32)
    }
}

/// Animation fake: everyone is idle unless a test marks them busy.
#[derive(Default)]
pub(crate) struct InstantAnimations {
    busy: Mutex<HashSet<CombatantId>>,
}

impl AnimationOracle for InstantAnimations {
    fn set_animation(&self, _combatant: CombatantId, _pose: Pose, _facing: Facing) {}

    fn is_idle(&self, combatant: CombatantId) -> bool {
        self.busy
            .lock()
            .map(|busy| !busy.contains(&combatant))
            .unwrap_or(true)
    }
}

/// One captured presentation notification.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SinkEvent {
    Show {
        key: FloatingKey,
        text: String,
        color: TextColor,
        position: Vec3,
        duration: f32,
    },
    Remove {
        key: FloatingKey,
    },
    Camera {
        position: Vec3,
    },
}

/// Presentation fake that records every notification in order.
#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    fn record(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl PresentationSink for RecordingSink {
    fn show_floating_text(
        &self,
        key: FloatingKey,
        text: &str,
        color: TextColor,
        position: Vec3,
        duration: f32,
    ) {
        self.record(SinkEvent::Show {
            key,
            text: text.to_owned(),
            color,
            position,
            duration,
        });
    }

    fn remove_floating_text(&self, key: FloatingKey) {
        self.record(SinkEvent::Remove { key });
    }

    fn set_camera_target(&self, position: Vec3) {
        self.record(SinkEvent::Camera { position });
    }
}

/// Bundles one of each oracle fake and lends them out as a [`BattleEnv`].
#[derive(Default)]
pub(crate) struct TestEnv {
    map: GridMap,
    animations: InstantAnimations,
    trajectory: Ballistics,
    sink: RecordingSink,
    rng: PcgRng,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(
            &self.map,
            &self.animations,
            &self.trajectory,
            &self.sink,
            &self.rng,
        )
    }

    pub(crate) fn set_height(&self, position: Position, height: i32) {
        if let Ok(mut heights) = self.map.heights.lock() {
            heights.insert(position, height);
        }
    }

    pub(crate) fn world_position_of(&self, position: Position) -> Vec3 {
        self.map.world_position_of(position)
    }

    pub(crate) fn set_busy(&self, combatant: CombatantId, busy: bool) {
        if let Ok(mut set) = self.animations.busy.lock() {
            if busy {
                set.insert(combatant);
            } else {
                set.remove(&combatant);
            }
        }
    }

    pub(crate) fn sink_events(&self) -> Vec<SinkEvent> {
        self.sink
            .events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}
