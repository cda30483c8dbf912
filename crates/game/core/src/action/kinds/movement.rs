//! Path-following move command.

use arrayvec::ArrayVec;

use crate::action::{ActionHeader, ActionStatus, FollowUps};
use crate::config::EncounterConfig;
use crate::env::{BattleEnv, Pose};
use crate::state::{Facing, Position, Roster};

/// Bounded movement path, start cell first.
pub type MovePath = ArrayVec<Position, { EncounterConfig::MAX_PATH }>;

/// Walks a precomputed path at a fixed cells-per-second rate.
///
/// Progress is a fractional cell count; the current segment is re-derived
/// from it every frame and the render position linearly interpolated between
/// the segment endpoints. Completion snaps the authoritative board position
/// to the destination and restores the idle pose. The path itself comes from
/// the caller (pathfinding is the map collaborator's concern).
#[derive(Debug)]
pub struct MoveAction {
    path: MovePath,
    /// Fractional path progress in cells.
    progress: f32,
}

impl MoveAction {
    pub fn new(path: MovePath) -> Self {
        Self {
            path,
            progress: 0.0,
        }
    }

    pub fn destination(&self) -> Option<Position> {
        self.path.last().copied()
    }

    pub(crate) fn start(&mut self, header: ActionHeader, roster: &mut Roster, env: &BattleEnv<'_>) {
        if let Some(actor) = roster.get_mut(header.actor) {
            env.animation()
                .set_animation(header.actor, Pose::Walk, actor.facing);
            env.presentation().set_camera_target(actor.world_position);
        }
    }

    pub(crate) fn tick(
        &mut self,
        header: ActionHeader,
        dt: f32,
        roster: &mut Roster,
        env: &BattleEnv<'_>,
        config: &EncounterConfig,
        _followups: &mut FollowUps,
    ) -> ActionStatus {
        let Some(actor) = roster.get_mut(header.actor) else {
            return ActionStatus::Complete;
        };

        self.progress += config.move_rate * dt;
        let segments = self.path.len().saturating_sub(1);

        if self.progress >= segments as f32 {
            // Arrived: snap the authoritative cell and go idle.
            if let Some(&destination) = self.path.last() {
                if let Some(&before_last) = self.path.len().checked_sub(2).and_then(|i| self.path.get(i))
                {
                    actor.facing = Facing::toward(before_last, destination);
                }
                actor.position = destination;
                actor.world_position = env.map().world_position_of(destination);
            }
            env.animation()
                .set_animation(header.actor, Pose::Idle, actor.facing);
            return ActionStatus::Complete;
        }

        // Re-derive the live segment from progress and lerp within it.
        let segment = self.progress as usize;
        let frac = self.progress - segment as f32;
        let from = self.path[segment];
        let to = self.path[segment + 1];

        actor.facing = Facing::toward(from, to);
        let a = env.map().world_position_of(from);
        let b = env.map().world_position_of(to);
        actor.world_position = a.lerp(b, frac);
        env.presentation().set_camera_target(actor.world_position);

        ActionStatus::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionId;
    use crate::state::{Combatant, CombatantId, CombatantStats, Team};
    use crate::testing::TestEnv;

    fn path(cells: &[(i32, i32)]) -> MovePath {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn walker() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "walker",
            Team(0),
            CombatantStats::default(),
            Position::ORIGIN,
            Facing::North,
        )
    }

    fn run_until_done(action: &mut MoveAction, roster: &mut Roster, fixture: &TestEnv) -> u32 {
        let env = fixture.env();
        let config = EncounterConfig::default();
        let mut followups = FollowUps::new();
        let header = ActionHeader {
            id: ActionId(1),
            actor: CombatantId(1),
        };

        let mut frames = 0;
        loop {
            frames += 1;
            assert!(frames < 10_000, "move never completed");
            match action.tick(header, 0.05, roster, &env, &config, &mut followups) {
                ActionStatus::Continue => {}
                ActionStatus::Complete => return frames,
                other => panic!("unexpected status {other:?}"),
            }
        }
    }

    #[test]
    fn snaps_to_destination_on_completion() {
        let mut roster = Roster::new();
        roster.add(walker()).unwrap();
        let fixture = TestEnv::new();

        let mut action = MoveAction::new(path(&[(0, 0), (1, 0), (2, 0), (2, 1)]));
        run_until_done(&mut action, &mut roster, &fixture);

        let actor = roster.get(CombatantId(1)).unwrap();
        assert_eq!(actor.position, Position::new(2, 1));
        assert_eq!(actor.facing, Facing::North); // last segment heads north
        let expected = fixture.world_position_of(Position::new(2, 1));
        assert_eq!(actor.world_position, expected);
    }

    #[test]
    fn interpolates_between_segment_endpoints() {
        let mut roster = Roster::new();
        roster.add(walker()).unwrap();
        let fixture = TestEnv::new();
        let env = fixture.env();
        let config = EncounterConfig::default();
        let mut followups = FollowUps::new();
        let header = ActionHeader {
            id: ActionId(1),
            actor: CombatantId(1),
        };

        let mut action = MoveAction::new(path(&[(0, 0), (1, 0)]));
        // default rate 4 cells/s, dt 0.1 -> progress 0.4 of one segment
        let status = action.tick(header, 0.1, &mut roster, &env, &config, &mut followups);
        assert_eq!(status, ActionStatus::Continue);

        let actor = roster.get(CombatantId(1)).unwrap();
        let a = fixture.world_position_of(Position::new(0, 0));
        let b = fixture.world_position_of(Position::new(1, 0));
        let expected = a.lerp(b, 0.4);
        assert!((actor.world_position - expected).length() < 1e-5);
        // authoritative cell unchanged until completion
        assert_eq!(actor.position, Position::ORIGIN);
    }

    #[test]
    fn single_cell_path_completes_immediately() {
        let mut roster = Roster::new();
        roster.add(walker()).unwrap();
        let fixture = TestEnv::new();

        let mut action = MoveAction::new(path(&[(0, 0)]));
        let frames = run_until_done(&mut action, &mut roster, &fixture);
        assert_eq!(frames, 1);
    }
}
