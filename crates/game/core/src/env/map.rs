use glam::Vec3;

use crate::state::Position;

/// Board geometry oracle: tile adjacency, heights, solidity, and the
/// board-to-world coordinate round trip. Pathfinding and occupancy policy
/// live with the collaborator implementing this; the combat core only reads.
pub trait MapOracle: Send + Sync {
    /// Cells adjacent to `position` that exist on the board.
    fn neighbor_cells(&self, position: Position) -> Vec<Position>;

    /// Tile height in height units. Cells off the board report 0.
    fn height(&self, position: Position) -> i32;

    /// True when the world-space point is inside solid geometry. Used for
    /// projectile collision against intervening terrain.
    fn is_occupied_solid_at(&self, point: Vec3) -> bool;

    /// World-space center of a cell (x = east, y = up, z = south).
    fn world_position_of(&self, position: Position) -> Vec3;

    /// Inverse of [`world_position_of`](Self::world_position_of), snapping to
    /// the containing cell.
    fn position_from_world(&self, point: Vec3) -> Position;
}
