use std::fmt;

use glam::Vec2;

/// Unique identifier for a combatant in the encounter roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Faction tag. Combatants with the same team never count as opponents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team(pub u8);

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", self.0)
    }
}

/// Discrete board position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell. Range checks throughout the
    /// combat core (delayed-action validity, area gathering) use this metric.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal facing for directional combat (approach classification) and
/// animation selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    /// Returns the tile offset (dx, dy) for this facing.
    ///
    /// Coordinate system: Y-axis increases northward, X-axis eastward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::North => (0, 1),
            Facing::South => (0, -1),
            Facing::East => (1, 0),
            Facing::West => (-1, 0),
        }
    }

    /// Unit vector in board space, used for dot-product approach checks.
    pub fn vector(self) -> Vec2 {
        let (dx, dy) = self.offset();
        Vec2::new(dx as f32, dy as f32)
    }

    /// Facing that points from `from` toward `to`, resolving the dominant
    /// axis first. Equal cells keep an eastward default.
    pub fn toward(from: Position, to: Position) -> Facing {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx.abs() >= dy.abs() {
            if dx < 0 { Facing::West } else { Facing::East }
        } else if dy < 0 {
            Facing::South
        } else {
            Facing::North
        }
    }

    pub fn all() -> [Facing; 4] {
        [Facing::North, Facing::South, Facing::East, Facing::West]
    }
}
