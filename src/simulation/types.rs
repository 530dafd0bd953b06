//! Core types for the intersection simulation
//!
//! Standalone enums, identifiers, and vector math shared by every component.

use std::fmt;

/// Number of compass approaches to the intersection
pub const DIRECTION_COUNT: usize = 4;
/// Number of lane slots per approach (three spawn lanes, two exit slots)
pub const LANE_SLOT_COUNT: usize = 5;
/// Number of spawn lanes per approach
pub const SPAWN_LANE_COUNT: usize = 3;

/// Constant car speed in world units per tick
pub const CAR_SPEED: f32 = 0.2;
/// Cars closer than this are collision candidates
pub const COLLISION_DISTANCE: f32 = 0.3;
/// Minimum heading separation, in degrees, for a close pair to count as a conflict
pub const COLLISION_ANGLE_DEGREES: f32 = 45.0;

/// A unique identifier for cars, assigned monotonically at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub usize);

/// One of the four compass approaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The approach across the intersection
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The green axis this approach belongs to
    pub fn axis(self) -> LightAxis {
        match self {
            Direction::North | Direction::South => LightAxis::NorthSouth,
            Direction::East | Direction::West => LightAxis::EastWest,
        }
    }

    /// Compass heading in degrees (east = 0, counterclockwise)
    pub fn compass_degrees(self) -> f32 {
        match self {
            Direction::East => 0.0,
            Direction::North => 90.0,
            Direction::West => 180.0,
            Direction::South => 270.0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        }
    }
}

/// Smallest angle between the headings of two directions, in degrees
pub fn angle_between(a: Direction, b: Direction) -> f32 {
    let diff = (a.compass_degrees() - b.compass_degrees()).abs();
    diff.min(360.0 - diff)
}

/// A named lane position within an approach
///
/// The three spawn slots hold queued cars. The two exit slots are
/// destination-only coordinates and are never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneSlot {
    Left,
    StraightForward,
    Right,
    StraightBack,
    StraightBack2,
}

impl LaneSlot {
    pub const ALL: [LaneSlot; LANE_SLOT_COUNT] = [
        LaneSlot::Left,
        LaneSlot::StraightForward,
        LaneSlot::Right,
        LaneSlot::StraightBack,
        LaneSlot::StraightBack2,
    ];

    pub const SPAWN: [LaneSlot; SPAWN_LANE_COUNT] = [
        LaneSlot::Left,
        LaneSlot::StraightForward,
        LaneSlot::Right,
    ];

    pub fn index(self) -> usize {
        match self {
            LaneSlot::Left => 0,
            LaneSlot::StraightForward => 1,
            LaneSlot::Right => 2,
            LaneSlot::StraightBack => 3,
            LaneSlot::StraightBack2 => 4,
        }
    }

    /// Dense index among the spawn lanes, `None` for exit-only slots
    pub fn spawn_index(self) -> Option<usize> {
        match self {
            LaneSlot::Left => Some(0),
            LaneSlot::StraightForward => Some(1),
            LaneSlot::Right => Some(2),
            LaneSlot::StraightBack | LaneSlot::StraightBack2 => None,
        }
    }

    pub fn is_spawn(self) -> bool {
        self.spawn_index().is_some()
    }

    /// Exit slot a car released from this spawn lane steers toward
    pub fn mirror(self) -> LaneSlot {
        match self {
            LaneSlot::Right | LaneSlot::StraightForward => LaneSlot::StraightBack2,
            _ => LaneSlot::StraightBack,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaneSlot::Left => "left",
            LaneSlot::StraightForward => "straight_forward",
            LaneSlot::Right => "right",
            LaneSlot::StraightBack => "straight_back",
            LaneSlot::StraightBack2 => "straight_back2",
        }
    }
}

/// The two green axes of the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightAxis {
    NorthSouth,
    EastWest,
}

impl LightAxis {
    /// Approaches permitted to release under this axis
    pub fn allowed_directions(self) -> [Direction; 2] {
        match self {
            LightAxis::NorthSouth => [Direction::North, Direction::South],
            LightAxis::EastWest => [Direction::East, Direction::West],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightAxis::NorthSouth => "NS",
            LightAxis::EastWest => "EW",
        }
    }
}

/// Which turn movement the current green permits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    Left,
    Straight,
}

impl TurnPhase {
    pub fn label(self) -> &'static str {
        match self {
            TurnPhase::Left => "left",
            TurnPhase::Straight => "straight",
        }
    }
}

/// The light configuration applied for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightState {
    pub axis: LightAxis,
    pub phase: TurnPhase,
}

impl LightState {
    pub fn new(axis: LightAxis, phase: TurnPhase) -> Self {
        Self { axis, phase }
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.axis.label(), self.phase.label())
    }
}

/// A 2D position or velocity in world units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
