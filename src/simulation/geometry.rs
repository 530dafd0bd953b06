//! Static intersection geometry
//!
//! Immutable lane coordinates and turn-target tables, validated exhaustively
//! at construction and shared by read-only reference thereafter.

use anyhow::{bail, Result};

use super::types::{
    Direction, LaneSlot, Vec2, DIRECTION_COUNT, LANE_SLOT_COUNT, SPAWN_LANE_COUNT,
};

/// Coordinate entries for the standard four-way layout
///
/// Approaches sit at ±4 on their axis; lanes are offset by ±1.2, ±0.6, 0.
const STANDARD_POSITIONS: [(Direction, LaneSlot, Vec2); 20] = [
    (Direction::North, LaneSlot::StraightBack, Vec2::new(1.2, 4.0)),
    (Direction::North, LaneSlot::StraightBack2, Vec2::new(0.6, 4.0)),
    (Direction::North, LaneSlot::Right, Vec2::new(0.0, 4.0)),
    (Direction::North, LaneSlot::StraightForward, Vec2::new(-0.6, 4.0)),
    (Direction::North, LaneSlot::Left, Vec2::new(-1.2, 4.0)),
    (Direction::South, LaneSlot::StraightBack, Vec2::new(-1.2, -4.0)),
    (Direction::South, LaneSlot::StraightBack2, Vec2::new(-0.6, -4.0)),
    (Direction::South, LaneSlot::Right, Vec2::new(0.0, -4.0)),
    (Direction::South, LaneSlot::StraightForward, Vec2::new(0.6, -4.0)),
    (Direction::South, LaneSlot::Left, Vec2::new(1.2, -4.0)),
    (Direction::East, LaneSlot::StraightBack, Vec2::new(4.0, -1.2)),
    (Direction::East, LaneSlot::StraightBack2, Vec2::new(4.0, -0.6)),
    (Direction::East, LaneSlot::Right, Vec2::new(4.0, 0.0)),
    (Direction::East, LaneSlot::StraightForward, Vec2::new(4.0, 0.6)),
    (Direction::East, LaneSlot::Left, Vec2::new(4.0, 1.2)),
    (Direction::West, LaneSlot::StraightBack, Vec2::new(-4.0, 1.2)),
    (Direction::West, LaneSlot::StraightBack2, Vec2::new(-4.0, 0.6)),
    (Direction::West, LaneSlot::Right, Vec2::new(-4.0, 0.0)),
    (Direction::West, LaneSlot::StraightForward, Vec2::new(-4.0, -0.6)),
    (Direction::West, LaneSlot::Left, Vec2::new(-4.0, -1.2)),
];

/// Turn-target entries for the standard layout, one per spawn lane
const STANDARD_TURNS: [(Direction, LaneSlot, Direction); 12] = [
    (Direction::North, LaneSlot::Left, Direction::West),
    (Direction::North, LaneSlot::StraightForward, Direction::South),
    (Direction::North, LaneSlot::Right, Direction::East),
    (Direction::South, LaneSlot::Left, Direction::East),
    (Direction::South, LaneSlot::StraightForward, Direction::North),
    (Direction::South, LaneSlot::Right, Direction::West),
    (Direction::East, LaneSlot::Left, Direction::North),
    (Direction::East, LaneSlot::StraightForward, Direction::West),
    (Direction::East, LaneSlot::Right, Direction::South),
    (Direction::West, LaneSlot::Left, Direction::South),
    (Direction::West, LaneSlot::StraightForward, Direction::East),
    (Direction::West, LaneSlot::Right, Direction::North),
];

/// Immutable lane-coordinate and turn-target tables for the intersection
///
/// Both tables are dense arrays indexed by enum pair, so every lookup after
/// construction is total.
#[derive(Debug, Clone)]
pub struct Geometry {
    positions: [[Vec2; LANE_SLOT_COUNT]; DIRECTION_COUNT],
    turn_targets: [[Direction; SPAWN_LANE_COUNT]; DIRECTION_COUNT],
}

impl Geometry {
    /// The stock four-way layout
    pub fn standard() -> Self {
        Self::from_tables(&STANDARD_POSITIONS, &STANDARD_TURNS)
            .expect("standard geometry tables are complete")
    }

    /// Build a geometry from sparse entry lists
    ///
    /// Every (direction, lane slot) pair needs a coordinate and every
    /// (direction, spawn lane) pair needs a turn target. A missing entry is
    /// a fatal configuration error, reported before any simulation step runs.
    pub fn from_tables(
        positions: &[(Direction, LaneSlot, Vec2)],
        turns: &[(Direction, LaneSlot, Direction)],
    ) -> Result<Self> {
        let mut coords = [[Vec2::ZERO; LANE_SLOT_COUNT]; DIRECTION_COUNT];
        let mut have_coord = [[false; LANE_SLOT_COUNT]; DIRECTION_COUNT];
        for &(direction, lane, position) in positions {
            coords[direction.index()][lane.index()] = position;
            have_coord[direction.index()][lane.index()] = true;
        }

        let mut targets = [[Direction::North; SPAWN_LANE_COUNT]; DIRECTION_COUNT];
        let mut have_target = [[false; SPAWN_LANE_COUNT]; DIRECTION_COUNT];
        for &(direction, lane, target) in turns {
            let Some(slot) = lane.spawn_index() else {
                bail!(
                    "turn target declared for exit-only lane {} {}",
                    direction.label(),
                    lane.label()
                );
            };
            targets[direction.index()][slot] = target;
            have_target[direction.index()][slot] = true;
        }

        for direction in Direction::ALL {
            for lane in LaneSlot::ALL {
                if !have_coord[direction.index()][lane.index()] {
                    bail!(
                        "missing coordinate for {} {}",
                        direction.label(),
                        lane.label()
                    );
                }
            }
            for (slot, lane) in LaneSlot::SPAWN.iter().enumerate() {
                if !have_target[direction.index()][slot] {
                    bail!(
                        "missing turn target for {} {}",
                        direction.label(),
                        lane.label()
                    );
                }
            }
        }

        Ok(Self {
            positions: coords,
            turn_targets: targets,
        })
    }

    /// World coordinate of a lane slot
    pub fn position(&self, direction: Direction, lane: LaneSlot) -> Vec2 {
        self.positions[direction.index()][lane.index()]
    }

    /// Destination approach for a car entering from `direction` in `lane`
    ///
    /// Fails for exit-only slots, which have no turn target.
    pub fn turn_target(&self, direction: Direction, lane: LaneSlot) -> Result<Direction> {
        match lane.spawn_index() {
            Some(slot) => Ok(self.turn_targets[direction.index()][slot]),
            None => bail!(
                "no turn target for exit-only lane {} {}",
                direction.label(),
                lane.label()
            ),
        }
    }
}
