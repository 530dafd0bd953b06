//! Car state and kinematics
//!
//! Cars travel in a straight line at constant speed from their spawn lane
//! toward the exit coordinate determined by their turn target. No
//! acceleration and no curved turning paths are modeled.

use anyhow::Result;

use super::geometry::Geometry;
use super::types::{CarId, Direction, LaneSlot, Vec2};

/// Outcome of one kinematics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStep {
    /// Still short of the exit coordinate
    EnRoute,
    /// Snapped onto the exit coordinate this tick
    Arrived,
}

/// A car in the intersection simulation
///
/// Turn target and exit lane are derived once at spawn time and fixed for
/// the car's lifetime.
#[derive(Debug, Clone)]
pub struct SimCar {
    pub id: CarId,
    /// Approach the car spawned on
    pub origin: Direction,
    /// Spawn lane within the origin approach
    pub spawn_lane: LaneSlot,
    /// Approach the car exits toward, from the turn-target table
    pub target_direction: Direction,
    /// Exit slot within the target approach
    pub exit_lane: LaneSlot,
    /// Compass heading of travel (opposite of origin)
    pub travel_direction: Direction,
    pub position: Vec2,
    pub velocity: Vec2,
    pub finished: bool,
}

impl SimCar {
    /// Create a car at its spawn-lane coordinate
    ///
    /// Fails when `lane` is an exit-only slot, which has no turn target.
    pub fn new(id: CarId, origin: Direction, lane: LaneSlot, geometry: &Geometry) -> Result<Self> {
        let target_direction = geometry.turn_target(origin, lane)?;
        Ok(Self {
            id,
            origin,
            spawn_lane: lane,
            target_direction,
            exit_lane: lane.mirror(),
            travel_direction: origin.opposite(),
            position: geometry.position(origin, lane),
            velocity: Vec2::ZERO,
            finished: false,
        })
    }

    /// Advance one tick toward the exit coordinate
    ///
    /// Arrival is a single discrete event: when the remaining distance drops
    /// below `speed` the position snaps onto the target with no overshoot and
    /// the car is marked finished.
    pub fn advance(&mut self, geometry: &Geometry, speed: f32) -> CarStep {
        let target = geometry.position(self.target_direction, self.exit_lane);
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let distance = (dx * dx + dy * dy).sqrt();

        // Zero remaining distance would divide the unit vector by zero
        if distance == 0.0 {
            self.velocity = Vec2::ZERO;
        } else {
            self.velocity = Vec2::new(speed * dx / distance, speed * dy / distance);
        }

        if distance < speed {
            self.position = target;
            self.finished = true;
            CarStep::Arrived
        } else {
            self.position.x += self.velocity.x;
            self.position.y += self.velocity.y;
            CarStep::EnRoute
        }
    }
}
