//! Per-direction, per-lane FIFO waiting areas
//!
//! Cars wait here until the release step moves them into the active set.
//! Append and pop-head are the only mutations; order is arrival order.

use std::collections::VecDeque;

use anyhow::{bail, Result};

use super::car::SimCar;
use super::geometry::Geometry;
use super::types::{
    CarId, Direction, LaneSlot, LightAxis, DIRECTION_COUNT, SPAWN_LANE_COUNT,
};

/// FIFO queues for every (direction, spawn lane) pair
///
/// Also mints monotonic car ids and tracks the total number of cars ever
/// created, so callers can check conservation at any tick.
#[derive(Debug, Default)]
pub struct QueueStore {
    lanes: [[VecDeque<SimCar>; SPAWN_LANE_COUNT]; DIRECTION_COUNT],
    next_id: usize,
    total_spawned: u64,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new car at the lane's spawn coordinate and append it
    pub fn spawn(
        &mut self,
        origin: Direction,
        lane: LaneSlot,
        geometry: &Geometry,
    ) -> Result<CarId> {
        let id = CarId(self.next_id);
        let car = SimCar::new(id, origin, lane, geometry)?;
        self.enqueue(car)?;
        Ok(id)
    }

    /// Append an existing car to the tail of its (origin, spawn lane) queue
    pub fn enqueue(&mut self, car: SimCar) -> Result<()> {
        let Some(slot) = car.spawn_lane.spawn_index() else {
            bail!(
                "cannot queue a car in exit-only lane {} {}",
                car.origin.label(),
                car.spawn_lane.label()
            );
        };
        self.next_id = self.next_id.max(car.id.0 + 1);
        self.total_spawned += 1;
        self.lanes[car.origin.index()][slot].push_back(car);
        Ok(())
    }

    /// Pop the head of a queue; `None` when empty or when `lane` is exit-only
    pub fn pop_head(&mut self, direction: Direction, lane: LaneSlot) -> Option<SimCar> {
        let slot = lane.spawn_index()?;
        self.lanes[direction.index()][slot].pop_front()
    }

    pub fn peek_head(&self, direction: Direction, lane: LaneSlot) -> Option<&SimCar> {
        let slot = lane.spawn_index()?;
        self.lanes[direction.index()][slot].front()
    }

    pub fn lane_len(&self, direction: Direction, lane: LaneSlot) -> usize {
        lane.spawn_index()
            .map(|slot| self.lanes[direction.index()][slot].len())
            .unwrap_or(0)
    }

    /// Cars waiting in one lane, head first
    pub fn lane_cars(&self, direction: Direction, lane: LaneSlot) -> impl Iterator<Item = &SimCar> {
        lane.spawn_index()
            .into_iter()
            .flat_map(move |slot| self.lanes[direction.index()][slot].iter())
    }

    /// All queued cars across every lane
    pub fn iter_queued(&self) -> impl Iterator<Item = &SimCar> {
        self.lanes.iter().flatten().flatten()
    }

    pub fn queued_total(&self) -> usize {
        self.lanes.iter().flatten().map(|queue| queue.len()).sum()
    }

    /// Total cars ever created through this store
    pub fn spawned_total(&self) -> u64 {
        self.total_spawned
    }

    /// Per-lane queue lengths at this instant, for policies and feedback
    pub fn snapshot(&self) -> QueueSnapshot {
        let mut lengths = [[0usize; SPAWN_LANE_COUNT]; DIRECTION_COUNT];
        for (direction, lanes) in self.lanes.iter().enumerate() {
            for (slot, queue) in lanes.iter().enumerate() {
                lengths[direction][slot] = queue.len();
            }
        }
        QueueSnapshot { lengths }
    }
}

/// Queue lengths per (direction, spawn lane) at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueSnapshot {
    lengths: [[usize; SPAWN_LANE_COUNT]; DIRECTION_COUNT],
}

impl QueueSnapshot {
    pub fn lane_len(&self, direction: Direction, lane: LaneSlot) -> usize {
        lane.spawn_index()
            .map(|slot| self.lengths[direction.index()][slot])
            .unwrap_or(0)
    }

    pub fn direction_total(&self, direction: Direction) -> usize {
        self.lengths[direction.index()].iter().sum()
    }

    pub fn axis_total(&self, axis: LightAxis) -> usize {
        axis.allowed_directions()
            .iter()
            .map(|direction| self.direction_total(*direction))
            .sum()
    }

    pub fn total(&self) -> usize {
        self.lengths.iter().flatten().sum()
    }
}
