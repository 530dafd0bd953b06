//! Traffic-light decision policies
//!
//! A policy reads queue state and produces the light for the tick. The
//! driver hands back an end-of-tick feedback record that policies are free
//! to ignore.

use std::collections::{HashMap, HashSet};

use ordered_float::OrderedFloat;

use super::queues::{QueueSnapshot, QueueStore};
use super::types::{CarId, LaneSlot, LightAxis, LightState, TurnPhase};

/// End-of-tick feedback, passed through uninterpreted by the driver
#[derive(Debug, Clone)]
pub struct PolicyFeedback {
    /// Queue lengths when the decision was made
    pub previous: QueueSnapshot,
    /// The light applied this tick
    pub light: LightState,
    /// Whether the collision scan flagged any pair this tick
    pub collision_detected: bool,
    /// Queue lengths after release and pruning
    pub current: QueueSnapshot,
}

/// Decides the light state for each tick
pub trait LightPolicy {
    fn decide(&mut self, tick: u64, queues: &QueueStore) -> LightState;

    /// Optional feedback hook; the default ignores it
    fn update(&mut self, _feedback: &PolicyFeedback) {}
}

/// Fixed rotation: NS-left, NS-straight, EW-left, EW-straight
#[derive(Debug, Clone)]
pub struct FixedCyclePolicy {
    pub left_ticks: u64,
    pub straight_ticks: u64,
}

impl FixedCyclePolicy {
    pub fn new() -> Self {
        Self {
            left_ticks: 3,
            straight_ticks: 10,
        }
    }
}

impl Default for FixedCyclePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl LightPolicy for FixedCyclePolicy {
    fn decide(&mut self, tick: u64, _queues: &QueueStore) -> LightState {
        let cycle = (2 * (self.left_ticks + self.straight_ticks)).max(1);
        let t = tick % cycle;
        if t < self.left_ticks {
            LightState::new(LightAxis::NorthSouth, TurnPhase::Left)
        } else if t < self.left_ticks + self.straight_ticks {
            LightState::new(LightAxis::NorthSouth, TurnPhase::Straight)
        } else if t < 2 * self.left_ticks + self.straight_ticks {
            LightState::new(LightAxis::EastWest, TurnPhase::Left)
        } else {
            LightState::new(LightAxis::EastWest, TurnPhase::Straight)
        }
    }
}

/// Greedy controller: serve the (axis, phase) with the most age-weighted demand
///
/// Keeps per-car wait bookkeeping keyed by `CarId`, owned here rather than by
/// the engine, and holds a chosen phase for a minimum number of ticks so the
/// light does not thrash between near-equal queues. The collision feedback
/// re-arms the hold, keeping the current phase up after a conflict.
#[derive(Debug, Clone)]
pub struct QueuePressurePolicy {
    /// Ticks a chosen phase is held before re-evaluating
    pub min_hold_ticks: u64,
    /// Extra pressure per tick a car has waited
    pub wait_weight: f32,
    first_seen: HashMap<CarId, u64>,
    current: Option<LightState>,
    held_for: u64,
}

impl QueuePressurePolicy {
    const CANDIDATES: [LightState; 4] = [
        LightState {
            axis: LightAxis::NorthSouth,
            phase: TurnPhase::Left,
        },
        LightState {
            axis: LightAxis::NorthSouth,
            phase: TurnPhase::Straight,
        },
        LightState {
            axis: LightAxis::EastWest,
            phase: TurnPhase::Left,
        },
        LightState {
            axis: LightAxis::EastWest,
            phase: TurnPhase::Straight,
        },
    ];

    pub fn new() -> Self {
        Self {
            min_hold_ticks: 4,
            wait_weight: 0.1,
            first_seen: HashMap::new(),
            current: None,
            held_for: 0,
        }
    }

    /// Refresh the wait table against the cars currently queued
    fn track_waits(&mut self, tick: u64, queues: &QueueStore) {
        let queued: HashSet<CarId> = queues.iter_queued().map(|car| car.id).collect();
        self.first_seen.retain(|id, _| queued.contains(id));
        for car in queues.iter_queued() {
            self.first_seen.entry(car.id).or_insert(tick);
        }
    }

    /// Age-weighted demand the candidate state would serve
    fn pressure(&self, state: LightState, tick: u64, queues: &QueueStore) -> f32 {
        let lanes: &[LaneSlot] = match state.phase {
            TurnPhase::Left => &[LaneSlot::Left],
            TurnPhase::Straight => &[LaneSlot::StraightForward, LaneSlot::Right],
        };
        let mut total = 0.0;
        for direction in state.axis.allowed_directions() {
            for &lane in lanes {
                for car in queues.lane_cars(direction, lane) {
                    let first = self.first_seen.get(&car.id).copied().unwrap_or(tick);
                    let waited = tick.saturating_sub(first);
                    total += 1.0 + self.wait_weight * waited as f32;
                }
            }
        }
        total
    }
}

impl Default for QueuePressurePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl LightPolicy for QueuePressurePolicy {
    fn decide(&mut self, tick: u64, queues: &QueueStore) -> LightState {
        self.track_waits(tick, queues);

        if let Some(current) = self.current {
            if self.held_for < self.min_hold_ticks {
                self.held_for += 1;
                return current;
            }
        }

        let best = Self::CANDIDATES
            .iter()
            .copied()
            .max_by_key(|&state| OrderedFloat(self.pressure(state, tick, queues)))
            .unwrap_or(LightState::new(LightAxis::NorthSouth, TurnPhase::Straight));

        if self.current == Some(best) {
            self.held_for += 1;
        } else {
            self.held_for = 1;
        }
        self.current = Some(best);
        best
    }

    fn update(&mut self, feedback: &PolicyFeedback) {
        // A conflict in the box: keep the current phase up rather than flip
        if feedback.collision_detected {
            self.held_for = 0;
        }
    }
}
