//! Light-phase-gated release scheduling
//!
//! Moves cars from their queues into the active set under the current light
//! state: one stop-line slot per lane per tick.

use super::car::SimCar;
use super::queues::QueueStore;
use super::types::{LaneSlot, LightState, TurnPhase};

/// Dequeue eligible cars into the active set; returns the number released
///
/// Directions off the green axis and lanes outside the current phase are
/// never touched, whatever their length.
pub fn release_cars(
    light: LightState,
    queues: &mut QueueStore,
    active: &mut Vec<SimCar>,
) -> u32 {
    let mut released = 0;
    for direction in light.axis.allowed_directions() {
        match light.phase {
            TurnPhase::Left => {
                if let Some(car) = queues.pop_head(direction, LaneSlot::Left) {
                    active.push(car);
                    released += 1;
                }
            }
            TurnPhase::Straight => {
                if let Some(car) = queues.pop_head(direction, LaneSlot::StraightForward) {
                    active.push(car);
                    released += 1;
                }
                if let Some(car) = queues.pop_head(direction, LaneSlot::Right) {
                    active.push(car);
                    released += 1;
                }
            }
        }
    }
    released
}
