//! Pairwise collision detection over the active set
//!
//! Detection only: close pairs on conflicting headings are counted, never
//! moved or resolved. Queued cars occupy fixed slots and cannot collide.

use log::debug;

use super::car::SimCar;
use super::types::{angle_between, COLLISION_ANGLE_DEGREES, COLLISION_DISTANCE};

/// Count conflicting close pairs among the active cars
///
/// A pair is flagged iff it is strictly closer than the collision distance
/// and its headings differ by strictly more than the conflict angle.
/// Near-parallel pairs are same-stream traffic, not a conflict.
pub fn scan_collisions(active: &[SimCar], tick: u64) -> u32 {
    let mut flagged = 0;
    for (i, first) in active.iter().enumerate() {
        for second in &active[i + 1..] {
            let distance = first.position.distance(&second.position);
            if distance >= COLLISION_DISTANCE {
                continue;
            }
            let angle_diff = angle_between(first.travel_direction, second.travel_direction);
            if angle_diff > COLLISION_ANGLE_DEGREES {
                debug!(
                    "collision at tick {}: car {:?} from {} and car {:?} from {} (distance {:.2}, angle {:.0})",
                    tick,
                    first.id,
                    first.origin.label(),
                    second.id,
                    second.origin.label(),
                    distance,
                    angle_diff
                );
                flagged += 1;
            }
        }
    }
    flagged
}
