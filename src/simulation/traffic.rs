//! Traffic generators
//!
//! Arrival processes that append new cars to the queue tails. Appending is
//! the only mutation a generator may perform on the store.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::geometry::Geometry;
use super::queues::QueueStore;
use super::types::{Direction, LaneSlot, LightAxis};

/// Produces this tick's arrivals
pub trait TrafficGenerator {
    fn spawn(&mut self, tick: u64, queues: &mut QueueStore, geometry: &Geometry) -> Result<()>;
}

/// Uniform Bernoulli arrivals on every (direction, spawn lane)
#[derive(Debug)]
pub struct RandomTraffic {
    pub spawn_probability: f32,
    rng: Option<StdRng>,
}

impl RandomTraffic {
    pub fn new(spawn_probability: f32) -> Self {
        Self {
            spawn_probability,
            rng: None,
        }
    }

    /// Seeded variant for reproducible runs
    pub fn with_seed(spawn_probability: f32, seed: u64) -> Self {
        Self {
            spawn_probability,
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    fn random_unit(&mut self) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(0.0..1.0),
            None => rand::rng().random_range(0.0..1.0),
        }
    }
}

impl TrafficGenerator for RandomTraffic {
    fn spawn(&mut self, _tick: u64, queues: &mut QueueStore, geometry: &Geometry) -> Result<()> {
        for direction in Direction::ALL {
            for lane in LaneSlot::SPAWN {
                if self.random_unit() < self.spawn_probability {
                    queues.spawn(direction, lane, geometry)?;
                }
            }
        }
        Ok(())
    }
}

/// Arrivals biased toward an axis that alternates every `cycle_length` ticks
#[derive(Debug)]
pub struct PatternedTraffic {
    pub cycle_length: u64,
    pub base_probability: f32,
    pub favor_factor: f32,
    rng: Option<StdRng>,
}

impl PatternedTraffic {
    pub fn new(base_probability: f32) -> Self {
        Self {
            cycle_length: 20,
            base_probability,
            favor_factor: 1.75,
            rng: None,
        }
    }

    /// Seeded variant for reproducible runs
    pub fn with_seed(base_probability: f32, seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
            ..Self::new(base_probability)
        }
    }

    /// Axis favored during the cycle containing `tick`
    pub fn favored_axis(&self, tick: u64) -> LightAxis {
        if (tick / self.cycle_length.max(1)) % 2 == 0 {
            LightAxis::NorthSouth
        } else {
            LightAxis::EastWest
        }
    }

    fn random_unit(&mut self) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(0.0..1.0),
            None => rand::rng().random_range(0.0..1.0),
        }
    }
}

impl TrafficGenerator for PatternedTraffic {
    fn spawn(&mut self, tick: u64, queues: &mut QueueStore, geometry: &Geometry) -> Result<()> {
        let favored = self.favored_axis(tick);
        for direction in Direction::ALL {
            let mut probability = self.base_probability;
            if direction.axis() == favored {
                probability *= self.favor_factor;
            }
            let probability = probability.min(0.95);
            for lane in LaneSlot::SPAWN {
                if self.random_unit() < probability {
                    queues.spawn(direction, lane, geometry)?;
                }
            }
        }
        Ok(())
    }
}
