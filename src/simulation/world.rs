//! Simulation driver
//!
//! Owns the queue store, the active set, and the run counters, and executes
//! the fixed per-tick pipeline. Bounded batch runs and externally clocked
//! single-stepping both go through `step`.

use log::{info, warn};

use super::car::SimCar;
use super::collision::scan_collisions;
use super::geometry::Geometry;
use super::policy::{LightPolicy, PolicyFeedback};
use super::queues::QueueStore;
use super::release::release_cars;
use super::render::{RenderFrame, Renderer};
use super::traffic::TrafficGenerator;
use super::types::{LightState, CAR_SPEED};

/// What one tick did, for callers that log or test
#[derive(Debug, Clone, Copy)]
pub struct TickSummary {
    pub tick: u64,
    pub light: LightState,
    /// Conflicting pairs flagged by this tick's scan
    pub collisions: u32,
    /// Cars moved from queues into the active set
    pub released: u32,
    /// Cars that reached their exit coordinate and were pruned
    pub exited: u32,
}

/// The simulation world: one four-way intersection
///
/// Single-threaded and fully synchronous; a step is atomic from the caller's
/// perspective. The policy only reads queue state, the generator only
/// appends, the renderer only reads.
pub struct SimWorld {
    pub geometry: Geometry,
    pub queues: QueueStore,
    pub active: Vec<SimCar>,
    pub car_speed: f32,
    policy: Box<dyn LightPolicy>,
    traffic: Box<dyn TrafficGenerator>,
    renderer: Option<Box<dyn Renderer>>,
    tick: u64,
    exited: u64,
    collisions: u64,
}

impl SimWorld {
    pub fn new(
        geometry: Geometry,
        policy: Box<dyn LightPolicy>,
        traffic: Box<dyn TrafficGenerator>,
    ) -> Self {
        Self {
            geometry,
            queues: QueueStore::new(),
            active: Vec::new(),
            car_speed: CAR_SPEED,
            policy,
            traffic,
            renderer: None,
            tick: 0,
            exited: 0,
            collisions: 0,
        }
    }

    /// Attach a read-only renderer invoked at the end of every tick
    pub fn attach_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    /// Run one tick of the fixed pipeline
    ///
    /// Order: advance the clock, spawn arrivals, scan for collisions, ask the
    /// policy for the light, release eligible cars, advance kinematics, prune
    /// arrivals, then the optional render and policy feedback.
    pub fn step(&mut self) -> TickSummary {
        self.tick += 1;
        let tick = self.tick;

        // Arrivals append to queue tails only; a failing generator must not
        // stall the tick
        if let Err(err) = self.traffic.spawn(tick, &mut self.queues, &self.geometry) {
            warn!("traffic generator failed at tick {tick}: {err:#}");
        }

        let collisions = scan_collisions(&self.active, tick);
        self.collisions += u64::from(collisions);

        let previous = self.queues.snapshot();
        let light = self.policy.decide(tick, &self.queues);

        let released = release_cars(light, &mut self.queues, &mut self.active);

        for car in &mut self.active {
            car.advance(&self.geometry, self.car_speed);
        }

        let before = self.active.len();
        self.active.retain(|car| !car.finished);
        let exited = (before - self.active.len()) as u32;
        self.exited += u64::from(exited);

        if let Some(renderer) = self.renderer.as_deref_mut() {
            renderer.render(&RenderFrame {
                tick,
                light,
                allowed: light.axis.allowed_directions(),
                active: &self.active,
                queues: &self.queues,
                geometry: &self.geometry,
            });
        }

        self.policy.update(&PolicyFeedback {
            previous,
            light,
            collision_detected: collisions > 0,
            current: self.queues.snapshot(),
        });

        TickSummary {
            tick,
            light,
            collisions,
            released,
            exited,
        }
    }

    /// Bounded batch mode: run `steps` ticks back to back
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn exited_count(&self) -> u64 {
        self.exited
    }

    pub fn collision_count(&self) -> u64 {
        self.collisions
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queues.queued_total()
    }

    pub fn spawned_count(&self) -> u64 {
        self.queues.spawned_total()
    }

    /// Log the run totals
    pub fn log_summary(&self) {
        info!("=== SIMULATION SUMMARY ===");
        info!("Ticks run: {}", self.tick);
        info!("Total cars spawned: {}", self.spawned_count());
        info!("Total cars exited: {}", self.exited);
        info!("Active cars: {}", self.active.len());
        info!("Queued cars: {}", self.queued_count());
        info!("Collisions: {}", self.collisions);
        let throughput = if self.tick > 0 {
            self.exited as f32 / self.tick as f32
        } else {
            0.0
        };
        info!("Throughput: {:.2} cars/tick", throughput);
    }
}
