//! Standalone intersection simulation engine
//!
//! This module contains the core tick-driven state machine: FIFO queues per
//! lane, light-gated release, constant-speed kinematics, and pairwise
//! collision detection. Policies, generators, and renderers plug in through
//! the traits defined here and can be tested via console without a UI.

mod car;
mod collision;
mod geometry;
mod policy;
mod queues;
mod release;
mod render;
mod traffic;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use car::{CarStep, SimCar};
#[allow(unused_imports)]
pub use collision::scan_collisions;
#[allow(unused_imports)]
pub use geometry::Geometry;
#[allow(unused_imports)]
pub use policy::{FixedCyclePolicy, LightPolicy, PolicyFeedback, QueuePressurePolicy};
#[allow(unused_imports)]
pub use queues::{QueueSnapshot, QueueStore};
#[allow(unused_imports)]
pub use release::release_cars;
#[allow(unused_imports)]
pub use render::{AsciiRenderer, RenderFrame, Renderer};
#[allow(unused_imports)]
pub use traffic::{PatternedTraffic, RandomTraffic, TrafficGenerator};
#[allow(unused_imports)]
pub use types::{
    angle_between, CarId, Direction, LaneSlot, LightAxis, LightState, TurnPhase, Vec2,
    CAR_SPEED, COLLISION_ANGLE_DEGREES, COLLISION_DISTANCE,
};
pub use world::{SimWorld, TickSummary};
