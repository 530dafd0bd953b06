//! Intersection Traffic Simulation Library
//!
//! Models vehicle flow through a single four-way intersection under a
//! pluggable traffic-light policy, to compare throughput and collision
//! rates of different control strategies.

pub mod simulation;
