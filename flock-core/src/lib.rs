#![cfg_attr(not(feature = "std"), no_std)]
//! Flocking engine: point agents steering by separation, alignment and
//! cohesion over an all-pairs neighbour scan, wrapped on a torus.
//!
//! ```
//! use flock_core::{FlockSimulation, SimulationConfig};
//!
//! let config = SimulationConfig { agent_count: 20, ..SimulationConfig::default() };
//! let mut sim = FlockSimulation::with_seed(config, 7).unwrap();
//! sim.start();
//! sim.tick();
//! for agent in sim.agents() {
//!     let _ = (agent.position.x, agent.position.y, agent.heading);
//! }
//! ```

extern crate alloc;

pub mod behavior;
mod boid;
mod config;
mod math;
mod simulation;
mod vector;

pub use boid::Boid;
pub use config::{Behavior, ConfigError, ConfigPatch, SimulationConfig};
pub use simulation::{AgentView, ConfigUpdate, FlockSimulation, Resume, RunState};
pub use vector::Vector2;
