//! Headless frame clock for the flock engine: steps a simulation at a fixed
//! number of ticks and samples it along the way.

use anyhow::{bail, Result};
use flock_core::FlockSimulation;
use flock_shared::Frame;

pub mod metrics;

pub use metrics::FlockMetrics;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Number of ticks to run.
    pub ticks: u64,
    /// Sample every this many ticks.
    pub every: u64,
}

/// Serialisable snapshot of every boid.
pub fn frame_of(sim: &FlockSimulation) -> Frame {
    Frame::capture(sim.ticks(), sim.boids())
}

/// Starts `sim`, ticks it `options.ticks` times and hands it to `on_sample`
/// every `options.every` ticks. Leaves the simulation stopped and returns
/// the metrics of the last tick.
pub fn run<F>(
    sim: &mut FlockSimulation,
    options: &RunOptions,
    mut on_sample: F,
) -> Result<FlockMetrics>
where
    F: FnMut(&FlockSimulation) -> Result<()>,
{
    if options.every == 0 {
        bail!("sample interval must be at least one tick");
    }

    log::debug!(
        "running {} boids for {} ticks, sampling every {}",
        sim.len(),
        options.ticks,
        options.every
    );

    sim.start();
    for _ in 0..options.ticks {
        sim.tick();
        if sim.ticks() % options.every == 0 {
            on_sample(sim)?;
        }
    }
    sim.stop();

    Ok(FlockMetrics::measure(sim.ticks(), sim.boids()))
}
