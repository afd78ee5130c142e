use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::behavior::{self, SteeringForces};
use crate::{Boid, ConfigError, ConfigPatch, SimulationConfig, Vector2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Whether [`FlockSimulation::reset`] leaves the simulation running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Yes,
    No,
}

/// What a config change did, so a renderer knows whether to rebuild its
/// sprite list or resize its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigUpdate {
    pub agents_recreated: bool,
    pub bounds_changed: bool,
}

/// Read-only per-agent state handed to renderers once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub position: Vector2,
    /// Radians, `atan2(vy, vx)`.
    pub heading: f32,
}

impl From<&Boid> for AgentView {
    fn from(boid: &Boid) -> Self {
        Self {
            position: boid.position,
            heading: boid.heading(),
        }
    }
}

/// Owns the flock and its config and advances both one tick at a time.
///
/// Driven by an external frame clock: call [`tick`](Self::tick) once per
/// frame. Forces for every boid are computed from the previous tick's state
/// before any boid moves, so iteration order never changes the outcome.
pub struct FlockSimulation {
    boids: Vec<Boid>,
    config: SimulationConfig,
    state: RunState,
    rng: SmallRng,
    ticks: u64,
}

impl FlockSimulation {
    /// Creates a simulation seeded from OS entropy.
    #[cfg(feature = "std")]
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Creates a simulation whose agent seeding is reproducible.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut simulation = Self {
            boids: Vec::new(),
            config,
            state: RunState::Idle,
            rng,
            ticks: 0,
        };
        simulation.recreate_boids();
        Ok(simulation)
    }

    pub fn start(&mut self) {
        if self.state == RunState::Idle {
            self.state = RunState::Running;
            log::debug!("flock started with {} boids", self.boids.len());
        }
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Idle;
            log::debug!("flock stopped after {} ticks", self.ticks);
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Frame callback: advances one step while running. Returns whether a
    /// step was taken.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.step();
        true
    }

    /// Advances one step regardless of the run state.
    pub fn step(&mut self) {
        // Calculate forces for all boids
        let forces = self.compute_forces();

        // Apply forces and update boids
        for (boid, force) in self.boids.iter_mut().zip(forces) {
            boid.apply_force(force);
            boid.update(&self.config);
        }

        self.ticks += 1;
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_forces(&self) -> Vec<Vector2> {
        let flock = &self.boids;
        let config = &self.config;
        flock
            .iter()
            .map(|boid| behavior::steering(boid, flock, config).total())
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn compute_forces(&self) -> Vec<Vector2> {
        use rayon::prelude::*;

        let flock = &self.boids;
        let config = &self.config;
        flock
            .par_iter()
            .map(|boid| behavior::steering(boid, flock, config).total())
            .collect()
    }

    /// Merges `patch` into the current config. The boids are discarded and
    /// reseeded only when the patch carries a different `agent_count`.
    /// On error nothing changes.
    pub fn update_config(&mut self, patch: ConfigPatch) -> Result<ConfigUpdate, ConfigError> {
        let merged = patch.apply_to(&self.config);
        let recreate = patch
            .agent_count
            .is_some_and(|count| count != self.config.agent_count);
        self.replace_config(merged, recreate)
    }

    /// Replaces the config wholesale. Reseeds the boids when the agent count
    /// differs from the current one.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<ConfigUpdate, ConfigError> {
        let recreate = config.agent_count != self.config.agent_count;
        self.replace_config(config, recreate)
    }

    fn replace_config(
        &mut self,
        config: SimulationConfig,
        recreate: bool,
    ) -> Result<ConfigUpdate, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected flock config: {}", err);
            return Err(err);
        }

        let update = ConfigUpdate {
            agents_recreated: recreate,
            bounds_changed: config.world_width != self.config.world_width
                || config.world_height != self.config.world_height,
        };

        self.config = config;
        if recreate {
            self.recreate_boids();
        }
        Ok(update)
    }

    /// Stops, reseeds every boid from the current config, and restarts only
    /// if asked to.
    pub fn reset(&mut self, resume: Resume) {
        self.stop();
        self.recreate_boids();
        if resume == Resume::Yes {
            self.start();
        }
    }

    /// Stops and releases the simulation.
    pub fn destroy(mut self) {
        self.stop();
        log::debug!("flock destroyed");
    }

    fn recreate_boids(&mut self) {
        let count = self.config.agent_count;
        let (width, height) = (self.config.world_width, self.config.world_height);

        let mut boids = Vec::with_capacity(count);
        for _ in 0..count {
            boids.push(Boid::random(&mut self.rng, width, height));
        }
        self.boids = boids;
        self.ticks = 0;

        log::debug!("seeded {} boids in {}x{}", count, width, height);
    }

    /// Replaces the flock with hand-placed boids; `agent_count` follows.
    pub fn set_boids(&mut self, boids: Vec<Boid>) {
        self.config.agent_count = boids.len();
        self.boids = boids;
        self.ticks = 0;
    }

    /// Appends one boid; `agent_count` follows.
    pub fn add_boid(&mut self, boid: Boid) {
        self.boids.push(boid);
        self.config.agent_count = self.boids.len();
    }

    /// Snapshot of the current config.
    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Steps taken since the flock was last seeded.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Position and heading of every boid, in stable index order.
    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.boids.iter().map(AgentView::from)
    }

    pub fn agent(&self, index: usize) -> Option<AgentView> {
        self.boids.get(index).map(AgentView::from)
    }

    /// Weighted rule forces currently acting on the boid at `index`.
    pub fn steering_of(&self, index: usize) -> Option<SteeringForces> {
        let boid = self.boids.get(index)?;
        Some(behavior::steering(boid, &self.boids, &self.config))
    }

    /// Indices of the boids strictly within `radius` of the boid at `index`.
    pub fn neighbors_of(&self, index: usize, radius: f32) -> Vec<usize> {
        let Some(boid) = self.boids.get(index) else {
            return Vec::new();
        };
        self.boids
            .iter()
            .enumerate()
            .filter(|(_, other)| behavior::neighbor_distance(boid, other, radius).is_some())
            .map(|(i, _)| i)
            .collect()
    }
}
