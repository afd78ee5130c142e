use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flock_core::{Behavior, ConfigPatch, FlockSimulation, SimulationConfig};
use flock_runner::{frame_of, run, FlockMetrics, RunOptions};
use std::io::Write;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Rule {
    Separation,
    Alignment,
    Cohesion,
}

impl From<Rule> for Behavior {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Separation => Behavior::Separation,
            Rule::Alignment => Behavior::Alignment,
            Rule::Cohesion => Behavior::Cohesion,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid flock runner", long_about = None)]
struct Args {
    /// Number of boids
    #[arg(short, long)]
    agents: Option<usize>,

    /// World width
    #[arg(long)]
    width: Option<f32>,

    /// World height
    #[arg(long)]
    height: Option<f32>,

    /// Ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Sample the flock every N ticks
    #[arg(short, long, default_value_t = 60)]
    every: u64,

    /// Seed for reproducible runs (entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    max_speed: Option<f32>,

    #[arg(long)]
    max_force: Option<f32>,

    #[arg(long)]
    separation_radius: Option<f32>,

    #[arg(long)]
    alignment_radius: Option<f32>,

    #[arg(long)]
    cohesion_radius: Option<f32>,

    /// Separation weight
    #[arg(long)]
    separation: Option<f32>,

    /// Alignment weight
    #[arg(long)]
    alignment: Option<f32>,

    /// Cohesion weight
    #[arg(long)]
    cohesion: Option<f32>,

    /// Run with a single rule; the other weights are zeroed
    #[arg(long, value_enum)]
    only: Option<Rule>,

    /// Print every sampled frame as a JSON line on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn patch(&self) -> ConfigPatch {
        ConfigPatch {
            max_speed: self.max_speed,
            max_force: self.max_force,
            separation_radius: self.separation_radius,
            alignment_radius: self.alignment_radius,
            cohesion_radius: self.cohesion_radius,
            separation_force: self.separation,
            alignment_force: self.alignment,
            cohesion_force: self.cohesion,
            agent_count: self.agents,
            world_width: self.width,
            world_height: self.height,
        }
    }

    fn config(&self) -> SimulationConfig {
        let config = self.patch().apply_to(&SimulationConfig::default());
        match self.only {
            Some(rule) => config.isolate(rule.into()),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = args.config();
    let mut sim = match args.seed {
        Some(seed) => FlockSimulation::with_seed(config, seed),
        None => FlockSimulation::new(config),
    }
    .context("Invalid flock configuration")?;

    log::info!(
        "Flock runner starting: {} boids in {}x{}",
        sim.len(),
        config.world_width,
        config.world_height
    );

    let options = RunOptions {
        ticks: args.ticks,
        every: args.every,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let last = run(&mut sim, &options, |sim| {
        if args.json {
            let line = serde_json::to_string(&frame_of(sim))?;
            writeln!(out, "{}", line).context("Failed to write frame")?;
        } else {
            log_metrics(&FlockMetrics::measure(sim.ticks(), sim.boids()));
        }
        Ok(())
    })
    .context("Run failed")?;

    log::info!(
        "Finished after {} ticks: polarization {:.3}, spread {:.1}",
        last.tick,
        last.polarization,
        last.spread
    );
    sim.destroy();

    Ok(())
}

fn log_metrics(metrics: &FlockMetrics) {
    log::info!(
        "tick {:>6}  speed {:.3}  polarization {:.3}  centroid ({:.1}, {:.1})  spread {:.1}",
        metrics.tick,
        metrics.mean_speed,
        metrics.polarization,
        metrics.centroid.x,
        metrics.centroid.y,
        metrics.spread
    );
}
