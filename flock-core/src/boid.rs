use rand::Rng;

use crate::{SimulationConfig, Vector2};

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Per-tick force accumulator. Cleared by [`Boid::update`]; it carries
    /// no momentum from one tick to the next.
    pub acceleration: Vector2,
}

impl Boid {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2::zero(),
        }
    }

    /// Boid placed uniformly in `[0, width) x [0, height)` with a random
    /// direction and a speed in `[1, 3)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        let position = Vector2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let speed = rng.gen::<f32>() * 2.0 + 1.0;
        let velocity = Vector2::random(rng).set_magnitude(speed);
        Self::new(position, velocity)
    }

    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force;
    }

    /// Integrates one tick: velocity, speed cap, position, accumulator
    /// reset, then torus wrap.
    pub fn update(&mut self, config: &SimulationConfig) {
        self.velocity += self.acceleration;
        self.velocity.limit_mut(config.max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2::zero();
        self.wrap_edges(config.world_width, config.world_height);
    }

    /// Teleports to the opposite edge once the position leaves the world.
    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        if self.position.x < 0.0 {
            self.position.x = width;
        } else if self.position.x > width {
            self.position.x = 0.0;
        }

        if self.position.y < 0.0 {
            self.position.y = height;
        } else if self.position.y > height {
            self.position.y = 0.0;
        }
    }

    /// Direction of travel in radians, for sprite rotation.
    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn config() -> SimulationConfig {
        SimulationConfig {
            world_width: 100.0,
            world_height: 100.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_boid_creation() {
        let boid = Boid::new(Vector2::new(10.0, 20.0), Vector2::new(1.0, 1.0));

        assert_eq!(boid.position, Vector2::new(10.0, 20.0));
        assert_eq!(boid.velocity, Vector2::new(1.0, 1.0));
        assert_eq!(boid.acceleration, Vector2::zero());
    }

    #[test]
    fn test_boid_update() {
        let mut boid = Boid::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0));

        boid.update(&config());

        assert_eq!(boid.position, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn test_update_clamps_before_moving() {
        let mut boid = Boid::new(Vector2::new(50.0, 50.0), Vector2::new(1.0, 0.0));
        boid.apply_force(Vector2::new(100.0, 0.0));

        boid.update(&config());

        assert!((boid.speed() - 2.0).abs() < 1e-5);
        assert!((boid.position.x - 52.0).abs() < 1e-5);
        assert_eq!(boid.acceleration, Vector2::zero());
    }

    #[test]
    fn test_forces_accumulate() {
        let mut boid = Boid::new(Vector2::zero(), Vector2::zero());
        boid.apply_force(Vector2::new(0.01, 0.0));
        boid.apply_force(Vector2::new(0.0, 0.02));
        assert_eq!(boid.acceleration, Vector2::new(0.01, 0.02));
    }

    #[test]
    fn test_boid_wrap_edges() {
        let mut boid = Boid::new(Vector2::new(-1.0, -1.0), Vector2::zero());
        boid.wrap_edges(100.0, 100.0);
        assert_eq!(boid.position, Vector2::new(100.0, 100.0));

        let mut boid = Boid::new(Vector2::new(100.5, 101.0), Vector2::zero());
        boid.wrap_edges(100.0, 100.0);
        assert_eq!(boid.position, Vector2::zero());

        let mut boid = Boid::new(Vector2::new(100.0, 0.0), Vector2::zero());
        boid.wrap_edges(100.0, 100.0);
        assert_eq!(boid.position, Vector2::new(100.0, 0.0));
    }

    #[test]
    fn test_random_boid_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let boid = Boid::random(&mut rng, 800.0, 600.0);
            assert!((0.0..800.0).contains(&boid.position.x));
            assert!((0.0..600.0).contains(&boid.position.y));
            let speed = boid.speed();
            assert!(speed >= 1.0 - 1e-4 && speed <= 3.0 + 1e-4, "speed {}", speed);
        }
    }

    #[test]
    fn test_heading_follows_velocity() {
        let boid = Boid::new(Vector2::zero(), Vector2::new(0.0, -1.0));
        assert!((boid.heading() + core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
