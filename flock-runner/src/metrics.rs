use flock_core::{Boid, Vector2};
use flock_shared::Position;

/// Whole-flock summary for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockMetrics {
    pub tick: u64,
    pub mean_speed: f32,
    /// Length of the mean unit heading: 1 when every boid flies the same
    /// way, near 0 when headings cancel out.
    pub polarization: f32,
    pub centroid: Position,
    /// Mean distance to the centroid.
    pub spread: f32,
}

impl FlockMetrics {
    pub fn measure(tick: u64, boids: &[Boid]) -> Self {
        if boids.is_empty() {
            return Self {
                tick,
                mean_speed: 0.0,
                polarization: 0.0,
                centroid: Position::default(),
                spread: 0.0,
            };
        }

        let n = boids.len() as f32;
        let mut speed = 0.0;
        let mut heading = Vector2::zero();
        let mut sum = Vector2::zero();
        for boid in boids {
            speed += boid.speed();
            heading += boid.velocity.normalize();
            sum += boid.position;
        }

        let centroid = Position::new(sum.x / n, sum.y / n);
        let spread = boids
            .iter()
            .map(|b| Position::new(b.position.x, b.position.y).distance_to(&centroid))
            .sum::<f32>()
            / n;

        Self {
            tick,
            mean_speed: speed / n,
            polarization: (heading / n).magnitude(),
            centroid,
            spread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_flock_is_fully_polarized() {
        let boids = vec![
            Boid::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)),
            Boid::new(Vector2::new(10.0, 0.0), Vector2::new(2.0, 0.0)),
        ];
        let metrics = FlockMetrics::measure(4, &boids);

        assert_eq!(metrics.tick, 4);
        assert!((metrics.polarization - 1.0).abs() < 1e-6);
        assert!((metrics.mean_speed - 1.5).abs() < 1e-6);
        assert_eq!(metrics.centroid, Position::new(5.0, 0.0));
        assert!((metrics.spread - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposed_headings_cancel() {
        let boids = vec![
            Boid::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)),
            Boid::new(Vector2::new(0.0, 0.0), Vector2::new(-1.0, 0.0)),
        ];
        assert!(FlockMetrics::measure(0, &boids).polarization < 1e-6);
    }

    #[test]
    fn test_empty_flock() {
        let metrics = FlockMetrics::measure(0, &[]);
        assert_eq!(metrics.mean_speed, 0.0);
        assert_eq!(metrics.spread, 0.0);
    }
}
