//! Steering behaviours.
//!
//! Every function here is a pure function of the boid, the snapshot of the
//! flock it is scanning and the config. None of them mutate anything; the
//! simulation applies the returned forces in a separate pass.
//!
//! All three rules end in the same Reynolds step: a desired velocity of
//! length `max_speed`, minus the current velocity, clamped to `max_force`.
//! That step is [`steer`].

use crate::{Boid, SimulationConfig, Vector2};

/// The three weighted rule forces acting on one boid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringForces {
    pub separation: Vector2,
    pub alignment: Vector2,
    pub cohesion: Vector2,
}

impl SteeringForces {
    pub fn total(&self) -> Vector2 {
        self.separation + self.alignment + self.cohesion
    }
}

/// Distance to `other` when it counts as a neighbour: strictly inside
/// `radius` and not at the boid's own position.
#[inline]
pub fn neighbor_distance(boid: &Boid, other: &Boid, radius: f32) -> Option<f32> {
    let distance = boid.position.distance(&other.position);
    (distance > 0.0 && distance < radius).then_some(distance)
}

/// Desired velocity minus current velocity, clamped to `max_force`.
#[inline]
pub fn steer(desired: Vector2, velocity: Vector2, max_force: f32) -> Vector2 {
    (desired - velocity).limit(max_force)
}

/// Unweighted steering towards `target` at full speed.
pub fn seek(boid: &Boid, target: Vector2, config: &SimulationConfig) -> Vector2 {
    let desired = (target - boid.position).normalize() * config.max_speed;
    steer(desired, boid.velocity, config.max_force)
}

/// Pushes away from close neighbours, harder the closer they are.
pub fn separation<'a, I>(boid: &Boid, others: I, config: &SimulationConfig) -> Vector2
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2::zero();
    let mut count = 0;

    for other in others {
        if let Some(distance) = neighbor_distance(boid, other, config.separation_radius) {
            sum += (boid.position - other.position).normalize() / distance;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2::zero();
    }

    let desired = (sum / count as f32).normalize() * config.max_speed;
    steer(desired, boid.velocity, config.max_force) * config.separation_force
}

/// Steers towards the average heading of neighbours.
pub fn alignment<'a, I>(boid: &Boid, others: I, config: &SimulationConfig) -> Vector2
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2::zero();
    let mut count = 0;

    for other in others {
        if neighbor_distance(boid, other, config.alignment_radius).is_some() {
            sum += other.velocity;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2::zero();
    }

    let desired = (sum / count as f32).normalize() * config.max_speed;
    steer(desired, boid.velocity, config.max_force) * config.alignment_force
}

/// Seeks the centroid of neighbours.
pub fn cohesion<'a, I>(boid: &Boid, others: I, config: &SimulationConfig) -> Vector2
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2::zero();
    let mut count = 0;

    for other in others {
        if neighbor_distance(boid, other, config.cohesion_radius).is_some() {
            sum += other.position;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2::zero();
    }

    seek(boid, sum / count as f32, config) * config.cohesion_force
}

/// All three rules for `boid` against the full snapshot `flock`. Each rule
/// is its own scan; the boid itself is skipped by the distance test.
pub fn steering(boid: &Boid, flock: &[Boid], config: &SimulationConfig) -> SteeringForces {
    SteeringForces {
        separation: separation(boid, flock, config),
        alignment: alignment(boid, flock, config),
        cohesion: cohesion(boid, flock, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2::new(x, y), Vector2::new(vx, vy))
    }

    #[test]
    fn test_lone_boid_feels_nothing() {
        let config = SimulationConfig::default();
        let flock = vec![boid(100.0, 100.0, 1.0, 0.0), boid(400.0, 400.0, 0.0, 1.0)];

        let forces = steering(&flock[0], &flock, &config);
        assert_eq!(forces, SteeringForces::default());
        assert_eq!(forces.total(), Vector2::zero());
    }

    #[test]
    fn test_self_is_not_a_neighbor() {
        let b = boid(10.0, 10.0, 1.0, 0.0);
        assert_eq!(neighbor_distance(&b, &b, 50.0), None);
        let other = boid(13.0, 14.0, 0.0, 0.0);
        assert_eq!(neighbor_distance(&b, &other, 50.0), Some(5.0));
        assert_eq!(neighbor_distance(&b, &other, 5.0), None);
    }

    #[test]
    fn test_separation_points_away() {
        let config = SimulationConfig::default();
        let flock = vec![boid(100.0, 100.0, 0.0, 0.0), boid(110.0, 100.0, 0.0, 0.0)];

        let force = separation(&flock[0], &flock, &config);
        assert!(force.x < 0.0);
        assert!(force.y.abs() < 1e-6);
        // clamp to max_force happens before the weight
        let expected = config.max_force * config.separation_force;
        assert!((force.magnitude() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_alignment_matches_neighbor_heading() {
        let config = SimulationConfig::default();
        let flock = vec![boid(100.0, 100.0, 2.0, 0.0), boid(130.0, 100.0, 0.0, 2.0)];

        let force = alignment(&flock[0], &flock, &config);
        // desired (0, 2) minus velocity (2, 0), clamped
        assert!(force.x < 0.0);
        assert!(force.y > 0.0);
        assert!((force.magnitude() - config.max_force).abs() < 1e-5);
    }

    #[test]
    fn test_cohesion_points_to_centroid() {
        let config = SimulationConfig::default();
        let flock = vec![
            boid(100.0, 100.0, 0.0, 0.0),
            boid(130.0, 90.0, 0.0, 0.0),
            boid(130.0, 110.0, 0.0, 0.0),
        ];

        let force = cohesion(&flock[0], &flock, &config);
        assert!(force.x > 0.0);
        assert!(force.y.abs() < 1e-6);
    }

    #[test]
    fn test_zero_weight_disables_rule() {
        let config = SimulationConfig {
            separation_force: 0.0,
            ..SimulationConfig::default()
        };
        let flock = vec![boid(100.0, 100.0, 1.0, 0.0), boid(105.0, 100.0, -1.0, 0.0)];
        assert_eq!(separation(&flock[0], &flock, &config), Vector2::zero());
    }

    #[test]
    fn test_seek_at_target_brakes() {
        let config = SimulationConfig::default();
        let b = boid(10.0, 10.0, 1.0, 0.0);
        // zero direction keeps desired at zero, so the steer opposes velocity
        let force = seek(&b, Vector2::new(10.0, 10.0), &config);
        assert!(force.x < 0.0);
        assert!((force.magnitude() - config.max_force).abs() < 1e-6);
    }

    #[test]
    fn test_steer_is_clamped() {
        let force = steer(Vector2::new(10.0, 0.0), Vector2::zero(), 0.5);
        assert_eq!(force, Vector2::new(0.5, 0.0));
        let small = steer(Vector2::new(0.1, 0.0), Vector2::zero(), 0.5);
        assert_eq!(small, Vector2::new(0.1, 0.0));
    }
}
