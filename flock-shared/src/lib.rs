#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// What a renderer needs to draw one boid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub position: Position,
    /// Radians, for sprite rotation
    pub heading: f32,
    pub speed: f32,
}

/// All agents after a given tick, in stable index order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Frame {
    pub tick: u64,
    pub agents: Vec<AgentState>,
}

/// Full simulation configuration as seen by the page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSettings {
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub separation_force: f32,
    pub alignment_force: f32,
    pub cohesion_force: f32,
    pub agent_count: usize,
    pub world_width: f32,
    pub world_height: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_force: 0.03,
            separation_radius: 25.0,
            alignment_radius: 50.0,
            cohesion_radius: 50.0,
            separation_force: 1.5,
            alignment_force: 1.0,
            cohesion_force: 1.0,
            agent_count: 100,
            world_width: 800.0,
            world_height: 600.0,
        }
    }
}

/// Partial settings sent from the control panel; missing fields are left
/// as they are.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_force: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohesion_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_force: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_force: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohesion_force: Option<f32>,
    #[serde(alias = "boidCount", skip_serializing_if = "Option::is_none")]
    pub agent_count: Option<usize>,
    #[serde(alias = "canvasWidth", skip_serializing_if = "Option::is_none")]
    pub world_width: Option<f32>,
    #[serde(alias = "canvasHeight", skip_serializing_if = "Option::is_none")]
    pub world_height: Option<f32>,
}

#[cfg(feature = "std")]
impl SettingsUpdate {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(feature = "std")]
impl SimulationSettings {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(feature = "std")]
impl Frame {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(feature = "engine")]
mod engine {
    use super::*;
    use flock_core::{Boid, ConfigPatch, SimulationConfig};

    impl From<&Boid> for AgentState {
        fn from(boid: &Boid) -> Self {
            Self {
                position: Position::new(boid.position.x, boid.position.y),
                heading: boid.heading(),
                speed: boid.speed(),
            }
        }
    }

    impl Frame {
        /// Snapshot of `boids` after `tick`, in index order.
        pub fn capture(tick: u64, boids: &[Boid]) -> Self {
            Self {
                tick,
                agents: boids.iter().map(AgentState::from).collect(),
            }
        }
    }

    impl From<&SimulationConfig> for SimulationSettings {
        fn from(config: &SimulationConfig) -> Self {
            Self {
                max_speed: config.max_speed,
                max_force: config.max_force,
                separation_radius: config.separation_radius,
                alignment_radius: config.alignment_radius,
                cohesion_radius: config.cohesion_radius,
                separation_force: config.separation_force,
                alignment_force: config.alignment_force,
                cohesion_force: config.cohesion_force,
                agent_count: config.agent_count,
                world_width: config.world_width,
                world_height: config.world_height,
            }
        }
    }

    impl SettingsUpdate {
        pub fn to_patch(&self) -> ConfigPatch {
            ConfigPatch {
                max_speed: self.max_speed,
                max_force: self.max_force,
                separation_radius: self.separation_radius,
                alignment_radius: self.alignment_radius,
                cohesion_radius: self.cohesion_radius,
                separation_force: self.separation_force,
                alignment_force: self.alignment_force,
                cohesion_force: self.cohesion_force,
                agent_count: self.agent_count,
                world_width: self.world_width,
                world_height: self.world_height,
            }
        }
    }

    #[cfg(all(test, feature = "std"))]
    mod tests {
        use super::*;
        use flock_core::Vector2;

        #[test]
        fn test_update_maps_to_patch() {
            let update =
                SettingsUpdate::from_json(r#"{"boidCount": 12, "maxSpeed": 3.5}"#).unwrap();

            assert_eq!(
                update.to_patch(),
                ConfigPatch::new().with_agent_count(12).with_max_speed(3.5)
            );
        }

        #[test]
        fn test_default_settings_match_engine_defaults() {
            assert_eq!(
                SimulationSettings::from(&SimulationConfig::default()),
                SimulationSettings::default()
            );
        }

        #[test]
        fn test_agent_state_from_boid() {
            let boid = Boid::new(Vector2::new(4.0, 5.0), Vector2::new(3.0, 4.0));
            let state = AgentState::from(&boid);
            assert_eq!(state.position, Position::new(4.0, 5.0));
            assert_eq!(state.speed, 5.0);
            assert!((state.heading - (4.0f32).atan2(3.0)).abs() < 1e-6);
        }

        #[test]
        fn test_capture_keeps_index_order() {
            let boids = [
                Boid::new(Vector2::new(1.0, 1.0), Vector2::new(1.0, 0.0)),
                Boid::new(Vector2::new(2.0, 2.0), Vector2::new(0.0, 1.0)),
            ];
            let frame = Frame::capture(7, &boids);
            assert_eq!(frame.tick, 7);
            assert_eq!(frame.agents[1].position, Position::new(2.0, 2.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0);
        let p2 = Position::new(3.0, 4.0);
        assert_eq!(p1.distance_to(&p2), 5.0);
    }

    #[test]
    fn test_settings_use_camel_case() {
        let json = SimulationSettings::default().to_json().unwrap();
        assert!(json.contains("\"maxSpeed\":2.0"));
        assert!(json.contains("\"agentCount\":100"));
        assert!(json.contains("\"worldHeight\":600.0"));
    }

    #[test]
    fn test_partial_update() {
        let update = SettingsUpdate::from_json(r#"{"cohesionForce": 0.5}"#).unwrap();
        assert_eq!(update.cohesion_force, Some(0.5));
        assert_eq!(update.agent_count, None);
        assert_eq!(update.max_speed, None);
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{"boidCount": 30, "canvasWidth": 1024, "canvasHeight": 768}"#;
        let update = SettingsUpdate::from_json(json).unwrap();
        assert_eq!(update.agent_count, Some(30));
        assert_eq!(update.world_width, Some(1024.0));
        assert_eq!(update.world_height, Some(768.0));
    }

    #[test]
    fn test_frame_json() {
        let frame = Frame {
            tick: 3,
            agents: vec![AgentState {
                position: Position::new(1.0, 2.0),
                heading: 0.0,
                speed: 1.5,
            }],
        };
        let json = frame.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"tick":3,"agents":[{"position":{"x":1.0,"y":2.0},"heading":0.0,"speed":1.5}]}"#
        );
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
