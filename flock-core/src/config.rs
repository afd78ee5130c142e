use core::fmt;

/// Configuration for the flock simulation.
///
/// Never mutated while a tick is running; replaced wholesale or patched
/// with a [`ConfigPatch`] between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
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

impl Default for SimulationConfig {
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

/// One of the three flocking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Separation,
    Alignment,
    Cohesion,
}

impl SimulationConfig {
    /// Checks every field: caps and world bounds strictly positive, radii and
    /// weights non-negative, everything finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
        ] {
            check_finite(field, value)?;
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("separation_radius", self.separation_radius),
            ("alignment_radius", self.alignment_radius),
            ("cohesion_radius", self.cohesion_radius),
            ("separation_force", self.separation_force),
            ("alignment_force", self.alignment_force),
            ("cohesion_force", self.cohesion_force),
        ] {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Largest of the three neighbour radii.
    pub fn vision_radius(&self) -> f32 {
        self.separation_radius
            .max(self.alignment_radius)
            .max(self.cohesion_radius)
    }

    /// Copy of this config with only `behavior` weighted; the other two
    /// rules get a zero weight.
    pub fn isolate(&self, behavior: Behavior) -> Self {
        let mut config = *self;
        if behavior != Behavior::Separation {
            config.separation_force = 0.0;
        }
        if behavior != Behavior::Alignment {
            config.alignment_force = 0.0;
        }
        if behavior != Behavior::Cohesion {
            config.cohesion_force = 0.0;
        }
        config
    }

    pub fn weight(&self, behavior: Behavior) -> f32 {
        match behavior {
            Behavior::Separation => self.separation_force,
            Behavior::Alignment => self.alignment_force,
            Behavior::Cohesion => self.cohesion_force,
        }
    }

    pub fn radius(&self, behavior: Behavior) -> f32 {
        match behavior {
            Behavior::Separation => self.separation_radius,
            Behavior::Alignment => self.alignment_radius,
            Behavior::Cohesion => self.cohesion_radius,
        }
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Partial configuration; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigPatch {
    pub max_speed: Option<f32>,
    pub max_force: Option<f32>,
    pub separation_radius: Option<f32>,
    pub alignment_radius: Option<f32>,
    pub cohesion_radius: Option<f32>,
    pub separation_force: Option<f32>,
    pub alignment_force: Option<f32>,
    pub cohesion_force: Option<f32>,
    pub agent_count: Option<usize>,
    pub world_width: Option<f32>,
    pub world_height: Option<f32>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges this patch over `base`. The result is not validated.
    pub fn apply_to(&self, base: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            max_speed: self.max_speed.unwrap_or(base.max_speed),
            max_force: self.max_force.unwrap_or(base.max_force),
            separation_radius: self.separation_radius.unwrap_or(base.separation_radius),
            alignment_radius: self.alignment_radius.unwrap_or(base.alignment_radius),
            cohesion_radius: self.cohesion_radius.unwrap_or(base.cohesion_radius),
            separation_force: self.separation_force.unwrap_or(base.separation_force),
            alignment_force: self.alignment_force.unwrap_or(base.alignment_force),
            cohesion_force: self.cohesion_force.unwrap_or(base.cohesion_force),
            agent_count: self.agent_count.unwrap_or(base.agent_count),
            world_width: self.world_width.unwrap_or(base.world_width),
            world_height: self.world_height.unwrap_or(base.world_height),
        }
    }

    pub fn with_max_speed(mut self, value: f32) -> Self {
        self.max_speed = Some(value);
        self
    }

    pub fn with_max_force(mut self, value: f32) -> Self {
        self.max_force = Some(value);
        self
    }

    pub fn with_separation_radius(mut self, value: f32) -> Self {
        self.separation_radius = Some(value);
        self
    }

    pub fn with_alignment_radius(mut self, value: f32) -> Self {
        self.alignment_radius = Some(value);
        self
    }

    pub fn with_cohesion_radius(mut self, value: f32) -> Self {
        self.cohesion_radius = Some(value);
        self
    }

    pub fn with_separation_force(mut self, value: f32) -> Self {
        self.separation_force = Some(value);
        self
    }

    pub fn with_alignment_force(mut self, value: f32) -> Self {
        self.alignment_force = Some(value);
        self
    }

    pub fn with_cohesion_force(mut self, value: f32) -> Self {
        self.cohesion_force = Some(value);
        self
    }

    pub fn with_agent_count(mut self, value: usize) -> Self {
        self.agent_count = Some(value);
        self
    }

    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = Some(width);
        self.world_height = Some(height);
        self
    }
}

/// Rejected configuration value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// NaN or infinite.
    NotFinite { field: &'static str, value: f32 },
    /// Zero or negative where a strictly positive value is required.
    NotPositive { field: &'static str, value: f32 },
    /// Negative radius or weight.
    Negative { field: &'static str, value: f32 },
}

impl ConfigError {
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::NotFinite { field, .. }
            | ConfigError::NotPositive { field, .. }
            | ConfigError::Negative { field, .. } => field,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field, value } => {
                write!(f, "{} must be a finite number, got {}", field, value)
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_caps() {
        let config = SimulationConfig {
            max_speed: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "max_speed",
                value: 0.0
            })
        );

        let config = SimulationConfig {
            max_force: -0.1,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), "max_force");
    }

    #[test]
    fn test_rejects_negative_radius() {
        let config = SimulationConfig {
            cohesion_radius: -1.0,
            ..SimulationConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "cohesion_radius", .. }));
        assert_eq!(
            err.to_string(),
            "cohesion_radius must not be negative, got -1"
        );
    }

    #[test]
    fn test_rejects_nan() {
        let config = SimulationConfig {
            alignment_force: f32::NAN,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "alignment_force", .. })
        ));
    }

    #[test]
    fn test_zero_radii_and_weights_are_legal() {
        let config = SimulationConfig {
            separation_radius: 0.0,
            cohesion_force: 0.0,
            agent_count: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let base = SimulationConfig::default();
        let patch = ConfigPatch::new().with_agent_count(10).with_max_speed(4.0);
        let merged = patch.apply_to(&base);

        assert_eq!(merged.agent_count, 10);
        assert_eq!(merged.max_speed, 4.0);
        assert_eq!(merged.cohesion_radius, base.cohesion_radius);
        assert!(ConfigPatch::new().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_isolate_and_vision_radius() {
        let config = SimulationConfig::default();
        let only = config.isolate(Behavior::Alignment);
        assert_eq!(only.separation_force, 0.0);
        assert_eq!(only.cohesion_force, 0.0);
        assert_eq!(only.weight(Behavior::Alignment), config.alignment_force);
        assert_eq!(config.vision_radius(), 50.0);
        assert_eq!(config.radius(Behavior::Separation), 25.0);
    }
}
