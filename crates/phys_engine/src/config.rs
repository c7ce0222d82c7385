//! Configuration system
//!
//! Typed physics tuning with file loading in TOML or RON, keyed off the
//! file extension.

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning values for [`PhysicsEngine`](crate::engine::PhysicsEngine).
///
/// Fields missing from a config file fall back to their defaults, so partial
/// files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to bodies each step
    pub gravity: Vec3,

    /// Timestep in seconds for fixed stepping
    pub fixed_timestep: f32,

    /// Sphere radius hosts pass when resolving the player body
    pub player_radius: f32,

    /// Factor triangles are scaled about their centroid before player
    /// contact tests
    pub triangle_extrusion: f32,

    /// Minimum dot product between a triangle normal and the up direction
    /// for the triangle to count as ground
    pub ground_normal_threshold: f32,

    /// Numerical cutoff for ray-triangle intersection
    pub ray_epsilon: f32,
}

impl PhysicsConfig {
    /// Create the default tuning
    pub fn new() -> Self {
        Self {
            gravity: Vec3::new(0.0, -1.0, 0.0),
            fixed_timestep: 0.16,
            player_radius: 1.0,
            triangle_extrusion: 1.3,
            ground_normal_threshold: 0.5,
            ray_epsilon: 1e-5,
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the fixed timestep
    pub fn with_fixed_timestep(mut self, fixed_timestep: f32) -> Self {
        self.fixed_timestep = fixed_timestep;
        self
    }

    /// Set the player sphere radius
    pub fn with_player_radius(mut self, player_radius: f32) -> Self {
        self.player_radius = player_radius;
        self
    }

    /// Set the triangle extrusion factor
    pub fn with_triangle_extrusion(mut self, triangle_extrusion: f32) -> Self {
        self.triangle_extrusion = triangle_extrusion;
        self
    }

    /// Set the ground classification threshold
    pub fn with_ground_normal_threshold(mut self, threshold: f32) -> Self {
        self.ground_normal_threshold = threshold;
        self
    }

    /// Set the ray intersection cutoff
    pub fn with_ray_epsilon(mut self, ray_epsilon: f32) -> Self {
        self.ray_epsilon = ray_epsilon;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err("Gravity must be finite".to_string());
        }
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return Err("Fixed timestep must be positive".to_string());
        }
        if !self.player_radius.is_finite() || self.player_radius <= 0.0 {
            return Err("Player radius must be positive".to_string());
        }
        if !self.triangle_extrusion.is_finite() || self.triangle_extrusion <= 0.0 {
            return Err("Triangle extrusion must be positive".to_string());
        }
        if !(-1.0..=1.0).contains(&self.ground_normal_threshold) {
            return Err("Ground normal threshold must be within [-1, 1]".to_string());
        }
        if !self.ray_epsilon.is_finite() || self.ray_epsilon <= 0.0 {
            return Err("Ray epsilon must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PhysicsConfig {}
