//! Playback volume of a chord.

use log::warn;

/// Level used when no velocity is set, and the centre that relative velocities scale
pub const BASE_LEVEL: f64 = 0.70866;

const MAX_VELOCITY: u8 = 127;

#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    velocity: Option<u8>,
    /// When true the velocity scales the base level; when false it alone sets the level
    pub velocity_is_relative: bool,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            velocity: None,
            velocity_is_relative: true,
        }
    }
}

impl Volume {
    pub fn velocity(&self) -> Option<u8> {
        self.velocity
    }

    /// Set the velocity, clamping into 0-127
    pub fn set_velocity(&mut self, velocity: i32) {
        let clamped = velocity.clamp(0, MAX_VELOCITY as i32);
        if clamped != velocity {
            warn!("Velocity {} clamped to {}", velocity, clamped);
        }
        self.velocity = Some(clamped as u8);
    }

    pub fn clear_velocity(&mut self) {
        self.velocity = None;
    }

    /// Velocity as a fraction of 127
    pub fn velocity_scalar(&self) -> Option<f64> {
        self.velocity.map(|v| v as f64 / MAX_VELOCITY as f64)
    }

    /// Set the velocity from a 0-1 scalar (clamped), rounded to the nearest step
    pub fn set_velocity_scalar(&mut self, scalar: f64) {
        let clamped = scalar.clamp(0.0, 1.0);
        if clamped != scalar {
            warn!("Velocity scalar {} clamped to {}", scalar, clamped);
        }
        self.velocity = Some((clamped * MAX_VELOCITY as f64).round() as u8);
    }

    /// Realized level in 0-1 around [`BASE_LEVEL`]
    pub fn realized(&self) -> f64 {
        self.realized_with_base(BASE_LEVEL, true)
    }

    pub fn realized_with_base(&self, base_level: f64, clip: bool) -> f64 {
        let level = match self.velocity_scalar() {
            Some(scalar) if self.velocity_is_relative => base_level * scalar * 2.0,
            Some(scalar) => scalar,
            None => base_level,
        };
        if clip { level.clamp(0.0, 1.0) } else { level }
    }
}
