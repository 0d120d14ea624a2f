use std::f32::consts::{FRAC_PI_4, PI};

use crate::caster::{DEFAULT_STEP, MIN_STEP};
use crate::error::ConfigError;
use crate::renderer::DEFAULT_HORIZON;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub step_size: f32,
    /// Distance at which walls fade to black.
    pub horizon: f32,
    /// Optional cast bound; the grid diagonal plus one step otherwise.
    pub max_distance: Option<f32>,
    pub fov: f32,
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub minimap_scale: usize,
    pub debug_rays: bool,
    pub debug_ray_every: usize,
    pub spawn: [f32; 2],
    pub spawn_heading: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP,
            horizon: DEFAULT_HORIZON,
            max_distance: None,
            fov: FRAC_PI_4,
            move_speed: 0.1,
            rotate_speed: 0.05,
            minimap_scale: 25,
            debug_rays: true,
            debug_ray_every: 10,
            spawn: [3.5, 3.5],
            spawn_heading: 0.0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_size.is_finite() && self.step_size >= MIN_STEP) {
            return Err(ConfigError::StepSize(self.step_size));
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(ConfigError::FieldOfView(self.fov));
        }
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(ConfigError::Horizon(self.horizon));
        }
        if let Some(max) = self.max_distance
            && !(max.is_finite() && max > 0.0)
        {
            return Err(ConfigError::MaxDistance(max));
        }
        for (name, value) in [
            ("move_speed", self.move_speed),
            ("rotate_speed", self.rotate_speed),
            ("spawn_heading", self.spawn_heading),
            ("spawn x", self.spawn[0]),
            ("spawn y", self.spawn[1]),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }
        if self.minimap_scale == 0 {
            return Err(ConfigError::MinimapScale);
        }
        if self.debug_ray_every == 0 {
            return Err(ConfigError::DebugRaySpacing);
        }
        Ok(())
    }
}
