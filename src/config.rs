//! Tunables for a maze round. Defaults reproduce the shipped game: a 20x12
//! grid, 4px walls, 4px/frame top speed and a 120px joystick pad.

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub wall_thickness: f64,
    /// Pixels per frame at full joystick deflection.
    pub player_speed: f64,
    pub player_radius_ratio: f64,
    pub goal_radius_ratio: f64,
    pub max_generation_attempts: u32,
    pub joystick: JoystickConfig,
    pub resize_debounce_ms: i32,
}

/// Joystick geometry in joystick-local pixels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JoystickConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub dead_zone: f64,
    /// Offset at which the player reaches full speed.
    pub max_distance: f64,
    /// How far the handle may travel on screen; display only.
    pub visual_radius: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 12,
            wall_thickness: 4.0,
            player_speed: 4.0,
            player_radius_ratio: 0.3,
            goal_radius_ratio: 0.4,
            max_generation_attempts: 100,
            joystick: JoystickConfig::default(),
            resize_debounce_ms: 200,
        }
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            center_x: 60.0,
            center_y: 60.0,
            dead_zone: 10.0,
            max_distance: 40.0,
            visual_radius: 70.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::ZeroGridDimension {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !(self.wall_thickness.is_finite() && self.wall_thickness > 0.0) {
            return Err(ConfigError::InvalidWallThickness(self.wall_thickness));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(self.player_speed));
        }
        for ratio in [self.player_radius_ratio, self.goal_radius_ratio] {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(ConfigError::InvalidRadiusRatio(ratio));
            }
        }
        // A player disc spanning the whole cell never fits a corridor.
        if self.player_radius_ratio >= 0.5 {
            return Err(ConfigError::InvalidRadiusRatio(self.player_radius_ratio));
        }
        if self.max_generation_attempts == 0 {
            return Err(ConfigError::NoGenerationAttempts);
        }
        self.joystick.validate()
    }
}

impl JoystickConfig {
    /// On-screen pad size: the centre sits in the middle of the pad.
    pub fn pad_size(&self) -> (f64, f64) {
        (2.0 * self.center_x, 2.0 * self.center_y)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let JoystickConfig {
            dead_zone,
            max_distance,
            ..
        } = *self;
        // max_distance == dead_zone would divide by zero in the force mapping.
        if !(dead_zone.is_finite() && max_distance.is_finite())
            || dead_zone < 0.0
            || max_distance <= dead_zone
        {
            return Err(ConfigError::InvalidJoystick {
                dead_zone,
                max_distance,
            });
        }
        if !(self.visual_radius.is_finite() && self.visual_radius > 0.0) {
            return Err(ConfigError::InvalidVisualRadius(self.visual_radius));
        }
        Ok(())
    }
}
