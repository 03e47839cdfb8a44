use std::fmt;

/// Rejected game configuration. Returned before any maze is built so a bad
/// setup never produces degenerate geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroGridDimension { width: usize, height: usize },
    InvalidWallThickness(f64),
    InvalidSpeed(f64),
    InvalidRadiusRatio(f64),
    NoGenerationAttempts,
    InvalidJoystick { dead_zone: f64, max_distance: f64 },
    InvalidVisualRadius(f64),
    PlayAreaTooSmall { area_width: f64, grid_width: usize },
    CorridorTooNarrow {
        cell_size: f64,
        wall_thickness: f64,
        player_radius: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroGridDimension { width, height } => {
                write!(f, "grid dimensions must be positive, got {}x{}", width, height)
            }
            ConfigError::InvalidWallThickness(t) => {
                write!(f, "wall thickness must be a positive number, got {}", t)
            }
            ConfigError::InvalidSpeed(s) => {
                write!(f, "player speed must be a non-negative number, got {}", s)
            }
            ConfigError::InvalidRadiusRatio(r) => {
                write!(f, "collision radius ratio must be positive, got {}", r)
            }
            ConfigError::NoGenerationAttempts => {
                write!(f, "at least one maze generation attempt is required")
            }
            ConfigError::InvalidJoystick {
                dead_zone,
                max_distance,
            } => write!(
                f,
                "joystick dead zone ({}) must be non-negative and below its max distance ({})",
                dead_zone, max_distance
            ),
            ConfigError::InvalidVisualRadius(r) => {
                write!(f, "joystick handle radius must be positive, got {}", r)
            }
            ConfigError::PlayAreaTooSmall {
                area_width,
                grid_width,
            } => write!(
                f,
                "play area width {} is too small for {} columns",
                area_width, grid_width
            ),
            ConfigError::CorridorTooNarrow {
                cell_size,
                wall_thickness,
                player_radius,
            } => write!(
                f,
                "cells of size {} with walls of thickness {} leave no room for a player of radius {}",
                cell_size, wall_thickness, player_radius
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let err = ConfigError::ZeroGridDimension {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "grid dimensions must be positive, got 0x12");

        let err = ConfigError::PlayAreaTooSmall {
            area_width: 15.0,
            grid_width: 20,
        };
        assert!(err.to_string().contains("20 columns"));
    }
}
