use std::fmt;
use std::io;

#[derive(Debug)]
pub enum MapError {
    Empty,
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidCell {
        row: usize,
        column: usize,
        value: char,
    },
    InvalidValue {
        row: usize,
        column: usize,
        value: u8,
    },
    Io(io::Error),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map has no rows"),
            MapError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {} (maps must be rectangular)",
                row, found, expected
            ),
            MapError::InvalidCell { row, column, value } => {
                write!(f, "invalid cell {:?} at row {}, column {}", value, row, column)
            }
            MapError::InvalidValue { row, column, value } => write!(
                f,
                "invalid cell value {} at row {}, column {} (expected 0 or 1)",
                value, row, column
            ),
            MapError::Io(e) => write!(f, "failed to read map: {}", e),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        MapError::Io(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    StepSize(f32),
    FieldOfView(f32),
    Horizon(f32),
    MaxDistance(f32),
    NonFinite(&'static str),
    MinimapScale,
    DebugRaySpacing,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::StepSize(v) => write!(
                f,
                "step size must be at least {}, got {}",
                crate::caster::MIN_STEP,
                v
            ),
            ConfigError::FieldOfView(v) => {
                write!(f, "field of view must be in (0, pi) radians, got {}", v)
            }
            ConfigError::Horizon(v) => write!(f, "horizon must be positive, got {}", v),
            ConfigError::MaxDistance(v) => {
                write!(f, "max distance must be positive, got {}", v)
            }
            ConfigError::NonFinite(name) => write!(f, "{} must be a finite number", name),
            ConfigError::MinimapScale => write!(f, "minimap scale must be at least 1"),
            ConfigError::DebugRaySpacing => write!(f, "debug ray spacing must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    InvalidSpawn { x: f32, y: f32 },
    Config(ConfigError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidSpawn { x, y } => {
                write!(f, "spawn point ({}, {}) is not an open cell", x, y)
            }
            SessionError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}
