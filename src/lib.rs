//! First-person ray casting over a binary occupancy grid, with a top-down
//! minimap and collision-checked movement.

pub mod caster;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod minimap;
pub mod movement;
pub mod renderer;
pub mod session;
pub mod stats;
pub mod viewer;

pub use caster::{RayCaster, RaySample};
pub use config::Config;
pub use error::{ConfigError, MapError, SessionError};
pub use frame::Frame;
pub use grid::{Cell, GridMap};
pub use movement::{Command, Movement, MovementController};
pub use session::{Hud, RenderReport, Session};
pub use stats::FrameStats;
pub use viewer::Viewer;
