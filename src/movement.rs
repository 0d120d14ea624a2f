use crate::grid::GridMap;
use crate::viewer::Viewer;

/// Discrete input intents delivered by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
}

/// Result of dispatching a command. A rejected move is a normal outcome:
/// the viewer comes back unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub viewer: Viewer,
    pub rejected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementController {
    pub move_speed: f32,   // cells per command
    pub rotate_speed: f32, // radians per command
}

impl MovementController {
    pub fn new(move_speed: f32, rotate_speed: f32) -> Self {
        Self {
            move_speed,
            rotate_speed,
        }
    }

    /// Moves along the heading by `forward` cells (negative moves back).
    /// Only the destination cell is tested, so a large step can cut across
    /// the corner of a wall cell.
    pub fn try_move(&self, grid: &GridMap, viewer: Viewer, forward: f32) -> Movement {
        let [dx, dy] = viewer.direction();
        let new_x = viewer.pos[0] + dx * forward;
        let new_y = viewer.pos[1] + dy * forward;

        if grid.is_wall_at(new_x, new_y) {
            return Movement {
                viewer,
                rejected: true,
            };
        }

        Movement {
            viewer: Viewer {
                pos: [new_x, new_y],
                ..viewer
            },
            rejected: false,
        }
    }

    #[inline]
    pub fn rotate(&self, viewer: Viewer, delta: f32) -> Viewer {
        Viewer {
            heading: viewer.heading + delta,
            ..viewer
        }
    }

    pub fn apply(&self, grid: &GridMap, viewer: Viewer, command: Command) -> Movement {
        match command {
            Command::MoveForward => self.try_move(grid, viewer, self.move_speed),
            Command::MoveBackward => self.try_move(grid, viewer, -self.move_speed),
            Command::TurnLeft => Movement {
                viewer: self.rotate(viewer, -self.rotate_speed),
                rejected: false,
            },
            Command::TurnRight => Movement {
                viewer: self.rotate(viewer, self.rotate_speed),
                rejected: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn controller() -> MovementController {
        MovementController::new(0.1, 0.05)
    }

    #[test]
    fn forward_into_wall_is_rejected() {
        let grid = GridMap::default_level();
        let viewer = Viewer::new(1.5, 1.5, -FRAC_PI_2, FRAC_PI_4);
        let result = controller().try_move(&grid, viewer, 1.0);
        assert!(result.rejected);
        assert_eq!(result.viewer, viewer);
    }

    #[test]
    fn diagonal_into_wall_cell_is_rejected() {
        // (2, 2) is a wall in the default level
        let grid = GridMap::default_level();
        let viewer = Viewer::new(1.5, 1.5, FRAC_PI_4, FRAC_PI_4);
        let result = controller().try_move(&grid, viewer, 1.0);
        assert!(result.rejected);
        assert_eq!(result.viewer.pos, [1.5, 1.5]);
    }

    #[test]
    fn open_move_updates_position_only() {
        let grid = GridMap::default_level();
        let viewer = Viewer::new(1.5, 1.5, 0.0, FRAC_PI_4);
        let result = controller().apply(&grid, viewer, Command::MoveForward);
        assert!(!result.rejected);
        assert!((result.viewer.pos[0] - 1.6).abs() < 1e-6);
        assert_eq!(result.viewer.pos[1], 1.5);
        assert_eq!(result.viewer.heading, viewer.heading);
    }

    #[test]
    fn backward_moves_against_heading() {
        let grid = GridMap::default_level();
        let viewer = Viewer::new(3.5, 1.5, 0.0, FRAC_PI_4);
        let result = controller().apply(&grid, viewer, Command::MoveBackward);
        assert!((result.viewer.pos[0] - 3.4).abs() < 1e-6);
    }

    #[test]
    fn repeated_steps_stop_at_wall() {
        let grid = GridMap::default_level();
        let c = controller();
        let mut viewer = Viewer::new(1.5, 1.5, -FRAC_PI_2, FRAC_PI_4);
        for _ in 0..50 {
            viewer = c.apply(&grid, viewer, Command::MoveForward).viewer;
            let (x, y) = viewer.cell();
            assert!(!grid.is_wall(x, y));
        }
        assert!(viewer.pos[1] >= 1.0 && viewer.pos[1] < 1.2);
    }

    #[test]
    fn never_lands_in_wall_for_any_distance() {
        let grid = GridMap::default_level();
        let c = controller();
        for h in 0..32 {
            let heading = h as f32 * 0.2;
            for f in -40..=40 {
                let forward = f as f32 * 0.25;
                let viewer = Viewer::new(3.5, 3.5, heading, FRAC_PI_4);
                let moved = c.try_move(&grid, viewer, forward).viewer;
                let (x, y) = moved.cell();
                assert!(grid.contains(x, y));
                assert!(!grid.is_wall(x, y));
            }
        }
    }

    #[test]
    fn turns_are_signed() {
        let grid = GridMap::default_level();
        let viewer = Viewer::new(1.5, 1.5, 0.0, FRAC_PI_4);
        let c = controller();
        assert_eq!(c.apply(&grid, viewer, Command::TurnLeft).viewer.heading, -0.05);
        assert_eq!(c.apply(&grid, viewer, Command::TurnRight).viewer.heading, 0.05);
    }

    #[test]
    fn rotation_round_trip() {
        let c = controller();
        let viewer = Viewer::new(1.5, 1.5, 2.3, FRAC_PI_4);
        for delta in [0.05, 1.0, -3.7, 12.5] {
            let back = c.rotate(c.rotate(viewer, delta), -delta);
            assert!((back.heading - viewer.heading).abs() < 1e-5);
        }
    }
}
