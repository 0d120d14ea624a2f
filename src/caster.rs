use crate::grid::GridMap;
use crate::viewer::Viewer;

pub const DEFAULT_STEP: f32 = 0.01;

/// Finest march step accepted; smaller steps are raised to this.
pub const MIN_STEP: f32 = 1e-4;

/// Fixed-step ray marcher over a `GridMap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCaster {
    step: f32,
    max_distance: f32,
}

/// One cast ray: its world angle and the distance it travelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    pub angle: f32,
    pub distance: f32,
}

impl RaySample {
    /// World-space end point of the ray.
    #[inline]
    pub fn end(&self, origin: [f32; 2]) -> [f32; 2] {
        [
            origin[0] + self.angle.cos() * self.distance,
            origin[1] + self.angle.sin() * self.distance,
        ]
    }
}

impl RayCaster {
    pub fn new(step: f32, max_distance: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step.max(MIN_STEP)
        } else {
            DEFAULT_STEP
        };
        let max_distance = if max_distance.is_finite() && max_distance > 0.0 {
            max_distance
        } else {
            f32::MAX
        };
        Self { step, max_distance }
    }

    /// Caster bounded by the grid's diagonal plus one step.
    pub fn for_grid(grid: &GridMap, step: f32) -> Self {
        let mut caster = Self::new(step, f32::MAX);
        caster.max_distance = caster.effective_max_distance(grid);
        caster
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Cast bound actually used against `grid`; never beyond the diagonal
    /// plus one step so every march terminates.
    #[inline]
    pub fn effective_max_distance(&self, grid: &GridMap) -> f32 {
        self.max_distance.min(grid.diagonal() + self.step)
    }

    /// Distance from `origin` to the first wall cell along `angle`, or the
    /// max distance when nothing is hit within it.
    pub fn cast(&self, grid: &GridMap, origin: [f32; 2], angle: f32) -> f32 {
        let max_distance = self.effective_max_distance(grid);
        if !angle.is_finite() || !origin[0].is_finite() || !origin[1].is_finite() {
            return max_distance;
        }

        let (dy, dx) = angle.sin_cos();
        // Step index is an integer: summing a small f32 step stops growing
        // once it falls below the spacing of floats at the current distance
        let steps = (max_distance / self.step).ceil() as u32;
        for n in 1..=steps {
            let distance = n as f32 * self.step;
            if distance > max_distance {
                break;
            }
            let x = origin[0] + dx * distance;
            let y = origin[1] + dy * distance;
            if grid.is_wall_at(x, y) {
                return distance;
            }
        }
        max_distance
    }

    /// Casts the ray for one screen column. Shared by the 3D view and the
    /// minimap debug overlay so both sample identical rays.
    #[inline]
    pub fn sample_column(
        &self,
        grid: &GridMap,
        viewer: &Viewer,
        column: usize,
        screen_width: usize,
    ) -> RaySample {
        let angle = viewer.ray_angle(column, screen_width);
        RaySample {
            angle,
            distance: self.cast(grid, viewer.pos, angle),
        }
    }
}

impl Default for RayCaster {
    fn default() -> Self {
        Self::new(DEFAULT_STEP, f32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn bordered(width: usize, height: usize) -> GridMap {
        let rows: Vec<Vec<u8>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| (x == 0 || y == 0 || x == width - 1 || y == height - 1) as u8)
                    .collect()
            })
            .collect();
        GridMap::from_rows(&rows).unwrap()
    }

    #[test]
    fn hits_corridor_wall_straight_ahead() {
        let grid = GridMap::default_level();
        let caster = RayCaster::for_grid(&grid, 0.01);
        let d = caster.cast(&grid, [3.5, 3.5], 0.0);
        assert!((d - 1.5).abs() <= caster.step() + 1e-4, "distance {}", d);
    }

    #[test]
    fn cardinal_directions_in_open_room() {
        let grid = bordered(10, 10);
        let caster = RayCaster::for_grid(&grid, 0.01);
        let origin = [5.5, 5.5];
        // walls sit at cells 0 and 9 on both axes
        for (angle, expected) in [(0.0, 3.5), (FRAC_PI_2, 3.5), (PI, 4.5), (-FRAC_PI_2, 4.5)] {
            let d = caster.cast(&grid, origin, angle);
            assert!((d - expected).abs() <= 0.011, "angle {} distance {}", angle, d);
        }
    }

    #[test]
    fn terminates_at_every_angle_inside_border() {
        let grid = bordered(12, 9);
        let caster = RayCaster::for_grid(&grid, 0.05);
        for origin in [[1.5, 1.5], [6.0, 4.5], [10.9, 7.9]] {
            for i in 0..360 {
                let angle = i as f32 / 360.0 * TAU;
                let d = caster.cast(&grid, origin, angle);
                assert!(d.is_finite());
                assert!(d > 0.0 && d <= caster.max_distance());
            }
        }
    }

    #[test]
    fn open_grid_returns_bound_not_panic() {
        // no border: rays leave the grid and treat the outside as wall
        let rows: [&[u8]; 3] = [&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]];
        let grid = GridMap::from_rows(&rows).unwrap();
        let caster = RayCaster::new(0.01, 100.0);
        let d = caster.cast(&grid, [1.5, 1.5], 0.3);
        assert!(d <= caster.effective_max_distance(&grid));
        assert!(d > 1.5);
    }

    #[test]
    fn max_distance_is_sentinel_when_short() {
        let grid = bordered(20, 20);
        let caster = RayCaster::new(0.01, 2.0);
        assert_eq!(caster.cast(&grid, [10.5, 10.5], 0.0), 2.0);
    }

    #[test]
    fn bound_never_exceeds_diagonal_plus_step() {
        let grid = GridMap::default_level();
        let caster = RayCaster::new(0.1, 1_000.0);
        assert!((caster.effective_max_distance(&grid) - (grid.diagonal() + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn invalid_step_falls_back_to_default() {
        assert_eq!(RayCaster::new(0.0, 5.0).step(), DEFAULT_STEP);
        assert_eq!(RayCaster::new(f32::NAN, 5.0).step(), DEFAULT_STEP);
    }

    #[test]
    fn tiny_step_is_raised_and_terminates() {
        let grid = GridMap::default_level();
        let caster = RayCaster::for_grid(&grid, 1e-8);
        assert_eq!(caster.step(), MIN_STEP);
        let d = caster.cast(&grid, [3.5, 3.5], 0.0);
        assert!((d - 1.5).abs() <= MIN_STEP * 2.0, "distance {}", d);
    }

    #[test]
    fn finest_step_reaches_far_walls() {
        // far from the origin, MIN_STEP is below the f32 spacing of an
        // accumulated sum; indexed steps still advance
        let rows: Vec<Vec<u8>> = (0..3)
            .map(|y| (0..600).map(|x| (y != 1 || x == 0 || x == 599) as u8).collect())
            .collect();
        let grid = GridMap::from_rows(&rows).unwrap();
        let caster = RayCaster::for_grid(&grid, MIN_STEP);
        let d = caster.cast(&grid, [0.5, 1.5], 0.0);
        assert!((d - 598.5).abs() < 0.01, "distance {}", d);
    }

    #[test]
    fn non_finite_angle_degrades_to_bound() {
        let grid = GridMap::default_level();
        let caster = RayCaster::for_grid(&grid, 0.01);
        assert_eq!(caster.cast(&grid, [3.5, 3.5], f32::NAN), caster.max_distance());
    }
}
