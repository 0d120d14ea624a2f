use rayon::prelude::*;

use crate::caster::RayCaster;
use crate::frame::{Frame, gray, pack_rgb};
use crate::grid::GridMap;
use crate::viewer::Viewer;

/// Smallest corrected distance used for projection; keeps wall heights finite
/// when a ray grazes a wall edge right next to the viewer.
pub const MIN_CORRECTED_DISTANCE: f32 = 0.01;

pub const DEFAULT_HORIZON: f32 = 12.0;

/// One projected screen column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSlice {
    pub angle: f32,
    pub distance: f32,
    pub corrected: f32,
    pub height: f32,
    pub shade: u8,
}

impl WallSlice {
    /// Vertical pixel span `[top, bottom)` centered on the screen.
    #[inline]
    pub fn span(&self, screen_height: usize) -> (usize, usize) {
        let center = 0.5 * screen_height as f32;
        let half = 0.5 * self.height;
        let top = (center - half).floor().max(0.0) as usize;
        let bottom = (center + half).ceil().min(screen_height as f32).max(0.0) as usize;
        (top.min(screen_height), bottom)
    }
}

/// Removes fish-eye: projects the ray distance onto the view direction.
#[inline]
pub fn corrected_distance(distance: f32, ray_angle: f32, heading: f32) -> f32 {
    distance * (ray_angle - heading).cos()
}

#[inline]
pub fn wall_height(screen_height: usize, corrected: f32) -> f32 {
    let corrected = if corrected.is_finite() {
        corrected.max(MIN_CORRECTED_DISTANCE)
    } else {
        MIN_CORRECTED_DISTANCE
    };
    screen_height as f32 / corrected
}

/// Linear falloff from 255 at the viewer to 0 at `horizon`.
#[inline]
pub fn shade(distance: f32, horizon: f32) -> u8 {
    if !distance.is_finite() {
        return 0;
    }
    let level = 255.0 * (1.0 - (distance / horizon).min(1.0));
    level.clamp(0.0, 255.0) as u8
}

pub fn project_column(
    grid: &GridMap,
    viewer: &Viewer,
    caster: &RayCaster,
    horizon: f32,
    column: usize,
    width: usize,
    height: usize,
) -> WallSlice {
    let ray = caster.sample_column(grid, viewer, column, width);
    let distance = if ray.distance.is_finite() {
        ray.distance
    } else {
        caster.effective_max_distance(grid)
    };
    let corrected = corrected_distance(distance, ray.angle, viewer.heading);
    WallSlice {
        angle: ray.angle,
        distance,
        corrected,
        height: wall_height(height, corrected),
        shade: shade(distance, horizon),
    }
}

/// Casts every column independently on the rayon pool.
pub fn cast_columns(
    grid: &GridMap,
    viewer: &Viewer,
    caster: &RayCaster,
    horizon: f32,
    width: usize,
    height: usize,
) -> Vec<WallSlice> {
    (0..width)
        .into_par_iter()
        .map(|column| project_column(grid, viewer, caster, horizon, column, width, height))
        .collect()
}

pub fn render_frame(
    frame: &mut Frame<'_>,
    grid: &GridMap,
    viewer: &Viewer,
    caster: &RayCaster,
    horizon: f32,
) -> Vec<WallSlice> {
    let width = frame.width();
    let height = frame.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let slices = cast_columns(grid, viewer, caster, horizon, width, height);
    let spans: Vec<(usize, usize, u32)> = slices
        .iter()
        .map(|s| {
            let (top, bottom) = s.span(height);
            (top, bottom, gray(s.shade))
        })
        .collect();

    let background = pack_rgb(0, 0, 0);

    // Rows are disjoint, so they fill in parallel
    frame
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, &(top, bottom, color)) in spans.iter().enumerate() {
                row[x] = if y >= top && y < bottom {
                    color
                } else {
                    background
                };
            }
        });

    slices
}
