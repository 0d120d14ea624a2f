use crate::caster::RayCaster;
use crate::frame::{Frame, pack_rgb};
use crate::grid::{Cell, GridMap};
use crate::viewer::Viewer;

const MARGIN: usize = 10;
const MARKER_SIZE: i32 = 4;

/// Placement of the minimap on screen. Rebuilt every frame so a resized
/// window keeps it pinned to the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimapLayout {
    pub origin: (i32, i32),
    pub scale: usize,
    pub size: (usize, usize),
}

impl MinimapLayout {
    pub fn new(grid: &GridMap, screen_width: usize, scale: usize) -> Self {
        let scale = scale.max(1);
        let size = (grid.width() * scale, grid.height() * scale);
        let x = screen_width.saturating_sub(size.0 + MARGIN);
        Self {
            origin: (x as i32, MARGIN as i32),
            scale,
            size,
        }
    }

    /// Screen position of a world point (in grid cells).
    #[inline]
    pub fn to_screen(&self, p: [f32; 2]) -> (i32, i32) {
        let s = self.scale as f32;
        (
            self.origin.0 + (p[0] * s).floor() as i32,
            self.origin.1 + (p[1] * s).floor() as i32,
        )
    }
}

pub fn render_minimap(frame: &mut Frame<'_>, grid: &GridMap, viewer: &Viewer, layout: &MinimapLayout) {
    let (ox, oy) = layout.origin;
    let scale = layout.scale as i32;

    frame.fill_rect(ox, oy, layout.size.0 as i32, layout.size.1 as i32, pack_rgb(0, 0, 0));

    let wall = pack_rgb(255, 255, 255);
    let open = pack_rgb(128, 128, 128);
    for (y, row) in grid.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let color = match cell {
                Cell::Wall => wall,
                Cell::Open => open,
            };
            frame.fill_rect(ox + x as i32 * scale, oy + y as i32 * scale, scale, scale, color);
        }
    }

    let (px, py) = layout.to_screen(viewer.pos);
    frame.fill_rect(
        px - MARKER_SIZE / 2,
        py - MARKER_SIZE / 2,
        MARKER_SIZE,
        MARKER_SIZE,
        pack_rgb(0, 0, 255),
    );
}

/// Overlays every `every`-th column's ray on the minimap, re-cast with the
/// same sampling as the 3D view. Returns the number of rays drawn.
pub fn draw_debug_rays(
    frame: &mut Frame<'_>,
    grid: &GridMap,
    viewer: &Viewer,
    caster: &RayCaster,
    layout: &MinimapLayout,
    screen_width: usize,
    every: usize,
) -> usize {
    let color = pack_rgb(255, 0, 0);
    let (sx, sy) = layout.to_screen(viewer.pos);
    let mut drawn = 0;
    for column in (0..screen_width).step_by(every.max(1)) {
        let ray = caster.sample_column(grid, viewer, column, screen_width);
        let (ex, ey) = layout.to_screen(ray.end(viewer.pos));
        frame.draw_line(sx, sy, ex, ey, color);
        drawn += 1;
    }
    drawn
}
