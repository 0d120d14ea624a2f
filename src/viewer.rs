#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub pos: [f32; 2], // (x, y) in grid cells
    pub heading: f32,  // radians, not normalized
    pub fov: f32,      // horizontal field of view, radians
}

impl Viewer {
    pub fn new(x: f32, y: f32, heading: f32, fov: f32) -> Self {
        Self {
            pos: [x, y],
            heading,
            fov,
        }
    }

    /// Ray angle for screen column `column`, spreading the field of view
    /// linearly across the screen and centered on the heading.
    #[inline]
    pub fn ray_angle(&self, column: usize, screen_width: usize) -> f32 {
        if screen_width == 0 {
            return self.heading;
        }
        let t = column as f32 / screen_width as f32;
        self.heading + t * self.fov - 0.5 * self.fov
    }

    #[inline]
    pub fn direction(&self) -> [f32; 2] {
        [self.heading.cos(), self.heading.sin()]
    }

    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        (self.pos[0].floor() as i32, self.pos[1].floor() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn center_column_follows_heading() {
        let v = Viewer::new(3.5, 3.5, 1.25, FRAC_PI_4);
        assert!((v.ray_angle(320, 640) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn first_column_is_left_edge_of_fov() {
        let v = Viewer::new(0.0, 0.0, 0.0, FRAC_PI_4);
        assert!((v.ray_angle(0, 100) + FRAC_PI_4 / 2.0).abs() < 1e-6);
        assert!(v.ray_angle(99, 100) < FRAC_PI_4 / 2.0);
    }

    #[test]
    fn heading_is_not_assumed_normalized() {
        let v = Viewer::new(0.0, 0.0, 10.0 * std::f32::consts::PI, FRAC_PI_4);
        assert!((v.ray_angle(50, 100) - v.heading).abs() < 1e-5);
    }
}
