/// Drawing target over a row-major 0RGB pixel buffer, as handed out by
/// softbuffer. All primitives clip to the buffer.
pub struct Frame<'a> {
    buf: &'a mut [u32],
    width: usize,
    height: usize,
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory, alpha left at 0
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

#[inline]
pub fn gray(level: u8) -> u32 {
    pack_rgb(level, level, level)
}

impl<'a> Frame<'a> {
    /// Wraps `buf`; only the first `width * height` pixels are used.
    pub fn new(buf: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width == 0 {
            0
        } else {
            height.min(buf.len() / width)
        };
        Self { buf, width, height }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.buf[..self.width * self.height]
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.buf[..self.width * self.height]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    /// Fills `w x h` pixels at `(x, y)`; negative origins are clipped.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x.saturating_add(w)).clamp(0, self.width as i32) as usize;
        let y1 = (y.saturating_add(h)).clamp(0, self.height as i32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let start = row * self.width;
            self.buf[start + x0..start + x1].fill(color);
        }
    }

    /// Bresenham line, endpoints included.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let mut x = x0;
        let mut y = y0;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let max_steps = (dx as usize + (-dy) as usize + 1).min(16_384);
        for _ in 0..max_steps {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
