use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Frames-per-second sampled over one second windows, plus the duration of
/// the most recent render.
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_count: u32,
    fps: u32,
    window_start: Instant,
    last_render: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            frame_count: 0,
            fps: 0,
            window_start: start,
            last_render: Duration::ZERO,
        }
    }

    pub fn on_frame_rendered(&mut self, render_duration: Duration) -> bool {
        self.on_frame_rendered_at(Instant::now(), render_duration)
    }

    /// Records a frame finished at `now`. Returns `true` when a window
    /// closed and `current_fps` changed.
    pub fn on_frame_rendered_at(&mut self, now: Instant, render_duration: Duration) -> bool {
        self.last_render = render_duration;
        self.frame_count += 1;
        if now.saturating_duration_since(self.window_start) >= WINDOW {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.window_start = now;
            return true;
        }
        false
    }

    #[inline]
    pub fn current_fps(&self) -> u32 {
        self.fps
    }

    #[inline]
    pub fn last_render(&self) -> Duration {
        self.last_render
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
