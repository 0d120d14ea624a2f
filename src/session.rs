use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::caster::RayCaster;
use crate::config::Config;
use crate::error::SessionError;
use crate::frame::Frame;
use crate::grid::GridMap;
use crate::minimap::{self, MinimapLayout};
use crate::movement::{Command, Movement, MovementController};
use crate::renderer;
use crate::stats::FrameStats;
use crate::viewer::Viewer;

/// Values shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub fps: u32,
    pub draw_ms: u128,
}

/// Outcome of one `Session::render` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub elapsed: Duration,
    /// A stats window closed this frame; the HUD has fresh values to show.
    pub hud_updated: bool,
}

/// One viewer exploring one grid. Owns all per-session mutable state; the
/// grid itself is shared.
pub struct Session {
    grid: Arc<GridMap>,
    viewer: Viewer,
    controller: MovementController,
    caster: RayCaster,
    stats: FrameStats,
    config: Config,
    pending: Vec<Command>,
}

impl Session {
    pub fn new(grid: Arc<GridMap>, config: Config) -> Result<Self, SessionError> {
        config.validate()?;

        let [x, y] = config.spawn;
        if grid.is_wall_at(x, y) {
            return Err(SessionError::InvalidSpawn { x, y });
        }

        let caster = match config.max_distance {
            Some(max) => RayCaster::new(config.step_size, max),
            None => RayCaster::for_grid(&grid, config.step_size),
        };

        Ok(Self {
            viewer: Viewer::new(x, y, config.spawn_heading, config.fov),
            controller: MovementController::new(config.move_speed, config.rotate_speed),
            caster,
            stats: FrameStats::new(),
            pending: Vec::new(),
            grid,
            config,
        })
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn debug_rays(&self) -> bool {
        self.config.debug_rays
    }

    pub fn toggle_debug_rays(&mut self) -> bool {
        self.config.debug_rays = !self.config.debug_rays;
        self.config.debug_rays
    }

    /// Dispatches a command immediately.
    pub fn apply(&mut self, command: Command) -> Movement {
        let movement = self.controller.apply(&self.grid, self.viewer, command);
        if movement.rejected {
            log::debug!(
                "{:?} rejected at ({:.2}, {:.2})",
                command,
                self.viewer.pos[0],
                self.viewer.pos[1]
            );
        }
        self.viewer = movement.viewer;
        movement
    }

    /// Queues a command to run before the next frame.
    pub fn queue(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Applies queued commands in arrival order; returns how many ran.
    pub fn apply_pending(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        for &command in &pending {
            self.apply(command);
        }
        let applied = pending.len();
        // reuse the allocation
        self.pending = pending;
        self.pending.clear();
        applied
    }

    /// Draws the 3D view and minimap into `buf` and records frame timing.
    pub fn render(&mut self, buf: &mut [u32], width: usize, height: usize) -> RenderReport {
        let started = Instant::now();
        let viewer = self.viewer;

        let mut frame = Frame::new(buf, width, height);
        if frame.width() == 0 || frame.height() == 0 {
            return RenderReport {
                elapsed: Duration::ZERO,
                hud_updated: false,
            };
        }
        let width = frame.width();

        renderer::render_frame(&mut frame, &self.grid, &viewer, &self.caster, self.config.horizon);

        let layout = MinimapLayout::new(&self.grid, width, self.config.minimap_scale);
        minimap::render_minimap(&mut frame, &self.grid, &viewer, &layout);
        if self.config.debug_rays {
            minimap::draw_debug_rays(
                &mut frame,
                &self.grid,
                &viewer,
                &self.caster,
                &layout,
                width,
                self.config.debug_ray_every,
            );
        }

        let elapsed = started.elapsed();
        RenderReport {
            elapsed,
            hud_updated: self.record_frame(Instant::now(), elapsed),
        }
    }

    fn record_frame(&mut self, now: Instant, elapsed: Duration) -> bool {
        let closed = self.stats.on_frame_rendered_at(now, elapsed);
        if closed {
            log::info!(
                "FPS: {} (draw {} ms)",
                self.stats.current_fps(),
                elapsed.as_millis()
            );
        }
        closed
    }

    pub fn hud(&self) -> Hud {
        Hud {
            fps: self.stats.current_fps(),
            draw_ms: self.stats.last_render().as_millis(),
        }
    }
}
