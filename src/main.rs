use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use grid_raycaster::{Command, Config, GridMap, Session};

const TITLE: &str = "Grid Raycaster";

/// First-person ray casting over a 2D grid map.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Map file: one row per line, `1`/`#` walls, `0`/`.` open cells.
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,
    /// Ray march step in grid cells. Smaller is smoother and slower.
    #[arg(long, value_name = "CELLS", default_value_t = 0.01)]
    step: f32,
    /// Distance at which walls fade to black.
    #[arg(long, value_name = "CELLS", default_value_t = 12.0)]
    horizon: f32,
    /// Upper bound on ray length (defaults to the map diagonal).
    #[arg(long, value_name = "CELLS")]
    max_distance: Option<f32>,
    /// Horizontal field of view in degrees.
    #[arg(long, value_name = "DEGREES", default_value_t = 45.0)]
    fov: f32,
    /// Cells moved per forward/backward key press.
    #[arg(long, value_name = "CELLS", default_value_t = 0.1)]
    move_speed: f32,
    /// Radians turned per left/right key press.
    #[arg(long, value_name = "RADIANS", default_value_t = 0.05)]
    rotate_speed: f32,
    /// Pixels per grid cell on the minimap.
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = 25,
        value_parser = clap::value_parser!(u32).range(1..=200)
    )]
    minimap_scale: u32,
    /// Start with the minimap debug rays hidden (toggle with R).
    #[arg(long)]
    no_debug_rays: bool,
    /// Spawn position as X,Y in grid cells.
    #[arg(long, value_name = "X,Y", value_delimiter = ',', num_args = 2, default_values_t = [3.5, 3.5])]
    spawn: Vec<f32>,
    /// Initial heading in radians.
    #[arg(long, value_name = "RADIANS", default_value_t = 0.0, allow_hyphen_values = true)]
    heading: f32,
}

impl CliArgs {
    fn to_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            step_size: self.step,
            horizon: self.horizon,
            max_distance: self.max_distance,
            fov: self.fov.to_radians(),
            move_speed: self.move_speed,
            rotate_speed: self.rotate_speed,
            minimap_scale: self.minimap_scale as usize,
            debug_rays: !self.no_debug_rays,
            spawn: match self.spawn.as_slice() {
                &[x, y] => [x, y],
                _ => defaults.spawn,
            },
            spawn_heading: self.heading,
            ..defaults
        }
    }
}

fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Command::MoveForward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Command::MoveBackward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Command::TurnLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Command::TurnRight),
        _ => None,
    }
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    session: Session,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            window: None,
            surface: None,
            session,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(1024.0, 640.0));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow::anyhow!("create window: {e}"))?,
        );

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

        let size = window.inner_size();
        log::info!("window created at {}x{}", size.width, size.height);

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        // Input arrives between frames; apply it before taking the snapshot
        self.session.apply_pending();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };

        surface
            .resize(w, h)
            .map_err(|e| anyhow::anyhow!("resize surface: {e}"))?;

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("buffer_mut: {e}"))?;
        let report = self
            .session
            .render(&mut buf, size.width as usize, size.height as usize);
        buf.present()
            .map_err(|e| anyhow::anyhow!("present: {e}"))?;

        if report.hud_updated {
            let hud = self.session.hud();
            window.set_title(&format!("{TITLE} - FPS: {} - Draw: {}ms", hud.fps, hud.draw_ms));
        }
        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            log::error!("{e:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyR if !repeat => {
                    let on = self.session.toggle_debug_rays();
                    log::info!("debug rays {}", if on { "on" } else { "off" });
                }
                // OS key repeat arrives as further presses
                code => {
                    if let Some(command) = command_for(code) {
                        self.session.queue(command);
                    }
                }
            },

            WindowEvent::RedrawRequested => {
                // A bad frame is logged and the next one is tried
                if let Err(e) = self.redraw(id) {
                    log::warn!("frame skipped: {e:#}");
                }
            }

            WindowEvent::Resized(new_size) => {
                log::debug!("resized to {}x{}", new_size.width, new_size.height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let grid = match &args.map {
        Some(path) => GridMap::load(path)
            .with_context(|| format!("loading map {}", path.display()))?,
        None => GridMap::default_level(),
    };
    log::info!("map {}x{}", grid.width(), grid.height());

    let config = args.to_config();
    log::info!(
        "step {} horizon {} fov {:.3} rad minimap x{}",
        config.step_size,
        config.horizon,
        config.fov,
        config.minimap_scale
    );
    let session = Session::new(Arc::new(grid), config).context("starting session")?;

    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("create event loop: {e}"))?;
    // about_to_wait keeps requesting redraws, so Wait still renders continuously
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(session);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow::anyhow!("event loop: {e}"))?;
    Ok(())
}
