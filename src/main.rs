use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raycast2d::renderer::{Frame, Palette, render_frame};
use raycast2d::{Config, ObstacleSet, Point, SharedOrigin, cast_rays};

#[derive(Parser)]
#[command(name = "raycast2d")]
#[command(about = "Casts a fan of rays from the mouse cursor against random walls", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used if it does not exist
    #[arg(short, long, default_value = "raycast2d.toml")]
    config: PathBuf,
    /// Seed for obstacle generation
    #[arg(long)]
    seed: Option<u64>,
    /// Number of obstacle segments
    #[arg(long)]
    obstacles: Option<usize>,
    /// Rays per full turn
    #[arg(short, long)]
    resolution: Option<usize>,
    /// Length of a ray that hits nothing
    #[arg(long)]
    max_distance: Option<f32>,
    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.obstacles.seed = seed;
        }
        if let Some(count) = self.obstacles {
            config.obstacles.count = count;
        }
        if let Some(resolution) = self.resolution {
            config.rays.resolution = resolution;
        }
        if let Some(max_distance) = self.max_distance {
            config.rays.max_distance = max_distance;
        }
        if let Some(fps) = self.fps {
            config.render.fps = fps;
        }
    }
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    config: Config,
    obstacles: ObstacleSet,
    origin: SharedOrigin,
    palette: Palette,
    frame: Frame,

    // Frame pacing
    frame_interval: Duration,
    next_frame: Instant,

    // FPS report
    frame_counter: u32,
    last_fps_print: Instant,

    // Startup failure raised inside the event loop
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, obstacles: ObstacleSet) -> Self {
        let (w, h) = (config.canvas.width, config.canvas.height);
        let origin = SharedOrigin::new(Point::new(w as f32 * 0.5, h as f32 * 0.5));
        let palette = Palette::from(&config.render);
        let frame_interval = Duration::from_secs(1) / config.render.fps;

        Self {
            window: None,
            surface: None,
            obstacles,
            origin,
            palette,
            frame: Frame::new(w as usize, h as usize),
            frame_interval,
            next_frame: Instant::now(),
            frame_counter: 0,
            last_fps_print: Instant::now(),
            fatal: None,
            config,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.canvas.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.canvas.width,
                self.config.canvas.height,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("failed to create window: {e}"))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer surface: {e}"))?;

        let size = window.inner_size();
        info!("Window created at {}x{}", size.width, size.height);
        self.frame.resize(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, id: WindowId) {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // Minimized window, skip drawing
        };
        if let Err(e) = surface.resize(dw, dh) {
            warn!("Failed to resize surface: {e}");
            return;
        }
        self.frame.resize(size.width as usize, size.height as usize);

        // One snapshot per frame; input may move the origin while we draw
        let origin = self.origin.load();
        let rays = match cast_rays(
            origin,
            &self.obstacles,
            self.config.rays.resolution,
            self.config.rays.max_distance,
        ) {
            Ok(rays) => rays,
            Err(e) => {
                warn!("Skipping frame: {e}");
                return;
            }
        };

        render_frame(&mut self.frame, &self.obstacles, &rays, &self.palette);

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(e) => {
                warn!("Failed to get surface buffer: {e}");
                return;
            }
        };
        buf.copy_from_slice(self.frame.pixels());
        if let Err(e) = buf.present() {
            warn!("Failed to present frame: {e}");
        }

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            error!("{e:#}");
            self.fatal = Some(e);
            event_loop.exit();
            return;
        }
        self.next_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                info!("Escape pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.origin
                    .store(Point::new(position.x as f32, position.y as f32));
            }

            WindowEvent::RedrawRequested => self.redraw(id),

            WindowEvent::Resized(new_size) => {
                debug!("Resized to {}x{}", new_size.width, new_size.height);
                self.frame
                    .resize(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame += self.frame_interval;
            // Fell behind; don't try to catch up with a burst of frames
            if self.next_frame < now {
                self.next_frame = now + self.frame_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply(&mut config);
    config.validate()?;

    let obstacles = ObstacleSet::from_seed(
        config.obstacles.count,
        config.canvas.width,
        config.canvas.height,
        config.obstacles.seed,
    );
    info!(
        "Generated {} obstacles from seed {}",
        obstacles.len(),
        config.obstacles.seed
    );

    let event_loop = EventLoop::new().map_err(|e| anyhow!("failed to create event loop: {e}"))?;
    let mut app = App::new(config, obstacles);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop failed: {e}"))?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
