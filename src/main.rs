use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, info, trace};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::cli::{Cli, Filter};
use crate::clock::{RateCounter, TickClock};
use crate::framebuffer::{FrameChain, Framebuffer};
use crate::player::Intents;
use crate::renderer::Renderer;
use crate::scaler::ScaleLut;
use crate::texture::{Texture, TextureId, TextureSet};
use crate::world::{Player, World};

mod camera;
mod cli;
mod clock;
mod demo;
mod error;
mod framebuffer;
mod player;
mod renderer;
mod scaler;
mod texture;
mod trig;
mod world;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    window_size: LogicalSize<f64>,
    world: World,
    textures: TextureSet,
    renderer: Renderer,

    // Internal frame pair, stretched onto the window
    frames: FrameChain,
    scale_lut: ScaleLut,
    filter: Filter,

    // Input and pacing
    keys_down: HashSet<KeyCode>,
    clock: TickClock,
    rates: RateCounter,

    // First failure inside the event loop, reported from main
    error: Option<anyhow::Error>,
}

impl App {
    fn new(cli: &Cli, world: World, textures: TextureSet) -> Self {
        let now = Instant::now();
        let (w, h) = (cli.width as usize, cli.height as usize);
        let mut app = Self {
            window: None,
            surface: None,
            window_size: LogicalSize::new(
                f64::from(cli.width * cli.scale),
                f64::from(cli.height * cli.scale),
            ),
            world,
            textures,
            renderer: Renderer::new(cli.fov),
            frames: FrameChain::new(w, h),
            scale_lut: ScaleLut::empty(),
            filter: cli.filter,
            keys_down: HashSet::new(),
            clock: TickClock::new(cli.tick_rate, now),
            rates: RateCounter::new(now),
            error: None,
        };
        app.render();
        app
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Sector Raster")
            .with_inner_size(self.window_size);

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("failed to create window: {e}"))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer surface: {e}"))?;

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    /// Runs the ticks due now; renders and schedules a redraw if any ran.
    fn step(&mut self, now: Instant) {
        let ticks = self.clock.advance(now);
        let intents = intents(&self.keys_down);
        for _ in 0..ticks {
            player::tick(&mut self.world.player, &intents, self.renderer.trig());
        }

        let mut frames = 0;
        if ticks > 0 {
            self.render();
            frames = 1;
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        self.rates.record(ticks, frames);
        if let Some((ticks, frames)) = self.rates.poll(now) {
            info!("{ticks} ticks, {frames} fps");
        }
    }

    fn render(&mut self) {
        let stats = self
            .renderer
            .render_frame(self.frames.back_mut(), &self.world, &self.textures);
        self.frames.swap();
        trace!("frame: {stats:?}");
    }

    /// Stretches the completed frame onto the window.
    fn present(&mut self, id: WindowId) -> Result<()> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            debug!("window minimised, skipping present");
            return Ok(());
        };
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow!("failed to resize surface: {e}"))?;

        let (dw, dh) = (dw.get() as usize, dh.get() as usize);
        if self.scale_lut.dst_size() != (dw, dh) {
            let front = self.frames.front();
            self.scale_lut = scaler::build_scale_lut(dw, dh, front.width(), front.height());
        }

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("failed to map surface buffer: {e}"))?;
        scaler::blit(&mut buf, dw, self.frames.front(), &self.scale_lut, self.filter);
        buf.present()
            .map_err(|e| anyhow!("failed to present frame: {e}"))?;
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested, stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed if code == KeyCode::Escape => {
                    info!("escape pressed, stopping");
                    event_loop.exit();
                }
                ElementState::Pressed => {
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.present(id) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.step(Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }
}

/// Samples the held keys into this tick's intents.
fn intents(keys: &HashSet<KeyCode>) -> Intents {
    Intents {
        move_forward: keys.contains(&KeyCode::KeyW),
        move_back: keys.contains(&KeyCode::KeyS),
        turn_left: keys.contains(&KeyCode::KeyA),
        turn_right: keys.contains(&KeyCode::KeyD),
        strafe_left: keys.contains(&KeyCode::Comma),
        strafe_right: keys.contains(&KeyCode::Period),
        modifier: keys.contains(&KeyCode::KeyM),
    }
}

/// Built-in textures, with `--texture` files replacing slots in order.
fn load_textures(paths: &[impl AsRef<Path>]) -> Result<TextureSet> {
    let mut textures = demo::textures();
    for (slot, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let texture = Texture::open(path)?;
        debug!(
            "texture slot {slot}: {} ({}x{})",
            path.display(),
            texture.width(),
            texture.height()
        );
        textures.replace(TextureId(slot), texture);
    }
    Ok(textures)
}

fn screenshot(cli: &Cli, world: &World, textures: &TextureSet, path: &Path) -> Result<()> {
    let mut fb = Framebuffer::new(cli.width as usize, cli.height as usize);
    let stats = Renderer::new(cli.fov).render_frame(&mut fb, world, textures);
    debug!("frame: {stats:?}");

    let img = image::RgbImage::from_raw(cli.width, cli.height, fb.as_bytes().to_vec())
        .context("frame size does not match image dimensions")?;
    img.save(path)
        .with_context(|| format!("failed to write screenshot {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let textures = load_textures(&cli.textures)?;
    let mut level = demo::level();
    if let Some(pose) = cli.pose {
        level.player = Player::new(pose.x, pose.y, pose.z, pose.angle, pose.look);
    }
    let world = World::load(level, &textures).context("level failed validation")?;
    info!(
        "level loaded: {} sectors, {} walls, {} textures",
        world.sectors.len(),
        world.walls.len(),
        textures.len()
    );

    if let Some(path) = &cli.screenshot {
        return screenshot(&cli, &world, &textures, path);
    }

    let event_loop = EventLoop::new().map_err(|e| anyhow!("failed to create event loop: {e}"))?;
    let mut app = App::new(&cli, world, textures);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop failed: {e}"))?;

    match app.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
