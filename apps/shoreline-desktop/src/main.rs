mod config;
mod state;

use anyhow::Result;
use clap::Parser;
use config::{DesktopConfig, Overrides};
use egui::Context as EguiContext;
use glam::Vec2;
use shoreline_animate::FrameOutcome;
use shoreline_input::PointerButton;
use shoreline_render_wgpu::{GpuContext, WgpuRenderer};
use state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "shoreline-desktop", about = "Beach sunset diorama")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for the rock layout (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long)]
    height: Option<u32>,
}

/// Window-bound resources, created on the first `resumed`.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Graphics {
    fn new(
        event_loop: &ActiveEventLoop,
        config: &DesktopConfig,
        state: &mut AppState,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let scale = window.scale_factor() as f32;
        let surface_size = state.resize(size.width, size.height, scale);

        let gpu = GpuContext::new(window.clone(), surface_size)?;
        let renderer = WgpuRenderer::new(&gpu.device, gpu.format(), gpu.size());

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(scale),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        Ok(Self {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, state: &mut AppState, size: PhysicalSize<u32>) {
        let scale = self.window.scale_factor() as f32;
        let surface = state.resize(size.width, size.height, scale);
        if self.gpu.resize(surface) {
            self.renderer.resize(&self.gpu.device, self.gpu.size());
        }
    }

    /// One frame: the scene through the frame loop, then the debug panel on top.
    fn redraw(&mut self, state: &mut AppState, egui_ctx: &EguiContext) -> FrameOutcome {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                return FrameOutcome::Continue;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return FrameOutcome::Continue;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let outcome = state.redraw(&self.gpu, &mut self.renderer, &view);
        if outcome == FrameOutcome::Stopped {
            return outcome;
        }

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        // The surface may be smaller than the window when the pixel ratio is capped.
        let size = self.gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point * state.viewport.pixel_ratio()
                / state.viewport.device_pixel_ratio(),
        };

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.window.pre_present_notify();
        output.present();
        outcome
    }
}

struct DesktopApp {
    config: DesktopConfig,
    state: AppState,
    egui_ctx: EguiContext,
    graphics: Option<Graphics>,
    /// Startup failure, surfaced from `main` once the event loop returns.
    error: Option<anyhow::Error>,
}

impl DesktopApp {
    fn new(config: DesktopConfig) -> Self {
        Self {
            state: AppState::new(&config),
            config,
            egui_ctx: EguiContext::default(),
            graphics: None,
            error: None,
        }
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match Graphics::new(event_loop, &self.config, &mut self.state, &self.egui_ctx) {
            Ok(graphics) => {
                tracing::info!(
                    width = graphics.gpu.size().width,
                    height = graphics.gpu.size().height,
                    pixel_ratio = self.state.viewport.pixel_ratio(),
                    "window ready"
                );
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(err) => {
                tracing::error!("startup failed: {err:#}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        let consumed = graphics
            .egui_winit
            .on_window_event(&graphics.window, &event)
            .consumed;

        match event {
            WindowEvent::CloseRequested => {
                self.state.frames.stop_signal().stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                graphics.resize(&mut self.state, size);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = graphics.window.inner_size();
                graphics.resize(&mut self.state, size);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::F1),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed => {
                self.state.toggle_panel();
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                // Releases always go through so a drag that ends over the panel stops.
                if consumed && pressed {
                    return;
                }
                if let Some(button) = pointer_button(button) {
                    self.state.pointer_button(button, pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.pointer_left();
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.state.wheel_lines(y),
                MouseScrollDelta::PixelDelta(p) => self.state.wheel_pixels(p.y as f32),
            },
            WindowEvent::RedrawRequested => {
                let _span = tracing::trace_span!("redraw").entered();
                if graphics.redraw(&mut self.state, &self.egui_ctx) == FrameOutcome::Stopped {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => DesktopConfig::load(path)?,
        None => DesktopConfig::default(),
    };
    let config = file.with_overrides(&Overrides {
        seed: cli.seed,
        width: cli.width,
        height: cli.height,
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter(cli.verbose)))
        .init();

    tracing::info!(
        title = %config.title,
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        "shoreline-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(config);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.error.take() {
        return Err(err);
    }
    Ok(())
}
