use crate::config::DesktopConfig;
use glam::Vec2;
use shoreline_animate::{FrameHost, FrameLoop, FrameOutcome, SystemClock};
use shoreline_compose::{assemble_seeded, assemble_unseeded};
use shoreline_input::{OrbitControls, PointerAction, PointerButton, PointerTracker};
use shoreline_render_wgpu::{GpuContext, WgpuRenderer};
use shoreline_scene::Scene;
use shoreline_tools::{DebugParam, DebugSurface, SUN_FOLDER, SceneInspector};
use shoreline_view::{PerspectiveCamera, SurfaceSize, Viewport};

/// Everything the running diorama owns.
pub struct AppState {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub frames: FrameLoop<SystemClock>,
    pointer: PointerTracker,
    pub show_panel: bool,
}

impl AppState {
    pub fn new(config: &DesktopConfig) -> Self {
        let scene = match config.seed {
            Some(seed) => assemble_seeded(seed),
            None => assemble_unseeded(),
        };
        let mut camera = PerspectiveCamera::default();
        let viewport = Viewport::new(config.width as f32, config.height as f32, 1.0);
        viewport.bind(&mut camera);

        Self {
            scene,
            controls: OrbitControls::new(camera.target),
            camera,
            viewport,
            frames: FrameLoop::new(SystemClock::start()),
            pointer: PointerTracker::new(),
            show_panel: config.show_panel,
        }
    }

    /// Window resized or moved to a display with another scale factor.
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f32) -> SurfaceSize {
        self.viewport
            .resize_physical(width, height, scale_factor, &mut self.camera)
    }

    /// Window height in physical pixels, the unit winit reports cursor motion in.
    fn physical_height(&self) -> f32 {
        self.viewport.height() * self.viewport.device_pixel_ratio()
    }

    pub fn pointer_button(&mut self, button: PointerButton, pressed: bool) {
        self.pointer.button(button, pressed);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(action) = self.pointer.moved(position) {
            self.queue_action(action);
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    pub fn wheel_lines(&mut self, lines: f32) {
        let action = self.pointer.wheel_lines(lines);
        self.queue_action(action);
    }

    pub fn wheel_pixels(&mut self, pixels: f32) {
        let action = self.pointer.wheel_pixels(pixels);
        self.queue_action(action);
    }

    fn queue_action(&mut self, action: PointerAction) {
        let height = self.physical_height();
        self.controls.apply(action, &self.camera, height);
    }

    pub fn toggle_panel(&mut self) {
        self.show_panel = !self.show_panel;
        tracing::debug!(show_panel = self.show_panel, "debug panel toggled");
    }

    /// Pose, poll controls and draw the scene into `view`.
    pub fn redraw(
        &mut self,
        gpu: &GpuContext,
        renderer: &mut WgpuRenderer,
        view: &wgpu::TextureView,
    ) -> FrameOutcome {
        let mut host = SceneFrame {
            camera: &mut self.camera,
            controls: &mut self.controls,
            gpu,
            renderer,
            view,
        };
        self.frames.run_frame(&mut self.scene, &mut host)
    }

    pub fn draw_ui(&mut self, ctx: &egui::Context) {
        if !self.show_panel {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);
        let stats = self.frames.stats();

        egui::SidePanel::right("debug_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Beach Sunset");
                ui.label(format!("FPS: {:.1}", stats.fps));
                ui.label(format!("Frame: {}  t={:.2}s", stats.frame, stats.elapsed));

                ui.separator();
                ui.heading("Lighting");
                let mut surface = DebugSurface::new(&mut self.scene);
                param_slider(ui, &mut surface, DebugParam::AmbientIntensity);
                egui::CollapsingHeader::new(SUN_FOLDER)
                    .default_open(true)
                    .show(ui, |ui| {
                        for param in DebugParam::ALL {
                            if param.spec().folder == Some(SUN_FOLDER) {
                                param_slider(ui, &mut surface, param);
                            }
                        }
                    });
                param_slider(ui, &mut surface, DebugParam::HemisphereIntensity);

                ui.separator();
                ui.heading("Scene");
                ui.label(format!(
                    "Nodes: {}  Groups: {}  Meshes: {}",
                    summary.nodes, summary.groups, summary.meshes
                ));
                ui.label(format!(
                    "Lights: {}  Shadow casters: {}",
                    summary.lights, summary.shadow_casters
                ));
                if summary.uncovered_casters > 0 {
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        format!("{} casters outside the sun frustum", summary.uncovered_casters),
                    );
                }
                ui.monospace(format!("{:016x}", summary.fingerprint));

                ui.separator();
                ui.heading("Camera");
                let p = self.camera.position;
                let t = self.camera.target;
                ui.label(format!("Eye: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                ui.label(format!("Target: ({:.2}, {:.2}, {:.2})", t.x, t.y, t.z));
                ui.label(format!(
                    "Viewport: {:.0}x{:.0} @{:.2}x",
                    self.viewport.width(),
                    self.viewport.height(),
                    self.viewport.pixel_ratio()
                ));

                ui.separator();
                ui.small("F1: Toggle Panel | LMB: Orbit | RMB: Pan | Wheel: Zoom");
            });
    }
}

fn param_slider(ui: &mut egui::Ui, surface: &mut DebugSurface<'_>, param: DebugParam) {
    let spec = param.spec();
    match surface.field_mut(param) {
        Ok(field) => {
            let response = ui.add(
                egui::Slider::new(&mut *field, spec.range())
                    .step_by(spec.step as f64)
                    .text(spec.label),
            );
            if response.changed() {
                tracing::debug!(param = spec.name, value = *field, "slider moved");
            }
        }
        Err(err) => {
            ui.label(err.to_string());
        }
    }
}

/// The host half of one frame: orbit damping, then the GPU draw.
struct SceneFrame<'a> {
    camera: &'a mut PerspectiveCamera,
    controls: &'a mut OrbitControls,
    gpu: &'a GpuContext,
    renderer: &'a mut WgpuRenderer,
    view: &'a wgpu::TextureView,
}

impl FrameHost for SceneFrame<'_> {
    fn update_controls(&mut self) {
        self.controls.update(self.camera);
    }

    fn draw(&mut self, scene: &Scene) {
        self.renderer.render(
            &self.gpu.device,
            &self.gpu.queue,
            self.view,
            scene,
            self.camera,
        );
    }
}
