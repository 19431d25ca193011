use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use shoreline_animate::{FrameHost, FrameLoop, ManualClock};
use shoreline_compose::{FOG_COLOR, assemble_seeded};
use shoreline_render::{DebugTextRenderer, Renderer};
use shoreline_scene::Scene;
use shoreline_tools::{DebugParam, DebugSurface, SceneInspector, params};
use shoreline_view::{PerspectiveCamera, Viewport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shoreline-cli", about = "CLI tool for the beach sunset diorama")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene defaults
    Info,
    /// Summarize an assembled scene
    Inspect {
        /// RNG seed for the rock layout
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Print the full node tree
        #[arg(long)]
        outline: bool,
        /// Show one node by name
        #[arg(long)]
        node: Option<String>,
    },
    /// Run the animation headless and print each frame
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "10")]
        frames: u64,
        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: f32,
        /// RNG seed for the rock layout
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Print every Nth frame
        #[arg(long, default_value = "1")]
        every: u64,
        /// List every drawable per frame
        #[arg(long)]
        verbose_draw: bool,
    },
    /// List debug parameters, optionally applying assignments first
    Params {
        /// `name=value` assignment, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        assignments: Vec<String>,
        /// Clamp assigned values to the slider range
        #[arg(long)]
        clamp: bool,
        /// RNG seed for the rock layout
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

/// Prints the text rendering of selected frames.
struct TextHost {
    renderer: DebugTextRenderer,
    camera: PerspectiveCamera,
    every: u64,
    drawn: u64,
}

impl FrameHost for TextHost {
    // The headless camera never moves.
    fn update_controls(&mut self) {}

    fn draw(&mut self, scene: &Scene) {
        let frame = self.renderer.render(scene, &self.camera);
        if self.drawn % self.every == 0 {
            print!("{frame}");
        }
        self.drawn += 1;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("shoreline-cli v{}", env!("CARGO_PKG_VERSION"));
            let camera = PerspectiveCamera::default();
            println!(
                "camera: fov={} near={} far={} eye=({}, {}, {})",
                camera.fov,
                camera.near,
                camera.far,
                camera.position.x,
                camera.position.y,
                camera.position.z
            );
            println!("atmosphere: #{:06x}", FOG_COLOR.to_hex());
            let scene = assemble_seeded(42);
            println!("{}", SceneInspector::summary(&scene));
        }
        Commands::Inspect {
            seed,
            outline,
            node,
        } => {
            let scene = assemble_seeded(seed);
            println!("Seed: {seed}");
            println!("{}", SceneInspector::summary(&scene));
            let fog = scene.atmosphere.fog();
            println!(
                "Fog: #{:06x} {:.1}..{:.1}",
                fog.color.to_hex(),
                fog.near,
                fog.far
            );

            if outline {
                for line in SceneInspector::outline(&scene.graph) {
                    println!("{line}");
                }
            }
            if let Some(name) = node {
                let Some(info) = SceneInspector::find(&scene.graph, &name) else {
                    bail!("no node named `{name}`");
                };
                println!("{info}");
            }
        }
        Commands::Simulate {
            frames,
            fps,
            seed,
            every,
            verbose_draw,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                bail!("--fps must be positive, got {fps}");
            }
            let dt = 1.0 / fps;
            let mut scene = assemble_seeded(seed);

            let mut camera = PerspectiveCamera::default();
            Viewport::new(1280.0, 800.0, 1.0).bind(&mut camera);
            let mut renderer = DebugTextRenderer::new();
            renderer.verbose = verbose_draw;
            let mut host = TextHost {
                renderer,
                camera,
                every: every.max(1),
                drawn: 0,
            };

            let mut frame_loop = FrameLoop::new(ManualClock::new());
            if frames == 0 {
                frame_loop.stop_signal().stop();
            }

            let _span = tracing::info_span!("simulate", seed, frames).entered();
            let mut remaining = frames;
            let ran = frame_loop.run(&mut scene, &mut host, |clock, stop| {
                remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    stop.stop();
                }
                clock.advance_by(dt);
            });

            let water = scene
                .graph
                .get(scene.handles.water)
                .map(|n| n.transform().position.y)
                .context("scene has no water node")?;
            println!(
                "Simulated {ran} frames over {:.3}s, water y={water:.4}",
                frame_loop.stats().elapsed
            );
        }
        Commands::Params {
            assignments,
            clamp,
            seed,
        } => {
            let mut scene = assemble_seeded(seed);
            let mut surface = DebugSurface::new(&mut scene);

            for assignment in &assignments {
                let (param, value) = params::parse(assignment)?;
                let value = if clamp {
                    param.spec().clamp(value)
                } else {
                    value
                };
                surface.set(param, value)?;
                println!("set {param} = {value}");
            }

            for (param, value) in surface.snapshot() {
                print_param(param, value);
            }
        }
    }

    Ok(())
}

fn print_param(param: DebugParam, value: f32) {
    let spec = param.spec();
    let folder = spec.folder.map(|f| format!("[{f}] ")).unwrap_or_default();
    println!(
        "{:<22} {:>8.3}  {folder}{} ({}..{}, step {})",
        spec.name, value, spec.label, spec.min, spec.max, spec.step
    );
}
