use crate::Renderer;
use crate::draw_list::DrawList;
use shoreline_scene::Scene;
use shoreline_view::PerspectiveCamera;
use std::fmt::Write;

/// Renders a frame as plain text.
///
/// Used by the CLI for headless runs and by tests that want to look at what a
/// backend would receive.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
    /// List every drawable instead of just the summary.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self {
            frames: 0,
            verbose: true,
        }
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        self.frames += 1;
        let list = DrawList::extract(scene, camera);
        let mut out = String::new();

        // Writing into a String never fails.
        let _ = writeln!(
            out,
            "=== Frame {} (nodes={}, fingerprint={:016x}) ===",
            self.frames,
            scene.graph.len(),
            scene.graph.fingerprint()
        );
        let p = camera.position;
        let t = camera.target;
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            p.x, p.y, p.z, t.x, t.y, t.z, camera.fov, camera.aspect
        );
        let _ = writeln!(
            out,
            "Draws: opaque={} transparent={} casters={}",
            list.opaque.len(),
            list.transparent.len(),
            list.shadow_casters().count()
        );
        let fog = list.fog;
        let _ = writeln!(
            out,
            "Fog: #{:06x} {:.1}..{:.1} background=#{:06x}",
            fog.color.to_hex(),
            fog.near,
            fog.far,
            list.clear_color.to_hex()
        );

        if let Some(sun) = list.lights.sun {
            let d = sun.direction;
            let _ = writeln!(
                out,
                "Sun: dir=({:.3}, {:.3}, {:.3}) intensity={:.2} shadow={}",
                d.x,
                d.y,
                d.z,
                sun.intensity,
                sun.shadow_view_proj.is_some()
            );
        }
        for point in &list.lights.points {
            let q = point.position;
            let _ = writeln!(
                out,
                "  point {} #{:06x} pos=({:.2}, {:.2}, {:.2}) intensity={:.2}",
                point.node,
                point.color.to_hex(),
                q.x,
                q.y,
                q.z,
                point.intensity
            );
        }

        if self.verbose {
            for item in list.items() {
                let pos = item.model.transform_point3(glam::Vec3::ZERO);
                let _ = writeln!(
                    out,
                    "  [{}] {} {} pos=({:.2}, {:.2}, {:.2})",
                    item.node,
                    item.name,
                    item.mesh.geometry.kind_name(),
                    pos.x,
                    pos.y,
                    pos.z
                );
            }
        }

        out
    }
}
