use shoreline_scene::{NodeId, NodeKind, Scene, SceneGraph, shadow};

/// Read-only queries against a scene for the debug panel and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene) -> SceneSummary {
        let graph = &scene.graph;
        let mut summary = SceneSummary {
            nodes: graph.len(),
            groups: 0,
            meshes: 0,
            lights: 0,
            shadow_casters: 0,
            shadow_lights: 0,
            shared_shapes: 0,
            uncovered_casters: shadow::uncovered_casters(graph, scene.handles.sun).len(),
            fingerprint: graph.fingerprint(),
        };

        let mut shapes = Vec::new();
        for (_, node) in graph.iter() {
            match node.kind() {
                NodeKind::Group => summary.groups += 1,
                NodeKind::Mesh(mesh) => {
                    summary.meshes += 1;
                    if node.cast_shadow() {
                        summary.shadow_casters += 1;
                    }
                    let ptr = std::sync::Arc::as_ptr(&mesh.geometry);
                    if !shapes.contains(&ptr) {
                        shapes.push(ptr);
                    }
                }
                NodeKind::Light(light) => {
                    summary.lights += 1;
                    if light.casts_shadow() {
                        summary.shadow_lights += 1;
                    }
                }
            }
        }
        summary.shared_shapes = summary.meshes - shapes.len();
        summary
    }

    /// Inspect one node by id.
    pub fn inspect(graph: &SceneGraph, id: NodeId) -> Option<NodeInfo> {
        let node = graph.get(id)?;
        let kind = match node.kind() {
            NodeKind::Group => "group".to_string(),
            NodeKind::Mesh(mesh) => mesh.geometry.kind_name().to_string(),
            NodeKind::Light(light) => format!("{} light", light.kind_name()),
        };
        let world = graph.world_matrix(id).transform_point3(glam::Vec3::ZERO);
        let t = node.transform();
        Some(NodeInfo {
            id,
            name: node.name().to_string(),
            kind,
            position: t.position.to_array(),
            rotation: t.rotation.to_array(),
            scale: t.scale.to_array(),
            world_position: world.to_array(),
            children: node.children().len(),
        })
    }

    /// Inspect the first node called `name`.
    pub fn find(graph: &SceneGraph, name: &str) -> Option<NodeInfo> {
        Self::inspect(graph, graph.find(name)?)
    }

    /// Every node as one indented line per depth level.
    pub fn outline(graph: &SceneGraph) -> Vec<String> {
        let mut lines = Vec::with_capacity(graph.len());
        let mut stack = vec![(graph.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if let Some(info) = Self::inspect(graph, id) {
                lines.push(format!("{}{} {} ({})", "  ".repeat(depth), id, info.name, info.kind));
            }
            for child in graph.children(id).iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        lines
    }
}

/// Counts over the whole scene graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    pub nodes: usize,
    pub groups: usize,
    pub meshes: usize,
    pub lights: usize,
    pub shadow_casters: usize,
    pub shadow_lights: usize,
    /// Meshes reusing a shape already used by another mesh.
    pub shared_shapes: usize,
    /// Shadow casters outside the sun's shadow frustum.
    pub uncovered_casters: usize,
    pub fingerprint: u64,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} groups={} meshes={} lights={} casters={} shadow_lights={} uncovered={} fingerprint={:016x}",
            self.nodes,
            self.groups,
            self.meshes,
            self.lights,
            self.shadow_casters,
            self.shadow_lights,
            self.uncovered_casters,
            self.fingerprint
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    pub kind: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub world_position: [f32; 3],
    pub children: usize,
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}) pos=({:.2}, {:.2}, {:.2}) world=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) children={}",
            self.id,
            self.name,
            self.kind,
            self.position[0],
            self.position[1],
            self.position[2],
            self.world_position[0],
            self.world_position[1],
            self.world_position[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
            self.children,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoreline_compose::{FIREFLY_COLORS, RockScatter, assemble_seeded};

    #[test]
    fn summary_counts_the_beach() {
        let scene = assemble_seeded(11);
        let summary = SceneInspector::summary(&scene);

        let rocks = RockScatter::default().count;
        // Trunk and fronds per tree, pole and canopy per umbrella, sand, water, rocks.
        assert_eq!(summary.meshes, 4 * 2 + 3 * 2 + 2 + rocks);
        // Ambient, sun, hemisphere and the fireflies.
        assert_eq!(summary.lights, 3 + FIREFLY_COLORS.len());
        assert_eq!(summary.shadow_lights, 1 + FIREFLY_COLORS.len());
        assert_eq!(summary.shadow_casters, 4 * 2 + 3 * 2 + rocks);
        assert_eq!(summary.uncovered_casters, 0);
        // Rocks all reuse the first rock's shape.
        assert_eq!(summary.shared_shapes, rocks - 1);
        assert_eq!(
            summary.nodes,
            summary.groups + summary.meshes + summary.lights
        );
    }

    #[test]
    fn summary_display() {
        let scene = assemble_seeded(11);
        let s = SceneInspector::summary(&scene).to_string();
        assert!(s.starts_with("Scene: nodes="));
        assert!(s.contains("uncovered=0"));
    }

    #[test]
    fn inspect_reports_world_position() {
        let scene = assemble_seeded(11);
        let trunk = scene.graph.children(scene.palm_trees()[0])[0];
        let info = SceneInspector::inspect(&scene.graph, trunk).unwrap();
        assert_eq!(info.name, "trunk");
        assert_eq!(info.kind, "cylinder");
        assert!(info.world_position[0] < -7.0);
        assert!(info.world_position[1] > 1.0);

        let sun = SceneInspector::find(&scene.graph, "sun").unwrap();
        assert_eq!(sun.kind, "directional light");
        assert!(SceneInspector::find(&scene.graph, "lighthouse").is_none());
    }

    #[test]
    fn outline_lists_every_node_once() {
        let scene = assemble_seeded(11);
        let lines = SceneInspector::outline(&scene.graph);
        assert_eq!(lines.len(), scene.graph.len());
        assert!(lines[0].starts_with("#0 scene"));
        assert!(lines.iter().any(|l| l.starts_with("    ") && l.contains("rock_0")));
    }
}
