use glam::{Mat4, Vec3};
use shoreline_common::Color;
use shoreline_scene::{Fog, LightKind, Mesh, NodeId, Scene, ShadowConfig, shadow};
use shoreline_view::PerspectiveCamera;

/// One mesh node, flattened to world space.
#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    pub node: NodeId,
    pub name: &'a str,
    pub model: Mat4,
    pub mesh: &'a Mesh,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Distance from the camera to the model origin.
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunLight {
    pub node: NodeId,
    /// Unit vector from the lit surface toward the light.
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub shadow: Option<ShadowConfig>,
    /// World-to-shadow-clip matrix when the light casts shadows.
    pub shadow_view_proj: Option<Mat4>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub node: NodeId,
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub casts_shadow: bool,
}

/// Lights collected from the graph, in world space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedLights {
    /// Sum of all ambient lights, linear RGB.
    pub ambient: [f32; 3],
    pub hemisphere: Option<HemisphereLight>,
    pub sun: Option<SunLight>,
    pub points: Vec<PointLight>,
}

/// Everything a backend needs for one frame.
///
/// Opaque items keep graph order. Transparent items are sorted back to front
/// so blending composes correctly.
#[derive(Debug, Clone)]
pub struct DrawList<'a> {
    pub opaque: Vec<DrawItem<'a>>,
    pub transparent: Vec<DrawItem<'a>>,
    pub lights: ResolvedLights,
    pub clear_color: Color,
    pub fog: Fog,
    pub view_proj: Mat4,
    pub view: Mat4,
    pub camera_position: Vec3,
}

impl<'a> DrawList<'a> {
    pub fn extract(scene: &'a Scene, camera: &PerspectiveCamera) -> Self {
        let graph = &scene.graph;
        let world = graph.world_matrices();
        let origin = |id: NodeId| world[id.index()].transform_point3(Vec3::ZERO);

        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        let mut lights = ResolvedLights::default();

        for (id, node) in graph.iter() {
            if let Some(mesh) = node.mesh() {
                let model = world[id.index()];
                let item = DrawItem {
                    node: id,
                    name: node.name(),
                    model,
                    mesh,
                    cast_shadow: node.cast_shadow(),
                    receive_shadow: node.receive_shadow(),
                    depth: origin(id).distance(camera.position),
                };
                if mesh.surface.is_transparent() {
                    transparent.push(item);
                } else {
                    opaque.push(item);
                }
                continue;
            }

            let Some(light) = node.light() else {
                continue;
            };
            match &light.kind {
                LightKind::Ambient => {
                    let [r, g, b] = light.color.to_linear();
                    lights.ambient[0] += r * light.intensity;
                    lights.ambient[1] += g * light.intensity;
                    lights.ambient[2] += b * light.intensity;
                }
                LightKind::Hemisphere { ground_color } => {
                    if lights.hemisphere.is_none() {
                        lights.hemisphere = Some(HemisphereLight {
                            sky: light.color,
                            ground: *ground_color,
                            intensity: light.intensity,
                        });
                    }
                }
                LightKind::Directional {
                    target,
                    shadow: config,
                } => {
                    if lights.sun.is_some() {
                        tracing::warn!(node = %id, "extra directional light ignored");
                        continue;
                    }
                    let direction = (origin(id) - *target)
                        .try_normalize()
                        .unwrap_or(Vec3::Y);
                    lights.sun = Some(SunLight {
                        node: id,
                        direction,
                        color: light.color,
                        intensity: light.intensity,
                        shadow: *config,
                        shadow_view_proj: shadow::directional_view_projection(graph, id),
                    });
                }
                LightKind::Point {
                    distance,
                    decay,
                    shadow,
                } => lights.points.push(PointLight {
                    node: id,
                    position: origin(id),
                    color: light.color,
                    intensity: light.intensity,
                    distance: *distance,
                    decay: *decay,
                    casts_shadow: shadow.is_some(),
                }),
            }
        }

        transparent.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        tracing::trace!(
            opaque = opaque.len(),
            transparent = transparent.len(),
            points = lights.points.len(),
            "draw list extracted"
        );

        Self {
            opaque,
            transparent,
            lights,
            clear_color: scene.atmosphere.background(),
            fog: *scene.atmosphere.fog(),
            view_proj: camera.view_projection(),
            view: camera.view_matrix(),
            camera_position: camera.position,
        }
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Opaque then transparent items, in draw order.
    pub fn items(&self) -> impl Iterator<Item = &DrawItem<'a>> {
        self.opaque.iter().chain(self.transparent.iter())
    }

    pub fn shadow_casters(&self) -> impl Iterator<Item = &DrawItem<'a>> {
        self.items().filter(|item| item.cast_shadow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shoreline_animate::advance;
    use shoreline_compose::{FOG_COLOR, RockScatter, assemble_seeded};

    #[test]
    fn every_mesh_is_drawn_once() {
        let scene = assemble_seeded(3);
        let camera = PerspectiveCamera::default();
        let list = DrawList::extract(&scene, &camera);

        let meshes = scene.graph.iter().filter(|(_, n)| n.mesh().is_some()).count();
        assert_eq!(list.len(), meshes);
        assert_eq!(list.transparent.len(), 1);
        assert_eq!(list.transparent[0].node, scene.handles.water);
        assert!(list.opaque.iter().all(|i| !i.mesh.surface.is_transparent()));
    }

    #[test]
    fn lights_are_resolved() {
        let scene = assemble_seeded(3);
        let list = DrawList::extract(&scene, &PerspectiveCamera::default());
        let lights = &list.lights;

        let sun = lights.sun.expect("sun");
        assert_eq!(sun.node, scene.handles.sun);
        assert!(sun.shadow_view_proj.is_some());
        assert!(sun.direction.y > 0.0);
        assert_relative_eq!(sun.direction.length(), 1.0, epsilon = 1e-5);

        assert!(lights.hemisphere.is_some());
        assert!(lights.ambient.iter().all(|c| *c > 0.0));
        assert_eq!(lights.points.len(), scene.handles.fireflies.len());
        assert!(lights.points.iter().all(|p| p.casts_shadow));
    }

    #[test]
    fn firefly_lights_follow_animation() {
        let mut scene = assemble_seeded(3);
        let camera = PerspectiveCamera::default();
        advance(&mut scene, 0.0);
        let before: Vec<Vec3> = DrawList::extract(&scene, &camera)
            .lights
            .points
            .iter()
            .map(|p| p.position)
            .collect();
        advance(&mut scene, 2.0);
        let list = DrawList::extract(&scene, &camera);
        for (old, new) in before.iter().zip(list.lights.points.iter()) {
            assert_ne!(*old, new.position);
        }
    }

    #[test]
    fn rock_items_share_geometry() {
        let scene = assemble_seeded(5);
        let list = DrawList::extract(&scene, &PerspectiveCamera::default());
        let rocks: Vec<_> = list
            .opaque
            .iter()
            .filter(|i| i.name.starts_with("rock_"))
            .collect();
        assert_eq!(rocks.len(), RockScatter::default().count);
        assert!(
            rocks
                .windows(2)
                .all(|w| std::sync::Arc::ptr_eq(&w[0].mesh.geometry, &w[1].mesh.geometry))
        );
    }

    #[test]
    fn clear_color_matches_fog() {
        let scene = assemble_seeded(1);
        let list = DrawList::extract(&scene, &PerspectiveCamera::default());
        assert_eq!(list.clear_color, FOG_COLOR);
        assert_eq!(list.clear_color, list.fog.color);
    }

    #[test]
    fn transparent_items_sorted_far_to_near() {
        let scene = assemble_seeded(1);
        let list = DrawList::extract(&scene, &PerspectiveCamera::default());
        assert!(list.transparent.windows(2).all(|w| w[0].depth >= w[1].depth));
        assert_eq!(list.shadow_casters().count(), list.items().filter(|i| i.cast_shadow).count());
    }
}
