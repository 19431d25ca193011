use crate::builders::{palm_tree, umbrella};
use crate::rocks::RockScatter;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shoreline_common::{Color, Transform};
use shoreline_scene::{
    Atmosphere, Blueprint, FIREFLY_COUNT, Fog, Light, Mesh, NodeId, Scene, SceneGraphBuilder,
    SceneHandles, ShadowConfig, Shape, Surface,
};
use std::f32::consts::FRAC_PI_2;

/// Sunset haze; also the clear color.
pub const FOG_COLOR: Color = Color::from_hex(0xffa07a);

/// Hand-placed palm trees as `(x, z, scale)`.
pub const PALM_TREE_PLANTING: [(f32, f32, f32); 4] = [
    (-8.0, 2.0, 1.2),
    (-6.0, 4.0, 1.0),
    (7.0, 3.0, 1.1),
    (9.0, 1.0, 0.9),
];

/// Hand-placed umbrellas as `(x, z)`.
pub const UMBRELLA_SPOTS: [(f32, f32); 3] = [(-3.0, 5.0), (2.0, 6.0), (5.0, 5.0)];

/// Firefly hues: yellow, orange, hot pink.
pub const FIREFLY_COLORS: [Color; FIREFLY_COUNT] = [
    Color::from_hex(0xffff00),
    Color::from_hex(0xffa500),
    Color::from_hex(0xff69b4),
];

/// Resting height of the water plane.
pub const WATER_LEVEL: f32 = 0.05;

/// Initial sun position: low over the water, behind and left of the camera target.
pub const SUN_POSITION: Vec3 = Vec3::new(-8.0, 3.0, -5.0);

/// Half extent of the sun's box frustum. Covers the ground area with margin.
pub const SUN_SHADOW_HALF_EXTENT: f32 = 15.0;

/// Distance from the target to the sun's shadow camera along the light direction.
pub const SUN_SHADOW_EYE_DISTANCE: f32 = 15.0;

/// Lay a plane flat, facing up.
fn horizontal(position: Vec3) -> Transform {
    Transform {
        position,
        rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
        ..Transform::default()
    }
}

fn lights(builder: &mut SceneGraphBuilder) -> (NodeId, NodeId, NodeId) {
    let root = builder.root();
    let ambient = builder.attach(
        root,
        Blueprint::light("ambient", Light::ambient(Color::from_hex(0xffa07a), 0.4)),
    );

    let sun_shadow = ShadowConfig::orthographic(2048, SUN_SHADOW_HALF_EXTENT, 1.0, 30.0)
        .anchored_at(SUN_SHADOW_EYE_DISTANCE);
    let sun = builder.attach(
        root,
        Blueprint::light(
            "sun",
            Light::directional(Color::from_hex(0xff6b35), 1.2).with_shadow(sun_shadow),
        )
        .at(SUN_POSITION),
    );

    let hemisphere = builder.attach(
        root,
        Blueprint::light(
            "hemisphere",
            Light::hemisphere(Color::from_hex(0xffd4a3), Color::from_hex(0x4a90e2), 0.6),
        ),
    );
    (ambient, sun, hemisphere)
}

fn shoreline(builder: &mut SceneGraphBuilder) -> (NodeId, NodeId) {
    let root = builder.root();
    let sand = Surface::new(Color::from_hex(0xf4a460))
        .with_roughness(0.9)
        .with_metalness(0.1);
    let ground = builder.attach(
        root,
        Blueprint::mesh(
            "sand",
            Mesh::new(
                Shape::Plane {
                    width: 50.0,
                    height: 50.0,
                },
                sand,
            ),
        )
        .with_transform(horizontal(Vec3::ZERO))
        .receiving_shadow(),
    );

    let sea = Surface::new(Color::from_hex(0x1e90ff))
        .with_roughness(0.1)
        .with_metalness(0.8)
        .with_opacity(0.9);
    let water = builder.attach(
        root,
        Blueprint::mesh(
            "water",
            Mesh::new(
                Shape::Plane {
                    width: 50.0,
                    height: 30.0,
                },
                sea,
            ),
        )
        .with_transform(horizontal(Vec3::new(0.0, WATER_LEVEL, -15.0))),
    );
    (ground, water)
}

fn fireflies(builder: &mut SceneGraphBuilder) -> [NodeId; FIREFLY_COUNT] {
    let root = builder.root();
    FIREFLY_COLORS.map(|color| {
        builder.attach(
            root,
            Blueprint::light(
                "firefly",
                Light::point(color, 0.8, 5.0).with_shadow(ShadowConfig::perspective(256)),
            ),
        )
    })
}

/// Build the complete diorama, drawing rock placement from `rng`.
pub fn assemble<R: Rng>(rng: &mut R) -> Scene {
    let _span = tracing::info_span!("assemble").entered();
    let mut builder = SceneGraphBuilder::new();
    let root = builder.root();

    let (ambient, sun, hemisphere) = lights(&mut builder);
    let (ground, water) = shoreline(&mut builder);

    let palm_trees = builder.attach(
        root,
        PALM_TREE_PLANTING
            .iter()
            .fold(Blueprint::group("palm_trees"), |group, &(x, z, scale)| {
                group.with_child(palm_tree(Vec2::new(x, z), scale))
            }),
    );
    let rocks = builder.attach(root, RockScatter::default().build(rng));
    let umbrellas = builder.attach(
        root,
        UMBRELLA_SPOTS
            .iter()
            .fold(Blueprint::group("umbrellas"), |group, &(x, z)| {
                group.with_child(umbrella(Vec2::new(x, z), 1.0))
            }),
    );
    let fireflies = fireflies(&mut builder);

    let graph = builder.finish();
    tracing::info!(
        nodes = graph.len(),
        palm_trees = graph.children(palm_trees).len(),
        rocks = graph.children(rocks).len(),
        umbrellas = graph.children(umbrellas).len(),
        "scene assembled"
    );

    Scene {
        graph,
        atmosphere: Atmosphere::new(Fog {
            color: FOG_COLOR,
            near: 5.0,
            far: 35.0,
        }),
        handles: SceneHandles {
            ambient,
            sun,
            hemisphere,
            ground,
            water,
            palm_trees,
            rocks,
            umbrellas,
            fireflies,
        },
    }
}

/// Reproducible assembly from a seed.
pub fn assemble_seeded(seed: u64) -> Scene {
    tracing::debug!(seed, "seeding rock scatter");
    assemble(&mut StdRng::seed_from_u64(seed))
}

/// Assembly with an entropy-seeded generator.
pub fn assemble_unseeded() -> Scene {
    assemble(&mut StdRng::from_entropy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoreline_scene::{LightKind, NodeKind, ShadowProjection, shadow};

    #[test]
    fn counts_match_the_planting() {
        let scene = assemble_seeded(1);
        assert_eq!(scene.palm_trees().len(), 4);
        assert_eq!(scene.rocks().len(), 15);
        assert_eq!(scene.umbrellas().len(), 3);
        let lights = scene
            .graph
            .iter()
            .filter(|(_, n)| n.light().is_some())
            .count();
        assert_eq!(lights, 3 + FIREFLY_COUNT);
    }

    #[test]
    fn planted_groups_match_their_builders() {
        let scene = assemble_seeded(2);
        for (id, &(x, z, s)) in scene.palm_trees().iter().zip(PALM_TREE_PLANTING.iter()) {
            assert_eq!(scene.graph.blueprint(*id), Some(palm_tree(Vec2::new(x, z), s)));
        }
        for (id, &(x, z)) in scene.umbrellas().iter().zip(UMBRELLA_SPOTS.iter()) {
            assert_eq!(scene.graph.blueprint(*id), Some(umbrella(Vec2::new(x, z), 1.0)));
        }
    }

    #[test]
    fn only_the_sun_has_a_box_frustum() {
        let scene = assemble_seeded(3);
        let sun = scene.graph.get(scene.handles.sun).unwrap().light().unwrap();
        let LightKind::Directional {
            shadow: Some(config),
            ..
        } = &sun.kind
        else {
            panic!("sun must be a shadow-casting directional light");
        };
        let ShadowProjection::Orthographic {
            left,
            right,
            bottom,
            top,
        } = config.projection
        else {
            panic!("sun shadow must be orthographic");
        };
        assert!(left <= -15.0 && right >= 15.0 && bottom <= -15.0 && top >= 15.0);
        assert!(config.near <= 1.0 && config.far >= 30.0);
        assert_eq!(config.map_size, 2048);

        let box_frusta = scene
            .graph
            .iter()
            .filter_map(|(_, n)| n.light()?.shadow())
            .filter(|c| matches!(c.projection, ShadowProjection::Orthographic { .. }))
            .count();
        assert_eq!(box_frusta, 1);
    }

    #[test]
    fn sun_sits_low_on_the_horizon() {
        let scene = assemble_seeded(3);
        let p = scene.graph.world_matrix(scene.handles.sun).transform_point3(Vec3::ZERO);
        let elevation = (p.y / p.length()).asin();
        assert!(elevation < 30.0_f32.to_radians());
    }

    #[test]
    fn sun_frustum_covers_every_caster() {
        for seed in 0..64 {
            let scene = assemble_seeded(seed);
            let missing = shadow::uncovered_casters(&scene.graph, scene.handles.sun);
            assert!(missing.is_empty(), "seed {seed}: {missing:?}");
        }
    }

    #[test]
    fn fireflies_are_distinct_and_cast_small_shadows() {
        let scene = assemble_seeded(4);
        let lights: Vec<&Light> = scene
            .handles
            .fireflies
            .iter()
            .map(|id| scene.graph.get(*id).unwrap().light().unwrap())
            .collect();
        for (i, light) in lights.iter().enumerate() {
            assert_eq!(light.intensity, lights[0].intensity);
            assert!(matches!(light.kind, LightKind::Point { distance, .. } if distance == 5.0));
            assert_eq!(light.shadow().unwrap().map_size, 256);
            for other in &lights[i + 1..] {
                assert_ne!(light.color, other.color);
            }
        }
    }

    #[test]
    fn ground_and_water_are_horizontal() {
        let scene = assemble_seeded(5);
        for id in [scene.handles.ground, scene.handles.water] {
            let normal = scene.graph.world_matrix(id).transform_vector3(Vec3::Z);
            assert!(normal.abs_diff_eq(Vec3::Y, 1e-6));
        }
        let water = scene.graph.get(scene.handles.water).unwrap();
        assert!(water.mesh().unwrap().surface.is_transparent());
        assert_eq!(water.transform().position, Vec3::new(0.0, WATER_LEVEL, -15.0));
        assert!(scene.graph.get(scene.handles.ground).unwrap().receive_shadow());
    }

    #[test]
    fn fog_matches_background() {
        let scene = assemble_seeded(6);
        assert_eq!(scene.atmosphere.background(), scene.atmosphere.fog().color);
        assert_eq!(scene.atmosphere.fog().color, FOG_COLOR);
    }

    #[test]
    fn seeding_is_reproducible() {
        assert_eq!(
            assemble_seeded(11).graph.fingerprint(),
            assemble_seeded(11).graph.fingerprint()
        );
        assert_ne!(
            assemble_seeded(11).graph.fingerprint(),
            assemble_seeded(12).graph.fingerprint()
        );
    }

    #[test]
    fn every_caster_lives_beside_a_shadow_light() {
        let scene = assemble_unseeded();
        let graph = &scene.graph;
        let root_of = |mut id: NodeId| {
            while let Some(parent) = graph.get(id).and_then(|n| n.parent()) {
                id = parent;
            }
            id
        };

        let casters: Vec<NodeId> = graph
            .iter()
            .filter(|(_, n)| n.cast_shadow())
            .map(|(id, _)| id)
            .collect();
        let shadow_lights: Vec<NodeId> = graph
            .iter()
            .filter(|(_, n)| n.light().is_some_and(Light::casts_shadow))
            .map(|(id, _)| id)
            .collect();
        assert!(!casters.is_empty());
        assert!(!shadow_lights.is_empty());

        for id in &casters {
            assert_eq!(root_of(*id), graph.root(), "caster {id} is detached");
        }
        assert!(shadow_lights.iter().any(|id| root_of(*id) == graph.root()));
        assert!(shadow_lights.contains(&scene.handles.sun));
        assert!(
            graph
                .iter()
                .all(|(_, n)| !matches!(n.kind(), NodeKind::Light(_)) || !n.cast_shadow())
        );
    }
}
