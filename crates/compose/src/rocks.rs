//! Random rock scatter on an annulus around the origin.

use glam::Vec3;
use rand::Rng;
use shoreline_common::{Color, Transform};
use shoreline_scene::{Blueprint, Mesh, Shape, Surface};
use std::f32::consts::{PI, TAU};
use std::ops::Range;
use std::sync::Arc;

/// Sampling ranges for rock placement. Every draw is independent and uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct RockScatter {
    pub count: usize,
    pub radius: Range<f32>,
    pub height: Range<f32>,
    /// Scale range shared by the X and Z axes (sampled separately).
    pub scale_xz: Range<f32>,
    pub scale_y: Range<f32>,
    /// Rotation range for each Euler axis.
    pub rotation: Range<f32>,
}

impl Default for RockScatter {
    fn default() -> Self {
        Self {
            count: 15,
            radius: 5.0..13.0,
            height: 0.0..0.3,
            scale_xz: 0.5..2.0,
            scale_y: 0.5..1.5,
            rotation: 0.0..PI,
        }
    }
}

impl RockScatter {
    /// Sample one rock transform.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Transform {
        let angle = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(self.radius.clone());
        let height = rng.gen_range(self.height.clone());
        let scale = Vec3::new(
            rng.gen_range(self.scale_xz.clone()),
            rng.gen_range(self.scale_y.clone()),
            rng.gen_range(self.scale_xz.clone()),
        );
        let rotation = Vec3::new(
            rng.gen_range(self.rotation.clone()),
            rng.gen_range(self.rotation.clone()),
            rng.gen_range(self.rotation.clone()),
        );
        Transform {
            position: Vec3::new(angle.cos() * radius, height, angle.sin() * radius),
            rotation,
            scale,
        }
    }

    /// Build the `rocks` group. All rocks share one geometry and one surface.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Blueprint {
        let geometry = Arc::new(Shape::Dodecahedron { radius: 0.5 });
        let surface = Arc::new(Surface::new(Color::from_hex(0x696969)).with_roughness(0.9));

        (0..self.count).fold(Blueprint::group("rocks"), |group, i| {
            let rock = Blueprint::mesh(format!("rock_{i}"), Mesh::shared(&geometry, &surface))
                .with_transform(self.sample(rng))
                .casting_shadow();
            group.with_child(rock)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shoreline_scene::NodeKind;

    #[test]
    fn samples_stay_in_ranges() {
        let scatter = RockScatter::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let t = scatter.sample(&mut rng);
            let radial = Vec3::new(t.position.x, 0.0, t.position.z).length();
            assert!(scatter.radius.contains(&radial), "radius {radial}");
            assert!((0.0..0.3).contains(&t.position.y));
            assert!((0.5..2.0).contains(&t.scale.x));
            assert!((0.5..1.5).contains(&t.scale.y));
            assert!((0.5..2.0).contains(&t.scale.z));
            for r in t.rotation.to_array() {
                assert!((0.0..PI).contains(&r));
            }
        }
    }

    #[test]
    fn assembled_rocks_stay_in_ranges_across_seeds() {
        let scatter = RockScatter::default();
        for seed in 0..500 {
            let scene = crate::assemble_seeded(seed);
            assert_eq!(scene.rocks().len(), scatter.count);
            for &id in scene.rocks() {
                let t = scene.graph.get(id).unwrap().transform();
                let radial = Vec3::new(t.position.x, 0.0, t.position.z).length();
                assert!(scatter.radius.contains(&radial), "seed {seed}: radius {radial}");
                assert!(scatter.height.contains(&t.position.y), "seed {seed}");
                for r in t.rotation.to_array() {
                    assert!(scatter.rotation.contains(&r), "seed {seed}: rotation {r}");
                }

                // The rocks group sits at the origin, so world and local radii agree.
                let world = scene.graph.world_matrix(id).transform_point3(Vec3::ZERO);
                assert_relative_eq!(
                    Vec3::new(world.x, 0.0, world.z).length(),
                    radial,
                    epsilon = 1e-5
                );
            }
        }
    }

    #[test]
    fn same_seed_same_rocks() {
        let scatter = RockScatter::default();
        let a = scatter.build(&mut StdRng::seed_from_u64(99));
        let b = scatter.build(&mut StdRng::seed_from_u64(99));
        let c = scatter.build(&mut StdRng::seed_from_u64(100));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rocks_share_geometry_and_surface() {
        let group = RockScatter::default().build(&mut StdRng::seed_from_u64(1));
        assert_eq!(group.children.len(), 15);
        let meshes: Vec<&Mesh> = group
            .children
            .iter()
            .map(|c| match &c.kind {
                NodeKind::Mesh(mesh) => mesh,
                other => panic!("expected mesh, got {other:?}"),
            })
            .collect();
        for mesh in &meshes[1..] {
            assert!(Arc::ptr_eq(&mesh.geometry, &meshes[0].geometry));
            assert!(Arc::ptr_eq(&mesh.surface, &meshes[0].surface));
        }
    }
}
