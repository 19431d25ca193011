//! Entity builders: pure functions from a ground position and scale to a subtree.
//!
//! Every builder returns a group whose children are laid out around the group
//! origin, with the group itself placed at `(ground.x, 0, ground.y)`.

use glam::{Vec2, Vec3};
use shoreline_common::Color;
use shoreline_scene::{Blueprint, Mesh, Shape, Surface};

const TRUNK_COLOR: Color = Color::from_hex(0x8b4513);
const FROND_COLOR: Color = Color::from_hex(0x228b22);
const POLE_COLOR: Color = Color::WHITE;
const CANOPY_COLOR: Color = Color::from_hex(0xff6347);

fn ground_point(ground: Vec2) -> Vec3 {
    Vec3::new(ground.x, 0.0, ground.y)
}

/// Palm tree: a tapered trunk with a cone of fronds stacked on top.
pub fn palm_tree(ground: Vec2, scale: f32) -> Blueprint {
    let trunk = Blueprint::mesh(
        "trunk",
        Mesh::new(
            Shape::Cylinder {
                radius_top: 0.2 * scale,
                radius_bottom: 0.3 * scale,
                height: 3.0 * scale,
                radial_segments: 8,
            },
            Surface::new(TRUNK_COLOR),
        ),
    )
    .at(Vec3::new(0.0, 1.5 * scale, 0.0))
    .casting_shadow();

    let fronds = Blueprint::mesh(
        "fronds",
        Mesh::new(
            Shape::Cone {
                radius: 1.2 * scale,
                height: 2.0 * scale,
                radial_segments: 8,
            },
            Surface::new(FROND_COLOR),
        ),
    )
    .at(Vec3::new(0.0, 3.5 * scale, 0.0))
    .casting_shadow();

    Blueprint::group("palm_tree")
        .at(ground_point(ground))
        .with_child(trunk)
        .with_child(fronds)
}

/// Beach umbrella: a thin pole under a conical canopy.
pub fn umbrella(ground: Vec2, scale: f32) -> Blueprint {
    let pole = Blueprint::mesh(
        "pole",
        Mesh::new(
            Shape::Cylinder {
                radius_top: 0.05 * scale,
                radius_bottom: 0.05 * scale,
                height: 2.5 * scale,
                radial_segments: 8,
            },
            Surface::new(POLE_COLOR),
        ),
    )
    .at(Vec3::new(0.0, 1.25 * scale, 0.0))
    .casting_shadow();

    let canopy = Blueprint::mesh(
        "canopy",
        Mesh::new(
            Shape::Cone {
                radius: 1.5 * scale,
                height: 1.0 * scale,
                radial_segments: 8,
            },
            Surface::new(CANOPY_COLOR),
        ),
    )
    .at(Vec3::new(0.0, 2.5 * scale, 0.0))
    .casting_shadow();

    Blueprint::group("umbrella")
        .at(ground_point(ground))
        .with_child(pole)
        .with_child(canopy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoreline_scene::NodeKind;

    #[test]
    fn builders_are_deterministic() {
        for (x, z, s) in [(-8.0, 2.0, 1.2), (0.0, 0.0, 1.0), (3.5, -7.25, 0.3)] {
            let ground = Vec2::new(x, z);
            assert_eq!(palm_tree(ground, s), palm_tree(ground, s));
            assert_eq!(umbrella(ground, s), umbrella(ground, s));
        }
    }

    #[test]
    fn group_sits_on_requested_ground_point() {
        let tree = palm_tree(Vec2::new(-6.0, 4.0), 1.0);
        assert_eq!(tree.transform.position, Vec3::new(-6.0, 0.0, 4.0));
        assert_eq!(tree.kind, NodeKind::Group);
    }

    #[test]
    fn children_are_relative_to_group_origin() {
        let here = palm_tree(Vec2::new(-6.0, 4.0), 1.0);
        let there = palm_tree(Vec2::new(9.0, 1.0), 1.0);
        assert_eq!(here.children, there.children);
        assert_eq!(here.children[0].transform.position, Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(here.children[1].transform.position, Vec3::new(0.0, 3.5, 0.0));
    }

    #[test]
    fn scale_stretches_proportions() {
        let tree = palm_tree(Vec2::ZERO, 2.0);
        assert_eq!(tree.children[1].transform.position.y, 7.0);
        let NodeKind::Mesh(mesh) = &tree.children[0].kind else {
            panic!("trunk should be a mesh");
        };
        assert_eq!(
            *mesh.geometry,
            Shape::Cylinder {
                radius_top: 0.4,
                radius_bottom: 0.6,
                height: 6.0,
                radial_segments: 8,
            }
        );
    }

    #[test]
    fn solid_parts_cast_shadows() {
        for blueprint in [palm_tree(Vec2::ZERO, 1.0), umbrella(Vec2::ZERO, 1.0)] {
            assert!(!blueprint.cast_shadow);
            assert_eq!(blueprint.children.len(), 2);
            assert!(blueprint.children.iter().all(|c| c.cast_shadow));
        }
    }

    #[test]
    fn umbrella_canopy_is_a_cone_above_the_pole() {
        let u = umbrella(Vec2::new(2.0, 6.0), 1.0);
        let pole = &u.children[0];
        let canopy = &u.children[1];
        assert!(canopy.transform.position.y > pole.transform.position.y);
        assert!(matches!(
            &canopy.kind,
            NodeKind::Mesh(mesh) if matches!(*mesh.geometry, Shape::Cone { .. })
        ));
    }
}
