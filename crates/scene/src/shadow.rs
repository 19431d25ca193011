//! Shadow frustum coverage checks.

use crate::graph::SceneGraph;
use crate::light::{LightKind, ShadowProjection, shadow_view};
use crate::node::NodeId;
use glam::{Mat4, Vec3};

/// World-to-shadow-clip matrix of a directional light node, if it casts shadows.
pub fn directional_view_projection(graph: &SceneGraph, light: NodeId) -> Option<Mat4> {
    let node = graph.get(light)?;
    let LightKind::Directional {
        target,
        shadow: Some(config),
    } = &node.light()?.kind
    else {
        return None;
    };
    let position = graph.world_matrix(light).transform_point3(Vec3::ZERO);
    Some(config.view_projection(position, *target))
}

/// Shadow-casting meshes whose bounding sphere pokes out of the orthographic
/// shadow frustum of the directional light `light`.
///
/// Returns every caster when `light` is not a shadow-casting directional light
/// with a box frustum, since nothing it renders could be trusted.
pub fn uncovered_casters(graph: &SceneGraph, light: NodeId) -> Vec<NodeId> {
    let casters: Vec<NodeId> = graph
        .iter()
        .filter(|(_, node)| node.cast_shadow() && node.mesh().is_some())
        .map(|(id, _)| id)
        .collect();

    let Some(node) = graph.get(light) else {
        return casters;
    };
    let Some(LightKind::Directional {
        target,
        shadow: Some(config),
    }) = node.light().map(|l| &l.kind)
    else {
        return casters;
    };
    let ShadowProjection::Orthographic {
        left,
        right,
        bottom,
        top,
    } = config.projection
    else {
        return casters;
    };

    let position = graph.world_matrix(light).transform_point3(Vec3::ZERO);
    let view = shadow_view(config.eye(position, *target), *target);
    let world = graph.world_matrices();

    casters
        .into_iter()
        .filter(|id| {
            let Some(mesh) = graph.get(*id).and_then(|n| n.mesh()) else {
                return false;
            };
            let m = world[id.index()];
            let (center, radius) = mesh.geometry.bounding_sphere();
            let max_scale = m
                .x_axis
                .truncate()
                .length()
                .max(m.y_axis.truncate().length())
                .max(m.z_axis.truncate().length());
            let r = radius * max_scale;
            let p = view.transform_point3(m.transform_point3(center));
            let depth = -p.z;
            let inside = p.x - r >= left
                && p.x + r <= right
                && p.y - r >= bottom
                && p.y + r <= top
                && depth - r >= config.near
                && depth + r <= config.far;
            if !inside {
                tracing::debug!(node = %id, "shadow caster outside sun frustum");
            }
            !inside
        })
        .collect()
}
