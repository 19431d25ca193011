use crate::motion::{FIREFLY_ORBITS, PALM_SWAY, WATER_BOB};
use shoreline_scene::Scene;

/// Pose the animated nodes of `scene` for elapsed time `t` (seconds).
///
/// Stateless: the result depends only on `t` and the scene topology, so calling
/// it twice with the same `t` gives the same pose regardless of history.
pub fn advance(scene: &mut Scene, t: f32) {
    let handles = scene.handles;

    if let Some(water) = scene.graph.transform_mut(handles.water) {
        water.position.y = WATER_BOB.at(t);
    }

    for (id, orbit) in handles.fireflies.iter().zip(FIREFLY_ORBITS.iter()) {
        if let Some(transform) = scene.graph.transform_mut(*id) {
            transform.position = orbit.position_at(t);
        }
    }

    let trees = scene.palm_trees().to_vec();
    for (index, id) in trees.into_iter().enumerate() {
        if let Some(transform) = scene.graph.transform_mut(id) {
            transform.rotation.z = PALM_SWAY.angle_at(t, index);
        }
    }

    tracing::trace!(t, "scene advanced");
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoreline_compose::{WATER_LEVEL, assemble_seeded};

    #[test]
    fn water_follows_closed_form() {
        let mut scene = assemble_seeded(1);
        for t in [0.0, 0.25, 1.0, 17.5] {
            advance(&mut scene, t);
            let y = scene.graph.get(scene.handles.water).unwrap().transform().position.y;
            assert_eq!(y, WATER_LEVEL + 0.1 * (0.5 * t).sin());
        }
    }

    #[test]
    fn fireflies_are_path_independent() {
        let mut stepped = assemble_seeded(1);
        for frame in 0..600 {
            advance(&mut stepped, frame as f32 / 60.0);
        }
        advance(&mut stepped, 42.0);

        let mut fresh = assemble_seeded(1);
        advance(&mut fresh, 42.0);

        for id in stepped.handles.fireflies {
            assert_eq!(
                stepped.graph.get(id).unwrap().transform(),
                fresh.graph.get(id).unwrap().transform()
            );
        }
    }

    #[test]
    fn fireflies_do_not_move_in_lockstep() {
        let mut scene = assemble_seeded(1);
        advance(&mut scene, 5.0);
        let positions: Vec<_> = scene
            .handles
            .fireflies
            .iter()
            .map(|id| scene.graph.get(*id).unwrap().transform().position)
            .collect();
        assert_ne!(positions[0], positions[1]);
        assert_ne!(positions[1], positions[2]);
        assert_ne!(positions[0], positions[2]);
    }

    #[test]
    fn trees_sway_out_of_phase() {
        let mut scene = assemble_seeded(1);
        advance(&mut scene, 0.0);
        let angles: Vec<f32> = scene
            .palm_trees()
            .iter()
            .map(|id| scene.graph.get(*id).unwrap().transform().rotation.z)
            .collect();
        assert_eq!(angles[0], 0.0);
        for (i, angle) in angles.iter().enumerate() {
            assert_eq!(*angle, 0.05 * (i as f32).sin());
        }
    }

    #[test]
    fn advance_leaves_topology_and_static_nodes_alone() {
        let mut scene = assemble_seeded(8);
        let len = scene.graph.len();
        let rocks_before: Vec<_> = scene
            .rocks()
            .iter()
            .map(|id| *scene.graph.get(*id).unwrap().transform())
            .collect();
        advance(&mut scene, 9.0);
        assert_eq!(scene.graph.len(), len);
        let rocks_after: Vec<_> = scene
            .rocks()
            .iter()
            .map(|id| *scene.graph.get(*id).unwrap().transform())
            .collect();
        assert_eq!(rocks_before, rocks_after);
    }
}
