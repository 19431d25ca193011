//! CPU-side mirrors of the shader's uniform and instance layouts.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};
use shoreline_render::{DrawItem, DrawList};

/// Point lights past this count are dropped, keeping those nearest the camera.
pub const MAX_POINT_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub ambient: [f32; 4],
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    /// xyz toward the sun, w = 1 when the shadow map is valid.
    pub sun_dir: [f32; 4],
    pub sun_color: [f32; 4],
    pub fog_color: [f32; 4],
    /// near, far, shadow texel size, point light count.
    pub fog_range: [f32; 4],
    /// xyz position, w cutoff distance.
    pub point_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    /// rgb scaled by intensity, w decay.
    pub point_color: [[f32; 4]; MAX_POINT_LIGHTS],
}

impl SceneUniforms {
    pub fn new(list: &DrawList<'_>) -> Self {
        let lights = &list.lights;
        let [ar, ag, ab] = lights.ambient;

        let (hemi_sky, hemi_ground) = match lights.hemisphere {
            Some(h) => (
                h.sky.scaled_linear(h.intensity),
                h.ground.scaled_linear(h.intensity),
            ),
            None => ([0.0; 4], [0.0; 4]),
        };

        let (sun_dir, sun_color, light_view_proj, texel) = match lights.sun {
            Some(sun) => {
                let shadowed = sun.shadow_view_proj.is_some();
                let d = sun.direction;
                let texel = sun
                    .shadow
                    .map(|config| 1.0 / config.map_size.max(1) as f32)
                    .unwrap_or(0.0);
                (
                    [d.x, d.y, d.z, if shadowed { 1.0 } else { 0.0 }],
                    sun.color.scaled_linear(sun.intensity),
                    sun.shadow_view_proj.unwrap_or(Mat4::IDENTITY),
                    texel,
                )
            }
            None => ([0.0, 1.0, 0.0, 0.0], [0.0; 4], Mat4::IDENTITY, 0.0),
        };

        let mut points: Vec<_> = lights.points.iter().collect();
        points.sort_by(|a, b| {
            let da = a.position.distance_squared(list.camera_position);
            let db = b.position.distance_squared(list.camera_position);
            da.total_cmp(&db)
        });
        if points.len() > MAX_POINT_LIGHTS {
            tracing::debug!(
                dropped = points.len() - MAX_POINT_LIGHTS,
                "point lights over shader limit"
            );
        }
        let mut point_pos = [[0.0; 4]; MAX_POINT_LIGHTS];
        let mut point_color = [[0.0; 4]; MAX_POINT_LIGHTS];
        let count = points.len().min(MAX_POINT_LIGHTS);
        for (slot, light) in points.into_iter().take(MAX_POINT_LIGHTS).enumerate() {
            let p = light.position;
            point_pos[slot] = [p.x, p.y, p.z, light.distance];
            let mut color = light.color.scaled_linear(light.intensity);
            color[3] = light.decay;
            point_color[slot] = color;
        }

        let fog = list.fog;
        let [fr, fg, fb] = fog.color.to_linear();
        let c = list.camera_position;

        Self {
            view_proj: list.view_proj.to_cols_array_2d(),
            view: list.view.to_cols_array_2d(),
            light_view_proj: light_view_proj.to_cols_array_2d(),
            camera_pos: [c.x, c.y, c.z, 1.0],
            ambient: [ar, ag, ab, 1.0],
            hemi_sky,
            hemi_ground,
            sun_dir,
            sun_color,
            fog_color: [fr, fg, fb, 1.0],
            fog_range: [fog.near, fog.far, texel, count as f32],
            point_pos,
            point_color,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub normal_0: [f32; 4],
    pub normal_1: [f32; 4],
    pub normal_2: [f32; 4],
    /// Linear rgb plus opacity.
    pub color: [f32; 4],
    /// roughness, metalness, receives shadow, unused.
    pub material: [f32; 4],
}

impl InstanceData {
    pub fn new(item: &DrawItem<'_>) -> Self {
        let cols = item.model.to_cols_array_2d();
        let linear = Mat3::from_mat4(item.model);
        let normal = if linear.determinant().abs() > f32::EPSILON {
            linear.inverse().transpose()
        } else {
            linear
        };
        let surface = &item.mesh.surface;
        let [r, g, b] = surface.color.to_linear();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            normal_0: normal.x_axis.extend(0.0).to_array(),
            normal_1: normal.y_axis.extend(0.0).to_array(),
            normal_2: normal.z_axis.extend(0.0).to_array(),
            color: [r, g, b, surface.opacity],
            material: [
                surface.roughness,
                surface.metalness,
                if item.receive_shadow { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use shoreline_compose::assemble_seeded;
    use shoreline_view::PerspectiveCamera;

    #[test]
    fn layouts_match_shader_sizes() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 3 * 64 + 8 * 16 + 8 * 16);
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<InstanceData>(), 9 * 16);
    }

    #[test]
    fn uniforms_carry_scene_lighting() {
        let scene = assemble_seeded(4);
        let list = DrawList::extract(&scene, &PerspectiveCamera::default());
        let uniforms = SceneUniforms::new(&list);

        assert_eq!(uniforms.sun_dir[3], 1.0);
        assert_eq!(uniforms.fog_range[0], list.fog.near);
        assert_eq!(uniforms.fog_range[1], list.fog.far);
        assert_eq!(uniforms.fog_range[2], 1.0 / 2048.0);
        assert_eq!(uniforms.fog_range[3], 3.0);
        assert!(uniforms.point_color[..3].iter().all(|c| c[3] == 2.0));
        assert_eq!(uniforms.point_color[3], [0.0; 4]);
        assert!(uniforms.hemi_sky[0] > 0.0);
    }

    #[test]
    fn instance_normals_survive_rotation() {
        let scene = assemble_seeded(4);
        let list = DrawList::extract(&scene, &PerspectiveCamera::default());
        let sand = list
            .opaque
            .iter()
            .find(|item| item.node == scene.handles.ground)
            .expect("sand");
        let data = InstanceData::new(sand);

        // The sand plane is laid flat, so its local +Z normal points up.
        let normal = Mat3::from_cols(
            Vec3::from_slice(&data.normal_0[..3]),
            Vec3::from_slice(&data.normal_1[..3]),
            Vec3::from_slice(&data.normal_2[..3]),
        ) * Vec3::Z;
        assert!(normal.normalize().abs_diff_eq(Vec3::Y, 1e-5));
        assert_eq!(data.material[2], 1.0);
        assert_eq!(data.color[3], 1.0);
    }
}
