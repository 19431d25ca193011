/// Shared declarations: scene uniforms and the per-instance vertex inputs.
const COMMON: &str = r#"
struct Scene {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient: vec4<f32>,
    hemi_sky: vec4<f32>,
    hemi_ground: vec4<f32>,
    sun_dir: vec4<f32>,
    sun_color: vec4<f32>,
    fog_color: vec4<f32>,
    fog_range: vec4<f32>,
    point_pos: array<vec4<f32>, 4>,
    point_color: array<vec4<f32>, 4>,
};

@group(0) @binding(0)
var<uniform> scene: Scene;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) normal_0: vec4<f32>,
    @location(7) normal_1: vec4<f32>,
    @location(8) normal_2: vec4<f32>,
    @location(9) color: vec4<f32>,
    @location(10) material: vec4<f32>,
};

fn model_matrix(instance: InstanceInput) -> mat4x4<f32> {
    return mat4x4<f32>(instance.model_0, instance.model_1, instance.model_2, instance.model_3);
}
"#;

/// Depth-only pass from the sun's point of view.
const SHADOW_BODY: &str = r#"
@vertex
fn vs_shadow(vertex: VertexInput, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    let world_pos = model_matrix(instance) * vec4<f32>(vertex.position, 1.0);
    return scene.light_view_proj * world_pos;
}
"#;

/// Lit pass: ambient + hemisphere + shadowed sun + point lights, then fog.
const SCENE_BODY: &str = r#"
@group(1) @binding(0)
var shadow_map: texture_depth_2d;
@group(1) @binding(1)
var shadow_sampler: sampler_comparison;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) material: vec4<f32>,
    @location(4) view_depth: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world_pos = model_matrix(instance) * vec4<f32>(vertex.position, 1.0);
    let normal_matrix = mat3x3<f32>(
        instance.normal_0.xyz,
        instance.normal_1.xyz,
        instance.normal_2.xyz,
    );

    var out: VertexOutput;
    out.clip_position = scene.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normal_matrix * vertex.normal;
    out.color = instance.color;
    out.material = instance.material;
    out.view_depth = -(scene.view * world_pos).z;
    return out;
}

fn sun_visibility(world_pos: vec3<f32>, n_dot_l: f32) -> f32 {
    let clip = scene.light_view_proj * vec4<f32>(world_pos, 1.0);
    let ndc = clip.xyz / clip.w;
    let uv = ndc.xy * vec2<f32>(0.5, -0.5) + vec2<f32>(0.5, 0.5);
    let inside = all(uv >= vec2<f32>(0.0)) && all(uv <= vec2<f32>(1.0)) && ndc.z <= 1.0;
    let texel = scene.fog_range.z;
    let bias = max(0.002 * (1.0 - n_dot_l), 0.0005);

    var lit = 0.0;
    for (var x = -1; x <= 1; x++) {
        for (var y = -1; y <= 1; y++) {
            let offset = vec2<f32>(f32(x), f32(y)) * texel;
            lit += textureSampleCompareLevel(shadow_map, shadow_sampler, uv + offset, ndc.z - bias);
        }
    }
    return select(1.0, lit / 9.0, inside);
}

fn point_attenuation(dist: f32, cutoff: f32, decay: f32) -> f32 {
    var falloff = 1.0 / max(pow(dist, decay), 0.01);
    if (cutoff > 0.0) {
        let ratio = dist / cutoff;
        let fade = clamp(1.0 - ratio * ratio * ratio * ratio, 0.0, 1.0);
        falloff *= fade * fade;
    }
    return falloff;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let v = normalize(scene.camera_pos.xyz - in.world_pos);
    let roughness = in.material.x;
    let metalness = in.material.y;
    let receives_shadow = in.material.z > 0.5;

    let base = in.color.rgb;
    let diffuse_color = base * (1.0 - metalness);
    let specular_color = mix(vec3<f32>(0.04), base, metalness);
    let shininess = mix(256.0, 2.0, roughness);
    let gloss = 1.0 - roughness;

    let hemi_weight = 0.5 * n.y + 0.5;
    let hemi = mix(scene.hemi_ground.rgb, scene.hemi_sky.rgb, hemi_weight);
    var diffuse = scene.ambient.rgb + hemi;
    var specular = hemi * gloss * 0.25;

    let l = normalize(scene.sun_dir.xyz);
    let n_dot_l = max(dot(n, l), 0.0);
    var visibility = 1.0;
    if (scene.sun_dir.w > 0.5 && receives_shadow) {
        visibility = sun_visibility(in.world_pos, n_dot_l);
    }
    let sun = scene.sun_color.rgb * visibility;
    diffuse += sun * n_dot_l;
    let h = normalize(l + v);
    specular += sun * pow(max(dot(n, h), 0.0), shininess) * gloss * step(0.0, dot(n, l));

    let count = u32(scene.fog_range.w);
    for (var i = 0u; i < count; i++) {
        let to_light = scene.point_pos[i].xyz - in.world_pos;
        let dist = length(to_light);
        let pl = to_light / max(dist, 0.0001);
        let radiance = scene.point_color[i].rgb
            * point_attenuation(dist, scene.point_pos[i].w, scene.point_color[i].w);
        diffuse += radiance * max(dot(n, pl), 0.0);
        let ph = normalize(pl + v);
        specular += radiance * pow(max(dot(n, ph), 0.0), shininess) * gloss;
    }

    let lit = diffuse_color * diffuse + specular_color * specular;

    let fog_near = scene.fog_range.x;
    let fog_far = scene.fog_range.y;
    let fog = smoothstep(fog_near, fog_far, in.view_depth);
    let color = mix(lit, scene.fog_color.rgb, fog);
    return vec4<f32>(color, in.color.a);
}
"#;

pub(crate) fn scene_shader() -> String {
    format!("{COMMON}{SCENE_BODY}")
}

pub(crate) fn shadow_shader() -> String {
    format!("{COMMON}{SHADOW_BODY}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_present() {
        let scene = scene_shader();
        assert!(scene.contains("fn vs_main"));
        assert!(scene.contains("fn fs_main"));
        assert!(!scene.contains("fn vs_shadow"));

        let shadow = shadow_shader();
        assert!(shadow.contains("fn vs_shadow"));
        assert!(!shadow.contains("shadow_map"));
    }

    #[test]
    fn point_light_array_matches_host_limit() {
        let needle = format!("array<vec4<f32>, {}>", crate::uniforms::MAX_POINT_LIGHTS);
        assert_eq!(scene_shader().matches(&needle).count(), 2);
    }
}
