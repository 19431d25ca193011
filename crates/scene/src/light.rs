use glam::{Mat4, Vec3};
use shoreline_common::Color;

/// Light source attached to a scene node. Position comes from the node transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub kind: LightKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Sky color is the light's `color`; `ground_color` lights surfaces facing down.
    Hemisphere { ground_color: Color },
    /// Parallel light shining from the node position toward `target`.
    Directional {
        target: Vec3,
        shadow: Option<ShadowConfig>,
    },
    /// Omni light. `distance` is the cutoff range (0 = unbounded).
    Point {
        distance: f32,
        decay: f32,
        shadow: Option<ShadowConfig>,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Ambient,
        }
    }

    pub fn hemisphere(sky: Color, ground: Color, intensity: f32) -> Self {
        Self {
            color: sky,
            intensity,
            kind: LightKind::Hemisphere {
                ground_color: ground,
            },
        }
    }

    pub fn directional(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional {
                target: Vec3::ZERO,
                shadow: None,
            },
        }
    }

    pub fn point(color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Point {
                distance,
                decay: 2.0,
                shadow: None,
            },
        }
    }

    /// Enable shadow casting. Ignored for ambient and hemisphere lights.
    pub fn with_shadow(mut self, config: ShadowConfig) -> Self {
        match &mut self.kind {
            LightKind::Directional { shadow, .. } | LightKind::Point { shadow, .. } => {
                *shadow = Some(config);
            }
            LightKind::Ambient | LightKind::Hemisphere { .. } => {
                tracing::warn!("shadow config ignored for non-positional light");
            }
        }
        self
    }

    pub fn shadow(&self) -> Option<&ShadowConfig> {
        match &self.kind {
            LightKind::Directional { shadow, .. } | LightKind::Point { shadow, .. } => {
                shadow.as_ref()
            }
            LightKind::Ambient | LightKind::Hemisphere { .. } => None,
        }
    }

    pub fn casts_shadow(&self) -> bool {
        self.shadow().is_some()
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LightKind::Ambient => "ambient",
            LightKind::Hemisphere { .. } => "hemisphere",
            LightKind::Directional { .. } => "directional",
            LightKind::Point { .. } => "point",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowProjection {
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    },
    Perspective { fov_degrees: f32 },
}

/// Shadow-map settings for one light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    /// Square shadow-map resolution in texels.
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
    pub projection: ShadowProjection,
    /// When set, the shadow camera sits this far from the light target along
    /// the light direction instead of at the light position.
    pub eye_distance: Option<f32>,
}

impl ShadowConfig {
    /// Box frustum centered on the light axis with the given half extent.
    pub fn orthographic(map_size: u32, half_extent: f32, near: f32, far: f32) -> Self {
        Self {
            map_size,
            near,
            far,
            projection: ShadowProjection::Orthographic {
                left: -half_extent,
                right: half_extent,
                bottom: -half_extent,
                top: half_extent,
            },
            eye_distance: None,
        }
    }

    /// Cube-face frustum used by point lights.
    pub fn perspective(map_size: u32) -> Self {
        Self {
            map_size,
            near: 0.5,
            far: 500.0,
            projection: ShadowProjection::Perspective { fov_degrees: 90.0 },
            eye_distance: None,
        }
    }

    pub fn anchored_at(mut self, distance: f32) -> Self {
        self.eye_distance = Some(distance);
        self
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            ShadowProjection::Orthographic {
                left,
                right,
                bottom,
                top,
            } => Mat4::orthographic_rh(left, right, bottom, top, self.near, self.far),
            ShadowProjection::Perspective { fov_degrees } => {
                Mat4::perspective_rh(fov_degrees.to_radians(), 1.0, self.near, self.far)
            }
        }
    }

    /// Position of the shadow camera for a light at `light_position` aimed at `target`.
    pub fn eye(&self, light_position: Vec3, target: Vec3) -> Vec3 {
        match self.eye_distance {
            Some(distance) => {
                let dir = (light_position - target).try_normalize().unwrap_or(Vec3::Y);
                target + dir * distance
            }
            None => light_position,
        }
    }

    /// World-to-shadow-clip matrix for a light aimed at `target`.
    pub fn view_projection(&self, light_position: Vec3, target: Vec3) -> Mat4 {
        let eye = self.eye(light_position, target);
        self.projection_matrix() * shadow_view(eye, target)
    }
}

/// Look-at view for a shadow camera; swaps the up vector when looking straight down.
pub(crate) fn shadow_view(eye: Vec3, target: Vec3) -> Mat4 {
    let forward = (target - eye).try_normalize().unwrap_or(Vec3::NEG_Y);
    let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    Mat4::look_at_rh(eye, target, up)
}
