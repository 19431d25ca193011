use shoreline_common::Color;

/// Linear distance fog: no fog before `near`, fully fogged at `far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    /// Blend factor in `[0, 1]` at view depth `depth`.
    pub fn factor(&self, depth: f32) -> f32 {
        let span = (self.far - self.near).max(f32::EPSILON);
        let x = ((depth - self.near) / span).clamp(0.0, 1.0);
        x * x * (3.0 - 2.0 * x)
    }
}

/// Fog plus the clear color behind all geometry.
///
/// The background always equals the fog color so that geometry fading into
/// fog meets the sky without a seam. Both are private; the only way to change
/// the color is [`Atmosphere::set_fog_color`], which keeps them together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    fog: Fog,
    background: Color,
}

impl Atmosphere {
    pub fn new(fog: Fog) -> Self {
        Self {
            fog,
            background: fog.color,
        }
    }

    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_fog_color(&mut self, color: Color) {
        self.fog.color = color;
        self.background = color;
    }

    pub fn set_fog_range(&mut self, near: f32, far: f32) {
        self.fog.near = near;
        self.fog.far = far;
    }
}
