use crate::action::PointerAction;
use glam::Vec3;
use shoreline_view::PerspectiveCamera;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

const EPS: f32 = 1e-6;

/// Damped orbit controller around a target point.
///
/// Actions accumulate into pending deltas; [`OrbitControls::update`] applies a
/// `damping_factor` share of them to the camera each frame and decays the rest,
/// which gives the motion its inertia.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_polar_angle: 0.0,
            // Keep the eye above the sand.
            max_polar_angle: FRAC_PI_2 - 0.1,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Queue a pointer action. `viewport_height` is the surface height in the
    /// same pixel units as the action deltas.
    pub fn apply(
        &mut self,
        action: PointerAction,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) {
        if action.is_noop() {
            return;
        }
        let height = viewport_height.max(1.0);
        match action {
            PointerAction::Rotate { dx, dy } => {
                self.delta_theta -= TAU * dx / height * self.rotate_speed;
                self.delta_phi -= TAU * dy / height * self.rotate_speed;
            }
            PointerAction::Pan { dx, dy } => {
                let offset = camera.position - self.target;
                let half_fov = (camera.fov.to_radians() * 0.5).tan();
                let distance = offset.length() * half_fov;
                let view = camera.view_matrix().inverse();
                let left = view.x_axis.truncate();
                let up = view.y_axis.truncate();
                self.pan_offset += left * (-2.0 * dx * distance / height);
                self.pan_offset += up * (2.0 * dy * distance / height);
            }
            PointerAction::Zoom { steps } => {
                let dolly = 0.95_f32.powf(self.zoom_speed);
                self.scale *= dolly.powf(-steps);
            }
        }
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let radius = offset.length().max(EPS);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.delta_theta * share;
        phi += self.delta_phi * share;
        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);

        let radius = (radius * self.scale).clamp(self.min_distance.max(EPS), self.max_distance);
        self.target += self.pan_offset * share;

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        let new_position = self.target + new_offset;
        let moved = new_position.distance_squared(camera.position) > EPS
            || camera.target.distance_squared(self.target) > EPS;
        camera.position = new_position;
        camera.target = self.target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        if moved {
            tracing::trace!(?camera.position, "orbit camera moved");
        }
        moved
    }
}
