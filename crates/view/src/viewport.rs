use crate::camera::PerspectiveCamera;

/// Upper bound on the pixel-ratio multiplier applied to the drawing buffer.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Drawing-buffer size in physical pixels, ready to configure a surface with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Logical window size plus the pixel ratio used for the drawing buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
    pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let mut viewport = Self {
            width: 1.0,
            height: 1.0,
            device_pixel_ratio: 1.0,
            pixel_ratio: 1.0,
        };
        viewport.set_size(width, height, device_pixel_ratio);
        viewport
    }

    /// Logical size from a physical size and the window scale factor.
    pub fn from_physical(width: u32, height: u32, scale_factor: f32) -> Self {
        let scale = sanitize_ratio(scale_factor);
        Self::new(width as f32 / scale, height as f32 / scale, scale)
    }

    fn set_size(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.width = clamp_dimension(width);
        self.height = clamp_dimension(height);
        self.device_pixel_ratio = sanitize_ratio(device_pixel_ratio);
        self.pixel_ratio = self.device_pixel_ratio.min(MAX_PIXEL_RATIO);
    }

    /// Apply a resize notification.
    ///
    /// Clamps both dimensions to at least 1, caps the pixel ratio, brings the
    /// camera aspect and projection in line, and returns the drawing-buffer
    /// size the render surface should be reconfigured to. Calling it again with
    /// the same arguments changes nothing.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        camera: &mut PerspectiveCamera,
    ) -> SurfaceSize {
        self.set_size(width, height, device_pixel_ratio);
        self.bind(camera);
        let surface = self.drawing_buffer_size();
        tracing::debug!(
            width = self.width,
            height = self.height,
            pixel_ratio = self.pixel_ratio,
            surface_width = surface.width,
            surface_height = surface.height,
            "viewport resized"
        );
        surface
    }

    /// Resize from a physical size reported by the window system.
    pub fn resize_physical(
        &mut self,
        width: u32,
        height: u32,
        scale_factor: f32,
        camera: &mut PerspectiveCamera,
    ) -> SurfaceSize {
        let scale = sanitize_ratio(scale_factor);
        self.resize(width as f32 / scale, height as f32 / scale, scale, camera)
    }

    /// Sync the camera with this viewport's aspect ratio.
    pub fn bind(&self, camera: &mut PerspectiveCamera) {
        camera.aspect = self.aspect();
        camera.update_projection_matrix();
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn drawing_buffer_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: ((self.width * self.pixel_ratio).round() as u32).max(1),
            height: ((self.height * self.pixel_ratio).round() as u32).max(1),
        }
    }
}

fn clamp_dimension(v: f32) -> f32 {
    if v.is_finite() { v.max(1.0) } else { 1.0 }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn resize_updates_camera_aspect() {
        let mut camera = PerspectiveCamera::default();
        let mut viewport = Viewport::new(1280.0, 800.0, 1.0);
        let surface = viewport.resize(1920.0, 1080.0, 1.0, &mut camera);

        assert_relative_eq!(camera.aspect, 1920.0 / 1080.0);
        assert_eq!(camera.aspect, viewport.aspect());
        assert_eq!(
            surface,
            SurfaceSize {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let mut camera = PerspectiveCamera::default();
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);

        viewport.resize(0.0, 600.0, 1.0, &mut camera);
        assert!(camera.aspect.is_finite() && camera.aspect > 0.0);
        assert_eq!(camera.aspect, 1.0 / 600.0);

        viewport.resize(800.0, 0.0, 1.0, &mut camera);
        assert!(camera.aspect.is_finite() && camera.aspect > 0.0);
        assert_eq!(camera.aspect, 800.0);

        viewport.resize(-5.0, f32::NAN, 1.0, &mut camera);
        assert_eq!(camera.aspect, 1.0);
        assert!(camera.projection_matrix().is_finite());
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let mut camera = PerspectiveCamera::default();
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);
        let surface = viewport.resize(800.0, 600.0, 3.0, &mut camera);

        assert_eq!(viewport.device_pixel_ratio(), 3.0);
        assert_eq!(viewport.pixel_ratio(), MAX_PIXEL_RATIO);
        assert_eq!(
            surface,
            SurfaceSize {
                width: 1600,
                height: 1200
            }
        );
    }

    #[test]
    fn bogus_pixel_ratio_falls_back_to_one() {
        let viewport = Viewport::new(800.0, 600.0, 0.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
        let viewport = Viewport::new(800.0, 600.0, f32::INFINITY);
        assert_eq!(viewport.pixel_ratio(), 1.0);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut camera = PerspectiveCamera::default();
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);
        let first = viewport.resize(1024.0, 768.0, 1.5, &mut camera);
        let camera_after_first = camera.clone();
        let second = viewport.resize(1024.0, 768.0, 1.5, &mut camera);
        assert_eq!(first, second);
        assert_eq!(camera, camera_after_first);
    }

    #[test]
    fn physical_sizes_map_back_to_logical() {
        let mut camera = PerspectiveCamera::default();
        let mut viewport = Viewport::new(1.0, 1.0, 1.0);
        let surface = viewport.resize_physical(2560, 1600, 2.0, &mut camera);
        assert_eq!(viewport.width(), 1280.0);
        assert_eq!(viewport.height(), 800.0);
        assert_eq!(
            surface,
            SurfaceSize {
                width: 2560,
                height: 1600
            }
        );

        let dense = Viewport::from_physical(3000, 1500, 3.0);
        assert_eq!(dense.drawing_buffer_size(), SurfaceSize { width: 2000, height: 1000 });
    }
}
