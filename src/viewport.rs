use egui::Pos2;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;
pub const ZOOM_STEP: f32 = 0.1;

/// Maps device (screen) coordinates into canvas space under the current
/// zoom: subtract the canvas's on-screen origin, divide by the zoom factor.
/// Zoom is a uniform scale anchored at the canvas top-left; there is no pan
/// offset and no rotation.
#[derive(Debug, Clone, Copy)]
pub struct ViewportTransform {
    zoom: f32,
    canvas_origin: Pos2,
}

impl ViewportTransform {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            canvas_origin: Pos2::ZERO,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Sets the zoom factor, clamped between [`MIN_ZOOM`] and [`MAX_ZOOM`],
    /// and returns the applied percentage for the zoom indicator.
    pub fn set_zoom(&mut self, zoom: f32) -> u32 {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.percent()
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    pub fn reset_zoom(&mut self) -> u32 {
        self.set_zoom(1.0)
    }

    /// The current zoom as a rounded percentage.
    pub fn percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Where the canvas's top-left pixel currently sits on screen. The shell
    /// refreshes this every frame from its layout pass.
    pub fn set_canvas_origin(&mut self, origin: Pos2) {
        self.canvas_origin = origin;
    }

    pub fn canvas_origin(&self) -> Pos2 {
        self.canvas_origin
    }

    /// Transforms a device-space position into canvas space.
    pub fn to_canvas_space(&self, device: Pos2) -> Pos2 {
        Pos2::new(
            (device.x - self.canvas_origin.x) / self.zoom,
            (device.y - self.canvas_origin.y) / self.zoom,
        )
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_zoom_clamps_to_the_limits_exactly() {
        let mut viewport = ViewportTransform::new();
        assert_eq!(viewport.set_zoom(10.0), 500);
        assert_eq!(viewport.zoom(), 5.0);
        assert_eq!(viewport.set_zoom(0.01), 10);
        assert_eq!(viewport.zoom(), 0.1);
    }

    #[test]
    fn mapping_is_linear_in_device_coordinates() {
        let mut viewport = ViewportTransform::new();
        viewport.set_canvas_origin(Pos2::new(100.0, 40.0));
        viewport.set_zoom(1.0);
        let at_1x = viewport.to_canvas_space(Pos2::new(180.0, 120.0));
        viewport.set_zoom(2.0);
        let at_2x = viewport.to_canvas_space(Pos2::new(180.0, 120.0));
        // doubling the zoom halves the mapped magnitude of a fixed offset
        assert_eq!(at_1x, Pos2::new(80.0, 80.0));
        assert_eq!(at_2x, Pos2::new(40.0, 40.0));
    }

    #[test]
    fn zoom_steps_report_percentages() {
        let mut viewport = ViewportTransform::new();
        assert_eq!(viewport.zoom_in(), 110);
        assert_eq!(viewport.reset_zoom(), 100);
        assert_eq!(viewport.zoom_out(), 90);
    }
}
