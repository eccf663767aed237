use egui::Color32;

use crate::stack::LayerStack;
use crate::surface::RasterSurface;

/// The color the canvas shows where nothing has been painted. The background
/// layer is pre-filled with it and the eraser paints it.
pub const CANVAS_BASE: Color32 = Color32::WHITE;

/// Composites the layer stack into the single displayed surface.
///
/// Painter's algorithm: starting from an opaque base, every visible layer is
/// source-over blended bottom to top, with its opacity as a uniform
/// multiplier over the surface's own per-pixel alpha. Runs synchronously on
/// every mutation; at canvas sizes this is cheap enough that no dirty-region
/// tracking is needed.
pub struct Compositor {
    display: RasterSurface,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            display: RasterSurface::filled(width, height, CANVAS_BASE),
        }
    }

    /// Recomposites the stack and returns the refreshed display surface.
    pub fn render(&mut self, stack: &LayerStack) -> &RasterSurface {
        self.display.clear(CANVAS_BASE);
        for layer in stack.layers() {
            if !layer.visible() {
                continue;
            }
            self.display.composite_over(layer.surface(), layer.opacity());
        }
        &self.display
    }

    /// The display surface from the most recent [`render`](Self::render).
    pub fn display(&self) -> &RasterSurface {
        &self.display
    }
}
