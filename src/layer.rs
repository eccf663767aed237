use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use egui::Color32;

use crate::surface::RasterSurface;

// Single static counter for all layers
static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for a layer, monotonic in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Gets the underlying value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single layer in the stack: one raster surface plus the attributes the
/// compositor reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    name: String,
    surface: RasterSurface,
    visible: bool,
    opacity: f32,
}

impl Layer {
    /// Creates a layer sized to the canvas. `base_fill` pre-fills the
    /// surface; `None` leaves it fully transparent.
    pub(crate) fn new(name: &str, width: u32, height: u32, base_fill: Option<Color32>) -> Self {
        let surface = match base_fill {
            Some(color) => RasterSurface::filled(width, height, color),
            None => RasterSurface::new(width, height),
        };
        Self {
            id: LayerId::next(),
            name: name.to_string(),
            surface,
            visible: true,
            opacity: 1.0,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Uniform opacity in [0, 1] applied on top of per-pixel alpha.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets the opacity, clamping out-of-range values into [0, 1].
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }
}
