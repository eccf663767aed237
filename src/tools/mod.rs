use egui::Color32;
use serde::{Deserialize, Serialize};

mod controller;
pub use controller::{StrokeOutcome, ToolController};

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;

/// The fixed swatch set offered next to the free color picker.
pub const SWATCHES: [Color32; 8] = [
    Color32::BLACK,
    Color32::WHITE,
    Color32::from_rgb(230, 57, 70),
    Color32::from_rgb(244, 162, 97),
    Color32::from_rgb(233, 196, 106),
    Color32::from_rgb(42, 157, 143),
    Color32::from_rgb(69, 123, 157),
    Color32::from_rgb(131, 56, 236),
];

/// Every selectable tool mode.
///
/// Only `Brush` and `Eraser` reach the drawing transitions of the stroke
/// state machine. The rest are selectable and keyboard-mapped but have no
/// transition out of `Idle`: pointer events while they are active are
/// no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Brush,
    Eraser,
    Fill,
    Picker,
    Line,
    Rect,
    Circle,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Picker,
        ToolKind::Line,
        ToolKind::Rect,
        ToolKind::Circle,
        ToolKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Fill => "fill",
            ToolKind::Picker => "picker",
            ToolKind::Line => "line",
            ToolKind::Rect => "rect",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
        }
    }

    /// Whether this tool drives the stroke state machine.
    pub fn draws(self) -> bool {
        matches!(self, ToolKind::Brush | ToolKind::Eraser)
    }
}

/// Session-scoped tool settings, mutated by UI selection and keyboard
/// shortcuts. The transient stroke-in-progress state lives in
/// [`ToolController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub tool: ToolKind,
    pub color: Color32,
    pub brush_size: u32,
}

impl ToolState {
    /// Sets the brush size, clamped into the supported range.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            color: Color32::BLACK,
            brush_size: 5,
        }
    }
}
