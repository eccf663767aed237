use egui::{Color32, Pos2};

use crate::layer::Layer;
use crate::renderer::CANVAS_BASE;

use super::ToolState;

/// Stroke lifecycle. `Drawing` remembers the last canvas-space point so each
/// pointer move strokes one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StrokeState {
    Idle,
    Drawing { last: Pos2 },
}

/// What ending a pointer interaction produced. `Completed` means a stroke
/// was finalized and the caller should capture a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    Completed,
    Ignored,
}

/// The stroke state machine consuming canvas-space pointer events and
/// mutating the active layer's surface.
///
/// `Idle --pointer_down--> Drawing` only for tools where
/// [`ToolKind::draws`](super::ToolKind::draws) holds; every other tool keeps
/// the controller in `Idle` and its pointer events mutate nothing.
pub struct ToolController {
    state: StrokeState,
}

impl ToolController {
    pub fn new() -> Self {
        Self {
            state: StrokeState::Idle,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Begins a stroke at `pos`. Returns whether a stroke actually started.
    /// Nothing is painted until the pointer moves; the first segment's round
    /// cap covers the start point.
    pub fn pointer_down(&mut self, pos: Pos2, tools: &ToolState) -> bool {
        if !tools.tool.draws() {
            return false;
        }
        self.state = StrokeState::Drawing { last: pos };
        true
    }

    /// Extends the stroke to `pos`, painting the segment immediately so the
    /// stroke shows up as it is drawn. Returns whether the layer was
    /// mutated (the caller recomposites if so).
    pub fn pointer_move(&mut self, pos: Pos2, tools: &ToolState, layer: &mut Layer) -> bool {
        let StrokeState::Drawing { last } = self.state else {
            return false;
        };
        layer
            .surface_mut()
            .stroke_line(last, pos, tools.brush_size as f32, stroke_color(tools));
        self.state = StrokeState::Drawing { last: pos };
        true
    }

    /// Finalizes the stroke, if one is in progress.
    pub fn pointer_up(&mut self) -> StrokeOutcome {
        match std::mem::replace(&mut self.state, StrokeState::Idle) {
            StrokeState::Drawing { .. } => StrokeOutcome::Completed,
            StrokeState::Idle => StrokeOutcome::Ignored,
        }
    }

    /// The pointer leaving the canvas ends a stroke the same way a release
    /// does.
    pub fn pointer_leave(&mut self) -> StrokeOutcome {
        self.pointer_up()
    }
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new()
    }
}

// The eraser is a same-color overstroke in the canvas base color, not true
// alpha erasure: erasing never reveals content on the layers below.
fn stroke_color(tools: &ToolState) -> Color32 {
    match tools.tool {
        super::ToolKind::Eraser => CANVAS_BASE,
        _ => tools.color,
    }
}
