use egui::{Context, Key, Modifiers, Pos2, Rect};

mod router;
pub use router::route_event;

/// Input events the editor routes, already reduced from raw device input.
/// Pointer positions are in device (screen) space; the session runs them
/// through the viewport transform.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Primary button pressed over the canvas.
    PointerDown { position: Pos2 },
    /// Pointer moved while over the canvas.
    PointerMoved { position: Pos2 },
    /// Primary button released.
    PointerUp { position: Pos2 },
    /// Pointer left the canvas area; ends any stroke in progress.
    PointerLeft,
    /// A key press with the modifier state at press time.
    KeyPressed { key: Key, modifiers: Modifiers },
}

/// Converts raw egui input into editor [`InputEvent`]s. Tracks the canvas
/// rectangle (refreshed by the shell each frame) so only canvas-area pointer
/// activity becomes pointer events.
pub struct InputCollector {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
    pointer_over_canvas: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect: None,
            pointer_over_canvas: false,
        }
    }

    /// Update the canvas rectangle from the shell's layout pass.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    /// Process raw egui input and generate our InputEvents.
    pub fn collect(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            // Keyboard shortcuts apply wherever the pointer is.
            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyPressed {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }

            let Some(rect) = self.canvas_rect else {
                return;
            };

            if let Some(pos) = input.pointer.hover_pos() {
                let over = rect.contains(pos);

                if self.pointer_over_canvas && !over {
                    events.push(InputEvent::PointerLeft);
                }

                if over {
                    if input.pointer.primary_pressed() {
                        events.push(InputEvent::PointerDown { position: pos });
                    }
                    if Some(pos) != self.last_pointer_pos {
                        events.push(InputEvent::PointerMoved { position: pos });
                    }
                }
                // A release ends the stroke wherever it happens.
                if input.pointer.primary_released() {
                    events.push(InputEvent::PointerUp { position: pos });
                }

                self.pointer_over_canvas = over;
                self.last_pointer_pos = Some(pos);
            } else if self.last_pointer_pos.take().is_some() {
                // Pointer left the window entirely.
                if self.pointer_over_canvas {
                    events.push(InputEvent::PointerLeft);
                }
                self.pointer_over_canvas = false;
            }
        });

        events
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}
