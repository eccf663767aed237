use egui::{Color32, Pos2};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{error, info, warn};

use crate::error::{EditorError, EditorResult};
use crate::history::{HistoryEntry, SnapshotHistory};
use crate::layer::LayerId;
use crate::renderer::{CANVAS_BASE, Compositor};
use crate::stack::LayerStack;
use crate::surface::RasterSurface;
use crate::tools::{StrokeOutcome, ToolController, ToolKind, ToolState};
use crate::viewport::ViewportTransform;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

/// What kind of toast a notification renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient user-visible notice, queued by the session and drained by the
/// shell.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// The single aggregate owning all state of one editing session: the layer
/// stack, the compositor and its display surface, snapshot history, tool
/// settings, the stroke state machine and the viewport transform. Every
/// component receives it by reference; there is no module-level mutable
/// state.
///
/// All mutation is synchronous on the caller's thread. The one source of
/// non-synchronous ordering is history restore, where per-layer snapshot
/// decodes are futures completing in unspecified order; `undo`/`redo` drive
/// them to completion before returning, so no capture can overlap an
/// outstanding restore.
pub struct EditorSession {
    stack: LayerStack,
    compositor: Compositor,
    history: SnapshotHistory,
    tools: ToolState,
    controller: ToolController,
    viewport: ViewportTransform,
    notifications: Vec<Notification>,
    revision: u64,
}

impl EditorSession {
    pub fn new(width: u32, height: u32) -> Self {
        let stack = LayerStack::new(width, height);
        let mut compositor = Compositor::new(width, height);
        compositor.render(&stack);
        let mut session = Self {
            stack,
            compositor,
            history: SnapshotHistory::new(),
            tools: ToolState::default(),
            controller: ToolController::new(),
            viewport: ViewportTransform::new(),
            notifications: Vec::new(),
            revision: 0,
        };
        // baseline entry: the first stroke stays undoable back to the blank canvas
        session.capture();
        session
    }

    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportTransform {
        &mut self.viewport
    }

    /// The composite produced by the most recent recomposite.
    pub fn composite(&self) -> &RasterSurface {
        self.compositor.display()
    }

    pub fn stroke_in_progress(&self) -> bool {
        self.controller.is_drawing()
    }

    /// Bumped on every recomposite; lets the shell skip re-uploading an
    /// unchanged composite.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn recomposite(&mut self) {
        self.compositor.render(&self.stack);
        self.revision += 1;
    }

    // --- layer operations (each triggers a synchronous recomposite) ---

    pub fn add_layer(&mut self, name: Option<&str>) -> LayerId {
        let id = self.stack.add_layer(name);
        self.recomposite();
        id
    }

    /// Deletes a layer. Refusal to delete the last layer is surfaced to the
    /// user; the stack is unchanged in that case.
    pub fn delete_layer(&mut self, index: usize) -> EditorResult<()> {
        match self.stack.delete_layer(index) {
            Ok(()) => {
                self.recomposite();
                Ok(())
            }
            Err(err) => {
                if matches!(err, EditorError::InvalidOperation) {
                    self.notify_error("Cannot delete the last layer");
                }
                Err(err)
            }
        }
    }

    pub fn select_layer(&mut self, index: usize) -> EditorResult<()> {
        self.stack.select_layer(index)
    }

    pub fn set_layer_visibility(&mut self, index: usize, visible: bool) -> EditorResult<()> {
        self.stack.set_visibility(index, visible)?;
        self.recomposite();
        Ok(())
    }

    pub fn set_layer_opacity(&mut self, index: usize, opacity: f32) -> EditorResult<()> {
        self.stack.set_opacity(index, opacity)?;
        self.recomposite();
        Ok(())
    }

    /// Opacity as the 0–100 integer percentage the layer panel exposes.
    pub fn set_layer_opacity_percent(&mut self, index: usize, percent: u32) -> EditorResult<()> {
        self.set_layer_opacity(index, percent.min(100) as f32 / 100.0)
    }

    /// Clears the active layer; the background layer refills with the canvas
    /// base color. A destructive action, so it captures a history entry.
    pub fn clear_active_layer(&mut self) {
        let fill = if self.stack.active_index() == 0 {
            CANVAS_BASE
        } else {
            Color32::TRANSPARENT
        };
        self.stack.active_layer_mut().surface_mut().clear(fill);
        self.recomposite();
        self.capture();
    }

    // --- tool/UI selection surface ---

    pub fn set_tool(&mut self, tool: ToolKind) {
        info!("tool selected: {}", tool.name());
        self.tools.tool = tool;
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.tools.color = color;
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.tools.set_brush_size(size);
    }

    // --- stroke lifecycle (positions in device space) ---

    pub fn pointer_down(&mut self, device: Pos2) {
        let pos = self.viewport.to_canvas_space(device);
        self.controller.pointer_down(pos, &self.tools);
    }

    pub fn pointer_move(&mut self, device: Pos2) {
        let pos = self.viewport.to_canvas_space(device);
        let mutated = self
            .controller
            .pointer_move(pos, &self.tools, self.stack.active_layer_mut());
        if mutated {
            self.recomposite();
        }
    }

    pub fn pointer_up(&mut self) {
        if self.controller.pointer_up() == StrokeOutcome::Completed {
            self.capture();
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.controller.pointer_leave() == StrokeOutcome::Completed {
            self.capture();
        }
    }

    // --- history ---

    fn capture(&mut self) {
        if let Err(err) = self.history.capture(&self.stack) {
            error!("failed to capture history snapshot: {err}");
            self.notify_error("Could not record an undo step");
        }
    }

    /// Steps back one history entry. Returns whether anything was restored.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                self.apply_restore(entry);
                true
            }
            None => false,
        }
    }

    /// Steps forward one history entry. Returns whether anything was
    /// restored.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.apply_restore(entry);
                true
            }
            None => false,
        }
    }

    /// Decodes each per-layer snapshot as its own future and applies results
    /// in completion order, recompositing after every layer: the visible
    /// frame updates progressively and is only guaranteed consistent once
    /// all decodes have landed. Runs to completion before returning. A
    /// snapshot that fails to decode is skipped and reported; the remaining
    /// layers still restore.
    fn apply_restore(&mut self, entry: HistoryEntry) {
        let mut decodes: FuturesUnordered<_> = entry
            .snapshots()
            .iter()
            .enumerate()
            .map(|(index, snapshot)| {
                let snapshot = snapshot.clone();
                async move { (index, snapshot.decode()) }
            })
            .collect();
        futures::executor::block_on(async {
            while let Some((index, decoded)) = decodes.next().await {
                match decoded {
                    Ok(restored) => {
                        match self.stack.layer_mut(index) {
                            Some(layer) => {
                                let surface = layer.surface_mut();
                                surface.clear(Color32::TRANSPARENT);
                                surface.blit(&restored, 0, 0);
                            }
                            // the layer was deleted after this entry was captured
                            None => warn!("dropping snapshot for deleted layer {index}"),
                        }
                        self.recomposite();
                    }
                    Err(err) => {
                        error!("snapshot for layer {index} failed to decode: {err}");
                        self.notify_error("Could not restore part of the canvas");
                    }
                }
            }
        });
    }

    // --- notifications ---

    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind: NotificationKind::Success,
            message: message.into(),
        });
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind: NotificationKind::Error,
            message: message.into(),
        });
    }

    /// Drains everything queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}
