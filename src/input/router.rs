use egui::{Key, Modifiers};
use log::debug;

use crate::session::EditorSession;
use crate::tools::ToolKind;

use super::InputEvent;

/// Routes an input event into the session: pointer events feed the stroke
/// state machine, key presses go through the shortcut table.
pub fn route_event(event: &InputEvent, session: &mut EditorSession) {
    match event {
        InputEvent::PointerDown { position } => session.pointer_down(*position),
        InputEvent::PointerMoved { position } => session.pointer_move(*position),
        InputEvent::PointerUp { .. } => session.pointer_up(),
        InputEvent::PointerLeft => session.pointer_leave(),
        InputEvent::KeyPressed { key, modifiers } => handle_key(*key, *modifiers, session),
    }
}

fn handle_key(key: Key, modifiers: Modifiers, session: &mut EditorSession) {
    // Modifier chords are history shortcuts and are consumed here even when
    // they match nothing, so a plain-letter tool binding never fires with a
    // modifier held.
    if modifiers.command {
        match key {
            Key::Z => {
                debug!("shortcut: undo");
                session.undo();
            }
            Key::Y => {
                debug!("shortcut: redo");
                session.redo();
            }
            _ => {}
        }
        return;
    }
    if let Some(tool) = tool_for_key(key) {
        session.set_tool(tool);
    }
}

/// The single-letter tool bindings.
fn tool_for_key(key: Key) -> Option<ToolKind> {
    match key {
        Key::B => Some(ToolKind::Brush),
        Key::E => Some(ToolKind::Eraser),
        Key::F => Some(ToolKind::Fill),
        Key::I => Some(ToolKind::Picker),
        Key::L => Some(ToolKind::Line),
        Key::R => Some(ToolKind::Rect),
        Key::C => Some(ToolKind::Circle),
        Key::T => Some(ToolKind::Text),
        _ => None,
    }
}
