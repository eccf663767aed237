#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod error;
pub mod surface;
pub mod layer;
pub mod stack;
pub mod renderer;
pub mod viewport;
pub mod tools;
pub mod history;
pub mod session;
pub mod input;
pub mod persist;

pub use app::SketchApp;
pub use error::{EditorError, EditorResult};
pub use surface::RasterSurface;
pub use layer::{Layer, LayerId};
pub use stack::LayerStack;
pub use renderer::{CANVAS_BASE, Compositor};
pub use viewport::ViewportTransform;
pub use tools::{StrokeOutcome, ToolController, ToolKind, ToolState};
pub use history::{HistoryEntry, LayerSnapshot, SnapshotHistory};
pub use session::{EditorSession, Notification, NotificationKind};
pub use input::{InputCollector, InputEvent, route_event};
pub use persist::{DrawingStore, MemoryStore, SaveRequest, SavedDrawing};
