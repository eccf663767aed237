use std::sync::Arc;

use crate::error::EditorResult;
use crate::stack::LayerStack;
use crate::surface::RasterSurface;

/// One layer surface encoded as a lossless PNG at capture time. Cheap to
/// clone; the bytes are shared, so snapshots can move into decode futures
/// without copying.
#[derive(Clone)]
pub struct LayerSnapshot {
    png: Arc<Vec<u8>>,
}

impl LayerSnapshot {
    fn of(surface: &RasterSurface) -> EditorResult<Self> {
        Ok(Self {
            png: Arc::new(surface.encode_png()?),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.png
    }

    /// Decodes the snapshot back into a surface.
    pub fn decode(&self) -> EditorResult<RasterSurface> {
        RasterSurface::decode_png(&self.png)
    }
}

/// Every layer's snapshot at one point in time, in stack order at capture
/// time. Immutable once appended.
#[derive(Clone)]
pub struct HistoryEntry {
    snapshots: Vec<LayerSnapshot>,
}

impl HistoryEntry {
    pub fn snapshots(&self) -> &[LayerSnapshot] {
        &self.snapshots
    }
}

/// Whole-stack snapshot history with a cursor.
///
/// Entries are appended on stroke completion and explicit destructive
/// actions. Capturing while the cursor sits before the last entry discards
/// the redo branch; branches are truncated, never merged. The sequence is
/// unbounded: every capture keeps a full multi-layer snapshot for the life
/// of the session, so memory grows with edit count.
pub struct SnapshotHistory {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Encodes every layer in stack order and appends the result as a new
    /// entry, truncating any redo branch first. The cursor ends on the new
    /// entry.
    pub fn capture(&mut self, stack: &LayerStack) -> EditorResult<()> {
        let snapshots = stack
            .layers()
            .iter()
            .map(|layer| LayerSnapshot::of(layer.surface()))
            .collect::<EditorResult<Vec<_>>>()?;
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(HistoryEntry { snapshots });
        self.cursor = Some(self.entries.len() - 1);
        Ok(())
    }

    /// Steps the cursor back and returns the entry to restore, or `None`
    /// when already at the first entry.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        Some(self.entries[cursor - 1].clone())
    }

    /// Steps the cursor forward and returns the entry to restore, or `None`
    /// when already at the last entry.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        Some(self.entries[cursor + 1].clone())
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new()
    }
}
