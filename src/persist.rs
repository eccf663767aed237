use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::LocalBoxFuture;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};
use crate::surface::RasterSurface;

/// Wire body of a save request: the drawing's title, the full-canvas
/// composite as a `data:image/png;base64,…` URL, and the gallery visibility
/// flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub title: String,
    pub image_data: String,
    pub is_public: bool,
}

impl SaveRequest {
    pub fn new(title: &str, composite: &RasterSurface, is_public: bool) -> EditorResult<Self> {
        Ok(Self {
            title: title.to_string(),
            image_data: to_data_url(composite)?,
            is_public,
        })
    }

    /// The JSON body an HTTP store implementation would send.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The identifier the store assigned to a persisted drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDrawing {
    pub id: Uuid,
}

/// The external store the editor saves finished drawings to.
///
/// Implementations authenticate with the bearer token and resolve
/// asynchronously. The editor treats a save as fire-and-forget: the shell
/// polls the returned future, surfaces success or failure as a toast, and
/// never retries. No structured error reaches the editor state.
pub trait DrawingStore {
    fn save_drawing(
        &self,
        token: &str,
        request: SaveRequest,
    ) -> LocalBoxFuture<'static, EditorResult<SavedDrawing>>;
}

/// In-memory [`DrawingStore`]: saves land in a shared record list. Used
/// offline and by tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<(Uuid, SaveRequest)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far.
    pub fn saved(&self) -> Vec<(Uuid, SaveRequest)> {
        self.records.lock().clone()
    }
}

impl DrawingStore for MemoryStore {
    fn save_drawing(
        &self,
        token: &str,
        request: SaveRequest,
    ) -> LocalBoxFuture<'static, EditorResult<SavedDrawing>> {
        let records = Arc::clone(&self.records);
        let authorized = !token.is_empty();
        Box::pin(async move {
            if !authorized {
                return Err(EditorError::PersistenceFailure(
                    "missing bearer credential".to_string(),
                ));
            }
            let id = Uuid::new_v4();
            records.lock().push((id, request));
            Ok(SavedDrawing { id })
        })
    }
}

/// Encodes a surface as the data URL the save contract carries.
pub fn to_data_url(surface: &RasterSurface) -> EditorResult<String> {
    let png = surface.encode_png()?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

/// The file name offered for a client-side export; untitled drawings export
/// as "drawing.png".
pub fn export_filename(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        "drawing.png".to_string()
    } else {
        format!("{title}.png")
    }
}
