use base64::Engine as _;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use inkverse::error::{EditorError, EditorResult};
use inkverse::persist::{
    DrawingStore, MemoryStore, SaveRequest, SavedDrawing, export_filename,
};
use inkverse::session::EditorSession;
use inkverse::surface::RasterSurface;

#[test]
fn save_request_carries_a_png_data_url_of_the_composite() {
    let session = EditorSession::new(16, 16);
    let request = SaveRequest::new("sunset", session.composite(), true).unwrap();
    assert_eq!(request.title, "sunset");
    assert!(request.is_public);

    let prefix = "data:image/png;base64,";
    assert!(request.image_data.starts_with(prefix));
    let png = base64::engine::general_purpose::STANDARD
        .decode(&request.image_data[prefix.len()..])
        .unwrap();
    let decoded = RasterSurface::decode_png(&png).unwrap();
    assert_eq!(&decoded, session.composite());
}

#[test]
fn wire_body_uses_the_contract_field_names() {
    let surface = RasterSurface::new(2, 2);
    let request = SaveRequest::new("t", &surface, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
    assert!(value.get("title").is_some());
    assert!(value.get("image_data").is_some());
    assert!(value.get("is_public").is_some());
}

#[test]
fn memory_store_persists_and_mints_an_id() {
    let store = MemoryStore::new();
    let request = SaveRequest::new("doodle", &RasterSurface::new(4, 4), false).unwrap();
    let saved = block_on(store.save_drawing("bearer-token", request)).unwrap();

    let records = store.saved();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, saved.id);
    assert_eq!(records[0].1.title, "doodle");
    assert!(!records[0].1.is_public);
}

#[test]
fn a_missing_credential_is_a_persistence_failure() {
    let store = MemoryStore::new();
    let request = SaveRequest::new("doodle", &RasterSurface::new(4, 4), false).unwrap();
    let result = block_on(store.save_drawing("", request));
    assert!(matches!(result, Err(EditorError::PersistenceFailure(_))));
    assert!(store.saved().is_empty());
}

#[test]
fn a_failing_store_never_touches_editor_state() {
    struct DownStore;
    impl DrawingStore for DownStore {
        fn save_drawing(
            &self,
            _token: &str,
            _request: SaveRequest,
        ) -> LocalBoxFuture<'static, EditorResult<SavedDrawing>> {
            Box::pin(async {
                Err(EditorError::PersistenceFailure(
                    "connection refused".to_string(),
                ))
            })
        }
    }

    let session = EditorSession::new(8, 8);
    let before = session.composite().clone();
    let request = SaveRequest::new("x", session.composite(), false).unwrap();
    let result = block_on(DownStore.save_drawing("token", request));
    assert!(result.is_err());

    // the failure is a notification, never lost editor state
    assert_eq!(session.composite(), &before);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn export_names_default_to_drawing_png() {
    assert_eq!(export_filename(""), "drawing.png");
    assert_eq!(export_filename("   "), "drawing.png");
    assert_eq!(export_filename("sunset"), "sunset.png");
}
