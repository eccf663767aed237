use thiserror::Error;

/// Errors surfaced by the editor core.
///
/// Structural failures (`InvalidOperation`, `OutOfRange`) are rejected at the
/// API boundary and never leave the stack or history in an invalid state.
/// Persistence and codec failures are reported to the user as transient
/// notifications; the editor stays usable.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The operation would violate a structural invariant, e.g. deleting the
    /// last remaining layer.
    #[error("cannot delete the last remaining layer")]
    InvalidOperation,

    /// A layer index that does not exist in the stack.
    #[error("layer index {index} is out of range ({count} layers)")]
    OutOfRange { index: usize, count: usize },

    /// The save request was rejected or never reached the store.
    #[error("save failed: {0}")]
    PersistenceFailure(String),

    /// A history snapshot could not be decoded during restore.
    #[error("failed to decode layer snapshot: {0}")]
    DecodeFailure(#[source] image::ImageError),

    /// A layer surface could not be encoded during capture.
    #[error("failed to encode layer snapshot: {0}")]
    EncodeFailure(#[source] image::ImageError),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
