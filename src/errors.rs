use thiserror::Error;

/// Represents errors that can abort a board export as a whole.
///
/// Per-node anomalies (an unsupported node kind, an unresolvable paint stack)
/// are absorbed during extraction and never surface here; one malformed node
/// must not sink the whole export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The user invoked the export with nothing selected on the board.
    #[error("Nothing is selected. Select at least one object on the board and try again.")]
    EmptySelection,

    /// The selection payload posted by the host-side bridge failed to parse.
    #[error("Failed to parse the selection payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The export document could not be rendered to JSON text.
    #[error("Failed to serialize the export document: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Error occurred while assembling output text (e.g., the XML document).
    #[error("Formatting error during export generation: {0}")]
    Format(#[from] std::fmt::Error),
}

/// A type alias for `Result<T, ExportError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ExportError>;
