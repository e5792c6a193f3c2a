use romdoc_store::StoreError;

/// Errors that abort a whole generation run.
///
/// Per-record resolution failures are not represented here; drivers log them
/// and continue (the affected record keeps a null `activeBranch`).
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
