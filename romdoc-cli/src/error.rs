use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Store configuration or transport error
    #[error("{0}")]
    Store(#[from] romdoc_store::StoreError),

    /// Generation run failed at the top level
    #[error("{0}")]
    Snapshot(#[from] romdoc_snapshot::SnapshotError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
