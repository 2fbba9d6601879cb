use thiserror::Error;

use flickshelf_nfo::NfoError;

/// Errors returned at the operation boundary for malformed input.
///
/// State-machine outcomes (`end` on an unknown/empty task) are not errors;
/// they are values, see [`crate::tasks::EndOutcome`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Empty or whitespace-only media folder path.
    #[error("Invalid path")]
    InvalidPath,

    /// The task id was never allocated, or the task is already finalized.
    #[error("Task not found")]
    TaskNotFound,

    /// An item failed per-kind validation; the task is left untouched.
    #[error("{0}")]
    InvalidItem(String),

    /// Descriptor bootstrap failure surfaced through the facade.
    #[error(transparent)]
    Nfo(#[from] NfoError),
}

impl EngineError {
    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self::InvalidItem(msg.into())
    }
}
