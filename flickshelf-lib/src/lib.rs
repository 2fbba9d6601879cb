//! The flickshelf engine.
//!
//! Ties the pieces together: sibling-file association, season/episode
//! reconciliation from any of four sources of truth, and the staged
//! batch-task lifecycle (begin → add → end) that turns an approved preview
//! into a finalized plan. Execution of finalized plans is the frontend's
//! job; nothing in this crate touches the filesystem.

pub mod associate;
pub mod builder;
pub mod error;
pub mod ops;
pub mod settings;
pub mod tasks;

pub use associate::match_associated_files;
pub use builder::{ReconcileInput, ReconcileSource, build_season_models};
pub use error::EngineError;
pub use ops::{EndReport, Engine};
pub use tasks::{
    BatchTask, EndOutcome, FinalizedTask, RecognizeItem, RenameItem, TaskId, TaskItem, TaskItems,
    TaskKind, TaskRegistry,
};
