//! Staged batch operations: begin → add → end.
//!
//! A task collects the items of one multi-step operation (a rename batch or
//! a recognize batch) while an operator reviews the preview. Nothing is
//! committed until `end`, which hands the full item list back exactly once
//! and removes the task. The registry is the only owner; callers hold
//! opaque ids that survive a serialized request/response boundary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use flickshelf_core::files::ExtensionTable;

use crate::error::EngineError;

/// What a batch does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Rename,
    Recognize,
}

/// Opaque task identity. Allocation is monotonic for the process lifetime;
/// ids are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One staged rename: `from` → `to`, both absolute forward-slash paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameItem {
    pub from: String,
    pub to: String,
}

/// One staged recognition: this file represents (season, episode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizeItem {
    pub season: u32,
    pub episode: u32,
    pub path: String,
}

/// One item to stage; must match the task's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskItem {
    Rename(RenameItem),
    Recognize(RecognizeItem),
}

/// A task's collected items, homogeneous with its kind. Items keep their
/// insertion order; duplicates are the caller's responsibility, since
/// ordering can matter for downstream collision resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskItems {
    Rename(Vec<RenameItem>),
    Recognize(Vec<RecognizeItem>),
}

impl TaskItems {
    pub fn len(&self) -> usize {
        match self {
            Self::Rename(items) => items.len(),
            Self::Recognize(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A pending multi-step operation owned by the registry.
#[derive(Debug, Clone)]
pub struct BatchTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub folder_path: String,
    pub items: TaskItems,
}

/// A finalized batch, handed out by [`TaskRegistry::end`] exactly once.
#[derive(Debug, Clone)]
pub struct FinalizedTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub folder_path: String,
    pub items: TaskItems,
}

/// Non-exceptional outcome of `end`. "Finalize a task I may have already
/// finalized" is an expected caller pattern, so the unknown-id case is a
/// value, not an error.
#[derive(Debug)]
pub enum EndOutcome {
    Completed(FinalizedTask),
    /// Unknown id: never allocated, or already finalized.
    NotFound,
    /// The task has no items and stays pending.
    Empty { kind: TaskKind },
}

impl EndOutcome {
    /// Boundary error message for the failure outcomes.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Completed(_) => None,
            Self::NotFound => Some("Task not found"),
            Self::Empty {
                kind: TaskKind::Rename,
            } => Some("No files in task"),
            Self::Empty {
                kind: TaskKind::Recognize,
            } => Some("No recognized files in task"),
        }
    }
}

/// In-memory store of pending tasks, keyed by opaque id.
///
/// One process-scoped instance owns every task; it is constructor-injected
/// into the operation layer rather than reached as ambient state. Tasks do
/// not survive a restart, and abandoned pending tasks are never evicted
/// (an accepted leak until a cleanup policy exists).
#[derive(Debug)]
pub struct TaskRegistry {
    tasks: HashMap<TaskId, BatchTask>,
    next_id: AtomicU64,
    extensions: ExtensionTable,
}

impl TaskRegistry {
    pub fn new(extensions: ExtensionTable) -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: AtomicU64::new(1),
            extensions,
        }
    }

    /// Start an empty pending task for a media folder and return its id.
    pub fn begin(&mut self, kind: TaskKind, folder_path: &str) -> Result<TaskId, EngineError> {
        if folder_path.trim().is_empty() {
            return Err(EngineError::InvalidPath);
        }

        let id = TaskId(format!("task-{}", self.next_id.fetch_add(1, Ordering::Relaxed)));
        let items = match kind {
            TaskKind::Rename => TaskItems::Rename(Vec::new()),
            TaskKind::Recognize => TaskItems::Recognize(Vec::new()),
        };
        self.tasks.insert(
            id.clone(),
            BatchTask {
                id: id.clone(),
                kind,
                folder_path: folder_path.to_string(),
                items,
            },
        );
        log::debug!("Task {id} started ({kind:?}, folder {folder_path})");
        Ok(id)
    }

    /// Append one item to a pending task.
    ///
    /// Validation happens before anything is recorded, so a rejected add
    /// leaves the task exactly as it was. Identical items may be added more
    /// than once; retry-after-failure is safe.
    pub fn add(&mut self, id: &TaskId, item: TaskItem) -> Result<(), EngineError> {
        let task = self.tasks.get_mut(id).ok_or(EngineError::TaskNotFound)?;

        match (&mut task.items, item) {
            (TaskItems::Rename(items), TaskItem::Rename(item)) => {
                if item.from.trim().is_empty() || item.to.trim().is_empty() {
                    return Err(EngineError::invalid_item(
                        "Rename item requires both from and to paths",
                    ));
                }
                if !self.extensions.is_video(&item.from) || !self.extensions.is_video(&item.to) {
                    return Err(EngineError::invalid_item(
                        "Rename item paths must have a video extension",
                    ));
                }
                items.push(item);
            }
            (TaskItems::Recognize(items), TaskItem::Recognize(item)) => {
                if item.path.trim().is_empty() {
                    return Err(EngineError::invalid_item(
                        "Recognize item requires a file path",
                    ));
                }
                items.push(item);
            }
            (_, item) => {
                let item_kind = match item {
                    TaskItem::Rename(_) => TaskKind::Rename,
                    TaskItem::Recognize(_) => TaskKind::Recognize,
                };
                return Err(EngineError::invalid_item(format!(
                    "{item_kind:?} item does not match task kind {:?}",
                    task.kind
                )));
            }
        }
        Ok(())
    }

    /// Finalize a pending task: hand back its items and remove it.
    ///
    /// A second `end` for the same id, or an `end` for an id that never
    /// existed, yields [`EndOutcome::NotFound`]. A task with zero items is
    /// rejected and stays pending.
    pub fn end(&mut self, id: &TaskId) -> EndOutcome {
        let Some(task) = self.tasks.remove(id) else {
            return EndOutcome::NotFound;
        };
        if task.items.is_empty() {
            // Rejected, not consumed; the empty task stays pending.
            let kind = task.kind;
            self.tasks.insert(id.clone(), task);
            return EndOutcome::Empty { kind };
        }

        log::debug!("Task {} finalized with {} items", task.id, task.items.len());
        EndOutcome::Completed(FinalizedTask {
            id: task.id,
            kind: task.kind,
            folder_path: task.folder_path,
            items: task.items,
        })
    }

    /// Read-only view of a pending task.
    pub fn get(&self, id: &TaskId) -> Option<&BatchTask> {
        self.tasks.get(id)
    }

    /// Number of pending tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
#[path = "tests/tasks_tests.rs"]
mod tests;
