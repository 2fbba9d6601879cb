//! The transport-agnostic operation surface.
//!
//! One [`Engine`] instance per process owns the task registry and the
//! extension table; frontends (CLI, a tool-calling transport, tests) talk
//! to it through these methods and serializable report types. Paths in and
//! out are POSIX-style strings.

use serde::{Deserialize, Serialize};

use flickshelf_core::files::{ExtensionTable, TaggedFile};
use flickshelf_core::mapping::MappingTable;
use flickshelf_core::media::{MediaFolder, SeasonModel, Show};
use flickshelf_nfo::{CancelToken, DescriptorSource, bootstrap_folder};

use crate::associate;
use crate::builder::{self, ReconcileInput, ReconcileSource};
use crate::error::EngineError;
use crate::tasks::{EndOutcome, TaskId, TaskItem, TaskKind, TaskRegistry};

/// Process-scoped engine facade.
pub struct Engine {
    registry: TaskRegistry,
    extensions: ExtensionTable,
}

impl Engine {
    pub fn new(extensions: ExtensionTable) -> Self {
        Self {
            registry: TaskRegistry::new(extensions.clone()),
            extensions,
        }
    }

    pub fn extensions(&self) -> &ExtensionTable {
        &self.extensions
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Start a batch task. Fails with "Invalid path" for an empty or
    /// whitespace-only folder path.
    pub fn begin_task(&mut self, kind: TaskKind, folder_path: &str) -> Result<TaskId, EngineError> {
        self.registry.begin(kind, folder_path)
    }

    /// Stage one item on a pending task.
    pub fn add_item(&mut self, id: &TaskId, item: TaskItem) -> Result<(), EngineError> {
        self.registry.add(id, item)
    }

    /// Finalize a pending task. Never fails; the failure modes are
    /// structured outcomes, see [`EndOutcome`].
    pub fn end_task(&mut self, id: &TaskId) -> EndOutcome {
        self.registry.end(id)
    }

    /// Find the sibling artifacts of an anchor video; see
    /// [`associate::match_associated_files`].
    pub fn match_associated_files(
        &self,
        folder_path: &str,
        files: &[String],
        anchor_path: &str,
    ) -> Vec<TaggedFile> {
        associate::match_associated_files(folder_path, files, anchor_path, &self.extensions)
    }

    /// Build the ordered season/episode/file preview tree from one source
    /// of truth.
    pub fn build_season_models(
        &self,
        folder_path: &str,
        files: &[String],
        show: &Show,
        mappings: &MappingTable,
        source: ReconcileSource<'_>,
    ) -> Vec<SeasonModel> {
        let input = ReconcileInput {
            folder_path,
            files,
            show,
            mappings,
            extensions: &self.extensions,
        };
        builder::build_season_models(&input, source)
    }

    /// Bootstrap canonical metadata for a folder from its on-disk
    /// descriptors. Returns `Ok(None)` when the folder is not
    /// recognizable; on success the returned folder carries the new show
    /// metadata and resolved mappings (nothing is persisted here).
    pub fn bootstrap_from_descriptors(
        &self,
        folder: &MediaFolder,
        source: &dyn DescriptorSource,
        cancel: &CancelToken,
    ) -> Result<Option<MediaFolder>, EngineError> {
        let outcome = bootstrap_folder(&folder.path, &folder.files, source, cancel)?;
        Ok(outcome.map(|outcome| {
            let mut updated = folder.clone();
            updated.show = Some(outcome.show);
            for mapping in outcome.mappings {
                updated.mappings.insert(mapping);
            }
            updated
        }))
    }
}

/// Boundary-serializable report of an `end` call: either
/// `{success: true, task_id, item_count}` or `{success: false, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&EndOutcome> for EndReport {
    fn from(outcome: &EndOutcome) -> Self {
        match outcome {
            EndOutcome::Completed(task) => Self {
                success: true,
                task_id: Some(task.id.clone()),
                item_count: Some(task.items.len()),
                error: None,
            },
            other => Self {
                success: false,
                task_id: None,
                item_count: None,
                error: other.error_message().map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::RecognizeItem;

    #[test]
    fn test_end_report_serialization() {
        let mut engine = Engine::new(ExtensionTable::default());
        let id = engine
            .begin_task(TaskKind::Recognize, "/media/show")
            .unwrap();
        engine
            .add_item(
                &id,
                TaskItem::Recognize(RecognizeItem {
                    season: 1,
                    episode: 1,
                    path: "/media/show/S01E01.mkv".to_string(),
                }),
            )
            .unwrap();

        let report = EndReport::from(&engine.end_task(&id));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["item_count"], 1);
        assert!(json.get("error").is_none());

        let report = EndReport::from(&engine.end_task(&id));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Task not found");
    }
}
