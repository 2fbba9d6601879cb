use super::*;

fn registry() -> TaskRegistry {
    TaskRegistry::new(ExtensionTable::default())
}

fn rename_item(from: &str, to: &str) -> TaskItem {
    TaskItem::Rename(RenameItem {
        from: from.to_string(),
        to: to.to_string(),
    })
}

fn recognize_item(season: u32, episode: u32, path: &str) -> TaskItem {
    TaskItem::Recognize(RecognizeItem {
        season,
        episode,
        path: path.to_string(),
    })
}

#[test]
fn test_begin_rejects_blank_paths() {
    let mut reg = registry();
    let err = reg.begin(TaskKind::Recognize, "").unwrap_err();
    assert_eq!(err.to_string(), "Invalid path");
    let err = reg.begin(TaskKind::Rename, "   ").unwrap_err();
    assert_eq!(err.to_string(), "Invalid path");
    assert_eq!(reg.pending(), 0);
}

#[test]
fn test_begin_allocates_fresh_ids() {
    let mut reg = registry();
    let a = reg.begin(TaskKind::Rename, "/media/show").unwrap();
    let b = reg.begin(TaskKind::Rename, "/media/show").unwrap();
    assert_ne!(a, b);
    assert_eq!(reg.pending(), 2);
}

#[test]
fn test_add_unknown_task() {
    let mut reg = registry();
    let ghost = TaskId("task-999".to_string());
    let err = reg.add(&ghost, recognize_item(1, 1, "/m/a.mkv")).unwrap_err();
    assert!(matches!(err, EngineError::TaskNotFound));
    assert_eq!(err.to_string(), "Task not found");
}

#[test]
fn test_add_kind_mismatch_rejected() {
    let mut reg = registry();
    let id = reg.begin(TaskKind::Rename, "/m").unwrap();
    let err = reg.add(&id, recognize_item(1, 1, "/m/a.mkv")).unwrap_err();
    assert!(matches!(err, EngineError::InvalidItem(_)));
    assert!(reg.get(&id).unwrap().items.is_empty());
}

#[test]
fn test_add_rename_validation() {
    let mut reg = registry();
    let id = reg.begin(TaskKind::Rename, "/m").unwrap();

    // Empty paths
    assert!(reg.add(&id, rename_item("", "/m/b.mkv")).is_err());
    assert!(reg.add(&id, rename_item("/m/a.mkv", " ")).is_err());
    // Non-video extensions
    assert!(reg.add(&id, rename_item("/m/a.txt", "/m/b.mkv")).is_err());
    assert!(reg.add(&id, rename_item("/m/a.mkv", "/m/b.srt")).is_err());
    // Nothing was recorded by the rejected adds
    assert!(reg.get(&id).unwrap().items.is_empty());

    reg.add(&id, rename_item("/m/a.mkv", "/m/b.mkv")).unwrap();
    assert_eq!(reg.get(&id).unwrap().items.len(), 1);
}

#[test]
fn test_add_recognize_validation() {
    let mut reg = registry();
    let id = reg.begin(TaskKind::Recognize, "/m").unwrap();

    assert!(reg.add(&id, recognize_item(1, 1, "")).is_err());
    assert!(reg.get(&id).unwrap().items.is_empty());

    reg.add(&id, recognize_item(0, 1, "/m/special.mkv")).unwrap();
    assert_eq!(reg.get(&id).unwrap().items.len(), 1);
}

#[test]
fn test_duplicate_items_are_kept() {
    // Deduplication is the caller's responsibility; ordering can matter
    // downstream.
    let mut reg = registry();
    let id = reg.begin(TaskKind::Recognize, "/m").unwrap();
    reg.add(&id, recognize_item(1, 1, "/m/a.mkv")).unwrap();
    reg.add(&id, recognize_item(1, 1, "/m/a.mkv")).unwrap();
    assert_eq!(reg.get(&id).unwrap().items.len(), 2);
}

#[test]
fn test_failed_add_leaves_task_unchanged() {
    let mut reg = registry();
    let id = reg.begin(TaskKind::Rename, "/m").unwrap();
    reg.add(&id, rename_item("/m/a.mkv", "/m/b.mkv")).unwrap();
    assert!(reg.add(&id, rename_item("/m/bad.txt", "/m/c.mkv")).is_err());

    let task = reg.get(&id).unwrap();
    assert_eq!(task.items.len(), 1);
    match &task.items {
        TaskItems::Rename(items) => assert_eq!(items[0].from, "/m/a.mkv"),
        _ => panic!("wrong kind"),
    }
}

#[test]
fn test_end_empty_task_rejected() {
    let mut reg = registry();
    let rename = reg.begin(TaskKind::Rename, "/m").unwrap();
    let recognize = reg.begin(TaskKind::Recognize, "/m").unwrap();

    let outcome = reg.end(&rename);
    assert_eq!(outcome.error_message(), Some("No files in task"));
    let outcome = reg.end(&recognize);
    assert_eq!(outcome.error_message(), Some("No recognized files in task"));

    // Both tasks are still pending and can be completed later
    assert_eq!(reg.pending(), 2);
    reg.add(&rename, rename_item("/m/a.mkv", "/m/b.mkv")).unwrap();
    assert!(matches!(reg.end(&rename), EndOutcome::Completed(_)));
}

#[test]
fn test_single_finalize() {
    let mut reg = registry();
    let id = reg.begin(TaskKind::Recognize, "/media/show").unwrap();
    reg.add(&id, recognize_item(1, 1, "/media/show/S01E01.mkv"))
        .unwrap();

    match reg.end(&id) {
        EndOutcome::Completed(task) => {
            assert_eq!(task.id, id);
            assert_eq!(task.kind, TaskKind::Recognize);
            assert_eq!(task.folder_path, "/media/show");
            assert_eq!(task.items.len(), 1);
        }
        other => panic!("expected Completed, got {other:?}"),
    }

    // The registry no longer knows the id
    let outcome = reg.end(&id);
    assert_eq!(outcome.error_message(), Some("Task not found"));
    assert_eq!(reg.pending(), 0);
}

#[test]
fn test_interleaved_tasks_are_independent() {
    let mut reg = registry();
    let a = reg.begin(TaskKind::Rename, "/m").unwrap();
    let b = reg.begin(TaskKind::Recognize, "/m").unwrap();

    reg.add(&a, rename_item("/m/a.mkv", "/m/a2.mkv")).unwrap();
    reg.add(&b, recognize_item(1, 1, "/m/a2.mkv")).unwrap();
    reg.add(&a, rename_item("/m/b.mkv", "/m/b2.mkv")).unwrap();

    assert_eq!(reg.get(&a).unwrap().items.len(), 2);
    assert_eq!(reg.get(&b).unwrap().items.len(), 1);

    assert!(matches!(reg.end(&b), EndOutcome::Completed(_)));
    // Ending b does not disturb a
    assert_eq!(reg.get(&a).unwrap().items.len(), 2);
}
