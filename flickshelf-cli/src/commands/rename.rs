use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use flickshelf_core::media::Show;
use flickshelf_core::paths;
use flickshelf_lib::{
    EndOutcome, Engine, ReconcileSource, RenameItem, TaskItem, TaskItems, TaskKind,
};

use crate::fs_source;

/// Replace characters that are unsafe in file names.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect()
}

/// Canonical stem for an episode file: `Show - S01E02 - Title`.
fn canonical_stem(show: &Show, season: u32, episode: u32, title: &str) -> String {
    let mut stem = format!("{} - S{season:02}E{episode:02}", show.name);
    if !title.is_empty() {
        stem.push_str(" - ");
        stem.push_str(title);
    }
    sanitize(&stem)
}

pub(crate) fn run_rename(engine: &mut Engine, path: &Path, dry_run: bool) {
    let Some(folder) = super::load_folder(engine, path) else {
        return;
    };
    let Some(show) = folder.show.clone() else {
        return;
    };

    // Plan: one rename per mapped episode whose file name differs from the
    // canonical one. Unmapped episodes can't be renamed; they have no file.
    let mut items = Vec::new();
    let mut already_correct = 0usize;
    let mut unmatched = 0usize;
    for season in &show.seasons {
        for episode in &season.episodes {
            let Some(mapping) = folder
                .mappings
                .by_episode(season.season_number, episode.episode_number)
            else {
                unmatched += 1;
                continue;
            };
            let stem = canonical_stem(
                &show,
                season.season_number,
                episode.episode_number,
                &episode.name,
            );
            let ext = paths::extension_of(&mapping.path);
            let target = paths::join(paths::parent_of(&mapping.path), &format!("{stem}{ext}"));
            if target == mapping.path {
                already_correct += 1;
            } else {
                items.push(RenameItem {
                    from: mapping.path.clone(),
                    to: target,
                });
            }
        }
    }

    if items.is_empty() {
        log::info!("Nothing to rename ({already_correct} already correct, {unmatched} unmatched)");
        return;
    }

    // Preview: the same tree any frontend renders, sidecars included
    log::info!(
        "{} {}",
        show.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", folder.path).if_supports_color(Stdout, |t| t.dimmed()),
    );
    let models = engine.build_season_models(
        &folder.path,
        &folder.files,
        &show,
        &folder.mappings,
        ReconcileSource::RenamePlan(&items),
    );
    for model in &models {
        for ep in &model.episodes {
            for file in &ep.files {
                if let Some(new_path) = &file.new_path {
                    log::info!(
                        "  {} {} {}",
                        paths::file_name_of(&file.path),
                        "->".if_supports_color(Stdout, |t| t.dimmed()),
                        paths::file_name_of(new_path).if_supports_color(Stdout, |t| t.green()),
                    );
                }
            }
        }
    }
    log::info!(
        "{} planned, {already_correct} already correct, {unmatched} unmatched",
        items.len(),
    );

    if dry_run {
        log::info!(
            "{}",
            "Dry run: no files were renamed".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    // Stage the batch; only a finalized task gets executed.
    let task_id = match engine.begin_task(TaskKind::Rename, &folder.path) {
        Ok(id) => id,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    for item in &items {
        if let Err(e) = engine.add_item(&task_id, TaskItem::Rename(item.clone())) {
            log::warn!("Skipping {}: {e}", item.from);
        }
    }
    let finalized = match engine.end_task(&task_id) {
        EndOutcome::Completed(task) => task,
        outcome => {
            log::error!("{}", outcome.error_message().unwrap_or("Task failed"));
            return;
        }
    };
    let TaskItems::Rename(final_items) = &finalized.items else {
        return;
    };

    // Execute: each video plus its sidecars. Per-item failures are
    // collected, never fatal for the rest of the batch.
    let pb = super::spinner("Renaming");
    let mut renamed = 0usize;
    let mut errors: Vec<String> = Vec::new();
    for item in final_items {
        pb.set_message(format!("Renaming {}", paths::file_name_of(&item.from)));
        match fs_source::execute_rename(&item.from, &item.to) {
            Ok(()) => {
                renamed += 1;
                for sibling in
                    engine.match_associated_files(&folder.path, &folder.files, &item.from)
                {
                    let target = paths::sibling_new_path(&item.to, &sibling.path);
                    match fs_source::execute_rename(&sibling.path, &target) {
                        Ok(()) => renamed += 1,
                        Err(e) => errors.push(e),
                    }
                }
            }
            Err(e) => errors.push(e),
        }
    }
    pb.finish_and_clear();

    if errors.is_empty() {
        log::info!("{renamed} files renamed");
    } else {
        log::warn!("{renamed} files renamed, {} failed", errors.len());
        for e in &errors {
            log::warn!("  {e}");
        }
    }
}
