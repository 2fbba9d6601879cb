//! Season/episode reconciliation.
//!
//! The merge point of the engine: canonical metadata, a folder listing and
//! one source of truth go in, one ordered Season → Episode → File tree
//! comes out. Four sources produce the same shape, so the preview a
//! frontend renders is identical whether it shows persisted state, a
//! staged batch, or the answers of a recognition rule.
//!
//! Numbers, never array positions, are the merge key throughout: seasons
//! and episodes referenced by a source but absent from canonical metadata
//! are synthesized as zero-valued placeholders carrying the requested
//! numbers, and output is always sorted ascending on both axes.

use std::collections::BTreeMap;

use flickshelf_core::files::{ExtensionTable, FileKind, TaggedFile};
use flickshelf_core::mapping::MappingTable;
use flickshelf_core::media::{Episode, EpisodeModel, Season, SeasonModel, Show};
use flickshelf_core::paths;

use crate::associate::match_associated_files;
use crate::tasks::{RecognizeItem, RenameItem};

/// A rule-based single-file resolver: given the folder listing and a
/// (season, episode) pair, name the file that represents it, or `None`.
pub type EpisodeResolver<'a> = &'a dyn Fn(&[String], u32, u32) -> Option<String>;

/// Which source of truth drives the reconciliation.
pub enum ReconcileSource<'a> {
    /// Persisted file mappings: every canonical episode appears; episodes
    /// without a mapping get an empty file list.
    Persisted,
    /// A staged recognize batch: exactly the batch's (season, episode)
    /// pairs appear. Items are never dropped; unknown numbers get
    /// placeholder records.
    RecognizePlan(&'a [RecognizeItem]),
    /// A staged rename batch: items resolve to their episode through the
    /// mapping table keyed on `from`; a rename that cannot be traced to an
    /// episode is skipped.
    RenamePlan(&'a [RenameItem]),
    /// A recognition rule consulted for every canonical episode. The
    /// resolver's answer wins even where a mapping already exists, which is
    /// what "re-run recognition rules" means.
    Lookup(EpisodeResolver<'a>),
}

/// Everything the builder reads; the source decides how it is used.
pub struct ReconcileInput<'a> {
    pub folder_path: &'a str,
    pub files: &'a [String],
    pub show: &'a Show,
    pub mappings: &'a MappingTable,
    pub extensions: &'a ExtensionTable,
}

impl ReconcileInput<'_> {
    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            paths::join(self.folder_path, path)
        }
    }

    fn listing_contains(&self, path: &str) -> bool {
        let rel = paths::relative_to(self.folder_path, path);
        self.files
            .iter()
            .any(|f| paths::relative_to(self.folder_path, f) == rel)
    }

    /// The anchor video plus its sibling files, with staged rename paths
    /// derived from the anchor's when one is given.
    fn anchored_files(&self, anchor: &str, renamed_to: Option<&str>) -> Vec<TaggedFile> {
        let mut anchor_file = TaggedFile::new(FileKind::Video, self.absolute(anchor));
        if let Some(to) = renamed_to {
            anchor_file.new_path = Some(to.to_string());
        }

        let mut files = vec![anchor_file];
        for mut sibling in
            match_associated_files(self.folder_path, self.files, anchor, self.extensions)
        {
            if let Some(to) = renamed_to {
                sibling.new_path = Some(paths::sibling_new_path(to, &sibling.path));
            }
            files.push(sibling);
        }
        files
    }

    fn canonical_episode(&self, season: u32, episode: u32) -> Episode {
        self.show
            .episode(season, episode)
            .cloned()
            .unwrap_or_else(|| Episode::placeholder(episode))
    }
}

/// Build the ordered season/episode/file tree from one source of truth.
pub fn build_season_models(
    input: &ReconcileInput<'_>,
    source: ReconcileSource<'_>,
) -> Vec<SeasonModel> {
    let mut tree: BTreeMap<u32, BTreeMap<u32, EpisodeModel>> = BTreeMap::new();

    match source {
        ReconcileSource::Persisted => {
            for season in &input.show.seasons {
                for episode in &season.episodes {
                    let files = match input
                        .mappings
                        .by_episode(season.season_number, episode.episode_number)
                    {
                        Some(mapping) => input.anchored_files(&mapping.path, None),
                        None => Vec::new(),
                    };
                    tree.entry(season.season_number).or_default().insert(
                        episode.episode_number,
                        EpisodeModel {
                            episode: episode.clone(),
                            files,
                        },
                    );
                }
            }
        }

        ReconcileSource::RecognizePlan(items) => {
            for item in items {
                let episode = input.canonical_episode(item.season, item.episode);
                let files = input.anchored_files(&item.path, None);
                tree.entry(item.season)
                    .or_default()
                    .insert(item.episode, EpisodeModel { episode, files });
            }
        }

        ReconcileSource::RenamePlan(items) => {
            for item in items {
                if !input.listing_contains(&item.from) {
                    log::warn!("Skipping rename of {}: file not in folder listing", item.from);
                    continue;
                }
                let Some(mapping) = input.mappings.by_path(&item.from) else {
                    // A rename can't be previewed without knowing which
                    // episode it belongs to.
                    log::warn!("Skipping rename of {}: no episode mapping", item.from);
                    continue;
                };
                let episode =
                    input.canonical_episode(mapping.season_number, mapping.episode_number);
                let files = input.anchored_files(&item.from, Some(&item.to));
                tree.entry(mapping.season_number)
                    .or_default()
                    .insert(mapping.episode_number, EpisodeModel { episode, files });
            }
        }

        ReconcileSource::Lookup(resolver) => {
            for season in &input.show.seasons {
                for episode in &season.episodes {
                    let files =
                        match resolver(input.files, season.season_number, episode.episode_number)
                        {
                            Some(path) => input.anchored_files(&path, None),
                            None => Vec::new(),
                        };
                    tree.entry(season.season_number).or_default().insert(
                        episode.episode_number,
                        EpisodeModel {
                            episode: episode.clone(),
                            files,
                        },
                    );
                }
            }
        }
    }

    tree.into_iter()
        .map(|(number, episodes)| SeasonModel {
            season: input
                .show
                .season(number)
                .cloned()
                .unwrap_or_else(|| Season::placeholder(number)),
            episodes: episodes.into_values().collect(),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
