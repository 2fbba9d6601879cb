//! Canonical-metadata bootstrap from sidecar descriptors.
//!
//! When a folder has no external catalog identifier yet, its descriptors
//! are the only source of truth: the folder-level `tvshow.nfo` establishes
//! show identity, and each per-episode descriptor contributes one canonical
//! episode plus (when its declared original file is still present) a
//! file-to-episode mapping. One bad episode descriptor never aborts the
//! folder; a bad folder-level descriptor makes the folder "not
//! recognizable".

use std::collections::BTreeMap;

use flickshelf_core::mapping::EpisodeMapping;
use flickshelf_core::media::{Episode, Season, Show};
use flickshelf_core::paths;

use crate::cancel::CancelToken;
use crate::error::NfoError;
use crate::nfo::{EpisodeNfo, ShowNfo, parse_episode_nfo, parse_show_nfo};

/// File name that marks the folder-level show descriptor.
pub const SHOW_DESCRIPTOR_NAME: &str = "tvshow.nfo";

/// Byte source for descriptor files: the seam to the collaborator that
/// actually reads text (filesystem, archive, remote share).
pub trait DescriptorSource {
    fn read_text(&self, path: &str) -> Result<String, NfoError>;
}

/// Result of a successful bootstrap: show metadata (possibly without any
/// episodes, a valid partial state) and whatever file mappings the
/// descriptors resolved.
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    pub show: Show,
    pub mappings: Vec<EpisodeMapping>,
}

fn absolute_in(folder: &str, file: &str) -> String {
    if file.starts_with('/') {
        file.to_string()
    } else {
        paths::join(folder, file)
    }
}

fn is_descriptor(path: &str) -> bool {
    paths::extension_of(path).eq_ignore_ascii_case(".nfo")
}

fn show_from_nfo(nfo: ShowNfo, seasons: Vec<Season>) -> Show {
    Show {
        id: nfo.external_id,
        name: nfo.title,
        overview: nfo.plot,
        poster_path: nfo.thumb,
        rating: nfo.rating,
        status: nfo.status,
        seasons,
    }
}

fn episode_from_nfo(nfo: &EpisodeNfo) -> Episode {
    Episode {
        id: nfo.external_id,
        episode_number: nfo.episode,
        name: nfo.title.clone(),
        overview: nfo.plot.clone(),
        aired: nfo.aired.clone(),
        rating: nfo.rating,
        runtime_minutes: nfo.runtime_minutes,
        still_path: nfo.still.clone(),
    }
}

/// Bootstrap canonical metadata for one folder from its descriptors.
///
/// Returns `Ok(None)` when the folder is not recognizable: no folder-level
/// descriptor, or a malformed one. Per-episode descriptor failures are
/// logged and skipped. Cancellation between descriptor reads returns
/// [`NfoError::Cancelled`] and discards everything built so far.
pub fn bootstrap_folder(
    folder_path: &str,
    files: &[String],
    source: &dyn DescriptorSource,
    cancel: &CancelToken,
) -> Result<Option<BootstrapOutcome>, NfoError> {
    let show_file = match files
        .iter()
        .find(|f| paths::file_name_of(f).eq_ignore_ascii_case(SHOW_DESCRIPTOR_NAME))
    {
        Some(f) => f,
        None => return Ok(None),
    };

    if cancel.is_cancelled() {
        return Err(NfoError::Cancelled);
    }

    let show_text = source.read_text(&absolute_in(folder_path, show_file))?;
    let show_nfo = match parse_show_nfo(&show_text) {
        Ok(nfo) => nfo,
        Err(e) => {
            log::warn!("Malformed show descriptor {show_file}: {e}");
            return Ok(None);
        }
    };

    // Per-episode descriptors, sorted so the outcome is deterministic
    // regardless of listing order.
    let mut episode_files: Vec<&String> = files
        .iter()
        .filter(|f| {
            is_descriptor(f)
                && !paths::file_name_of(f).eq_ignore_ascii_case(SHOW_DESCRIPTOR_NAME)
        })
        .collect();
    episode_files.sort();

    if episode_files.is_empty() {
        // Partial bootstrap: folder identity known, episodes unknown.
        log::debug!("Bootstrap of {folder_path}: show descriptor only, no episodes");
        return Ok(Some(BootstrapOutcome {
            show: show_from_nfo(show_nfo, Vec::new()),
            mappings: Vec::new(),
        }));
    }

    let mut by_season: BTreeMap<u32, BTreeMap<u32, Episode>> = BTreeMap::new();
    let mut mappings = Vec::new();

    for file in episode_files {
        if cancel.is_cancelled() {
            return Err(NfoError::Cancelled);
        }

        let text = match source.read_text(&absolute_in(folder_path, file)) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Skipping descriptor {file}: {e}");
                continue;
            }
        };
        let nfo = match parse_episode_nfo(&text) {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Skipping malformed descriptor {file}: {e}");
                continue;
            }
        };

        if !nfo.original_filename.is_empty() {
            match files.iter().find(|f| f.ends_with(&nfo.original_filename)) {
                Some(found) => mappings.push(EpisodeMapping::new(
                    absolute_in(folder_path, found),
                    nfo.season,
                    nfo.episode,
                )),
                None => log::warn!(
                    "Descriptor {file} names missing file {}",
                    nfo.original_filename
                ),
            }
        }

        by_season
            .entry(nfo.season)
            .or_default()
            .insert(nfo.episode, episode_from_nfo(&nfo));
    }

    let seasons = by_season
        .into_iter()
        .map(|(number, episodes)| Season {
            season_number: number,
            episodes: episodes.into_values().collect(),
            ..Season::default()
        })
        .collect();

    Ok(Some(BootstrapOutcome {
        show: show_from_nfo(show_nfo, seasons),
        mappings,
    }))
}

#[cfg(test)]
#[path = "tests/bootstrap_tests.rs"]
mod tests;
