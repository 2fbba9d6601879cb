//! Canonical show/season/episode records and the per-folder view models.
//!
//! Canonical metadata comes either from an external catalog or from the NFO
//! bootstrap; both produce these shapes. Seasons and episodes are keyed by
//! their numbers. Numbers may be sparse (season 0 holds specials) and are
//! preserved exactly, never re-derived from array position.

use serde::{Deserialize, Serialize};

use crate::files::TaggedFile;
use crate::mapping::MappingTable;

/// One canonical episode record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// External catalog identifier; 0 when unknown.
    pub id: u64,
    pub episode_number: u32,
    pub name: String,
    pub overview: String,
    /// Air date as an opaque `YYYY-MM-DD` string; empty when unknown.
    pub aired: String,
    pub rating: f32,
    pub runtime_minutes: u32,
    /// Still-frame image path or URL path component; empty when unknown.
    pub still_path: String,
}

impl Episode {
    /// A zero-valued placeholder carrying only a requested episode number.
    /// Used when a pending operation references an episode that canonical
    /// metadata doesn't know about yet.
    pub fn placeholder(episode_number: u32) -> Self {
        Self {
            episode_number,
            ..Self::default()
        }
    }
}

/// One canonical season record. `episodes` is kept sorted ascending by
/// episode number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub season_number: u32,
    pub name: String,
    pub overview: String,
    pub poster_path: String,
    pub episodes: Vec<Episode>,
}

impl Season {
    /// A number-only season synthesized when a referenced season number is
    /// absent from canonical metadata.
    pub fn placeholder(season_number: u32) -> Self {
        Self {
            season_number,
            ..Self::default()
        }
    }

    pub fn episode(&self, episode_number: u32) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.episode_number == episode_number)
    }
}

/// Canonical show metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// External catalog identifier; 0 when only bootstrapped locally.
    pub id: u64,
    pub name: String,
    pub overview: String,
    pub poster_path: String,
    pub rating: f32,
    /// Production status ("Ended", "Returning Series", ...); empty when unknown.
    pub status: String,
    pub seasons: Vec<Season>,
}

impl Show {
    pub fn season(&self, season_number: u32) -> Option<&Season> {
        self.seasons
            .iter()
            .find(|s| s.season_number == season_number)
    }

    pub fn episode(&self, season_number: u32, episode_number: u32) -> Option<&Episode> {
        self.season(season_number)?.episode(episode_number)
    }
}

/// A media folder: its normalized absolute path, the flat file listing a
/// collaborator enumerated for it, and whatever metadata is known so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaFolder {
    pub path: String,
    /// Relative or absolute forward-slash file paths.
    pub files: Vec<String>,
    pub show: Option<Show>,
    pub mappings: MappingTable,
}

/// One episode with the on-disk files currently associated with it.
/// `files` is empty when no video has been matched to the episode yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeModel {
    pub episode: Episode,
    pub files: Vec<TaggedFile>,
}

/// One season with its episode view models, episodes sorted ascending by
/// episode number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonModel {
    pub season: Season,
    pub episodes: Vec<EpisodeModel>,
}
