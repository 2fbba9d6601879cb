//! Persisted file → episode associations.

use serde::{Deserialize, Serialize};

/// Records that an on-disk file currently represents a specific episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeMapping {
    /// Absolute, forward-slash path of the video file.
    pub path: String,
    pub season_number: u32,
    pub episode_number: u32,
}

impl EpisodeMapping {
    pub fn new(path: impl Into<String>, season_number: u32, episode_number: u32) -> Self {
        Self {
            path: path.into(),
            season_number,
            episode_number,
        }
    }
}

/// The set of mappings for one media folder.
///
/// Invariant: at most one mapping per (season, episode) pair and at most one
/// per path. Insertion is last-write-wins on both axes: a new mapping
/// evicts any prior entry that collides on either key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingTable {
    entries: Vec<EpisodeMapping>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mapping: EpisodeMapping) {
        self.entries.retain(|m| {
            m.path != mapping.path
                && (m.season_number != mapping.season_number
                    || m.episode_number != mapping.episode_number)
        });
        self.entries.push(mapping);
    }

    pub fn by_episode(&self, season_number: u32, episode_number: u32) -> Option<&EpisodeMapping> {
        self.entries
            .iter()
            .find(|m| m.season_number == season_number && m.episode_number == episode_number)
    }

    pub fn by_path(&self, path: &str) -> Option<&EpisodeMapping> {
        self.entries.iter().find(|m| m.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpisodeMapping> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<EpisodeMapping> for MappingTable {
    fn from_iter<T: IntoIterator<Item = EpisodeMapping>>(iter: T) -> Self {
        let mut table = Self::new();
        for m in iter {
            table.insert(m);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut table = MappingTable::new();
        table.insert(EpisodeMapping::new("/m/e1.mkv", 1, 1));
        table.insert(EpisodeMapping::new("/m/e2.mkv", 1, 2));

        assert_eq!(table.len(), 2);
        assert_eq!(table.by_episode(1, 1).unwrap().path, "/m/e1.mkv");
        assert_eq!(table.by_path("/m/e2.mkv").unwrap().episode_number, 2);
        assert!(table.by_episode(2, 1).is_none());
    }

    #[test]
    fn test_insert_evicts_on_episode_key() {
        let mut table = MappingTable::new();
        table.insert(EpisodeMapping::new("/m/old.mkv", 1, 1));
        table.insert(EpisodeMapping::new("/m/new.mkv", 1, 1));

        assert_eq!(table.len(), 1);
        assert_eq!(table.by_episode(1, 1).unwrap().path, "/m/new.mkv");
        assert!(table.by_path("/m/old.mkv").is_none());
    }

    #[test]
    fn test_insert_evicts_on_path_key() {
        let mut table = MappingTable::new();
        table.insert(EpisodeMapping::new("/m/e1.mkv", 1, 1));
        // Same file re-recognized as a different episode
        table.insert(EpisodeMapping::new("/m/e1.mkv", 1, 5));

        assert_eq!(table.len(), 1);
        assert!(table.by_episode(1, 1).is_none());
        assert_eq!(table.by_path("/m/e1.mkv").unwrap().episode_number, 5);
    }

    #[test]
    fn test_insert_evicts_on_both_keys_at_once() {
        let mut table = MappingTable::new();
        table.insert(EpisodeMapping::new("/m/a.mkv", 1, 1));
        table.insert(EpisodeMapping::new("/m/b.mkv", 1, 2));
        // Collides with a's path-partner episode AND b's path
        table.insert(EpisodeMapping::new("/m/b.mkv", 1, 1));

        assert_eq!(table.len(), 1);
        let only = table.by_path("/m/b.mkv").unwrap();
        assert_eq!((only.season_number, only.episode_number), (1, 1));
    }
}
