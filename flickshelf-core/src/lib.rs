//! Core data model for the flickshelf media organizer.
//!
//! Pure types and string-level path helpers shared by every other crate.
//! Nothing in here performs I/O; folders are described by pre-enumerated
//! file lists and all paths are POSIX-style forward-slash strings
//! (platform translation is the caller's concern).

pub mod files;
pub mod mapping;
pub mod media;
pub mod paths;

pub use files::{ExtensionTable, FileKind, TaggedFile};
pub use mapping::{EpisodeMapping, MappingTable};
pub use media::{Episode, EpisodeModel, MediaFolder, Season, SeasonModel, Show};
