//! Sidecar NFO descriptor support for flickshelf.
//!
//! Parses Kodi/Jellyfin-style `tvshow.nfo` / per-episode `.nfo` files and
//! bootstraps canonical show metadata from them when no external catalog
//! identifier is known yet.

pub mod bootstrap;
pub mod cancel;
pub mod error;
pub mod nfo;

pub use bootstrap::{BootstrapOutcome, DescriptorSource, SHOW_DESCRIPTOR_NAME, bootstrap_folder};
pub use cancel::{CancelSource, CancelToken, cancel_pair};
pub use error::NfoError;
pub use nfo::{EpisodeNfo, ShowNfo, image_path_of, parse_episode_nfo, parse_show_nfo};
