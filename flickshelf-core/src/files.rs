//! File classification: semantic kinds and the extension table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::paths;

/// Semantic kind of a file sitting next to (or being) an episode video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Video,
    Subtitle,
    Audio,
    /// Sidecar metadata descriptor (NFO).
    Descriptor,
    Poster,
    /// Anything that doesn't classify; never an error.
    Other,
}

impl FileKind {
    /// Map a short classifier code to a kind. Unknown or empty codes map to
    /// [`FileKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "video" => Self::Video,
            "subtitle" | "sub" => Self::Subtitle,
            "audio" => Self::Audio,
            "descriptor" | "nfo" => Self::Descriptor,
            "poster" | "image" => Self::Poster,
            _ => Self::Other,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Subtitle => "subtitle",
            Self::Audio => "audio",
            Self::Descriptor => "descriptor",
            Self::Poster => "poster",
            Self::Other => "file",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A file with its classification and, while a rename is staged, the path
/// it will move to. `new_path: None` means "no change".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedFile {
    pub kind: FileKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
}

impl TaggedFile {
    pub fn new(kind: FileKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            new_path: None,
        }
    }

    pub fn with_new_path(mut self, new_path: impl Into<String>) -> Self {
        self.new_path = Some(new_path.into());
        self
    }
}

/// Extension → kind classification table.
///
/// Carries compiled-in defaults; frontends may override individual kind
/// lists from settings. Lookups are case-insensitive on the extension.
#[derive(Debug, Clone)]
pub struct ExtensionTable {
    video: HashSet<String>,
    subtitle: HashSet<String>,
    audio: HashSet<String>,
    descriptor: HashSet<String>,
    poster: HashSet<String>,
}

const VIDEO_EXTS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "ts", "webm", "mpg", "mpeg",
];
const SUBTITLE_EXTS: &[&str] = &["srt", "ass", "ssa", "sub", "vtt", "idx", "sup"];
const AUDIO_EXTS: &[&str] = &["mka", "ac3", "dts", "aac", "flac", "mp3", "ogg"];
const DESCRIPTOR_EXTS: &[&str] = &["nfo"];
const POSTER_EXTS: &[&str] = &["jpg", "jpeg", "png", "tbn", "webp"];

fn to_set(exts: &[&str]) -> HashSet<String> {
    exts.iter().map(|e| e.to_string()).collect()
}

impl Default for ExtensionTable {
    fn default() -> Self {
        Self {
            video: to_set(VIDEO_EXTS),
            subtitle: to_set(SUBTITLE_EXTS),
            audio: to_set(AUDIO_EXTS),
            descriptor: to_set(DESCRIPTOR_EXTS),
            poster: to_set(POSTER_EXTS),
        }
    }
}

impl ExtensionTable {
    /// Replace the extension list for one kind. Extensions are stored
    /// lowercase without the leading dot. [`FileKind::Other`] has no list
    /// and is ignored.
    pub fn set_extensions(&mut self, kind: FileKind, exts: impl IntoIterator<Item = String>) {
        let set: HashSet<String> = exts
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        match kind {
            FileKind::Video => self.video = set,
            FileKind::Subtitle => self.subtitle = set,
            FileKind::Audio => self.audio = set,
            FileKind::Descriptor => self.descriptor = set,
            FileKind::Poster => self.poster = set,
            FileKind::Other => {}
        }
    }

    /// Classify a path by its final extension.
    pub fn classify(&self, path: &str) -> FileKind {
        let ext = paths::extension_of(path)
            .trim_start_matches('.')
            .to_ascii_lowercase();
        if self.video.contains(&ext) {
            FileKind::Video
        } else if self.subtitle.contains(&ext) {
            FileKind::Subtitle
        } else if self.audio.contains(&ext) {
            FileKind::Audio
        } else if self.descriptor.contains(&ext) {
            FileKind::Descriptor
        } else if self.poster.contains(&ext) {
            FileKind::Poster
        } else {
            FileKind::Other
        }
    }

    /// True when the path carries a known video extension.
    pub fn is_video(&self, path: &str) -> bool {
        self.classify(path) == FileKind::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(FileKind::from_tag("video"), FileKind::Video);
        assert_eq!(FileKind::from_tag("NFO"), FileKind::Descriptor);
        assert_eq!(FileKind::from_tag("poster"), FileKind::Poster);
        assert_eq!(FileKind::from_tag(""), FileKind::Other);
        assert_eq!(FileKind::from_tag("bogus"), FileKind::Other);
    }

    #[test]
    fn test_classify_defaults() {
        let table = ExtensionTable::default();
        assert_eq!(table.classify("/m/e1.mkv"), FileKind::Video);
        assert_eq!(table.classify("/m/e1.SRT"), FileKind::Subtitle);
        assert_eq!(table.classify("/m/e1.nfo"), FileKind::Descriptor);
        assert_eq!(table.classify("/m/poster.jpg"), FileKind::Poster);
        assert_eq!(table.classify("/m/e1.mka"), FileKind::Audio);
        assert_eq!(table.classify("/m/readme.txt"), FileKind::Other);
        assert_eq!(table.classify("/m/no_extension"), FileKind::Other);
    }

    #[test]
    fn test_set_extensions_override() {
        let mut table = ExtensionTable::default();
        table.set_extensions(FileKind::Video, vec![".MKV".to_string()]);
        assert!(table.is_video("/m/e1.mkv"));
        assert!(!table.is_video("/m/e1.mp4"));
    }
}
