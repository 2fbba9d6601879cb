//! Shared application settings.
//!
//! Frontends read the extension classification table from
//! `~/.config/flickshelf/settings.toml` so the CLI and any other host
//! classify files identically. Missing file or missing keys fall back to
//! the compiled-in defaults.
//!
//! ```toml
//! [extensions]
//! video = ["mkv", "mp4"]
//! subtitle = ["srt", "ass"]
//! ```

use std::path::PathBuf;

use flickshelf_core::files::{ExtensionTable, FileKind};

/// Canonical path to the settings file: `~/.config/flickshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("flickshelf").join("settings.toml")
}

/// Load the extension table: compiled-in defaults overridden by whatever
/// kind lists the settings file declares.
pub fn load_extension_table() -> ExtensionTable {
    let mut table = ExtensionTable::default();
    if let Ok(contents) = std::fs::read_to_string(settings_path()) {
        match contents.parse::<toml::Value>() {
            Ok(doc) => apply_overrides(&mut table, &doc),
            Err(e) => log::warn!("Ignoring malformed settings file: {e}"),
        }
    }
    table
}

fn apply_overrides(table: &mut ExtensionTable, doc: &toml::Value) {
    let Some(extensions) = doc.get("extensions").and_then(|v| v.as_table()) else {
        return;
    };

    for (key, kind) in [
        ("video", FileKind::Video),
        ("subtitle", FileKind::Subtitle),
        ("audio", FileKind::Audio),
        ("descriptor", FileKind::Descriptor),
        ("poster", FileKind::Poster),
    ] {
        if let Some(list) = extensions.get(key).and_then(|v| v.as_array()) {
            let exts: Vec<String> = list
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect();
            table.set_extensions(kind, exts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut table = ExtensionTable::default();
        let doc: toml::Value = r#"
[extensions]
video = ["mkv"]
subtitle = ["srt", "vtt"]
"#
        .parse()
        .unwrap();
        apply_overrides(&mut table, &doc);

        assert!(table.is_video("/m/a.mkv"));
        assert!(!table.is_video("/m/a.mp4"));
        assert_eq!(table.classify("/m/a.vtt"), FileKind::Subtitle);
        // Kinds without an override keep their defaults
        assert_eq!(table.classify("/m/a.nfo"), FileKind::Descriptor);
    }

    #[test]
    fn test_missing_section_keeps_defaults() {
        let mut table = ExtensionTable::default();
        let doc: toml::Value = "[library]\nroot = \"/media\"\n".parse().unwrap();
        apply_overrides(&mut table, &doc);
        assert!(table.is_video("/m/a.mp4"));
    }
}
