//! Sibling-file association.
//!
//! A video rarely travels alone: subtitles, external audio, the NFO
//! descriptor and a still image usually share its base name. Matching is
//! purely name-based (directory plus stem must be byte-equal after the
//! final extension is stripped), so it works the same whether or not the
//! anchor itself appears in the listing.

use flickshelf_core::files::{ExtensionTable, TaggedFile};
use flickshelf_core::paths;

fn strip_final_ext(rel: &str) -> &str {
    let ext = paths::extension_of(rel);
    &rel[..rel.len() - ext.len()]
}

/// Find every file in `files` that shares the anchor's directory and stem.
///
/// The anchor is excluded from the result. Matches come back in listing
/// order as absolute paths, classified through `extensions`, with no
/// staged rename. A missing or empty listing yields an empty result.
pub fn match_associated_files(
    folder_path: &str,
    files: &[String],
    anchor_path: &str,
    extensions: &ExtensionTable,
) -> Vec<TaggedFile> {
    if files.is_empty() {
        return Vec::new();
    }

    let anchor_rel = paths::relative_to(folder_path, anchor_path);
    let anchor_key = strip_final_ext(anchor_rel);

    let mut matches = Vec::new();
    for file in files {
        let rel = paths::relative_to(folder_path, file);
        if rel == anchor_rel {
            continue;
        }
        if strip_final_ext(rel) == anchor_key {
            matches.push(TaggedFile::new(
                extensions.classify(rel),
                paths::join(folder_path, rel),
            ));
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use flickshelf_core::files::FileKind;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sibling_matched_others_excluded() {
        let table = ExtensionTable::default();
        let files = strings(&["S01E01.mkv", "S01E01.srt", "S01E02.mkv"]);
        let matches =
            match_associated_files("/media/show", &files, "S01E01.mkv", &table);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, FileKind::Subtitle);
        assert_eq!(matches[0].path, "/media/show/S01E01.srt");
        assert!(matches[0].new_path.is_none());
    }

    #[test]
    fn test_matching_is_order_independent() {
        let table = ExtensionTable::default();
        let files = strings(&["S01E01.srt", "S01E02.mkv", "S01E01.mkv"]);
        let matches =
            match_associated_files("/media/show", &files, "S01E01.mkv", &table);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "/media/show/S01E01.srt");
    }

    #[test]
    fn test_all_kinds_classified() {
        let table = ExtensionTable::default();
        let files = strings(&[
            "e1.mkv", "e1.srt", "e1.mka", "e1.nfo", "e1.jpg", "e1.dat",
        ]);
        let matches = match_associated_files("/m", &files, "e1.mkv", &table);
        let kinds: Vec<FileKind> = matches.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FileKind::Subtitle,
                FileKind::Audio,
                FileKind::Descriptor,
                FileKind::Poster,
                FileKind::Other,
            ]
        );
    }

    #[test]
    fn test_anchor_absent_from_listing_still_matches() {
        let table = ExtensionTable::default();
        let files = strings(&["S01E01.srt"]);
        let matches =
            match_associated_files("/media/show", &files, "S01E01.mkv", &table);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_empty_listing_yields_empty() {
        let table = ExtensionTable::default();
        assert!(match_associated_files("/media/show", &[], "S01E01.mkv", &table).is_empty());
    }

    #[test]
    fn test_absolute_anchor_and_relative_listing() {
        let table = ExtensionTable::default();
        let files = strings(&["S01E01.srt"]);
        let matches = match_associated_files(
            "/media/show",
            &files,
            "/media/show/S01E01.mkv",
            &table,
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "/media/show/S01E01.srt");
    }

    #[test]
    fn test_stem_match_is_exact() {
        let table = ExtensionTable::default();
        // "S01E01 " and "S01E010" must not match "S01E01"
        let files = strings(&["S01E010.srt", "sub/S01E01.srt"]);
        let matches =
            match_associated_files("/media/show", &files, "S01E01.mkv", &table);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_subdirectory_anchor() {
        let table = ExtensionTable::default();
        let files = strings(&["s1/e1.mkv", "s1/e1.srt", "e1.srt"]);
        let matches = match_associated_files("/m", &files, "s1/e1.mkv", &table);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "/m/s1/e1.srt");
    }
}
