//! Forward-slash path string helpers.
//!
//! Every path that crosses the flickshelf boundary is a POSIX-style string,
//! so these helpers operate on the string form directly instead of
//! round-tripping through `PathBuf`. Used by the association matcher and
//! the rename planner.

/// Convert backslashes to forward slashes and drop a trailing slash
/// (the filesystem root `/` is left alone).
pub fn normalize_slashes(path: &str) -> String {
    let mut out = path.replace('\\', "/");
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// The final path segment, or the whole string when there is no slash.
pub fn file_name_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Everything before the final path segment, without the trailing slash.
/// Returns `""` for bare file names.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The final dot-extension including the dot (`".srt"`), or `""` when the
/// file name has none. A leading dot (`".hidden"`) does not count as an
/// extension separator.
pub fn extension_of(path: &str) -> &str {
    let name = file_name_of(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

/// The file name without its final extension. Dotted qualifiers before the
/// final extension stay in place: `stem_of("a.en.forced.srt")` is
/// `"a.en.forced"`.
pub fn stem_of(path: &str) -> &str {
    let name = file_name_of(path);
    let ext = extension_of(path);
    &name[..name.len() - ext.len()]
}

/// Join a folder path and a relative segment with exactly one slash.
/// An empty side yields the other side unchanged.
pub fn join(base: &str, rel: &str) -> String {
    if base.is_empty() {
        return rel.to_string();
    }
    if rel.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), rel.trim_start_matches('/'))
}

/// Strip `folder` (plus the separating slash) from the front of `path`.
/// Paths that don't live under `folder` come back unchanged; they are
/// treated as already relative.
pub fn relative_to<'a>(folder: &str, path: &'a str) -> &'a str {
    if folder.is_empty() {
        return path;
    }
    let folder = folder.trim_end_matches('/');
    match path.strip_prefix(folder) {
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
        None => path,
    }
}

/// Compute a sidecar file's post-rename path, given the anchor video's new
/// path and the sidecar's current path.
///
/// The sidecar keeps its own directory and final extension; its entire stem
/// (including dotted qualifiers such as `.en.forced`) is replaced by the
/// anchor's new stem, so the sidecar mirrors the video's new name exactly.
pub fn sibling_new_path(anchor_new: &str, other_old: &str) -> String {
    let new_stem = stem_of(anchor_new);
    let ext = extension_of(other_old);
    let dir = parent_of(other_old);
    if dir.is_empty() {
        format!("{new_stem}{ext}")
    } else {
        join(dir, &format!("{new_stem}{ext}"))
    }
}

#[cfg(test)]
#[path = "tests/paths_tests.rs"]
mod tests;
