use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use flickshelf_core::media::MediaFolder;
use flickshelf_core::paths;
use flickshelf_lib::Engine;
use flickshelf_nfo::CancelToken;

use crate::fs_source::{self, FsSource};

pub(crate) mod rename;
pub(crate) mod scan;

/// Spinner used while a folder is being read; hidden when stdout is not a
/// terminal (indicatif handles that itself).
fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Enumerate a folder and bootstrap canonical metadata from its
/// descriptors. Returns `None` with the reason logged when the folder
/// can't be read or isn't recognizable.
pub(crate) fn load_folder(engine: &Engine, path: &Path) -> Option<MediaFolder> {
    let folder_path = paths::normalize_slashes(&path.to_string_lossy());

    let pb = spinner("Scanning folder");
    let files = match fs_source::list_files(path) {
        Ok(files) => files,
        Err(e) => {
            pb.finish_and_clear();
            log::error!("Cannot read {}: {e}", path.display());
            return None;
        }
    };
    log::debug!("{} files in {folder_path}", files.len());

    pb.set_message("Reading descriptors");
    let folder = MediaFolder {
        path: folder_path,
        files,
        show: None,
        mappings: Default::default(),
    };
    let result = engine.bootstrap_from_descriptors(&folder, &FsSource, &CancelToken::never());
    pb.finish_and_clear();

    match result {
        Ok(Some(folder)) => Some(folder),
        Ok(None) => {
            log::warn!(
                "{}: not recognizable (no usable tvshow.nfo descriptor)",
                folder.path
            );
            None
        }
        Err(e) => {
            log::error!("Bootstrap failed for {}: {e}", folder.path);
            None
        }
    }
}
