use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use flickshelf_core::paths;
use flickshelf_lib::{Engine, ReconcileSource};

pub(crate) fn run_scan(engine: &Engine, path: &Path) {
    let Some(folder) = super::load_folder(engine, path) else {
        return;
    };
    let Some(show) = folder.show.as_ref() else {
        return;
    };

    let models = engine.build_season_models(
        &folder.path,
        &folder.files,
        show,
        &folder.mappings,
        ReconcileSource::Persisted,
    );

    log::info!(
        "{} {}",
        show.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", folder.path).if_supports_color(Stdout, |t| t.dimmed()),
    );

    let mut total = 0usize;
    let mut matched = 0usize;
    for model in &models {
        let header = if model.season.season_number == 0 {
            "Specials".to_string()
        } else {
            format!("Season {}", model.season.season_number)
        };
        log::info!("  {}", header.if_supports_color(Stdout, |t| t.cyan()));

        for ep in &model.episodes {
            total += 1;
            let name = if ep.episode.name.is_empty() {
                "(untitled)"
            } else {
                ep.episode.name.as_str()
            };

            match ep.files.first() {
                Some(video) => {
                    matched += 1;
                    log::info!(
                        "    E{:02} {} {}",
                        ep.episode.episode_number,
                        name,
                        format!("[{}]", paths::file_name_of(&video.path))
                            .if_supports_color(Stdout, |t| t.dimmed()),
                    );
                    for extra in &ep.files[1..] {
                        log::info!(
                            "         {} {}",
                            extra.kind,
                            paths::file_name_of(&extra.path)
                                .if_supports_color(Stdout, |t| t.dimmed()),
                        );
                    }
                }
                None => {
                    log::info!(
                        "    E{:02} {} {}",
                        ep.episode.episode_number,
                        name,
                        "missing".if_supports_color(Stdout, |t| t.yellow()),
                    );
                }
            }
        }
    }

    log::info!("");
    log::info!("{total} episodes, {matched} matched to files");
}
