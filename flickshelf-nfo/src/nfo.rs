//! NFO sidecar descriptor parsing.
//!
//! Kodi/Jellyfin-style XML descriptors: one folder-level `tvshow.nfo` plus
//! one `<name>.nfo` per episode file. Parsed with a flat event walk: a
//! small set of named fields is extracted, everything else is ignored, and
//! missing fields fall back to empty/zero rather than failing.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::NfoError;

/// Folder-level show descriptor, reduced to the fields flickshelf uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowNfo {
    pub title: String,
    pub plot: String,
    pub rating: f32,
    pub status: String,
    /// Poster path component (full catalog URLs are reduced, see
    /// [`image_path_of`]).
    pub thumb: String,
    /// Resolved external id; 0 when the descriptor carries none.
    pub external_id: u64,
}

/// Per-episode descriptor, reduced to the fields flickshelf uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeNfo {
    pub title: String,
    pub plot: String,
    pub season: u32,
    pub episode: u32,
    /// Air date; `<premiered>` is preferred over `<aired>` when both exist.
    pub aired: String,
    pub rating: f32,
    pub runtime_minutes: u32,
    pub still: String,
    /// The file this descriptor was generated for, as declared by the
    /// descriptor itself. Resolved against the folder listing during
    /// bootstrap; may be empty.
    pub original_filename: String,
    pub external_id: u64,
}

/// External-id candidates in preference order: a typed `<uniqueid
/// type="tmdb">` beats an untyped/other `<uniqueid>`, which beats the
/// legacy `<id>` field. Within a tier the first occurrence wins.
#[derive(Debug, Default)]
struct IdCandidates {
    tmdb: u64,
    unique: u64,
    legacy: u64,
}

impl IdCandidates {
    fn record_unique(&mut self, id_type: &str, value: u64) {
        if value == 0 {
            return;
        }
        if id_type.eq_ignore_ascii_case("tmdb") {
            if self.tmdb == 0 {
                self.tmdb = value;
            }
        } else if self.unique == 0 {
            self.unique = value;
        }
    }

    fn resolve(&self) -> u64 {
        if self.tmdb != 0 {
            self.tmdb
        } else if self.unique != 0 {
            self.unique
        } else {
            self.legacy
        }
    }
}

fn parse_num<T: std::str::FromStr + Default>(text: &str) -> T {
    text.trim().parse().unwrap_or_default()
}

fn type_attr(e: &quick_xml::events::BytesStart<'_>) -> Result<String, NfoError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"type" {
            return Ok(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    Ok(String::new())
}

/// Reduce a full catalog image URL to its path component.
///
/// Catalog URLs have the fixed shape `.../t/p/{size}/{path}`; the `{path}`
/// part (with its leading slash) is what gets stored. Values without that
/// shape are accepted as-is.
pub fn image_path_of(value: &str) -> String {
    const MARKER: &str = "/t/p/";
    if let Some(idx) = value.find(MARKER) {
        let after = &value[idx + MARKER.len()..];
        if let Some(slash) = after.find('/') {
            return after[slash..].to_string();
        }
    }
    value.to_string()
}

/// Parse a folder-level `tvshow.nfo` descriptor.
///
/// Fails only on malformed XML or an unexpected root element; missing
/// fields default to empty/zero.
pub fn parse_show_nfo(text: &str) -> Result<ShowNfo, NfoError> {
    let mut xml = Reader::from_str(text);
    xml.config_mut().trim_text(true);

    let mut nfo = ShowNfo::default();
    let mut ids = IdCandidates::default();
    let mut current_tag = String::new();
    let mut current_id_type = String::new();
    let mut saw_root = false;

    loop {
        match xml.read_event()? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if !saw_root {
                    if tag != "tvshow" {
                        return Err(NfoError::invalid(format!(
                            "unexpected root element <{tag}> in show descriptor"
                        )));
                    }
                    saw_root = true;
                    continue;
                }
                if tag == "uniqueid" {
                    current_id_type = type_attr(e)?;
                }
                current_tag = tag;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                match current_tag.as_str() {
                    "title" => nfo.title = text,
                    "plot" => nfo.plot = text,
                    "rating" => nfo.rating = parse_num(&text),
                    "status" => nfo.status = text,
                    "thumb" => nfo.thumb = image_path_of(&text),
                    "uniqueid" => ids.record_unique(&current_id_type, parse_num(&text)),
                    "id" => {
                        if ids.legacy == 0 {
                            ids.legacy = parse_num(&text);
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => current_tag.clear(),
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(NfoError::invalid("show descriptor has no root element"));
    }

    nfo.external_id = ids.resolve();
    Ok(nfo)
}

/// Parse a per-episode `<name>.nfo` descriptor.
///
/// Same field-default rules as [`parse_show_nfo`]; the air date prefers
/// `<premiered>` over `<aired>`.
pub fn parse_episode_nfo(text: &str) -> Result<EpisodeNfo, NfoError> {
    let mut xml = Reader::from_str(text);
    xml.config_mut().trim_text(true);

    let mut nfo = EpisodeNfo::default();
    let mut ids = IdCandidates::default();
    let mut premiered = String::new();
    let mut aired = String::new();
    let mut current_tag = String::new();
    let mut current_id_type = String::new();
    let mut saw_root = false;

    loop {
        match xml.read_event()? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if !saw_root {
                    if tag != "episodedetails" {
                        return Err(NfoError::invalid(format!(
                            "unexpected root element <{tag}> in episode descriptor"
                        )));
                    }
                    saw_root = true;
                    continue;
                }
                if tag == "uniqueid" {
                    current_id_type = type_attr(e)?;
                }
                current_tag = tag;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                match current_tag.as_str() {
                    "title" => nfo.title = text,
                    "plot" => nfo.plot = text,
                    "season" => nfo.season = parse_num(&text),
                    "episode" => nfo.episode = parse_num(&text),
                    "premiered" => premiered = text,
                    "aired" => aired = text,
                    "rating" => nfo.rating = parse_num(&text),
                    "runtime" => nfo.runtime_minutes = parse_num(&text),
                    "thumb" => nfo.still = image_path_of(&text),
                    "original_filename" => nfo.original_filename = text,
                    "uniqueid" => ids.record_unique(&current_id_type, parse_num(&text)),
                    "id" => {
                        if ids.legacy == 0 {
                            ids.legacy = parse_num(&text);
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => current_tag.clear(),
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(NfoError::invalid("episode descriptor has no root element"));
    }

    nfo.aired = if premiered.is_empty() { aired } else { premiered };
    nfo.external_id = ids.resolve();
    Ok(nfo)
}

#[cfg(test)]
#[path = "tests/nfo_tests.rs"]
mod tests;
