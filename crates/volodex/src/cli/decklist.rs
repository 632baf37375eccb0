//! Deck-list parsing.
//!
//! Accepts the plain-text export most deck builders produce:
//!
//! ```text
//! Commander
//! 1 Tatyova, Benthic Druid *CMDR*
//!
//! Deck
//! 1x Llanowar Elves (M19) 314
//! 1 Fire // Ice
//! SB: 2 Spell Pierce
//! ```

use std::path::Path;

use tracing::{debug, info, warn};
use volodex_core::DeckListNames;

use super::error::HelpfulError;

const SECTION_HEADERS: &[&str] = &[
    "deck",
    "main",
    "mainboard",
    "main deck",
    "sideboard",
    "commander",
    "commanders",
    "companion",
    "maybeboard",
    "considering",
];

/// Split-card separator, e.g. "Fire // Ice".
const FACE_SEPARATOR: &str = " // ";

/// Markers after which the rest of a line is set or printing information.
const TRAILING_MARKERS: &[&str] = &[" (", " [", " *", " #"];

/// Extensions deck builders export to.
const DECK_FILE_EXTENSIONS: &[&str] = &["txt", "dek", "dec", "dck"];

/// Resolve the `run` argument: a path when such a file exists, otherwise
/// inline deck text. `None` yields an empty deck list.
pub fn load(source: Option<&str>) -> Result<DeckListNames, HelpfulError> {
    let Some(source) = source else {
        return Ok(DeckListNames::new());
    };

    let path = Path::new(source);
    if path.is_file() {
        let text = std::fs::read_to_string(path)
            .map_err(|e| HelpfulError::deck_list_unreadable(path, &e.to_string()))?;
        let names = parse(&text);
        info!(path = %path.display(), names = names.len(), "loaded deck list file");
        return Ok(names);
    }

    if let Some(notice) = unreadable_location(source) {
        warn!(source, %notice, "deck list argument is not a readable file");
    }
    let names = parse(source);
    info!(names = names.len(), "parsed inline deck list");
    Ok(names)
}

/// A notice when `source` reads like a URL or a file path but names no
/// readable file. URLs are never fetched.
pub fn unreadable_location(source: &str) -> Option<String> {
    let source = source.trim();
    if source.contains('\n') || Path::new(source).is_file() {
        return None;
    }

    if source.contains("://") {
        return Some(format!(
            "Deck list URLs are not fetched; {} was read as a card name",
            source
        ));
    }

    let has_separator = !source.contains(FACE_SEPARATOR) && source.contains(['/', '\\']);
    let has_deck_extension = Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DECK_FILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    (has_separator || has_deck_extension).then(|| {
        format!(
            "No deck list file at {}; it was read as a card name",
            source
        )
    })
}

/// Extract card names from deck-list text.
pub fn parse(text: &str) -> DeckListNames {
    let mut names = DeckListNames::new();

    for raw in text.lines() {
        let Some(name) = card_name(raw) else {
            continue;
        };
        if name.contains(FACE_SEPARATOR) {
            names.extend(
                name.split(FACE_SEPARATOR)
                    .map(str::trim)
                    .filter(|face| !face.is_empty())
                    .map(str::to_string),
            );
        }
        names.insert(name.to_string());
    }

    debug!(count = names.len(), "deck list names");
    names
}

fn card_name(line: &str) -> Option<&str> {
    let mut line = line.trim();
    if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
        return None;
    }
    if is_section_header(line) {
        return None;
    }

    if let Some(rest) = strip_prefix_ignore_case(line, "SB:") {
        line = rest.trim_start();
    }
    line = strip_count(line);

    for marker in TRAILING_MARKERS {
        if let Some(pos) = line.find(marker) {
            line = &line[..pos];
        }
    }

    let line = line.trim();
    (!line.is_empty()).then_some(line)
}

fn is_section_header(line: &str) -> bool {
    let header = line.trim_end_matches(':').trim().to_ascii_lowercase();
    let header = header
        .split_once(" (")
        .map_or(header.as_str(), |(head, _)| head);
    SECTION_HEADERS.contains(&header)
}

/// Drop a leading quantity such as `4 ` or `4x `.
fn strip_count(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    let rest = rest
        .strip_prefix('x')
        .or_else(|| rest.strip_prefix('X'))
        .unwrap_or(rest);
    if rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        line
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}
